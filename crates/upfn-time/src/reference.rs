//! Go reference-time layouts.
//!
//! A reference layout writes the instant `Mon Jan 2 15:04:05 MST 2006` the
//! way timestamps should look, so `02/01/2006` means day, month and year
//! separated by slashes. [`chunks`] splits such a layout into literal text
//! and the [`Element`]s it recognises.

/// Reference spelling of RFC 3339.
pub const RFC3339: &str = "2006-01-02T15:04:05Z07:00";
/// Reference spelling of RFC 3339 with fractional seconds.
pub const RFC3339_NANO: &str = "2006-01-02T15:04:05.999999999Z07:00";
/// Reference spelling of RFC 1123 with a numeric zone.
pub const RFC1123Z: &str = "Mon, 02 Jan 2006 15:04:05 -0700";

/// Reference spellings of the named layouts hosts may pass instead.
const NAMED: &[(&str, &str)] = &[
    ("Layout", "01/02 03:04:05PM '06 -0700"),
    ("ANSIC", "Mon Jan _2 15:04:05 2006"),
    ("UnixDate", "Mon Jan _2 15:04:05 MST 2006"),
    ("RubyDate", "Mon Jan 02 15:04:05 -0700 2006"),
    ("RFC822", "02 Jan 06 15:04 MST"),
    ("RFC822Z", "02 Jan 06 15:04 -0700"),
    ("RFC850", "Monday, 02-Jan-06 15:04:05 MST"),
    ("RFC1123", "Mon, 02 Jan 2006 15:04:05 MST"),
    ("Kitchen", "3:04PM"),
    ("Stamp", "Jan _2 15:04:05"),
    ("StampMilli", "Jan _2 15:04:05.000"),
    ("StampMicro", "Jan _2 15:04:05.000000"),
    ("StampNano", "Jan _2 15:04:05.000000000"),
    ("DateTime", "2006-01-02 15:04:05"),
    ("DateOnly", "2006-01-02"),
    ("TimeOnly", "15:04:05"),
];

/// Numeric offset spellings after the leading `-` or `Z`, longest first.
const OFFSETS: [(&str, OffsetStyle); 5] = [
    ("070000", OffsetStyle::HoursMinutesSeconds),
    ("07:00:00", OffsetStyle::ColonHoursMinutesSeconds),
    ("0700", OffsetStyle::HoursMinutes),
    ("07:00", OffsetStyle::ColonHoursMinutes),
    ("07", OffsetStyle::Hours),
];

/// Most fractional digits an instant carries.
const MAX_FRACTION_DIGITS: usize = 9;

/// Returns the reference spelling of a named layout such as `Kitchen`.
#[must_use]
pub fn named(name: &str) -> Option<&'static str> {
    NAMED
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, spelling)| *spelling)
}

/// How a numeric offset is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStyle {
    /// `-07`
    Hours,
    /// `-0700`
    HoursMinutes,
    /// `-07:00`
    ColonHoursMinutes,
    /// `-070000`
    HoursMinutesSeconds,
    /// `-07:00:00`
    ColonHoursMinutesSeconds,
}

/// A recognised piece of the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// `January`
    LongMonth,
    /// `Jan`
    Month,
    /// `1`
    NumMonth,
    /// `01`
    ZeroMonth,
    /// `Monday`
    LongWeekday,
    /// `Mon`
    Weekday,
    /// `2`
    Day,
    /// `_2`
    UnderDay,
    /// `02`
    ZeroDay,
    /// `__2`
    UnderYearDay,
    /// `002`
    ZeroYearDay,
    /// `15`
    Hour,
    /// `3`
    Hour12,
    /// `03`
    ZeroHour12,
    /// `4`
    Minute,
    /// `04`
    ZeroMinute,
    /// `5`
    Second,
    /// `05`
    ZeroSecond,
    /// `2006`
    LongYear,
    /// `06`
    Year,
    /// `PM`
    UpperPeriod,
    /// `pm`
    LowerPeriod,
    /// `MST`
    ZoneName,
    /// `-0700` and its variants. The `Z0700` forms write `Z` for UTC.
    Offset {
        /// Digits and separators written.
        style: OffsetStyle,
        /// Whether UTC is written as `Z`.
        utc_letter: bool,
    },
    /// `.000`: exactly `digits` fractional digits.
    Fraction {
        /// `.` or `,`.
        separator: char,
        /// Digits written.
        digits: u8,
    },
    /// `.999`: up to `digits` fractional digits with trailing zeros dropped.
    TrimmedFraction {
        /// `.` or `,`.
        separator: char,
        /// Most digits written.
        digits: u8,
    },
}

/// Literal text or a recognised element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Text copied as is.
    Literal(&'a str),
    /// A piece of the instant.
    Element(Element),
}

/// Splits `layout` into literal text and elements, scanning left to right
/// and preferring the longest spelling at each position.
#[must_use]
pub fn chunks(layout: &str) -> Vec<Chunk<'_>> {
    let mut found = Vec::new();
    let mut literal_start = 0;
    let mut position = 0;
    while position < layout.len() {
        let Some((element, width)) = layout.get(position..).and_then(element_at) else {
            position += 1;
            continue;
        };
        if let Some(text) = layout
            .get(literal_start..position)
            .filter(|text| !text.is_empty())
        {
            found.push(Chunk::Literal(text));
        }
        found.push(Chunk::Element(element));
        position += width;
        literal_start = position;
    }
    if let Some(text) = layout.get(literal_start..).filter(|text| !text.is_empty()) {
        found.push(Chunk::Literal(text));
    }
    found
}

/// Recognises the element at the start of `rest` and its width in bytes.
fn element_at(rest: &str) -> Option<(Element, usize)> {
    let bytes = rest.as_bytes();
    let found = match bytes.first()? {
        b'J' if rest.starts_with("January") => (Element::LongMonth, 7),
        b'J' if rest.starts_with("Jan") && !lowercase_at(bytes, 3) => (Element::Month, 3),
        b'M' if rest.starts_with("Monday") => (Element::LongWeekday, 6),
        b'M' if rest.starts_with("Mon") && !lowercase_at(bytes, 3) => (Element::Weekday, 3),
        b'M' if rest.starts_with("MST") => (Element::ZoneName, 3),
        b'0' => match bytes.get(1)? {
            b'1' => (Element::ZeroMonth, 2),
            b'2' => (Element::ZeroDay, 2),
            b'3' => (Element::ZeroHour12, 2),
            b'4' => (Element::ZeroMinute, 2),
            b'5' => (Element::ZeroSecond, 2),
            b'6' => (Element::Year, 2),
            b'0' if bytes.get(2) == Some(&b'2') => (Element::ZeroYearDay, 3),
            _ => return None,
        },
        b'1' if rest.starts_with("15") => (Element::Hour, 2),
        b'1' => (Element::NumMonth, 1),
        b'2' if rest.starts_with("2006") => (Element::LongYear, 4),
        b'2' => (Element::Day, 1),
        // `_2006` is a literal underscore before the year.
        b'_' if rest.starts_with("_2006") => return None,
        b'_' if rest.starts_with("_2") => (Element::UnderDay, 2),
        b'_' if rest.starts_with("__2") => (Element::UnderYearDay, 3),
        b'3' => (Element::Hour12, 1),
        b'4' => (Element::Minute, 1),
        b'5' => (Element::Second, 1),
        b'P' if rest.starts_with("PM") => (Element::UpperPeriod, 2),
        b'p' if rest.starts_with("pm") => (Element::LowerPeriod, 2),
        b'-' | b'Z' => return offset_at(rest),
        b'.' | b',' => return fraction_at(bytes),
        _ => return None,
    };
    Some(found)
}

fn lowercase_at(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).is_some_and(u8::is_ascii_lowercase)
}

fn offset_at(rest: &str) -> Option<(Element, usize)> {
    let utc_letter = rest.starts_with('Z');
    let digits = rest.get(1..)?;
    OFFSETS
        .iter()
        .find(|(spelling, _)| digits.starts_with(spelling))
        .map(|&(spelling, style)| (Element::Offset { style, utc_letter }, spelling.len() + 1))
}

/// A separator followed by a run of one repeated `0` or `9` that no other
/// digit continues.
fn fraction_at(bytes: &[u8]) -> Option<(Element, usize)> {
    let (&mark, tail) = bytes.split_first()?;
    let digit = *tail.first()?;
    if digit != b'0' && digit != b'9' {
        return None;
    }
    let run = tail.iter().take_while(|&&byte| byte == digit).count();
    if tail.get(run).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let digits = u8::try_from(run.min(MAX_FRACTION_DIGITS)).ok()?;
    let separator = char::from(mark);
    let element = if digit == b'0' {
        Element::Fraction { separator, digits }
    } else {
        Element::TrimmedFraction { separator, digits }
    };
    Some((element, run + 1))
}
