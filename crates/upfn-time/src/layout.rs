//! Named and custom timestamp layouts.
//!
//! Well-known names such as `RFC3339` or `Kitchen` map to fixed formats. Any
//! other string is either a `time` format description such as
//! `[year]/[month]/[day]` or a Go reference layout such as `2006/01/02`.

use std::mem;
use std::num::NonZeroU8;

use thiserror::Error;
use time::error::{InvalidFormatDescription, ParseFromDescription, TryFromParsed};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::{self, OwnedFormatItem};
use time::parsing::Parsed;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::reference::{self, Chunk, Element, OffsetStyle};

/// Numeric zone written where a zone abbreviation is unknown.
const NUMERIC_ZONE: &str = "[offset_hour sign:mandatory][offset_minute]";

/// Errors raised while resolving a layout or applying it.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout string is not a valid format description.
    #[error("invalid layout '{layout}': {source}")]
    Description {
        /// Layout as supplied.
        layout: String,
        /// Parser diagnostic.
        #[source]
        source: InvalidFormatDescription,
    },
    /// The layout names no date or time element at all.
    #[error("invalid layout '{0}': no date or time elements")]
    Empty(String),
    /// The input did not match the layout.
    #[error("{0}")]
    Parse(#[from] time::error::Parse),
    /// The input matched a custom layout but left characters over.
    #[error("unexpected trailing characters {0:?}")]
    Trailing(String),
    /// The parsed fields do not describe a date or a time.
    #[error("{0}")]
    Incomplete(#[from] TryFromParsed),
    /// The input did not match a custom layout.
    #[error("{0}")]
    Mismatch(#[from] ParseFromDescription),
    /// The instant cannot be rendered with the layout.
    #[error("{0}")]
    Format(#[from] time::error::Format),
}

/// A resolved timestamp layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// RFC 3339 with whole seconds.
    Rfc3339,
    /// RFC 3339 keeping fractional seconds.
    Rfc3339Nano,
    /// RFC 2822 (email) dates.
    Rfc2822,
    /// A format description or reference layout.
    Custom(Pattern),
}

impl Layout {
    /// Resolves a layout name, format description or reference layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Description`] when `layout` looks like a format
    /// description but is malformed, and [`LayoutError::Empty`] when it names
    /// no date or time element.
    pub fn resolve(layout: &str) -> Result<Self, LayoutError> {
        match layout {
            "RFC3339" | reference::RFC3339 => Ok(Self::Rfc3339),
            "RFC3339Nano" | reference::RFC3339_NANO => Ok(Self::Rfc3339Nano),
            "RFC2822" | "RFC1123Z" | reference::RFC1123Z => Ok(Self::Rfc2822),
            other => Pattern::compile(reference::named(other).unwrap_or(other)).map(Self::Custom),
        }
    }

    /// Renders `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Format`] when the instant cannot be expressed in
    /// this layout, for example a year beyond 9999 in RFC 3339.
    pub fn format(&self, instant: OffsetDateTime) -> Result<String, LayoutError> {
        let rendered = match self {
            Self::Rfc3339 => instant
                .replace_nanosecond(0)
                .unwrap_or(instant)
                .format(&Rfc3339)?,
            Self::Rfc3339Nano => instant.format(&Rfc3339)?,
            Self::Rfc2822 => instant.format(&Rfc2822)?,
            Self::Custom(pattern) => pattern.format(instant)?,
        };
        Ok(rendered)
    }

    /// Parses `text` into an instant.
    ///
    /// Custom layouts may omit parts of the instant: a missing offset means
    /// UTC, a missing time means midnight, a missing year means year 0 and a
    /// missing month or day means the first.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] describing why `text` does not match.
    pub fn parse(&self, text: &str) -> Result<OffsetDateTime, LayoutError> {
        match self {
            Self::Rfc3339 | Self::Rfc3339Nano => Ok(OffsetDateTime::parse(text, &Rfc3339)?),
            Self::Rfc2822 => Ok(OffsetDateTime::parse(text, &Rfc2822)?),
            Self::Custom(pattern) => pattern.parse(text),
        }
    }
}

/// A compiled custom layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// Components and literals handled by `time` directly.
    Items(OwnedFormatItem),
    /// `UTC` at a zero offset, the numeric zone otherwise.
    ZoneName(OwnedFormatItem),
    /// `Z` at a zero offset, the numeric offset otherwise.
    UtcOrOffset(OwnedFormatItem),
    /// Fractional seconds without trailing zeros, omitted when zero.
    TrimmedFraction { separator: char, digits: u8 },
}

impl Pattern {
    /// Compiles `source`, preferring a format description when it names a
    /// `[component]` and parses.
    fn compile(source: &str) -> Result<Self, LayoutError> {
        let invalid = |reason: InvalidFormatDescription| LayoutError::Description {
            layout: source.to_owned(),
            source: reason,
        };
        let chunks = reference::chunks(source);
        let has_elements = chunks
            .iter()
            .any(|chunk| matches!(chunk, Chunk::Element(_)));
        if names_component(source) {
            let described = format_description::parse_owned::<2>(source);
            if described.is_ok() || !has_elements {
                return described
                    .map(|items| Self {
                        pieces: vec![Piece::Items(items)],
                    })
                    .map_err(invalid);
            }
        }
        if !has_elements {
            return Err(LayoutError::Empty(source.to_owned()));
        }
        let mut builder = Builder::default();
        for chunk in chunks {
            match chunk {
                Chunk::Literal(text) => builder.push_literal(text),
                Chunk::Element(element) => builder.push_element(element).map_err(invalid)?,
            }
        }
        builder.finish().map_err(invalid)
    }

    fn format(&self, instant: OffsetDateTime) -> Result<String, time::error::Format> {
        let utc = instant.offset().is_utc();
        let mut rendered = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::ZoneName(_) if utc => rendered.push_str("UTC"),
                Piece::UtcOrOffset(_) if utc => rendered.push('Z'),
                Piece::Items(items) | Piece::ZoneName(items) | Piece::UtcOrOffset(items) => {
                    rendered.push_str(&instant.format(items)?);
                }
                Piece::TrimmedFraction { separator, digits } => {
                    rendered.push_str(&trimmed_fraction(instant.nanosecond(), *separator, *digits));
                }
            }
        }
        Ok(rendered)
    }

    fn parse(&self, text: &str) -> Result<OffsetDateTime, LayoutError> {
        let mut parsed = Parsed::new();
        let mut input = text.as_bytes();
        for piece in &self.pieces {
            input = match piece {
                Piece::Items(items) => parsed.parse_item(input, items)?,
                Piece::ZoneName(items) => parse_zone_name(&mut parsed, input, items)?,
                Piece::UtcOrOffset(_) if input.first() == Some(&b'Z') => {
                    set_utc(&mut parsed)?;
                    input.get(1..).unwrap_or_default()
                }
                Piece::UtcOrOffset(items) => parsed.parse_item(input, items)?,
                Piece::TrimmedFraction { .. } => parse_fraction(&mut parsed, input)?,
            };
        }
        if !input.is_empty() {
            return Err(LayoutError::Trailing(
                String::from_utf8_lossy(input).into_owned(),
            ));
        }

        let complete = fill_defaults(parsed).ok_or(TryFromParsed::InsufficientInformation)?;
        if complete.offset_hour().is_some() {
            return Ok(OffsetDateTime::try_from(complete)?);
        }
        Ok(PrimitiveDateTime::try_from(complete)?.assume_utc())
    }
}

/// Accumulates a format description until a piece `time` cannot express.
#[derive(Default)]
struct Builder {
    pieces: Vec<Piece>,
    description: String,
}

impl Builder {
    fn push_literal(&mut self, text: &str) {
        for ch in text.chars() {
            if matches!(ch, '\\' | '[' | ']') {
                self.description.push('\\');
            }
            self.description.push(ch);
        }
    }

    fn push_element(&mut self, element: Element) -> Result<(), InvalidFormatDescription> {
        let component = match element {
            Element::LongMonth => "[month repr:long case_sensitive:false]",
            Element::Month => "[month repr:short case_sensitive:false]",
            Element::NumMonth => "[month padding:none]",
            Element::ZeroMonth => "[month]",
            Element::LongWeekday => "[weekday repr:long case_sensitive:false]",
            Element::Weekday => "[weekday repr:short case_sensitive:false]",
            Element::Day => "[day padding:none]",
            Element::UnderDay => "[day padding:space]",
            Element::ZeroDay => "[day]",
            Element::UnderYearDay => "[ordinal padding:space]",
            Element::ZeroYearDay => "[ordinal]",
            Element::Hour => "[hour]",
            Element::Hour12 => "[hour repr:12 padding:none]",
            Element::ZeroHour12 => "[hour repr:12]",
            Element::Minute => "[minute padding:none]",
            Element::ZeroMinute => "[minute]",
            Element::Second => "[second padding:none]",
            Element::ZeroSecond => "[second]",
            Element::LongYear => "[year]",
            Element::Year => "[year repr:last_two]",
            Element::UpperPeriod => "[period]",
            Element::LowerPeriod => "[period case:lower]",
            Element::Offset {
                style,
                utc_letter: false,
            } => offset_description(style),
            Element::Offset {
                style,
                utc_letter: true,
            } => {
                let items = format_description::parse_owned::<2>(offset_description(style))?;
                return self.push_piece(Piece::UtcOrOffset(items));
            }
            Element::ZoneName => {
                let items = format_description::parse_owned::<2>(NUMERIC_ZONE)?;
                return self.push_piece(Piece::ZoneName(items));
            }
            Element::Fraction { separator, digits } => {
                self.description.push(separator);
                self.description
                    .push_str(&format!("[subsecond digits:{digits}]"));
                return Ok(());
            }
            Element::TrimmedFraction { separator, digits } => {
                return self.push_piece(Piece::TrimmedFraction { separator, digits });
            }
        };
        self.description.push_str(component);
        Ok(())
    }

    fn push_piece(&mut self, piece: Piece) -> Result<(), InvalidFormatDescription> {
        self.flush()?;
        self.pieces.push(piece);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), InvalidFormatDescription> {
        if !self.description.is_empty() {
            let description = mem::take(&mut self.description);
            self.pieces
                .push(Piece::Items(format_description::parse_owned::<2>(&description)?));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Pattern, InvalidFormatDescription> {
        self.flush()?;
        Ok(Pattern {
            pieces: self.pieces,
        })
    }
}

const fn offset_description(style: OffsetStyle) -> &'static str {
    match style {
        OffsetStyle::Hours => "[offset_hour sign:mandatory]",
        OffsetStyle::HoursMinutes => NUMERIC_ZONE,
        OffsetStyle::ColonHoursMinutes => "[offset_hour sign:mandatory]:[offset_minute]",
        OffsetStyle::HoursMinutesSeconds => {
            "[offset_hour sign:mandatory][offset_minute][offset_second]"
        }
        OffsetStyle::ColonHoursMinutesSeconds => {
            "[offset_hour sign:mandatory]:[offset_minute]:[offset_second]"
        }
    }
}

/// Reports whether a format description contains an unescaped `[`.
fn names_component(description: &str) -> bool {
    let mut escaped = false;
    for ch in description.chars() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => return true,
            _ => {}
        }
    }
    false
}

fn trimmed_fraction(nanos: u32, separator: char, digits: u8) -> String {
    let full = format!("{nanos:09}");
    let kept = full
        .get(..usize::from(digits))
        .unwrap_or(&full)
        .trim_end_matches('0');
    if kept.is_empty() {
        String::new()
    } else {
        format!("{separator}{kept}")
    }
}

fn set_utc(parsed: &mut Parsed) -> Result<(), ParseFromDescription> {
    parsed
        .set_offset_hour(0)
        .and_then(|()| parsed.set_offset_minute_signed(0))
        .and_then(|()| parsed.set_offset_second_signed(0))
        .ok_or(ParseFromDescription::InvalidComponent("offset"))
}

/// Reads a zone abbreviation or a numeric zone.
///
/// Abbreviations carry no offset of their own, so any of them reads as UTC.
fn parse_zone_name<'a>(
    parsed: &mut Parsed,
    input: &'a [u8],
    numeric: &OwnedFormatItem,
) -> Result<&'a [u8], ParseFromDescription> {
    if matches!(input.first(), Some(b'+' | b'-')) {
        return parsed.parse_item(input, numeric);
    }
    let letters = input
        .iter()
        .take_while(|byte| byte.is_ascii_uppercase())
        .count();
    if !(3..=5).contains(&letters) {
        return Err(ParseFromDescription::InvalidComponent("zone"));
    }
    set_utc(parsed)?;
    Ok(input.get(letters..).unwrap_or_default())
}

/// Reads an optional separator and any number of fractional digits.
fn parse_fraction<'a>(
    parsed: &mut Parsed,
    input: &'a [u8],
) -> Result<&'a [u8], ParseFromDescription> {
    let Some((&mark, tail)) = input.split_first() else {
        return Ok(input);
    };
    let count = tail.iter().take_while(|byte| byte.is_ascii_digit()).count();
    if !matches!(mark, b'.' | b',') || count == 0 {
        return Ok(input);
    }
    let (digits, rest) = tail.split_at(count);
    let nanos = digits
        .iter()
        .chain(std::iter::repeat(&b'0'))
        .take(9)
        .fold(0_u32, |total, digit| total * 10 + u32::from(digit - b'0'));
    parsed
        .set_subsecond(nanos)
        .ok_or(ParseFromDescription::InvalidComponent("subsecond"))?;
    Ok(rest)
}

/// Fills the parts of the instant the layout did not mention.
fn fill_defaults(mut parsed: Parsed) -> Option<Parsed> {
    if Date::try_from(parsed).is_err() {
        if parsed.year().is_none() && parsed.year_century().is_none() {
            let year = parsed.year_last_two().map_or(0, |two| {
                if two >= 69 {
                    1900 + i32::from(two)
                } else {
                    2000 + i32::from(two)
                }
            });
            parsed.set_year(year)?;
        }
        if parsed.ordinal().is_none() {
            if parsed.month().is_none() {
                parsed.set_month(Month::January)?;
            }
            if parsed.day().is_none() {
                parsed.set_day(NonZeroU8::MIN)?;
            }
        }
    }
    if Time::try_from(parsed).is_err() {
        match (parsed.hour_24(), parsed.hour_12(), parsed.hour_12_is_pm()) {
            (None, None, _) => parsed.set_hour_24(0)?,
            (None, Some(hour), None) => parsed.set_hour_12_is_pm(hour.get() == 12)?,
            _ => {}
        }
        if parsed.minute().is_none() {
            parsed.set_minute(0)?;
        }
        if parsed.second().is_none() {
            parsed.set_second(0)?;
        }
    }
    Some(parsed)
}
