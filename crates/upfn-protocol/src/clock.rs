//! Wall-clock access for providers that need the current time.

use std::time::SystemTime;

/// Source of the current instant.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> SystemTime;
}

/// Reads the operating system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Always reports the same instant.
///
/// # Example
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use upfn_protocol::{Clock, FixedClock};
///
/// let instant = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
/// assert_eq!(FixedClock::new(instant).now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: SystemTime,
}

impl FixedClock {
    /// Pins the clock at `instant`.
    #[must_use]
    pub const fn new(instant: SystemTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.instant
    }
}
