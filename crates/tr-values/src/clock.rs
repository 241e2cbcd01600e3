//! Time-of-day sources for time indicators.

use chrono::{Local, NaiveTime, Timelike};
use tr_core::{UnitWeights, seconds_of_day};

/// Supplies the current local time of day.
pub trait Clock {
    fn now(&self) -> NaiveTime;

    /// Current time as a weighted sum of hour, minute and second.
    fn seconds_of_day(&self, weights: &UnitWeights) -> u32 {
        weighted_seconds(self.now(), weights)
    }
}

/// `t` as a weighted sum of its hour, minute and second fields.
pub fn weighted_seconds(t: NaiveTime, weights: &UnitWeights) -> u32 {
    seconds_of_day(t.hour(), t.minute(), t.second(), weights)
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn at(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
