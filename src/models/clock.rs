use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

pub const MAX_HOUR: i32 = 47;
pub const MAX_MINUTE: i32 = 59;
/// Minutes in the 48-hour range a clock value can express.
pub const MINUTES_IN_RANGE: i32 = (MAX_HOUR + 1) * 60;

/// A time of day extended to 48 hours, so a schedule can stay active past
/// midnight. Also used as a duration ("span").
///
/// Ordering is by `(hour, minute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawClockValue")]
pub struct ClockValue {
    hour: u8,
    minute: u8,
}

#[derive(Deserialize)]
struct RawClockValue {
    hour: i32,
    minute: i32,
}

impl TryFrom<RawClockValue> for ClockValue {
    type Error = ScheduleError;

    fn try_from(raw: RawClockValue) -> Result<Self> {
        ClockValue::new(raw.hour, raw.minute)
    }
}

impl ClockValue {
    pub fn new(hour: i32, minute: i32) -> Result<Self> {
        if !(0..=MAX_HOUR).contains(&hour) {
            return Err(ScheduleError::Range(format!("hour {} not in 0..={}", hour, MAX_HOUR)));
        }
        if !(0..=MAX_MINUTE).contains(&minute) {
            return Err(ScheduleError::Range(format!("minute {} not in 0..={}", minute, MAX_MINUTE)));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn from_total_minutes(total: i32) -> Result<Self> {
        if !(0..MINUTES_IN_RANGE).contains(&total) {
            return Err(ScheduleError::Range(format!(
                "{} minutes not in 0..={}",
                total,
                MINUTES_IN_RANGE - 1
            )));
        }
        Self::new(total / 60, total % 60)
    }

    pub fn hour(&self) -> i32 {
        self.hour as i32
    }

    pub fn minute(&self) -> i32 {
        self.minute as i32
    }

    pub fn to_total_minutes(&self) -> i32 {
        self.hour() * 60 + self.minute()
    }

    pub fn checked_add_minutes(&self, minutes: i32) -> Option<i32> {
        self.to_total_minutes().checked_add(minutes)
    }

    /// True for values on the second day of the range (24:00 and later).
    pub fn is_past_midnight(&self) -> bool {
        self.hour >= 24
    }
}

// Addition yields raw minutes; the caller decides how to treat overflow past 47:59.
impl Add for ClockValue {
    type Output = i32;

    fn add(self, rhs: ClockValue) -> i32 {
        self.to_total_minutes() + rhs.to_total_minutes()
    }
}

// Saturates at the i32 limits; use `checked_add_minutes` to detect that.
impl Add<i32> for ClockValue {
    type Output = i32;

    fn add(self, rhs: i32) -> i32 {
        self.to_total_minutes().saturating_add(rhs)
    }
}

impl Sub for ClockValue {
    type Output = i32;

    fn sub(self, rhs: ClockValue) -> i32 {
        self.to_total_minutes() - rhs.to_total_minutes()
    }
}

impl fmt::Display for ClockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockValue {
    type Err = ScheduleError;

    /// Accepts exactly `HH:MM` (two ASCII digits on each side), surrounding
    /// whitespace aside.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ScheduleError::Parse(format!("'{}' is not HH:MM", s));
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        let parse = |part: &str| {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<i32>().map_err(|_| malformed())
        };
        Self::new(parse(hour)?, parse(minute)?)
    }
}
