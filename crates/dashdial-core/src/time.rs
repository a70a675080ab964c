//! Time-of-day values and their mapping onto the dial.

use crate::geometry::FULL_TURN;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use thiserror::Error;

/// Minutes in one 12-hour cycle.
pub const MINUTES_PER_CYCLE: u32 = 12 * 60;

/// Seconds in one 12-hour cycle.
pub const SECONDS_PER_CYCLE: u32 = MINUTES_PER_CYCLE * 60;

/// Invalid time-of-day components.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("Hour out of range: {0}")]
    Hour(u32),
    #[error("Minute out of range: {0}")]
    Minute(u32),
    #[error("Second out of range: {0}")]
    Second(u32),
}

/// Number of hour divisions shown on a dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockMode {
    /// Twelve hour dial, index 0 is labelled "12".
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// Twenty-four hour dial, index 0 is labelled "00".
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl ClockMode {
    /// Hour divisions around the dial.
    pub fn divisions(self) -> usize {
        match self {
            ClockMode::TwelveHour => 12,
            ClockMode::TwentyFourHour => 24,
        }
    }

    /// Text shown for hour division `index`, zero-padded to two characters.
    pub fn hour_label(self, index: usize) -> String {
        let hour = match self {
            ClockMode::TwelveHour if index == 0 => 12,
            _ => index,
        };
        format!("{:02}", hour)
    }
}

/// Wall-clock time of day with second resolution.
///
/// Deserialization goes through [`TimeOfDay::new`], so out-of-range
/// components are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
}

#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = TimeError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute, raw.second)
    }
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0, second: 0 };

    /// Create a time of day, validating each component.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeError::Minute(minute));
        }
        if second > 59 {
            return Err(TimeError::Second(second));
        }
        Ok(Self { hour, minute, second })
    }

    /// Take hours, minutes and seconds from any chrono time value.
    ///
    /// Leap seconds are folded into second 59.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second().min(59),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// Whole minutes elapsed in the current 12-hour cycle, in `[0, 720)`.
    pub fn elapsed_minutes_12h(&self) -> u32 {
        (self.hour % 12) * 60 + self.minute
    }

    /// Seconds elapsed in the current 12-hour cycle, in `[0, 43200)`.
    pub fn elapsed_seconds_12h(&self) -> u32 {
        self.elapsed_minutes_12h() * 60 + self.second
    }

    /// Dial angle of the current minute on a 12-hour face.
    pub fn dial_angle(&self) -> f64 {
        minutes_to_angle(f64::from(self.elapsed_minutes_12h()))
    }

    /// Fraction of the 12-hour cycle elapsed, in `[0, 1)`.
    ///
    /// Drives the needle of the linear top-bar clock.
    pub fn progress_12h(&self) -> f64 {
        f64::from(self.elapsed_seconds_12h()) / f64::from(SECONDS_PER_CYCLE)
    }

    /// Zero-padded digit groups for the digital readout.
    pub fn digits(&self) -> ClockDigits {
        ClockDigits {
            hours: format!("{:02}", self.hour),
            minutes: format!("{:02}", self.minute),
            seconds: format!("{:02}", self.second),
        }
    }
}

/// Two-character digit groups shown by the digital clock (24-hour).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDigits {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Map minutes elapsed in a 12-hour cycle to a dial angle.
///
/// `0 → 0°`, `360 → 180°`, `719 → 359.5°`.
pub fn minutes_to_angle(minutes: f64) -> f64 {
    minutes * FULL_TURN / f64::from(MINUTES_PER_CYCLE)
}

/// Source of the current time of day.
pub trait TimeSource {
    fn now(&self) -> TimeOfDay;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeSource;

impl TimeSource for LocalTimeSource {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_timelike(&chrono::Local::now())
    }
}

/// A settable time, for previews and tests.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    time: Cell<TimeOfDay>,
}

impl FixedTimeSource {
    pub fn new(time: TimeOfDay) -> Self {
        Self { time: Cell::new(time) }
    }

    pub fn set(&self, time: TimeOfDay) {
        self.time.set(time);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> TimeOfDay {
        self.time.get()
    }
}
