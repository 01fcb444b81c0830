//! Time-of-day conversion helpers.
//!
//! Times are carried around as minutes since local midnight. Every helper here
//! fails soft: a bad keystroke yields `None`, `false` or a default string rather
//! than an error.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Minutes in a day; valid times of day are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

static TIME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// Parse an `H:MM` or `HH:MM` string into minutes since midnight.
///
/// Returns `None` unless the input has exactly two `:`-separated integer parts
/// with hours in `0..=23` and minutes in `0..=59`.
pub fn parse_time_to_minutes(time: &str) -> Option<u32> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 2 {
        return None;
    }

    let hours = parts[0].parse::<u32>().ok()?;
    let minutes = parts[1].parse::<u32>().ok()?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Negative input yields `"00:00"`. Values past the end of the day are not
/// wrapped, so `1500` formats as `"25:00"`.
pub fn format_minutes_to_time(minutes: i64) -> String {
    if minutes < 0 {
        return "00:00".to_string();
    }
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Check a time string against the canonical `H:MM` / `HH:MM` pattern.
pub fn is_valid_time_format(time: &str) -> bool {
    TIME_FORMAT.is_match(time)
}

/// Opening window of the restaurant, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl BusinessHours {
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    /// Inclusive bounds in minutes since midnight.
    pub fn bounds(&self) -> (u32, u32) {
        (
            self.open_hour.saturating_mul(60),
            self.close_hour.saturating_mul(60),
        )
    }

    /// Whether `time` falls inside the window. Unparsable input is `false`.
    pub fn contains(&self, time: &str) -> bool {
        is_within_business_hours(time, self.open_hour, self.close_hour)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 6,
            close_hour: 23,
        }
    }
}

/// Check that `time` lies within `[open_hour:00, close_hour:00]`, inclusive.
pub fn is_within_business_hours(time: &str, open_hour: u32, close_hour: u32) -> bool {
    match parse_time_to_minutes(time) {
        Some(minutes) => {
            minutes >= open_hour.saturating_mul(60) && minutes <= close_hour.saturating_mul(60)
        }
        None => false,
    }
}

/// A validated time of day.
///
/// # Example
///
/// ```
/// use restaurant_desk::domain::TimeOfDay;
///
/// let time = TimeOfDay::parse("9:05").unwrap();
/// assert_eq!(time.minutes(), 545);
/// assert_eq!(time.to_string(), "09:05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Parse from `H:MM` / `HH:MM`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidTime` if the string is not a time of day.
    pub fn parse(time: &str) -> Result<Self, ValidationError> {
        parse_time_to_minutes(time)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime(time.to_string()))
    }

    /// Build from minutes since midnight; `None` outside `0..1440`.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    pub fn minute(&self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// Serde support - serialize as canonical HH:MM
impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}
