//! Wall-clock sampling and the strings derived from it.

use chrono::{Datelike, Local, Timelike};
use serde::Deserialize;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUES", "WED", "THURS", "FRI", "SAT"];

/// Time format for the clock display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(&self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }

    /// Label for the help line.
    pub fn label(self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "24h",
            TimeFormat::TwelveHour => "12h",
        }
    }
}

/// One sample of the local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour as displayed (0-23, or 1-12 in 12-hour format).
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub day: u32,
    /// Month, 1-12.
    pub month: u32,
    pub year: i32,
    /// Days since Sunday, 0-6.
    pub weekday: u32,
}

impl ClockReading {
    /// Sample the local clock.
    pub fn now(format: TimeFormat) -> Self {
        Self::from_datetime(&Local::now(), format)
    }

    /// Build a reading from any date-time value.
    pub fn from_datetime<T: Datelike + Timelike>(t: &T, format: TimeFormat) -> Self {
        let hour = match format {
            TimeFormat::TwentyFourHour => t.hour(),
            TimeFormat::TwelveHour => t.hour12().1,
        };
        Self {
            hour,
            minute: t.minute(),
            second: t.second(),
            day: t.day(),
            month: t.month(),
            year: t.year(),
            weekday: t.weekday().num_days_from_sunday(),
        }
    }

    /// The four displayed digits `[h0, h1, m0, m1]`, one per zone.
    pub fn digits(&self) -> [char; 4] {
        let digit = |v: u32| char::from_digit(v % 10, 10).unwrap_or('0');
        [
            digit(self.hour / 10),
            digit(self.hour),
            digit(self.minute / 10),
            digit(self.minute),
        ]
    }

    /// `HH:MM:SS` footer text.
    pub fn footer_text(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// `D MON YYYY — DOW` date text.
    pub fn date_text(&self) -> String {
        let month = MONTHS[(self.month.clamp(1, 12) - 1) as usize];
        let weekday = WEEKDAYS[(self.weekday % 7) as usize];
        format!("{} {} {} — {}", self.day, month, self.year, weekday)
    }
}
