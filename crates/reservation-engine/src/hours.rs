//! Facility opening hours.
//!
//! Hours are whole local hours in the facility's timezone. A weekday with no
//! closing hour is a closed day.

use chrono::{Duration, Weekday};
use chrono_tz::Tz;

/// Default opening hour (07:00).
pub const DEFAULT_OPENING_HOUR: u32 = 7;
/// Default Monday-Friday closing hour (22:00).
pub const DEFAULT_WEEKDAY_CLOSING_HOUR: u32 = 22;
/// Default Saturday closing hour (12:00, half day).
pub const DEFAULT_SATURDAY_CLOSING_HOUR: u32 = 12;
/// Default slot length in minutes.
pub const DEFAULT_SLOT_MINUTES: i64 = 60;

/// Opening hours and slot length for one facility.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityHours {
    pub opening_hour: u32,
    /// Closing hour per weekday, indexed Monday = 0. `None` means closed.
    pub closing: [Option<u32>; 7],
    pub slot_duration: Duration,
    pub timezone: Tz,
}

impl FacilityHours {
    /// Closing hour for the given weekday, or `None` when the facility is closed.
    pub fn closing_hour(&self, weekday: Weekday) -> Option<u32> {
        self.closing[weekday.num_days_from_monday() as usize]
    }

    pub fn with_closing(mut self, weekday: Weekday, hour: Option<u32>) -> Self {
        self.closing[weekday.num_days_from_monday() as usize] = hour;
        self
    }

    pub fn with_opening_hour(mut self, hour: u32) -> Self {
        self.opening_hour = hour;
        self
    }

    pub fn with_slot_duration(mut self, duration: Duration) -> Self {
        self.slot_duration = duration;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for FacilityHours {
    fn default() -> Self {
        let weekday = Some(DEFAULT_WEEKDAY_CLOSING_HOUR);
        Self {
            opening_hour: DEFAULT_OPENING_HOUR,
            closing: [
                weekday,
                weekday,
                weekday,
                weekday,
                weekday,
                Some(DEFAULT_SATURDAY_CLOSING_HOUR),
                None,
            ],
            slot_duration: Duration::minutes(DEFAULT_SLOT_MINUTES),
            timezone: Tz::UTC,
        }
    }
}
