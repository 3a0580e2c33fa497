//! TOML configuration for facility hours, management rights and the menu.
//!
//! Every section is optional. Anything left out keeps the built-in default,
//! so `config_version = 1` alone is a complete file.
//!
//! ```toml
//! config_version = 1
//!
//! [facility]
//! timezone = "America/Bogota"
//! opening_hour = 7
//! slot_duration_minutes = 60
//!
//! [facility.closing]
//! weekdays = 22
//! saturday = 12
//! closed = ["sunday"]
//!
//! [access]
//! facility_managers = ["ADMIN", "PROFESSOR"]
//! ```

use std::path::Path;

use chrono::{Duration, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::access::AccessPolicy;
use crate::error::{EngineError, Result};
use crate::hours::FacilityHours;
use crate::model::Role;
use crate::nav::{default_nav_links, NavLink};

pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// A single problem found while validating a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("{field} hour {hour} is outside 0..=24")]
    HourOutOfRange { field: &'static str, hour: u32 },

    #[error("opening hour {opening} is not before closing hour {closing} on {day}")]
    OpeningNotBeforeClosing {
        day: Weekday,
        opening: u32,
        closing: u32,
    },

    #[error("slot duration must be 1..=1440 minutes, got {0}")]
    InvalidSlotDuration(i64),

    #[error("unknown day '{0}' in closed days")]
    UnknownDay(String),

    #[error("navigation link with empty title")]
    EmptyNavTitle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub config_version: u32,
    #[serde(default)]
    pub facility: RawFacility,
    #[serde(default)]
    pub access: RawAccess,
    /// Replaces the default menu when present.
    #[serde(default)]
    pub nav: Option<Vec<NavLink>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFacility {
    pub timezone: Option<String>,
    pub opening_hour: Option<u32>,
    pub slot_duration_minutes: Option<i64>,
    #[serde(default)]
    pub closing: RawClosing,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClosing {
    /// Monday to Friday.
    pub weekdays: Option<u32>,
    pub saturday: Option<u32>,
    pub sunday: Option<u32>,
    /// Day names (`"sunday"`, `"Sat"`, ...) on which the facility is closed.
    #[serde(default)]
    pub closed: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAccess {
    pub facility_managers: Option<Vec<Role>>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub hours: FacilityHours,
    pub policy: AccessPolicy,
    pub nav: Vec<NavLink>,
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(EngineError::UnsupportedVersion(raw.config_version));
    }

    resolve(raw).map_err(EngineError::InvalidConfig)
}

/// Validate a raw configuration, returning every problem found.
pub fn validate_config(raw: &RawConfig) -> Vec<ValidationError> {
    resolve(raw.clone()).err().unwrap_or_default()
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

fn resolve(raw: RawConfig) -> std::result::Result<EngineConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut hours = FacilityHours::default();
    let facility = raw.facility;

    if let Some(name) = &facility.timezone {
        match parse_timezone(name) {
            Ok(tz) => hours.timezone = tz,
            Err(_) => errors.push(ValidationError::UnknownTimezone(name.clone())),
        }
    }

    if let Some(hour) = facility.opening_hour {
        if hour > 24 {
            errors.push(ValidationError::HourOutOfRange {
                field: "opening",
                hour,
            });
        }
        hours.opening_hour = hour;
    }

    if let Some(minutes) = facility.slot_duration_minutes {
        if (1..=1440).contains(&minutes) {
            hours.slot_duration = Duration::minutes(minutes);
        } else {
            errors.push(ValidationError::InvalidSlotDuration(minutes));
        }
    }

    let closing = facility.closing;
    let overrides: [(&'static str, Option<u32>, &[Weekday]); 3] = [
        (
            "weekdays closing",
            closing.weekdays,
            &[
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        ),
        ("saturday closing", closing.saturday, &[Weekday::Sat]),
        ("sunday closing", closing.sunday, &[Weekday::Sun]),
    ];
    for (field, hour, days) in overrides {
        let Some(hour) = hour else { continue };
        if hour > 24 {
            errors.push(ValidationError::HourOutOfRange { field, hour });
        }
        for day in days {
            hours = hours.with_closing(*day, Some(hour));
        }
    }

    for name in &closing.closed {
        match name.parse::<Weekday>() {
            Ok(day) => hours = hours.with_closing(day, None),
            Err(_) => errors.push(ValidationError::UnknownDay(name.clone())),
        }
    }

    for day in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ] {
        if let Some(close) = hours.closing_hour(day) {
            if hours.opening_hour >= close {
                errors.push(ValidationError::OpeningNotBeforeClosing {
                    day,
                    opening: hours.opening_hour,
                    closing: close,
                });
            }
        }
    }

    let policy = match raw.access.facility_managers {
        Some(roles) => AccessPolicy::with_facility_managers(roles),
        None => AccessPolicy::default(),
    };

    let nav = raw.nav.unwrap_or_else(default_nav_links);
    if has_empty_title(&nav) {
        errors.push(ValidationError::EmptyNavTitle);
    }

    if errors.is_empty() {
        Ok(EngineConfig { hours, policy, nav })
    } else {
        Err(errors)
    }
}

fn has_empty_title(links: &[NavLink]) -> bool {
    links
        .iter()
        .any(|l| l.title.trim().is_empty() || has_empty_title(&l.children))
}
