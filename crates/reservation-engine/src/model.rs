//! Domain records shared by the slot engine and the access policy.
//!
//! Field names serialize the way the REST backend emits them (`startTime`,
//! `classroomId`, ...), and the backend's Spanish enum spellings are accepted
//! as aliases so payloads can be deserialized unmodified.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Opaque reservation identifier (UUID string on the backend).
    ReservationId
);
string_id!(
    /// Opaque user identifier.
    UserId
);
string_id!(
    /// Opaque classroom identifier.
    ClassroomId
);
string_id!(
    /// Opaque building identifier.
    BuildingId
);

/// Caller role, as carried in the auth token's role claim.
///
/// There is no implied hierarchy between variants: every permission is an
/// explicit membership test in [`crate::access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[serde(alias = "PROFESOR")]
    Professor,
    Tutor,
    #[serde(alias = "ESTUDIANTE")]
    Student,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Professor, Role::Tutor, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Professor => "PROFESSOR",
            Role::Tutor => "TUTOR",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a role claim. Case-insensitive; a Spring-style `ROLE_` prefix is
/// stripped first.
impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "ADMIN" => Ok(Role::Admin),
            "PROFESSOR" | "PROFESOR" => Ok(Role::Professor),
            "TUTOR" => Ok(Role::Tutor),
            "STUDENT" | "ESTUDIANTE" => Ok(Role::Student),
            _ => Err(EngineError::UnknownRole(s.to_string())),
        }
    }
}

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[serde(alias = "PENDIENTE")]
    Pending,
    #[serde(alias = "CONFIRMADA")]
    Confirmed,
    #[serde(alias = "RECHAZADA")]
    Rejected,
    #[serde(alias = "CANCELADA")]
    Cancelled,
}

impl ReservationStatus {
    /// `Rejected` and `Cancelled` admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Rejected | ReservationStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" | "PENDIENTE" => Ok(ReservationStatus::Pending),
            "CONFIRMED" | "CONFIRMADA" => Ok(ReservationStatus::Confirmed),
            "REJECTED" | "RECHAZADA" => Ok(ReservationStatus::Rejected),
            "CANCELLED" | "CANCELADA" => Ok(ReservationStatus::Cancelled),
            _ => Err(EngineError::UnknownStatus(s.to_string())),
        }
    }
}

/// A classroom booking.
///
/// `end > start` is expected but not enforced here; consumers treat a record
/// that violates it as carrying no availability information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(rename = "classroomId")]
    pub classroom_id: ClassroomId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "startTime", deserialize_with = "deserialize_instant")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime", deserialize_with = "deserialize_instant")]
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl Reservation {
    /// True when the interval has positive length.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }
}

/// Parse an ISO 8601 instant.
///
/// Accepts RFC 3339 with an offset (`2026-03-16T09:00:00-05:00`) and the
/// offset-less form the backend emits for its local timestamps
/// (`2026-03-16T09:00:00`, optionally with fractional seconds), which is read
/// as UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, EngineError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map(|ndt| ndt.and_utc())
        .map_err(|_| EngineError::InvalidInstant(s.to_string()))
}

fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassroomType {
    #[serde(alias = "AULA")]
    Standard,
    #[serde(alias = "LABORATORIO")]
    Lab,
    #[serde(alias = "AUDITORIO")]
    Auditorium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: ClassroomType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(rename = "buildingId", default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<BuildingId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
