//! # reservation-engine
//!
//! Classroom slot availability and role-based access rules for a campus
//! reservation system.
//!
//! Everything here is a pure function over its inputs: the caller supplies
//! the reservations for the day, the clock reading and the caller's role. No
//! I/O, no global state, no caching. The REST backend, token decoding and the
//! UI live elsewhere.
//!
//! ## Modules
//!
//! - [`slots`]: bookable hourly slots for one classroom and day
//! - [`overlap`]: half-open overlap, range availability, conflict listing
//! - [`access`]: per-role permissions on facilities, users and reservations
//! - [`nav`]: navigation tree and its per-role filtering
//! - [`occupancy`]: who is using which room right now, dashboard counters
//! - [`hours`]: facility opening hours
//! - [`config`]: TOML configuration
//! - [`model`]: domain records
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use reservation_engine::{compute_slots, FacilityHours, SlotRequest};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 21).unwrap(); // Saturday
//! let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
//! let slots = compute_slots(
//!     &FacilityHours::default(),
//!     &SlotRequest { day, reservations: &[], now, exclude: None },
//! );
//! let labels: Vec<_> = slots.iter().map(|s| s.label.as_str()).collect();
//! assert_eq!(labels, ["07:00", "08:00", "09:00", "10:00", "11:00"]);
//! ```

pub mod access;
pub mod config;
pub mod error;
pub mod hours;
pub mod model;
pub mod nav;
pub mod occupancy;
pub mod overlap;
pub mod slots;

pub use access::{AccessPolicy, ResourceKind};
pub use config::{load_config, parse_config, EngineConfig};
pub use error::EngineError;
pub use hours::FacilityHours;
pub use model::{
    parse_instant, Building, BuildingId, Classroom, ClassroomId, ClassroomType, Reservation,
    ReservationId, ReservationStatus, Role, UserId,
};
pub use nav::{default_nav_links, filter_nav_links, NavLink};
pub use overlap::{find_conflicts, is_range_available};
pub use slots::{blocking_reservations, compute_slots, SlotRequest, TimeSlot};
