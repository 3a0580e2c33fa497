//! Bookable start-time slots for one classroom on one day.
//!
//! Candidate starts are every whole hour from opening (inclusive) to closing
//! (exclusive) in facility local time. Each candidate is flagged unavailable
//! when an existing reservation overlaps `[start, start + slot_duration)`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::hours::FacilityHours;
use crate::model::{Reservation, ReservationId, ReservationStatus};
use crate::overlap;

/// A candidate booking window. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `HH:MM` in facility local time.
    pub label: String,
    pub available: bool,
}

/// Inputs that vary per invocation.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest<'a> {
    /// Calendar day in facility local time.
    pub day: NaiveDate,
    /// Reservations holding the classroom that day. Callers pass confirmed
    /// reservations only; see [`blocking_reservations`].
    pub reservations: &'a [Reservation],
    pub now: DateTime<Utc>,
    /// Reservation being edited; it never blocks its own slots.
    pub exclude: Option<&'a ReservationId>,
}

/// Compute the ordered slot list for `request.day`.
///
/// Returns an empty list when the facility is closed that weekday. When the
/// day is today in facility local time, slots starting before `now` are
/// dropped. Local times that fall in a DST gap are skipped; ambiguous local
/// times resolve to the earlier instant.
pub fn compute_slots(hours: &FacilityHours, request: &SlotRequest<'_>) -> Vec<TimeSlot> {
    let Some(closing_hour) = hours.closing_hour(request.day.weekday()) else {
        debug!(day = %request.day, "facility closed");
        return Vec::new();
    };

    if hours.slot_duration <= Duration::zero() {
        debug!(day = %request.day, "non-positive slot duration, no slots");
        return Vec::new();
    }

    let tz = hours.timezone;
    let today = request.now.with_timezone(&tz).date_naive();
    let is_today = request.day == today;

    debug!(
        day = %request.day,
        opening = hours.opening_hour,
        closing = closing_hour,
        reservations = request.reservations.len(),
        is_today,
        "computing slots"
    );

    let mut slots = Vec::new();
    for hour in hours.opening_hour..closing_hour.min(24) {
        let Some(local) = request.day.and_hms_opt(hour, 0, 0) else {
            continue;
        };
        let Some(start) = tz.from_local_datetime(&local).earliest() else {
            trace!(%local, "local time does not exist, skipping");
            continue;
        };
        let start = start.with_timezone(&Utc);

        if is_today && start < request.now {
            continue;
        }

        let Some(end) = start.checked_add_signed(hours.slot_duration) else {
            trace!(%start, "slot end out of range, skipping");
            continue;
        };
        let available = !request
            .reservations
            .iter()
            .any(|r| overlap::blocks(r, start, end, request.exclude));
        if !available {
            trace!(%start, "slot blocked");
        }

        slots.push(TimeSlot {
            start,
            end,
            label: local_label(start, tz),
            available,
        });
    }

    slots
}

/// Keep only the reservations that hold a room (`CONFIRMED`).
pub fn blocking_reservations<'a>(
    reservations: impl IntoIterator<Item = &'a Reservation>,
) -> Vec<Reservation> {
    reservations
        .into_iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .cloned()
        .collect()
}

fn local_label(start: DateTime<Utc>, tz: Tz) -> String {
    start.with_timezone(&tz).format("%H:%M").to_string()
}
