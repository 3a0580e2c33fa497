//! Half-open interval overlap between requested ranges and reservations.
//!
//! Two ranges overlap when `a.start < b.end && a.end > b.start`. Ranges that
//! merely touch (one ends exactly when the other starts) do NOT overlap.

use chrono::{DateTime, Utc};

use crate::model::{Reservation, ReservationId, ReservationStatus};

/// A confirmed reservation that collides with a requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub reservation: Reservation,
    pub overlap_minutes: i64,
}

/// Half-open overlap test on `[a_start, a_end)` and `[b_start, b_end)`.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Whether `reservation` occupies any part of `[start, end)`.
///
/// The excluded reservation and malformed records (end <= start) never block.
pub fn blocks(
    reservation: &Reservation,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&ReservationId>,
) -> bool {
    if exclude == Some(&reservation.id) {
        return false;
    }
    reservation.is_well_formed() && overlaps(start, end, reservation.start, reservation.end)
}

/// Find every confirmed reservation overlapping `[start, end)`.
///
/// Pending, rejected and cancelled reservations do not hold the room. The
/// reservation named by `exclude` is skipped so an edit never collides with
/// its own previous booking.
pub fn find_conflicts(
    reservations: &[Reservation],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&ReservationId>,
) -> Vec<Conflict> {
    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed)
        .filter(|r| blocks(r, start, end, exclude))
        .map(|r| {
            let overlap_start = start.max(r.start);
            let overlap_end = end.min(r.end);
            Conflict {
                reservation: r.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}

/// True iff `[start, end)` is a non-empty range that no confirmed reservation
/// (other than `exclude`) overlaps.
pub fn is_range_available(
    reservations: &[Reservation],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&ReservationId>,
) -> bool {
    start < end && find_conflicts(reservations, start, end, exclude).is_empty()
}
