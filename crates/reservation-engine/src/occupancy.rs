//! Point-in-time occupancy and the dashboard counters built on it.
//!
//! "Occupied" always means a CONFIRMED reservation whose half-open range
//! contains `now`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{AccessPolicy, ResourceKind};
use crate::model::{
    Building, Classroom, ClassroomId, Reservation, ReservationStatus, Role, UserId,
};

/// Confirmed reservations in progress at `now`.
pub fn current_reservations(reservations: &[Reservation], now: DateTime<Utc>) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Confirmed && r.start <= now && now < r.end)
        .collect()
}

fn occupied_ids(reservations: &[Reservation], now: DateTime<Utc>) -> BTreeSet<&ClassroomId> {
    current_reservations(reservations, now)
        .into_iter()
        .map(|r| &r.classroom_id)
        .collect()
}

pub fn classrooms_occupied_now<'a>(
    classrooms: &'a [Classroom],
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> Vec<&'a Classroom> {
    let occupied = occupied_ids(reservations, now);
    classrooms
        .iter()
        .filter(|c| occupied.contains(&c.id))
        .collect()
}

pub fn classrooms_available_now<'a>(
    classrooms: &'a [Classroom],
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> Vec<&'a Classroom> {
    let occupied = occupied_ids(reservations, now);
    classrooms
        .iter()
        .filter(|c| !occupied.contains(&c.id))
        .collect()
}

/// Reservations starting strictly after `now`, soonest first, at most `limit`.
pub fn upcoming_reservations(
    reservations: &[Reservation],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&Reservation> {
    soonest_first(reservations.iter().filter(|r| r.start > now), limit)
}

/// `actor`'s confirmed reservations starting strictly after `now`, soonest
/// first, at most `limit`.
pub fn upcoming_confirmed_for<'a>(
    reservations: &'a [Reservation],
    actor: &UserId,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&'a Reservation> {
    soonest_first(
        reservations
            .iter()
            .filter(|r| r.is_owned_by(actor) && is_upcoming_confirmed(r, now)),
        limit,
    )
}

fn is_upcoming_confirmed(reservation: &Reservation, now: DateTime<Utc>) -> bool {
    reservation.status == ReservationStatus::Confirmed && reservation.start > now
}

fn soonest_first<'a>(
    reservations: impl Iterator<Item = &'a Reservation>,
    limit: usize,
) -> Vec<&'a Reservation> {
    let mut upcoming: Vec<&Reservation> = reservations.collect();
    upcoming.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn tally<'a>(reservations: impl IntoIterator<Item = &'a Reservation>) -> Self {
        let mut counts = Self::default();
        for r in reservations {
            match r.status {
                ReservationStatus::Pending => counts.pending += 1,
                ReservationStatus::Confirmed => counts.confirmed += 1,
                ReservationStatus::Rejected => counts.rejected += 1,
                ReservationStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.confirmed + self.rejected + self.cancelled
    }
}

/// Records the dashboard aggregates over.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSources<'a> {
    pub buildings: &'a [Building],
    pub classrooms: &'a [Classroom],
    pub reservations: &'a [Reservation],
}

/// Counters shown on the landing dashboard.
///
/// Facility counts are only filled in for roles that may manage facilities.
/// Reservation counters cover only the reservations the caller may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub buildings: Option<usize>,
    pub classrooms: Option<usize>,
    pub occupied_now: usize,
    pub reservations: StatusCounts,
    pub upcoming_confirmed: usize,
}

impl DashboardSummary {
    pub fn build(
        policy: &AccessPolicy,
        role: Option<Role>,
        actor: &UserId,
        sources: &DashboardSources<'_>,
        now: DateTime<Utc>,
    ) -> Self {
        let manages = policy.can_manage(role, ResourceKind::Building);
        let visible = policy.visible_reservations(role, actor, sources.reservations);

        let upcoming_confirmed = visible
            .iter()
            .filter(|r| is_upcoming_confirmed(r, now))
            .count();

        let occupied_now = if role.is_some() {
            classrooms_occupied_now(sources.classrooms, sources.reservations, now).len()
        } else {
            0
        };

        Self {
            buildings: manages.then_some(sources.buildings.len()),
            classrooms: manages.then_some(sources.classrooms.len()),
            occupied_now,
            reservations: StatusCounts::tally(visible.iter().copied()),
            upcoming_confirmed,
        }
    }
}
