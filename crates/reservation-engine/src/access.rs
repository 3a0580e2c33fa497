//! Role-based permission checks.
//!
//! Every check takes the caller's role as `Option<Role>`: an absent role (no
//! session, or an undecodable token) is denied everything. Checks are plain
//! set-membership tests; no role implicitly inherits another's rights.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Reservation, ReservationStatus, Role, UserId};
use crate::nav::{self, NavLink};

/// Kinds of records a caller may create, update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Building,
    Classroom,
    User,
    Reservation,
}

/// Permission rules for one deployment.
///
/// The only configurable part is which roles may manage facilities
/// (buildings and classrooms). Some deployments let professors do this, so it
/// is an allow-set rather than a fixed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    pub facility_managers: BTreeSet<Role>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            facility_managers: BTreeSet::from([Role::Admin]),
        }
    }
}

impl AccessPolicy {
    pub fn with_facility_managers(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            facility_managers: roles.into_iter().collect(),
        }
    }

    /// Whether `role` may create, update and delete records of `resource`.
    ///
    /// For reservations this is the right to create one; editing an existing
    /// reservation is decided by [`AccessPolicy::can_edit_reservation`].
    pub fn can_manage(&self, role: Option<Role>, resource: ResourceKind) -> bool {
        let Some(role) = role else {
            return false;
        };
        match resource {
            ResourceKind::Building | ResourceKind::Classroom => {
                self.facility_managers.contains(&role)
            }
            ResourceKind::User => role == Role::Admin,
            ResourceKind::Reservation => true,
        }
    }

    pub fn can_create_reservation(&self, role: Option<Role>) -> bool {
        self.can_manage(role, ResourceKind::Reservation)
    }

    /// Admins may edit any reservation. Anyone else only their own, and only
    /// while it is still pending.
    pub fn can_edit_reservation(
        &self,
        role: Option<Role>,
        actor: &UserId,
        reservation: &Reservation,
    ) -> bool {
        match role {
            None => false,
            Some(Role::Admin) => true,
            Some(_) => {
                reservation.is_owned_by(actor)
                    && reservation.status == ReservationStatus::Pending
            }
        }
    }

    /// Whether `role` may move `reservation` to `target`.
    ///
    /// - PENDING -> CONFIRMED / REJECTED: admin only.
    /// - PENDING or CONFIRMED -> CANCELLED: admin for any owner, or the owner.
    ///
    /// Everything else is denied, including any move out of a terminal status
    /// and any move back to PENDING.
    pub fn can_transition_status(
        &self,
        role: Option<Role>,
        actor: &UserId,
        reservation: &Reservation,
        target: ReservationStatus,
    ) -> bool {
        let Some(role) = role else {
            return false;
        };
        let from = reservation.status;
        match target {
            ReservationStatus::Confirmed | ReservationStatus::Rejected => {
                role == Role::Admin && from == ReservationStatus::Pending
            }
            ReservationStatus::Cancelled => {
                matches!(
                    from,
                    ReservationStatus::Pending | ReservationStatus::Confirmed
                ) && (role == Role::Admin || reservation.is_owned_by(actor))
            }
            ReservationStatus::Pending => false,
        }
    }

    pub fn can_cancel_reservation(
        &self,
        role: Option<Role>,
        actor: &UserId,
        reservation: &Reservation,
    ) -> bool {
        self.can_transition_status(role, actor, reservation, ReservationStatus::Cancelled)
    }

    /// Admins may delete any reservation, owners their own. Unlike edit and
    /// cancel, deletion does not depend on the status.
    pub fn can_delete_reservation(
        &self,
        role: Option<Role>,
        actor: &UserId,
        reservation: &Reservation,
    ) -> bool {
        match role {
            None => false,
            Some(Role::Admin) => true,
            Some(_) => reservation.is_owned_by(actor),
        }
    }

    /// Admins and professors list every reservation; tutors and students
    /// only their own.
    pub fn can_view_all_reservations(&self, role: Option<Role>) -> bool {
        matches!(role, Some(Role::Admin | Role::Professor))
    }

    pub fn visible_reservations<'a>(
        &self,
        role: Option<Role>,
        actor: &UserId,
        reservations: &'a [Reservation],
    ) -> Vec<&'a Reservation> {
        if role.is_none() {
            return Vec::new();
        }
        let all = self.can_view_all_reservations(role);
        reservations
            .iter()
            .filter(|r| all || r.is_owned_by(actor))
            .collect()
    }

    /// Navigation links visible to `role`; see [`nav::filter_nav_links`].
    pub fn filter_nav_links(&self, role: Option<Role>, links: &[NavLink]) -> Vec<NavLink> {
        nav::filter_nav_links(role, links)
    }
}
