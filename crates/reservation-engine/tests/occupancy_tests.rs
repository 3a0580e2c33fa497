//! Tests for current occupancy and dashboard counters.

use chrono::{DateTime, TimeZone, Utc};
use reservation_engine::occupancy::{
    classrooms_available_now, classrooms_occupied_now, current_reservations, upcoming_confirmed_for,
    upcoming_reservations, DashboardSources, DashboardSummary, StatusCounts,
};
use reservation_engine::{
    AccessPolicy, Building, Classroom, ClassroomId, ClassroomType, Reservation, ReservationId,
    ReservationStatus, Role, UserId,
};

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
}

fn room(id: &str) -> Classroom {
    Classroom {
        id: ClassroomId::new(id),
        name: format!("Room {id}"),
        capacity: 30,
        kind: ClassroomType::Standard,
        resources: None,
        building_id: Some("b-1".into()),
    }
}

fn booking(
    id: &str,
    room: &str,
    owner: &str,
    (start, end): (DateTime<Utc>, DateTime<Utc>),
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId::new(id),
        classroom_id: ClassroomId::new(room),
        user_id: UserId::new(owner),
        start,
        end,
        status,
        purpose: None,
    }
}

fn fixture() -> (Vec<Building>, Vec<Classroom>, Vec<Reservation>) {
    let buildings = vec![Building {
        id: "b-1".into(),
        name: "Main".to_string(),
        location: None,
    }];
    let classrooms = vec![room("a"), room("b"), room("c")];
    let reservations = vec![
        booking("r-1", "a", "alice", (at(16, 9), at(16, 11)), ReservationStatus::Confirmed),
        booking("r-2", "b", "bob", (at(16, 9), at(16, 11)), ReservationStatus::Pending),
        booking("r-3", "c", "bob", (at(16, 14), at(16, 15)), ReservationStatus::Confirmed),
        booking("r-4", "c", "alice", (at(17, 9), at(17, 10)), ReservationStatus::Confirmed),
        booking("r-5", "b", "bob", (at(18, 9), at(18, 10)), ReservationStatus::Rejected),
    ];
    (buildings, classrooms, reservations)
}

#[test]
fn only_confirmed_in_progress_reservations_are_current() {
    let (_, _, reservations) = fixture();
    let current = current_reservations(&reservations, at(16, 10));
    let ids: Vec<&str> = current.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r-1"]);
}

#[test]
fn reservation_end_is_exclusive() {
    let (_, _, reservations) = fixture();
    assert!(current_reservations(&reservations, at(16, 11)).is_empty());
    assert_eq!(current_reservations(&reservations, at(16, 9)).len(), 1);
}

#[test]
fn occupied_and_available_partition_the_classrooms() {
    let (_, classrooms, reservations) = fixture();
    let now = at(16, 10);

    let occupied = classrooms_occupied_now(&classrooms, &reservations, now);
    let available = classrooms_available_now(&classrooms, &reservations, now);

    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id, ClassroomId::new("a"));
    assert_eq!(available.len(), 2);
    assert_eq!(occupied.len() + available.len(), classrooms.len());
}

#[test]
fn upcoming_is_sorted_and_limited() {
    let (_, _, reservations) = fixture();
    let upcoming = upcoming_reservations(&reservations, at(16, 12), 2);
    let ids: Vec<&str> = upcoming.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r-3", "r-4"]);
}

#[test]
fn upcoming_for_one_user_keeps_only_their_confirmed_bookings() {
    let (_, _, reservations) = fixture();

    // r-5 is bob's but rejected.
    let bob = upcoming_confirmed_for(&reservations, &UserId::new("bob"), at(16, 10), 10);
    let ids: Vec<&str> = bob.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r-3"]);

    let alice = upcoming_confirmed_for(&reservations, &UserId::new("alice"), at(16, 8), 1);
    let ids: Vec<&str> = alice.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r-1"]);
}

#[test]
fn status_counts_tally() {
    let (_, _, reservations) = fixture();
    let counts = StatusCounts::tally(&reservations);
    assert_eq!(
        counts,
        StatusCounts {
            pending: 1,
            confirmed: 3,
            rejected: 1,
            cancelled: 0,
        }
    );
    assert_eq!(counts.total(), 5);
}

#[test]
fn admin_dashboard_counts_everything() {
    let (buildings, classrooms, reservations) = fixture();
    let sources = DashboardSources {
        buildings: &buildings,
        classrooms: &classrooms,
        reservations: &reservations,
    };

    let summary = DashboardSummary::build(
        &AccessPolicy::default(),
        Some(Role::Admin),
        &UserId::new("root"),
        &sources,
        at(16, 10),
    );

    assert_eq!(summary.buildings, Some(1));
    assert_eq!(summary.classrooms, Some(3));
    assert_eq!(summary.occupied_now, 1);
    assert_eq!(summary.reservations.total(), 5);
    assert_eq!(summary.upcoming_confirmed, 2);
}

#[test]
fn student_dashboard_is_scoped_to_own_reservations() {
    let (buildings, classrooms, reservations) = fixture();
    let sources = DashboardSources {
        buildings: &buildings,
        classrooms: &classrooms,
        reservations: &reservations,
    };

    let summary = DashboardSummary::build(
        &AccessPolicy::default(),
        Some(Role::Student),
        &UserId::new("bob"),
        &sources,
        at(16, 10),
    );

    assert_eq!(summary.buildings, None);
    assert_eq!(summary.classrooms, None);
    assert_eq!(
        summary.reservations,
        StatusCounts {
            pending: 1,
            confirmed: 1,
            rejected: 1,
            cancelled: 0,
        }
    );
    assert_eq!(summary.upcoming_confirmed, 1);
}

#[test]
fn anonymous_dashboard_is_empty() {
    let (buildings, classrooms, reservations) = fixture();
    let sources = DashboardSources {
        buildings: &buildings,
        classrooms: &classrooms,
        reservations: &reservations,
    };

    let summary = DashboardSummary::build(
        &AccessPolicy::default(),
        None,
        &UserId::new("bob"),
        &sources,
        at(16, 10),
    );

    assert_eq!(summary.buildings, None);
    assert_eq!(summary.occupied_now, 0);
    assert_eq!(summary.reservations.total(), 0);
    assert_eq!(summary.upcoming_confirmed, 0);
}
