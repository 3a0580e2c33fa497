//! Property-based tests for slot computation using proptest.
//!
//! These check invariants that must hold for *any* day, opening schedule and
//! reservation set, not just the scenarios in `slots_tests.rs`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use reservation_engine::overlap::overlaps;
use reservation_engine::{
    compute_slots, FacilityHours, Reservation, ReservationId, ReservationStatus, SlotRequest,
    TimeSlot,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day() -> impl Strategy<Value = NaiveDate> {
    (0i64..365).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn arb_timezone() -> impl Strategy<Value = chrono_tz::Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::America::Bogota),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Europe::Madrid),
    ]
}

fn arb_hours() -> impl Strategy<Value = FacilityHours> {
    (
        0u32..12,
        proptest::collection::vec(proptest::option::of(13u32..=24), 7),
        15i64..=180,
        arb_timezone(),
    )
        .prop_map(|(opening, closing, minutes, tz)| {
            let mut hours = FacilityHours::default()
                .with_opening_hour(opening)
                .with_slot_duration(Duration::minutes(minutes))
                .with_timezone(tz);
            for (i, close) in closing.into_iter().enumerate() {
                hours.closing[i] = close;
            }
            hours
        })
}

/// Reservations scattered over the day in question, including malformed ones
/// (negative length) and zero-length ones.
fn arb_reservations(day: NaiveDate) -> impl Strategy<Value = Vec<Reservation>> {
    proptest::collection::vec((0i64..(26 * 60), -90i64..240), 0..12).prop_map(move |specs| {
        let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (offset, length))| {
                let start = midnight + Duration::minutes(offset);
                Reservation {
                    id: ReservationId::new(format!("r-{i}")),
                    classroom_id: "room-101".into(),
                    user_id: "user-1".into(),
                    start,
                    end: start + Duration::minutes(length),
                    status: ReservationStatus::Confirmed,
                    purpose: None,
                }
            })
            .collect()
    })
}

fn arb_case() -> impl Strategy<
    Value = (
        FacilityHours,
        NaiveDate,
        Vec<Reservation>,
        DateTime<Utc>,
        Option<usize>,
    ),
> {
    (arb_hours(), arb_day()).prop_flat_map(|(hours, day)| {
        let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        (
            Just(hours),
            Just(day),
            arb_reservations(day),
            ((-36i64 * 60)..(36 * 60)).prop_map(move |m| midnight + Duration::minutes(m)),
            proptest::option::of(0usize..12),
        )
    })
}

fn exclude_id(reservations: &[Reservation], pick: Option<usize>) -> Option<ReservationId> {
    pick.and_then(|i| reservations.get(i)).map(|r| r.id.clone())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn slots_for(
    hours: &FacilityHours,
    day: NaiveDate,
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    compute_slots(
        hours,
        &SlotRequest {
            day,
            reservations,
            now,
            exclude: None,
        },
    )
}

proptest! {
    #[test]
    fn closed_day_yields_nothing((hours, day, reservations, now, _) in arb_case()) {
        let hours = hours.with_closing(day.weekday(), None);
        let slots = slots_for(&hours, day, &reservations, now);
        prop_assert!(slots.is_empty());
    }

    #[test]
    fn available_slots_never_overlap_a_reservation(
        (hours, day, reservations, now, pick) in arb_case()
    ) {
        let exclude = exclude_id(&reservations, pick);
        let slots = compute_slots(&hours, &SlotRequest {
            day,
            reservations: &reservations,
            now,
            exclude: exclude.as_ref(),
        });

        for slot in slots.iter().filter(|s| s.available) {
            for r in &reservations {
                if Some(&r.id) == exclude.as_ref() || r.end <= r.start {
                    continue;
                }
                prop_assert!(
                    !overlaps(slot.start, slot.end, r.start, r.end),
                    "available slot {} overlaps {}", slot.label, r.id
                );
            }
        }
    }

    #[test]
    fn excluded_reservation_never_blocks(
        (hours, day, reservations, now, pick) in arb_case()
    ) {
        let Some(exclude) = exclude_id(&reservations, pick) else {
            return Ok(());
        };
        let others: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.id != exclude)
            .cloned()
            .collect();

        let with_exclusion = compute_slots(&hours, &SlotRequest {
            day,
            reservations: &reservations,
            now,
            exclude: Some(&exclude),
        });
        let without_it = compute_slots(&hours, &SlotRequest {
            day,
            reservations: &others,
            now,
            exclude: None,
        });
        prop_assert_eq!(with_exclusion, without_it);
    }

    #[test]
    fn no_slot_starts_before_now_today((hours, day, reservations, now, _) in arb_case()) {
        let slots = slots_for(&hours, day, &reservations, now);
        if now.with_timezone(&hours.timezone).date_naive() == day {
            prop_assert!(slots.iter().all(|s| s.start >= now));
        }
    }

    #[test]
    fn every_slot_has_positive_length_and_sorted_starts(
        (hours, day, reservations, now, _) in arb_case()
    ) {
        let slots = slots_for(&hours, day, &reservations, now);
        prop_assert!(slots.iter().all(|s| s.end > s.start));
        prop_assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn computation_is_idempotent((hours, day, reservations, now, pick) in arb_case()) {
        let exclude = exclude_id(&reservations, pick);
        let request = SlotRequest {
            day,
            reservations: &reservations,
            now,
            exclude: exclude.as_ref(),
        };
        prop_assert_eq!(compute_slots(&hours, &request), compute_slots(&hours, &request));
    }

    #[test]
    fn slot_count_bounded_by_opening_hours((hours, day, reservations, now, _) in arb_case()) {
        let slots = slots_for(&hours, day, &reservations, now);
        let bound = match hours.closing_hour(day.weekday()) {
            Some(close) => close.saturating_sub(hours.opening_hour) as usize,
            None => 0,
        };
        prop_assert!(slots.len() <= bound);
    }
}
