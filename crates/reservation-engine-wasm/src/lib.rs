//! WASM bindings for reservation-engine.
//!
//! Exposes slot computation, the access policy and menu filtering to the web
//! front-end via `wasm-bindgen`. Complex values cross the boundary as JSON
//! strings. Reservations use the backend's field names (`startTime`,
//! `classroomId`, ...), so REST responses can be passed through unchanged.
//!
//! Facility hours and the management allow-set come from an optional TOML
//! config string (see `reservation_engine::config`); `None` uses defaults.
//!
//! Role arguments are the raw claim string (`"ADMIN"`, `"ROLE_TUTOR"`, ...).
//! A missing or unrecognized role is treated as no role, which denies
//! everything.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p reservation-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir www/wasm/ \
//!   target/wasm32-unknown-unknown/release/reservation_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use reservation_engine::{
    compute_slots, is_range_available, parse_config, parse_instant, AccessPolicy, EngineConfig,
    Reservation, ReservationId, ReservationStatus, ResourceKind, Role, SlotRequest, UserId,
};
use wasm_bindgen::prelude::*;

type BridgeResult<T> = Result<T, String>;

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn load_config(config_toml: Option<&str>) -> BridgeResult<EngineConfig> {
    match config_toml {
        Some(toml) => parse_config(toml).map_err(|e| e.to_string()),
        None => Ok(EngineConfig::default()),
    }
}

fn parse_role(role: Option<&str>) -> Option<Role> {
    role.and_then(|r| r.parse().ok())
}

fn parse_resource(resource: &str) -> BridgeResult<ResourceKind> {
    match resource.trim().to_ascii_lowercase().as_str() {
        "building" => Ok(ResourceKind::Building),
        "classroom" => Ok(ResourceKind::Classroom),
        "user" => Ok(ResourceKind::User),
        "reservation" => Ok(ResourceKind::Reservation),
        other => Err(format!("Unknown resource kind '{}'", other)),
    }
}

fn parse_reservation(json: &str) -> BridgeResult<Reservation> {
    serde_json::from_str(json).map_err(|e| format!("Invalid reservation JSON: {}", e))
}

fn parse_reservations(json: &str) -> BridgeResult<Vec<Reservation>> {
    serde_json::from_str(json).map_err(|e| format!("Invalid reservations JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> BridgeResult<String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Native implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn compute_slots_impl(
    day: &str,
    reservations_json: &str,
    now: &str,
    exclude: Option<&str>,
    config_toml: Option<&str>,
) -> BridgeResult<String> {
    let config = load_config(config_toml)?;
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", day, e))?;
    let now = parse_instant(now).map_err(|e| e.to_string())?;
    let reservations = parse_reservations(reservations_json)?;
    let exclude = exclude.map(ReservationId::new);

    let slots = compute_slots(
        &config.hours,
        &SlotRequest {
            day,
            reservations: &reservations,
            now,
            exclude: exclude.as_ref(),
        },
    );
    to_json(&slots)
}

fn can_transition_impl(
    role: Option<&str>,
    actor_id: &str,
    reservation_json: &str,
    target: &str,
) -> BridgeResult<bool> {
    let reservation = parse_reservation(reservation_json)?;
    let target = target.parse::<ReservationStatus>().map_err(|e| e.to_string())?;
    Ok(AccessPolicy::default().can_transition_status(
        parse_role(role),
        &UserId::new(actor_id),
        &reservation,
        target,
    ))
}

fn can_delete_impl(
    role: Option<&str>,
    actor_id: &str,
    reservation_json: &str,
) -> BridgeResult<bool> {
    let reservation = parse_reservation(reservation_json)?;
    Ok(AccessPolicy::default().can_delete_reservation(
        parse_role(role),
        &UserId::new(actor_id),
        &reservation,
    ))
}

fn filter_nav_links_impl(
    role: Option<&str>,
    links_json: Option<&str>,
    config_toml: Option<&str>,
) -> BridgeResult<String> {
    let config = load_config(config_toml)?;
    let links = match links_json {
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Invalid nav links JSON: {}", e))?
        }
        None => config.nav.clone(),
    };
    to_json(&config.policy.filter_nav_links(parse_role(role), &links))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the slot list for one classroom and day.
///
/// - `day` -- calendar day in facility local time (`YYYY-MM-DD`)
/// - `reservations_json` -- JSON array of confirmed reservations for the day
/// - `now` -- current instant (ISO 8601)
/// - `exclude` -- id of the reservation being edited, if any
/// - `config_toml` -- optional facility configuration
///
/// Returns a JSON array of `{start, end, label, available}`.
#[wasm_bindgen(js_name = "computeSlots")]
pub fn compute_slots_js(
    day: &str,
    reservations_json: &str,
    now: &str,
    exclude: Option<String>,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    compute_slots_impl(
        day,
        reservations_json,
        now,
        exclude.as_deref(),
        config_toml.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Whether `role` may create/update/delete records of `resource`
/// (`building`, `classroom`, `user`, `reservation`).
#[wasm_bindgen(js_name = "canManage")]
pub fn can_manage(
    role: Option<String>,
    resource: &str,
    config_toml: Option<String>,
) -> Result<bool, JsValue> {
    let inner = || -> BridgeResult<bool> {
        let config = load_config(config_toml.as_deref())?;
        let resource = parse_resource(resource)?;
        Ok(config.policy.can_manage(parse_role(role.as_deref()), resource))
    };
    inner().map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "canEditReservation")]
pub fn can_edit_reservation(
    role: Option<String>,
    actor_id: &str,
    reservation_json: &str,
) -> Result<bool, JsValue> {
    let reservation = parse_reservation(reservation_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(AccessPolicy::default().can_edit_reservation(
        parse_role(role.as_deref()),
        &UserId::new(actor_id),
        &reservation,
    ))
}

/// Whether `role` may move the reservation to `target`
/// (`PENDING`, `CONFIRMED`, `REJECTED`, `CANCELLED`).
#[wasm_bindgen(js_name = "canTransitionStatus")]
pub fn can_transition_status(
    role: Option<String>,
    actor_id: &str,
    reservation_json: &str,
    target: &str,
) -> Result<bool, JsValue> {
    can_transition_impl(role.as_deref(), actor_id, reservation_json, target)
        .map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "canCancelReservation")]
pub fn can_cancel_reservation(
    role: Option<String>,
    actor_id: &str,
    reservation_json: &str,
) -> Result<bool, JsValue> {
    can_transition_impl(
        role.as_deref(),
        actor_id,
        reservation_json,
        ReservationStatus::Cancelled.as_str(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Admins delete any reservation, owners their own, whatever its status.
#[wasm_bindgen(js_name = "canDeleteReservation")]
pub fn can_delete_reservation(
    role: Option<String>,
    actor_id: &str,
    reservation_json: &str,
) -> Result<bool, JsValue> {
    can_delete_impl(role.as_deref(), actor_id, reservation_json)
        .map_err(|e| JsValue::from_str(&e))
}

/// Filter a menu tree for `role`. With no `links_json`, filters the
/// configured (or default) menu.
#[wasm_bindgen(js_name = "filterNavLinks")]
pub fn filter_nav_links(
    role: Option<String>,
    links_json: Option<String>,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    filter_nav_links_impl(
        role.as_deref(),
        links_json.as_deref(),
        config_toml.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Whether `[start, end)` is free of confirmed reservations other than `exclude`.
#[wasm_bindgen(js_name = "isRangeAvailable")]
pub fn is_range_available_js(
    reservations_json: &str,
    start: &str,
    end: &str,
    exclude: Option<String>,
) -> Result<bool, JsValue> {
    let inner = || -> BridgeResult<bool> {
        let reservations = parse_reservations(reservations_json)?;
        let start = parse_instant(start).map_err(|e| e.to_string())?;
        let end = parse_instant(end).map_err(|e| e.to_string())?;
        let exclude = exclude.as_deref().map(ReservationId::new);
        Ok(is_range_available(
            &reservations,
            start,
            end,
            exclude.as_ref(),
        ))
    };
    inner().map_err(|e| JsValue::from_str(&e))
}
