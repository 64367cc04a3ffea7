use booking::{Reservation, ReservationStatus};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{ClockTime, ParsedClock};
use crate::config::PolicyConfig;

pub const REASON_COMPLETED: &str = "This reservation has already been completed";
pub const REASON_CANCELLED: &str = "This reservation has been cancelled";
pub const REASON_TIME_PASSED: &str = "The reservation time has passed";
pub const REASON_INVALID_DATE: &str = "The reservation date could not be read";
pub const FALLBACK_RESTRICTION_MESSAGE: &str = "Cannot modify this reservation";

/// Edit/cancel eligibility of one reservation at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRestrictionInfo {
    pub can_modify: bool,
    pub can_cancel: bool,
    pub minutes_until_reservation: i64,
    /// Last moment edits are accepted, formatted like `6:30 PM`.
    pub deadline_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_restriction: Option<String>,
    /// The slot start was unreadable and noon was assumed.
    #[serde(default)]
    pub start_defaulted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationCheck {
    pub is_allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Absolute start of a reservation: its date at the slot's start time in `tz`.
///
/// Returns `None` only when the date itself is unreadable; an unreadable
/// start time degrades to noon and is reported through `ParsedClock`.
pub fn reservation_start(reservation: &Reservation, tz: Tz) -> Option<(DateTime<Utc>, ParsedClock)> {
    let date = NaiveDate::parse_from_str(reservation.date.trim(), "%Y-%m-%d").ok()?;
    let clock = ClockTime::parse_or_default(reservation.slot_start());
    if clock.is_defaulted() {
        debug!(
            reservation_id = %reservation.id,
            time_slot = %reservation.time_slot,
            "Unreadable slot start, assuming noon"
        );
    }

    let naive = date.and_time(clock.time().to_naive_time());
    let start = tz
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive));
    Some((start, clock))
}

pub fn compute_restriction(
    reservation: &Reservation,
    now: DateTime<Utc>,
    config: &PolicyConfig,
) -> TimeRestrictionInfo {
    let can_modify_by_status = reservation.status.is_reserved();
    let status_reason = match &reservation.status {
        ReservationStatus::Finished => Some(REASON_COMPLETED.to_string()),
        ReservationStatus::Cancelled => Some(REASON_CANCELLED.to_string()),
        _ => None,
    };

    let Some((start, clock)) = reservation_start(reservation, config.timezone) else {
        return TimeRestrictionInfo {
            can_modify: false,
            can_cancel: false,
            minutes_until_reservation: 0,
            deadline_time: String::new(),
            reason_for_restriction: status_reason.or_else(|| Some(REASON_INVALID_DATE.to_string())),
            start_defaulted: false,
        };
    };

    let minutes_until_reservation = (start - now).num_milliseconds().div_euclid(60_000);
    let deadline_time = Duration::try_minutes(config.cutoff_minutes)
        .and_then(|cutoff| start.checked_sub_signed(cutoff))
        .map(|deadline| {
            deadline
                .with_timezone(&config.timezone)
                .format("%-I:%M %p")
                .to_string()
        })
        .unwrap_or_default();

    let can_modify_by_time = minutes_until_reservation > config.cutoff_minutes;
    let can_modify = can_modify_by_status && can_modify_by_time;

    let reason_for_restriction = if !can_modify_by_status {
        status_reason
    } else if !can_modify_by_time {
        if minutes_until_reservation <= 0 {
            Some(REASON_TIME_PASSED.to_string())
        } else {
            Some(window_reason(config.cutoff_minutes))
        }
    } else {
        None
    };

    TimeRestrictionInfo {
        can_modify,
        can_cancel: can_modify,
        minutes_until_reservation,
        deadline_time,
        reason_for_restriction,
        start_defaulted: clock.is_defaulted(),
    }
}

pub fn window_reason(cutoff_minutes: i64) -> String {
    format!(
        "Modifications are only allowed up to {} minutes before the reservation time",
        cutoff_minutes
    )
}

pub fn format_deadline_message(info: &TimeRestrictionInfo) -> String {
    if !info.can_modify {
        return info
            .reason_for_restriction
            .clone()
            .unwrap_or_else(|| FALLBACK_RESTRICTION_MESSAGE.to_string());
    }
    format!("Can cancel/edit until {}", info.deadline_time)
}

pub fn validate_modification_allowed(
    reservation: &Reservation,
    now: DateTime<Utc>,
    config: &PolicyConfig,
) -> ModificationCheck {
    let info = compute_restriction(reservation, now, config);
    ModificationCheck {
        is_allowed: info.can_modify,
        reason: info.reason_for_restriction,
    }
}
