use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::request::{LocationContext, ReservationRequest};
use crate::status::ReservationStatus;

/// Ids created by the local fallback store carry this prefix.
pub const LOCAL_ID_PREFIX: &str = "local_";

/// Separator between the start and end of a `timeSlot`.
pub const SLOT_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub location_address: String,
    pub date: String,
    pub time_slot: String,
    #[serde(default)]
    pub pre_order: String,
    pub guests_number: String,
    #[serde(default)]
    pub feedback_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Reservation {
    /// Build a freshly booked reservation from a request.
    pub fn from_request(id: String, request: &ReservationRequest, context: &LocationContext) -> Self {
        Self {
            id,
            status: ReservationStatus::Reserved,
            location_address: context.location_address.clone(),
            date: request.date.clone(),
            time_slot: join_time_slot(&request.time_from, &request.time_to),
            pre_order: String::new(),
            guests_number: request.guests_number.clone(),
            feedback_id: String::new(),
            created_at: None,
            user_id: None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }

    /// Start of the booked interval, i.e. the text before the first `" - "`.
    pub fn slot_start(&self) -> &str {
        self.time_slot
            .split(SLOT_SEPARATOR)
            .next()
            .unwrap_or(&self.time_slot)
            .trim()
    }

    pub fn slot_end(&self) -> Option<&str> {
        self.time_slot
            .split_once(SLOT_SEPARATOR)
            .map(|(_, end)| end.trim())
    }
}

pub fn join_time_slot(from: &str, to: &str) -> String {
    format!("{}{}{}", from, SLOT_SEPARATOR, to)
}

/// Render an ISO date as `"Dec 30, 2024"`. Unparseable input is returned as-is.
pub fn format_display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
