use serde::{Deserialize, Serialize};

/// Address used when the caller books without resolving the location first.
pub const DEFAULT_LOCATION_ADDRESS: &str = "Green & Tasty Restaurant";

/// Body of a booking call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub location_id: String,
    pub table_number: String,
    pub date: String,
    pub guests_number: String,
    pub time_from: String,
    pub time_to: String,
}

/// Partial edit of an existing reservation. Absent fields keep their value;
/// the time slot only changes when both ends are supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to: Option<String>,
}

impl ReservationUpdate {
    /// Both ends of the new slot, if the update carries a complete one.
    pub fn time_slot(&self) -> Option<(&str, &str)> {
        match (self.time_from.as_deref(), self.time_to.as_deref()) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => Some((from, to)),
            _ => None,
        }
    }
}

/// Out-of-band data the local store cannot resolve on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub location_address: String,
}

impl LocationContext {
    pub fn new(location_address: impl Into<String>) -> Self {
        Self {
            location_address: location_address.into(),
        }
    }
}

impl Default for LocationContext {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_ADDRESS)
    }
}

/// Outcome of a user-facing create/update/cancel action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationActionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReservationActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_time_slot_requires_both_ends() {
        let mut update = ReservationUpdate {
            time_from: Some("6:00 p.m.".to_string()),
            ..Default::default()
        };
        assert_eq!(update.time_slot(), None);

        update.time_to = Some("7:30 p.m.".to_string());
        assert_eq!(update.time_slot(), Some(("6:00 p.m.", "7:30 p.m.")));

        update.time_to = Some(String::new());
        assert_eq!(update.time_slot(), None);
    }

    #[test]
    fn test_request_accepts_camel_case_body() {
        let body = r#"{
            "locationId": "loc-2",
            "tableNumber": "8",
            "date": "2024-12-29",
            "guestsNumber": "6",
            "timeFrom": "6:30 p.m.",
            "timeTo": "8:00 p.m."
        }"#;
        let request: ReservationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.table_number, "8");
        assert_eq!(request.time_to, "8:00 p.m.");
    }

    #[test]
    fn test_action_result_serialization() {
        let ok = serde_json::to_value(ReservationActionResult::ok("Reservation cancelled")).unwrap();
        assert!(ok.get("error").is_none());

        let failed = ReservationActionResult::failed("Failed to cancel reservation", "not found");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("not found"));
    }
}
