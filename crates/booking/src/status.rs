use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a reservation.
///
/// Parsing is case-insensitive. Values the service sends that are not one of
/// the known statuses are kept verbatim in `Other` so they survive a
/// load/save cycle of the local store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Reserved,
    Finished,
    Cancelled,
    Other(String),
}

impl ReservationStatus {
    /// Single normalization point for status strings.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "reserved" => ReservationStatus::Reserved,
            "finished" => ReservationStatus::Finished,
            "cancelled" | "canceled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Reserved => "Reserved",
            ReservationStatus::Finished => "Finished",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Other(raw) => raw,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, ReservationStatus::Reserved)
    }

    /// `Finished` and `Cancelled` accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Finished | ReservationStatus::Cancelled
        )
    }

    pub fn can_transition_to(&self, next: &ReservationStatus) -> bool {
        matches!(
            (self, next),
            (
                ReservationStatus::Reserved,
                ReservationStatus::Cancelled | ReservationStatus::Finished
            )
        )
    }
}

impl From<String> for ReservationStatus {
    fn from(raw: String) -> Self {
        ReservationStatus::parse(&raw)
    }
}

impl From<&str> for ReservationStatus {
    fn from(raw: &str) -> Self {
        ReservationStatus::parse(raw)
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
