use booking::ReservationStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadge {
    pub text: &'static str,
    pub style_class: &'static str,
}

const RESERVED: StatusBadge = StatusBadge {
    text: "Reserved",
    style_class: "badge badge-reserved",
};
const FINISHED: StatusBadge = StatusBadge {
    text: "Finished",
    style_class: "badge badge-finished",
};
const CANCELLED: StatusBadge = StatusBadge {
    text: "Cancelled",
    style_class: "badge badge-cancelled",
};

/// Badge for a status. Unrecognized statuses are shown as `Reserved`.
pub fn status_badge(status: &ReservationStatus) -> StatusBadge {
    match status {
        ReservationStatus::Reserved | ReservationStatus::Other(_) => RESERVED,
        ReservationStatus::Finished => FINISHED,
        ReservationStatus::Cancelled => CANCELLED,
    }
}
