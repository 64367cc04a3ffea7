//! Reservation policy engine: decides whether a reservation may still be
//! edited or cancelled and derives the display metadata that goes with it.

pub mod badge;
pub mod clock;
pub mod config;
pub mod restriction;

pub use badge::{status_badge, StatusBadge};
pub use clock::{ClockTime, ParsedClock, DEFAULT_CLOCK};
pub use config::{load_from_env, PolicyConfig, PolicyConfigError};
pub use restriction::{
    compute_restriction, format_deadline_message, validate_modification_allowed,
    ModificationCheck, TimeRestrictionInfo,
};

use booking::Reservation;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(load_from_env())
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn compute_restriction(&self, reservation: &Reservation, now: DateTime<Utc>) -> TimeRestrictionInfo {
        compute_restriction(reservation, now, &self.config)
    }

    pub fn validate_modification_allowed(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> ModificationCheck {
        validate_modification_allowed(reservation, now, &self.config)
    }

    /// Restriction info and the one-line message a list view shows for it.
    pub fn describe(&self, reservation: &Reservation, now: DateTime<Utc>) -> (TimeRestrictionInfo, String) {
        let info = self.compute_restriction(reservation, now);
        let message = format_deadline_message(&info);
        (info, message)
    }
}
