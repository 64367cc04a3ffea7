use chrono_tz::Tz;
use tracing::warn;

pub const DEFAULT_CUTOFF_MINUTES: i64 = 30;

/// Longest accepted cutoff: one week.
pub const MAX_CUTOFF_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Edits and cancellations close this many minutes before the slot starts.
    pub cutoff_minutes: i64,
    /// Timezone the restaurant's dates and slot times are written in.
    pub timezone: Tz,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cutoff_minutes: DEFAULT_CUTOFF_MINUTES,
            timezone: Tz::UTC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyConfigError {
    InvalidTimezone(String),
    InvalidCutoff(String),
}

impl std::fmt::Display for PolicyConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyConfigError::InvalidTimezone(tz) => write!(f, "Invalid timezone: {}", tz),
            PolicyConfigError::InvalidCutoff(raw) => {
                write!(
                    f,
                    "Invalid cutoff: {} (expected 0 to {} minutes)",
                    raw, MAX_CUTOFF_MINUTES
                )
            }
        }
    }
}

impl std::error::Error for PolicyConfigError {}

impl PolicyConfig {
    pub fn new(cutoff_minutes: i64, timezone: &str) -> Result<Self, PolicyConfigError> {
        if !(0..=MAX_CUTOFF_MINUTES).contains(&cutoff_minutes) {
            return Err(PolicyConfigError::InvalidCutoff(cutoff_minutes.to_string()));
        }
        Ok(Self {
            cutoff_minutes,
            timezone: parse_timezone(timezone)?,
        })
    }
}

pub fn parse_timezone(raw: &str) -> Result<Tz, PolicyConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| PolicyConfigError::InvalidTimezone(raw.to_string()))
}

pub fn parse_cutoff(raw: &str) -> Result<i64, PolicyConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(v) if (0..=MAX_CUTOFF_MINUTES).contains(&v) => Ok(v),
        _ => Err(PolicyConfigError::InvalidCutoff(raw.to_string())),
    }
}

/// Read `RESERVATION_CUTOFF_MINUTES` and `RESERVATION_TIMEZONE`.
/// Malformed values are logged and replaced by the defaults.
pub fn load_from_env() -> PolicyConfig {
    let mut config = PolicyConfig::default();

    if let Ok(raw) = std::env::var("RESERVATION_CUTOFF_MINUTES") {
        if !raw.trim().is_empty() {
            match parse_cutoff(&raw) {
                Ok(minutes) => config.cutoff_minutes = minutes,
                Err(e) => warn!("{}; using {} minutes", e, DEFAULT_CUTOFF_MINUTES),
            }
        }
    }

    if let Ok(raw) = std::env::var("RESERVATION_TIMEZONE") {
        if !raw.trim().is_empty() {
            match parse_timezone(&raw) {
                Ok(tz) => config.timezone = tz,
                Err(e) => warn!("{}; using UTC", e),
            }
        }
    }

    config
}
