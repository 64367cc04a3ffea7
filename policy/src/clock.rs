use chrono::NaiveTime;
use std::fmt;

/// Wall-clock time of day in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

/// Applied when a slot start cannot be read: local noon.
pub const DEFAULT_CLOCK: ClockTime = ClockTime {
    hour: 12,
    minute: 0,
};

/// Result of lenient parsing. `Defaulted` means the input was unreadable and
/// `DEFAULT_CLOCK` was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedClock {
    Exact(ClockTime),
    Defaulted(ClockTime),
}

impl ParsedClock {
    pub fn time(&self) -> ClockTime {
        match self {
            ParsedClock::Exact(t) | ParsedClock::Defaulted(t) => *t,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParsedClock::Defaulted(_))
    }
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Parse `H:MM` with an optional period marker (`a.m.`, `PM`, `pm`, ...),
    /// separated by whitespace or attached directly.
    ///
    /// A period containing `p` moves the hour to the afternoon unless it is
    /// 12; a period containing `a` maps 12 to midnight. Without a period the
    /// hour is read as 24-hour.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let split = token
            .find(|c: char| !(c.is_ascii_digit() || c == ':'))
            .unwrap_or(token.len());
        let (clock, period) = token.split_at(split);

        let (h, m) = clock.split_once(':')?;
        let hours: u32 = h.parse().ok()?;
        let minutes: u32 = m.parse().ok()?;

        let period = period.trim().to_lowercase();
        if period.is_empty() {
            return Self::new(hours, minutes);
        }
        if hours > 12 {
            return None;
        }

        let hour = if period.contains('p') {
            if hours == 12 {
                12
            } else {
                hours + 12
            }
        } else if period.contains('a') && hours == 12 {
            0
        } else {
            hours
        };
        Self::new(hour, minutes)
    }

    /// Lenient variant: unreadable input degrades to `DEFAULT_CLOCK`.
    pub fn parse_or_default(token: &str) -> ParsedClock {
        match Self::parse(token) {
            Some(t) => ParsedClock::Exact(t),
            None => ParsedClock::Defaulted(DEFAULT_CLOCK),
        }
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
