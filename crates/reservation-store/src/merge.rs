use booking::Reservation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Which copy survives when the local store and the remote service both
/// return a reservation with the same id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Optimistic local state shadows the remote copy.
    #[default]
    PreferLocal,
    PreferRemote,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefer-local" | "local" => Ok(MergePolicy::PreferLocal),
            "prefer-remote" | "remote" => Ok(MergePolicy::PreferRemote),
            other => Err(format!(
                "unknown merge policy '{}' (expected prefer-local or prefer-remote)",
                other
            )),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::PreferLocal => f.write_str("prefer-local"),
            MergePolicy::PreferRemote => f.write_str("prefer-remote"),
        }
    }
}

/// Combine local and remote reservations into one list, local records first,
/// with every id appearing once.
pub fn merge_reservations(
    local: Vec<Reservation>,
    remote: Vec<Reservation>,
    policy: MergePolicy,
) -> Vec<Reservation> {
    let local = match policy {
        MergePolicy::PreferLocal => local,
        MergePolicy::PreferRemote => {
            let remote_ids: HashSet<&str> = remote.iter().map(|r| r.id.as_str()).collect();
            local
                .into_iter()
                .filter(|r| !remote_ids.contains(r.id.as_str()))
                .collect()
        }
    };

    let mut seen = HashSet::new();
    local
        .into_iter()
        .chain(remote)
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
