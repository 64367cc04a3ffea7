use std::path::PathBuf;
use tracing::warn;

use crate::backend::FileStorage;
use crate::merge::MergePolicy;
use crate::store::LocalReservationStore;

pub const DEFAULT_STORE_DIR: &str = ".tablebook/storage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub merge_policy: MergePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORE_DIR),
            merge_policy: MergePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Read `RESERVATION_STORE_DIR` and `RESERVATION_MERGE_POLICY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("RESERVATION_STORE_DIR") {
            if !dir.trim().is_empty() {
                config.storage_dir = PathBuf::from(dir);
            }
        }

        if let Ok(raw) = std::env::var("RESERVATION_MERGE_POLICY") {
            if !raw.trim().is_empty() {
                match raw.parse() {
                    Ok(policy) => config.merge_policy = policy,
                    Err(e) => warn!("RESERVATION_MERGE_POLICY: {}; using {}", e, config.merge_policy),
                }
            }
        }

        config
    }

    pub fn open_store(&self) -> LocalReservationStore<FileStorage> {
        LocalReservationStore::new(FileStorage::new(&self.storage_dir))
    }
}
