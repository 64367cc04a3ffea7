//! Local fallback storage for reservations.
//!
//! When the booking service cannot be reached, reservations are created,
//! edited and cancelled against a key-value backend instead, and every read
//! merges the local records with whatever the service returns.

pub mod backend;
pub mod config;
pub mod error;
pub mod merge;
pub mod remote;
pub mod service;
pub mod store;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use config::StoreConfig;
pub use error::StoreError;
pub use merge::{merge_reservations, MergePolicy};
pub use remote::{OfflineRemote, RemoteError, RemoteReservations};
pub use service::{ReservationService, ServiceError};
pub use store::{LocalReservationStore, Optimistic, RESERVATIONS_STORAGE_KEY};
