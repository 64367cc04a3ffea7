//! Seam for the remote booking service.
//!
//! The HTTP client lives with the application; this crate only needs to know
//! whether a call succeeded, was refused, or never reached the service.

use async_trait::async_trait;
use booking::{Reservation, ReservationRequest, ReservationUpdate};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Booking service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Booking service rejected the request: {message}")]
    Rejected { message: String },

    #[error("Reservation not found: {id}")]
    NotFound { id: String },
}

impl RemoteError {
    /// Only unreachable-service failures send work to the local store.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RemoteError::Unavailable { .. })
    }
}

#[async_trait]
pub trait RemoteReservations: Send + Sync {
    async fn create(&self, request: &ReservationRequest) -> Result<Reservation, RemoteError>;

    async fn list(&self) -> Result<Vec<Reservation>, RemoteError>;

    async fn update(
        &self,
        id: &str,
        update: &ReservationUpdate,
    ) -> Result<Reservation, RemoteError>;

    async fn cancel(&self, id: &str) -> Result<(), RemoteError>;
}

/// Remote that is never reachable; every operation runs against the local store.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRemote;

impl OfflineRemote {
    fn unavailable<T>() -> Result<T, RemoteError> {
        Err(RemoteError::Unavailable {
            message: "running offline".to_string(),
        })
    }
}

#[async_trait]
impl RemoteReservations for OfflineRemote {
    async fn create(&self, _request: &ReservationRequest) -> Result<Reservation, RemoteError> {
        Self::unavailable()
    }

    async fn list(&self) -> Result<Vec<Reservation>, RemoteError> {
        Self::unavailable()
    }

    async fn update(
        &self,
        _id: &str,
        _update: &ReservationUpdate,
    ) -> Result<Reservation, RemoteError> {
        Self::unavailable()
    }

    async fn cancel(&self, _id: &str) -> Result<(), RemoteError> {
        Self::unavailable()
    }
}
