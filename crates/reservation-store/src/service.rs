use booking::{LocationContext, Reservation, ReservationRequest, ReservationUpdate, LOCAL_ID_PREFIX};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::error::StoreError;
use crate::merge::{merge_reservations, MergePolicy};
use crate::remote::{RemoteError, RemoteReservations};
use crate::store::LocalReservationStore;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Reservation not found: {id}")]
    NotFound { id: String },
}

/// Routes reservation operations between the remote booking service and the
/// local fallback store.
///
/// Ids with the `local_` prefix never leave the local store. Everything else
/// goes to the remote first and falls back to the local store only when the
/// service cannot be reached. Reads always merge both sources.
pub struct ReservationService<R, B> {
    remote: R,
    local: LocalReservationStore<B>,
    merge_policy: MergePolicy,
}

impl<R: RemoteReservations, B: StorageBackend> ReservationService<R, B> {
    pub fn new(remote: R, local: LocalReservationStore<B>) -> Self {
        Self {
            remote,
            local,
            merge_policy: MergePolicy::default(),
        }
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn local(&self) -> &LocalReservationStore<B> {
        &self.local
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    pub async fn create(
        &self,
        request: &ReservationRequest,
        context: &LocationContext,
    ) -> Result<Reservation, ServiceError> {
        match self.remote.create(request).await {
            Ok(reservation) => {
                info!(reservation_id = %reservation.id, "Reservation created remotely");
                Ok(reservation)
            }
            Err(e) if e.is_unavailable() => {
                warn!("Remote create failed, booking locally: {}", e);
                Ok(self.local.create(request, context).into_inner())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Vec<Reservation> {
        let remote = match self.remote.list().await {
            Ok(reservations) => reservations,
            Err(e) => {
                warn!("Remote list failed, showing local reservations only: {}", e);
                Vec::new()
            }
        };
        let local = self.local.list();
        debug!(
            local = local.len(),
            remote = remote.len(),
            policy = %self.merge_policy,
            "Merging reservations"
        );
        merge_reservations(local, remote, self.merge_policy)
    }

    pub async fn get(&self, id: &str) -> Option<Reservation> {
        if id.starts_with(LOCAL_ID_PREFIX) {
            return self.local.get(id);
        }
        self.list().await.into_iter().find(|r| r.id == id)
    }

    pub async fn update(
        &self,
        id: &str,
        update: &ReservationUpdate,
    ) -> Result<Reservation, ServiceError> {
        if !id.starts_with(LOCAL_ID_PREFIX) {
            match self.remote.update(id, update).await {
                Ok(reservation) => return Ok(reservation),
                Err(e) if e.is_unavailable() => {
                    warn!(reservation_id = %id, "Remote update failed, trying local store: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.local
            .update(id, update)?
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })
    }

    pub async fn cancel(&self, id: &str) -> Result<(), ServiceError> {
        if !id.starts_with(LOCAL_ID_PREFIX) {
            match self.remote.cancel(id).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_unavailable() => {
                    warn!(reservation_id = %id, "Remote cancel failed, trying local store: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if self.local.cancel(id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound { id: id.to_string() })
        }
    }
}
