use booking::{
    join_time_slot, LocationContext, Reservation, ReservationRequest, ReservationStatus,
    ReservationUpdate, LOCAL_ID_PREFIX,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::StorageBackend;
use crate::error::StoreError;

/// Key the whole reservation collection is stored under.
pub const RESERVATIONS_STORAGE_KEY: &str = "restaurant_user_reservations";

/// A value produced in memory whose write to storage may have failed.
/// Callers proceed with `record` either way.
#[derive(Debug)]
pub struct Optimistic<T> {
    pub record: T,
    pub write_error: Option<StoreError>,
}

impl<T> Optimistic<T> {
    pub fn is_persisted(&self) -> bool {
        self.write_error.is_none()
    }

    pub fn into_inner(self) -> T {
        self.record
    }
}

/// One element of the stored array. Elements that do not match the
/// reservation shape are written back exactly as they were read.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum StoredEntry {
    Record(Reservation),
    Opaque(Value),
}

impl StoredEntry {
    fn into_record(self) -> Option<Reservation> {
        match self {
            StoredEntry::Record(r) => Some(r),
            StoredEntry::Opaque(_) => None,
        }
    }

    fn record_mut(&mut self) -> Option<&mut Reservation> {
        match self {
            StoredEntry::Record(r) => Some(r),
            StoredEntry::Opaque(_) => None,
        }
    }
}

/// Reservation CRUD over a key-value backend. Every mutation reads the full
/// collection, changes it and writes it back under one key; concurrent
/// writers are not coordinated and the last write wins.
pub struct LocalReservationStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> LocalReservationStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, RESERVATIONS_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored collection, reporting unreadable data as an error.
    ///
    /// Individual records that no longer match the reservation shape are
    /// left out of the result but stay in storage; only a payload that is
    /// not a JSON array counts as corrupt.
    pub fn load(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .read_entries()?
            .into_iter()
            .filter_map(StoredEntry::into_record)
            .collect())
    }

    fn read_entries(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let Some(raw) = self.backend.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;
        let Value::Array(items) = value else {
            return Err(StoreError::Corrupt {
                message: format!("expected an array under {}", self.key),
            });
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match Reservation::deserialize(&item) {
                Ok(r) => StoredEntry::Record(r),
                Err(e) => {
                    warn!("Keeping unreadable stored reservation #{} as-is: {}", idx, e);
                    StoredEntry::Opaque(item)
                }
            })
            .collect();
        Ok(entries)
    }

    /// Stored reservations, or an empty list when storage is unreadable.
    pub fn list(&self) -> Vec<Reservation> {
        match self.load() {
            Ok(reservations) => reservations,
            Err(e) => {
                warn!("Failed to load local reservations, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[StoredEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries).map_err(|e| StoreError::WriteError {
            message: e.to_string(),
        })?;
        self.backend.set_item(&self.key, &json)
    }

    pub fn create(
        &self,
        request: &ReservationRequest,
        context: &LocationContext,
    ) -> Optimistic<Reservation> {
        self.create_at(request, context, Utc::now())
    }

    pub fn create_at(
        &self,
        request: &ReservationRequest,
        context: &LocationContext,
        now: DateTime<Utc>,
    ) -> Optimistic<Reservation> {
        let mut reservation = Reservation::from_request(local_id(now), request, context);
        reservation.created_at = Some(now);

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt { message }) => {
                warn!("Stored reservations are corrupt, starting a new collection: {}", message);
                Vec::new()
            }
            Err(e) => {
                warn!(
                    reservation_id = %reservation.id,
                    "Local storage unreadable, reservation not saved: {}", e
                );
                return Optimistic {
                    record: reservation,
                    write_error: Some(e),
                };
            }
        };
        entries.push(StoredEntry::Record(reservation.clone()));

        let write_error = match self.save(&entries) {
            Ok(()) => {
                info!(reservation_id = %reservation.id, "Reservation saved to local storage");
                None
            }
            Err(e) => {
                warn!(
                    reservation_id = %reservation.id,
                    "Failed to save reservation to local storage: {}", e
                );
                Some(e)
            }
        };

        Optimistic {
            record: reservation,
            write_error,
        }
    }

    /// Apply a partial edit. `Ok(None)` means no reservation has that id;
    /// unreadable storage is an error.
    pub fn update(
        &self,
        id: &str,
        update: &ReservationUpdate,
    ) -> Result<Option<Reservation>, StoreError> {
        let mut entries = self.read_entries()?;
        let Some(existing) = entries
            .iter_mut()
            .filter_map(StoredEntry::record_mut)
            .find(|r| r.id == id)
        else {
            debug!(reservation_id = %id, "Update target not in local storage");
            return Ok(None);
        };

        if let Some(date) = non_empty(&update.date) {
            existing.date = date.to_string();
        }
        if let Some((from, to)) = update.time_slot() {
            existing.time_slot = join_time_slot(from, to);
        }
        if let Some(guests) = non_empty(&update.guests_number) {
            existing.guests_number = guests.to_string();
        }
        let updated = existing.clone();

        self.save(&entries)?;
        info!(reservation_id = %id, "Reservation updated in local storage");
        Ok(Some(updated))
    }

    /// Soft delete: flip the status to `Cancelled` and keep the record.
    /// Returns whether a reservation with that id exists; cancelling twice
    /// succeeds both times.
    pub fn cancel(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.read_entries()?;
        let Some(existing) = entries
            .iter_mut()
            .filter_map(StoredEntry::record_mut)
            .find(|r| r.id == id)
        else {
            return Ok(false);
        };
        existing.status = ReservationStatus::Cancelled;

        self.save(&entries)?;
        info!(reservation_id = %id, "Reservation cancelled in local storage");
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.list().into_iter().find(|r| r.id == id)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key)?;
        info!("All local reservations cleared");
        Ok(())
    }

    pub fn has_reservations(&self) -> bool {
        !self.list().is_empty()
    }

    /// Records created by this store, as opposed to copies of server records.
    pub fn local_only(&self) -> Vec<Reservation> {
        self.list().into_iter().filter(|r| r.is_local()).collect()
    }
}

fn local_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}_{}", LOCAL_ID_PREFIX, now.timestamp_millis(), &suffix[..9])
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
