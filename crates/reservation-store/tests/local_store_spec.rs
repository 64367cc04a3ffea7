use booking::{LocationContext, ReservationRequest, ReservationStatus, ReservationUpdate};
use reservation_store::{
    FileStorage, LocalReservationStore, MemoryStorage, StorageBackend, StoreError,
    RESERVATIONS_STORAGE_KEY,
};
use std::sync::Arc;
use tempfile::TempDir;

fn dinner_request() -> ReservationRequest {
    ReservationRequest {
        location_id: "test-location-1".to_string(),
        table_number: "5".to_string(),
        date: "2024-12-30".to_string(),
        guests_number: "4".to_string(),
        time_from: "7:00 p.m.".to_string(),
        time_to: "8:30 p.m.".to_string(),
    }
}

fn test_context() -> LocationContext {
    LocationContext::new("123 Test Street, Test City")
}

#[test]
fn given_booking_request_when_creating_then_local_reserved_record_is_stored() {
    let store = LocalReservationStore::new(MemoryStorage::new());

    let created = store.create(&dinner_request(), &test_context());
    assert!(created.is_persisted());

    let reservation = created.into_inner();
    assert!(reservation.id.starts_with("local_"));
    assert_eq!(reservation.status, ReservationStatus::Reserved);
    assert_eq!(reservation.time_slot, "7:00 p.m. - 8:30 p.m.");
    assert_eq!(reservation.guests_number, "4");
    assert_eq!(reservation.location_address, "123 Test Street, Test City");

    let listed = store.list();
    assert_eq!(listed, vec![reservation]);
}

#[test]
fn given_two_bookings_when_listing_then_both_kept_in_order() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    let first = store.create(&dinner_request(), &test_context()).into_inner();
    let second = store
        .create(
            &ReservationRequest {
                date: "2024-12-31".to_string(),
                ..dinner_request()
            },
            &test_context(),
        )
        .into_inner();

    let ids: Vec<_> = store.list().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(store.has_reservations());
}

#[test]
fn given_invalid_json_under_key_when_listing_then_empty_without_error() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store
        .backend()
        .set_item(RESERVATIONS_STORAGE_KEY, "{not json at all")
        .unwrap();

    assert!(store.list().is_empty());
    assert!(!store.has_reservations());
    assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn given_corrupt_storage_when_creating_then_collection_starts_over() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store
        .backend()
        .set_item(RESERVATIONS_STORAGE_KEY, "42")
        .unwrap();

    let created = store.create(&dinner_request(), &test_context()).into_inner();
    assert_eq!(store.load().unwrap(), vec![created]);
}

#[test]
fn given_failing_writes_when_creating_then_record_is_still_returned() {
    let storage = Arc::new(MemoryStorage::new());
    let store = LocalReservationStore::new(storage.clone());
    storage.set_fail_writes(true);

    let created = store.create(&dinner_request(), &test_context());
    assert!(!created.is_persisted());
    assert!(matches!(
        created.write_error,
        Some(StoreError::WriteError { .. })
    ));
    assert_eq!(created.record.time_slot, "7:00 p.m. - 8:30 p.m.");
    assert!(store.list().is_empty());
}

#[test]
fn given_existing_record_when_updating_then_fields_replaced_and_id_kept() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    let original = store.create(&dinner_request(), &test_context()).into_inner();

    let updated = store
        .update(
            &original.id,
            &ReservationUpdate {
                date: Some("2025-01-02".to_string()),
                time_from: Some("6:00 p.m.".to_string()),
                time_to: Some("7:30 p.m.".to_string()),
                guests_number: Some("6".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .expect("reservation exists");

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.date, "2025-01-02");
    assert_eq!(updated.time_slot, "6:00 p.m. - 7:30 p.m.");
    assert_eq!(updated.guests_number, "6");
    assert_eq!(updated.status, ReservationStatus::Reserved);
    assert_eq!(store.get(&original.id), Some(updated));
}

#[test]
fn given_unknown_id_when_updating_or_cancelling_then_not_found() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store.create(&dinner_request(), &test_context());

    let update = ReservationUpdate {
        guests_number: Some("2".to_string()),
        ..Default::default()
    };
    assert_eq!(store.update("local_0_missing00", &update).unwrap(), None);
    assert!(!store.cancel("local_0_missing00").unwrap());
}

#[test]
fn given_reservation_when_cancelled_twice_then_both_succeed_and_record_kept() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    let reservation = store.create(&dinner_request(), &test_context()).into_inner();

    assert!(store.cancel(&reservation.id).unwrap());
    assert_eq!(
        store.get(&reservation.id).unwrap().status,
        ReservationStatus::Cancelled
    );

    assert!(store.cancel(&reservation.id).unwrap());
    let after = store.list();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].status, ReservationStatus::Cancelled);
}

#[test]
fn given_mixed_records_when_filtering_local_then_only_prefixed_ids() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    let local = store.create(&dinner_request(), &test_context()).into_inner();

    let mut all = store.list();
    let mut server_copy = local.clone();
    server_copy.id = "srv-77".to_string();
    all.push(server_copy);
    store
        .backend()
        .set_item(RESERVATIONS_STORAGE_KEY, &serde_json::to_string(&all).unwrap())
        .unwrap();

    assert_eq!(store.list().len(), 2);
    assert_eq!(store.local_only(), vec![local]);
}

#[test]
fn given_records_when_clearing_then_store_is_empty() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store.create(&dinner_request(), &test_context());

    store.clear().unwrap();
    assert!(!store.has_reservations());
    assert_eq!(
        store.backend().get_item(RESERVATIONS_STORAGE_KEY).unwrap(),
        None
    );
}

#[test]
fn given_file_backend_when_reopened_then_records_survive() {
    let temp_dir = TempDir::new().unwrap();
    let created = {
        let store = LocalReservationStore::new(FileStorage::new(temp_dir.path()));
        store.create(&dinner_request(), &test_context()).into_inner()
    };

    let reopened = LocalReservationStore::new(FileStorage::new(temp_dir.path()));
    assert_eq!(reopened.list(), vec![created.clone()]);

    let raw = std::fs::read_to_string(
        temp_dir
            .path()
            .join(format!("{}.json", RESERVATIONS_STORAGE_KEY)),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["timeSlot"], "7:00 p.m. - 8:30 p.m.");
    assert_eq!(value[0]["status"], "Reserved");
    assert!(value[0]["createdAt"].is_string());
}

#[test]
fn given_custom_key_when_storing_then_default_key_untouched() {
    let storage = Arc::new(MemoryStorage::new());
    let store = LocalReservationStore::with_key(storage.clone(), "staging_reservations");
    store.create(&dinner_request(), &test_context());

    assert!(storage.get_item("staging_reservations").unwrap().is_some());
    assert!(storage.get_item(RESERVATIONS_STORAGE_KEY).unwrap().is_none());
}

const SERVER_COPY_WITH_NUMERIC_GUESTS: &str = r#"{"id":"srv-1","status":"Reserved","locationAddress":"48 Rustaveli Avenue","date":"2024-12-30","timeSlot":"1:00 p.m. - 2:30 p.m.","preOrder":"","guestsNumber":4,"feedbackId":""}"#;

#[test]
fn given_unreadable_stored_element_when_rewriting_then_it_is_kept_verbatim() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store
        .backend()
        .set_item(
            RESERVATIONS_STORAGE_KEY,
            &format!("[{}]", SERVER_COPY_WITH_NUMERIC_GUESTS),
        )
        .unwrap();

    let created = store.create(&dinner_request(), &test_context());
    assert!(created.is_persisted());
    let id = created.into_inner().id;

    let update = ReservationUpdate {
        guests_number: Some("3".to_string()),
        ..Default::default()
    };
    assert!(store.update(&id, &update).unwrap().is_some());
    assert!(store.cancel(&id).unwrap());

    let raw = store
        .backend()
        .get_item(RESERVATIONS_STORAGE_KEY)
        .unwrap()
        .unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let expected: serde_json::Value = serde_json::from_str(SERVER_COPY_WITH_NUMERIC_GUESTS).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert_eq!(stored[0], expected);
    assert_eq!(stored[1]["id"], id.as_str());
    assert_eq!(stored[1]["status"], "Cancelled");

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[test]
fn given_unreadable_stored_element_when_updating_its_id_then_not_found() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    let payload = format!("[{}]", SERVER_COPY_WITH_NUMERIC_GUESTS);
    store
        .backend()
        .set_item(RESERVATIONS_STORAGE_KEY, &payload)
        .unwrap();

    assert!(!store.cancel("srv-1").unwrap());
    assert_eq!(
        store.backend().get_item(RESERVATIONS_STORAGE_KEY).unwrap(),
        Some(payload)
    );
}

#[test]
fn given_failing_reads_when_updating_or_cancelling_then_read_error_surfaces() {
    let storage = Arc::new(MemoryStorage::new());
    let store = LocalReservationStore::new(storage.clone());
    let id = store.create(&dinner_request(), &test_context()).into_inner().id;
    storage.set_fail_reads(true);

    let update = ReservationUpdate {
        guests_number: Some("2".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        store.update(&id, &update),
        Err(StoreError::ReadError { .. })
    ));
    assert!(matches!(
        store.cancel(&id),
        Err(StoreError::ReadError { .. })
    ));
    assert!(store.list().is_empty());

    storage.set_fail_reads(false);
    assert_eq!(store.get(&id).unwrap().status, ReservationStatus::Reserved);
}

#[test]
fn given_failing_reads_when_creating_then_record_returned_and_storage_untouched() {
    let storage = Arc::new(MemoryStorage::new());
    let store = LocalReservationStore::new(storage.clone());
    let existing = store.create(&dinner_request(), &test_context()).into_inner();
    storage.set_fail_reads(true);

    let created = store.create(&dinner_request(), &test_context());
    assert!(matches!(
        created.write_error,
        Some(StoreError::ReadError { .. })
    ));
    assert!(created.record.id.starts_with("local_"));

    storage.set_fail_reads(false);
    assert_eq!(store.list(), vec![existing]);
}

#[test]
fn given_corrupt_storage_when_updating_or_cancelling_then_corrupt_error_surfaces() {
    let store = LocalReservationStore::new(MemoryStorage::new());
    store
        .backend()
        .set_item(RESERVATIONS_STORAGE_KEY, "{not json at all")
        .unwrap();

    let update = ReservationUpdate {
        date: Some("2025-01-02".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        store.update("local_1_aaaaaaaaa", &update),
        Err(StoreError::Corrupt { .. })
    ));
    assert!(matches!(
        store.cancel("local_1_aaaaaaaaa"),
        Err(StoreError::Corrupt { .. })
    ));
}
