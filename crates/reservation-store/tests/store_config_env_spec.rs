use reservation_store::config::DEFAULT_STORE_DIR;
use reservation_store::{MergePolicy, StoreConfig};
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_env() {
    std::env::remove_var("RESERVATION_STORE_DIR");
    std::env::remove_var("RESERVATION_MERGE_POLICY");
}

#[test]
#[serial]
fn given_no_env_when_loading_then_defaults_apply() {
    clear_env();
    let config = StoreConfig::from_env();
    assert_eq!(config.storage_dir, PathBuf::from(DEFAULT_STORE_DIR));
    assert_eq!(config.merge_policy, MergePolicy::PreferLocal);
}

#[test]
#[serial]
fn given_env_overrides_when_loading_then_store_opens_there() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("RESERVATION_STORE_DIR", temp_dir.path());
    std::env::set_var("RESERVATION_MERGE_POLICY", "prefer-remote");

    let config = StoreConfig::from_env();
    assert_eq!(config.storage_dir, temp_dir.path());
    assert_eq!(config.merge_policy, MergePolicy::PreferRemote);

    let store = config.open_store();
    assert_eq!(store.backend().root(), temp_dir.path());
    assert!(!store.has_reservations());

    clear_env();
}

#[test]
#[serial]
fn given_unknown_merge_policy_when_loading_then_default_kept() {
    clear_env();
    std::env::set_var("RESERVATION_MERGE_POLICY", "newest-wins");

    let config = StoreConfig::from_env();
    assert_eq!(config.merge_policy, MergePolicy::PreferLocal);

    clear_env();
}
