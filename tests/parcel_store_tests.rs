use anyhow::Result;
use parcel_tracker::{Parcel, ParcelStatus, ParcelStore, StoreConfig, TrackerError};
use rand::Rng;
use std::collections::HashMap;
use tempfile::TempDir;

// Helper function to open a store on a temporary database file
fn create_temp_store() -> Result<(ParcelStore, TempDir)> {
    parcel_tracker::logging::init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tracker.db");
    let store = ParcelStore::open(&StoreConfig::new(path.to_string_lossy()))?;
    Ok((store, dir))
}

fn test_parcel() -> Parcel {
    Parcel::new(1000, "test").with_status(ParcelStatus::Registered)
}

fn random_client() -> i64 {
    rand::thread_rng().gen_range(0..10_000_000)
}

#[tokio::test]
async fn test_add_get_delete() {
    test_add_get_delete_impl().unwrap();
}

fn test_add_get_delete_impl() -> Result<()> {
    let (store, _dir) = create_temp_store()?;
    let parcel = test_parcel();

    // add
    let number = store.add(&parcel)?;
    assert_ne!(number, 0);

    // get
    let stored = store.get(number)?;
    assert_eq!(stored.number, number);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.status, parcel.status);
    assert_eq!(stored.created_at, parcel.created_at);

    // delete
    store.delete(number)?;
    let err = store.get(number).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(n) if n == number));

    Ok(())
}

#[tokio::test]
async fn test_set_address() {
    test_set_address_impl().unwrap();
}

fn test_set_address_impl() -> Result<()> {
    let (store, _dir) = create_temp_store()?;
    let parcel = test_parcel();
    let number = store.add(&parcel)?;
    assert_ne!(number, 0);

    let new_address = "new test address";
    store.set_address(number, new_address)?;

    let stored = store.get(number)?;
    assert_eq!(stored.number, number);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, new_address);
    assert_eq!(stored.status, parcel.status);
    assert_eq!(stored.created_at, parcel.created_at);

    Ok(())
}

#[tokio::test]
async fn test_set_status() {
    test_set_status_impl().unwrap();
}

fn test_set_status_impl() -> Result<()> {
    let (store, _dir) = create_temp_store()?;
    let parcel = test_parcel();
    let number = store.add(&parcel)?;
    assert_ne!(number, 0);

    let new_status = ParcelStatus::Sent;
    store.set_status(number, new_status)?;

    let stored = store.get(number)?;
    assert_eq!(stored.number, number);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.status, new_status);
    assert_eq!(stored.created_at, parcel.created_at);

    Ok(())
}

#[tokio::test]
async fn test_status_may_move_backwards() {
    test_status_may_move_backwards_impl().unwrap();
}

// The store itself does not enforce the lifecycle order
fn test_status_may_move_backwards_impl() -> Result<()> {
    let (store, _dir) = create_temp_store()?;
    let number = store.add(&test_parcel().with_status(ParcelStatus::Delivered))?;

    store.set_status(number, ParcelStatus::Registered)?;
    assert_eq!(store.get(number)?.status, ParcelStatus::Registered);

    Ok(())
}

#[tokio::test]
async fn test_get_by_client() {
    test_get_by_client_impl().unwrap();
}

fn test_get_by_client_impl() -> Result<()> {
    let (store, _dir) = create_temp_store()?;
    let client = random_client();

    let mut parcels = vec![test_parcel(), test_parcel(), test_parcel()];
    let mut added: HashMap<i64, Parcel> = HashMap::new();
    // one parcel for somebody else, must not show up
    store.add(&Parcel::new(client + 1, "elsewhere"))?;

    for parcel in parcels.iter_mut() {
        parcel.client = client;
        let number = store.add(parcel)?;
        assert_ne!(number, 0);
        parcel.number = number;
        added.insert(number, parcel.clone());
    }

    let stored = store.get_by_client(client)?;
    assert_eq!(stored.len(), parcels.len());

    for parcel in stored {
        let expected = added
            .get(&parcel.number)
            .unwrap_or_else(|| panic!("unexpected parcel {}", parcel.number));
        assert_eq!(&parcel, expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_data_survives_reopen() {
    test_data_survives_reopen_impl().unwrap();
}

fn test_data_survives_reopen_impl() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::new(dir.path().join("tracker.db").to_string_lossy());
    let parcel = test_parcel();

    let number = ParcelStore::open(&config)?.add(&parcel)?;

    let reopened = ParcelStore::open(&config)?;
    let stored = reopened.get(number)?;
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.created_at, parcel.created_at);

    Ok(())
}

#[test]
fn test_parcel_serializes_status_as_text() {
    let mut parcel = test_parcel();
    parcel.number = 3;
    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(json["status"], "registered");
    assert_eq!(json["number"], 3);

    let back: Parcel = serde_json::from_value(json).unwrap();
    assert_eq!(back, parcel);
}
