//! Shipment rules layered over [`ParcelStore`].

use crate::error::{Result, TrackerError};
use crate::parcel::{Parcel, ParcelStatus};
use crate::store::ParcelStore;
use tracing::{info, warn};

pub struct ParcelService {
    store: ParcelStore,
}

impl ParcelService {
    pub fn new(store: ParcelStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ParcelStore {
        &self.store
    }

    /// Register a new parcel for `client` and return it with its assigned number
    pub fn register(&self, client: i64, address: &str) -> Result<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.store.add(&parcel)?;
        info!(
            number = parcel.number,
            client,
            address,
            created_at = %parcel.created_at,
            "parcel registered"
        );
        Ok(parcel)
    }

    pub fn client_parcels(&self, client: i64) -> Result<Vec<Parcel>> {
        let parcels = self.store.get_by_client(client)?;
        for parcel in &parcels {
            info!(
                number = parcel.number,
                client,
                address = %parcel.address,
                status = %parcel.status,
                created_at = %parcel.created_at,
                "client parcel"
            );
        }
        Ok(parcels)
    }

    /// Move the parcel one step along its lifecycle. Returns `None` if it was already delivered.
    pub fn next_status(&self, number: i64) -> Result<Option<ParcelStatus>> {
        let parcel = self.store.get(number)?;
        let Some(next) = parcel.status.next() else {
            info!(number, "parcel already delivered");
            return Ok(None);
        };
        self.store.set_status(number, next)?;
        info!(number, from = %parcel.status, to = %next, "parcel status changed");
        Ok(Some(next))
    }

    pub fn change_address(&self, number: i64, address: &str) -> Result<()> {
        self.ensure_registered(number)?;
        self.store.set_address(number, address)?;
        info!(number, address, "parcel address changed");
        Ok(())
    }

    pub fn delete(&self, number: i64) -> Result<()> {
        self.ensure_registered(number)?;
        self.store.delete(number)?;
        info!(number, "parcel deleted");
        Ok(())
    }

    fn ensure_registered(&self, number: i64) -> Result<()> {
        let parcel = self.store.get(number)?;
        if parcel.status != ParcelStatus::Registered {
            warn!(number, status = %parcel.status, "parcel is no longer registered");
            return Err(TrackerError::StatusLocked {
                number,
                status: parcel.status,
            });
        }
        Ok(())
    }
}
