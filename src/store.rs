//! Data access for the `parcel` table.

use crate::config::StoreConfig;
use crate::error::{Result, TrackerError};
use crate::parcel::{Parcel, ParcelStatus};
use rusqlite::{named_params, Connection, OptionalExtension};

const SELECT_COLUMNS: &str = "SELECT number, client, status, address, created_at FROM parcel";

/// CRUD access to stored parcels. Every operation is a single statement.
pub struct ParcelStore {
    conn: Connection,
}

impl ParcelStore {
    /// Wrap a connection whose schema is already in place
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(config.open()?))
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a parcel and return its generated number. `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at) \
             VALUES (:client, :status, :address, :created_at)",
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status,
                ":address": parcel.address,
                ":created_at": parcel.created_at,
            },
        )?;
        let number = self.conn.last_insert_rowid();
        tracing::debug!(number, client = parcel.client, "parcel added");
        Ok(number)
    }

    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE number = :number"),
                named_params! { ":number": number },
                Parcel::from_row,
            )
            .optional()?
            .ok_or(TrackerError::NotFound(number))
    }

    /// All parcels of one client, in no particular order
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE client = :client"))?;
        let parcels = stmt
            .query_map(named_params! { ":client": client }, Parcel::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(client, count = parcels.len(), "parcels loaded for client");
        Ok(parcels)
    }

    pub fn set_status(&self, number: i64, status: ParcelStatus) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number",
            named_params! { ":status": status, ":number": number },
        )?;
        if changed == 0 {
            return Err(TrackerError::NotFound(number));
        }
        tracing::debug!(number, %status, "parcel status updated");
        Ok(())
    }

    pub fn set_address(&self, number: i64, address: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE parcel SET address = :address WHERE number = :number",
            named_params! { ":address": address, ":number": number },
        )?;
        if changed == 0 {
            return Err(TrackerError::NotFound(number));
        }
        tracing::debug!(number, "parcel address updated");
        Ok(())
    }

    /// Hard delete. Removing a number that does not exist is not an error.
    pub fn delete(&self, number: i64) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM parcel WHERE number = :number",
            named_params! { ":number": number },
        )?;
        tracing::debug!(number, removed, "parcel deleted");
        Ok(())
    }
}
