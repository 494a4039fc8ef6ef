//! Parcel record and shipment status.

use crate::error::TrackerError;
use chrono::{SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    Registered,
    Sent,
    Delivered,
}

impl ParcelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelStatus::Registered => "registered",
            ParcelStatus::Sent => "sent",
            ParcelStatus::Delivered => "delivered",
        }
    }

    /// Following state in the shipment lifecycle, `None` once delivered
    pub fn next(&self) -> Option<ParcelStatus> {
        match self {
            ParcelStatus::Registered => Some(ParcelStatus::Sent),
            ParcelStatus::Sent => Some(ParcelStatus::Delivered),
            ParcelStatus::Delivered => None,
        }
    }
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(ParcelStatus::Registered),
            "sent" => Ok(ParcelStatus::Sent),
            "delivered" => Ok(ParcelStatus::Delivered),
            other => Err(TrackerError::InvalidStatus(other.to_string())),
        }
    }
}

impl ToSql for ParcelStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ParcelStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TrackerError| FromSqlError::Other(Box::new(e)))
    }
}

/// A shipment record. `number` is zero until the parcel has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    pub number: i64,
    pub client: i64,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC 3339 timestamp, fixed at creation
    pub created_at: String,
}

impl Parcel {
    /// A freshly registered parcel stamped with the current UTC time
    pub fn new(client: i64, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn with_status(mut self, status: ParcelStatus) -> Self {
        self.status = status;
        self
    }

    /// Map a `number, client, status, address, created_at` row
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            number: row.get(0)?,
            client: row.get(1)?,
            status: row.get(2)?,
            address: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}
