//! SQLite-backed parcel tracking.
//!
//! # Intention
//!
//! - Store shipment records (parcels) in a single `parcel` table.
//! - Expose CRUD access through [`ParcelStore`] and the shipment rules
//!   (status progression, edits only while registered) through [`ParcelService`].
//!
//! # Architectural Boundaries
//!
//! - One synchronous connection per store, one statement per operation.
//! - No migrations, pooling, retries or network-facing API.

pub mod config;
pub mod error;
pub mod logging;
pub mod parcel;
pub mod schema;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, TrackerError};
pub use parcel::{Parcel, ParcelStatus};
pub use schema::Schema;
pub use service::ParcelService;
pub use store::ParcelStore;
