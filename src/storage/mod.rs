//! Persistence for the brokerage data set. The traits keep the services
//! testable against [`memory`] while [`file`] provides the production
//! backend: a single JSON document rewritten wholesale on every mutation,
//! last write wins.

pub mod file;
pub mod memory;

use crate::collections::{Collection, CollectionId, ShareToken};
use crate::listings::{Listing, ListingId};

pub use file::JsonFileStore;
pub use memory::{InMemoryCollectionStore, InMemoryListingStore};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage abstraction for property listings, keyed by id.
pub trait ListingStore: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError>;
    fn update(&self, listing: Listing) -> Result<(), StoreError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError>;
    fn remove(&self, id: &ListingId) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<Listing>, StoreError>;
}

/// Storage abstraction for client collections, keyed by id with a secondary
/// lookup by share token for the public landing route.
pub trait CollectionStore: Send + Sync {
    fn insert(&self, collection: Collection) -> Result<Collection, StoreError>;
    fn update(&self, collection: Collection) -> Result<(), StoreError>;
    fn fetch(&self, id: &CollectionId) -> Result<Option<Collection>, StoreError>;
    fn fetch_by_token(&self, token: &ShareToken) -> Result<Option<Collection>, StoreError>;
    fn remove(&self, id: &CollectionId) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<Collection>, StoreError>;
}
