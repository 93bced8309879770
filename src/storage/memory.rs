use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::collections::{Collection, CollectionId, ShareToken};
use crate::listings::{Listing, ListingId};

use super::{CollectionStore, ListingStore, StoreError};

#[derive(Default, Clone)]
pub struct InMemoryListingStore {
    records: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl ListingStore for InMemoryListingStore {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&listing.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&listing.id) {
            guard.insert(listing.id.clone(), listing);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn all(&self) -> Result<Vec<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryCollectionStore {
    records: Arc<Mutex<HashMap<CollectionId, Collection>>>,
}

impl CollectionStore for InMemoryCollectionStore {
    fn insert(&self, collection: Collection) -> Result<Collection, StoreError> {
        let mut guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        if guard.contains_key(&collection.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(collection.id.clone(), collection.clone());
        Ok(collection)
    }

    fn update(&self, collection: Collection) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        if guard.contains_key(&collection.id) {
            guard.insert(collection.id.clone(), collection);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &CollectionId) -> Result<Option<Collection>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_token(&self, token: &ShareToken) -> Result<Option<Collection>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        Ok(guard
            .values()
            .find(|collection| &collection.share_token == token)
            .cloned())
    }

    fn remove(&self, id: &CollectionId) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn all(&self) -> Result<Vec<Collection>, StoreError> {
        let guard = self
            .records
            .lock()
            .expect("collection store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}
