use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::collections::{Collection, CollectionId, ShareToken};
use crate::listings::{Listing, ListingId};

use super::{CollectionStore, ListingStore, StoreError};

/// The serialized data set: both arrays live in one document and every
/// mutation rewrites the whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    listings: Vec<Listing>,
    #[serde(default)]
    collections: Vec<Collection>,
}

/// JSON-file backend. A missing file reads as an empty data set, so the
/// first write creates it.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Snapshot, StoreError> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Snapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().expect("file store mutex poisoned");
        let mut snapshot = self.load()?;
        let value = apply(&mut snapshot)?;
        self.save(&snapshot)?;
        Ok(value)
    }
}

impl ListingStore for JsonFileStore {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError> {
        self.mutate(|snapshot| {
            if snapshot.listings.iter().any(|entry| entry.id == listing.id) {
                return Err(StoreError::Conflict);
            }
            snapshot.listings.push(listing.clone());
            Ok(listing)
        })
    }

    fn update(&self, listing: Listing) -> Result<(), StoreError> {
        self.mutate(|snapshot| {
            match snapshot
                .listings
                .iter_mut()
                .find(|entry| entry.id == listing.id)
            {
                Some(entry) => {
                    *entry = listing;
                    Ok(())
                }
                None => Err(StoreError::NotFound),
            }
        })
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        let snapshot = self.load()?;
        Ok(snapshot
            .listings
            .into_iter()
            .find(|entry| &entry.id == id))
    }

    fn remove(&self, id: &ListingId) -> Result<(), StoreError> {
        self.mutate(|snapshot| {
            let before = snapshot.listings.len();
            snapshot.listings.retain(|entry| &entry.id != id);
            if snapshot.listings.len() == before {
                Err(StoreError::NotFound)
            } else {
                Ok(())
            }
        })
    }

    fn all(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(self.load()?.listings)
    }
}

impl CollectionStore for JsonFileStore {
    fn insert(&self, collection: Collection) -> Result<Collection, StoreError> {
        self.mutate(|snapshot| {
            if snapshot
                .collections
                .iter()
                .any(|entry| entry.id == collection.id)
            {
                return Err(StoreError::Conflict);
            }
            snapshot.collections.push(collection.clone());
            Ok(collection)
        })
    }

    fn update(&self, collection: Collection) -> Result<(), StoreError> {
        self.mutate(|snapshot| {
            match snapshot
                .collections
                .iter_mut()
                .find(|entry| entry.id == collection.id)
            {
                Some(entry) => {
                    *entry = collection;
                    Ok(())
                }
                None => Err(StoreError::NotFound),
            }
        })
    }

    fn fetch(&self, id: &CollectionId) -> Result<Option<Collection>, StoreError> {
        let snapshot = self.load()?;
        Ok(snapshot
            .collections
            .into_iter()
            .find(|entry| &entry.id == id))
    }

    fn fetch_by_token(&self, token: &ShareToken) -> Result<Option<Collection>, StoreError> {
        let snapshot = self.load()?;
        Ok(snapshot
            .collections
            .into_iter()
            .find(|entry| &entry.share_token == token))
    }

    fn remove(&self, id: &CollectionId) -> Result<(), StoreError> {
        self.mutate(|snapshot| {
            let before = snapshot.collections.len();
            snapshot.collections.retain(|entry| &entry.id != id);
            if snapshot.collections.len() == before {
                Err(StoreError::NotFound)
            } else {
                Ok(())
            }
        })
    }

    fn all(&self) -> Result<Vec<Collection>, StoreError> {
        Ok(self.load()?.collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::{AgentCard, DealType, PropertyType};
    use chrono::Utc;
    use tempfile::tempdir;

    fn listing(id: &str, title: &str) -> Listing {
        Listing {
            id: ListingId(id.to_string()),
            title: title.to_string(),
            description: "Spacious apartment in the city center".to_string(),
            price: 12_500_000,
            address: "45 Lenina St".to_string(),
            area: 78.0,
            floor: Some(5),
            total_floors: Some(9),
            renovation: None,
            property_type: PropertyType::Apartment,
            deal_type: DealType::Sale,
            photos: vec!["/apartment1.jpg".to_string()],
            coordinates: None,
            created_at: Utc::now(),
            views: 0,
            agent: AgentCard {
                name: "Ivan Petrov".to_string(),
                phone: "+7 (999) 123-45-67".to_string(),
                telegram: None,
                photo: None,
                experience: None,
            },
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("data.json"));
        assert!(ListingStore::all(&store).expect("empty read").is_empty());
    }

    #[test]
    fn mutations_survive_reopening_the_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/realtor-pro.json");

        let store = JsonFileStore::open(&path);
        ListingStore::insert(&store, listing("1", "3-room apartment, 78 m2")).expect("insert");
        let mut updated = listing("1", "3-room apartment, 78 m2 (renovated)");
        updated.views = 245;
        ListingStore::update(&store, updated).expect("update");

        let reopened = JsonFileStore::open(&path);
        let records = ListingStore::all(&reopened).expect("reload");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "3-room apartment, 78 m2 (renovated)");
        assert_eq!(records[0].views, 245);
    }

    #[test]
    fn remove_rewrites_the_array_without_the_record() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("data.json"));
        ListingStore::insert(&store, listing("1", "First")).expect("insert 1");
        ListingStore::insert(&store, listing("2", "Second")).expect("insert 2");

        ListingStore::remove(&store, &ListingId("1".to_string())).expect("remove");
        let rest = ListingStore::all(&store).expect("read");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, ListingId("2".to_string()));

        let err = ListingStore::remove(&store, &ListingId("1".to_string()))
            .expect_err("second remove fails");
        assert!(matches!(err, StoreError::NotFound));
    }
}
