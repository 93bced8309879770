use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::catalog::{self, CatalogQuery};
use crate::forms::DraftRejected;
use crate::storage::{ListingStore, StoreError};

use super::{AgentCard, Listing, ListingDraft, ListingId};

// Millisecond-epoch ids, matching the format already embedded in shared
// landing links. Monotonic so two creates in the same millisecond never
// collide.
static LAST_EPOCH_ID: AtomicI64 = AtomicI64::new(0);

pub(crate) fn next_epoch_id() -> String {
    loop {
        let last = LAST_EPOCH_ID.load(Ordering::Relaxed);
        let candidate = Utc::now().timestamp_millis().max(last + 1);
        if LAST_EPOCH_ID
            .compare_exchange(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return candidate.to_string();
        }
    }
}

/// Service exposing the listing editor and catalog operations over a store.
pub struct ListingService<S> {
    store: Arc<S>,
    agent: AgentCard,
}

impl<S> ListingService<S>
where
    S: ListingStore + 'static,
{
    pub fn new(store: Arc<S>, agent: AgentCard) -> Self {
        Self { store, agent }
    }

    /// Validate a draft, stamp it with an id and the agent block, and insert.
    pub fn create(&self, draft: ListingDraft) -> Result<Listing, ListingServiceError> {
        draft.validate()?;
        let listing = draft.build(
            ListingId(next_epoch_id()),
            self.agent.clone(),
            Utc::now(),
        );
        let stored = self.store.insert(listing)?;
        Ok(stored)
    }

    /// Read-modify-write an existing listing from an edited draft.
    pub fn update(
        &self,
        id: &ListingId,
        draft: &ListingDraft,
    ) -> Result<Listing, ListingServiceError> {
        draft.validate()?;
        let mut listing = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        draft.apply_to(&mut listing);
        self.store.update(listing.clone())?;
        Ok(listing)
    }

    pub fn get(&self, id: &ListingId) -> Result<Listing, ListingServiceError> {
        let listing = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(listing)
    }

    /// Landing links may carry a slug after the id (`1730000000000-lenina-45`);
    /// only the prefix before the first hyphen identifies the listing.
    pub fn get_by_slug(&self, slug: &str) -> Result<Listing, ListingServiceError> {
        let id = slug.split('-').next().unwrap_or(slug);
        self.get(&ListingId(id.to_string()))
    }

    pub fn delete(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        self.store.remove(id)?;
        Ok(())
    }

    /// A client opened the landing page: bump the view counter and return the
    /// stored record for rendering.
    pub fn record_landing_view(&self, slug: &str) -> Result<Listing, ListingServiceError> {
        let mut listing = self.get_by_slug(slug)?;
        listing.views += 1;
        self.store.update(listing.clone())?;
        Ok(listing)
    }

    /// Catalog listing: search, filter, and sort the whole data set.
    pub fn list(&self, query: &CatalogQuery) -> Result<Vec<Listing>, ListingServiceError> {
        let listings = self.store.all()?;
        Ok(catalog::filter(listings, query))
    }

    pub fn agent(&self) -> &AgentCard {
        &self.agent
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Invalid(#[from] DraftRejected),
    #[error(transparent)]
    Store(#[from] StoreError),
}
