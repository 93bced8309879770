use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::forms::DraftRejected;
use crate::landing::CollectionLandingView;
use crate::listings::{AgentCard, Listing, ListingId};
use crate::storage::{CollectionStore, ListingStore, StoreError};

use super::{
    Collection, CollectionDraft, CollectionId, CollectionSummaryView, ShareToken,
};

/// Service composing the collection builder, the share-link generator, and
/// the client landing flow over both stores.
pub struct CollectionService<C, L> {
    collections: Arc<C>,
    listings: Arc<L>,
    agent: AgentCard,
    public_base_url: String,
}

impl<C, L> CollectionService<C, L>
where
    C: CollectionStore + 'static,
    L: ListingStore + 'static,
{
    pub fn new(
        collections: Arc<C>,
        listings: Arc<L>,
        agent: AgentCard,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            collections,
            listings,
            agent,
            public_base_url: public_base_url.into(),
        }
    }

    fn verify_listing_ids(&self, ids: &[ListingId]) -> Result<(), CollectionServiceError> {
        for id in ids {
            if self.listings.fetch(id)?.is_none() {
                return Err(CollectionServiceError::UnknownListing(id.clone()));
            }
        }
        Ok(())
    }

    /// Validate a draft, verify every selected listing exists, and insert the
    /// collection with a fresh share token.
    pub fn create(&self, draft: CollectionDraft) -> Result<Collection, CollectionServiceError> {
        draft.validate()?;
        self.verify_listing_ids(&draft.listing_ids)?;
        let collection = draft.build(
            CollectionId(crate::listings::service::next_epoch_id()),
            ShareToken::generate(),
            self.agent.clone(),
            Utc::now(),
        );
        let stored = self.collections.insert(collection)?;
        Ok(stored)
    }

    /// Read-modify-write an existing collection from an edited draft; the
    /// share token and view metadata survive the edit.
    pub fn update(
        &self,
        id: &CollectionId,
        draft: &CollectionDraft,
    ) -> Result<Collection, CollectionServiceError> {
        draft.validate()?;
        self.verify_listing_ids(&draft.listing_ids)?;
        let mut collection = self.collections.fetch(id)?.ok_or(StoreError::NotFound)?;
        draft.apply_to(&mut collection);
        self.collections.update(collection.clone())?;
        Ok(collection)
    }

    pub fn get(&self, id: &CollectionId) -> Result<Collection, CollectionServiceError> {
        let collection = self.collections.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(collection)
    }

    pub fn delete(&self, id: &CollectionId) -> Result<(), CollectionServiceError> {
        self.collections.remove(id)?;
        Ok(())
    }

    /// All collections, newest first.
    pub fn list(&self) -> Result<Vec<Collection>, CollectionServiceError> {
        let mut collections = self.collections.all()?;
        collections.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(collections)
    }

    pub fn share_link(&self, collection: &Collection) -> String {
        format!(
            "{}/collection/{}",
            self.public_base_url.trim_end_matches('/'),
            collection.share_token
        )
    }

    /// Agent-facing rows with derived status and share links.
    pub fn summaries(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<CollectionSummaryView>, CollectionServiceError> {
        Ok(self
            .list()?
            .iter()
            .map(|collection| CollectionSummaryView {
                id: collection.id.clone(),
                title: collection.title.clone(),
                client_name: collection.client.name.clone(),
                listing_count: collection.listing_ids.len(),
                status: collection.status(today),
                view_count: collection.view_count,
                last_viewed: collection.last_viewed,
                expires_at: collection.expires_at,
                share_link: self.share_link(collection),
                created_at: collection.created_at,
            })
            .collect())
    }

    /// A client opened a share link: refuse expired collections, otherwise
    /// record the view and resolve the curated listings for rendering.
    pub fn landing(
        &self,
        token: &ShareToken,
        now: DateTime<Utc>,
    ) -> Result<CollectionLandingView, CollectionServiceError> {
        let mut collection = self
            .collections
            .fetch_by_token(token)?
            .ok_or(StoreError::NotFound)?;

        if collection.status(now.date_naive()) == super::CollectionStatus::Expired {
            return Err(CollectionServiceError::Expired);
        }

        collection.record_view(now);
        self.collections.update(collection.clone())?;

        let mut properties: Vec<Listing> = Vec::with_capacity(collection.listing_ids.len());
        for id in &collection.listing_ids {
            // Listings deleted since curation drop out of the landing page.
            if let Some(listing) = self.listings.fetch(id)? {
                properties.push(listing);
            }
        }

        Ok(CollectionLandingView::assemble(&collection, properties))
    }
}

/// Error raised by the collection service.
#[derive(Debug, thiserror::Error)]
pub enum CollectionServiceError {
    #[error(transparent)]
    Invalid(#[from] DraftRejected),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("listing '{0}' does not exist")]
    UnknownListing(ListingId),
    #[error("collection has expired")]
    Expired,
}
