//! Read models for the client-facing landing pages. A listing landing is the
//! stored record itself; a collection landing resolves its listing ids into
//! full records for rendering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::collections::{Collection, CollectionId};
use crate::listings::{AgentCard, Listing};

/// What a client sees when opening a shared collection link.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionLandingView {
    pub id: CollectionId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    pub agent: AgentCard,
    pub properties: Vec<Listing>,
}

impl CollectionLandingView {
    /// `properties` must already be resolved in the collection's curation
    /// order; ids whose listing has been deleted are simply absent.
    pub fn assemble(collection: &Collection, properties: Vec<Listing>) -> Self {
        Self {
            id: collection.id.clone(),
            title: collection.title.clone(),
            description: collection.description.clone(),
            created_at: collection.created_at,
            expires_at: collection.expires_at,
            agent: collection.agent.clone(),
            properties,
        }
    }
}
