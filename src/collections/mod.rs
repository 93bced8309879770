pub mod form;
pub mod router;
pub mod service;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::listings::{AgentCard, ListingId};

pub use form::CollectionDraft;
pub use service::{CollectionService, CollectionServiceError};

/// Identifier wrapper for curated collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub String);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque token embedded in the client-facing share link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareToken(pub String);

const TOKEN_LEN: usize = 8;
const TOKEN_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl ShareToken {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let token = (0..TOKEN_LEN)
            .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
            .collect();
        Self(token)
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact details of the client a collection was curated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Active,
    Expired,
}

impl CollectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionStatus::Active => "active",
            CollectionStatus::Expired => "expired",
        }
    }
}

/// A named, shareable bundle of listing references curated for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    pub description: String,
    pub client: ClientContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    pub listing_ids: Vec<ListingId>,
    pub share_token: ShareToken,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: u64,
    pub agent: AgentCard,
}

impl Collection {
    /// A collection stays active through its expiry date, inclusive.
    pub fn status(&self, today: NaiveDate) -> CollectionStatus {
        match self.expires_at {
            Some(expires_at) if today > expires_at => CollectionStatus::Expired,
            _ => CollectionStatus::Active,
        }
    }

    pub fn record_view(&mut self, now: DateTime<Utc>) {
        self.view_count += 1;
        self.last_viewed = Some(now);
    }
}

/// Agent-facing row for the collections list screen.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummaryView {
    pub id: CollectionId,
    pub title: String,
    pub client_name: String,
    pub listing_count: usize,
    pub status: CollectionStatus,
    pub view_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
    pub share_link: String,
    pub created_at: DateTime<Utc>,
}
