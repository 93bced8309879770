use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::forms::{self, DraftRejected, FieldIssue};
use crate::listings::{AgentCard, ListingId};

use super::{ClientContact, Collection, CollectionId, ShareToken};

/// Builder payload for creating or updating a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default, deserialize_with = "forms::optional_date")]
    pub expires_at: Option<NaiveDate>,
    #[serde(default)]
    pub listing_ids: Vec<ListingId>,
}

fn looks_like_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

impl CollectionDraft {
    pub fn validate(&self) -> Result<(), DraftRejected> {
        let mut issues = Vec::new();

        if self.title.trim().chars().count() < 5 {
            issues.push(FieldIssue::new(
                "title",
                "must be at least 5 characters",
            ));
        }
        if self.description.trim().chars().count() < 10 {
            issues.push(FieldIssue::new(
                "description",
                "must be at least 10 characters",
            ));
        }
        if self.client_name.trim().chars().count() < 2 {
            issues.push(FieldIssue::new("client_name", "client name is required"));
        }
        if let Some(email) = self.client_email.as_deref() {
            if !email.trim().is_empty() && !looks_like_email(email.trim()) {
                issues.push(FieldIssue::new("client_email", "enter a valid email"));
            }
        }
        if self.listing_ids.is_empty() {
            issues.push(FieldIssue::new(
                "listing_ids",
                "add at least one listing to the collection",
            ));
        }

        match DraftRejected::from_issues(issues) {
            Some(rejected) => Err(rejected),
            None => Ok(()),
        }
    }

    /// Materialize a new collection. Callers validate first.
    pub fn build(
        self,
        id: CollectionId,
        share_token: ShareToken,
        agent: AgentCard,
        created_at: DateTime<Utc>,
    ) -> Collection {
        Collection {
            id,
            title: self.title,
            description: self.description,
            client: ClientContact {
                name: self.client_name,
                phone: none_if_blank(self.client_phone),
                email: none_if_blank(self.client_email),
            },
            expires_at: self.expires_at,
            listing_ids: self.listing_ids,
            share_token,
            created_at,
            last_viewed: None,
            view_count: 0,
            agent,
        }
    }

    /// Overwrite the editable fields; token, creation time, and view
    /// metadata survive the edit.
    pub fn apply_to(&self, collection: &mut Collection) {
        collection.title = self.title.clone();
        collection.description = self.description.clone();
        collection.client = ClientContact {
            name: self.client_name.clone(),
            phone: none_if_blank(self.client_phone.clone()),
            email: none_if_blank(self.client_email.clone()),
        };
        collection.expires_at = self.expires_at;
        collection.listing_ids = self.listing_ids.clone();
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
