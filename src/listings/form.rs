use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::forms::{self, DraftRejected, FieldIssue};

use super::{AgentCard, Coordinates, DealType, Listing, ListingId, PropertyType, Renovation};

fn default_property_type() -> PropertyType {
    PropertyType::Apartment
}

fn default_deal_type() -> DealType {
    DealType::Sale
}

/// Editor payload for creating or updating a listing. Numeric fields accept
/// either numbers or the text the form submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "forms::flexible_u64")]
    pub price: Option<u64>,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "forms::flexible_f64")]
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "forms::flexible_u16")]
    pub floor: Option<u16>,
    #[serde(default, deserialize_with = "forms::flexible_u16")]
    pub total_floors: Option<u16>,
    #[serde(default)]
    pub renovation: Option<Renovation>,
    #[serde(default = "default_property_type")]
    pub property_type: PropertyType,
    #[serde(default = "default_deal_type")]
    pub deal_type: DealType,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl ListingDraft {
    pub fn validate(&self) -> Result<(), DraftRejected> {
        let mut issues = Vec::new();

        if self.title.trim().chars().count() < 5 {
            issues.push(FieldIssue::new(
                "title",
                "must be at least 5 characters",
            ));
        }
        if self.description.trim().chars().count() < 20 {
            issues.push(FieldIssue::new(
                "description",
                "must be at least 20 characters",
            ));
        }
        match self.price {
            None | Some(0) => issues.push(FieldIssue::new("price", "price is required")),
            Some(_) => {}
        }
        if self.address.trim().chars().count() < 5 {
            issues.push(FieldIssue::new("address", "address is required"));
        }
        match self.area {
            Some(area) if area > 0.0 => {}
            _ => issues.push(FieldIssue::new("area", "area is required")),
        }

        match DraftRejected::from_issues(issues) {
            Some(rejected) => Err(rejected),
            None => Ok(()),
        }
    }

    /// Materialize a new listing. Callers validate first.
    pub fn build(self, id: ListingId, agent: AgentCard, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            title: self.title,
            description: self.description,
            price: self.price.unwrap_or(0),
            address: self.address,
            area: self.area.unwrap_or(0.0),
            floor: self.floor,
            total_floors: self.total_floors,
            renovation: self.renovation,
            property_type: self.property_type,
            deal_type: self.deal_type,
            photos: self.photos,
            coordinates: self.coordinates,
            created_at,
            views: 0,
            agent,
        }
    }

    /// Overwrite the editable fields of an existing listing; id, creation
    /// time, view counter, and agent block survive the edit.
    pub fn apply_to(&self, listing: &mut Listing) {
        listing.title = self.title.clone();
        listing.description = self.description.clone();
        listing.price = self.price.unwrap_or(0);
        listing.address = self.address.clone();
        listing.area = self.area.unwrap_or(0.0);
        listing.floor = self.floor;
        listing.total_floors = self.total_floors;
        listing.renovation = self.renovation;
        listing.property_type = self.property_type;
        listing.deal_type = self.deal_type;
        listing.photos = self.photos.clone();
        listing.coordinates = self.coordinates;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn valid_draft() -> ListingDraft {
        serde_json::from_value(serde_json::json!({
            "title": "3-room apartment, 78 m2",
            "description": "Spacious apartment with a fresh renovation in the city center",
            "price": "12500000",
            "address": "45 Lenina St",
            "area": "78",
            "floor": "5",
            "total_floors": "9",
            "renovation": "euro",
            "property_type": "apartment",
            "deal_type": "sale"
        }))
        .expect("valid draft deserializes")
    }

    #[test]
    fn accepts_a_complete_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn rejects_short_title_and_description() {
        let mut draft = valid_draft();
        draft.title = "Flat".to_string();
        draft.description = "Nice place".to_string();
        let rejected = draft.validate().expect_err("short fields rejected");
        let fields: Vec<_> = rejected.issues.iter().map(|issue| issue.field).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn rejects_missing_price_and_area() {
        let mut draft = valid_draft();
        draft.price = None;
        draft.area = None;
        let rejected = draft.validate().expect_err("missing numbers rejected");
        assert!(rejected.issues.iter().any(|issue| issue.field == "price"));
        assert!(rejected.issues.iter().any(|issue| issue.field == "area"));
    }

    #[test]
    fn zero_price_counts_as_missing() {
        let mut draft = valid_draft();
        draft.price = Some(0);
        let rejected = draft.validate().expect_err("zero price rejected");
        assert!(rejected.issues.iter().any(|issue| issue.field == "price"));
    }

    #[test]
    fn build_attaches_agent_and_starts_with_zero_views() {
        let agent = AgentCard {
            name: "Ivan Petrov".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            telegram: Some("@ivanpetrov".to_string()),
            photo: None,
            experience: None,
        };
        let listing = valid_draft().build(
            ListingId("1730000000000".to_string()),
            agent.clone(),
            Utc::now(),
        );
        assert_eq!(listing.views, 0);
        assert_eq!(listing.agent, agent);
        assert_eq!(listing.price, 12_500_000);
    }

    #[test]
    fn apply_preserves_views_and_creation_time() {
        let agent = AgentCard {
            name: "Ivan Petrov".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            telegram: None,
            photo: None,
            experience: None,
        };
        let created_at = Utc::now();
        let mut listing = valid_draft().build(ListingId("1".to_string()), agent, created_at);
        listing.views = 245;

        let mut edit = valid_draft();
        edit.title = "2-room apartment, 54 m2".to_string();
        edit.price = Some(8_700_000);
        edit.apply_to(&mut listing);

        assert_eq!(listing.title, "2-room apartment, 54 m2");
        assert_eq!(listing.price, 8_700_000);
        assert_eq!(listing.views, 245);
        assert_eq!(listing.created_at, created_at);
    }
}
