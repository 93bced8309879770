pub mod form;
pub mod router;
pub mod service;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use form::ListingDraft;
pub use service::{ListingService, ListingServiceError};

/// Identifier wrapper for property listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
    Land,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    Sale,
    Rent,
}

impl DealType {
    pub const fn label(self) -> &'static str {
        match self {
            DealType::Sale => "sale",
            DealType::Rent => "rent",
        }
    }
}

/// Renovation grades offered by the listing editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Renovation {
    Cosmetic,
    Euro,
    Design,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Broker contact block denormalized onto listings and collections for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

/// A single property record with descriptive and location data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub address: String,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renovation: Option<Renovation>,
    pub property_type: PropertyType,
    pub deal_type: DealType,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    pub agent: AgentCard,
}

impl Listing {
    pub fn card_view(&self) -> ListingCardView {
        ListingCardView {
            id: self.id.clone(),
            title: self.title.clone(),
            address: self.address.clone(),
            price: self.price,
            area: self.area,
            deal_type: self.deal_type,
            property_type: self.property_type,
            photo: self.photos.first().cloned(),
            views: self.views,
            created_at: self.created_at,
        }
    }
}

/// Compact listing representation for catalog grids and dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCardView {
    pub id: ListingId,
    pub title: String,
    pub address: String,
    pub price: u64,
    pub area: f64,
    pub deal_type: DealType,
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}
