//! Search, filter, and sort over the stored listings. The search box matches
//! a case-insensitive substring of the title or the address, mirroring the
//! catalog screen's behavior.

use serde::Deserialize;

use crate::listings::{DealType, Listing, PropertyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    MostViewed,
}

/// Query-string parameters accepted by the catalog endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub deal_type: Option<DealType>,
    #[serde(default)]
    pub min_price: Option<u64>,
    #[serde(default)]
    pub max_price: Option<u64>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

fn matches_search(listing: &Listing, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    listing.title.to_lowercase().contains(&needle)
        || listing.address.to_lowercase().contains(&needle)
}

pub fn filter(listings: Vec<Listing>, query: &CatalogQuery) -> Vec<Listing> {
    let mut matched: Vec<Listing> = listings
        .into_iter()
        .filter(|listing| {
            if let Some(search) = query.search.as_deref() {
                if !search.trim().is_empty() && !matches_search(listing, search.trim()) {
                    return false;
                }
            }
            if let Some(property_type) = query.property_type {
                if listing.property_type != property_type {
                    return false;
                }
            }
            if let Some(deal_type) = query.deal_type {
                if listing.deal_type != deal_type {
                    return false;
                }
            }
            if let Some(min_price) = query.min_price {
                if listing.price < min_price {
                    return false;
                }
            }
            if let Some(max_price) = query.max_price {
                if listing.price > max_price {
                    return false;
                }
            }
            true
        })
        .collect();

    match query.sort.unwrap_or_default() {
        SortKey::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceAsc => matched.sort_by_key(|listing| listing.price),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::MostViewed => matched.sort_by(|a, b| b.views.cmp(&a.views)),
    }

    matched
}
