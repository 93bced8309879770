//! Dashboard summary derived from the stored data set.

use serde::Serialize;

use crate::collections::Collection;
use crate::listings::{Listing, ListingCardView};

const TOP_LISTINGS: usize = 3;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_listings: usize,
    pub total_collections: usize,
    pub total_listing_views: u64,
    pub total_collection_views: u64,
    pub top_listings: Vec<ListingCardView>,
}

pub fn summarize(listings: &[Listing], collections: &[Collection]) -> DashboardSummary {
    let mut ranked: Vec<&Listing> = listings.iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));

    DashboardSummary {
        total_listings: listings.len(),
        total_collections: collections.len(),
        total_listing_views: listings.iter().map(|listing| listing.views).sum(),
        total_collection_views: collections
            .iter()
            .map(|collection| collection.view_count)
            .sum(),
        top_listings: ranked
            .into_iter()
            .take(TOP_LISTINGS)
            .map(|listing| listing.card_view())
            .collect(),
    }
}
