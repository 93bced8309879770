//! Demo data for local development: three listings and one curated
//! collection, loaded through the regular services so validation and share
//! links behave exactly as they do in production.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::collections::{CollectionDraft, CollectionService};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::listings::{ListingDraft, ListingService};
use crate::storage::{JsonFileStore, ListingStore};

#[derive(Args, Debug, Default)]
pub(crate) struct SeedArgs {
    /// Override the configured data file location
    #[arg(long)]
    pub(crate) data_file: Option<PathBuf>,
    /// Seed even if the data file already contains listings
    #[arg(long)]
    pub(crate) force: bool,
}

pub(crate) fn demo_listing_drafts() -> Vec<ListingDraft> {
    let drafts = serde_json::json!([
        {
            "title": "3-room apartment, 78 m2",
            "description": "Spacious apartment with a quality renovation in the city center. Large open-plan kitchen, two bedrooms, two bathrooms, panoramic windows.",
            "price": 12_500_000,
            "address": "45 Lenina St",
            "area": 78,
            "floor": 5,
            "total_floors": 9,
            "renovation": "euro",
            "property_type": "apartment",
            "deal_type": "sale",
            "photos": ["/apartment1.jpg", "/apartment2.jpg"],
            "coordinates": { "lat": 55.7558, "lng": 37.6173 }
        },
        {
            "title": "2-room apartment, 54 m2",
            "description": "Cozy apartment with a balcony overlooking the park. Built-in kitchen, fitted wardrobes, school and shops nearby.",
            "price": 8_700_000,
            "address": "12 Pushkina St",
            "area": 54,
            "floor": 3,
            "total_floors": 5,
            "renovation": "cosmetic",
            "property_type": "apartment",
            "deal_type": "sale",
            "photos": ["/apartment3.jpg"],
            "coordinates": { "lat": 55.7512, "lng": 37.6184 }
        },
        {
            "title": "House, 150 m2 on a 10-are plot",
            "description": "Country house with all utilities, a garage, and a banya. Well-kept plot with fruit trees, good year-round access road.",
            "price": 18_500_000,
            "address": "8 Lesnaya St, Sosnovy Bor",
            "area": 150,
            "floor": 2,
            "total_floors": 2,
            "renovation": "design",
            "property_type": "house",
            "deal_type": "sale",
            "photos": ["/house1.jpg", "/house2.jpg"],
            "coordinates": { "lat": 55.7603, "lng": 37.6201 }
        }
    ]);
    serde_json::from_value(drafts).expect("demo drafts are well formed")
}

pub(crate) fn demo_collection_draft(listing_ids: Vec<String>) -> CollectionDraft {
    serde_json::from_value(serde_json::json!({
        "title": "Apartments for the Ivanov family",
        "description": "Three-room apartments in the center with good infrastructure",
        "client_name": "Ivan Ivanov",
        "client_phone": "+7 (999) 765-43-21",
        "client_email": "ivanov@example.com",
        "listing_ids": listing_ids,
    }))
    .expect("demo collection draft is well formed")
}

pub(crate) fn run_seed(args: SeedArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }

    let store = Arc::new(JsonFileStore::open(config.storage.data_file.clone()));
    let existing = ListingStore::all(store.as_ref())?;
    if !existing.is_empty() && !args.force {
        println!(
            "{} already contains {} listings; pass --force to seed anyway",
            store.path().display(),
            existing.len()
        );
        return Ok(());
    }

    let agent = config.agent.card();
    let listings = ListingService::new(store.clone(), agent.clone());
    let collections = CollectionService::new(
        store.clone(),
        store.clone(),
        agent,
        config.sharing.public_base_url.clone(),
    );

    let mut seeded_ids = Vec::new();
    for draft in demo_listing_drafts() {
        let listing = listings.create(draft)?;
        println!("seeded listing {}: {}", listing.id, listing.title);
        seeded_ids.push(listing.id.0);
    }

    let collection = collections.create(demo_collection_draft(seeded_ids))?;
    println!(
        "seeded collection {}: {} ({})",
        collection.id,
        collection.title,
        collections.share_link(&collection)
    );

    Ok(())
}
