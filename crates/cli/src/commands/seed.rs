//! Seed the catalog database with demo items.
//!
//! Inserts a small set of writing and drawing supplies through the catalog
//! store, so a fresh install has something for the shop page to show.

use secrecy::SecretString;
use tracing::info;

use sahara_catalog::db::{self, ItemStore, PgItemStore};
use sahara_catalog::models::ItemDraft;

/// Demo items: (name, price, quantity, color, category, tags).
const DEMO_ITEMS: &[(&str, f64, i32, &str, &str, &[&str])] = &[
    ("Fountain Pen", 24.5, 12, "blue", "writing", &["ink", "refillable"]),
    ("Ballpoint Pen", 2.0, 140, "black", "writing", &["ink"]),
    ("Pencil Set", 6.75, 60, "yellow", "writing", &["graphite"]),
    ("Sketchbook A5", 9.9, 35, "white", "drawing", &["paper"]),
    ("Charcoal Sticks", 7.25, 0, "black", "drawing", &["charcoal"]),
    ("Watercolor Set", 18.0, 8, "assorted", "drawing", &["paint", "brush"]),
];

/// Insert the demo items into the catalog database.
///
/// # Errors
///
/// Returns an error if `CATALOG_DATABASE_URL` is missing or a database
/// operation fails.
pub async fn catalog_items() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CATALOG_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "CATALOG_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store = PgItemStore::new(pool);

    for &(name, price, quantity, color, category, tags) in DEMO_ITEMS {
        let item = store
            .insert(ItemDraft {
                name: Some(name.to_owned()),
                price: Some(price),
                quantity: Some(quantity),
                image_url: None,
                color: Some(color.to_owned()),
                category: Some(category.to_owned()),
                tags: Some(tags.iter().map(|&t| t.to_owned()).collect()),
                stock_available: Some(quantity > 0),
            })
            .await?;
        info!(id = %item.id, name, "Seeded item");
    }

    info!("Seeding complete! {} items inserted", DEMO_ITEMS.len());
    Ok(())
}
