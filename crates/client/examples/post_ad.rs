//! End-to-end demo: sign in, compose an ad, favorite it.
//!
//! Runs against the in-memory store. `RUST_LOG` controls verbosity.

use std::sync::Arc;

use mela_client::{AdComposer, FavoritesService, ListingsService, Session};
use mela_core::{AuthUser, Category};
use mela_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mela_client=debug,mela_store=debug,info".into()),
        )
        .init();

    let store = Arc::new(MemoryStore::new());
    let session = Session::new(store);
    session
        .sign_in(AuthUser::new("demo-user").with_display_name("Demo User"))
        .await;

    let listings = ListingsService::new(session.clone());
    let composer = AdComposer::new(session.clone(), listings.clone());

    // Step 1: category, Step 2: details.
    composer.select_category(Category::Mobiles).await?;
    composer.set_title("iPhone 12").await?;
    composer.set_price("25000").await?;
    composer.set_attribute("brand", "Apple").await?;
    composer.set_attribute("model", "12").await?;
    composer.set_attribute("condition", "Used").await?;
    composer.next().await?;

    // Step 3: media & description, then submit.
    composer
        .set_description("Great condition, barely used")
        .await?;
    composer.set_location("Mumbai").await?;
    composer.attach_image(demo_photo()).await?;
    let listing = composer.submit().await?;
    println!("posted \"{}\" for ₹{}", listing.title, listing.price);

    // Favorite it and watch the live snapshot arrive.
    let favorites = FavoritesService::new(session.clone());
    favorites.refresh_subscription().await?;
    let mut snapshots = favorites.watch_snapshot();
    favorites.toggle_favorite(&listing.id).await?;
    snapshots.changed().await?;
    println!("favorited: {}", favorites.is_favorite(&listing.id));

    let catalog = listings.all().await;
    for item in favorites.favorite_listings(&catalog) {
        println!("♥ {} — {} ({})", item.title, item.location, item.category.name());
    }

    favorites.shutdown().await;
    Ok(())
}

/// Synthesize a demo photo so the example needs no files on disk.
fn demo_photo() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        1024,
        768,
        image::Rgb([180, 120, 40]),
    ));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode demo image");
    buf.into_inner()
}
