//! Shared helpers for the client integration tests.
//!
//! Not every suite uses every helper; each `tests/*.rs` binary compiles
//! this module independently.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use mela_client::{AdComposer, Session};
use mela_core::{AuthUser, Category};
use mela_store::{CreateListing, MemoryStore};

/// Synthesize a PNG photo of the given dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([60, 120, 180]),
    ));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode test PNG");
    buf.into_inner()
}

/// A session over a fresh in-memory store, with nobody signed in.
pub fn anonymous_session() -> (Session, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Session::new(store.clone()), store)
}

/// A session over a fresh in-memory store, signed in as `uid-1` / "Asha".
pub async fn signed_in_session() -> (Session, Arc<MemoryStore>) {
    let (session, store) = anonymous_session();
    session
        .sign_in(AuthUser::new("uid-1").with_display_name("Asha"))
        .await;
    (session, store)
}

/// A valid `CreateListing` for seeding the store directly.
pub fn sample_ad(user_id: &str) -> CreateListing {
    CreateListing {
        title: "iPhone 12".to_string(),
        category: Category::Mobiles,
        price: 25000.0,
        description: "Great condition, barely used".to_string(),
        location: "Mumbai".to_string(),
        category_fields: BTreeMap::from([
            ("brand".to_string(), "Apple".to_string()),
            ("model".to_string(), "12".to_string()),
            ("condition".to_string(), "Used".to_string()),
        ]),
        image_url: "data:image/jpeg;base64,AAAA".to_string(),
        user_id: user_id.to_string(),
        user_name: "Asha".to_string(),
    }
}

/// Drive a fresh composer through a valid step 1 + step 2 for Mobiles,
/// leaving it at step 3.
pub async fn fill_mobiles_details(composer: &AdComposer) {
    composer
        .select_category(Category::Mobiles)
        .await
        .expect("select category");
    composer.set_title("iPhone 12").await.expect("title");
    composer.set_price("25000").await.expect("price");
    composer
        .set_attribute("brand", "Apple")
        .await
        .expect("brand");
    composer.set_attribute("model", "12").await.expect("model");
    composer
        .set_attribute("condition", "Used")
        .await
        .expect("condition");
    composer.next().await.expect("advance to step 3");
}

/// Fill a valid step 3 (description, location, photo).
pub async fn fill_media(composer: &AdComposer) {
    composer
        .set_description("Great condition, barely used")
        .await
        .expect("description");
    composer.set_location("Mumbai").await.expect("location");
    composer
        .attach_image(png_bytes(1600, 1200))
        .await
        .expect("attach image");
}
