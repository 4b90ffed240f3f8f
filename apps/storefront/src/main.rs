//! # Weft Storefront Demo
//!
//! Drives one complete shopper session against the storefront engine:
//! browse a small catalog, shuffle items between the cart and the saved
//! list, fill the checkout form, authorize a simulated payment, and print
//! the resulting confirmation.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog ──► ShopStore (cart / saved) ──► CheckoutForm ──► place_order  │
//! │                                                                │        │
//! │                                                                ▼        │
//! │                                                      OrderConfirmation  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use weft_core::ProductVariant;
use weft_session::{
    CheckoutFlow, CityState, Geocoder, LogNotifier, SessionError, ShopStore, SimulatedProcessor,
};

/// Geocoder backed by a tiny in-process table, standing in for a real
/// lookup service.
struct DemoGeocoder;

#[async_trait::async_trait]
impl Geocoder for DemoGeocoder {
    async fn city_state(&self, zip: &str) -> Option<CityState> {
        match zip {
            "78701" => Some(CityState {
                city: "Austin".to_string(),
                state: "TX".to_string(),
            }),
            "10001" => Some(CityState {
                city: "New York".to_string(),
                state: "NY".to_string(),
            }),
            _ => None,
        }
    }
}

fn catalog() -> Result<Vec<ProductVariant>, weft_core::ValidationError> {
    Ok(vec![
        ProductVariant::new("Selvedge Tee", "M", "Indigo", "tee_indigo.png", 28.0)?,
        ProductVariant::new("Selvedge Tee", "L", "Natural", "tee_natural.png", 28.0)?,
        ProductVariant::new("Wool Beanie", "OS", "Charcoal", "beanie.png", 18.5)?,
        ProductVariant::new("Canvas Tote", "OS", "Olive", "tote.png", 14.999)?,
    ])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,weft=debug")),
        )
        .init();

    info!("starting storefront demo session");

    let store = ShopStore::new();
    let items = catalog()?;
    let tee = &items[0];
    let beanie = &items[2];
    let tote = &items[3];

    // Build a cart, change our mind about the beanie, come back to it.
    store.add_to_cart(tee);
    store.add_to_cart(tee);
    store.add_to_cart(beanie);
    store.add_to_cart(tote);

    store.save_for_later(beanie);
    info!(
        cart_items = store.cart_snapshot().unique_items(),
        saved_items = store.saved_snapshot().iter().count(),
        "beanie parked for later"
    );
    store.move_to_cart_from_saved(beanie);

    info!(total = %store.total_price(), "cart ready for checkout");

    // Fill the checkout form the way a UI would, one field at a time.
    let flow = CheckoutFlow::new(
        Arc::new(DemoGeocoder),
        Arc::new(SimulatedProcessor::default()),
        Arc::new(LogNotifier),
    );
    let form = flow.form();

    form.on_first_name_changed("Ada");
    form.on_last_name_changed("Lovelace");
    form.on_phone_changed("5125551234");
    form.on_address_changed("1 Congress Ave");
    form.on_zip_changed("78701");
    form.on_card_number_changed("4532015112830366");
    form.on_expiry_changed("1232");
    form.on_cvv_changed("123");

    // Let the zip lookup land before printing the shipping line.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    info!(shipping = %form.snapshot().shipping_address(), "shipping to");

    match flow.place_order(&store).await {
        Ok(confirmation) => {
            println!("Order {} confirmed!", confirmation.code);
            println!("  placed at: {}", confirmation.placed_at.to_rfc3339());
            for (variant, qty) in confirmation.items.iter() {
                println!(
                    "  {} x {} ({} / {}) at {}",
                    qty, variant.name, variant.size, variant.color, variant.price
                );
            }
            println!("  total: {}", confirmation.total);
        }
        Err(SessionError::PaymentCancelled) => {
            println!("Payment cancelled; your cart is untouched.");
        }
        Err(err) => {
            eprintln!("Checkout failed: {err}");
            std::process::exit(1);
        }
    }

    Ok(())
}
