//! # weft-core: Pure Business Logic for the Weft Storefront
//!
//! This crate is the **heart** of Weft. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Weft Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  Presentation (out of scope)                    │    │
//! │  │    Product List ──► Cart UI ──► Checkout UI ──► Confirmation    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ observes snapshots                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    weft-session                                 │    │
//! │  │    ShopStore, CheckoutForm, payment / geocoder / store seams    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ weft-core (THIS CRATE) ★                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │   cart    │  │   card    │    │    │
//! │  │   │  Variant  │  │   Money   │  │   Cart    │  │   Luhn    │    │    │
//! │  │   │   Order   │  │ rounding  │  │  Saved    │  │  network  │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │   ┌───────────┐  ┌──────────────┐                               │    │
//! │  │   │  format   │  │ confirmation │                               │    │
//! │  │   │   masks   │  │    codes     │                               │    │
//! │  │   └───────────┘  └──────────────┘                               │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO CLOCK READS* • NO NETWORK • PURE FUNCTIONS        │    │
//! │  │   (*expiry "now" is injected; a Local wrapper exists for        │    │
//! │  │     convenience, and order timestamps record creation time)     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductVariant, OrderConfirmation)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and saved-items quantity maps
//! - [`format`] - Input masks (card number, expiry, CVV, phone)
//! - [`card`] - Card validators (Luhn, network, expiry, CVV)
//! - [`confirmation`] - Confirmation code generation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output (RNG and "now" injected)
//! 2. **No I/O**: network and file system access is FORBIDDEN here
//! 3. **Integer Money**: monetary values are cents (i64), rounded exactly once
//! 4. **Explicit Errors**: invariant violations are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use weft_core::card::{is_valid_card_number, CardNetwork};
//! use weft_core::format::format_card_number;
//!
//! let shown = format_card_number("4532015112830366");
//! assert_eq!(shown, "4532 0151 1283 0366");
//! assert!(is_valid_card_number(&shown));
//! assert_eq!(CardNetwork::detect(&shown), CardNetwork::Visa);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod card;
pub mod cart;
pub mod confirmation;
pub mod error;
pub mod format;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use weft_core::Money` instead of
// `use weft_core::money::Money`

pub use card::CardNetwork;
pub use cart::{Cart, SavedItems};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::{OrderConfirmation, ProductVariant};
