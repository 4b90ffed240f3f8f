//! # Domain Types
//!
//! Core domain types used throughout the Weft storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │  ProductVariant  │   │      Cart        │   │ OrderConfirmation│     │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  name            │   │  variant → qty   │   │  items (frozen)  │     │
//! │  │  size / color    │   │  (cart.rs)       │   │  total (frozen)  │     │
//! │  │  image           │   │                  │   │  code            │     │
//! │  │  price (Money)   │   │                  │   │  placed_at       │     │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Structural Identity
//! A variant has no surrogate ID: two variants with identical
//! name/size/color/image/price are the same cart key. That is why
//! `ProductVariant` derives the full `Eq`/`Ord`/`Hash` set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Product Variant
// =============================================================================

/// A specific purchasable configuration of a product.
///
/// ## Invariants
/// - `name` is non-blank
/// - `price` is non-negative and already rounded to whole cents
///   (`Money` cannot hold fractional cents, so rounding happens exactly
///   once, inside [`ProductVariant::new`])
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Display name ("Classic Tee").
    pub name: String,

    /// Size label ("S", "M", "L", ...).
    pub size: String,

    /// Color label ("Black", "Heather Grey", ...).
    pub color: String,

    /// Image reference (asset path or URL; opaque to the core).
    pub image: String,

    /// Unit price, frozen at catalog load.
    pub price: Money,
}

impl ProductVariant {
    /// Creates a variant from raw catalog data, validating invariants.
    ///
    /// The dollar price is rounded to whole cents here and never again.
    ///
    /// ## Example
    /// ```rust
    /// use weft_core::types::ProductVariant;
    ///
    /// let tee = ProductVariant::new("Classic Tee", "M", "Black", "tee_black.png", 19.999)
    ///     .unwrap();
    /// assert_eq!(tee.price.cents(), 2000);
    ///
    /// assert!(ProductVariant::new("", "M", "Black", "tee.png", 19.99).is_err());
    /// assert!(ProductVariant::new("Tee", "M", "Black", "tee.png", -1.0).is_err());
    /// ```
    pub fn new(
        name: &str,
        size: &str,
        color: &str,
        image: &str,
        price_dollars: f64,
    ) -> ValidationResult<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }

        if !price_dollars.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        if price_dollars < 0.0 {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        Ok(ProductVariant {
            name: name.to_string(),
            size: size.to_string(),
            color: color.to_string(),
            image: image.to_string(),
            price: Money::from_dollars(price_dollars),
        })
    }
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// An immutable snapshot taken at the moment checkout completes.
///
/// ## Lifecycle
/// Created once per successful checkout; never mutated; superseded (not
/// merged) by the next checkout's snapshot. Later cart edits do not touch
/// the frozen `items`/`total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Cart contents at the instant the payment was approved.
    pub items: Cart,

    /// Total charged, computed from the frozen items.
    pub total: Money,

    /// 10-character confirmation code over A-Z0-9.
    pub code: String,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Freezes a cart snapshot with its total and a confirmation code.
    pub fn new(items: Cart, code: String) -> Self {
        let total = items.total();
        OrderConfirmation {
            items,
            total,
            code,
            placed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
