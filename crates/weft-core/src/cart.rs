//! # Cart & Saved Items
//!
//! Quantity maps keyed by [`ProductVariant`].
//!
//! ## Container Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart / Saved-Items Containers                        │
//! │                                                                         │
//! │  Cart                              SavedItems                           │
//! │  ─────                             ──────────                           │
//! │  add       qty + 1 (insert at 1)   set        insert exact qty          │
//! │  remove    qty - 1 (drop at 0,     increase   qty + 1                   │
//! │            absent = no-op)         decrease   qty - 1, floor of 1       │
//! │  total     Σ unit price × qty      remove     drop unconditionally      │
//! │                                                                         │
//! │  INVARIANT: no stored entry ever has quantity 0. Reaching 0 deletes     │
//! │  the entry; callers read quantity() == 0 to mean "absent".              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Moving an item between the two containers is a session-level concern
//! (the session store owns both snapshots); these types never reach into
//! each other.
//!
//! `BTreeMap` keeps iteration order deterministic, so two equal snapshots
//! render identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::ProductVariant;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: a mapping from product variant to positive quantity.
///
/// Cloning a `Cart` produces an independent snapshot; the session store
/// relies on that for copy-on-write publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductVariant, u32>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Increments the variant's quantity by 1, inserting at 1 if absent.
    pub fn add(&mut self, variant: ProductVariant) {
        *self.items.entry(variant).or_insert(0) += 1;
    }

    /// Decrements the variant's quantity by 1.
    ///
    /// The entry is removed entirely when the quantity would reach 0.
    /// A variant that is not in the cart is a silent no-op.
    pub fn remove(&mut self, variant: &ProductVariant) {
        match self.items.get_mut(variant) {
            Some(qty) if *qty > 1 => *qty -= 1,
            Some(_) => {
                self.items.remove(variant);
            }
            None => {}
        }
    }

    /// Deletes the variant's entry regardless of quantity.
    pub fn remove_all(&mut self, variant: &ProductVariant) {
        self.items.remove(variant);
    }

    /// Quantity for a variant; 0 means "not in the cart".
    pub fn quantity(&self, variant: &ProductVariant) -> u32 {
        self.items.get(variant).copied().unwrap_or(0)
    }

    /// Total price: Σ unit price × quantity, exact in cents.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(|(variant, qty)| variant.price * *qty)
            .sum()
    }

    /// Number of distinct variants.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all variants.
    pub fn total_quantity(&self) -> u32 {
        self.items.values().sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entries in deterministic (variant) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductVariant, u32)> {
        self.items.iter().map(|(v, q)| (v, *q))
    }
}

// =============================================================================
// Saved Items
// =============================================================================

/// The saved-for-later set: same shape as the cart, different operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItems {
    items: BTreeMap<ProductVariant, u32>,
}

impl SavedItems {
    /// Creates a new empty saved set.
    pub fn new() -> Self {
        SavedItems::default()
    }

    /// Inserts the variant with an exact quantity (used when moving an item
    /// out of the cart, preserving its cart quantity).
    ///
    /// A quantity of 0 is clamped to 1 so the container invariant holds.
    pub fn set(&mut self, variant: ProductVariant, quantity: u32) {
        self.items.insert(variant, quantity.max(1));
    }

    /// Deletes the entry unconditionally. Absent is a no-op.
    pub fn remove(&mut self, variant: &ProductVariant) {
        self.items.remove(variant);
    }

    /// Increments the saved quantity by 1.
    ///
    /// An absent entry is treated as quantity 1 and ends up stored at 2,
    /// matching the storefront's historical behavior. In practice the
    /// increase control is only shown for present entries.
    pub fn increase(&mut self, variant: &ProductVariant) {
        let qty = self.quantity_or_one(variant);
        self.items.insert(variant.clone(), qty + 1);
    }

    /// Decrements the saved quantity by 1, floored at 1.
    ///
    /// Quantity 1 and absent entries are no-ops.
    pub fn decrease(&mut self, variant: &ProductVariant) {
        if let Some(qty) = self.items.get_mut(variant) {
            if *qty > 1 {
                *qty -= 1;
            }
        }
    }

    /// Quantity for a variant; 0 means "not saved".
    pub fn quantity(&self, variant: &ProductVariant) -> u32 {
        self.items.get(variant).copied().unwrap_or(0)
    }

    /// Quantity with the "default 1 if absent" rule move operations use.
    pub fn quantity_or_one(&self, variant: &ProductVariant) -> u32 {
        self.items.get(variant).copied().unwrap_or(1)
    }

    /// Checks if the saved set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct variants.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Iterates entries in deterministic (variant) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductVariant, u32)> {
        self.items.iter().map(|(v, q)| (v, *q))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tee(name: &str, price: f64) -> ProductVariant {
        ProductVariant::new(name, "M", "Black", "tee.png", price).unwrap()
    }

    #[test]
    fn test_add_and_remove_counts() {
        let mut cart = Cart::new();
        let a = tee("A", 10.0);

        cart.add(a.clone());
        cart.add(a.clone());
        assert_eq!(cart.quantity(&a), 2);

        cart.remove(&a);
        assert_eq!(cart.quantity(&a), 1);

        cart.remove(&a);
        assert_eq!(cart.quantity(&a), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        let a = tee("A", 10.0);
        cart.remove(&a);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_equals_adds_minus_removes_clamped() {
        // For any interleaving on one variant, the quantity is
        // (#adds - #removes) clamped to >= 0, and the entry is absent
        // exactly when that value is 0.
        let a = tee("A", 10.0);
        let sequences: &[&[bool]] = &[
            &[true, true, false],
            &[false, false, true],
            &[true, false, true, false, false],
            &[true, true, true, false],
            &[false],
        ];

        for seq in sequences {
            let mut cart = Cart::new();
            let mut expected: i64 = 0;
            for &is_add in *seq {
                if is_add {
                    cart.add(a.clone());
                    expected += 1;
                } else {
                    cart.remove(&a);
                    expected = (expected - 1).max(0);
                }
            }
            assert_eq!(cart.quantity(&a) as i64, expected);
            assert_eq!(cart.quantity(&a) == 0, cart.is_empty());
        }
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::new();
        let a = tee("A", 10.0);
        let b = tee("B", 5.5);

        cart.add(a.clone());
        cart.add(a);
        cart.add(b);

        assert_eq!(cart.total(), Money::from_cents(2550));
        assert_eq!(cart.total().to_dollars(), 25.5);
    }

    #[test]
    fn test_counts() {
        let mut cart = Cart::new();
        cart.add(tee("A", 10.0));
        cart.add(tee("A", 10.0));
        cart.add(tee("B", 5.5));

        assert_eq!(cart.unique_items(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_saved_set_and_remove() {
        let mut saved = SavedItems::new();
        let a = tee("A", 10.0);

        saved.set(a.clone(), 3);
        assert_eq!(saved.quantity(&a), 3);

        saved.remove(&a);
        assert!(saved.is_empty());
    }

    #[test]
    fn test_saved_set_clamps_zero() {
        let mut saved = SavedItems::new();
        let a = tee("A", 10.0);
        saved.set(a.clone(), 0);
        assert_eq!(saved.quantity(&a), 1);
    }

    #[test]
    fn test_saved_increase_decrease_floor() {
        let mut saved = SavedItems::new();
        let a = tee("A", 10.0);

        saved.set(a.clone(), 1);
        saved.increase(&a);
        assert_eq!(saved.quantity(&a), 2);

        saved.decrease(&a);
        assert_eq!(saved.quantity(&a), 1);

        // floor of 1: decreasing again is a no-op
        saved.decrease(&a);
        assert_eq!(saved.quantity(&a), 1);

        // decreasing an absent entry stays a no-op
        let b = tee("B", 5.5);
        saved.decrease(&b);
        assert_eq!(saved.quantity(&b), 0);
    }

    #[test]
    fn test_saved_increase_absent_inserts_at_two() {
        // historical behavior: absent counts as 1, so increase lands on 2
        let mut saved = SavedItems::new();
        let a = tee("A", 10.0);
        saved.increase(&a);
        assert_eq!(saved.quantity(&a), 2);
    }

    #[test]
    fn test_snapshot_independence() {
        let mut cart = Cart::new();
        let a = tee("A", 10.0);
        cart.add(a.clone());

        let snapshot = cart.clone();
        cart.add(a.clone());

        assert_eq!(snapshot.quantity(&a), 1);
        assert_eq!(cart.quantity(&a), 2);
    }
}
