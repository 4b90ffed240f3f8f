//! # Shop Store
//!
//! Session-level owner of the cart and saved-items state.
//!
//! ## Snapshot Publication
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Copy-on-Write Publication                            │
//! │                                                                         │
//! │  UI event ──► ShopStore op ──► clone current snapshot                   │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                            apply core mutation                          │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                        watch::Sender::send_replace                      │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │              observers re-render from the NEW immutable snapshot        │
//! │                                                                         │
//! │  Readers hold receivers; they never see a half-applied mutation         │
//! │  because the published value is always a whole replacement.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is the single logical writer. It is `Sync` so UI callbacks on
//! any thread can invoke operations, but there is no multi-writer protocol
//! beyond the channel's own locking.

use tokio::sync::watch;
use tracing::debug;

use weft_core::{Cart, Money, ProductVariant, SavedItems};

/// Owns the cart and saved-for-later snapshots for one shopper session.
#[derive(Debug)]
pub struct ShopStore {
    cart_tx: watch::Sender<Cart>,
    saved_tx: watch::Sender<SavedItems>,
}

impl ShopStore {
    /// Creates a store with an empty cart and saved set.
    pub fn new() -> Self {
        let (cart_tx, _) = watch::channel(Cart::new());
        let (saved_tx, _) = watch::channel(SavedItems::new());
        ShopStore { cart_tx, saved_tx }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Subscribes to cart snapshots.
    pub fn cart(&self) -> watch::Receiver<Cart> {
        self.cart_tx.subscribe()
    }

    /// Subscribes to saved-items snapshots.
    pub fn saved(&self) -> watch::Receiver<SavedItems> {
        self.saved_tx.subscribe()
    }

    /// Current cart snapshot.
    pub fn cart_snapshot(&self) -> Cart {
        self.cart_tx.borrow().clone()
    }

    /// Current saved-items snapshot.
    pub fn saved_snapshot(&self) -> SavedItems {
        self.saved_tx.borrow().clone()
    }

    /// Total price of the current cart.
    pub fn total_price(&self) -> Money {
        self.cart_tx.borrow().total()
    }

    // -------------------------------------------------------------------------
    // Cart Operations
    // -------------------------------------------------------------------------

    /// Adds one unit of the variant to the cart.
    pub fn add_to_cart(&self, variant: &ProductVariant) {
        let mut next = self.cart_snapshot();
        next.add(variant.clone());
        debug!(name = %variant.name, qty = next.quantity(variant), "add_to_cart");
        self.cart_tx.send_replace(next);
    }

    /// Removes one unit of the variant from the cart.
    ///
    /// Dropping to zero removes the entry; an absent variant is a no-op.
    pub fn remove_from_cart(&self, variant: &ProductVariant) {
        let mut next = self.cart_snapshot();
        next.remove(variant);
        debug!(name = %variant.name, qty = next.quantity(variant), "remove_from_cart");
        self.cart_tx.send_replace(next);
    }

    // -------------------------------------------------------------------------
    // Moves Between Cart and Saved
    // -------------------------------------------------------------------------

    /// Moves a variant from the cart to the saved set.
    ///
    /// The saved entry takes the variant's full cart quantity (default 1
    /// when it was not in the cart), and the cart entry is removed
    /// entirely.
    pub fn save_for_later(&self, variant: &ProductVariant) {
        let mut cart = self.cart_snapshot();
        let mut saved = self.saved_snapshot();

        let qty = match cart.quantity(variant) {
            0 => 1,
            q => q,
        };
        saved.set(variant.clone(), qty);
        cart.remove_all(variant);

        debug!(name = %variant.name, qty, "save_for_later");
        self.saved_tx.send_replace(saved);
        self.cart_tx.send_replace(cart);
    }

    /// Moves a variant from the saved set back into the cart.
    ///
    /// The saved entry is dropped and the cart gains exactly ONE unit,
    /// whatever quantity was saved. Inherited storefront behavior, kept on
    /// purpose pending a product decision; the quantity is not restored.
    pub fn move_to_cart_from_saved(&self, variant: &ProductVariant) {
        let mut saved = self.saved_snapshot();
        let saved_qty = saved.quantity_or_one(variant);
        saved.remove(variant);

        debug!(name = %variant.name, saved_qty, "move_to_cart_from_saved");
        self.saved_tx.send_replace(saved);
        self.add_to_cart(variant);
    }

    // -------------------------------------------------------------------------
    // Saved-Items Operations
    // -------------------------------------------------------------------------

    /// Deletes the saved entry unconditionally.
    pub fn remove_saved_item(&self, variant: &ProductVariant) {
        let mut next = self.saved_snapshot();
        next.remove(variant);
        debug!(name = %variant.name, "remove_saved_item");
        self.saved_tx.send_replace(next);
    }

    /// Increments a saved quantity by 1.
    pub fn increase_saved_item_qty(&self, variant: &ProductVariant) {
        let mut next = self.saved_snapshot();
        next.increase(variant);
        debug!(name = %variant.name, qty = next.quantity(variant), "increase_saved_item_qty");
        self.saved_tx.send_replace(next);
    }

    /// Decrements a saved quantity by 1, floored at 1.
    pub fn decrease_saved_item_qty(&self, variant: &ProductVariant) {
        let mut next = self.saved_snapshot();
        next.decrease(variant);
        debug!(name = %variant.name, qty = next.quantity(variant), "decrease_saved_item_qty");
        self.saved_tx.send_replace(next);
    }
}

impl Default for ShopStore {
    fn default() -> Self {
        Self::new()
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
    fn test_add_remove_roundtrip() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.add_to_cart(&a);
        store.add_to_cart(&a);
        store.remove_from_cart(&a);

        assert_eq!(store.cart_snapshot().quantity(&a), 1);
    }

    #[test]
    fn test_observers_see_new_snapshots() {
        let store = ShopStore::new();
        let mut cart_rx = store.cart();
        let a = tee("A", 10.0);

        assert!(!cart_rx.has_changed().unwrap());
        store.add_to_cart(&a);
        assert!(cart_rx.has_changed().unwrap());
        assert_eq!(cart_rx.borrow_and_update().quantity(&a), 1);
    }

    #[test]
    fn test_earlier_snapshot_is_immutable() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.add_to_cart(&a);
        let before = store.cart_snapshot();

        store.add_to_cart(&a);
        assert_eq!(before.quantity(&a), 1);
        assert_eq!(store.cart_snapshot().quantity(&a), 2);
    }

    #[test]
    fn test_save_for_later_moves_full_quantity() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.add_to_cart(&a);
        store.add_to_cart(&a);
        store.save_for_later(&a);

        assert!(store.cart_snapshot().is_empty());
        assert_eq!(store.saved_snapshot().quantity(&a), 2);
    }

    #[test]
    fn test_save_for_later_absent_defaults_to_one() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.save_for_later(&a);
        assert_eq!(store.saved_snapshot().quantity(&a), 1);
    }

    #[test]
    fn test_move_to_cart_restores_a_single_unit() {
        // Asserts the inherited behavior explicitly: moving back from saved
        // adds exactly one unit even when three were saved. Changing this
        // semantics must flip this test deliberately.
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        for _ in 0..3 {
            store.add_to_cart(&a);
        }
        store.save_for_later(&a);
        assert_eq!(store.saved_snapshot().quantity(&a), 3);

        store.move_to_cart_from_saved(&a);
        assert!(store.saved_snapshot().is_empty());
        assert_eq!(store.cart_snapshot().quantity(&a), 1);
    }

    #[test]
    fn test_cart_saved_move_scenario() {
        // add A twice, remove once -> {A:1}; save -> cart {}, saved {A:1};
        // move back -> cart {A:1}, saved {}
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.add_to_cart(&a);
        store.add_to_cart(&a);
        store.remove_from_cart(&a);
        assert_eq!(store.cart_snapshot().quantity(&a), 1);

        store.save_for_later(&a);
        assert!(store.cart_snapshot().is_empty());
        assert_eq!(store.saved_snapshot().quantity(&a), 1);

        store.move_to_cart_from_saved(&a);
        assert_eq!(store.cart_snapshot().quantity(&a), 1);
        assert!(store.saved_snapshot().is_empty());
    }

    #[test]
    fn test_saved_qty_controls() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);

        store.add_to_cart(&a);
        store.save_for_later(&a);

        store.increase_saved_item_qty(&a);
        assert_eq!(store.saved_snapshot().quantity(&a), 2);

        store.decrease_saved_item_qty(&a);
        store.decrease_saved_item_qty(&a); // floored at 1
        assert_eq!(store.saved_snapshot().quantity(&a), 1);

        store.remove_saved_item(&a);
        assert!(store.saved_snapshot().is_empty());
    }

    #[test]
    fn test_total_price() {
        let store = ShopStore::new();
        let a = tee("A", 10.0);
        let b = tee("B", 5.5);

        store.add_to_cart(&a);
        store.add_to_cart(&a);
        store.add_to_cart(&b);

        assert_eq!(store.total_price().to_dollars(), 25.5);
    }
}
