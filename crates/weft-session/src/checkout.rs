//! # Checkout Form & Order Flow
//!
//! The checkout form state machine and the payment/confirmation flow.
//!
//! ## Field State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Field State                                      │
//! │                                                                         │
//! │   untouched ──(first edit or focus)──► touched                          │
//! │                                                                         │
//! │   Once touched, the field's error flag is recomputed on every change    │
//! │   and is what the UI displays. Error flags are booleans, never fatal.   │
//! │                                                                         │
//! │   Re-validation cascade:                                                │
//! │     card number change ──► network re-detected ──► CVV re-validated     │
//! │     (an AMEX code is 4 digits, everything else 3)                       │
//! │                                                                         │
//! │   Zip reaching 5 digits fires the async city/state lookup:              │
//! │     • the previous in-flight lookup is ABORTED on every zip edit        │
//! │     • a result is applied only if the zip that triggered it still       │
//! │       matches the field (staleness guard)                               │
//! │     • dropping the form aborts whatever is still in flight              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Flow
//! ```text
//! place_order ──► form valid? ──► PaymentProcessor::authorize ──► Approved
//!                     │                                              │
//!                     │ no                                           ▼
//!                     ▼                               freeze cart+total snapshot
//!              SessionError::InvalidForm              generate confirmation code
//!                                                     publish (supersedes last)
//!                                                     notify "Order Confirmed"
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use weft_core::card::{is_cvv_valid, is_expiry_valid, is_valid_card_number, CardNetwork};
use weft_core::confirmation::confirmation_code;
use weft_core::format::{
    digit_count, format_card_number, format_cvv, format_expiry_date, format_phone_number,
    PHONE_DIGITS,
};
use weft_core::OrderConfirmation;

use crate::error::{SessionError, SessionResult};
use crate::geo::{CityState, Geocoder};
use crate::notify::{Notifier, OrderStatus};
use crate::payment::{PaymentOutcome, PaymentProcessor, PaymentRequest};
use crate::store::ShopStore;

/// Required zip length; reaching it triggers the city/state lookup.
pub const ZIP_LENGTH: usize = 5;

// =============================================================================
// Form Snapshot
// =============================================================================

/// Fields a shopper can focus without typing; used to latch the touched
/// flag from a blur event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Phone,
    Address,
    ZipCode,
}

/// One immutable snapshot of the checkout form.
///
/// Values are the masked display strings; error flags are the derived
/// inline indicators. City/state are read-only results of the zip lookup
/// and are never independently validated.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    pub city: String,
    pub state: String,

    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_network: CardNetwork,

    pub first_name_touched: bool,
    pub last_name_touched: bool,
    pub phone_touched: bool,
    pub address_touched: bool,
    pub zip_code_touched: bool,

    pub first_name_error: bool,
    pub last_name_error: bool,
    pub phone_error: bool,
    pub address_error: bool,
    pub zip_code_error: bool,
    pub card_number_error: bool,
    pub expiry_date_error: bool,
    pub cvv_error: bool,
}

impl FormSnapshot {
    /// Overall form validity.
    ///
    /// Names and address non-blank, phone has exactly 10 digits, zip has
    /// length 5, and none of the card/expiry/CVV error flags are set.
    pub fn is_valid(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && digit_count(&self.phone) == PHONE_DIGITS
            && !self.address.trim().is_empty()
            && self.zip_code.len() == ZIP_LENGTH
            && !self.card_number_error
            && !self.expiry_date_error
            && !self.cvv_error
    }

    /// The shipping address line: non-blank parts of
    /// address / city / state / zip joined with ", ".
    pub fn shipping_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.zip_code]
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Shared form state plus its snapshot publisher.
struct FormInner {
    state: Mutex<FormSnapshot>,
    tx: watch::Sender<FormSnapshot>,
}

impl FormInner {
    /// Mutates the form under the lock, then publishes the new snapshot.
    fn update<F: FnOnce(&mut FormSnapshot)>(&self, f: F) {
        let snapshot = {
            let mut state = self.state.lock().expect("form mutex poisoned");
            f(&mut state);
            state.clone()
        };
        self.tx.send_replace(snapshot);
    }

    /// Applies a zip-lookup result, but only if the zip that triggered the
    /// lookup still matches the field (a stale response must not overwrite
    /// a newer entry's fields).
    fn apply_zip_lookup(&self, requested_zip: &str, found: CityState) {
        let snapshot = {
            let mut state = self.state.lock().expect("form mutex poisoned");
            if state.zip_code != requested_zip {
                debug!(requested_zip, current = %state.zip_code, "dropping stale zip lookup");
                return;
            }
            state.city = found.city;
            state.state = found.state;
            state.clone()
        };
        self.tx.send_replace(snapshot);
    }
}

/// The checkout form: field values, touched latches, derived error flags,
/// and the zip-lookup orchestration.
pub struct CheckoutForm {
    inner: Arc<FormInner>,
    geocoder: Arc<dyn Geocoder>,
    zip_lookup: Mutex<Option<JoinHandle<()>>>,
}

impl CheckoutForm {
    /// Creates an empty, untouched form.
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        let (tx, _) = watch::channel(FormSnapshot::default());
        CheckoutForm {
            inner: Arc::new(FormInner {
                state: Mutex::new(FormSnapshot::default()),
                tx,
            }),
            geocoder,
            zip_lookup: Mutex::new(None),
        }
    }

    /// Subscribes to form snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Current form snapshot.
    pub fn snapshot(&self) -> FormSnapshot {
        self.inner.state.lock().expect("form mutex poisoned").clone()
    }

    /// Overall form validity (see [`FormSnapshot::is_valid`]).
    pub fn is_valid(&self) -> bool {
        self.snapshot().is_valid()
    }

    // -------------------------------------------------------------------------
    // Touch Latches
    // -------------------------------------------------------------------------

    /// Latches a field as touched (focus/blur without typing) and computes
    /// its error flag from the current value.
    pub fn mark_touched(&self, field: Field) {
        self.inner.update(|s| match field {
            Field::FirstName => {
                s.first_name_touched = true;
                s.first_name_error = s.first_name.trim().is_empty();
            }
            Field::LastName => {
                s.last_name_touched = true;
                s.last_name_error = s.last_name.trim().is_empty();
            }
            Field::Phone => {
                s.phone_touched = true;
                s.phone_error = digit_count(&s.phone) != PHONE_DIGITS;
            }
            Field::Address => {
                s.address_touched = true;
                s.address_error = s.address.trim().is_empty();
            }
            Field::ZipCode => {
                s.zip_code_touched = true;
                s.zip_code_error = s.zip_code.len() != ZIP_LENGTH;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Contact & Shipping Fields
    // -------------------------------------------------------------------------

    /// Updates the first name; error iff blank.
    pub fn on_first_name_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.first_name = input.to_string();
            s.first_name_touched = true;
            s.first_name_error = s.first_name.trim().is_empty();
        });
    }

    /// Updates the last name; error iff blank.
    pub fn on_last_name_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.last_name = input.to_string();
            s.last_name_touched = true;
            s.last_name_error = s.last_name.trim().is_empty();
        });
    }

    /// Formats the phone mask; error iff the digit count is not 10.
    pub fn on_phone_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.phone = format_phone_number(input);
            s.phone_touched = true;
            s.phone_error = digit_count(&s.phone) != PHONE_DIGITS;
        });
    }

    /// Updates the street address; error iff blank.
    pub fn on_address_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.address = input.to_string();
            s.address_touched = true;
            s.address_error = s.address.trim().is_empty();
        });
    }

    /// Updates the zip code; error iff length differs from 5.
    ///
    /// Every zip edit aborts the in-flight lookup; reaching exactly 5
    /// characters fires a fresh city/state lookup whose result passes the
    /// staleness guard before being applied.
    pub fn on_zip_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.zip_code = input.to_string();
            s.zip_code_touched = true;
            s.zip_code_error = s.zip_code.len() != ZIP_LENGTH;
        });

        self.abort_zip_lookup();

        if input.len() == ZIP_LENGTH {
            self.spawn_zip_lookup(input.to_string());
        }
    }

    fn abort_zip_lookup(&self) {
        if let Some(handle) = self
            .zip_lookup
            .lock()
            .expect("zip lookup mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }

    fn spawn_zip_lookup(&self, zip: String) {
        // No runtime means no lookup; geocoding is best-effort by contract.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, skipping zip lookup");
            return;
        };

        let inner = Arc::clone(&self.inner);
        let geocoder = Arc::clone(&self.geocoder);
        let handle = runtime.spawn(async move {
            if let Some(found) = geocoder.city_state(&zip).await {
                inner.apply_zip_lookup(&zip, found);
            }
        });

        *self.zip_lookup.lock().expect("zip lookup mutex poisoned") = Some(handle);
    }

    /// Waits for the latest spawned lookup to settle (tests only).
    #[cfg(test)]
    async fn zip_lookup_settled(&self) {
        let handle = self
            .zip_lookup
            .lock()
            .expect("zip lookup mutex poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    // -------------------------------------------------------------------------
    // Card Fields
    // -------------------------------------------------------------------------

    /// Formats the card number, re-detects the network, re-runs the Luhn
    /// check, and cascades into CVV re-validation (CVV length depends on
    /// the newly detected network).
    pub fn on_card_number_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.card_number = format_card_number(input);
            s.card_network = CardNetwork::detect(&s.card_number);
            s.card_number_error = !is_valid_card_number(&s.card_number);
            s.cvv_error = !is_cvv_valid(&s.cvv, s.card_network);
        });
    }

    /// Formats the expiry mask and validates it against the current month.
    pub fn on_expiry_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.expiry_date = format_expiry_date(input);
            s.expiry_date_error = !is_expiry_valid(&s.expiry_date);
        });
    }

    /// Formats the CVV (capped by the detected network) and validates it.
    pub fn on_cvv_changed(&self, input: &str) {
        self.inner.update(|s| {
            s.cvv = format_cvv(input, s.card_network);
            s.cvv_error = !is_cvv_valid(&s.cvv, s.card_network);
        });
    }
}

impl Drop for CheckoutForm {
    /// A form going away takes its pending lookup with it; nothing should
    /// write into state nobody observes anymore.
    fn drop(&mut self) {
        self.abort_zip_lookup();
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Owns the form, the payment seam, and the latest order confirmation.
pub struct CheckoutFlow {
    form: CheckoutForm,
    processor: Arc<dyn PaymentProcessor>,
    notifier: Arc<dyn Notifier>,
    confirmation_tx: watch::Sender<Option<OrderConfirmation>>,
}

impl CheckoutFlow {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        processor: Arc<dyn PaymentProcessor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (confirmation_tx, _) = watch::channel(None);
        CheckoutFlow {
            form: CheckoutForm::new(geocoder),
            processor,
            notifier,
            confirmation_tx,
        }
    }

    /// The checkout form being filled in.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Subscribes to order confirmations. Each successful checkout
    /// supersedes the previous value.
    pub fn confirmation(&self) -> watch::Receiver<Option<OrderConfirmation>> {
        self.confirmation_tx.subscribe()
    }

    /// The latest confirmation, if any order has completed this session.
    pub fn last_confirmation(&self) -> Option<OrderConfirmation> {
        self.confirmation_tx.borrow().clone()
    }

    /// Places the order for the current cart.
    ///
    /// The form must be valid; the historical placeholder bypass is gone.
    /// On approval the cart+total snapshot is frozen with a fresh
    /// confirmation code, published, and announced as `Confirmed`.
    /// Cancel/decline come back as typed errors the UI retries from.
    pub async fn place_order(&self, store: &ShopStore) -> SessionResult<OrderConfirmation> {
        if !self.form.is_valid() {
            return Err(SessionError::InvalidForm);
        }

        let items = store.cart_snapshot();
        let total = items.total();
        let request = PaymentRequest::for_total(total);

        info!(total = %total, "authorizing payment");
        match self.processor.authorize(&request).await {
            PaymentOutcome::Approved => {
                let code = confirmation_code(&mut rand::thread_rng());
                let confirmation = OrderConfirmation::new(items, code);

                self.confirmation_tx.send_replace(Some(confirmation.clone()));
                self.notifier
                    .notify(OrderStatus::Confirmed, OrderStatus::Confirmed.notice());

                info!(code = %confirmation.code, total = %confirmation.total, "order placed");
                Ok(confirmation)
            }
            PaymentOutcome::Cancelled => {
                info!("payment cancelled by shopper");
                Err(SessionError::PaymentCancelled)
            }
            PaymentOutcome::Failed { message } => {
                info!(%message, "payment failed");
                Err(SessionError::PaymentFailed { message })
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
