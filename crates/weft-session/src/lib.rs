//! # Weft Session
//!
//! Session-level state holders and external-collaborator seams for the
//! Weft storefront. Everything stateful about one shopper session lives
//! here; the pure rules it applies live in `weft-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          weft-session                                   │
//! │                                                                         │
//! │   ┌───────────┐   ┌──────────────┐   ┌───────────┐                      │
//! │   │ ShopStore │   │ CheckoutFlow │   │  Session  │                      │
//! │   │ cart +    │   │ form state + │   │ account + │                      │
//! │   │ saved     │   │ place_order  │   │ settings  │                      │
//! │   └─────┬─────┘   └──────┬───────┘   └─────┬─────┘                      │
//! │         │                │                 │                            │
//! │         ▼                ▼                 ▼                            │
//! │   watch channels publish immutable snapshots to observers               │
//! │                                                                         │
//! │   external seams (trait objects, injected at construction):             │
//! │     Geocoder ──── zip → city/state lookup                               │
//! │     PaymentProcessor ── authorization                                   │
//! │     Notifier ──── order status presentation                             │
//! │     SettingsStore ── key/value persistence                              │
//! │                                                                         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                      weft-core (pure, no I/O)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Rules
//!
//! - **Snapshots out, operations in.** State is exposed as cloned
//!   immutable snapshots through `tokio::sync::watch`; callers never hold
//!   a lock across their own logic.
//! - **Seams are traits.** Anything that talks to the outside world is a
//!   trait object injected at construction, so every flow is testable
//!   with in-process fakes.
//! - **Errors are typed.** Fallible operations return
//!   [`SessionResult`]; field-level problems stay boolean flags on the
//!   form and never become errors.

pub mod account;
pub mod checkout;
pub mod error;
pub mod geo;
pub mod notify;
pub mod payment;
pub mod store;

pub use account::{MemoryStore, Session, SettingsStore, UserProfile};
pub use checkout::{CheckoutFlow, CheckoutForm, Field, FormSnapshot};
pub use error::{SessionError, SessionResult};
pub use geo::{CityState, Geocoder, NullGeocoder};
pub use notify::{notify_order_status, LogNotifier, Notifier, OrderStatus, StatusNotice};
pub use payment::{
    PaymentOutcome, PaymentProcessor, PaymentRequest, SimulatedProcessor,
};
pub use store::ShopStore;
