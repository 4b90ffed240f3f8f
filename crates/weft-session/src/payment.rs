//! # Payment Seam
//!
//! Payment authorization behind a trait, plus the wallet request documents
//! a Google-Pay-style sheet expects.
//!
//! ## Authorization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Payment Authorization                              │
//! │                                                                         │
//! │  CheckoutFlow::place_order                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentRequest { total_price: "25.50", currency_code: "USD" }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PaymentProcessor::authorize ──► Approved | Cancelled | Failed          │
//! │       │                                                                 │
//! │       ├── Approved  → freeze confirmation snapshot                      │
//! │       ├── Cancelled → SessionError::PaymentCancelled (retry/back)       │
//! │       └── Failed    → SessionError::PaymentFailed (retry/back)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Real SDK integration (tokenization, wallet sheets) is an external
//! collaborator; [`SimulatedProcessor`] reproduces the fixed processing
//! delay the storefront ships with.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use weft_core::Money;

/// Currency every request is denominated in.
pub const CURRENCY_CODE: &str = "USD";

/// Merchant name presented on the wallet sheet.
pub const MERCHANT_NAME: &str = "Weft Supply Co.";

// =============================================================================
// Request / Outcome Types
// =============================================================================

/// The amount handed to a payment processor.
///
/// `total_price` is a fixed-point decimal string ("25.50") because that is
/// the wire shape payment SDKs take; no float ever crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub total_price: String,
    pub currency_code: String,
}

impl PaymentRequest {
    /// Builds a request for a cart total.
    pub fn for_total(total: Money) -> Self {
        PaymentRequest {
            total_price: total.to_fixed_point(),
            currency_code: CURRENCY_CODE.to_string(),
        }
    }
}

/// Result of a payment authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The processor approved the charge.
    Approved,

    /// The shopper dismissed the payment sheet.
    Cancelled,

    /// The processor declined or errored.
    Failed { message: String },
}

/// Authorizes payments. Implementations wrap real SDKs; tests and demos
/// use [`SimulatedProcessor`].
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn authorize(&self, request: &PaymentRequest) -> PaymentOutcome;
}

// =============================================================================
// Simulated Processor
// =============================================================================

/// A processor that waits a fixed delay and approves.
///
/// The delay stands in for gateway round-trip time so the confirmation
/// screen transition is observable; tests pass `Duration::ZERO`.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        SimulatedProcessor { delay }
    }
}

impl Default for SimulatedProcessor {
    /// The storefront's historical 2-second processing pause.
    fn default() -> Self {
        SimulatedProcessor::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn authorize(&self, request: &PaymentRequest) -> PaymentOutcome {
        debug!(total = %request.total_price, "simulating payment processing");
        tokio::time::sleep(self.delay).await;
        PaymentOutcome::Approved
    }
}

// =============================================================================
// Wallet Request Documents
// =============================================================================

/// The card payment method descriptor shared by both wallet documents.
fn card_payment_method(with_tokenization: bool) -> Value {
    let mut method = json!({
        "type": "CARD",
        "parameters": {
            "allowedAuthMethods": ["PAN_ONLY", "CRYPTOGRAM_3DS"],
            "allowedCardNetworks": ["VISA", "MASTERCARD"],
        },
    });

    if with_tokenization {
        method["tokenizationSpecification"] = json!({
            "type": "PAYMENT_GATEWAY",
            "parameters": {
                "gateway": "example",
                "gatewayMerchantId": "exampleMerchantId",
            },
        });
    }

    method
}

/// Builds the wallet payment-data request for a total.
///
/// Shape follows the Google Pay API v2 payment-data request: allowed card
/// methods, FINAL transaction info in [`CURRENCY_CODE`], and merchant info.
pub fn wallet_payment_request(total: Money) -> Value {
    json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "allowedPaymentMethods": [card_payment_method(true)],
        "transactionInfo": {
            "totalPrice": total.to_fixed_point(),
            "totalPriceStatus": "FINAL",
            "currencyCode": CURRENCY_CODE,
        },
        "merchantInfo": {
            "merchantName": MERCHANT_NAME,
        },
    })
}

/// Builds the wallet is-ready-to-pay probe document.
pub fn ready_to_pay_request() -> Value {
    json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "allowedPaymentMethods": [card_payment_method(false)],
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_request_fixed_point() {
        let req = PaymentRequest::for_total(Money::from_cents(2550));
        assert_eq!(req.total_price, "25.50");
        assert_eq!(req.currency_code, "USD");

        let req = PaymentRequest::for_total(Money::from_cents(5));
        assert_eq!(req.total_price, "0.05");
    }

    #[tokio::test]
    async fn test_simulated_processor_approves() {
        let processor = SimulatedProcessor::new(Duration::ZERO);
        let request = PaymentRequest::for_total(Money::from_cents(1000));
        assert_eq!(processor.authorize(&request).await, PaymentOutcome::Approved);
    }

    #[test]
    fn test_wallet_payment_request_shape() {
        let doc = wallet_payment_request(Money::from_cents(2550));

        assert_eq!(doc["apiVersion"], 2);
        assert_eq!(doc["apiVersionMinor"], 0);
        assert_eq!(doc["transactionInfo"]["totalPrice"], "25.50");
        assert_eq!(doc["transactionInfo"]["totalPriceStatus"], "FINAL");
        assert_eq!(doc["transactionInfo"]["currencyCode"], "USD");
        assert_eq!(doc["merchantInfo"]["merchantName"], MERCHANT_NAME);

        let method = &doc["allowedPaymentMethods"][0];
        assert_eq!(method["type"], "CARD");
        assert_eq!(
            method["parameters"]["allowedCardNetworks"],
            json!(["VISA", "MASTERCARD"])
        );
        assert_eq!(
            method["tokenizationSpecification"]["type"],
            "PAYMENT_GATEWAY"
        );
    }

    #[test]
    fn test_ready_to_pay_request_has_no_tokenization() {
        let doc = ready_to_pay_request();
        let method = &doc["allowedPaymentMethods"][0];
        assert_eq!(method["type"], "CARD");
        assert!(method.get("tokenizationSpecification").is_none());
    }
}
