//! # Session Error Types
//!
//! Failure taxonomy for the session layer:
//!
//! 1. **Per-field validation** — boolean flags on the checkout form,
//!    surfaced inline, never fatal, recomputed continuously. Those are NOT
//!    errors here.
//! 2. **External-call failures** — geocoding failures are swallowed (the
//!    city/state fields just stay put); payment failures surface as
//!    [`SessionError`] variants the UI can retry from.
//! 3. **Storage reads** — absent keys default to blank/false and never
//!    produce an error.
//!
//! Nothing in this crate is fatal to the process; every failure state is
//! recoverable by user retry or re-navigation.

use thiserror::Error;

/// Session-level errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login or password-change credential mismatch.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required account field was blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// No profile is loaded for a profile-mutating operation.
    #[error("no user profile loaded")]
    NoProfile,

    /// Checkout was attempted while the form still has errors.
    #[error("checkout form is incomplete or invalid")]
    InvalidForm,

    /// The shopper backed out of the payment sheet.
    #[error("payment was cancelled")]
    PaymentCancelled,

    /// The payment processor declined or errored.
    #[error("payment failed: {message}")]
    PaymentFailed { message: String },

    /// Core invariant violation (e.g. a bad catalog price).
    #[error(transparent)]
    Validation(#[from] weft_core::ValidationError),
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SessionError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            SessionError::MissingField { field: "email" }.to_string(),
            "email is required"
        );
        assert_eq!(
            SessionError::PaymentFailed {
                message: "card declined".to_string()
            }
            .to_string(),
            "payment failed: card declined"
        );
    }
}
