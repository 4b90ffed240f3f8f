//! # Card Validation
//!
//! Structural card checks: Luhn checksum, network detection, expiry and
//! CVV validity.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Card Field Dependencies                            │
//! │                                                                         │
//! │  card number ──► Luhn check ────────────────► card_number_error         │
//! │       │                                                                 │
//! │       └──► network detection ──► CVV length rule ──► cvv_error          │
//! │                                                                         │
//! │  expiry ──► MM/YY parse ──► month range ──► not-in-the-past check       │
//! │                                                                         │
//! │  Changing the card number therefore cascades into CVV re-validation:    │
//! │  an AMEX code is 4 digits, everything else is 3.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These checks are structural only. They say a number *could* be a card,
//! never that it charges.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

// =============================================================================
// Card Network
// =============================================================================

/// Card network detected from the number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    #[default]
    Unknown,
}

impl CardNetwork {
    /// Detects the network from a (possibly space-grouped) card number.
    ///
    /// ## Prefix Rules
    /// - `4…` → Visa
    /// - `51…`–`55…`, or a three-digit prefix in 222–279 → Mastercard
    ///   (the 2-series ranges introduced in 2017)
    /// - `34…` / `37…` → Amex
    /// - anything else → Unknown
    ///
    /// ## Example
    /// ```rust
    /// use weft_core::card::CardNetwork;
    ///
    /// assert_eq!(CardNetwork::detect("4111 1111 1111 1111"), CardNetwork::Visa);
    /// assert_eq!(CardNetwork::detect("5500000000000004"), CardNetwork::Mastercard);
    /// assert_eq!(CardNetwork::detect("2221000000000009"), CardNetwork::Mastercard);
    /// assert_eq!(CardNetwork::detect("341111111111111"), CardNetwork::Amex);
    /// assert_eq!(CardNetwork::detect("6011000000000000"), CardNetwork::Unknown);
    /// ```
    pub fn detect(card_number: &str) -> Self {
        let cleaned: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = cleaned.as_bytes();

        if bytes.first() == Some(&b'4') {
            return CardNetwork::Visa;
        }

        if is_mastercard_prefix(bytes) {
            return CardNetwork::Mastercard;
        }

        if cleaned.starts_with("34") || cleaned.starts_with("37") {
            return CardNetwork::Amex;
        }

        CardNetwork::Unknown
    }

    /// Required CVV length for this network, if the network is known.
    pub const fn cvv_length(&self) -> Option<usize> {
        match self {
            CardNetwork::Amex => Some(4),
            CardNetwork::Visa | CardNetwork::Mastercard => Some(3),
            CardNetwork::Unknown => None,
        }
    }
}

/// Checks the Mastercard prefix rules: `5[1-5]` or a 222-279 three-digit
/// prefix.
fn is_mastercard_prefix(bytes: &[u8]) -> bool {
    if bytes.len() >= 2 && bytes[0] == b'5' && (b'1'..=b'5').contains(&bytes[1]) {
        return true;
    }

    if bytes.len() >= 3 && bytes[..3].iter().all(u8::is_ascii_digit) {
        let prefix = (bytes[0] - b'0') as u16 * 100
            + (bytes[1] - b'0') as u16 * 10
            + (bytes[2] - b'0') as u16;
        return (222..=279).contains(&prefix);
    }

    false
}

// =============================================================================
// Luhn Check
// =============================================================================

/// Validates a card number with the Luhn checksum.
///
/// Spaces are stripped first. The remaining string must be 13-19 digits
/// (and nothing but digits); from the least-significant end, every second
/// digit is doubled, with 9 subtracted when the doubled value exceeds 9.
/// Valid iff the digit sum is divisible by 10.
///
/// ## Example
/// ```rust
/// use weft_core::card::is_valid_card_number;
///
/// assert!(is_valid_card_number("4532 0151 1283 0366"));
/// assert!(!is_valid_card_number("1234 5678 1234 5678"));
/// ```
pub fn is_valid_card_number(card_number: &str) -> bool {
    let cleaned: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() < 13 || cleaned.len() > 19 {
        return false;
    }

    let mut sum = 0u32;
    let mut alternate = false;
    for c in cleaned.chars().rev() {
        let mut n = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        if alternate {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        sum += n;
        alternate = !alternate;
    }

    sum % 10 == 0
}

// =============================================================================
// Expiry Check
// =============================================================================

/// Validates a formatted `MM/YY` expiry against an injected current month.
///
/// Fails unless the string splits on `/` into exactly two numeric parts
/// with the month in 1-12. Valid iff the two-digit year is strictly greater
/// than `current_year`, or equal with the month ≥ `current_month`.
///
/// Two-digit years carry no century anchor; comparisons are only meaningful
/// while the operating window stays inside one century.
pub fn is_expiry_valid_at(expiry: &str, current_year: u32, current_month: u32) -> bool {
    let mut parts = expiry.split('/');
    let (month, year) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(y), None) => {
            match (m.parse::<u32>(), y.parse::<u32>()) {
                (Ok(m), Ok(y)) => (m, y),
                _ => return false,
            }
        }
        _ => return false,
    };

    if !(1..=12).contains(&month) {
        return false;
    }

    year > current_year || (year == current_year && month >= current_month)
}

/// Validates a formatted `MM/YY` expiry against the wall clock.
///
/// Thin wrapper over [`is_expiry_valid_at`] using the device-local date,
/// matching what the shopper reads off the card.
pub fn is_expiry_valid(expiry: &str) -> bool {
    let now = Local::now();
    is_expiry_valid_at(expiry, now.year() as u32 % 100, now.month())
}

// =============================================================================
// CVV Check
// =============================================================================

/// Validates a CVV against the detected card network.
///
/// Exactly 4 digits for Amex, exactly 3 for Visa/Mastercard. An unknown
/// network is always invalid regardless of length.
///
/// ## Example
/// ```rust
/// use weft_core::card::{is_cvv_valid, CardNetwork};
///
/// assert!(is_cvv_valid("123", CardNetwork::Visa));
/// assert!(is_cvv_valid("1234", CardNetwork::Amex));
/// assert!(!is_cvv_valid("123", CardNetwork::Unknown));
/// ```
pub fn is_cvv_valid(cvv: &str, network: CardNetwork) -> bool {
    match network.cvv_length() {
        Some(len) => cvv.len() == len && cvv.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_accepts_known_valid_numbers() {
        assert!(is_valid_card_number("4532015112830366"));
        assert!(is_valid_card_number("4532 0151 1283 0366"));
        assert!(is_valid_card_number("4111111111111111"));
        assert!(is_valid_card_number("371449635398431")); // 15-digit Amex
    }

    #[test]
    fn test_luhn_rejects_bad_numbers() {
        assert!(!is_valid_card_number("1234567812345678"));
        assert!(!is_valid_card_number("4532015112830367")); // checksum off by one
        assert!(!is_valid_card_number("411111111111")); // 12 digits, too short
        assert!(!is_valid_card_number("41111111111111111111")); // 20 digits
        assert!(!is_valid_card_number(""));
        assert!(!is_valid_card_number("4111 1111 1111 111a"));
    }

    #[test]
    fn test_network_detection() {
        assert_eq!(CardNetwork::detect("4111111111111111"), CardNetwork::Visa);
        assert_eq!(CardNetwork::detect("4"), CardNetwork::Visa);
        assert_eq!(
            CardNetwork::detect("5111111111111118"),
            CardNetwork::Mastercard
        );
        assert_eq!(
            CardNetwork::detect("5555 5555 5555 4444"),
            CardNetwork::Mastercard
        );
        assert_eq!(CardNetwork::detect("341111111111111"), CardNetwork::Amex);
        assert_eq!(CardNetwork::detect("371449635398431"), CardNetwork::Amex);
        assert_eq!(
            CardNetwork::detect("6011000000000000"),
            CardNetwork::Unknown
        );
        assert_eq!(CardNetwork::detect(""), CardNetwork::Unknown);
    }

    #[test]
    fn test_mastercard_two_series_boundaries() {
        assert_eq!(CardNetwork::detect("2220000000000000"), CardNetwork::Mastercard);
        assert_eq!(CardNetwork::detect("2221000000000009"), CardNetwork::Mastercard);
        assert_eq!(CardNetwork::detect("2720990000000007"), CardNetwork::Mastercard);
        // outside 222-279
        assert_eq!(CardNetwork::detect("2120000000000000"), CardNetwork::Unknown);
        assert_eq!(CardNetwork::detect("2800000000000000"), CardNetwork::Unknown);
        // too short to match the three-digit rule
        assert_eq!(CardNetwork::detect("22"), CardNetwork::Unknown);
        assert_eq!(CardNetwork::detect("56"), CardNetwork::Unknown);
    }

    #[test]
    fn test_expiry_parse_failures() {
        assert!(!is_expiry_valid_at("", 25, 6));
        assert!(!is_expiry_valid_at("12", 25, 6));
        assert!(!is_expiry_valid_at("12/", 25, 6));
        assert!(!is_expiry_valid_at("ab/cd", 25, 6));
        assert!(!is_expiry_valid_at("12/34/56", 25, 6));
    }

    #[test]
    fn test_expiry_month_range() {
        assert!(!is_expiry_valid_at("00/99", 25, 6));
        assert!(!is_expiry_valid_at("13/99", 25, 6));
        assert!(is_expiry_valid_at("01/99", 25, 6));
        assert!(is_expiry_valid_at("12/99", 25, 6));
    }

    #[test]
    fn test_expiry_not_in_the_past() {
        // current month: June 2025 (two-digit)
        assert!(is_expiry_valid_at("06/25", 25, 6)); // same month still valid
        assert!(is_expiry_valid_at("07/25", 25, 6));
        assert!(is_expiry_valid_at("01/26", 25, 6));
        assert!(!is_expiry_valid_at("05/25", 25, 6));
        assert!(!is_expiry_valid_at("12/24", 25, 6));
    }

    #[test]
    fn test_cvv_length_by_network() {
        assert!(is_cvv_valid("123", CardNetwork::Visa));
        assert!(is_cvv_valid("123", CardNetwork::Mastercard));
        assert!(!is_cvv_valid("1234", CardNetwork::Visa));
        assert!(!is_cvv_valid("12", CardNetwork::Mastercard));

        assert!(is_cvv_valid("1234", CardNetwork::Amex));
        assert!(!is_cvv_valid("123", CardNetwork::Amex));

        // unknown network never validates, whatever the length
        assert!(!is_cvv_valid("123", CardNetwork::Unknown));
        assert!(!is_cvv_valid("1234", CardNetwork::Unknown));
    }
}
