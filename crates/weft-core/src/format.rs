//! # Input Formatters
//!
//! Pure string-transform functions that turn raw keyboard input into the
//! masked display strings the payment form shows.
//!
//! ## Formatting Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Formatter Contract                                 │
//! │                                                                         │
//! │  raw input ──► strip non-digits ──► cap length ──► insert punctuation   │
//! │                                                                         │
//! │  • Pure and deterministic: same input, same output, no hidden state     │
//! │  • Cursor policy: the caller repositions the cursor to the END of the   │
//! │    formatted output after any edit (no mid-string cursor preservation)  │
//! │  • Formatters mask, validators judge: a formatted value can still be    │
//! │    invalid (see the card module)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::card::CardNetwork;

/// Maximum number of card-number digits the form accepts.
pub const CARD_NUMBER_MAX_DIGITS: usize = 16;

/// Number of digits in a US phone number.
pub const PHONE_DIGITS: usize = 10;

/// Keeps only ASCII digits from the input.
fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a card number into space-separated groups of four digits.
///
/// Strips non-digits, caps at 16 digits, groups into chunks of 4 separated
/// by a single space.
///
/// ## Example
/// ```rust
/// use weft_core::format::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("4111-1111 11"), "4111 1111 11");
/// ```
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = digits(input).chars().take(CARD_NUMBER_MAX_DIGITS).collect();

    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats an expiry date as `MM/YY`.
///
/// Strips non-digits and caps at 4. The slash appears once at least three
/// digits are present; below that the raw digits show as-is, so the user
/// can still backspace past the separator.
///
/// ## Example
/// ```rust
/// use weft_core::format::format_expiry_date;
///
/// assert_eq!(format_expiry_date("1"), "1");
/// assert_eq!(format_expiry_date("12"), "12");
/// assert_eq!(format_expiry_date("123"), "12/3");
/// assert_eq!(format_expiry_date("12/34"), "12/34");
/// ```
pub fn format_expiry_date(input: &str) -> String {
    let digits: String = digits(input).chars().take(4).collect();

    if digits.len() >= 3 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Formats a CVV, capping the length by card network.
///
/// AMEX card codes are 4 digits; every other network gets 3.
pub fn format_cvv(input: &str, network: CardNetwork) -> String {
    let cap = if network == CardNetwork::Amex { 4 } else { 3 };
    digits(input).chars().take(cap).collect()
}

/// Formats a phone number with progressive US-style punctuation.
///
/// Strips non-digits and truncates to the first 10, then wraps:
/// `(DDD`, `(DDD) DDD`, `(DDD) DDD-DDDD`.
///
/// ## Example
/// ```rust
/// use weft_core::format::format_phone_number;
///
/// assert_eq!(format_phone_number("512"), "(512");
/// assert_eq!(format_phone_number("512555"), "(512) 555");
/// assert_eq!(format_phone_number("5125551234"), "(512) 555-1234");
/// assert_eq!(format_phone_number("5125551234999"), "(512) 555-1234");
/// ```
pub fn format_phone_number(input: &str) -> String {
    let digits = digits(input);

    match digits.len() {
        0..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        7..=10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..10]),
    }
}

/// Counts the digits in an already-formatted value.
///
/// Used by the checkout form to judge phone completeness without caring
/// about the punctuation the mask added.
pub fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_grouping() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("4"), "4");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number("411111111"), "4111 1111 1");
        assert_eq!(
            format_card_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_card_number_strips_and_caps() {
        assert_eq!(format_card_number("4111-1111-1111"), "4111 1111 1111");
        // 20 digits in: only the first 16 survive
        assert_eq!(
            format_card_number("41111111111111112222"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_card_number_groups_for_all_lengths() {
        // every prefix groups into 4-digit chunks and never exceeds 16 digits
        let raw = "4111111111111111";
        for len in 0..=raw.len() {
            let formatted = format_card_number(&raw[..len]);
            assert!(digit_count(&formatted) <= CARD_NUMBER_MAX_DIGITS);
            for chunk in formatted.split(' ').filter(|c| !c.is_empty()) {
                assert!(chunk.len() <= 4);
                assert!(chunk.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_expiry_masking() {
        assert_eq!(format_expiry_date(""), "");
        assert_eq!(format_expiry_date("0"), "0");
        assert_eq!(format_expiry_date("08"), "08");
        assert_eq!(format_expiry_date("082"), "08/2");
        assert_eq!(format_expiry_date("0827"), "08/27");
        assert_eq!(format_expiry_date("08/27"), "08/27");
        assert_eq!(format_expiry_date("08279"), "08/27");
    }

    #[test]
    fn test_cvv_cap_by_network() {
        assert_eq!(format_cvv("12345", CardNetwork::Visa), "123");
        assert_eq!(format_cvv("12345", CardNetwork::Mastercard), "123");
        assert_eq!(format_cvv("12345", CardNetwork::Amex), "1234");
        assert_eq!(format_cvv("12345", CardNetwork::Unknown), "123");
        assert_eq!(format_cvv("1a2b3c4d", CardNetwork::Amex), "1234");
    }

    #[test]
    fn test_phone_progressive_mask() {
        // the opening paren appears as soon as typing starts
        assert_eq!(format_phone_number(""), "(");
        assert_eq!(format_phone_number("5"), "(5");
        assert_eq!(format_phone_number("512"), "(512");
        assert_eq!(format_phone_number("5125"), "(512) 5");
        assert_eq!(format_phone_number("512555"), "(512) 555");
        assert_eq!(format_phone_number("5125551"), "(512) 555-1");
        assert_eq!(format_phone_number("5125551234"), "(512) 555-1234");
    }

    #[test]
    fn test_phone_strips_and_truncates() {
        assert_eq!(format_phone_number("(512) 555-1234"), "(512) 555-1234");
        assert_eq!(format_phone_number("512-555-1234-99"), "(512) 555-1234");
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count("(512) 555-1234"), 10);
        assert_eq!(digit_count(""), 0);
    }
}
