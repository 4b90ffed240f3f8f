//! # Confirmation Codes
//!
//! Order confirmation code generation.
//!
//! The RNG is always supplied by the caller: the session layer passes
//! `rand::thread_rng()`, tests pass a seeded `StdRng`. That keeps this
//! crate deterministic under test while the production path stays random.
//!
//! Codes are display identifiers for a confirmation screen, not an
//! order-uniqueness guarantee; the RNG is deliberately not a CSPRNG.

use rand::Rng;

/// Length of a confirmation code.
pub const CONFIRMATION_CODE_LEN: usize = 10;

/// The 36-symbol confirmation alphabet.
pub const CONFIRMATION_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a confirmation code: 10 characters drawn uniformly and
/// independently from A-Z0-9.
///
/// ## Example
/// ```rust
/// use rand::SeedableRng;
/// use weft_core::confirmation::confirmation_code;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let code = confirmation_code(&mut rng);
/// assert_eq!(code.len(), 10);
/// ```
pub fn confirmation_code<R: Rng>(rng: &mut R) -> String {
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| CONFIRMATION_ALPHABET[rng.gen_range(0..CONFIRMATION_ALPHABET.len())] as char)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_code_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let code = confirmation_code(&mut rng);
            assert_eq!(code.len(), CONFIRMATION_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_is_deterministic_for_a_seed() {
        let a = confirmation_code(&mut StdRng::seed_from_u64(7));
        let b = confirmation_code(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_codes_differ_across_draws() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = confirmation_code(&mut rng);
        let b = confirmation_code(&mut rng);
        assert_ne!(a, b);
    }
}
