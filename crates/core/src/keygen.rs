//! Random key generation.
//!
//! Every generator takes the random source as an argument; nothing here
//! touches a global RNG. Use [`seeded_rng`] for reproducible keys.
//!
//! # Design
//!
//! - Numeric keys draw decimal digits uniformly
//! - Alphabetic keys draw uppercase `A`-`Z` uniformly
//! - Keys sized to a text match its count of processable symbols

use crate::alphabet::Alphabet;
use crate::config::KeyType;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIGITS: &[u8] = b"0123456789";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of each generated VIC key
pub const VIC_KEY_LENGTH: usize = 6;

/// Deterministic RNG for a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate a random key.
///
/// # Arguments
/// - `rng`: random source
/// - `length`: number of key symbols
/// - `key_type`: digits or uppercase letters
///
/// # Errors
/// `Config` if `length` is zero.
pub fn generate_random_key<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    key_type: KeyType,
) -> Result<String> {
    check_length(length)?;
    let pool = match key_type {
        KeyType::Numeric => DIGITS,
        KeyType::Alphabetic => UPPERCASE,
    };
    Ok((0..length)
        .map(|_| char::from(pool[rng.gen_range(0..pool.len())]))
        .collect())
}

/// Generate a random key drawn from the symbols of `alphabet`.
///
/// # Errors
/// `Config` if `length` is zero.
pub fn generate_key_from<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    alphabet: &Alphabet,
) -> Result<String> {
    check_length(length)?;
    let symbols = alphabet.symbols();
    Ok((0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect())
}

/// Generate a key as long as the processable part of `text`.
///
/// Characters of `text` that `alphabet` does not recognise are not counted.
///
/// # Errors
/// `EmptyInput` if `text` has no processable symbols.
pub fn generate_key_for_text<R: Rng + ?Sized>(
    rng: &mut R,
    text: &str,
    key_type: KeyType,
    alphabet: &Alphabet,
) -> Result<String> {
    let length = text.chars().filter(|&c| alphabet.normalize(c).is_some()).count();
    if length == 0 {
        return Err(Error::EmptyInput { what: "text" });
    }
    generate_random_key(rng, length, key_type)
}

fn check_length(length: usize) -> Result<()> {
    if length == 0 {
        return Err(Error::Config("key length must be positive".to_string()));
    }
    Ok(())
}

/// The four keys of a VIC run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VicKeys {
    pub polybius_key: String,
    pub checkerboard_key: String,
    pub transposition_key: String,
    pub numeric_key: String,
}

impl VicKeys {
    /// Three alphabetic keys and one numeric key, six symbols each.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            polybius_key: generate_random_key(rng, VIC_KEY_LENGTH, KeyType::Alphabetic)?,
            checkerboard_key: generate_random_key(rng, VIC_KEY_LENGTH, KeyType::Alphabetic)?,
            transposition_key: generate_random_key(rng, VIC_KEY_LENGTH, KeyType::Alphabetic)?,
            numeric_key: generate_random_key(rng, VIC_KEY_LENGTH, KeyType::Numeric)?,
        })
    }

    /// Reproducible keys for a seed.
    pub fn from_seed(seed: u64) -> Result<Self> {
        Self::generate(&mut seeded_rng(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Language;

    #[test]
    fn test_numeric_key() {
        let mut rng = seeded_rng(42);
        let key = generate_random_key(&mut rng, 12, KeyType::Numeric).unwrap();
        assert_eq!(key.len(), 12);
        assert!(key.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_alphabetic_key() {
        let mut rng = seeded_rng(7);
        let key = generate_random_key(&mut rng, 20, KeyType::Alphabetic).unwrap();
        assert_eq!(key.len(), 20);
        assert!(key.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_determinism() {
        let key1 = generate_random_key(&mut seeded_rng(12345), 32, KeyType::Numeric).unwrap();
        let key2 = generate_random_key(&mut seeded_rng(12345), 32, KeyType::Numeric).unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_different_seeds() {
        let key1 = generate_random_key(&mut seeded_rng(1), 32, KeyType::Alphabetic).unwrap();
        let key2 = generate_random_key(&mut seeded_rng(2), 32, KeyType::Alphabetic).unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = generate_random_key(&mut seeded_rng(0), 0, KeyType::Numeric);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_key_from_alphabet() {
        let alphabet = Alphabet::letters(Language::Turkish);
        let key = generate_key_from(&mut seeded_rng(3), 50, &alphabet).unwrap();
        assert_eq!(key.chars().count(), 50);
        assert!(key.chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn test_key_for_text_counts_processable() {
        let alphabet = Alphabet::letters(Language::English);
        let key = generate_key_for_text(
            &mut seeded_rng(9),
            "Attack at dawn!",
            KeyType::Numeric,
            &alphabet,
        )
        .unwrap();
        assert_eq!(key.len(), 12);
    }

    #[test]
    fn test_key_for_text_without_symbols() {
        let alphabet = Alphabet::letters(Language::English);
        let result =
            generate_key_for_text(&mut seeded_rng(9), "123 !", KeyType::Numeric, &alphabet);
        assert_eq!(result, Err(Error::EmptyInput { what: "text" }));
    }

    #[test]
    fn test_vic_keys() {
        let keys = VicKeys::from_seed(2024).unwrap();
        assert_eq!(keys.polybius_key.len(), VIC_KEY_LENGTH);
        assert!(keys.numeric_key.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(keys, VicKeys::from_seed(2024).unwrap());
    }
}
