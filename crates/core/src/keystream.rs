//! Numeric keystreams.
//!
//! A keystream adds key values to a stream of numbers modulo some `M`
//! (encryption) or subtracts them (decryption).
//!
//! # Modes
//!
//! - **Static**: the key repeats, `out[i] = in[i] ± key[i mod L]`.
//! - **Chain addition**: the key is a window of `L` values. Each step uses
//!   the front value, then drops it and appends the ciphertext value of
//!   that step. Decryption sees the ciphertext as its input, so both
//!   directions replay the same window. The first `L` steps match the
//!   static mode.
//!
//! Chain addition is a left fold over the stream carrying the window; the
//! final window is available from [`Keystream::apply_traced`].

use crate::error::{Error, Result};
use crate::square::Coord;
use std::collections::VecDeque;
use std::fmt;

/// Direction of a cipher run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypt"),
            Direction::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// How the key evolves along the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeystreamMode {
    #[default]
    Static,
    ChainAddition,
}

impl KeystreamMode {
    pub fn from_chain_flag(use_chain_addition: bool) -> Self {
        if use_chain_addition {
            KeystreamMode::ChainAddition
        } else {
            KeystreamMode::Static
        }
    }
}

/// A key and the rule for consuming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystream {
    key: Vec<u32>,
    mode: KeystreamMode,
}

impl Keystream {
    /// # Errors
    /// `EmptyInput` if `key` is empty.
    pub fn new(key: Vec<u32>, mode: KeystreamMode) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::EmptyInput { what: "numeric key" });
        }
        Ok(Self { key, mode })
    }

    /// Key from a string of decimal digits. Whitespace is ignored.
    ///
    /// # Errors
    /// - `InvalidKey` for any other non-digit character
    /// - `EmptyInput` if no digits remain
    pub fn from_digits(key: &str, mode: KeystreamMode) -> Result<Self> {
        Self::new(parse_numeric_key(key)?, mode)
    }

    pub fn key(&self) -> &[u32] {
        &self.key
    }

    pub fn mode(&self) -> KeystreamMode {
        self.mode
    }

    /// Add (encrypt) or subtract (decrypt) the keystream modulo `modulus`.
    ///
    /// Input values are expected to lie in `0..modulus`.
    pub fn apply(&self, values: &[u32], modulus: u32, direction: Direction) -> Vec<u32> {
        self.apply_traced(values, modulus, direction).0
    }

    /// Like [`apply`](Self::apply), also returning the key state after the
    /// last step.
    pub fn apply_traced(
        &self,
        values: &[u32],
        modulus: u32,
        direction: Direction,
    ) -> (Vec<u32>, Vec<u32>) {
        match self.mode {
            KeystreamMode::Static => {
                let out = values
                    .iter()
                    .zip(self.key.iter().cycle())
                    .map(|(&v, &k)| combine(v, k, modulus, direction))
                    .collect();
                (out, self.key.clone())
            }
            KeystreamMode::ChainAddition => {
                let window: VecDeque<u32> = self.key.iter().map(|&k| k % modulus).collect();
                let (out, window) = values.iter().fold(
                    (Vec::with_capacity(values.len()), window),
                    |(mut out, mut window), &v| {
                        let k = window.pop_front().unwrap_or(0);
                        let result = combine(v, k, modulus, direction);
                        window.push_back(match direction {
                            Direction::Encrypt => result,
                            Direction::Decrypt => v,
                        });
                        out.push(result);
                        (out, window)
                    },
                );
                (out, window.into_iter().collect())
            }
        }
    }

    /// Nihilist coordinate addition on a `size`×`size` grid.
    ///
    /// Row and column are shifted independently by the same key value using
    /// one-based arithmetic, `((c - 1 ± k) mod size) + 1`. Coordinates here
    /// are zero-based, which is the same mapping. Only the static mode
    /// applies.
    pub fn apply_coordinates(
        &self,
        coords: &[Coord],
        size: usize,
        direction: Direction,
    ) -> Vec<Coord> {
        let size = size as i64;
        let shift = |c: usize, k: u32| {
            let one_based = c as i64 + 1;
            let k = match direction {
                Direction::Encrypt => k as i64,
                Direction::Decrypt => -(k as i64),
            };
            let shifted = (one_based - 1 + k).rem_euclid(size) + 1;
            (shifted - 1) as usize
        };

        coords
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(c, &k)| Coord::new(shift(c.row, k), shift(c.col, k)))
            .collect()
    }
}

fn combine(value: u32, key: u32, modulus: u32, direction: Direction) -> u32 {
    let key = key % modulus;
    match direction {
        Direction::Encrypt => (value + key) % modulus,
        Direction::Decrypt => (value + modulus - key) % modulus,
    }
}

/// Digits of a numeric key. Whitespace is skipped.
///
/// # Errors
/// - `InvalidKey` at the first character that is neither digit nor whitespace
/// - `EmptyInput` if no digits remain
pub fn parse_numeric_key(key: &str) -> Result<Vec<u32>> {
    let mut digits = Vec::with_capacity(key.len());
    for (position, c) in key.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        let digit = c
            .to_digit(10)
            .ok_or(Error::InvalidKey { symbol: c, position })?;
        digits.push(digit);
    }
    if digits.is_empty() {
        return Err(Error::EmptyInput { what: "numeric key" });
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_mod_10() {
        let ks = Keystream::from_digits("123", KeystreamMode::Static).unwrap();
        let out = ks.apply(&[9, 9, 9, 0], 10, Direction::Encrypt);
        assert_eq!(out, vec![0, 1, 2, 1]);
        assert_eq!(ks.apply(&out, 10, Direction::Decrypt), vec![9, 9, 9, 0]);
    }

    #[test]
    fn test_chain_first_block_matches_static() {
        let values = [4, 8, 15, 16, 23, 30, 7, 1];
        let stat = Keystream::from_digits("12345", KeystreamMode::Static).unwrap();
        let chain = Keystream::from_digits("12345", KeystreamMode::ChainAddition).unwrap();

        let a = stat.apply(&values, 36, Direction::Encrypt);
        let b = chain.apply(&values, 36, Direction::Encrypt);
        assert_eq!(a[..5], b[..5]);
        // position 5 uses the first ciphertext value (4 + 1 = 5) instead of 1
        assert_eq!(b[5], (30 + 5) % 36);
        assert_ne!(a[5], b[5]);
    }

    #[test]
    fn test_chain_round_trip() {
        let values: Vec<u32> = (0..40).map(|i| (i * 7 + 3) % 36).collect();
        let chain = Keystream::from_digits("907", KeystreamMode::ChainAddition).unwrap();
        let encrypted = chain.apply(&values, 36, Direction::Encrypt);
        assert_eq!(chain.apply(&encrypted, 36, Direction::Decrypt), values);
    }

    #[test]
    fn test_chain_final_key_matches_both_directions() {
        let values = [1, 2, 3, 4, 5, 6, 7];
        let chain = Keystream::from_digits("55", KeystreamMode::ChainAddition).unwrap();
        let (encrypted, key_after_encrypt) = chain.apply_traced(&values, 10, Direction::Encrypt);
        let (_, key_after_decrypt) = chain.apply_traced(&encrypted, 10, Direction::Decrypt);
        assert_eq!(key_after_encrypt, key_after_decrypt);
        assert_eq!(key_after_encrypt, encrypted[5..].to_vec());
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(
            Keystream::new(Vec::new(), KeystreamMode::Static),
            Err(Error::EmptyInput { what: "numeric key" })
        );
        assert!(matches!(
            Keystream::from_digits("  ", KeystreamMode::Static),
            Err(Error::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_numeric_key_parsing() {
        assert_eq!(parse_numeric_key("12 34").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(
            parse_numeric_key("12a4"),
            Err(Error::InvalidKey {
                symbol: 'a',
                position: 2
            })
        );
    }

    #[test]
    fn test_coordinate_addition() {
        let ks = Keystream::from_digits("3", KeystreamMode::Static).unwrap();
        // one-based (4, 5) + 3 on a 5×5 grid -> (2, 3)
        let coords = [Coord::new(3, 4)];
        let out = ks.apply_coordinates(&coords, 5, Direction::Encrypt);
        assert_eq!(out, vec![Coord::new(1, 2)]);
        assert_eq!(ks.apply_coordinates(&out, 5, Direction::Decrypt), coords);
    }

    #[test]
    fn test_coordinate_addition_large_key() {
        let ks = Keystream::new(vec![26, 0, 13], KeystreamMode::Static).unwrap();
        let coords = [Coord::new(0, 0), Coord::new(4, 2), Coord::new(2, 2)];
        let out = ks.apply_coordinates(&coords, 5, Direction::Encrypt);
        assert_eq!(out[0], Coord::new(1, 1));
        assert_eq!(out[1], Coord::new(4, 2));
        assert_eq!(ks.apply_coordinates(&out, 5, Direction::Decrypt), coords);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Encrypt.to_string(), "encrypt");
        assert_eq!(Direction::Decrypt.to_string(), "decrypt");
    }
}
