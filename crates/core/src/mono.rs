//! Monoalphabetic bijections over an ordered alphabet.
//!
//! A bijection permutes the symbols of an alphabet. Squares and
//! checkerboards use the permuted order as their fill order, so a Caesar
//! shift or an affine map can seed a Polybius square.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

/// A permutation of an alphabet's symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bijection {
    /// Original order
    Identity,

    /// Rotate left by `n` positions (negative rotates right)
    Shift(i64),

    /// Reverse the order (Atbash)
    Reversal,

    /// Position `i` receives the symbol at `(a * i + b) mod len`
    Affine { a: i64, b: i64 },

    /// Keyword's unique symbols first, then the remaining symbols in order
    Keyword(String),
}

impl Bijection {
    /// Apply the bijection, returning the permuted symbol order.
    ///
    /// # Errors
    /// - `NonInvertibleParameter` if an affine multiplier shares a factor
    ///   with the alphabet length
    /// - `MissingParameter` for a keyword bijection with no usable symbols
    pub fn apply(&self, alphabet: &Alphabet) -> Result<Vec<char>> {
        let symbols = alphabet.symbols();
        let m = symbols.len() as i64;

        match self {
            Bijection::Identity => Ok(symbols.to_vec()),
            Bijection::Shift(n) => Ok((0..m)
                .map(|i| symbols[(i + n).rem_euclid(m) as usize])
                .collect()),
            Bijection::Reversal => Ok(symbols.iter().rev().copied().collect()),
            Bijection::Affine { a, b } => {
                if gcd(a.rem_euclid(m), m) != 1 {
                    return Err(Error::NonInvertibleParameter {
                        a: *a,
                        modulus: symbols.len(),
                    });
                }
                Ok((0..m)
                    .map(|i| symbols[(a * i + b).rem_euclid(m) as usize])
                    .collect())
            }
            Bijection::Keyword(keyword) => {
                if !keyword.chars().any(|c| alphabet.normalize(c).is_some()) {
                    return Err(Error::MissingParameter {
                        strategy: "keyword",
                        parameter: "keyword",
                    });
                }
                Ok(keyword_order(keyword, symbols, |c| alphabet.normalize(c)))
            }
        }
    }
}

/// Keyword ordering: unique keyword symbols in first-seen order, then the
/// rest of `symbols` in their original order. Keyword characters that
/// `normalize` rejects are skipped.
pub fn keyword_order(
    keyword: &str,
    symbols: &[char],
    normalize: impl Fn(char) -> Option<char>,
) -> Vec<char> {
    let mut ordered: Vec<char> = Vec::with_capacity(symbols.len());
    for c in keyword.chars().filter_map(&normalize) {
        if !ordered.contains(&c) {
            ordered.push(c);
        }
    }
    for &c in symbols {
        if !ordered.contains(&c) {
            ordered.push(c);
        }
    }
    ordered
}

/// Greatest common divisor of two non-negative integers.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Language;

    fn english() -> Alphabet {
        Alphabet::letters(Language::English)
    }

    fn as_string(symbols: Vec<char>) -> String {
        symbols.into_iter().collect()
    }

    #[test]
    fn test_identity() {
        let out = Bijection::Identity.apply(&english()).unwrap();
        assert_eq!(as_string(out), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_shift() {
        let out = Bijection::Shift(3).apply(&english()).unwrap();
        assert_eq!(as_string(out), "defghijklmnopqrstuvwxyzabc");
    }

    #[test]
    fn test_negative_shift_wraps() {
        let out = Bijection::Shift(-1).apply(&english()).unwrap();
        assert_eq!(as_string(out), "zabcdefghijklmnopqrstuvwxy");
    }

    #[test]
    fn test_reversal() {
        let out = Bijection::Reversal.apply(&english()).unwrap();
        assert_eq!(as_string(out), "zyxwvutsrqponmlkjihgfedcba");
    }

    #[test]
    fn test_affine() {
        let out = Bijection::Affine { a: 5, b: 8 }.apply(&english()).unwrap();
        // i=0 -> 8 (i), i=1 -> 13 (n), i=2 -> 18 (s)
        assert_eq!(&as_string(out)[..3], "ins");
    }

    #[test]
    fn test_affine_is_permutation() {
        let mut out = Bijection::Affine { a: 7, b: 3 }.apply(&english()).unwrap();
        out.sort_unstable();
        assert_eq!(as_string(out), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_affine_non_invertible() {
        let result = Bijection::Affine { a: 2, b: 1 }.apply(&english());
        assert_eq!(
            result,
            Err(Error::NonInvertibleParameter { a: 2, modulus: 26 })
        );
    }

    #[test]
    fn test_affine_non_invertible_composite() {
        let alphabet = Alphabet::composite(Language::English);
        let result = Bijection::Affine { a: 3, b: 0 }.apply(&alphabet);
        assert!(matches!(
            result,
            Err(Error::NonInvertibleParameter { a: 3, modulus: 36 })
        ));
    }

    #[test]
    fn test_keyword() {
        let out = Bijection::Keyword("Secret".to_string())
            .apply(&english())
            .unwrap();
        assert_eq!(as_string(out), "secrtabdfghijklmnopquvwxyz");
    }

    #[test]
    fn test_keyword_without_usable_symbols() {
        let result = Bijection::Keyword("123".to_string()).apply(&english());
        assert!(matches!(result, Err(Error::MissingParameter { .. })));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(5, 26), 1);
        assert_eq!(gcd(0, 7), 7);
    }
}
