//! Named ciphers wired on the composite pipeline.
//!
//! Each submodule builds a [`Pipeline`](crate::pipeline::Pipeline) for its
//! keys and options, prepares the input text, and renders the output
//! stream as a string.
//!
//! | Cipher | Stages |
//! |---|---|
//! | VIC | polybius substitute, pairs to digits, checkerboard decode, columnar ×N, alphabet keystream |
//! | ADFGVX | polybius substitute, columnar ×N |
//! | Nihilist | square coordinates, coordinate keystream, inverse square coordinates |
//! | Straddling | checkerboard encode, digit keystream |
//! | Bifid | square coordinates, fractionate, inverse square coordinates |
//! | Trifid | cube coordinates, fractionate, inverse cube coordinates |
//! | Rasterschlüssel 44 | square coordinates, coordinates to digits, optional columnar ×N |

pub mod adfgvx;
pub mod bifid;
pub mod nihilist;
pub mod rs44;
pub mod straddling;
pub mod trifid;
pub mod vic;

use crate::alphabet::{Alphabet, Language};
use crate::error::{Error, Result};

/// Keep the characters `normalize` maps to a symbol; drop the rest.
///
/// # Errors
/// `EmptyInput` naming `what` if nothing is left.
pub(crate) fn prepare_lenient(
    text: &str,
    what: &'static str,
    normalize: impl Fn(char) -> Option<char>,
) -> Result<Vec<char>> {
    let symbols: Vec<char> = text.chars().filter_map(normalize).collect();
    if symbols.is_empty() {
        return Err(Error::EmptyInput { what });
    }
    Ok(symbols)
}

/// Drop whitespace and map every other character through `normalize`;
/// a character with no symbol fails with `reject(char, index)`.
///
/// # Errors
/// - the error built by `reject`
/// - `EmptyInput` naming `what` if nothing is left
pub(crate) fn prepare_strict(
    text: &str,
    what: &'static str,
    normalize: impl Fn(char) -> Option<char>,
    reject: impl Fn(char, usize) -> Error,
) -> Result<Vec<char>> {
    let mut symbols = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        symbols.push(normalize(c).ok_or_else(|| reject(c, position))?);
    }
    if symbols.is_empty() {
        return Err(Error::EmptyInput { what });
    }
    Ok(symbols)
}

/// Decimal digits of `text`, skipping whitespace.
///
/// # Errors
/// - `MalformedCoordinateStream` at the first other character
/// - `EmptyInput` naming `what` if no digit is left
pub(crate) fn prepare_digits(text: &str, what: &'static str) -> Result<Vec<u8>> {
    let digits = prepare_strict(
        text,
        what,
        |c| c.is_ascii_digit().then_some(c),
        |symbol, position| Error::MalformedCoordinateStream {
            position,
            reason: format!("{:?} is not a decimal digit", symbol),
        },
    )?;
    Ok(digits
        .into_iter()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect())
}

/// Fail with `EmptyInput` if `key` is empty.
pub(crate) fn require_key(key: &str, what: &'static str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::EmptyInput { what });
    }
    Ok(())
}

/// Alphabet that fills a square exactly: English letters (5×5 with
/// `j` = `i`) or the 36-symbol Turkish alphabet (6×6).
pub(crate) fn complete_square_alphabet(language: Language) -> Alphabet {
    match language {
        Language::English => Alphabet::letters(Language::English),
        Language::Turkish => Alphabet::composite(Language::Turkish),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_lenient_skips_unknown() {
        let alphabet = Alphabet::letters(Language::English);
        let symbols =
            prepare_lenient("Hi, there!", "plaintext", |c| alphabet.normalize(c)).unwrap();
        assert_eq!(symbols.iter().collect::<String>(), "hithere");
    }

    #[test]
    fn test_prepare_lenient_empty() {
        let alphabet = Alphabet::letters(Language::English);
        assert_eq!(
            prepare_lenient("123", "plaintext", |c| alphabet.normalize(c)),
            Err(Error::EmptyInput { what: "plaintext" })
        );
    }

    #[test]
    fn test_prepare_strict_reports_original_position() {
        let alphabet = Alphabet::letters(Language::English);
        let result = prepare_strict(
            "ab c!",
            "plaintext",
            |c| alphabet.normalize(c),
            |symbol, position| Error::SymbolNotInSquare { symbol, position },
        );
        assert_eq!(
            result,
            Err(Error::SymbolNotInSquare {
                symbol: '!',
                position: 4
            })
        );
    }

    #[test]
    fn test_prepare_digits() {
        assert_eq!(prepare_digits("12 30", "ciphertext").unwrap(), vec![1, 2, 3, 0]);
        assert!(matches!(
            prepare_digits("1a", "ciphertext"),
            Err(Error::MalformedCoordinateStream { position: 1, .. })
        ));
        assert_eq!(
            prepare_digits(" ", "ciphertext"),
            Err(Error::EmptyInput { what: "ciphertext" })
        );
    }

    #[test]
    fn test_require_key() {
        assert!(require_key("abc", "key").is_ok());
        assert_eq!(
            require_key("  ", "transposition key"),
            Err(Error::EmptyInput {
                what: "transposition key"
            })
        );
    }
}
