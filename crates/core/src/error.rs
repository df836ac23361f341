//! Error types for the cipher pipeline.
//!
//! All operations return structured errors rather than panicking. Every
//! error aborts the whole encrypt/decrypt call; no stage hands back partial
//! output.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Input: empty text or keys, symbols outside the lookup structures
/// - Strategy: unknown or under-specified square/checkerboard strategies
/// - Streams: digit/coordinate streams that cannot be regrouped
/// - Alphabet: invalid symbol sets
/// - Configuration: option values out of range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Plaintext, ciphertext or a required key is empty
    #[error("empty input: {what} must not be empty")]
    EmptyInput { what: &'static str },

    /// A strategy needs a parameter that was not supplied
    #[error("missing parameter: {strategy} requires `{parameter}`")]
    MissingParameter {
        strategy: &'static str,
        parameter: &'static str,
    },

    /// Unrecognized strategy or option name
    #[error("invalid {kind}: {name:?}")]
    InvalidStrategy { kind: &'static str, name: String },

    /// Affine multiplier has no inverse modulo the alphabet length
    #[error("affine multiplier {a} is not coprime with alphabet length {modulus}")]
    NonInvertibleParameter { a: i64, modulus: usize },

    /// Input symbol is absent from the constructed square or cube
    #[error("symbol {symbol:?} at position {position} is not in the square")]
    SymbolNotInSquare { symbol: char, position: usize },

    /// Input symbol is absent from the constructed checkerboard
    #[error("symbol {symbol:?} at position {position} is not in the checkerboard")]
    SymbolNotInCheckerboard { symbol: char, position: usize },

    /// Input symbol is outside the alphabet a keystream operates over
    #[error("symbol {symbol:?} at position {position} is not in the alphabet")]
    SymbolNotInAlphabet { symbol: char, position: usize },

    /// Digit or coordinate stream cannot be regrouped into valid codes
    #[error("malformed coordinate stream at position {position}: {reason}")]
    MalformedCoordinateStream { position: usize, reason: String },

    /// Key symbol cannot be converted into a key value
    #[error("invalid key symbol {symbol:?} at position {position}")]
    InvalidKey { symbol: char, position: usize },

    /// Alphabet construction or sizing error
    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    /// Option value out of range or unsupported combination
    #[error("configuration error: {0}")]
    Config(String),

    /// A pipeline stage received a stream of the wrong kind
    #[error("stage {stage} expected a {expected} stream, got {found}")]
    StreamMismatch {
        stage: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Alphabet errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Alphabet contains no symbols
    #[error("alphabet is empty")]
    Empty,

    /// The same symbol appears twice
    #[error("duplicate symbol {symbol:?} at position {position}")]
    DuplicateSymbol { symbol: char, position: usize },

    /// Too few symbols for the requested structure
    #[error("alphabet too short: need at least {required} symbols, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Too many symbols for the requested structure
    #[error("alphabet too large: at most {max} symbols, got {actual}")]
    TooLarge { max: usize, actual: usize },

    /// Symbol count is not a perfect square, so the grid would need padding
    #[error("{len} symbols do not fill a square grid without padding")]
    NotSquare { len: usize },

    /// Structure needs an exact symbol count
    #[error("alphabet size mismatch: expected {expected} symbols, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_empty_input() {
        let err = Error::EmptyInput { what: "plaintext" };
        assert_eq!(err.to_string(), "empty input: plaintext must not be empty");
    }

    #[test]
    fn test_display_non_invertible() {
        let err = Error::NonInvertibleParameter { a: 2, modulus: 26 };
        assert_eq!(
            err.to_string(),
            "affine multiplier 2 is not coprime with alphabet length 26"
        );
    }

    #[test]
    fn test_display_symbol_not_in_square() {
        let err = Error::SymbolNotInSquare {
            symbol: '!',
            position: 3,
        };
        assert_eq!(err.to_string(), "symbol '!' at position 3 is not in the square");
    }

    #[test]
    fn test_alphabet_error_converts() {
        let err: Error = AlphabetError::NotSquare { len: 29 }.into();
        assert!(matches!(err, Error::Alphabet(AlphabetError::NotSquare { len: 29 })));
        assert_eq!(
            err.to_string(),
            "alphabet error: 29 symbols do not fill a square grid without padding"
        );
    }

    #[test]
    fn test_invalid_strategy_quotes_name() {
        let err = Error::InvalidStrategy {
            kind: "square type",
            name: "vigenere".to_string(),
        };
        assert_eq!(err.to_string(), "invalid square type: \"vigenere\"");
    }
}
