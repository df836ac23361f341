//! Cipher options.
//!
//! Strategy names are parsed into closed enums here and nowhere else; the
//! rest of the crate only sees typed values.
//!
//! # Defaults
//!
//! Every cipher works with `Options::default()`: a standard square, the
//! English alphabet, one transposition pass, a static numeric keystream.

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub use crate::alphabet::Language;

/// Most transposition passes a cipher accepts
pub const MAX_TRANSPOSITION_PASSES: usize = 3;

/// Polybius square fill strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SquareType {
    #[default]
    Standard,
    Frequency,
    Keyword,
    Caesar,
    Atbash,
    Affine,
}

impl SquareType {
    pub fn name(self) -> &'static str {
        match self {
            SquareType::Standard => "standard",
            SquareType::Frequency => "frequency",
            SquareType::Keyword => "keyword",
            SquareType::Caesar => "caesar",
            SquareType::Atbash => "atbash",
            SquareType::Affine => "affine",
        }
    }
}

impl FromStr for SquareType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(SquareType::Standard),
            "frequency" => Ok(SquareType::Frequency),
            "keyword" => Ok(SquareType::Keyword),
            "caesar" | "shift" => Ok(SquareType::Caesar),
            "atbash" | "reversal" => Ok(SquareType::Atbash),
            "affine" => Ok(SquareType::Affine),
            _ => Err(Error::InvalidStrategy {
                kind: "square type",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SquareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Straddling checkerboard fill strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckerboardType {
    #[default]
    Standard,
    Frequency,
    Keyword,
    VowelConsonant,
}

impl CheckerboardType {
    pub fn name(self) -> &'static str {
        match self {
            CheckerboardType::Standard => "standard",
            CheckerboardType::Frequency => "frequency",
            CheckerboardType::Keyword => "keyword",
            CheckerboardType::VowelConsonant => "vowel_consonant",
        }
    }
}

impl FromStr for CheckerboardType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(CheckerboardType::Standard),
            "frequency" => Ok(CheckerboardType::Frequency),
            "keyword" => Ok(CheckerboardType::Keyword),
            "vowel_consonant" => Ok(CheckerboardType::VowelConsonant),
            _ => Err(Error::InvalidStrategy {
                kind: "checkerboard type",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CheckerboardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How key strings are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyType {
    /// Decimal digits
    #[default]
    Numeric,
    /// Letters, converted per cipher
    Alphabetic,
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" | "digits" => Ok(KeyType::Numeric),
            "alphabetic" | "letters" => Ok(KeyType::Alphabetic),
            _ => Err(Error::InvalidStrategy {
                kind: "key type",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Numeric => f.write_str("numeric"),
            KeyType::Alphabetic => f.write_str("alphabetic"),
        }
    }
}

/// Parameters for bijection-seeded squares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonoParams {
    /// Caesar shift
    pub shift: Option<i64>,

    /// Affine multiplier
    pub a: Option<i64>,

    /// Affine offset
    pub b: Option<i64>,

    /// Keyword for keyword squares when none is passed directly
    pub keyword: Option<String>,
}

/// Options shared by every cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    // === Structures ===
    /// How the Polybius square is filled
    pub square_type: SquareType,

    /// How the checkerboard is filled (Straddling Checkerboard only)
    pub checkerboard_type: CheckerboardType,

    /// Language for default alphabets and frequency tables
    pub language: Language,

    /// Alphabet override (None = language default for the cipher)
    pub alphabet: Option<Alphabet>,

    /// Parameters for caesar/affine squares
    pub mono_params: MonoParams,

    /// Keyword for keyword strategies of single-key ciphers
    pub keyword: Option<String>,

    // === Transposition ===
    /// Number of columnar passes (1..=3)
    pub transposition_passes: usize,

    // === Keystream ===
    /// Chain addition instead of a repeating key
    pub use_chain_addition: bool,

    /// How key strings are read
    pub key_type: KeyType,

    // === Fractionation ===
    /// Bifid/Trifid period (None = whole message)
    pub period: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            square_type: SquareType::Standard,
            checkerboard_type: CheckerboardType::Standard,
            language: Language::English,
            alphabet: None,
            mono_params: MonoParams::default(),
            keyword: None,
            transposition_passes: 1,
            use_chain_addition: false,
            key_type: KeyType::Numeric,
            period: None,
        }
    }
}

impl Options {
    /// Parse options from textual key/value pairs.
    ///
    /// Keys not listed leave their default in place. Strategy names fail
    /// with `InvalidStrategy`; unknown keys and unparsable numbers or
    /// booleans fail with `Config`.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Options::default();

        for (key, value) in pairs {
            match key {
                "square_type" => options.square_type = value.parse()?,
                "checkerboard_type" => options.checkerboard_type = value.parse()?,
                "language" => options.language = value.parse()?,
                "alphabet" => options.alphabet = Some(Alphabet::new(value)?),
                "shift" => options.mono_params.shift = Some(parse_number(key, value)?),
                "a" => options.mono_params.a = Some(parse_number(key, value)?),
                "b" => options.mono_params.b = Some(parse_number(key, value)?),
                "mono_keyword" => options.mono_params.keyword = Some(value.to_string()),
                "keyword" => options.keyword = Some(value.to_string()),
                "transposition_passes" => {
                    options.transposition_passes = parse_number(key, value)?
                }
                "use_chain_addition" => options.use_chain_addition = parse_bool(key, value)?,
                "key_type" => options.key_type = value.parse()?,
                "period" => options.period = Some(parse_number(key, value)?),
                _ => return Err(Error::Config(format!("unknown option: {}", key))),
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// `Config` when passes fall outside 1..=3 or the period is zero.
    pub fn validate(&self) -> Result<()> {
        if self.transposition_passes == 0 || self.transposition_passes > MAX_TRANSPOSITION_PASSES {
            return Err(Error::Config(format!(
                "transposition_passes must be between 1 and {}, got {}",
                MAX_TRANSPOSITION_PASSES, self.transposition_passes
            )));
        }
        if self.period == Some(0) {
            return Err(Error::Config("period must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Alphabet override, or `fallback` for the cipher's default.
    pub fn alphabet_or(&self, fallback: impl FnOnce(Language) -> Alphabet) -> Alphabet {
        match &self.alphabet {
            Some(alphabet) => alphabet.clone(),
            None => fallback(self.language),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid {}: {:?}", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(Error::Config(format!("invalid {}: {:?}", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.square_type, SquareType::Standard);
        assert_eq!(options.language, Language::English);
        assert_eq!(options.transposition_passes, 1);
        assert!(!options.use_chain_addition);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_pairs() {
        let options = Options::from_pairs([
            ("square_type", "affine"),
            ("a", "5"),
            ("b", "8"),
            ("language", "turkish"),
            ("transposition_passes", "2"),
            ("use_chain_addition", "true"),
        ])
        .unwrap();

        assert_eq!(options.square_type, SquareType::Affine);
        assert_eq!(options.mono_params.a, Some(5));
        assert_eq!(options.mono_params.b, Some(8));
        assert_eq!(options.language, Language::Turkish);
        assert_eq!(options.transposition_passes, 2);
        assert!(options.use_chain_addition);
    }

    #[test]
    fn test_unknown_square_type() {
        let result = Options::from_pairs([("square_type", "playfair")]);
        assert_eq!(
            result,
            Err(Error::InvalidStrategy {
                kind: "square type",
                name: "playfair".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_key() {
        let result = Options::from_pairs([("rounds", "4")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_number() {
        let result = Options::from_pairs([("shift", "three")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_passes_out_of_range() {
        for passes in ["0", "4"] {
            let result = Options::from_pairs([("transposition_passes", passes)]);
            assert!(matches!(result, Err(Error::Config(_))), "passes={passes}");
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let options = Options {
            period: Some(0),
            ..Options::default()
        };
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_checkerboard_type_names() {
        assert_eq!(
            "vowel-consonant".parse::<CheckerboardType>(),
            Ok(CheckerboardType::VowelConsonant)
        );
        assert_eq!(CheckerboardType::VowelConsonant.to_string(), "vowel_consonant");
        assert!("diagonal".parse::<CheckerboardType>().is_err());
    }

    #[test]
    fn test_key_type_parse() {
        assert_eq!("alphabetic".parse::<KeyType>(), Ok(KeyType::Alphabetic));
        assert_eq!(KeyType::Numeric.to_string(), "numeric");
    }
}
