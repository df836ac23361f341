//! Canonical alphabets and symbol normalization.
//!
//! Every alphabet is an ordered set of unique lowercase symbols. The length
//! of an alphabet decides the structures built from it: 25 symbols fill a
//! 5×5 square, 36 a 6×6 square, 49 a 7×7 square.
//!
//! # Case Folding
//!
//! Input text is matched symbol by symbol. A symbol is used as-is when the
//! alphabet contains it, otherwise its lowercase form is tried. Turkish
//! alphabets contain both `ı` and `i`, so for them `I` folds to `ı` and `İ`
//! folds to `i` instead of the default Unicode mapping.

use crate::error::{AlphabetError, Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// English letters (26)
pub const ENGLISH: &str = "abcdefghijklmnopqrstuvwxyz";

/// English letters and digits (36, fills a 6×6 square)
pub const ENGLISH_WITH_DIGITS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// English letters, digits and punctuation (49, fills a 7×7 square)
pub const ENGLISH_7X7: &str = "abcdefghijklmnopqrstuvwxyz0123456789.,;:?!'\"-[]{}";

/// English letters plus `.` (27, fills a 3×3×3 cube)
pub const ENGLISH_TRIFID: &str = "abcdefghijklmnopqrstuvwxyz.";

/// Turkish letters (29)
pub const TURKISH_STANDARD: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

/// Turkish letters plus q, w, x (32)
pub const TURKISH_EXTENDED: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

/// Turkish letters and digits 0-6 (36, fills a 6×6 square)
pub const TURKISH_STANDARD_WITH_DIGITS: &str = "abcçdefgğhıijklmnoöprsştuüvyz0123456";

/// Extended Turkish letters and all digits (42)
pub const TURKISH_EXTENDED_WITH_DIGITS: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz0123456789";

/// Extended Turkish letters, digits and punctuation (49, fills a 7×7 square)
pub const TURKISH_EXTENDED_FULL_SQUARE: &str =
    "abcçdefgğhıijklmnoöpqrsştuüvwxyz0123456789.,;:?!\"";

/// Decimal digits
pub const DIGITS: &str = "0123456789";

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Turkish,
}

impl Language {
    /// Symbols ordered from most to least frequent in running text.
    pub fn frequency_order(self) -> &'static str {
        match self {
            Language::English => "etaoinshrdlcumwfgypbvkjxqz0123456789",
            Language::Turkish => "aenrldkmsutoybghcçpfvzşğöüjıi0123456789",
        }
    }

    /// Vowels of the language, in alphabet order.
    pub fn vowels(self) -> &'static str {
        match self {
            Language::English => "aeiou",
            Language::Turkish => "aeıioöuü",
        }
    }

    /// Lowercase name as used in option maps.
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Turkish => "turkish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "turkish" | "tr" => Ok(Language::Turkish),
            _ => Err(Error::InvalidStrategy {
                kind: "language",
                name: s.to_string(),
            }),
        }
    }
}

/// An ordered set of unique symbols with O(1) symbol-to-index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from a string of unique symbols.
    ///
    /// # Errors
    /// - `AlphabetError::Empty` if `symbols` is empty
    /// - `AlphabetError::DuplicateSymbol` on the first repeated symbol
    pub fn new(symbols: &str) -> Result<Self> {
        Self::from_symbols(symbols.chars().collect())
    }

    /// Build an alphabet from an ordered symbol list.
    pub fn from_symbols(symbols: Vec<char>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(AlphabetError::Empty.into());
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (position, &symbol) in symbols.iter().enumerate() {
            if index.insert(symbol, position).is_some() {
                return Err(AlphabetError::DuplicateSymbol { symbol, position }.into());
            }
        }

        Ok(Self { symbols, index })
    }

    /// Built-in alphabets are known to be valid; this skips the checks.
    fn builtin(symbols: &'static str) -> Self {
        let symbols: Vec<char> = symbols.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    /// Plain letters of a language (26 English, 29 Turkish).
    pub fn letters(language: Language) -> Self {
        match language {
            Language::English => Self::builtin(ENGLISH),
            Language::Turkish => Self::builtin(TURKISH_STANDARD),
        }
    }

    /// 36-symbol alphabet used by the 6×6 composite ciphers.
    pub fn composite(language: Language) -> Self {
        match language {
            Language::English => Self::builtin(ENGLISH_WITH_DIGITS),
            Language::Turkish => Self::builtin(TURKISH_STANDARD_WITH_DIGITS),
        }
    }

    /// Alphabet by language and digit inclusion.
    pub fn for_language(language: Language, include_digits: bool) -> Self {
        if include_digits {
            Self::composite(language)
        } else {
            Self::letters(language)
        }
    }

    /// 49-symbol alphabet for 7×7 squares.
    pub fn full_square(language: Language) -> Self {
        match language {
            Language::English => Self::builtin(ENGLISH_7X7),
            Language::Turkish => Self::builtin(TURKISH_EXTENDED_FULL_SQUARE),
        }
    }

    /// Decimal digits `0`-`9`.
    pub fn digits() -> Self {
        Self::builtin(DIGITS)
    }

    /// 27-symbol English alphabet for Trifid cubes.
    pub fn trifid() -> Self {
        Self::builtin(ENGLISH_TRIFID)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in alphabet order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Position of `symbol` in the alphabet.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Symbol at `index`.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Whether this is the plain 26-letter English alphabet, whose squares
    /// merge `j` into `i`.
    pub fn is_plain_english(&self) -> bool {
        self.symbols.iter().copied().eq(ENGLISH.chars())
    }

    /// Map an input character onto an alphabet symbol, if it has one.
    pub fn normalize(&self, c: char) -> Option<char> {
        fold_case(c, |s| self.contains(s))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Alphabet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Alphabet::new(s)
    }
}

/// Resolve `c` against a symbol set: the symbol itself, else its lowercase
/// form (with Turkish dotted/dotless I when the set contains `ı`).
pub fn fold_case(c: char, contains: impl Fn(char) -> bool) -> Option<char> {
    if contains(c) {
        return Some(c);
    }

    let turkish = contains('ı');
    let lower = match c {
        'I' if turkish => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next()?,
    };

    contains(lower).then_some(lower)
}
