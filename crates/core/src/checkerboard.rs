//! Straddling checkerboards.
//!
//! A checkerboard maps every symbol to a one- or two-digit code. The digits
//! `1..=k` are row prefixes and never stand alone; the remaining digits are
//! single-digit codes. Two-digit codes are a prefix followed by any digit.
//! No single-digit code is a prefix of a two-digit code, so a digit stream
//! decodes greedily without separators.
//!
//! # Layout
//!
//! `k` is the smallest prefix count with `(10 - k) + 10k >= len`. The first
//! `10 - k` symbols of the fill order take the free digits in ascending
//! order (`0`, then `k+1..=9`); the rest fill row `1` (`10`-`19`), row `2`,
//! and so on. With all nine prefixes the board holds 91 symbols.
//!
//! ```text
//! keyword "cipher" over a-z0-9 (k = 3)
//!
//!        0 1 2 3 4 5 6 7 8 9
//!        c       i p h e r a
//!     1  b d f g j k l m n o
//!     2  q s t u v w x y z 0
//!     3  1 2 3 4 5 6 7 8 9
//! ```

use crate::alphabet::{fold_case, Alphabet, Language};
use crate::config::CheckerboardType;
use crate::error::{AlphabetError, Error, Result};
use crate::mono::keyword_order;
use std::collections::HashMap;
use std::fmt;

/// Most symbols a checkerboard can hold
pub const MAX_SYMBOLS: usize = 91;

/// A checkerboard code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Code {
    /// Free digit
    Single(u8),
    /// Row prefix and column digit
    Double(u8, u8),
}

impl Code {
    /// Digits of the code, most significant first.
    pub fn digits(self) -> Vec<u8> {
        match self {
            Code::Single(d) => vec![d],
            Code::Double(p, d) => vec![p, d],
        }
    }

    /// Number of digits in the code.
    pub fn width(self) -> usize {
        match self {
            Code::Single(_) => 1,
            Code::Double(..) => 2,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Single(d) => write!(f, "{}", d),
            Code::Double(p, d) => write!(f, "{}{}", p, d),
        }
    }
}

/// Fill order for a checkerboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerboardStrategy {
    /// Alphabet order
    Standard,

    /// Most frequent symbols get the single-digit codes
    Frequency(Language),

    /// Keyword symbols first
    Keyword(String),

    /// Vowels first, then consonants and the rest in alphabet order
    VowelConsonant(Language),
}

impl CheckerboardStrategy {
    /// Resolve a checkerboard type name into a strategy.
    ///
    /// # Errors
    /// `MissingParameter` for the keyword type without a keyword.
    pub fn from_type(
        checkerboard_type: CheckerboardType,
        keyword: Option<&str>,
        language: Language,
    ) -> Result<Self> {
        Ok(match checkerboard_type {
            CheckerboardType::Standard => CheckerboardStrategy::Standard,
            CheckerboardType::Frequency => CheckerboardStrategy::Frequency(language),
            CheckerboardType::Keyword => {
                let keyword = keyword.filter(|k| !k.is_empty()).ok_or(Error::MissingParameter {
                    strategy: "keyword checkerboard",
                    parameter: "keyword",
                })?;
                CheckerboardStrategy::Keyword(keyword.to_string())
            }
            CheckerboardType::VowelConsonant => CheckerboardStrategy::VowelConsonant(language),
        })
    }

    fn order(&self, alphabet: &Alphabet) -> Result<Vec<char>> {
        let present = |c: char| alphabet.contains(c).then_some(c);
        match self {
            CheckerboardStrategy::Standard => Ok(alphabet.symbols().to_vec()),
            CheckerboardStrategy::Frequency(language) => Ok(keyword_order(
                language.frequency_order(),
                alphabet.symbols(),
                present,
            )),
            CheckerboardStrategy::Keyword(keyword) => {
                if keyword.is_empty() {
                    return Err(Error::MissingParameter {
                        strategy: "keyword checkerboard",
                        parameter: "keyword",
                    });
                }
                Ok(keyword_order(keyword, alphabet.symbols(), |c| alphabet.normalize(c)))
            }
            CheckerboardStrategy::VowelConsonant(language) => {
                Ok(keyword_order(language.vowels(), alphabet.symbols(), present))
            }
        }
    }
}

/// A prefix-free symbol-to-digit-code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkerboard {
    prefixes: u8,
    codes: HashMap<char, Code>,
    symbols: HashMap<Code, char>,
}

impl Checkerboard {
    /// Build a checkerboard from a fill strategy.
    ///
    /// # Errors
    /// - `AlphabetError::TooShort` below two symbols
    /// - `AlphabetError::TooLarge` above 91 symbols
    /// - strategy errors
    pub fn build(strategy: &CheckerboardStrategy, alphabet: &Alphabet) -> Result<Self> {
        let len = alphabet.len();
        if len < 2 {
            return Err(AlphabetError::TooShort {
                required: 2,
                actual: len,
            }
            .into());
        }
        if len > MAX_SYMBOLS {
            return Err(AlphabetError::TooLarge {
                max: MAX_SYMBOLS,
                actual: len,
            }
            .into());
        }

        let prefixes = prefix_count(len);
        let order = strategy.order(alphabet)?;

        let free_digits = std::iter::once(0).chain(prefixes + 1..=9);
        let double_codes = (1..=prefixes).flat_map(|p| (0..=9).map(move |d| Code::Double(p, d)));
        let all_codes = free_digits.map(Code::Single).chain(double_codes);

        let mut codes = HashMap::with_capacity(len);
        let mut symbols = HashMap::with_capacity(len);
        for (symbol, code) in order.into_iter().zip(all_codes) {
            codes.insert(symbol, code);
            symbols.insert(code, symbol);
        }

        Ok(Self {
            prefixes,
            codes,
            symbols,
        })
    }

    /// Number of row prefixes (`1..=k`).
    pub fn prefix_count(&self) -> u8 {
        self.prefixes
    }

    /// Whether `digit` starts a two-digit code.
    pub fn is_prefix(&self, digit: u8) -> bool {
        (1..=self.prefixes).contains(&digit)
    }

    /// Code for an exact symbol.
    pub fn code(&self, symbol: char) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    /// Symbol assigned to `code`.
    pub fn symbol(&self, code: Code) -> Option<char> {
        self.symbols.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Map an input character onto a checkerboard symbol.
    pub fn normalize(&self, c: char) -> Option<char> {
        fold_case(c, |s| self.codes.contains_key(&s))
    }

    /// All assignments sorted by symbol.
    pub fn entries(&self) -> Vec<(char, Code)> {
        let mut entries: Vec<(char, Code)> = self.codes.iter().map(|(&s, &c)| (s, c)).collect();
        entries.sort_unstable();
        entries
    }
}

impl fmt::Display for Checkerboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(symbol, code)| format!("{}:{}", symbol, code))
            .collect();
        f.write_str(&parts.join(","))
    }
}

/// Smallest prefix count whose board holds `len` symbols.
fn prefix_count(len: usize) -> u8 {
    let mut k: u8 = 1;
    while (10 - usize::from(k)) + 10 * usize::from(k) < len {
        k += 1;
    }
    k
}

/// Build a checkerboard from textual options.
///
/// The alphabet defaults to the letters of `language`.
pub fn build_checkerboard(
    checkerboard_type: CheckerboardType,
    keyword: Option<&str>,
    alphabet: Option<&Alphabet>,
    language: Language,
) -> Result<Checkerboard> {
    let strategy = CheckerboardStrategy::from_type(checkerboard_type, keyword, language)?;
    match alphabet {
        Some(alphabet) => Checkerboard::build(&strategy, alphabet),
        None => Checkerboard::build(&strategy, &Alphabet::letters(language)),
    }
}
