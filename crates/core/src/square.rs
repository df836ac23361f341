//! Polybius squares and Trifid cubes.
//!
//! A square is an N×N grid filled row-major from an ordered symbol list.
//! The fill order comes from a [`SquareStrategy`]; lookups in both
//! directions go through a table built once at construction.
//!
//! # Sizing
//!
//! By default N is the smallest integer with N² ≥ alphabet length, between
//! 2 and 9. When N² exceeds the symbol count the remaining cells repeat the
//! last placed symbol; such a square still encodes, but the repeated cells
//! are never produced by a lookup, so ciphers that do arithmetic on
//! coordinates insist on [`Square::is_complete`].
//!
//! The plain 26-letter English alphabet merges `j` into `i` so that it
//! fits a 5×5 square exactly. The merge happens after the strategy has
//! ordered all 26 letters, so affine parameters are checked modulo 26.

use crate::alphabet::{fold_case, Alphabet, Language};
use crate::config::{MonoParams, SquareType};
use crate::error::{AlphabetError, Error, Result};
use crate::mono::{keyword_order, Bijection};
use std::collections::HashMap;
use std::fmt;

/// Smallest supported grid side
pub const MIN_SIZE: usize = 2;

/// Largest supported grid side
pub const MAX_SIZE: usize = 9;

/// Zero-based grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Zero-based cube position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord3 {
    pub layer: usize,
    pub row: usize,
    pub col: usize,
}

impl Coord3 {
    pub fn new(layer: usize, row: usize, col: usize) -> Self {
        Self { layer, row, col }
    }
}

/// Fill order for a square or cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareStrategy {
    /// Alphabet order
    Standard,

    /// Most frequent symbols of the language first
    Frequency(Language),

    /// Keyword symbols first, then the rest of the alphabet
    Keyword(String),

    /// Order produced by a monoalphabetic bijection
    Monoalphabetic(Bijection),
}

impl SquareStrategy {
    /// Resolve a square type name and its parameters into a strategy.
    ///
    /// # Errors
    /// `MissingParameter` when keyword, caesar or affine lack their inputs.
    pub fn from_type(
        square_type: SquareType,
        keyword: Option<&str>,
        params: &MonoParams,
        language: Language,
    ) -> Result<Self> {
        let missing = |strategy, parameter| Error::MissingParameter { strategy, parameter };

        Ok(match square_type {
            SquareType::Standard => SquareStrategy::Standard,
            SquareType::Frequency => SquareStrategy::Frequency(language),
            SquareType::Keyword => {
                let keyword = keyword
                    .or(params.keyword.as_deref())
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| missing("keyword", "keyword"))?;
                SquareStrategy::Keyword(keyword.to_string())
            }
            SquareType::Caesar => {
                let shift = params.shift.ok_or_else(|| missing("caesar", "shift"))?;
                SquareStrategy::Monoalphabetic(Bijection::Shift(shift))
            }
            SquareType::Atbash => SquareStrategy::Monoalphabetic(Bijection::Reversal),
            SquareType::Affine => {
                let a = params.a.ok_or_else(|| missing("affine", "a"))?;
                let b = params.b.ok_or_else(|| missing("affine", "b"))?;
                SquareStrategy::Monoalphabetic(Bijection::Affine { a, b })
            }
        })
    }

    /// Order `alphabet` according to this strategy.
    fn order(&self, alphabet: &Alphabet) -> Result<Vec<char>> {
        match self {
            SquareStrategy::Standard => Ok(alphabet.symbols().to_vec()),
            SquareStrategy::Frequency(language) => Ok(frequency_order(*language, alphabet)),
            SquareStrategy::Keyword(keyword) => {
                if keyword.is_empty() {
                    return Err(Error::MissingParameter {
                        strategy: "keyword",
                        parameter: "keyword",
                    });
                }
                Ok(keyword_order(keyword, alphabet.symbols(), |c| alphabet.normalize(c)))
            }
            SquareStrategy::Monoalphabetic(bijection) => bijection.apply(alphabet),
        }
    }
}

/// Symbols of `alphabet` ordered by language frequency; symbols the
/// frequency table does not rank follow in alphabet order.
pub fn frequency_order(language: Language, alphabet: &Alphabet) -> Vec<char> {
    keyword_order(language.frequency_order(), alphabet.symbols(), |c| {
        alphabet.contains(c).then_some(c)
    })
}

/// Coordinate letters labelling the rows and columns of an N×N square.
pub fn coordinate_letters(size: usize) -> Option<&'static str> {
    match size {
        5 => Some("ADFGX"),
        6 => Some("ADFGVX"),
        7 => Some("ADFGVZX"),
        _ => None,
    }
}

/// An N×N Polybius square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    size: usize,
    cells: Vec<char>,
    index: HashMap<char, Coord>,
    /// Input symbol merged into another (`j` -> `i`)
    fold: Option<(char, char)>,
    /// Distinct symbols placed before padding
    filled: usize,
}

impl Square {
    /// Build a square with the smallest size that holds every symbol.
    ///
    /// # Errors
    /// - `AlphabetError::TooShort` / `TooLarge` outside 2×2..9×9
    /// - strategy errors (`MissingParameter`, `NonInvertibleParameter`)
    pub fn build(strategy: &SquareStrategy, alphabet: &Alphabet) -> Result<Self> {
        let (order, fold) = merged(strategy.order(alphabet)?, alphabet);
        let size = auto_size(order.len())?;
        Self::fill(order, size, fold)
    }

    /// Build a square of an explicit size, truncating or padding the order.
    pub fn build_with_size(
        strategy: &SquareStrategy,
        alphabet: &Alphabet,
        size: usize,
    ) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(AlphabetError::TooShort {
                required: MIN_SIZE * MIN_SIZE,
                actual: size * size,
            }
            .into());
        }
        if size > MAX_SIZE {
            return Err(AlphabetError::TooLarge {
                max: MAX_SIZE * MAX_SIZE,
                actual: size * size,
            }
            .into());
        }
        let (mut order, fold) = merged(strategy.order(alphabet)?, alphabet);
        order.truncate(size * size);
        Self::fill(order, size, fold)
    }

    fn fill(order: Vec<char>, size: usize, fold: Option<(char, char)>) -> Result<Self> {
        let last = *order.last().ok_or(AlphabetError::Empty)?;
        let filled = order.len();

        let mut cells = order;
        cells.resize(size * size, last);

        let mut index = HashMap::with_capacity(filled);
        for (i, &symbol) in cells.iter().enumerate() {
            index.entry(symbol).or_insert(Coord::new(i / size, i % size));
        }

        Ok(Self {
            size,
            cells,
            index,
            fold,
            filled,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether every cell holds a distinct symbol.
    pub fn is_complete(&self) -> bool {
        self.filled == self.size * self.size
    }

    /// Position of an exact symbol.
    pub fn position(&self, symbol: char) -> Option<Coord> {
        self.index.get(&symbol).copied()
    }

    /// Symbol stored at `coord`.
    pub fn symbol_at(&self, coord: Coord) -> Option<char> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        self.cells.get(coord.row * self.size + coord.col).copied()
    }

    /// Map an input character onto a square symbol, applying case folding
    /// and the `j` -> `i` merge.
    pub fn normalize(&self, c: char) -> Option<char> {
        let c = match self.fold {
            Some((from, to)) if c.to_lowercase().eq(std::iter::once(from)) => to,
            _ => c,
        };
        fold_case(c, |s| self.index.contains_key(&s))
    }

    /// Rows as strings, top to bottom.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Row/column labels for this size, if it has ADFGVX-style letters.
    pub fn coordinate_letters(&self) -> Option<&'static str> {
        coordinate_letters(self.size)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}

/// Merge `j` into `i` in an order built over the plain English alphabet,
/// keeping the first occurrence. Other alphabets pass through.
fn merged(order: Vec<char>, alphabet: &Alphabet) -> (Vec<char>, Option<(char, char)>) {
    if !alphabet.is_plain_english() {
        return (order, None);
    }
    let mut merged = Vec::with_capacity(order.len());
    for symbol in order {
        let symbol = if symbol == 'j' { 'i' } else { symbol };
        if !merged.contains(&symbol) {
            merged.push(symbol);
        }
    }
    (merged, Some(('j', 'i')))
}

fn auto_size(len: usize) -> Result<usize> {
    let mut size = 1;
    while size * size < len {
        size += 1;
    }
    if size < MIN_SIZE {
        return Err(AlphabetError::TooShort {
            required: MIN_SIZE,
            actual: len,
        }
        .into());
    }
    if size > MAX_SIZE {
        return Err(AlphabetError::TooLarge {
            max: MAX_SIZE * MAX_SIZE,
            actual: len,
        }
        .into());
    }
    Ok(size)
}

/// Build a square from textual options.
///
/// The alphabet defaults to the 36-symbol alphabet of `language`.
///
/// # Errors
/// See [`SquareStrategy::from_type`] and [`Square::build`].
pub fn build_square(
    square_type: SquareType,
    keyword: Option<&str>,
    alphabet: Option<&Alphabet>,
    params: &MonoParams,
    language: Language,
) -> Result<Square> {
    let strategy = SquareStrategy::from_type(square_type, keyword, params, language)?;
    match alphabet {
        Some(alphabet) => Square::build(&strategy, alphabet),
        None => Square::build(&strategy, &Alphabet::composite(language)),
    }
}

/// Side of a Trifid cube
pub const CUBE_SIZE: usize = 3;

/// A 3×3×3 cube of 27 symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    cells: Vec<char>,
    index: HashMap<char, Coord3>,
}

impl Cube {
    /// Fill a cube layer by layer, row-major within each layer.
    ///
    /// # Errors
    /// - `AlphabetError::SizeMismatch` unless the alphabet has 27 symbols
    /// - strategy errors
    pub fn build(strategy: &SquareStrategy, alphabet: &Alphabet) -> Result<Self> {
        let expected = CUBE_SIZE.pow(3);
        if alphabet.len() != expected {
            return Err(AlphabetError::SizeMismatch {
                expected,
                actual: alphabet.len(),
            }
            .into());
        }

        let cells = strategy.order(alphabet)?;
        let index = cells
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                let coord = Coord3::new(i / 9, (i / 3) % 3, i % 3);
                (symbol, coord)
            })
            .collect();

        Ok(Self { cells, index })
    }

    pub fn position(&self, symbol: char) -> Option<Coord3> {
        self.index.get(&symbol).copied()
    }

    pub fn symbol_at(&self, coord: Coord3) -> Option<char> {
        if coord.layer >= CUBE_SIZE || coord.row >= CUBE_SIZE || coord.col >= CUBE_SIZE {
            return None;
        }
        self.cells
            .get(coord.layer * 9 + coord.row * 3 + coord.col)
            .copied()
    }

    pub fn normalize(&self, c: char) -> Option<char> {
        fold_case(c, |s| self.index.contains_key(&s))
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self
            .cells
            .chunks(9)
            .map(|layer| {
                layer
                    .chunks(3)
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        f.write_str(&layers.join("\n\n"))
    }
}
