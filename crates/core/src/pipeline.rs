//! Composite cipher pipelines.
//!
//! A cipher is an ordered list of reversible [`Stage`]s. Encryption runs the
//! stages front to back; decryption runs them back to front, each inverted,
//! with the same keys. A pipeline is built fresh for every call and holds
//! no state between calls.
//!
//! # Streams
//!
//! Stages pass a typed [`Stream`] along: text symbols, decimal digits,
//! square coordinates or cube coordinates. A stage that receives the wrong
//! kind fails with `StreamMismatch` instead of guessing.
//!
//! # Example: VIC
//!
//! ```text
//! text --PolybiusSubstitute--> ADFGVX letters --PairsToDigits--> digits
//!      --CheckerboardDigitsToLetters--> text --ColumnarTransposition xN--> text
//!      --AlphabetKeystream--> ciphertext
//! ```

use crate::alphabet::Alphabet;
use crate::checkerboard::Checkerboard;
use crate::error::{Error, Result};
use crate::fractionation::{
    checkerboard_decode, checkerboard_encode, coords_to_digits, coords_to_letters, cube_decode,
    cube_encode, defractionate_2d, defractionate_3d, digits_to_coords, fractionate_2d,
    fractionate_3d, letters_to_coords, square_decode, square_encode,
};
use crate::keystream::{Direction, Keystream, KeystreamMode};
use crate::metrics::PipelineMetrics;
use crate::square::{Coord, Coord3, Cube, Square};
use crate::transposition::{transpose, untranspose};

/// Data flowing between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stream {
    Text(Vec<char>),
    Digits(Vec<u8>),
    Coordinates(Vec<Coord>),
    Triples(Vec<Coord3>),
}

impl Stream {
    /// Stream kind name used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Stream::Text(_) => "text",
            Stream::Digits(_) => "digit",
            Stream::Coordinates(_) => "coordinate",
            Stream::Triples(_) => "triple",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Stream::Text(v) => v.len(),
            Stream::Digits(v) => v.len(),
            Stream::Coordinates(v) => v.len(),
            Stream::Triples(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mismatch(&self, stage: &'static str, expected: &'static str) -> Error {
        Error::StreamMismatch {
            stage,
            expected,
            found: self.kind(),
        }
    }

    /// Text symbols, or `StreamMismatch` naming `stage`.
    pub fn into_text(self, stage: &'static str) -> Result<Vec<char>> {
        match self {
            Stream::Text(v) => Ok(v),
            other => Err(other.mismatch(stage, "text")),
        }
    }

    /// Digits, or `StreamMismatch` naming `stage`.
    pub fn into_digits(self, stage: &'static str) -> Result<Vec<u8>> {
        match self {
            Stream::Digits(v) => Ok(v),
            other => Err(other.mismatch(stage, "digit")),
        }
    }

    /// Square coordinates, or `StreamMismatch` naming `stage`.
    pub fn into_coordinates(self, stage: &'static str) -> Result<Vec<Coord>> {
        match self {
            Stream::Coordinates(v) => Ok(v),
            other => Err(other.mismatch(stage, "coordinate")),
        }
    }

    /// Cube coordinates, or `StreamMismatch` naming `stage`.
    pub fn into_triples(self, stage: &'static str) -> Result<Vec<Coord3>> {
        match self {
            Stream::Triples(v) => Ok(v),
            other => Err(other.mismatch(stage, "triple")),
        }
    }

    /// Render the stream as a string: text as-is, digits as decimal
    /// characters, coordinates as zero-based digit pairs or triples.
    pub fn render(&self) -> String {
        match self {
            Stream::Text(v) => v.iter().collect(),
            Stream::Digits(v) => v.iter().map(|d| char::from(b'0' + d)).collect(),
            Stream::Coordinates(v) => v
                .iter()
                .map(|c| format!("{}{}", c.row, c.col))
                .collect(),
            Stream::Triples(v) => v
                .iter()
                .map(|c| format!("{}{}{}", c.layer, c.row, c.col))
                .collect(),
        }
    }
}

/// One reversible step of a composite cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Text -> coordinate letter pairs (`ADFGVX` style) through a square
    PolybiusSubstitute { square: Square, letters: &'static str },

    /// Coordinate letters -> their indices as digits
    PairsToDigits { letters: &'static str },

    /// Digits -> text by greedy checkerboard decoding; a trailing lone row
    /// prefix is padded with `0`
    CheckerboardDigitsToLetters { checkerboard: Checkerboard },

    /// Text -> checkerboard digit stream
    CheckerboardEncode { checkerboard: Checkerboard },

    /// Text -> square coordinates
    SquareCoordinates { square: Square },

    /// Text -> cube coordinates
    CubeCoordinates { cube: Cube },

    /// Square coordinates -> row and column as two digits
    CoordinatesToDigits { size: usize },

    /// Bifid/Trifid interleaving of coordinates
    Fractionate { period: Option<usize> },

    /// Keyed columnar transposition of text or digits
    ColumnarTransposition { keyword: String },

    /// Modular addition over alphabet indices
    AlphabetKeystream { keystream: Keystream, alphabet: Alphabet },

    /// Modular addition over decimal digits
    DigitKeystream { keystream: Keystream },

    /// Nihilist one-based coordinate addition
    CoordinateKeystream { keystream: Keystream, size: usize },

    /// A stage run backwards
    Invert(Box<Stage>),
}

impl Stage {
    /// Short stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::PolybiusSubstitute { .. } => "polybius_substitute",
            Stage::PairsToDigits { .. } => "pairs_to_digits",
            Stage::CheckerboardDigitsToLetters { .. } => "checkerboard_digits_to_letters",
            Stage::CheckerboardEncode { .. } => "checkerboard_encode",
            Stage::SquareCoordinates { .. } => "square_coordinates",
            Stage::CubeCoordinates { .. } => "cube_coordinates",
            Stage::CoordinatesToDigits { .. } => "coordinates_to_digits",
            Stage::Fractionate { .. } => "fractionate",
            Stage::ColumnarTransposition { .. } => "columnar_transposition",
            Stage::AlphabetKeystream { .. } => "alphabet_keystream",
            Stage::DigitKeystream { .. } => "digit_keystream",
            Stage::CoordinateKeystream { .. } => "coordinate_keystream",
            Stage::Invert(_) => "invert",
        }
    }

    /// Name with the parameters that distinguish one instance from another.
    pub fn label(&self) -> String {
        match self {
            Stage::PolybiusSubstitute { letters, .. } => format!("{}({})", self.name(), letters),
            Stage::Fractionate { period: Some(p) } => format!("{}({})", self.name(), p),
            Stage::ColumnarTransposition { keyword } => format!("{}({})", self.name(), keyword),
            Stage::AlphabetKeystream { keystream, .. } | Stage::DigitKeystream { keystream } => {
                format!("{}({})", self.name(), mode_name(keystream.mode()))
            }
            Stage::Invert(inner) => format!("inverse({})", inner.label()),
            _ => self.name().to_string(),
        }
    }

    /// Run the stage forwards.
    pub fn forward(&self, input: Stream) -> Result<Stream> {
        self.apply(input, Direction::Encrypt).map(|(stream, _)| stream)
    }

    /// Run the stage backwards.
    pub fn inverse(&self, input: Stream) -> Result<Stream> {
        self.apply(input, Direction::Decrypt).map(|(stream, _)| stream)
    }

    /// Run the stage in `direction`, also returning the keystream state
    /// after the last step for keystream stages.
    fn apply(&self, input: Stream, direction: Direction) -> Result<(Stream, Option<Vec<u32>>)> {
        let forward = direction == Direction::Encrypt;
        let name = self.name();

        let output = match self {
            Stage::Invert(inner) => {
                let reversed = match direction {
                    Direction::Encrypt => Direction::Decrypt,
                    Direction::Decrypt => Direction::Encrypt,
                };
                return inner.apply(input, reversed);
            }

            Stage::PolybiusSubstitute { square, letters } => {
                if forward {
                    let coords = square_encode(&input.into_text(name)?, square)?;
                    Stream::Text(coords_to_letters(&coords, letters)?)
                } else {
                    let coords = letters_to_coords(&input.into_text(name)?, letters)?;
                    Stream::Text(square_decode(&coords, square)?)
                }
            }

            Stage::PairsToDigits { letters } => {
                if forward {
                    Stream::Digits(letters_to_indices(&input.into_text(name)?, letters)?)
                } else {
                    Stream::Text(indices_to_letters(&input.into_digits(name)?, letters)?)
                }
            }

            Stage::CheckerboardDigitsToLetters { checkerboard } => {
                if forward {
                    let mut digits = input.into_digits(name)?;
                    if ends_with_lone_prefix(&digits, checkerboard) {
                        digits.push(0);
                    }
                    Stream::Text(checkerboard_decode(&digits, checkerboard)?)
                } else {
                    let mut digits = checkerboard_encode(&input.into_text(name)?, checkerboard)?;
                    let n = digits.len();
                    let padded = n % 2 == 1
                        && n >= 2
                        && digits[n - 1] == 0
                        && checkerboard.is_prefix(digits[n - 2]);
                    if padded {
                        digits.pop();
                    }
                    Stream::Digits(digits)
                }
            }

            Stage::CheckerboardEncode { checkerboard } => {
                if forward {
                    Stream::Digits(checkerboard_encode(&input.into_text(name)?, checkerboard)?)
                } else {
                    Stream::Text(checkerboard_decode(&input.into_digits(name)?, checkerboard)?)
                }
            }

            Stage::SquareCoordinates { square } => {
                if forward {
                    Stream::Coordinates(square_encode(&input.into_text(name)?, square)?)
                } else {
                    Stream::Text(square_decode(&input.into_coordinates(name)?, square)?)
                }
            }

            Stage::CubeCoordinates { cube } => {
                if forward {
                    Stream::Triples(cube_encode(&input.into_text(name)?, cube)?)
                } else {
                    Stream::Text(cube_decode(&input.into_triples(name)?, cube)?)
                }
            }

            Stage::CoordinatesToDigits { size } => {
                if forward {
                    Stream::Digits(coords_to_digits(&input.into_coordinates(name)?))
                } else {
                    Stream::Coordinates(digits_to_coords(&input.into_digits(name)?, *size)?)
                }
            }

            Stage::Fractionate { period } => match (input, forward) {
                (Stream::Coordinates(c), true) => Stream::Coordinates(fractionate_2d(&c, *period)),
                (Stream::Coordinates(c), false) => {
                    Stream::Coordinates(defractionate_2d(&c, *period))
                }
                (Stream::Triples(c), true) => Stream::Triples(fractionate_3d(&c, *period)),
                (Stream::Triples(c), false) => Stream::Triples(defractionate_3d(&c, *period)),
                (other, _) => return Err(other.mismatch(name, "coordinate")),
            },

            Stage::ColumnarTransposition { keyword } => match input {
                Stream::Text(v) => Stream::Text(columnar(&v, keyword, forward)?),
                Stream::Digits(v) => Stream::Digits(columnar(&v, keyword, forward)?),
                other => return Err(other.mismatch(name, "text")),
            },

            Stage::AlphabetKeystream { keystream, alphabet } => {
                let symbols = input.into_text(name)?;
                let values = symbols
                    .iter()
                    .enumerate()
                    .map(|(position, &symbol)| {
                        alphabet
                            .index_of(symbol)
                            .map(|i| i as u32)
                            .ok_or(Error::SymbolNotInAlphabet { symbol, position })
                    })
                    .collect::<Result<Vec<u32>>>()?;

                let (values, key) =
                    keystream.apply_traced(&values, alphabet.len() as u32, direction);
                let text = values
                    .into_iter()
                    .filter_map(|v| alphabet.symbol(v as usize))
                    .collect();
                return Ok((Stream::Text(text), Some(key)));
            }

            Stage::DigitKeystream { keystream } => {
                let digits: Vec<u32> =
                    input.into_digits(name)?.into_iter().map(u32::from).collect();
                let (values, key) = keystream.apply_traced(&digits, 10, direction);
                let digits = values.into_iter().map(|v| v as u8).collect();
                return Ok((Stream::Digits(digits), Some(key)));
            }

            Stage::CoordinateKeystream { keystream, size } => {
                let coords = input.into_coordinates(name)?;
                Stream::Coordinates(keystream.apply_coordinates(&coords, *size, direction))
            }
        };

        Ok((output, None))
    }
}

fn mode_name(mode: KeystreamMode) -> &'static str {
    match mode {
        KeystreamMode::Static => "static",
        KeystreamMode::ChainAddition => "chain",
    }
}

fn columnar<T: Clone>(symbols: &[T], keyword: &str, forward: bool) -> Result<Vec<T>> {
    if forward {
        transpose(symbols, keyword)
    } else {
        untranspose(symbols, keyword)
    }
}

/// Index of every coordinate letter (ASCII case-insensitive).
fn letters_to_indices(text: &[char], letters: &str) -> Result<Vec<u8>> {
    text.iter()
        .enumerate()
        .map(|(position, &c)| {
            let upper = c.to_ascii_uppercase();
            letters
                .chars()
                .position(|l| l == upper)
                .map(|i| i as u8)
                .ok_or_else(|| Error::MalformedCoordinateStream {
                    position,
                    reason: format!("{:?} is not a coordinate letter", c),
                })
        })
        .collect()
}

fn indices_to_letters(digits: &[u8], letters: &str) -> Result<Vec<char>> {
    let letters: Vec<char> = letters.chars().collect();
    digits
        .iter()
        .enumerate()
        .map(|(position, &d)| {
            letters
                .get(d as usize)
                .copied()
                .ok_or_else(|| Error::MalformedCoordinateStream {
                    position,
                    reason: format!("digit {} has no coordinate letter", d),
                })
        })
        .collect()
}

/// Whether greedy decoding would stop on a row prefix with nothing after it.
fn ends_with_lone_prefix(digits: &[u8], board: &Checkerboard) -> bool {
    let mut i = 0;
    while i < digits.len() {
        let last = i + 1 == digits.len();
        if last {
            return board.is_prefix(digits[i]);
        }
        i += if board.is_prefix(digits[i]) { 2 } else { 1 };
    }
    false
}

/// A named, ordered list of stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(name: &str, stages: Vec<Stage>) -> Self {
        Self {
            name: name.to_string(),
            stages,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage labels in encryption order.
    pub fn labels(&self) -> Vec<String> {
        self.stages.iter().map(Stage::label).collect()
    }

    /// Run every stage forwards.
    pub fn encrypt(&self, input: Stream) -> Result<Stream> {
        self.stages.iter().try_fold(input, |stream, stage| stage.forward(stream))
    }

    /// Run every stage inverted, last stage first.
    pub fn decrypt(&self, input: Stream) -> Result<Stream> {
        self.stages
            .iter()
            .rev()
            .try_fold(input, |stream, stage| stage.inverse(stream))
    }

    /// Run in `direction`, recording every stage in a metrics value.
    pub fn run_traced(
        &self,
        input: Stream,
        direction: Direction,
    ) -> Result<(Stream, PipelineMetrics)> {
        let mut metrics = PipelineMetrics::new(&self.name, direction);
        metrics.input_symbols = input.len();
        metrics.output_symbols = input.len();

        let ordered: Vec<&Stage> = match direction {
            Direction::Encrypt => self.stages.iter().collect(),
            Direction::Decrypt => self.stages.iter().rev().collect(),
        };

        let mut stream = input;
        for stage in ordered {
            let input_len = stream.len();
            let (output, key) = stage.apply(stream, direction)?;
            let label = match direction {
                Direction::Encrypt => stage.label(),
                Direction::Decrypt => format!("inverse({})", stage.label()),
            };
            metrics.record(label, input_len, output.len());
            if key.is_some() {
                metrics.final_key = key;
            }
            stream = output;
        }

        metrics.complete();
        Ok((stream, metrics))
    }
}
