//! Rasterschlüssel 44.
//!
//! Text is located in a keyword Polybius square and each symbol is written
//! as its zero-based row and column digits. An optional grid key scrambles
//! the digit stream with keyed columnar transposition, repeated
//! `transposition_passes` times.
//!
//! The square must have no padding cells. The default alphabet is the
//! 36-symbol alphabet of the configured language (6×6), so every
//! coordinate digit is in `0..=5`.

use crate::alphabet::Alphabet;
use crate::ciphers::{prepare_digits, prepare_lenient, require_key};
use crate::config::Options;
use crate::error::{AlphabetError, Error, Result};
use crate::keystream::Direction;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{Square, SquareStrategy};

pub const NAME: &str = "rasterschluessel_44";

/// Build the pipeline for a square keyword and an optional grid key.
///
/// # Errors
/// - `EmptyInput` for an empty keyword or grid key
/// - `Alphabet(NotSquare)` when the alphabet does not fill the square
pub fn pipeline(keyword: &str, grid_key: Option<&str>, options: &Options) -> Result<Pipeline> {
    options.validate()?;
    require_key(keyword, "square keyword")?;

    let alphabet = options.alphabet_or(Alphabet::composite);
    let square = Square::build(&SquareStrategy::Keyword(keyword.to_string()), &alphabet)?;
    if !square.is_complete() {
        return Err(AlphabetError::NotSquare { len: alphabet.len() }.into());
    }

    let size = square.size();
    let mut stages = vec![
        Stage::SquareCoordinates { square },
        Stage::CoordinatesToDigits { size },
    ];
    if let Some(grid_key) = grid_key {
        require_key(grid_key, "grid key")?;
        for _ in 0..options.transposition_passes {
            stages.push(Stage::ColumnarTransposition {
                keyword: grid_key.to_string(),
            });
        }
    }

    Ok(Pipeline::new(NAME, stages))
}

/// Encrypt `plaintext` into a digit string. Symbols missing from the
/// square are skipped.
pub fn encrypt(
    plaintext: &str,
    keyword: &str,
    grid_key: Option<&str>,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(keyword, grid_key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt a digit string. Whitespace is skipped.
///
/// # Errors
/// See [`pipeline`]; also `MalformedCoordinateStream` for a non-digit, an
/// odd digit count or a digit outside the square.
pub fn decrypt(
    ciphertext: &str,
    keyword: &str,
    grid_key: Option<&str>,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(keyword, grid_key, options)?;
    let digits = prepare_digits(ciphertext, "ciphertext")?;
    Ok(pipeline.decrypt(Stream::Digits(digits))?.render())
}

/// [`encrypt`] with per-stage metrics.
pub fn encrypt_traced(
    plaintext: &str,
    keyword: &str,
    grid_key: Option<&str>,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(keyword, grid_key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Encrypt)?;
    metrics.record_text(plaintext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

fn plaintext_symbols(pipeline: &Pipeline, plaintext: &str) -> Result<Vec<char>> {
    match pipeline.stages().first() {
        Some(Stage::SquareCoordinates { square }) => {
            prepare_lenient(plaintext, "plaintext", |c| square.normalize(c))
        }
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a square stage",
            pipeline.name()
        ))),
    }
}
