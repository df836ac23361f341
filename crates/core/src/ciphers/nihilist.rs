//! Nihilist cipher.
//!
//! Symbols are located in a Polybius square, the one-based row and column
//! of each are shifted by the next key value modulo the square size, and
//! the shifted coordinates are read back out of the square.
//!
//! The square must have no padding cells: English uses the 5×5 letter
//! square with `j` = `i`, Turkish the full 6×6 square. Keys are numeric or
//! alphabetic (each letter counts as its alphabet position, `a` = 1).
//! Chain addition is not defined for coordinate arithmetic and is refused.

use crate::alphabet::{Alphabet, Language};
use crate::ciphers::{complete_square_alphabet, prepare_strict};
use crate::config::{KeyType, Options};
use crate::error::{AlphabetError, Error, Result};
use crate::keystream::{parse_numeric_key, Direction, Keystream, KeystreamMode};
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{Square, SquareStrategy};

pub const NAME: &str = "nihilist";

/// Build the Nihilist pipeline.
///
/// # Errors
/// - `Config` when chain addition is requested
/// - `Alphabet(NotSquare)` when the alphabet does not fill the square
/// - `EmptyInput` / `InvalidKey` for an unusable key
pub fn pipeline(key: &str, options: &Options) -> Result<Pipeline> {
    options.validate()?;
    if options.use_chain_addition {
        return Err(Error::Config(
            "chain addition is not available for the nihilist cipher".to_string(),
        ));
    }

    let square = complete_square(options)?;
    let key = key_values(key, options.key_type, options.language)?;
    let keystream = Keystream::new(key, KeystreamMode::Static)?;
    let size = square.size();

    Ok(Pipeline::new(
        NAME,
        vec![
            Stage::SquareCoordinates {
                square: square.clone(),
            },
            Stage::CoordinateKeystream { keystream, size },
            Stage::Invert(Box::new(Stage::SquareCoordinates { square })),
        ],
    ))
}

fn complete_square(options: &Options) -> Result<Square> {
    let strategy = SquareStrategy::from_type(
        options.square_type,
        options.keyword.as_deref(),
        &options.mono_params,
        options.language,
    )?;
    let alphabet = options.alphabet_or(complete_square_alphabet);
    let square = Square::build(&strategy, &alphabet)?;
    if !square.is_complete() {
        return Err(AlphabetError::NotSquare { len: alphabet.len() }.into());
    }
    Ok(square)
}

/// Turn a key into shift values.
///
/// Numeric keys use their digits. Alphabetic keys use each letter's
/// one-based position in the language's letters. Whitespace is ignored.
///
/// # Errors
/// - `InvalidKey` for a character that is not a key symbol
/// - `EmptyInput` for a key with no symbols
pub fn key_values(key: &str, key_type: KeyType, language: Language) -> Result<Vec<u32>> {
    match key_type {
        KeyType::Numeric => parse_numeric_key(key),
        KeyType::Alphabetic => {
            let letters = Alphabet::letters(language);
            let mut values = Vec::with_capacity(key.len());
            for (position, c) in key.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let index = letters
                    .normalize(c)
                    .and_then(|s| letters.index_of(s))
                    .ok_or(Error::InvalidKey { symbol: c, position })?;
                values.push(index as u32 + 1);
            }
            if values.is_empty() {
                return Err(Error::EmptyInput { what: "key" });
            }
            Ok(values)
        }
    }
}

/// Encrypt `plaintext`. Non-letters are skipped; a letter missing from the
/// square is an error.
pub fn encrypt(plaintext: &str, key: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt `ciphertext`. Whitespace is skipped; any other symbol missing
/// from the square is an error.
pub fn decrypt(ciphertext: &str, key: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(key, options)?;
    let symbols = ciphertext_symbols(&pipeline, ciphertext)?;
    Ok(pipeline.decrypt(Stream::Text(symbols))?.render())
}

/// [`encrypt`] with per-stage metrics.
pub fn encrypt_traced(
    plaintext: &str,
    key: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Encrypt)?;
    metrics.record_text(plaintext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

fn pipeline_square(pipeline: &Pipeline) -> Result<&Square> {
    match pipeline.stages().first() {
        Some(Stage::SquareCoordinates { square }) => Ok(square),
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a square stage",
            pipeline.name()
        ))),
    }
}

fn plaintext_symbols(pipeline: &Pipeline, plaintext: &str) -> Result<Vec<char>> {
    let square = pipeline_square(pipeline)?;
    let mut symbols = Vec::with_capacity(plaintext.len());
    for (position, c) in plaintext.chars().enumerate() {
        if !c.is_alphabetic() {
            continue;
        }
        let symbol = square
            .normalize(c)
            .ok_or(Error::SymbolNotInSquare { symbol: c, position })?;
        symbols.push(symbol);
    }
    if symbols.is_empty() {
        return Err(Error::EmptyInput { what: "plaintext" });
    }
    Ok(symbols)
}

fn ciphertext_symbols(pipeline: &Pipeline, ciphertext: &str) -> Result<Vec<char>> {
    let square = pipeline_square(pipeline)?;
    prepare_strict(
        ciphertext,
        "ciphertext",
        |c| square.normalize(c),
        |symbol, position| Error::SymbolNotInSquare { symbol, position },
    )
}
