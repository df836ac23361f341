//! Straddling checkerboard cipher.
//!
//! Text is written as checkerboard digits, then a numeric keystream is
//! added digit by digit modulo 10. The ciphertext is the digit string; it
//! is not mapped back through the checkerboard, since a shifted stream is
//! rarely a valid code sequence.
//!
//! # Design
//!
//! - The checkerboard type and keyword come from [`Options`]; the alphabet
//!   defaults to the letters of the configured language
//! - Alphabetic keys become the checkerboard codes of their letters
//! - Chain addition follows `use_chain_addition`

use crate::alphabet::Alphabet;
use crate::checkerboard::{Checkerboard, CheckerboardStrategy};
use crate::ciphers::{prepare_digits, prepare_lenient};
use crate::config::{KeyType, Options};
use crate::error::{Error, Result};
use crate::fractionation::checkerboard_encode;
use crate::keystream::{parse_numeric_key, Direction, Keystream, KeystreamMode};
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};

pub const NAME: &str = "straddling_checkerboard";

/// Build the straddling checkerboard pipeline.
///
/// # Errors
/// - `MissingParameter` for a keyword board without a keyword
/// - `EmptyInput` / `InvalidKey` for an unusable key
/// - checkerboard alphabet errors
pub fn pipeline(key: &str, options: &Options) -> Result<Pipeline> {
    options.validate()?;

    let checkerboard = checkerboard(options)?;
    let key = key_values(key, options.key_type, &checkerboard)?;
    let mode = KeystreamMode::from_chain_flag(options.use_chain_addition);
    let keystream = Keystream::new(key, mode)?;

    Ok(Pipeline::new(
        NAME,
        vec![
            Stage::CheckerboardEncode { checkerboard },
            Stage::DigitKeystream { keystream },
        ],
    ))
}

fn checkerboard(options: &Options) -> Result<Checkerboard> {
    let strategy = CheckerboardStrategy::from_type(
        options.checkerboard_type,
        options.keyword.as_deref(),
        options.language,
    )?;
    Checkerboard::build(&strategy, &options.alphabet_or(Alphabet::letters))
}

/// Digits of a key.
///
/// Numeric keys are used as written. Alphabetic keys are encoded through
/// the checkerboard, so `"at"` on a standard English board is `0`, `2`, `1`.
///
/// # Errors
/// - `InvalidKey` for a character with no key digits
/// - `EmptyInput` for a key with no symbols
pub fn key_values(key: &str, key_type: KeyType, checkerboard: &Checkerboard) -> Result<Vec<u32>> {
    match key_type {
        KeyType::Numeric => parse_numeric_key(key),
        KeyType::Alphabetic => {
            let mut digits = Vec::with_capacity(key.len() * 2);
            for (position, c) in key.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let code = checkerboard
                    .normalize(c)
                    .and_then(|s| checkerboard.code(s))
                    .ok_or(Error::InvalidKey { symbol: c, position })?;
                digits.extend(code.digits().into_iter().map(u32::from));
            }
            if digits.is_empty() {
                return Err(Error::EmptyInput { what: "key" });
            }
            Ok(digits)
        }
    }
}

/// Encrypt `plaintext` into a digit string. Symbols missing from the
/// checkerboard are skipped.
///
/// # Errors
/// See [`pipeline`]; also `EmptyInput` if no symbol remains.
pub fn encrypt(plaintext: &str, key: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt a digit string. Whitespace is skipped.
///
/// # Errors
/// See [`pipeline`]; also `MalformedCoordinateStream` for a non-digit, a
/// dangling row prefix or an unassigned code.
pub fn decrypt(ciphertext: &str, key: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(key, options)?;
    let digits = prepare_digits(ciphertext, "ciphertext")?;
    Ok(pipeline.decrypt(Stream::Digits(digits))?.render())
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

/// [`decrypt`] with per-stage metrics.
pub fn decrypt_traced(
    ciphertext: &str,
    key: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(key, options)?;
    let digits = prepare_digits(ciphertext, "ciphertext")?;
    let kept = digits.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Digits(digits), Direction::Decrypt)?;
    metrics.record_text(ciphertext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

/// Plain checkerboard digits of `text`, without any key.
pub fn to_digits(text: &str, options: &Options) -> Result<Vec<u8>> {
    let checkerboard = checkerboard(options)?;
    let symbols = prepare_lenient(text, "plaintext", |c| checkerboard.normalize(c))?;
    checkerboard_encode(&symbols, &checkerboard)
}

fn plaintext_symbols(pipeline: &Pipeline, plaintext: &str) -> Result<Vec<char>> {
    match pipeline.stages().first() {
        Some(Stage::CheckerboardEncode { checkerboard }) => {
            prepare_lenient(plaintext, "plaintext", |c| checkerboard.normalize(c))
        }
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a checkerboard stage",
            pipeline.name()
        ))),
    }
}
