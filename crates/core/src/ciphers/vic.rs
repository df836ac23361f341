//! VIC cipher.
//!
//! Text goes through a 6×6 Polybius square to ADFGVX letter pairs, the
//! pairs become digits, a keyword checkerboard turns the digits back into
//! text, one to three columnar passes scramble it, and a numeric key is
//! added modulo the alphabet length (statically or by chain addition).
//!
//! # Keys
//!
//! - `polybius_key`: square keyword when the square type is `keyword`
//! - `checkerboard_key`: checkerboard keyword
//! - `transposition_key`: columnar keyword, reused for every pass
//! - `numeric_key`: decimal digits for the keystream
//!
//! All four must be non-empty whatever the square type.
//!
//! # Alphabet
//!
//! The alphabet must have exactly 36 symbols so that every Polybius digit
//! pair decodes through the checkerboard. The default is the 36-symbol
//! alphabet of the configured language.

use crate::alphabet::Alphabet;
use crate::checkerboard::{Checkerboard, CheckerboardStrategy};
use crate::ciphers::{prepare_lenient, prepare_strict, require_key};
use crate::config::Options;
use crate::error::{AlphabetError, Error, Result};
use crate::keygen::VicKeys;
use crate::keystream::{Direction, Keystream, KeystreamMode};
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{Square, SquareStrategy};
use rand::Rng;

/// Cipher name used in pipelines and metrics
pub const NAME: &str = "vic";

/// Coordinate letters of the VIC square
pub const LETTERS: &str = "ADFGVX";

/// Symbols in a VIC alphabet
pub const ALPHABET_SIZE: usize = 36;

/// Build the VIC pipeline for a set of keys.
///
/// # Errors
/// - `EmptyInput` for an empty key
/// - `Alphabet(SizeMismatch)` unless the alphabet has 36 symbols
/// - `Config` for out-of-range options
/// - square strategy errors (`MissingParameter`, `NonInvertibleParameter`)
pub fn pipeline(
    polybius_key: &str,
    checkerboard_key: &str,
    transposition_key: &str,
    numeric_key: &str,
    options: &Options,
) -> Result<Pipeline> {
    options.validate()?;
    require_key(polybius_key, "polybius key")?;
    require_key(checkerboard_key, "checkerboard key")?;
    require_key(transposition_key, "transposition key")?;
    require_key(numeric_key, "numeric key")?;

    let alphabet = vic_alphabet(options)?;

    let strategy = SquareStrategy::from_type(
        options.square_type,
        Some(polybius_key),
        &options.mono_params,
        options.language,
    )?;
    let square = Square::build(&strategy, &alphabet)?;
    let checkerboard = Checkerboard::build(
        &CheckerboardStrategy::Keyword(checkerboard_key.to_string()),
        &alphabet,
    )?;
    let keystream = Keystream::from_digits(
        numeric_key,
        KeystreamMode::from_chain_flag(options.use_chain_addition),
    )?;

    let mut stages = vec![
        Stage::PolybiusSubstitute {
            square,
            letters: LETTERS,
        },
        Stage::PairsToDigits { letters: LETTERS },
        Stage::CheckerboardDigitsToLetters { checkerboard },
    ];
    for _ in 0..options.transposition_passes {
        stages.push(Stage::ColumnarTransposition {
            keyword: transposition_key.to_string(),
        });
    }
    stages.push(Stage::AlphabetKeystream {
        keystream,
        alphabet,
    });

    Ok(Pipeline::new(NAME, stages))
}

fn vic_alphabet(options: &Options) -> Result<Alphabet> {
    let alphabet = options.alphabet_or(Alphabet::composite);
    if alphabet.len() != ALPHABET_SIZE {
        return Err(AlphabetError::SizeMismatch {
            expected: ALPHABET_SIZE,
            actual: alphabet.len(),
        }
        .into());
    }
    Ok(alphabet)
}

/// Encrypt `plaintext`. Characters outside the alphabet are skipped.
///
/// # Errors
/// See [`pipeline`]; also `EmptyInput` if no plaintext symbol remains.
pub fn encrypt(
    plaintext: &str,
    polybius_key: &str,
    checkerboard_key: &str,
    transposition_key: &str,
    numeric_key: &str,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(
        polybius_key,
        checkerboard_key,
        transposition_key,
        numeric_key,
        options,
    )?;
    let symbols = plaintext_symbols(plaintext, options)?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt `ciphertext`. Whitespace is ignored; any other character
/// outside the alphabet is an error.
///
/// # Errors
/// See [`pipeline`]; also `SymbolNotInAlphabet`, and
/// `MalformedCoordinateStream` when the keys do not match the ciphertext.
pub fn decrypt(
    ciphertext: &str,
    polybius_key: &str,
    checkerboard_key: &str,
    transposition_key: &str,
    numeric_key: &str,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(
        polybius_key,
        checkerboard_key,
        transposition_key,
        numeric_key,
        options,
    )?;
    let symbols = ciphertext_symbols(ciphertext, options)?;
    Ok(pipeline.decrypt(Stream::Text(symbols))?.render())
}

/// [`encrypt`] with per-stage metrics.
pub fn encrypt_traced(
    plaintext: &str,
    polybius_key: &str,
    checkerboard_key: &str,
    transposition_key: &str,
    numeric_key: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(
        polybius_key,
        checkerboard_key,
        transposition_key,
        numeric_key,
        options,
    )?;
    let symbols = plaintext_symbols(plaintext, options)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Encrypt)?;
    metrics.record_text(plaintext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

/// [`decrypt`] with per-stage metrics.
pub fn decrypt_traced(
    ciphertext: &str,
    polybius_key: &str,
    checkerboard_key: &str,
    transposition_key: &str,
    numeric_key: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(
        polybius_key,
        checkerboard_key,
        transposition_key,
        numeric_key,
        options,
    )?;
    let symbols = ciphertext_symbols(ciphertext, options)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Decrypt)?;
    metrics.record_text(ciphertext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

/// Encrypt with freshly generated keys, returning the keys alongside.
pub fn encrypt_with_random_keys<R: Rng + ?Sized>(
    rng: &mut R,
    plaintext: &str,
    options: &Options,
) -> Result<(String, VicKeys)> {
    let keys = VicKeys::generate(rng)?;
    let ciphertext = encrypt(
        plaintext,
        &keys.polybius_key,
        &keys.checkerboard_key,
        &keys.transposition_key,
        &keys.numeric_key,
        options,
    )?;
    Ok((ciphertext, keys))
}

fn plaintext_symbols(plaintext: &str, options: &Options) -> Result<Vec<char>> {
    let alphabet = vic_alphabet(options)?;
    prepare_lenient(plaintext, "plaintext", |c| alphabet.normalize(c))
}

fn ciphertext_symbols(ciphertext: &str, options: &Options) -> Result<Vec<char>> {
    let alphabet = vic_alphabet(options)?;
    prepare_strict(
        ciphertext,
        "ciphertext",
        |c| alphabet.normalize(c),
        |symbol, position| Error::SymbolNotInAlphabet { symbol, position },
    )
}
