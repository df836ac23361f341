//! ADFGVX cipher and its 5×5 and 7×7 siblings.
//!
//! Each symbol becomes a pair of coordinate letters from a Polybius square,
//! then the letter stream goes through one to three keyed columnar passes.
//!
//! # Design
//!
//! - The square type, square keyword and alphabet come from [`Options`]
//! - The transposition key is the cipher key
//! - Encryption drops whitespace and rejects any other symbol outside the
//!   square; ciphertext is uppercase

use crate::alphabet::{Alphabet, Language};
use crate::ciphers::{prepare_strict, require_key};
use crate::config::Options;
use crate::error::{Error, Result};
use crate::keystream::Direction;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{coordinate_letters, Square, SquareStrategy};
use std::fmt;

/// Square size and coordinate letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// 5×5, `ADFGX`, English letters with `j` = `i`
    Adfgx,
    /// 6×6, `ADFGVX`, letters and digits
    #[default]
    Adfgvx,
    /// 7×7, `ADFGVZX`, letters, digits and punctuation
    Adfgvzx,
}

impl Variant {
    pub fn size(self) -> usize {
        match self {
            Variant::Adfgx => 5,
            Variant::Adfgvx => 6,
            Variant::Adfgvzx => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Adfgx => "adfgx",
            Variant::Adfgvx => "adfgvx",
            Variant::Adfgvzx => "adfgvzx",
        }
    }

    /// Alphabet used when the options do not name one.
    fn default_alphabet(self, language: Language) -> Alphabet {
        match self {
            Variant::Adfgx => Alphabet::letters(Language::English),
            Variant::Adfgvx => Alphabet::composite(language),
            Variant::Adfgvzx => Alphabet::full_square(language),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the pipeline for `variant` with transposition key `key`.
///
/// # Errors
/// - `EmptyInput` for an empty key
/// - `Config` for out-of-range options
/// - square strategy and alphabet errors
pub fn pipeline(variant: Variant, key: &str, options: &Options) -> Result<Pipeline> {
    options.validate()?;
    require_key(key, "transposition key")?;

    let square = variant_square(variant, options)?;
    let letters = coordinate_letters(square.size()).ok_or_else(|| {
        Error::Config(format!("no coordinate letters for a {0}x{0} square", square.size()))
    })?;

    let mut stages = vec![Stage::PolybiusSubstitute { square, letters }];
    for _ in 0..options.transposition_passes {
        stages.push(Stage::ColumnarTransposition {
            keyword: key.to_string(),
        });
    }

    Ok(Pipeline::new(variant.name(), stages))
}

fn variant_square(variant: Variant, options: &Options) -> Result<Square> {
    let strategy = SquareStrategy::from_type(
        options.square_type,
        options.keyword.as_deref(),
        &options.mono_params,
        options.language,
    )?;
    let alphabet = options.alphabet_or(|language| variant.default_alphabet(language));
    Square::build_with_size(&strategy, &alphabet, variant.size())
}

/// Encrypt with the 6×6 ADFGVX square.
pub fn encrypt(plaintext: &str, key: &str, options: &Options) -> Result<String> {
    encrypt_with(Variant::Adfgvx, plaintext, key, options)
}

/// Decrypt with the 6×6 ADFGVX square.
pub fn decrypt(ciphertext: &str, key: &str, options: &Options) -> Result<String> {
    decrypt_with(Variant::Adfgvx, ciphertext, key, options)
}

/// Encrypt with a chosen variant.
///
/// # Errors
/// See [`pipeline`]; also `SymbolNotInSquare` for a plaintext symbol the
/// square lacks, and `EmptyInput` for blank plaintext.
pub fn encrypt_with(
    variant: Variant,
    plaintext: &str,
    key: &str,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(variant, key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt with a chosen variant.
///
/// # Errors
/// See [`pipeline`]; also `MalformedCoordinateStream` for a character that
/// is not a coordinate letter or an odd number of letters.
pub fn decrypt_with(
    variant: Variant,
    ciphertext: &str,
    key: &str,
    options: &Options,
) -> Result<String> {
    let pipeline = pipeline(variant, key, options)?;
    let letters = ciphertext_letters(&pipeline, ciphertext)?;
    Ok(pipeline.decrypt(Stream::Text(letters))?.render())
}

/// [`encrypt_with`] with per-stage metrics.
pub fn encrypt_traced(
    variant: Variant,
    plaintext: &str,
    key: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(variant, key, options)?;
    let symbols = plaintext_symbols(&pipeline, plaintext)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Encrypt)?;
    metrics.record_text(plaintext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

fn polybius(pipeline: &Pipeline) -> Result<(&Square, &'static str)> {
    match pipeline.stages().first() {
        Some(Stage::PolybiusSubstitute { square, letters }) => Ok((square, *letters)),
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a polybius stage",
            pipeline.name()
        ))),
    }
}

fn plaintext_symbols(pipeline: &Pipeline, plaintext: &str) -> Result<Vec<char>> {
    let (square, _) = polybius(pipeline)?;
    prepare_strict(
        plaintext,
        "plaintext",
        |c| square.normalize(c),
        |symbol, position| Error::SymbolNotInSquare { symbol, position },
    )
}

fn ciphertext_letters(pipeline: &Pipeline, ciphertext: &str) -> Result<Vec<char>> {
    let (_, letters) = polybius(pipeline)?;
    prepare_strict(
        ciphertext,
        "ciphertext",
        |c| {
            let upper = c.to_ascii_uppercase();
            letters.contains(upper).then_some(upper)
        },
        |symbol, position| Error::MalformedCoordinateStream {
            position,
            reason: format!("{:?} is not one of {}", symbol, letters),
        },
    )
}
