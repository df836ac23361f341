//! Trifid cipher.
//!
//! The three-dimensional Bifid: symbols are located in a 3×3×3 keyword
//! cube, and the layers, rows and columns of a block are written out in
//! turn and read back as triples. The cube holds the 26 English letters
//! and `.` unless the options name another 27-symbol alphabet.

use crate::alphabet::Alphabet;
use crate::ciphers::{prepare_lenient, require_key};
use crate::config::Options;
use crate::error::{Error, Result};
use crate::keystream::Direction;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{Cube, SquareStrategy};

pub const NAME: &str = "trifid";

/// Build the Trifid pipeline for a cube keyword.
///
/// # Errors
/// - `EmptyInput` for an empty keyword
/// - `Alphabet(SizeMismatch)` unless the alphabet has 27 symbols
/// - `Config` for a zero period
pub fn pipeline(keyword: &str, options: &Options) -> Result<Pipeline> {
    options.validate()?;
    require_key(keyword, "cube keyword")?;

    let alphabet = options.alphabet.clone().unwrap_or_else(Alphabet::trifid);
    let cube = Cube::build(&SquareStrategy::Keyword(keyword.to_string()), &alphabet)?;

    Ok(Pipeline::new(
        NAME,
        vec![
            Stage::CubeCoordinates { cube: cube.clone() },
            Stage::Fractionate {
                period: options.period,
            },
            Stage::Invert(Box::new(Stage::CubeCoordinates { cube })),
        ],
    ))
}

/// Encrypt `plaintext`, skipping symbols the cube lacks.
pub fn encrypt(plaintext: &str, keyword: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(keyword, options)?;
    let symbols = prepare(&pipeline, plaintext, "plaintext")?;
    Ok(pipeline.encrypt(Stream::Text(symbols))?.render())
}

/// Decrypt `ciphertext`, skipping symbols the cube lacks.
pub fn decrypt(ciphertext: &str, keyword: &str, options: &Options) -> Result<String> {
    let pipeline = pipeline(keyword, options)?;
    let symbols = prepare(&pipeline, ciphertext, "ciphertext")?;
    Ok(pipeline.decrypt(Stream::Text(symbols))?.render())
}

/// [`encrypt`] with per-stage metrics.
pub fn encrypt_traced(
    plaintext: &str,
    keyword: &str,
    options: &Options,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(keyword, options)?;
    let symbols = prepare(&pipeline, plaintext, "plaintext")?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), Direction::Encrypt)?;
    metrics.record_text(plaintext.chars().count(), kept);
    Ok((stream.render(), metrics))
}

fn prepare(pipeline: &Pipeline, text: &str, what: &'static str) -> Result<Vec<char>> {
    match pipeline.stages().first() {
        Some(Stage::CubeCoordinates { cube }) => prepare_lenient(text, what, |c| cube.normalize(c)),
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a cube stage",
            pipeline.name()
        ))),
    }
}
