//! Bifid cipher.
//!
//! Symbols are located in a keyword square, the rows of a block are written
//! out followed by its columns, and the combined stream is read back as
//! coordinate pairs. With a period the text is split into blocks of that
//! many symbols; without one the whole message is a single block.

use crate::ciphers::{complete_square_alphabet, prepare_lenient, require_key};
use crate::config::Options;
use crate::error::{AlphabetError, Error, Result};
use crate::keystream::Direction;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Pipeline, Stage, Stream};
use crate::square::{Square, SquareStrategy};

pub const NAME: &str = "bifid";

/// Build the Bifid pipeline for a square keyword.
///
/// # Errors
/// - `EmptyInput` for an empty keyword
/// - `Alphabet(NotSquare)` when the alphabet does not fill the square
/// - `Config` for a zero period
pub fn pipeline(keyword: &str, options: &Options) -> Result<Pipeline> {
    options.validate()?;
    require_key(keyword, "square keyword")?;

    let alphabet = options.alphabet_or(complete_square_alphabet);
    let square = Square::build(&SquareStrategy::Keyword(keyword.to_string()), &alphabet)?;
    if !square.is_complete() {
        return Err(AlphabetError::NotSquare { len: alphabet.len() }.into());
    }

    Ok(Pipeline::new(
        NAME,
        vec![
            Stage::SquareCoordinates {
                square: square.clone(),
            },
            Stage::Fractionate {
                period: options.period,
            },
            Stage::Invert(Box::new(Stage::SquareCoordinates { square })),
        ],
    ))
}

/// Encrypt `plaintext`, skipping symbols the square lacks.
pub fn encrypt(plaintext: &str, keyword: &str, options: &Options) -> Result<String> {
    run(plaintext, keyword, options, Direction::Encrypt)
}

/// Decrypt `ciphertext`, skipping symbols the square lacks.
pub fn decrypt(ciphertext: &str, keyword: &str, options: &Options) -> Result<String> {
    run(ciphertext, keyword, options, Direction::Decrypt)
}

/// Encrypt or decrypt with per-stage metrics.
pub fn run_traced(
    text: &str,
    keyword: &str,
    options: &Options,
    direction: Direction,
) -> Result<(String, PipelineMetrics)> {
    let pipeline = pipeline(keyword, options)?;
    let symbols = prepare(&pipeline, text, direction)?;
    let kept = symbols.len();

    let (stream, mut metrics) = pipeline.run_traced(Stream::Text(symbols), direction)?;
    metrics.record_text(text.chars().count(), kept);
    Ok((stream.render(), metrics))
}

fn run(text: &str, keyword: &str, options: &Options, direction: Direction) -> Result<String> {
    let pipeline = pipeline(keyword, options)?;
    let symbols = Stream::Text(prepare(&pipeline, text, direction)?);
    let output = match direction {
        Direction::Encrypt => pipeline.encrypt(symbols)?,
        Direction::Decrypt => pipeline.decrypt(symbols)?,
    };
    Ok(output.render())
}

fn prepare(pipeline: &Pipeline, text: &str, direction: Direction) -> Result<Vec<char>> {
    let what = match direction {
        Direction::Encrypt => "plaintext",
        Direction::Decrypt => "ciphertext",
    };
    match pipeline.stages().first() {
        Some(Stage::SquareCoordinates { square }) => {
            prepare_lenient(text, what, |c| square.normalize(c))
        }
        _ => Err(Error::Config(format!(
            "{} pipeline does not start with a square stage",
            pipeline.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, Language};

    #[test]
    fn test_known_value() {
        // h=(1,2) e=(0,4): rows 1 0, columns 2 4 -> (1,0)=f (2,4)=p
        assert_eq!(encrypt("he", "a", &Options::default()).unwrap(), "fp");
        assert_eq!(decrypt("fp", "a", &Options::default()).unwrap(), "he");
    }

    #[test]
    fn test_round_trip_with_keyword() {
        let ciphertext = encrypt("Flee at once", "UNCOPYRIGHTABLE", &Options::default()).unwrap();
        assert_eq!(ciphertext.len(), 10);
        let plaintext = decrypt(&ciphertext, "UNCOPYRIGHTABLE", &Options::default()).unwrap();
        assert_eq!(plaintext, "fleeatonce");
    }

    #[test]
    fn test_period_changes_blocks() {
        let periodic = Options {
            period: Some(5),
            ..Options::default()
        };
        let text = "defend the east wall of the castle";
        let ciphertext = encrypt(text, "FORTIFICATION", &periodic).unwrap();
        assert_eq!(
            decrypt(&ciphertext, "FORTIFICATION", &periodic).unwrap(),
            "defendtheeastwallofthecastle"
        );
    }

    #[test]
    fn test_period_one_is_identity() {
        let options = Options {
            period: Some(1),
            ..Options::default()
        };
        assert_eq!(encrypt("castle", "KEY", &options).unwrap(), "castle");
    }

    #[test]
    fn test_turkish_square() {
        let options = Options {
            language: Language::Turkish,
            ..Options::default()
        };
        let ciphertext = encrypt("Ağaç gölge", "DENİZ", &options).unwrap();
        assert_eq!(decrypt(&ciphertext, "DENİZ", &options).unwrap(), "ağaçgölge");
    }

    #[test]
    fn test_empty_keyword() {
        assert_eq!(
            encrypt("hello", "", &Options::default()),
            Err(Error::EmptyInput {
                what: "square keyword"
            })
        );
    }

    #[test]
    fn test_padded_square_refused() {
        let options = Options {
            alphabet: Some(Alphabet::new("abcdefg").unwrap()),
            ..Options::default()
        };
        assert_eq!(
            encrypt("abc", "KEY", &options),
            Err(Error::Alphabet(AlphabetError::NotSquare { len: 7 }))
        );
    }

    #[test]
    fn test_zero_period_rejected() {
        let options = Options {
            period: Some(0),
            ..Options::default()
        };
        assert!(matches!(encrypt("abc", "KEY", &options), Err(Error::Config(_))));
    }

    #[test]
    fn test_traced() {
        let (ciphertext, metrics) =
            run_traced("h e!", "a", &Options::default(), Direction::Encrypt).unwrap();
        assert_eq!(ciphertext, "fp");
        assert_eq!(metrics.skipped_chars, 2);
        assert_eq!(metrics.stages[1].stage, "fractionate");
    }
}
