//! classic-cipher-core: Composite classical ciphers built from reversible stages
//!
//! This library provides the building blocks of pencil-and-paper ciphers
//! and wires them into complete systems:
//! - Polybius squares and 3×3×3 cubes filled by keyword, frequency or a
//!   monoalphabetic bijection (Caesar, Atbash, affine)
//! - Prefix-free straddling checkerboards
//! - Keyed columnar transposition, repeated up to three times
//! - Numeric keystreams, static or by chain addition
//! - VIC, ADFGVX (and ADFGX/ADFGVZX), Nihilist, straddling checkerboard,
//!   Rasterschlüssel 44, Bifid and Trifid ciphers
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `alphabet`: Canonical symbol sets and case folding
//! - `mono`: Monoalphabetic bijections over an alphabet
//! - `square`: Polybius squares and Trifid cubes
//! - `checkerboard`: Straddling checkerboard layout
//! - `fractionation`: Symbols to and from coordinates, digits and letters
//! - `transposition`: Columnar transposition
//! - `keystream`: Modular key addition
//! - `pipeline`: Stages and ordered stage lists
//! - `ciphers`: Named ciphers on top of the pipeline
//! - `config`: Options and strategy names
//! - `keygen`: Random keys from a caller-supplied RNG
//! - `metrics`: Per-stage run metrics
//!
//! ```text
//! plaintext -> [stage 1] -> [stage 2] -> ... -> [stage n] -> ciphertext
//! plaintext <- [stage 1]⁻¹ <- [stage 2]⁻¹ <- ... <- [stage n]⁻¹ <- ciphertext
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **No hidden state**: Pipelines are rebuilt per call; chain addition is a fold
//! - **Deterministic**: Seeded randomness makes generated keys reproducible
//! - **Observable**: Traced runs report every stage
//!
//! # Example
//!
//! ```
//! use classic_cipher_core::{ciphers::vic, Options};
//!
//! let options = Options::default();
//! let ciphertext = vic::encrypt("HELLO", "SECRET", "CIPHER", "KEY", "12345", &options)?;
//! let plaintext = vic::decrypt(&ciphertext, "SECRET", "CIPHER", "KEY", "12345", &options)?;
//! assert_eq!(plaintext, "hello");
//! # Ok::<(), classic_cipher_core::Error>(())
//! ```

pub mod alphabet;
pub mod checkerboard;
pub mod ciphers;
pub mod config;
pub mod error;
pub mod fractionation;
pub mod keygen;
pub mod keystream;
pub mod metrics;
pub mod mono;
pub mod pipeline;
pub mod square;
pub mod transposition;

// Re-export commonly used types
pub use alphabet::{Alphabet, Language};
pub use checkerboard::{build_checkerboard, Checkerboard};
pub use config::Options;
pub use error::{AlphabetError, Error, Result};
pub use keystream::Direction;
pub use metrics::PipelineMetrics;
pub use pipeline::{Pipeline, Stage, Stream};
pub use square::{build_square, Square};
