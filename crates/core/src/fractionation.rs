//! Fractionation: symbols split into coordinates or digits and back.
//!
//! Three representations are supported:
//! - square coordinates, written as digit pairs or ADFGVX letter pairs
//! - checkerboard digit streams
//! - Bifid/Trifid interleaving, which regroups coordinates across symbols
//!
//! # Interleaving
//!
//! For a block of points the row components are written out first, then the
//! column components (and for cubes the layers, rows, columns), and the
//! resulting line is cut back into points. The stream length is preserved.
//! With a period the stream is cut into blocks of that many points first;
//! the last block may be shorter.

use crate::checkerboard::{Checkerboard, Code};
use crate::error::{Error, Result};
use crate::square::{Coord, Coord3, Cube, Square};

/// Look up the coordinates of every symbol.
///
/// # Errors
/// `SymbolNotInSquare` with the index of the first unknown symbol.
pub fn square_encode(symbols: &[char], square: &Square) -> Result<Vec<Coord>> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            square
                .position(symbol)
                .ok_or(Error::SymbolNotInSquare { symbol, position })
        })
        .collect()
}

/// Read the symbol at every coordinate.
///
/// # Errors
/// `MalformedCoordinateStream` for a coordinate outside the grid.
pub fn square_decode(coords: &[Coord], square: &Square) -> Result<Vec<char>> {
    coords
        .iter()
        .enumerate()
        .map(|(position, &coord)| {
            square.symbol_at(coord).ok_or_else(|| out_of_grid(position, coord.row, coord.col))
        })
        .collect()
}

/// Cube counterpart of [`square_encode`].
pub fn cube_encode(symbols: &[char], cube: &Cube) -> Result<Vec<Coord3>> {
    symbols
        .iter()
        .enumerate()
        .map(|(position, &symbol)| {
            cube.position(symbol)
                .ok_or(Error::SymbolNotInSquare { symbol, position })
        })
        .collect()
}

/// Cube counterpart of [`square_decode`].
pub fn cube_decode(coords: &[Coord3], cube: &Cube) -> Result<Vec<char>> {
    coords
        .iter()
        .enumerate()
        .map(|(position, &coord)| {
            cube.symbol_at(coord).ok_or_else(|| Error::MalformedCoordinateStream {
                position,
                reason: format!(
                    "coordinate ({}, {}, {}) is outside the cube",
                    coord.layer, coord.row, coord.col
                ),
            })
        })
        .collect()
}

fn out_of_grid(position: usize, row: usize, col: usize) -> Error {
    Error::MalformedCoordinateStream {
        position,
        reason: format!("coordinate ({}, {}) is outside the square", row, col),
    }
}

/// Write each coordinate as two zero-based digits, row first.
pub fn coords_to_digits(coords: &[Coord]) -> Vec<u8> {
    coords
        .iter()
        .flat_map(|c| [c.row as u8, c.col as u8])
        .collect()
}

/// Regroup a digit stream into coordinates of a `size`×`size` grid.
///
/// # Errors
/// `MalformedCoordinateStream` for an odd length or a digit ≥ `size`.
pub fn digits_to_coords(digits: &[u8], size: usize) -> Result<Vec<Coord>> {
    if digits.len() % 2 != 0 {
        return Err(Error::MalformedCoordinateStream {
            position: digits.len() - 1,
            reason: "odd number of digits".to_string(),
        });
    }
    if let Some(position) = digits.iter().position(|&d| d as usize >= size) {
        return Err(Error::MalformedCoordinateStream {
            position,
            reason: format!("digit {} exceeds grid size {}", digits[position], size),
        });
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| Coord::new(pair[0] as usize, pair[1] as usize))
        .collect())
}

/// Write each coordinate as two coordinate letters (`ADFGVX` style).
///
/// # Errors
/// `MalformedCoordinateStream` when a component has no letter.
pub fn coords_to_letters(coords: &[Coord], letters: &str) -> Result<Vec<char>> {
    let letters: Vec<char> = letters.chars().collect();
    let mut out = Vec::with_capacity(coords.len() * 2);

    for (position, coord) in coords.iter().enumerate() {
        for component in [coord.row, coord.col] {
            let letter = letters
                .get(component)
                .ok_or_else(|| out_of_grid(position, coord.row, coord.col))?;
            out.push(*letter);
        }
    }

    Ok(out)
}

/// Regroup coordinate letters into coordinates. Matching ignores ASCII case.
///
/// # Errors
/// `MalformedCoordinateStream` for an odd length or an unknown letter.
pub fn letters_to_coords(text: &[char], letters: &str) -> Result<Vec<Coord>> {
    if text.len() % 2 != 0 {
        return Err(Error::MalformedCoordinateStream {
            position: text.len() - 1,
            reason: "odd number of coordinate letters".to_string(),
        });
    }

    let letters: Vec<char> = letters.chars().collect();
    let component = |position: usize| -> Result<usize> {
        let c = text[position].to_ascii_uppercase();
        letters
            .iter()
            .position(|&l| l == c)
            .ok_or_else(|| Error::MalformedCoordinateStream {
                position,
                reason: format!("{:?} is not a coordinate letter", text[position]),
            })
    };

    (0..text.len() / 2)
        .map(|i| Ok(Coord::new(component(2 * i)?, component(2 * i + 1)?)))
        .collect()
}

/// Encode symbols as a checkerboard digit stream.
///
/// # Errors
/// `SymbolNotInCheckerboard` with the index of the first unknown symbol.
pub fn checkerboard_encode(symbols: &[char], board: &Checkerboard) -> Result<Vec<u8>> {
    let mut digits = Vec::with_capacity(symbols.len() * 2);
    for (position, &symbol) in symbols.iter().enumerate() {
        let code = board
            .code(symbol)
            .ok_or(Error::SymbolNotInCheckerboard { symbol, position })?;
        digits.extend(code.digits());
    }
    Ok(digits)
}

/// Decode a checkerboard digit stream greedily.
///
/// A two-digit code is tried first when two digits remain, then a
/// single-digit code.
///
/// # Errors
/// `MalformedCoordinateStream` for a digit above 9, a dangling row prefix
/// at the end of the stream, or an unassigned code.
pub fn checkerboard_decode(digits: &[u8], board: &Checkerboard) -> Result<Vec<char>> {
    let mut out = Vec::with_capacity(digits.len());
    let mut i = 0;

    while i < digits.len() {
        let d = digits[i];
        if d > 9 {
            return Err(Error::MalformedCoordinateStream {
                position: i,
                reason: format!("{} is not a decimal digit", d),
            });
        }

        if let Some(&next) = digits.get(i + 1) {
            if let Some(symbol) = board.symbol(Code::Double(d, next)) {
                out.push(symbol);
                i += 2;
                continue;
            }
        }

        match board.symbol(Code::Single(d)) {
            Some(symbol) => {
                out.push(symbol);
                i += 1;
            }
            None => {
                let reason = if board.is_prefix(d) && i + 1 == digits.len() {
                    format!("dangling row prefix {}", d)
                } else {
                    format!("no symbol for code starting with {}", d)
                };
                return Err(Error::MalformedCoordinateStream { position: i, reason });
            }
        }
    }

    Ok(out)
}

/// Parse a string of decimal digits.
///
/// # Errors
/// `MalformedCoordinateStream` at the first non-digit.
pub fn parse_digits(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, c)| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| Error::MalformedCoordinateStream {
                    position,
                    reason: format!("{:?} is not a decimal digit", c),
                })
        })
        .collect()
}

/// Render digits as a string.
pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Bifid interleave: rows of a block, then its columns, regrouped.
pub fn fractionate_2d(coords: &[Coord], period: Option<usize>) -> Vec<Coord> {
    let points: Vec<[usize; 2]> = coords.iter().map(|c| [c.row, c.col]).collect();
    blocks(&points, period, interleave)
        .into_iter()
        .map(|[row, col]| Coord::new(row, col))
        .collect()
}

/// Inverse of [`fractionate_2d`].
pub fn defractionate_2d(coords: &[Coord], period: Option<usize>) -> Vec<Coord> {
    let points: Vec<[usize; 2]> = coords.iter().map(|c| [c.row, c.col]).collect();
    blocks(&points, period, deinterleave)
        .into_iter()
        .map(|[row, col]| Coord::new(row, col))
        .collect()
}

/// Trifid interleave: layers, rows, then columns of a block, regrouped.
pub fn fractionate_3d(coords: &[Coord3], period: Option<usize>) -> Vec<Coord3> {
    let points: Vec<[usize; 3]> = coords.iter().map(|c| [c.layer, c.row, c.col]).collect();
    blocks(&points, period, interleave)
        .into_iter()
        .map(|[layer, row, col]| Coord3::new(layer, row, col))
        .collect()
}

/// Inverse of [`fractionate_3d`].
pub fn defractionate_3d(coords: &[Coord3], period: Option<usize>) -> Vec<Coord3> {
    let points: Vec<[usize; 3]> = coords.iter().map(|c| [c.layer, c.row, c.col]).collect();
    blocks(&points, period, deinterleave)
        .into_iter()
        .map(|[layer, row, col]| Coord3::new(layer, row, col))
        .collect()
}

fn blocks<const D: usize>(
    points: &[[usize; D]],
    period: Option<usize>,
    f: fn(&[[usize; D]]) -> Vec<[usize; D]>,
) -> Vec<[usize; D]> {
    match period {
        Some(p) if p > 0 => points.chunks(p).flat_map(f).collect(),
        _ => f(points),
    }
}

fn interleave<const D: usize>(block: &[[usize; D]]) -> Vec<[usize; D]> {
    let line: Vec<usize> = (0..D)
        .flat_map(|axis| block.iter().map(move |p| p[axis]))
        .collect();
    line.chunks_exact(D)
        .map(|chunk| {
            let mut point = [0; D];
            point.copy_from_slice(chunk);
            point
        })
        .collect()
}

fn deinterleave<const D: usize>(block: &[[usize; D]]) -> Vec<[usize; D]> {
    let n = block.len();
    let line: Vec<usize> = block.iter().flatten().copied().collect();
    (0..n)
        .map(|i| {
            let mut point = [0; D];
            for (axis, value) in point.iter_mut().enumerate() {
                *value = line[axis * n + i];
            }
            point
        })
        .collect()
}
