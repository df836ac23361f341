//! Keyed columnar transposition.
//!
//! The stream is written row-major under the keyword, one column per
//! keyword symbol, and read out column by column in keyword rank order.
//! The last row may be short; nothing is padded, so column lengths differ
//! by at most one.
//!
//! # Inverse
//!
//! With `n` symbols and `k` columns, `n / k` full rows exist and the first
//! `n % k` columns (by original index) hold one extra symbol. Walking the
//! columns in rank order and taking that many symbols each rebuilds the
//! grid exactly.

use crate::error::{Error, Result};

/// Column indices in read order: stable ascending sort of the keyword's
/// lowercase symbols.
pub fn column_order(keyword: &str) -> Vec<usize> {
    let keys: Vec<char> = keyword
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&i| keys[i]);
    order
}

/// Read `symbols` out by columns in keyword rank order.
///
/// # Errors
/// `EmptyInput` if the keyword is empty.
pub fn transpose<T: Clone>(symbols: &[T], keyword: &str) -> Result<Vec<T>> {
    let order = checked_order(keyword)?;
    let k = order.len();

    let mut out = Vec::with_capacity(symbols.len());
    for &col in &order {
        out.extend(symbols.iter().skip(col).step_by(k).cloned());
    }
    Ok(out)
}

/// Exact inverse of [`transpose`] for the same keyword.
///
/// # Errors
/// `EmptyInput` if the keyword is empty.
pub fn untranspose<T: Clone>(symbols: &[T], keyword: &str) -> Result<Vec<T>> {
    let order = checked_order(keyword)?;
    let k = order.len();
    let n = symbols.len();
    let full_rows = n / k;
    let remainder = n % k;

    let mut columns: Vec<&[T]> = vec![&symbols[..0]; k];
    let mut offset = 0;
    for &col in &order {
        let len = full_rows + usize::from(col < remainder);
        columns[col] = &symbols[offset..offset + len];
        offset += len;
    }

    let mut out = Vec::with_capacity(n);
    for row in 0..=full_rows {
        for column in &columns {
            if let Some(symbol) = column.get(row) {
                out.push(symbol.clone());
            }
        }
    }
    Ok(out)
}

fn checked_order(keyword: &str) -> Result<Vec<usize>> {
    if keyword.is_empty() {
        return Err(Error::EmptyInput {
            what: "transposition key",
        });
    }
    Ok(column_order(keyword))
}

/// One or more columnar passes, each with its own keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transposition {
    keywords: Vec<String>,
}

impl Transposition {
    /// Passes applied in the given order.
    ///
    /// # Errors
    /// `EmptyInput` if there are no passes or a keyword is empty.
    pub fn new(keywords: Vec<String>) -> Result<Self> {
        if keywords.is_empty() || keywords.iter().any(|k| k.is_empty()) {
            return Err(Error::EmptyInput {
                what: "transposition key",
            });
        }
        Ok(Self { keywords })
    }

    /// The same keyword applied `passes` times.
    pub fn repeated(keyword: &str, passes: usize) -> Result<Self> {
        Self::new(vec![keyword.to_string(); passes])
    }

    pub fn passes(&self) -> usize {
        self.keywords.len()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Apply every pass in order.
    pub fn apply<T: Clone>(&self, symbols: &[T]) -> Result<Vec<T>> {
        let mut current = symbols.to_vec();
        for keyword in &self.keywords {
            current = transpose(&current, keyword)?;
        }
        Ok(current)
    }

    /// Undo every pass, last pass first.
    pub fn invert<T: Clone>(&self, symbols: &[T]) -> Result<Vec<T>> {
        let mut current = symbols.to_vec();
        for keyword in self.keywords.iter().rev() {
            current = untranspose(&current, keyword)?;
        }
        Ok(current)
    }
}
