//! # sheetgate-primitives
//!
//! Cell address and range primitives for spreadsheet-style A1 references.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing addresses or ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Invalid column letters.
    #[error("Invalid column reference: {0}")]
    InvalidColumn(String),

    /// Invalid row number.
    #[error("Invalid row reference: {0}")]
    InvalidRow(String),

    /// Invalid range specification.
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// A cell address in the spreadsheet (e.g., A1, B2, etc.)
///
/// Row and column are zero-based internally; A1 notation is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse from A1 notation (e.g., "A1", "B2", "$C$3")
    pub fn from_a1(s: &str) -> Result<Self, AddressError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::InvalidRange("Empty A1 reference".to_string()));
        }

        let mut chars = trimmed.chars().peekable();

        // Optional $ for absolute column
        if matches!(chars.peek(), Some('$')) {
            chars.next();
        }

        // Parse column letters
        let mut col_letters = String::new();
        while let Some(ch) = chars.peek().copied() {
            if ch.is_ascii_alphabetic() {
                col_letters.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if col_letters.is_empty() {
            return Err(AddressError::InvalidColumn(trimmed.to_string()));
        }

        // Optional $ for absolute row
        if matches!(chars.peek(), Some('$')) {
            chars.next();
        }

        // Parse row digits
        let mut row_digits = String::new();
        while let Some(ch) = chars.peek().copied() {
            if ch.is_ascii_digit() {
                row_digits.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if row_digits.is_empty() || chars.peek().is_some() {
            return Err(AddressError::InvalidRow(trimmed.to_string()));
        }

        let row_num: u32 = row_digits
            .parse()
            .map_err(|_| AddressError::InvalidRow(row_digits.clone()))?;

        if row_num == 0 {
            return Err(AddressError::InvalidRow(row_digits));
        }

        let col_index = column_letters_to_index(&col_letters)?;
        Ok(Self {
            row: row_num - 1,
            col: col_index,
        })
    }

    /// Convert to A1 notation
    pub fn to_a1(&self) -> String {
        let col_letters = column_index_to_letters(self.col);
        format!("{}{}", col_letters, self.row + 1)
    }
}

/// A range of cells (e.g., A1:B10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self { start, end }
    }

    /// Parse from A1 notation; a bare cell reference yields a single-cell range.
    pub fn from_a1(s: &str) -> Result<Self, AddressError> {
        let trimmed = s.trim();
        match trimmed.split_once(':') {
            Some((start, end)) => Ok(Self {
                start: CellAddress::from_a1(start)?,
                end: CellAddress::from_a1(end)?,
            }),
            None => {
                let cell = CellAddress::from_a1(trimmed)?;
                Ok(Self::new(cell, cell))
            }
        }
    }

    /// Return a normalized range where start <= end
    pub fn normalized(&self) -> Self {
        let start_row = self.start.row.min(self.end.row);
        let end_row = self.start.row.max(self.end.row);
        let start_col = self.start.col.min(self.end.col);
        let end_col = self.start.col.max(self.end.col);
        Self {
            start: CellAddress::new(start_row, start_col),
            end: CellAddress::new(end_row, end_col),
        }
    }

    /// Number of rows spanned.
    pub fn rows(&self) -> u32 {
        let n = self.normalized();
        n.end.row - n.start.row + 1
    }

    /// Number of columns spanned.
    pub fn cols(&self) -> u32 {
        let n = self.normalized();
        n.end.col - n.start.col + 1
    }

    /// Convert to A1 notation
    pub fn to_a1(&self) -> String {
        if self.start == self.end {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }
}

/// Convert column letters to a zero-based column index (A → 0, Z → 25, AA → 26).
pub fn column_letters_to_index(col: &str) -> Result<u32, AddressError> {
    if col.is_empty() {
        return Err(AddressError::InvalidColumn(col.to_string()));
    }
    let mut result: u32 = 0;
    for ch in col.chars() {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii_alphabetic() {
            return Err(AddressError::InvalidColumn(col.to_string()));
        }
        let value = (upper as u8 - b'A' + 1) as u32;
        result = result
            .checked_mul(26)
            .and_then(|v| v.checked_add(value))
            .ok_or_else(|| AddressError::InvalidColumn(col.to_string()))?;
    }
    // Convert to zero-based index
    Ok(result - 1)
}

/// Convert a zero-based column index to letters (0 → A, 25 → Z, 26 → AA).
pub fn column_index_to_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    index += 1; // 1-based for conversion
    while index > 0 {
        let rem = ((index - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}
