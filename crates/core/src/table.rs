//! Used-range to table conversion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use sheetgate_primitives::column_index_to_letters;

use crate::encode::{widen, EncodeError};
use crate::value::CellScalar;

/// The populated rectangular region of a worksheet as reported by the
/// automation host. `row` and `column` are the 1-based coordinates of the
/// top-left anchor cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedRange {
    pub row: u32,
    pub column: u32,
    pub values: Vec<Vec<CellScalar>>,
}

impl UsedRange {
    /// Returns true when the range contains no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() || self.values.iter().all(Vec::is_empty)
    }
}

/// Tabular view of a used range: the first grid row supplies column names,
/// the rest become row-major records of widened JSON values.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<IndexMap<String, JsonValue>>,
}

impl Table {
    /// Convert a used range into a table.
    ///
    /// Returns `None` when the range has no cells. A range with only a header
    /// row yields a table with zero records.
    pub fn from_used_range(range: &UsedRange) -> Result<Option<Self>, EncodeError> {
        if range.is_empty() {
            return Ok(None);
        }

        let header = &range.values[0];
        let width = range.values.iter().map(Vec::len).max().unwrap_or(0);
        let columns = column_names(header, width);

        let mut records = Vec::with_capacity(range.values.len().saturating_sub(1));
        for row in &range.values[1..] {
            let mut record = IndexMap::with_capacity(columns.len());
            for (j, name) in columns.iter().enumerate() {
                let cell = row.get(j).unwrap_or(&CellScalar::Empty);
                record.insert(name.clone(), widen(cell)?);
            }
            records.push(record);
        }

        Ok(Some(Self { columns, records }))
    }

    /// `[row count, column count]` of the data rows (header excluded).
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.columns.len())
    }

    /// Build the per-cell address-to-value index for this table.
    ///
    /// `anchor_row`/`anchor_col` are the 1-based coordinates of the used
    /// range's top-left cell (the header row), so data row `i` lives at
    /// spreadsheet row `anchor_row + 1 + i`.
    pub fn cell_mapping(&self, anchor_row: u32, anchor_col: u32) -> IndexMap<String, JsonValue> {
        let mut mapping = IndexMap::with_capacity(self.records.len() * self.columns.len());
        for (i, record) in self.records.iter().enumerate() {
            for (j, name) in self.columns.iter().enumerate() {
                let letters = column_index_to_letters(anchor_col.saturating_sub(1) + j as u32);
                let address = format!("{}{}", letters, anchor_row + 1 + i as u32);
                let value = record.get(name).cloned().unwrap_or(JsonValue::Null);
                mapping.insert(address, value);
            }
        }
        mapping
    }
}

/// Derive column names from the header row, padding to `width` and
/// disambiguating duplicates with `.1`, `.2`, … suffixes.
fn column_names(header: &[CellScalar], width: usize) -> Vec<String> {
    let mut seen: IndexMap<String, usize> = IndexMap::new();
    let mut names = Vec::with_capacity(width);
    for j in 0..width {
        let base = match header.get(j) {
            None | Some(CellScalar::Empty) => format!("Column {}", j + 1),
            Some(cell) => cell.to_string(),
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{base}.{count}")
        };
        *count += 1;
        names.push(name);
    }
    names
}
