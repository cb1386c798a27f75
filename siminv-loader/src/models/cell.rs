//! Spreadsheet cell values and raw rows
//!
//! Sheet cells arrive as loosely-typed scalars. [`CellValue`] models them
//! as a closed variant set at the ingestion boundary; everything
//! downstream works on the text rendering.

use calamine::Data;
use serde::Serialize;

/// One spreadsheet cell as ingested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    /// Plain text cell
    Text(String),
    /// Numeric cell (Excel stores all numbers as floats)
    Number(f64),
    /// Date/time cell, carrying its display text
    Date(String),
    /// Empty cell
    Empty,
}

impl CellValue {
    /// Text rendering of the cell, `None` for empty cells.
    ///
    /// Integral floats render without a decimal point (`10.0` -> `"10"`).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(f) => {
                if f.fract() == 0.0 {
                    Some(format!("{:.0}", f))
                } else {
                    Some(f.to_string())
                }
            }
            CellValue::Date(s) => Some(s.clone()),
            CellValue::Empty => None,
        }
    }

    /// True for empty cells, empty text and numeric zero.
    ///
    /// This is the emptiness test applied to the required key: an account
    /// column holding `0` rejects the row just like a blank cell.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Text(s) | CellValue::Date(s) => s.is_empty(),
            CellValue::Number(f) => *f == 0.0,
            CellValue::Empty => true,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::Error(e) => CellValue::Text(format!("#ERROR: {:?}", e)),
            Data::DateTime(dt) => CellValue::Date(dt.to_string()),
            Data::DateTimeIso(s) => CellValue::Date(s.clone()),
            Data::DurationIso(s) => CellValue::Date(s.clone()),
        }
    }
}

/// One sheet row as an ordered header -> cell mapping
///
/// Order is the source sheet's column order; it is preserved so rejected
/// rows can be exported with their original layout. Lookup is a linear
/// scan (rows are narrow).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    /// Pair headers with cells; rows shorter than the header are padded
    /// with empty cells, surplus cells beyond the header are dropped.
    pub fn new(headers: &[String], mut cells: Vec<CellValue>) -> Self {
        cells.resize(headers.len(), CellValue::Empty);
        Self {
            cells: headers.iter().cloned().zip(cells).collect(),
        }
    }

    /// Look up a cell by source column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(header, _)| header == column)
            .map(|(_, value)| value)
    }

    /// Source column names in sheet order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(header, _)| header.as_str())
    }

    /// Cell values in sheet order
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, value)| value)
    }
}
