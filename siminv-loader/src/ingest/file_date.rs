//! Batch date derivation from the workbook filename
//!
//! Every record of one workbook carries the same file date, derived once
//! before any sheet is read. The run date is computed once per process
//! and passed in, which keeps the fallback deterministic under test.

use chrono::NaiveDate;

/// First `YYYY-MM-DD`-shaped substring of `name`, verbatim.
///
/// Shape only: four digits, hyphen, two digits, hyphen, two digits. No
/// calendar validation is applied; `2024-13-40` is returned as-is.
pub fn embedded_date(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    for start in 0..=bytes.len() - 10 {
        let window = &bytes[start..start + 10];
        let matches = window.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        if matches {
            // All-ASCII window, so the slice is on char boundaries
            return Some(&name[start..start + 10]);
        }
    }
    None
}

/// The batch date for a workbook: the filename's embedded date, or the
/// run date when the filename carries none.
pub fn file_date_for(name: &str, run_date: NaiveDate) -> String {
    match embedded_date(name) {
        Some(date) => date.to_string(),
        None => run_date.format("%Y-%m-%d").to_string(),
    }
}
