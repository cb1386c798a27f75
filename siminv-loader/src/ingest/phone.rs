//! Phone number canonicalization

use crate::models::CellValue;

/// Canonicalize a raw phone cell to its decimal digits.
///
/// The cell is rendered to text and every non-digit character removed,
/// preserving digit order. An absent cell, an empty rendering or a
/// rendering with no digits all yield `None`; downstream never sees an
/// empty phone string. No length or checksum validation is applied; any
/// non-empty digit string passes as-is.
pub fn normalize_phone(value: Option<&CellValue>) -> Option<String> {
    let text = value?.as_text()?;
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
