//! Per-row record construction
//!
//! One raw sheet row either becomes a unified record or is diverted to
//! the invalid set. The account is the single required key; nothing else
//! is validated and malformed cell content passes through untransformed.

use crate::ingest::phone::normalize_phone;
use crate::mappings::{FieldSource, Platform};
use crate::models::{CellValue, RawRow, UnifiedField, UnifiedRecord};

/// Outcome of building one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row normalized into a unified record
    Valid(UnifiedRecord),
    /// Required key missing or empty; the raw row is retained for the
    /// invalid-rows report
    Invalid(RawRow),
}

/// Build a unified record from one raw row.
///
/// The account mapping is resolved first: if the platform has no account
/// column or the looked-up cell is empty/falsy, the row is invalid and
/// no other field is evaluated. Otherwise the 15 fields are assembled in
/// canonical order: the origin literal, the precomputed file date, the
/// canonicalized phone, and every other mapped column's text verbatim.
pub fn build_record(row: RawRow, platform: Platform, file_date: &str) -> RowOutcome {
    let account = match platform.source_for(UnifiedField::AccountId) {
        FieldSource::Column(column) => row
            .get(column)
            .filter(|cell| !cell.is_falsy())
            .and_then(CellValue::as_text),
        _ => None,
    };
    let Some(account_id) = account else {
        return RowOutcome::Invalid(row);
    };

    let text = |field: UnifiedField| -> Option<String> {
        match platform.source_for(field) {
            FieldSource::Column(column) => row.get(column).and_then(CellValue::as_text),
            _ => None,
        }
    };
    let phone = match platform.source_for(UnifiedField::Phone) {
        FieldSource::Column(column) => normalize_phone(row.get(column)),
        _ => None,
    };

    RowOutcome::Valid(UnifiedRecord {
        name: text(UnifiedField::Name),
        account_id,
        device_type: text(UnifiedField::DeviceType),
        imei: text(UnifiedField::Imei),
        iccid: text(UnifiedField::Iccid),
        activation_date: text(UnifiedField::ActivationDate),
        deactivation_date: text(UnifiedField::DeactivationDate),
        last_message_time: text(UnifiedField::LastMessageTime),
        last_report: text(UnifiedField::LastReport),
        vehicle: text(UnifiedField::Vehicle),
        services: text(UnifiedField::Services),
        device_group: text(UnifiedField::Group),
        phone,
        origin: platform.origin().to_string(),
        file_date: file_date.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wialon_row(cells: &[(&str, CellValue)]) -> RawRow {
        let headers: Vec<String> = cells.iter().map(|(h, _)| h.to_string()).collect();
        let values: Vec<CellValue> = cells.iter().map(|(_, v)| v.clone()).collect();
        RawRow::new(&headers, values)
    }

    #[test]
    fn test_blank_account_rejects_the_row() {
        let row = wialon_row(&[
            ("Nombre", CellValue::Text("Unit 1".into())),
            ("Cuenta", CellValue::Empty),
        ]);
        let outcome = build_record(row.clone(), Platform::Wialon, "2024-03-05");
        assert_eq!(outcome, RowOutcome::Invalid(row));
    }

    #[test]
    fn test_missing_account_column_rejects_the_row() {
        let row = wialon_row(&[("Nombre", CellValue::Text("Unit 1".into()))]);
        assert!(matches!(
            build_record(row, Platform::Wialon, "2024-03-05"),
            RowOutcome::Invalid(_)
        ));
    }

    #[test]
    fn test_zero_account_rejects_the_row() {
        let row = wialon_row(&[("Cuenta", CellValue::Number(0.0))]);
        assert!(matches!(
            build_record(row, Platform::Wialon, "2024-03-05"),
            RowOutcome::Invalid(_)
        ));
    }

    #[test]
    fn test_valid_row_assembles_all_sources() {
        let row = wialon_row(&[
            ("Nombre", CellValue::Text("Unit 1".into())),
            ("Cuenta", CellValue::Text("ACME".into())),
            ("Teléfono", CellValue::Text("+52 555-1234".into())),
            ("IMEI", CellValue::Number(356938035643809.0)),
        ]);
        let RowOutcome::Valid(record) = build_record(row, Platform::Wialon, "2024-03-05") else {
            panic!("expected a valid record");
        };

        assert_eq!(record.name.as_deref(), Some("Unit 1"));
        assert_eq!(record.account_id, "ACME");
        assert_eq!(record.phone.as_deref(), Some("525551234"));
        assert_eq!(record.imei.as_deref(), Some("356938035643809"));
        // Unmapped on WIALON
        assert_eq!(record.vehicle, None);
        assert_eq!(record.services, None);
        // Constants
        assert_eq!(record.origin, "WIALON");
        assert_eq!(record.file_date, "2024-03-05");
    }

    #[test]
    fn test_origin_ignores_row_content() {
        let row = wialon_row(&[
            ("Cuenta", CellValue::Text("ACME".into())),
            ("Origen", CellValue::Text("SOMETHING ELSE".into())),
        ]);
        let RowOutcome::Valid(record) = build_record(row, Platform::Wialon, "2024-03-05") else {
            panic!("expected a valid record");
        };
        assert_eq!(record.origin, "WIALON");
    }

    #[test]
    fn test_malformed_cells_pass_through_untransformed() {
        let row = wialon_row(&[
            ("Cuenta", CellValue::Text("ACME".into())),
            ("Creada", CellValue::Text("  not a date ".into())),
        ]);
        let RowOutcome::Valid(record) = build_record(row, Platform::Wialon, "2024-03-05") else {
            panic!("expected a valid record");
        };
        assert_eq!(record.activation_date.as_deref(), Some("  not a date "));
    }

    #[test]
    fn test_adas_layout_maps_its_own_columns() {
        let headers: Vec<String> = ["equipo", "Subordinar", "Número de tarjeta SIM"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let row = RawRow::new(
            &headers,
            vec![
                CellValue::Text("Tracker 9".into()),
                CellValue::Text("Fleet-B".into()),
                CellValue::Text("(55) 987 6543".into()),
            ],
        );
        let RowOutcome::Valid(record) = build_record(row, Platform::Adas, "2024-03-05") else {
            panic!("expected a valid record");
        };
        assert_eq!(record.name.as_deref(), Some("Tracker 9"));
        assert_eq!(record.account_id, "Fleet-B");
        assert_eq!(record.phone.as_deref(), Some("559876543"));
        assert_eq!(record.device_group, None);
        assert_eq!(record.origin, "ADAS");
    }
}
