//! Per-platform field mappings
//!
//! Each source platform exports the inventory under its own sheet name
//! and column layout. The mapping tables below translate every unified
//! field into one of three effects: a source-column lookup, a constant
//! literal, or a value derived once at batch start. The tables are
//! static and immutable for the lifetime of a run.

use crate::models::UnifiedField;
use serde::Serialize;

/// Where a unified field's value comes from for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Look up this source-sheet column
    Column(&'static str),
    /// A fixed literal (the platform identifier)
    Constant(&'static str),
    /// Computed once per workbook (the file date)
    Derived,
    /// Not available from this platform; stored as absence
    Unmapped,
}

/// The recognized source platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Wialon,
    Adas,
    Combustible,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Wialon, Platform::Adas, Platform::Combustible];

    /// Match a workbook sheet name against the platform table.
    ///
    /// Exact match only; anything else means "sheet not recognized,
    /// skip entirely".
    pub fn from_sheet_name(name: &str) -> Option<Platform> {
        match name {
            "WIALON" => Some(Platform::Wialon),
            "ADAS" => Some(Platform::Adas),
            "COMBUSTIBLE" => Some(Platform::Combustible),
            _ => None,
        }
    }

    /// The fixed platform identifier, used both as the sheet name and as
    /// the `origin` literal
    pub fn origin(self) -> &'static str {
        match self {
            Platform::Wialon => "WIALON",
            Platform::Adas => "ADAS",
            Platform::Combustible => "COMBUSTIBLE",
        }
    }

    /// Source of one unified field for this platform.
    ///
    /// Column names are the exact headers of the platform's export sheet.
    pub fn source_for(self, field: UnifiedField) -> FieldSource {
        use FieldSource::*;
        use UnifiedField::*;

        match self {
            Platform::Wialon => match field {
                Name => Column("Nombre"),
                AccountId => Column("Cuenta"),
                DeviceType => Column("Tipo de dispositivo"),
                Imei => Column("IMEI"),
                Iccid => Column("Iccid"),
                ActivationDate => Column("Creada"),
                DeactivationDate => Column("Desactivación"),
                LastMessageTime => Column("Hora de último mensaje"),
                LastReport => Column("Ultimo Reporte"),
                Vehicle => Unmapped,
                Services => Unmapped,
                Group => Column("Grupos"),
                Phone => Column("Teléfono"),
                Origin => Constant("WIALON"),
                FileDate => Derived,
            },
            Platform::Adas => match field {
                Name => Column("equipo"),
                AccountId => Column("Subordinar"),
                DeviceType => Column("Modelo"),
                Imei => Column("IMEI"),
                Iccid => Column("Iccid"),
                ActivationDate => Column("Activation Date"),
                DeactivationDate => Unmapped,
                LastMessageTime => Unmapped,
                LastReport => Unmapped,
                Vehicle => Unmapped,
                Services => Unmapped,
                Group => Unmapped,
                Phone => Column("Número de tarjeta SIM"),
                Origin => Constant("ADAS"),
                FileDate => Derived,
            },
            Platform::Combustible => match field {
                Name => Column("Vehículo"),
                AccountId => Column("Cuenta"),
                DeviceType => Column("Tanques"),
                Imei => Unmapped,
                Iccid => Unmapped,
                ActivationDate => Unmapped,
                DeactivationDate => Unmapped,
                LastMessageTime => Unmapped,
                LastReport => Column("Último reporte"),
                Vehicle => Column("Vehículo"),
                Services => Column("Servicios"),
                Group => Column("Grupos"),
                Phone => Column("Línea"),
                Origin => Constant("COMBUSTIBLE"),
                FileDate => Derived,
            },
        }
    }

    /// Number of unified fields backed by a source column on this
    /// platform (the per-platform report surfaces this)
    pub fn mapped_column_count(self) -> usize {
        UnifiedField::ALL
            .iter()
            .filter(|field| matches!(self.source_for(**field), FieldSource::Column(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_recognition_is_exact() {
        assert_eq!(Platform::from_sheet_name("WIALON"), Some(Platform::Wialon));
        assert_eq!(Platform::from_sheet_name("ADAS"), Some(Platform::Adas));
        assert_eq!(
            Platform::from_sheet_name("COMBUSTIBLE"),
            Some(Platform::Combustible)
        );
        assert_eq!(Platform::from_sheet_name("wialon"), None);
        assert_eq!(Platform::from_sheet_name("WIALON "), None);
        assert_eq!(Platform::from_sheet_name("Hoja1"), None);
    }

    #[test]
    fn test_every_platform_maps_the_required_key() {
        for platform in Platform::ALL {
            assert!(
                matches!(
                    platform.source_for(UnifiedField::AccountId),
                    FieldSource::Column(_)
                ),
                "{:?} must map the account column",
                platform
            );
        }
    }

    #[test]
    fn test_origin_is_a_constant_matching_the_sheet_name() {
        for platform in Platform::ALL {
            assert_eq!(
                platform.source_for(UnifiedField::Origin),
                FieldSource::Constant(platform.origin())
            );
            assert_eq!(Platform::from_sheet_name(platform.origin()), Some(platform));
        }
    }

    #[test]
    fn test_file_date_is_derived_everywhere() {
        for platform in Platform::ALL {
            assert_eq!(
                platform.source_for(UnifiedField::FileDate),
                FieldSource::Derived
            );
        }
    }

    #[test]
    fn test_mapped_column_counts() {
        assert_eq!(Platform::Wialon.mapped_column_count(), 11);
        assert_eq!(Platform::Adas.mapped_column_count(), 7);
        assert_eq!(Platform::Combustible.mapped_column_count(), 8);
    }
}
