//! The unified device record
//!
//! Every platform's sheet layout normalizes into this 15-field schema.
//! All fields are free text; `account_id` is the only field enforced
//! non-empty at construction, `origin` is always a platform literal and
//! `file_date` is always the batch's ISO date.

use serde::{Deserialize, Serialize};

/// The 15 unified field names, in canonical order.
///
/// This order is authoritative wherever a record is walked: building,
/// completeness statistics, CSV headers and SQL column lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnifiedField {
    Name,
    AccountId,
    DeviceType,
    Imei,
    Iccid,
    ActivationDate,
    DeactivationDate,
    LastMessageTime,
    LastReport,
    Vehicle,
    Services,
    Group,
    Phone,
    Origin,
    FileDate,
}

impl UnifiedField {
    /// All fields in canonical order
    pub const ALL: [UnifiedField; 15] = [
        UnifiedField::Name,
        UnifiedField::AccountId,
        UnifiedField::DeviceType,
        UnifiedField::Imei,
        UnifiedField::Iccid,
        UnifiedField::ActivationDate,
        UnifiedField::DeactivationDate,
        UnifiedField::LastMessageTime,
        UnifiedField::LastReport,
        UnifiedField::Vehicle,
        UnifiedField::Services,
        UnifiedField::Group,
        UnifiedField::Phone,
        UnifiedField::Origin,
        UnifiedField::FileDate,
    ];

    /// The data fields, excluding the constant `origin`/`file_date` pair.
    /// Completeness statistics run over these.
    pub const DATA_FIELDS: [UnifiedField; 13] = [
        UnifiedField::Name,
        UnifiedField::AccountId,
        UnifiedField::DeviceType,
        UnifiedField::Imei,
        UnifiedField::Iccid,
        UnifiedField::ActivationDate,
        UnifiedField::DeactivationDate,
        UnifiedField::LastMessageTime,
        UnifiedField::LastReport,
        UnifiedField::Vehicle,
        UnifiedField::Services,
        UnifiedField::Group,
        UnifiedField::Phone,
    ];

    /// Store column name (`Group` maps to `device_group`; `group` is an
    /// SQL keyword)
    pub fn column_name(&self) -> &'static str {
        match self {
            UnifiedField::Name => "name",
            UnifiedField::AccountId => "account_id",
            UnifiedField::DeviceType => "device_type",
            UnifiedField::Imei => "imei",
            UnifiedField::Iccid => "iccid",
            UnifiedField::ActivationDate => "activation_date",
            UnifiedField::DeactivationDate => "deactivation_date",
            UnifiedField::LastMessageTime => "last_message_time",
            UnifiedField::LastReport => "last_report",
            UnifiedField::Vehicle => "vehicle",
            UnifiedField::Services => "services",
            UnifiedField::Group => "device_group",
            UnifiedField::Phone => "phone",
            UnifiedField::Origin => "origin",
            UnifiedField::FileDate => "file_date",
        }
    }
}

/// One normalized device record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub name: Option<String>,
    pub account_id: String,
    pub device_type: Option<String>,
    pub imei: Option<String>,
    pub iccid: Option<String>,
    pub activation_date: Option<String>,
    pub deactivation_date: Option<String>,
    pub last_message_time: Option<String>,
    pub last_report: Option<String>,
    pub vehicle: Option<String>,
    pub services: Option<String>,
    pub device_group: Option<String>,
    pub phone: Option<String>,
    pub origin: String,
    pub file_date: String,
}

impl UnifiedRecord {
    /// Field accessor by unified field name
    pub fn field(&self, field: UnifiedField) -> Option<&str> {
        match field {
            UnifiedField::Name => self.name.as_deref(),
            UnifiedField::AccountId => Some(&self.account_id),
            UnifiedField::DeviceType => self.device_type.as_deref(),
            UnifiedField::Imei => self.imei.as_deref(),
            UnifiedField::Iccid => self.iccid.as_deref(),
            UnifiedField::ActivationDate => self.activation_date.as_deref(),
            UnifiedField::DeactivationDate => self.deactivation_date.as_deref(),
            UnifiedField::LastMessageTime => self.last_message_time.as_deref(),
            UnifiedField::LastReport => self.last_report.as_deref(),
            UnifiedField::Vehicle => self.vehicle.as_deref(),
            UnifiedField::Services => self.services.as_deref(),
            UnifiedField::Group => self.device_group.as_deref(),
            UnifiedField::Phone => self.phone.as_deref(),
            UnifiedField::Origin => Some(&self.origin),
            UnifiedField::FileDate => Some(&self.file_date),
        }
    }

    /// The identity triple used for duplicate detection.
    ///
    /// `origin` and `file_date` are deliberately excluded: the same entity
    /// reappearing under another platform or on another day is the same
    /// unique record.
    pub fn dedup_key(&self) -> (Option<&str>, &str, Option<&str>) {
        (self.name.as_deref(), &self.account_id, self.phone.as_deref())
    }
}
