//! Daily store access
//!
//! The store is a single SQLite file per calendar day holding the
//! normalized device records.

pub mod init;

pub use init::{create_devices_table, init_database};
