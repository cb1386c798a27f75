//! # siminv-loader
//!
//! Normalization-and-load pipeline for device/SIM inventory workbooks.
//!
//! Three source platforms (WIALON, ADAS, COMBUSTIBLE) export the same
//! physical inventory with divergent sheet layouts. This crate maps each
//! platform's columns onto one unified 15-field record schema, validates
//! rows against the single required key (the account), and persists the
//! normalized records into a daily SQLite store with a composite
//! uniqueness constraint on `(name, account_id, phone)`.
//!
//! Pipeline: workbook -> [`ingest::process_workbook`] -> [`ingest::IngestBatch`]
//! -> per-record [`db::records::insert_record`] (or the bulk
//! insert-or-ignore variant) -> [`report::IngestReport`].

pub mod db;
pub mod error;
pub mod export;
pub mod ingest;
pub mod mappings;
pub mod models;
pub mod report;

pub use error::{LoaderError, Result};
