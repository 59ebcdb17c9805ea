//! Dataset handling for datavis blocks
//!
//! CSV datasets are stored as named attachments on a content item and
//! converted on demand into field-keyed records for the chart renderer.

pub mod records;
pub mod store;

use thiserror::Error;

// Re-exports
pub use records::{csv_to_records, records_to_json, FieldValue, Record};
pub use store::{csv_content_type, is_valid_filename, Dataset, DatasetRef, DatasetStore, MemoryStore};

/// Errors that can occur in dataset operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("invalid dataset filename: {0:?}")]
    InvalidFilename(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        DataError::Csv(error.to_string())
    }
}
