//! Error types for catalog validation.

use thiserror::Error;

/// Why a raw catalog record was rejected.
///
/// Validation never aborts a whole catalog load: these errors are collected
/// per record alongside the valid studies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The record does not carry every required catalog attribute.
    #[error("record {dataset_id:?} is missing data for attributes: {}", .missing.join(", "))]
    MissingAttributes {
        /// Dataset id when the record carries one, `"<unknown>"` otherwise.
        dataset_id: String,
        /// Names of the absent attributes, in catalog order.
        missing: Vec<String>,
    },

    /// The record's `study_access` value is not a known restriction level.
    #[error("record {dataset_id} has unrecognized access level {value:?}")]
    UnknownRestrictionLevel {
        /// Dataset id of the record.
        dataset_id: String,
        /// The unrecognized attribute value.
        value: String,
    },
}

/// Result alias for catalog validation.
pub type CatalogResult<T> = Result<T, CatalogError>;
