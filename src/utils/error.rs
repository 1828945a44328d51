//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types.
//! Semantic issues (missing consent, broken references) are not errors;
//! they travel through the `Finding` channel and never abort a run.

use crate::normalizer::schema::Category;
use thiserror::Error;

/// Errors that can occur while normalizing a raw record
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("{category} record has no identity field (looked for {looked_for:?})")]
    MissingIdentity {
        category: Category,
        looked_for: &'static [&'static str],
    },

    #[error("{0} record is not a JSON object")]
    NotAnObject(Category),
}

/// Errors that can occur while building an entity index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("duplicate {category} identity '{identity_key}' within one version")]
    DuplicateIdentity {
        category: Category,
        identity_key: String,
    },

    #[error("entity of category {found} handed to a {expected} index")]
    CategoryMismatch { expected: Category, found: Category },
}

/// Errors that can occur while building a container snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("indexing failed: {0}")]
    Index(#[from] IndexError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
