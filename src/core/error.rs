use std::path::PathBuf;

/// Errors raised by a [`StorageProvider`](crate::builders::storage::StorageProvider).
///
/// These are the only hard failures of the crate: everything a user can get wrong
/// while typing a command is reported through [`Report`](crate::core::records::Report)
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file or directory could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection content is not a well-formed sequence of records.
    #[error("collection '{name}' is malformed: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be turned into its stored form.
    #[error("failed to encode collection '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A field value did not have the expected kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be an integer")]
    NotInteger { field: &'static str },

    #[error("{field} must be a string")]
    NotText { field: &'static str },
}
