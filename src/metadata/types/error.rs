//! Custom error types for the jpeg-metadata crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// An error originating from I/O operations while acquiring segment bytes.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The byte source is not a readable container of the expected family.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// No value has been stored under the requested tag.
    #[error("Tag {tag} is not present in directory '{directory}'")]
    TagNotPresent { directory: &'static str, tag: i32 },

    /// The stored value cannot be interpreted as the requested type.
    #[error("Tag {tag} in directory '{directory}' cannot be read as {expected} (stored value: {found})")]
    TypeCoercion {
        directory: &'static str,
        tag: i32,
        expected: &'static str,
        found: String,
    },

    /// A present value does not have the shape its descriptor expects.
    #[error("Cannot describe tag {tag} in directory '{directory}': {reason}")]
    Description {
        directory: &'static str,
        tag: i32,
        reason: String,
    },
}

/// A convenience `Result` type alias using the crate's `MetadataError` type.
pub type Result<T> = std::result::Result<T, MetadataError>;
