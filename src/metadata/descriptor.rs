//! Human-readable rendering of raw tag values.
//!
//! Each [`DirectoryKind`](super::directory::DirectoryKind) is bound to one
//! [`TagDescriptor`]. Descriptors are read-only views: they receive the
//! directory they describe on every call and never mutate it.

use std::fmt;

use super::directory::Directory;
use super::types::error::{MetadataError, Result};
use super::types::models::TagValue;

/// Renders the raw values of one directory kind as descriptive text.
pub trait TagDescriptor: fmt::Debug + Sync {
    /// Returns a descriptive value for `tag`.
    ///
    /// Where possible, known codes are substituted with their names. If no
    /// substitution applies, the value's default string form is returned.
    ///
    /// Returns `Ok(None)` if the tag has not been set, and a
    /// [`MetadataError::Description`] only when the stored value does not have
    /// the shape this tag requires.
    fn description(&self, directory: &Directory, tag: i32) -> Result<Option<String>>;
}

/// The default string form of a tag, or `None` if it is unset.
pub fn default_description(directory: &Directory, tag: i32) -> Option<String> {
    directory.value(tag).map(TagValue::to_string)
}

/// Builds a [`MetadataError::Description`] for `tag` in `directory`.
pub fn description_error(directory: &Directory, tag: i32, reason: impl Into<String>) -> MetadataError {
    MetadataError::Description {
        directory: directory.name(),
        tag,
        reason: reason.into(),
    }
}

/// Looks up an integer code in a table of named values.
///
/// Fails if the stored value is not an integer, or is an integer with no
/// entry in `table`.
pub fn describe_enumerated(
    directory: &Directory,
    tag: i32,
    table: &[(i64, &str)],
) -> Result<Option<String>> {
    let Some(value) = directory.value(tag) else {
        return Ok(None);
    };
    let code = match value {
        TagValue::Int(code) => *code,
        other => {
            return Err(description_error(
                directory,
                tag,
                format!("expected an integer code, found {}", other.type_name()),
            ))
        }
    };
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| Some((*name).to_owned()))
        .ok_or_else(|| description_error(directory, tag, format!("unknown code {}", code)))
}
