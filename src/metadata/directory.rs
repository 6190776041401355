//! Typed key/value storage for one metadata family.

use std::collections::BTreeMap;

use log::warn;

use super::descriptor::TagDescriptor;
use super::jpeg::{comment, directory as jpeg_directory};
use super::types::error::{MetadataError, Result};
use super::types::models::{FromTagValue, TagValue};

/// The closed set of directory kinds a [`Metadata`](super::Metadata) may hold.
///
/// The ordering of variants is the order in which directories are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectoryKind {
    /// Frame header information from a JPEG Start-Of-Frame segment.
    Jpeg,
    /// Free text from a JPEG COM segment.
    JpegComment,
}

impl DirectoryKind {
    /// The fixed name of directories of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryKind::Jpeg => "Jpeg",
            DirectoryKind::JpegComment => "JpegComment",
        }
    }

    /// The name of a tag defined for this kind, if any.
    pub fn tag_name(&self, tag: i32) -> Option<&'static str> {
        match self {
            DirectoryKind::Jpeg => jpeg_directory::tag_name(tag),
            DirectoryKind::JpegComment => comment::tag_name(tag),
        }
    }

    fn descriptor(&self) -> &'static dyn TagDescriptor {
        match self {
            DirectoryKind::Jpeg => &jpeg_directory::JpegDescriptor,
            DirectoryKind::JpegComment => &comment::JpegCommentDescriptor,
        }
    }
}

impl std::fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded tag values for one metadata family, plus any non-fatal errors
/// recorded while populating them.
///
/// Tags are unique; setting a tag twice keeps the last value.
#[derive(Debug)]
pub struct Directory {
    kind: DirectoryKind,
    descriptor: &'static dyn TagDescriptor,
    values: BTreeMap<i32, TagValue>,
    errors: Vec<String>,
}

impl Directory {
    /// Creates an empty directory bound to the descriptor of `kind`.
    pub fn new(kind: DirectoryKind) -> Self {
        Self {
            kind,
            descriptor: kind.descriptor(),
            values: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Stores `value` under `tag`, replacing any previous value.
    pub fn set_value(&mut self, tag: i32, value: impl Into<TagValue>) {
        self.values.insert(tag, value.into());
    }

    /// Returns the raw stored value, if any.
    pub fn value(&self, tag: i32) -> Option<&TagValue> {
        self.values.get(&tag)
    }

    /// Returns the value of `tag` interpreted as `T`.
    ///
    /// # Errors
    /// - [`MetadataError::TagNotPresent`] if the tag is unset
    /// - [`MetadataError::TypeCoercion`] if the stored value cannot be read as `T`
    pub fn get<T: FromTagValue>(&self, tag: i32) -> Result<T> {
        let value = self.values.get(&tag).ok_or(MetadataError::TagNotPresent {
            directory: self.name(),
            tag,
        })?;
        T::from_tag_value(value).ok_or_else(|| MetadataError::TypeCoercion {
            directory: self.name(),
            tag,
            expected: T::TYPE_NAME,
            found: format!("{} {:?}", value.type_name(), value.to_string()),
        })
    }

    pub fn get_int(&self, tag: i32) -> Result<i64> {
        self.get(tag)
    }

    pub fn get_string(&self, tag: i32) -> Result<String> {
        self.get(tag)
    }

    pub fn get_bytes(&self, tag: i32) -> Result<Vec<u8>> {
        self.get(tag)
    }

    /// Returns `true` if a value is stored for `tag`.
    pub fn has_tag(&self, tag: i32) -> bool {
        self.values.contains_key(&tag)
    }

    pub fn tag_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over stored `(tag, value)` pairs in ascending tag order.
    pub fn tags(&self) -> impl Iterator<Item = (i32, &TagValue)> + Clone + '_ {
        self.values.iter().map(|(tag, value)| (*tag, value))
    }

    /// The defined name of `tag`, or a hex placeholder for unknown tags.
    pub fn tag_name(&self, tag: i32) -> String {
        match self.kind.tag_name(tag) {
            Some(name) => name.to_owned(),
            None => format!("Unknown tag ({:#06x})", tag),
        }
    }

    /// Renders `tag` through this directory's descriptor.
    ///
    /// Returns `Ok(None)` for unset tags.
    pub fn description(&self, tag: i32) -> Result<Option<String>> {
        self.descriptor.description(self, tag)
    }

    /// Records a non-fatal problem found while populating this directory.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("[{}] {}", self.name(), message);
        self.errors.push(message);
    }

    /// Records `message` unless the same message is already in the log.
    ///
    /// Readers use this so that extracting the same bytes twice reports each
    /// problem once. Returns `true` if the message was added.
    pub fn add_error_once(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.errors.iter().any(|existing| *existing == message) {
            return false;
        }
        self.add_error(message);
        true
    }

    /// Iterates over recorded errors in the order they were added.
    pub fn errors(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.errors.iter().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
