//! The JPEG comment (COM) segment.

use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use super::segments::{JpegSegmentReader, SEGMENT_COM};
use crate::metadata::collection::Metadata;
use crate::metadata::descriptor::{default_description, TagDescriptor};
use crate::metadata::directory::{Directory, DirectoryKind};
use crate::metadata::reader::MetadataReader;
use crate::metadata::types::error::Result;
use crate::metadata::utils;

/// The comment text.
pub const TAG_COMMENT: i32 = 0;

pub fn tag_name(tag: i32) -> Option<&'static str> {
    match tag {
        TAG_COMMENT => Some("Jpeg Comment"),
        _ => None,
    }
}

/// Comments have no substitutions; the text is its own description.
#[derive(Debug)]
pub struct JpegCommentDescriptor;

impl TagDescriptor for JpegCommentDescriptor {
    fn description(&self, directory: &Directory, tag: i32) -> Result<Option<String>> {
        Ok(default_description(directory, tag))
    }
}

/// Decodes the comment stored within a JPEG file into the
/// [`DirectoryKind::JpegComment`] directory.
///
/// An absent segment is not an error: `extract` simply does nothing.
#[derive(Debug, Clone)]
pub struct JpegCommentReader {
    data: Option<Vec<u8>>,
    encoding: &'static Encoding,
}

impl JpegCommentReader {
    /// Creates a reader for the raw payload of a COM segment, or `None` if the
    /// segment was not found.
    pub fn new(data: Option<Vec<u8>>) -> Self {
        Self {
            data,
            encoding: UTF_8,
        }
    }

    /// Creates a reader for the first COM segment of an already-scanned container.
    pub fn from_segments(segments: &JpegSegmentReader) -> Self {
        Self::new(segments.segment(SEGMENT_COM).map(<[u8]>::to_vec))
    }

    /// Creates a reader for the COM segment of the JPEG file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_segments(&JpegSegmentReader::new(path)?))
    }

    /// Creates a reader for the COM segment of a JPEG stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_segments(&JpegSegmentReader::from_reader(reader)?))
    }

    /// Overrides the text encoding (default UTF-8) using a WHATWG label.
    ///
    /// Unknown labels keep UTF-8.
    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = utils::parse_encoding(label);
        self
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl MetadataReader for JpegCommentReader {
    fn extract(&self, metadata: &mut Metadata) {
        let Some(data) = &self.data else {
            debug!("No comment segment, skipping");
            return;
        };

        let comment = utils::decode_text(data, self.encoding);
        debug!("Decoded {}-byte comment as {}", data.len(), self.encoding.name());
        metadata
            .get_directory(DirectoryKind::JpegComment)
            .set_value(TAG_COMMENT, comment);
    }
}
