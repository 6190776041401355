//! JPEG container support.
//!
//! # Module Organization
//!
//! - [`segments`]: Locates marker segments inside a JPEG container
//! - [`directory`]: Tags and descriptor of the frame header directory
//! - [`frame`]: Decodes the Start-Of-Frame segment
//! - [`comment`]: Decodes the COM segment
//!
//! # Pipeline
//!
//! ```text
//! bytes ──► JpegSegmentReader ──► JpegReader        ──► Directory(Jpeg)
//!                              └► JpegCommentReader ──► Directory(JpegComment)
//! ```

pub mod comment;
pub mod directory;
pub mod frame;
pub mod segments;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::collection::Metadata;
use super::reader::MetadataReader;
use super::types::error::Result;
use comment::JpegCommentReader;
use frame::JpegReader;
use segments::JpegSegmentReader;

/// Extracts all supported metadata from the JPEG file at `path`.
///
/// # Errors
/// Returns an error only if the file cannot be read or is not a JPEG.
/// Missing segments leave their directories absent; decoding problems are
/// recorded on the affected directory.
pub fn read_metadata(path: impl AsRef<Path>) -> Result<Metadata> {
    let path = path.as_ref();
    info!("Reading metadata from: {}", path.display());
    read_metadata_from(BufReader::new(File::open(path)?))
}

/// Extracts all supported metadata from a JPEG stream.
pub fn read_metadata_from<R: Read>(reader: R) -> Result<Metadata> {
    let segments = JpegSegmentReader::from_reader(reader)?;
    Ok(extract_segments(&segments))
}

/// Runs every JPEG reader against already-located segments.
pub fn extract_segments(segments: &JpegSegmentReader) -> Metadata {
    let readers: [Box<dyn MetadataReader>; 2] = [
        Box::new(JpegReader::from_segments(segments)),
        Box::new(JpegCommentReader::from_segments(segments)),
    ];

    let mut metadata = Metadata::new();
    for reader in &readers {
        reader.extract(&mut metadata);
    }
    info!(
        "Extraction finished: {} directories, errors={}",
        metadata.directory_count(),
        metadata.has_errors()
    );
    metadata
}
