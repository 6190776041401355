//! # jpeg-metadata
//!
//! Extracts typed metadata from JPEG segments into per-kind directories.
//!
//! Each [`MetadataReader`] decodes one segment into one [`Directory`] of a
//! shared [`Metadata`]. Raw values are read back with typed accessors, and
//! human-readable descriptions are rendered on request by the directory's
//! [`TagDescriptor`].
//!
//! ```no_run
//! # fn main() -> jpeg_metadata::Result<()> {
//! let metadata = jpeg_metadata::read_metadata("photo.jpg")?;
//! for directory in metadata.directories() {
//!     for (tag, _) in directory.tags() {
//!         println!("{}: {:?}", directory.tag_name(tag), directory.description(tag)?);
//!     }
//! }
//! # Ok(()) }
//! ```
pub mod metadata;

// Re-export the main types for convenience
pub use metadata::{
    Directory,
    DirectoryKind,
    FromTagValue,
    JpegComponent,
    Metadata,
    MetadataError,
    MetadataReader,
    Record,
    Result,
    TagDescriptor,
    TagValue,
    jpeg::{
        comment::JpegCommentReader,
        frame::JpegReader,
        read_metadata,
        read_metadata_from,
        segments::JpegSegmentReader,
    },
};
