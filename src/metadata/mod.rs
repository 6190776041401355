//! Metadata directory and descriptor framework

pub mod types;
pub mod collection;
pub mod descriptor;
pub mod directory;
pub mod jpeg;
pub mod reader;
mod utils;

pub use collection::Metadata;
pub use descriptor::TagDescriptor;
pub use directory::{Directory, DirectoryKind};
pub use reader::MetadataReader;
pub use types::error::{MetadataError, Result};
pub use types::models::{FromTagValue, JpegComponent, Record, TagValue};
