//! Decodes a JPEG Start-Of-Frame segment.
//!
//! # Segment Layout
//! ```text
//! [1 byte]  Data precision (bits per sample)
//! [2 bytes] Image height, big-endian
//! [2 bytes] Image width, big-endian
//! [1 byte]  Number of components (N)
//! [3*N]     Component entries (id, sampling factors, quantization table)
//! ```

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use super::directory::{
    component_tag, TAG_COMPRESSION_TYPE, TAG_DATA_PRECISION, TAG_IMAGE_HEIGHT, TAG_IMAGE_WIDTH,
    TAG_NUMBER_OF_COMPONENTS,
};
use super::segments::{JpegSegmentReader, SEGMENT_SOF0, SOF_MARKERS};
use crate::metadata::collection::Metadata;
use crate::metadata::directory::{Directory, DirectoryKind};
use crate::metadata::reader::MetadataReader;
use crate::metadata::types::error::Result;
use crate::metadata::types::models::JpegComponent;

/// Populates the [`DirectoryKind::Jpeg`] directory from a Start-Of-Frame segment.
#[derive(Debug, Clone)]
pub struct JpegReader {
    data: Option<Vec<u8>>,
    marker: u8,
}

fn read_frame_header(reader: &mut impl Read) -> std::io::Result<(u8, u16, u16, u8)> {
    Ok((
        reader.read_u8()?,
        reader.read_u16::<BigEndian>()?,
        reader.read_u16::<BigEndian>()?,
        reader.read_u8()?,
    ))
}

impl JpegReader {
    /// Creates a reader for the payload of the SOF segment with `marker`, or
    /// `None` if no frame header was found.
    pub fn new(data: Option<Vec<u8>>, marker: u8) -> Self {
        Self { data, marker }
    }

    /// Creates a reader for the first frame header of an already-scanned container.
    pub fn from_segments(segments: &JpegSegmentReader) -> Self {
        match segments.find_first(&SOF_MARKERS) {
            Some((marker, data)) => Self::new(Some(data.to_vec()), marker),
            None => Self::new(None, SEGMENT_SOF0),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_segments(&JpegSegmentReader::new(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_segments(&JpegSegmentReader::from_reader(reader)?))
    }

    fn decode(data: &[u8], directory: &mut Directory) {
        let mut cursor = Cursor::new(data);

        // The fixed header is all-or-nothing; stop at the first missing field.
        let header = read_frame_header(&mut cursor);
        let (precision, height, width, num_components) = match header {
            Ok(fields) => fields,
            Err(e) => {
                directory.add_error_once(format!("Frame header truncated ({} bytes): {}", data.len(), e));
                return;
            }
        };
        trace!(
            "Frame: precision={}, {}x{}, {} components",
            precision,
            width,
            height,
            num_components
        );
        directory.set_value(TAG_DATA_PRECISION, precision);
        directory.set_value(TAG_IMAGE_HEIGHT, height);
        directory.set_value(TAG_IMAGE_WIDTH, width);
        directory.set_value(TAG_NUMBER_OF_COMPONENTS, num_components);

        for index in 0..num_components as usize {
            let mut entry = [0u8; 3];
            if cursor.read_exact(&mut entry).is_err() {
                directory.add_error_once(format!(
                    "Frame declares {} components but data ends after {}",
                    num_components, index
                ));
                break;
            }
            let Some(tag) = component_tag(index) else {
                directory.add_error_once(format!(
                    "Component {} exceeds the supported component count",
                    index + 1
                ));
                continue;
            };
            directory.set_value(tag, JpegComponent::new(entry[0], entry[1], entry[2]));
        }
    }
}

impl MetadataReader for JpegReader {
    fn extract(&self, metadata: &mut Metadata) {
        let Some(data) = &self.data else {
            debug!("No frame header segment, skipping");
            return;
        };

        let directory = metadata.get_directory(DirectoryKind::Jpeg);
        directory.set_value(TAG_COMPRESSION_TYPE, self.marker.wrapping_sub(SEGMENT_SOF0));
        Self::decode(data, directory);
        debug!(
            "Decoded frame header: {} tags, {} errors",
            directory.tag_count(),
            directory.error_count()
        );
    }
}
