//! Tags and descriptions for the [`DirectoryKind::Jpeg`](crate::DirectoryKind::Jpeg) directory.

use crate::metadata::descriptor::{default_description, describe_enumerated, description_error, TagDescriptor};
use crate::metadata::directory::Directory;
use crate::metadata::types::error::Result;
use crate::metadata::types::models::{JpegComponent, Record, TagValue};

/// The coding process, derived from which Start-Of-Frame marker was found.
pub const TAG_COMPRESSION_TYPE: i32 = -3;
/// Bits per sample; usually 8, 12 or 16.
pub const TAG_DATA_PRECISION: i32 = 0;
pub const TAG_IMAGE_HEIGHT: i32 = 1;
pub const TAG_IMAGE_WIDTH: i32 = 3;
/// Usually 1 (greyscale), 3 (YCbCr or YIQ) or 4 (CMYK).
pub const TAG_NUMBER_OF_COMPONENTS: i32 = 5;
pub const TAG_COMPONENT_DATA_1: i32 = 6;
pub const TAG_COMPONENT_DATA_2: i32 = 7;
pub const TAG_COMPONENT_DATA_3: i32 = 8;
pub const TAG_COMPONENT_DATA_4: i32 = 9;

/// Component tags available; frames with more components record an error.
pub const MAX_COMPONENTS: usize = 4;

pub fn tag_name(tag: i32) -> Option<&'static str> {
    match tag {
        TAG_COMPRESSION_TYPE => Some("Compression Type"),
        TAG_DATA_PRECISION => Some("Data Precision"),
        TAG_IMAGE_HEIGHT => Some("Image Height"),
        TAG_IMAGE_WIDTH => Some("Image Width"),
        TAG_NUMBER_OF_COMPONENTS => Some("Number of Components"),
        TAG_COMPONENT_DATA_1 => Some("Component 1"),
        TAG_COMPONENT_DATA_2 => Some("Component 2"),
        TAG_COMPONENT_DATA_3 => Some("Component 3"),
        TAG_COMPONENT_DATA_4 => Some("Component 4"),
        _ => None,
    }
}

/// The tag holding the `index`-th (zero-based) component, if there is one.
pub fn component_tag(index: usize) -> Option<i32> {
    (index < MAX_COMPONENTS).then(|| TAG_COMPONENT_DATA_1 + index as i32)
}

/// Returns the `index`-th (zero-based) component of a frame, if it was stored.
pub fn component(directory: &Directory, index: usize) -> Option<JpegComponent> {
    let tag = component_tag(index)?;
    directory.get::<JpegComponent>(tag).ok()
}

pub fn image_width(directory: &Directory) -> Result<u32> {
    directory.get(TAG_IMAGE_WIDTH)
}

pub fn image_height(directory: &Directory) -> Result<u32> {
    directory.get(TAG_IMAGE_HEIGHT)
}

pub fn number_of_components(directory: &Directory) -> Result<u32> {
    directory.get(TAG_NUMBER_OF_COMPONENTS)
}

/// Compression type codes, each the offset of its SOF marker from 0xC0.
const COMPRESSION_TYPES: &[(i64, &str)] = &[
    (0, "Baseline"),
    (1, "Extended sequential, Huffman"),
    (2, "Progressive, Huffman"),
    (3, "Lossless, Huffman"),
    (5, "Differential sequential, Huffman"),
    (6, "Differential progressive, Huffman"),
    (7, "Differential lossless, Huffman"),
    (9, "Extended sequential, arithmetic"),
    (10, "Progressive, arithmetic"),
    (11, "Lossless, arithmetic"),
    (13, "Differential sequential, arithmetic"),
    (14, "Differential progressive, arithmetic"),
    (15, "Differential lossless, arithmetic"),
];

#[derive(Debug)]
pub struct JpegDescriptor;

impl JpegDescriptor {
    fn with_unit(directory: &Directory, tag: i32, unit: &str) -> Option<String> {
        default_description(directory, tag).map(|value| format!("{} {}", value, unit))
    }

    fn component_description(directory: &Directory, tag: i32) -> Result<Option<String>> {
        let component = match directory.value(tag) {
            None => return Ok(None),
            Some(TagValue::Record(Record::JpegComponent(component))) => component,
            Some(other) => {
                return Err(description_error(
                    directory,
                    tag,
                    format!("expected a component record, found {}", other.type_name()),
                ))
            }
        };
        let name = match component.component_name() {
            Some(name) => name.to_owned(),
            None => format!("Unknown ({})", component.component_id),
        };
        Ok(Some(format!(
            "{} component: Quantization table {}, Sampling factors {} horiz/{} vert",
            name,
            component.quantization_table_number,
            component.horizontal_sampling_factor(),
            component.vertical_sampling_factor()
        )))
    }
}

impl TagDescriptor for JpegDescriptor {
    fn description(&self, directory: &Directory, tag: i32) -> Result<Option<String>> {
        match tag {
            TAG_COMPRESSION_TYPE => describe_enumerated(directory, tag, COMPRESSION_TYPES),
            TAG_IMAGE_WIDTH | TAG_IMAGE_HEIGHT => Ok(Self::with_unit(directory, tag, "pixels")),
            TAG_DATA_PRECISION => Ok(Self::with_unit(directory, tag, "bits")),
            TAG_COMPONENT_DATA_1..=TAG_COMPONENT_DATA_4 => Self::component_description(directory, tag),
            _ => Ok(default_description(directory, tag)),
        }
    }
}
