//! Core value types stored inside directories.
//!
//! A [`TagValue`] is the closed set of shapes a decoded tag may take. Typed
//! retrieval goes through [`FromTagValue`], which every accessor type
//! implements; a mismatch is reported as `None` and surfaced by the
//! directory as a coercion error.

use std::fmt;

/// A single component definition from a JPEG Start-Of-Frame segment.
///
/// Each frame lists one entry per colour component:
/// - Byte 0: Component identifier (1 = Y, 2 = Cb, 3 = Cr, 4 = I, 5 = Q)
/// - Byte 1: Sampling factors (high nibble horizontal, low nibble vertical)
/// - Byte 2: Quantization table selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegComponent {
    pub component_id: u8,
    pub sampling_factor_byte: u8,
    pub quantization_table_number: u8,
}

impl JpegComponent {
    pub fn new(component_id: u8, sampling_factor_byte: u8, quantization_table_number: u8) -> Self {
        Self {
            component_id,
            sampling_factor_byte,
            quantization_table_number,
        }
    }

    /// Returns the conventional name of this component, if the identifier is a known one.
    pub fn component_name(&self) -> Option<&'static str> {
        match self.component_id {
            1 => Some("Y"),
            2 => Some("Cb"),
            3 => Some("Cr"),
            4 => Some("I"),
            5 => Some("Q"),
            _ => None,
        }
    }

    pub fn horizontal_sampling_factor(&self) -> u8 {
        (self.sampling_factor_byte >> 4) & 0x0F
    }

    pub fn vertical_sampling_factor(&self) -> u8 {
        self.sampling_factor_byte & 0x0F
    }
}

impl fmt::Display for JpegComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.component_id, self.sampling_factor_byte, self.quantization_table_number
        )
    }
}

/// Composite records that only make sense for a particular directory kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    JpegComponent(JpegComponent),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Record::JpegComponent(component) => fmt::Display::fmt(component, f),
        }
    }
}

/// A raw tag value as decoded by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
    IntArray(Vec<i64>),
    Record(Record),
}

impl TagValue {
    /// A short name for the stored shape, used in coercion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            TagValue::Int(_) => "integer",
            TagValue::Text(_) => "string",
            TagValue::Bytes(_) => "byte sequence",
            TagValue::IntArray(_) => "integer array",
            TagValue::Record(_) => "record",
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    Ok(())
}

/// The default string form of a value, used whenever no descriptor substitution applies.
impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TagValue::Int(n) => fmt::Display::fmt(n, f),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Bytes(bytes) => write_joined(f, bytes),
            TagValue::IntArray(values) => write_joined(f, values),
            TagValue::Record(record) => fmt::Display::fmt(record, f),
        }
    }
}

impl From<i64> for TagValue {
    fn from(n: i64) -> Self {
        TagValue::Int(n)
    }
}

impl From<i32> for TagValue {
    fn from(n: i32) -> Self {
        TagValue::Int(n.into())
    }
}

impl From<u32> for TagValue {
    fn from(n: u32) -> Self {
        TagValue::Int(n.into())
    }
}

impl From<u16> for TagValue {
    fn from(n: u16) -> Self {
        TagValue::Int(n.into())
    }
}

impl From<u8> for TagValue {
    fn from(n: u8) -> Self {
        TagValue::Int(n.into())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Text(s)
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for TagValue {
    fn from(bytes: Vec<u8>) -> Self {
        TagValue::Bytes(bytes)
    }
}

impl From<Vec<i64>> for TagValue {
    fn from(values: Vec<i64>) -> Self {
        TagValue::IntArray(values)
    }
}

impl From<JpegComponent> for TagValue {
    fn from(component: JpegComponent) -> Self {
        TagValue::Record(Record::JpegComponent(component))
    }
}

/// Conversion from a stored [`TagValue`] into a requested Rust type.
///
/// Returns `None` when the stored shape cannot be interpreted as `Self`.
pub trait FromTagValue: Sized {
    /// Name of the requested type, reported in coercion errors.
    const TYPE_NAME: &'static str;

    fn from_tag_value(value: &TagValue) -> Option<Self>;
}

impl FromTagValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        match value {
            TagValue::Int(n) => Some(*n),
            TagValue::Text(s) => s.trim().parse().ok(),
            TagValue::IntArray(values) if values.len() == 1 => Some(values[0]),
            TagValue::Bytes(bytes) if bytes.len() == 1 => Some(bytes[0].into()),
            _ => None,
        }
    }
}

impl FromTagValue for i32 {
    const TYPE_NAME: &'static str = "32-bit integer";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        i64::from_tag_value(value).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromTagValue for u32 {
    const TYPE_NAME: &'static str = "unsigned 32-bit integer";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        i64::from_tag_value(value).and_then(|n| u32::try_from(n).ok())
    }
}

impl FromTagValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        Some(value.to_string())
    }
}

impl FromTagValue for Vec<u8> {
    const TYPE_NAME: &'static str = "byte sequence";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        match value {
            TagValue::Bytes(bytes) => Some(bytes.clone()),
            TagValue::Text(s) => Some(s.as_bytes().to_vec()),
            TagValue::IntArray(values) => values.iter().map(|&n| u8::try_from(n).ok()).collect(),
            TagValue::Int(_) | TagValue::Record(_) => None,
        }
    }
}

impl FromTagValue for Vec<i64> {
    const TYPE_NAME: &'static str = "integer array";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        match value {
            TagValue::IntArray(values) => Some(values.clone()),
            TagValue::Int(n) => Some(vec![*n]),
            TagValue::Bytes(bytes) => Some(bytes.iter().map(|&b| i64::from(b)).collect()),
            TagValue::Text(s) => s.split_whitespace().map(|part| part.parse().ok()).collect(),
            TagValue::Record(_) => None,
        }
    }
}

impl FromTagValue for JpegComponent {
    const TYPE_NAME: &'static str = "JPEG component";

    fn from_tag_value(value: &TagValue) -> Option<Self> {
        match value {
            TagValue::Record(Record::JpegComponent(component)) => Some(*component),
            _ => None,
        }
    }
}
