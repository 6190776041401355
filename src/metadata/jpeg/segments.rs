//! Locates segments inside a JPEG container.
//!
//! # Container Structure
//! ```text
//! [2 bytes] SOI marker (0xFFD8)
//! Repeated until SOS (0xFFDA) or EOI (0xFFD9):
//!   [1+ bytes] 0xFF prefix (extra 0xFF bytes are fill)
//!   [1 byte]   Marker
//!   [2 bytes]  Length, big-endian, including these two bytes
//!   [N bytes]  Payload
//! ```
//!
//! Scanning stops at Start-Of-Scan: the entropy-coded image data that
//! follows carries no metadata and is never buffered.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, info, trace};

use crate::metadata::types::error::{MetadataError, Result};

pub const SEGMENT_SOF0: u8 = 0xC0;
pub const SEGMENT_SOF1: u8 = 0xC1;
pub const SEGMENT_SOF2: u8 = 0xC2;
pub const SEGMENT_SOF3: u8 = 0xC3;
pub const SEGMENT_DHT: u8 = 0xC4;
pub const SEGMENT_SOF5: u8 = 0xC5;
pub const SEGMENT_SOF6: u8 = 0xC6;
pub const SEGMENT_SOF7: u8 = 0xC7;
pub const SEGMENT_SOF9: u8 = 0xC9;
pub const SEGMENT_SOF10: u8 = 0xCA;
pub const SEGMENT_SOF11: u8 = 0xCB;
pub const SEGMENT_SOF13: u8 = 0xCD;
pub const SEGMENT_SOF14: u8 = 0xCE;
pub const SEGMENT_SOF15: u8 = 0xCF;
pub const SEGMENT_SOI: u8 = 0xD8;
pub const SEGMENT_EOI: u8 = 0xD9;
pub const SEGMENT_SOS: u8 = 0xDA;
pub const SEGMENT_DQT: u8 = 0xDB;
pub const SEGMENT_DRI: u8 = 0xDD;
pub const SEGMENT_APP0: u8 = 0xE0;
pub const SEGMENT_APP1: u8 = 0xE1;
pub const SEGMENT_APP2: u8 = 0xE2;
pub const SEGMENT_APPD: u8 = 0xED;
pub const SEGMENT_APPE: u8 = 0xEE;
pub const SEGMENT_COM: u8 = 0xFE;

/// All Start-Of-Frame markers, in the order they are preferred.
pub const SOF_MARKERS: [u8; 13] = [
    SEGMENT_SOF0,
    SEGMENT_SOF1,
    SEGMENT_SOF2,
    SEGMENT_SOF3,
    SEGMENT_SOF5,
    SEGMENT_SOF6,
    SEGMENT_SOF7,
    SEGMENT_SOF9,
    SEGMENT_SOF10,
    SEGMENT_SOF11,
    SEGMENT_SOF13,
    SEGMENT_SOF14,
    SEGMENT_SOF15,
];

/// Markers that stand alone, with no length field or payload.
fn is_standalone(marker: u8) -> bool {
    marker == 0x01 || (0xD0..=0xD7).contains(&marker)
}

/// Maps a premature end of input to a format error.
fn truncated(err: io::Error, context: &str) -> MetadataError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        MetadataError::InvalidFormat(format!("JPEG data truncated in {}", context))
    } else {
        MetadataError::Io(err)
    }
}

/// Reads one byte, returning `None` at a clean end of input.
fn read_byte_or_eof<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    match reader.read_u8() {
        Ok(byte) => Ok(Some(byte)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The segments of one JPEG container, keyed by marker.
///
/// Multiple segments with the same marker are kept in file order.
#[derive(Debug, Default)]
pub struct JpegSegmentReader {
    segments: HashMap<u8, Vec<Vec<u8>>>,
}

impl JpegSegmentReader {
    /// Reads the segments of the JPEG file at `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened or read
    /// - File does not start with an SOI marker
    /// - A segment header or payload is truncated
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening JPEG file: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads segments from an in-memory JPEG.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    /// Reads segments from any JPEG stream, consuming it up to Start-Of-Scan.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let soi = reader
            .read_u16::<BigEndian>()
            .map_err(|e| truncated(e, "SOI marker"))?;
        if soi != 0xFF00 | SEGMENT_SOI as u16 {
            return Err(MetadataError::InvalidFormat(format!(
                "Not a JPEG: expected SOI marker 0xffd8, found {:#06x}",
                soi
            )));
        }

        let mut segments: HashMap<u8, Vec<Vec<u8>>> = HashMap::new();
        loop {
            let Some(prefix) = read_byte_or_eof(&mut reader)? else {
                debug!("JPEG data ended before Start-Of-Scan");
                break;
            };
            if prefix != 0xFF {
                return Err(MetadataError::InvalidFormat(format!(
                    "Expected marker prefix 0xff, found {:#04x}",
                    prefix
                )));
            }

            // Skip fill bytes
            let mut marker = reader.read_u8().map_err(|e| truncated(e, "marker"))?;
            while marker == 0xFF {
                marker = reader.read_u8().map_err(|e| truncated(e, "marker"))?;
            }

            if marker == SEGMENT_SOS || marker == SEGMENT_EOI {
                trace!("Reached marker {:#04x}, stopping segment scan", marker);
                break;
            }
            if is_standalone(marker) {
                trace!("Skipping standalone marker {:#04x}", marker);
                continue;
            }

            let length = reader
                .read_u16::<BigEndian>()
                .map_err(|e| truncated(e, "segment length"))?;
            if length < 2 {
                return Err(MetadataError::InvalidFormat(format!(
                    "Segment {:#04x} declares invalid length {}",
                    marker, length
                )));
            }
            let mut payload = vec![0u8; length as usize - 2];
            reader
                .read_exact(&mut payload)
                .map_err(|e| truncated(e, "segment payload"))?;
            trace!("Segment {:#04x}: {} bytes", marker, payload.len());
            segments.entry(marker).or_default().push(payload);
        }

        debug!(
            "Located {} segments across {} marker types",
            segments.values().map(Vec::len).sum::<usize>(),
            segments.len()
        );
        Ok(Self { segments })
    }

    /// Returns the first segment with `marker`, or `None` if there is none.
    pub fn segment(&self, marker: u8) -> Option<&[u8]> {
        self.segment_at(marker, 0)
    }

    /// Returns the `occurrence`-th (zero-based) segment with `marker`.
    pub fn segment_at(&self, marker: u8, occurrence: usize) -> Option<&[u8]> {
        self.segments
            .get(&marker)
            .and_then(|list| list.get(occurrence))
            .map(Vec::as_slice)
    }

    /// Returns the first segment matching any of `markers`, tried in order.
    pub fn find_first(&self, markers: &[u8]) -> Option<(u8, &[u8])> {
        markers
            .iter()
            .find_map(|&marker| self.segment(marker).map(|data| (marker, data)))
    }

    pub fn segment_count(&self, marker: u8) -> usize {
        self.segments.get(&marker).map_or(0, Vec::len)
    }
}
