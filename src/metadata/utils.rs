//! Low-level helpers shared by the readers

use encoding_rs::{Encoding, UTF_8};
use log::warn;

/// Resolve a WHATWG encoding label (e.g. `"utf-8"`, `"latin1"`, `"gbk"`).
///
/// Unknown labels fall back to UTF-8.
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!("Unknown text encoding '{}', falling back to UTF-8", label);
        UTF_8
    })
}

/// Decode `bytes` as text, substituting U+FFFD for malformed sequences.
///
/// A leading byte-order mark is honoured and stripped.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Malformed {} text ({} bytes); invalid sequences were replaced",
            actual.name(),
            bytes.len()
        );
    }
    text.into_owned()
}
