/*!
 * Variant detection and text decoding.
 *
 * Binary files are recognized by their signature. Anything else is decoded
 * as text (BOM first, then the configured fallback encoding), checked against
 * the three-line header, and classified by its first value: a number means
 * short text, a `key = value` line means long text.
 */

use std::borrow::Cow;

use log::{debug, warn};

use crate::errors::{Result, TextGridError};
use crate::format::text::body_lines;
use crate::format::{BINARY_SIGNATURE, Format, TextEncoding};

/// Input classified by variant, ready for the matching codec
#[derive(Debug)]
pub(crate) enum Classified<'a> {
    /// Binary payload after the signature
    Binary(&'a [u8]),
    /// Decoded text of either text variant
    Text { format: Format, text: Cow<'a, str> },
}

/// Detect the variant of a complete TextGrid file
pub fn detect(bytes: &[u8]) -> Result<Format> {
    match classify(bytes, TextEncoding::Utf8)? {
        Classified::Binary(_) => Ok(Format::Binary),
        Classified::Text { format, .. } => Ok(format),
    }
}

pub(crate) fn classify(bytes: &[u8], fallback: TextEncoding) -> Result<Classified<'_>> {
    if let Some(payload) = bytes.strip_prefix(BINARY_SIGNATURE) {
        debug!("Detected binary TextGrid ({} payload bytes)", payload.len());
        return Ok(Classified::Binary(payload));
    }

    let text = decode(bytes, fallback)?;
    let format = {
        let lines = body_lines(&text)?;
        let first = lines
            .first()
            .ok_or_else(|| TextGridError::format("no content after the TextGrid header"))?;
        if first.text.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            Format::ShortText
        } else {
            Format::LongText
        }
    };
    debug!("Detected {} TextGrid", format);
    Ok(Classified::Text { format, text })
}

/// Decode text input, honouring a byte-order mark when present
pub(crate) fn decode(bytes: &[u8], fallback: TextEncoding) -> Result<Cow<'_, str>> {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        debug!("UTF-16BE byte-order mark found");
        return decode_utf16(rest, u16::from_be_bytes).map(Cow::Owned);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        warn!("Reading little-endian UTF-16 input; Praat writes big-endian");
        return decode_utf16(rest, u16::from_le_bytes).map(Cow::Owned);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return decode_utf8(rest);
    }

    match fallback {
        TextEncoding::Utf8 => decode_utf8(bytes),
        TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes).map(Cow::Owned),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| TextGridError::format(format!("input is not valid UTF-8: {}", e)))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(TextGridError::format("UTF-16 input has an odd number of bytes"));
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| TextGridError::format(format!("input is not valid UTF-16: {}", e)))
}
