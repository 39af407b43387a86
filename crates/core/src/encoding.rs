//! Character encoding detection for subtitle files.
//! Guesses are statistical; a wrong guess garbles text but never panics.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Returned when bytes are not valid in the chosen encoding.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("content is not valid {encoding}")]
pub struct DecodeError {
    pub encoding: &'static str,
}

/// Guess the encoding of `bytes`.
/// A byte order mark wins, otherwise chardetng picks the most likely one.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Read the file at `path` and guess its encoding.
pub fn detect_file(path: &Path) -> Result<&'static Encoding> {
    trace!("detect_file path={}", path.display());
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let encoding = detect(&bytes);
    debug!("detected {} for {}", encoding.name(), path.display());
    Ok(encoding)
}

/// Decode `bytes` with `encoding`, dropping a matching BOM.
/// Malformed sequences are an error instead of replacement characters.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, DecodeError> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom, len)) if bom == encoding => &bytes[len..],
        _ => bytes,
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or(DecodeError {
            encoding: encoding.name(),
        })
}
