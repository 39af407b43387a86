//! This module is responsible for SRT parsing and writing.
//! Timing and cue order survive a load/save cycle untouched; only text changes.

use crate::encoding;
use anyhow::{Context, Result};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Represents a single cue (index, time range, text lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub index: u32,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: Vec<String>,
}

impl Cue {
    /// The cue text as a single newline separated string.
    pub fn joined_text(&self) -> String {
        self.text.join("\n")
    }

    /// Replace the text, splitting `text` back into display lines.
    /// Blank lines are dropped since they would end the block on disk.
    pub fn set_text(&mut self, text: &str) {
        self.text = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
    }
}

/// Why a subtitle file could not be parsed. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected a cue index, found {found:?}")]
    BadIndex { line: usize, found: String },
    #[error("line {line}: cue {index} has no time line")]
    MissingTime { line: usize, index: u32 },
    #[error("line {line}: expected `start --> end`, found {found:?}")]
    BadTimeLine { line: usize, found: String },
    #[error("line {line}: malformed timestamp {found:?}")]
    BadTimestamp { line: usize, found: String },
}

/// A parsed subtitle file together with the encoding it was read with.
#[derive(Debug, Clone)]
pub struct SubtitleDocument {
    pub cues: Vec<Cue>,
    pub encoding: &'static Encoding,
}

impl SubtitleDocument {
    /// Write the document as UTF-8, whatever encoding it was read with.
    pub fn save(&self, path: &Path) -> Result<()> {
        trace!("save path={} cues={}", path.display(), self.cues.len());
        fs::write(path, format(&self.cues)).with_context(|| format!("writing {}", path.display()))
    }
}

/// Load `path`, detecting its encoding first.
pub fn load(path: &Path) -> Result<SubtitleDocument> {
    trace!("load path={}", path.display());
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let encoding = encoding::detect(&bytes);
    debug!("reading {} as {}", path.display(), encoding.name());
    let text = encoding::decode(&bytes, encoding)
        .with_context(|| format!("decoding {}", path.display()))?;
    let cues = parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(SubtitleDocument { cues, encoding })
}

/// Parse SRT text into a list of cues, preserving order.
pub fn parse(input: &str) -> Result<Vec<Cue>, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut cues = Vec::new();
    let mut lines = input.lines().enumerate().map(|(n, l)| (n + 1, l));
    loop {
        let (line, index_line) = match lines.next() {
            Some((_, l)) if l.trim().is_empty() => continue,
            Some((n, l)) => (n, l.trim()),
            None => break,
        };
        let index: u32 = index_line.parse().map_err(|_| ParseError::BadIndex {
            line,
            found: index_line.to_string(),
        })?;
        let (time_no, time_line) = lines.next().ok_or(ParseError::MissingTime {
            line: line + 1,
            index,
        })?;
        let (start_ms, end_ms) = parse_times(time_no, time_line)?;
        let mut text = Vec::new();
        for (_, l) in lines.by_ref() {
            if l.trim().is_empty() {
                break;
            }
            text.push(l.to_string());
        }
        cues.push(Cue {
            index,
            start_ms,
            end_ms,
            text,
        });
    }
    Ok(cues)
}

/// Format cues back to text, each block followed by a blank line.
pub fn format(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue.index,
            format_time(cue.start_ms),
            format_time(cue.end_ms),
            cue.joined_text()
        ));
    }
    out
}

/// Parse `00:00:01,000 --> 00:00:02,000`, ignoring position coordinates
/// some encoders append after the end time.
fn parse_times(line_no: usize, line: &str) -> Result<(u64, u64), ParseError> {
    let (start, rest) = line.split_once("-->").ok_or_else(|| ParseError::BadTimeLine {
        line: line_no,
        found: line.to_string(),
    })?;
    let end = rest.split_whitespace().next().unwrap_or("");
    let parse = |t: &str| {
        parse_time(t.trim()).ok_or_else(|| ParseError::BadTimestamp {
            line: line_no,
            found: t.trim().to_string(),
        })
    };
    Ok((parse(start)?, parse(end)?))
}

/// Parse `HH:MM:SS,mmm` (or `HH:MM:SS.mmm`) into milliseconds.
/// Values too large for a `u64` are rejected.
fn parse_time(t: &str) -> Option<u64> {
    let parts: Vec<&str> = t.split([':', ',', '.']).collect();
    if parts.len() != 4 {
        return None;
    }
    let h: u64 = parts[0].parse().ok()?;
    let m: u64 = parts[1].parse().ok()?;
    let s: u64 = parts[2].parse().ok()?;
    let ms: u64 = parts[3].parse().ok()?;
    h.checked_mul(60)?
        .checked_add(m)?
        .checked_mul(60)?
        .checked_add(s)?
        .checked_mul(1000)?
        .checked_add(ms)
}

/// Format milliseconds back to `HH:MM:SS,mmm`.
fn format_time(ms: u64) -> String {
    let h = ms / 3_600_000;
    let m = (ms % 3_600_000) / 60_000;
    let s = (ms % 60_000) / 1000;
    let ms = ms % 1000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}
