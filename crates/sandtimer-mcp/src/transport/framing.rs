//! Message framing with `Content-Length` headers.
//!
//! A frame is a block of `Key: Value` header lines (CRLF or LF terminated),
//! a blank line, then exactly `Content-Length` bytes of UTF-8 JSON.

use std::fmt;
use std::io::{self, BufRead, Read, Write};

use sandtimer::json::{to_vec, SerializeError, Value};

use crate::types::error_codes;

/// Largest payload accepted from the peer (64 MiB).
pub const MAX_CONTENT_LENGTH: usize = 64 * 1024 * 1024;

/// Where in a frame the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    Headers,
    Payload,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameStage::Headers => f.write_str("headers"),
            FrameStage::Payload => f.write_str("payload"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FramingError {
    #[error("Unexpected end of stream while reading {stage}")]
    UnexpectedEof { stage: FrameStage },

    #[error("Invalid header line: {line:?}")]
    InvalidHeader { line: String },

    #[error("Missing Content-Length header")]
    MissingContentLength,

    #[error("Invalid Content-Length header: {value:?}")]
    InvalidContentLength { value: String },

    #[error("Content too large: {size} bytes exceeds {max} bytes")]
    ContentTooLarge { size: usize, max: usize },

    #[error("Failed to encode message: {0}")]
    Encode(#[from] SerializeError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FramingError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            FramingError::UnexpectedEof { .. } | FramingError::InvalidHeader { .. } => PARSE_ERROR,
            FramingError::MissingContentLength
            | FramingError::InvalidContentLength { .. }
            | FramingError::ContentTooLarge { .. } => INVALID_REQUEST,
            FramingError::Encode(_) | FramingError::Io(_) => INTERNAL_ERROR,
        }
    }

    /// The stream can no longer be used.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FramingError::Io(_))
    }
}

/// Read one frame's payload.
///
/// Returns `Ok(None)` when the input ends before any header byte.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, FramingError> {
    let mut content_length: Option<usize> = None;
    let mut saw_header = false;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            if saw_header {
                return Err(FramingError::UnexpectedEof {
                    stage: FrameStage::Headers,
                });
            }
            return Ok(None);
        }
        saw_header = true;

        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() {
            break;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| FramingError::InvalidHeader {
            line: line.to_string(),
        })?;
        if key.trim().eq_ignore_ascii_case("content-length") {
            let value = value.trim();
            let length = value
                .parse::<usize>()
                .map_err(|_| FramingError::InvalidContentLength {
                    value: value.to_string(),
                })?;
            content_length = Some(length);
        }
    }

    let length = content_length.ok_or(FramingError::MissingContentLength)?;

    if length > MAX_CONTENT_LENGTH {
        let drained = io::copy(&mut reader.take(length as u64), &mut io::sink())?;
        if drained < length as u64 {
            return Err(FramingError::UnexpectedEof {
                stage: FrameStage::Payload,
            });
        }
        return Err(FramingError::ContentTooLarge {
            size: length,
            max: MAX_CONTENT_LENGTH,
        });
    }

    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FramingError::UnexpectedEof {
            stage: FrameStage::Payload,
        },
        _ => FramingError::Io(e),
    })?;
    Ok(Some(payload))
}

/// Serialize `value` compactly and write it as one frame.
pub fn write_message<W: Write>(writer: &mut W, value: &Value) -> Result<(), FramingError> {
    let payload = to_vec(value)?;
    write!(writer, "Content-Length: {}\r\n\r\n", payload.len())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}
