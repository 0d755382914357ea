//! Leading whitespace and HTML comment wrapper handling
//!
//! Front matter can be hidden from HTML renderers by wrapping it in a
//! comment:
//!
//! ```text
//! <!--
//! ---
//! title: Hidden
//! ---
//! -->
//! ```
//!
//! The opening wrapper line is dropped before classification and the closing
//! one after extraction. Both checks look at a fixed 32 byte window; a stream
//! with fewer bytes left is treated as having no wrapper.

use crate::io::stream::{PeekReader, MAX_LOOKAHEAD};
use log::trace;
use std::io::{self, Read};

/// Opening marker of an HTML comment
pub const COMMENT_START: &[u8] = b"<!--";
/// Closing marker of an HTML comment
pub const COMMENT_END: &[u8] = b"-->";

/// Whether a code point counts as whitespace when trimming around front matter
pub fn is_space(c: char) -> bool {
    c.is_whitespace()
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decode the next code point without consuming it
fn peek_char<R: Read>(stream: &mut PeekReader<R>) -> io::Result<Option<(char, usize)>> {
    let window = stream.peek(4)?;
    let Some(width) = window.first().copied().and_then(utf8_width) else {
        return Ok(None);
    };
    let decoded = window
        .get(..width)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .and_then(|s| s.chars().next());
    Ok(decoded.map(|c| (c, width)))
}

/// Consume leading whitespace, returning the number of bytes skipped
///
/// Stops at the first non-space code point, at bytes that are not valid
/// UTF-8, or at end of stream.
pub fn chomp_whitespace<R: Read>(stream: &mut PeekReader<R>) -> io::Result<usize> {
    let mut skipped = 0;
    while let Some((c, width)) = peek_char(stream)? {
        if !is_space(c) {
            break;
        }
        skipped += stream.consume(width)?;
    }
    Ok(skipped)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Drop an opening `<!--` wrapper line, if present
///
/// A line that opens and closes a comment on its own is left alone, as is
/// a marker line longer than the lookahead window.
pub fn chomp_start_comment<R: Read>(stream: &mut PeekReader<R>) -> io::Result<bool> {
    let line_end = {
        let Some(window) = stream.peek_exact(MAX_LOOKAHEAD)? else {
            return Ok(false);
        };
        if !window.starts_with(COMMENT_START) {
            return Ok(false);
        }
        let Some(line_end) = window.iter().position(|&b| b == b'\n') else {
            return Ok(false);
        };
        if contains(trim_cr(&window[..line_end]), COMMENT_END) {
            return Ok(false);
        }
        line_end
    };

    stream.consume(line_end + 1)?;
    let skipped = chomp_whitespace(stream)?;
    trace!(
        "skipped comment wrapper start ({} bytes) and {} bytes of whitespace",
        line_end + 1,
        skipped
    );
    Ok(true)
}

/// Drop a closing `-->` wrapper line following the front matter, if present
///
/// The line must end with `-->` and must not open a new comment itself.
pub fn chomp_end_comment<R: Read>(stream: &mut PeekReader<R>) -> io::Result<bool> {
    let line_end = {
        let Some(window) = stream.peek_exact(MAX_LOOKAHEAD)? else {
            return Ok(false);
        };
        let Some(line_end) = window.iter().position(|&b| b == b'\n') else {
            return Ok(false);
        };
        let line = trim_cr(&window[..line_end]);
        if contains(line, COMMENT_START) || !line.ends_with(COMMENT_END) {
            return Ok(false);
        }
        line_end
    };

    stream.consume(line_end + 1)?;
    let skipped = chomp_whitespace(stream)?;
    trace!(
        "skipped comment wrapper end ({} bytes) and {} bytes of whitespace",
        line_end + 1,
        skipped
    );
    Ok(true)
}
