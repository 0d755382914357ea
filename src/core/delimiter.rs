//! Front matter delimiters and first-line classification
//!
//! Classification only ever looks at the first line of the document, capped
//! at five bytes. That is enough to tell `---\n`, `---\r\n`, `+++\n`,
//! `+++\r\n` and `{` apart.

use crate::core::metadata::FrontMatterFormat;
use crate::io::stream::PeekReader;
use regex::bytes::Regex;
use std::io::{self, Read};
use std::sync::LazyLock;

/// Leading byte that marks a document as raw HTML
pub const HTML_LEAD: u8 = b'<';
/// YAML delimiter
pub const YAML_DELIM: &[u8] = b"---";
/// TOML delimiter
pub const TOML_DELIM: &[u8] = b"+++";
/// Opening byte of JSON front matter
pub const JSON_LEAD: &[u8] = b"{";
/// Closing byte of JSON front matter
pub const JSON_TRAIL: &[u8] = b"}";

/// Width of the first-line window used for classification
const FIRST_LINE_WINDOW: usize = 5;

// `\s` spelled out as the ASCII class so Unicode spaces never open a block.
static DELIMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(?:---[\t\n\x0C\r ]*\n|\+\+\+[\t\n\x0C\r ]*\n|\{)")
        .expect("delimiter pattern is valid")
});

/// The three supported delimiter conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    /// `---` ... `---`
    Dashes,
    /// `+++` ... `+++`
    Pluses,
    /// `{` ... `}`, nesting
    Braces,
}

impl DelimiterKind {
    /// Opening byte sequence
    pub fn left(self) -> &'static [u8] {
        match self {
            Self::Dashes => YAML_DELIM,
            Self::Pluses => TOML_DELIM,
            Self::Braces => JSON_LEAD,
        }
    }

    /// Closing byte sequence
    pub fn right(self) -> &'static [u8] {
        match self {
            Self::Dashes => YAML_DELIM,
            Self::Pluses => TOML_DELIM,
            Self::Braces => JSON_TRAIL,
        }
    }

    /// Whether the block opens and closes with the same line
    pub fn is_paired_identical(self) -> bool {
        self.left() == self.right()
    }

    /// The metadata format this delimiter implies
    pub fn format(self) -> FrontMatterFormat {
        match self {
            Self::Dashes => FrontMatterFormat::Yaml,
            Self::Pluses => FrontMatterFormat::Toml,
            Self::Braces => FrontMatterFormat::Json,
        }
    }
}

/// Peek the first line, capped at five bytes and including its `\n`
pub fn peek_line<R: Read>(stream: &mut PeekReader<R>) -> io::Result<Vec<u8>> {
    let window = stream.peek(FIRST_LINE_WINDOW)?;
    let line = match window.iter().position(|&b| b == b'\n') {
        Some(idx) => &window[..=idx],
        None => window,
    };
    Ok(line.to_vec())
}

/// Whether front matter and template processing applies at all
///
/// Documents that open with `<` are raw HTML and pass through untouched.
pub fn should_render(first_line: &[u8]) -> bool {
    first_line.first() != Some(&HTML_LEAD)
}

/// Whether the first line opens a front matter block
pub fn is_front_matter_delim(first_line: &[u8]) -> bool {
    DELIMS.is_match(first_line)
}

/// Pick the delimiter kind from a first line that passed [`is_front_matter_delim`]
///
/// The choice is made on the length of the peeked line: four or five bytes
/// are a `---`/`+++` line (or a JSON object whose first line did not fit in
/// the window), one to three bytes are the start of a JSON object. Returns
/// `None` for any other length.
pub fn determine_delims(first_line: &[u8]) -> Option<DelimiterKind> {
    match first_line.len() {
        4 | 5 => match first_line[0] {
            b'-' => Some(DelimiterKind::Dashes),
            b'{' => Some(DelimiterKind::Braces),
            _ => Some(DelimiterKind::Pluses),
        },
        1..=3 => Some(DelimiterKind::Braces),
        _ => None,
    }
}
