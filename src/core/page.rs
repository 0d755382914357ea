//! The page model: raw front matter, raw content, and a renderable flag
//!
//! A [`Page`] is produced by a single forward pass over a byte stream and is
//! never modified afterwards. Structured metadata is decoded lazily through
//! [`Page::metadata`].

use crate::core::delimiter::{determine_delims, is_front_matter_delim, peek_line, should_render};
use crate::core::extractor::extract_front_matter;
use crate::core::metadata::{self, FrontMatterFormat, Metadata};
use crate::core::normalize::{chomp_start_comment, chomp_whitespace};
use crate::error::{PageError, Result};
use crate::io::stream::PeekReader;
use log::debug;
use std::io::Read;

/// A document split into front matter and content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    renderable: bool,
    front_matter: Vec<u8>,
    content: Vec<u8>,
}

impl Page {
    /// Create a page from already separated parts
    pub fn new(renderable: bool, front_matter: Vec<u8>, content: Vec<u8>) -> Self {
        Self {
            renderable,
            front_matter,
            content,
        }
    }

    /// Read and split a page from any reader
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        extract(reader)
    }

    /// Split a page held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        extract(bytes)
    }

    /// Raw front matter, delimiters included; empty when there is none
    pub fn front_matter(&self) -> &[u8] {
        &self.front_matter
    }

    /// Raw content following the front matter
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether front matter and template processing applies to this page
    pub fn is_renderable(&self) -> bool {
        self.renderable
    }

    /// Whether a front matter block was found
    pub fn has_front_matter(&self) -> bool {
        !self.front_matter.is_empty()
    }

    /// Format of the front matter, if any
    pub fn front_matter_format(&self) -> Option<FrontMatterFormat> {
        metadata::detect_format(&self.front_matter)
    }

    /// Decode the front matter
    ///
    /// Decoding is repeated on every call. Errors leave the content intact.
    pub fn metadata(&self) -> Result<Option<Metadata>> {
        metadata::decode(&self.front_matter)
    }

    /// Front matter as text
    pub fn front_matter_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.front_matter).map_err(|_| PageError::invalid_utf8("front matter"))
    }

    /// Content as text
    pub fn content_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.content).map_err(|_| PageError::invalid_utf8("content"))
    }

    /// Take the front matter and content buffers
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.front_matter, self.content)
    }
}

/// Split a byte stream into a [`Page`]
///
/// Leading whitespace and an opening `<!--` wrapper line are skipped first.
/// Pages that then start with `<` are not renderable and are returned whole
/// as content. Otherwise a `---`, `+++` or `{` opening is extracted as front
/// matter, and everything after it becomes the content.
pub fn extract<R: Read>(reader: R) -> Result<Page> {
    let mut stream = PeekReader::new(reader);

    chomp_whitespace(&mut stream)?;
    chomp_start_comment(&mut stream)?;

    let first_line = peek_line(&mut stream)?;
    let renderable = should_render(&first_line);

    let mut front_matter = Vec::new();
    if !renderable {
        debug!("page starts with markup, skipping front matter detection");
    } else if is_front_matter_delim(&first_line) {
        let kind =
            determine_delims(&first_line).ok_or_else(|| PageError::unclassifiable(&first_line))?;
        debug!(
            "{} front matter detected at byte {}",
            kind.format(),
            stream.position()
        );
        front_matter = extract_front_matter(&mut stream, kind)?;
    }

    let content = extract_content(&mut stream)?;
    Ok(Page::new(renderable, front_matter, content))
}

/// Consume the rest of the stream as content
pub fn extract_content<R: Read>(stream: &mut PeekReader<R>) -> Result<Vec<u8>> {
    Ok(stream.read_to_end()?)
}
