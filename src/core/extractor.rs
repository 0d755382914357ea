//! Front matter extraction state machine
//!
//! The scanner consumes the stream one byte at a time until it has seen the
//! closing delimiter for the detected convention:
//!
//! - `---` and `+++` blocks open and close with the same line. A delimiter
//!   only counts when it starts a line and is followed by LF, CR+LF, or
//!   spaces and then one of those. Each such line toggles the level between
//!   0 and 1; the second one closes the block.
//! - `{` blocks nest. Every `{` raises the level and every `}` lowers it,
//!   wherever they appear. Braces inside JSON strings are not recognised as
//!   such, so `{"a": "}"}` ends after the first `}`.
//!
//! ```text
//! AwaitOpen ──▶ InBody ──(delimiter at line start)──▶ AwaitCloseTerminator ─┐
//!                 ▲  │                                    │  ▲   (space)     │
//!                 │  └──(level 0)──▶ Done ◀──(level 0)────┘  └───────────────┘
//!                 └────────────────(level 1)──────────────┘
//! ```
//!
//! Any read failure or malformed delimiter moves the machine to `Failed`.

use crate::core::delimiter::DelimiterKind;
use crate::core::normalize::{chomp_end_comment, chomp_whitespace};
use crate::error::{PageError, Result};
use crate::io::stream::PeekReader;
use log::{debug, trace};
use std::io::Read;

#[derive(Debug)]
enum ScanState {
    /// Buffering the rest of the already classified opening delimiter
    AwaitOpen,
    /// Scanning block content for the next delimiter byte
    InBody,
    /// A delimiter was matched at a line start; checking what follows it
    AwaitCloseTerminator,
    Done,
    Failed(PageError),
}

/// Scanner for a single front matter block
pub struct FrontMatterScanner {
    kind: DelimiterKind,
    buf: Vec<u8>,
    level: usize,
}

impl FrontMatterScanner {
    /// Create a scanner for the given delimiter convention
    pub fn new(kind: DelimiterKind) -> Self {
        Self {
            kind,
            buf: Vec::new(),
            level: 0,
        }
    }

    /// Run the scanner to completion
    ///
    /// The stream must be positioned on the first byte of the opening
    /// delimiter. On success it is left on the first body byte, with the
    /// whitespace and any closing comment wrapper after the block consumed.
    pub fn run<R: Read>(mut self, stream: &mut PeekReader<R>) -> Result<Vec<u8>> {
        let mut state = ScanState::AwaitOpen;
        loop {
            state = match state {
                ScanState::Done => break,
                ScanState::Failed(err) => {
                    debug!("front matter scan failed after {} bytes: {}", self.buf.len(), err);
                    return Err(err);
                }
                other => self.step(other, stream),
            };
        }

        chomp_whitespace(stream)?;
        chomp_end_comment(stream)?;
        debug!(
            "extracted {:?} front matter ({} bytes)",
            self.kind,
            self.buf.len()
        );
        Ok(self.buf)
    }

    fn step<R: Read>(&mut self, state: ScanState, stream: &mut PeekReader<R>) -> ScanState {
        self.transition(state, stream)
            .unwrap_or_else(ScanState::Failed)
    }

    fn transition<R: Read>(
        &mut self,
        state: ScanState,
        stream: &mut PeekReader<R>,
    ) -> Result<ScanState> {
        match state {
            ScanState::AwaitOpen => {
                // Already checked by the classifier, so no validation here.
                for _ in 1..self.kind.left().len() {
                    let byte = self.read(stream)?;
                    self.buf.push(byte);
                }
                Ok(ScanState::InBody)
            }
            ScanState::InBody => self.scan_body(stream),
            ScanState::AwaitCloseTerminator => self.check_terminator(stream),
            done @ (ScanState::Done | ScanState::Failed(_)) => Ok(done),
        }
    }

    fn scan_body<R: Read>(&mut self, stream: &mut PeekReader<R>) -> Result<ScanState> {
        let byte = self.read(stream)?;
        self.buf.push(byte);

        let open = last(self.kind.left());
        let close = last(self.kind.right());
        if byte == open {
            if self.kind.is_paired_identical() {
                if self.at_line_delimiter() {
                    return Ok(ScanState::AwaitCloseTerminator);
                }
            } else {
                self.level += 1;
            }
        } else if byte == close {
            self.level = self.level.saturating_sub(1);
        }

        Ok(self.settle())
    }

    fn check_terminator<R: Read>(&mut self, stream: &mut PeekReader<R>) -> Result<ScanState> {
        match stream.read_byte()? {
            // A closing delimiter may end the stream without a newline.
            None if self.level == 1 => {}
            None => return Err(PageError::unterminated(self.buf.len())),
            Some(b'\n') => self.buf.push(b'\n'),
            Some(b' ') => return Ok(ScanState::AwaitCloseTerminator),
            Some(b'\r') => {
                self.buf.push(b'\r');
                match self.read(stream)? {
                    b'\n' => self.buf.push(b'\n'),
                    _ => return Err(PageError::malformed_delimiter(self.buf.len())),
                }
            }
            Some(_) => return Err(PageError::malformed_delimiter(self.buf.len())),
        }

        self.level = if self.level == 0 { 1 } else { 0 };
        trace!(
            "delimiter line at filepos {}, level now {}",
            self.buf.len(),
            self.level
        );
        Ok(self.settle())
    }

    fn settle(&self) -> ScanState {
        if self.level == 0 {
            ScanState::Done
        } else {
            ScanState::InBody
        }
    }

    /// Buffer ends with the delimiter, and the delimiter starts a line
    fn at_line_delimiter(&self) -> bool {
        let delim = self.kind.left();
        if !self.buf.ends_with(delim) {
            return false;
        }
        let start = self.buf.len() - delim.len();
        start == 0 || self.buf[start - 1] == b'\n'
    }

    fn read<R: Read>(&self, stream: &mut PeekReader<R>) -> Result<u8> {
        stream
            .read_byte()?
            .ok_or_else(|| PageError::unterminated(self.buf.len()))
    }
}

fn last(delim: &[u8]) -> u8 {
    delim[delim.len() - 1]
}

/// Extract one front matter block from the stream
pub fn extract_front_matter<R: Read>(
    stream: &mut PeekReader<R>,
    kind: DelimiterKind,
) -> Result<Vec<u8>> {
    FrontMatterScanner::new(kind).run(stream)
}
