//! Forward-only byte stream with bounded lookahead
//!
//! [`PeekReader`] wraps any [`Read`] and offers the two primitives the
//! extraction engine is built on: peeking a small window without consuming
//! it, and consuming one byte at a time. Bytes are pulled from the inner
//! reader in chunks, so the engine never issues single-byte reads against
//! the source.

use std::io::{self, Read};

/// Largest window the extraction engine ever peeks
pub const MAX_LOOKAHEAD: usize = 32;

const CHUNK_SIZE: usize = 8 * 1024;

/// A peekable, forward-only byte source
pub struct PeekReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    consumed: usize,
    eof: bool,
}

impl<R: Read> PeekReader<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            consumed: 0,
            eof: false,
        }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Make at least `n` unconsumed bytes available, unless the source ends first
    fn fill_to(&mut self, n: usize) -> io::Result<()> {
        while self.buf.len() - self.pos < n && !self.eof {
            if self.pos == self.buf.len() {
                self.buf.clear();
                self.pos = 0;
            } else if self.pos >= CHUNK_SIZE {
                self.buf.drain(..self.pos);
                self.pos = 0;
            }

            let start = self.buf.len();
            self.buf.resize(start + CHUNK_SIZE, 0);
            match self.inner.read(&mut self.buf[start..]) {
                Ok(0) => {
                    self.buf.truncate(start);
                    self.eof = true;
                }
                Ok(read) => self.buf.truncate(start + read),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => self.buf.truncate(start),
                Err(e) => {
                    self.buf.truncate(start);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Look at up to `n` bytes without consuming them
    ///
    /// Fewer than `n` bytes are returned only when the stream ends first.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        self.fill_to(n)?;
        let end = (self.pos + n).min(self.buf.len());
        Ok(&self.buf[self.pos..end])
    }

    /// Look at exactly `n` bytes, or `None` if the stream is shorter
    pub fn peek_exact(&mut self, n: usize) -> io::Result<Option<&[u8]>> {
        let window = self.peek(n)?;
        Ok(if window.len() == n { Some(window) } else { None })
    }

    /// Consume one byte; `None` at end of stream
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.fill_to(1)?;
        match self.buf.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                self.consumed += 1;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    /// Discard up to `n` bytes, returning how many were consumed
    pub fn consume(&mut self, n: usize) -> io::Result<usize> {
        self.fill_to(n)?;
        let taken = n.min(self.buf.len() - self.pos);
        self.pos += taken;
        self.consumed += taken;
        Ok(taken)
    }

    /// Consume everything that is left
    pub fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut out = self.buf[self.pos..].to_vec();
        self.buf.clear();
        self.pos = 0;
        if !self.eof {
            self.inner.read_to_end(&mut out)?;
            self.eof = true;
        }
        self.consumed += out.len();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per read call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&byte, rest)) if !out.is_empty() => {
                    out[0] = byte;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = PeekReader::new(&b"hello world"[..]);
        assert_eq!(stream.peek(5).unwrap(), b"hello");
        assert_eq!(stream.peek(5).unwrap(), b"hello");
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.read_byte().unwrap(), Some(b'h'));
        assert_eq!(stream.peek(4).unwrap(), b"ello");
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_peek_short_stream() {
        let mut stream = PeekReader::new(&b"abc"[..]);
        assert_eq!(stream.peek(MAX_LOOKAHEAD).unwrap(), b"abc");
        assert!(stream.peek_exact(MAX_LOOKAHEAD).unwrap().is_none());
        assert_eq!(stream.peek_exact(2).unwrap(), Some(&b"ab"[..]));
    }

    #[test]
    fn test_peek_across_small_reads() {
        let mut stream = PeekReader::new(Trickle(b"<!--\n---\n"));
        assert_eq!(stream.peek(6).unwrap(), b"<!--\n-");
        assert_eq!(stream.consume(5).unwrap(), 5);
        assert_eq!(stream.read_to_end().unwrap(), b"---\n");
        assert_eq!(stream.position(), 9);
    }

    #[test]
    fn test_read_byte_until_end() {
        let mut stream = PeekReader::new(&b"ab"[..]);
        assert_eq!(stream.read_byte().unwrap(), Some(b'a'));
        assert_eq!(stream.read_byte().unwrap(), Some(b'b'));
        assert_eq!(stream.read_byte().unwrap(), None);
        assert_eq!(stream.read_byte().unwrap(), None);
        assert!(stream.read_to_end().unwrap().is_empty());
    }

    #[test]
    fn test_consume_past_end() {
        let mut stream = PeekReader::new(&b"abc"[..]);
        assert_eq!(stream.consume(10).unwrap(), 3);
        assert_eq!(stream.position(), 3);
    }

    #[test]
    fn test_large_input_is_preserved() {
        let data: Vec<u8> = (0..3 * CHUNK_SIZE + 17).map(|i| (i % 251) as u8).collect();
        let mut stream = PeekReader::new(&data[..]);
        for expected in &data[..CHUNK_SIZE + 3] {
            assert_eq!(stream.read_byte().unwrap(), Some(*expected));
        }
        assert_eq!(stream.peek(MAX_LOOKAHEAD).unwrap(), &data[CHUNK_SIZE + 3..CHUNK_SIZE + 35]);
        assert_eq!(stream.read_to_end().unwrap(), &data[CHUNK_SIZE + 3..]);
        assert_eq!(stream.position(), data.len());
    }

    #[test]
    fn test_errors_are_passed_through() {
        let mut stream = PeekReader::new(Broken);
        let err = stream.peek(1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
