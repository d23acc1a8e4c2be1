//! Logical-line cursor over a byte stream.
//!
//! OVF files interleave a line-oriented comment shell with raw binary data
//! blocks. The cursor reads logical lines while keeping a one-byte
//! lookahead, so the binary codecs can take over mid-stream without losing
//! the byte that terminator detection already pulled.

use ovf_core::error::ParseError;
use std::io::{ErrorKind, Read};

/// Incremental line reader with binary pass-through.
///
/// Recognizes LF, CR, CR+LF, and LF+CR record separators. Files are
/// sometimes produced on one OS and consumed on another, so all four show
/// up in practice.
pub struct LineCursor<R> {
    inner: R,
    lookahead: Option<u8>,
    line: String,
    eof: bool,
}

impl<R: Read> LineCursor<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            line: String::new(),
            eof: false,
        }
    }

    /// Most recently accepted line, record separator stripped.
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Advance to the next non-empty logical line, treating a bare `#` as
    /// blank. Fails with `UnexpectedEof` once the stream is exhausted.
    pub fn accept_line(&mut self) -> Result<(), ParseError> {
        if self.try_accept_line()? {
            Ok(())
        } else {
            Err(ParseError::UnexpectedEof)
        }
    }

    /// Like [`Self::accept_line`], but reports exhaustion as `Ok(false)`
    /// for callers that treat it as a missing trailing marker.
    pub fn try_accept_line(&mut self) -> Result<bool, ParseError> {
        loop {
            match self.read_raw_line()? {
                None => {
                    self.line.clear();
                    return Ok(false);
                }
                Some(line) => {
                    // Some writers emit stray comment-continuation markers;
                    // a line of exactly "#" is blank, not a terminator.
                    if line.is_empty() || line == "#" {
                        continue;
                    }
                    self.line = line;
                    return Ok(true);
                }
            }
        }
    }

    /// True once the underlying stream and the lookahead are both drained.
    pub fn at_eof(&self) -> bool {
        self.eof && self.lookahead.is_none()
    }

    /// Fill `buf` from the raw stream, draining the lookahead byte first.
    /// Returns the number of bytes actually read, which is less than
    /// `buf.len()` only at end of stream.
    pub fn read_full(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut filled = 0;
        if let Some(byte) = self.lookahead.take() {
            buf[0] = byte;
            filled = 1;
        }
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn next_byte(&mut self) -> std::io::Result<Option<u8>> {
        if let Some(byte) = self.lookahead.take() {
            return Ok(Some(byte));
        }
        if self.eof {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// One raw line. A CR or LF ends the line; if the very next byte is
    /// the opposite separator it belongs to the same terminator, otherwise
    /// it goes into the lookahead slot.
    fn read_raw_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            let byte = match self.next_byte()? {
                Some(byte) => byte,
                None => {
                    if buf.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
            };
            match byte {
                b'\n' | b'\r' => {
                    let paired = if byte == b'\n' { b'\r' } else { b'\n' };
                    if let Some(next) = self.next_byte()? {
                        if next != paired {
                            self.lookahead = Some(next);
                        }
                    }
                    break;
                }
                _ => buf.push(byte),
            }
        }
        // Lossy: stray bytes after binary blocks can produce non-UTF-8
        // fragments, which must be skippable rather than fatal.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[u8]) -> Vec<String> {
        let mut cursor = LineCursor::new(input);
        let mut out = Vec::new();
        while cursor.try_accept_line().unwrap() {
            out.push(cursor.current_line().to_string());
        }
        out
    }

    #[test]
    fn test_lf_terminators() {
        assert_eq!(lines(b"a\nb\nc"), ["a", "b", "c"]);
    }

    #[test]
    fn test_cr_terminators() {
        assert_eq!(lines(b"a\rb\rc\r"), ["a", "b", "c"]);
    }

    #[test]
    fn test_crlf_terminators() {
        assert_eq!(lines(b"a\r\nb\r\n"), ["a", "b"]);
    }

    #[test]
    fn test_lfcr_terminators() {
        assert_eq!(lines(b"a\n\rb\n\r"), ["a", "b"]);
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(lines(b"a\nb\r\nc\rd\n\re"), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_blank_and_bare_hash_skipped() {
        assert_eq!(lines(b"a\n\n#\n\n# b\n"), ["a", "# b"]);
    }

    #[test]
    fn test_eof_error_after_exhaustion() {
        let mut cursor = LineCursor::new(&b"only\n"[..]);
        cursor.accept_line().unwrap();
        assert_eq!(cursor.current_line(), "only");
        assert!(matches!(
            cursor.accept_line(),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_lookahead_flows_into_read_full() {
        // "x\nBQ": the cursor peeks 'B' while checking for an LF+CR pair;
        // read_full must hand it back before the rest of the stream.
        let mut cursor = LineCursor::new(&b"x\nBQ"[..]);
        cursor.accept_line().unwrap();
        let mut buf = [0u8; 2];
        assert_eq!(cursor.read_full(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"BQ");
    }

    #[test]
    fn test_read_full_short_at_eof() {
        let mut cursor = LineCursor::new(&b"ab"[..]);
        let mut buf = [0u8; 4];
        assert_eq!(cursor.read_full(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn test_crlf_does_not_leak_lookahead() {
        let mut cursor = LineCursor::new(&b"x\r\nDATA"[..]);
        cursor.accept_line().unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(cursor.read_full(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"DATA");
    }

    #[test]
    fn test_non_utf8_line_is_lossy_not_fatal() {
        let mut cursor = LineCursor::new(&b"\xFF\xFE\n# ok\n"[..]);
        assert!(cursor.try_accept_line().unwrap());
        assert!(cursor.try_accept_line().unwrap());
        assert_eq!(cursor.current_line(), "# ok");
    }
}
