use std::io::{self, BufRead};

use memchr::memchr;

use crate::errors::ParseError;
use crate::parser::record::Sequence;

pub(crate) const BUFSIZE: usize = 64 * 1024;

/// Remove a final '\r' from a byte slice
#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// A line is blank if it only holds whitespace
#[inline]
pub(crate) fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Splits a header line (without its `>`/`@` marker) into the id and the trimmed description
pub(crate) fn split_header(header: &[u8]) -> (&[u8], &[u8]) {
    match header.iter().position(u8::is_ascii_whitespace) {
        Some(idx) => (&header[..idx], header[idx..].trim_ascii()),
        None => (header, b""),
    }
}

/// Holds line number and byte offset of our current state in a parser
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub(crate) line: u64,
    pub(crate) byte: u64,
}

impl Position {
    pub fn new(line: u64, byte: u64) -> Self {
        Self { line, byte }
    }

    /// Line number (starting with 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the (decompressed) stream
    pub fn byte(&self) -> u64 {
        self.byte
    }
}

/// FASTA or FASTQ?
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Fasta,
    Fastq,
}

impl Format {
    pub fn start_char(&self) -> char {
        match self {
            Self::Fasta => '>',
            Self::Fastq => '@',
        }
    }

    /// Picks the format from the first meaningful byte of a stream
    pub fn detect(first: u8) -> Option<Self> {
        match first {
            b'>' => Some(Self::Fasta),
            b'@' => Some(Self::Fastq),
            _ => None,
        }
    }
}

/// Whether it uses \r\n or only \n
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub enum LineEnding {
    Windows,
    #[default]
    Unix,
}

impl LineEnding {
    pub fn to_bytes(&self) -> &'static [u8] {
        match self {
            Self::Windows => b"\r\n",
            Self::Unix => b"\n",
        }
    }
}

/// Line-oriented view over a buffered stream.
/// Lines are copied straight from the read buffer into the caller's vector
/// so a record costs no allocation beyond its own fields.
pub(crate) struct LineReader<R: io::Read> {
    buf_reader: buffer_redux::BufReader<R>,
    /// Number of lines fully consumed so far
    line: u64,
    /// Number of bytes consumed so far
    byte: u64,
    line_ending: Option<LineEnding>,
}

impl<R: io::Read> LineReader<R> {
    pub(crate) fn with_capacity(reader: R, capacity: usize) -> Self {
        assert!(capacity >= 3, "buffer capacity must be at least 3, got {}", capacity);
        Self {
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, reader),
            line: 0,
            byte: 0,
            line_ending: None,
        }
    }

    /// Position of the start of the next line
    #[inline]
    pub(crate) fn next_position(&self) -> Position {
        Position::new(self.line + 1, self.byte)
    }

    #[inline]
    pub(crate) fn line_ending(&self) -> Option<LineEnding> {
        self.line_ending
    }

    /// Returns the next byte without consuming it, `None` at EOF
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.buf_reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Skips whitespace (including whole blank lines) and returns the first
    /// byte that is not whitespace, without consuming it.
    pub(crate) fn skip_whitespace(&mut self) -> io::Result<Option<u8>> {
        while let Some(b) = self.peek()? {
            if !b.is_ascii_whitespace() {
                return Ok(Some(b));
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.buf_reader.consume(1);
            self.byte += 1;
        }
        Ok(None)
    }

    /// Appends the next line to `out`, without its line terminator.
    /// Returns `false` if the stream was already exhausted.
    pub(crate) fn read_line(&mut self, out: &mut Vec<u8>) -> io::Result<bool> {
        let start = out.len();
        let mut read_any = false;
        let mut terminated = false;
        while !terminated {
            let used = {
                let available = match self.buf_reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    break;
                }
                read_any = true;
                match memchr(b'\n', available) {
                    Some(idx) => {
                        out.extend_from_slice(&available[..idx]);
                        terminated = true;
                        idx + 1
                    }
                    None => {
                        out.extend_from_slice(available);
                        available.len()
                    }
                }
            };
            self.buf_reader.consume(used);
            self.byte += used as u64;
        }

        if !read_any {
            return Ok(false);
        }
        self.line += 1;

        let trimmed_len = start + trim_cr(&out[start..]).len();
        let had_cr = trimmed_len < out.len();
        out.truncate(trimmed_len);
        if terminated && self.line_ending.is_none() {
            self.line_ending = Some(if had_cr {
                LineEnding::Windows
            } else {
                LineEnding::Unix
            });
        }
        Ok(true)
    }
}

/// The main trait, iterator-like, that the FASTA and FASTQ readers implement
pub trait FastxReader: Send {
    /// Gets the next record in the stream.
    /// This returns None once we reached the EOF or after an error was returned.
    fn next(&mut self) -> Option<Result<Sequence, ParseError>>;
    /// Returns the line/byte in the stream where the last returned record started
    fn position(&self) -> &Position;
    /// Returns whether the current stream uses Windows or Unix style line endings
    /// It is `None` until a complete line has been read.
    fn line_ending(&self) -> Option<LineEnding>;
    /// Which format this reader parses
    fn format(&self) -> Format;
}
