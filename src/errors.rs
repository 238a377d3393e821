//! The errors rsbio-seq can return when reading or writing FASTA/FASTQ files

use std::fmt;
use std::io;

use thiserror::Error;

use crate::parser::{Compression, Format};

/// Represents where we were in a file when an error occurred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Line number where the error occurred (starting with 1)
    pub line: u64,
    /// ID of record if available
    pub id: Option<String>,
}

impl ErrorPosition {
    pub(crate) fn new(line: u64, id: Option<&[u8]>) -> Self {
        Self {
            line,
            id: id.map(|id| String::from_utf8_lossy(id).into_owned()),
        }
    }
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = self.id.as_ref() {
            write!(f, "record '{id}' at ")?;
        }
        write!(f, "line {}", self.line)
    }
}

/// The type of error that occured while reading or writing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An error happened during file/stream input/output
    #[error("I/O error")]
    Io,
    /// The input didn't start with `@` or `>` (or was empty) so no format could be picked
    #[error("Unrecognized format")]
    Unrecognized,
    /// Invalid start byte of record encountered (expected `@` in FASTQ and `>` in FASTA)
    #[error("Invalid record start")]
    InvalidStart,
    /// The separator line in a FASTQ file is not valid (no `+`)
    #[error("Invalid separator")]
    InvalidSeparator,
    /// Sequence and quality lengths are not equal (in a FASTQ record only)
    #[error("Length mismatch")]
    LengthMismatch,
    /// The input ended in the middle of a record
    #[error("Truncated record")]
    Truncated,
    /// A header, sequence or quality line is not valid UTF-8
    #[error("Invalid UTF-8")]
    InvalidUtf8,
    /// A record id contains whitespace and can't be written back as a header
    #[error("Invalid id")]
    InvalidId,
    /// A record would not read back the same once written (line break in a field,
    /// FASTA sequence line starting with `>`)
    #[error("Invalid record")]
    InvalidRecord,
    /// The container was recognized but its codec was not compiled in
    #[error("Unsupported compression")]
    UnsupportedCompression,
}

/// The only error type that rsbio-seq returns for parsing and writing
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {msg} ({position})")]
pub struct ParseError {
    /// A description of what went wrong
    pub msg: String,
    /// The type of error that occurred
    pub kind: ParseErrorKind,
    /// Position within file
    pub position: ErrorPosition,
    /// The format of the file we were parsing
    pub format: Option<Format>,
}

impl ParseError {
    pub fn new_invalid_start(byte_found: u8, position: ErrorPosition, format: Format) -> Self {
        let msg = format!(
            "Expected '{}' but found '{}'",
            format.start_char(),
            (byte_found as char).escape_default()
        );
        Self {
            kind: ParseErrorKind::InvalidStart,
            msg,
            position,
            format: Some(format),
        }
    }

    pub fn new_invalid_separator(byte_found: Option<u8>, position: ErrorPosition) -> Self {
        let found = match byte_found {
            Some(b) => (b as char).escape_default().to_string(),
            None => String::from("an empty line"),
        };
        Self {
            kind: ParseErrorKind::InvalidSeparator,
            msg: format!("Expected '+' separator but found '{}'", found),
            position,
            format: Some(Format::Fastq),
        }
    }

    pub fn new_unrecognized(byte_found: u8) -> Self {
        let msg = format!(
            "Expected '@' or '>' at the start of the input but found '{}'",
            (byte_found as char).escape_default()
        );
        Self {
            kind: ParseErrorKind::Unrecognized,
            msg,
            position: ErrorPosition::default(),
            format: None,
        }
    }

    pub fn new_empty_input() -> Self {
        Self {
            kind: ParseErrorKind::Unrecognized,
            msg: String::from("No records found, the input is empty"),
            position: ErrorPosition::default(),
            format: None,
        }
    }

    pub fn new_length_mismatch(seq_len: usize, qual_len: usize, position: ErrorPosition) -> Self {
        let msg = format!(
            "Sequence length is {} but quality length is {}",
            seq_len, qual_len
        );
        Self {
            kind: ParseErrorKind::LengthMismatch,
            msg,
            position,
            format: Some(Format::Fastq),
        }
    }

    pub fn new_truncated(missing: &str, position: ErrorPosition, format: Format) -> Self {
        Self {
            kind: ParseErrorKind::Truncated,
            msg: format!("Input ended before the {} line", missing),
            position,
            format: Some(format),
        }
    }

    pub fn new_invalid_utf8(field: &str, position: ErrorPosition, format: Format) -> Self {
        Self {
            kind: ParseErrorKind::InvalidUtf8,
            msg: format!("The {} is not valid UTF-8", field),
            position,
            format: Some(format),
        }
    }

    pub fn new_invalid_id(id: &str, format: Format) -> Self {
        Self {
            kind: ParseErrorKind::InvalidId,
            msg: format!("Id '{}' contains whitespace", id.escape_default()),
            position: ErrorPosition::default(),
            format: Some(format),
        }
    }

    pub fn new_invalid_record(reason: &str, id: &str, format: Format) -> Self {
        Self {
            kind: ParseErrorKind::InvalidRecord,
            msg: format!("Can't write record: {}", reason),
            position: ErrorPosition::new(0, Some(id.as_bytes())),
            format: Some(format),
        }
    }

    pub fn new_unsupported_compression(compression: Compression) -> Self {
        Self {
            kind: ParseErrorKind::UnsupportedCompression,
            msg: format!(
                "{:?} support requires the `compression` feature",
                compression
            ),
            position: ErrorPosition::default(),
            format: None,
        }
    }

    pub(crate) fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self {
            msg: err.to_string(),
            kind: ParseErrorKind::Io,
            position: ErrorPosition::default(),
            format: None,
        }
    }
}
