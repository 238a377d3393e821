//! Handles all the FASTA/FASTQ parsing
//!
//! Reading goes through two independent decisions: the container is picked from the
//! first two bytes of the raw stream ([`Compression::detect`]), then the record format
//! from the first non-blank byte of the decoded stream ([`Format::detect`]).
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use crate::errors::ParseError;
pub use crate::parser::fasta::Reader as FastaReader;
pub use crate::parser::fastq::Reader as FastqReader;

mod compression;
mod record;
mod utils;

mod fasta;
mod fastq;

pub(crate) use crate::parser::compression::Encoder;
pub use crate::parser::compression::Compression;
pub use crate::parser::utils::FastxReader;
use crate::parser::utils::{LineReader, BUFSIZE};

/// Reads up to `buf.len()` bytes, stopping early only at EOF
fn read_magic<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over the records of a FASTA or FASTQ stream, compressed or not.
///
/// The reader owns its input: dropping it, whether iteration finished or not,
/// closes the underlying file. It can only be read once.
pub struct Reader {
    parser: Box<dyn FastxReader>,
    compression: Compression,
}

impl Reader {
    /// Opens the file at `path` and figures out its compression and format.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let f = File::open(&path)?;
        log::debug!("opened {} for reading", path.as_ref().display());
        Self::new(f)
    }

    /// Wraps any stream; compression and format are detected from its content.
    pub fn new<R: Read + Send + 'static>(mut reader: R) -> Result<Self, ParseError> {
        let mut first = [0; 2];
        let n = read_magic(&mut reader, &mut first)?;
        let compression = Compression::detect(&first[..n]);
        log::debug!("detected compression: {:?}", compression);

        // Put the magic bytes back in front of the stream
        let stream = Cursor::new(first[..n].to_vec()).chain(reader);
        let decoded = compression.decoder(stream)?;

        let mut lines = LineReader::with_capacity(decoded, BUFSIZE);
        let parser: Box<dyn FastxReader> = match lines.skip_whitespace()? {
            None => return Err(ParseError::new_empty_input()),
            Some(b) => match Format::detect(b) {
                Some(Format::Fasta) => Box::new(FastaReader::from_lines(lines)),
                Some(Format::Fastq) => Box::new(FastqReader::from_lines(lines)),
                None => return Err(ParseError::new_unrecognized(b)),
            },
        };
        log::debug!("detected format: {:?}", parser.format());

        Ok(Self {
            parser,
            compression,
        })
    }

    /// The container the input was found to be in
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Whether records are FASTA or FASTQ
    pub fn format(&self) -> Format {
        self.parser.format()
    }

    /// Line/byte in the decompressed stream where the last returned record started
    pub fn position(&self) -> &Position {
        self.parser.position()
    }

    /// Line ending style, known once a full line was read
    pub fn line_ending(&self) -> Option<LineEnding> {
        self.parser.line_ending()
    }
}

impl Iterator for Reader {
    type Item = Result<Sequence, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next()
    }
}

/// The main entry point of rsbio-seq.
/// Parses the file given a path and return an iterator-like reader struct.
/// This automatically detects whether the file is:
/// 1. compressed: gzip, bz and xz are supported and will use the appropriate decoder
/// 2. FASTA or FASTQ: the right parser will be automatically instantiated
///
/// bz and xz are only available if the `compression` feature is enabled.
///
/// ```no_run
/// use rsbio_seq::parse_fastx_file;
///
/// let reader = parse_fastx_file("reads.fq.gz").expect("valid path/file");
/// for record in reader {
///     let record = record.expect("invalid record");
///     println!("{}\t{}", record.id(), record.len());
/// }
/// ```
pub fn parse_fastx_file<P: AsRef<Path>>(path: P) -> Result<Reader, ParseError> {
    Reader::from_path(path)
}

/// Same as [`parse_fastx_file`](fn.parse_fastx_file.html) but for any stream
pub fn parse_fastx_reader<R: Read + Send + 'static>(reader: R) -> Result<Reader, ParseError> {
    Reader::new(reader)
}

/// Same as [`parse_fastx_file`](fn.parse_fastx_file.html) but reads from stdin
pub fn parse_fastx_stdin() -> Result<Reader, ParseError> {
    Reader::new(io::stdin())
}

pub use record::{write_fasta, write_fastq, Sequence};
pub use utils::{Format, LineEnding, Position};
