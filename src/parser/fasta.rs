use std::fs::File;
use std::io;
use std::path::Path;

use crate::errors::{ErrorPosition, ParseError};
use crate::parser::record::Sequence;
use crate::parser::utils::{
    is_blank, split_header, FastxReader, Format, LineEnding, LineReader, Position, BUFSIZE,
};

/// Parser for FASTA files.
/// Only use this directly if you know your file is FASTA and that it is not compressed as
/// it does not handle decompression.
/// If you are unsure, it's better to use [`parse_fastx_file`](fn.parse_fastx_file.html).
///
/// Lines are joined into the sequence until the next `>` line. Blank lines inside
/// a record are skipped and don't end it.
pub struct Reader<R: io::Read> {
    lines: LineReader<R>,
    header: Vec<u8>,
    position: Position,
    finished: bool,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use rsbio_seq::parser::{FastaReader, FastxReader};
    /// let fasta = b">id desc\nSEQU\nENCE";
    ///
    /// let mut reader = FastaReader::new(&fasta[..]);
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.id(), "id");
    /// assert_eq!(record.seq(), "SEQUENCE");
    /// ```
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new reader with a given buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is smaller than 3.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_lines(LineReader::with_capacity(reader, capacity))
    }

    pub(crate) fn from_lines(lines: LineReader<R>) -> Self {
        Self {
            lines,
            header: Vec::with_capacity(256),
            position: Position::new(0, 0),
            finished: false,
        }
    }
}

impl Reader<File> {
    /// Creates a reader from a file path.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use rsbio_seq::parser::{FastaReader, FastxReader};
    ///
    /// let mut reader = FastaReader::from_path("seqs.fasta").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Reads the header line of the next record into `self.header`.
    /// Returns false at the end of input.
    fn find_header(&mut self) -> Result<bool, ParseError> {
        loop {
            let position = self.lines.next_position();
            self.header.clear();
            if !self.lines.read_line(&mut self.header)? {
                return Ok(false);
            }
            if is_blank(&self.header) {
                continue;
            }
            if self.header[0] != b'>' {
                return Err(ParseError::new_invalid_start(
                    self.header[0],
                    ErrorPosition::new(position.line, None),
                    Format::Fasta,
                ));
            }
            self.position = position;
            return Ok(true);
        }
    }

    /// Joins sequence lines until the next header or the end of input
    fn read_body(&mut self) -> Result<Vec<u8>, ParseError> {
        let mut seq = Vec::new();
        while let Some(first) = self.lines.peek()? {
            if first == b'>' {
                break;
            }
            let line_start = seq.len();
            self.lines.read_line(&mut seq)?;
            if is_blank(&seq[line_start..]) {
                seq.truncate(line_start);
            }
        }
        Ok(seq)
    }

    fn read_record(&mut self) -> Result<Option<Sequence>, ParseError> {
        if !self.find_header()? {
            log::trace!("end of FASTA input at {:?}", self.lines.next_position());
            return Ok(None);
        }
        let seq = self.read_body()?;

        let (id, desc) = split_header(&self.header[1..]);
        let error_pos = |with_id: bool| {
            ErrorPosition::new(self.position.line, if with_id { Some(id) } else { None })
        };
        let to_string = |bytes: Vec<u8>, field: &str, with_id: bool| {
            String::from_utf8(bytes)
                .map_err(|_| ParseError::new_invalid_utf8(field, error_pos(with_id), Format::Fasta))
        };
        Ok(Some(Sequence::new(
            to_string(id.to_vec(), "id", false)?,
            to_string(desc.to_vec(), "description", true)?,
            to_string(seq, "sequence", true)?,
            None,
        )))
    }
}

impl<R: io::Read + Send> FastxReader for Reader<R> {
    fn next(&mut self) -> Option<Result<Sequence, ParseError>> {
        // No more records to read
        if self.finished {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.with_format(Format::Fasta)))
            }
        }
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn line_ending(&self) -> Option<LineEnding> {
        self.lines.line_ending()
    }

    fn format(&self) -> Format {
        Format::Fasta
    }
}
