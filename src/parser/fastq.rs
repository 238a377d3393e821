use std::fs::File;
use std::io;
use std::path::Path;

use crate::errors::{ErrorPosition, ParseError};
use crate::parser::record::Sequence;
use crate::parser::utils::{
    is_blank, split_header, FastxReader, Format, LineEnding, LineReader, Position, BUFSIZE,
};

/// Which line of the four-line cycle we are reading
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
enum SearchPosition {
    Id,
    Sequence,
    Separator,
    Quality,
}

impl SearchPosition {
    fn name(&self) -> &'static str {
        match self {
            Self::Id => "header",
            Self::Sequence => "sequence",
            Self::Separator => "separator",
            Self::Quality => "quality",
        }
    }
}

/// Parser for FASTQ files.
/// Only use this directly if you know your file is FASTQ and that it is not compressed as
/// it does not handle decompression.
/// If you are unsure, it's better to use [`parse_fastx_file`](fn.parse_fastx_file.html).
///
/// Records are exactly four lines; sequence and quality can't be wrapped.
pub struct Reader<R: io::Read> {
    lines: LineReader<R>,
    header: Vec<u8>,
    separator: Vec<u8>,
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
    /// use rsbio_seq::parser::{FastqReader, FastxReader};
    /// let fastq = b"@id\nACGT\n+\nIIII";
    ///
    /// let mut reader = FastqReader::new(&fastq[..]);
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.id(), "id");
    /// assert_eq!(record.qual(), Some("IIII"));
    /// ```
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new reader with a given buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is smaller than 3.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_lines(LineReader::with_capacity(reader, capacity))
    }

    pub(crate) fn from_lines(lines: LineReader<R>) -> Self {
        Self {
            lines,
            header: Vec::with_capacity(256),
            separator: Vec::with_capacity(256),
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
    /// use rsbio_seq::parser::{FastxReader, FastqReader};
    ///
    /// let mut reader = FastqReader::from_path("seqs.fastq").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }
}

impl<R> Reader<R>
where
    R: io::Read,
{
    fn get_error_pos(&self, search_pos: SearchPosition, parse_id: bool) -> ErrorPosition {
        let id = if parse_id && self.header.len() > 1 {
            Some(split_header(&self.header[1..]).0)
        } else {
            None
        };
        ErrorPosition::new(self.position.line() + search_pos as u64, id)
    }

    /// Reads one of the lines following the header, failing if the input ends first
    fn read_required(
        &mut self,
        search_pos: SearchPosition,
        out: &mut Vec<u8>,
    ) -> Result<(), ParseError> {
        if self.lines.read_line(out)? {
            Ok(())
        } else {
            Err(ParseError::new_truncated(
                search_pos.name(),
                self.get_error_pos(search_pos, true),
                Format::Fastq,
            ))
        }
    }

    /// Reads the header line of the next record, skipping blank lines.
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
            self.position = position;
            if self.header[0] != b'@' {
                return Err(ParseError::new_invalid_start(
                    self.header[0],
                    self.get_error_pos(SearchPosition::Id, false),
                    Format::Fastq,
                ));
            }
            return Ok(true);
        }
    }

    /// Verify that the record is valid:
    /// - separator line starts with +
    /// - quality and sequence have the same length
    fn validate(&self, seq: &[u8], qual: &[u8]) -> Result<(), ParseError> {
        if self.separator.first() != Some(&b'+') {
            return Err(ParseError::new_invalid_separator(
                self.separator.first().copied(),
                self.get_error_pos(SearchPosition::Separator, true),
            ));
        }

        if seq.len() != qual.len() {
            return Err(ParseError::new_length_mismatch(
                seq.len(),
                qual.len(),
                self.get_error_pos(SearchPosition::Quality, true),
            ));
        }
        Ok(())
    }

    fn read_record(&mut self) -> Result<Option<Sequence>, ParseError> {
        if !self.find_header()? {
            log::trace!("end of FASTQ input at {:?}", self.lines.next_position());
            return Ok(None);
        }

        let mut seq = Vec::new();
        self.read_required(SearchPosition::Sequence, &mut seq)?;
        let mut separator = std::mem::take(&mut self.separator);
        separator.clear();
        let read = self.read_required(SearchPosition::Separator, &mut separator);
        self.separator = separator;
        read?;
        let mut qual = Vec::with_capacity(seq.len());
        self.read_required(SearchPosition::Quality, &mut qual)?;

        self.validate(&seq, &qual)?;

        let (id, desc) = split_header(&self.header[1..]);
        let to_string = |bytes: Vec<u8>, field: &str, with_id: bool| {
            String::from_utf8(bytes).map_err(|_| {
                ParseError::new_invalid_utf8(
                    field,
                    ErrorPosition::new(self.position.line(), if with_id { Some(id) } else { None }),
                    Format::Fastq,
                )
            })
        };
        Ok(Some(Sequence::new(
            to_string(id.to_vec(), "id", false)?,
            to_string(desc.to_vec(), "description", true)?,
            to_string(seq, "sequence", true)?,
            Some(to_string(qual, "quality", true)?),
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
                Some(Err(e.with_format(Format::Fastq)))
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
        Format::Fastq
    }
}
