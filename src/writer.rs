//! Serializes records back to FASTA or FASTQ, optionally compressed
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::ParseError;
use crate::parser::{write_fasta, write_fastq, Compression, Encoder, Format, LineEnding, Sequence};

/// Writes records one at a time.
///
/// The format is picked per record: records with a quality are written as FASTQ,
/// the others as FASTA. Call [`close`](#method.close) to get errors from the final
/// flush; a writer that is simply dropped still flushes and finishes the compressed
/// stream but any error is lost.
///
/// Records are refused if they wouldn't read back the same: whitespace in the id,
/// a line break in any field or, for FASTA, a sequence line starting with `>`.
/// Descriptions are written without leading or trailing whitespace since readers
/// trim it anyway.
///
/// # Example:
///
/// ```
/// use rsbio_seq::{Compression, Sequence, Writer};
///
/// let mut writer = Writer::new(Vec::new(), Compression::None).unwrap();
/// writer
///     .write(&Sequence::fasta("Record_1", "Desc", "ACGTACGT"), Some(4))
///     .unwrap();
/// let out = writer.close().unwrap();
/// assert_eq!(out, b">Record_1 Desc\nACGT\nACGT\n");
/// ```
pub struct Writer<W: Write> {
    inner: BufWriter<Encoder<W>>,
    compression: Compression,
    line_ending: LineEnding,
}

impl Writer<File> {
    /// Creates the file at `path`. The output is compressed if the file name ends with
    /// `.gz`/`.bgz`, `.bz2` or `.xz`.
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let compression = Compression::from_path(&path);
        let f = File::create(&path)?;
        log::debug!(
            "writing to {} with compression {:?}",
            path.as_ref().display(),
            compression
        );
        Self::new(f, compression)
    }
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W, compression: Compression) -> Result<Self, ParseError> {
        Ok(Self {
            inner: BufWriter::new(compression.encoder(writer)?),
            compression,
            line_ending: LineEnding::Unix,
        })
    }

    /// Use `\r\n` or `\n` to end lines. Defaults to `\n`.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Appends one record. `wrap_width` only applies to FASTA records; `None` or
    /// `Some(0)` writes the whole sequence on a single line.
    pub fn write(&mut self, record: &Sequence, wrap_width: Option<usize>) -> Result<(), ParseError> {
        match record.format() {
            Format::Fasta => write_fasta(record, wrap_width, &mut self.inner, self.line_ending),
            Format::Fastq => write_fastq(record, &mut self.inner, self.line_ending),
        }
    }

    /// Flushes everything, writes the compression trailer if any and returns the
    /// underlying writer.
    pub fn close(self) -> Result<W, ParseError> {
        let encoder = self.inner.into_inner().map_err(|e| e.into_error())?;
        let mut writer = encoder.finish()?;
        writer.flush()?;
        Ok(writer)
    }
}

#[cfg(test)]
mod test {
    use std::io::Read;

    use flate2::read::GzDecoder;

    use super::*;
    use crate::errors::ParseErrorKind;

    #[test]
    fn test_format_follows_record() {
        let mut writer = Writer::new(Vec::new(), Compression::None).unwrap();
        writer
            .write(&Sequence::fasta("rec_1", "desc 1", "ACGTCCGT"), None)
            .unwrap();
        writer
            .write(&Sequence::fastq("rec_2", "", "ACGT", "IIII"), Some(2))
            .unwrap();
        let out = writer.close().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">rec_1 desc 1\nACGTCCGT\n@rec_2\nACGT\n+\nIIII\n"
        );
    }

    #[test]
    fn test_windows_line_endings() {
        let mut writer = Writer::new(Vec::new(), Compression::None)
            .unwrap()
            .with_line_ending(LineEnding::Windows);
        writer.write(&Sequence::fasta("r", "", "ACG"), Some(2)).unwrap();
        assert_eq!(writer.close().unwrap(), b">r\r\nAC\r\nG\r\n");
    }

    #[test]
    fn test_gzip_output() {
        let mut writer = Writer::new(Vec::new(), Compression::Gzip).unwrap();
        assert_eq!(writer.compression(), Compression::Gzip);
        writer
            .write(&Sequence::fastq("rec_1", "desc 1", "ACGTCCGT", "IIIIIIII"), None)
            .unwrap();
        let compressed = writer.close().unwrap();

        let mut out = String::new();
        GzDecoder::new(&compressed[..])
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "@rec_1 desc 1\nACGTCCGT\n+\nIIIIIIII\n");
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let mut writer = Writer::new(Vec::new(), Compression::None).unwrap();
        let e = writer
            .write(&Sequence::fastq("rec_1", "", "ACGT", "II"), None)
            .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::LengthMismatch);
        let e = writer
            .write(&Sequence::fasta("rec 1", "", "ACGT"), None)
            .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidId);
        assert!(writer.close().unwrap().is_empty());
    }
}
