use std::io::Write;

use crate::errors::{ErrorPosition, ParseError};
use crate::parser::utils::{Format, LineEnding};
use crate::quality::{ascii_to_phred, QualityError};

/// A FASTA or FASTQ record.
///
/// Records are plain owned values: the readers hand each one over to the caller
/// and keep nothing pointing into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    id: String,
    description: String,
    seq: String,
    qual: Option<String>,
}

impl Sequence {
    /// Builds a record. A record with `qual` is a FASTQ record, one without is a FASTA record.
    ///
    /// # Example:
    ///
    /// ```
    /// use rsbio_seq::{Format, Sequence};
    ///
    /// let rec = Sequence::new("Read_1", "lane 1", "ACGT", Some("IIII".to_string()));
    /// assert_eq!(rec.format(), Format::Fastq);
    /// assert_eq!(rec.qual(), Some("IIII"));
    /// ```
    pub fn new<I, D, S>(id: I, description: D, seq: S, qual: Option<String>) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            description: description.into(),
            seq: seq.into(),
            qual,
        }
    }

    /// Builds a record without quality
    pub fn fasta<I, D, S>(id: I, description: D, seq: S) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        Self::new(id, description, seq, None)
    }

    /// Builds a record with a Phred+33 encoded quality string
    pub fn fastq<I, D, S, Q>(id: I, description: D, seq: S, qual: Q) -> Self
    where
        I: Into<String>,
        D: Into<String>,
        S: Into<String>,
        Q: Into<String>,
    {
        Self::new(id, description, seq, Some(qual.into()))
    }

    /// First whitespace-delimited token of the header
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Remainder of the header after the id, may be empty
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The sequence, without any line endings
    #[inline]
    pub fn seq(&self) -> &str {
        &self.seq
    }

    /// Returns the quality line if there is one.
    /// Always `None` for FASTA and `Some` for FASTQ, even if the quality line is empty.
    #[inline]
    pub fn qual(&self) -> Option<&str> {
        self.qual.as_deref()
    }

    /// Returns the format of the record
    #[inline]
    pub fn format(&self) -> Format {
        if self.qual.is_some() {
            Format::Fastq
        } else {
            Format::Fasta
        }
    }

    /// Number of bases in the sequence
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// The header line as written, without its leading `>` or `@`
    pub fn header(&self) -> String {
        if self.description.is_empty() {
            self.id.clone()
        } else {
            format!("{} {}", self.id, self.description)
        }
    }

    /// Decodes the Phred+33 quality string into scores
    pub fn quality_scores(&self) -> Option<Result<Vec<i32>, QualityError>> {
        self.qual.as_deref().map(ascii_to_phred)
    }

    /// Checks the invariants a record must hold to be written out as `format`
    fn validate(&self, format: Format) -> Result<(), ParseError> {
        if self.id.chars().any(char::is_whitespace) {
            return Err(ParseError::new_invalid_id(&self.id, format));
        }
        let has_line_break = |s: &str| s.contains(['\n', '\r']);
        if has_line_break(self.description.as_str()) {
            return Err(ParseError::new_invalid_record(
                "line break in description",
                &self.id,
                format,
            ));
        }
        if has_line_break(self.seq.as_str()) {
            return Err(ParseError::new_invalid_record(
                "line break in sequence",
                &self.id,
                format,
            ));
        }
        if format == Format::Fastq {
            let qual = self.qual.as_deref().unwrap_or_default();
            if has_line_break(qual) {
                return Err(ParseError::new_invalid_record(
                    "line break in quality",
                    &self.id,
                    format,
                ));
            }
            if self.qual.is_none() || qual.len() != self.seq.len() {
                return Err(ParseError::new_length_mismatch(
                    self.seq.len(),
                    qual.len(),
                    ErrorPosition::new(0, Some(self.id.as_bytes())),
                ));
            }
        }
        Ok(())
    }
}

/// The description is written trimmed, the way it is read back
fn write_header(
    marker: &[u8],
    record: &Sequence,
    writer: &mut dyn Write,
    ending: &[u8],
) -> Result<(), ParseError> {
    writer.write_all(marker)?;
    writer.write_all(record.id.as_bytes())?;
    let description = record
        .description
        .trim_matches(|c: char| c.is_ascii_whitespace());
    if !description.is_empty() {
        writer.write_all(b" ")?;
        writer.write_all(description.as_bytes())?;
    }
    writer.write_all(ending)?;
    Ok(())
}

/// Splits `seq` in lines of at most `width` characters
fn wrap(seq: &str, width: Option<usize>) -> Vec<&str> {
    let width = match width {
        Some(w) if w > 0 && seq.len() > w => w,
        _ => return vec![seq],
    };
    if seq.is_ascii() {
        // chunks of an ASCII string always end on a char boundary
        return (0..seq.len())
            .step_by(width)
            .map(|start| &seq[start..(start + width).min(seq.len())])
            .collect();
    }
    let mut lines = Vec::with_capacity(seq.len() / width + 1);
    let mut start = 0;
    for (count, (idx, _)) in seq.char_indices().enumerate() {
        if count > 0 && count % width == 0 {
            lines.push(&seq[start..idx]);
            start = idx;
        }
    }
    lines.push(&seq[start..]);
    lines
}

/// Write a FASTA record. The sequence is split in lines of `wrap_width` characters
/// unless it is `None` or `Some(0)`. The quality, if any, is not written.
///
/// Nothing is written if the record can't be read back as is: whitespace in the id,
/// a line break in any field or a sequence line that would start with `>`.
pub fn write_fasta(
    record: &Sequence,
    wrap_width: Option<usize>,
    writer: &mut dyn Write,
    line_ending: LineEnding,
) -> Result<(), ParseError> {
    record.validate(Format::Fasta)?;
    let lines = wrap(&record.seq, wrap_width);
    if lines.iter().any(|l| l.starts_with('>')) {
        return Err(ParseError::new_invalid_record(
            "sequence line starting with '>'",
            &record.id,
            Format::Fasta,
        ));
    }

    let ending = line_ending.to_bytes();
    write_header(b">", record, writer, ending)?;
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(ending)?;
    }
    Ok(())
}

/// Write a FASTQ record. Fails if the record has no quality, if it
/// doesn't have the same length as the sequence or if a field holds a line break.
pub fn write_fastq(
    record: &Sequence,
    writer: &mut dyn Write,
    line_ending: LineEnding,
) -> Result<(), ParseError> {
    record.validate(Format::Fastq)?;
    let qual = record.qual.as_deref().unwrap_or_default();
    let ending = line_ending.to_bytes();
    write_header(b"@", record, writer, ending)?;
    writer.write_all(record.seq.as_bytes())?;
    writer.write_all(ending)?;
    writer.write_all(b"+")?;
    writer.write_all(ending)?;
    writer.write_all(qual.as_bytes())?;
    writer.write_all(ending)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::ParseErrorKind;

    fn fasta_to_string(record: &Sequence, wrap: Option<usize>) -> String {
        let mut out = Vec::new();
        write_fasta(record, wrap, &mut out, LineEnding::Unix).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_accessors() {
        let rec = Sequence::fastq("Read_1", "d", "ACGT", "II#I");
        assert_eq!(rec.id(), "Read_1");
        assert_eq!(rec.description(), "d");
        assert_eq!(rec.seq(), "ACGT");
        assert_eq!(rec.format(), Format::Fastq);
        assert_eq!(rec.len(), 4);
        assert_eq!(rec.header(), "Read_1 d");
        assert_eq!(rec.quality_scores(), Some(Ok(vec![40, 40, 2, 40])));

        let rec = Sequence::fasta("Record_1", "", "");
        assert_eq!(rec.format(), Format::Fasta);
        assert!(rec.is_empty());
        assert_eq!(rec.header(), "Record_1");
        assert_eq!(rec.quality_scores(), None);
    }

    #[test]
    fn test_write_fasta_unwrapped() {
        let rec = Sequence::fasta("rec_1", "desc 1", "ACGTCCGT");
        assert_eq!(fasta_to_string(&rec, None), ">rec_1 desc 1\nACGTCCGT\n");
        assert_eq!(fasta_to_string(&rec, Some(0)), ">rec_1 desc 1\nACGTCCGT\n");
        assert_eq!(fasta_to_string(&rec, Some(8)), ">rec_1 desc 1\nACGTCCGT\n");
    }

    #[test]
    fn test_write_fasta_wrapped() {
        let rec = Sequence::fasta("rec_1", "", "ACGTCCGTA");
        assert_eq!(fasta_to_string(&rec, Some(4)), ">rec_1\nACGT\nCCGT\nA\n");
        assert_eq!(fasta_to_string(&rec, Some(3)), ">rec_1\nACG\nTCC\nGTA\n");
    }

    #[test]
    fn test_write_fasta_wraps_characters_not_bytes() {
        let rec = Sequence::fasta("r", "", "ÅÅÅÅÅ");
        assert_eq!(fasta_to_string(&rec, Some(2)), ">r\nÅÅ\nÅÅ\nÅ\n");
    }

    #[test]
    fn test_write_fasta_empty_seq() {
        let rec = Sequence::fasta("empty", "", "");
        assert_eq!(fasta_to_string(&rec, Some(60)), ">empty\n\n");
    }

    #[test]
    fn test_write_fastq_windows() {
        let rec = Sequence::fastq("rec_1", "desc 1", "ACGT", "IIII");
        let mut out = Vec::new();
        write_fastq(&rec, &mut out, LineEnding::Windows).unwrap();
        assert_eq!(out, b"@rec_1 desc 1\r\nACGT\r\n+\r\nIIII\r\n");
    }

    #[test]
    fn test_write_fastq_rejects_bad_records() {
        let mut out = Vec::new();
        let e = write_fastq(
            &Sequence::fastq("rec_1", "", "ACGT", "III"),
            &mut out,
            LineEnding::Unix,
        )
        .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::LengthMismatch);

        let e = write_fastq(
            &Sequence::fastq("rec 1", "", "ACGT", "IIII"),
            &mut out,
            LineEnding::Unix,
        )
        .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidId);

        let e = write_fastq(&Sequence::fasta("rec_1", "", "ACGT"), &mut out, LineEnding::Unix)
            .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::LengthMismatch);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_rejects_line_breaks() {
        let records = [
            Sequence::fasta("a", "x\n>b", "ACGT"),
            Sequence::fasta("a", "x\r", "ACGT"),
            Sequence::fasta("a", "", "AC\nGT"),
        ];
        for rec in &records {
            let mut out = Vec::new();
            let e = write_fasta(rec, None, &mut out, LineEnding::Unix).unwrap_err();
            assert_eq!(e.kind, ParseErrorKind::InvalidRecord);
            assert!(out.is_empty());
        }

        let mut out = Vec::new();
        let e = write_fastq(
            &Sequence::fastq("a", "", "AC\nG", "II\nI"),
            &mut out,
            LineEnding::Unix,
        )
        .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidRecord);
        let e = write_fastq(
            &Sequence::fastq("a", "", "ACGT", "II\rI"),
            &mut out,
            LineEnding::Unix,
        )
        .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidRecord);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_fasta_rejects_line_starting_with_marker() {
        let rec = Sequence::fasta("a", "", "AC>GT");
        let mut out = Vec::new();
        let e = write_fasta(&rec, Some(2), &mut out, LineEnding::Unix).unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidRecord);
        assert_eq!(e.position.id.as_deref(), Some("a"));
        assert!(out.is_empty());

        // fine as long as '>' doesn't open a line
        assert_eq!(fasta_to_string(&rec, Some(3)), ">a\nAC>\nGT\n");
        assert_eq!(fasta_to_string(&rec, None), ">a\nAC>GT\n");

        let e = write_fasta(&Sequence::fasta("a", "", ">ACGT"), None, &mut out, LineEnding::Unix)
            .unwrap_err();
        assert_eq!(e.kind, ParseErrorKind::InvalidRecord);
    }

    #[test]
    fn test_write_trims_description() {
        let rec = Sequence::fasta("a", " d ", "ACGT");
        assert_eq!(fasta_to_string(&rec, None), ">a d\nACGT\n");
        let rec = Sequence::fasta("a", "  ", "ACGT");
        assert_eq!(fasta_to_string(&rec, None), ">a\nACGT\n");
    }

    #[test]
    fn test_fastq_record_written_as_fasta_skips_quality_checks() {
        let rec = Sequence::fastq("a", "", "ACGT", "II");
        assert_eq!(fasta_to_string(&rec, None), ">a\nACGT\n");
    }
}
