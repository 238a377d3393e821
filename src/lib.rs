//! Fast reading and writing of FASTA/FASTQ files, compressed or not, plus the
//! Phred quality codec.
//!
//! ```
//! use rsbio_seq::{parse_fastx_reader, Compression, Sequence, Writer};
//!
//! let mut writer = Writer::new(Vec::new(), Compression::Gzip).unwrap();
//! writer.write(&Sequence::fastq("Read_1", "", "ACGT", "IIII"), None).unwrap();
//! let gz = writer.close().unwrap();
//!
//! let mut reader = parse_fastx_reader(std::io::Cursor::new(gz)).unwrap();
//! let record = reader.next().unwrap().unwrap();
//! assert_eq!(record.qual(), Some("IIII"));
//! assert!(reader.next().is_none());
//! ```
#![crate_name = "rsbio_seq"]
pub mod errors;
pub mod parser;
pub mod quality;
pub mod writer;

pub use errors::{ParseError, ParseErrorKind};
pub use parser::{
    parse_fastx_file, parse_fastx_reader, parse_fastx_stdin, Compression, FastxReader, Format,
    LineEnding, Reader, Sequence,
};
pub use quality::{ascii_to_phred, phred_to_ascii, QualityError};
pub use writer::Writer;
