//! Container detection and the matching decoders/encoders
use std::io::{self, Read, Write};
use std::path::Path;

#[cfg(feature = "compression")]
use bzip2::read::BzDecoder;
#[cfg(feature = "compression")]
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
#[cfg(feature = "compression")]
use xz2::read::XzDecoder;
#[cfg(feature = "compression")]
use xz2::write::XzEncoder;

use crate::errors::ParseError;

// Magic bytes for each compression format
const GZ_MAGIC: [u8; 2] = [0x1F, 0x8B];
const BZ_MAGIC: [u8; 2] = [0x42, 0x5A];
const XZ_MAGIC: [u8; 2] = [0xFD, 0x37];

/// How a stream of records is packed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
    Xz,
}

impl Compression {
    /// Looks at the first two bytes of a stream. Anything that isn't a known
    /// magic number is considered uncompressed.
    pub fn detect(first: &[u8]) -> Self {
        match first {
            [a, b, ..] if [*a, *b] == GZ_MAGIC => Self::Gzip,
            [a, b, ..] if [*a, *b] == BZ_MAGIC => Self::Bzip2,
            [a, b, ..] if [*a, *b] == XZ_MAGIC => Self::Xz,
            _ => Self::None,
        }
    }

    /// Picks the compression from the extension of an output path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") | Some("bgz") => Self::Gzip,
            Some("bz2") => Self::Bzip2,
            Some("xz") => Self::Xz,
            _ => Self::None,
        }
    }

    /// Wraps `reader` in the decoder for this container
    pub(crate) fn decoder<'a, R: Read + Send + 'a>(
        self,
        reader: R,
    ) -> Result<Box<dyn Read + Send + 'a>, ParseError> {
        Ok(match self {
            Self::None => Box::new(reader),
            Self::Gzip => Box::new(MultiGzDecoder::new(reader)),
            #[cfg(feature = "compression")]
            Self::Bzip2 => Box::new(BzDecoder::new(reader)),
            #[cfg(feature = "compression")]
            Self::Xz => Box::new(XzDecoder::new_multi_decoder(reader)),
            #[cfg(not(feature = "compression"))]
            Self::Bzip2 | Self::Xz => return Err(ParseError::new_unsupported_compression(self)),
        })
    }

    /// Wraps `writer` in the encoder for this container
    pub(crate) fn encoder<W: Write>(self, writer: W) -> Result<Encoder<W>, ParseError> {
        Ok(match self {
            Self::None => Encoder::Plain(writer),
            Self::Gzip => Encoder::Gzip(GzEncoder::new(writer, flate2::Compression::default())),
            #[cfg(feature = "compression")]
            Self::Bzip2 => Encoder::Bzip2(BzEncoder::new(writer, bzip2::Compression::default())),
            #[cfg(feature = "compression")]
            Self::Xz => Encoder::Xz(XzEncoder::new(writer, 6)),
            #[cfg(not(feature = "compression"))]
            Self::Bzip2 | Self::Xz => return Err(ParseError::new_unsupported_compression(self)),
        })
    }
}

/// Output sink, compressing or not
pub(crate) enum Encoder<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
    #[cfg(feature = "compression")]
    Bzip2(BzEncoder<W>),
    #[cfg(feature = "compression")]
    Xz(XzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Writes any compression trailer and hands back the inner writer
    pub(crate) fn finish(self) -> io::Result<W> {
        match self {
            Self::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Self::Gzip(e) => e.finish(),
            #[cfg(feature = "compression")]
            Self::Bzip2(e) => e.finish(),
            #[cfg(feature = "compression")]
            Self::Xz(e) => e.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(e) => e.write(buf),
            #[cfg(feature = "compression")]
            Self::Bzip2(e) => e.write(buf),
            #[cfg(feature = "compression")]
            Self::Xz(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(e) => e.flush(),
            #[cfg(feature = "compression")]
            Self::Bzip2(e) => e.flush(),
            #[cfg(feature = "compression")]
            Self::Xz(e) => e.flush(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detect_magic() {
        assert_eq!(Compression::detect(&[0x1F, 0x8B, 0x08]), Compression::Gzip);
        assert_eq!(Compression::detect(b"BZh9"), Compression::Bzip2);
        assert_eq!(Compression::detect(&[0xFD, 0x37, 0x7A]), Compression::Xz);
        assert_eq!(Compression::detect(b">id"), Compression::None);
        assert_eq!(Compression::detect(&[0x1F]), Compression::None);
        assert_eq!(Compression::detect(b""), Compression::None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Compression::from_path("out.fa.gz"), Compression::Gzip);
        assert_eq!(Compression::from_path("out.fq.bgz"), Compression::Gzip);
        assert_eq!(Compression::from_path("out.fq.bz2"), Compression::Bzip2);
        assert_eq!(Compression::from_path("out.fq.xz"), Compression::Xz);
        assert_eq!(Compression::from_path("out.fq"), Compression::None);
        assert_eq!(Compression::from_path("gz"), Compression::None);
    }

    #[test]
    fn test_gzip_encoder_round_trip() {
        let mut encoder = Compression::Gzip.encoder(Vec::new()).unwrap();
        encoder.write_all(b">id\nACGT\n").unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(Compression::detect(&compressed), Compression::Gzip);

        let mut decoded = String::new();
        Compression::Gzip
            .decoder(&compressed[..])
            .unwrap()
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, ">id\nACGT\n");
    }

    #[cfg(not(feature = "compression"))]
    #[test]
    fn test_missing_codecs_are_reported() {
        use crate::errors::ParseErrorKind;
        let e = Compression::Xz.encoder(Vec::new()).err().unwrap();
        assert_eq!(e.kind, ParseErrorKind::UnsupportedCompression);
    }
}
