use rsbio_seq::{parse_fastx_file, Compression, Format, Sequence};

const FASTA_FILES: [(&str, Compression); 4] = [
    ("./tests/data/reads.fa", Compression::None),
    ("./tests/data/reads.fa.gz", Compression::Gzip),
    ("./tests/data/reads.fa.bz2", Compression::Bzip2),
    ("./tests/data/reads.fa.xz", Compression::Xz),
];

const FASTQ_FILES: [(&str, Compression); 4] = [
    ("./tests/data/reads.fq", Compression::None),
    ("./tests/data/reads.fq.gz", Compression::Gzip),
    ("./tests/data/reads.fq.bz2", Compression::Bzip2),
    ("./tests/data/reads.fq.xz", Compression::Xz),
];

const SEQ_1: &str = "GGGTGATGGCCGCTGCCGATGGCGTCAAATCCCACCAAGTTACCCTTAACAACTTAAGGGTTTTCAAATAGA";
const SEQ_2: &str = "GTTCAGGGATACGACGTTTGTATTTTAAGAATCTGAAGCAGAAGTCGATGATAATACGCGTCGTTTTATCAT";

fn read_all(path: &str) -> Vec<Sequence> {
    parse_fastx_file(path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn can_read_gzip_files_automatically() {
    let reader = parse_fastx_file(FASTA_FILES[1].0).unwrap();
    assert_eq!(reader.compression(), Compression::Gzip);
    assert_eq!(read_all(FASTA_FILES[1].0), read_all(FASTA_FILES[0].0));
    assert_eq!(read_all(FASTQ_FILES[1].0), read_all(FASTQ_FILES[0].0));
}

#[test]
fn reads_fasta_fixture() {
    let mut reader = parse_fastx_file(FASTA_FILES[0].0).unwrap();
    assert_eq!(reader.format(), Format::Fasta);
    let mut i = 0;
    for record in reader.by_ref() {
        let seq = record.unwrap();
        match i {
            0 => {
                assert_eq!(seq.id(), "Record_1");
                assert_eq!(seq.description(), "Desc");
                assert_eq!(seq.seq(), SEQ_1);
                assert_eq!(seq.qual(), None);
            }
            1 => {
                assert_eq!(seq.id(), "Record_2");
                assert_eq!(seq.description(), "");
                assert_eq!(seq.seq(), SEQ_2);
            }
            _ => unreachable!("Too many records"),
        }
        i += 1;
    }
    assert_eq!(i, 2);
    assert!(reader.next().is_none());
}

#[test]
fn reads_fastq_fixture() {
    let records = read_all(FASTQ_FILES[0].0);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "Read_1");
    assert_eq!(records[0].seq(), SEQ_1);
    assert_eq!(
        records[0].qual(),
        Some("IIIIIIIIIIIIIIIIIIIIIIIIIIIIII9IG9ICIIIIIIIIIIIIIIIIIIIIDIIIIIII>IIIIII/")
    );
    assert_eq!(records[1].id(), "Read_2");
    assert_eq!(records[1].description(), "second read");
    assert_eq!(records[1].seq(), SEQ_2);
    assert_eq!(
        records[1].qual(),
        Some("IIIIIIIIIIIIIIIIIIIIIIIIIIIIIIII6IBIIIIIIIIIIIIIIIIIIIIIIIGII>IIIII-I)8I")
    );
}

#[cfg(feature = "compression")]
#[test]
fn can_read_compressed_files_automatically() {
    let fasta = read_all(FASTA_FILES[0].0);
    let fastq = read_all(FASTQ_FILES[0].0);
    for (p, compression) in &FASTA_FILES {
        let reader = parse_fastx_file(p).unwrap();
        assert_eq!(reader.compression(), *compression);
        assert_eq!(reader.format(), Format::Fasta);
        assert_eq!(read_all(p), fasta);
    }
    for (p, compression) in &FASTQ_FILES {
        let reader = parse_fastx_file(p).unwrap();
        assert_eq!(reader.compression(), *compression);
        assert_eq!(reader.format(), Format::Fastq);
        assert_eq!(read_all(p), fastq);
    }
}

#[cfg(not(feature = "compression"))]
#[test]
fn errors_on_unsupported_compressed_files() {
    use rsbio_seq::ParseErrorKind;
    for (p, _) in FASTA_FILES[2..].iter().chain(FASTQ_FILES[2..].iter()) {
        let e = parse_fastx_file(p).err().unwrap();
        assert_eq!(e.kind, ParseErrorKind::UnsupportedCompression);
    }
}
