#![no_main]
use libfuzzer_sys::fuzz_target;

use rsbio_seq::parser::{FastaReader, FastxReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let cursor = Cursor::new([b">", data].concat());
    let mut reader = FastaReader::new(cursor);
    while let Some(rec) = reader.next() {
        let _ = rec;
    }
});
