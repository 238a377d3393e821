#![no_main]
use libfuzzer_sys::fuzz_target;

use rsbio_seq::parser::{FastqReader, FastxReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let cursor = Cursor::new([b"@", data].concat());
    let mut reader = FastqReader::new(cursor);
    while let Some(rec) = reader.next() {
        if let Ok(rec) = rec {
            let _ = rec.quality_scores();
        }
    }
});
