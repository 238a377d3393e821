#![no_main]
use libfuzzer_sys::fuzz_target;

use rsbio_seq::{parse_fastx_reader, Compression, Writer};
use std::io::Cursor;

// Whatever parses must be writable and readable again without panicking
fuzz_target!(|data: &[u8]| {
    let reader = match parse_fastx_reader(Cursor::new(data.to_vec())) {
        Ok(r) => r,
        Err(_) => return,
    };
    let mut writer = Writer::new(Vec::new(), Compression::None).unwrap();
    let mut written = 0;
    for rec in reader.filter_map(|r| r.ok()) {
        if writer.write(&rec, Some(60)).is_ok() {
            written += 1;
        }
    }
    let out = writer.close().unwrap();
    if written == 0 {
        return;
    }
    for rec in parse_fastx_reader(Cursor::new(out)).unwrap() {
        let _ = rec;
    }
});
