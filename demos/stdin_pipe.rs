use rsbio_seq::parse_fastx_stdin;

fn main() {
    env_logger::init();

    let reader = match parse_fastx_stdin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let format = reader.format();
    let compression = reader.compression();

    let mut n_records = 0;
    let mut n_bases = 0;
    for record in reader {
        let record = record.expect("invalid record");
        n_records += 1;
        n_bases += record.len();
    }

    println!("Read {:?} records with compression {:?}", format, compression);
    println!("There are {} records in your file", n_records);
    println!("There are {} bases in your file", n_bases);
}
