// Re-delimit CSV data. Reads from the given file, or from stdin when no
// file is given, and writes to stdout with LF line terminators:
//
//   $ cargo run --example reformat -- ';' data.csv
use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::process;

use csvfeed::{ComposerBuilder, ParserBuilder, Record};

fn example() -> Result<(), Box<dyn Error>> {
    let delimiter = get_delimiter()?;
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut composer = ComposerBuilder::new()
        .delimiter(delimiter)
        .terminator(b"\n")
        .build(|line: &[u8]| out.write_all(line).map_err(csvfeed::Error::from));
    let mut parser = ParserBuilder::new().build(
        |record: &Record, line: u64| -> Result<(), Box<dyn Error>> {
            if composer.columns() == 0 {
                composer.define_columns(record.len(), &[])?;
            }
            match composer.feed(record) {
                Ok(_) => Ok(()),
                Err(err) => Err(From::from(format!("line {}: {}", line, err))),
            }
        },
    );
    match env::args_os().nth(2) {
        Some(path) => parser.parse_file(path)?,
        None => parser.parse_reader(io::stdin())?,
    }
    drop(parser);
    drop(composer);
    out.flush()?;
    Ok(())
}

fn get_delimiter() -> Result<u8, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(ref arg) if arg == "\\t" => Ok(b'\t'),
        Some(ref arg) if arg.len() == 1 => Ok(arg.as_bytes()[0]),
        Some(arg) => Err(From::from(format!(
            "expected a single byte delimiter, but got {:?}",
            arg
        ))),
        None => Err(From::from("expected a delimiter argument, but got none")),
    }
}

fn main() {
    if let Err(err) = example() {
        println!("error running example: {}", err);
        process::exit(1);
    }
}
