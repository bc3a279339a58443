#![no_main]
use libfuzzer_sys::fuzz_target;

use csvfeed::{Parser, Record};

type Rows = Vec<(u64, Vec<Vec<u8>>)>;

fn parse(chunks: &[&[u8]]) -> Rows {
    let mut rows = Rows::new();
    {
        let mut parser = Parser::new(|rec: &Record, line| {
            rows.push((line, rec.to_vec()));
            Ok::<(), csvfeed::Error>(())
        });
        for chunk in chunks {
            parser.feed(chunk).unwrap();
        }
        parser.finish().unwrap();
    }
    rows
}

// The first byte picks where to split the rest of the input.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data[1..].contains(&0) {
        return;
    }
    let at = data[0] as usize;
    let data = &data[1..];
    let (a, b) = data.split_at(at.min(data.len()));
    let bytes: Vec<&[u8]> = data.chunks(1).collect();

    let whole = parse(&[data]);
    assert_eq!(whole, parse(&[a, b]));
    assert_eq!(whole, parse(&bytes));
});
