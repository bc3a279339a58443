/*!
`csvfeed-core` provides an incremental CSV parser and the quoting
primitives used to compose CSV lines. It performs no I/O: callers hand it
byte chunks of any size and it invokes a row handler for every record as
soon as the record's terminator has been seen.

# Example

```
use csvfeed_core::{ParserBuilder, Record};

let mut rows = vec![];
let mut parser = ParserBuilder::new()
    .trim(b" ")
    .build(|record: &Record, line: u64| {
        rows.push((line, record.to_vec()));
        Ok::<(), std::convert::Infallible>(())
    });
parser.feed(b"city, pop\nBos").unwrap();
parser.feed(b"ton, 4").unwrap();
parser.finish().unwrap();
drop(parser);

assert_eq!(rows, vec![
    (1, vec![b"city".to_vec(), b"pop".to_vec()]),
    (2, vec![b"Boston".to_vec(), b"4".to_vec()]),
]);
```

# Dialect

The parser is lenient in the tradition of RFC 4180 readers found in the
wild:

* `\r`, `\n` and `\r\n` are each a single record terminator.
* Blank lines are skipped, but still counted as lines.
* Before the first data line, while header comments are skipped, `\r` and
  `\n` count as one line each, even when they form a `\r\n` pair.
* A `"` starts a quoted field only at the start of a field. Inside a quoted
  field `""` is a literal quote. Anywhere else a quote is a literal byte.
* A NUL byte ends the current chunk.
* Malformed input never produces an error.
*/

#![deny(missing_docs)]

pub use crate::parser::{Parser, ParserBuilder};
pub use crate::quote::{escape_into, needs_quotes, quote_into};
pub use crate::record::{Record, RecordIter};

mod bytes;
mod parser;
mod quote;
mod record;
