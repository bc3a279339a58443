/*!
The `csvfeed` crate provides an incremental CSV parser and a CSV row
composer.

The parser is fed chunks of bytes of any size and calls a handler for
every record as soon as the record's line terminator has been seen. It is
lenient: malformed CSV is never an error. The composer turns rows of
fields into CSV lines, quoting only the fields that need it (or every
field of selected columns) and checking that every row has the defined
number of columns.

# Brief overview

* [`Parser`] parses CSV data fed to it in chunks, or read from any
  `io::Read` or from a file path. It is built with a [`ParserBuilder`],
  which sets the delimiter, header comment characters, trim characters
  and the read buffer size.
* [`Record`] is the view of one record's fields that is handed to the
  parser's row handler. It borrows the parser's internal buffer and is
  only valid for the duration of the handler call.
* [`Composer`] turns rows into CSV lines and hands each line to a line
  handler. It is built with a [`ComposerBuilder`], which sets the
  delimiter and the line terminator.
* [`Error`] describes I/O failures and composer misuse.

The I/O-free state machine lives in the `csvfeed-core` crate, which can be
used directly by callers that do not need this crate's conveniences.

# Example

Read CSV data from stdin and print each record along with its line
number:

```no_run
use std::io;

fn main() -> Result<(), csvfeed::Error> {
    let mut parser = csvfeed::Parser::new(|record: &csvfeed::Record, line| {
        println!("{}: {:?}", line, record);
        Ok::<(), csvfeed::Error>(())
    });
    parser.parse_reader(io::stdin())?;
    Ok(())
}
```

Compose CSV lines, always quoting the first column:

```
let mut out = Vec::new();
let mut composer = csvfeed::Composer::new(|line: &[u8]| {
    out.extend_from_slice(line);
    Ok::<(), csvfeed::Error>(())
});
composer.define_columns(3, &[1])?;
composer.feed(&["x", "a,b", "c"])?;
drop(composer);
assert_eq!(out, b"\"x\",\"a,b\",c\r\n");
# Ok::<(), csvfeed::Error>(())
```
*/

#![deny(missing_docs)]

pub use csvfeed_core::{
    escape_into, needs_quotes, quote_into, Record, RecordIter,
};

pub use crate::composer::{quote, Composer, ComposerBuilder};
pub use crate::error::{Error, Result};
pub use crate::parser::{Parser, ParserBuilder, DEFAULT_BUFFER_CAPACITY};

mod composer;
mod error;
mod parser;
