use std::fs::File;
use std::io;
use std::path::Path;

use csvfeed_core::Record;
use tracing::{debug, trace};

/// The size of the buffer used by `parse_reader` and `parse_file` when none
/// is configured.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Builds a CSV parser with various configuration knobs.
///
/// This builder can be used to tweak the field delimiter, the header
/// comment characters, the trim characters and the size of the buffer used
/// to read from an `io::Read`. Once a `Parser` is built, its configuration
/// cannot be changed.
///
/// # Example
///
/// ```
/// use csvfeed::ParserBuilder;
///
/// let mut rows = vec![];
/// let mut parser = ParserBuilder::new()
///     .delimiter(b';')
///     .comments(b"#")
///     .trim(b" ")
///     .build(|record: &csvfeed::Record, line| {
///         rows.push((line, record.to_vec()));
///         Ok::<(), csvfeed::Error>(())
///     });
/// parser.parse(b"# generated\n a ; b \n")?;
/// drop(parser);
///
/// assert_eq!(rows, vec![(2, vec![b"a".to_vec(), b"b".to_vec()])]);
/// # Ok::<(), csvfeed::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ParserBuilder {
    core: csvfeed_core::ParserBuilder,
    capacity: usize,
}

impl Default for ParserBuilder {
    fn default() -> ParserBuilder {
        ParserBuilder {
            core: csvfeed_core::ParserBuilder::default(),
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ParserBuilder {
    /// Create a new builder for configuring CSV parsing.
    ///
    /// To convert a builder into a parser, call one of the methods
    /// starting with `build`.
    pub fn new() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// Build a CSV parser from this configuration that calls `handler` for
    /// every record.
    ///
    /// The handler receives the record and the 1-based line number of the
    /// line terminator that ended it. Any error it returns stops parsing
    /// and is returned unchanged by the method that invoked it.
    pub fn build<F, E>(&self, handler: F) -> Parser<F>
    where
        F: FnMut(&Record<'_>, u64) -> Result<(), E>,
    {
        Parser { core: self.core.build(handler), capacity: self.capacity }
    }

    /// The field delimiter to use when parsing CSV.
    ///
    /// The default is `b','`.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut ParserBuilder {
        self.core.delimiter(delimiter);
        self
    }

    /// Lines starting with one of these bytes are skipped until the first
    /// data line.
    ///
    /// This only applies to the head of the input. After the first data
    /// byte, comment characters are ordinary field content.
    ///
    /// By default, no comment characters are set.
    pub fn comments(&mut self, chars: &[u8]) -> &mut ParserBuilder {
        self.core.comments(chars);
        self
    }

    /// Bytes to strip from both ends of every field.
    ///
    /// By default, fields are not trimmed.
    pub fn trim(&mut self, chars: &[u8]) -> &mut ParserBuilder {
        self.core.trim(chars);
        self
    }

    /// Set the size of the buffer used to read CSV data from an `io::Read`
    /// or a file.
    ///
    /// Each read fills at most this many bytes, which are then fed to the
    /// parser as one chunk. A capacity of zero is treated as one.
    pub fn buffer_capacity(&mut self, capacity: usize) -> &mut ParserBuilder {
        self.capacity = capacity;
        self
    }
}

/// An incremental CSV parser.
///
/// A parser is fed CSV data in chunks, either directly with [`feed`] or
/// by reading from an `io::Read` or a file. Each time a record's line
/// terminator is seen, the parser's handler is called with the record's
/// fields and the record's line number. Data after the last terminator is
/// buffered until more data arrives or [`finish`] is called.
///
/// Chunks may be split anywhere, including inside a quoted field or
/// between the `\r` and `\n` of a line terminator. The records produced do
/// not depend on how the input was split.
///
/// # Example
///
/// ```
/// let mut fields = vec![];
/// let mut parser = csvfeed::Parser::new(|record: &csvfeed::Record, _| {
///     fields.extend(record.iter().map(|f| f.to_vec()));
///     Ok::<(), csvfeed::Error>(())
/// });
/// parser.feed(b"a,\"b")?.feed(b"\"\"c\"\r")?.feed(b"\n")?.finish()?;
/// drop(parser);
///
/// assert_eq!(fields, vec![b"a".to_vec(), b"b\"c".to_vec()]);
/// # Ok::<(), csvfeed::Error>(())
/// ```
///
/// [`feed`]: Parser::feed
/// [`finish`]: Parser::finish
#[derive(Debug)]
pub struct Parser<F> {
    core: csvfeed_core::Parser<F>,
    capacity: usize,
}

impl<F, E> Parser<F>
where
    F: FnMut(&Record<'_>, u64) -> Result<(), E>,
{
    /// Create a new CSV parser with a default configuration.
    ///
    /// To customize parsing, use a `ParserBuilder`.
    pub fn new(handler: F) -> Parser<F> {
        ParserBuilder::new().build(handler)
    }

    /// Parse a chunk of CSV data.
    ///
    /// The handler is called for every record completed by this chunk. If
    /// the chunk contains a NUL byte, the rest of the chunk is ignored.
    pub fn feed(&mut self, input: &[u8]) -> Result<&mut Self, E> {
        self.core.feed(input)?;
        Ok(self)
    }

    /// Flush a buffered record that lacks a line terminator.
    ///
    /// If nothing is buffered, the handler is not called.
    pub fn finish(&mut self) -> Result<&mut Self, E> {
        self.core.finish()?;
        Ok(self)
    }

    /// Parse a complete CSV text.
    ///
    /// The parser is cleared first, so no state of a previous parse leaks
    /// into this one.
    pub fn parse(&mut self, input: &[u8]) -> Result<(), E> {
        self.core.parse(input)
    }

    /// Parse all CSV data from the given reader.
    ///
    /// The parser is cleared first. Data is read in chunks of the
    /// configured buffer capacity and fed to the parser, and the parser is
    /// finished once the reader is exhausted.
    ///
    /// If a read fails, the error is returned and the partially read
    /// record is not flushed.
    pub fn parse_reader<R: io::Read>(&mut self, mut rdr: R) -> Result<(), E>
    where
        E: From<io::Error>,
    {
        self.core.clear();
        let mut buf = vec![0; self.capacity.max(1)];
        debug!(capacity = buf.len(), "parsing CSV data");
        loop {
            let n = match rdr.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {
                    continue
                }
                Err(err) => return Err(E::from(err)),
            };
            trace!(len = n, "feeding chunk");
            self.core.feed(&buf[..n])?;
        }
        self.core.finish()?;
        debug!(
            rows = self.core.rows(),
            lines = self.core.line(),
            "finished parsing CSV data"
        );
        Ok(())
    }

    /// Parse the CSV file at the given path.
    ///
    /// This opens the file and hands it to [`parse_reader`]. Failing to
    /// open the file is returned as an I/O error.
    ///
    /// [`parse_reader`]: Parser::parse_reader
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), E>
    where
        E: From<io::Error>,
    {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening CSV file");
        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

impl<F> Parser<F> {
    /// Reset the parser such that it behaves as if it had never been used.
    ///
    /// The configuration is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.core.clear();
        self
    }

    /// Return the number of line terminators seen so far.
    pub fn line(&self) -> u64 {
        self.core.line()
    }

    /// Return the number of records handed to the handler so far.
    pub fn rows(&self) -> u64 {
        self.core.rows()
    }

    /// Return the field delimiter of this parser.
    pub fn delimiter(&self) -> u8 {
        self.core.delimiter()
    }

    /// Return the size of the buffer used when reading CSV data.
    pub fn buffer_capacity(&self) -> usize {
        self.capacity
    }
}
