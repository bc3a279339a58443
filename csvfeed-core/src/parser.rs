use core::ops::Range;

use memchr::{memchr2, memchr3};

use crate::bytes::ByteSet;
use crate::record::Record;

/// Builds a CSV parser with various configuration knobs.
///
/// This builder can be used to tweak the field delimiter, the header
/// comment characters and the trim characters. Once a `Parser` is built,
/// its configuration cannot be changed.
#[derive(Clone, Debug)]
pub struct ParserBuilder {
    delimiter: u8,
    comments: ByteSet,
    trim: ByteSet,
}

impl Default for ParserBuilder {
    fn default() -> ParserBuilder {
        ParserBuilder {
            delimiter: b',',
            comments: ByteSet::default(),
            trim: ByteSet::default(),
        }
    }
}

impl ParserBuilder {
    /// Create a new builder.
    pub fn new() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// Build a CSV parser from this configuration.
    ///
    /// `handler` is invoked once per record with the record's fields and
    /// the 1-based line number of the line that terminated it. An error
    /// returned by the handler aborts the `feed`, `finish` or `parse` call
    /// that invoked it and is returned from that call unchanged.
    pub fn build<F, E>(&self, handler: F) -> Parser<F>
    where
        F: FnMut(&Record<'_>, u64) -> Result<(), E>,
    {
        Parser {
            handler,
            delimiter: self.delimiter,
            header: !self.comments.is_empty(),
            comments: self.comments.clone(),
            trim: self.trim.clone(),
            buf: Vec::with_capacity(1024),
            fields: Vec::with_capacity(16),
            start: 0,
            state: State::StartRecord,
            cr: false,
            line: 0,
            rows: 0,
        }
    }

    /// The field delimiter to use when parsing CSV.
    ///
    /// The default is `b','`.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut ParserBuilder {
        self.delimiter = delimiter;
        self
    }

    /// Lines starting with any of these bytes are skipped, as long as no
    /// data line has been seen yet.
    ///
    /// This is meant for comment blocks at the head of a file. Blank lines
    /// in between are skipped too. Once the first data byte has been
    /// parsed, comment characters have no special meaning anymore.
    ///
    /// By default, no comment characters are set.
    pub fn comments(&mut self, chars: &[u8]) -> &mut ParserBuilder {
        self.comments = ByteSet::new(chars);
        self
    }

    /// Bytes stripped from both ends of every field.
    ///
    /// Trimming applies after unquoting, so it also strips bytes from the
    /// edges of quoted fields. By default, nothing is trimmed.
    pub fn trim(&mut self, chars: &[u8]) -> &mut ParserBuilder {
        self.trim = ByteSet::new(chars);
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Nothing of the current record has been seen.
    StartRecord,
    /// Right after a delimiter. A quote here opens a quoted field.
    StartField,
    /// Inside an unquoted field.
    InField,
    /// Inside a quoted field.
    InQuotedField,
    /// A quote was seen inside a quoted field. It is either the first half
    /// of an escaped quote or the closing quote.
    InQuotedQuote,
    /// Skipping a header comment line.
    InComment,
}

/// An incremental CSV parser.
///
/// The parser consumes CSV data in chunks of any size via [`feed`] and
/// invokes its row handler for every record as soon as the record's line
/// terminator is seen. Incomplete trailing data is buffered until the next
/// chunk arrives, and chunk boundaries may fall anywhere: inside quoted
/// fields, between a `\r` and its `\n`, or next to a delimiter. Every
/// input byte is looked at once.
///
/// Once all data has been fed, call [`finish`] to flush a final record
/// that lacks a line terminator.
///
/// The parser never fails on malformed data. The only errors it returns
/// are the ones produced by its handler.
///
/// [`feed`]: Parser::feed
/// [`finish`]: Parser::finish
#[derive(Debug)]
pub struct Parser<F> {
    handler: F,
    delimiter: u8,
    comments: ByteSet,
    trim: ByteSet,
    /// Unescaped bytes of the record being parsed.
    buf: Vec<u8>,
    /// Completed fields of the record being parsed, as ranges into `buf`.
    fields: Vec<Range<usize>>,
    /// Start of the open field in `buf`.
    start: usize,
    state: State,
    /// Whether the last byte was a `\r` ending a line, in which case a
    /// directly following `\n` belongs to the same terminator.
    cr: bool,
    /// Whether header comment lines are still being skipped. While set,
    /// every `\r` and every `\n` counts as a line of its own.
    header: bool,
    line: u64,
    rows: u64,
}

impl<F, E> Parser<F>
where
    F: FnMut(&Record<'_>, u64) -> Result<(), E>,
{
    /// Create a new CSV parser with a default configuration.
    pub fn new(handler: F) -> Parser<F> {
        ParserBuilder::new().build(handler)
    }

    /// Parse a chunk of CSV data.
    ///
    /// The handler is called for every record completed by this chunk.
    /// Data after the last line terminator stays buffered. If the chunk
    /// contains a NUL byte, the rest of the chunk is ignored.
    ///
    /// If the handler fails, the record it was given is dropped, the rest
    /// of the chunk is ignored and the handler's error is returned.
    pub fn feed(&mut self, input: &[u8]) -> Result<&mut Self, E> {
        let mut i = 0;
        while i < input.len() {
            let b = input[i];
            if self.cr {
                self.cr = false;
                if b == b'\n' {
                    i += 1;
                    continue;
                }
            }
            if b == 0 {
                break;
            }
            match self.state {
                State::StartRecord => {
                    if b == b'\r' || b == b'\n' {
                        self.end_line(b)?;
                        i += 1;
                    } else if self.header && self.comments.contains(b) {
                        self.state = State::InComment;
                        i += 1;
                    } else {
                        self.header = false;
                        self.state = State::StartField;
                    }
                }
                State::StartField => {
                    if b == self.delimiter {
                        self.end_field();
                        i += 1;
                    } else if b == b'\r' || b == b'\n' {
                        self.end_line(b)?;
                        i += 1;
                    } else if b == b'"' {
                        self.state = State::InQuotedField;
                        i += 1;
                    } else {
                        self.state = State::InField;
                    }
                }
                State::InField => {
                    let rest = &input[i..];
                    let stop = memchr3(self.delimiter, b'\r', b'\n', rest)
                        .unwrap_or(rest.len());
                    if let Some(nul) = memchr::memchr(0, &rest[..stop]) {
                        self.buf.extend_from_slice(&rest[..nul]);
                        break;
                    }
                    self.buf.extend_from_slice(&rest[..stop]);
                    i += stop;
                    if stop < rest.len() {
                        if rest[stop] == self.delimiter {
                            self.end_field();
                        } else {
                            self.end_line(rest[stop])?;
                        }
                        i += 1;
                    }
                }
                State::InQuotedField => {
                    let rest = &input[i..];
                    match memchr2(b'"', 0, rest) {
                        None => {
                            self.buf.extend_from_slice(rest);
                            i = input.len();
                        }
                        Some(j) => {
                            self.buf.extend_from_slice(&rest[..j]);
                            if rest[j] == 0 {
                                break;
                            }
                            self.state = State::InQuotedQuote;
                            i += j + 1;
                        }
                    }
                }
                State::InQuotedQuote => {
                    if b == b'"' {
                        self.buf.push(b'"');
                        self.state = State::InQuotedField;
                        i += 1;
                    } else {
                        // Closing quote. Whatever follows up to the next
                        // delimiter or terminator is kept as is.
                        self.state = State::InField;
                    }
                }
                State::InComment => {
                    let rest = &input[i..];
                    match memchr3(b'\r', b'\n', 0, rest) {
                        None => i = input.len(),
                        Some(j) => {
                            if rest[j] == 0 {
                                break;
                            }
                            self.end_line(rest[j])?;
                            i += j + 1;
                        }
                    }
                }
            }
        }
        Ok(self)
    }

    /// Flush the buffered record, if any.
    ///
    /// This behaves like feeding a single `\n`, except that an unterminated
    /// quoted field is closed first. Calling it when nothing is buffered
    /// invokes no handler.
    pub fn finish(&mut self) -> Result<&mut Self, E> {
        if let State::InQuotedField | State::InQuotedQuote = self.state {
            self.state = State::InField;
        }
        self.feed(b"\n")
    }

    /// Parse a complete CSV text.
    ///
    /// This is a shortcut for `clear`, `feed` and `finish`.
    pub fn parse(&mut self, input: &[u8]) -> Result<(), E> {
        self.clear().feed(input)?.finish()?;
        Ok(())
    }

    /// Close the open field.
    fn end_field(&mut self) {
        let end = self.buf.len();
        self.fields.push(self.start..end);
        self.start = end;
        self.state = State::StartField;
    }

    /// Handle the line terminator byte `b`, emitting the current record
    /// unless it is blank.
    ///
    /// A failing handler still discards the record, but the row counter
    /// only counts records the handler accepted.
    fn end_line(&mut self, b: u8) -> Result<(), E> {
        self.line += 1;
        self.cr = b == b'\r' && !self.header;
        self.state = State::StartRecord;
        if self.buf.is_empty() && self.fields.is_empty() {
            return Ok(());
        }
        let end = self.buf.len();
        self.fields.push(self.start..end);
        for range in self.fields.iter_mut() {
            *range = self.trim.trim(&self.buf, range.clone());
        }
        let result =
            (self.handler)(&Record::new(&self.buf, &self.fields), self.line);
        self.buf.clear();
        self.fields.clear();
        self.start = 0;
        if result.is_ok() {
            self.rows += 1;
        }
        result
    }
}

impl<F> Parser<F> {
    /// Reset the parser such that it behaves as if it had never been used.
    ///
    /// Buffered data, the line counter and the row counter are discarded.
    /// The configuration is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self.fields.clear();
        self.start = 0;
        self.state = State::StartRecord;
        self.cr = false;
        self.header = !self.comments.is_empty();
        self.line = 0;
        self.rows = 0;
        self
    }

    /// Return the number of line terminators seen so far.
    ///
    /// Terminators inside quoted fields are part of the field and are not
    /// counted. A `\r\n` pair counts once, except in the blank and comment
    /// lines skipped before the first data line, where `\r` and `\n` are
    /// counted separately.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Return the number of records the handler accepted so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Return the field delimiter of this parser.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::{Parser, ParserBuilder};
    use crate::record::Record;

    type Csv = Vec<(u64, Vec<String>)>;

    macro_rules! csv {
        ($($line:expr => [$($field:expr),*]),*) => {{
            #[allow(unused_mut)]
            let mut csv = Csv::new();
            $(
                csv.push(($line, vec![$(String::from($field)),*]));
            )*
            csv
        }}
    }

    /// Each case is checked on the whole input, fed byte by byte, and
    /// split in two at every offset.
    macro_rules! parses_to {
        ($name:ident, $data:expr, $expected:expr) => {
            parses_to!($name, $data, $expected, |builder| builder);
        };
        ($name:ident, $data:expr, $expected:expr, $config:expr) => {
            #[test]
            fn $name() {
                let data: &[u8] = $data.as_ref();
                let expected: Csv = $expected;
                let mut builder = ParserBuilder::new();
                $config(&mut builder);

                assert_eq!(expected, parse_chunks(&builder, &[data]), "whole");

                let bytes: Vec<&[u8]> = data.chunks(1).collect();
                assert_eq!(expected, parse_chunks(&builder, &bytes), "bytes");

                for at in 0..=data.len() {
                    let (a, b) = data.split_at(at);
                    assert_eq!(
                        expected,
                        parse_chunks(&builder, &[a, b]),
                        "split at {}",
                        at
                    );
                }
            }
        };
    }

    fn parse_chunks(builder: &ParserBuilder, chunks: &[&[u8]]) -> Csv {
        let mut csv = Csv::new();
        let mut parser = builder.build(|rec: &Record<'_>, line| {
            let row = rec
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect();
            csv.push((line, row));
            Ok::<(), Infallible>(())
        });
        for chunk in chunks {
            parser.feed(chunk).unwrap();
        }
        parser.finish().unwrap();
        drop(parser);
        csv
    }

    parses_to!(empty, "", csv![]);
    parses_to!(blank_lines_only, "\n\r\n\r", csv![]);
    parses_to!(one_row_one_field, "a", csv![1 => ["a"]]);
    parses_to!(one_row_many_fields, "a,b,c", csv![1 => ["a", "b", "c"]]);
    parses_to!(one_row_trailing_comma, "a,b,", csv![1 => ["a", "b", ""]]);
    parses_to!(one_row_leading_comma, ",a", csv![1 => ["", "a"]]);
    parses_to!(one_row_only_comma, ",", csv![1 => ["", ""]]);
    parses_to!(one_row_one_field_lf, "a\n", csv![1 => ["a"]]);
    parses_to!(one_row_many_fields_lf, "a,b,c\n", csv![1 => ["a", "b", "c"]]);
    parses_to!(one_row_one_field_crlf, "a\r\n", csv![1 => ["a"]]);
    parses_to!(
        one_row_many_fields_crlf,
        "a,b,c\r\n",
        csv![1 => ["a", "b", "c"]]
    );
    parses_to!(one_row_one_field_cr, "a\r", csv![1 => ["a"]]);
    parses_to!(one_row_trailing_comma_cr, "a,b,\r", csv![1 => ["a", "b", ""]]);

    parses_to!(many_rows_one_field, "a\nb", csv![1 => ["a"], 2 => ["b"]]);
    parses_to!(
        many_rows_many_fields,
        "a,b,c\nx,y,z",
        csv![1 => ["a", "b", "c"], 2 => ["x", "y", "z"]]
    );
    parses_to!(
        many_rows_mixed_terminators,
        "a\nb\rc\r\nd",
        csv![1 => ["a"], 2 => ["b"], 3 => ["c"], 4 => ["d"]]
    );
    parses_to!(
        cr_cr_is_two_lines,
        "a\r\rb",
        csv![1 => ["a"], 3 => ["b"]]
    );
    parses_to!(
        lf_cr_is_two_lines,
        "a\n\rb",
        csv![1 => ["a"], 3 => ["b"]]
    );
    parses_to!(
        blank_lines_are_counted,
        "a,b\n\nc,d\n",
        csv![1 => ["a", "b"], 3 => ["c", "d"]]
    );

    parses_to!(quoted_one, "\"a\"", csv![1 => ["a"]]);
    parses_to!(quoted_empty_then_field, "\"\",a", csv![1 => ["", "a"]]);
    parses_to!(
        quoted_delimiter,
        "\"a,b\",c",
        csv![1 => ["a,b", "c"]]
    );
    parses_to!(
        doubled_quote,
        "r5c1,\"r5\"\"2\",r5c3,r5c4\n",
        csv![1 => ["r5c1", "r5\"2", "r5c3", "r5c4"]]
    );
    parses_to!(
        quoted_newline,
        "r6c1,\"r6\n2\",r6c3,r6c4\nx",
        csv![1 => ["r6c1", "r6\n2", "r6c3", "r6c4"], 2 => ["x"]]
    );
    parses_to!(
        quoted_crlf,
        "\"a\r\nb\",c\r\n",
        csv![1 => ["a\r\nb", "c"]]
    );
    parses_to!(
        quote_inside_unquoted_field_is_literal,
        "a\"b,c\"\n",
        csv![1 => ["a\"b", "c\""]]
    );
    parses_to!(
        content_after_closing_quote_is_kept,
        "\"ab\"cd\"e,f",
        csv![1 => ["abcd\"e", "f"]]
    );
    parses_to!(
        unterminated_quote_is_flushed,
        "a,\"b,c\nd",
        csv![1 => ["a", "b,c\nd"]]
    );
    parses_to!(
        unterminated_quote_after_escape,
        "\"a\"\"",
        csv![1 => ["a\""]]
    );
    parses_to!(
        lone_quoted_empty_field_is_blank,
        "\"\"\na",
        csv![2 => ["a"]]
    );

    parses_to!(
        semicolon_delimiter,
        "a;\"b;c\";d\n",
        csv![1 => ["a", "b;c", "d"]],
        |b: &mut ParserBuilder| {
            b.delimiter(b';');
        }
    );
    parses_to!(
        tab_delimiter_is_not_trimmed_away,
        "a\tb\t\n",
        csv![1 => ["a", "b", ""]],
        |b: &mut ParserBuilder| {
            b.delimiter(b'\t');
        }
    );

    parses_to!(
        header_comments,
        "# Comments at the start will\n; be ignored\nr1c1,r1c2\nr2c1,r2c2\n",
        csv![3 => ["r1c1", "r1c2"], 4 => ["r2c1", "r2c2"]],
        |b: &mut ParserBuilder| {
            b.comments(b"#;");
        }
    );
    parses_to!(
        header_comments_crlf_and_blank_lines,
        "#a\r\n\r\n#b\r\nx\r\ny\r\n",
        csv![7 => ["x"], 8 => ["y"]],
        |b: &mut ParserBuilder| {
            b.comments(b"#");
        }
    );
    parses_to!(
        crlf_pairs_again_after_header,
        "#a\r\n\r\nx\r\n\r\ny\n",
        csv![5 => ["x"], 7 => ["y"]],
        |b: &mut ParserBuilder| {
            b.comments(b"#");
        }
    );
    parses_to!(
        crlf_is_one_line_without_comment_chars,
        "\r\n\r\nx\r\n",
        csv![3 => ["x"]]
    );
    parses_to!(
        comments_only_at_head,
        "#a\nx\n#b\n",
        csv![2 => ["x"], 3 => ["#b"]],
        |b: &mut ParserBuilder| {
            b.comments(b"#");
        }
    );
    parses_to!(
        comment_char_not_at_line_start,
        "x#,#\n",
        csv![1 => ["x#", "#"]],
        |b: &mut ParserBuilder| {
            b.comments(b"#");
        }
    );
    parses_to!(
        comments_without_data,
        "#a\n#b",
        csv![],
        |b: &mut ParserBuilder| {
            b.comments(b"#");
        }
    );

    parses_to!(
        trimming,
        "  r1c1 \t ,r1c2, r1c3  , r1c4 \n r2c1 ,r2c2,r2c3,r2c4\n",
        csv![
            1 => ["r1c1", "r1c2", "r1c3", "r1c4"],
            2 => ["r2c1", "r2c2", "r2c3", "r2c4"]
        ],
        |b: &mut ParserBuilder| {
            b.trim(b" \t");
        }
    );
    parses_to!(
        trimming_to_empty,
        "   ,a\n",
        csv![1 => ["", "a"]],
        |b: &mut ParserBuilder| {
            b.trim(b" ");
        }
    );
    parses_to!(
        trimming_applies_to_quoted_content,
        "\" a \",b\n",
        csv![1 => ["a", "b"]],
        |b: &mut ParserBuilder| {
            b.trim(b" ");
        }
    );
    parses_to!(
        trimming_keeps_quotes_of_padded_quoted_field,
        " \"a\" ,b\n",
        csv![1 => ["\"a\"", "b"]],
        |b: &mut ParserBuilder| {
            b.trim(b" ");
        }
    );

    fn parse_default(parser_input: &[&[u8]]) -> Csv {
        parse_chunks(&ParserBuilder::new(), parser_input)
    }

    #[test]
    fn rfc4180_sample() {
        let data = "r1c1,r1c2,r1c3,r1c4\n\
                    r2c1,r2c2,r2c3,r2c4\r\
                    r3c1,r3c2,r3c3,r3c4\r\n\
                    r4c1,\"r4c2\",r4c3,r4c4\n\
                    r5c1,\"r5\"\"2\",r5c3,r5c4\n\
                    r6c1,\"r6\n2\",r6c3,r6c4\n\
                    \n\
                    r8c1,\"r8\n2\",r8c3,r8c4\n";
        let got = parse_default(&[data.as_bytes()]);
        let lines: Vec<u64> = got.iter().map(|&(line, _)| line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6, 8]);
        assert_eq!(got[3].1, vec!["r4c1", "r4c2", "r4c3", "r4c4"]);
        assert_eq!(got[4].1[1], "r5\"2");
        assert_eq!(got[5].1[1], "r6\n2");
        assert_eq!(got[6].1[1], "r8\n2");
    }

    #[test]
    fn partial_feeds() {
        let chunks: &[&[u8]] = &[
            b"r1c1,r1c2,r1c3,r1c4\n",
            b"r2c1,r2",
            b"c2,r2c3,r2c4\r",
            b"r3c1,r3c2,r3c3,r",
            b"3c4\r\n",
        ];
        assert_eq!(
            parse_default(chunks),
            csv![
                1 => ["r1c1", "r1c2", "r1c3", "r1c4"],
                2 => ["r2c1", "r2c2", "r2c3", "r2c4"],
                3 => ["r3c1", "r3c2", "r3c3", "r3c4"]
            ]
        );
    }

    #[test]
    fn nul_stops_the_chunk() {
        let mut rows = 0;
        let mut crammed = String::new();
        let mut parser = Parser::new(|rec: &Record<'_>, _| {
            rows += 1;
            for field in rec {
                crammed.push_str(&String::from_utf8_lossy(field));
            }
            Ok::<(), Infallible>(())
        });
        parser.parse(b"1,2,3\n4,5,6\r\n,7,8,9\0N,O,T\n").unwrap();
        drop(parser);
        assert_eq!(rows, 3);
        assert_eq!(crammed, "123456789");
    }

    #[test]
    fn nul_stops_only_the_current_chunk() {
        let got = parse_default(&[b"a,\"b\0junk", b"c\",d\n"]);
        assert_eq!(got, csv![1 => ["a", "bc", "d"]]);
    }

    #[test]
    fn nul_inside_comment_stops_the_chunk() {
        let got = parse_chunks(
            ParserBuilder::new().comments(b"#"),
            &[b"#abc\0x\ny\n", b"\nz\n"],
        );
        assert_eq!(got, csv![2 => ["z"]]);
    }

    #[test]
    fn empty_chunks_are_fine() {
        let got = parse_default(&[b"", b"a,", b"", b"b", b""]);
        assert_eq!(got, csv![1 => ["a", "b"]]);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut count = 0;
        let mut parser = Parser::new(|_: &Record<'_>, _| {
            count += 1;
            Ok::<(), Infallible>(())
        });
        parser.feed(b"a,b").unwrap();
        parser.finish().unwrap().finish().unwrap().finish().unwrap();
        assert_eq!(parser.rows(), 1);
        drop(parser);
        assert_eq!(count, 1);
    }

    #[test]
    fn clear_resets_state_but_not_config() {
        let mut got = Csv::new();
        let mut parser = ParserBuilder::new()
            .delimiter(b';')
            .comments(b"#")
            .build(|rec: &Record<'_>, line| {
                let row = rec
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect();
                got.push((line, row));
                Ok::<(), Infallible>(())
            });
        parser.feed(b"x;y\n\"half").unwrap();
        assert_eq!(parser.line(), 1);
        assert_eq!(parser.rows(), 1);
        parser.clear();
        assert_eq!(parser.line(), 0);
        assert_eq!(parser.rows(), 0);
        assert_eq!(parser.delimiter(), b';');
        parser.parse(b"#again\na;b\n").unwrap();
        drop(parser);
        assert_eq!(got, csv![1 => ["x", "y"], 2 => ["a", "b"]]);
    }

    #[test]
    fn parse_clears_first() {
        let mut lines = vec![];
        let mut parser = Parser::new(|_: &Record<'_>, line| {
            lines.push(line);
            Ok::<(), Infallible>(())
        });
        parser.feed(b"dangling,\"quoted").unwrap();
        parser.parse(b"a\nb\n").unwrap();
        parser.parse(b"c\n").unwrap();
        drop(parser);
        assert_eq!(lines, vec![1, 2, 1]);
    }

    #[test]
    fn handler_error_propagates() {
        let mut seen = vec![];
        let mut parser = Parser::new(|rec: &Record<'_>, line| {
            if &rec[0] == b"stop" {
                return Err(format!("stopped at line {}", line));
            }
            seen.push(rec.to_vec());
            Ok(())
        });
        let err = parser.feed(b"a\nstop\nb\n").err();
        assert_eq!(err, Some(String::from("stopped at line 2")));
        // The failed record is gone and not counted; recovering means
        // clearing.
        assert_eq!(parser.rows(), 1);
        parser.clear();
        parser.parse(b"c\n").unwrap();
        drop(parser);
        assert_eq!(seen, vec![vec![b"a".to_vec()], vec![b"c".to_vec()]]);
    }

    #[test]
    fn handler_sees_trimmed_views_in_order() {
        let mut parser = ParserBuilder::new().trim(b"-").build(
            |rec: &Record<'_>, _| {
                assert_eq!(rec.len(), 3);
                assert_eq!(rec.get(0), Some(&b"a"[..]));
                assert_eq!(rec.get(1), Some(&b""[..]));
                assert_eq!(rec.get(2), Some(&b"c"[..]));
                Ok::<(), Infallible>(())
            },
        );
        parser.parse(b"-a-,---,c--\n").unwrap();
    }

    #[test]
    fn chunked_large_field() {
        let field = "x".repeat(100_000);
        let data = format!("{},\"{}\"\n", field, field);
        let whole = parse_default(&[data.as_bytes()]);
        let pieces: Vec<&[u8]> = data.as_bytes().chunks(777).collect();
        assert_eq!(whole, parse_default(&pieces));
        assert_eq!(whole[0].1, vec![field.clone(), field]);
    }

    #[test]
    fn prop_chunk_boundaries_do_not_matter() {
        fn prop(data: Vec<u8>, cuts: Vec<usize>, trim: bool) -> bool {
            // NUL ends a chunk, so it is the one byte where chunking shows.
            let data: Vec<u8> = data
                .into_iter()
                .filter(|&b| b != 0)
                .map(|b| match b % 8 {
                    0 => b',',
                    1 => b'"',
                    2 => b'\n',
                    3 => b'\r',
                    4 => b'#',
                    5 => b' ',
                    _ => b,
                })
                .collect();
            let mut builder = ParserBuilder::new();
            builder.comments(b"#");
            if trim {
                builder.trim(b" ");
            }

            let mut cuts: Vec<usize> =
                cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
            cuts.sort_unstable();
            let mut chunks = vec![];
            let mut last = 0;
            for cut in cuts {
                chunks.push(&data[last..cut]);
                last = cut;
            }
            chunks.push(&data[last..]);

            parse_chunks(&builder, &[&data[..]]) == parse_chunks(&builder, &chunks)
        }
        quickcheck::quickcheck(prop as fn(Vec<u8>, Vec<usize>, bool) -> bool);
    }
}
