use std::borrow::Cow;

use csvfeed_core::{escape_into, needs_quotes, quote_into};
use tracing::debug;

use crate::error::{Error, Result};

/// Builds a CSV composer with various configuration knobs.
///
/// This builder can be used to tweak the field delimiter and the line
/// terminator. Once a `Composer` is built, its configuration cannot be
/// changed.
#[derive(Clone, Debug)]
pub struct ComposerBuilder {
    delimiter: u8,
    terminator: Vec<u8>,
}

impl Default for ComposerBuilder {
    fn default() -> ComposerBuilder {
        ComposerBuilder { delimiter: b',', terminator: b"\r\n".to_vec() }
    }
}

impl ComposerBuilder {
    /// Create a new builder for configuring CSV composing.
    pub fn new() -> ComposerBuilder {
        ComposerBuilder::default()
    }

    /// Build a CSV composer from this configuration that calls `handler`
    /// with every composed line, including its terminator.
    pub fn build<F, E>(&self, handler: F) -> Composer<F>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
    {
        Composer {
            handler,
            delimiter: self.delimiter,
            terminator: self.terminator.clone(),
            columns: 0,
            forced: vec![],
            line: Vec::with_capacity(1024),
        }
    }

    /// The field delimiter to use when composing CSV.
    ///
    /// The default is `b','`.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut ComposerBuilder {
        self.delimiter = delimiter;
        self
    }

    /// The line terminator appended to every composed line.
    ///
    /// The default is `\r\n`.
    pub fn terminator(&mut self, terminator: &[u8]) -> &mut ComposerBuilder {
        self.terminator = terminator.to_vec();
        self
    }
}

/// Wrap a field in quotes, doubling every quote inside of it.
///
/// This always quotes, regardless of the field's contents or of any
/// delimiter.
///
/// # Example
///
/// ```
/// assert_eq!(csvfeed::quote("a\"b"), b"\"a\"\"b\"".to_vec());
/// assert_eq!(csvfeed::quote(""), b"\"\"".to_vec());
/// ```
pub fn quote<T: AsRef<[u8]> + ?Sized>(field: &T) -> Vec<u8> {
    let mut out = vec![];
    quote_into(field.as_ref(), &mut out);
    out
}

/// A CSV composer.
///
/// A composer turns rows of fields into CSV lines and hands every line to
/// its handler. Before the first row, the number of columns must be set
/// with [`define_columns`], which may also select columns whose fields are
/// always quoted. Fields of other columns are quoted only when needed (see
/// [`escape`]).
///
/// # Example
///
/// ```
/// let mut lines = vec![];
/// let mut composer = csvfeed::ComposerBuilder::new()
///     .delimiter(b';')
///     .terminator(b"\n")
///     .build(|line: &[u8]| {
///         lines.push(String::from_utf8_lossy(line).into_owned());
///         Ok::<(), csvfeed::Error>(())
///     });
/// composer.define_columns(2, &[])?;
/// composer.feed(&["a", "b"])?.feed(&["c;d", " e"])?;
/// assert!(composer.feed(&["too few"]).is_err());
/// drop(composer);
///
/// assert_eq!(lines, vec!["a;b\n", "\"c;d\";\" e\"\n"]);
/// # Ok::<(), csvfeed::Error>(())
/// ```
///
/// [`define_columns`]: Composer::define_columns
/// [`escape`]: Composer::escape
#[derive(Debug)]
pub struct Composer<F> {
    handler: F,
    delimiter: u8,
    terminator: Vec<u8>,
    /// Zero until columns are defined.
    columns: usize,
    /// Per column, whether its fields are always quoted.
    forced: Vec<bool>,
    line: Vec<u8>,
}

impl<F, E> Composer<F>
where
    F: FnMut(&[u8]) -> std::result::Result<(), E>,
{
    /// Create a new CSV composer with a default configuration.
    ///
    /// To customize composing, use a `ComposerBuilder`.
    pub fn new(handler: F) -> Composer<F> {
        ComposerBuilder::new().build(handler)
    }

    /// Compose one CSV line from `fields` and pass it to the handler.
    ///
    /// The number of fields must equal the number of defined columns.
    /// Otherwise an error is returned and the handler is not called. An
    /// error returned by the handler is returned unchanged.
    pub fn feed<I, T>(&mut self, fields: I) -> std::result::Result<&mut Self, E>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
        E: From<Error>,
    {
        if self.columns == 0 {
            debug!("rejecting row fed before columns were defined");
            return Err(E::from(Error::ColumnsUndefined));
        }
        self.line.clear();
        let mut len = 0;
        for field in fields {
            let field = field.as_ref();
            if len < self.columns {
                if len > 0 {
                    self.line.push(self.delimiter);
                }
                if self.forced[len] {
                    quote_into(field, &mut self.line);
                } else {
                    escape_into(field, self.delimiter, &mut self.line);
                }
            }
            len += 1;
        }
        if len != self.columns {
            debug!(expected_len = self.columns, len, "rejecting row");
            return Err(E::from(Error::UnequalLengths {
                expected_len: self.columns,
                len,
            }));
        }
        self.line.extend_from_slice(&self.terminator);
        (self.handler)(&self.line)?;
        Ok(self)
    }
}

impl<F> Composer<F> {
    /// Return `field` quoted if it needs quotes, and unchanged otherwise.
    ///
    /// A field needs quotes if it starts or ends with a space, or if it
    /// contains a quote, this composer's delimiter, or any byte outside of
    /// printable ASCII. Other whitespace at the edges, such as tabs, is
    /// caught by the printable ASCII rule.
    pub fn escape<'a, T: AsRef<[u8]> + ?Sized>(
        &self,
        field: &'a T,
    ) -> Cow<'a, [u8]> {
        let field = field.as_ref();
        if needs_quotes(field, self.delimiter) {
            Cow::Owned(quote(field))
        } else {
            Cow::Borrowed(field)
        }
    }

    /// Set the number of columns of every row, and the 1-based indices of
    /// the columns whose fields are always quoted.
    ///
    /// This fails if columns are already defined, if `columns` is zero, or
    /// if an index is not in `1..=columns`. Use `clear` to define columns
    /// again.
    pub fn define_columns(
        &mut self,
        columns: usize,
        forced: &[usize],
    ) -> Result<&mut Self> {
        if self.columns != 0 {
            debug!(columns = self.columns, "columns are already defined");
            return Err(Error::ColumnsDefined { columns: self.columns });
        }
        if columns == 0 {
            debug!("rejecting empty column definition");
            return Err(Error::NoColumns);
        }
        if let Some(&index) = forced.iter().find(|&&i| i == 0 || i > columns)
        {
            debug!(index, columns, "rejecting forced quote column");
            return Err(Error::QuoteIndex { index, columns });
        }
        let mut flags = vec![false; columns];
        for &index in forced {
            flags[index - 1] = true;
        }
        debug!(columns, forced = ?forced, "defined columns");
        self.forced = flags;
        self.columns = columns;
        Ok(self)
    }

    /// Forget the column definition.
    ///
    /// The delimiter and terminator are kept.
    pub fn clear(&mut self) -> &mut Self {
        self.columns = 0;
        self.forced.clear();
        self.line.clear();
        self
    }

    /// Return the field delimiter of this composer.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Return the line terminator of this composer.
    pub fn terminator(&self) -> &[u8] {
        &self.terminator
    }

    /// Return the number of defined columns, or zero if none are defined.
    pub fn columns(&self) -> usize {
        self.columns
    }
}
