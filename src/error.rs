use std::error;
use std::fmt;
use std::io;
use std::result;

/// A type alias for `Result<T, csvfeed::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when parsing or composing CSV data.
///
/// Malformed CSV input is never an error: the parser always finds *a*
/// parse. Errors come from I/O, from misconfiguring a [`Composer`], or from
/// feeding a composer a row of the wrong length.
///
/// Row and line handlers return their own error type. For composer line
/// handlers, that type must be constructible from this one, so `Error`
/// itself (which converts from `io::Error`) is a convenient choice when
/// the handler writes to an `io::Write`.
///
/// [`Composer`]: crate::Composer
#[derive(Debug)]
pub enum Error {
    /// An I/O error that occurred while reading or writing CSV data.
    Io(io::Error),
    /// Columns were defined on a composer that already had a column
    /// definition. Call `clear` first.
    ColumnsDefined {
        /// The number of columns of the existing definition.
        columns: usize,
    },
    /// A column definition with zero columns was requested.
    NoColumns,
    /// A forced quote column index is outside of `1..=columns`.
    QuoteIndex {
        /// The offending 1-based index.
        index: usize,
        /// The number of columns being defined.
        columns: usize,
    },
    /// A row was fed to a composer before its columns were defined.
    ColumnsUndefined,
    /// A row fed to a composer does not have the defined number of
    /// fields.
    UnequalLengths {
        /// The number of defined columns.
        expected_len: usize,
        /// The number of fields in the rejected row.
        len: usize,
    },
}

impl Error {
    /// Returns true if this is an I/O error.
    pub fn is_io(&self) -> bool {
        match *self {
            Error::Io(_) => true,
            _ => false,
        }
    }

    /// Returns true if this error was caused by an invalid column
    /// definition.
    pub fn is_config(&self) -> bool {
        match *self {
            Error::ColumnsDefined { .. }
            | Error::NoColumns
            | Error::QuoteIndex { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this error was caused by a row that does not match
    /// the column definition.
    pub fn is_row_shape(&self) -> bool {
        match *self {
            Error::ColumnsUndefined | Error::UnequalLengths { .. } => true,
            _ => false,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::ColumnsDefined { columns } => write!(
                f,
                "CSV compose error: {} columns are already defined",
                columns
            ),
            Error::NoColumns => {
                write!(f, "CSV compose error: at least one column is required")
            }
            Error::QuoteIndex { index, columns } => write!(
                f,
                "CSV compose error: forced quote column {} is out of range \
                 (use 1 to {})",
                index, columns
            ),
            Error::ColumnsUndefined => write!(
                f,
                "CSV compose error: columns must be defined before feeding rows"
            ),
            Error::UnequalLengths { expected_len, len } => write!(
                f,
                "CSV compose error: found row with {} fields, but {} columns \
                 are defined",
                len, expected_len
            ),
        }
    }
}
