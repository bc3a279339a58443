use core::fmt;
use core::ops::{self, Range};

use bstr::BStr;

/// A single parsed CSV record, borrowed from the parser's record buffer.
///
/// A `Record` only lives for the duration of one row handler call: the
/// parser reuses its buffer for the next record as soon as the handler
/// returns. Use [`Record::to_vec`] to keep the fields around.
///
/// Fields are raw bytes. No encoding is assumed or validated.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    buf: &'a [u8],
    fields: &'a [Range<usize>],
}

impl<'a> Record<'a> {
    pub(crate) fn new(buf: &'a [u8], fields: &'a [Range<usize>]) -> Record<'a> {
        Record { buf, fields }
    }

    /// Return the field at index `i`.
    ///
    /// If no field at index `i` exists, then this returns `None`.
    pub fn get(&self, i: usize) -> Option<&'a [u8]> {
        self.fields.get(i).map(|range| &self.buf[range.clone()])
    }

    /// Returns true if and only if this record has no fields.
    ///
    /// Records handed to a row handler always have at least one field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns an iterator over all fields in this record.
    pub fn iter(&self) -> RecordIter<'a> {
        RecordIter { buf: self.buf, fields: self.fields.iter() }
    }

    /// Copy every field into an owned buffer.
    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.iter().map(|field| field.to_vec()).collect()
    }
}

impl<'a> ops::Index<usize> for Record<'a> {
    type Output = [u8];

    fn index(&self, i: usize) -> &[u8] {
        match self.get(i) {
            Some(field) => field,
            None => panic!(
                "field index {} out of bounds for record with {} fields",
                i,
                self.len()
            ),
        }
    }
}

impl<'a> IntoIterator for Record<'a> {
    type IntoIter = RecordIter<'a>;
    type Item = &'a [u8];

    fn into_iter(self) -> RecordIter<'a> {
        self.iter()
    }
}

impl<'r, 'a> IntoIterator for &'r Record<'a> {
    type IntoIter = RecordIter<'a>;
    type Item = &'a [u8];

    fn into_iter(self) -> RecordIter<'a> {
        self.iter()
    }
}

impl<'a> fmt::Debug for Record<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter().map(BStr::new)).finish()
    }
}

/// An iterator over the fields of a [`Record`].
#[derive(Clone)]
pub struct RecordIter<'a> {
    buf: &'a [u8],
    fields: core::slice::Iter<'a, Range<usize>>,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        self.fields.next().map(|range| &self.buf[range.clone()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fields.size_hint()
    }
}

impl<'a> DoubleEndedIterator for RecordIter<'a> {
    fn next_back(&mut self) -> Option<&'a [u8]> {
        self.fields.next_back().map(|range| &self.buf[range.clone()])
    }
}

impl<'a> ExactSizeIterator for RecordIter<'a> {}
