use core::fmt;
use core::ops::Range;

/// A set of bytes stored as a lookup table.
///
/// Used for the comment and trim character sets, which are consulted once
/// per byte or once per field boundary.
#[derive(Clone)]
pub(crate) struct ByteSet {
    table: [bool; 256],
    len: usize,
}

impl ByteSet {
    pub(crate) fn new(bytes: &[u8]) -> ByteSet {
        let mut set = ByteSet { table: [false; 256], len: 0 };
        for &b in bytes {
            if !set.table[b as usize] {
                set.table[b as usize] = true;
                set.len += 1;
            }
        }
        set
    }

    #[inline]
    pub(crate) fn contains(&self, b: u8) -> bool {
        self.table[b as usize]
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Narrow `range` so that it neither starts nor ends with a member of
    /// this set. An all-member range collapses to an empty range at its
    /// start.
    pub(crate) fn trim(&self, buf: &[u8], range: Range<usize>) -> Range<usize> {
        if self.is_empty() {
            return range;
        }
        let (mut start, mut end) = (range.start, range.end);
        while end > start && self.contains(buf[end - 1]) {
            end -= 1;
        }
        while start < end && self.contains(buf[start]) {
            start += 1;
        }
        start..end
    }
}

impl Default for ByteSet {
    fn default() -> ByteSet {
        ByteSet::new(&[])
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let members: Vec<u8> =
            (0..=255u8).filter(|&b| self.contains(b)).collect();
        write!(f, "ByteSet({:?})", bstr::BStr::new(&members))
    }
}
