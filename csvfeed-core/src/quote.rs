use memchr::memchr;

/// Append `field` to `out` enclosed in `"`, doubling every `"` inside it.
///
/// This always quotes, regardless of the field's contents.
pub fn quote_into(field: &[u8], out: &mut Vec<u8>) {
    out.reserve(field.len() + 2);
    out.push(b'"');
    let mut rest = field;
    while let Some(i) = memchr(b'"', rest) {
        out.extend_from_slice(&rest[..=i]);
        out.push(b'"');
        rest = &rest[i + 1..];
    }
    out.extend_from_slice(rest);
    out.push(b'"');
}

/// Returns true if `field` must be quoted to survive a round trip through
/// a parser using `delimiter`.
///
/// That is the case when the field starts or ends with a space, or
/// contains the delimiter, a `"`, or any byte outside printable ASCII
/// (`0x20..=0x7E`). Only the space is special at the edges; a leading tab
/// already needs quoting as a control byte. The empty field never needs
/// quoting.
pub fn needs_quotes(field: &[u8], delimiter: u8) -> bool {
    if field.first() == Some(&b' ') || field.last() == Some(&b' ') {
        return true;
    }
    field
        .iter()
        .any(|&b| b < 0x20 || b > 0x7E || b == b'"' || b == delimiter)
}

/// Append `field` to `out`, quoting it only if [`needs_quotes`] says so.
pub fn escape_into(field: &[u8], delimiter: u8, out: &mut Vec<u8>) {
    if needs_quotes(field, delimiter) {
        quote_into(field, out);
    } else {
        out.extend_from_slice(field);
    }
}
