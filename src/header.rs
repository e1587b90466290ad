//! Post-processing of the `Authorization` header.
//!
//! MKM's parser decodes the header once more than RFC 5849 prescribes, so a
//! percent-encoded signature (`%2B`, `%2F`, `%3D`) never matches on the server
//! side. Every other value is left as the OAuth library encoded it.
use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::OAUTH_SIGNATURE_KEY;

/// Percent-decodes the quoted `oauth_signature` value of `header` once,
/// leaving the rest of the header byte-for-byte untouched.
///
/// A header without a (terminated) `oauth_signature="..."` segment is
/// returned as is.
pub fn decode_signature(header: &str) -> Cow<'_, str> {
    let marker = format!("{}=\"", OAUTH_SIGNATURE_KEY);
    let start = match find_parameter(header, &marker) {
        Some(pos) => pos + marker.len(),
        None => return Cow::Borrowed(header),
    };
    let end = match header[start..].find('"') {
        Some(len) => start + len,
        None => return Cow::Borrowed(header),
    };
    let decoded = percent_decode_str(&header[start..end]).decode_utf8_lossy();
    if decoded == header[start..end] {
        return Cow::Borrowed(header);
    }

    let mut spliced = String::with_capacity(header.len());
    spliced.push_str(&header[..start]);
    spliced.push_str(&decoded);
    spliced.push_str(&header[end..]);
    Cow::Owned(spliced)
}

// `marker` only counts at the start of a parameter, so a realm or value that
// happens to contain it is skipped.
fn find_parameter(header: &str, marker: &str) -> Option<usize> {
    header
        .match_indices(marker)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let before = header[..pos].trim_end();
            before.ends_with(',') || before.ends_with("OAuth")
        })
}
