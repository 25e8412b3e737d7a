use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// The set of characters escaped in a URI component, as in ECMAScript's
/// `encodeURIComponent`.
///
/// Every code point is percent-encoded except the ASCII alphanumerics and
/// `-`, `_`, `.`, `!`, `~`, `*`, `'`, `(` and `)`. In particular the
/// structural characters of the format (`&`, `=`, `|`) are always escaped
/// inside keys and values, while `_` is left alone so nested keys stay
/// readable.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Like `URI_COMPONENT_SET`, but leaves spaces for the caller to turn
/// into `+`.
const FORM_SET: &AsciiSet = &URI_COMPONENT_SET.remove(b' ');

/// The array delimiter `|`, encoded.
pub const ENCODED_ARRAY_DELIMITER: &[u8] = b"%7C";

/// Encodes bytes for use as a key or value, applying percent-encoding as
/// needed.
///
/// ## URI-component encoding (default)
/// Spaces are percent-encoded as `%20`.
///
/// ## Form encoding
/// Spaces are written as `+` for readability, and a literal `+` is
/// percent-encoded.
///
/// The function returns an iterator to avoid allocations when no encoding is needed.
pub fn encode(b: &[u8], use_form_encoding: bool) -> impl Iterator<Item = Cow<'_, [u8]>> + '_ {
    let set = if use_form_encoding {
        FORM_SET
    } else {
        URI_COMPONENT_SET
    };
    percent_encoding::percent_encode(b, set).map(move |s| {
        if use_form_encoding && s.as_bytes().contains(&b' ') {
            Cow::Owned(
                s.as_bytes()
                    .iter()
                    .map(|b| if *b == b' ' { b'+' } else { *b })
                    .collect(),
            )
        } else {
            Cow::Borrowed(s.as_bytes())
        }
    })
}
