use std::borrow::Cow;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u32> {
    char::from(c).to_digit(16)
}

/// Decodes a key or value taken from the querystring:
/// - Decodes percent-encoded bytes
/// - Replaces `+` with a space, but only if `plus_as_space` is set
///
/// A `%` that is not followed by two hex digits is kept as-is.
///
/// Borrows the input when there is nothing to decode.
pub fn decode(input: &[u8], plus_as_space: bool) -> Cow<'_, [u8]> {
    if !input
        .iter()
        .any(|&b| b == b'%' || (plus_as_space && b == b'+'))
    {
        return Cow::Borrowed(input);
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut last_segment = 0;
    let mut idx = 0;

    while idx < input.len() {
        let b = input[idx];
        if plus_as_space && b == b'+' {
            decoded.extend_from_slice(&input[last_segment..idx]);
            decoded.push(b' ');
            idx += 1;
            last_segment = idx;
        } else if b == b'%' {
            let hex = input.get(idx + 1).copied().and_then(char_to_digit).zip(
                input.get(idx + 2).copied().and_then(char_to_digit),
            );
            let Some((h, l)) = hex else {
                // not an escape, leave the `%` in place
                idx += 1;
                continue;
            };
            decoded.extend_from_slice(&input[last_segment..idx]);
            decoded.push(h as u8 * 0x10 + l as u8);
            idx += 3;
            last_segment = idx;
        } else {
            idx += 1;
        }
    }

    decoded.extend_from_slice(&input[last_segment..]);
    Cow::Owned(decoded)
}

#[cfg(test)]
mod test {
    use super::decode;

    use pretty_assertions::assert_eq;

    #[test]
    fn borrows_plain_input() {
        assert!(matches!(
            decode(b"filters_toyline", false),
            std::borrow::Cow::Borrowed(_)
        ));
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(&*decode(b"Walmart%7CDollar%20Store", false), b"Walmart|Dollar Store");
        assert_eq!(&*decode(b"%E4%BD%A0", false), "你".as_bytes());
    }

    #[test]
    fn plus_only_in_form_mode() {
        assert_eq!(&*decode(b"a+b", false), b"a+b");
        assert_eq!(&*decode(b"a+b", true), b"a b");
    }

    #[test]
    fn keeps_malformed_escapes() {
        assert_eq!(&*decode(b"100%", false), b"100%");
        assert_eq!(&*decode(b"%zz%41", false), b"%zzA");
        assert_eq!(&*decode(b"%4", false), b"%4");
    }
}
