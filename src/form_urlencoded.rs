use crate::compat::{Cow, String, Vec};
use crate::encoding::{Encoding, percent_encode_after_encoding};
use crate::unicode::percent_encode::{
    FORM_URLENCODED_SET, percent_decode_bytes, utf8_decode_without_bom,
};

/// Parse an `application/x-www-form-urlencoded` byte string.
///
/// Split `input` on `&`, then each sequence on its first `=`, and decode
/// both halves. Empty sequences are skipped; a sequence without `=` has an
/// empty value.
pub fn parse(input: &[u8]) -> Vec<(String, String)> {
    input
        .split(|&byte| byte == b'&')
        .filter(|sequence| !sequence.is_empty())
        .map(|sequence| {
            let (name, value) = match memchr::memchr(b'=', sequence) {
                Some(position) => (&sequence[..position], &sequence[position + 1..]),
                None => (sequence, &[][..]),
            };
            (decode(name), decode(value))
        })
        .collect()
}

/// `+` becomes a space before percent-decoding and UTF-8 decoding.
fn decode(bytes: &[u8]) -> String {
    let bytes: Cow<'_, [u8]> = if memchr::memchr(b'+', bytes).is_some() {
        Cow::Owned(
            bytes
                .iter()
                .map(|&byte| if byte == b'+' { b' ' } else { byte })
                .collect(),
        )
    } else {
        Cow::Borrowed(bytes)
    };
    utf8_decode_without_bom(percent_decode_bytes(&bytes).into_owned())
}

/// Serialize name-value pairs joined by `&`, with spaces as `+`.
///
/// Names and values are encoded with `encoding` first; code points it cannot
/// represent become numeric character references.
pub fn serialize<I, K, V>(pairs: I, encoding: Encoding) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut output = String::new();
    for (name, value) in pairs {
        if !output.is_empty() {
            output.push('&');
        }
        output.push_str(&percent_encode_after_encoding(
            encoding,
            name.as_ref(),
            FORM_URLENCODED_SET,
            true,
        ));
        output.push('=');
        output.push_str(&percent_encode_after_encoding(
            encoding,
            value.as_ref(),
            FORM_URLENCODED_SET,
            true,
        ));
    }
    output
}
