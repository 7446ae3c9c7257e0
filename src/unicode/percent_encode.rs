use crate::compat::{Cow, String, Vec};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode, percent_encode, utf8_percent_encode};

// Encode sets of the WHATWG URL Standard
// Based on https://url.spec.whatwg.org/#percent-encoded-bytes
// Bytes above 0x7E are always encoded by `percent-encoding`; CONTROLS adds
// 0x00..=0x1F and 0x7F.

/// C0 control percent-encode set
pub const C0_CONTROL_SET: &AsciiSet = CONTROLS;

/// Fragment percent-encode set
/// C0 control + space, ", <, >, \`
pub const FRAGMENT_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query percent-encode set (non-special URLs)
/// C0 control + space, ", #, <, >
pub const QUERY_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Special-query percent-encode set (special URLs)
/// Query + '
pub const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Path percent-encode set
/// Query + ?, ^, \`, {, }
pub const PATH_SET: &AsciiSet = &QUERY_SET
    .add(b'?')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Userinfo percent-encode set
/// Path + /, :, ;, =, @, [, \, ], |
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Component percent-encode set
/// Userinfo + $, %, &, +, ,
pub const COMPONENT_SET: &AsciiSet = &USERINFO_SET
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',');

/// `application/x-www-form-urlencoded` percent-encode set
/// Component + !, ', (, ), ~
/// Leaves only ASCII alphanumerics and `*-._` unescaped.
pub const FORM_URLENCODED_SET: &AsciiSet = &COMPONENT_SET
    .add(b'!')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'~');

/// Named encode sets, for callers that pick a set at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSet {
    C0Control,
    Fragment,
    Query,
    SpecialQuery,
    Path,
    Userinfo,
    Component,
    FormUrlencoded,
}

impl EncodeSet {
    pub fn ascii_set(self) -> &'static AsciiSet {
        match self {
            Self::C0Control => C0_CONTROL_SET,
            Self::Fragment => FRAGMENT_SET,
            Self::Query => QUERY_SET,
            Self::SpecialQuery => SPECIAL_QUERY_SET,
            Self::Path => PATH_SET,
            Self::Userinfo => USERINFO_SET,
            Self::Component => COMPONENT_SET,
            Self::FormUrlencoded => FORM_URLENCODED_SET,
        }
    }

    /// True if the byte is escaped by this set
    pub fn contains(self, byte: u8) -> bool {
        encode_set_contains(self.ascii_set(), byte)
    }
}

/// True if `byte` is escaped by `encode_set`. Non-ASCII bytes always are.
pub fn encode_set_contains(encode_set: &'static AsciiSet, byte: u8) -> bool {
    percent_encode(&[byte], encode_set)
        .next()
        .is_some_and(|chunk| chunk.len() == 3)
}

/// UTF-8 percent-encode a single scalar value, appending to `buffer`
pub fn percent_encode_char_into(buffer: &mut String, c: char, encode_set: &'static AsciiSet) {
    let mut utf8 = [0u8; 4];
    for chunk in utf8_percent_encode(c.encode_utf8(&mut utf8), encode_set) {
        buffer.push_str(chunk);
    }
}

/// Write percent-encoded string directly to buffer
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    // Reserve space to reduce reallocations
    buffer.reserve(input.len());

    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a string using the provided encode set
pub fn percent_encode_with_set<'a>(input: &'a str, encode_set: &'static AsciiSet) -> Cow<'a, str> {
    utf8_percent_encode(input, encode_set).into()
}

/// Append `%XX` with uppercase hex digits
pub fn push_percent_encoded_byte(buffer: &mut String, byte: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    buffer.push('%');
    buffer.push(HEX[usize::from(byte >> 4)] as char);
    buffer.push(HEX[usize::from(byte & 0x0F)] as char);
}

/// Percent-decode into raw bytes. Malformed escapes are kept literally.
pub fn percent_decode_bytes(input: &[u8]) -> Cow<'_, [u8]> {
    percent_decode(input).into()
}

/// Percent-decode, then UTF-8 decode without BOM, replacing invalid sequences.
pub fn percent_decode_lossy(input: &str) -> Cow<'_, str> {
    match percent_decode_bytes(input.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(input),
        Cow::Owned(bytes) => Cow::Owned(utf8_decode_without_bom(bytes)),
    }
}

/// UTF-8 decode without BOM, replacing invalid sequences with U+FFFD
pub fn utf8_decode_without_bom(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(decoded) => decoded,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
