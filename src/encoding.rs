use crate::compat::{String, ToString};
use crate::unicode::percent_encode::{encode_set_contains, push_percent_encoded_byte};
use encoding_rs::EncoderResult;
use percent_encoding::AsciiSet;

/// An output encoding for query strings.
///
/// Wraps an Encoding Standard encoding. Labels resolve to their output
/// encoding, so UTF-16 and `replacement` labels yield UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding(&'static encoding_rs::Encoding);

impl Default for Encoding {
    fn default() -> Self {
        Self::UTF_8
    }
}

impl Encoding {
    pub const UTF_8: Self = Self(encoding_rs::UTF_8);
    pub const WINDOWS_1252: Self = Self(encoding_rs::WINDOWS_1252);

    /// Resolve an Encoding Standard label (ASCII case-insensitive, whitespace trimmed).
    pub fn for_label(label: &str) -> Option<Self> {
        encoding_rs::Encoding::for_label(label.as_bytes())
            .map(|encoding| Self(encoding.output_encoding()))
    }

    /// Resolve an optional override label, falling back to UTF-8.
    pub fn from_override(label: Option<&str>) -> Self {
        match label {
            None => Self::UTF_8,
            Some(label) => Self::for_label(label).unwrap_or_else(|| {
                log::warn!("unknown encoding label {label:?}, using UTF-8");
                Self::UTF_8
            }),
        }
    }

    pub fn name(self) -> &'static str {
        self.0.name()
    }

    pub fn is_utf8(self) -> bool {
        self == Self::UTF_8
    }
}

fn push_bytes(output: &mut String, bytes: &[u8], encode_set: &'static AsciiSet, space_as_plus: bool) {
    for &byte in bytes {
        if space_as_plus && byte == b' ' {
            output.push('+');
        } else if encode_set_contains(encode_set, byte) {
            push_percent_encoded_byte(output, byte);
        } else {
            output.push(byte as char);
        }
    }
}

/// Percent-encode after encoding: convert `input` to `encoding`, then
/// percent-encode every byte in `encode_set`.
///
/// A code point the encoding cannot represent becomes the escaped numeric
/// character reference `%26%23<decimal>%3B`. With `space_as_plus`, 0x20 is
/// written as `+`.
pub fn percent_encode_after_encoding(
    encoding: Encoding,
    input: &str,
    encode_set: &'static AsciiSet,
    space_as_plus: bool,
) -> String {
    let mut output = String::with_capacity(input.len());
    if encoding.is_utf8() {
        push_bytes(&mut output, input.as_bytes(), encode_set, space_as_plus);
        return output;
    }

    let mut encoder = encoding.0.new_encoder();
    let mut buffer = [0u8; 64];
    let mut remaining = input;
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut buffer, true);
        push_bytes(&mut output, &buffer[..written], encode_set, space_as_plus);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(c) => {
                output.push_str("%26%23");
                output.push_str(&(c as u32).to_string());
                output.push_str("%3B");
            }
        }
    }

    output
}
