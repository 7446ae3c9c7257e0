/// IPv6 address parsing and serialization
/// Follows the WHATWG URL Standard
use crate::compat::String;
use crate::error::{ParseError, Result};
use crate::validation::{Reporter, ValidationError};
use core::fmt::Write;

/// Parse the text between the brackets of an IPv6 literal (e.g. "`::1`" or
/// "`2001:db8::1`") into its 8 pieces.
///
/// # Errors
///
/// Returns [`ParseError::InvalidIpv6`] if the input does not match the
/// IPv6 address grammar, including an embedded IPv4 tail.
pub fn parse_ipv6(input: &str) -> Result<[u16; 8]> {
    parse_ipv6_reporting(input, &mut Reporter::silent())
}

pub(crate) fn parse_ipv6_reporting(input: &str, reporter: &mut Reporter<'_>) -> Result<[u16; 8]> {
    Ipv6Parser {
        input: input.as_bytes(),
        pointer: 0,
        reporter,
    }
    .run()
}

struct Ipv6Parser<'i, 'r, 's> {
    input: &'i [u8],
    pointer: usize,
    reporter: &'r mut Reporter<'s>,
}

impl Ipv6Parser<'_, '_, '_> {
    /// Byte under the pointer; `None` is EOF. Non-ASCII bytes never match
    /// anything the grammar accepts.
    fn c(&self) -> Option<u8> {
        self.input.get(self.pointer).copied()
    }

    fn fail(&mut self, error: ValidationError) -> Result<[u16; 8]> {
        self.reporter.report(error);
        Err(ParseError::InvalidIpv6)
    }

    fn run(mut self) -> Result<[u16; 8]> {
        let mut address = [0u16; 8];
        let mut piece_index = 0usize;
        let mut compress: Option<usize> = None;

        if self.c() == Some(b':') {
            if self.input.get(1) != Some(&b':') {
                return self.fail(ValidationError::Ipv6InvalidCompression);
            }
            self.pointer += 2;
            piece_index += 1;
            compress = Some(piece_index);
        }

        while let Some(c) = self.c() {
            if piece_index == 8 {
                return self.fail(ValidationError::Ipv6TooManyPieces);
            }

            if c == b':' {
                if compress.is_some() {
                    return self.fail(ValidationError::Ipv6MultipleCompression);
                }
                self.pointer += 1;
                piece_index += 1;
                compress = Some(piece_index);
                continue;
            }

            let mut value: u16 = 0;
            let mut length = 0usize;
            while length < 4 {
                let Some(digit) = self.c().and_then(|c| char::from(c).to_digit(16)) else {
                    break;
                };
                value = value * 0x10 + digit as u16;
                self.pointer += 1;
                length += 1;
            }

            match self.c() {
                Some(b'.') => {
                    if length == 0 {
                        return self.fail(ValidationError::Ipv4InIpv6InvalidCodePoint);
                    }
                    self.pointer -= length;
                    if piece_index > 6 {
                        return self.fail(ValidationError::Ipv4InIpv6TooManyPieces);
                    }
                    return self.ipv4_tail(address, piece_index, compress);
                }
                Some(b':') => {
                    self.pointer += 1;
                    if self.c().is_none() {
                        return self.fail(ValidationError::Ipv6InvalidCodePoint);
                    }
                }
                Some(_) => return self.fail(ValidationError::Ipv6InvalidCodePoint),
                None => {}
            }

            address[piece_index] = value;
            piece_index += 1;
        }

        Self::finish(address, piece_index, compress).map_err(|error| {
            self.reporter.report(ValidationError::Ipv6TooFewPieces);
            error
        })
    }

    /// Dotted-decimal tail packed two octets per piece.
    fn ipv4_tail(
        mut self,
        mut address: [u16; 8],
        mut piece_index: usize,
        compress: Option<usize>,
    ) -> Result<[u16; 8]> {
        let mut numbers_seen = 0;

        while self.c().is_some() {
            if numbers_seen > 0 {
                if self.c() == Some(b'.') && numbers_seen < 4 {
                    self.pointer += 1;
                } else {
                    return self.fail(ValidationError::Ipv4InIpv6InvalidCodePoint);
                }
            }

            if !self.c().is_some_and(|c| c.is_ascii_digit()) {
                return self.fail(ValidationError::Ipv4InIpv6InvalidCodePoint);
            }

            let mut ipv4_piece: Option<u16> = None;
            while let Some(c) = self.c().filter(u8::is_ascii_digit) {
                let number = u16::from(c - b'0');
                ipv4_piece = match ipv4_piece {
                    None => Some(number),
                    // Leading zeros are not allowed
                    Some(0) => return self.fail(ValidationError::Ipv4InIpv6InvalidCodePoint),
                    Some(piece) => Some(piece * 10 + number),
                };
                if ipv4_piece.is_some_and(|piece| piece > 255) {
                    return self.fail(ValidationError::Ipv4InIpv6OutOfRangePart);
                }
                self.pointer += 1;
            }

            address[piece_index] = address[piece_index] * 0x100 + ipv4_piece.unwrap_or(0);
            numbers_seen += 1;
            if numbers_seen == 2 || numbers_seen == 4 {
                piece_index += 1;
            }
        }

        if numbers_seen != 4 {
            return self.fail(ValidationError::Ipv4InIpv6TooFewParts);
        }

        Self::finish(address, piece_index, compress).map_err(|error| {
            self.reporter.report(ValidationError::Ipv6TooFewPieces);
            error
        })
    }

    /// Move the pieces after the compression marker to the end.
    fn finish(
        mut address: [u16; 8],
        piece_index: usize,
        compress: Option<usize>,
    ) -> Result<[u16; 8]> {
        match compress {
            Some(compress) => {
                let mut swaps = piece_index - compress;
                let mut index = 7;
                while index != 0 && swaps > 0 {
                    address.swap(index, compress + swaps - 1);
                    index -= 1;
                    swaps -= 1;
                }
                Ok(address)
            }
            None if piece_index != 8 => Err(ParseError::InvalidIpv6),
            None => Ok(address),
        }
    }
}

/// Serialize IPv6 pieces with zero-run compression, without brackets.
pub fn serialize_ipv6(segments: &[u16; 8]) -> String {
    // Find longest sequence of zeros for compression
    let (compress_start, compress_len) = find_longest_zero_sequence(segments);

    // Only compress sequences of 2+ zeros
    let compress = compress_start.filter(|_| compress_len > 1);

    let mut result = String::with_capacity(39);
    let mut ignore_zero = false;

    for (i, &piece) in segments.iter().enumerate() {
        if ignore_zero && piece == 0 {
            continue;
        }
        ignore_zero = false;

        if compress == Some(i) {
            result.push_str(if i == 0 { "::" } else { ":" });
            ignore_zero = true;
            continue;
        }

        let _ = write!(&mut result, "{piece:x}");
        if i != 7 {
            result.push(':');
        }
    }

    result
}

/// Find the first longest sequence of consecutive zeros in IPv6 segments.
fn find_longest_zero_sequence(segments: &[u16; 8]) -> (Option<usize>, usize) {
    let mut best_start: Option<usize> = None;
    let mut best_len = 0;
    let mut current_start: Option<usize> = None;
    let mut current_len = 0;

    for (i, &segment) in segments.iter().enumerate() {
        if segment == 0 {
            if current_start.is_none() {
                current_start = Some(i);
                current_len = 1;
            } else {
                current_len += 1;
            }
            if current_len > best_len {
                best_start = current_start;
                best_len = current_len;
            }
        } else {
            current_start = None;
            current_len = 0;
        }
    }

    (best_start, best_len)
}
