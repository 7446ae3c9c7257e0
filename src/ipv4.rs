/// IPv4 address parser supporting decimal, octal, and hexadecimal notation
/// Follows the WHATWG URL Standard
use crate::compat::{String, Vec, format};
use crate::validation::{Reporter, ValidationError};

/// Why an input did not produce an IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Error {
    /// Not IPv4-shaped; the host parser keeps the input as a domain
    NotAnIpv4Address,
    /// IPv4-shaped but a number is out of range; the parse fails
    Malformed,
}

/// Parse an IPv4 address string into a u32.
/// Supports:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed: 192.0x00A80001
/// - Shortened forms: 127.1, 3232235777
///
/// # Errors
///
/// [`Ipv4Error::NotAnIpv4Address`] when a part is not a number or there are
/// too many parts, [`Ipv4Error::Malformed`] when a number overflows its slot.
pub fn parse_ipv4(input: &str) -> Result<u32, Ipv4Error> {
    parse_ipv4_reporting(input, &mut Reporter::silent())
}

/// Events are only reported when the input is IPv4-shaped, so plain domains
/// stay silent.
pub(crate) fn parse_ipv4_reporting(
    input: &str,
    reporter: &mut Reporter<'_>,
) -> Result<u32, Ipv4Error> {
    let mut pending = Vec::new();
    let result = parse_ipv4_collecting(input, &mut pending);
    if result != Err(Ipv4Error::NotAnIpv4Address) {
        for error in pending {
            reporter.report(error);
        }
    }
    result
}

fn parse_ipv4_collecting(
    input: &str,
    pending: &mut Vec<ValidationError>,
) -> Result<u32, Ipv4Error> {
    let mut parts: Vec<&str> = input.split('.').collect();

    // A single trailing empty part is dropped
    let mut dropped_trailing = false;
    if parts.last().is_some_and(|part| part.is_empty()) {
        pending.push(ValidationError::Ipv4EmptyPart);
        if parts.len() > 1 {
            parts.pop();
            dropped_trailing = true;
        }
    }

    if parts.len() > 4 {
        pending.push(ValidationError::Ipv4TooManyParts);
        if dropped_trailing {
            return Err(Ipv4Error::Malformed);
        }
        return Err(Ipv4Error::NotAnIpv4Address);
    }

    let mut numbers: Vec<u64> = Vec::with_capacity(parts.len());
    let mut non_decimal = false;
    for part in &parts {
        if part.is_empty() {
            return Err(Ipv4Error::NotAnIpv4Address);
        }
        let Some((number, decimal)) = parse_ipv4_number(part) else {
            pending.push(ValidationError::Ipv4NonNumericPart);
            return Err(Ipv4Error::NotAnIpv4Address);
        };
        non_decimal |= !decimal;
        numbers.push(number);
    }

    if non_decimal {
        pending.push(ValidationError::Ipv4NonDecimalPart);
    }

    if numbers.iter().any(|&number| number > 255) {
        pending.push(ValidationError::Ipv4OutOfRangePart);
    }

    // Check that all but the last number are < 256
    let (&last, leading) = numbers.split_last().ok_or(Ipv4Error::NotAnIpv4Address)?;
    if leading.iter().any(|&number| number > 255) {
        return Err(Ipv4Error::Malformed);
    }

    // Validate: last number must be < 256^(5-n)
    let max = 256u64.pow((5 - numbers.len()) as u32);
    if last >= max {
        return Err(Ipv4Error::Malformed);
    }

    // Each of the first (n-1) numbers is one byte from the top; the last
    // number fills the remaining bytes.
    let mut ipv4 = last;
    for (counter, &number) in leading.iter().enumerate() {
        ipv4 += number * 256u64.pow(3 - counter as u32);
    }

    u32::try_from(ipv4).map_err(|_| Ipv4Error::Malformed)
}

/// Parse a single IPv4 number component (supports decimal, hex, octal).
/// Returns the value and whether it was written in decimal. Values beyond
/// `u64` saturate, which still fails every range check.
fn parse_ipv4_number(input: &str) -> Option<(u64, bool)> {
    let (digits, radix) = if let Some(hex_part) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        (hex_part, 16)
    } else if input.len() >= 2 && input.starts_with('0') {
        (&input[1..], 8)
    } else {
        (input, 10)
    };

    // Bare "0x" (or a lone prefix) is zero
    if digits.is_empty() {
        return Some((0, radix == 10));
    }

    let mut value: u64 = 0;
    for c in digits.chars() {
        let digit = c.to_digit(radix)?;
        value = value
            .saturating_mul(u64::from(radix))
            .saturating_add(u64::from(digit));
    }

    Some((value, radix == 10))
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(ipv4: u32) -> String {
    let mut octets = [0u32; 4];
    let mut n = ipv4;
    for octet in octets.iter_mut().rev() {
        *octet = n % 256;
        n /= 256;
    }
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}
