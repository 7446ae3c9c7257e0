use crate::character_sets::{
    is_forbidden_domain_code_point, is_forbidden_host_code_point, is_url_code_point,
};
use crate::compat::{String, ToString};
use crate::error::{ParseError, Result};
use crate::ipv4::{Ipv4Error, parse_ipv4_reporting, serialize_ipv4};
use crate::ipv6::{parse_ipv6_reporting, serialize_ipv6};
use crate::unicode::idna::{IdnaFlags, domain_to_ascii};
use crate::unicode::percent_encode::{C0_CONTROL_SET, percent_decode_lossy, percent_encode_into};
use crate::validation::{Reporter, ValidationError};

/// The host component of a URL record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Host {
    /// ASCII domain, lowercased and IDNA-processed
    Domain(String),
    /// IPv4 address as a 32-bit number
    Ipv4(u32),
    /// IPv6 address as eight 16-bit pieces
    Ipv6([u16; 8]),
    /// Percent-encoded host of a non-special URL
    Opaque(String),
    /// No host
    #[default]
    Null,
}

impl Host {
    /// Parse a host string.
    ///
    /// `is_not_special` selects the opaque-host grammar used by non-special
    /// schemes.
    ///
    /// # Errors
    ///
    /// Fails on an unterminated or malformed IPv6 literal, a forbidden code
    /// point, IDNA rejection, or an IPv4-shaped host with an out-of-range part.
    pub fn parse(input: &str, is_not_special: bool) -> Result<Self> {
        parse_host(input, is_not_special, &mut Reporter::silent())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A domain or opaque host that is the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Domain(s) | Self::Opaque(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl core::fmt::Display for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Domain(domain) => f.write_str(domain),
            Self::Opaque(host) => f.write_str(host),
            Self::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Self::Ipv6(pieces) => write!(f, "[{}]", serialize_ipv6(pieces)),
            Self::Null => Ok(()),
        }
    }
}

/// Host parser.
///
/// A host is recognized as one of four shapes:
/// - `[...]` literals are IPv6 addresses
/// - hosts of non-special URLs are opaque strings
/// - hosts of special URLs are domains after IDNA processing, unless the
///   domain reads as an IPv4 address
pub(crate) fn parse_host(
    input: &str,
    is_not_special: bool,
    reporter: &mut Reporter<'_>,
) -> Result<Host> {
    if let Some(inner) = input.strip_prefix('[') {
        let Some(address) = inner.strip_suffix(']') else {
            reporter.report(ValidationError::Ipv6Unclosed);
            log::debug!("unterminated IPv6 literal in host {input:?}");
            return Err(ParseError::InvalidIpv6);
        };
        return parse_ipv6_reporting(address, reporter).map(Host::Ipv6);
    }

    if is_not_special {
        return parse_opaque_host(input, reporter).map(Host::Opaque);
    }

    // Special hosts are domains: percent-decode, then IDNA
    let domain = percent_decode_lossy(input);

    let ascii_domain = match domain_to_ascii(&domain, IdnaFlags::URL) {
        Ok(ascii) if !ascii.is_empty() => ascii,
        Ok(_) | Err(_) => {
            reporter.report(ValidationError::DomainToAscii);
            log::debug!("domain to ASCII failed for host {input:?}");
            return Err(ParseError::IdnaError);
        }
    };

    if ascii_domain.chars().any(is_forbidden_domain_code_point) {
        reporter.report(ValidationError::DomainInvalidCodePoint);
        log::debug!("forbidden domain code point in host {ascii_domain:?}");
        return Err(ParseError::InvalidDomainCharacter);
    }

    match parse_ipv4_reporting(&ascii_domain, reporter) {
        Ok(address) => Ok(Host::Ipv4(address)),
        Err(Ipv4Error::NotAnIpv4Address) => Ok(Host::Domain(ascii_domain)),
        Err(Ipv4Error::Malformed) => {
            log::debug!("IPv4 host {ascii_domain:?} out of range");
            Err(ParseError::InvalidIpv4)
        }
    }
}

/// Opaque-host parser: validate, then encode with the C0 control set.
fn parse_opaque_host(input: &str, reporter: &mut Reporter<'_>) -> Result<String> {
    if input.chars().any(is_forbidden_host_code_point) {
        reporter.report(ValidationError::HostInvalidCodePoint);
        log::debug!("forbidden host code point in opaque host {input:?}");
        return Err(ParseError::InvalidHost);
    }

    let bytes = input.as_bytes();
    for (i, c) in input.char_indices() {
        if c == '%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                reporter.report(ValidationError::InvalidUrlUnit);
            }
        } else if !is_url_code_point(c) {
            reporter.report(ValidationError::InvalidUrlUnit);
        }
    }

    if input.is_ascii() && !input.bytes().any(|b| b.is_ascii_control()) {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    percent_encode_into(&mut output, input, C0_CONTROL_SET);
    Ok(output)
}
