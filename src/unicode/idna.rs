use crate::compat::{Cow, String};
use crate::error::{ParseError, Result};
use idna::AsciiDenyList;
use idna::uts46::{DnsLength, Hyphens, Uts46};

/// Options for the UTS #46 `ToASCII` step.
///
/// Bidi and joiner checks are always performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdnaFlags {
    /// Reject ASCII outside letters, digits and `-` (`UseSTD3ASCIIRules`)
    pub use_std3_ascii_rules: bool,
    /// Reject hyphens in the third/fourth position and at label edges (`CheckHyphens`)
    pub check_hyphens: bool,
    /// Enforce label and domain length limits (`VerifyDnsLength`)
    pub verify_dns_length: bool,
}

impl IdnaFlags {
    /// Lenient profile used by the host parser
    pub const URL: Self = Self {
        use_std3_ascii_rules: false,
        check_hyphens: false,
        verify_dns_length: false,
    };

    /// Conformance-checker profile
    pub const STRICT: Self = Self {
        use_std3_ascii_rules: true,
        check_hyphens: true,
        verify_dns_length: true,
    };

    fn is_lenient(self) -> bool {
        self == Self::URL
    }
}

impl Default for IdnaFlags {
    fn default() -> Self {
        Self::URL
    }
}

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if domain contains Punycode (xn-- prefix, case insensitive)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }

    if is_punycode_prefix(bytes) {
        return true;
    }

    // Check for .xn-- patterns using memchr for faster scanning
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Process a domain using the IDNA `ToASCII` algorithm.
///
/// The result is never truncated; length limits only apply with
/// `verify_dns_length`.
///
/// # Errors
///
/// Returns [`ParseError::IdnaError`] when UTS #46 processing rejects the domain.
pub fn domain_to_ascii(domain: &str, flags: IdnaFlags) -> Result<String> {
    // Fast path: ASCII without Punycode only needs lowercasing under the
    // lenient profile. Forbidden code points are the caller's concern.
    if flags.is_lenient() && domain.is_ascii() && !has_punycode(domain) {
        return Ok(domain.to_ascii_lowercase());
    }

    let deny_list = if flags.use_std3_ascii_rules {
        AsciiDenyList::STD3
    } else {
        AsciiDenyList::EMPTY
    };
    let hyphens = if flags.check_hyphens {
        Hyphens::Check
    } else {
        Hyphens::Allow
    };
    let dns_length = if flags.verify_dns_length {
        DnsLength::Verify
    } else {
        DnsLength::Ignore
    };

    Uts46::new()
        .to_ascii(domain.as_bytes(), deny_list, hyphens, dns_length)
        .map(Cow::into_owned)
        .map_err(|_| {
            log::debug!("IDNA ToASCII rejected {domain:?}");
            ParseError::IdnaError
        })
}
