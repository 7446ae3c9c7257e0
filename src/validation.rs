/// Codes for malformed-but-interpretable input.
///
/// A validation event never changes what the parser does. Callers that care
/// can install a [`ValidationSink`]; every event is also forwarded to the
/// `log` facade at trace level.
///
/// Names follow <https://url.spec.whatwg.org/#validation-error>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// Leading or trailing C0 control or space was trimmed from the input.
    LeadingOrTrailingC0ControlOrSpace,
    /// ASCII tab or newline was removed from the input.
    TabOrNewline,
    /// IDNA `ToASCII` rejected the domain.
    DomainToAscii,
    /// The domain contains a forbidden domain code point.
    DomainInvalidCodePoint,
    /// An opaque host contains a forbidden host code point.
    HostInvalidCodePoint,
    /// An IPv4 address ends with a `.`.
    Ipv4EmptyPart,
    /// An IPv4 address has more than four parts.
    Ipv4TooManyParts,
    /// An IPv4 part is not numeric.
    Ipv4NonNumericPart,
    /// An IPv4 part uses hexadecimal or octal notation.
    Ipv4NonDecimalPart,
    /// An IPv4 part exceeds 255.
    Ipv4OutOfRangePart,
    /// An IPv6 address is missing the closing `]`.
    Ipv6Unclosed,
    /// An IPv6 address begins with a single `:`.
    Ipv6InvalidCompression,
    /// An IPv6 address has more than eight pieces.
    Ipv6TooManyPieces,
    /// An IPv6 address is compressed in more than one spot.
    Ipv6MultipleCompression,
    /// An IPv6 address contains an unexpected code point or ends early.
    Ipv6InvalidCodePoint,
    /// An uncompressed IPv6 address has fewer than eight pieces.
    Ipv6TooFewPieces,
    /// An embedded IPv4 address would need more than eight pieces in total.
    Ipv4InIpv6TooManyPieces,
    /// An embedded IPv4 address contains an unexpected code point.
    Ipv4InIpv6InvalidCodePoint,
    /// An embedded IPv4 part exceeds 255.
    Ipv4InIpv6OutOfRangePart,
    /// An embedded IPv4 address has fewer than four parts.
    Ipv4InIpv6TooFewParts,
    /// A code point is not a URL unit, or `%` is not followed by two hex digits.
    InvalidUrlUnit,
    /// A special scheme is not followed by `//`.
    SpecialSchemeMissingFollowingSolidus,
    /// Relative input without a usable base.
    MissingSchemeNonRelativeUrl,
    /// `\` used as a path separator in a special URL.
    InvalidReverseSolidus,
    /// The input includes credentials.
    InvalidCredentials,
    /// A special URL, or a URL with credentials, has an empty host.
    HostMissing,
    /// The port exceeds 65535.
    PortOutOfRange,
    /// The port contains a non-digit.
    PortInvalid,
    /// A relative `file:` input starts with a Windows drive letter.
    FileInvalidWindowsDriveLetter,
    /// A `file:` host is a Windows drive letter.
    FileInvalidWindowsDriveLetterHost,
    /// Empty leading segments were dropped from a `file:` path.
    FileLeadingEmptySegment,
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::LeadingOrTrailingC0ControlOrSpace => "leading or trailing C0 control or space",
            Self::TabOrNewline => "ASCII tab or newline in input",
            Self::DomainToAscii => "domain to ASCII failed",
            Self::DomainInvalidCodePoint => "forbidden domain code point",
            Self::HostInvalidCodePoint => "forbidden host code point",
            Self::Ipv4EmptyPart => "IPv4 address ends with a dot",
            Self::Ipv4TooManyParts => "IPv4 address has too many parts",
            Self::Ipv4NonNumericPart => "IPv4 part is not numeric",
            Self::Ipv4NonDecimalPart => "IPv4 part is not decimal",
            Self::Ipv4OutOfRangePart => "IPv4 part exceeds 255",
            Self::Ipv6Unclosed => "IPv6 address is missing ']'",
            Self::Ipv6InvalidCompression => "IPv6 address begins with a single ':'",
            Self::Ipv6TooManyPieces => "IPv6 address has too many pieces",
            Self::Ipv6MultipleCompression => "IPv6 address is compressed twice",
            Self::Ipv6InvalidCodePoint => "unexpected code point in IPv6 address",
            Self::Ipv6TooFewPieces => "IPv6 address has too few pieces",
            Self::Ipv4InIpv6TooManyPieces => "IPv4-in-IPv6 address has too many pieces",
            Self::Ipv4InIpv6InvalidCodePoint => "unexpected code point in IPv4-in-IPv6 address",
            Self::Ipv4InIpv6OutOfRangePart => "IPv4-in-IPv6 part exceeds 255",
            Self::Ipv4InIpv6TooFewParts => "IPv4-in-IPv6 address has too few parts",
            Self::InvalidUrlUnit => "invalid URL unit",
            Self::SpecialSchemeMissingFollowingSolidus => "special scheme not followed by '//'",
            Self::MissingSchemeNonRelativeUrl => "missing scheme and no usable base",
            Self::InvalidReverseSolidus => "'\\' used as path separator",
            Self::InvalidCredentials => "URL includes credentials",
            Self::HostMissing => "host is missing",
            Self::PortOutOfRange => "port is out of range",
            Self::PortInvalid => "port is not a number",
            Self::FileInvalidWindowsDriveLetter => "relative file URL starts with a drive letter",
            Self::FileInvalidWindowsDriveLetterHost => "file host is a drive letter",
            Self::FileLeadingEmptySegment => "empty leading segment in file path",
        };
        f.write_str(msg)
    }
}

/// Receiver for validation events.
pub trait ValidationSink {
    /// Called once per validation event, in input order.
    fn report(&mut self, error: ValidationError);
}

impl<F> ValidationSink for F
where
    F: FnMut(ValidationError),
{
    fn report(&mut self, error: ValidationError) {
        self(error);
    }
}

/// Per-pass reporter: logs every event and forwards it to the optional sink.
pub(crate) struct Reporter<'s> {
    sink: Option<&'s mut dyn ValidationSink>,
}

impl<'s> Reporter<'s> {
    pub(crate) fn new(sink: Option<&'s mut dyn ValidationSink>) -> Self {
        Self { sink }
    }

    /// Reporter with no sink; events only reach the log.
    pub(crate) fn silent() -> Self {
        Self { sink: None }
    }

    pub(crate) fn report(&mut self, error: ValidationError) {
        log::trace!("URL validation error: {error}");
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.report(error);
        }
    }
}
