/// Errors that abort a URL parse.
///
/// A failure never carries a partial record: the caller gets either a
/// complete [`UrlRecord`](crate::UrlRecord) or one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid scheme, or a scheme-state override fed a non-scheme
    InvalidScheme,
    /// Relative URL without a usable base
    RelativeUrlWithoutBase,
    /// Empty host where one is required
    MissingHost,
    /// Forbidden host code point in an opaque or bracketed host
    InvalidHost,
    /// Forbidden domain code point after IDNA processing
    InvalidDomainCharacter,
    /// IDNA processing error
    IdnaError,
    /// Invalid IPv4 address
    InvalidIpv4,
    /// Invalid IPv6 address
    InvalidIpv6,
    /// Invalid port number
    InvalidPort,
    /// Structural path operation attempted on an opaque path
    OpaquePath,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "Invalid scheme",
            Self::RelativeUrlWithoutBase => "Relative URL without base",
            Self::MissingHost => "Missing host",
            Self::InvalidHost => "Invalid host",
            Self::InvalidDomainCharacter => "Invalid domain character",
            Self::IdnaError => "IDNA processing error",
            Self::InvalidIpv4 => "Invalid IPv4 address",
            Self::InvalidIpv6 => "Invalid IPv6 address",
            Self::InvalidPort => "Invalid port",
            Self::OpaquePath => "Path of a cannot-be-a-base URL is opaque",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Illegal structural operation on a [`UrlPath`](crate::UrlPath).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// `push` or `shorten` called on an opaque path
    OpaquePath,
    /// Opaque-string append called on a segment list
    NotOpaque,
}

impl core::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OpaquePath => f.write_str("cannot push or shorten an opaque path"),
            Self::NotOpaque => f.write_str("cannot append to a segment list as an opaque path"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathError {}

impl From<PathError> for ParseError {
    fn from(_: PathError) -> Self {
        Self::OpaquePath
    }
}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
