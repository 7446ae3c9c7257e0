#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod encoding;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parser;
mod path;
mod record;
mod scheme;
mod stream;
mod types;
mod unicode;
mod url;
mod url_components;
mod url_search_params;
mod validation;

pub mod form_urlencoded;

// Public API
pub use encoding::{Encoding, percent_encode_after_encoding};
pub use error::{ParseError, PathError};
pub use host::Host;
pub use ipv4::{Ipv4Error, parse_ipv4, serialize_ipv4};
pub use ipv6::{parse_ipv6, serialize_ipv6};
pub use parser::{ParseOptions, State, basic_url_parse};
pub use path::UrlPath;
pub use record::{UrlRecord, serialize};
pub use types::SchemeType;
pub use unicode::idna::{IdnaFlags, domain_to_ascii};
pub use unicode::percent_encode::{
    C0_CONTROL_SET, COMPONENT_SET, EncodeSet, FORM_URLENCODED_SET, FRAGMENT_SET, PATH_SET,
    QUERY_SET, SPECIAL_QUERY_SET, USERINFO_SET,
};
pub use url::Url;
pub use url_search_params::UrlSearchParams;
pub use validation::{ValidationError, ValidationSink};

pub use error::Result;
