use crate::compat::String;
use crate::host::Host;
use crate::path::UrlPath;
use crate::scheme::get_scheme_type;
use crate::types::SchemeType;
use core::fmt::Write;

/// A parsed URL as a set of components, serialized by [`UrlRecord::serialize`].
///
/// Records are built by [`basic_url_parse`](crate::basic_url_parse) and only
/// change through another parse pass. A record never holds a port equal to
/// its scheme's default port, and its path is opaque exactly when it cannot
/// be a base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UrlRecord {
    pub(crate) scheme: String,
    pub(crate) scheme_type: SchemeType,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) host: Host,
    pub(crate) port: Option<u16>,
    pub(crate) path: UrlPath,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl UrlRecord {
    /// Lowercase scheme, without the trailing `:`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn scheme_type(&self) -> SchemeType {
        self.scheme_type
    }

    /// One of `ftp`, `file`, `http`, `https`, `ws`, `wss`
    pub fn is_special(&self) -> bool {
        self.scheme_type.is_special()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `None` when no password was given; never `Some("")`.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Explicit port, or the scheme's default port
    pub fn port_or_default(&self) -> Option<u16> {
        self.port.or_else(|| self.scheme_type.default_port())
    }

    pub fn path(&self) -> &UrlPath {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn cannot_be_a_base_url(&self) -> bool {
        self.path.is_opaque()
    }

    pub fn includes_credentials(&self) -> bool {
        !self.username.is_empty() || self.password.is_some()
    }

    /// Credentials and port require a non-empty host and a non-`file` scheme.
    pub fn cannot_have_username_password_port(&self) -> bool {
        self.host.is_null() || self.host.is_empty() || self.scheme_type == SchemeType::File
    }

    /// Serialize the record, optionally without its fragment.
    pub fn serialize(&self, exclude_fragment: bool) -> String {
        let mut output = String::with_capacity(self.scheme.len() + 16);
        // Writing into a String cannot fail
        let _ = self.write_to(&mut output, exclude_fragment);
        output
    }

    pub(crate) fn set_scheme(&mut self, scheme: String) {
        self.scheme_type = get_scheme_type(&scheme);
        self.scheme = scheme;
        if self.port.is_some() && self.port == self.scheme_type.default_port() {
            self.port = None;
        }
    }

    /// Set the port, dropping it when it is the scheme's default.
    pub(crate) fn set_port(&mut self, port: Option<u16>) {
        self.port = port.filter(|&port| Some(port) != self.scheme_type.default_port());
    }

    /// Password as entered; the empty string means no password.
    pub(crate) fn set_password(&mut self, password: String) {
        self.password = (!password.is_empty()).then_some(password);
    }

    /// A null-host path starting with an empty segment is written as
    /// `/.//...` so it does not read back as an authority.
    pub(crate) fn needs_path_marker(&self) -> bool {
        self.host.is_null()
            && self.scheme_type != SchemeType::File
            && matches!(&self.path, UrlPath::List(segments) if segments.len() > 1 && segments[0].is_empty())
    }

    fn write_to<W: Write>(&self, out: &mut W, exclude_fragment: bool) -> core::fmt::Result {
        out.write_str(&self.scheme)?;
        out.write_char(':')?;

        if self.host.is_null() {
            if self.scheme_type == SchemeType::File {
                out.write_str("//")?;
            } else if self.needs_path_marker() {
                out.write_str("/.")?;
            }
        } else {
            out.write_str("//")?;
            if self.includes_credentials() {
                out.write_str(&self.username)?;
                if let Some(password) = &self.password {
                    out.write_char(':')?;
                    out.write_str(password)?;
                }
                out.write_char('@')?;
            }
            write!(out, "{}", self.host)?;
            if let Some(port) = self.port {
                write!(out, ":{port}")?;
            }
        }

        write!(out, "{}", self.path)?;

        if let Some(query) = &self.query {
            out.write_char('?')?;
            out.write_str(query)?;
        }
        if !exclude_fragment && let Some(fragment) = &self.fragment {
            out.write_char('#')?;
            out.write_str(fragment)?;
        }
        Ok(())
    }
}

impl core::fmt::Display for UrlRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.write_to(f, false)
    }
}

/// Serialize a URL record, optionally without its fragment.
pub fn serialize(record: &UrlRecord, exclude_fragment: bool) -> String {
    record.serialize(exclude_fragment)
}
