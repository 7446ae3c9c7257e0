use crate::compat::{String, ToString, format};
use crate::error::Result;
use crate::helpers::{port_separator, remove_tabs_and_newlines};
use crate::parser::{State, basic_url_parse};
use crate::path::UrlPath;
use crate::record::UrlRecord;
use crate::types::SchemeType;
use crate::unicode::percent_encode::{USERINFO_SET, percent_encode_with_set};
use crate::url_components::UrlComponents;
use crate::url_search_params::UrlSearchParams;

/// A parsed URL with the getters and setters of the WHATWG URL API.
///
/// The record is kept next to its serialization, so every getter is a
/// slice of [`href`](Self::href). Setters reparse a copy of the record with
/// a state override and leave the URL untouched when that fails.
///
/// # Examples
///
/// ```
/// use urlstate::Url;
///
/// let mut url = Url::parse("https://example.com:8080/a/b?q=1#top", None).unwrap();
/// assert_eq!(url.protocol(), "https:");
/// assert_eq!(url.host(), "example.com:8080");
/// assert_eq!(url.pathname(), "/a/b");
///
/// url.set_port("443");
/// assert_eq!(url.href(), "https://example.com/a/b?q=1#top");
/// ```
#[derive(Debug, Clone)]
pub struct Url {
    record: UrlRecord,
    buffer: String,
    components: UrlComponents,
}

impl Url {
    /// Parse `input`, resolving it against `base` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` or `input` is not a valid URL.
    pub fn parse(input: &str, base: Option<&str>) -> Result<Self> {
        let base = base.map(|base| UrlRecord::parse(base, None)).transpose()?;
        UrlRecord::parse(input, base.as_ref()).map(Self::from)
    }

    /// Check if `input` parses against `base`
    ///
    /// ```
    /// use urlstate::Url;
    ///
    /// assert!(Url::can_parse("http://example.com", None));
    /// assert!(Url::can_parse("/path", Some("http://example.com")));
    /// assert!(!Url::can_parse("not a url", None));
    /// ```
    pub fn can_parse(input: &str, base: Option<&str>) -> bool {
        Self::parse(input, base).is_ok()
    }

    pub fn record(&self) -> &UrlRecord {
        &self.record
    }

    pub fn into_record(self) -> UrlRecord {
        self.record
    }

    pub fn scheme_type(&self) -> SchemeType {
        self.record.scheme_type
    }

    fn refresh(&mut self) {
        self.buffer = self.record.serialize(false);
        self.components = UrlComponents::of(&self.record);
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        self.buffer.get(start..end).unwrap_or_default()
    }

    /// Run the parser over `input` from `state` on a copy of the record.
    fn reparse(&mut self, input: &str, state: State) -> bool {
        match basic_url_parse(input, None, None, Some(self.record.clone()), Some(state)) {
            Ok(record) => {
                self.record = record;
                self.refresh();
                true
            }
            Err(error) => {
                log::debug!("{state:?} setter rejected {input:?}: {error}");
                false
            }
        }
    }

    /// Drop trailing spaces of an opaque path once nothing follows it.
    fn strip_trailing_spaces_from_opaque_path(&mut self) {
        if self.record.fragment.is_some() || self.record.query.is_some() {
            return;
        }
        if let UrlPath::Opaque(path) = &mut self.record.path {
            let len = path.trim_end_matches(' ').len();
            path.truncate(len);
        }
    }

    /// The serialized URL
    pub fn href(&self) -> &str {
        &self.buffer
    }

    /// Scheme followed by `:`
    pub fn protocol(&self) -> &str {
        self.slice(0, self.components.protocol_end)
    }

    pub fn username(&self) -> &str {
        &self.record.username
    }

    pub fn password(&self) -> &str {
        self.record.password.as_deref().unwrap_or_default()
    }

    /// Host and non-default port, `"example.com:8080"`
    pub fn host(&self) -> &str {
        self.slice(self.components.host_start, self.components.port_end)
    }

    pub fn hostname(&self) -> &str {
        self.slice(self.components.host_start, self.components.host_end)
    }

    /// Port digits, or the empty string for no port or the default port
    pub fn port(&self) -> &str {
        if self.record.port.is_none() {
            return "";
        }
        self.slice(self.components.host_end + 1, self.components.port_end)
    }

    pub fn pathname(&self) -> &str {
        self.slice(
            self.components.pathname_start,
            self.components.pathname_end(self.buffer.len()),
        )
    }

    /// Query with its leading `?`, or the empty string for no or an empty query.
    pub fn search(&self) -> &str {
        let Some(start) = self.components.search_start else {
            return "";
        };
        let search = self.slice(start, self.components.search_end(self.buffer.len()));
        if search == "?" { "" } else { search }
    }

    /// Fragment with its leading `#`, or the empty string for no or an empty fragment.
    pub fn hash(&self) -> &str {
        let Some(start) = self.components.hash_start else {
            return "";
        };
        let hash = self.slice(start, self.buffer.len());
        if hash == "#" { "" } else { hash }
    }

    /// ASCII serialization of the origin.
    ///
    /// Special schemes other than `file` have a tuple origin written as
    /// `scheme://host[:port]`; a `blob:` URL takes the origin of the
    /// `http(s)` URL in its path. Everything else is opaque, `"null"`.
    pub fn origin(&self) -> String {
        match self.record.scheme_type {
            SchemeType::Http
            | SchemeType::Https
            | SchemeType::Ws
            | SchemeType::Wss
            | SchemeType::Ftp => format!("{}//{}", self.protocol(), self.host()),
            SchemeType::NotSpecial if self.record.scheme == "blob" => {
                match Self::parse(self.pathname(), None) {
                    Ok(inner)
                        if matches!(inner.scheme_type(), SchemeType::Http | SchemeType::Https) =>
                    {
                        inner.origin()
                    }
                    _ => "null".to_string(),
                }
            }
            _ => "null".to_string(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.record.includes_credentials()
    }

    /// Non-null host, possibly empty
    pub fn has_hostname(&self) -> bool {
        !self.record.host.is_null()
    }

    pub fn has_empty_hostname(&self) -> bool {
        self.record.host.is_empty()
    }

    pub fn has_port(&self) -> bool {
        self.record.port.is_some()
    }

    pub fn has_search(&self) -> bool {
        self.record.query.is_some()
    }

    pub fn has_hash(&self) -> bool {
        self.record.fragment.is_some()
    }

    pub fn has_opaque_path(&self) -> bool {
        self.record.path.is_opaque()
    }

    /// Parse `href` as a new absolute URL and replace this one.
    ///
    /// # Errors
    ///
    /// Returns an error if `href` is not a valid URL; the URL is unchanged.
    pub fn set_href(&mut self, href: &str) -> Result<()> {
        *self = Self::parse(href, None)?;
        Ok(())
    }

    /// Change the scheme; anything from the first `:` on is ignored.
    ///
    /// Switching between special and non-special schemes is refused, as is
    /// `file` for a URL with credentials or a port and leaving `file` while
    /// the host is empty. Returns `false` when the scheme was not changed to
    /// the given one.
    pub fn set_protocol(&mut self, protocol: &str) -> bool {
        let protocol = remove_tabs_and_newlines(protocol);
        let requested = protocol.split(':').next().unwrap_or_default();
        self.reparse(&format!("{protocol}:"), State::SchemeStart)
            && self.record.scheme.eq_ignore_ascii_case(requested)
    }

    pub fn set_username(&mut self, username: &str) -> bool {
        if self.record.cannot_have_username_password_port() {
            return false;
        }
        let username = remove_tabs_and_newlines(username);
        self.record.username = percent_encode_with_set(&username, USERINFO_SET).into_owned();
        self.refresh();
        true
    }

    /// Setting the empty string removes the password.
    pub fn set_password(&mut self, password: &str) -> bool {
        if self.record.cannot_have_username_password_port() {
            return false;
        }
        let password = remove_tabs_and_newlines(password);
        self.record
            .set_password(percent_encode_with_set(&password, USERINFO_SET).into_owned());
        self.refresh();
        true
    }

    /// Set host and optionally port from `"host[:port]"`.
    ///
    /// A rejected port still leaves the new host in place, with the old port
    /// kept; the call then returns `false`.
    pub fn set_host(&mut self, host: &str) -> bool {
        if self.record.path.is_opaque() {
            return false;
        }
        let host = remove_tabs_and_newlines(host);
        if self.reparse(&host, State::Host) {
            return true;
        }
        if let Some(end) = port_separator(&host, self.record.is_special()) {
            self.reparse(&host[..end], State::Host);
        }
        false
    }

    /// Set the host alone; a value containing a port is ignored.
    pub fn set_hostname(&mut self, hostname: &str) -> bool {
        if self.record.path.is_opaque() {
            return false;
        }
        let hostname = remove_tabs_and_newlines(hostname);
        self.reparse(&hostname, State::Hostname)
    }

    /// Set the port from leading digits; the empty string removes it.
    pub fn set_port(&mut self, port: &str) -> bool {
        if self.record.cannot_have_username_password_port() {
            return false;
        }
        let port = remove_tabs_and_newlines(port);
        if port.is_empty() {
            self.record.port = None;
            self.refresh();
            return true;
        }
        self.reparse(&port, State::Port)
    }

    pub fn set_pathname(&mut self, pathname: &str) -> bool {
        if self.record.path.is_opaque() {
            return false;
        }
        let pathname = remove_tabs_and_newlines(pathname);
        let previous = self.record.path.clone();
        self.record.path.clear();
        if self.reparse(&pathname, State::PathStart) {
            true
        } else {
            self.record.path = previous;
            false
        }
    }

    /// Set the query; a leading `?` is dropped and the empty string removes it.
    pub fn set_search(&mut self, search: &str) {
        let search = remove_tabs_and_newlines(search);
        if search.is_empty() {
            self.record.query = None;
            self.strip_trailing_spaces_from_opaque_path();
            self.refresh();
            return;
        }
        let input = search.strip_prefix('?').unwrap_or(&search);
        let previous = self.record.query.replace(String::new());
        if !self.reparse(input, State::Query) {
            self.record.query = previous;
        }
    }

    /// Set the fragment; a leading `#` is dropped and the empty string removes it.
    pub fn set_hash(&mut self, hash: &str) {
        let hash = remove_tabs_and_newlines(hash);
        if hash.is_empty() {
            self.record.fragment = None;
            self.strip_trailing_spaces_from_opaque_path();
            self.refresh();
            return;
        }
        let input = hash.strip_prefix('#').unwrap_or(&hash);
        let previous = self.record.fragment.replace(String::new());
        if !self.reparse(input, State::Fragment) {
            self.record.fragment = previous;
        }
    }

    /// Query parameters parsed as `application/x-www-form-urlencoded`
    pub fn search_params(&self) -> UrlSearchParams {
        UrlSearchParams::parse(self.record.query.as_deref().unwrap_or_default())
    }

    /// Replace the query with `params`; no parameters remove the query.
    pub fn set_search_params(&mut self, params: &UrlSearchParams) {
        if params.is_empty() {
            self.record.query = None;
            self.strip_trailing_spaces_from_opaque_path();
        } else {
            self.record.query = Some(params.to_string());
        }
        self.refresh();
    }
}

impl From<UrlRecord> for Url {
    fn from(record: UrlRecord) -> Self {
        let mut url = Self {
            record,
            buffer: String::new(),
            components: UrlComponents::default(),
        };
        url.refresh();
        url
    }
}

impl core::str::FromStr for Url {
    type Err = crate::error::ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, None)
    }
}

impl core::fmt::Display for Url {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.buffer)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.buffer
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl Eq for Url {}

impl core::hash::Hash for Url {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.buffer.hash(state);
    }
}
