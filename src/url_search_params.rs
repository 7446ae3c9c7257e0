use crate::compat::{String, ToString, Vec};
use crate::encoding::Encoding;
use crate::form_urlencoded;

/// Ordered list of query name-value pairs.
///
/// Parsing and serialization go through the `application/x-www-form-urlencoded`
/// codec, so `+` reads as a space and spaces serialize as `+`.
///
/// ```
/// use urlstate::UrlSearchParams;
///
/// let mut params = UrlSearchParams::parse("?b=2&a=1&b=3");
/// params.sort();
/// params.set("b", "two words");
/// assert_eq!(params.to_string(), "a=1&b=two+words");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    params: Vec<(String, String)>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parse a query string, with or without its leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            params: form_urlencoded::parse(query.as_bytes()),
        }
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.params.push((name.to_string(), value.to_string()));
    }

    /// Remove every pair named `name`, or only those also equal to `value`.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        self.params
            .retain(|(n, v)| n != name || value.is_some_and(|value| v != value));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter_map(|(n, v)| (n == name).then_some(v.as_str()))
            .collect()
    }

    /// True if a pair is named `name`, and equals `value` when given
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        self.params
            .iter()
            .any(|(n, v)| n == name && value.is_none_or(|value| v == value))
    }

    /// Replace the first pair named `name` and drop the others; append when
    /// there is none.
    pub fn set(&mut self, name: &str, value: &str) {
        let Some(first) = self.params.iter().position(|(n, _)| n == name) else {
            self.append(name, value);
            return;
        };
        self.params[first].1 = value.to_string();
        let mut index = 0;
        self.params.retain(|(n, _)| {
            let keep = index <= first || n != name;
            index += 1;
            keep
        });
    }

    /// Stable sort by name, comparing UTF-16 code units.
    pub fn sort(&mut self) {
        self.params
            .sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn size(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, v)| v.as_str())
    }

    /// Query string with leading `?`, or the empty string if there are no
    /// parameters.
    pub fn serialize(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let mut result = String::from("?");
        result.push_str(&self.to_string());
        result
    }
}

/// Query string without leading `?`
impl core::fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&form_urlencoded::serialize(self.iter(), Encoding::UTF_8))
    }
}

impl From<&str> for UrlSearchParams {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for UrlSearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(n, v)| (n.as_ref().to_string(), v.as_ref().to_string()))
                .collect(),
        }
    }
}
