mod machine;
mod state;

pub use state::State;

use crate::encoding::Encoding;
use crate::error::Result;
use crate::helpers::clean_input;
use crate::record::UrlRecord;
use crate::validation::{Reporter, ValidationError, ValidationSink};
use machine::Machine;

/// Run the basic URL parser.
///
/// Without `url`, a fresh record is built from `input` after trimming
/// leading and trailing C0 controls and spaces and removing ASCII tabs and
/// newlines. With `url` and `state_override`, that record is modified in
/// place starting from the given state; a state override may stop early
/// and return the record built so far.
///
/// `encoding_override` is an Encoding Standard label selecting the query
/// encoding of special non-websocket URLs.
///
/// # Errors
///
/// Returns the reason the input cannot be parsed. No partial record is
/// returned on failure.
pub fn basic_url_parse(
    input: &str,
    base: Option<&UrlRecord>,
    encoding_override: Option<&str>,
    url: Option<UrlRecord>,
    state_override: Option<State>,
) -> Result<UrlRecord> {
    run(
        input,
        base,
        Encoding::from_override(encoding_override),
        url,
        state_override,
        Reporter::silent(),
    )
}

pub(crate) fn run(
    input: &str,
    base: Option<&UrlRecord>,
    encoding: Encoding,
    url: Option<UrlRecord>,
    state_override: Option<State>,
    mut reporter: Reporter<'_>,
) -> Result<UrlRecord> {
    if let Some(url) = url {
        return Machine::new(input, base, encoding, url, state_override, reporter).run();
    }

    let cleaned = clean_input(input);
    if cleaned.trimmed {
        reporter.report(ValidationError::LeadingOrTrailingC0ControlOrSpace);
    }
    if cleaned.stripped_tabs_or_newlines {
        reporter.report(ValidationError::TabOrNewline);
    }

    Machine::new(
        &cleaned.input,
        base,
        encoding,
        UrlRecord::default(),
        state_override,
        reporter,
    )
    .run()
}

/// Builder for a parse with a base URL, a query encoding or a validation sink.
///
/// ```
/// use urlstate::{ParseOptions, UrlRecord, ValidationError};
///
/// let base = UrlRecord::parse("https://example.org/dir/", None).unwrap();
/// let mut events = Vec::new();
/// let mut sink = |error: ValidationError| events.push(error);
/// let url = ParseOptions::new()
///     .base(Some(&base))
///     .validation_sink(&mut sink)
///     .parse("a\\b")
///     .unwrap();
/// assert_eq!(url.to_string(), "https://example.org/dir/a/b");
/// assert_eq!(events, [ValidationError::InvalidReverseSolidus]);
/// ```
#[derive(Default)]
pub struct ParseOptions<'a> {
    base: Option<&'a UrlRecord>,
    encoding: Encoding,
    validation_sink: Option<&'a mut dyn ValidationSink>,
}

impl<'a> ParseOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative input against this URL
    #[must_use]
    pub fn base(mut self, base: Option<&'a UrlRecord>) -> Self {
        self.base = base;
        self
    }

    /// Query encoding label; unknown labels fall back to UTF-8
    #[must_use]
    pub fn encoding_override(mut self, label: Option<&str>) -> Self {
        self.encoding = Encoding::from_override(label);
        self
    }

    /// Receive every validation event of the parse
    #[must_use]
    pub fn validation_sink(mut self, sink: &'a mut dyn ValidationSink) -> Self {
        self.validation_sink = Some(sink);
        self
    }

    /// Parse `input` with these options.
    ///
    /// # Errors
    ///
    /// See [`basic_url_parse`].
    pub fn parse(self, input: &str) -> Result<UrlRecord> {
        run(
            input,
            self.base,
            self.encoding,
            None,
            None,
            Reporter::new(self.validation_sink),
        )
    }
}

impl UrlRecord {
    /// Parse an absolute URL, or a relative one against `base`.
    ///
    /// # Errors
    ///
    /// See [`basic_url_parse`].
    pub fn parse(input: &str, base: Option<&Self>) -> Result<Self> {
        basic_url_parse(input, base, None, None, None)
    }
}
