/// URL parser state machine states
/// Based on WHATWG URL Standard
///
/// Any state can be passed as a state override to
/// [`basic_url_parse`](crate::basic_url_parse); the URL API setters use
/// `SchemeStart`, `Host`, `Hostname`, `Port`, `PathStart`, `Query` and
/// `Fragment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Scheme start state
    SchemeStart,
    /// Scheme state
    Scheme,
    /// No scheme state
    NoScheme,
    /// Special relative or authority state
    SpecialRelativeOrAuthority,
    /// Path or authority state
    PathOrAuthority,
    /// Relative state
    Relative,
    /// Relative slash state
    RelativeSlash,
    /// Special authority slashes state
    SpecialAuthoritySlashes,
    /// Special authority ignore slashes state
    SpecialAuthorityIgnoreSlashes,
    /// Authority state
    Authority,
    /// Host state
    Host,
    /// Hostname state (the host state, entered by the hostname setter)
    Hostname,
    /// Port state
    Port,
    /// File state
    File,
    /// File slash state
    FileSlash,
    /// File host state
    FileHost,
    /// Path start state
    PathStart,
    /// Path state
    Path,
    /// Cannot-be-a-base-URL path state (opaque paths)
    CannotBeABaseUrlPath,
    /// Query state
    Query,
    /// Fragment state
    Fragment,
}
