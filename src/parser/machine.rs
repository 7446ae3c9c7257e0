use super::state::State;
use crate::character_sets::{is_scheme_code_point, is_url_code_point};
use crate::checkers::{
    is_double_dot_segment, is_normalized_windows_drive_letter, is_single_dot_segment,
    is_windows_drive_letter, starts_with_windows_drive_letter,
};
use crate::compat::{String, vec};
use crate::encoding::{Encoding, percent_encode_after_encoding};
use crate::error::{ParseError, Result};
use crate::host::{Host, parse_host};
use crate::path::UrlPath;
use crate::record::UrlRecord;
use crate::scheme::get_scheme_type;
use crate::stream::ScalarStream;
use crate::types::SchemeType;
use crate::unicode::percent_encode::{
    C0_CONTROL_SET, FRAGMENT_SET, PATH_SET, QUERY_SET, SPECIAL_QUERY_SET, USERINFO_SET,
    percent_encode_char_into,
};
use crate::validation::{Reporter, ValidationError};

/// What the driver does after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    /// Advance to the next code point, or stop at EOF
    Ok,
    /// Re-run without advancing; the handler already moved the cursor
    Continue,
    /// Stop and return the record (state override only)
    Break,
}

/// Flags owned by the active state; reset whenever the state changes.
#[derive(Debug, Clone, Copy, Default)]
struct StateLocals {
    at_sign_seen: bool,
    password_token_seen: bool,
    inside_brackets: bool,
}

/// The basic URL parser: a driver loop over the scalar stream and one
/// handler per [`State`].
pub(super) struct Machine<'b, 's> {
    stream: ScalarStream,
    buffer: String,
    url: UrlRecord,
    base: Option<&'b UrlRecord>,
    encoding: Encoding,
    state: State,
    state_override: Option<State>,
    locals: StateLocals,
    reporter: Reporter<'s>,
}

impl<'b, 's> Machine<'b, 's> {
    pub(super) fn new(
        input: &str,
        base: Option<&'b UrlRecord>,
        encoding: Encoding,
        url: UrlRecord,
        state_override: Option<State>,
        reporter: Reporter<'s>,
    ) -> Self {
        Self {
            stream: ScalarStream::new(input),
            buffer: String::new(),
            url,
            base,
            encoding,
            state: state_override.unwrap_or(State::SchemeStart),
            state_override,
            locals: StateLocals::default(),
            reporter,
        }
    }

    pub(super) fn run(mut self) -> Result<UrlRecord> {
        loop {
            let state = self.state;
            let c = self.stream.current();

            let signal = match self.step(c) {
                Ok(signal) => signal,
                Err(error) => {
                    log::debug!("URL parse failed in {state:?} state at {c:?}: {error}");
                    return Err(error);
                }
            };

            if self.state != state {
                self.locals = StateLocals::default();
            }

            match signal {
                Signal::Break => break,
                Signal::Continue => {}
                Signal::Ok => {
                    if self.stream.is_eof() {
                        break;
                    }
                    self.stream.next();
                }
            }
        }
        Ok(self.url)
    }

    fn step(&mut self, c: Option<char>) -> Result<Signal> {
        match self.state {
            State::SchemeStart => self.scheme_start_state(c),
            State::Scheme => self.scheme_state(c),
            State::NoScheme => self.no_scheme_state(c),
            State::SpecialRelativeOrAuthority => self.special_relative_or_authority_state(c),
            State::PathOrAuthority => Ok(self.path_or_authority_state(c)),
            State::Relative => self.relative_state(c),
            State::RelativeSlash => self.relative_slash_state(c),
            State::SpecialAuthoritySlashes => Ok(self.special_authority_slashes_state(c)),
            State::SpecialAuthorityIgnoreSlashes => {
                Ok(self.special_authority_ignore_slashes_state(c))
            }
            State::Authority => self.authority_state(c),
            State::Host | State::Hostname => self.host_state(c),
            State::Port => self.port_state(c),
            State::File => self.file_state(c),
            State::FileSlash => Ok(self.file_slash_state(c)),
            State::FileHost => self.file_host_state(c),
            State::PathStart => self.path_start_state(c),
            State::Path => self.path_state(c),
            State::CannotBeABaseUrlPath => self.cannot_be_a_base_url_path_state(c),
            State::Query => Ok(self.query_state(c)),
            State::Fragment => Ok(self.fragment_state(c)),
        }
    }

    fn report(&mut self, error: ValidationError) {
        self.reporter.report(error);
    }

    /// Report a validation error that aborts the parse.
    fn fail(&mut self, error: ValidationError, failure: ParseError) -> Result<Signal> {
        self.reporter.report(error);
        Err(failure)
    }

    fn is_special(&self) -> bool {
        self.url.scheme_type.is_special()
    }

    /// `\` acts as `/` in special URLs
    fn is_special_backslash(&self, c: Option<char>) -> bool {
        c == Some('\\') && self.is_special()
    }

    /// The base URL, if it is a `file` URL
    fn file_base(&self) -> Option<&'b UrlRecord> {
        self.base
            .filter(|base| base.scheme_type == SchemeType::File)
    }

    /// Report a code point that is not a URL unit, or a `%` that does not
    /// start a percent-encoded byte.
    fn check_url_unit(&mut self, c: char) {
        if c == '%' {
            if !self.stream.remaining_starts_with_two_hex_digits() {
                self.report(ValidationError::InvalidUrlUnit);
            }
        } else if !is_url_code_point(c) {
            self.report(ValidationError::InvalidUrlUnit);
        }
    }

    fn scheme_start_state(&mut self, c: Option<char>) -> Result<Signal> {
        match c {
            Some(c) if c.is_ascii_alphabetic() => {
                self.buffer.push(c.to_ascii_lowercase());
                self.state = State::Scheme;
            }
            _ if self.state_override.is_none() => {
                self.state = State::NoScheme;
                self.stream.prev();
            }
            _ => return Err(ParseError::InvalidScheme),
        }
        Ok(Signal::Ok)
    }

    fn scheme_state(&mut self, c: Option<char>) -> Result<Signal> {
        match c {
            Some(c) if is_scheme_code_point(c) => {
                self.buffer.push(c.to_ascii_lowercase());
                Ok(Signal::Ok)
            }
            Some(':') => self.commit_scheme(),
            _ if self.state_override.is_none() => {
                // Start over from the first code point
                self.buffer.clear();
                self.state = State::NoScheme;
                self.stream.rewind();
                Ok(Signal::Continue)
            }
            _ => Err(ParseError::InvalidScheme),
        }
    }

    fn commit_scheme(&mut self) -> Result<Signal> {
        let scheme_type = get_scheme_type(&self.buffer);

        if self.state_override.is_some() {
            if self.url.is_special() != scheme_type.is_special() {
                return Ok(Signal::Break);
            }
            if (self.url.includes_credentials() || self.url.port.is_some())
                && scheme_type == SchemeType::File
            {
                return Ok(Signal::Break);
            }
            if self.url.scheme_type == SchemeType::File
                && (self.url.host.is_null() || self.url.host.is_empty())
            {
                return Ok(Signal::Break);
            }
        }

        self.url.set_scheme(core::mem::take(&mut self.buffer));

        if self.state_override.is_some() {
            return Ok(Signal::Break);
        }

        if scheme_type == SchemeType::File {
            if !self.stream.remaining_starts_with("//") {
                self.report(ValidationError::SpecialSchemeMissingFollowingSolidus);
            }
            self.state = State::File;
        } else if scheme_type.is_special()
            && self
                .base
                .is_some_and(|base| base.scheme == self.url.scheme)
        {
            self.state = State::SpecialRelativeOrAuthority;
        } else if scheme_type.is_special() {
            self.state = State::SpecialAuthoritySlashes;
        } else if self.stream.remaining_starts_with("/") {
            self.state = State::PathOrAuthority;
            self.stream.next();
        } else {
            self.url.path = UrlPath::Opaque(String::new());
            self.state = State::CannotBeABaseUrlPath;
        }
        Ok(Signal::Ok)
    }

    fn no_scheme_state(&mut self, c: Option<char>) -> Result<Signal> {
        let Some(base) = self.base else {
            return self.fail(
                ValidationError::MissingSchemeNonRelativeUrl,
                ParseError::RelativeUrlWithoutBase,
            );
        };

        if base.cannot_be_a_base_url() {
            if c != Some('#') {
                return self.fail(
                    ValidationError::MissingSchemeNonRelativeUrl,
                    ParseError::RelativeUrlWithoutBase,
                );
            }
            self.url.set_scheme(base.scheme.clone());
            self.url.path = base.path.clone();
            self.url.query = base.query.clone();
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
        } else if base.scheme_type != SchemeType::File {
            self.state = State::Relative;
            self.stream.prev();
        } else {
            self.state = State::File;
            self.stream.prev();
        }
        Ok(Signal::Ok)
    }

    fn special_relative_or_authority_state(&mut self, c: Option<char>) -> Result<Signal> {
        if c == Some('/') && self.stream.remaining_starts_with("/") {
            self.state = State::SpecialAuthorityIgnoreSlashes;
            self.stream.next();
        } else {
            self.report(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.state = State::Relative;
            self.stream.prev();
        }
        Ok(Signal::Ok)
    }

    fn path_or_authority_state(&mut self, c: Option<char>) -> Signal {
        if c == Some('/') {
            self.state = State::Authority;
        } else {
            self.state = State::Path;
            self.stream.prev();
        }
        Signal::Ok
    }

    fn copy_authority_from(&mut self, base: &UrlRecord) {
        self.url.username.clone_from(&base.username);
        self.url.password.clone_from(&base.password);
        self.url.host.clone_from(&base.host);
        self.url.port = base.port;
    }

    fn relative_state(&mut self, c: Option<char>) -> Result<Signal> {
        let Some(base) = self.base else {
            return Err(ParseError::RelativeUrlWithoutBase);
        };
        self.url.set_scheme(base.scheme.clone());

        match c {
            Some('/') => self.state = State::RelativeSlash,
            Some('\\') if self.is_special() => {
                self.report(ValidationError::InvalidReverseSolidus);
                self.state = State::RelativeSlash;
            }
            _ => {
                self.copy_authority_from(base);
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();
                match c {
                    Some('?') => {
                        self.url.query = Some(String::new());
                        self.state = State::Query;
                    }
                    Some('#') => {
                        self.url.fragment = Some(String::new());
                        self.state = State::Fragment;
                    }
                    Some(_) => {
                        self.url.query = None;
                        self.url.path.shorten(self.url.scheme_type)?;
                        self.state = State::Path;
                        self.stream.prev();
                    }
                    None => {}
                }
            }
        }
        Ok(Signal::Ok)
    }

    fn relative_slash_state(&mut self, c: Option<char>) -> Result<Signal> {
        if self.is_special() && matches!(c, Some('/' | '\\')) {
            if c == Some('\\') {
                self.report(ValidationError::InvalidReverseSolidus);
            }
            self.state = State::SpecialAuthorityIgnoreSlashes;
        } else if c == Some('/') {
            self.state = State::Authority;
        } else {
            let Some(base) = self.base else {
                return Err(ParseError::RelativeUrlWithoutBase);
            };
            self.copy_authority_from(base);
            self.state = State::Path;
            self.stream.prev();
        }
        Ok(Signal::Ok)
    }

    fn special_authority_slashes_state(&mut self, c: Option<char>) -> Signal {
        if c == Some('/') && self.stream.remaining_starts_with("/") {
            self.stream.next();
        } else {
            self.report(ValidationError::SpecialSchemeMissingFollowingSolidus);
            self.stream.prev();
        }
        self.state = State::SpecialAuthorityIgnoreSlashes;
        Signal::Ok
    }

    fn special_authority_ignore_slashes_state(&mut self, c: Option<char>) -> Signal {
        if matches!(c, Some('/' | '\\')) {
            self.report(ValidationError::SpecialSchemeMissingFollowingSolidus);
        } else {
            self.state = State::Authority;
            self.stream.prev();
        }
        Signal::Ok
    }

    fn authority_state(&mut self, c: Option<char>) -> Result<Signal> {
        match c {
            Some('@') => {
                self.report(ValidationError::InvalidCredentials);
                if self.locals.at_sign_seen {
                    self.buffer.insert_str(0, "%40");
                }
                self.locals.at_sign_seen = true;

                let buffer = core::mem::take(&mut self.buffer);
                for code_point in buffer.chars() {
                    if code_point == ':' && !self.locals.password_token_seen {
                        self.locals.password_token_seen = true;
                        continue;
                    }
                    if self.locals.password_token_seen {
                        let password = self.url.password.get_or_insert_with(String::new);
                        percent_encode_char_into(password, code_point, USERINFO_SET);
                    } else {
                        percent_encode_char_into(&mut self.url.username, code_point, USERINFO_SET);
                    }
                }
            }
            None | Some('/' | '?' | '#') => return self.end_of_authority(),
            Some('\\') if self.is_special() => return self.end_of_authority(),
            Some(c) => self.buffer.push(c),
        }
        Ok(Signal::Ok)
    }

    fn end_of_authority(&mut self) -> Result<Signal> {
        if self.locals.at_sign_seen && self.buffer.is_empty() {
            return self.fail(ValidationError::HostMissing, ParseError::MissingHost);
        }
        // Back up to the first code point of the host
        let length = self.buffer.chars().count() as isize;
        self.stream.seek(-(length + 1));
        self.buffer.clear();
        self.state = State::Host;
        Ok(Signal::Ok)
    }

    fn host_state(&mut self, c: Option<char>) -> Result<Signal> {
        if self.state_override.is_some() && self.url.scheme_type == SchemeType::File {
            self.stream.prev();
            self.state = State::FileHost;
            return Ok(Signal::Ok);
        }

        match c {
            Some(':') if !self.locals.inside_brackets => {
                if self.buffer.is_empty() {
                    return self.fail(ValidationError::HostMissing, ParseError::MissingHost);
                }
                if self.state_override == Some(State::Hostname) {
                    return Ok(Signal::Break);
                }
                self.url.host = parse_host(&self.buffer, !self.is_special(), &mut self.reporter)?;
                self.buffer.clear();
                self.state = State::Port;
            }
            None | Some('/' | '?' | '#') => return self.end_of_host(),
            Some('\\') if self.is_special() => return self.end_of_host(),
            Some(c) => {
                if c == '[' {
                    self.locals.inside_brackets = true;
                } else if c == ']' {
                    self.locals.inside_brackets = false;
                }
                self.buffer.push(c);
            }
        }
        Ok(Signal::Ok)
    }

    fn end_of_host(&mut self) -> Result<Signal> {
        self.stream.prev();
        if self.buffer.is_empty() {
            if self.is_special() {
                return self.fail(ValidationError::HostMissing, ParseError::MissingHost);
            }
            if self.state_override.is_some()
                && (self.url.includes_credentials() || self.url.port.is_some())
            {
                return Ok(Signal::Break);
            }
        }

        self.url.host = parse_host(&self.buffer, !self.is_special(), &mut self.reporter)?;
        self.buffer.clear();
        self.state = State::PathStart;
        if self.state_override.is_some() {
            return Ok(Signal::Break);
        }
        Ok(Signal::Ok)
    }

    fn port_state(&mut self, c: Option<char>) -> Result<Signal> {
        match c {
            Some(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                return Ok(Signal::Ok);
            }
            None | Some('/' | '?' | '#') => {}
            Some('\\') if self.is_special() => {}
            _ if self.state_override.is_some() => {}
            Some(_) => {
                return self.fail(ValidationError::PortInvalid, ParseError::InvalidPort);
            }
        }

        if !self.buffer.is_empty() {
            let port = self.buffer.bytes().try_fold(0u32, |acc, digit| {
                let value = acc * 10 + u32::from(digit - b'0');
                (value <= u32::from(u16::MAX)).then_some(value)
            });
            let Some(port) = port.and_then(|port| u16::try_from(port).ok()) else {
                return self.fail(ValidationError::PortOutOfRange, ParseError::InvalidPort);
            };
            self.url.set_port(Some(port));
            self.buffer.clear();
        }

        if self.state_override.is_some() {
            return Ok(Signal::Break);
        }
        self.state = State::PathStart;
        self.stream.prev();
        Ok(Signal::Ok)
    }

    fn file_state(&mut self, c: Option<char>) -> Result<Signal> {
        self.url.set_scheme(String::from("file"));
        self.url.host = Host::Null;

        match c {
            Some('/' | '\\') => {
                if c == Some('\\') {
                    self.report(ValidationError::InvalidReverseSolidus);
                }
                self.state = State::FileSlash;
            }
            _ => match self.file_base() {
                Some(base) => {
                    self.url.host.clone_from(&base.host);
                    self.url.path = base.path.clone();
                    self.url.query = base.query.clone();
                    match c {
                        Some('?') => {
                            self.url.query = Some(String::new());
                            self.state = State::Query;
                        }
                        Some('#') => {
                            self.url.fragment = Some(String::new());
                            self.state = State::Fragment;
                        }
                        Some(_) => {
                            self.url.query = None;
                            if starts_with_windows_drive_letter(self.stream.rest()) {
                                self.report(ValidationError::FileInvalidWindowsDriveLetter);
                                self.url.path.clear();
                            } else {
                                self.url.path.shorten(SchemeType::File)?;
                            }
                            self.state = State::Path;
                            self.stream.prev();
                        }
                        None => {}
                    }
                }
                None => {
                    self.state = State::Path;
                    self.stream.prev();
                }
            },
        }
        Ok(Signal::Ok)
    }

    fn file_slash_state(&mut self, c: Option<char>) -> Signal {
        if matches!(c, Some('/' | '\\')) {
            if c == Some('\\') {
                self.report(ValidationError::InvalidReverseSolidus);
            }
            self.state = State::FileHost;
            return Signal::Ok;
        }

        if let Some(base) = self.file_base() {
            self.url.host.clone_from(&base.host);
            if !starts_with_windows_drive_letter(self.stream.rest())
                && let Some(drive) = base
                    .path
                    .segments()
                    .and_then(|segments| segments.first())
                    .filter(|first| is_normalized_windows_drive_letter(first))
            {
                self.url.path = UrlPath::List(vec![drive.clone()]);
            }
        }
        self.state = State::Path;
        self.stream.prev();
        Signal::Ok
    }

    fn file_host_state(&mut self, c: Option<char>) -> Result<Signal> {
        if !matches!(c, None | Some('/' | '\\' | '?' | '#')) {
            if let Some(c) = c {
                self.buffer.push(c);
            }
            return Ok(Signal::Ok);
        }

        self.stream.prev();

        if self.state_override.is_none() && is_windows_drive_letter(&self.buffer) {
            // The buffer is kept and becomes the first path segment
            self.report(ValidationError::FileInvalidWindowsDriveLetterHost);
            self.state = State::Path;
        } else if self.buffer.is_empty() {
            self.url.host = Host::Null;
            if self.state_override.is_some() {
                return Ok(Signal::Break);
            }
            self.state = State::PathStart;
        } else {
            let mut host = parse_host(&self.buffer, !self.is_special(), &mut self.reporter)?;
            if matches!(&host, Host::Domain(domain) if domain == "localhost") {
                host = Host::Null;
            }
            self.url.host = host;
            if self.state_override.is_some() {
                return Ok(Signal::Break);
            }
            self.buffer.clear();
            self.state = State::PathStart;
        }
        Ok(Signal::Ok)
    }

    fn path_start_state(&mut self, c: Option<char>) -> Result<Signal> {
        if self.is_special() {
            if c == Some('\\') {
                self.report(ValidationError::InvalidReverseSolidus);
            }
            self.state = State::Path;
            if !matches!(c, Some('/' | '\\')) {
                self.stream.prev();
            }
        } else if self.state_override.is_none() && c == Some('?') {
            self.url.query = Some(String::new());
            self.state = State::Query;
        } else if self.state_override.is_none() && c == Some('#') {
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
        } else if let Some(c) = c {
            self.state = State::Path;
            if c != '/' {
                self.stream.prev();
            }
        } else if self.state_override.is_some() && self.url.host.is_null() {
            self.url.path.push(String::new())?;
        }
        Ok(Signal::Ok)
    }

    fn path_state(&mut self, c: Option<char>) -> Result<Signal> {
        let slash = c == Some('/') || self.is_special_backslash(c);
        let ends_segment = c.is_none()
            || slash
            || (self.state_override.is_none() && matches!(c, Some('?' | '#')));

        if !ends_segment {
            if let Some(c) = c {
                self.check_url_unit(c);
                percent_encode_char_into(&mut self.buffer, c, PATH_SET);
            }
            return Ok(Signal::Ok);
        }

        if self.is_special_backslash(c) {
            self.report(ValidationError::InvalidReverseSolidus);
        }

        let scheme_type = self.url.scheme_type;
        if is_double_dot_segment(&self.buffer) {
            self.url.path.shorten(scheme_type)?;
            if !slash {
                self.url.path.push(String::new())?;
            }
        } else if is_single_dot_segment(&self.buffer) {
            if !slash {
                self.url.path.push(String::new())?;
            }
        } else {
            let mut segment = core::mem::take(&mut self.buffer);
            if scheme_type == SchemeType::File
                && self.url.path.is_empty()
                && is_windows_drive_letter(&segment)
            {
                segment.replace_range(1..2, ":");
            }
            self.url.path.push(segment)?;
        }
        self.buffer.clear();

        if scheme_type == SchemeType::File
            && matches!(c, None | Some('?' | '#'))
            && self.url.path.remove_leading_empty_segments()
        {
            self.report(ValidationError::FileLeadingEmptySegment);
        }

        match c {
            Some('?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some('#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            _ => {}
        }
        Ok(Signal::Ok)
    }

    fn cannot_be_a_base_url_path_state(&mut self, c: Option<char>) -> Result<Signal> {
        match c {
            Some('?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some('#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            Some(c) => {
                self.check_url_unit(c);
                let mut encoded = String::new();
                percent_encode_char_into(&mut encoded, c, C0_CONTROL_SET);
                self.url.path.append_opaque(&encoded)?;
            }
            None => {}
        }
        Ok(Signal::Ok)
    }

    fn query_state(&mut self, c: Option<char>) -> Signal {
        if !self.encoding.is_utf8()
            && (!self.is_special() || self.url.scheme_type.is_websocket())
        {
            self.encoding = Encoding::UTF_8;
        }

        match c {
            Some('#') if self.state_override.is_none() => {
                self.flush_query();
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            None => self.flush_query(),
            Some(c) => {
                self.check_url_unit(c);
                self.buffer.push(c);
            }
        }
        Signal::Ok
    }

    fn flush_query(&mut self) {
        let encode_set = if self.is_special() {
            SPECIAL_QUERY_SET
        } else {
            QUERY_SET
        };
        let encoded = percent_encode_after_encoding(self.encoding, &self.buffer, encode_set, false);
        self.url
            .query
            .get_or_insert_with(String::new)
            .push_str(&encoded);
        self.buffer.clear();
    }

    fn fragment_state(&mut self, c: Option<char>) -> Signal {
        if let Some(c) = c {
            self.check_url_unit(c);
            let fragment = self.url.fragment.get_or_insert_with(String::new);
            percent_encode_char_into(fragment, c, FRAGMENT_SET);
        }
        Signal::Ok
    }
}
