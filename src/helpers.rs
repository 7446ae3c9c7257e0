use crate::character_sets::{is_ascii_tab_or_newline, is_c0_control_or_space};
use crate::compat::{Cow, String};

/// Fast check if string contains tabs or newlines
pub fn has_tabs_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Outcome of input preprocessing.
pub struct Cleaned<'a> {
    pub input: Cow<'a, str>,
    /// Leading or trailing C0 control or space was removed
    pub trimmed: bool,
    /// Interior tab, LF or CR was removed
    pub stripped_tabs_or_newlines: bool,
}

/// Combined trim and remove tabs/newlines in single pass.
/// Returns a Cow to avoid allocation when possible.
/// Removes leading/trailing C0 controls+space and internal tabs/newlines.
pub fn clean_input(input: &str) -> Cleaned<'_> {
    let trimmed = input.trim_matches(is_c0_control_or_space);
    let was_trimmed = trimmed.len() != input.len();

    if !has_tabs_or_newline(trimmed) {
        return Cleaned {
            input: Cow::Borrowed(trimmed),
            trimmed: was_trimmed,
            stripped_tabs_or_newlines: false,
        };
    }

    Cleaned {
        input: Cow::Owned(remove_tabs_and_newlines(trimmed).into_owned()),
        trimmed: was_trimmed,
        stripped_tabs_or_newlines: true,
    }
}

/// Remove every ASCII tab or newline, keeping everything else.
pub fn remove_tabs_and_newlines(input: &str) -> Cow<'_, str> {
    if !has_tabs_or_newline(input) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .chars()
            .filter(|&c| !is_ascii_tab_or_newline(c))
            .collect::<String>(),
    )
}

/// Byte offset of the `:` that starts the port in `host[:port]`, if any.
///
/// Colons inside `[...]` belong to an IPv6 literal. The host also ends at
/// `/`, `?` or `#`, and at `\` when `special`.
pub fn port_separator(input: &str, special: bool) -> Option<usize> {
    let mut inside_brackets = false;
    for (index, c) in input.char_indices() {
        match c {
            '[' => inside_brackets = true,
            ']' => inside_brackets = false,
            ':' if !inside_brackets => return Some(index),
            '/' | '?' | '#' => return None,
            '\\' if special => return None,
            _ => {}
        }
    }
    None
}
