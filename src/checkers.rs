/// Check if a string is a Windows drive letter: an ASCII letter followed by `:` or `|`.
pub fn is_windows_drive_letter(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|')
}

/// Check if a string is a normalized Windows drive letter: an ASCII letter followed by `:`.
pub fn is_normalized_windows_drive_letter(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Check if code points start with a Windows drive letter.
/// The drive letter must be the whole input or be followed by `/`, `\`, `?` or `#`.
pub fn starts_with_windows_drive_letter(input: &[char]) -> bool {
    input.len() >= 2
        && input[0].is_ascii_alphabetic()
        && matches!(input[1], ':' | '|')
        && (input.len() == 2 || matches!(input[2], '/' | '\\' | '?' | '#'))
}

/// `.` or `%2e`, ASCII case-insensitive
pub fn is_single_dot_segment(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

/// `..`, `.%2e`, `%2e.` or `%2e%2e`, ASCII case-insensitive
pub fn is_double_dot_segment(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_drive_letters() {
        assert!(is_windows_drive_letter("C:"));
        assert!(is_windows_drive_letter("c|"));
        assert!(!is_windows_drive_letter("C"));
        assert!(!is_windows_drive_letter("1:"));
        assert!(!is_windows_drive_letter("C:/"));

        assert!(is_normalized_windows_drive_letter("C:"));
        assert!(!is_normalized_windows_drive_letter("C|"));
    }

    #[test]
    fn test_starts_with_windows_drive_letter() {
        let chars = |s: &str| s.chars().collect::<crate::compat::Vec<_>>();
        assert!(starts_with_windows_drive_letter(&chars("c:")));
        assert!(starts_with_windows_drive_letter(&chars("c|/foo")));
        assert!(starts_with_windows_drive_letter(&chars("c:#frag")));
        assert!(!starts_with_windows_drive_letter(&chars("c:x")));
        assert!(!starts_with_windows_drive_letter(&chars("c")));
        assert!(!starts_with_windows_drive_letter(&chars("/c:")));
    }

    #[test]
    fn test_dot_segments() {
        for s in [".", "%2e", "%2E"] {
            assert!(is_single_dot_segment(s), "{s}");
        }
        for s in ["..", ".%2e", ".%2E", "%2e.", "%2E.", "%2e%2e", "%2E%2E", "%2e%2E", "%2E%2e"] {
            assert!(is_double_dot_segment(s), "{s}");
        }
        assert!(!is_single_dot_segment(".."));
        assert!(!is_double_dot_segment("..."));
        assert!(!is_double_dot_segment("%2e%2e%2e"));
    }
}
