/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// C0 control or space, the set trimmed from both ends of the input
pub fn is_c0_control_or_space(c: char) -> bool {
    c <= '\u{20}'
}

/// Host code point classification
/// 0=allowed, 1=forbidden host code point, 2=forbidden only in domains
const HOST_CHAR_TABLE: [u8; 128] = {
    let mut table = [0u8; 128];

    // C0 controls and DEL are forbidden in domains
    let mut i = 0;
    while i < 0x20 {
        table[i] = 2;
        i += 1;
    }
    table[0x7F] = 2;
    table[b'%' as usize] = 2;

    // Forbidden host code points (opaque hosts included)
    table[0x00] = 1;
    table[b'\t' as usize] = 1;
    table[b'\n' as usize] = 1;
    table[b'\r' as usize] = 1;
    table[b' ' as usize] = 1;
    table[b'#' as usize] = 1;
    table[b'/' as usize] = 1;
    table[b':' as usize] = 1;
    table[b'<' as usize] = 1;
    table[b'>' as usize] = 1;
    table[b'?' as usize] = 1;
    table[b'@' as usize] = 1;
    table[b'[' as usize] = 1;
    table[b'\\' as usize] = 1;
    table[b']' as usize] = 1;
    table[b'^' as usize] = 1;

    table
};

/// Forbidden host code point: `NUL TAB LF CR SPACE # / : < > ? @ [ \ ] ^`
pub fn is_forbidden_host_code_point(c: char) -> bool {
    c.is_ascii() && HOST_CHAR_TABLE[c as usize] == 1
}

/// Forbidden domain code point: forbidden host code points, C0 controls, `%` and DEL
pub fn is_forbidden_domain_code_point(c: char) -> bool {
    c.is_ascii() && HOST_CHAR_TABLE[c as usize] != 0
}

/// Noncharacters: U+FDD0..=U+FDEF and the last two code points of every plane
fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}

/// <https://url.spec.whatwg.org/#url-code-points>
pub fn is_url_code_point(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '$'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | '-'
                    | '.'
                    | '/'
                    | ':'
                    | ';'
                    | '='
                    | '?'
                    | '@'
                    | '_'
                    | '~'
            );
    }
    c >= '\u{A0}' && !is_noncharacter(c)
}

/// ASCII alphanumeric or `+ - .`
pub fn is_scheme_code_point(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}
