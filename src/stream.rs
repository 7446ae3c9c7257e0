use crate::compat::Vec;

/// Random-access stream of Unicode scalar values with an explicit EOF.
///
/// The input is materialized once into a `Vec<char>` and walked with a signed
/// cursor. The cursor may sit one position before the start (after a "decrease
/// pointer by 1" on the first code point) or on the EOF position one past the
/// end.
#[derive(Debug, Clone)]
pub struct ScalarStream {
    chars: Vec<char>,
    pointer: isize,
}

impl ScalarStream {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pointer: 0,
        }
    }

    /// Scalar value under the cursor, `None` for EOF.
    pub fn current(&self) -> Option<char> {
        usize::try_from(self.pointer)
            .ok()
            .and_then(|index| self.chars.get(index).copied())
    }

    /// True once the cursor has reached or passed the end.
    pub fn is_eof(&self) -> bool {
        self.pointer >= self.chars.len() as isize
    }

    pub fn next(&mut self) {
        self.pointer += 1;
    }

    pub fn prev(&mut self) {
        self.pointer -= 1;
    }

    pub fn seek(&mut self, delta: isize) {
        self.pointer += delta;
    }

    /// Move the cursor back to the first code point.
    pub fn rewind(&mut self) {
        self.pointer = 0;
    }

    /// Code points after the current one.
    pub fn remaining(&self) -> &[char] {
        let start = (self.pointer + 1).clamp(0, self.chars.len() as isize) as usize;
        &self.chars[start..]
    }

    /// Up to `n` code points after the current one.
    pub fn peek(&self, n: usize) -> &[char] {
        let remaining = self.remaining();
        &remaining[..n.min(remaining.len())]
    }

    /// Code points from the cursor (inclusive) to the end.
    pub fn rest(&self) -> &[char] {
        let start = self.pointer.clamp(0, self.chars.len() as isize) as usize;
        &self.chars[start..]
    }

    /// True if the code points after the current one start with `prefix`.
    pub fn remaining_starts_with(&self, prefix: &str) -> bool {
        let mut remaining = self.remaining().iter();
        prefix
            .chars()
            .all(|expected| remaining.next() == Some(&expected))
    }

    /// True if the two code points after the current one are ASCII hex digits.
    pub fn remaining_starts_with_two_hex_digits(&self) -> bool {
        let next = self.peek(2);
        next.len() == 2 && next.iter().all(char::is_ascii_hexdigit)
    }
}
