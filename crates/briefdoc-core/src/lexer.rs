//! Line splitter shared by the preprocessor and the block segmenter.
//!
//! Uses `memchr` for newline detection (SIMD on supported platforms).
//! Lines borrow from the input and carry their 1-based line number so
//! diagnostics can point back at the source.

use memchr::memchr;

/// A single line from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline or carriage return).
    pub text: &'a str,
    /// 1-based line number in the input.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace, Unicode included.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get the line text with leading/trailing whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    /// The code fence marker this line starts with, if any.
    #[inline]
    pub fn fence_marker(&self) -> Option<&'static str> {
        let t = self.text.trim_start();
        if t.starts_with("```") {
            Some("```")
        } else if t.starts_with("~~~") {
            Some("~~~")
        } else {
            None
        }
    }
}

/// Line-based lexer.
pub struct Lexer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for efficient scanning.
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of lines handed out so far.
    line_no: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line_no: 0,
        }
    }

    /// Consume and return the next line, or `None` at end of input.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;

        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // CRLF: drop the carriage return too
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };
        self.line_no += 1;

        Some(Line {
            // SAFETY: `start` is 0 or one past a `\n`, and `text_end` sits on a
            // `\n`, a `\r` or the end of input. All are ASCII, so both offsets are
            // char boundaries of the valid UTF-8 input.
            text: unsafe { self.input.get_unchecked(start..text_end) },
            number: self.line_no,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_numbers_them() {
        let lines: Vec<_> = Lexer::new("a\r\n\nb").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a");
        assert!(lines[1].is_blank());
        assert_eq!(lines[2].text, "b");
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn unicode_whitespace_is_blank() {
        for text in ["\u{a0}", "\u{3000}", "\u{c}", " \t\u{a0}"] {
            let line = Lexer::new(text).next_line().unwrap();
            assert!(line.is_blank(), "{text:?}");
        }
        assert!(!Lexer::new("\u{a0}x").next_line().unwrap().is_blank());
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(Lexer::new("x\n").count(), 1);
        assert_eq!(Lexer::new("").count(), 0);
    }

    #[test]
    fn indented_fence_is_recognized() {
        let mut lexer = Lexer::new("  ~~~text");
        assert_eq!(lexer.next_line().and_then(|l| l.fence_marker()), Some("~~~"));
        assert!(lexer.next_line().is_none());
    }
}
