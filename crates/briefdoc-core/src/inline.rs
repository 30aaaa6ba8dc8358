//! Inline span parser.
//!
//! Runs a fixed sequence of passes over one line of text: whole-line bold,
//! bold, italic, inline code, links. Each pass claims byte ranges in an
//! occupancy mask; later passes never match across a claimed range, so a
//! span produced early is never re-read. Whatever is left unclaimed becomes
//! plain text. There is no backtracking.

use memchr::{memchr, memchr3, memmem};

use crate::ast::Inline;

/// Parse the inline spans of a single line.
///
/// Never fails; unmatched markers are kept as literal text.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    if text.is_empty() {
        return Vec::new();
    }

    // Fast path: nothing that could open a span
    if memchr3(b'*', b'`', b'[', text.as_bytes()).is_none() {
        return vec![Inline::Text(text.to_string())];
    }

    if let Some(inlines) = parse_bold_line(text) {
        return inlines;
    }

    let mut parser = InlineParser::new(text);
    parser.run_pass(find_bold);
    parser.run_pass(find_italic);
    parser.run_pass(find_code);
    parser.run_pass(find_link);
    parser.finish()
}

/// Whole-string bold, optionally split into a bold `Label:` and a plain value.
///
/// Returns `None` unless the trimmed text is a single `**...**` span.
pub fn parse_bold_line(text: &str) -> Option<Vec<Inline>> {
    let inner = text.trim().strip_prefix("**")?.strip_suffix("**")?;
    if inner.trim().is_empty() || inner.contains("**") {
        return None;
    }

    let Some(colon) = inner.find(':') else {
        return Some(vec![Inline::Bold(vec![Inline::Text(inner.to_string())])]);
    };

    let label = inner[..=colon].trim();
    let value = inner[colon + 1..].trim();

    let mut out = Vec::with_capacity(2);
    out.push(Inline::Bold(vec![Inline::Text(label.to_string())]));
    if !value.is_empty() {
        out.push(Inline::Text(format!(" {value}")));
    }
    Some(out)
}

/// A span found by one of the passes.
#[derive(Debug)]
struct Matched {
    start: usize,
    end: usize,
    node: Inline,
}

type Finder = fn(&str, usize) -> Option<Matched>;

struct InlineParser<'a> {
    text: &'a str,
    occupied: Vec<bool>,
    spans: Vec<Matched>,
}

impl<'a> InlineParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            occupied: vec![false; text.len()],
            spans: Vec::with_capacity(4),
        }
    }

    #[inline]
    fn is_free(&self, start: usize, end: usize) -> bool {
        !self.occupied[start..end].iter().any(|&b| b)
    }

    fn run_pass(&mut self, find: Finder) {
        let mut from = 0;
        while from < self.text.len() {
            let Some(m) = find(self.text, from) else {
                break;
            };
            if self.is_free(m.start, m.end) {
                self.occupied[m.start..m.end].fill(true);
                from = m.end;
                self.spans.push(m);
            } else {
                // every match starts on an ASCII marker, so +1 is a char boundary
                from = m.start + 1;
            }
        }
    }

    fn finish(mut self) -> Vec<Inline> {
        self.spans.sort_by_key(|m| m.start);

        let mut out = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut pos = 0;
        for m in self.spans {
            if m.start > pos {
                out.push(Inline::Text(self.text[pos..m.start].to_string()));
            }
            out.push(m.node);
            pos = m.end;
        }
        if pos < self.text.len() {
            out.push(Inline::Text(self.text[pos..].to_string()));
        }
        out
    }
}

/// Non-greedy `**content**` with non-empty content.
fn find_bold(s: &str, from: usize) -> Option<Matched> {
    let bytes = s.as_bytes();
    let open = from + memmem::find(&bytes[from..], b"**")?;
    let body = open + 2;
    if body >= bytes.len() {
        return None;
    }
    let close = body + 1 + memmem::find(&bytes[body + 1..], b"**")?;

    Some(Matched {
        start: open,
        end: close + 2,
        node: Inline::Bold(vec![Inline::Text(s[body..close].to_string())]),
    })
}

/// `*content*` where neither marker touches another `*`.
fn find_italic(s: &str, from: usize) -> Option<Matched> {
    let bytes = s.as_bytes();
    let lone = |i: usize| (i == 0 || bytes[i - 1] != b'*') && bytes.get(i + 1) != Some(&b'*');

    let mut i = from;
    while let Some(off) = memchr(b'*', &bytes[i..]) {
        let open = i + off;
        let opens = lone(open)
            && bytes
                .get(open + 1)
                .is_some_and(|b| !b.is_ascii_whitespace());

        if opens {
            let mut j = open + 1;
            while let Some(off) = memchr(b'*', &bytes[j..]) {
                let close = j + off;
                if lone(close) {
                    return Some(Matched {
                        start: open,
                        end: close + 1,
                        node: Inline::Italic(vec![Inline::Text(s[open + 1..close].to_string())]),
                    });
                }
                j = close + 1;
            }
            // no lone closer anywhere to the right
            return None;
        }
        i = open + 1;
    }
    None
}

/// `` `content` `` with non-empty content.
fn find_code(s: &str, from: usize) -> Option<Matched> {
    let bytes = s.as_bytes();
    let mut i = from;
    loop {
        let open = i + memchr(b'`', &bytes[i..])?;
        let close = open + 1 + memchr(b'`', &bytes[open + 1..])?;
        if close > open + 1 {
            return Some(Matched {
                start: open,
                end: close + 1,
                node: Inline::Code(s[open + 1..close].to_string()),
            });
        }
        i = open + 1;
    }
}

/// `[label](url)` with non-empty label and url.
fn find_link(s: &str, from: usize) -> Option<Matched> {
    let bytes = s.as_bytes();
    let mut i = from;
    while let Some(off) = memchr(b'[', &bytes[i..]) {
        let open = i + off;
        if let Some(m) = link_at(s, open) {
            return Some(m);
        }
        i = open + 1;
    }
    None
}

fn link_at(s: &str, open: usize) -> Option<Matched> {
    let bytes = s.as_bytes();
    let label_end = open + 1 + memchr(b']', &bytes[open + 1..])?;
    if label_end == open + 1 || bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let url_start = label_end + 2;
    let url_end = url_start + memchr(b')', bytes.get(url_start..)?)?;
    if url_end == url_start {
        return None;
    }

    Some(Matched {
        start: open,
        end: url_end + 1,
        node: Inline::Link {
            label: s[open + 1..label_end].to_string(),
            url: s[url_start..url_end].to_string(),
        },
    })
}
