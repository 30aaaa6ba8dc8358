//! List marker recognition and item accumulation.

use crate::ast::{Block, ListItem, ListKind};
use crate::inline::parse_inlines;

/// A recognized list marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker<'a> {
    /// Bullet or number.
    pub kind: ListKind,
    /// Leading whitespace count, unnormalized.
    pub depth: usize,
    /// Text after the marker, trimmed.
    pub content: &'a str,
}

/// Recognize `-`, `+`, `*`, `N.` or `N)` followed by whitespace.
pub fn parse_marker(line: &str) -> Option<ListMarker<'_>> {
    let rest = line.trim_start();
    let depth = line[..line.len() - rest.len()].chars().count();
    let bytes = rest.as_bytes();

    let (kind, marker_len) = match bytes.first()? {
        b'-' | b'+' | b'*' => (ListKind::Unordered, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || !matches!(bytes.get(digits), Some(b'.') | Some(b')')) {
                return None;
            }
            (ListKind::Ordered, digits + 1)
        }
        _ => return None,
    };

    if !bytes.get(marker_len)?.is_ascii_whitespace() {
        return None;
    }

    Some(ListMarker {
        kind,
        depth,
        content: rest[marker_len..].trim(),
    })
}

/// Collects contiguous same-kind items into one `List` block.
#[derive(Debug, Clone)]
pub struct ListAccumulator {
    kind: ListKind,
    items: Vec<ListItem>,
}

impl ListAccumulator {
    /// Start an empty list of `kind`.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(8),
        }
    }

    /// Kind every item in this list shares.
    #[inline]
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Add an item; `content` is inline-parsed.
    pub fn push(&mut self, content: &str, depth: usize) {
        self.items.push(ListItem {
            content: parse_inlines(content),
            depth,
        });
    }

    /// Add a recognized marker line. Returns `false` on a kind mismatch.
    pub fn push_marker(&mut self, marker: &ListMarker<'_>) -> bool {
        if marker.kind != self.kind {
            return false;
        }
        self.push(marker.content, marker.depth);
        true
    }

    /// Produce the `List` block.
    pub fn finish(self) -> Block {
        Block::List {
            kind: self.kind,
            items: self.items,
        }
    }
}
