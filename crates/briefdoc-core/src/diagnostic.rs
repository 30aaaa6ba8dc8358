//! Diagnostics for degraded-but-handled input.
//!
//! Parsing never fails. When the parser has to guess (an unclosed fence, a
//! ragged table row, an oversized heading marker) it still produces a tree
//! and records what happened here, so callers can log or surface it.

use std::fmt;

/// Categories of degraded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Code fence still open at end of input; the rest became code.
    UnterminatedFence,
    /// Table row whose cell count differs from the header.
    RaggedTableRow,
    /// Heading marker longer than six `#`, clamped to level 6.
    HeadingLevelClamped,
}

impl DiagnosticKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedFence => "unterminated_fence",
            DiagnosticKind::RaggedTableRow => "ragged_table_row",
            DiagnosticKind::HeadingLevelClamped => "heading_level_clamped",
        }
    }
}

/// One degraded condition and where it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Category.
    pub kind: DiagnosticKind,
    /// 1-based line in the text handed to the segmenter.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Fence opened at `line` and never closed.
    pub fn unterminated_fence(marker: &str, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::UnterminatedFence,
            line,
            message: format!("code fence `{marker}` is never closed"),
        }
    }

    /// Table row at `line` has `found` cells against `expected` headers.
    pub fn ragged_table_row(expected: usize, found: usize, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::RaggedTableRow,
            line,
            message: format!("table row has {found} cells, header has {expected}"),
        }
    }

    /// Heading at `line` used `hashes` markers.
    pub fn heading_level_clamped(hashes: usize, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::HeadingLevelClamped,
            line,
            message: format!("heading uses {hashes} `#`, clamped to level 6"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.message, self.line)
    }
}

/// Diagnostics collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate in the order recorded (source order).
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Whether any diagnostic of `kind` was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
