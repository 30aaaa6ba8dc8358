//! Document tree types produced by the parser.
//!
//! The tree is deliberately small:
//!
//! - **Owned**: every node owns its strings, nothing borrows from the input
//! - **Flat**: blocks are top-level only, inline content holds plain spans
//! - **Serializable**: with the `serde` feature the tree maps directly to JSON

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed document: blocks in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// Content blocks in document order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Number of top-level blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the top-level blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'d> IntoIterator for &'d Document {
    type Item = &'d Block;
    type IntoIter = std::slice::Iter<'d, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Block {
    /// Section heading (levels 1-6).
    Heading { level: u8, content: Vec<Inline> },
    /// A single line of text with inline formatting.
    Paragraph { content: Vec<Inline> },
    /// Run of same-kind list items.
    List { kind: ListKind, items: Vec<ListItem> },
    /// Pipe table. Rows are not reconciled against the header width.
    Table {
        headers: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    /// Fenced code; lines are verbatim and never inline-parsed.
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    /// Quoted text.
    Blockquote { content: Vec<Inline> },
    /// Thematic break.
    HorizontalRule,
    /// Collapsed blank-line gap between two blocks.
    Spacer,
}

impl Block {
    /// Short lowercase name of the variant, stable across releases.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::Table { .. } => "table",
            Block::CodeBlock { .. } => "code_block",
            Block::Blockquote { .. } => "blockquote",
            Block::HorizontalRule => "horizontal_rule",
            Block::Spacer => "spacer",
        }
    }

    /// Inline content of text-bearing blocks.
    pub fn content(&self) -> Option<&[Inline]> {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::Blockquote { content } => Some(content),
            _ => None,
        }
    }
}

/// List ordering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ListKind {
    /// Numbered list (`1.` or `1)`).
    Ordered,
    /// Bulleted list (`-`, `+` or `*`).
    Unordered,
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListItem {
    /// Inline content after the marker.
    pub content: Vec<Inline>,
    /// Leading whitespace count of the source line, carried literally.
    pub depth: usize,
}

/// Inline-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum Inline {
    /// Plain text. Never empty.
    Text(String),
    /// `**bold**`
    Bold(Vec<Inline>),
    /// `*italic*`
    Italic(Vec<Inline>),
    /// `` `code` ``
    Code(String),
    /// `[label](url)`
    Link { label: String, url: String },
}

impl Inline {
    /// Shorthand for a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    /// Concatenated visible text, markers stripped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Bold(inner) | Inline::Italic(inner) => {
                for i in inner {
                    i.write_plain(out);
                }
            }
            Inline::Link { label, .. } => out.push_str(label),
        }
    }
}

/// Visible text of an inline sequence.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        inline.write_plain(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_markup() {
        let content = vec![
            Inline::Bold(vec![Inline::text("Price:")]),
            Inline::text(" 12 "),
            Inline::Code("usd".into()),
            Inline::Link {
                label: "chart".into(),
                url: "https://example.com".into(),
            },
        ];
        assert_eq!(plain_text(&content), "Price: 12 usdchart");
    }

    #[test]
    fn block_content_only_for_text_blocks() {
        assert!(Block::Spacer.content().is_none());
        let p = Block::Paragraph {
            content: vec![Inline::text("x")],
        };
        assert_eq!(p.content().map(|c| c.len()), Some(1));
        assert_eq!(p.kind_name(), "paragraph");
    }
}
