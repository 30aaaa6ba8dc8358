//! Terminal renderer for parsed documents.
//!
//! Styling is data: a [`Theme`] maps heading levels, block types and inline
//! kinds to ANSI SGR parameter strings (`"1;36"`). An empty token means
//! unstyled. The same tree renders at three [`Detail`] levels.

use std::str::FromStr;

use briefdoc_core::{Block, Document, Inline, ListItem, ListKind};
use serde::Deserialize;

pub const RESET: &str = "\x1b[0m";

/// Width of a rendered horizontal rule.
const RULE_WIDTH: usize = 40;

/// How much of the tree the renderer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Everything, tables drawn as aligned grids.
    #[default]
    Rich,
    /// No code-fence labels, tables as tab-separated lines.
    Simple,
    /// Simple, minus spacers and rules, one heading style.
    Compact,
}

impl FromStr for Detail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rich" => Ok(Detail::Rich),
            "simple" => Ok(Detail::Simple),
            "compact" => Ok(Detail::Compact),
            other => Err(format!(
                "unknown detail level '{}' (expected rich, simple or compact)",
                other
            )),
        }
    }
}

/// Style tokens, one per node kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Indexed by heading level minus one; the last entry covers deeper levels.
    pub headings: Vec<String>,
    /// Used for every heading at [`Detail::Compact`].
    pub compact_heading: String,
    pub paragraph: String,
    pub list_marker: String,
    pub table_header: String,
    pub table_border: String,
    pub code_block: String,
    pub code_label: String,
    pub blockquote: String,
    pub rule: String,
    pub bold: String,
    pub italic: String,
    pub code: String,
    pub link: String,
    pub link_url: String,
}

impl Default for Theme {
    fn default() -> Self {
        let token = |s: &str| s.to_string();
        Self {
            headings: ["1;4;36", "1;36", "1;34", "1", "1", "1"]
                .into_iter()
                .map(token)
                .collect(),
            compact_heading: token("1"),
            paragraph: String::new(),
            list_marker: token("33"),
            table_header: token("1"),
            table_border: token("2"),
            code_block: token("32"),
            code_label: token("2;3"),
            blockquote: token("3"),
            rule: token("2"),
            bold: token("1"),
            italic: token("3"),
            code: token("32"),
            link: token("4;34"),
            link_url: token("2"),
        }
    }
}

impl Theme {
    /// A theme with every token empty: output carries no escape codes.
    pub fn plain() -> Self {
        Self {
            headings: Vec::new(),
            compact_heading: String::new(),
            paragraph: String::new(),
            list_marker: String::new(),
            table_header: String::new(),
            table_border: String::new(),
            code_block: String::new(),
            code_label: String::new(),
            blockquote: String::new(),
            rule: String::new(),
            bold: String::new(),
            italic: String::new(),
            code: String::new(),
            link: String::new(),
            link_url: String::new(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn heading(&self, level: u8) -> &str {
        let index = usize::from(level.max(1)) - 1;
        self.headings
            .get(index)
            .or_else(|| self.headings.last())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn open(token: &str) -> String {
    if token.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", token)
    }
}

/// Wrap `text` in `token`, or return it untouched when the token is empty.
pub fn paint(token: &str, text: &str) -> String {
    if token.is_empty() {
        text.to_string()
    } else {
        format!("{}{}{}", open(token), text, RESET)
    }
}

fn combine(base: &str, token: &str) -> String {
    match (base.is_empty(), token.is_empty()) {
        (true, _) => token.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{};{}", base, token),
    }
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

pub struct Renderer<'t> {
    theme: &'t Theme,
    detail: Detail,
}

impl<'t> Renderer<'t> {
    pub fn new(theme: &'t Theme, detail: Detail) -> Self {
        Self { theme, detail }
    }

    /// Render the whole document, one `\n`-terminated line at a time.
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        for block in doc {
            self.block(&mut out, block);
        }
        out
    }

    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Heading { level, content } => {
                let style = match self.detail {
                    Detail::Compact => self.theme.compact_heading.as_str(),
                    _ => self.theme.heading(*level),
                };
                line(out, self.styled_line(style, content));
            }
            Block::Paragraph { content } => {
                line(out, self.styled_line(&self.theme.paragraph, content));
            }
            Block::List { kind, items } => self.list(out, *kind, items),
            Block::Table { headers, rows } => match self.detail {
                Detail::Rich => self.grid(out, headers, rows),
                Detail::Simple | Detail::Compact => self.tab_separated(out, headers, rows),
            },
            Block::CodeBlock { language, lines } => {
                if let (Detail::Rich, Some(lang)) = (self.detail, language) {
                    line(out, paint(&self.theme.code_label, &format!("[{}]", lang)));
                }
                for code in lines {
                    line(out, format!("  {}", paint(&self.theme.code_block, code)));
                }
            }
            Block::Blockquote { content } => {
                let bar = paint(&self.theme.blockquote, "│");
                line(
                    out,
                    format!("{} {}", bar, self.styled_line(&self.theme.blockquote, content)),
                );
            }
            Block::HorizontalRule => {
                if self.detail != Detail::Compact {
                    line(out, paint(&self.theme.rule, &"─".repeat(RULE_WIDTH)));
                }
            }
            Block::Spacer => {
                if self.detail != Detail::Compact {
                    out.push('\n');
                }
            }
        }
    }

    fn list(&self, out: &mut String, kind: ListKind, items: &[ListItem]) {
        for (i, item) in items.iter().enumerate() {
            let marker = match kind {
                ListKind::Unordered => "•".to_string(),
                ListKind::Ordered => format!("{}.", i + 1),
            };
            line(
                out,
                format!(
                    "{}{} {}",
                    " ".repeat(item.depth),
                    paint(&self.theme.list_marker, &marker),
                    self.inlines(&item.content, "")
                ),
            );
        }
    }

    /// Aligned grid; short rows are padded with blank cells.
    fn grid(&self, out: &mut String, headers: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>]) {
        let header_cells: Vec<String> = headers.iter().map(|c| self.inlines(c, "")).collect();
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|c| self.inlines(c, "")).collect())
            .collect();

        let columns = body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header_cells.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in std::iter::once(&header_cells).chain(body.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }

        let bar = paint(&self.theme.table_border, "│");
        let join = |row: &[String], style: &str| -> String {
            let cells: Vec<String> = (0..columns)
                .map(|i| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    let pad = widths[i].saturating_sub(visible_width(cell));
                    format!("{}{}", paint(style, cell), " ".repeat(pad))
                })
                .collect();
            cells.join(&format!(" {} ", bar))
        };

        line(out, join(header_cells.as_slice(), self.theme.table_header.as_str()));
        let sep: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        line(out, paint(&self.theme.table_border, &sep.join("─┼─")));
        for row in &body {
            line(out, join(row.as_slice(), ""));
        }
    }

    fn tab_separated(&self, out: &mut String, headers: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>]) {
        let header: Vec<String> = headers
            .iter()
            .map(|c| paint(&self.theme.table_header, &self.inlines(c, "")))
            .collect();
        line(out, header.join("\t"));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| self.inlines(c, "")).collect();
            line(out, cells.join("\t"));
        }
    }

    fn styled_line(&self, style: &str, content: &[Inline]) -> String {
        if style.is_empty() {
            self.inlines(content, "")
        } else {
            format!("{}{}{}", open(style), self.inlines(content, style), RESET)
        }
    }

    /// Render inlines inside an already-open `base` style. Every reset is
    /// followed by re-opening `base` so nested spans don't clear it.
    fn inlines(&self, inlines: &[Inline], base: &str) -> String {
        let mut out = String::new();
        for inline in inlines {
            match inline {
                Inline::Text(t) => out.push_str(t),
                Inline::Bold(inner) => self.nested(&mut out, &self.theme.bold, inner, base),
                Inline::Italic(inner) => self.nested(&mut out, &self.theme.italic, inner, base),
                Inline::Code(code) => self.span(&mut out, &self.theme.code, code, base),
                Inline::Link { label, url } => {
                    self.span(&mut out, &self.theme.link, label, base);
                    if self.detail != Detail::Compact {
                        out.push(' ');
                        self.span(&mut out, &self.theme.link_url, &format!("({})", url), base);
                    }
                }
            }
        }
        out
    }

    fn nested(&self, out: &mut String, token: &str, inner: &[Inline], base: &str) {
        if token.is_empty() {
            out.push_str(&self.inlines(inner, base));
            return;
        }
        let style = combine(base, token);
        out.push_str(&open(&style));
        out.push_str(&self.inlines(inner, &style));
        out.push_str(RESET);
        out.push_str(&open(base));
    }

    fn span(&self, out: &mut String, token: &str, text: &str, base: &str) {
        if token.is_empty() {
            out.push_str(text);
            return;
        }
        out.push_str(&open(&combine(base, token)));
        out.push_str(text);
        out.push_str(RESET);
        out.push_str(&open(base));
    }
}

fn line(out: &mut String, text: String) {
    out.push_str(&text);
    out.push('\n');
}
