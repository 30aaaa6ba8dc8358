//! Block segmenter.
//!
//! An explicit state machine (`Normal`, `InCodeBlock`, `InTable`, `InList`)
//! consumes normalized lines one at a time and emits top-level blocks.
//! No line shape is an error; anything unrecognized becomes a paragraph.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::ast::{Block, Document, Inline, ListKind};
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::inline::parse_inlines;
use crate::lexer::{Lexer, Line};
use crate::list::{parse_marker, ListAccumulator, ListMarker};
use crate::options::ParserOptions;
use crate::preprocess;
use crate::table::{is_table_start, TableAssembler};

/// Result of a parse that also reports degraded input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// The parsed document. Identical to what [`Parser::parse`] returns.
    pub document: Document,
    /// Degraded conditions met while parsing.
    pub diagnostics: Diagnostics,
}

impl ParseResult {
    /// Check if the input needed no guessing.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parser for analysis text.
///
/// Holds only immutable options, so one instance can be shared freely
/// across threads. Every call builds a fresh tree.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser with default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Enable or disable the pseudo-heading preprocessor.
    pub fn with_preprocess(mut self, enabled: bool) -> Self {
        self.options.preprocess = enabled;
        self
    }

    /// Replace the section keywords the preprocessor promotes to headings.
    pub fn with_section_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.section_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Heading level used for promoted pseudo-headings.
    pub fn with_section_heading_level(mut self, level: u8) -> Self {
        self.options.section_heading_level = level;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the input into a document. Never fails.
    #[inline]
    pub fn parse(&self, input: &str) -> Document {
        self.parse_with_diagnostics(input).document
    }

    /// Parse and report degraded conditions alongside the document.
    pub fn parse_with_diagnostics(&self, input: &str) -> ParseResult {
        let text = if self.options.preprocess {
            preprocess::normalize(input, &self.options)
        } else {
            Cow::Borrowed(input)
        };

        let mut segmenter = BlockSegmenter::new();
        for line in Lexer::new(&text) {
            segmenter.feed(line);
        }
        let result = segmenter.finish();

        debug!(
            blocks = result.document.len(),
            diagnostics = result.diagnostics.len(),
            preprocessed = matches!(text, Cow::Owned(_)),
            "parsed document"
        );
        result
    }
}

/// Parse with default options.
pub fn parse(input: &str) -> Document {
    Parser::new().parse(input)
}

/// Observable segmenter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    Normal,
    InCodeBlock,
    InTable,
    InList(ListKind),
}

enum State {
    Normal,
    InCodeBlock {
        marker: &'static str,
        language: Option<String>,
        lines: Vec<String>,
        opened_at: usize,
    },
    InTable(TableAssembler),
    InList {
        list: ListAccumulator,
        /// One blank line seen since the last item.
        pending_blank: bool,
    },
}

/// What a line looks like outside code and tables.
enum LineClass<'a> {
    Blank,
    Fence {
        marker: &'static str,
        language: Option<String>,
    },
    Heading {
        hashes: usize,
        content: &'a str,
    },
    Rule,
    Quote(&'a str),
    Item(ListMarker<'a>),
    TableStart(&'a str),
    Text(&'a str),
}

impl<'a> LineClass<'a> {
    fn of(line: &Line<'a>) -> Self {
        if line.is_blank() {
            return LineClass::Blank;
        }

        if let Some(marker) = line.fence_marker() {
            let info = line.text.trim_start()[marker.len()..].trim();
            return LineClass::Fence {
                marker,
                language: (!info.is_empty()).then(|| info.to_string()),
            };
        }

        if let Some((hashes, content)) = heading_prefix(line.text) {
            return LineClass::Heading { hashes, content };
        }

        let trimmed = line.trimmed();
        if is_rule(trimmed) {
            return LineClass::Rule;
        }

        if trimmed.starts_with('>') {
            let content = trimmed.trim_start_matches(|c: char| c == '>' || c.is_whitespace());
            return LineClass::Quote(content);
        }

        if let Some(marker) = parse_marker(line.text) {
            return LineClass::Item(marker);
        }

        if is_table_start(trimmed) {
            return LineClass::TableStart(line.text);
        }

        LineClass::Text(trimmed)
    }
}

/// `^#+\s`: marker count and trimmed remainder.
fn heading_prefix(text: &str) -> Option<(usize, &str)> {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let rest = &text[hashes..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    Some((hashes, rest.trim()))
}

/// Three or more of one of `-`, `*`, `_`, spaces ignored.
fn is_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars().filter(|c| !matches!(c, ' ' | '\t'));
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Line-at-a-time block segmenter.
///
/// [`Parser`] drives this over preprocessed input; it is public so the
/// state machine can be exercised directly.
pub struct BlockSegmenter {
    state: State,
    blocks: Vec<Block>,
    diagnostics: Diagnostics,
}

impl Default for BlockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockSegmenter {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            blocks: Vec::with_capacity(16),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> SegmenterState {
        match &self.state {
            State::Normal => SegmenterState::Normal,
            State::InCodeBlock { .. } => SegmenterState::InCodeBlock,
            State::InTable(_) => SegmenterState::InTable,
            State::InList { list, .. } => SegmenterState::InList(list.kind()),
        }
    }

    /// Blocks emitted so far (open list/table/code not included).
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Consume one line.
    pub fn feed(&mut self, line: Line<'_>) {
        match &mut self.state {
            State::InCodeBlock { marker, lines, .. } => {
                if line.text.trim_start().starts_with(*marker) {
                    trace!(line = line.number, "close code block");
                    self.flush();
                } else {
                    lines.push(line.text.to_string());
                }
                return;
            }
            State::InTable(table) => {
                if line.text.contains('|') {
                    if let Some(width) = table.push_line(line.text) {
                        let expected = table.header_width();
                        if width != expected {
                            self.diagnostics.push(Diagnostic::ragged_table_row(
                                expected,
                                width,
                                line.number,
                            ));
                        }
                    }
                    return;
                }
                trace!(line = line.number, "close table");
                self.flush();
            }
            State::Normal | State::InList { .. } => {}
        }

        let class = LineClass::of(&line);

        if let State::InList {
            list,
            pending_blank,
        } = &mut self.state
        {
            match &class {
                LineClass::Blank => {
                    if *pending_blank {
                        trace!(line = line.number, "second blank line ends list");
                        self.flush();
                    } else {
                        *pending_blank = true;
                    }
                    return;
                }
                LineClass::Item(marker) => {
                    if list.push_marker(marker) {
                        *pending_blank = false;
                        return;
                    }
                    trace!(line = line.number, "list kind changed");
                    self.flush();
                }
                _ => {
                    trace!(line = line.number, "close list");
                    self.flush();
                }
            }
        }

        self.emit(class, line.number);
    }

    /// Close whatever is open and return the document.
    pub fn finish(mut self) -> ParseResult {
        if let State::InCodeBlock {
            marker, opened_at, ..
        } = &self.state
        {
            self.diagnostics
                .push(Diagnostic::unterminated_fence(marker, *opened_at));
        }
        self.flush();

        if matches!(self.blocks.last(), Some(Block::Spacer)) {
            self.blocks.pop();
        }

        ParseResult {
            document: Document {
                blocks: self.blocks,
            },
            diagnostics: self.diagnostics,
        }
    }

    fn emit(&mut self, class: LineClass<'_>, number: usize) {
        match class {
            LineClass::Blank => self.push_spacer(),
            LineClass::Fence { marker, language } => {
                trace!(line = number, ?language, "open code block");
                self.state = State::InCodeBlock {
                    marker,
                    language,
                    lines: Vec::new(),
                    opened_at: number,
                };
            }
            LineClass::Heading { hashes, content } => {
                if hashes > 6 {
                    self.diagnostics
                        .push(Diagnostic::heading_level_clamped(hashes, number));
                }
                self.blocks.push(Block::Heading {
                    level: hashes.min(6) as u8,
                    content: parse_inlines(content),
                });
            }
            LineClass::Rule => self.blocks.push(Block::HorizontalRule),
            LineClass::Quote(content) => self.push_quote(content),
            LineClass::Item(marker) => {
                trace!(line = number, kind = ?marker.kind, "open list");
                let mut list = ListAccumulator::new(marker.kind);
                list.push(marker.content, marker.depth);
                self.state = State::InList {
                    list,
                    pending_blank: false,
                };
            }
            LineClass::TableStart(header) => {
                trace!(line = number, "open table");
                self.state = State::InTable(TableAssembler::new(header));
            }
            LineClass::Text(text) => self.blocks.push(Block::Paragraph {
                content: parse_inlines(text),
            }),
        }
    }

    fn push_spacer(&mut self) {
        match self.blocks.last() {
            None | Some(Block::Spacer) => {}
            Some(_) => self.blocks.push(Block::Spacer),
        }
    }

    fn push_quote(&mut self, text: &str) {
        let inlines = parse_inlines(text);
        if let Some(Block::Blockquote { content }) = self.blocks.last_mut() {
            if !inlines.is_empty() {
                if !content.is_empty() {
                    content.push(Inline::Text(" ".to_string()));
                }
                content.extend(inlines);
            }
            return;
        }
        self.blocks.push(Block::Blockquote { content: inlines });
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::Normal => {}
            State::InCodeBlock {
                language, lines, ..
            } => self.blocks.push(Block::CodeBlock { language, lines }),
            State::InTable(table) => self.blocks.push(table.finish()),
            State::InList {
                list,
                pending_blank,
            } => {
                self.blocks.push(list.finish());
                if pending_blank {
                    self.push_spacer();
                }
            }
        }
    }
}
