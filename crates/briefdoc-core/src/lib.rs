//! # BriefDoc Core
//!
//! A resilient, line-oriented parser for the loosely structured markdown that
//! AI analysis services produce.
//!
//! Input is untrusted text with inconsistent markup; output is a small typed
//! tree of blocks (headings, paragraphs, lists, tables, code, quotes, rules,
//! spacers) and inline spans (bold, italic, code, links, text) that a
//! renderer can switch on.
//!
//! ## Quick Start
//!
//! ```rust
//! use briefdoc_core::{Block, Parser};
//!
//! let input = "## Outlook\n\n**Return: 12.5%**\n\n- support at 100\n- resistance at 120";
//! let doc = Parser::new().parse(input);
//!
//! assert!(matches!(doc.blocks[0], Block::Heading { level: 2, .. }));
//! println!("Parsed {} blocks", doc.blocks.len());
//! ```
//!
//! ## Degraded Input
//!
//! Parsing never fails. Conditions the parser had to paper over are
//! reported separately:
//!
//! ```rust
//! use briefdoc_core::Parser;
//!
//! let result = Parser::new().parse_with_diagnostics("```\nunclosed");
//!
//! // The document is complete, the open fence is reported
//! println!("Blocks: {}, Diagnostics: {}", result.document.len(), result.diagnostics.len());
//! ```
//!
//! ## Pipeline
//!
//! raw text → [`preprocess`] → [`parser::BlockSegmenter`] (using [`inline`],
//! [`list`], [`table`]) → [`Document`].

pub mod ast;
pub mod diagnostic;
pub mod inline;
pub mod lexer;
pub mod list;
pub mod options;
pub mod parser;
pub mod preprocess;
pub mod table;

pub use ast::{Block, Document, Inline, ListItem, ListKind};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use options::ParserOptions;
pub use parser::{parse, BlockSegmenter, ParseResult, Parser, SegmenterState};
