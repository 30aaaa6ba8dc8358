//! Integration tests for the BriefDoc parser

use briefdoc_core::{parse, Block, DiagnosticKind, Inline, ListKind, Parser};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

fn bold(s: &str) -> Inline {
    Inline::Bold(vec![text(s)])
}

fn para(s: &str) -> Block {
    Block::Paragraph {
        content: vec![text(s)],
    }
}

fn kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(Block::kind_name).collect()
}

// ============================================================================
// Empty and Whitespace Input
// ============================================================================

#[test]
fn test_empty_input_is_empty_document() {
    assert!(parse("").is_empty());
}

#[test]
fn test_blank_only_input_has_no_spacers() {
    assert!(parse("\n\n   \n\t\n").is_empty());
}

// ============================================================================
// Heading Tests
// ============================================================================

#[test]
fn test_parse_heading_levels() {
    let doc = parse("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6");

    assert_eq!(doc.len(), 6);
    for (i, block) in doc.iter().enumerate() {
        match block {
            Block::Heading { level, content } => {
                assert_eq!(*level, (i + 1) as u8);
                assert_eq!(content, &vec![text(&format!("H{}", i + 1))]);
            }
            other => panic!("Expected heading, got {:?}", other),
        }
    }
}

#[test]
fn test_heading_level_is_clamped() {
    let result = Parser::new().parse_with_diagnostics("######## Deep");

    assert_eq!(
        result.document.blocks,
        vec![Block::Heading {
            level: 6,
            content: vec![text("Deep")],
        }]
    );
    assert!(result
        .diagnostics
        .contains(DiagnosticKind::HeadingLevelClamped));
}

#[test]
fn test_heading_without_space_is_paragraph() {
    assert_eq!(parse("#NoSpace").blocks, vec![para("#NoSpace")]);
}

#[test]
fn test_heading_content_is_inline_parsed() {
    let doc = parse("## Market **Outlook**");
    assert_eq!(
        doc.blocks,
        vec![Block::Heading {
            level: 2,
            content: vec![text("Market "), bold("Outlook")],
        }]
    );
}

#[test]
fn test_heading_closes_open_list() {
    let doc = parse("- a\n- b\n# Next");
    assert_eq!(kinds(&doc.blocks), vec!["list", "heading"]);
}

// ============================================================================
// Paragraph and Spacer Tests
// ============================================================================

#[test]
fn test_each_text_line_is_a_paragraph() {
    let doc = parse("Line one\nLine two");
    assert_eq!(doc.blocks, vec![para("Line one"), para("Line two")]);
}

#[test]
fn test_two_blank_lines_give_one_spacer() {
    let doc = parse("First paragraph.\n\n\nSecond paragraph.");
    assert_eq!(
        doc.blocks,
        vec![
            para("First paragraph."),
            Block::Spacer,
            para("Second paragraph.")
        ]
    );
}

#[test]
fn test_leading_and_trailing_blanks_are_dropped() {
    let doc = parse("\n\nonly\n\n\n");
    assert_eq!(doc.blocks, vec![para("only")]);
}

// ============================================================================
// Code Block Tests
// ============================================================================

#[test]
fn test_code_block_lines_are_verbatim() {
    let input = "```rust\nfn main() {\n    **bold**\n\n# not a heading\n}\n```";
    let doc = parse(input);

    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock {
            language: Some("rust".into()),
            lines: vec![
                "fn main() {".into(),
                "    **bold**".into(),
                "".into(),
                "# not a heading".into(),
                "}".into(),
            ],
        }]
    );
}

#[test]
fn test_code_block_without_language() {
    let doc = parse("```\nx\n```");
    assert!(matches!(
        &doc.blocks[0],
        Block::CodeBlock { language: None, lines } if lines == &vec!["x".to_string()]
    ));
}

#[test]
fn test_tilde_fence_needs_tilde_close() {
    let doc = parse("~~~\na\n```\nb\n~~~\nafter");
    assert_eq!(
        doc.blocks,
        vec![
            Block::CodeBlock {
                language: None,
                lines: vec!["a".into(), "```".into(), "b".into()],
            },
            para("after"),
        ]
    );
}

#[test]
fn test_unterminated_fence_runs_to_end() {
    let result = Parser::new().parse_with_diagnostics("intro\n```python\nprint(1)\n\n- not a list");

    assert_eq!(
        result.document.blocks,
        vec![
            para("intro"),
            Block::CodeBlock {
                language: Some("python".into()),
                lines: vec!["print(1)".into(), "".into(), "- not a list".into()],
            },
        ]
    );
    let diag: Vec<_> = result.diagnostics.iter().collect();
    assert_eq!(diag.len(), 1);
    assert_eq!(diag[0].kind, DiagnosticKind::UnterminatedFence);
    assert_eq!(diag[0].line, 2);
}

#[test]
fn test_fence_closes_open_list() {
    let doc = parse("- a\n```\ncode\n```");
    assert_eq!(kinds(&doc.blocks), vec!["list", "code_block"]);
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_contiguous_items_form_one_list() {
    let doc = parse("- one\n- two\n- three");
    match &doc.blocks[..] {
        [Block::List { kind, items }] => {
            assert_eq!(*kind, ListKind::Unordered);
            assert_eq!(items.len(), 3);
            assert_eq!(items[2].content, vec![text("three")]);
        }
        other => panic!("Expected one list, got {:?}", other),
    }
}

#[test]
fn test_mixed_bullets_share_a_list() {
    let doc = parse("- a\n+ b\n* c");
    assert!(matches!(&doc.blocks[..], [Block::List { items, .. }] if items.len() == 3));
}

#[test]
fn test_kind_change_splits_lists() {
    let doc = parse("1. first\n2. second\n- bullet");
    match &doc.blocks[..] {
        [Block::List {
            kind: ListKind::Ordered,
            items: a,
        }, Block::List {
            kind: ListKind::Unordered,
            items: b,
        }] => {
            assert_eq!(a.len(), 2);
            assert_eq!(b.len(), 1);
        }
        other => panic!("Expected two lists, got {:?}", other),
    }
}

#[test]
fn test_depth_is_literal_indentation() {
    let doc = parse("- top\n  - two\n    - four\n\t- tab");
    let Block::List { items, .. } = &doc.blocks[0] else {
        panic!("Expected list");
    };
    let depths: Vec<_> = items.iter().map(|i| i.depth).collect();
    assert_eq!(depths, vec![0, 2, 4, 1]);
}

#[test]
fn test_single_blank_keeps_list_open() {
    let doc = parse("- a\n\n- b");
    assert!(matches!(&doc.blocks[..], [Block::List { items, .. }] if items.len() == 2));
}

#[test]
fn test_two_blanks_end_list() {
    let doc = parse("- a\n\n\n- b");
    assert_eq!(kinds(&doc.blocks), vec!["list", "spacer", "list"]);
}

#[test]
fn test_text_line_ends_list() {
    let doc = parse("- a\nafter");
    assert_eq!(kinds(&doc.blocks), vec!["list", "paragraph"]);
}

#[test]
fn test_list_item_inline_content() {
    let doc = parse("1. **Entry:** 100 and `stop` at [chart](https://x.io)");
    let Block::List { items, .. } = &doc.blocks[0] else {
        panic!("Expected list");
    };
    assert_eq!(
        items[0].content,
        vec![
            bold("Entry:"),
            text(" 100 and "),
            Inline::Code("stop".into()),
            text(" at "),
            Inline::Link {
                label: "chart".into(),
                url: "https://x.io".into(),
            },
        ]
    );
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_simple_table() {
    let doc = parse("| A | B |\n|---|---|\n| 1 | 2 |");
    assert_eq!(
        doc.blocks,
        vec![Block::Table {
            headers: vec![vec![text("A")], vec![text("B")]],
            rows: vec![vec![vec![text("1")], vec![text("2")]]],
        }]
    );
}

#[test]
fn test_table_without_separator_keeps_second_line() {
    let doc = parse("| A |\n| 1 |");
    let Block::Table { rows, .. } = &doc.blocks[0] else {
        panic!("Expected table");
    };
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_table_closes_on_line_without_pipe() {
    let doc = parse("| A |\n|---|\n| 1 |\nafter");
    assert_eq!(kinds(&doc.blocks), vec!["table", "paragraph"]);
}

#[test]
fn test_table_continues_on_any_pipe_line() {
    let doc = parse("| A | B |\n|---|---|\n1 | 2");
    let Block::Table { rows, .. } = &doc.blocks[0] else {
        panic!("Expected table");
    };
    assert_eq!(rows, &vec![vec![vec![text("1")], vec![text("2")]]]);
}

#[test]
fn test_ragged_rows_are_reported_not_fixed() {
    let result = Parser::new().parse_with_diagnostics("| A | B |\n|---|---|\n| 1 |\n| 1 | 2 | 3 |");

    let Block::Table { headers, rows } = &result.document.blocks[0] else {
        panic!("Expected table");
    };
    assert_eq!(headers.len(), 2);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[1].len(), 3);

    let lines: Vec<_> = result.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![3, 4]);
}

// ============================================================================
// Blockquote and Rule Tests
// ============================================================================

#[test]
fn test_blockquote() {
    let doc = parse("> Markets are *volatile*");
    assert_eq!(
        doc.blocks,
        vec![Block::Blockquote {
            content: vec![
                text("Markets are "),
                Inline::Italic(vec![text("volatile")])
            ],
        }]
    );
}

#[test]
fn test_separate_quotes_stay_separate() {
    let doc = parse("> a\n\n> b");
    assert_eq!(kinds(&doc.blocks), vec!["blockquote", "spacer", "blockquote"]);
}

#[test]
fn test_rule_alone() {
    assert_eq!(parse("---").blocks, vec![Block::HorizontalRule]);
}

#[rstest]
#[case("***")]
#[case("___")]
#[case("- - -")]
#[case("  ----------  ")]
fn test_rule_variants(#[case] input: &str) {
    assert_eq!(parse(input).blocks, vec![Block::HorizontalRule]);
}

// ============================================================================
// Preprocessor Integration
// ============================================================================

#[test]
fn test_pseudo_heading_for_known_section() {
    let doc = parse("**Key Levels: support at 100**");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 3,
                content: vec![text("Key Levels")],
            },
            para("support at 100"),
        ]
    );
}

#[test]
fn test_pseudo_heading_for_unknown_label() {
    let doc = parse("**Return: 12.5%**");
    assert_eq!(
        doc.blocks,
        vec![Block::Paragraph {
            content: vec![bold("Return:"), text(" 12.5%")],
        }]
    );
}

#[test]
fn test_whole_line_bold_without_preprocessing() {
    let doc = Parser::new()
        .with_preprocess(false)
        .parse("**Key Levels: support at 100**");
    assert_eq!(
        doc.blocks,
        vec![Block::Paragraph {
            content: vec![bold("Key Levels:"), text(" support at 100")],
        }]
    );
}

#[test]
fn test_custom_section_keywords() {
    let doc = Parser::new()
        .with_section_keywords(["Risk"])
        .with_section_heading_level(2)
        .parse("**Risk Factors: leverage**\n**Key: x**");
    assert_eq!(
        kinds(&doc.blocks),
        vec!["heading", "paragraph", "paragraph"]
    );
    assert!(matches!(doc.blocks[0], Block::Heading { level: 2, .. }));
}

// ============================================================================
// Realistic Input
// ============================================================================

#[test]
fn test_analysis_report() {
    let input = "\
## BTC Daily Summary

**Current Trend: bullish above the 50-day MA**

**Risk: moderate**

| Level | Price |
|:------|------:|
| Support | 61,200 |
| Resistance | 64,800 |

1. Wait for a *retest* of support
2. Enter with a `2%` stop

> Not financial advice.
---
";
    let doc = parse(input);
    assert_eq!(
        kinds(&doc.blocks),
        vec![
            "heading",
            "spacer",
            "heading",
            "paragraph",
            "spacer",
            "paragraph",
            "spacer",
            "table",
            "spacer",
            "list",
            "spacer",
            "blockquote",
            "horizontal_rule",
        ]
    );
}

#[test]
fn test_parse_is_deterministic() {
    let input = "# T\n- a\n\n| x |\n```\n**b**";
    assert_eq!(parse(input), parse(input));
}
