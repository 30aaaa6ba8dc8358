//! JSON shape of the document tree (requires the `serde` feature).

use briefdoc_core::{parse, Document};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_blocks_are_tagged_by_type() {
    let doc = parse("# Title\n\n- **a**\n---");
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value,
        json!({
            "blocks": [
                { "type": "heading", "level": 1, "content": [
                    { "type": "text", "value": "Title" }
                ]},
                { "type": "spacer" },
                { "type": "list", "kind": "unordered", "items": [
                    { "depth": 0, "content": [
                        { "type": "bold", "value": [{ "type": "text", "value": "a" }] }
                    ]}
                ]},
                { "type": "horizontal_rule" }
            ]
        })
    );
}

#[test]
fn test_code_and_links() {
    let doc = parse("```sh\nls\n```\n[site](https://example.com)");
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value["blocks"][0],
        json!({ "type": "code_block", "language": "sh", "lines": ["ls"] })
    );
    assert_eq!(
        value["blocks"][1]["content"][0],
        json!({ "type": "link", "value": { "label": "site", "url": "https://example.com" } })
    );
}

#[test]
fn test_json_reads_back_to_same_tree() {
    let doc = parse("| A | B |\n|---|---|\n| 1 | *2* |\n> quote");
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}
