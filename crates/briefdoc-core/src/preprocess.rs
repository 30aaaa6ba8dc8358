//! Pseudo-heading normalization.
//!
//! Analysis services often mark sections with a whole line in bold, such as
//! `**Key Levels: support at 100**`, instead of a real heading. This pass
//! rewrites those lines before segmentation:
//!
//! - label matches a section keyword: `### Key Levels` then `support at 100`
//!   on its own line
//! - any other label: `**Return:** 12.5%` on a single line
//!
//! Lines inside code fences are never touched.

use std::borrow::Cow;

use crate::lexer::Lexer;
use crate::options::ParserOptions;

/// Rewrite whole-line bold pseudo-headings.
///
/// Returns the input unchanged (borrowed) when no line needed rewriting.
/// Rewritten output uses `\n` line endings.
pub fn normalize<'a>(input: &'a str, options: &ParserOptions) -> Cow<'a, str> {
    let mut out: Option<String> = None;
    let mut fence: Option<&'static str> = None;

    for line in Lexer::new(input) {
        let rewritten = match fence {
            Some(marker) => {
                if line.text.trim_start().starts_with(marker) {
                    fence = None;
                }
                None
            }
            None => {
                fence = line.fence_marker();
                if fence.is_some() {
                    None
                } else {
                    rewrite_line(line.text, options)
                }
            }
        };

        match (&mut out, rewritten) {
            (Some(buf), Some(new)) => {
                buf.push_str(&new);
                buf.push('\n');
            }
            (Some(buf), None) => {
                buf.push_str(line.text);
                buf.push('\n');
            }
            (None, Some(new)) => {
                // first rewrite: copy every line seen so far
                let mut buf = String::with_capacity(input.len() + 16);
                for earlier in Lexer::new(input).take(line.number - 1) {
                    buf.push_str(earlier.text);
                    buf.push('\n');
                }
                buf.push_str(&new);
                buf.push('\n');
                out = Some(buf);
            }
            (None, None) => {}
        }
    }

    match out {
        Some(mut buf) => {
            if !input.ends_with('\n') {
                buf.pop();
            }
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(input),
    }
}

/// Rewrite a single line, or `None` when it is not a pseudo-heading.
pub fn rewrite_line(line: &str, options: &ParserOptions) -> Option<String> {
    let inner = line.trim().strip_prefix("**")?.strip_suffix("**")?;
    let inner = inner.trim();
    if inner.is_empty() || inner.contains("**") {
        return None;
    }

    let hashes = "#".repeat(options.heading_level() as usize);

    let Some(colon) = inner.find(':') else {
        return options
            .is_section_label(inner)
            .then(|| format!("{hashes} {inner}"));
    };

    let label = inner[..colon].trim();
    let content = inner[colon + 1..].trim();
    if label.is_empty() {
        return None;
    }

    if options.is_section_label(label) {
        if content.is_empty() {
            Some(format!("{hashes} {label}"))
        } else {
            Some(format!("{hashes} {label}\n{content}"))
        }
    } else if content.is_empty() {
        Some(format!("**{label}:**"))
    } else {
        Some(format!("**{label}:** {content}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn norm(input: &str) -> String {
        normalize(input, &ParserOptions::default()).into_owned()
    }

    #[test]
    fn known_section_becomes_heading_and_content() {
        assert_eq!(
            norm("**Key Levels: support at 100**"),
            "### Key Levels\nsupport at 100"
        );
    }

    #[test]
    fn unknown_label_stays_inline() {
        assert_eq!(norm("**Return: 12.5%**"), "**Return:** 12.5%");
    }

    #[test]
    fn section_without_colon() {
        assert_eq!(norm("**Technical Analysis**"), "### Technical Analysis");
        assert_eq!(norm("**Bullish**"), "**Bullish**");
    }

    #[test]
    fn untouched_input_is_borrowed() {
        let input = "plain\n**bold** word\n";
        assert!(matches!(
            normalize(input, &ParserOptions::default()),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn keeps_surrounding_lines_and_trailing_newline() {
        assert_eq!(
            norm("intro\n**Current Price: $10**\nend\n"),
            "intro\n### Current Price\n$10\nend\n"
        );
    }

    #[test]
    fn fenced_lines_are_left_alone() {
        let input = "```\n**Key: x**\n```\n**Key: y**";
        assert_eq!(norm(input), "```\n**Key: x**\n```\n### Key\ny");
    }

    #[test]
    fn custom_keywords_and_level() {
        let opts = ParserOptions {
            section_keywords: vec!["Outlook".into()],
            section_heading_level: 2,
            ..ParserOptions::default()
        };
        assert_eq!(
            normalize("**Outlook: mixed**", &opts),
            "## Outlook\nmixed"
        );
        assert_eq!(normalize("**Key: x**", &opts), "**Key:** x");
    }

    #[test]
    fn inner_bold_is_not_a_pseudo_heading() {
        assert_eq!(rewrite_line("**a** and **b**", &ParserOptions::default()), None);
        assert_eq!(rewrite_line("****", &ParserOptions::default()), None);
    }
}
