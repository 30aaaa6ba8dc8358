//! Parser configuration.

/// Section keywords promoted to headings by the preprocessor.
pub const DEFAULT_SECTION_KEYWORDS: &[&str] = &["Current", "Key", "Trading", "Technical"];

/// Heading level used for promoted pseudo-headings.
pub const DEFAULT_SECTION_HEADING_LEVEL: u8 = 3;

/// Options controlling preprocessing.
///
/// The block and inline grammar is fixed; options only affect how
/// whole-line bold pseudo-headings are normalized before segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Run the pseudo-heading preprocessor before segmentation.
    pub preprocess: bool,
    /// Labels whose first word matches one of these become headings.
    pub section_keywords: Vec<String>,
    /// Level of promoted headings (clamped to 1-6).
    pub section_heading_level: u8,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            preprocess: true,
            section_keywords: DEFAULT_SECTION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            section_heading_level: DEFAULT_SECTION_HEADING_LEVEL,
        }
    }
}

impl ParserOptions {
    /// Whether the first word of `label` is a configured section keyword.
    ///
    /// Matching is ASCII case-insensitive.
    pub fn is_section_label(&self, label: &str) -> bool {
        let Some(first) = label.split_whitespace().next() else {
            return false;
        };
        self.section_keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(first))
    }

    /// Heading level for promoted labels, always within 1-6.
    #[inline]
    pub fn heading_level(&self) -> u8 {
        self.section_heading_level.clamp(1, 6)
    }
}
