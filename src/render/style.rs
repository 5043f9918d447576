// ============================================================================
// Spacing themes — semantic tokens to utility classes
// ============================================================================

/// Form layout density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingTheme {
    #[default]
    Normal,
    Compact,
}

impl SpacingTheme {
    /// Parse a theme name; unknown names fall back to normal.
    pub fn parse(name: &str) -> SpacingTheme {
        match name.to_lowercase().as_str() {
            "compact" => SpacingTheme::Compact,
            _ => SpacingTheme::Normal,
        }
    }
}

/// Semantic spacing token resolved per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingToken {
    OuterMargin,
    OuterMarginSm,
    InnerGap,
    InnerGapSmall,
    Padding,
    PaddingSm,
    PaddingCard,
    CardBorder,
    SectionDivider,
    AccordionDivider,
    StackGap,
}

/// Return the utility class for a semantic token under a theme.
pub fn spacing(token: SpacingToken, theme: SpacingTheme) -> &'static str {
    match theme {
        SpacingTheme::Normal => match token {
            SpacingToken::OuterMargin => "mb-4",
            SpacingToken::OuterMarginSm => "mb-2",
            SpacingToken::InnerGap => "space-y-3",
            SpacingToken::InnerGapSmall => "space-y-2",
            SpacingToken::Padding => "p-4",
            SpacingToken::PaddingSm => "p-3",
            SpacingToken::PaddingCard => "px-4 py-3",
            SpacingToken::CardBorder => "border",
            SpacingToken::SectionDivider => "border-t border-gray-200",
            SpacingToken::AccordionDivider => "uk-accordion-divider",
            SpacingToken::StackGap => "space-y-4",
        },
        SpacingTheme::Compact => match token {
            SpacingToken::OuterMargin => "mb-2",
            SpacingToken::OuterMarginSm => "mb-1",
            SpacingToken::InnerGap => "space-y-1",
            SpacingToken::InnerGapSmall => "space-y-1",
            SpacingToken::Padding => "p-2",
            SpacingToken::PaddingSm => "p-1",
            SpacingToken::PaddingCard => "px-2 py-1",
            SpacingToken::CardBorder => "",
            SpacingToken::SectionDivider => "",
            SpacingToken::AccordionDivider => "",
            SpacingToken::StackGap => "space-y-1",
        },
    }
}

/// CSS override that kills residual borders in compact mode.
pub const COMPACT_EXTRA_CSS: &str = r#"
.compact-form .uk-accordion > li,
.compact-form .uk-accordion .uk-accordion-content {
    border: 0 !important;
}
"#;
