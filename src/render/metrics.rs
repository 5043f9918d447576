use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::render::html::{escape_attr, escape_html};

// ============================================================================
// Metric decoration — score annotations on rendered fields
// ============================================================================

/// Annotation attached to a field path at render time. Never affects the
/// reconciled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricEntry {
    /// Score in [0, 1]; drives color banding
    #[serde(default)]
    pub metric: Option<f64>,

    /// Explicit override color; takes precedence over the score bucket
    #[serde(default)]
    pub color: Option<String>,

    /// Free text rendered as a tooltip
    #[serde(default)]
    pub comment: Option<String>,
}

impl MetricEntry {
    pub fn score(metric: f64) -> MetricEntry {
        MetricEntry {
            metric: Some(metric),
            color: None,
            comment: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> MetricEntry {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> MetricEntry {
        self.comment = Some(comment.to_string());
        self
    }
}

/// Field data-path to metric entry.
pub type MetricsMap = BTreeMap<String, MetricEntry>;

/// Fallback for absent or out-of-range scores.
pub const DEFAULT_METRIC_GREY: &str = "#9E9E9E";

/// Map a score to (background, text) colors over fixed buckets:
/// exactly 0 is red, the low band dark red, the high band green, exactly 1
/// bright green; anything outside [0, 1] falls back to grey.
pub fn metric_colors(metric: Option<f64>) -> (&'static str, &'static str) {
    let m = match metric {
        Some(m) if (0.0..=1.0).contains(&m) => m,
        _ => return (DEFAULT_METRIC_GREY, "white"),
    };

    if m == 0.0 {
        ("#D32F2F", "white")
    } else if m == 1.0 {
        ("#00C853", "white")
    } else if m < 0.67 {
        ("#8B0000", "#fca5a5")
    } else {
        ("#2E7D32", "#86efac")
    }
}

/// Effective border color for an entry: explicit override first, score
/// bucket second, `None` when neither is usable.
pub fn border_color(entry: &MetricEntry) -> Option<String> {
    if let Some(color) = &entry.color {
        return Some(color.clone());
    }
    entry.metric.map(|m| metric_colors(Some(m)).0.to_string())
}

/// Convert a CSS color in common formats to `rgba(r, g, b, o)`.
///
/// Accepts `#rgb`, `#rrggbb`, `rgb(...)`, `rgba(...)` (embedded opacity is
/// replaced by the parameter) and a small named set. Unparseable input falls
/// back to grey rather than erroring.
pub fn robust_color_to_rgba(color: &str, opacity: f64) -> String {
    let trimmed = color.trim();

    if let Some((r, g, b)) = parse_hex(trimmed)
        .or_else(|| parse_rgb_call(trimmed))
        .or_else(|| lookup_named(trimmed))
    {
        return format!("rgba({}, {}, {}, {})", r, g, b, opacity);
    }

    // Grey fallback
    format!("rgba(158, 158, 158, {})", opacity)
}

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some((out[0], out[1], out[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_call(s: &str) -> Option<(u8, u8, u8)> {
    let lower = s.to_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let mut parts = inner.split(',').map(|p| p.trim());
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    Some((r, g, b))
}

fn lookup_named(s: &str) -> Option<(u8, u8, u8)> {
    match s.to_lowercase().as_str() {
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "orange" => Some((255, 165, 0)),
        "yellow" => Some((255, 255, 0)),
        "purple" => Some((128, 0, 128)),
        "darkred" => Some((139, 0, 0)),
        "gray" | "grey" => Some((128, 128, 128)),
        _ => None,
    }
}

/// Where a decoration applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationScope {
    Border,
    Bullet,
    Both,
}

/// Decorate rendered markup with a metric indicator.
///
/// Border scope wraps the element with a colored left border; bullet scope
/// appends a small score badge; both applies both. Comments become `title`
/// tooltips on the wrapper. Purely additive, intended for a single pass per
/// render.
pub fn decorate(html: &str, entry: &MetricEntry, scope: DecorationScope) -> String {
    let tooltip = match &entry.comment {
        Some(comment) => format!(" title=\"{}\"", escape_attr(comment)),
        None => String::new(),
    };

    let bordered = match scope {
        DecorationScope::Border | DecorationScope::Both => {
            let color = border_color(entry).unwrap_or_else(|| DEFAULT_METRIC_GREY.to_string());
            let rgba = robust_color_to_rgba(&color, 0.8);
            format!(
                "<div class=\"sf-metric-border\" style=\"border-left: 4px solid {}; padding-left: 6px;\"{}>{}</div>",
                rgba, tooltip, html
            )
        }
        DecorationScope::Bullet => html.to_string(),
    };

    match scope {
        DecorationScope::Bullet | DecorationScope::Both => {
            format!(
                "<div class=\"relative inline-flex items-center w-full\"{}>{}{}</div>",
                if scope == DecorationScope::Bullet {
                    tooltip.as_str()
                } else {
                    ""
                },
                bordered,
                metric_badge(entry),
            )
        }
        DecorationScope::Border => bordered,
    }
}

/// Small badge showing the score (or a dot when only a color is set).
pub fn metric_badge(entry: &MetricEntry) -> String {
    let (bg, text) = match &entry.color {
        Some(color) => (color.clone(), "white".to_string()),
        None => {
            let (bg, text) = metric_colors(entry.metric);
            (bg.to_string(), text.to_string())
        }
    };

    let label = match entry.metric {
        Some(m) => format!("{:.2}", m),
        None => "\u{2022}".to_string(),
    };

    format!(
        "<span class=\"sf-metric-badge ml-2\" style=\"background: {}; color: {}; border-radius: 8px; padding: 1px 6px; font-size: 11px;\">{}</span>",
        escape_attr(&bg),
        escape_attr(&text),
        escape_html(&label),
    )
}
