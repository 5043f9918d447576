use tracing::debug;

use crate::render::html::{disabled_attr, escape_attr, escape_html, humanize, required_attr};
use crate::render::registry::{FieldCtx, FieldRenderer, RendererRegistry};
use crate::schema::classifier::{classify, FieldKind};
use crate::schema::value::Value;

// ============================================================================
// Scalar renderers — text, number, decimal, boolean, date, time
// ============================================================================

fn placeholder_text(ctx: &FieldCtx, verb: &str) -> String {
    let mut text = format!("{} {}", verb, humanize(ctx.field_name).to_lowercase());
    if classify(ctx.descriptor).is_optional {
        text.push_str(" (Optional)");
    }
    text
}

/// Best-effort display form; never fails on an unexpected value shape.
///
/// `Bool(false)` yields "false", not an empty string, so a false flag stays
/// visible in fallback paths.
fn display_value(ctx: &FieldCtx) -> String {
    match &ctx.value {
        Value::Null => String::new(),
        other => {
            if !matches!(
                other,
                Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Decimal(_)
            ) {
                debug!(
                    field = ctx.field_name,
                    "display fallback for non-scalar value"
                );
            }
            other.display_string()
        }
    }
}

/// Free-text renderer; the kind-based fallback for unknown types.
pub struct StringRenderer;

impl FieldRenderer for StringRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let wire = ctx.wire_name();
        format!(
            "<textarea id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" rows=\"2\" \
             class=\"w-full\" placeholder=\"{placeholder}\"{required}{disabled}>{value}</textarea>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            placeholder = escape_attr(&placeholder_text(ctx, "Enter")),
            required = required_attr(ctx.required),
            disabled = disabled_attr(ctx.disabled),
            value = escape_html(&display_value(ctx)),
        )
    }
}

/// Integer and float renderer; integer fields get unit step, floats step-any.
pub struct NumberRenderer;

impl FieldRenderer for NumberRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let float = matches!(
            classify(ctx.descriptor).kind,
            FieldKind::Number { float: true }
        );
        let wire = ctx.wire_name();
        format!(
            "<input type=\"number\" id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" \
             value=\"{value}\" step=\"{step}\" class=\"w-full\" placeholder=\"{placeholder}\"{required}{disabled}>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            value = escape_attr(&display_value(ctx)),
            step = if float { "any" } else { "1" },
            placeholder = escape_attr(&placeholder_text(ctx, "Enter")),
            required = required_attr(ctx.required),
            disabled = disabled_attr(ctx.disabled),
        )
    }
}

/// Decimal renderer: step-any numeric input whose value is the canonical
/// decimal text, preserving full precision.
pub struct DecimalRenderer;

impl FieldRenderer for DecimalRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let wire = ctx.wire_name();
        format!(
            "<input type=\"number\" id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" \
             value=\"{value}\" step=\"any\" inputmode=\"decimal\" class=\"w-full\" \
             placeholder=\"{placeholder}\"{required}{disabled}>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            value = escape_attr(&display_value(ctx)),
            placeholder = escape_attr(&placeholder_text(ctx, "Enter")),
            required = required_attr(ctx.required),
            disabled = disabled_attr(ctx.disabled),
        )
    }
}

/// Checkbox renderer. A false value renders unchecked, never as an empty
/// string.
pub struct BooleanRenderer;

impl FieldRenderer for BooleanRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let checked = match &ctx.value {
            Value::Bool(b) => *b,
            Value::Str(s) => s == "on" || s == "true" || s == "1",
            _ => false,
        };
        let wire = ctx.wire_name();
        format!(
            "<input type=\"checkbox\" id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\"{checked}{disabled}>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            checked = if checked { " checked" } else { "" },
            disabled = disabled_attr(ctx.disabled),
        )
    }
}

/// Date input with ISO-8601 (`YYYY-MM-DD`) value formatting.
pub struct DateRenderer;

impl FieldRenderer for DateRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let formatted = match &ctx.value {
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            // Submitted strings pass through; validation decides what parses
            Value::Str(s) => s.clone(),
            _ => String::new(),
        };
        let wire = ctx.wire_name();
        format!(
            "<input type=\"date\" id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" \
             value=\"{value}\" class=\"w-full\" placeholder=\"{placeholder}\"{required}{disabled}>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            value = escape_attr(&formatted),
            placeholder = escape_attr(&placeholder_text(ctx, "Select")),
            required = required_attr(ctx.required),
            disabled = disabled_attr(ctx.disabled),
        )
    }
}

/// Time input with `HH:MM` value formatting.
pub struct TimeRenderer;

impl FieldRenderer for TimeRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let formatted = match &ctx.value {
            Value::Time(t) => t.format("%H:%M").to_string(),
            Value::Str(s) => s.clone(),
            _ => String::new(),
        };
        let wire = ctx.wire_name();
        format!(
            "<input type=\"time\" id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" \
             value=\"{value}\" class=\"w-full\" placeholder=\"{placeholder}\"{required}{disabled}>",
            wire = escape_attr(&wire),
            path = escape_attr(&ctx.data_path()),
            value = escape_attr(&formatted),
            placeholder = escape_attr(&placeholder_text(ctx, "Select")),
            required = required_attr(ctx.required),
            disabled = disabled_attr(ctx.disabled),
        )
    }
}
