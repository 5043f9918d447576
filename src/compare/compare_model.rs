use std::collections::BTreeMap;

use tracing::warn;

use crate::compare::copy::{apply_copy, CopyOutcome};
use crate::error::{error_fragment, FormError};
use crate::form::compiler;
use crate::form::form_model::FormInstance;
use crate::render::html::{escape_attr, escape_html};
use crate::render::metrics::{MetricEntry, MetricsMap};
use crate::render::registry::CopyUi;
use crate::schema::path::FieldPath;
use crate::schema::schema_model::FieldDef;
use crate::schema::value::Value;

// ============================================================================
// Comparison pair — synchronized dual-column view
// ============================================================================

/// Which column of a comparison pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn parse(name: &str) -> Option<Side> {
        match name {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Two form instances bound under a shared pair identifier, rendered as a
/// two-column grid with matching CSS ordering so client logic can mirror
/// and copy between the same path on both sides.
///
/// The pair is a view-level composition: state lives in the underlying
/// form instances.
#[derive(Clone)]
pub struct ComparisonPair {
    pub name: String,
    pub left: FormInstance,
    pub right: FormInstance,
    pub left_label: String,
    pub right_label: String,
    /// Show copy-into-left buttons in the left column
    pub copy_left: bool,
    /// Show copy-into-right buttons in the right column
    pub copy_right: bool,
}

impl ComparisonPair {
    pub fn new(name: &str, left: FormInstance, right: FormInstance) -> ComparisonPair {
        if left.schema != right.schema {
            // Different schemas are allowed; only the shared paths mirror
            warn!(
                pair = name,
                "comparison sides use different schemas, only shared paths will mirror"
            );
        }
        ComparisonPair {
            name: name.to_string(),
            left,
            right,
            left_label: "Reference".to_string(),
            right_label: "Generated".to_string(),
            copy_left: false,
            copy_right: false,
        }
    }

    pub fn with_labels(mut self, left: &str, right: &str) -> ComparisonPair {
        self.left_label = left.to_string();
        self.right_label = right.to_string();
        self
    }

    pub fn with_copy(mut self, copy_left: bool, copy_right: bool) -> ComparisonPair {
        self.copy_left = copy_left;
        self.copy_right = copy_right;
        self
    }

    pub fn form(&self, side: Side) -> &FormInstance {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn form_mut(&mut self, side: Side) -> &mut FormInstance {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn label(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_label,
            Side::Right => &self.right_label,
        }
    }

    fn refresh_url(&self, side: Side) -> String {
        format!("/compare/{}/{}/refresh", self.name, side.as_str())
    }

    fn reset_url(&self, side: Side) -> String {
        format!("/compare/{}/{}/reset", self.name, side.as_str())
    }

    /// Render one column: a header cell plus one grid cell per top-level
    /// field, each carrying `data-path` metadata and a CSS `order` that
    /// interleaves with the other column.
    pub fn render_column(&self, side: Side) -> String {
        let form = self.form(side);
        let start_order = match side {
            Side::Left => 0,
            Side::Right => 1,
        };

        let mut cells = format!(
            "<div class=\"pb-2 border-b\" style=\"order:{order}\">\
             <h3 class=\"text-lg font-semibold text-gray-700\">{label}</h3></div>\n",
            order = start_order,
            label = escape_html(self.label(side)),
        );

        // Copy buttons live in the column they copy INTO, and only when the
        // target form accepts edits
        let copy_feature = match side {
            Side::Left => self.copy_left,
            Side::Right => self.copy_right,
        };
        let copy_enabled = copy_feature && !form.disabled;

        let prefix = form.base_prefix();
        let mut order_idx = start_order + 2;
        for field in &form.schema.fields {
            if form.exclude_fields.contains(&field.name) {
                continue;
            }

            let copy = if copy_enabled {
                Some(CopyUi {
                    pair_name: &self.name,
                    target_side: side.as_str(),
                    own_prefix: &prefix,
                })
            } else {
                None
            };

            let mut ctx = compiler::top_level_ctx(form, field, copy);
            ctx.refresh_url = self.refresh_url(side);

            cells.push_str(&format!(
                "<div data-path=\"{path}\" style=\"order:{order}\">{html}</div>\n",
                path = escape_attr(&field.name),
                order = order_idx,
                html = form.registry().render_field(&ctx),
            ));
            order_idx += 2;
        }

        format!(
            "<div id=\"{wrapper}\" class=\"contents\">\n{cells}</div>",
            wrapper = escape_attr(&form.wrapper_id()),
            cells = cells,
        )
    }

    /// Render the full two-column grid plus the prefix globals the copy
    /// script needs.
    pub fn render_inputs(&self) -> String {
        let prefix_script = format!(
            "<script>window.__sfLeftPrefix = \"{}\"; window.__sfRightPrefix = \"{}\";</script>",
            escape_attr(&self.left.base_prefix()),
            escape_attr(&self.right.base_prefix()),
        );

        format!(
            "<div class=\"w-full\">{script}\n\
             <div class=\"sf-compare grid grid-cols-2 gap-x-6 gap-y-2 items-start\" id=\"{grid}\">\n\
             {left}\n{right}\n</div></div>",
            script = prefix_script,
            grid = escape_attr(&format!("{}-comparison-grid", self.name)),
            left = self.render_column(Side::Left),
            right = self.render_column(Side::Right),
        )
    }

    /// Wrap comparison content in a form element.
    pub fn form_wrapper(&self, content: &str) -> String {
        format!(
            "<form id=\"{form_id}\"><div id=\"{wrapper_id}\">{content}</div></form>",
            form_id = escape_attr(&format!("{}-comparison-form", self.name)),
            wrapper_id = escape_attr(&format!("{}-comparison-wrapper", self.name)),
            content = content,
        )
    }

    /// Reconcile a submission into one side and re-render that column only.
    /// The other side's markup (and accordion state) is untouched.
    pub fn handle_refresh(&mut self, side: Side, submission: &BTreeMap<String, String>) -> String {
        let parsed = self.form(side).parse(submission);
        self.form_mut(side).values = parsed;
        self.render_column(side)
    }

    /// Reset one side to its initial values and re-render that column only.
    pub fn handle_reset(&mut self, side: Side) -> String {
        let initial = self.form(side).initial_values.clone();
        self.form_mut(side).values = initial;
        self.render_column(side)
    }

    /// Apply a copy request: `path` in dot/bracket notation, copied from
    /// the opposite side into `target_side`.
    pub fn handle_copy(
        &mut self,
        path: &str,
        target_side: Side,
    ) -> Result<CopyOutcome, FormError> {
        let parsed = FieldPath::parse_data_path(path)?;
        let (source, target) = match target_side {
            Side::Left => (&self.right, &mut self.left),
            Side::Right => (&self.left, &mut self.right),
        };
        apply_copy(source, target, &parsed)
    }

    /// Copy as markup: fragment html on success, an alert fragment on
    /// failure. Existing target state is never corrupted by a failed copy.
    pub fn copy_markup(&mut self, path: &str, target_side: Side) -> String {
        match self.handle_copy(path, target_side) {
            Ok(outcome) => outcome.html(),
            Err(err) => error_fragment(&err),
        }
    }

    fn side_button(&self, side: Side, action: &str, label: &str, confirm: bool) -> String {
        let form = self.form(side);
        let url = match action {
            "reset" => self.reset_url(side),
            _ => self.refresh_url(side),
        };
        let confirm_attr = if confirm {
            " hx-confirm=\"Are you sure you want to reset this side to its initial values?\""
        } else {
            ""
        };
        format!(
            "<button type=\"button\" class=\"{cls}\" hx-post=\"{url}\" \
             hx-target=\"#{wrapper}\" hx-swap=\"innerHTML\" \
             hx-include=\"form [name^='{prefix}']\"{confirm}>{label}</button>",
            cls = if confirm {
                "uk-button-danger"
            } else {
                "uk-button-secondary"
            },
            url = escape_attr(&url),
            wrapper = escape_attr(&form.wrapper_id()),
            prefix = escape_attr(&form.base_prefix()),
            confirm = confirm_attr,
            label = escape_html(label),
        )
    }

    pub fn left_refresh_button(&self, text: Option<&str>) -> String {
        self.side_button(Side::Left, "refresh", text.unwrap_or("Refresh Left"), false)
    }

    pub fn left_reset_button(&self, text: Option<&str>) -> String {
        self.side_button(Side::Left, "reset", text.unwrap_or("Reset Left"), true)
    }

    pub fn right_refresh_button(&self, text: Option<&str>) -> String {
        self.side_button(Side::Right, "refresh", text.unwrap_or("Refresh Right"), false)
    }

    pub fn right_reset_button(&self, text: Option<&str>) -> String {
        self.side_button(Side::Right, "reset", text.unwrap_or("Reset Right"), true)
    }
}

/// Equality-based metrics for a comparison: exact matches score 1.0,
/// missing sides 0.0, differing strings get a character-overlap ratio.
pub fn simple_diff_metrics(
    left: &Value,
    right: &Value,
    fields: &[FieldDef],
) -> MetricsMap {
    let mut metrics = MetricsMap::new();

    for field in fields {
        let left_val = left.get(&field.name);
        let right_val = right.get(&field.name);

        let entry = match (left_val, right_val) {
            (Some(l), Some(r)) if l == r => MetricEntry::score(1.0)
                .with_color("green")
                .with_comment("Values match exactly"),
            (None, _) | (_, None) => MetricEntry::score(0.0)
                .with_color("orange")
                .with_comment("One value is missing"),
            (Some(Value::Str(l)), Some(Value::Str(r))) => {
                let common = l.chars().zip(r.chars()).filter(|(a, b)| a == b).count();
                let max_len = l.chars().count().max(r.chars().count());
                let similarity = if max_len > 0 {
                    common as f64 / max_len as f64
                } else {
                    0.0
                };
                let rounded = (similarity * 100.0).round() / 100.0;
                MetricEntry::score(rounded)
                    .with_comment(&format!("String similarity: {:.0}%", similarity * 100.0))
            }
            (Some(l), Some(r)) => MetricEntry::score(0.0).with_comment(&format!(
                "Different values: {} vs {}",
                l.display_string(),
                r.display_string()
            )),
        };

        metrics.insert(field.name.clone(), entry);
    }

    metrics
}
