use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::warn;

use crate::form::compiler;
use crate::form::reconcile;
use crate::form::validate::{ErrorList, SchemaValidator, ValidationDelegate};
use crate::render::html::escape_attr;
use crate::render::metrics::MetricsMap;
use crate::render::registry::RendererRegistry;
use crate::render::style::SpacingTheme;
use crate::schema::defaults::{Clock, SystemClock};
use crate::schema::schema_model::Schema;
use crate::schema::value::Value;

// ============================================================================
// Form instance — one logical form, reconstructed per request
// ============================================================================

/// A renderable form: a namespace, a schema reference, the current value
/// tree, and presentation configuration.
///
/// The core holds no persistent store; an instance is rebuilt per request
/// from the namespace plus whatever initial-values payload the caller
/// supplies. The value tree is replaced, not mutated in place, on refresh
/// and reset.
#[derive(Clone)]
pub struct FormInstance {
    /// Unique namespace; the root of every generated wire name
    pub name: String,

    pub schema: Schema,

    /// Values supplied at construction; reset re-renders from these
    pub initial_values: Value,

    /// Current value tree
    pub values: Value,

    pub metrics: MetricsMap,

    pub disabled: bool,
    pub disabled_fields: BTreeSet<String>,
    pub exclude_fields: BTreeSet<String>,
    pub label_colors: BTreeMap<String, String>,
    pub spacing: SpacingTheme,

    registry: Option<Arc<RendererRegistry>>,
    clock: Arc<dyn Clock>,
}

impl FormInstance {
    pub fn new(name: &str, schema: Schema) -> FormInstance {
        FormInstance {
            name: name.to_string(),
            schema,
            initial_values: Value::empty_record(),
            values: Value::empty_record(),
            metrics: MetricsMap::new(),
            disabled: false,
            disabled_fields: BTreeSet::new(),
            exclude_fields: BTreeSet::new(),
            label_colors: BTreeMap::new(),
            spacing: SpacingTheme::Normal,
            registry: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Supply initial values as a JSON object. Anything that is not an
    /// object is tolerated with a warning and treated as empty, so schema
    /// drift in the payload never aborts form construction.
    pub fn with_initial_values(mut self, values: &serde_json::Value) -> FormInstance {
        let tree = Value::from_json(values);
        match tree {
            Value::Record(_) => {
                self.initial_values = tree.clone();
                self.values = tree;
            }
            _ => {
                warn!(form = %self.name, "initial values are not an object, ignoring");
            }
        }
        self
    }

    /// Replace the current value tree directly.
    pub fn with_values(mut self, values: Value) -> FormInstance {
        self.values = values;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsMap) -> FormInstance {
        self.metrics = metrics;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> FormInstance {
        self.disabled = disabled;
        self
    }

    pub fn with_disabled_fields<I: IntoIterator<Item = String>>(mut self, fields: I) -> FormInstance {
        self.disabled_fields = fields.into_iter().collect();
        self
    }

    pub fn with_exclude_fields<I: IntoIterator<Item = String>>(mut self, fields: I) -> FormInstance {
        self.exclude_fields = fields.into_iter().collect();
        self
    }

    pub fn with_label_colors(mut self, colors: BTreeMap<String, String>) -> FormInstance {
        self.label_colors = colors;
        self
    }

    pub fn with_spacing(mut self, spacing: SpacingTheme) -> FormInstance {
        self.spacing = spacing;
        self
    }

    /// Attach a registry with custom renderers; defaults to the shared
    /// process-wide instance.
    pub fn with_registry(mut self, registry: Arc<RendererRegistry>) -> FormInstance {
        self.registry = Some(registry);
        self
    }

    /// Inject a clock; defaults derived from dates and placeholder tokens
    /// become deterministic under test.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> FormInstance {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &RendererRegistry {
        match &self.registry {
            Some(reg) => reg.as_ref(),
            None => RendererRegistry::global(),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Wire-name prefix for every field of this form.
    pub fn base_prefix(&self) -> String {
        format!("{}_", self.name)
    }

    pub fn form_id(&self) -> String {
        format!("{}-form", self.name)
    }

    pub fn wrapper_id(&self) -> String {
        format!("{}-inputs-wrapper", self.name)
    }

    pub fn refresh_url(&self) -> String {
        format!("/form/{}/refresh", self.name)
    }

    pub fn reset_url(&self) -> String {
        format!("/form/{}/reset", self.name)
    }

    /// Copy of this form with identical configuration but a different value
    /// tree; used by refresh so configuration never drifts mid-session.
    pub fn clone_with_values(&self, values: Value) -> FormInstance {
        let mut clone = self.clone();
        clone.values = values;
        clone
    }

    /// Render the form inputs (no form tag).
    pub fn render_inputs(&self) -> String {
        compiler::compile(self).html
    }

    /// Reconcile a submission and re-render, reflecting in-progress edits
    /// without validating them.
    pub fn handle_refresh(&self, submission: &BTreeMap<String, String>) -> String {
        let parsed = reconcile::parse(self, submission);
        self.clone_with_values(parsed).render_inputs()
    }

    /// Discard in-progress edits and re-render from the initial values.
    pub fn handle_reset(&self) -> String {
        self.clone_with_values(self.initial_values.clone())
            .render_inputs()
    }

    /// Reconcile a submission into a nested value tree (pre-validation).
    pub fn parse(&self, submission: &BTreeMap<String, String>) -> Value {
        reconcile::parse(self, submission)
    }

    /// Reconcile then delegate to the default validation implementation.
    pub fn validate_submission(
        &self,
        submission: &BTreeMap<String, String>,
    ) -> Result<Value, ErrorList> {
        self.validate_submission_with(submission, &SchemaValidator)
    }

    /// Reconcile then delegate to a caller-supplied validator.
    pub fn validate_submission_with(
        &self,
        submission: &BTreeMap<String, String>,
        delegate: &dyn ValidationDelegate,
    ) -> Result<Value, ErrorList> {
        let parsed = reconcile::parse(self, submission);
        delegate.validate(&self.schema, &parsed)
    }

    /// Markup for a refresh button targeting this form's wrapper.
    pub fn refresh_button(&self, text: Option<&str>) -> String {
        let label = text.unwrap_or("Refresh Form Display");
        format!(
            "<button type=\"button\" class=\"uk-button-secondary\" \
             hx-post=\"{url}\" hx-target=\"#{wrapper}\" hx-swap=\"innerHTML\" hx-trigger=\"click\" \
             hx-include=\"closest form\" \
             title=\"Update the form display based on current values\">\u{21bb} {label}</button>",
            url = escape_attr(&self.refresh_url()),
            wrapper = escape_attr(&self.wrapper_id()),
            label = label,
        )
    }

    /// Markup for a reset button with a confirmation prompt.
    pub fn reset_button(&self, text: Option<&str>) -> String {
        let label = text.unwrap_or("Reset to Initial");
        format!(
            "<button type=\"button\" class=\"uk-button-danger\" \
             hx-post=\"{url}\" hx-target=\"#{wrapper}\" hx-swap=\"innerHTML\" \
             hx-confirm=\"Are you sure you want to reset the form to its initial values? Any unsaved changes will be lost.\" \
             title=\"Reset the form fields to their original values\">\u{21a9} {label}</button>",
            url = escape_attr(&self.reset_url()),
            wrapper = escape_attr(&self.wrapper_id()),
            label = label,
        )
    }
}
