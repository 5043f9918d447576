use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::render::html::{escape_attr, escape_html, humanize};
use crate::render::metrics::{self, DecorationScope, MetricEntry, MetricsMap};
use crate::render::style::SpacingTheme;
use crate::schema::classifier::{classify, underlying, FieldKind};
use crate::schema::path::FieldPath;
use crate::schema::schema_model::TypeDescriptor;
use crate::schema::value::Value;

use crate::render::choice::ChoiceRenderer;
use crate::render::containers::{ListRenderer, RecordRenderer};
use crate::render::scalar::{
    BooleanRenderer, DateRenderer, DecimalRenderer, NumberRenderer, StringRenderer, TimeRenderer,
};

// ============================================================================
// Field renderer contract and registry
// ============================================================================

/// Comparison copy affordance configuration threaded into renderers.
#[derive(Debug, Clone, Copy)]
pub struct CopyUi<'a> {
    pub pair_name: &'a str,
    /// Side the button copies INTO ("left" or "right")
    pub target_side: &'a str,
    /// Wire prefix of the column the button lives in
    pub own_prefix: &'a str,
}

/// Everything a renderer needs to produce markup for one field.
#[derive(Clone)]
pub struct FieldCtx<'a> {
    /// Original field name (last path segment)
    pub field_name: &'a str,

    /// Path from the form root, without the namespace
    pub path: FieldPath,

    pub descriptor: &'a TypeDescriptor,

    /// Current value; callers synthesize defaults before rendering
    pub value: Value,

    pub required: bool,
    pub disabled: bool,
    pub spacing: SpacingTheme,

    /// Form namespace; roots every wire name
    pub form_name: &'a str,

    pub label_color: Option<&'a str>,
    pub description: Option<&'a str>,

    /// All metric annotations for the form, keyed by data path
    pub metrics: &'a MetricsMap,

    /// Endpoint the refresh affordances post to
    pub refresh_url: String,

    /// Set when rendering inside a comparison column with copy enabled
    pub copy: Option<CopyUi<'a>>,
}

impl<'a> FieldCtx<'a> {
    pub fn wire_name(&self) -> String {
        self.path.wire_name(self.form_name)
    }

    pub fn data_path(&self) -> String {
        self.path.data_path()
    }

    pub fn metric(&self) -> Option<&'a MetricEntry> {
        self.metrics.get(&self.data_path())
    }
}

/// A renderer for one kind of field.
///
/// Implementations provide the input element; label and composition have
/// shared defaults. Custom renderers honor the same contract so they compose
/// transparently inside list and record renderers.
pub trait FieldRenderer: Send + Sync {
    fn render_label(&self, ctx: &FieldCtx) -> String {
        default_label(ctx)
    }

    fn render_input(&self, reg: &RendererRegistry, ctx: &FieldCtx) -> String;

    fn render(&self, reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let label = self.render_label(ctx);
        let mut input = self.render_input(reg, ctx);

        if let Some(entry) = ctx.metric() {
            input = metrics::decorate(&input, entry, DecorationScope::Border);
        }

        accordion_field(ctx, &label, &input)
    }
}

/// Registry mapping type keys to renderers.
///
/// Exact-name overrides are consulted before kind-based built-ins. Intended
/// to be fully populated at startup and read-only afterwards; the shared
/// default instance is created once per process.
pub struct RendererRegistry {
    overrides: HashMap<String, Arc<dyn FieldRenderer>>,
}

impl RendererRegistry {
    pub fn with_defaults() -> RendererRegistry {
        RendererRegistry {
            overrides: HashMap::new(),
        }
    }

    /// Register a custom renderer under a type key. Keys are the names
    /// produced by [`type_key`]: `Custom { name }` descriptors resolve by
    /// their name, and built-in keys like `"string"` or `"date"` may be
    /// overridden.
    pub fn register(&mut self, type_name: &str, renderer: Arc<dyn FieldRenderer>) {
        self.overrides.insert(type_name.to_string(), renderer);
    }

    /// Shared read-only instance used when a form has no registry of its own.
    pub fn global() -> &'static RendererRegistry {
        static GLOBAL: OnceLock<RendererRegistry> = OnceLock::new();
        GLOBAL.get_or_init(RendererRegistry::with_defaults)
    }

    fn resolve(&self, descriptor: &TypeDescriptor) -> &dyn FieldRenderer {
        if let Some(custom) = self.overrides.get(&type_key(descriptor)) {
            return custom.as_ref();
        }
        builtin_for(descriptor)
    }

    /// Render a complete field (label + input composition).
    ///
    /// Hidden fields render to nothing; unknown custom types without a
    /// registered renderer fall back to the string renderer rather than
    /// failing the render.
    pub fn render_field(&self, ctx: &FieldCtx) -> String {
        if classify(ctx.descriptor).kind == FieldKind::Hidden {
            return String::new();
        }
        self.resolve(ctx.descriptor).render(self, ctx)
    }

    /// Render only the input element for a field.
    pub fn render_input(&self, ctx: &FieldCtx) -> String {
        if classify(ctx.descriptor).kind == FieldKind::Hidden {
            return String::new();
        }
        self.resolve(ctx.descriptor).render_input(self, ctx)
    }
}

/// Lookup key for registry overrides.
pub fn type_key(descriptor: &TypeDescriptor) -> String {
    match underlying(descriptor) {
        TypeDescriptor::String => "string".to_string(),
        TypeDescriptor::Int => "int".to_string(),
        TypeDescriptor::Float => "float".to_string(),
        TypeDescriptor::Decimal => "decimal".to_string(),
        TypeDescriptor::Bool => "bool".to_string(),
        TypeDescriptor::Date => "date".to_string(),
        TypeDescriptor::Time => "time".to_string(),
        TypeDescriptor::Choice { .. } => "choice".to_string(),
        TypeDescriptor::List { .. } => "list".to_string(),
        TypeDescriptor::Record { .. } => "record".to_string(),
        TypeDescriptor::Custom { name } => name.clone(),
        TypeDescriptor::Unresolved { .. } => "string".to_string(),
        TypeDescriptor::Optional { .. } | TypeDescriptor::Skip { .. } => "string".to_string(),
    }
}

fn builtin_for(descriptor: &TypeDescriptor) -> &'static dyn FieldRenderer {
    static STRING: StringRenderer = StringRenderer;
    static NUMBER: NumberRenderer = NumberRenderer;
    static DECIMAL: DecimalRenderer = DecimalRenderer;
    static BOOLEAN: BooleanRenderer = BooleanRenderer;
    static DATE: DateRenderer = DateRenderer;
    static TIME: TimeRenderer = TimeRenderer;
    static CHOICE: ChoiceRenderer = ChoiceRenderer;
    static LIST: ListRenderer = ListRenderer;
    static RECORD: RecordRenderer = RecordRenderer;

    match classify(descriptor).kind {
        FieldKind::Str | FieldKind::Custom(_) | FieldKind::Hidden => &STRING,
        FieldKind::Number { .. } => &NUMBER,
        FieldKind::Decimal => &DECIMAL,
        FieldKind::Boolean => &BOOLEAN,
        FieldKind::Date => &DATE,
        FieldKind::Time => &TIME,
        FieldKind::Choice { .. } => &CHOICE,
        FieldKind::List => &LIST,
        FieldKind::Record => &RECORD,
    }
}

// ---- Shared composition helpers ----

/// Standard label: humanized name, optional description tooltip, optional
/// color, metric badge when annotated.
pub fn default_label(ctx: &FieldCtx) -> String {
    let text = escape_html(&humanize(ctx.field_name));

    let span = match ctx.description {
        Some(desc) => format!("<span title=\"{}\">{}</span>", escape_attr(desc), text),
        None => format!("<span>{}</span>", text),
    };

    let style = match ctx.label_color {
        Some(color) => format!(" style=\"color: {};\"", escape_attr(color)),
        None => String::new(),
    };

    let badge = match ctx.metric() {
        Some(entry) => metrics::metric_badge(entry),
        None => String::new(),
    };

    format!(
        "<label for=\"{}\" class=\"block text-sm font-medium text-gray-700 mb-1\"{}>{}{}</label>",
        escape_attr(&ctx.wire_name()),
        style,
        span,
        badge,
    )
}

/// Copy button markup when the context carries comparison copy settings.
pub fn copy_button(ctx: &FieldCtx) -> String {
    let Some(copy) = &ctx.copy else {
        return String::new();
    };

    format!(
        "<button type=\"button\" class=\"sf-copy-btn uk-button-link ml-2\" title=\"Copy from other side\" \
         onclick=\"sfPerformCopy('{}', '{}', '{}'); return false;\">\u{2194}</button>",
        escape_attr(&ctx.data_path()),
        escape_attr(copy.own_prefix),
        escape_attr(copy.target_side),
    )
}

/// Wrap a label and input in the single-item collapsible used for every
/// field block.
pub fn accordion_field(ctx: &FieldCtx, title: &str, content: &str) -> String {
    let wire = ctx.wire_name();
    format!(
        "<ul uk-accordion=\"multiple: true; collapsible: true\" id=\"{wire}_accordion\">\n\
         <li class=\"uk-open mb-2\" id=\"{wire}_item\">\n\
         <a class=\"uk-accordion-title\" href=\"#\">{title}{copy}</a>\n\
         <div class=\"uk-accordion-content\">{content}</div>\n\
         </li>\n\
         </ul>",
        wire = escape_attr(&wire),
        title = title,
        copy = copy_button(ctx),
        content = content,
    )
}
