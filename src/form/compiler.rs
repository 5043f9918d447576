use std::collections::BTreeMap;

use tracing::debug;

use crate::form::form_model::FormInstance;
use crate::render::registry::{CopyUi, FieldCtx};
use crate::render::style::{spacing, SpacingToken};
use crate::schema::classifier::{classify, is_required, underlying, FieldKind};
use crate::schema::path::{FieldPath, ListIndex};
use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Form compiler — schema walk to markup plus reverse path index
// ============================================================================

/// Compiled output: the inputs markup and the reverse index from data path
/// to wire name for every rendered leaf.
#[derive(Debug, Clone)]
pub struct RenderedForm {
    pub html: String,
    pub paths: BTreeMap<String, String>,
}

/// Walk the schema in declaration order and render every visible field,
/// collecting the path index as metadata for reconciliation and cross-form
/// addressing.
pub fn compile(form: &FormInstance) -> RenderedForm {
    compile_with_copy(form, None)
}

/// Compile with optional comparison copy settings threaded into each
/// top-level field context.
pub fn compile_with_copy(form: &FormInstance, copy: Option<CopyUi<'_>>) -> RenderedForm {
    let reg = form.registry();
    debug!(
        form = %form.name,
        fields = form.schema.fields.len(),
        "compiling form inputs"
    );

    let mut blocks = String::new();
    for field in &form.schema.fields {
        if form.exclude_fields.contains(&field.name) {
            debug!(field = %field.name, "skipping excluded field");
            continue;
        }
        if classify(&field.descriptor).kind == FieldKind::Hidden {
            debug!(field = %field.name, "skipping hidden field");
            continue;
        }

        let ctx = top_level_ctx(form, field, copy);
        blocks.push_str(&reg.render_field(&ctx));
        blocks.push('\n');
    }

    let html = format!(
        "<div class=\"sf-wrapper w-full flex-1\"><div id=\"{wrapper}\">\
         <div class=\"{gap} items-stretch\">\n{blocks}</div>\
         </div></div>",
        wrapper = form.wrapper_id(),
        gap = spacing(SpacingToken::StackGap, form.spacing),
        blocks = blocks,
    );

    let mut paths = BTreeMap::new();
    collect_paths(
        &form.schema.fields,
        &form.values,
        &FieldPath::default(),
        form,
        &mut paths,
    );

    RenderedForm { html, paths }
}

/// Context for a top-level field, with value resolution: a provided value
/// wins even when null; otherwise the declared default applies.
pub fn top_level_ctx<'a>(
    form: &'a FormInstance,
    field: &'a FieldDef,
    copy: Option<CopyUi<'a>>,
) -> FieldCtx<'a> {
    let provided = form.values.as_record().is_some_and(|m| m.contains_key(&field.name));
    let value = if provided {
        form.values.get(&field.name).cloned().unwrap_or(Value::Null)
    } else {
        field.declared_default().unwrap_or(Value::Null)
    };

    FieldCtx {
        field_name: &field.name,
        path: FieldPath::root(&field.name),
        descriptor: &field.descriptor,
        value,
        required: is_required(field),
        disabled: form.disabled || form.disabled_fields.contains(&field.name),
        spacing: form.spacing,
        form_name: &form.name,
        label_color: form.label_colors.get(&field.name).map(|s| s.as_str()),
        description: field.description.as_deref(),
        metrics: &form.metrics,
        refresh_url: form.refresh_url(),
        copy,
    }
}

/// Recursively collect (data path, wire name) pairs for every leaf the
/// current value tree would render.
fn collect_paths(
    fields: &[FieldDef],
    values: &Value,
    base: &FieldPath,
    form: &FormInstance,
    out: &mut BTreeMap<String, String>,
) {
    for field in fields {
        if base.0.is_empty() && form.exclude_fields.contains(&field.name) {
            continue;
        }
        if classify(&field.descriptor).kind == FieldKind::Hidden {
            continue;
        }

        let path = if base.0.is_empty() {
            FieldPath::root(&field.name)
        } else {
            base.child(&field.name)
        };
        // Mirror the renderer's value resolution so the index covers every
        // leaf that actually renders
        let value = values
            .get(&field.name)
            .cloned()
            .or_else(|| field.declared_default())
            .unwrap_or(Value::Null);

        collect_field_paths(&field.descriptor, &value, &path, form, out);
    }
}

fn collect_field_paths(
    descriptor: &TypeDescriptor,
    value: &Value,
    path: &FieldPath,
    form: &FormInstance,
    out: &mut BTreeMap<String, String>,
) {
    match underlying(descriptor) {
        TypeDescriptor::Record { fields } => {
            for field in fields {
                if classify(&field.descriptor).kind == FieldKind::Hidden {
                    continue;
                }
                let child_path = path.child(&field.name);
                let child_value = value
                    .get(&field.name)
                    .cloned()
                    .or_else(|| field.declared_default())
                    .unwrap_or(Value::Null);
                collect_field_paths(&field.descriptor, &child_value, &child_path, form, out);
            }
        }
        TypeDescriptor::List { item } => {
            if let Value::List(items) = value {
                for (idx, item_value) in items.iter().enumerate() {
                    let item_path = path.item(ListIndex::Numeric(idx));
                    collect_field_paths(item, item_value, &item_path, form, out);
                }
            }
        }
        TypeDescriptor::Choice { multiple: true, .. } => {
            if let Value::List(items) = value {
                for (idx, _) in items.iter().enumerate() {
                    let item_path = path.item(ListIndex::Numeric(idx));
                    out.insert(item_path.data_path(), item_path.wire_name(&form.name));
                }
            } else {
                out.insert(path.data_path(), path.wire_name(&form.name));
            }
        }
        _ => {
            out.insert(path.data_path(), path.wire_name(&form.name));
        }
    }
}
