use std::sync::Mutex;

use tracing::debug;

use crate::error::FormError;
use crate::form::form_model::FormInstance;
use crate::render::containers::render_item_card;
use crate::render::registry::FieldCtx;
use crate::schema::classifier::{is_required, underlying};
use crate::schema::defaults::{default_for, defaults_for_record, Clock};
use crate::schema::path::{walk_path, FieldPath, ListIndex, PathSeg};
use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// List mutation engine — stateless per-request add/delete
// ============================================================================

static LAST_TOKEN: Mutex<u64> = Mutex::new(0);

/// Next placeholder token: the clock's epoch-millis, bumped past the last
/// issued token so rapid additions within one tick stay strictly increasing.
pub fn next_placeholder_token(clock: &dyn Clock) -> u64 {
    let now = clock.now_millis();
    let mut last = match LAST_TOKEN.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let token = now.max(*last + 1);
    *last = token;
    token
}

/// Append a fresh item to the list at `segments` (slash-style path like
/// `entries/1/notes`), returning only the new item's markup fragment.
///
/// The item gets a synthesized default value, a fresh placeholder index and
/// an expanded visual state; the client inserts the fragment at the end of
/// the list container.
pub fn add_item(form: &FormInstance, segments: &[&str]) -> Result<String, FormError> {
    let (field_def, _wire_parts, item_desc) = walk_path(&form.schema.fields, segments)?;

    let default_item = match underlying(item_desc) {
        TypeDescriptor::Record { fields } => defaults_for_record(fields, form.clock()),
        other => default_for(other, form.clock()),
    };

    let token = next_placeholder_token(form.clock());
    let index = ListIndex::Placeholder(token);
    debug!(
        form = %form.name,
        path = %segments.join("/"),
        token,
        "rendering new list item"
    );

    let ctx = list_field_ctx(form, field_def, segments);
    Ok(render_item_card(
        form.registry(),
        &ctx,
        &default_item,
        &index,
        true,
    ))
}

/// Validate a delete request. Deletion itself is client-side DOM removal
/// keyed by the item's container id; remaining siblings keep their wire
/// names, so no replacement markup is needed.
pub fn delete_item(form: &FormInstance, segments: &[&str], index: &str) -> Result<(), FormError> {
    walk_path(&form.schema.fields, segments)?;
    ListIndex::parse(index).ok_or_else(|| FormError::BadIndex {
        index: index.to_string(),
    })?;
    debug!(
        form = %form.name,
        path = %segments.join("/"),
        index,
        "list item delete acknowledged"
    );
    Ok(())
}

/// Build the list field's render context from slash-style path segments.
fn list_field_ctx<'a>(
    form: &'a FormInstance,
    field_def: &'a FieldDef,
    segments: &[&str],
) -> FieldCtx<'a> {
    let mut segs = Vec::new();
    for seg in segments {
        match ListIndex::parse(seg) {
            Some(idx) => segs.push(PathSeg::Index(idx)),
            None => segs.push(PathSeg::Field(seg.to_string())),
        }
    }

    FieldCtx {
        field_name: &field_def.name,
        path: FieldPath(segs),
        descriptor: &field_def.descriptor,
        value: Value::List(Vec::new()),
        required: is_required(field_def),
        disabled: form.disabled,
        spacing: form.spacing,
        form_name: &form.name,
        label_color: None,
        description: field_def.description.as_deref(),
        metrics: &form.metrics,
        refresh_url: form.refresh_url(),
        copy: None,
    }
}
