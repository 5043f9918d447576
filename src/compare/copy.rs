use tracing::debug;

use crate::error::FormError;
use crate::form::compiler;
use crate::form::form_model::FormInstance;
use crate::form::list_ops::next_placeholder_token;
use crate::render::containers::render_item_card;
use crate::render::registry::FieldCtx;
use crate::schema::classifier::{is_required, underlying};
use crate::schema::path::{FieldPath, ListIndex, PathSeg};
use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Copy protocol — classification and application
// ============================================================================

/// What a copy request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// A scalar (or whole-selection pill) field; copied verbatim
    Scalar,
    /// An entire list field; target aligned to the source item by item
    FullList,
    /// A single list item; always appended on the target side
    ListItem,
    /// A subfield of a list item; updated in place, never creates items
    Subfield,
}

/// How a produced fragment is applied client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentMode {
    /// Swap the element with the given id (empty html removes it)
    Replace,
    /// Append inside the element with the given id
    Append,
}

/// One markup fragment of a copy response.
#[derive(Debug, Clone)]
pub struct CopyFragment {
    pub mode: FragmentMode,
    pub target_id: String,
    pub html: String,
}

/// Result of a copy: the classification plus the fragments the client
/// applies to the target column.
#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub kind: CopyKind,
    pub fragments: Vec<CopyFragment>,
}

impl CopyOutcome {
    /// All fragment markup concatenated, for callers that swap wholesale.
    pub fn html(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.html.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Classify a data path against a schema.
pub fn classify_copy_path(fields: &[FieldDef], path: &FieldPath) -> Result<CopyKind, FormError> {
    if path.0.is_empty() {
        return Err(FormError::EmptyPath);
    }

    // Resolve the path structurally to confirm every segment exists
    let mut current_fields = fields;
    let mut current_desc: Option<&TypeDescriptor> = None;
    let mut saw_index = false;

    for seg in &path.0 {
        match seg {
            PathSeg::Field(name) => {
                let field = current_fields
                    .iter()
                    .find(|f| f.name == *name)
                    .ok_or_else(|| FormError::UnknownField {
                        field: name.clone(),
                        context: "copy path".to_string(),
                    })?;
                current_desc = Some(&field.descriptor);
                if let TypeDescriptor::Record { fields } = underlying(&field.descriptor) {
                    current_fields = fields;
                }
            }
            PathSeg::Index(_) => {
                saw_index = true;
                let desc = current_desc.ok_or(FormError::EmptyPath)?;
                match underlying(desc) {
                    TypeDescriptor::List { item } => {
                        current_desc = Some(item.as_ref());
                        if let TypeDescriptor::Record { fields } = underlying(item) {
                            current_fields = fields;
                        }
                    }
                    _ => {
                        return Err(FormError::MalformedPath {
                            path: path.data_path(),
                            reason: "index on a non-list field".to_string(),
                        });
                    }
                }
            }
        }
    }

    let kind = match path.0.last() {
        Some(PathSeg::Index(_)) => CopyKind::ListItem,
        Some(PathSeg::Field(_)) => {
            let desc = current_desc.ok_or(FormError::EmptyPath)?;
            if matches!(underlying(desc), TypeDescriptor::List { .. }) {
                CopyKind::FullList
            } else if saw_index {
                CopyKind::Subfield
            } else {
                CopyKind::Scalar
            }
        }
        None => return Err(FormError::EmptyPath),
    };

    Ok(kind)
}

/// Value lookup along a path. Placeholder indices do not resolve against
/// server-side (positional) value trees.
pub fn value_at(root: &Value, path: &FieldPath) -> Option<Value> {
    let mut current = root;
    for seg in &path.0 {
        match seg {
            PathSeg::Field(name) => {
                current = current.get(name)?;
            }
            PathSeg::Index(ListIndex::Numeric(i)) => {
                current = current.as_list()?.get(*i)?;
            }
            PathSeg::Index(ListIndex::Placeholder(_)) => return None,
        }
    }
    Some(current.clone())
}

/// Set a value along a path, creating intermediate records and extending
/// lists with nulls as needed.
pub fn set_value(root: &mut Value, path: &FieldPath, new_value: Value) -> Result<(), FormError> {
    let mut current = root;
    let last = path.0.len().saturating_sub(1);

    for (i, seg) in path.0.iter().enumerate() {
        let is_last = i == last;
        match seg {
            PathSeg::Field(name) => {
                let map = match current {
                    Value::Record(map) => map,
                    _ => {
                        return Err(FormError::MalformedPath {
                            path: path.data_path(),
                            reason: "field segment on a non-record value".to_string(),
                        });
                    }
                };
                if is_last {
                    map.insert(name.clone(), new_value);
                    return Ok(());
                }
                let next_is_index = matches!(path.0.get(i + 1), Some(PathSeg::Index(_)));
                let entry = map.entry(name.clone()).or_insert_with(|| {
                    if next_is_index {
                        Value::List(Vec::new())
                    } else {
                        Value::empty_record()
                    }
                });
                // A scalar in the way gets replaced by the needed container
                if next_is_index && !matches!(entry, Value::List(_)) {
                    *entry = Value::List(Vec::new());
                } else if !next_is_index && !matches!(entry, Value::Record(_)) {
                    *entry = Value::empty_record();
                }
                current = entry;
            }
            PathSeg::Index(ListIndex::Numeric(idx)) => {
                let list = match current {
                    Value::List(items) => items,
                    _ => {
                        return Err(FormError::MalformedPath {
                            path: path.data_path(),
                            reason: "index segment on a non-list value".to_string(),
                        });
                    }
                };
                while list.len() <= *idx {
                    list.push(Value::Null);
                }
                if is_last {
                    list[*idx] = new_value;
                    return Ok(());
                }
                let next_is_index = matches!(path.0.get(i + 1), Some(PathSeg::Index(_)));
                let slot = &mut list[*idx];
                if next_is_index && !matches!(slot, Value::List(_)) {
                    *slot = Value::List(Vec::new());
                } else if !next_is_index && !matches!(slot, Value::Record(_)) {
                    *slot = Value::empty_record();
                }
                current = slot;
            }
            PathSeg::Index(ListIndex::Placeholder(_)) => {
                return Err(FormError::MalformedPath {
                    path: path.data_path(),
                    reason: "placeholder index in a server-side set".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// The field definition the last field segment of a path resolves to.
fn resolve_field<'a>(
    fields: &'a [FieldDef],
    path: &FieldPath,
) -> Result<&'a FieldDef, FormError> {
    let mut current_fields = fields;
    let mut resolved: Option<&'a FieldDef> = None;

    for seg in &path.0 {
        match seg {
            PathSeg::Field(name) => {
                let field = current_fields
                    .iter()
                    .find(|f| f.name == *name)
                    .ok_or_else(|| FormError::UnknownField {
                        field: name.clone(),
                        context: "copy path".to_string(),
                    })?;
                resolved = Some(field);
                if let TypeDescriptor::Record { fields } = underlying(&field.descriptor) {
                    current_fields = fields;
                }
            }
            PathSeg::Index(_) => {
                let field = resolved.ok_or(FormError::EmptyPath)?;
                if let TypeDescriptor::List { item } = underlying(&field.descriptor) {
                    if let TypeDescriptor::Record { fields } = underlying(item) {
                        current_fields = fields;
                    }
                }
            }
        }
    }

    resolved.ok_or(FormError::EmptyPath)
}

/// Apply a copy of `path` from `source` into `target`, mutating the target
/// form's value tree and producing the markup fragments that bring the
/// target column's DOM in line.
pub fn apply_copy(
    source: &FormInstance,
    target: &mut FormInstance,
    path: &FieldPath,
) -> Result<CopyOutcome, FormError> {
    // The path must classify identically against both schemas
    let kind = classify_copy_path(&source.schema.fields, path)?;
    classify_copy_path(&target.schema.fields, path)?;

    debug!(path = %path.data_path(), ?kind, "applying copy");

    match kind {
        CopyKind::Scalar => {
            let value = value_at(&source.values, path).ok_or_else(|| {
                FormError::CopySourceMissing {
                    path: path.data_path(),
                }
            })?;
            set_value(&mut target.values, path, value)?;
            Ok(CopyOutcome {
                kind,
                fragments: vec![root_field_fragment(target, path)?],
            })
        }

        CopyKind::FullList => {
            let source_items = match value_at(&source.values, path) {
                Some(Value::List(items)) => items,
                Some(_) | None => Vec::new(),
            };
            let target_len = match value_at(&target.values, path) {
                Some(Value::List(items)) => items.len(),
                _ => 0,
            };

            set_value(&mut target.values, path, Value::List(source_items.clone()))?;

            let list_ctx = list_ctx_for(target, path)?;
            let container_id = format!("{}_items_container", list_ctx.wire_name());

            let mut fragments = Vec::new();
            for (i, item) in source_items.iter().enumerate() {
                if i < target_len {
                    // Index already present on the target: overwrite in place
                    let index = ListIndex::Numeric(i);
                    fragments.push(CopyFragment {
                        mode: FragmentMode::Replace,
                        target_id: format!(
                            "{}_card",
                            path.item(index.clone()).wire_name(&target.name)
                        ),
                        html: render_item_card(target.registry(), &list_ctx, item, &index, false),
                    });
                } else {
                    // Beyond the target's current length: append with a
                    // fresh placeholder index
                    let index = ListIndex::Placeholder(next_placeholder_token(target.clock()));
                    fragments.push(CopyFragment {
                        mode: FragmentMode::Append,
                        target_id: container_id.clone(),
                        html: render_item_card(target.registry(), &list_ctx, item, &index, true),
                    });
                }
            }
            // Stale target items beyond the source length are removed
            for i in source_items.len()..target_len {
                fragments.push(CopyFragment {
                    mode: FragmentMode::Replace,
                    target_id: format!(
                        "{}_card",
                        path.item(ListIndex::Numeric(i)).wire_name(&target.name)
                    ),
                    html: String::new(),
                });
            }

            Ok(CopyOutcome { kind, fragments })
        }

        CopyKind::ListItem => {
            let item = value_at(&source.values, path).ok_or_else(|| {
                FormError::CopySourceMissing {
                    path: path.data_path(),
                }
            })?;

            let list_path = FieldPath(path.0[..path.0.len() - 1].to_vec());
            let mut items = match value_at(&target.values, &list_path) {
                Some(Value::List(items)) => items,
                _ => Vec::new(),
            };
            items.push(item.clone());
            set_value(&mut target.values, &list_path, Value::List(items))?;

            let list_ctx = list_ctx_for(target, &list_path)?;
            let index = ListIndex::Placeholder(next_placeholder_token(target.clock()));
            Ok(CopyOutcome {
                kind,
                fragments: vec![CopyFragment {
                    mode: FragmentMode::Append,
                    target_id: format!("{}_items_container", list_ctx.wire_name()),
                    html: render_item_card(target.registry(), &list_ctx, &item, &index, true),
                }],
            })
        }

        CopyKind::Subfield => {
            let value = value_at(&source.values, path).ok_or_else(|| {
                FormError::CopySourceMissing {
                    path: path.data_path(),
                }
            })?;

            // The enclosing item path ends at the deepest index segment
            let item_end = path
                .0
                .iter()
                .rposition(|seg| matches!(seg, PathSeg::Index(_)))
                .ok_or(FormError::EmptyPath)?;
            let item_path = FieldPath(path.0[..=item_end].to_vec());

            // The corresponding target item must already exist; this copy
            // never creates items
            if value_at(&target.values, &item_path).is_none() {
                return Err(FormError::CopyTargetMissing {
                    path: item_path.data_path(),
                });
            }

            set_value(&mut target.values, path, value)?;

            let list_path = FieldPath(item_path.0[..item_path.0.len() - 1].to_vec());
            let list_ctx = list_ctx_for(target, &list_path)?;
            let index = match item_path.0.last() {
                Some(PathSeg::Index(idx)) => idx.clone(),
                _ => ListIndex::Numeric(0),
            };
            let item_value =
                value_at(&target.values, &item_path).unwrap_or_else(Value::empty_record);

            Ok(CopyOutcome {
                kind,
                fragments: vec![CopyFragment {
                    mode: FragmentMode::Replace,
                    target_id: format!("{}_card", item_path.wire_name(&target.name)),
                    html: render_item_card(
                        target.registry(),
                        &list_ctx,
                        &item_value,
                        &index,
                        true,
                    ),
                }],
            })
        }
    }
}

/// Re-rendered block for the root field of a path, used after scalar copies.
fn root_field_fragment(form: &FormInstance, path: &FieldPath) -> Result<CopyFragment, FormError> {
    let root_name = match path.0.first() {
        Some(PathSeg::Field(name)) => name.clone(),
        _ => return Err(FormError::EmptyPath),
    };
    let field = form
        .schema
        .field(&root_name)
        .ok_or_else(|| FormError::UnknownField {
            field: root_name.clone(),
            context: "schema".to_string(),
        })?;

    let ctx = compiler::top_level_ctx(form, field, None);
    let html = form.registry().render_field(&ctx);
    Ok(CopyFragment {
        mode: FragmentMode::Replace,
        target_id: format!("{}_accordion", ctx.wire_name()),
        html,
    })
}

/// Render context for the list field a path points at.
fn list_ctx_for<'a>(
    form: &'a FormInstance,
    list_path: &FieldPath,
) -> Result<FieldCtx<'a>, FormError> {
    let field = resolve_field(&form.schema.fields, list_path)?;
    let value = value_at(&form.values, list_path).unwrap_or_else(|| Value::List(Vec::new()));

    Ok(FieldCtx {
        field_name: &field.name,
        path: list_path.clone(),
        descriptor: &field.descriptor,
        value,
        required: is_required(field),
        disabled: form.disabled,
        spacing: form.spacing,
        form_name: &form.name,
        label_color: None,
        description: field.description.as_deref(),
        metrics: &form.metrics,
        refresh_url: form.refresh_url(),
        copy: None,
    })
}
