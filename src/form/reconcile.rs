use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::form::form_model::FormInstance;
use crate::render::choice::NONE_OPTION_LABEL;
use crate::schema::classifier::{classify, underlying, FieldKind};
use crate::schema::path::ListIndex;
use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Reconciliation engine — flat submission back to a nested value tree
// ============================================================================

/// Reconcile a flat key-value submission into a nested value tree matching
/// the form's schema (pre-validation).
///
/// Resolution precedence per field: submitted value, then explicitly
/// supplied initial value, then schema-declared default. Malformed scalar
/// content is preserved as-is; the validation delegate locates errors later.
pub fn parse(form: &FormInstance, submission: &BTreeMap<String, String>) -> Value {
    let initial = form.initial_values.as_record().cloned().unwrap_or_default();
    let map = reconcile_fields(
        &form.schema.fields,
        &form.base_prefix(),
        submission,
        Some(&initial),
        Some(&form.exclude_fields),
    );
    Value::Record(map)
}

/// Reconcile one record level. `excluded` applies at the top level only.
fn reconcile_fields(
    fields: &[FieldDef],
    prefix: &str,
    submission: &BTreeMap<String, String>,
    initial: Option<&BTreeMap<String, Value>>,
    excluded: Option<&BTreeSet<String>>,
) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();

    for field in fields {
        let key = format!("{}{}", prefix, field.name);
        let classified = classify(&field.descriptor);

        let skipped = classified.kind == FieldKind::Hidden
            || excluded.is_some_and(|set| set.contains(&field.name));
        if skipped {
            // Never rendered, so never submitted: initial value first,
            // declared default second, otherwise left absent for the
            // validation delegate to flag
            if let Some(value) = initial.and_then(|m| m.get(&field.name)) {
                debug!(field = %field.name, "injected initial value for unrendered field");
                out.insert(field.name.clone(), value.clone());
            } else if let Some(default) = field.declared_default() {
                debug!(field = %field.name, "injected declared default for unrendered field");
                out.insert(field.name.clone(), default);
            }
            continue;
        }

        match &classified.kind {
            FieldKind::Record => {
                let nested_initial = initial
                    .and_then(|m| m.get(&field.name))
                    .and_then(|v| v.as_record());
                let nested_fields = match underlying(&field.descriptor) {
                    TypeDescriptor::Record { fields } => fields.as_slice(),
                    _ => &[],
                };
                let nested = reconcile_fields(
                    nested_fields,
                    &format!("{}_", key),
                    submission,
                    nested_initial,
                    None,
                );
                out.insert(field.name.clone(), Value::Record(nested));
            }

            FieldKind::List => {
                match reconcile_list(field, &key, submission) {
                    Some(list) => {
                        out.insert(field.name.clone(), list);
                    }
                    None => {
                        // No keys discovered: the list was not rendered in
                        // this submission
                        if let Some(value) = initial.and_then(|m| m.get(&field.name)) {
                            out.insert(field.name.clone(), value.clone());
                        } else if let Some(default) = field.declared_default() {
                            out.insert(field.name.clone(), default);
                        }
                    }
                }
            }

            FieldKind::Boolean => {
                // Unchecked checkboxes submit nothing; absence means false
                let checked = matches!(
                    submission.get(&key).map(|s| s.as_str()),
                    Some("on") | Some("true") | Some("1")
                );
                out.insert(field.name.clone(), Value::Bool(checked));
            }

            FieldKind::Choice { multiple: true } => {
                match discover_indexed_values(&key, submission) {
                    Some(values) => {
                        out.insert(field.name.clone(), Value::List(values));
                    }
                    None => {
                        if let Some(value) = initial.and_then(|m| m.get(&field.name)) {
                            out.insert(field.name.clone(), value.clone());
                        } else if let Some(default) = field.declared_default() {
                            out.insert(field.name.clone(), default);
                        } else {
                            out.insert(field.name.clone(), Value::List(Vec::new()));
                        }
                    }
                }
            }

            FieldKind::Choice { multiple: false } => {
                match submission.get(&key) {
                    Some(raw) if raw.is_empty() || raw == NONE_OPTION_LABEL => {
                        if classified.is_optional {
                            out.insert(field.name.clone(), Value::Null);
                        } else {
                            out.insert(field.name.clone(), Value::Str(String::new()));
                        }
                    }
                    Some(raw) => {
                        out.insert(field.name.clone(), Value::Str(raw.clone()));
                    }
                    None => {
                        resolve_absent(field, classified.is_optional, initial, &mut out);
                    }
                }
            }

            _ => {
                // Scalar kinds: string passthrough, numeric parse deferred
                // so invalid content survives to a precise validation error
                match submission.get(&key) {
                    Some(raw) if raw.is_empty() && classified.is_optional => {
                        out.insert(field.name.clone(), Value::Null);
                    }
                    Some(raw) => {
                        out.insert(field.name.clone(), Value::Str(raw.clone()));
                    }
                    None => {
                        resolve_absent(field, classified.is_optional, initial, &mut out);
                    }
                }
            }
        }
    }

    out
}

/// Absent-key resolution for non-list fields: initial, declared default,
/// `Null` for optional, otherwise left absent.
fn resolve_absent(
    field: &FieldDef,
    is_optional: bool,
    initial: Option<&BTreeMap<String, Value>>,
    out: &mut BTreeMap<String, Value>,
) {
    if let Some(value) = initial.and_then(|m| m.get(&field.name)) {
        out.insert(field.name.clone(), value.clone());
    } else if let Some(default) = field.declared_default() {
        out.insert(field.name.clone(), default);
    } else if is_optional {
        out.insert(field.name.clone(), Value::Null);
    }
}

/// Split a key remainder into its leading list index and the rest.
///
/// `"0_title"` yields (0, "title"); `"new_42"` yields (new_42, "").
/// Returns `None` when the remainder does not start with an index, which
/// also rejects keys that belong to sibling fields sharing this field's
/// name as a prefix (`tags` vs `tags_extra`).
fn split_index(remainder: &str) -> Option<(ListIndex, &str)> {
    let (digits_start, placeholder) = match remainder.strip_prefix("new_") {
        Some(rest) => (rest, true),
        None => (remainder, false),
    };

    let digit_len = digits_start
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits_start.len());
    if digit_len == 0 {
        return None;
    }

    let digits = &digits_start[..digit_len];
    let rest = &digits_start[digit_len..];
    let rest = match rest.strip_prefix('_') {
        Some(tail) => tail,
        None if rest.is_empty() => "",
        None => return None,
    };

    let index = if placeholder {
        ListIndex::Placeholder(digits.parse().ok()?)
    } else {
        ListIndex::Numeric(digits.parse().ok()?)
    };
    Some((index, rest))
}

/// Discover list items for a field from the submission's own keys and
/// reconcile each one. Returns `None` when no keys reference the field.
fn reconcile_list(
    field: &FieldDef,
    key: &str,
    submission: &BTreeMap<String, String>,
) -> Option<Value> {
    let item_desc = match underlying(&field.descriptor) {
        TypeDescriptor::List { item } => item.as_ref(),
        _ => return None,
    };

    let scan_prefix = format!("{}_", key);
    let is_record_item = matches!(underlying(item_desc), TypeDescriptor::Record { .. });

    let mut scalar_items: BTreeMap<ListIndex, Value> = BTreeMap::new();
    let mut record_indices: BTreeSet<ListIndex> = BTreeSet::new();

    for (submitted_key, raw) in submission {
        let Some(remainder) = submitted_key.strip_prefix(&scan_prefix) else {
            continue;
        };
        let Some((index, rest)) = split_index(remainder) else {
            continue;
        };

        if is_record_item {
            if !rest.is_empty() {
                record_indices.insert(index);
            }
        } else if rest.is_empty() {
            scalar_items.insert(index, Value::Str(raw.clone()));
        }
    }

    if is_record_item {
        if record_indices.is_empty() {
            return None;
        }
        let item_fields = match underlying(item_desc) {
            TypeDescriptor::Record { fields } => fields.as_slice(),
            _ => &[],
        };
        // BTreeSet iteration already yields numeric-ascending then
        // placeholder-ascending order
        let mut items = Vec::new();
        for index in record_indices {
            let item_prefix = format!("{}_{}_", key, index);
            let item = reconcile_fields(item_fields, &item_prefix, submission, None, None);
            items.push(Value::Record(item));
        }
        debug!(field = %field.name, count = items.len(), "reconciled record list");
        Some(Value::List(items))
    } else {
        if scalar_items.is_empty() {
            return None;
        }
        debug!(field = %field.name, count = scalar_items.len(), "reconciled scalar list");
        Some(Value::List(scalar_items.into_values().collect()))
    }
}

/// Indexed scalar values (`key_0`, `key_new_42`) in index order; used by
/// pill fields.
fn discover_indexed_values(
    key: &str,
    submission: &BTreeMap<String, String>,
) -> Option<Vec<Value>> {
    let scan_prefix = format!("{}_", key);
    let mut items: BTreeMap<ListIndex, Value> = BTreeMap::new();

    for (submitted_key, raw) in submission {
        let Some(remainder) = submitted_key.strip_prefix(&scan_prefix) else {
            continue;
        };
        let Some((index, rest)) = split_index(remainder) else {
            continue;
        };
        if rest.is_empty() {
            items.insert(index, Value::Str(raw.clone()));
        }
    }

    if items.is_empty() {
        None
    } else {
        Some(items.into_values().collect())
    }
}
