use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::schema::classifier::{classify, underlying};
use crate::schema::schema_model::{FieldDef, Schema, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Validation delegate — typed coercion with field-located errors
// ============================================================================

/// One validation failure, tagged with the field path that produced it so
/// the caller can re-render with inline highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Aggregated validation failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList {
    pub errors: Vec<FieldError>,
}

impl ErrorList {
    pub fn push(&mut self, path: &str, message: String) {
        self.errors.push(FieldError {
            path: path.to_string(),
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", err.path, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

/// The boundary the core delegates constraint checking to. Integrators can
/// swap in their own implementation; the core's job ends at producing the
/// nested value tree.
pub trait ValidationDelegate {
    fn validate(&self, schema: &Schema, raw: &Value) -> Result<Value, ErrorList>;
}

/// Default delegate: per-descriptor type coercion and choice/optionality
/// checks. Raw strings from reconciliation become typed values here; every
/// failure is reported against its field path.
pub struct SchemaValidator;

impl ValidationDelegate for SchemaValidator {
    fn validate(&self, schema: &Schema, raw: &Value) -> Result<Value, ErrorList> {
        let mut errors = ErrorList::default();
        let coerced = coerce_record(&schema.fields, raw, "", &mut errors);
        if errors.is_empty() {
            Ok(coerced)
        } else {
            Err(errors)
        }
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn coerce_record(
    fields: &[FieldDef],
    raw: &Value,
    base: &str,
    errors: &mut ErrorList,
) -> Value {
    let raw_map = raw.as_record().cloned().unwrap_or_default();
    let mut out = BTreeMap::new();

    for field in fields {
        let path = join_path(base, &field.name);
        let classified = classify(&field.descriptor);

        match raw_map.get(&field.name) {
            Some(value) => {
                out.insert(
                    field.name.clone(),
                    coerce(&field.descriptor, value, &path, errors),
                );
            }
            None => {
                if classified.is_optional {
                    out.insert(field.name.clone(), Value::Null);
                } else if let Some(default) = field.declared_default() {
                    out.insert(
                        field.name.clone(),
                        coerce(&field.descriptor, &default, &path, errors),
                    );
                } else {
                    errors.push(&path, "field required".to_string());
                }
            }
        }
    }

    Value::Record(out)
}

/// Coerce a single value to its descriptor's type. On failure the original
/// value is kept and an error recorded, so the output tree stays complete
/// for re-rendering.
fn coerce(descriptor: &TypeDescriptor, value: &Value, path: &str, errors: &mut ErrorList) -> Value {
    let classified = classify(descriptor);
    if classified.is_optional && value.is_null() {
        return Value::Null;
    }

    match underlying(descriptor) {
        TypeDescriptor::String | TypeDescriptor::Custom { .. } | TypeDescriptor::Unresolved { .. } => {
            match value {
                Value::Str(_) => value.clone(),
                other => Value::Str(other.display_string()),
            }
        }

        TypeDescriptor::Int => match value {
            Value::Int(_) => value.clone(),
            Value::Float(x) if x.fract() == 0.0 => Value::Int(*x as i64),
            Value::Str(s) => match s.trim().parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => {
                    errors.push(path, format!("invalid integer: '{}'", s));
                    value.clone()
                }
            },
            other => {
                errors.push(path, format!("expected an integer, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Float => match value {
            Value::Float(_) => value.clone(),
            Value::Int(n) => Value::Float(*n as f64),
            Value::Str(s) => match s.trim().parse::<f64>() {
                Ok(x) => Value::Float(x),
                Err(_) => {
                    errors.push(path, format!("invalid number: '{}'", s));
                    value.clone()
                }
            },
            other => {
                errors.push(path, format!("expected a number, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Decimal => match value {
            Value::Decimal(s) => {
                if is_decimal_text(s) {
                    value.clone()
                } else {
                    errors.push(path, format!("invalid decimal: '{}'", s));
                    value.clone()
                }
            }
            Value::Str(s) => {
                let trimmed = s.trim();
                if is_decimal_text(trimmed) {
                    Value::Decimal(trimmed.to_string())
                } else {
                    errors.push(path, format!("invalid decimal: '{}'", s));
                    value.clone()
                }
            }
            Value::Int(n) => Value::Decimal(n.to_string()),
            Value::Float(x) => Value::Decimal(x.to_string()),
            other => {
                errors.push(path, format!("expected a decimal, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Bool => match value {
            Value::Bool(_) => value.clone(),
            Value::Str(s) => match s.as_str() {
                "on" | "true" | "1" => Value::Bool(true),
                "" | "off" | "false" | "0" => Value::Bool(false),
                other => {
                    errors.push(path, format!("invalid boolean: '{}'", other));
                    value.clone()
                }
            },
            other => {
                errors.push(path, format!("expected a boolean, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Date => match value {
            Value::Date(_) => value.clone(),
            Value::Str(s) => match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                Ok(d) => Value::Date(d),
                Err(_) => {
                    errors.push(path, format!("invalid date (expected YYYY-MM-DD): '{}'", s));
                    value.clone()
                }
            },
            other => {
                errors.push(path, format!("expected a date, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Time => match value {
            Value::Time(_) => value.clone(),
            Value::Str(s) => {
                let trimmed = s.trim();
                let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"));
                match parsed {
                    Ok(t) => Value::Time(t),
                    Err(_) => {
                        errors.push(path, format!("invalid time (expected HH:MM): '{}'", s));
                        value.clone()
                    }
                }
            }
            other => {
                errors.push(path, format!("expected a time, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Choice { choices, multiple } => {
            if *multiple {
                match value {
                    Value::List(items) => {
                        let mut out = Vec::new();
                        for (i, item) in items.iter().enumerate() {
                            let display = item.display_string();
                            if choices.iter().any(|c| c == &display) {
                                out.push(Value::Str(display));
                            } else {
                                errors.push(
                                    &format!("{}[{}]", path, i),
                                    format!("not a valid choice: '{}'", display),
                                );
                                out.push(item.clone());
                            }
                        }
                        Value::List(out)
                    }
                    other => {
                        errors.push(path, format!("expected a list, got {}", kind_name(other)));
                        value.clone()
                    }
                }
            } else {
                let display = value.display_string();
                if choices.iter().any(|c| c == &display) {
                    Value::Str(display)
                } else {
                    errors.push(path, format!("not a valid choice: '{}'", display));
                    value.clone()
                }
            }
        }

        TypeDescriptor::List { item } => match value {
            Value::List(items) => Value::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| coerce(item, v, &format!("{}[{}]", path, i), errors))
                    .collect(),
            ),
            other => {
                errors.push(path, format!("expected a list, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Record { fields } => match value {
            Value::Record(_) => coerce_record(fields, value, path, errors),
            other => {
                errors.push(path, format!("expected a record, got {}", kind_name(other)));
                value.clone()
            }
        },

        TypeDescriptor::Optional { .. } | TypeDescriptor::Skip { .. } => {
            // underlying() strips these; unreachable in practice
            value.clone()
        }
    }
}

/// Plain decimal text: optional sign, digits, optional fractional part.
fn is_decimal_text(s: &str) -> bool {
    let rest = s.strip_prefix(['+', '-']).unwrap_or(s);
    if rest.is_empty() {
        return false;
    }
    let mut parts = rest.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    let digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    match frac_part {
        Some(frac) => digits(int_part) && digits(frac),
        None => digits(int_part),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "number",
        Value::Decimal(_) => "decimal",
        Value::Str(_) => "string",
        Value::Date(_) => "date",
        Value::Time(_) => "time",
        Value::List(_) => "list",
        Value::Record(_) => "record",
    }
}
