use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate, NaiveTime};

use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Default synthesizer
// ============================================================================

/// Time source for date defaults and placeholder tokens. Injectable so
/// synthesis is deterministic under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> u64;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Frozen clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub millis: u64,
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now_millis(&self) -> u64 {
        self.millis
    }
}

/// Type-driven default for a descriptor, with no declared default in play.
///
/// Never returns an unset marker: every kind maps to a concrete value
/// (empty string, zero, false, today, midnight, first choice, empty list,
/// recursively defaulted record, `Null` for bare optionals).
pub fn default_for(descriptor: &TypeDescriptor, clock: &dyn Clock) -> Value {
    match descriptor {
        TypeDescriptor::String => Value::Str(String::new()),
        TypeDescriptor::Int => Value::Int(0),
        TypeDescriptor::Float => Value::Float(0.0),
        TypeDescriptor::Decimal => Value::Decimal("0".to_string()),
        TypeDescriptor::Bool => Value::Bool(false),
        TypeDescriptor::Date => Value::Date(clock.today()),
        TypeDescriptor::Time => Value::Time(NaiveTime::MIN),
        TypeDescriptor::Choice { choices, multiple } => {
            if *multiple {
                Value::List(Vec::new())
            } else {
                match choices.first() {
                    Some(first) => Value::Str(first.clone()),
                    None => Value::Null,
                }
            }
        }
        TypeDescriptor::List { .. } => Value::List(Vec::new()),
        TypeDescriptor::Record { fields } => defaults_for_record(fields, clock),
        TypeDescriptor::Optional { .. } => Value::Null,
        TypeDescriptor::Skip { inner } => default_for(inner, clock),
        TypeDescriptor::Custom { .. } => Value::Str(String::new()),
        TypeDescriptor::Unresolved { .. } => Value::Str(String::new()),
    }
}

/// Default for a field: declared default first, factory second, then the
/// type-driven fallback.
pub fn field_default(field: &FieldDef, clock: &dyn Clock) -> Value {
    if let Some(value) = field.declared_default() {
        return value;
    }
    default_for(&field.descriptor, clock)
}

/// A fully populated default record for a field list.
pub fn defaults_for_record(fields: &[FieldDef], clock: &dyn Clock) -> Value {
    let mut map = BTreeMap::new();
    for field in fields {
        map.insert(field.name.clone(), field_default(field, clock));
    }
    Value::Record(map)
}
