#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use schema_form::{FieldDef, FixedClock, FormInstance, Schema, TypeDescriptor, Value};

// =========================================================================
// Shared fixtures: schemas, clocks, submission builders
// =========================================================================

/// Frozen clock: 2021-01-01, epoch millis 1_600_000_000_000.
pub fn fixed_clock() -> FixedClock {
    FixedClock {
        date: NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date"),
        millis: 1_600_000_000_000,
    }
}

/// Nested address record used inside the complex schema.
pub fn address_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new("street", TypeDescriptor::String)
            .with_default(serde_json::json!("123 Main St")),
        FieldDef::new("city", TypeDescriptor::String).with_default(serde_json::json!("Anytown")),
        FieldDef::new("is_billing", TypeDescriptor::Bool).with_default(serde_json::json!(false)),
        FieldDef::new("tags", TypeDescriptor::list_of(TypeDescriptor::String))
            .with_default(serde_json::json!([])),
    ]
}

/// A schema exercising every built-in kind.
pub fn complex_schema() -> Schema {
    Schema::new(
        "complex",
        vec![
            FieldDef::new("name", TypeDescriptor::String).with_default(serde_json::json!("Demo")),
            FieldDef::new("age", TypeDescriptor::Int),
            FieldDef::new("score", TypeDescriptor::optional(TypeDescriptor::Float)),
            FieldDef::new("price", TypeDescriptor::Decimal)
                .with_default(serde_json::json!("0.00")),
            FieldDef::new("is_active", TypeDescriptor::Bool)
                .with_default(serde_json::json!(false)),
            FieldDef::new("status", TypeDescriptor::choice(&["PENDING", "COMPLETED"]))
                .with_default(serde_json::json!("PENDING")),
            FieldDef::new(
                "optional_status",
                TypeDescriptor::optional(TypeDescriptor::choice(&["PENDING", "COMPLETED"])),
            ),
            FieldDef::new(
                "description",
                TypeDescriptor::optional(TypeDescriptor::String),
            ),
            FieldDef::new("creation_date", TypeDescriptor::Date),
            FieldDef::new("start_time", TypeDescriptor::Time),
            FieldDef::new("main_address", TypeDescriptor::record(address_fields())),
            FieldDef::new(
                "other_addresses",
                TypeDescriptor::list_of(TypeDescriptor::record(address_fields())),
            )
            .with_default(serde_json::json!([])),
            FieldDef::new("tags", TypeDescriptor::list_of(TypeDescriptor::String))
                .with_default(serde_json::json!([])),
        ],
    )
}

/// Review entry record: the shape used by list and comparison tests.
pub fn entry_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new("title", TypeDescriptor::String).with_default(serde_json::json!("")),
        FieldDef::new("rating", TypeDescriptor::Int).with_default(serde_json::json!(0)),
        FieldDef::new(
            "notes",
            TypeDescriptor::list_of(TypeDescriptor::record(vec![FieldDef::new(
                "text",
                TypeDescriptor::String,
            )
            .with_default(serde_json::json!(""))])),
        )
        .with_default(serde_json::json!([])),
    ]
}

/// Schema with a list of records that itself contains a nested list.
pub fn entries_schema() -> Schema {
    Schema::new(
        "entries",
        vec![
            FieldDef::new("label", TypeDescriptor::String).with_default(serde_json::json!("")),
            FieldDef::new(
                "entries",
                TypeDescriptor::list_of(TypeDescriptor::record(entry_fields())),
            )
            .with_default(serde_json::json!([])),
        ],
    )
}

/// Form over the complex schema with a frozen clock.
pub fn complex_form(name: &str) -> FormInstance {
    FormInstance::new(name, complex_schema()).with_clock(Arc::new(fixed_clock()))
}

/// Form over the entries schema with a frozen clock.
pub fn entries_form(name: &str) -> FormInstance {
    FormInstance::new(name, entries_schema()).with_clock(Arc::new(fixed_clock()))
}

/// Convenience submission builder.
pub fn submission(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Shorthand record constructor for expected trees.
pub fn record(pairs: Vec<(&str, Value)>) -> Value {
    Value::Record(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}
