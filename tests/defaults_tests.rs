use chrono::{NaiveDate, NaiveTime};
use schema_form::{default_for, defaults_for_record, FieldDef, TypeDescriptor, Value};

mod common;
use crate::common::{address_fields, fixed_clock};

// =========================================================================
// Default synthesis: type-driven values, declared defaults, completeness
// =========================================================================

#[test]
fn primitive_defaults() {
    let clock = fixed_clock();

    assert_eq!(
        default_for(&TypeDescriptor::String, &clock),
        Value::Str(String::new())
    );
    assert_eq!(default_for(&TypeDescriptor::Int, &clock), Value::Int(0));
    assert_eq!(
        default_for(&TypeDescriptor::Float, &clock),
        Value::Float(0.0)
    );
    assert_eq!(
        default_for(&TypeDescriptor::Decimal, &clock),
        Value::Decimal("0".to_string())
    );
    assert_eq!(
        default_for(&TypeDescriptor::Bool, &clock),
        Value::Bool(false)
    );
}

#[test]
fn date_default_is_todays_date_from_the_injected_clock() {
    let clock = fixed_clock();
    assert_eq!(
        default_for(&TypeDescriptor::Date, &clock),
        Value::Date(NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date")),
        "frozen clock drives the date default"
    );
}

#[test]
fn time_default_is_midnight() {
    let clock = fixed_clock();
    assert_eq!(
        default_for(&TypeDescriptor::Time, &clock),
        Value::Time(NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"))
    );
}

#[test]
fn choice_defaults_to_first_declared_value() {
    let clock = fixed_clock();
    assert_eq!(
        default_for(&TypeDescriptor::choice(&["HIGH", "MEDIUM", "LOW"]), &clock),
        Value::Str("HIGH".to_string())
    );

    // Empty choice set has nothing to pick
    assert_eq!(
        default_for(&TypeDescriptor::choice(&[]), &clock),
        Value::Null
    );

    // Multi-select defaults to no selection
    let multi = TypeDescriptor::Choice {
        choices: vec!["A".into()],
        multiple: true,
    };
    assert_eq!(default_for(&multi, &clock), Value::List(vec![]));
}

#[test]
fn optional_defaults_to_null() {
    let clock = fixed_clock();
    assert_eq!(
        default_for(&TypeDescriptor::optional(TypeDescriptor::String), &clock),
        Value::Null
    );
    assert_eq!(
        default_for(
            &TypeDescriptor::optional(TypeDescriptor::choice(&["A", "B"])),
            &clock
        ),
        Value::Null,
        "optional choice is null, not first choice"
    );
}

#[test]
fn list_defaults_to_empty() {
    let clock = fixed_clock();
    assert_eq!(
        default_for(&TypeDescriptor::list_of(TypeDescriptor::String), &clock),
        Value::List(vec![])
    );
}

#[test]
fn declared_default_beats_type_default() {
    use schema_form::schema::defaults::field_default;

    let clock = fixed_clock();
    let field =
        FieldDef::new("name", TypeDescriptor::String).with_default(serde_json::json!("Explicit"));
    assert_eq!(
        field_default(&field, &clock),
        Value::Str("Explicit".to_string())
    );
}

#[test]
fn default_factory_is_invoked() {
    use schema_form::schema::defaults::field_default;

    fn factory() -> Value {
        Value::Str("from factory".to_string())
    }

    let clock = fixed_clock();
    let field = FieldDef::new("name", TypeDescriptor::String).with_default_fn(factory);
    assert_eq!(
        field_default(&field, &clock),
        Value::Str("from factory".to_string())
    );
}

#[test]
fn record_defaults_are_complete_at_every_depth() {
    let clock = fixed_clock();
    let fields = vec![
        FieldDef::new("title", TypeDescriptor::String),
        FieldDef::new("address", TypeDescriptor::record(address_fields())),
        FieldDef::new(
            "addresses",
            TypeDescriptor::list_of(TypeDescriptor::record(address_fields())),
        ),
    ];

    let tree = defaults_for_record(&fields, &clock);
    let map = tree.as_record().expect("record tree");

    assert_eq!(map["title"], Value::Str(String::new()));

    let address = map["address"].as_record().expect("nested record");
    assert_eq!(address["street"], Value::Str("123 Main St".to_string()));
    assert_eq!(address["is_billing"], Value::Bool(false));
    assert_eq!(address["tags"], Value::List(vec![]));

    assert_eq!(map["addresses"], Value::List(vec![]));

    // No unresolved markers anywhere in the synthesized tree
    fn assert_no_nulls(value: &Value, path: &str) {
        match value {
            Value::Null => panic!("unresolved default at {}", path),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    assert_no_nulls(item, &format!("{}[{}]", path, i));
                }
            }
            Value::Record(map) => {
                for (k, v) in map {
                    assert_no_nulls(v, &format!("{}.{}", path, k));
                }
            }
            _ => {}
        }
    }
    assert_no_nulls(&tree, "root");
}
