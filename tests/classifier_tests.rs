use schema_form::{classify, FieldDef, FieldKind, TypeDescriptor};


// =========================================================================
// Type classification: kinds, optionality, hidden detection
// =========================================================================

#[test]
fn classifies_scalar_kinds() {
    assert_eq!(classify(&TypeDescriptor::String).kind, FieldKind::Str);
    assert_eq!(
        classify(&TypeDescriptor::Int).kind,
        FieldKind::Number { float: false }
    );
    assert_eq!(
        classify(&TypeDescriptor::Float).kind,
        FieldKind::Number { float: true }
    );
    assert_eq!(classify(&TypeDescriptor::Decimal).kind, FieldKind::Decimal);
    assert_eq!(classify(&TypeDescriptor::Bool).kind, FieldKind::Boolean);
    assert_eq!(classify(&TypeDescriptor::Date).kind, FieldKind::Date);
    assert_eq!(classify(&TypeDescriptor::Time).kind, FieldKind::Time);
}

#[test]
fn classifies_containers() {
    assert_eq!(
        classify(&TypeDescriptor::list_of(TypeDescriptor::String)).kind,
        FieldKind::List
    );
    assert_eq!(
        classify(&TypeDescriptor::record(vec![])).kind,
        FieldKind::Record
    );
}

#[test]
fn unwraps_one_level_of_optionality() {
    let classified = classify(&TypeDescriptor::optional(TypeDescriptor::Int));
    assert_eq!(classified.kind, FieldKind::Number { float: false });
    assert!(classified.is_optional, "Optional[Int] keeps the inner kind");

    let plain = classify(&TypeDescriptor::Int);
    assert!(!plain.is_optional, "bare Int is not optional");
}

#[test]
fn detects_hidden_under_optional() {
    let skip = TypeDescriptor::Skip {
        inner: Box::new(TypeDescriptor::String),
    };
    assert_eq!(classify(&skip).kind, FieldKind::Hidden);

    let optional_skip = TypeDescriptor::optional(TypeDescriptor::Skip {
        inner: Box::new(TypeDescriptor::String),
    });
    let classified = classify(&optional_skip);
    assert_eq!(
        classified.kind,
        FieldKind::Hidden,
        "Skip is detected even under Optional"
    );
    assert!(classified.is_optional);
}

#[test]
fn choice_kind_carries_multiplicity() {
    assert_eq!(
        classify(&TypeDescriptor::choice(&["A", "B"])).kind,
        FieldKind::Choice { multiple: false }
    );
    let multi = TypeDescriptor::Choice {
        choices: vec!["A".into(), "B".into()],
        multiple: true,
    };
    assert_eq!(classify(&multi).kind, FieldKind::Choice { multiple: true });
}

#[test]
fn unresolved_annotation_falls_back_to_string() {
    let unresolved = TypeDescriptor::Unresolved {
        annotation: "SomeForwardRef".to_string(),
    };
    assert_eq!(
        classify(&unresolved).kind,
        FieldKind::Str,
        "string-form annotations degrade to text, not an error"
    );
}

#[test]
fn custom_kind_keeps_its_name() {
    let custom = TypeDescriptor::Custom {
        name: "color_picker".to_string(),
    };
    assert_eq!(
        classify(&custom).kind,
        FieldKind::Custom("color_picker".to_string())
    );
}

#[test]
fn required_accounts_for_optionality_and_defaults() {
    use schema_form::schema::classifier::is_required;

    let required = FieldDef::new("name", TypeDescriptor::String);
    assert!(is_required(&required), "no default, not optional");

    let defaulted =
        FieldDef::new("name", TypeDescriptor::String).with_default(serde_json::json!("x"));
    assert!(!is_required(&defaulted), "declared default satisfies");

    let optional = FieldDef::new("name", TypeDescriptor::optional(TypeDescriptor::String));
    assert!(!is_required(&optional), "optional fields are never required");
}
