use std::sync::Arc;

use schema_form::{
    FieldCtx, FieldDef, FieldRenderer, FormInstance, RendererRegistry, Schema, TypeDescriptor,
    Value,
};

mod common;
use crate::common::{complex_form, record};

// =========================================================================
// Built-in renderers: input shapes, edge cases, custom overrides
// =========================================================================

fn single_field_markup(descriptor: TypeDescriptor, value: Value) -> String {
    let schema = Schema::new("s", vec![FieldDef::new("field", descriptor)]);
    FormInstance::new("f", schema)
        .with_values(record(vec![("field", value)]))
        .render_inputs()
}

#[test]
fn string_renders_a_textarea() {
    let markup = single_field_markup(TypeDescriptor::String, Value::Str("hello".into()));
    assert!(markup.contains("<textarea"));
    assert!(markup.contains(">hello</textarea>"));
    assert!(markup.contains("name=\"f_field\""));
}

#[test]
fn string_value_is_html_escaped() {
    let markup = single_field_markup(
        TypeDescriptor::String,
        Value::Str("<script>alert(1)</script>".into()),
    );
    assert!(
        !markup.contains("<script>alert"),
        "markup injection is escaped"
    );
    assert!(markup.contains("&lt;script&gt;"));
}

#[test]
fn int_renders_unit_step_and_float_step_any() {
    let int_markup = single_field_markup(TypeDescriptor::Int, Value::Int(7));
    assert!(int_markup.contains("type=\"number\""));
    assert!(int_markup.contains("step=\"1\""));
    assert!(int_markup.contains("value=\"7\""));

    let float_markup = single_field_markup(TypeDescriptor::Float, Value::Float(1.5));
    assert!(float_markup.contains("step=\"any\""));
}

#[test]
fn decimal_renders_step_any_with_full_precision() {
    let markup = single_field_markup(
        TypeDescriptor::Decimal,
        Value::Decimal("123.456789012345678901".into()),
    );
    assert!(markup.contains("step=\"any\""));
    assert!(markup.contains("value=\"123.456789012345678901\""));
}

#[test]
fn boolean_renders_a_checkbox_and_false_is_not_empty() {
    let checked = single_field_markup(TypeDescriptor::Bool, Value::Bool(true));
    assert!(checked.contains("type=\"checkbox\""));
    assert!(checked.contains(" checked"));

    let unchecked = single_field_markup(TypeDescriptor::Bool, Value::Bool(false));
    assert!(unchecked.contains("type=\"checkbox\""));
    assert!(!unchecked.contains(" checked"), "false renders unchecked");

    // The display fallback keeps false visible rather than collapsing it
    assert_eq!(Value::Bool(false).display_string(), "false");
    assert_ne!(
        Value::Bool(false).display_string(),
        String::new(),
        "false and empty are distinct"
    );
}

#[test]
fn date_and_time_render_iso_values() {
    use chrono::{NaiveDate, NaiveTime};

    let date_markup = single_field_markup(
        TypeDescriptor::Date,
        Value::Date(NaiveDate::from_ymd_opt(2023, 5, 17).expect("valid")),
    );
    assert!(date_markup.contains("type=\"date\""));
    assert!(date_markup.contains("value=\"2023-05-17\""));

    let time_markup = single_field_markup(
        TypeDescriptor::Time,
        Value::Time(NaiveTime::from_hms_opt(14, 30, 0).expect("valid")),
    );
    assert!(time_markup.contains("type=\"time\""));
    assert!(time_markup.contains("value=\"14:30\""));

    // Submitted strings pass through untouched
    let passthrough = single_field_markup(TypeDescriptor::Date, Value::Str("2022-02-02".into()));
    assert!(passthrough.contains("value=\"2022-02-02\""));
}

#[test]
fn choice_select_lists_options_in_declaration_order() {
    let markup = single_field_markup(
        TypeDescriptor::choice(&["PENDING", "ACTIVE", "DONE"]),
        Value::Str("ACTIVE".into()),
    );

    let pending_at = markup.find(">PENDING<").expect("first option");
    let active_at = markup.find(">ACTIVE<").expect("second option");
    let done_at = markup.find(">DONE<").expect("third option");
    assert!(
        pending_at < active_at && active_at < done_at,
        "declaration order"
    );

    assert!(
        markup.contains("value=\"ACTIVE\" selected"),
        "current value is marked selected"
    );
    assert!(
        !markup.contains("-- None --"),
        "required choice has no none sentinel"
    );
}

#[test]
fn optional_choice_prepends_a_none_sentinel() {
    let markup = single_field_markup(
        TypeDescriptor::optional(TypeDescriptor::choice(&["A", "B"])),
        Value::Null,
    );
    assert!(markup.contains("-- None --"));
    assert!(
        markup.contains("value=\"\" selected"),
        "null selects the sentinel"
    );
}

#[test]
fn multi_choice_renders_pills_with_indexed_hidden_inputs() {
    let markup = single_field_markup(
        TypeDescriptor::Choice {
            choices: vec!["red".into(), "green".into(), "blue".into()],
            multiple: true,
        },
        Value::List(vec![Value::Str("red".into()), Value::Str("blue".into())]),
    );

    assert!(
        markup.contains("f_field_pills_container"),
        "pill container id"
    );
    assert!(
        markup.contains("id=\"f_field_0_pill\""),
        "selected values render as pills"
    );
    assert!(markup.contains("id=\"f_field_1_pill\""));
    assert!(markup.contains("name=\"f_field_0\"") && markup.contains("value=\"red\""));
    assert!(
        markup.contains("f_field_pills_container_dropdown"),
        "dropdown offers remaining options"
    );
    assert!(
        markup.contains(">green<"),
        "unselected option available in the dropdown"
    );
}

#[test]
fn empty_multi_choice_has_no_pills() {
    let markup = single_field_markup(
        TypeDescriptor::Choice {
            choices: vec!["red".into()],
            multiple: true,
        },
        Value::List(vec![]),
    );
    assert!(markup.contains("f_field_pills_container"));
    assert!(!markup.contains("_0_pill"), "no pills without selections");
}

#[test]
fn display_coercion_never_fails() {
    // A record value reaching the text renderer renders best-effort
    let markup = single_field_markup(
        TypeDescriptor::String,
        record(vec![("unexpected", Value::Int(1))]),
    );
    assert!(
        markup.contains("unexpected: 1"),
        "non-string values render their display form instead of failing"
    );
}

#[test]
fn labels_humanize_names_and_carry_descriptions() {
    let schema = Schema::new(
        "s",
        vec![FieldDef::new("other_addresses", TypeDescriptor::String)
            .with_description("Additional mailing addresses")],
    );
    let markup = FormInstance::new("f", schema).render_inputs();

    assert!(
        markup.contains(">Other Addresses</span>"),
        "snake_case humanized"
    );
    assert!(
        markup.contains("title=\"Additional mailing addresses\""),
        "description becomes a tooltip"
    );
}

#[test]
fn required_marking_follows_optionality_and_defaults() {
    let schema = Schema::new(
        "s",
        vec![
            FieldDef::new("must", TypeDescriptor::String),
            FieldDef::new("may", TypeDescriptor::optional(TypeDescriptor::String)),
        ],
    );
    let markup = FormInstance::new("f", schema).render_inputs();

    let must_at = markup.find("name=\"f_must\"").expect("rendered");
    assert!(markup[must_at..must_at + 160].contains("required"));

    let may_at = markup.find("name=\"f_may\"").expect("rendered");
    assert!(
        markup[may_at..(may_at + 160).min(markup.len())].contains("(Optional)"),
        "optional fields advertise it in the placeholder"
    );
}

#[test]
fn custom_renderer_overrides_resolve_by_exact_name() {
    struct StarRating;

    impl FieldRenderer for StarRating {
        fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
            format!(
                "<div class=\"star-rating\" data-field-path=\"{}\" data-name=\"{}\"></div>",
                ctx.data_path(),
                ctx.wire_name(),
            )
        }
    }

    let mut registry = RendererRegistry::with_defaults();
    registry.register("star_rating", Arc::new(StarRating));

    let schema = Schema::new(
        "s",
        vec![FieldDef::new(
            "stars",
            TypeDescriptor::Custom {
                name: "star_rating".to_string(),
            },
        )],
    );
    let form = FormInstance::new("f", schema).with_registry(Arc::new(registry));
    let markup = form.render_inputs();

    assert!(
        markup.contains("class=\"star-rating\""),
        "exact-name override wins over the kind fallback"
    );
    assert!(
        markup.contains("data-name=\"f_stars\""),
        "custom renderers honor the prefix contract"
    );
    assert!(
        markup.contains("data-field-path=\"stars\""),
        "custom renderers honor the path contract"
    );
}

#[test]
fn unregistered_custom_types_fall_back_to_text() {
    let markup = single_field_markup(
        TypeDescriptor::Custom {
            name: "unknown_widget".to_string(),
        },
        Value::Str("shown".into()),
    );
    assert!(
        markup.contains(">shown</textarea>"),
        "no registered renderer degrades to the string renderer"
    );
}

#[test]
fn builtin_renderers_can_be_overridden() {
    struct LoudString;

    impl FieldRenderer for LoudString {
        fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
            format!("<input class=\"loud\" name=\"{}\">", ctx.wire_name())
        }
    }

    let mut registry = RendererRegistry::with_defaults();
    registry.register("string", Arc::new(LoudString));

    let schema = Schema::new("s", vec![FieldDef::new("field", TypeDescriptor::String)]);
    let form = FormInstance::new("f", schema).with_registry(Arc::new(registry));
    assert!(form.render_inputs().contains("class=\"loud\""));
}

#[test]
fn compact_spacing_drops_card_borders() {
    use schema_form::SpacingTheme;

    let normal = complex_form("f").render_inputs();
    let compact = complex_form("f")
        .with_spacing(SpacingTheme::Compact)
        .render_inputs();

    assert!(
        normal.contains("border rounded-md"),
        "normal theme keeps borders"
    );
    assert!(
        !compact.contains("border rounded-md"),
        "compact theme drops the list card border"
    );
}
