use schema_form::{add_item, delete_item, next_placeholder_token, FormError, Value};

mod common;
use crate::common::{complex_form, entries_form, fixed_clock, record, submission};

// =========================================================================
// List mutation engine: add, delete, placeholder tokens
// =========================================================================

#[test]
fn placeholder_tokens_are_strictly_increasing_within_a_burst() {
    let clock = fixed_clock();
    let a = next_placeholder_token(&clock);
    let b = next_placeholder_token(&clock);
    let c = next_placeholder_token(&clock);
    assert!(a < b && b < c, "same clock reading still yields unique tokens");
}

#[test]
fn add_item_renders_a_placeholder_indexed_fragment() {
    let form = complex_form("f");
    let fragment = add_item(&form, &["tags"]).expect("add resolves");

    assert!(
        fragment.contains("name=\"f_tags_new_"),
        "new item wire name uses a placeholder index"
    );
    assert!(fragment.contains("uk-open"), "fresh items render expanded");
}

#[test]
fn add_item_synthesizes_record_defaults() {
    let form = complex_form("f");
    let fragment = add_item(&form, &["other_addresses"]).expect("add resolves");

    assert!(
        fragment.contains("name=\"f_other_addresses_new_"),
        "record item fields are placeholder-prefixed"
    );
    assert!(
        fragment.contains(">123 Main St</textarea>"),
        "declared defaults populate the fresh item"
    );
}

#[test]
fn add_item_works_on_nested_lists() {
    let form = entries_form("f");
    let fragment = add_item(&form, &["entries", "1", "notes"]).expect("nested add resolves");

    assert!(
        fragment.contains("name=\"f_entries_1_notes_new_"),
        "nested path segments survive into the wire name"
    );
}

#[test]
fn add_item_on_unknown_path_is_a_clean_error() {
    let form = complex_form("f");
    let err = add_item(&form, &["no_such_list"]).expect_err("must fail");
    assert!(
        matches!(err, FormError::UnknownField { .. }),
        "unknown list paths are client-visible errors, not faults"
    );

    let err = add_item(&form, &["name"]).expect_err("must fail");
    assert!(matches!(err, FormError::NotAList { .. }));
}

#[test]
fn delete_item_acknowledges_without_markup() {
    let form = complex_form("f");
    assert!(delete_item(&form, &["tags"], "0").is_ok());
    assert!(delete_item(&form, &["tags"], "new_12345").is_ok());

    assert!(
        matches!(
            delete_item(&form, &["tags"], "bogus"),
            Err(FormError::BadIndex { .. })
        ),
        "malformed index is rejected"
    );
    assert!(delete_item(&form, &["nope"], "0").is_err());
}

#[test]
fn delete_does_not_renumber_surviving_items() {
    // After deleting item 2 of 5 client-side, the remaining wire names
    // are untouched and reconciliation preserves their values in order
    let form = complex_form("f");

    let before = form
        .clone_with_values(record(vec![(
            "tags",
            Value::List(vec![
                Value::Str("t0".into()),
                Value::Str("t1".into()),
                Value::Str("t2".into()),
                Value::Str("t3".into()),
                Value::Str("t4".into()),
            ]),
        )]))
        .render_inputs();
    for idx in ["0", "1", "3", "4"] {
        assert!(
            before.contains(&format!("name=\"f_tags_{}\"", idx)),
            "item {} rendered",
            idx
        );
    }

    // The server acknowledges the delete; the DOM drops index 2 only
    delete_item(&form, &["tags"], "2").expect("delete ok");

    let parsed = form.parse(&submission(&[
        ("f_tags_0", "t0"),
        ("f_tags_1", "t1"),
        ("f_tags_3", "t3"),
        ("f_tags_4", "t4"),
    ]));
    assert_eq!(
        parsed.get("tags"),
        Some(&Value::List(vec![
            Value::Str("t0".into()),
            Value::Str("t1".into()),
            Value::Str("t3".into()),
            Value::Str("t4".into()),
        ])),
        "surviving indices keep their values and order"
    );
}

#[test]
fn added_fragments_reconcile_into_the_list() {
    let form = complex_form("f");
    let fragment = add_item(&form, &["tags"]).expect("add ok");

    // Extract the generated wire name from the fragment
    let start = fragment.find("name=\"f_tags_new_").expect("wire name present");
    let rest = &fragment[start + 6..];
    let end = rest.find('"').expect("closing quote");
    let wire = &rest[..end];

    let parsed = form.parse(&submission(&[("f_tags_0", "existing"), (wire, "fresh")]));
    assert_eq!(
        parsed.get("tags"),
        Some(&Value::List(vec![
            Value::Str("existing".into()),
            Value::Str("fresh".into()),
        ])),
        "placeholder items land after numeric ones"
    );
}
