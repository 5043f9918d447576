use schema_form::{walk_path, FieldPath, FormError, ListIndex, TypeDescriptor};

mod common;
use crate::common::{complex_schema, entries_schema};

// =========================================================================
// Field paths: wire names, data paths, index ordering, path walking
// =========================================================================

#[test]
fn wire_names_embed_indices_as_bare_segments() {
    let path = FieldPath::root("entries")
        .item(ListIndex::Numeric(0))
        .child("title");
    assert_eq!(path.wire_name("form"), "form_entries_0_title");

    let placeholder = FieldPath::root("entries")
        .item(ListIndex::Placeholder(173029))
        .child("title");
    assert_eq!(
        placeholder.wire_name("form"),
        "form_entries_new_173029_title"
    );
}

#[test]
fn data_paths_use_bracket_notation() {
    let path = FieldPath::root("entries")
        .item(ListIndex::Numeric(0))
        .child("notes")
        .item(ListIndex::Numeric(1));
    assert_eq!(path.data_path(), "entries[0].notes[1]");

    let placeholder = FieldPath::root("entries").item(ListIndex::Placeholder(42));
    assert_eq!(placeholder.data_path(), "entries[new_42]");
}

#[test]
fn data_paths_round_trip_through_the_parser() {
    for text in [
        "name",
        "author.name",
        "entries[0]",
        "entries[0].rating",
        "entries[0].notes[1].text",
        "entries[new_42].title",
    ] {
        let parsed = FieldPath::parse_data_path(text).expect("parses");
        assert_eq!(parsed.data_path(), text, "round trip for {}", text);
    }
}

#[test]
fn malformed_data_paths_are_rejected() {
    assert!(matches!(
        FieldPath::parse_data_path(""),
        Err(FormError::EmptyPath)
    ));
    assert!(
        FieldPath::parse_data_path("entries[0").is_err(),
        "unclosed bracket"
    );
    assert!(
        FieldPath::parse_data_path("entries[abc]").is_err(),
        "non-index bracket"
    );
    assert!(FieldPath::parse_data_path("a..b").is_err(), "empty segment");
}

#[test]
fn index_parsing_accepts_numeric_and_placeholder_forms() {
    assert_eq!(ListIndex::parse("0"), Some(ListIndex::Numeric(0)));
    assert_eq!(ListIndex::parse("17"), Some(ListIndex::Numeric(17)));
    assert_eq!(
        ListIndex::parse("new_12345"),
        Some(ListIndex::Placeholder(12345))
    );
    assert_eq!(ListIndex::parse("new_"), None, "placeholder needs digits");
    assert_eq!(ListIndex::parse("abc"), None);
    assert_eq!(ListIndex::parse("new_abc"), None);
}

#[test]
fn index_ordering_is_numeric_then_placeholder_by_token() {
    let mut indices = vec![
        ListIndex::Numeric(2),
        ListIndex::Placeholder(500),
        ListIndex::Numeric(0),
        ListIndex::Placeholder(200),
    ];
    indices.sort();
    assert_eq!(
        indices,
        vec![
            ListIndex::Numeric(0),
            ListIndex::Numeric(2),
            ListIndex::Placeholder(200),
            ListIndex::Placeholder(500),
        ],
        "numeric ascending first, placeholders by token value"
    );

    // Token comparison is numeric, not lexicographic
    assert!(ListIndex::Placeholder(99) < ListIndex::Placeholder(100));
}

#[test]
fn walk_path_resolves_top_level_lists() {
    let schema = complex_schema();

    let (field, parts, item) = walk_path(&schema.fields, &["tags"]).expect("tags resolves");
    assert_eq!(field.name, "tags");
    assert_eq!(parts, vec!["tags".to_string()]);
    assert_eq!(item, &TypeDescriptor::String);

    let (field, parts, item) =
        walk_path(&schema.fields, &["other_addresses"]).expect("model list resolves");
    assert_eq!(field.name, "other_addresses");
    assert_eq!(parts, vec!["other_addresses".to_string()]);
    assert!(
        matches!(item, TypeDescriptor::Record { .. }),
        "item type is the record"
    );
}

#[test]
fn walk_path_descends_through_records_and_list_items() {
    let schema = complex_schema();
    let (field, parts, item) =
        walk_path(&schema.fields, &["main_address", "tags"]).expect("nested list resolves");
    assert_eq!(field.name, "tags");
    assert_eq!(parts, vec!["main_address".to_string(), "tags".to_string()]);
    assert_eq!(item, &TypeDescriptor::String);

    let schema = entries_schema();
    let (field, parts, _item) =
        walk_path(&schema.fields, &["entries", "1", "notes"]).expect("list-in-list resolves");
    assert_eq!(field.name, "notes");
    assert_eq!(
        parts,
        vec!["entries".to_string(), "1".to_string(), "notes".to_string()]
    );
}

#[test]
fn walk_path_error_cases() {
    let schema = complex_schema();

    assert!(matches!(
        walk_path(&schema.fields, &[]),
        Err(FormError::EmptyPath)
    ));
    assert!(matches!(
        walk_path(&schema.fields, &["nonexistent"]),
        Err(FormError::UnknownField { .. })
    ));
    assert!(matches!(
        walk_path(&schema.fields, &["name"]),
        Err(FormError::NotAList { .. })
    ));
    assert!(matches!(
        walk_path(&schema.fields, &["tags", "invalid"]),
        Err(FormError::ExpectedIndex { .. })
    ));
    assert!(matches!(
        walk_path(&schema.fields, &["other_addresses", "not_a_number"]),
        Err(FormError::ExpectedIndex { .. })
    ));
    assert!(matches!(
        walk_path(&schema.fields, &["main_address", "nonexistent"]),
        Err(FormError::UnknownField { .. })
    ));
}
