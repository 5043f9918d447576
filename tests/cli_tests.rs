use std::fs;
use std::path::PathBuf;

use schema_form::cli::commands::{cmd_compare, cmd_parse, cmd_render};
use schema_form::cli::config::load_config;


// =========================================================================
// CLI: config loading and end-to-end command behavior
// =========================================================================

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("schema-form-test-{}-{}", std::process::id(), name))
}

const SCHEMA_YAML: &str = r#"
name: book
fields:
  - name: title
    type:
      kind: string
    default: "Untitled"
  - name: pages
    type:
      kind: int
  - name: genre
    type:
      kind: choice
      choices: ["fiction", "nonfiction"]
    default: "fiction"
  - name: tags
    type:
      kind: list
      item:
        kind: string
    default: []
"#;

#[test]
fn load_config_returns_defaults_when_file_is_missing() {
    let config = load_config(Some("/nonexistent/schema-form.yaml"));
    assert_eq!(config.render.output, "form.html");
    assert_eq!(config.compare.output, "compare.html");
}

#[test]
fn load_config_reads_overrides_and_tolerates_garbage() {
    let path = temp_path("config.yaml");
    fs::write(&path, "render:\n  output: custom.html\n").expect("write config");
    let config = load_config(path.to_str());
    assert_eq!(config.render.output, "custom.html");
    assert_eq!(
        config.compare.output, "compare.html",
        "missing sections keep their defaults"
    );

    fs::write(&path, ":::: not yaml ::::").expect("write garbage");
    let config = load_config(path.to_str());
    assert_eq!(
        config.render.output, "form.html",
        "malformed config falls back"
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn render_command_writes_a_standalone_page() {
    let schema_path = temp_path("schema.yaml");
    let output_path = temp_path("out.html");
    fs::write(&schema_path, SCHEMA_YAML).expect("write schema");

    cmd_render(
        schema_path.to_str().unwrap(),
        None,
        None,
        "book",
        false,
        output_path.to_str().unwrap(),
        false,
    )
    .expect("render succeeds");

    let page = fs::read_to_string(&output_path).expect("output written");
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("name=\"book_title\""), "schema fields rendered");
    assert!(page.contains(">Untitled</textarea>"), "defaults applied");
    assert!(
        page.contains("function moveItem"),
        "list manipulation script embedded"
    );

    let _ = fs::remove_file(&schema_path);
    let _ = fs::remove_file(&output_path);
}

#[test]
fn render_command_accepts_initial_values() {
    let schema_path = temp_path("schema2.yaml");
    let values_path = temp_path("values.yaml");
    let output_path = temp_path("out2.html");
    fs::write(&schema_path, SCHEMA_YAML).expect("write schema");
    fs::write(&values_path, "title: Dune\ntags: [scifi, classic]\n").expect("write values");

    cmd_render(
        schema_path.to_str().unwrap(),
        values_path.to_str(),
        None,
        "book",
        false,
        output_path.to_str().unwrap(),
        false,
    )
    .expect("render succeeds");

    let page = fs::read_to_string(&output_path).expect("output written");
    assert!(page.contains(">Dune</textarea>"));
    assert!(
        page.contains("name=\"book_tags_0\""),
        "list values render indexed"
    );

    let _ = fs::remove_file(&schema_path);
    let _ = fs::remove_file(&values_path);
    let _ = fs::remove_file(&output_path);
}

#[test]
fn parse_command_validates_and_signals_failure() {
    let schema_path = temp_path("schema3.yaml");
    let good_path = temp_path("good.yaml");
    let bad_path = temp_path("bad.yaml");
    fs::write(&schema_path, SCHEMA_YAML).expect("write schema");
    fs::write(
        &good_path,
        "book_title: Dune\nbook_pages: \"412\"\nbook_genre: fiction\n",
    )
    .expect("write submission");
    fs::write(
        &bad_path,
        "book_title: Dune\nbook_pages: not-a-number\nbook_genre: fiction\n",
    )
    .expect("write submission");

    let ok = cmd_parse(
        schema_path.to_str().unwrap(),
        good_path.to_str().unwrap(),
        None,
        "book",
        true,
        false,
    )
    .expect("command runs");
    assert!(ok, "valid submission validates");

    let ok = cmd_parse(
        schema_path.to_str().unwrap(),
        bad_path.to_str().unwrap(),
        None,
        "book",
        true,
        false,
    )
    .expect("command runs");
    assert!(!ok, "invalid submission reports failure for the exit code");

    for p in [&schema_path, &good_path, &bad_path] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn compare_command_writes_a_two_column_page() {
    let schema_path = temp_path("schema4.yaml");
    let left_path = temp_path("left.yaml");
    let right_path = temp_path("right.yaml");
    let output_path = temp_path("compare-out.html");
    fs::write(&schema_path, SCHEMA_YAML).expect("write schema");
    fs::write(&left_path, "title: Reference Book\n").expect("write left");
    fs::write(&right_path, "title: Generated Book\n").expect("write right");

    cmd_compare(
        schema_path.to_str().unwrap(),
        left_path.to_str(),
        right_path.to_str(),
        "cmp",
        true,
        output_path.to_str().unwrap(),
        false,
    )
    .expect("compare succeeds");

    let page = fs::read_to_string(&output_path).expect("output written");
    assert!(page.contains("id=\"cmp_left-inputs-wrapper\""));
    assert!(page.contains("id=\"cmp_right-inputs-wrapper\""));
    assert!(page.contains(">Reference Book</textarea>"));
    assert!(page.contains(">Generated Book</textarea>"));
    assert!(
        page.contains("sfPerformCopy"),
        "copy support wired into the page"
    );

    for p in [&schema_path, &left_path, &right_path, &output_path] {
        let _ = fs::remove_file(p);
    }
}
