use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

use crate::compare::compare_model::{simple_diff_metrics, ComparisonPair};
use crate::form::form_model::FormInstance;
use crate::render::html::render_page;
use crate::render::metrics::MetricsMap;
use crate::render::scripts::{COMPARISON_SYNC_JS, LIST_MANIPULATION_JS};
use crate::render::style::SpacingTheme;
use crate::schema::schema_model::Schema;

// ============================================================================
// CLI commands — render / parse / compare
// ============================================================================

fn load_schema(path: &str) -> Result<Schema, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let schema: Schema = serde_yaml::from_str(&content)?;
    Ok(schema)
}

fn load_json_values(path: &str) -> Result<serde_json::Value, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let values: serde_json::Value = serde_yaml::from_str(&content)?;
    Ok(values)
}

fn load_metrics(path: &str) -> Result<MetricsMap, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let metrics: MetricsMap = serde_yaml::from_str(&content)?;
    Ok(metrics)
}

fn load_submission(path: &str) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let submission: BTreeMap<String, String> = serde_yaml::from_str(&content)?;
    Ok(submission)
}

fn build_form(
    name: &str,
    schema: Schema,
    values_path: Option<&str>,
) -> Result<FormInstance, Box<dyn Error>> {
    let mut form = FormInstance::new(name, schema);
    if let Some(path) = values_path {
        let values = load_json_values(path)?;
        form = form.with_initial_values(&values);
    }
    Ok(form)
}

/// Render a standalone form page.
pub fn cmd_render(
    schema_path: &str,
    values_path: Option<&str>,
    metrics_path: Option<&str>,
    name: &str,
    compact: bool,
    output: &str,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let schema = load_schema(schema_path)?;
    let mut form = build_form(name, schema, values_path)?;

    if compact {
        form = form.with_spacing(SpacingTheme::Compact);
    }
    if let Some(path) = metrics_path {
        form = form.with_metrics(load_metrics(path)?);
    }

    let body = format!(
        "<form id=\"{}\">\n{}\n<div class=\"mt-4\">{} {}</div>\n</form>",
        form.form_id(),
        form.render_inputs(),
        form.refresh_button(None),
        form.reset_button(None),
    );
    let page = render_page(&form.name, &[LIST_MANIPULATION_JS], &body);

    fs::write(output, &page)?;
    if verbose {
        println!("Rendered form '{}' ({} bytes)", form.name, page.len());
    }
    println!("Wrote {}", output);
    Ok(())
}

/// Reconcile a submission and print the nested tree as JSON. Returns false
/// when validation was requested and failed.
pub fn cmd_parse(
    schema_path: &str,
    submission_path: &str,
    values_path: Option<&str>,
    name: &str,
    validate: bool,
    verbose: bool,
) -> Result<bool, Box<dyn Error>> {
    let schema = load_schema(schema_path)?;
    let form = build_form(name, schema, values_path)?;
    let submission = load_submission(submission_path)?;

    if verbose {
        println!("Parsing {} submitted keys", submission.len());
    }

    if validate {
        match form.validate_submission(&submission) {
            Ok(tree) => {
                println!("{}", serde_json::to_string_pretty(&tree.to_json())?);
                Ok(true)
            }
            Err(errors) => {
                eprintln!("Validation failed ({} errors):", errors.len());
                eprintln!("{}", errors);
                Ok(false)
            }
        }
    } else {
        let tree = form.parse(&submission);
        println!("{}", serde_json::to_string_pretty(&tree.to_json())?);
        Ok(true)
    }
}

/// Render a two-column comparison page.
pub fn cmd_compare(
    schema_path: &str,
    left_path: Option<&str>,
    right_path: Option<&str>,
    name: &str,
    diff_metrics: bool,
    output: &str,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let schema = load_schema(schema_path)?;

    let left = build_form(&format!("{}_left", name), schema.clone(), left_path)?;
    let mut right = build_form(&format!("{}_right", name), schema.clone(), right_path)?;

    if diff_metrics {
        let metrics = simple_diff_metrics(&left.values, &right.values, &schema.fields);
        right = right.with_metrics(metrics);
    }

    let pair = ComparisonPair::new(name, left, right).with_copy(false, true);
    let body = pair.form_wrapper(&format!(
        "{}\n<div class=\"mt-4\">{} {} {} {}</div>",
        pair.render_inputs(),
        pair.left_refresh_button(None),
        pair.left_reset_button(None),
        pair.right_refresh_button(None),
        pair.right_reset_button(None),
    ));
    let page = render_page(name, &[LIST_MANIPULATION_JS, COMPARISON_SYNC_JS], &body);

    fs::write(output, &page)?;
    if verbose {
        println!("Rendered comparison '{}' ({} bytes)", name, page.len());
    }
    println!("Wrote {}", output);
    Ok(())
}
