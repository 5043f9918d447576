// ============================================================================
// HTML building blocks — string-built markup, no templating engine
// ============================================================================

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
}

/// `disabled` attribute when the flag is set, empty otherwise.
pub fn disabled_attr(disabled: bool) -> &'static str {
    if disabled { " disabled" } else { "" }
}

/// `required` attribute when the flag is set, empty otherwise.
pub fn required_attr(required: bool) -> &'static str {
    if required { " required" } else { "" }
}

/// Humanize a snake_case field name for labels: `other_addresses` becomes
/// `Other Addresses`.
pub fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap body markup in a self-contained HTML page with inline CSS.
///
/// Used by the CLI to write standalone pages; embedding applications bring
/// their own page shell and include the script assets themselves.
pub fn render_page(title: &str, scripts: &[&str], body: &str) -> String {
    let script_tags: String = scripts
        .iter()
        .map(|js| format!("<script>{}</script>\n", js))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.content {{ max-width: 960px; margin: 20px auto; padding: 0 20px; }}
.sf-wrapper {{ background: white; border-radius: 6px; padding: 16px 20px; }}
.uk-alert {{ border-radius: 4px; padding: 10px 14px; margin: 8px 0; }}
.uk-alert-danger {{ background: #fdecea; color: #c62828; }}
.uk-alert-warning {{ background: #fff8e1; color: #8d6e00; }}
.uk-alert-info {{ background: #e3f2fd; color: #1565c0; }}
</style>
</head>
<body>
{scripts}<div class="content">
{body}
</div>
</body>
</html>"##,
        title = escape_html(title),
        scripts = script_tags,
        body = body,
    )
}
