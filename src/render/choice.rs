use tracing::warn;

use crate::render::html::{disabled_attr, escape_attr, escape_html, required_attr};
use crate::render::registry::{FieldCtx, FieldRenderer, RendererRegistry};
use crate::schema::classifier::{classify, underlying};
use crate::schema::schema_model::TypeDescriptor;
use crate::schema::value::Value;

// ============================================================================
// Choice renderer — single select and multi-select pills
// ============================================================================

/// UI representation of "no selection" for optional choice fields.
pub const NONE_OPTION_LABEL: &str = "-- None --";

pub struct ChoiceRenderer;

impl FieldRenderer for ChoiceRenderer {
    fn render_input(&self, _reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let (choices, multiple) = match underlying(ctx.descriptor) {
            TypeDescriptor::Choice { choices, multiple } => (choices, *multiple),
            _ => {
                warn!(field = ctx.field_name, "choice renderer on non-choice field");
                return format!(
                    "<div class=\"uk-alert uk-alert-warning\" uk-alert>No choice values found for {}</div>",
                    escape_html(ctx.field_name)
                );
            }
        };

        if choices.is_empty() {
            return format!(
                "<div class=\"uk-alert uk-alert-warning\" uk-alert>No choice values found for {}</div>",
                escape_html(ctx.field_name)
            );
        }

        if multiple {
            render_pills(ctx, choices)
        } else {
            render_select(ctx, choices)
        }
    }
}

/// Single select: options in declaration order, a none sentinel prepended
/// for optional fields, the current value marked selected.
fn render_select(ctx: &FieldCtx, choices: &[String]) -> String {
    let is_optional = classify(ctx.descriptor).is_optional;
    let current = match &ctx.value {
        Value::Null => None,
        other => Some(other.display_string()),
    };

    let mut options = String::new();
    if is_optional {
        options.push_str(&format!(
            "<option value=\"\"{}>{}</option>\n",
            if current.is_none() { " selected" } else { "" },
            NONE_OPTION_LABEL,
        ));
    }

    for choice in choices {
        let selected = current.as_deref() == Some(choice.as_str());
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_attr(choice),
            if selected { " selected" } else { "" },
            escape_html(choice),
        ));
    }

    let wire = ctx.wire_name();
    format!(
        "<select id=\"{wire}\" name=\"{wire}\" data-field-path=\"{path}\" class=\"w-full\"{required}{disabled}>\n{options}</select>",
        wire = escape_attr(&wire),
        path = escape_attr(&ctx.data_path()),
        required = required_attr(ctx.required && !is_optional),
        disabled = disabled_attr(ctx.disabled),
        options = options,
    )
}

/// Multi-select pill widget: selected values as removable pills backed by
/// hidden indexed inputs, plus a dropdown offering the remaining options.
fn render_pills(ctx: &FieldCtx, choices: &[String]) -> String {
    let selected: Vec<String> = match &ctx.value {
        Value::List(items) => items.iter().map(|v| v.display_string()).collect(),
        Value::Null => Vec::new(),
        other => {
            // Tolerate a stray scalar: treat it as a single selection
            vec![other.display_string()]
        }
    };

    let wire = ctx.wire_name();
    let container_id = format!("{}_pills_container", wire);

    let mut pills = String::new();
    for (i, value) in selected.iter().enumerate() {
        let item_wire = format!("{}_{}", wire, i);
        let remove = if ctx.disabled {
            ""
        } else {
            "<button type=\"button\" class=\"sf-pill-remove ml-1\" \
             onclick=\"this.closest('span').remove(); return false;\">\u{00d7}</button>"
        };
        pills.push_str(&format!(
            "<span class=\"sf-pill uk-badge mr-1\" id=\"{pill_id}\">\
             <input type=\"hidden\" name=\"{item_wire}\" data-field-path=\"{path}[{i}]\" value=\"{value}\">{label}{remove}</span>\n",
            pill_id = escape_attr(&format!("{}_{}_pill", wire, i)),
            item_wire = escape_attr(&item_wire),
            path = escape_attr(&ctx.data_path()),
            i = i,
            value = escape_attr(value),
            label = escape_html(value),
            remove = remove,
        ));
    }

    // Dropdown offers only options not yet selected; adding creates a pill
    // with a placeholder-suffixed name so reconciliation appends it
    let mut remaining_options = String::from("<option value=\"\">Add...</option>\n");
    for choice in choices {
        if selected.iter().any(|s| s == choice) {
            continue;
        }
        remaining_options.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            escape_attr(choice),
            escape_html(choice),
        ));
    }

    let dropdown = format!(
        "<select id=\"{container_id}_dropdown\" class=\"sf-pill-add\"{disabled} \
         onchange=\"if(this.value){{var c=document.getElementById('{container_id}');\
var s=document.createElement('span');s.className='sf-pill uk-badge mr-1';\
s.innerHTML='<input type=&quot;hidden&quot; name=&quot;{wire}_new_'+Date.now()+'&quot; value=&quot;'+this.value+'&quot;>'+this.value+\
' <button type=&quot;button&quot; class=&quot;sf-pill-remove ml-1&quot; onclick=&quot;this.closest(\\'span\\').remove(); return false;&quot;>\u{00d7}</button>';\
c.appendChild(s);this.selectedIndex=0;}}\">\n{options}</select>",
        container_id = escape_attr(&container_id),
        wire = escape_attr(&wire),
        disabled = disabled_attr(ctx.disabled),
        options = remaining_options,
    );

    format!(
        "<div id=\"{container_id}\" class=\"sf-pills flex flex-wrap items-center\">\n{pills}</div>\n{dropdown}",
        container_id = escape_attr(&container_id),
        pills = pills,
        dropdown = dropdown,
    )
}
