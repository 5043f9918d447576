use tracing::warn;

use crate::render::html::{escape_attr, escape_html};
use crate::render::metrics::{self, DecorationScope};
use crate::render::registry::{
    copy_button, default_label, FieldCtx, FieldRenderer, RendererRegistry,
};
use crate::render::style::{spacing, SpacingToken};
use crate::schema::classifier::{classify, is_required, underlying, FieldKind};
use crate::schema::path::{ListIndex, PathSeg};
use crate::schema::schema_model::{FieldDef, TypeDescriptor};
use crate::schema::value::Value;

// ============================================================================
// Container renderers — nested records and lists
// ============================================================================

/// Renderer for nested record fields: a collapsible group containing each
/// subfield's block in declaration order.
pub struct RecordRenderer;

impl FieldRenderer for RecordRenderer {
    fn render_input(&self, reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let fields = match underlying(ctx.descriptor) {
            TypeDescriptor::Record { fields } => fields,
            _ => {
                warn!(field = ctx.field_name, "record renderer on non-record field");
                return format!(
                    "<div class=\"uk-alert uk-alert-danger\" uk-alert>No nested record found for {}</div>",
                    escape_html(ctx.field_name)
                );
            }
        };

        let mut inner = String::new();
        for field in fields {
            if classify(&field.descriptor).kind == FieldKind::Hidden {
                continue;
            }
            let child = child_ctx(ctx, field);
            inner.push_str(&reg.render_field(&child));
            inner.push('\n');
        }

        format!(
            "<div class=\"uk-card {border} rounded {padding} mt-1 {gap} items-stretch\">\n{inner}</div>",
            border = spacing(SpacingToken::CardBorder, ctx.spacing),
            padding = spacing(SpacingToken::PaddingSm, ctx.spacing),
            gap = spacing(SpacingToken::InnerGap, ctx.spacing),
            inner = inner,
        )
    }
}

/// Context for a subfield of a record-valued field.
fn child_ctx<'a>(ctx: &FieldCtx<'a>, field: &'a FieldDef) -> FieldCtx<'a> {
    let value = match ctx.value.get(&field.name) {
        Some(v) => v.clone(),
        // Only declared defaults fill absent nested values; type-driven
        // synthesis happens at form construction, not mid-render
        None => field.declared_default().unwrap_or(Value::Null),
    };

    FieldCtx {
        field_name: &field.name,
        path: ctx.path.child(&field.name),
        descriptor: &field.descriptor,
        value,
        required: is_required(field),
        disabled: ctx.disabled,
        spacing: ctx.spacing,
        form_name: ctx.form_name,
        label_color: None,
        description: field.description.as_deref(),
        metrics: ctx.metrics,
        refresh_url: ctx.refresh_url.clone(),
        copy: None,
    }
}

/// Renderer for list fields: an ordered container of item cards plus add
/// and per-item delete/insert/move affordances.
pub struct ListRenderer;

impl FieldRenderer for ListRenderer {
    fn render(&self, reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let container_id = format!("{}_items_container", ctx.wire_name());

        // Clicking the label toggles every item open or closed; the refresh
        // icon re-renders the column so item summaries stay current
        let refresh_icon = format!(
            "<span class=\"ml-1 inline-block align-middle cursor-pointer sf-list-refresh\" \
             hx-post=\"{refresh}\" hx-target=\"#{form}-inputs-wrapper\" hx-swap=\"innerHTML\" \
             hx-include=\"#{form}-form\" title=\"Refresh form display to update list summaries\">\u{21bb}</span>",
            refresh = escape_attr(&ctx.refresh_url),
            form = escape_attr(ctx.form_name),
        );

        let mut input = self.render_input(reg, ctx);
        if let Some(entry) = ctx.metric() {
            input = metrics::decorate(&input, entry, DecorationScope::Border);
        }

        format!(
            "<div class=\"{margin}\">\n\
             <div class=\"flex items-center cursor-pointer\" onclick=\"toggleListItems('{container}'); return false;\">{label}{refresh}{copy}</div>\n\
             {input}\n\
             </div>",
            margin = spacing(SpacingToken::OuterMargin, ctx.spacing),
            container = escape_attr(&container_id),
            label = default_label(ctx),
            refresh = refresh_icon,
            copy = copy_button(ctx),
            input = input,
        )
    }

    fn render_input(&self, reg: &RendererRegistry, ctx: &FieldCtx) -> String {
        let items: &[Value] = ctx.value.as_list().unwrap_or(&[]);

        let container_id = format!("{}_items_container", ctx.wire_name());
        let mut cards = String::new();
        for (idx, item) in items.iter().enumerate() {
            cards.push_str(&render_item_card(
                reg,
                ctx,
                item,
                &ListIndex::Numeric(idx),
                false,
            ));
            cards.push('\n');
        }

        let accordion = format!(
            "<ul uk-accordion=\"multiple: true; collapsible: true\" id=\"{container}\" class=\"space-y-2\">\n{cards}</ul>",
            container = escape_attr(&container_id),
            cards = cards,
        );

        let empty_state = if items.is_empty() {
            format!(
                "<div class=\"uk-alert uk-alert-info\" uk-alert>\n\
                 <div class=\"flex flex-col items-start\">No items in this list. Click 'Add Item' to create one.\n\
                 <button type=\"button\" class=\"uk-button-primary uk-button-small mt-2\" \
                 hx-post=\"{add}\" hx-target=\"#{container}\" hx-swap=\"beforeend\"{disabled}>Add Item</button>\n\
                 </div>\n</div>",
                add = escape_attr(&add_url(ctx)),
                container = escape_attr(&container_id),
                disabled = if ctx.disabled { " disabled" } else { "" },
            )
        } else {
            String::new()
        };

        format!(
            "<div class=\"{margin} {border} rounded-md {padding}\">\n{accordion}\n{empty}</div>",
            margin = spacing(SpacingToken::OuterMargin, ctx.spacing),
            border = spacing(SpacingToken::CardBorder, ctx.spacing),
            padding = spacing(SpacingToken::Padding, ctx.spacing),
            accordion = accordion,
            empty = empty_state,
        )
    }
}

/// Slash-style list path for mutation endpoints: `entries/0/notes`.
fn slash_path(ctx: &FieldCtx) -> String {
    let mut parts = Vec::new();
    for seg in &ctx.path.0 {
        match seg {
            PathSeg::Field(name) => parts.push(name.clone()),
            PathSeg::Index(idx) => parts.push(idx.to_string()),
        }
    }
    parts.join("/")
}

fn add_url(ctx: &FieldCtx) -> String {
    format!("/form/{}/list/add/{}", ctx.form_name, slash_path(ctx))
}

fn delete_url(ctx: &FieldCtx) -> String {
    format!("/form/{}/list/delete/{}", ctx.form_name, slash_path(ctx))
}

/// Render a single list item card.
///
/// `ctx` is the LIST field's context; the item index becomes the next wire
/// segment. Also used by the list mutation engine to produce the fragment
/// for a freshly added item (expanded by default).
pub fn render_item_card(
    reg: &RendererRegistry,
    ctx: &FieldCtx,
    item: &Value,
    index: &ListIndex,
    is_open: bool,
) -> String {
    let item_desc = match underlying(ctx.descriptor) {
        TypeDescriptor::List { item } => item.as_ref(),
        _ => {
            return format!(
                "<li><div class=\"uk-alert uk-alert-danger\" uk-alert>Cannot determine item type for list field {}</div></li>",
                escape_html(ctx.field_name)
            );
        }
    };

    let item_path = ctx.path.item(index.clone());
    let item_wire = item_path.wire_name(ctx.form_name);
    let card_id = format!("{}_card", item_wire);

    let summary = item_summary(item_desc, item, index);

    // Item content: record items render each subfield, scalar items render
    // a bare input named after the index segment
    let content = match underlying(item_desc) {
        TypeDescriptor::Record { fields } => {
            let mut blocks = String::new();
            for field in fields {
                if classify(&field.descriptor).kind == FieldKind::Hidden {
                    continue;
                }
                let child = FieldCtx {
                    field_name: &field.name,
                    path: item_path.child(&field.name),
                    descriptor: &field.descriptor,
                    value: item
                        .get(&field.name)
                        .cloned()
                        .or_else(|| field.declared_default())
                        .unwrap_or(Value::Null),
                    required: is_required(field),
                    disabled: ctx.disabled,
                    spacing: ctx.spacing,
                    form_name: ctx.form_name,
                    label_color: None,
                    description: field.description.as_deref(),
                    metrics: ctx.metrics,
                    refresh_url: ctx.refresh_url.clone(),
                    copy: None,
                };
                blocks.push_str(&reg.render_field(&child));
                blocks.push('\n');
            }
            blocks
        }
        _ => {
            let item_ctx = FieldCtx {
                field_name: ctx.field_name,
                path: item_path.clone(),
                descriptor: item_desc,
                value: item.clone(),
                required: false,
                disabled: ctx.disabled,
                spacing: ctx.spacing,
                form_name: ctx.form_name,
                label_color: None,
                description: None,
                metrics: ctx.metrics,
                refresh_url: ctx.refresh_url.clone(),
                copy: None,
            };
            format!("<div>{}</div>\n", reg.render_input(&item_ctx))
        }
    };

    let mut decorated = content;
    if let Some(entry) = ctx.metrics.get(&item_path.data_path()) {
        decorated = metrics::decorate(&decorated, entry, DecorationScope::Border);
    }

    let disabled = if ctx.disabled { " disabled" } else { "" };
    let actions = format!(
        "<div class=\"flex justify-between w-full mt-3 pt-3 {divider}\">\n\
         <div class=\"flex items-center\">\
         <button type=\"button\" class=\"uk-button-danger uk-button-small\" title=\"Delete this item\" \
         hx-delete=\"{delete}\" hx-target=\"#{card}\" hx-swap=\"outerHTML\" hx-params=\"idx={idx}\" \
         hx-confirm=\"Are you sure you want to delete this item?\"{disabled}>\u{1f5d1}</button>\
         <button type=\"button\" class=\"uk-button-secondary uk-button-small ml-2\" title=\"Insert new item below\" \
         hx-post=\"{add}\" hx-target=\"#{card}\" hx-swap=\"afterend\"{disabled}>+</button>\
         </div>\n\
         <div class=\"flex items-center space-x-1\">\
         <button type=\"button\" class=\"uk-button-link move-up-btn\" title=\"Move up\" \
         onclick=\"moveItemUp(this); return false;\"{disabled}>\u{2191}</button>\
         <button type=\"button\" class=\"uk-button-link move-down-btn ml-2\" title=\"Move down\" \
         onclick=\"moveItemDown(this); return false;\"{disabled}>\u{2193}</button>\
         </div>\n</div>",
        divider = spacing(SpacingToken::SectionDivider, ctx.spacing),
        delete = escape_attr(&delete_url(ctx)),
        add = escape_attr(&add_url(ctx)),
        card = escape_attr(&card_id),
        idx = escape_attr(&index.to_string()),
        disabled = disabled,
    );

    format!(
        "<li class=\"uk-card uk-card-default uk-margin-small-bottom{open}\" id=\"{card}\">\n\
         <a class=\"uk-accordion-title\" href=\"#\"><span class=\"text-gray-700 font-medium pl-3\">{summary}</span></a>\n\
         <div class=\"uk-accordion-content\">\n\
         <div class=\"{padding} {gap}\">\n{content}</div>\n{actions}\n\
         </div>\n</li>",
        open = if is_open { " uk-open" } else { "" },
        card = escape_attr(&card_id),
        summary = escape_html(&summary),
        padding = spacing(SpacingToken::PaddingCard, ctx.spacing),
        gap = spacing(SpacingToken::InnerGap, ctx.spacing),
        content = decorated,
        actions = actions,
    )
}

/// Accordion title for an item card: the first non-empty scalar values for
/// record items, the display string for scalars, an index fallback when
/// nothing usable exists.
fn item_summary(item_desc: &TypeDescriptor, item: &Value, index: &ListIndex) -> String {
    match underlying(item_desc) {
        TypeDescriptor::Record { fields } => {
            let mut parts = Vec::new();
            for field in fields {
                if let Some(v) = item.get(&field.name) {
                    let display = v.display_string();
                    if !display.is_empty() && !matches!(v, Value::List(_) | Value::Record(_)) {
                        parts.push(display);
                    }
                }
                if parts.len() >= 2 {
                    break;
                }
            }
            if parts.is_empty() {
                format!("Item {}", index)
            } else {
                parts.join(", ")
            }
        }
        _ => {
            let display = item.display_string();
            if display.is_empty() {
                format!("Item {}", index)
            } else {
                display
            }
        }
    }
}
