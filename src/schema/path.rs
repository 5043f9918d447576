use std::cmp::Ordering;
use std::fmt;

use crate::error::FormError;
use crate::schema::classifier::underlying;
use crate::schema::schema_model::{FieldDef, TypeDescriptor};

// ============================================================================
// Field paths, list indices and wire names
// ============================================================================

/// Prefix marking a not-yet-persisted list item index on the wire.
pub const PLACEHOLDER_PREFIX: &str = "new_";

/// Index of an item within a rendered list.
///
/// Numeric indices identify already-materialized items and are never
/// renumbered mid-session; placeholder indices mark items added during the
/// current interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIndex {
    Numeric(usize),
    /// Monotonic token; renders as `new_<token>`
    Placeholder(u64),
}

impl ListIndex {
    /// Parse a wire segment: bare digits or `new_<digits>`.
    pub fn parse(segment: &str) -> Option<ListIndex> {
        if let Some(rest) = segment.strip_prefix(PLACEHOLDER_PREFIX) {
            return rest.parse::<u64>().ok().map(ListIndex::Placeholder);
        }
        segment.parse::<usize>().ok().map(ListIndex::Numeric)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ListIndex::Placeholder(_))
    }
}

impl fmt::Display for ListIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListIndex::Numeric(n) => write!(f, "{}", n),
            ListIndex::Placeholder(t) => write!(f, "{}{}", PLACEHOLDER_PREFIX, t),
        }
    }
}

impl Ord for ListIndex {
    /// Numeric indices sort before placeholders; placeholders compare by
    /// token value, not lexicographically (`new_99` < `new_100`).
    fn cmp(&self, other: &ListIndex) -> Ordering {
        match (self, other) {
            (ListIndex::Numeric(a), ListIndex::Numeric(b)) => a.cmp(b),
            (ListIndex::Numeric(_), ListIndex::Placeholder(_)) => Ordering::Less,
            (ListIndex::Placeholder(_), ListIndex::Numeric(_)) => Ordering::Greater,
            (ListIndex::Placeholder(a), ListIndex::Placeholder(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ListIndex {
    fn partial_cmp(&self, other: &ListIndex) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One step of a field path: a record field or a list item index.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSeg {
    Field(String),
    Index(ListIndex),
}

/// Ordered segments identifying a leaf or subtree within a value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldPath(pub Vec<PathSeg>);

impl FieldPath {
    pub fn root(field: &str) -> FieldPath {
        FieldPath(vec![PathSeg::Field(field.to_string())])
    }

    pub fn child(&self, field: &str) -> FieldPath {
        let mut segs = self.0.clone();
        segs.push(PathSeg::Field(field.to_string()));
        FieldPath(segs)
    }

    pub fn item(&self, index: ListIndex) -> FieldPath {
        let mut segs = self.0.clone();
        segs.push(PathSeg::Index(index));
        FieldPath(segs)
    }

    /// Wire name: namespace plus every segment joined with `_`.
    ///
    /// `form.entries[0].title` becomes `myform_entries_0_title`; placeholder
    /// indices embed as `myform_entries_new_42_title`.
    pub fn wire_name(&self, namespace: &str) -> String {
        let mut out = namespace.to_string();
        for seg in &self.0 {
            out.push('_');
            match seg {
                PathSeg::Field(name) => out.push_str(name),
                PathSeg::Index(idx) => out.push_str(&idx.to_string()),
            }
        }
        out
    }

    /// Dot/bracket notation used for cross-form addressing:
    /// `entries[0].notes[1].text`, `entries[new_42].title`.
    pub fn data_path(&self) -> String {
        let mut out = String::new();
        for seg in &self.0 {
            match seg {
                PathSeg::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSeg::Index(idx) => {
                    out.push('[');
                    out.push_str(&idx.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Parse dot/bracket notation back into segments.
    pub fn parse_data_path(path: &str) -> Result<FieldPath, FormError> {
        if path.is_empty() {
            return Err(FormError::EmptyPath);
        }

        let mut segs = Vec::new();
        for part in path.split('.') {
            let mut rest = part;

            // Field name runs up to the first bracket
            let name_end = rest.find('[').unwrap_or(rest.len());
            let name = &rest[..name_end];
            if name.is_empty() {
                return Err(FormError::MalformedPath {
                    path: path.to_string(),
                    reason: "empty segment".to_string(),
                });
            }
            segs.push(PathSeg::Field(name.to_string()));
            rest = &rest[name_end..];

            // Zero or more [idx] suffixes
            while let Some(stripped) = rest.strip_prefix('[') {
                let close = stripped.find(']').ok_or_else(|| FormError::MalformedPath {
                    path: path.to_string(),
                    reason: "unclosed bracket".to_string(),
                })?;
                let idx_text = &stripped[..close];
                let index = ListIndex::parse(idx_text).ok_or_else(|| FormError::BadIndex {
                    index: idx_text.to_string(),
                })?;
                segs.push(PathSeg::Index(index));
                rest = &stripped[close + 1..];
            }

            if !rest.is_empty() {
                return Err(FormError::MalformedPath {
                    path: path.to_string(),
                    reason: format!("unexpected trailing '{}'", rest),
                });
            }
        }

        Ok(FieldPath(segs))
    }
}

/// Walk slash-style list path segments (`entries/1/notes`) through a field
/// list, returning the final list field, the wire segments, and the item
/// descriptor.
///
/// Used by the list mutation engine to resolve add/delete targets at any
/// nesting depth.
pub fn walk_path<'a>(
    fields: &'a [FieldDef],
    segments: &[&str],
) -> Result<(&'a FieldDef, Vec<String>, &'a TypeDescriptor), FormError> {
    if segments.is_empty() {
        return Err(FormError::EmptyPath);
    }

    let mut current_fields = fields;
    let mut wire_parts: Vec<String> = Vec::new();
    let mut i = 0;

    loop {
        let name = segments[i];
        let field = current_fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField {
                field: name.to_string(),
                context: "schema".to_string(),
            })?;
        wire_parts.push(name.to_string());

        let structural = underlying(&field.descriptor);
        let is_last = i == segments.len() - 1;

        match structural {
            TypeDescriptor::List { item } => {
                if is_last {
                    return Ok((field, wire_parts, item.as_ref()));
                }

                // A list mid-path must be followed by an item index, and the
                // item type must be a record to descend further
                i += 1;
                let idx_seg = segments[i];
                if ListIndex::parse(idx_seg).is_none() {
                    return Err(FormError::ExpectedIndex {
                        field: name.to_string(),
                        segment: idx_seg.to_string(),
                    });
                }
                wire_parts.push(idx_seg.to_string());

                match underlying(item) {
                    TypeDescriptor::Record { fields } => {
                        current_fields = fields;
                    }
                    _ => {
                        return Err(FormError::NotAList {
                            field: segments[i + 1..].join("/"),
                        });
                    }
                }
            }
            TypeDescriptor::Record { fields } => {
                if is_last {
                    return Err(FormError::NotAList {
                        field: name.to_string(),
                    });
                }
                current_fields = fields;
            }
            _ => {
                return Err(FormError::NotAList {
                    field: name.to_string(),
                });
            }
        }

        i += 1;
        if i >= segments.len() {
            // Path ended on an index segment with no trailing list field
            return Err(FormError::NotAList {
                field: segments[segments.len() - 1].to_string(),
            });
        }
    }
}
