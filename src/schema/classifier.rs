use crate::schema::schema_model::{FieldDef, TypeDescriptor};

// ============================================================================
// Type classifier — descriptor to renderer-facing kind
// ============================================================================

/// Renderer-facing classification of a field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Str,
    Number { float: bool },
    Decimal,
    Boolean,
    Date,
    Time,
    Choice { multiple: bool },
    List,
    Record,
    /// Introspection-suppressed; never rendered
    Hidden,
    Custom(String),
}

/// Result of classifying a descriptor: the kind plus whether one level of
/// optionality was unwrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub kind: FieldKind,
    pub is_optional: bool,
}

/// Classify a type descriptor.
///
/// Unwraps one level of `Optional`; detects `Skip` regardless of nesting
/// under `Optional`. String-form annotations (`Unresolved`) fall back to a
/// string classification rather than erroring.
pub fn classify(descriptor: &TypeDescriptor) -> Classified {
    let (inner, is_optional) = match descriptor {
        TypeDescriptor::Optional { inner } => (inner.as_ref(), true),
        other => (other, false),
    };

    let kind = match inner {
        TypeDescriptor::Skip { .. } => FieldKind::Hidden,
        TypeDescriptor::String => FieldKind::Str,
        TypeDescriptor::Int => FieldKind::Number { float: false },
        TypeDescriptor::Float => FieldKind::Number { float: true },
        TypeDescriptor::Decimal => FieldKind::Decimal,
        TypeDescriptor::Bool => FieldKind::Boolean,
        TypeDescriptor::Date => FieldKind::Date,
        TypeDescriptor::Time => FieldKind::Time,
        TypeDescriptor::Choice { multiple, .. } => FieldKind::Choice {
            multiple: *multiple,
        },
        TypeDescriptor::List { .. } => FieldKind::List,
        TypeDescriptor::Record { .. } => FieldKind::Record,
        TypeDescriptor::Custom { name } => FieldKind::Custom(name.clone()),
        TypeDescriptor::Unresolved { .. } => FieldKind::Str,
        // Nested Optional collapses to the inner kind; only one level of
        // optionality is meaningful on the wire
        TypeDescriptor::Optional { inner } => classify(inner).kind,
    };

    Classified { kind, is_optional }
}

/// Strip `Optional` and `Skip` wrappers down to the structural type.
pub fn underlying(descriptor: &TypeDescriptor) -> &TypeDescriptor {
    match descriptor {
        TypeDescriptor::Optional { inner } => underlying(inner),
        TypeDescriptor::Skip { inner } => underlying(inner),
        other => other,
    }
}

/// True when the descriptor is suppressed from rendering, at any nesting
/// under `Optional`.
pub fn is_hidden(descriptor: &TypeDescriptor) -> bool {
    match descriptor {
        TypeDescriptor::Skip { .. } => true,
        TypeDescriptor::Optional { inner } => is_hidden(inner),
        _ => false,
    }
}

/// A field is required on the wire when it is neither optional nor covered
/// by a declared default.
pub fn is_required(field: &FieldDef) -> bool {
    let classified = classify(&field.descriptor);
    !classified.is_optional && field.default.is_none() && field.default_fn.is_none()
}
