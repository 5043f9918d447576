use std::fmt;

use crate::render::html::escape_html;

// ============================================================================
// Crate-wide error type
// ============================================================================

/// Errors raised by form construction, list mutation and the copy protocol.
///
/// Configuration errors (`UnresolvableType`, `SchemaMismatch`) are fatal at
/// form-construction time. Everything else is a per-request failure that is
/// converted into a renderable alert fragment via [`error_fragment`].
#[derive(Debug)]
pub enum FormError {
    /// A path segment names a field the schema does not declare
    UnknownField { field: String, context: String },

    /// The final segment of a list path does not resolve to a list field
    NotAList { field: String },

    /// A list path was empty
    EmptyPath,

    /// A list field was followed by something that is not an item index
    ExpectedIndex { field: String, segment: String },

    /// A list item index could not be parsed (neither numeric nor `new_<n>`)
    BadIndex { index: String },

    /// A string-form type annotation could not be resolved to a descriptor
    UnresolvableType { field: String, annotation: String },

    /// Subfield copy addressed a list item the target side does not have
    CopyTargetMissing { path: String },

    /// Copy source path resolved to no value on the source side
    CopySourceMissing { path: String },

    /// The two sides of a comparison disagree structurally
    SchemaMismatch(String),

    /// A data path string could not be parsed (unbalanced brackets etc.)
    MalformedPath { path: String, reason: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField { field, context } => {
                write!(f, "Field '{}' not found in {}", field, context)
            }
            FormError::NotAList { field } => {
                write!(f, "Final field '{}' is not a list type", field)
            }
            FormError::EmptyPath => {
                write!(f, "Empty path provided")
            }
            FormError::ExpectedIndex { field, segment } => {
                write!(
                    f,
                    "Expected index after list field '{}', got '{}'",
                    field, segment
                )
            }
            FormError::BadIndex { index } => {
                write!(f, "Invalid list item index '{}'", index)
            }
            FormError::UnresolvableType { field, annotation } => {
                write!(
                    f,
                    "Cannot resolve type annotation '{}' for field '{}'",
                    annotation, field
                )
            }
            FormError::CopyTargetMissing { path } => {
                write!(f, "No corresponding target item for '{}'", path)
            }
            FormError::CopySourceMissing { path } => {
                write!(f, "No source value at '{}'", path)
            }
            FormError::SchemaMismatch(msg) => {
                write!(f, "Comparison schema mismatch: {}", msg)
            }
            FormError::MalformedPath { path, reason } => {
                write!(f, "Malformed path '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Render an error as an alert fragment.
///
/// Every user-facing failure path returns markup; nothing propagates to the
/// client as an unstructured fault.
pub fn error_fragment(err: &FormError) -> String {
    format!(
        "<div class=\"uk-alert uk-alert-danger\" uk-alert>{}</div>",
        escape_html(&err.to_string())
    )
}
