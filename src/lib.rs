//! Schema-driven HTML form rendering, list mutation and submission
//! reconciliation for server-driven UIs.
//!
//! All state lives in the browser DOM and round-trips through flat form
//! submissions; the library compiles a record schema into namespaced form
//! markup, supports add/delete/reorder of list items at any nesting depth,
//! reconciles submissions back into nested value trees, and keeps two forms
//! synchronized as a comparison pair with field-level copy operations.

pub mod cli;
pub mod compare;
pub mod error;
pub mod form;
pub mod render;
pub mod schema;

pub use crate::compare::compare_model::{simple_diff_metrics, ComparisonPair, Side};
pub use crate::compare::copy::{CopyFragment, CopyKind, CopyOutcome, FragmentMode};
pub use crate::error::{error_fragment, FormError};
pub use crate::form::compiler::{compile, RenderedForm};
pub use crate::form::form_model::FormInstance;
pub use crate::form::list_ops::{add_item, delete_item, next_placeholder_token};
pub use crate::form::validate::{ErrorList, FieldError, SchemaValidator, ValidationDelegate};
pub use crate::render::metrics::{DecorationScope, MetricEntry, MetricsMap};
pub use crate::render::registry::{FieldCtx, FieldRenderer, RendererRegistry};
pub use crate::render::style::SpacingTheme;
pub use crate::schema::classifier::{classify, Classified, FieldKind};
pub use crate::schema::defaults::{default_for, defaults_for_record, Clock, FixedClock, SystemClock};
pub use crate::schema::path::{walk_path, FieldPath, ListIndex, PathSeg};
pub use crate::schema::schema_model::{FieldDef, Schema, TypeDescriptor};
pub use crate::schema::value::Value;
