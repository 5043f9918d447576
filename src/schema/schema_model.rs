use serde::{Deserialize, Serialize};

use crate::schema::value::Value;

// ============================================================================
// Schema model — externally supplied record-type description
// ============================================================================

/// Structural description of a field's type.
///
/// Deserializable from YAML/JSON (internally tagged on `kind`) so schemas can
/// be supplied as data files as well as built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    String,
    Int,
    Float,
    Decimal,
    Bool,
    Date,
    Time,

    /// Enumerated choice; `multiple` selects the pill widget
    Choice {
        #[serde(default)]
        choices: Vec<String>,
        #[serde(default)]
        multiple: bool,
    },

    List {
        item: Box<TypeDescriptor>,
    },

    Record {
        fields: Vec<FieldDef>,
    },

    Optional {
        inner: Box<TypeDescriptor>,
    },

    /// Introspection-suppressed field: never rendered, still reconciled
    Skip {
        inner: Box<TypeDescriptor>,
    },

    /// Exact-name hook for custom renderer registration
    Custom {
        name: String,
    },

    /// String-form annotation that could not be resolved; renders as text
    Unresolved {
        annotation: String,
    },
}

impl TypeDescriptor {
    pub fn optional(inner: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Optional {
            inner: Box::new(inner),
        }
    }

    pub fn list_of(item: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::List {
            item: Box::new(item),
        }
    }

    pub fn record(fields: Vec<FieldDef>) -> TypeDescriptor {
        TypeDescriptor::Record { fields }
    }

    pub fn choice(choices: &[&str]) -> TypeDescriptor {
        TypeDescriptor::Choice {
            choices: choices.iter().map(|s| s.to_string()).collect(),
            multiple: false,
        }
    }
}

/// Default factory: invoked once per synthesis, in-code schemas only.
pub type DefaultFn = fn() -> Value;

/// A single field of a record schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,

    /// Rendered as a label tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Explicit static default, as a JSON value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Default factory; not serializable, in-code construction only
    #[serde(skip)]
    pub default_fn: Option<DefaultFn>,
}

impl FieldDef {
    pub fn new(name: &str, descriptor: TypeDescriptor) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            descriptor,
            description: None,
            default: None,
            default_fn: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> FieldDef {
        self.default = Some(default);
        self
    }

    pub fn with_default_fn(mut self, f: DefaultFn) -> FieldDef {
        self.default_fn = Some(f);
        self
    }

    pub fn with_description(mut self, description: &str) -> FieldDef {
        self.description = Some(description.to_string());
        self
    }

    /// Declared default, if any: explicit value first, factory second.
    pub fn declared_default(&self) -> Option<Value> {
        if let Some(json) = &self.default {
            return Some(Value::from_json(json));
        }
        self.default_fn.map(|f| f())
    }
}

/// A complete record schema. Immutable input; the core never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: &str, fields: Vec<FieldDef>) -> Schema {
        Schema {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
