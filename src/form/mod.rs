pub mod compiler;
pub mod form_model;
pub mod list_ops;
pub mod reconcile;
pub mod validate;
