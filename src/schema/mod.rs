pub mod classifier;
pub mod defaults;
pub mod path;
pub mod schema_model;
pub mod value;
