//! Model metadata validation and normalization.
//!
//! Metadata documents are plain nested values. They are checked against an
//! embedded JSON Schema, then against the rules selected by the target type
//! and the cross-field constraints, and finally returned as a copy with the
//! optional defaults filled in.

mod access;
mod constraints;
mod defaults;
pub mod keys;
mod schema;
mod shape;
mod target;
mod validator;

pub use access::{get_value, get_value_by_path};
pub use constraints::parse_memory;
pub use defaults::{DefaultValue, MODEL_METADATA_DEFAULTS};
pub use schema::SCHEMA_LOAD_ERROR_CODE;
pub use shape::{is_multi_models_schema, is_single_model_schema, SchemaMode};
pub use target::{ConditionalRule, TargetType};
pub use validator::ModelSchema;
