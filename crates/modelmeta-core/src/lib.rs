//! # modelmeta-core
//!
//! Validation and normalization of model deployment metadata.
//!
//! A metadata document describes how a machine-learning model is deployed:
//! its target type, the environment it runs in, which files belong to it and
//! which checks to run before deployment. This crate rejects malformed
//! documents early and, on success, returns a normalized copy with every
//! optional default filled in.
//!
//! ## Key Guarantees
//!
//! 1. **Pure**: no I/O, no global mutable state, the input is never mutated
//! 2. **Deterministic**: same document, same result or same error
//! 3. **Single-line errors**: every failure surfaces one line of text and a
//!    numeric code (`-1` unless stated otherwise)
//! 4. **Thread-safe**: rule tables and compiled schemas are immutable statics
//!
//! ## Example
//!
//! ```rust,ignore
//! use modelmeta_core::{document, ModelSchema};
//!
//! let metadata = document::from_file("model-metadata.yaml")?;
//! let normalized = ModelSchema::new().validate_and_transform_single(&metadata)?;
//!
//! // Defaults are always present after validation
//! assert!(normalized["version"]["include_glob_pattern"].is_array());
//! ```

pub mod document;
pub mod error;
pub mod metadata;

// Re-export main types at crate root
pub use error::{InvalidModelSchema, MetadataError, DEFAULT_ERROR_CODE};
pub use metadata::{
    get_value, get_value_by_path, is_multi_models_schema, is_single_model_schema, keys,
    parse_memory, ConditionalRule, ModelSchema, SchemaMode, TargetType,
};

use serde_json::Value;

/// Validate a single-model document.
///
/// Shorthand for [`ModelSchema::validate_and_transform_single`].
pub fn validate_single(document: &Value) -> Result<Value, InvalidModelSchema> {
    ModelSchema::new().validate_and_transform_single(document)
}

/// Validate a multi-model document.
///
/// Shorthand for [`ModelSchema::validate_and_transform_multi`].
pub fn validate_multi(document: &Value) -> Result<Value, InvalidModelSchema> {
    ModelSchema::new().validate_and_transform_multi(document)
}
