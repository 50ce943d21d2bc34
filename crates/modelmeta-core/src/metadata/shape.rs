//! Single-model vs multi-model classification.

use serde_json::Value;

use super::keys::MULTI_MODELS_KEY;

/// The two top-level forms a metadata document can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    Single,
    Multi,
}

impl SchemaMode {
    /// Classify a document by the presence of the multi-model key.
    ///
    /// Only used where the caller asks for auto-detection; the validation
    /// entry points never guess.
    pub fn detect(document: &Value) -> Self {
        if is_multi_models_schema(document) {
            SchemaMode::Multi
        } else {
            SchemaMode::Single
        }
    }
}

/// True when the document is an object holding the multi-model key.
pub fn is_multi_models_schema(document: &Value) -> bool {
    document
        .as_object()
        .is_some_and(|map| map.contains_key(MULTI_MODELS_KEY))
}

/// True when the document is an object without the multi-model key.
pub fn is_single_model_schema(document: &Value) -> bool {
    document.is_object() && !is_multi_models_schema(document)
}
