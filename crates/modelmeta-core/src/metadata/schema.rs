//! Declared key schema of a metadata document.
//!
//! Presence, types and the "no undeclared keys" rule of every object level
//! are expressed as JSON Schema in `schema/*.schema.json`. The schemas are
//! embedded at compile time and compiled once per process.
//!
//! Violations reported by `jsonschema` are mapped onto the metadata error
//! templates (`Missing key: '<key>'`, `Wrong key '<key>'`). When a document
//! has several violations the reported one is picked deterministically:
//! missing keys first, then undeclared keys, then anything else, preferring
//! the shallowest location within each class.

use std::sync::OnceLock;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::Value;

use crate::error::InvalidModelSchema;

/// Code attached to errors caused by the embedded schemas themselves.
pub const SCHEMA_LOAD_ERROR_CODE: i32 = -2;

const MODEL_METADATA_SCHEMA_JSON: &str = include_str!("../../schema/model_metadata.schema.json");
const MULTI_MODELS_SCHEMA_JSON: &str = include_str!("../../schema/multi_models.schema.json");

static MODEL_METADATA_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();
static MULTI_MODELS_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

fn compile(name: &str, source: &str) -> Result<Validator, String> {
    let schema_value: Value = match serde_json::from_str(source) {
        Ok(v) => v,
        Err(e) => return Err(format!("Invalid {} schema JSON: {}", name, e)),
    };

    match jsonschema::options().build(&schema_value) {
        Ok(v) => Ok(v),
        Err(e) => Err(format!("Failed to compile {} schema: {}", name, e)),
    }
}

fn get_validator(
    cell: &'static OnceLock<Result<Validator, String>>,
    name: &str,
    source: &str,
) -> Result<&'static Validator, InvalidModelSchema> {
    match cell.get_or_init(|| compile(name, source)) {
        Ok(v) => Ok(v),
        Err(e) => Err(InvalidModelSchema::with_code(e, SCHEMA_LOAD_ERROR_CODE)),
    }
}

/// Violation classes, in reporting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ViolationClass {
    MissingKey,
    WrongKey,
    Other,
}

#[derive(Debug)]
struct Violation {
    class: ViolationClass,
    depth: usize,
    error: InvalidModelSchema,
}

impl Violation {
    fn from_validation_error(e: &ValidationError<'_>) -> Self {
        let path = e.instance_path.to_string();
        let depth = path.matches('/').count();

        let (class, error) = match &e.kind {
            ValidationErrorKind::Required { property, .. } => {
                let key = property
                    .as_str()
                    .map(str::to_owned)
                    .unwrap_or_else(|| property.to_string());
                (ViolationClass::MissingKey, InvalidModelSchema::missing_key(&key))
            }
            ValidationErrorKind::AdditionalProperties { unexpected, .. } => {
                let key = unexpected.first().map(String::as_str).unwrap_or_default();
                (ViolationClass::WrongKey, InvalidModelSchema::wrong_key(key))
            }
            _ => {
                let location = if path.is_empty() { "(root)" } else { path.as_str() };
                (
                    ViolationClass::Other,
                    InvalidModelSchema::new(format!("{} at {}", e, location)),
                )
            }
        };

        Self {
            class,
            depth,
            error,
        }
    }
}

fn check_against(validator: &Validator, document: &Value) -> Result<(), InvalidModelSchema> {
    let violations: Vec<Violation> = validator
        .iter_errors(document)
        .map(|e| Violation::from_validation_error(&e))
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    tracing::debug!(count = violations.len(), "Key schema violations found");

    // min_by_key keeps the first of equally ranked violations
    match violations
        .into_iter()
        .min_by_key(|v| (v.class, v.depth))
    {
        Some(v) => Err(v.error),
        None => Ok(()),
    }
}

/// Check a single-model document against the declared key schema.
pub fn check_model_metadata(document: &Value) -> Result<(), InvalidModelSchema> {
    let validator = get_validator(
        &MODEL_METADATA_SCHEMA,
        "model metadata",
        MODEL_METADATA_SCHEMA_JSON,
    )?;
    check_against(validator, document)
}

/// Check the outer shape of a multi-model document.
///
/// The per-model metadata objects are only required to be objects here;
/// their content goes through [`check_model_metadata`] separately.
pub fn check_multi_models(document: &Value) -> Result<(), InvalidModelSchema> {
    let validator = get_validator(&MULTI_MODELS_SCHEMA, "multi models", MULTI_MODELS_SCHEMA_JSON)?;
    check_against(validator, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn regression_metadata() -> Value {
        json!({
            "git_datarobot_model_id": "abc123",
            "target_type": "Regression",
            "target_name": "target_column",
            "settings": { "name": "My Awesome Model" },
            "version": { "model_environment": "627785ea562155d227c6a56c" }
        })
    }

    #[test]
    fn test_embedded_schemas_compile() {
        assert!(compile("model metadata", MODEL_METADATA_SCHEMA_JSON).is_ok());
        assert!(compile("multi models", MULTI_MODELS_SCHEMA_JSON).is_ok());
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(check_model_metadata(&regression_metadata()).is_ok());
    }

    #[test]
    fn test_missing_top_level_key() {
        let mut doc = regression_metadata();
        doc.as_object_mut().unwrap().remove("target_name");
        let err = check_model_metadata(&doc).unwrap_err();
        assert_eq!(err.message(), "Missing key: 'target_name'");
    }

    #[test]
    fn test_missing_nested_key_names_sub_key() {
        let mut doc = regression_metadata();
        doc["version"].as_object_mut().unwrap().remove("model_environment");
        let err = check_model_metadata(&doc).unwrap_err();
        assert_eq!(err.message(), "Missing key: 'model_environment'");
    }

    #[test]
    fn test_undeclared_nested_key() {
        let mut doc = regression_metadata();
        doc["settings"]["color"] = json!("blue");
        let err = check_model_metadata(&doc).unwrap_err();
        assert_eq!(err.message(), "Wrong key 'color'");
    }

    #[test]
    fn test_missing_key_reported_before_wrong_key() {
        let mut doc = regression_metadata();
        doc.as_object_mut().unwrap().remove("settings");
        doc["unknown"] = json!(1);
        let err = check_model_metadata(&doc).unwrap_err();
        assert_eq!(err.message(), "Missing key: 'settings'");
    }

    #[test]
    fn test_type_mismatch_names_location() {
        let mut doc = regression_metadata();
        doc["version"]["include_glob_pattern"] = json!("*.py");
        let err = check_model_metadata(&doc).unwrap_err();
        assert!(err.message().ends_with("at /version/include_glob_pattern"));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_object_id_pattern() {
        let mut doc = regression_metadata();
        doc["version"]["model_environment"] = json!("not-an-object-id");
        assert!(check_model_metadata(&doc).is_err());
    }

    #[test]
    fn test_multi_models_outer_shape() {
        let doc = json!({
            "datarobot_models": [
                { "model_path": "./m1", "model_metadata": regression_metadata() }
            ]
        });
        assert!(check_multi_models(&doc).is_ok());

        let err = check_multi_models(&json!({})).unwrap_err();
        assert_eq!(err.message(), "Missing key: 'datarobot_models'");

        let err = check_multi_models(&json!({
            "datarobot_models": [ { "model_path": "./m1" } ]
        }))
        .unwrap_err();
        assert_eq!(err.message(), "Missing key: 'model_metadata'");
    }

    #[test]
    fn test_multi_models_empty_list_accepted() {
        assert!(check_multi_models(&json!({ "datarobot_models": [] })).is_ok());
    }
}
