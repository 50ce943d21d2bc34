//! The metadata validation pipeline.

use serde_json::Value;

use super::access;
use super::constraints::check_cross_field_constraints;
use super::defaults::with_defaults;
use super::keys::{MODEL_ENTRY_META_KEY, MODEL_ENTRY_PATH_KEY, MULTI_MODELS_KEY};
use super::schema::{check_model_metadata, check_multi_models};
use super::shape::{self, SchemaMode};
use super::target::check_conditional_keys;
use crate::error::InvalidModelSchema;

/// Validates metadata documents and returns normalized copies.
///
/// Stateless: all rule tables are process-wide constants, so one instance
/// (or many) can be shared freely across threads.
///
/// # Pipeline
/// 1. Key schema: mandatory keys, declared keys only, value types
/// 2. Target type rules: keys required or forbidden by `target_type`
/// 3. Cross-field constraints
/// 4. Default injection into a copy
///
/// The first violation aborts the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSchema;

impl ModelSchema {
    pub fn new() -> Self {
        Self
    }

    /// See [`shape::is_single_model_schema`].
    pub fn is_single_model_schema(document: &Value) -> bool {
        shape::is_single_model_schema(document)
    }

    /// See [`shape::is_multi_models_schema`].
    pub fn is_multi_models_schema(document: &Value) -> bool {
        shape::is_multi_models_schema(document)
    }

    /// See [`access::get_value`].
    pub fn get_value<'a>(document: &'a Value, keys: &[&str]) -> Option<&'a Value> {
        access::get_value(document, keys)
    }

    /// Validate a single-model document and return it with defaults filled.
    pub fn validate_and_transform_single(
        &self,
        document: &Value,
    ) -> Result<Value, InvalidModelSchema> {
        if shape::is_multi_models_schema(document) {
            return Err(InvalidModelSchema::wrong_key(MULTI_MODELS_KEY));
        }
        self.transform_model_metadata(document)
    }

    /// Validate a multi-model document and return it with every model's
    /// metadata normalized. Entry order and paths are preserved.
    pub fn validate_and_transform_multi(
        &self,
        document: &Value,
    ) -> Result<Value, InvalidModelSchema> {
        check_multi_models(document)?;

        let entries = document
            .get(MULTI_MODELS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| InvalidModelSchema::missing_key(MULTI_MODELS_KEY))?;

        let mut transformed = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = entry
                .get(MODEL_ENTRY_PATH_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default();
            let metadata = entry
                .get(MODEL_ENTRY_META_KEY)
                .ok_or_else(|| InvalidModelSchema::missing_key(MODEL_ENTRY_META_KEY))?;

            let normalized = self.transform_model_metadata(metadata).map_err(|e| {
                tracing::debug!(model_path = path, error = %e, "Model entry rejected");
                e
            })?;

            let mut entry = entry.clone();
            entry[MODEL_ENTRY_META_KEY] = normalized;
            transformed.push(entry);
        }

        let mut result = document.clone();
        result[MULTI_MODELS_KEY] = Value::Array(transformed);
        tracing::debug!(models = entries.len(), "Multi-model metadata validated");
        Ok(result)
    }

    /// Validate in whichever form the document has.
    pub fn validate_and_transform(&self, document: &Value) -> Result<Value, InvalidModelSchema> {
        self.validate_and_transform_mode(document, SchemaMode::detect(document))
    }

    /// Validate in an explicitly chosen form.
    pub fn validate_and_transform_mode(
        &self,
        document: &Value,
        mode: SchemaMode,
    ) -> Result<Value, InvalidModelSchema> {
        match mode {
            SchemaMode::Single => self.validate_and_transform_single(document),
            SchemaMode::Multi => self.validate_and_transform_multi(document),
        }
    }

    fn transform_model_metadata(&self, metadata: &Value) -> Result<Value, InvalidModelSchema> {
        let result = check_model_metadata(metadata)
            .and_then(|()| check_conditional_keys(metadata))
            .and_then(|target_type| {
                check_cross_field_constraints(metadata)?;
                Ok(target_type)
            });

        match result {
            Ok(target_type) => {
                tracing::debug!(
                    target_type = %target_type,
                    unstructured = target_type.is_unstructured(),
                    "Model metadata validated"
                );
                Ok(with_defaults(metadata))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Model metadata rejected");
                Err(e)
            }
        }
    }
}
