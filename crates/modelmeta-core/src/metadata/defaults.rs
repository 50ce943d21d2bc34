//! Default values for optional keys.

use serde_json::Value;

use super::keys::{EXCLUDE_GLOB_KEY, INCLUDE_GLOB_KEY, TEST_KEY, TEST_SKIP_KEY, VERSION_KEY};

/// An optional key that receives a value when absent.
#[derive(Debug, Clone, Copy)]
pub struct DefaultValue {
    /// Keys leading to the object that owns `key`.
    pub parent: &'static [&'static str],
    pub key: &'static str,
    make: fn() -> Value,
}

impl DefaultValue {
    pub fn value(&self) -> Value {
        (self.make)()
    }
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

fn disabled() -> Value {
    Value::Bool(false)
}

/// Defaults of a single-model object. Only keys inside objects that exist
/// are filled; absent sub-documents are left absent.
pub const MODEL_METADATA_DEFAULTS: &[DefaultValue] = &[
    DefaultValue {
        parent: &[VERSION_KEY],
        key: INCLUDE_GLOB_KEY,
        make: empty_list,
    },
    DefaultValue {
        parent: &[VERSION_KEY],
        key: EXCLUDE_GLOB_KEY,
        make: empty_list,
    },
    DefaultValue {
        parent: &[TEST_KEY],
        key: TEST_SKIP_KEY,
        make: disabled,
    },
];

fn get_object_mut<'a>(
    document: &'a mut Value,
    keys: &[&str],
) -> Option<&'a mut serde_json::Map<String, Value>> {
    keys.iter()
        .try_fold(document, |node, key| node.as_object_mut()?.get_mut(*key))?
        .as_object_mut()
}

/// Return a copy of `metadata` with every absent default filled in.
pub fn with_defaults(metadata: &Value) -> Value {
    let mut normalized = metadata.clone();
    for default in MODEL_METADATA_DEFAULTS {
        if let Some(parent) = get_object_mut(&mut normalized, default.parent) {
            if !parent.contains_key(default.key) {
                tracing::trace!(key = default.key, "Filling default value");
                parent.insert(default.key.to_string(), default.value());
            }
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_glob_lists_default_to_empty() {
        let doc = json!({ "version": { "model_environment": "627785ea562155d227c6a56c" } });
        let normalized = with_defaults(&doc);
        assert_eq!(normalized["version"]["include_glob_pattern"], json!([]));
        assert_eq!(normalized["version"]["exclude_glob_pattern"], json!([]));
    }

    #[test]
    fn test_present_values_are_kept() {
        let doc = json!({ "version": { "include_glob_pattern": ["./**/*.py"] } });
        let normalized = with_defaults(&doc);
        assert_eq!(normalized["version"]["include_glob_pattern"], json!(["./**/*.py"]));
        assert_eq!(normalized["version"]["exclude_glob_pattern"], json!([]));
    }

    #[test]
    fn test_absent_sub_documents_stay_absent() {
        let doc = json!({ "version": {} });
        let normalized = with_defaults(&doc);
        assert!(normalized.get("test").is_none());

        let doc = json!({ "version": {}, "test": { "test_data": "62779bef562155562769f932" } });
        let normalized = with_defaults(&doc);
        assert_eq!(normalized["test"]["skip"], json!(false));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let doc = json!({ "version": {} });
        let before = doc.clone();
        let _ = with_defaults(&doc);
        assert_eq!(doc, before);
    }
}
