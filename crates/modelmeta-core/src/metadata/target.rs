//! Target types and the keys they require or forbid.
//!
//! Every target type maps to one [`ConditionalRule`], layered on top of the
//! declared key schema. A key required by one family of target types is
//! forbidden for all others.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::keys::{
    CLASS_LABELS_KEY, NEGATIVE_CLASS_LABEL_KEY, POSITIVE_CLASS_LABEL_KEY,
    PREDICTION_THRESHOLD_KEY, TARGET_TYPE_KEY,
};
use crate::error::InvalidModelSchema;

/// The kind of prediction a model produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    #[serde(rename = "Regression")]
    Regression,
    #[serde(rename = "Binary")]
    Binary,
    #[serde(rename = "Multiclass")]
    Multiclass,
    #[serde(rename = "Anomaly Detection")]
    AnomalyDetection,
    #[serde(rename = "Unstructured (Regression)")]
    UnstructuredRegression,
    #[serde(rename = "Unstructured (Binary)")]
    UnstructuredBinary,
    #[serde(rename = "Unstructured (Multiclass)")]
    UnstructuredMulticlass,
    #[serde(rename = "Unstructured (Other)")]
    UnstructuredOther,
}

/// Extra key requirements selected by a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalRule {
    /// Keys that must be present.
    pub required: &'static [&'static str],
    /// Keys that must be absent.
    pub forbidden: &'static [&'static str],
    /// Required list keys that must also hold at least one element.
    pub non_empty: &'static [&'static str],
}

const REGRESSION_RULE: ConditionalRule = ConditionalRule {
    required: &[],
    forbidden: &[POSITIVE_CLASS_LABEL_KEY, NEGATIVE_CLASS_LABEL_KEY, CLASS_LABELS_KEY],
    non_empty: &[],
};

const BINARY_RULE: ConditionalRule = ConditionalRule {
    required: &[POSITIVE_CLASS_LABEL_KEY, NEGATIVE_CLASS_LABEL_KEY],
    forbidden: &[PREDICTION_THRESHOLD_KEY, CLASS_LABELS_KEY],
    non_empty: &[],
};

const MULTICLASS_RULE: ConditionalRule = ConditionalRule {
    required: &[CLASS_LABELS_KEY],
    forbidden: &[PREDICTION_THRESHOLD_KEY, POSITIVE_CLASS_LABEL_KEY, NEGATIVE_CLASS_LABEL_KEY],
    non_empty: &[CLASS_LABELS_KEY],
};

const UNLABELED_RULE: ConditionalRule = ConditionalRule {
    required: &[],
    forbidden: &[
        PREDICTION_THRESHOLD_KEY,
        POSITIVE_CLASS_LABEL_KEY,
        NEGATIVE_CLASS_LABEL_KEY,
        CLASS_LABELS_KEY,
    ],
    non_empty: &[],
};

impl TargetType {
    pub fn is_unstructured(&self) -> bool {
        matches!(
            self,
            TargetType::UnstructuredRegression
                | TargetType::UnstructuredBinary
                | TargetType::UnstructuredMulticlass
                | TargetType::UnstructuredOther
        )
    }

    /// The key requirements this target type adds to the base schema.
    pub fn rule(&self) -> &'static ConditionalRule {
        match self {
            TargetType::Regression | TargetType::UnstructuredRegression => &REGRESSION_RULE,
            TargetType::Binary | TargetType::UnstructuredBinary => &BINARY_RULE,
            TargetType::Multiclass | TargetType::UnstructuredMulticlass => &MULTICLASS_RULE,
            TargetType::AnomalyDetection | TargetType::UnstructuredOther => &UNLABELED_RULE,
        }
    }
}

/// Writes the wire name declared by the serde renames.
impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(Value::String(name)) => f.write_str(&name),
            _ => Err(fmt::Error),
        }
    }
}

impl FromStr for TargetType {
    type Err = InvalidModelSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::String(s.to_owned()))
            .map_err(|_| InvalidModelSchema::new(format!("Unsupported target type '{}'", s)))
    }
}

impl ConditionalRule {
    /// Check the keys of a single-model object against this rule.
    pub fn check(&self, metadata: &Value) -> Result<(), InvalidModelSchema> {
        for key in self.required {
            if metadata.get(key).is_none() {
                return Err(InvalidModelSchema::missing_key(key));
            }
        }

        for key in self.forbidden {
            if metadata.get(key).is_some() {
                return Err(InvalidModelSchema::wrong_key(key));
            }
        }

        for key in self.non_empty {
            let empty = match metadata.get(key) {
                Some(Value::Array(items)) => items.is_empty(),
                _ => false,
            };
            if empty {
                return Err(InvalidModelSchema::new(format!(
                    "Key '{}' must hold at least one label",
                    key
                )));
            }
        }

        Ok(())
    }
}

/// Resolve the target type of a single-model object and apply its rule.
pub fn check_conditional_keys(metadata: &Value) -> Result<TargetType, InvalidModelSchema> {
    let raw = match metadata.get(TARGET_TYPE_KEY) {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(InvalidModelSchema::new(format!(
                "Unsupported target type '{}'",
                other
            )))
        }
        None => return Err(InvalidModelSchema::missing_key(TARGET_TYPE_KEY)),
    };

    let target_type: TargetType = raw.parse()?;
    target_type.rule().check(metadata)?;
    Ok(target_type)
}
