//! Error types for metadata validation and loading.

use thiserror::Error;

/// Code carried by an [`InvalidModelSchema`] when the raising site does not
/// supply one.
pub const DEFAULT_ERROR_CODE: i32 = -1;

/// The metadata document does not satisfy the model schema.
///
/// Only the last line of the message handed to the constructor is kept.
/// Downstream tooling reads a single line, so multi-line messages (for
/// example a context header followed by the underlying violation) surface
/// as the underlying violation alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidModelSchema {
    message: String,
    code: i32,
}

impl InvalidModelSchema {
    /// Create an error with the default code (`-1`).
    pub fn new(message: impl AsRef<str>) -> Self {
        Self::with_code(message, DEFAULT_ERROR_CODE)
    }

    /// Create an error with an explicit code.
    pub fn with_code(message: impl AsRef<str>, code: i32) -> Self {
        let message = message.as_ref();
        let last_line = message.rsplit('\n').next().unwrap_or(message);
        Self {
            message: last_line.to_string(),
            code,
        }
    }

    /// `Missing key: '<key>'`
    pub fn missing_key(key: &str) -> Self {
        Self::new(format!("Missing key: '{}'", key))
    }

    /// `Wrong key '<key>'`
    pub fn wrong_key(key: &str) -> Self {
        Self::new(format!("Wrong key '{}'", key))
    }

    /// The externally visible (single-line) message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

/// Errors that can occur when loading and validating a metadata document.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read metadata file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid model metadata: {0}")]
    InvalidSchema(#[from] InvalidModelSchema),
}
