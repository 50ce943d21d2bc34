//! Key names of the metadata document.
//!
//! These are wire names: they appear verbatim in user-authored YAML and in
//! error messages, so they must never be renamed.

// Multi-model form
pub const MULTI_MODELS_KEY: &str = "datarobot_models";
pub const MODEL_ENTRY_PATH_KEY: &str = "model_path";
pub const MODEL_ENTRY_META_KEY: &str = "model_metadata";

// Top level of a single model
pub const MODEL_ID_KEY: &str = "git_datarobot_model_id";
pub const TARGET_TYPE_KEY: &str = "target_type";
pub const TARGET_NAME_KEY: &str = "target_name";
pub const PREDICTION_THRESHOLD_KEY: &str = "prediction_threshold";
pub const POSITIVE_CLASS_LABEL_KEY: &str = "positive_class_label";
pub const NEGATIVE_CLASS_LABEL_KEY: &str = "negative_class_label";
pub const CLASS_LABELS_KEY: &str = "class_labels";
pub const LANGUAGE_KEY: &str = "language";

// settings
pub const SETTINGS_KEY: &str = "settings";
pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";
pub const TRAINING_DATASET_KEY: &str = "training_dataset";
pub const HOLDOUT_DATASET_KEY: &str = "holdout_dataset";

// version
pub const VERSION_KEY: &str = "version";
pub const MODEL_ENV_KEY: &str = "model_environment";
pub const INCLUDE_GLOB_KEY: &str = "include_glob_pattern";
pub const EXCLUDE_GLOB_KEY: &str = "exclude_glob_pattern";
pub const MEMORY_KEY: &str = "memory";
pub const REPLICAS_KEY: &str = "replicas";

// test
pub const TEST_KEY: &str = "test";
pub const TEST_SKIP_KEY: &str = "skip";
pub const TEST_DATA_KEY: &str = "test_data";
pub const CHECKS_KEY: &str = "checks";

// test.checks
pub const NULL_VALUE_IMPUTATION_KEY: &str = "null_value_imputation";
pub const SIDE_EFFECTS_KEY: &str = "side_effects";
pub const PREDICTION_VERIFICATION_KEY: &str = "prediction_verification";
pub const PERFORMANCE_KEY: &str = "performance";
pub const STABILITY_KEY: &str = "stability";

// Shared by every check
pub const CHECK_ENABLED_KEY: &str = "enabled";
pub const BLOCK_DEPLOYMENT_IF_FAILS_KEY: &str = "block_deployment_if_fails";

// prediction_verification
pub const OUTPUT_DATASET_KEY: &str = "output_dataset";
pub const PREDICTIONS_COLUMN_KEY: &str = "predictions_column";
pub const MATCH_THRESHOLD_KEY: &str = "match_threshold";
pub const PASSING_MATCH_RATE_KEY: &str = "passing_match_rate";

// performance
pub const MAXIMUM_RESPONSE_TIME_KEY: &str = "maximum_response_time";
pub const MAXIMUM_EXECUTION_TIME_KEY: &str = "max_execution_time";
pub const NUMBER_OF_PARALLEL_USERS_KEY: &str = "number_of_parallel_users";

// stability
pub const TOTAL_PREDICTION_REQUESTS_KEY: &str = "total_prediction_requests";
pub const PASSING_RATE_KEY: &str = "passing_rate";
pub const MINIMUM_PAYLOAD_SIZE_KEY: &str = "minimum_payload_size";
pub const MAXIMUM_PAYLOAD_SIZE_KEY: &str = "maximum_payload_size";
