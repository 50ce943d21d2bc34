//! Constraints that span more than one field.
//!
//! These run after the key schema and the target type rules accepted the
//! document, so every value read here already has its declared type.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::access::get_value;
use super::keys::{
    CHECKS_KEY, MAXIMUM_PAYLOAD_SIZE_KEY, MEMORY_KEY, MINIMUM_PAYLOAD_SIZE_KEY, STABILITY_KEY,
    TEST_KEY, VERSION_KEY,
};
use crate::error::InvalidModelSchema;

lazy_static! {
    /// Kubernetes-style resource quantity, e.g. `512Mi`, `1G`, `1000000`.
    static ref MEMORY_PATTERN: Regex = Regex::new(
        r"^(?P<amount>[0-9]+)(?P<unit>m|k|M|G|T|P|E|Ki|Mi|Gi|Ti|Pi|Ei)?$"
    ).unwrap();
}

/// Convert a memory quantity (`"256Mi"`, `"1G"`, ...) to bytes.
///
/// Returns `None` for malformed quantities or values that overflow `u64`.
/// The milli suffix (`m`) rounds up to whole bytes.
pub fn parse_memory(value: &str) -> Option<u64> {
    let captures = MEMORY_PATTERN.captures(value)?;
    let amount: u64 = captures.name("amount")?.as_str().parse().ok()?;

    let multiplier: u64 = match captures.name("unit").map(|m| m.as_str()) {
        None => 1,
        Some("m") => return Some(amount.div_ceil(1000)),
        Some("k") => 1_000,
        Some("M") => 1_000_000,
        Some("G") => 1_000_000_000,
        Some("T") => 1_000_000_000_000,
        Some("P") => 1_000_000_000_000_000,
        Some("E") => 1_000_000_000_000_000_000,
        Some("Ki") => 1 << 10,
        Some("Mi") => 1 << 20,
        Some("Gi") => 1 << 30,
        Some("Ti") => 1 << 40,
        Some("Pi") => 1 << 50,
        Some("Ei") => 1 << 60,
        Some(_) => return None,
    };

    amount.checked_mul(multiplier)
}

/// Minimum payload size of the stability check must not exceed the maximum.
pub fn check_stability_payload_bounds(metadata: &Value) -> Result<(), InvalidModelSchema> {
    let Some(stability) = get_value(metadata, &[TEST_KEY, CHECKS_KEY, STABILITY_KEY]) else {
        return Ok(());
    };

    // Whole-number floats such as `100.0` pass the integer type check,
    // so the bounds are compared as numbers of any representation.
    let (Some(Value::Number(min)), Some(Value::Number(max))) = (
        stability.get(MINIMUM_PAYLOAD_SIZE_KEY),
        stability.get(MAXIMUM_PAYLOAD_SIZE_KEY),
    ) else {
        return Ok(());
    };

    let exceeds = match (min.as_u64(), max.as_u64()) {
        (Some(min), Some(max)) => min > max,
        _ => match (min.as_f64(), max.as_f64()) {
            (Some(min), Some(max)) => min > max,
            _ => false,
        },
    };

    if exceeds {
        return Err(InvalidModelSchema::new(format!(
            "Stability test check minimum payload size ({}) is higher than the maximum ({})",
            min, max
        )));
    }

    Ok(())
}

/// Memory quantities in `version` and `test` must parse.
pub fn check_memory_values(metadata: &Value) -> Result<(), InvalidModelSchema> {
    for section in [VERSION_KEY, TEST_KEY] {
        if let Some(Value::String(memory)) = get_value(metadata, &[section, MEMORY_KEY]) {
            if parse_memory(memory).is_none() {
                return Err(InvalidModelSchema::new(format!(
                    "Invalid memory value '{}' for key '{}.{}'",
                    memory, section, MEMORY_KEY
                )));
            }
        }
    }
    Ok(())
}

/// Run every cross-field constraint on a single-model object.
pub fn check_cross_field_constraints(metadata: &Value) -> Result<(), InvalidModelSchema> {
    check_memory_values(metadata)?;
    check_stability_payload_bounds(metadata)?;
    Ok(())
}
