use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embedded::plan_schema_json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON pointer to the offending field, empty for the document root.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn sort_stable(violations: &mut [Self]) {
        violations.sort_by(|left, right| {
            (&left.path, &left.message).cmp(&(&right.path, &right.message))
        });
    }
}

/// Checks a plan document against the embedded v1 schema. An empty vec
/// means the document is structurally valid. Validation is pure: the same
/// document always yields the same violations.
pub fn validate_plan_document(document: &Value) -> Vec<SchemaViolation> {
    let schema_json: Value = match serde_json::from_str(plan_schema_json()) {
        Ok(value) => value,
        Err(err) => {
            return vec![SchemaViolation {
                path: String::new(),
                message: format!("embedded plan schema parse failed: {err}"),
            }];
        }
    };

    let compiled = match JSONSchema::options().compile(&schema_json) {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![SchemaViolation {
                path: String::new(),
                message: format!("embedded plan schema compile failed: {err}"),
            }];
        }
    };

    let mut violations = Vec::new();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            violations.push(SchemaViolation {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            });
        }
    }
    SchemaViolation::sort_stable(&mut violations);
    violations
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
