use faultline_core::{Plan, PlanParseError};
use faultline_schema::{validate_plan_document, SchemaViolation};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadPlanError {
    #[error("could not find plan at {0}")]
    NotFound(String),
    #[error("read plan failed `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("plan json parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("plan schema validation failed: {}", render_violations(.0))]
    Schema(Vec<SchemaViolation>),
}

/// Reads a v1-dialect plan from disk and validates it against the
/// embedded schema. Parse failures and schema violations surface as
/// distinct errors.
pub fn load_plan(path: &Path) -> Result<Plan, LoadPlanError> {
    info!("loading plan '{}'", path.display());

    if !path.exists() {
        return Err(LoadPlanError::NotFound(path.display().to_string()));
    }

    let text = fs::read_to_string(path).map_err(|source| LoadPlanError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text)?;

    let violations = validate_plan_document(&document);
    if !violations.is_empty() {
        return Err(LoadPlanError::Schema(violations));
    }

    Plan::from_value(document).map_err(|err| match err {
        PlanParseError::Json(source) => LoadPlanError::Parse(source),
    })
}

fn render_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|violation| {
            let path = if violation.path.is_empty() {
                "/"
            } else {
                violation.path.as_str()
            };
            format!("{path}: {}", violation.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
