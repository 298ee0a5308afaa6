use crate::cli::{OutputFormat, RunCommand, ValidateCommand};
use faultline_core::Plan;
use faultline_engine::{
    run_loaded_plan, run_plan, EngineError, LayerRegistry, Report,
};
use faultline_kubernetes::{KubernetesLayer, UnwiredClusterApi};
use faultline_schema::{validate_plan_document, SchemaViolation};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("could not find plan at {0}")]
    PlanNotFound(String),
    #[error("read plan failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("plan yaml parse failed: {0}")]
    YamlParse(String),
    #[error("plan json parse failed: {0}")]
    JsonParse(String),
    #[error("plan schema validation failed:\n{}", render_violations(.0))]
    PlanInvalid(Vec<SchemaViolation>),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

pub fn execute_run(command: &RunCommand) -> Result<String, RunnerError> {
    if command.dry_run {
        info!("dry run requested, all layers will be swapped for the noop layer");
    }
    let registry = build_layer_registry();
    let report = if is_yaml_plan(&command.plan) {
        let plan = load_yaml_plan(&command.plan)?;
        run_loaded_plan(&plan, &registry, command.dry_run)?
    } else {
        run_plan(&command.plan, &registry, command.dry_run)?
    };
    render_report(&report, &command.format)
}

pub fn execute_validate(command: &ValidateCommand) -> Result<String, RunnerError> {
    let document = read_plan_document(&command.plan)?;
    let violations = validate_plan_document(&document);
    if !violations.is_empty() {
        return Err(RunnerError::PlanInvalid(violations));
    }
    match command.format {
        OutputFormat::Text => Ok(format!("plan '{}' is valid", command.plan.display())),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &serde_json::json!({"plan": command.plan.display().to_string(), "valid": true}),
        )?),
    }
}

/// Every runner invocation can address the built-in layers; third-party
/// layers would be registered here as well. The kubernetes layer ships
/// without a wired cluster client, so only dry runs and noop plans
/// produce effects-free successes out of the box.
pub fn build_layer_registry() -> LayerRegistry {
    let mut registry = LayerRegistry::with_builtins();
    registry.register(
        "kubernetes",
        Box::new(|| Ok(Box::new(KubernetesLayer::new(Box::new(UnwiredClusterApi))))),
    );
    registry
}

fn is_yaml_plan(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// YAML plan bodies are converted to the JSON shape the engine loads,
/// then held to the same schema.
fn load_yaml_plan(path: &Path) -> Result<Plan, RunnerError> {
    let document = read_plan_document(path)?;
    let violations = validate_plan_document(&document);
    if !violations.is_empty() {
        return Err(RunnerError::PlanInvalid(violations));
    }
    Plan::from_value(document).map_err(|err| RunnerError::JsonParse(err.to_string()))
}

fn read_plan_document(path: &Path) -> Result<Value, RunnerError> {
    if !path.exists() {
        return Err(RunnerError::PlanNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    if is_yaml_plan(path) {
        serde_yaml::from_str(&text).map_err(|err| RunnerError::YamlParse(err.to_string()))
    } else {
        serde_json::from_str(&text).map_err(|err| RunnerError::JsonParse(err.to_string()))
    }
}

fn render_report(report: &Report, format: &OutputFormat) -> Result<String, RunnerError> {
    match format {
        OutputFormat::Text => Ok(format!("plan '{}' completed", report.title)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
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
            format!("  {path}: {}", violation.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
