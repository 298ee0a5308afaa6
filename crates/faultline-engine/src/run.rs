use crate::actions::ActionRegistry;
use crate::executor::{execute_plan, ExecuteError};
use crate::loader::{load_plan, LoadPlanError};
use crate::probes::ProbeRegistry;
use crate::registry::{resolve_layers, LayerRegistry, LayerResolveError};
use crate::report::Report;
use faultline_core::Plan;
use log::info;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadPlanError),
    #[error(transparent)]
    Layer(#[from] LayerResolveError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Loads and executes the plan at `plan_path`, returning the run's
/// report. With `dry_run` every layer reference is rewritten to the
/// no-op layer first, so the same control flow runs without side
/// effects. The report observes the terminating error before it
/// propagates.
pub fn run_plan(
    plan_path: &Path,
    registry: &LayerRegistry,
    dry_run: bool,
) -> Result<Report, EngineError> {
    let mut report = Report::new();
    let result = run_plan_observed(plan_path, registry, dry_run, &mut report);
    report.observe(&result);
    result.map(|()| report)
}

fn run_plan_observed(
    plan_path: &Path,
    registry: &LayerRegistry,
    dry_run: bool,
    report: &mut Report,
) -> Result<(), EngineError> {
    info!("executing plan '{}'", plan_path.display());
    let mut plan = load_plan(plan_path)?;
    if dry_run {
        plan = plan.with_noop_layers();
    }
    report.with_plan(&plan);

    let layers = resolve_layers(&plan, registry)?;
    execute_plan(
        &plan,
        &layers,
        &ProbeRegistry::with_builtins(),
        &ActionRegistry::with_builtins(),
    )?;
    Ok(())
}

/// Same as `run_plan` for a plan already in memory.
pub fn run_loaded_plan(
    plan: &Plan,
    registry: &LayerRegistry,
    dry_run: bool,
) -> Result<Report, EngineError> {
    let mut report = Report::new();
    let plan = if dry_run {
        plan.with_noop_layers()
    } else {
        plan.clone()
    };
    report.with_plan(&plan);

    let result = resolve_layers(&plan, registry)
        .map_err(EngineError::from)
        .and_then(|layers| {
            execute_plan(
                &plan,
                &layers,
                &ProbeRegistry::with_builtins(),
                &ActionRegistry::with_builtins(),
            )
            .map_err(EngineError::from)
        });
    report.observe(&result);
    result.map(|()| report)
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
