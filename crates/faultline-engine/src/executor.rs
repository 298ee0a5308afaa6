use crate::actions::{ActionError, ActionRegistry};
use crate::layer::Layer;
use crate::probes::{ProbeError, ProbeRegistry};
use crate::registry::ResolvedLayers;
use faultline_core::{Action, Plan, Step};
use log::info;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("invalid plan: {0}")]
    InvalidPlan(String),
    #[error("no layer named '{0}' was loaded for this plan")]
    UnknownTargetLayer(String),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeSlot {
    Steady,
    Close,
}

impl ProbeSlot {
    fn label(self) -> &'static str {
        match self {
            ProbeSlot::Steady => "steady probe",
            ProbeSlot::Close => "close probe",
        }
    }
}

/// Applies the plan's steps in order. Per step the ordering is: the
/// steady probe, then the action (with its optional pauses), then the
/// close probe, each only when defined. The first error aborts the whole
/// run; steps already executed are not undone.
pub fn execute_plan(
    plan: &Plan,
    layers: &ResolvedLayers,
    probes: &ProbeRegistry,
    actions: &ActionRegistry,
) -> Result<(), ExecuteError> {
    info!("running plan: '{}'", plan.title);

    let method = plan
        .method
        .as_ref()
        .ok_or_else(|| ExecuteError::InvalidPlan("a plan must have a method defined".to_string()))?;

    for step in method {
        info!(
            "moving on to step '{}'",
            step.title.as_deref().unwrap_or("N/A")
        );
        apply_steady_probe(step, layers, probes)?;
        apply_action(step, layers, actions)?;
        apply_close_probe(step, layers, probes)?;
    }

    info!("done with plan: '{}'", plan.title);
    Ok(())
}

pub fn apply_steady_probe(
    step: &Step,
    layers: &ResolvedLayers,
    probes: &ProbeRegistry,
) -> Result<(), ExecuteError> {
    apply_step_probe(ProbeSlot::Steady, step, layers, probes)
}

pub fn apply_close_probe(
    step: &Step,
    layers: &ResolvedLayers,
    probes: &ProbeRegistry,
) -> Result<(), ExecuteError> {
    apply_step_probe(ProbeSlot::Close, step, layers, probes)
}

fn apply_step_probe(
    slot: ProbeSlot,
    step: &Step,
    layers: &ResolvedLayers,
    probes: &ProbeRegistry,
) -> Result<(), ExecuteError> {
    let probe = match &step.probes {
        Some(step_probes) => match slot {
            ProbeSlot::Steady => step_probes.steady.as_ref(),
            ProbeSlot::Close => step_probes.close.as_ref(),
        },
        None => None,
    };
    let Some(probe) = probe else {
        return Ok(());
    };

    let name = probe.name.as_deref().ok_or_else(|| {
        ExecuteError::InvalidPlan(format!("{} requires a probe name to apply", slot.label()))
    })?;
    let layer = select_layer(layers, probe.layer.as_deref(), slot.label())?;

    info!(" applying {} '{name}'", slot.label());
    probes.apply(name, probe, layer)?;
    Ok(())
}

pub fn apply_action(
    step: &Step,
    layers: &ResolvedLayers,
    actions: &ActionRegistry,
) -> Result<(), ExecuteError> {
    let Some(action) = &step.action else {
        return Ok(());
    };

    let name = action
        .name
        .as_deref()
        .ok_or_else(|| ExecuteError::InvalidPlan("action requires a name".to_string()))?;
    let layer = select_layer(layers, action.layer.as_deref(), "action")?;

    pause(action, PauseMoment::Before);
    info!(" executing action '{name}'");
    actions.execute(name, action, layer)?;
    pause(action, PauseMoment::After);
    Ok(())
}

fn select_layer<'a>(
    layers: &'a ResolvedLayers,
    layer_ref: Option<&str>,
    what: &str,
) -> Result<&'a dyn Layer, ExecuteError> {
    match layers {
        ResolvedLayers::Single(layer) => Ok(layer.as_ref()),
        ResolvedLayers::Named(named) => {
            let key = layer_ref.ok_or_else(|| {
                ExecuteError::InvalidPlan(format!("{what} requires the target layer to be set"))
            })?;
            named
                .get(key)
                .map(|layer| layer.as_ref())
                .ok_or_else(|| ExecuteError::UnknownTargetLayer(key.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PauseMoment {
    Before,
    After,
}

fn pause(action: &Action, moment: PauseMoment) {
    let Some(pauses) = &action.pauses else {
        return;
    };
    let seconds = match moment {
        PauseMoment::Before => pauses.before,
        PauseMoment::After => pauses.after,
    };
    if let Some(seconds) = seconds {
        if seconds.is_finite() && seconds > 0.0 {
            info!(" pausing {seconds}s");
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
