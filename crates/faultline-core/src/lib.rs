pub mod plan;

pub use plan::{
    Action, BackendRef, Pauses, Plan, PlanParseError, Probe, Step, StepProbes, Target,
    TargetLayers, NOOP_LAYER_KEY,
};
