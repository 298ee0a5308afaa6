pub mod actions;
pub mod dispatch;
pub mod executor;
pub mod layer;
pub mod loader;
pub mod noop;
pub mod probes;
pub mod registry;
pub mod report;
pub mod run;

pub use actions::{ActionError, ActionHandler, ActionRegistry};
pub use dispatch::normalize_name;
pub use executor::{
    apply_action, apply_close_probe, apply_steady_probe, execute_plan, ExecuteError,
};
pub use layer::{Layer, LayerError, MicroservicesStatus};
pub use loader::{load_plan, LoadPlanError};
pub use noop::NoopLayer;
pub use probes::{ProbeError, ProbeHandler, ProbeRegistry};
pub use registry::{resolve_layers, LayerFactory, LayerRegistry, LayerResolveError, ResolvedLayers};
pub use report::Report;
pub use run::{run_loaded_plan, run_plan, EngineError};
