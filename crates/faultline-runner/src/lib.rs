mod cli;
mod run;

pub use cli::{Cli, Commands, OutputFormat, RunCommand, ValidateCommand};
pub use run::{build_layer_registry, execute_run, execute_validate, RunnerError};
