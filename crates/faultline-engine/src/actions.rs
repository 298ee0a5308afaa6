use crate::dispatch::normalize_name;
use crate::layer::{Layer, LayerError};
use faultline_core::Action;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("action '{0}' is not implemented")]
    Unknown(String),
    #[error("invalid action: {0}")]
    Invalid(String),
    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// Actions forward to the layer's mutating capabilities and return the
/// layer's result unmodified.
pub trait ActionHandler {
    fn invoke(&self, action: &Action, layer: &dyn Layer) -> Result<Value, ActionError>;
}

pub struct ActionRegistry {
    handlers: BTreeMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("kill_microservice", Box::new(KillMicroservice));
        registry.register("start_microservice", Box::new(StartMicroservice));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Box<dyn ActionHandler>) {
        self.handlers.insert(normalize_name(&name.into()), handler);
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn execute(
        &self,
        name: &str,
        action: &Action,
        layer: &dyn Layer,
    ) -> Result<Value, ActionError> {
        if name.is_empty() {
            return Err(ActionError::Invalid("missing action name".to_string()));
        }
        let normalized = normalize_name(name);
        let handler = self
            .handlers
            .get(&normalized)
            .ok_or(ActionError::Unknown(normalized))?;
        handler.invoke(action, layer)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn string_parameter<'a>(action: &'a Action, key: &str) -> Option<&'a str> {
    action.parameters.get(key).and_then(Value::as_str)
}

struct KillMicroservice;

impl ActionHandler for KillMicroservice {
    fn invoke(&self, action: &Action, layer: &dyn Layer) -> Result<Value, ActionError> {
        let name = string_parameter(action, "name")
            .ok_or_else(|| ActionError::Invalid("missing microservice name".to_string()))?;
        Ok(layer.kill_microservice(name)?)
    }
}

struct StartMicroservice;

impl ActionHandler for StartMicroservice {
    fn invoke(&self, action: &Action, layer: &dyn Layer) -> Result<Value, ActionError> {
        let config_path = string_parameter(action, "config-path")
            .ok_or_else(|| ActionError::Invalid("missing deployment config path".to_string()))?;
        Ok(layer.start_microservice(config_path)?)
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
