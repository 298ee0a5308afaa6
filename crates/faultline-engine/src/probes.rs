use crate::dispatch::normalize_name;
use crate::layer::{Layer, LayerError};
use faultline_core::Probe;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe '{0}' is not implemented")]
    Unknown(String),
    #[error("invalid probe: {0}")]
    Invalid(String),
    #[error("failed probe: {0}")]
    Failed(String),
    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// A probe passes by returning `Ok(())` and fails by raising
/// `ProbeError::Failed`; there is no boolean pass/fail channel.
pub trait ProbeHandler {
    fn invoke(&self, probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError>;
}

pub struct ProbeRegistry {
    handlers: BTreeMap<String, Box<dyn ProbeHandler>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("microservices_all_healthy", Box::new(MicroservicesAllHealthy));
        registry.register(
            "microservice_available_and_healthy",
            Box::new(MicroserviceAvailableAndHealthy),
        );
        registry.register(
            "microservice_is_not_available",
            Box::new(MicroserviceIsNotAvailable),
        );
        registry.register("endpoint_should_respond_ok", Box::new(EndpointShouldRespondOk));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Box<dyn ProbeHandler>) {
        self.handlers.insert(normalize_name(&name.into()), handler);
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn apply(&self, name: &str, probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError> {
        if name.is_empty() {
            return Err(ProbeError::Invalid("missing probe name".to_string()));
        }
        let normalized = normalize_name(name);
        let handler = self
            .handlers
            .get(&normalized)
            .ok_or(ProbeError::Unknown(normalized))?;
        handler.invoke(probe, layer)
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn string_parameter<'a>(probe: &'a Probe, key: &str) -> Option<&'a str> {
    probe.parameters.get(key).and_then(Value::as_str)
}

struct MicroservicesAllHealthy;

impl ProbeHandler for MicroservicesAllHealthy {
    fn invoke(&self, _probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError> {
        let (not_ready, failed) = layer.all_microservices_healthy()?;
        if !not_ready.is_empty() || !failed.is_empty() {
            return Err(ProbeError::Failed("the system is unhealthy".to_string()));
        }
        Ok(())
    }
}

struct MicroserviceAvailableAndHealthy;

impl ProbeHandler for MicroserviceAvailableAndHealthy {
    fn invoke(&self, probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError> {
        let name = string_parameter(probe, "name")
            .ok_or_else(|| ProbeError::Invalid("missing microservice name".to_string()))?;
        match layer.microservice_available_and_healthy(name)? {
            None => Err(ProbeError::Failed(format!(
                "microservice '{name}' was not found"
            ))),
            Some(false) => Err(ProbeError::Failed(format!(
                "microservice '{name}' is not healthy"
            ))),
            Some(true) => Ok(()),
        }
    }
}

struct MicroserviceIsNotAvailable;

impl ProbeHandler for MicroserviceIsNotAvailable {
    fn invoke(&self, probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError> {
        let name = string_parameter(probe, "name")
            .ok_or_else(|| ProbeError::Invalid("missing microservice name".to_string()))?;
        if !layer.microservice_is_not_available(name)? {
            return Err(ProbeError::Failed(format!(
                "microservice '{name}' looks healthy"
            )));
        }
        Ok(())
    }
}

struct EndpointShouldRespondOk;

impl ProbeHandler for EndpointShouldRespondOk {
    fn invoke(&self, probe: &Probe, layer: &dyn Layer) -> Result<(), ProbeError> {
        let url = string_parameter(probe, "url")
            .ok_or_else(|| ProbeError::Invalid("missing endpoint url".to_string()))?;
        if !layer.endpoint_should_respond_ok(url)? {
            return Err(ProbeError::Failed(
                "endpoint did not return an okay status".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "probes_test.rs"]
mod tests;
