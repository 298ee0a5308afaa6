use crate::layer::{Layer, LayerError, MicroservicesStatus};
use serde_json::Value;

/// Always-satisfied layer backing dry runs: every probe passes and every
/// action succeeds without touching anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLayer;

impl Layer for NoopLayer {
    fn all_microservices_healthy(&self) -> Result<MicroservicesStatus, LayerError> {
        Ok((Vec::new(), Vec::new()))
    }

    fn microservice_available_and_healthy(&self, _name: &str) -> Result<Option<bool>, LayerError> {
        Ok(Some(true))
    }

    fn microservice_is_not_available(&self, _name: &str) -> Result<bool, LayerError> {
        Ok(true)
    }

    fn endpoint_should_respond_ok(&self, _url: &str) -> Result<bool, LayerError> {
        Ok(true)
    }

    fn kill_microservice(&self, _name: &str) -> Result<Value, LayerError> {
        Ok(Value::Null)
    }

    fn start_microservice(&self, _config_path: &str) -> Result<Value, LayerError> {
        Ok(Value::Null)
    }
}

#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;
