use serde_json::Value;

/// Microservices that are not ready yet, and microservices that failed.
/// A healthy system reports both lists empty.
pub type MicroservicesStatus = (Vec<String>, Vec<String>);

#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("layer transport failed: {0}")]
    Transport(String),
    #[error("layer does not support `{0}`")]
    Unsupported(&'static str),
    #[error("cannot process deployment config `{path}`: {reason}")]
    Descriptor { path: String, reason: String },
}

/// The capability contract every infrastructure layer must provide.
/// Probes consume the four query capabilities, actions the two mutating
/// ones. Idempotence of the mutating calls is the layer's concern, not
/// the engine's.
pub trait Layer {
    fn all_microservices_healthy(&self) -> Result<MicroservicesStatus, LayerError>;

    /// `None` when the microservice is unknown to the layer, `Some(false)`
    /// when it exists but has not reached its desired state.
    fn microservice_available_and_healthy(&self, name: &str) -> Result<Option<bool>, LayerError>;

    fn microservice_is_not_available(&self, name: &str) -> Result<bool, LayerError>;

    fn endpoint_should_respond_ok(&self, url: &str) -> Result<bool, LayerError>;

    fn kill_microservice(&self, name: &str) -> Result<Value, LayerError>;

    fn start_microservice(&self, config_path: &str) -> Result<Value, LayerError>;
}

impl std::fmt::Debug for dyn Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Layer")
    }
}
