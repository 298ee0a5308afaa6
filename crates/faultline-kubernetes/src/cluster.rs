use serde_json::Value;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("cluster transport failed: {0}")]
    Transport(String),
    #[error("cluster rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodStatus {
    pub name: String,
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStatus {
    pub name: String,
    pub replicas: Option<i32>,
    pub available_replicas: Option<i32>,
}

/// The slice of the Kubernetes API the layer consumes. The concrete
/// HTTP client is wired in by the embedding application; tests use
/// in-memory fakes.
pub trait ClusterApi {
    fn list_pods(&self, ns: &str, label_selector: Option<&str>)
        -> Result<Vec<PodStatus>, ClusterError>;

    fn list_deployments(
        &self,
        ns: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<DeploymentStatus>, ClusterError>;

    fn list_replica_sets(
        &self,
        ns: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<String>, ClusterError>;

    fn delete_deployment(&self, ns: &str, name: &str) -> Result<(), ClusterError>;

    fn delete_replica_set(&self, ns: &str, name: &str) -> Result<(), ClusterError>;

    fn delete_pod(&self, ns: &str, name: &str) -> Result<(), ClusterError>;

    fn create_deployment(&self, ns: &str, manifest: &Value) -> Result<Value, ClusterError>;
}

/// Placeholder client for builds where no cluster credentials are
/// available: every call fails with a transport error.
pub struct UnwiredClusterApi;

impl UnwiredClusterApi {
    fn unwired<T>(&self) -> Result<T, ClusterError> {
        Err(ClusterError::Transport(
            "kubernetes cluster api is not wired".to_string(),
        ))
    }
}

impl ClusterApi for UnwiredClusterApi {
    fn list_pods(
        &self,
        _ns: &str,
        _label_selector: Option<&str>,
    ) -> Result<Vec<PodStatus>, ClusterError> {
        self.unwired()
    }

    fn list_deployments(
        &self,
        _ns: &str,
        _label_selector: Option<&str>,
    ) -> Result<Vec<DeploymentStatus>, ClusterError> {
        self.unwired()
    }

    fn list_replica_sets(
        &self,
        _ns: &str,
        _label_selector: Option<&str>,
    ) -> Result<Vec<String>, ClusterError> {
        self.unwired()
    }

    fn delete_deployment(&self, _ns: &str, _name: &str) -> Result<(), ClusterError> {
        self.unwired()
    }

    fn delete_replica_set(&self, _ns: &str, _name: &str) -> Result<(), ClusterError> {
        self.unwired()
    }

    fn delete_pod(&self, _ns: &str, _name: &str) -> Result<(), ClusterError> {
        self.unwired()
    }

    fn create_deployment(&self, _ns: &str, _manifest: &Value) -> Result<Value, ClusterError> {
        self.unwired()
    }
}
