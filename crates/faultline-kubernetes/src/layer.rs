use crate::cluster::{ClusterApi, ClusterError, DEFAULT_NAMESPACE};
use faultline_engine::{Layer, LayerError, MicroservicesStatus};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Kubernetes layer: microservices are deployments carrying a
/// `service=<name>` label, health is derived from pod phases and
/// replica counts.
pub struct KubernetesLayer {
    api: Box<dyn ClusterApi>,
    namespace: String,
}

impl KubernetesLayer {
    pub fn new(api: Box<dyn ClusterApi>) -> Self {
        Self::with_namespace(api, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(api: Box<dyn ClusterApi>, namespace: impl Into<String>) -> Self {
        Self {
            api,
            namespace: namespace.into(),
        }
    }

    fn service_selector(name: &str) -> String {
        format!("service={name}")
    }
}

impl From<ClusterError> for LayerError {
    fn from(error: ClusterError) -> Self {
        LayerError::Transport(error.to_string())
    }
}

impl Layer for KubernetesLayer {
    fn all_microservices_healthy(&self) -> Result<MicroservicesStatus, LayerError> {
        let pods = self.api.list_pods(&self.namespace, None)?;
        let mut not_ready = Vec::new();
        let mut failed = Vec::new();
        for pod in pods {
            if pod.phase == "Failed" {
                failed.push(pod.name);
            } else if pod.phase != "Running" {
                not_ready.push(pod.name);
            }
        }
        Ok((not_ready, failed))
    }

    fn microservice_available_and_healthy(&self, name: &str) -> Result<Option<bool>, LayerError> {
        let deployments = self
            .api
            .list_deployments(&self.namespace, Some(&Self::service_selector(name)))?;
        if deployments.is_empty() {
            return Ok(None);
        }
        for deployment in deployments {
            if deployment.available_replicas != deployment.replicas {
                return Ok(Some(false));
            }
        }
        Ok(Some(true))
    }

    fn microservice_is_not_available(&self, name: &str) -> Result<bool, LayerError> {
        let deployments = self
            .api
            .list_deployments(&self.namespace, Some(&Self::service_selector(name)))?;
        Ok(deployments.is_empty())
    }

    fn endpoint_should_respond_ok(&self, _url: &str) -> Result<bool, LayerError> {
        // endpoint checks belong to an application layer, not the platform
        Err(LayerError::Unsupported("endpoint_should_respond_ok"))
    }

    fn kill_microservice(&self, name: &str) -> Result<Value, LayerError> {
        let selector = Self::service_selector(name);
        info!("killing microservice '{name}' in namespace '{}'", self.namespace);

        for deployment in self
            .api
            .list_deployments(&self.namespace, Some(&selector))?
        {
            self.api
                .delete_deployment(&self.namespace, &deployment.name)?;
        }
        for replica_set in self
            .api
            .list_replica_sets(&self.namespace, Some(&selector))?
        {
            self.api.delete_replica_set(&self.namespace, &replica_set)?;
        }
        for pod in self.api.list_pods(&self.namespace, Some(&selector))? {
            self.api.delete_pod(&self.namespace, &pod.name)?;
        }
        Ok(Value::Null)
    }

    fn start_microservice(&self, config_path: &str) -> Result<Value, LayerError> {
        let manifest = read_deployment_config(config_path)?;
        info!(
            "starting microservice from '{config_path}' in namespace '{}'",
            self.namespace
        );
        Ok(self.api.create_deployment(&self.namespace, &manifest)?)
    }
}

/// Reads a deployment descriptor; the extension decides the format,
/// anything but json/yaml is refused.
fn read_deployment_config(config_path: &str) -> Result<Value, LayerError> {
    let path = Path::new(config_path);
    let text = fs::read_to_string(path).map_err(|err| LayerError::Descriptor {
        path: config_path.to_string(),
        reason: err.to_string(),
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text).map_err(|err| LayerError::Descriptor {
            path: config_path.to_string(),
            reason: format!("json decode error: {err}"),
        }),
        Some("yml") | Some("yaml") => {
            serde_yaml::from_str(&text).map_err(|err| LayerError::Descriptor {
                path: config_path.to_string(),
                reason: format!("yaml decode error: {err}"),
            })
        }
        _ => Err(LayerError::Descriptor {
            path: config_path.to_string(),
            reason: "unsupported extension".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
