pub mod cluster;
pub mod layer;

pub use cluster::{
    ClusterApi, ClusterError, DeploymentStatus, PodStatus, UnwiredClusterApi, DEFAULT_NAMESPACE,
};
pub use layer::KubernetesLayer;
