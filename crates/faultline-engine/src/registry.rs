use crate::layer::{Layer, LayerError};
use crate::noop::NoopLayer;
use faultline_core::{Plan, NOOP_LAYER_KEY};
use log::info;
use std::collections::BTreeMap;

pub type LayerFactory = Box<dyn Fn() -> Result<Box<dyn Layer>, LayerError>>;

#[derive(Debug, thiserror::Error)]
pub enum LayerResolveError {
    #[error("no layer is registered for key '{0}'")]
    UnknownLayer(String),
    #[error("layer '{key}' failed to load: {source}")]
    Construct {
        key: String,
        #[source]
        source: LayerError,
    },
    #[error("a plan must reference a backend or target layers")]
    MissingLayerConfig,
}

/// Maps a layer key to a constructor. Keys are resolved from this
/// registry only; arbitrary plan keys never load code. Third-party
/// layers plug in through `register`.
pub struct LayerRegistry {
    factories: BTreeMap<String, LayerFactory>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(NOOP_LAYER_KEY, Box::new(|| Ok(Box::new(NoopLayer))));
        registry
    }

    pub fn register(&mut self, key: impl Into<String>, factory: LayerFactory) {
        self.factories.insert(key.into(), factory);
    }

    pub fn keys(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn resolve(&self, key: &str) -> Result<Box<dyn Layer>, LayerResolveError> {
        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| LayerResolveError::UnknownLayer(key.to_string()))?;
        factory().map_err(|source| LayerResolveError::Construct {
            key: key.to_string(),
            source,
        })
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// The layers loaded for one run. `Single` backs plans declaring one
/// `backend`; `Named` backs plans declaring `target-layers`, where each
/// probe and action addresses a layer by key.
#[derive(Debug)]
pub enum ResolvedLayers {
    Single(Box<dyn Layer>),
    Named(BTreeMap<String, Box<dyn Layer>>),
}

pub fn resolve_layers(
    plan: &Plan,
    registry: &LayerRegistry,
) -> Result<ResolvedLayers, LayerResolveError> {
    if plan.target_layers.is_some() {
        info!("loading the target layers of plan '{}'", plan.title);
        let mut layers = BTreeMap::new();
        for key in plan.layer_keys() {
            if layers.contains_key(&key) {
                continue;
            }
            info!(" {key}");
            let layer = registry.resolve(&key)?;
            layers.insert(key, layer);
        }
        return Ok(ResolvedLayers::Named(layers));
    }

    if let Some(backend) = &plan.backend {
        info!("loading backend '{}'", backend.name);
        return Ok(ResolvedLayers::Single(registry.resolve(&backend.name)?));
    }

    Err(LayerResolveError::MissingLayerConfig)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
