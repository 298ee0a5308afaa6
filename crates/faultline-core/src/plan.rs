use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NOOP_LAYER_KEY: &str = "noop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendRef>,
    #[serde(
        default,
        rename = "target-layers",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_layers: Option<TargetLayers>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TargetLayers {
    #[serde(default)]
    pub platforms: Vec<Target>,
    #[serde(default)]
    pub applications: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probes: Option<StepProbes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StepProbes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steady: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<Probe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Probe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pauses: Option<Pauses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pauses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanParseError {
    #[error("plan json decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Plan {
    pub fn from_value(value: Value) -> Result<Self, PlanParseError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, PlanParseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns a copy of this plan with every layer reference, top-level
    /// and per-step, rewritten to the no-op key. The rest of the document
    /// is preserved so a dry run exercises the exact same control flow.
    pub fn with_noop_layers(&self) -> Self {
        let mut plan = self.clone();
        if let Some(backend) = plan.backend.as_mut() {
            backend.name = NOOP_LAYER_KEY.to_string();
        }
        if let Some(target_layers) = plan.target_layers.as_mut() {
            for target in target_layers
                .platforms
                .iter_mut()
                .chain(target_layers.applications.iter_mut())
            {
                target.key = NOOP_LAYER_KEY.to_string();
            }
        }
        if let Some(method) = plan.method.as_mut() {
            for step in method.iter_mut() {
                if let Some(probes) = step.probes.as_mut() {
                    for probe in [probes.steady.as_mut(), probes.close.as_mut()]
                        .into_iter()
                        .flatten()
                    {
                        if probe.layer.is_some() {
                            probe.layer = Some(NOOP_LAYER_KEY.to_string());
                        }
                    }
                }
                if let Some(action) = step.action.as_mut() {
                    if action.layer.is_some() {
                        action.layer = Some(NOOP_LAYER_KEY.to_string());
                    }
                }
            }
        }
        plan
    }

    pub fn layer_keys(&self) -> Vec<String> {
        let Some(target_layers) = &self.target_layers else {
            return Vec::new();
        };
        target_layers
            .platforms
            .iter()
            .chain(target_layers.applications.iter())
            .map(|target| target.key.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
