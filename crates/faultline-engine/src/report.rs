use faultline_core::Plan;
use log::error;
use serde::Serialize;
use std::fmt::Display;

/// Per-run summary handed back to the caller: the plan's identity and
/// the terminating error, if the run raised one. Observing an error only
/// logs and records it; the error itself keeps propagating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            title: "N/A".to_string(),
            description: "N/A".to_string(),
            error: None,
        }
    }

    pub fn with_plan(&mut self, plan: &Plan) {
        self.title = plan.title.clone();
        self.description = plan
            .description
            .clone()
            .unwrap_or_else(|| "N/A".to_string());
    }

    pub fn observe<T, E: Display>(&mut self, result: &Result<T, E>) {
        if let Err(err) = result {
            let rendered = err.to_string();
            error!("{rendered}");
            self.error = Some(rendered);
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
