use super::{ProbeError, ProbeHandler, ProbeRegistry};
use crate::layer::{Layer, LayerError, MicroservicesStatus};
use faultline_core::Probe;
use serde_json::{json, Map, Value};

struct ScriptedLayer {
    not_ready: Vec<String>,
    failed: Vec<String>,
    available: Option<bool>,
    unavailable: bool,
    endpoint_ok: bool,
}

impl Default for ScriptedLayer {
    fn default() -> Self {
        Self {
            not_ready: Vec::new(),
            failed: Vec::new(),
            available: Some(true),
            unavailable: true,
            endpoint_ok: true,
        }
    }
}

impl Layer for ScriptedLayer {
    fn all_microservices_healthy(&self) -> Result<MicroservicesStatus, LayerError> {
        Ok((self.not_ready.clone(), self.failed.clone()))
    }

    fn microservice_available_and_healthy(&self, _name: &str) -> Result<Option<bool>, LayerError> {
        Ok(self.available)
    }

    fn microservice_is_not_available(&self, _name: &str) -> Result<bool, LayerError> {
        Ok(self.unavailable)
    }

    fn endpoint_should_respond_ok(&self, _url: &str) -> Result<bool, LayerError> {
        Ok(self.endpoint_ok)
    }

    fn kill_microservice(&self, _name: &str) -> Result<Value, LayerError> {
        Ok(Value::Null)
    }

    fn start_microservice(&self, _config_path: &str) -> Result<Value, LayerError> {
        Ok(Value::Null)
    }
}

fn probe_with_name(name: &str) -> Probe {
    let mut parameters = Map::new();
    parameters.insert("name".to_string(), json!(name));
    Probe {
        name: None,
        parameters,
        layer: None,
    }
}

#[test]
fn empty_probe_name_is_invalid() {
    let registry = ProbeRegistry::with_builtins();
    let error = registry
        .apply("", &Probe::default(), &ScriptedLayer::default())
        .expect_err("must reject");
    assert!(matches!(error, ProbeError::Invalid(_)));
}

#[test]
fn unknown_probe_reports_the_normalized_name() {
    let registry = ProbeRegistry::with_builtins();
    let error = registry
        .apply(
            "microservice-should-be-happy",
            &Probe::default(),
            &ScriptedLayer::default(),
        )
        .expect_err("must reject");
    assert_eq!(
        error.to_string(),
        "probe 'microservice_should_be_happy' is not implemented"
    );
}

#[test]
fn dashed_name_resolves_the_underscore_handler() {
    let registry = ProbeRegistry::with_builtins();
    registry
        .apply(
            "microservice-available-and-healthy",
            &probe_with_name("svc"),
            &ScriptedLayer::default(),
        )
        .expect("dashed form must dispatch");
    registry
        .apply(
            "microservice_available_and_healthy",
            &probe_with_name("svc"),
            &ScriptedLayer::default(),
        )
        .expect("underscore form must dispatch");
}

#[test]
fn all_healthy_passes_on_empty_status() {
    let registry = ProbeRegistry::with_builtins();
    registry
        .apply(
            "microservices-all-healthy",
            &Probe::default(),
            &ScriptedLayer::default(),
        )
        .expect("healthy system must pass");
}

#[test]
fn all_healthy_fails_when_anything_is_not_ready() {
    let registry = ProbeRegistry::with_builtins();
    let layer = ScriptedLayer {
        not_ready: vec!["webapp".to_string()],
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply("microservices-all-healthy", &Probe::default(), &layer)
        .expect_err("must fail");
    assert_eq!(error.to_string(), "failed probe: the system is unhealthy");
}

#[test]
fn all_healthy_fails_when_anything_failed() {
    let registry = ProbeRegistry::with_builtins();
    let layer = ScriptedLayer {
        failed: vec!["webapp".to_string()],
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply("microservices-all-healthy", &Probe::default(), &layer)
        .expect_err("must fail");
    assert!(matches!(error, ProbeError::Failed(_)));
}

#[test]
fn available_and_healthy_requires_a_name_parameter() {
    let registry = ProbeRegistry::with_builtins();
    let error = registry
        .apply(
            "microservice-available-and-healthy",
            &Probe::default(),
            &ScriptedLayer::default(),
        )
        .expect_err("must reject");
    assert_eq!(error.to_string(), "invalid probe: missing microservice name");
}

#[test]
fn available_and_healthy_distinguishes_not_found_from_not_healthy() {
    let registry = ProbeRegistry::with_builtins();

    let missing = ScriptedLayer {
        available: None,
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply(
            "microservice-available-and-healthy",
            &probe_with_name("svc"),
            &missing,
        )
        .expect_err("must fail");
    assert!(error.to_string().contains("microservice 'svc' was not found"));

    let unhealthy = ScriptedLayer {
        available: Some(false),
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply(
            "microservice-available-and-healthy",
            &probe_with_name("svc"),
            &unhealthy,
        )
        .expect_err("must fail");
    assert!(error.to_string().contains("microservice 'svc' is not healthy"));
}

#[test]
fn is_not_available_fails_when_the_microservice_is_still_there() {
    let registry = ProbeRegistry::with_builtins();
    let layer = ScriptedLayer {
        unavailable: false,
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply(
            "microservice-is-not-available",
            &probe_with_name("svc"),
            &layer,
        )
        .expect_err("must fail");
    assert!(error.to_string().contains("microservice 'svc' looks healthy"));
}

#[test]
fn endpoint_probe_requires_a_url_and_an_ok_response() {
    let registry = ProbeRegistry::with_builtins();
    let error = registry
        .apply(
            "endpoint-should-respond-ok",
            &Probe::default(),
            &ScriptedLayer::default(),
        )
        .expect_err("must reject");
    assert_eq!(error.to_string(), "invalid probe: missing endpoint url");

    let mut parameters = Map::new();
    parameters.insert("url".to_string(), json!("http://localhost:8000/"));
    let probe = Probe {
        name: None,
        parameters,
        layer: None,
    };
    let not_ok = ScriptedLayer {
        endpoint_ok: false,
        ..ScriptedLayer::default()
    };
    let error = registry
        .apply("endpoint-should-respond-ok", &probe, &not_ok)
        .expect_err("must fail");
    assert_eq!(
        error.to_string(),
        "failed probe: endpoint did not return an okay status"
    );
}

#[test]
fn custom_probes_can_be_registered() {
    struct AlwaysFails;

    impl ProbeHandler for AlwaysFails {
        fn invoke(&self, _probe: &Probe, _layer: &dyn Layer) -> Result<(), ProbeError> {
            Err(ProbeError::Failed("nope".to_string()))
        }
    }

    let mut registry = ProbeRegistry::with_builtins();
    registry.register("always-fails", Box::new(AlwaysFails));
    assert!(registry.names().contains(&"always_fails"));

    let error = registry
        .apply("always-fails", &Probe::default(), &ScriptedLayer::default())
        .expect_err("must fail");
    assert!(matches!(error, ProbeError::Failed(_)));
}
