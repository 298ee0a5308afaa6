use super::{resolve_layers, LayerRegistry, LayerResolveError, ResolvedLayers};
use crate::layer::{Layer, LayerError, MicroservicesStatus};
use faultline_core::Plan;
use serde_json::{json, Value};

struct FlakyLayer;

impl Layer for FlakyLayer {
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

#[test]
fn builtin_registry_resolves_noop() {
    let registry = LayerRegistry::with_builtins();
    assert_eq!(registry.keys(), ["noop"]);
    let layer = registry.resolve("noop").expect("noop must resolve");
    assert_eq!(
        layer
            .microservice_available_and_healthy("svc")
            .expect("noop never errors"),
        Some(true)
    );
}

#[test]
fn unknown_key_is_rejected() {
    let registry = LayerRegistry::with_builtins();
    let error = registry.resolve("openstack").expect_err("must reject");
    assert_eq!(
        error.to_string(),
        "no layer is registered for key 'openstack'"
    );
}

#[test]
fn third_party_layers_plug_in_by_key() {
    let mut registry = LayerRegistry::with_builtins();
    registry.register("flaky", Box::new(|| Ok(Box::new(FlakyLayer))));
    registry.resolve("flaky").expect("registered key must resolve");
}

#[test]
fn factory_failure_names_the_key() {
    let mut registry = LayerRegistry::new();
    registry.register(
        "broken",
        Box::new(|| Err(LayerError::Transport("boom".to_string()))),
    );
    let error = registry.resolve("broken").expect_err("must reject");
    match error {
        LayerResolveError::Construct { key, .. } => assert_eq!(key, "broken"),
        other => panic!("expected construct error, got {other:?}"),
    }
}

#[test]
fn single_backend_plan_resolves_one_layer() {
    let plan = Plan::from_value(json!({
        "title": "single",
        "backend": {"name": "noop"},
        "method": []
    }))
    .expect("plan must decode");
    let layers = resolve_layers(&plan, &LayerRegistry::with_builtins()).expect("must resolve");
    assert!(matches!(layers, ResolvedLayers::Single(_)));
}

#[test]
fn target_layers_plan_resolves_one_instance_per_distinct_key() {
    let mut registry = LayerRegistry::with_builtins();
    registry.register("flaky", Box::new(|| Ok(Box::new(FlakyLayer))));

    let plan = Plan::from_value(json!({
        "title": "multi",
        "target-layers": {
            "platforms": [{"key": "noop"}, {"key": "flaky"}],
            "applications": [{"key": "noop"}]
        },
        "method": []
    }))
    .expect("plan must decode");

    let layers = resolve_layers(&plan, &registry).expect("must resolve");
    match layers {
        ResolvedLayers::Named(named) => {
            assert_eq!(
                named.keys().map(String::as_str).collect::<Vec<_>>(),
                ["flaky", "noop"]
            );
        }
        ResolvedLayers::Single(_) => panic!("expected named layers"),
    }
}

#[test]
fn unresolvable_target_layer_key_aborts_resolution() {
    let plan = Plan::from_value(json!({
        "title": "multi",
        "target-layers": {"platforms": [{"key": "openstack"}], "applications": []},
        "method": []
    }))
    .expect("plan must decode");
    let error =
        resolve_layers(&plan, &LayerRegistry::with_builtins()).expect_err("must reject");
    assert!(matches!(error, LayerResolveError::UnknownLayer(key) if key == "openstack"));
}

#[test]
fn plan_without_any_layer_reference_is_rejected() {
    let plan = Plan::from_value(json!({"title": "bare", "method": []})).expect("plan must decode");
    let error =
        resolve_layers(&plan, &LayerRegistry::with_builtins()).expect_err("must reject");
    assert!(matches!(error, LayerResolveError::MissingLayerConfig));
}

#[test]
fn default_registry_always_has_noop() {
    let registry = LayerRegistry::default();
    let layer = registry.resolve("noop").expect("noop must resolve");
    assert!(layer
        .microservice_is_not_available("svc")
        .expect("noop never errors"));
}
