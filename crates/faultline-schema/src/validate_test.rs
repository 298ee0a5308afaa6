use super::validate_plan_document;
use serde_json::json;

#[test]
fn well_formed_plan_has_no_violations() {
    let document = json!({
        "title": "kill then restart",
        "description": "restart the webapp after an abrupt kill",
        "backend": {"name": "noop"},
        "method": [
            {
                "title": "kill the webapp",
                "probes": {
                    "steady": {
                        "name": "microservice-available-and-healthy",
                        "parameters": {"name": "webapp"}
                    }
                },
                "action": {
                    "name": "kill-microservice",
                    "parameters": {"name": "webapp"},
                    "pauses": {"before": 1, "after": 2.5}
                }
            }
        ]
    });
    assert_eq!(validate_plan_document(&document), Vec::new());
}

#[test]
fn empty_method_is_valid() {
    let document = json!({"title": "nothing to do", "method": []});
    assert!(validate_plan_document(&document).is_empty());
}

#[test]
fn missing_method_is_reported() {
    let document = json!({"title": "no method"});
    let violations = validate_plan_document(&document);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("method"));
}

#[test]
fn probe_without_name_is_reported_with_its_path() {
    let document = json!({
        "title": "nameless probe",
        "method": [
            {"probes": {"steady": {"parameters": {"name": "svc"}}}}
        ]
    });
    let violations = validate_plan_document(&document);
    assert!(!violations.is_empty());
    assert_eq!(violations[0].path, "/method/0/probes/steady");
    assert!(violations[0].message.contains("name"));
}

#[test]
fn non_numeric_pause_is_reported() {
    let document = json!({
        "title": "bad pause",
        "method": [
            {"action": {"name": "kill-microservice", "pauses": {"before": "soon"}}}
        ]
    });
    let violations = validate_plan_document(&document);
    assert!(!violations.is_empty());
    assert_eq!(violations[0].path, "/method/0/action/pauses/before");
}

#[test]
fn validation_is_idempotent() {
    let document = json!({
        "title": "validated twice",
        "method": [{"action": {"parameters": {}}}]
    });
    let first = validate_plan_document(&document);
    let second = validate_plan_document(&document);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn non_object_document_is_rejected() {
    let violations = validate_plan_document(&json!(["not", "a", "plan"]));
    assert!(!violations.is_empty());
}
