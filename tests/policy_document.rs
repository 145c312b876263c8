//! Policy document loading and round-tripping
//!
//! Exercises the JSON schema end to end: load a realistic document, evaluate
//! it, re-serialize it, and check the structural validation failures.

use std::sync::Arc;

use authz_core::document;
use authz_core::prelude::*;

const NOTES_DOCUMENT: &str = r#"{
    "id": "notes-root",
    "description": "access control for the notes service",
    "target": {"id": "service-gate", "type": "LITERAL", "expression": "object.name == 'note'"},
    "combineAlgorithmName": "FIRST_APPLICABLE",
    "isRoot": true,
    "policies": [
        {
            "id": "maintenance",
            "description": "nobody writes during maintenance",
            "target": {"id": "maintenance-on", "type": "LITERAL", "expression": "environment.global.maintenance"},
            "combineAlgorithmName": "DENY_UNLESS_PERMIT",
            "rules": [
                {
                    "id": "reads-still-ok",
                    "effect": "PERMIT",
                    "condition": {"id": "is-read", "type": "LITERAL", "expression": "action.request.method == 'GET'"}
                }
            ]
        },
        {
            "id": "notes-access",
            "target": {"id": "always", "type": "LITERAL", "expression": "true"},
            "combineAlgorithmName": "DENY_OVERRIDES",
            "rules": [
                {
                    "id": "owner-full-access",
                    "effect": "PERMIT",
                    "condition": {"id": "is-owner", "type": "LITERAL", "expression": "object.data.owner == subject.user_id"}
                },
                {
                    "id": "admin-full-access",
                    "effect": "PERMIT",
                    "target": {
                        "id": "admin-gate",
                        "type": "COMPOSITION",
                        "combinationType": "OR",
                        "subExpressions": [
                            {"id": "is-admin", "type": "LITERAL", "expression": "subject.roles contains 'ADMIN'"},
                            {"id": "is-support", "type": "LITERAL", "expression": "subject.roles contains 'SUPPORT'"}
                        ]
                    }
                },
                {
                    "id": "no-archived-writes",
                    "effect": "DENY",
                    "condition": {
                        "id": "archived-write",
                        "type": "COMPOSITION",
                        "combinationType": "AND",
                        "subExpressions": [
                            {"id": "is-archived", "type": "LITERAL", "expression": "object.data.archived"},
                            {"id": "is-write", "type": "LITERAL", "expression": "action.request.method != 'GET'"}
                        ]
                    }
                }
            ]
        }
    ]
}"#;

fn engine() -> PdpEngine {
    PdpEngine::new(
        PdpConfiguration::new(DecisionStrategy::NotApplicablePermitIndeterminateDeny),
        ContextPredicate::new(),
    )
}

fn request(user: &str, roles: &[&str], method: &str, data: serde_json::Value) -> AuthzRequest {
    let mut subject = Subject::new(user);
    subject.roles = roles.iter().map(|r| (*r).to_string()).collect();

    let mut environment = Environment::new();
    environment.add_global("maintenance", serde_json::json!(false));

    AuthzRequest::new(
        subject,
        Resource::with_data("note", data),
        Action::from_request(HttpRequest::new(method, "/notes/1")),
        environment,
        Arc::new(document::from_json_str(NOTES_DOCUMENT).unwrap()),
    )
}

#[test]
fn document_round_trips_semantically() {
    let tree = document::from_json_str(NOTES_DOCUMENT).unwrap();
    let json = document::to_json_string(&tree).unwrap();
    let reloaded = document::from_json_str(&json).unwrap();
    assert_eq!(reloaded, tree);
}

#[test]
fn loaded_document_drives_decisions() {
    let pdp = engine();

    // The owner edits their own note.
    let decision = pdp
        .authorize(&request("alice", &[], "PUT", serde_json::json!({"owner": "alice", "archived": false})))
        .unwrap();
    assert!(decision.is_permit());

    // An admin edits someone else's note.
    let decision = pdp
        .authorize(&request("root", &["ADMIN"], "PUT", serde_json::json!({"owner": "alice", "archived": false})))
        .unwrap();
    assert!(decision.is_permit());

    // Writing an archived note is denied even for the owner.
    let decision = pdp
        .authorize(&request("alice", &[], "PUT", serde_json::json!({"owner": "alice", "archived": true})))
        .unwrap();
    assert!(decision.is_deny());

    // Reading an archived note is still fine.
    let decision = pdp
        .authorize(&request("alice", &[], "GET", serde_json::json!({"owner": "alice", "archived": true})))
        .unwrap();
    assert!(decision.is_permit());
}

#[test]
fn strangers_fall_through_to_not_applicable() {
    let decision = engine()
        .authorize(&request("mallory", &[], "PUT", serde_json::json!({"owner": "alice", "archived": false})))
        .unwrap();

    // No rule applies; the lenient strategy permits and says why.
    assert!(decision.is_permit());
    assert_eq!(decision.details, Some(DecisionDetails::Message("No policy applicable".into())));
}

#[test]
fn maintenance_mode_blocks_writes_first() {
    let mut request = request("alice", &[], "PUT", serde_json::json!({"owner": "alice"}));
    request.environment.add_global("maintenance", serde_json::json!(true));

    let decision = engine().authorize(&request).unwrap();
    assert!(decision.is_deny());
}

#[test]
fn expression_identifiers_survive_the_round_trip() {
    let tree = document::from_json_str(NOTES_DOCUMENT).unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["target"]["id"], "service-gate");
    assert_eq!(json["policies"][1]["rules"][1]["target"]["combinationType"], "OR");
    assert_eq!(json["combineAlgorithmName"], "FIRST_APPLICABLE");
}
