//! Pact contract tests for the Vault `sys` API
//!
//! These tests verify that `VaultRest` and the reconciler work against a Pact
//! mock server standing in for Vault:
//! 1. Define the interactions Vault is expected to see
//! 2. Point the REST client at the mock server
//! 3. Call the actual client methods
//! 4. Verify every interaction was matched

mod common;

use common::init_rustls;
use pact_consumer::prelude::*;
use serde_json::json;
use std::time::Duration;
use vault_reconciler::api::{MountConfigInput, MountInput, VaultApi, VaultRest};
use vault_reconciler::attributes::Attributes;
use vault_reconciler::types::{Auth, Backend, Policy, PolicyPermission};
use vault_reconciler::{VaultClient, VaultError};

const CONSUMER: &str = "Vault-Reconciler";
const PROVIDER: &str = "Vault";
const ROOT_TOKEN: &str = "s.root";

/// Start the mock server and build an authenticated client for it
/// Note: The mock_server must be kept alive for the duration of the test
fn setup_client(
    pact_builder: &mut PactBuilder,
) -> (
    Box<dyn pact_consumer::mock_server::ValidatingMockServer>,
    VaultRest,
) {
    init_rustls();
    let mock_server = pact_builder.start_mock_server(None, None);
    let mut base_url = mock_server.url().to_string();
    if base_url.ends_with('/') {
        base_url.pop();
    }
    let rest = VaultRest::new(&base_url, Duration::from_secs(5), false)
        .expect("Failed to create Vault REST client")
        .with_token(ROOT_TOKEN);
    (mock_server, rest)
}

#[tokio::test]
async fn test_mount_backend_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list mounted backends", "", |mut i| {
        i.given("only the default backends are mounted");
        i.request
            .method("GET")
            .path("/v1/sys/mounts")
            .header("X-Vault-Token", ROOT_TOKEN);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "secret/": {"type": "kv", "description": "key/value secret storage"},
                "sys/": {"type": "system", "description": "system endpoints"},
                "request_id": "0b1a7e8e",
                "data": {
                    "secret/": {"type": "kv", "description": "key/value secret storage"},
                    "sys/": {"type": "system", "description": "system endpoints"}
                }
            }));
        i
    });

    pact_builder.interaction("mount a pki backend", "", |mut i| {
        i.given("no backend is mounted at pki");
        i.request
            .method("POST")
            .path("/v1/sys/mounts/pki")
            .header("X-Vault-Token", ROOT_TOKEN)
            .header("content-type", "application/json")
            .json_body(json!({
                "type": "pki",
                "description": "internal ca",
                "config": {
                    "default_lease_ttl": "3600s",
                    "max_lease_ttl": "2592000s"
                }
            }));
        i.response.status(204);
        i
    });

    pact_builder.interaction("configure pki urls", "", |mut i| {
        i.given("a backend is mounted at pki");
        i.request
            .method("PUT")
            .path("/v1/pki/config/urls")
            .header("X-Vault-Token", ROOT_TOKEN)
            .header("content-type", "application/json")
            .json_body(json!({
                "uri": "config/urls",
                "issuing_certificates": "https://vault.example.com/v1/pki/ca"
            }));
        i.response.status(204);
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);
    let client = VaultClient::new(rest);

    let mut backend = Backend::new("pki", "pki", "internal ca");
    backend.default_lease_ttl = chrono::TimeDelta::hours(1);
    backend.max_lease_ttl = chrono::TimeDelta::days(30);
    backend.attrs = vec![Attributes::new()
        .with("uri", "config/urls")
        .with("issuing_certificates", "https://vault.example.com/v1/pki/ca")];

    let created = client
        .mount_backend(&backend)
        .await
        .expect("Failed to mount backend");
    assert!(created);
}

#[tokio::test]
async fn test_mount_existing_auth_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list enabled auth methods", "", |mut i| {
        i.given("userpass auth is enabled");
        i.request
            .method("GET")
            .path("/v1/sys/auth")
            .header("X-Vault-Token", ROOT_TOKEN);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "data": {
                    "token/": {"type": "token", "description": "token based credentials"},
                    "userpass/": {"type": "userpass", "description": "operators"}
                }
            }));
        i
    });

    pact_builder.interaction("write a userpass user", "", |mut i| {
        i.given("userpass auth is enabled");
        i.request
            .method("POST")
            .path("/v1/userpass/users/bob")
            .header("X-Vault-Token", ROOT_TOKEN)
            .header("content-type", "application/json")
            .json_body(json!({
                "uri": "users/bob",
                "password": "changeme",
                "policies": "read-only"
            }));
        i.response.status(204);
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);
    let client = VaultClient::new(rest);

    let mut auth = Auth::new("userpass", "userpass", "operators");
    auth.attrs = vec![Attributes::new()
        .with("uri", "users/bob")
        .with("password", "changeme")
        .with("policies", "read-only")];

    client
        .mount_auth(&auth)
        .await
        .expect("Failed to configure auth method");
}

#[tokio::test]
async fn test_get_policy_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);
    let rules = r#"{"path":{"secret/*":{"policy":"read","capabilities":["read","list"]}}}"#;

    pact_builder.interaction("list policies", "", |mut i| {
        i.given("the read-only policy exists");
        i.request
            .method("GET")
            .path("/v1/sys/policy")
            .header("X-Vault-Token", ROOT_TOKEN);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "policies": ["default", "read-only", "root"],
                "data": {"policies": ["default", "read-only", "root"]}
            }));
        i
    });

    pact_builder.interaction("read a policy", "", |mut i| {
        i.given("the read-only policy exists");
        i.request
            .method("GET")
            .path("/v1/sys/policy/read-only")
            .header("X-Vault-Token", ROOT_TOKEN);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "name": "read-only",
                "rules": rules,
                "data": {"name": "read-only", "rules": rules}
            }));
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);
    let client = VaultClient::new(rest);

    let policy = client
        .get_policy("read-only")
        .await
        .expect("Failed to read policy");

    let mut expected = Policy {
        name: "read-only".to_string(),
        ..Policy::default()
    };
    expected.path.insert(
        "secret/*".to_string(),
        PolicyPermission {
            policy: "read".to_string(),
            capabilities: vec!["read".to_string(), "list".to_string()],
        },
    );
    assert_eq!(policy, expected);
}

#[tokio::test]
async fn test_put_policy_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("write a policy", "", |mut i| {
        i.given("the ops policy does not exist");
        i.request
            .method("PUT")
            .path("/v1/sys/policy/ops")
            .header("X-Vault-Token", ROOT_TOKEN)
            .header("content-type", "application/json")
            .json_body(json!({"rules": "{\"path\":{}}"}));
        i.response.status(204);
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);

    rest.put_policy("ops", r#"{"path":{}}"#)
        .await
        .expect("Failed to write policy");
}

#[tokio::test]
async fn test_error_response_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("mount over an existing backend", "", |mut i| {
        i.given("a backend is mounted at secret");
        i.request
            .method("POST")
            .path("/v1/sys/mounts/secret")
            .header("X-Vault-Token", ROOT_TOKEN)
            .header("content-type", "application/json")
            .json_body(json!({
                "type": "generic",
                "description": "x",
                "config": {"default_lease_ttl": "0s", "max_lease_ttl": "0s"}
            }));
        i.response
            .status(400)
            .header("content-type", "application/json")
            .json_body(json!({"errors": ["path is already in use at secret/"]}));
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);

    let err = rest
        .mount(
            "secret",
            &MountInput {
                mount_type: "generic".to_string(),
                description: "x".to_string(),
                config: MountConfigInput {
                    default_lease_ttl: "0s".to_string(),
                    max_lease_ttl: "0s".to_string(),
                },
            },
        )
        .await
        .expect_err("Mount should fail");

    match err {
        VaultError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "path is already in use at secret/");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_policy_not_found_with_pact() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("read a missing policy", "", |mut i| {
        i.given("the ghost policy does not exist");
        i.request
            .method("GET")
            .path("/v1/sys/policy/ghost")
            .header("X-Vault-Token", ROOT_TOKEN);
        i.response
            .status(404)
            .header("content-type", "application/json")
            .json_body(json!({"errors": []}));
        i
    });

    let (_mock_server, rest) = setup_client(&mut pact_builder);

    let err = rest
        .get_policy("ghost")
        .await
        .expect_err("Policy should not exist");
    assert!(err.is_not_found());
}
