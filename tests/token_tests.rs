//! # Token Manager Tests

mod common;

use chrono::TimeDelta;
use common::{Call, FakeVault};
use serde_json::json;
use std::collections::BTreeMap;
use vault_reconciler::api::TokenCreateRequest;
use vault_reconciler::types::UserToken;
use vault_reconciler::{ValidationError, VaultClient, VaultError};

fn ci_token() -> UserToken {
    UserToken {
        path: "auth/token".to_string(),
        display_name: "ci".to_string(),
        ttl: TimeDelta::minutes(30),
        max_uses: 5,
        policies: vec!["read-only".to_string()],
        metadata: BTreeMap::from([("team".to_string(), "platform".to_string())]),
        ..UserToken::default()
    }
}

#[tokio::test]
async fn test_create_token_maps_every_field() {
    let client = VaultClient::new(FakeVault::new());

    let issued = client.create_token(&ci_token()).await.unwrap();

    assert_eq!(issued, "s.generated");
    assert_eq!(
        client.api().calls(),
        vec![Call::CreateToken(TokenCreateRequest {
            id: String::new(),
            policies: vec!["read-only".to_string()],
            meta: BTreeMap::from([("team".to_string(), "platform".to_string())]),
            ttl: "1800s".to_string(),
            display_name: "ci".to_string(),
            num_uses: 5,
        })]
    );
}

#[tokio::test]
async fn test_create_token_with_explicit_id() {
    let client = VaultClient::new(FakeVault::new());
    let token = UserToken {
        id: "s.chosen".to_string(),
        ..ci_token()
    };

    assert_eq!(client.create_token(&token).await.unwrap(), "s.chosen");
}

#[tokio::test]
async fn test_invalid_token_is_rejected_before_any_call() {
    let client = VaultClient::new(FakeVault::new());

    let no_name = UserToken {
        display_name: String::new(),
        ..ci_token()
    };
    let no_path = UserToken {
        path: String::new(),
        ..ci_token()
    };

    assert!(matches!(
        client.create_token(&no_name).await.unwrap_err(),
        VaultError::Validation(ValidationError::MissingDisplayName)
    ));
    assert!(matches!(
        client.create_token(&no_path).await.unwrap_err(),
        VaultError::Validation(ValidationError::MissingPath { kind: "token" })
    ));
    assert!(client.api().calls().is_empty());
}

#[tokio::test]
async fn test_lookup_token_decodes_response() {
    let client = VaultClient::new(FakeVault::new().with_lookup(json!({
        "id": "s.abc",
        "display_name": "token-ci",
        "ttl": 1799,
        "policies": ["default", "read-only"],
        "meta": {"team": "platform"},
        "creation_time": 1_700_000_000
    })));

    let token = client.lookup_token("s.abc").await.unwrap();

    assert_eq!(token.id, "s.abc");
    assert_eq!(token.display_name, "token-ci");
    assert_eq!(token.ttl, TimeDelta::seconds(1799));
    assert_eq!(token.policies, vec!["default", "read-only"]);
    assert_eq!(token.metadata["team"], "platform");
    assert_eq!(
        client.api().calls(),
        vec![Call::LookupToken("s.abc".to_string())]
    );
}

#[tokio::test]
async fn test_lookup_token_with_null_meta() {
    let client = VaultClient::new(FakeVault::new().with_lookup(json!({
        "id": "s.root",
        "display_name": "root",
        "ttl": 0,
        "policies": ["root"],
        "meta": null
    })));

    let token = client.lookup_token("s.root").await.unwrap();

    assert!(token.metadata.is_empty());
    assert_eq!(token.ttl, TimeDelta::zero());
}

#[tokio::test]
async fn test_lookup_token_reports_bad_field() {
    let client = VaultClient::new(FakeVault::new().with_lookup(json!({
        "id": "s.abc",
        "ttl": "768h"
    })));

    match client.lookup_token("s.abc").await.unwrap_err() {
        VaultError::Decode { field, .. } => assert_eq!(field, "ttl"),
        other => panic!("expected decode error, got {other:?}"),
    }
}
