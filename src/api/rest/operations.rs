//! `VaultApi` implementation for the REST client

use super::{
    mount_table_paths, EnableAuthRequest, MountInput, PolicyListResponse, PolicyResponse,
    PutPolicyRequest, SecretEnvelope, TokenCreateRequest, TokenLookupRequest, VaultRest,
};
use crate::api::VaultApi;
use crate::error::{Result, VaultError};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::info;

/// Decode an optional body, treating an empty response as the type's default
fn decode_body<T: DeserializeOwned + Default>(body: Option<Value>) -> Result<T> {
    match body {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(T::default()),
    }
}

#[async_trait]
impl VaultApi for VaultRest {
    async fn list_mounts(&self) -> Result<Vec<String>> {
        let body = self
            .execute("list_mounts", Method::GET, "sys/mounts", None)
            .await?;
        mount_table_paths(body.unwrap_or_default())
    }

    async fn mount(&self, path: &str, input: &MountInput) -> Result<()> {
        info!("Mounting {} backend at {}", input.mount_type, path);
        let body = serde_json::to_value(input)?;
        self.execute(
            "mount",
            Method::POST,
            &format!("sys/mounts/{path}"),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn unmount(&self, path: &str) -> Result<()> {
        info!("Unmounting backend at {}", path);
        self.execute("unmount", Method::DELETE, &format!("sys/mounts/{path}"), None)
            .await?;
        Ok(())
    }

    async fn list_auth(&self) -> Result<Vec<String>> {
        let body = self
            .execute("list_auth", Method::GET, "sys/auth", None)
            .await?;
        mount_table_paths(body.unwrap_or_default())
    }

    async fn enable_auth(&self, path: &str, auth_type: &str, description: &str) -> Result<()> {
        info!("Enabling {} auth method at {}", auth_type, path);
        let body = serde_json::to_value(EnableAuthRequest {
            auth_type,
            description,
        })?;
        self.execute(
            "enable_auth",
            Method::POST,
            &format!("sys/auth/{path}"),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn disable_auth(&self, path: &str) -> Result<()> {
        info!("Disabling auth method at {}", path);
        self.execute("disable_auth", Method::DELETE, &format!("sys/auth/{path}"), None)
            .await?;
        Ok(())
    }

    async fn list_policies(&self) -> Result<Vec<String>> {
        let body = self
            .execute("list_policies", Method::GET, "sys/policy", None)
            .await?;
        let response: PolicyListResponse = decode_body(body)?;
        Ok(response.into_names())
    }

    async fn get_policy(&self, name: &str) -> Result<String> {
        let body = self
            .execute("get_policy", Method::GET, &format!("sys/policy/{name}"), None)
            .await
            .map_err(|e| match e {
                VaultError::Http { status: 404, .. } => VaultError::not_found("policy", name),
                other => other,
            })?;
        let response: PolicyResponse = decode_body(body)?;
        response
            .into_rules()
            .ok_or_else(|| VaultError::not_found("policy", name))
    }

    async fn put_policy(&self, name: &str, rules: &str) -> Result<()> {
        info!("Writing policy {}", name);
        let body = serde_json::to_value(PutPolicyRequest { rules })?;
        self.execute(
            "put_policy",
            Method::PUT,
            &format!("sys/policy/{name}"),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn delete_policy(&self, name: &str) -> Result<()> {
        info!("Deleting policy {}", name);
        self.execute("delete_policy", Method::DELETE, &format!("sys/policy/{name}"), None)
            .await?;
        Ok(())
    }

    async fn create_token(&self, request: &TokenCreateRequest) -> Result<String> {
        info!("Creating token {}", request.display_name);
        let body = serde_json::to_value(request)?;
        let response = self
            .execute("create_token", Method::POST, "auth/token/create", Some(&body))
            .await?;
        let envelope: SecretEnvelope = decode_body(response)?;
        envelope
            .auth
            .map(|auth| auth.client_token)
            .ok_or(VaultError::Decode {
                field: "auth.client_token",
                reason: "token creation response has no auth section".to_string(),
            })
    }

    async fn lookup_token(&self, token: &str) -> Result<Map<String, Value>> {
        let body = serde_json::to_value(TokenLookupRequest { token })?;
        let response = self
            .execute("lookup_token", Method::POST, "auth/token/lookup", Some(&body))
            .await?;
        let envelope: SecretEnvelope = decode_body(response)?;
        envelope.data.ok_or(VaultError::Decode {
            field: "data",
            reason: "token lookup response has no data section".to_string(),
        })
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        self.execute("request", method, path, body).await
    }
}
