//! # Session Bootstrap
//!
//! Exchanges `Credentials` for the session token attached to every
//! authenticated call.

use super::rest::{LoginRequest, SecretEnvelope, VaultRest};
use crate::error::{Result, VaultError};
use crate::types::Credentials;
use reqwest::Method;
use tracing::{debug, info};

/// Obtain a session token
///
/// A pre-issued token is handed back unchanged. Otherwise the userpass backend
/// mounted at `credentials.path` is asked for a token.
///
/// # Errors
/// `NoAuthentication` when neither form is populated, or the login failure
pub async fn authorize(client: &VaultRest, credentials: &Credentials) -> Result<String> {
    if let Some(token) = &credentials.usertoken {
        debug!("Using pre-issued session token");
        return Ok(token.clone());
    }

    let Some(userpass) = &credentials.userpass else {
        return Err(VaultError::NoAuthentication);
    };

    info!(
        "Logging in to {} as {}",
        credentials.path, userpass.username
    );
    let body = serde_json::to_value(LoginRequest {
        password: &userpass.password,
    })?;
    let response = client
        .execute(
            "login",
            Method::POST,
            &format!(
                "{}/login/{}",
                credentials.path.trim_matches('/'),
                userpass.username
            ),
            Some(&body),
        )
        .await?;

    let envelope: SecretEnvelope = match response {
        Some(value) => serde_json::from_value(value)?,
        None => SecretEnvelope::default(),
    };
    envelope
        .auth
        .map(|auth| auth.client_token)
        .ok_or(VaultError::Decode {
            field: "auth.client_token",
            reason: "login response has no auth section".to_string(),
        })
}
