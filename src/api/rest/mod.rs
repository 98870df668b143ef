//! Vault REST Client
//!
//! Native REST implementation of `VaultApi` for the Vault HTTP API v1.
//! Uses reqwest for HTTP requests and the `X-Vault-Token` header for
//! authentication.
//!
//! This implementation:
//! - Works directly with Pact HTTP mock servers
//! - Uses reqwest with rustls (no OpenSSL dependencies)
//! - Treats any status outside 200..=399 as an error and never retries
//!
//! References:
//! - [Vault HTTP API](https://developer.hashicorp.com/vault/api-docs)

mod operations;
mod requests;
mod responses;

pub use requests::{MountConfigInput, MountInput, TokenCreateRequest};
pub(crate) use requests::{
    EnableAuthRequest, LoginRequest, PutPolicyRequest, TokenLookupRequest,
};
pub(crate) use responses::{
    mount_table_paths, PolicyListResponse, PolicyResponse, SecretEnvelope, VaultErrorResponse,
};

use crate::constants::{API_VERSION, VAULT_TOKEN_HEADER};
use crate::error::{Result, VaultError};
use crate::observability::metrics;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, warn, Instrument};

/// Vault REST client
#[derive(Clone)]
pub struct VaultRest {
    http_client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for VaultRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultRest")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl VaultRest {
    /// Create an unauthenticated client for `base_url`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration, skip_tls_verify: bool) -> Result<Self> {
        if skip_tls_verify {
            warn!("TLS certificate verification is disabled for {}", base_url);
        }

        // Create HTTP client with rustls (already configured in Cargo.toml)
        let http_client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(skip_tls_verify)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: String::new(),
        })
    }

    /// Attach the session token sent with every subsequent request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Base URL of the Vault service
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build HTTP request with authentication headers
    pub(crate) fn make_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            API_VERSION,
            path.trim_start_matches('/')
        );

        let mut request = self.http_client.request(method, &url);
        if !self.token.is_empty() {
            request = request.header(VAULT_TOKEN_HEADER, &self.token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
    }

    /// Send a request and decode its JSON body
    ///
    /// `operation` labels the metrics and the tracing span.
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let span = debug_span!(
            "vault.request",
            vault.operation = operation,
            http.method = %method,
            vault.path = path
        );

        async move {
            let start = Instant::now();
            debug!("Sending {} {}", method, path);

            let result = self.send(method, path, body).await;
            match &result {
                Ok(_) => metrics::record_operation(operation, start.elapsed().as_secs_f64()),
                Err(e) => {
                    debug!("Vault operation {} failed: {}", operation, e);
                    metrics::increment_operation_errors(operation);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Option<Value>> {
        let response = self.make_request(method, path, body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !(200..=399).contains(&status.as_u16()) {
            return Err(Self::handle_error_response(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Turn an error response into a `VaultError::Http`
    pub(crate) fn handle_error_response(status: reqwest::StatusCode, error_text: &str) -> VaultError {
        let message = match serde_json::from_str::<VaultErrorResponse>(error_text) {
            Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
            _ => error_text.to_string(),
        };

        VaultError::Http {
            status: status.as_u16(),
            message,
        }
    }
}
