//! # Vault API
//!
//! The transport boundary of the client.
//!
//! `VaultApi` is the set of remote calls reconciliation depends on. `VaultRest`
//! implements it over HTTP against the versioned `/v1` namespace. Tests and
//! embedders can substitute any other implementation.

pub mod rest;
pub mod session;

pub use rest::{MountConfigInput, MountInput, TokenCreateRequest, VaultRest};

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};

/// Remote calls against the Vault control plane
///
/// Every method is a single request. Implementations must not retry and must
/// surface transport and decode failures unchanged.
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Paths of mounted secret backends, as reported (usually with a trailing `/`)
    async fn list_mounts(&self) -> Result<Vec<String>>;

    async fn mount(&self, path: &str, input: &MountInput) -> Result<()>;

    async fn unmount(&self, path: &str) -> Result<()>;

    /// Paths of enabled auth methods, as reported (usually with a trailing `/`)
    async fn list_auth(&self) -> Result<Vec<String>>;

    async fn enable_auth(&self, path: &str, auth_type: &str, description: &str) -> Result<()>;

    async fn disable_auth(&self, path: &str) -> Result<()>;

    async fn list_policies(&self) -> Result<Vec<String>>;

    /// Raw rules document of a stored policy
    async fn get_policy(&self, name: &str) -> Result<String>;

    async fn put_policy(&self, name: &str, rules: &str) -> Result<()>;

    async fn delete_policy(&self, name: &str) -> Result<()>;

    /// Issue a token and return its client token string
    async fn create_token(&self, request: &TokenCreateRequest) -> Result<String>;

    /// Loosely typed `data` section of a token lookup
    async fn lookup_token(&self, token: &str) -> Result<Map<String, Value>>;

    /// Generic authenticated request against `/v1/<path>`
    ///
    /// Returns the decoded JSON body, or `None` when the response has no body.
    async fn request(&self, method: Method, path: &str, body: Option<&Value>)
        -> Result<Option<Value>>;
}
