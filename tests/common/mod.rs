//! Common test utilities
//!
//! Provides shared initialization code for the Pact tests and an in-memory
//! `VaultApi` used by the reconciliation tests.
#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, Once};
use vault_reconciler::api::{MountInput, TokenCreateRequest, VaultApi};
use vault_reconciler::{Result, VaultError};

static RUSTLS_INIT: Once = Once::new();

/// Initialize rustls crypto provider for tests
///
/// This must be called before any async operations that use rustls.
/// Uses a `Once` to ensure it's only called once across all tests.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // Err means a provider is already installed (e.g. by pact_consumer)
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// A remote call made against `FakeVault`
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListMounts,
    Mount { path: String, input: MountInput },
    Unmount(String),
    ListAuth,
    EnableAuth {
        path: String,
        auth_type: String,
        description: String,
    },
    DisableAuth(String),
    ListPolicies,
    GetPolicy(String),
    PutPolicy { name: String, rules: String },
    DeletePolicy(String),
    CreateToken(TokenCreateRequest),
    LookupToken(String),
    Request {
        method: Method,
        path: String,
        body: Option<Value>,
    },
}

#[derive(Debug, Default)]
struct State {
    mounts: BTreeSet<String>,
    auths: BTreeSet<String>,
    policies: BTreeMap<String, String>,
    failing_paths: BTreeSet<String>,
    fail_listing: bool,
    lookup: Map<String, Value>,
    calls: Vec<Call>,
}

/// In-memory Vault that records every call
///
/// Mount tables report paths with a trailing `/`, as Vault does.
#[derive(Debug, Default)]
pub struct FakeVault {
    state: Mutex<State>,
}

fn http_error(status: u16, message: &str) -> VaultError {
    VaultError::Http {
        status,
        message: message.to_string(),
    }
}

fn mount_key(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

impl FakeVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-existing backend
    #[must_use]
    pub fn with_mount(self, path: &str) -> Self {
        self.state.lock().unwrap().mounts.insert(mount_key(path));
        self
    }

    /// Pre-existing auth method
    #[must_use]
    pub fn with_auth(self, path: &str) -> Self {
        self.state.lock().unwrap().auths.insert(mount_key(path));
        self
    }

    /// Pre-existing policy
    #[must_use]
    pub fn with_policy(self, name: &str, rules: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .policies
            .insert(name.to_string(), rules.to_string());
        self
    }

    /// Generic requests to `path` fail with a 400
    #[must_use]
    pub fn failing_path(self, path: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_paths
            .insert(path.to_string());
        self
    }

    /// Every listing call fails with a 503
    #[must_use]
    pub fn failing_listings(self) -> Self {
        self.state.lock().unwrap().fail_listing = true;
        self
    }

    /// Data returned by token lookups
    #[must_use]
    pub fn with_lookup(self, data: Value) -> Self {
        if let Value::Object(map) = data {
            self.state.lock().unwrap().lookup = map;
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than listings
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::ListMounts | Call::ListAuth | Call::ListPolicies | Call::GetPolicy(_)
                )
            })
            .collect()
    }

    /// Number of generic writes issued to `path`
    pub fn writes_to(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Request { path: p, .. } if p == path))
            .count()
    }

    /// `(method, path)` of every generic request, in order
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Request { method, path, .. } => Some((method, path)),
                _ => None,
            })
            .collect()
    }

    pub fn mounts(&self) -> Vec<String> {
        self.state.lock().unwrap().mounts.iter().cloned().collect()
    }

    pub fn policy_rules(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().policies.get(name).cloned()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn listing(&self, call: Call, pick: impl Fn(&State) -> Vec<String>) -> Result<Vec<String>> {
        self.record(call);
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(http_error(503, "Vault is sealed"));
        }
        Ok(pick(&state))
    }
}

#[async_trait]
impl VaultApi for FakeVault {
    async fn list_mounts(&self) -> Result<Vec<String>> {
        self.listing(Call::ListMounts, |s| s.mounts.iter().cloned().collect())
    }

    async fn mount(&self, path: &str, input: &MountInput) -> Result<()> {
        self.record(Call::Mount {
            path: path.to_string(),
            input: input.clone(),
        });
        let mut state = self.state.lock().unwrap();
        if !state.mounts.insert(mount_key(path)) {
            return Err(http_error(400, "path is already in use"));
        }
        Ok(())
    }

    async fn unmount(&self, path: &str) -> Result<()> {
        self.record(Call::Unmount(path.to_string()));
        self.state.lock().unwrap().mounts.remove(&mount_key(path));
        Ok(())
    }

    async fn list_auth(&self) -> Result<Vec<String>> {
        self.listing(Call::ListAuth, |s| s.auths.iter().cloned().collect())
    }

    async fn enable_auth(&self, path: &str, auth_type: &str, description: &str) -> Result<()> {
        self.record(Call::EnableAuth {
            path: path.to_string(),
            auth_type: auth_type.to_string(),
            description: description.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        if !state.auths.insert(mount_key(path)) {
            return Err(http_error(400, "path is already in use"));
        }
        Ok(())
    }

    async fn disable_auth(&self, path: &str) -> Result<()> {
        self.record(Call::DisableAuth(path.to_string()));
        self.state.lock().unwrap().auths.remove(&mount_key(path));
        Ok(())
    }

    async fn list_policies(&self) -> Result<Vec<String>> {
        self.listing(Call::ListPolicies, |s| s.policies.keys().cloned().collect())
    }

    async fn get_policy(&self, name: &str) -> Result<String> {
        self.record(Call::GetPolicy(name.to_string()));
        self.state
            .lock()
            .unwrap()
            .policies
            .get(name)
            .cloned()
            .ok_or_else(|| VaultError::NotFound {
                kind: "policy",
                name: name.to_string(),
            })
    }

    async fn put_policy(&self, name: &str, rules: &str) -> Result<()> {
        self.record(Call::PutPolicy {
            name: name.to_string(),
            rules: rules.to_string(),
        });
        self.state
            .lock()
            .unwrap()
            .policies
            .insert(name.to_string(), rules.to_string());
        Ok(())
    }

    async fn delete_policy(&self, name: &str) -> Result<()> {
        self.record(Call::DeletePolicy(name.to_string()));
        self.state.lock().unwrap().policies.remove(name);
        Ok(())
    }

    async fn create_token(&self, request: &TokenCreateRequest) -> Result<String> {
        self.record(Call::CreateToken(request.clone()));
        if request.id.is_empty() {
            Ok("s.generated".to_string())
        } else {
            Ok(request.id.clone())
        }
    }

    async fn lookup_token(&self, token: &str) -> Result<Map<String, Value>> {
        self.record(Call::LookupToken(token.to_string()));
        Ok(self.state.lock().unwrap().lookup.clone())
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        self.record(Call::Request {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        if self.state.lock().unwrap().failing_paths.contains(path) {
            return Err(http_error(400, "invalid request"));
        }
        Ok(None)
    }
}
