//! # Constants
//!
//! Shared constants used throughout the client.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Version prefix of the Vault HTTP API
pub const API_VERSION: &str = "v1";

/// Default Vault address when `VAULT_ADDR` is not set
pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";

/// Default HTTP client timeout (seconds)
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 10;

/// Default mount of the userpass login backend
pub const DEFAULT_AUTH_PATH: &str = "userpass";

/// Header carrying the session token on authenticated requests
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Attribute key holding the sub-path an attribute set is written to
pub const ATTRIBUTE_URI_KEY: &str = "uri";

/// Presence-only attribute marker for apply-once configuration
pub const ATTRIBUTE_ONESHOT_KEY: &str = "oneshot";

/// CFSSL endpoint for authenticated signing requests
pub const CFSSL_AUTHSIGN_PATH: &str = "api/v1/cfssl/authsign";

/// Auth method types that may be enabled
pub const SUPPORTED_AUTH_TYPES: &[&str] =
    &["userpass", "ldap", "token", "appid", "github", "mfa", "tls"];

/// Secret backend types that may be mounted
pub const SUPPORTED_BACKEND_TYPES: &[&str] = &[
    "aws",
    "generic",
    "pki",
    "transit",
    "cassandra",
    "consul",
    "cubbyhole",
    "mysql",
    "postgres",
    "ssh",
    "custom",
];
