//! Prelude module for common imports
//!
//! ```rust
//! use vault_reconciler::prelude::*;
//! ```

pub use crate::api::{VaultApi, VaultRest};
pub use crate::attributes::Attributes;
pub use crate::client::VaultClient;
pub use crate::config::{CertificateAuthority, Config};
pub use crate::error::{Result, ValidationError, VaultError};
pub use crate::probe::ResourceKind;
pub use crate::signer::{CertificateSigner, CfsslSigner};
pub use crate::state::{Applied, DesiredState, Outcome};
pub use crate::types::{Auth, Backend, Credentials, Policy, PolicyPermission, Secret, UserPass, UserToken};
