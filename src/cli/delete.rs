//! # Delete Command

use super::DeleteType;
use anyhow::{Context, Result};
use vault_reconciler::VaultClient;

/// Remove one backend, auth method or policy
pub async fn delete_command(client: &VaultClient, resource_type: DeleteType, name: &str) -> Result<()> {
    let (kind, result) = match resource_type {
        DeleteType::Backend => ("backend", client.delete_backend(name).await),
        DeleteType::Auth => ("auth method", client.delete_auth(name).await),
        DeleteType::Policy => ("policy", client.delete_policy(name).await),
    };
    result.with_context(|| format!("Failed to delete {kind} '{name}'"))?;

    println!("Deleted {kind} {name}");
    Ok(())
}
