//! # List Command

use super::ListType;
use anyhow::{Context, Result};
use vault_reconciler::VaultClient;

/// Print the identifiers of every resource of one kind
pub async fn list_command(client: &VaultClient, resource_type: ListType) -> Result<()> {
    let (label, items) = match resource_type {
        ListType::Mounts => ("mounts", client.list_mounts().await),
        ListType::Auths => ("auth methods", client.list_auths().await),
        ListType::Policies => ("policies", client.list_policies().await),
    };
    let items = items.with_context(|| format!("Failed to list {label}"))?;

    if items.is_empty() {
        println!("No {label} found.");
        return Ok(());
    }

    for item in items {
        println!("{item}");
    }

    Ok(())
}
