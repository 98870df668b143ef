//! # Token Commands

use super::read_document;
use anyhow::{Context, Result};
use std::path::Path;
use vault_reconciler::duration::format_duration;
use vault_reconciler::types::UserToken;
use vault_reconciler::VaultClient;

/// Issue the token described in `file` and print it
pub async fn create_command(client: &VaultClient, file: &Path) -> Result<()> {
    let token: UserToken = read_document(file)?;
    let issued = client
        .create_token(&token)
        .await
        .with_context(|| format!("Failed to create token '{}'", token.display_name))?;

    println!("{issued}");
    Ok(())
}

/// Print what Vault reports about `token`
pub async fn lookup_command(client: &VaultClient, token: &str) -> Result<()> {
    let found = client
        .lookup_token(token)
        .await
        .context("Failed to look up token")?;

    println!("{:<14} {}", "id", found.id);
    println!("{:<14} {}", "display name", found.display_name);
    println!("{:<14} {}", "ttl", format_duration(found.ttl));
    println!("{:<14} {}", "policies", found.policies.join(","));
    for (key, value) in &found.metadata {
        println!("{:<14} {}={}", "meta", key, value);
    }

    Ok(())
}
