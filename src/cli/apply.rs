//! # Apply Command
//!
//! Converges every resource in a desired-state document.

use super::read_document;
use anyhow::{Context, Result};
use std::path::Path;
use vault_reconciler::state::DesiredState;
use vault_reconciler::VaultClient;

/// Validate and apply the document at `file`, one line per resource
pub async fn apply_command(client: &VaultClient, file: &Path) -> Result<()> {
    let state: DesiredState = read_document(file)?;

    if state.is_empty() {
        println!("Nothing to apply in {}.", file.display());
        return Ok(());
    }

    state
        .validate()
        .with_context(|| format!("Invalid resource in {}", file.display()))?;

    let applied = client
        .apply(&state)
        .await
        .with_context(|| format!("Failed to apply {}", file.display()))?;

    for resource in applied {
        println!("{resource}");
    }

    Ok(())
}
