//! # VAULTCTL CLI
//!
//! Command-line interface for the Vault reconciler.
//!
//! Connection settings come from the environment (`VAULT_ADDR`, `VAULT_TOKEN`,
//! `VAULT_USERNAME` / `VAULT_PASSWORD`, ...).
//!
//! ## Usage
//!
//! ```bash
//! # Converge everything described in a state document
//! vaultctl apply -f state.yaml
//!
//! # List mounted backends, enabled auth methods or policies
//! vaultctl list mounts
//! vaultctl list auths
//! vaultctl list policies
//!
//! # Remove a single resource
//! vaultctl delete backend pki
//! vaultctl delete policy read-only
//!
//! # Issue and inspect tokens
//! vaultctl token create -f token.yaml
//! vaultctl token lookup s.XXXXXXXX
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vault_reconciler::config::Config;
use vault_reconciler::observability::metrics;
use vault_reconciler::VaultClient;

mod apply;
mod delete;
mod list;
mod token;

/// Vault reconciliation CLI
#[derive(Parser)]
#[command(name = "vaultctl")]
#[command(
    about = "Declarative reconciliation of Vault mounts, auth methods, policies and tokens",
    long_about = None,
    after_help = "\
Examples:
  vaultctl apply -f state.yaml
  vaultctl list mounts
  vaultctl delete auth github
  vaultctl token lookup s.XXXXXXXX
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Vault address (overrides VAULT_ADDR)
    #[arg(short, long, global = true)]
    address: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print Prometheus metrics after the command completes
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Converge every resource in a desired-state document
    Apply {
        /// YAML or JSON file with backends, auths, policies and secrets
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },
    /// List resources of one kind
    List {
        #[arg(value_enum, value_name = "RESOURCE_TYPE")]
        resource_type: ListType,
    },
    /// Delete a single resource
    Delete {
        #[arg(value_enum, value_name = "RESOURCE_TYPE")]
        resource_type: DeleteType,

        /// Mount path or policy name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Issue or inspect tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Issue a token described in a file
    Create {
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Show what Vault reports about a token
    Lookup {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
}

/// Resource listings supported by vaultctl
#[derive(Clone, Copy, ValueEnum)]
enum ListType {
    /// Mounted secret backends
    #[value(name = "mounts", alias = "backends")]
    Mounts,
    /// Enabled auth methods
    #[value(name = "auths", alias = "auth")]
    Auths,
    /// Access policies
    #[value(name = "policies", alias = "policy")]
    Policies,
}

/// Resource types that can be deleted
#[derive(Clone, Copy, ValueEnum)]
enum DeleteType {
    #[value(name = "backend", alias = "mount")]
    Backend,
    #[value(name = "auth")]
    Auth,
    #[value(name = "policy")]
    Policy,
}

#[tokio::main]
async fn main() -> Result<()> {
    vault_reconciler::install_crypto_provider();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(address) = cli.address {
        config.vault_hostname = address;
    }
    config.verbose |= cli.verbose;

    let default_filter = if config.verbose {
        "vault_reconciler=debug,vaultctl=debug"
    } else {
        "vault_reconciler=info,vaultctl=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.metrics {
        metrics::register_metrics()?;
    }

    let client = VaultClient::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to Vault at {}", config.vault_hostname))?;

    match cli.command {
        Commands::Apply { file } => apply::apply_command(&client, &file).await?,
        Commands::List { resource_type } => list::list_command(&client, resource_type).await?,
        Commands::Delete {
            resource_type,
            name,
        } => delete::delete_command(&client, resource_type, &name).await?,
        Commands::Token { command } => match command {
            TokenCommands::Create { file } => token::create_command(&client, &file).await?,
            TokenCommands::Lookup { token } => token::lookup_command(&client, &token).await?,
        },
    }

    if cli.metrics {
        print!("{}", metrics::gather_metrics()?);
    }

    Ok(())
}

/// Read a YAML (or JSON) document from `path`
pub(crate) fn read_document<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
