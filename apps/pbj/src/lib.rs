//! PBJ CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use provider::ProviderKind;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
pub use {config::Config, manage::KeyCmd, send::SendCmd};

pub mod config;
pub mod manage;
mod send;
pub mod utils;

/// Prompt Builder Jam: send one prompt to many LLM providers at once.
#[derive(Debug, Parser)]
#[command(name = "pbj", version, about)]
pub struct App {
    /// Path to the configuration file (defaults to ~/.config/pbj.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a prompt to the enabled providers
    Send(SendCmd),

    /// List configured providers
    List,

    /// Enable providers
    Enable {
        /// Provider names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Disable providers
    Disable {
        /// Provider names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Set or clear a provider's API key
    Key(KeyCmd),

    /// Generate the configuration file
    Generate(GenerateCmd),
}

/// Generate command arguments
#[derive(Debug, Args)]
pub struct GenerateCmd {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "pbj=debug,pbj_provider=debug",
                2 => "pbj=trace,pbj_provider=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Resolve the configuration file path.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    /// Run the selected command.
    pub async fn run(&self) -> Result<()> {
        let path = self.config_path()?;
        match &self.command {
            Command::Send(cmd) => cmd.run(&Config::load(&path)?).await,
            Command::List => {
                list(&Config::load(&path)?);
                Ok(())
            }
            Command::Enable { names } => manage::edit(&path, |store| {
                names
                    .iter()
                    .try_for_each(|name| manage::set_enabled(store, name, true))
            }),
            Command::Disable { names } => manage::edit(&path, |store| {
                names
                    .iter()
                    .try_for_each(|name| manage::set_enabled(store, name, false))
            }),
            Command::Key(cmd) => cmd.run(&path),
            Command::Generate(cmd) => {
                if path.exists() && !cmd.force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                Config::default().save(&path)
            }
        }
    }
}

fn list(config: &Config) {
    let store = config.store();
    if store.is_empty() {
        println!("no providers configured");
        return;
    }
    for entry in store.list() {
        let state = if entry.enabled { "enabled" } else { "disabled" };
        let access = match entry.kind {
            ProviderKind::RemoteApi => manage::mask_key(entry.api_key.as_deref()),
            ProviderKind::LocalHttp => entry.endpoint.unwrap_or_else(|| "No endpoint".into()),
        };
        println!(
            "{:<12} {:<10} {:<20} {:<8} {access}",
            entry.name,
            entry.kind.as_str(),
            entry.model,
            state
        );
    }
}
