//! Send command

use super::Config;
use anyhow::{Context, Result, bail};
use clap::Args;
use provider::{DispatchContext, DispatchResult, Dispatcher, Error};
use std::{io::Read, path::PathBuf};

/// Send command arguments
#[derive(Debug, Args)]
pub struct SendCmd {
    /// The prompt to send (read from --file or stdin when omitted)
    pub prompt: Option<String>,

    /// Read the prompt from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    /// Send only to these enabled providers (repeatable)
    #[arg(short, long = "provider")]
    pub providers: Vec<String>,

    /// Print the results as a JSON object
    #[arg(long)]
    pub json: bool,
}

impl SendCmd {
    /// Run the send command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let prompt = self.read_prompt()?;
        let ctx = self.context(config, prompt)?;

        let result = match Dispatcher::default().dispatch(&ctx).await {
            Err(Error::NoTargets) => {
                bail!("no providers enabled; run `pbj enable <name>` first")
            }
            result => result?,
        };
        tracing::info!(
            "{} of {} provider(s) replied",
            result.completed(),
            result.len()
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result.texts())?);
        } else {
            print_result(&result);
        }
        Ok(())
    }

    /// The dispatch context for this invocation.
    pub fn context(&self, config: &Config, prompt: String) -> Result<DispatchContext> {
        let store = config.store();
        if self.providers.is_empty() {
            return Ok(store.context(prompt));
        }

        let (found, missing) = store.select(self.providers.iter().map(String::as_str));
        if !missing.is_empty() {
            bail!("unknown provider(s): {}", missing.join(", "));
        }
        let disabled = found
            .iter()
            .filter(|config| !config.enabled)
            .map(|config| config.name.as_str())
            .collect::<Vec<_>>();
        if !disabled.is_empty() {
            bail!(
                "provider(s) disabled: {0}; run `pbj enable {0}` first",
                disabled.join(" ")
            );
        }
        Ok(DispatchContext::new(prompt, found))
    }

    fn read_prompt(&self) -> Result<String> {
        let prompt = match (&self.prompt, &self.file) {
            (Some(prompt), _) => prompt.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read prompt from stdin")?;
                input
            }
        };

        if prompt.trim().is_empty() {
            bail!("prompt is empty");
        }
        Ok(prompt)
    }
}

fn print_result(result: &DispatchResult) {
    for (name, outcome) in result.iter() {
        println!("== {name} ==");
        println!("{outcome}");
        println!();
    }
}
