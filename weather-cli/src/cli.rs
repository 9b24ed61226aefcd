use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::Config;

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Search a place and show its weather")]
pub struct Cli {
    /// Log verbosity: -v for info, -vv for debug. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AccuWeather API key.
    Configure {
        /// Key to store; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Interactive place search and weather display (the default).
    Run,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Configure { api_key } => configure(api_key),
            Command::Run => {
                let config = Config::load()?;
                app::run(config).await
            }
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    // Stored values only, so an env override is never written to disk.
    let mut config = Config::load_stored()?;

    let key = match api_key {
        Some(key) => key,
        None => Password::new("AccuWeather API key:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn configure_accepts_key_flag() {
        let cli = Cli::try_parse_from(["weather", "-vv", "configure", "--api-key", "K"]).unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Configure { api_key: Some(ref k) }) if k == "K"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
