use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use quake_core::{Config, FetchError, pipeline_from_config};

use crate::{configure, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "quake", version, about = "Recent earthquakes from the USGS feed")]
pub struct Cli {
    /// Log request and parse details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and list recent earthquakes.
    List {
        /// Minimum magnitude; overrides the saved setting.
        #[arg(long = "min-mag")]
        min_magnitude: Option<String>,

        /// Maximum number of events; overrides the saved setting.
        #[arg(long)]
        limit: Option<String>,

        /// Sort order, e.g. "time" or "magnitude"; overrides the saved setting.
        #[arg(long)]
        order_by: Option<String>,

        /// Show dates and times in UTC.
        #[arg(long)]
        utc: bool,

        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactively edit the saved query settings.
    Configure,

    /// Print the location of the settings file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::List { min_magnitude, limit, order_by, utc, json } => {
                let mut config = Config::load()?;
                if let Some(value) = min_magnitude {
                    config.min_magnitude = value;
                }
                if let Some(value) = limit {
                    config.limit = value;
                }
                if let Some(value) = order_by {
                    config.order_by = value;
                }
                if utc {
                    config.use_utc = true;
                }

                list(&config, json).await
            }
            Command::Configure => {
                let config = Config::load()?;
                let updated = configure::prompt(config)?;
                updated.save()?;
                println!("Saved settings to {}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn list(config: &Config, json: bool) -> anyhow::Result<()> {
    let pipeline = pipeline_from_config(config)?;
    tracing::debug!(endpoint = pipeline.endpoint(), "fetching earthquakes");
    let outcome = pipeline
        .spawn(config.query())
        .await
        .context("Earthquake fetch task did not complete")?;

    if let Some(err) = outcome.failure {
        return Err(describe_failure(&err));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.records)?);
        return Ok(());
    }

    if outcome.records.is_empty() {
        println!("No earthquakes found.");
        return Ok(());
    }

    for record in &outcome.records {
        println!("{}", render::line(record));
    }

    Ok(())
}

fn describe_failure(err: &FetchError) -> anyhow::Error {
    match err {
        FetchError::Network(_) => anyhow!("No internet connection.\n({err})"),
        FetchError::Timeout => {
            anyhow!("No internet connection: the earthquake service did not answer in time.")
        }
        FetchError::MalformedEndpoint { .. } => {
            anyhow!("{err}\nHint: check `endpoint` in the file shown by `quake config-path`.")
        }
        FetchError::HttpStatus { .. } | FetchError::Parse(_) => anyhow!("{err}"),
    }
}
