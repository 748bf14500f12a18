use anyhow::{Context, bail};
use clap::{Parser, builder::NonEmptyStringValueParser};
use geoweather_core::{
    Config, LocationQuery, OperationResult, Pipeline, ServiceConfig, WeatherSummary,
};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "geoweather",
    version,
    about = "Current weather for a city, state and country",
    after_help = "Example: geoweather Austin TX US"
)]
pub struct Cli {
    /// City name, e.g. "London".
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub city: String,

    /// State code, e.g. "TX".
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub state: String,

    /// Country code, e.g. "US".
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub country: String,

    /// OpenWeather API key; overrides the environment and the config file.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Read settings from this TOML file instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log requests and stage results to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Exit status for an argument error: 0 for `--help`/`--version`, 1 otherwise.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

impl Cli {
    pub fn query(&self) -> LocationQuery {
        LocationQuery::new(&self.city, &self.state, &self.country)
    }

    /// Config file, then `OPENWEATHER_API_KEY` as read by `env`, then `--api-key`.
    fn service_config_with<F>(&self, env: F) -> anyhow::Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Config::load_from(path)?
            }
            None => Config::load()?,
        };

        cfg.apply_env_from(env);
        if let Some(key) = &self.api_key {
            cfg.set_api_key(key.clone());
        }

        cfg.resolve()
    }

    /// A pipeline failure is reported on stderr but is not an `Err`.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with(|key| std::env::var(key).ok(), &mut io::stdout(), &mut io::stderr())
            .await
    }

    async fn run_with<F, O, E>(self, env: F, out: &mut O, err: &mut E) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
        O: Write,
        E: Write,
    {
        let service = self.service_config_with(env)?;
        let pipeline = Pipeline::openweather(&service).context("Failed to set up HTTP client")?;

        let query = self.query();
        debug!(?query, "running lookup");

        render(&pipeline.run(&query).await, out, err)
    }
}

/// Summary to `out`, or the single error line to `err`.
fn render<O: Write, E: Write>(
    result: &OperationResult<WeatherSummary>,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<()> {
    match result {
        Ok(summary) => writeln!(out, "{summary}").context("Failed to write to stdout"),
        Err(e) => writeln!(err, "{e}").context("Failed to write to stderr"),
    }
}
