use anyhow::{Context, Result, anyhow, bail};
use citytools_core::{Config, ToolId, ToolResult, Toolbox, tool_descriptions};
use clap::{Parser, Subcommand};
use inquire::Text;
use std::path::PathBuf;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citytools", version, about = "Weather and local time for a city")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the upstream endpoints and request timeout.
    Configure,

    /// Show the current weather in a city.
    Weather {
        /// City name, e.g. "Paris".
        city: String,

        /// Print the raw tool result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the current local time in a city.
    Time {
        /// City name, e.g. "Tokyo".
        city: String,

        /// Print the raw tool result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Invoke a tool by name with JSON arguments, as an agent harness would.
    Call {
        /// Tool name: "get_weather" or "get_current_time".
        tool: String,

        /// JSON object of arguments, e.g. '{"city": "Paris"}'.
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Print the tool descriptions for registering with an agent.
    Tools,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Command::Configure => configure(config, self.config)?,
            Command::Weather { city, json } => {
                let toolbox = Toolbox::from_config(&config)?;
                print_result(toolbox.run(ToolId::GetWeather, &city).await, json)?;
            }
            Command::Time { city, json } => {
                let toolbox = Toolbox::from_config(&config)?;
                print_result(toolbox.run(ToolId::GetCurrentTime, &city).await, json)?;
            }
            Command::Call { tool, args } => {
                let args: serde_json::Value = serde_json::from_str(&args)
                    .with_context(|| format!("Tool arguments are not valid JSON: {args}"))?;
                let toolbox = Toolbox::from_config(&config)?;
                print_result(toolbox.call(&tool, &args).await, true)?;
            }
            Command::Tools => {
                println!("{}", serde_json::to_string_pretty(&tool_descriptions())?);
            }
        }

        Ok(())
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

fn print_result(result: ToolResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        ToolResult::Success { report } => {
            println!("{report}");
            Ok(())
        }
        ToolResult::Error { message } => bail!(message),
    }
}

fn configure(mut config: Config, path: Option<PathBuf>) -> Result<()> {
    config.geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()?;

    config.forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_url)
        .prompt()?;

    let current_timeout = config.timeout_secs.map(|s| s.to_string()).unwrap_or_default();
    let timeout = Text::new("Request timeout in seconds (empty for the client default):")
        .with_initial_value(&current_timeout)
        .prompt()?;
    config.timeout_secs = parse_timeout(&timeout)?;

    let saved_to = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };
    println!("Configuration saved to {}", saved_to.display());

    Ok(())
}

fn parse_timeout(input: &str) -> Result<Option<u64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<u64>() {
        Ok(0) | Err(_) => Err(anyhow!(
            "Timeout must be a positive whole number of seconds, got '{trimmed}'"
        )),
        Ok(secs) => Ok(Some(secs)),
    }
}
