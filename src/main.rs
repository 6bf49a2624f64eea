use std::path::PathBuf;
use std::process::ExitCode;

use agriweather::config::AgriWeatherConfig;
use agriweather::telemetry::init_tracing;
use agriweather::{AgriWeatherError, WeatherPipeline};
use anyhow::{Context, Result};
use clap::Parser;

/// Weather-driven farming advice for agricultural planning
#[derive(Debug, Parser)]
#[command(name = "agriweather", version, about)]
struct Cli {
    /// City, district or region to report on
    location: String,

    /// Path to a TOML config file
    #[arg(short, long, env = "AGRIWEATHER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AgriWeatherConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose)?;

    let pipeline = WeatherPipeline::from_config(&config)?;

    let report = match pipeline.get_weather_report(&cli.location).await {
        Ok(report) => report,
        Err(e @ AgriWeatherError::InvalidInput { .. }) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(warning) = &report.warning {
        eprintln!("⚠️  {warning}");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(ExitCode::SUCCESS)
}
