use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::sync::Arc;

use report_core::{
    Config, HttpRawDataClient, JsonlReportStore, ReportAggregator, SourceEndpoint, SourceKind,
    WeatherReport,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-report", version, about = "Zip-code weather report aggregator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the upstream observation service endpoints.
    Configure,

    /// Build and persist a weather report for a zip code.
    Build {
        /// Zip code to aggregate observations for.
        zip: String,

        /// Trailing window in days.
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u16).range(1..=30))]
        days: u16,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Build { zip, days } => build(&zip, days).await,
        }
    }
}

fn configure() -> Result<()> {
    let precipitation = prompt_endpoint("precipitation", 5071)?;
    let temperature = prompt_endpoint("temperature", 5072)?;

    let config = Config { precipitation, temperature, report_path: None };
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_endpoint(name: &str, default_port: u16) -> Result<SourceEndpoint> {
    let protocol = Text::new(&format!("{name} service protocol:"))
        .with_default("http")
        .prompt()?;
    let host = Text::new(&format!("{name} service host:"))
        .with_default("localhost")
        .prompt()?;
    let port = CustomType::<u16>::new(&format!("{name} service port:"))
        .with_default(default_port)
        .prompt()?;

    Ok(SourceEndpoint { protocol, host, port })
}

async fn build(zip: &str, days: u16) -> Result<()> {
    let config = Config::load()?;

    let precipitation =
        HttpRawDataClient::new(SourceKind::Precipitation, config.precipitation.clone())
            .context("Failed to build precipitation client")?;
    let temperature = HttpRawDataClient::new(SourceKind::Temperature, config.temperature.clone())
        .context("Failed to build temperature client")?;
    let store = JsonlReportStore::new(config.report_store_path()?);

    let aggregator = ReportAggregator::new(
        Arc::new(precipitation),
        Arc::new(temperature),
        Arc::new(store),
    );

    let report = aggregator
        .build_report(zip, days)
        .await
        .with_context(|| format!("Failed to build weather report for zip {zip}"))?;

    print_report(&report, days);
    Ok(())
}

fn print_report(report: &WeatherReport, days: u16) {
    println!("Weather report for {} over the last {days} days", report.zip_code);
    if let Some(id) = report.id {
        println!("  id:            {id}");
    }
    println!(
        "  created on:    {}",
        report.created_on.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %Z")
    );
    println!("  rainfall:      {:.1} in", report.rainfall_total_inches);
    println!("  snow:          {:.1} in", report.snow_total_inches);
    println!("  average high:  {:.1} F", report.average_high_f);
    println!("  average low:   {:.1} F", report.average_low_f);
}
