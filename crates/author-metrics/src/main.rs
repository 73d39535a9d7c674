//! Author Metrics - Entry Point
//!
//! Serves the HTTP API, or prints one author's report from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use author_metrics::config::{Config, defaults, parse_years};
use author_metrics::models::{GenerateAnalysisRequest, ResponseFormat};
use author_metrics::server::AuthorMetricsServer;
use author_metrics::{DatasetLoader, analysis, formatters};

#[derive(Parser, Debug)]
#[command(name = "author-metrics")]
#[command(about = "Lookup and report service over yearly author metrics tables")]
#[command(version)]
struct Cli {
    /// Directory containing the yearly tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// File name template, {year} is replaced by the dataset year
    #[arg(long, global = true)]
    file_template: Option<String>,

    /// Comma separated years to load (default: 2020-2023)
    #[arg(long, global = true)]
    years: Option<String>,

    /// Start even if some years fail to load
    #[arg(long, global = true)]
    allow_partial: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// HTTP server port
        #[arg(long, default_value_t = defaults::PORT, env = "PORT")]
        port: u16,
    },
    /// Print the analysis report for one author
    Report {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Country name or code
        #[arg(long)]
        country: String,

        /// Institution, to separate namesakes
        #[arg(long)]
        institution: Option<String>,

        /// Years to report (default: all loaded years)
        #[arg(long, value_delimiter = ',')]
        report_years: Vec<u16>,

        /// Output format
        #[arg(long, default_value = "markdown")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human readable Markdown
    #[default]
    Markdown,
    /// Pretty printed JSON
    Json,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr)).init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(template) = &cli.file_template {
        config.file_template.clone_from(template);
    }
    if let Some(years) = &cli.years {
        config.years = parse_years(years)?;
    }
    if cli.allow_partial {
        config.allow_partial_load = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = build_config(&cli)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        years = ?config.years,
        "Starting author metrics"
    );

    let loader = DatasetLoader::new(config.clone());
    let store = loader.load().await.context("failed to load datasets")?;

    match cli.command {
        Command::Serve { port } => {
            let server = AuthorMetricsServer::new(store, &config);
            server.run_http(port).await?;
        }
        Command::Report { first_name, last_name, country, institution, report_years, format } => {
            let request = GenerateAnalysisRequest {
                first_name,
                last_name,
                cntry: country,
                inst_name: institution,
                years: Some(report_years),
                response_format: match format {
                    OutputFormat::Markdown => ResponseFormat::Markdown,
                    OutputFormat::Json => ResponseFormat::Json,
                },
            };

            let report = match analysis::generate_analysis(&store, &request) {
                Ok(report) => report,
                Err(e) => {
                    let detail = formatters::error_detail(&e);
                    eprintln!("{}", serde_json::to_string_pretty(&detail)?);
                    anyhow::bail!(e.to_user_message());
                }
            };

            match request.response_format {
                ResponseFormat::Markdown => print!("{}", formatters::format_report_markdown(&report)),
                ResponseFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }

    Ok(())
}
