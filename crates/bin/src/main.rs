//! Lisbon CLI binary.
//!
//! Builds the portfolio report of a policy from the base and returns sheet
//! exports.

mod config;
mod integration;
mod logging;

use clap::{Parser, Subcommand};
use config::ReportConfig;
use integration::pipeline::{ReportRequest, load_base_sheet, run_report};
use lisbon::Locale;
use lisbon_output::ExportFormat;
use logging::{LoggingConfig, init_logging};
use std::path::PathBuf;
use std::process;

/// Default output file name, without extension.
const DEFAULT_OUTPUT_STEM: &str = "relatorio_investimentos";

#[derive(Debug, Parser)]
#[command(name = "lisbon")]
#[command(about = "Lisbon: portfolio performance reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Configuration file (defaults to <config dir>/lisbon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the policies of the base sheet
    Policies {
        /// Base sheet CSV export
        #[arg(long)]
        base: PathBuf,
    },

    /// Build the report of a policy
    Report {
        /// Base sheet CSV export
        #[arg(long)]
        base: PathBuf,

        /// Returns sheet CSV export
        #[arg(long)]
        returns: PathBuf,

        /// Policy number (defaults to the first policy of the base sheet)
        #[arg(long)]
        policy: Option<String>,

        /// Output file (defaults to relatorio_investimentos.<format>)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format (pdf or json)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Keep the chart images in this directory
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Number of assets in the best and worst performer charts
        #[arg(long)]
        top_n: Option<usize>,

        /// Report language (pt or en)
        #[arg(long)]
        locale: Option<Locale>,

        /// Report title, followed by the evaluation month
        #[arg(long)]
        title: Option<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env(cli.verbose))?;
    let mut config = ReportConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Policies { base } => {
            let base = load_base_sheet(&base, &config.columns)?;
            for policy_id in base.policy_ids() {
                println!("{policy_id}");
            }
        }
        Commands::Report {
            base,
            returns,
            policy,
            output,
            format,
            images_dir,
            top_n,
            locale,
            title,
        } => {
            if let Some(format) = format {
                config.format = format;
            }
            if let Some(top_n) = top_n {
                config.top_n = top_n;
            }
            if let Some(locale) = locale {
                config.locale = locale;
            }
            if let Some(title) = title {
                config.title = title;
            }
            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{}", config.format.extension()))
            });

            let summary = run_report(&ReportRequest {
                base,
                returns,
                policy,
                output,
                images_dir,
                config,
            })?;
            println!(
                "Policy {}: {} chart(s) on {} page(s) written to {}",
                summary.policy_id,
                summary.charts,
                summary.pages,
                summary.output.display()
            );
        }
    }

    Ok(())
}
