//! formdrop CLI: inspect the country table and check submissions offline.
//!
//! `check` reads SUBMISSION_CAPTION_ENABLED from the environment (or .env) like the server does.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use formdrop_cli::{build_submission, format_country_table, init_tracing, read_attachment, CheckReport};
use formdrop_core::{Config, CountryTable, SubmissionValidator};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "formdrop", about = "formdrop submission tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the countries accepted by the `country` field
    Countries {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Validate a submission built from local files
    Check {
        #[arg(long)]
        uploaded_by: String,
        /// ISO 3166-1 alpha-3 code
        #[arg(long)]
        country: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        caption: Option<String>,
        /// Path to an attachment; repeat for several files
        #[arg(long = "attachment")]
        attachments: Vec<PathBuf>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Countries { format } => {
            let options = CountryTable::global().list_options();
            match format {
                OutputFormat::Table => print!("{}", format_country_table(&options)),
                OutputFormat::Json => print_json(&options)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            uploaded_by,
            country,
            email,
            caption,
            attachments,
        } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            let validator = SubmissionValidator::new(CountryTable::global(), config.submission_schema());

            let files = attachments
                .iter()
                .map(|path| read_attachment(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let raw = build_submission(&uploaded_by, &country, &email, caption.as_deref(), files);

            let report = CheckReport::from(validator.validate(&raw));
            print_json(&report)?;
            Ok(if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
