//! Generates a CRM dataset and writes it as CSV.
//!
//! Run with:
//! ```
//! cargo run -p crm-gen --bin crm-gen -- --profile manufacturer --accounts 250
//! ```

use std::path::PathBuf;

use clap::Parser;
use time::Date;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

use crm_gen::builders::DatasetBuilder;
use crm_gen::config::{DateWindow, GenerationConfig};
use crm_gen::export::CsvExporter;
use crm_gen::profiles::{Profile, ProfileRegistry};
use crm_gen::summary::DatasetSummary;

/// Years of history used when only `--as-of` is given.
const DEFAULT_YEARS: u8 = 3;

#[derive(Parser)]
#[command(name = "crm-gen", version, about = "Generate a synthetic CRM dataset")]
struct Cli {
    /// Built-in profile, by slug or display name.
    #[arg(short, long, conflicts_with = "profile_file")]
    profile: Option<String>,

    /// Custom profile loaded from a JSON file.
    #[arg(long)]
    profile_file: Option<PathBuf>,

    /// Number of accounts.
    #[arg(short, long)]
    accounts: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Years of history ending at the as-of date (1 to 10).
    #[arg(long)]
    years: Option<u8>,

    /// Synthetic "today", as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    as_of: Option<Date>,

    /// JSON config file. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the CSV files are written to.
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// Print the built-in profiles and exit.
    #[arg(long)]
    list_profiles: bool,
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list_profiles {
        for profile in ProfileRegistry::builtin().iter() {
            println!("{:<14} {} - {}", profile.slug, profile.name, profile.description);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }
    if let Some(accounts) = cli.accounts {
        config.account_count = accounts;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.years.is_some() || cli.as_of.is_some() {
        let as_of = cli.as_of.unwrap_or(config.window.as_of);
        config.window = DateWindow::trailing_years(as_of, cli.years.unwrap_or(DEFAULT_YEARS))?;
    }

    let mut builder = DatasetBuilder::from_config(&config).with_metrics(true);
    if let Some(path) = &cli.profile_file {
        builder = builder.with_custom_profile(Profile::from_json_file(path)?);
        tracing::info!(path = %path.display(), "Loaded custom profile");
    }

    let dataset = builder.build()?;
    DatasetSummary::from_dataset(&dataset).log();
    if let Some(metrics) = &dataset.metrics {
        tracing::info!(
            generation_ms = metrics.generation_time_ms,
            verification_ms = metrics.verification_time_ms,
            "Timing"
        );
    }

    let paths = CsvExporter::new(&dataset).write_to_dir(&cli.out_dir)?;
    for path in paths {
        tracing::info!("  Wrote {}", path.display());
    }

    Ok(())
}
