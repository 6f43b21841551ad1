mod aggregation;
mod cli;
mod commission;
mod config;
mod engine;
mod models;
mod report;
mod source;
mod types;

use std::io::{stderr, stdout, BufWriter};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::cli::{Cli, Command, InputArgs, OutputFormat};
use crate::config::AppConfig;
use crate::engine::{ReportEngine, ReportQuery};
use crate::report::{
    write_breakdowns_csv, write_dimensions_csv, write_json, write_report_csv, write_years_csv,
    DimensionEntry, YearEntry
};
use crate::source::{CsvRecordSource, RecordLayout};

const FORMULA_EXAMPLES: [i64; 7] = [500, 1000, 1500, 2000, 3000, 5000, 10000];

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Command::Report { input, start_date, end_date, year, dimension, no_roster } => {
            let roster = if no_roster { Vec::new() } else { config.roster.clone() };
            let engine = build_engine(&input, &config).with_roster(roster);
            let query = ReportQuery { start_date, end_date, year, dimension };

            let report = engine.report(&query).await?;
            let output = BufWriter::new(stdout().lock());

            match format {
                OutputFormat::Csv => write_report_csv(&report, output)?,
                OutputFormat::Json => write_json(&report, output)?
            }
        },
        Command::Dimensions { input } => {
            let engine = build_engine(&input, &config).with_roster(config.roster.clone());
            let dimensions: Vec<DimensionEntry> = engine.dimensions().await?
                .into_iter()
                .map(|dimension_key| DimensionEntry { dimension_key })
                .collect();
            let output = BufWriter::new(stdout().lock());

            match format {
                OutputFormat::Csv => write_dimensions_csv(&dimensions, output)?,
                OutputFormat::Json => write_json(&dimensions, output)?
            }
        },
        Command::Years { input } => {
            let engine = build_engine(&input, &config);
            let years: Vec<YearEntry> = engine.years().await?
                .into_iter()
                .map(YearEntry::new)
                .collect();
            let output = BufWriter::new(stdout().lock());

            match format {
                OutputFormat::Csv => write_years_csv(&years, output)?,
                OutputFormat::Json => write_json(&years, output)?
            }
        },
        Command::Formula { quantities } => {
            let quantities = if quantities.is_empty() {
                FORMULA_EXAMPLES.iter().map(|quantity| Decimal::from(*quantity)).collect()
            } else {
                quantities
            };

            let breakdowns = quantities.into_iter()
                .map(|quantity| config.commission.breakdown(quantity))
                .collect::<Result<Vec<_>, _>>()?;
            let output = BufWriter::new(stdout().lock());

            match format {
                OutputFormat::Csv => write_breakdowns_csv(&breakdowns, output)?,
                OutputFormat::Json => write_json(&breakdowns, output)?
            }
        }
    }

    Ok(())
}

fn build_engine(input: &InputArgs, config: &AppConfig) -> ReportEngine<CsvRecordSource> {
    let layout = if input.pre_aggregated { RecordLayout::Grouped } else { RecordLayout::Raw };
    let source = Arc::new(CsvRecordSource::new(&input.records).with_layout(layout));

    ReportEngine::new(source)
        .with_schedule(config.commission)
        .with_allowed_prefixes(config.dimensions.allowed_prefixes.clone())
        .with_fetch_timeout(config.source.fetch_timeout())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
