use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "commission-report", version, about = "Progressive sales commission reports from settled sales exports")]
pub struct Cli {
    /// TOML configuration with the commission schedule and roster (default: commission.toml)
    #[arg(long, env = "COMMISSION_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level written to stderr: error, warn, info, debug, trace
    #[arg(long, env = "COMMISSION_LOG", default_value = "error", global = true)]
    pub log_level: String,

    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Commission per sales representative with a grand total
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// First settlement date to include (YYYY-MM-DD), requires --end-date
        #[arg(long)]
        start_date: Option<String>,

        /// Last settlement date to include (YYYY-MM-DD), requires --start-date
        #[arg(long)]
        end_date: Option<String>,

        /// Gregorian settlement year, ignored when a valid date range is given
        #[arg(long)]
        year: Option<String>,

        /// Restrict to one sales representative, by code or `code,name`
        #[arg(long)]
        dimension: Option<String>,

        /// Ignore the configured roster and list only representatives with activity
        #[arg(long)]
        no_roster: bool
    },
    /// Distinct dimension values available for filtering
    Dimensions {
        #[command(flatten)]
        input: InputArgs
    },
    /// Distinct settlement years, newest first
    Years {
        #[command(flatten)]
        input: InputArgs
    },
    /// Tier breakdown of the commission schedule for the given quantities
    Formula {
        /// Quantities to break down (default: 500 1000 1500 2000 3000 5000 10000)
        #[arg(value_name = "QTY")]
        quantities: Vec<Decimal>
    }
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// CSV export of the sales-commission table
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// The export is already summed per dimension (BPC_DIMENSION5_,TotalQTY)
    #[arg(long)]
    pub pre_aggregated: bool
}
