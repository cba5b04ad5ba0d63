use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Highest 1-based column number a worksheet can hold (XFD)
pub const MAX_COLUMN: u32 = 16_384;

/// datestarts - year/quarter/month/week start columns for spreadsheets
#[derive(Parser)]
#[command(name = "datestarts")]
#[command(author, version, about = "Insert date start columns next to a date column", long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./datestarts.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Insert and fill the four date start columns
    Fill(FillArgs),

    /// Print the start dates for individual dates or serial numbers
    Buckets(BucketsArgs),
}

/// Arguments for the `fill` subcommand
#[derive(clap::Args)]
pub struct FillArgs {
    /// Spreadsheet to read (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the result (defaults to overwriting INPUT)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub target: ColumnTarget,

    /// Worksheet to use (defaults to the first one)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Override the serial day zero from the config
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub epoch: Option<NaiveDate>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// The date column, by position or by header
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct ColumnTarget {
    /// 1-based number of the date column
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_COLUMN as i64))]
    pub column: Option<u32>,

    /// Text of the date column's header (first row)
    #[arg(long)]
    pub header: Option<String>,
}

/// Arguments for the `buckets` subcommand
#[derive(clap::Args)]
pub struct BucketsArgs {
    /// ISO dates (YYYY-MM-DD) or serial day numbers
    #[arg(value_name = "DATE", required = true, allow_negative_numbers = true)]
    pub dates: Vec<String>,

    /// Override the serial day zero from the config
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub epoch: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
