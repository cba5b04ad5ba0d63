//! datestarts CLI
//!
//! Inserts year/quarter/month/week start columns next to a date column in
//! XLSX and CSV files, and prints date buckets for ad-hoc dates.

mod buckets_cmd;
mod cli;
mod config;
mod fill_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Fill(args) => fill_cmd::run(args, &config),
        Command::Buckets(args) => buckets_cmd::run(args, &config),
    }
}
