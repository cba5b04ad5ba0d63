use anyhow::{bail, Context, Result};
use datestarts_core::{insert_date_starts, FillReport, MemorySheet, Selection};
use datestarts_sheets::{load_sheet, save_sheet};
use tracing::info;

use crate::cli::{ColumnTarget, FillArgs, OutputFormat};
use crate::config::Config;

pub fn run(args: FillArgs, config: &Config) -> Result<()> {
    let options = config.fill_options(args.epoch);

    let mut sheet = load_sheet(&args.input, args.sheet.as_deref())
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    info!(input = %args.input.display(), worksheet = sheet.name(), "loaded sheet");

    let selection = select(&sheet, &args.target)?;
    let report = insert_date_starts(&mut sheet, &selection, &options)?;

    let output = args.output.as_ref().unwrap_or(&args.input);
    save_sheet(&sheet, output, options.epoch)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(output = %output.display(), rows = report.rows_filled(), "saved sheet");

    match args.format {
        OutputFormat::Text => println!("{}", summary(&report, sheet.name(), &output.display().to_string())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Resolve the date column from the command line
fn select(sheet: &MemorySheet, target: &ColumnTarget) -> Result<Selection> {
    match (&target.column, &target.header) {
        (Some(column), _) => Ok(Selection::cell(column - 1)),
        (None, Some(header)) => match sheet.find_header(header) {
            Some(column) => Ok(Selection::cell(column)),
            None => bail!("No column with header '{}' in worksheet '{}'", header, sheet.name()),
        },
        (None, None) => bail!("No date column selected"),
    }
}

fn summary(report: &FillReport, worksheet: &str, output: &str) -> String {
    let rows = match report.rows_filled() {
        1 => "1 row".to_string(),
        n => format!("{n} rows"),
    };
    format!(
        "Filled {} in '{}': date start columns {}-{}, dates in column {} -> {}",
        rows,
        worksheet,
        report.target_column + 1,
        report.target_column + 4,
        report.date_column + 1,
        output,
    )
}
