use anyhow::{anyhow, Result};
use datestarts_core::{Bucket, CellValue, DateBuckets, DateReader};

use crate::cli::{BucketsArgs, OutputFormat};
use crate::config::Config;

pub fn run(args: BucketsArgs, config: &Config) -> Result<()> {
    let options = config.fill_options(args.epoch);
    let reader = DateReader::new(options.epoch).zero_serial_is_blank(options.zero_serial_is_blank);

    let buckets = args
        .dates
        .iter()
        .map(|arg| resolve(&reader, arg))
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Text => print!("{}", table(&buckets)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&buckets)?),
    }
    Ok(())
}

/// Read an argument the way a cell would be read
fn resolve(reader: &DateReader, arg: &str) -> Result<DateBuckets> {
    let cell = match arg.trim().parse::<f64>() {
        Ok(serial) => CellValue::Number(serial),
        Err(_) => CellValue::text(arg),
    };
    let date = reader
        .read(&cell)?
        .ok_or_else(|| anyhow!("'{arg}' is not a date (YYYY-MM-DD) or a non-zero serial number"))?;
    Ok(DateBuckets::of(date))
}

fn table(rows: &[DateBuckets]) -> String {
    let mut out = format!("{:<12}", "date");
    for bucket in Bucket::ALL {
        out.push_str(&format!("{:<12}", bucket.as_str()));
    }
    out = out.trim_end().to_string();
    out.push('\n');

    for row in rows {
        let mut line = format!("{:<12}", row.date.to_string());
        for bucket in Bucket::ALL {
            line.push_str(&format!("{:<12}", row.get(bucket).to_string()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
