use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use datestarts_core::{BucketHeaders, Epoch, FillOptions};
use serde::Deserialize;
use tracing::debug;

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG: &str = "datestarts.toml";

/// Top-level datestarts configuration.
///
/// ```toml
/// epoch = "1899-12-30"
/// zero_serial_is_blank = true
///
/// [headers]
/// year = "Year Start"
/// week = "Week Start"
/// ```
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Serial day zero.
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,

    /// Read a numeric 0 as a blank cell rather than the epoch date.
    #[serde(default = "default_true")]
    pub zero_serial_is_blank: bool,

    /// Header text of the inserted columns.
    #[serde(default)]
    pub headers: BucketHeaders,
}

fn default_epoch() -> NaiveDate {
    Epoch::spreadsheet().origin()
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            zero_serial_is_blank: true,
            headers: BucketHeaders::default(),
        }
    }
}

impl Config {
    /// Load the config from `path`, or from `datestarts.toml` if it exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG);
                if !fallback.is_file() {
                    debug!("no {DEFAULT_CONFIG}, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Fill settings, with an optional epoch override from the command line
    pub fn fill_options(&self, epoch: Option<NaiveDate>) -> FillOptions {
        FillOptions::new()
            .epoch(Epoch::new(epoch.unwrap_or(self.epoch)))
            .zero_serial_is_blank(self.zero_serial_is_blank)
            .headers(self.headers.clone())
    }
}
