//! Optional TOML settings file.
//!
//! ```toml
//! bands_file = "uk_bands.csv"   # relative to this file; built-in schedule if absent
//! include_pension = true
//! include_parking_fee = true
//! log_level = "warn"
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pay_core::BreakdownOptions;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub bands_file: Option<PathBuf>,
    pub include_pension: bool,
    pub include_parking_fee: bool,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = BreakdownOptions::default();
        Self {
            bands_file: None,
            include_pension: options.include_pension,
            include_parking_fee: options.include_parking_fee,
            log_level: None,
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings")
    }

    /// Reads settings from `path`. A relative `bands_file` is resolved
    /// against the directory holding the settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        let mut settings = Self::from_toml(&contents)
            .with_context(|| format!("in settings file '{}'", path.display()))?;

        if let Some(dir) = path.parent() {
            settings.bands_file = settings.bands_file.take().map(|bands| {
                if bands.is_relative() {
                    dir.join(bands)
                } else {
                    bands
                }
            });
        }
        Ok(settings)
    }

    pub fn options(&self) -> BreakdownOptions {
        BreakdownOptions {
            include_pension: self.include_pension,
            include_parking_fee: self.include_parking_fee,
        }
    }
}
