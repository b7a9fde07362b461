/// Configuration resolution module
///
/// This module handles:
/// - Reading the optional `[report]` table of a TOML config file
/// - Merging it with command-line flags
/// - Rejecting contradictory option combinations
///
/// The result is an immutable `PrintConfig` handed to every renderer.
use crate::cli::CliArgs;
use crate::error::{ReportError, ReportResult};
use log::debug;
use std::fs;
use std::path::Path;

/// Options that shape report output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintConfig {
    /// Per-group sections instead of one summary row per group
    pub verbose: bool,
    /// Device listings show only address and LED state
    pub led_only: bool,
    /// Query reports omit pools
    pub devices_only: bool,
    /// Query reports omit devices
    pub pools_only: bool,
}

impl PrintConfig {
    pub fn shows_pools(&self) -> bool {
        !self.devices_only
    }

    pub fn shows_devices(&self) -> bool {
        !self.pools_only
    }

    fn validate(self) -> ReportResult<Self> {
        if self.devices_only && self.pools_only {
            return Err(ReportError::config("devices_only and pools_only cannot both be set"));
        }
        Ok(self)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    report: ReportSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ReportSection {
    verbose: bool,
    led_only: bool,
    devices_only: bool,
    pools_only: bool,
}

/// Parse the `[report]` table of a config file.
pub fn parse_config_file(contents: &str) -> ReportResult<PrintConfig> {
    let file: ConfigFile = toml::from_str(contents).map_err(ReportError::config)?;
    let section = file.report;
    Ok(PrintConfig {
        verbose: section.verbose,
        led_only: section.led_only,
        devices_only: section.devices_only,
        pools_only: section.pools_only,
    })
}

/// Load and parse a config file from disk.
pub fn load_config_file(path: &Path) -> ReportResult<PrintConfig> {
    debug!("Loading config file {:?}", path);
    let contents =
        fs::read_to_string(path).map_err(|e| ReportError::config(format!("{}: {}", path.display(), e)))?;
    parse_config_file(&contents)
}

/// Build the print configuration from CLI arguments.
///
/// Values from `--config` form the base; flags given on the command line are
/// switched on top of them.
pub fn build_print_config(args: &CliArgs) -> ReportResult<PrintConfig> {
    let base = match &args.config {
        Some(path) => load_config_file(path)?,
        None => PrintConfig::default(),
    };

    let config = PrintConfig {
        verbose: base.verbose || args.verbose,
        led_only: base.led_only || args.led_only,
        devices_only: base.devices_only || args.devices_only,
        pools_only: base.pools_only || args.pools_only,
    }
    .validate()?;

    debug!("Resolved print config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
