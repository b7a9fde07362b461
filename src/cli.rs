use crate::report::ReportKind;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "fleet-report")]
#[command(about = "Aggregate per-host storage results into compact hostlist reports")]
#[command(version)]
pub struct CliArgs {
    /// JSON batch of per-host results ("-" reads standard input)
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Report to render: scan, usage, format, query or manage
    #[arg(long, short = 'k', default_value = "scan")]
    pub kind: ReportKind,

    /// Print a detailed section per host group
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Only show device address and LED state in device listings
    #[arg(long)]
    pub led_only: bool,

    /// Query report: list devices only
    #[arg(long)]
    pub devices_only: bool,

    /// Query report: list pools only
    #[arg(long)]
    pub pools_only: bool,

    /// Management operation whose results are reported
    /// (set-faulty, dev-replace, led-check, led-blink, led-reset)
    #[arg(long, value_name = "OP")]
    pub op: Option<String>,

    /// Output aggregated groups as JSON
    #[arg(long)]
    pub json: bool,

    /// TOML file with a [report] table of default options
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.devices_only && self.pools_only {
            return Err("Cannot specify both --devices-only and --pools-only".to_string());
        }

        if self.op.is_some() && self.kind != ReportKind::Manage {
            return Err(format!("--op only applies to --kind manage (got --kind {})", self.kind));
        }

        if let Some(ref config) = self.config {
            if !config.exists() {
                return Err(format!("Config file not found: {}", config.display()));
            }
        }

        if !self.reads_stdin() && !self.input.exists() {
            return Err(format!("Input file not found: {}", self.input.display()));
        }

        Ok(())
    }

    /// True when the batch comes from standard input
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new("-")
    }
}
