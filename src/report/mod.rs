//! Report generation module - turns aggregated groups into text.
//!
//! This module handles:
//! - The error table shared by every report
//! - Storage scan, usage and format reports (terse and verbose)
//! - Device and pool queries and device management results
//! - JSON export
//!
//! Table and banner primitives live in the console_format module.
//!
//! # Module Organization
//!
//! - `types` - Capacity, count, percentage and duration formatting
//! - `errors` - The `Errors:` block
//! - `scan` - Storage scan summary and per-group detail
//! - `usage` - Space usage table
//! - `format` - Format results
//! - `smd` - Device and pool listings, health statistics
//! - `manage` - Device management outcomes
//! - `export` - JSON export

mod errors;
mod export;
mod format;
mod manage;
mod scan;
mod smd;
mod types;
mod usage;

#[cfg(test)]
mod fixtures;

pub use export::export_json_report;
pub use manage::SmdManageOp;

use crate::aggregate::Aggregated;
use crate::config::PrintConfig;
use crate::error::{ReportError, ReportResult};
use errors::format_response_errors;
use format::{format_storage_format_map, format_storage_format_map_verbose};
use manage::format_smd_manage_resp;
use scan::{format_host_storage_map, format_host_storage_map_verbose};
use smd::format_smd_info_map;
use usage::format_host_storage_usage_map;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Which report to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Scan,
    Usage,
    Format,
    Query,
    Manage,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Scan => "scan",
            ReportKind::Usage => "usage",
            ReportKind::Format => "format",
            ReportKind::Query => "query",
            ReportKind::Manage => "manage",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan" => Ok(ReportKind::Scan),
            "usage" => Ok(ReportKind::Usage),
            "format" => Ok(ReportKind::Format),
            "query" => Ok(ReportKind::Query),
            "manage" => Ok(ReportKind::Manage),
            other => Err(format!("unknown report kind '{}' (expected scan, usage, format, query or manage)", other)),
        }
    }
}

/// Rendered report text for the output and error streams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReport {
    pub out: String,
    pub err: String,
}

/// Render one report.
///
/// The error block is rendered before the data block and never depends on
/// it. For management reports the errors belong to the error stream.
pub fn render_report(
    kind: ReportKind,
    op: Option<SmdManageOp>,
    aggregated: &Aggregated,
    config: &PrintConfig,
) -> ReportResult<RenderedReport> {
    debug!("rendering {} report for {} groups", kind, aggregated.groups.len());

    let errors = format_response_errors(&aggregated.errors);
    let body = match kind {
        ReportKind::Manage => {
            let op = op.ok_or_else(|| ReportError::UnsupportedOpcode(String::new()))?;
            return format_smd_manage_resp(op, aggregated, config);
        }
        ReportKind::Scan if config.verbose => format_host_storage_map_verbose(&aggregated.groups),
        ReportKind::Scan => format_host_storage_map(&aggregated.groups),
        ReportKind::Usage => format_host_storage_usage_map(&aggregated.groups),
        ReportKind::Format if config.verbose => format_storage_format_map_verbose(&aggregated.groups),
        ReportKind::Format => format_storage_format_map(&aggregated.groups),
        ReportKind::Query => format_smd_info_map(&aggregated.groups, config),
    };

    Ok(RenderedReport { out: errors + &body, err: String::new() })
}
