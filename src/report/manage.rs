//! Device management results.
//!
//! Faulty/replace operations target one host and print a one-line outcome.
//! LED operations may span many hosts and list the affected devices.

use super::RenderedReport;
use super::errors::format_response_errors;
use super::smd::format_smd_info_map;
use crate::aggregate::Aggregated;
use crate::config::PrintConfig;
use crate::error::{ReportError, ReportResult};
use std::fmt;
use std::str::FromStr;

/// Device management operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmdManageOp {
    SetFaulty,
    DevReplace,
    LedCheck,
    LedBlink,
    LedReset,
}

impl SmdManageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmdManageOp::SetFaulty => "set-faulty",
            SmdManageOp::DevReplace => "dev-replace",
            SmdManageOp::LedCheck => "led-check",
            SmdManageOp::LedBlink => "led-blink",
            SmdManageOp::LedReset => "led-reset",
        }
    }

    /// Operations that must resolve to exactly one host
    pub fn is_single_host(&self) -> bool {
        matches!(self, SmdManageOp::SetFaulty | SmdManageOp::DevReplace)
    }
}

impl fmt::Display for SmdManageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmdManageOp {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set-faulty" => Ok(SmdManageOp::SetFaulty),
            "dev-replace" => Ok(SmdManageOp::DevReplace),
            "led-check" => Ok(SmdManageOp::LedCheck),
            "led-blink" => Ok(SmdManageOp::LedBlink),
            "led-reset" => Ok(SmdManageOp::LedReset),
            other => Err(ReportError::UnsupportedOpcode(other.to_string())),
        }
    }
}

/// Render the outcome of a management operation.
///
/// Failures go to the error stream; device listings and success notices go
/// to the output stream.
pub fn format_smd_manage_resp(
    op: SmdManageOp,
    aggregated: &Aggregated,
    config: &PrintConfig,
) -> ReportResult<RenderedReport> {
    if !op.is_single_host() {
        let devices = PrintConfig { devices_only: true, pools_only: false, ..*config };
        return Ok(RenderedReport {
            out: format_smd_info_map(&aggregated.groups, &devices),
            err: format_response_errors(&aggregated.errors),
        });
    }

    match aggregated.host_count() {
        0 => return Ok(RenderedReport::default()),
        1 => {}
        n => return Err(ReportError::UnexpectedResults(n)),
    }

    let mut report = RenderedReport::default();
    if !aggregated.errors.is_empty() {
        for row in aggregated.errors.rows() {
            report.err.push_str(&format!("{} operation failed on {}: {}\n", op, row.hosts, row.error));
        }
        return Ok(report);
    }

    if let Some(group) = aggregated.groups.first() {
        report.out = format!("{} operation performed successfully on the following host: {}\n", op, group.hosts);
    }
    Ok(report)
}
