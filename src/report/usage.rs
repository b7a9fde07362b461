//! Storage usage report.

use super::types::{format_bytes, percent_used};
use crate::aggregate::HostGroup;
use crate::console_format::ReportTable;

/// Total, free and used space of mounted SCM and engine-owned NVMe, per group
pub fn format_host_storage_usage_map(groups: &[HostGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut table =
        ReportTable::new(&["Hosts", "SCM-Total", "SCM-Free", "SCM-Used", "NVMe-Total", "NVMe-Free", "NVMe-Used"]);
    for group in groups {
        let (scm_total, scm_avail) = group.storage.scm_usage();
        let (nvme_total, nvme_avail) = group.storage.nvme_usage();
        table.add_row(vec![
            group.hosts.to_string(),
            format_bytes(scm_total),
            format_bytes(scm_avail),
            percent_used(scm_total, scm_avail),
            format_bytes(nvme_total),
            format_bytes(nvme_avail),
            percent_used(nvme_total, nvme_avail),
        ]);
    }
    table.format(0)
}
