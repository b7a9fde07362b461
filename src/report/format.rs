//! Storage format result reports.

use crate::aggregate::HostGroup;
use crate::console_format::{ReportTable, format_title_banner};
use crate::types::HostStorage;

/// Count of formatted SCM mounts and NVMe controllers per group
pub fn format_storage_format_map(groups: &[HostGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut table = ReportTable::new(&["Hosts", "SCM Devices", "NVMe Devices"]);
    for group in groups {
        table.add_row(vec![
            group.hosts.to_string(),
            group.storage.scm_mount_points.len().to_string(),
            group.storage.formatted_nvme().count().to_string(),
        ]);
    }
    format!("Format Summary:\n{}", table.format(2))
}

/// Per-group result of every mount and controller format
pub fn format_storage_format_map_verbose(groups: &[HostGroup]) -> String {
    let mut output = String::new();
    for group in groups {
        output.push_str(&format_title_banner(&group.hosts.to_string()));
        output.push_str(&format_scm_results(&group.storage));
        output.push('\n');
        output.push_str(&format_nvme_results(&group.storage));
        output.push('\n');
    }
    output
}

fn format_scm_results(storage: &HostStorage) -> String {
    if storage.scm_mount_points.is_empty() {
        return "  No SCM mount points were formatted\n".to_string();
    }

    let mut table = ReportTable::new(&["SCM Mount", "Format Result"]);
    for mount in &storage.scm_mount_points {
        table.add_row(vec![mount.path.clone(), mount.info.clone()]);
    }
    table.format(0)
}

fn format_nvme_results(storage: &HostStorage) -> String {
    let mut table = ReportTable::new(&["NVMe PCI", "Format Result", "Role(s)"]);
    for ctrlr in storage.formatted_nvme() {
        table.add_row(vec![ctrlr.pci_addr.clone(), ctrlr.info.clone(), ctrlr.roles().to_string()]);
    }

    if table.is_empty() {
        return "  No NVMe devices were formatted\n".to_string();
    }
    table.format(0)
}
