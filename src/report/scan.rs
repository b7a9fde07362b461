//! Storage scan reports.
//!
//! The terse form summarizes every group on one table row. The verbose form
//! prints a titled section per group listing each module, namespace and SSD.

use super::types::{format_bytes, format_ibytes, pluralize};
use crate::aggregate::HostGroup;
use crate::console_format::{ReportTable, format_title_banner};
use crate::types::HostStorage;

/// One row per group: hosts, SCM total and NVMe total
pub fn format_host_storage_map(groups: &[HostGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let mut table = ReportTable::new(&["Hosts", "SCM Total", "NVMe Total"]);
    for group in groups {
        table.add_row(vec![group.hosts.to_string(), scm_summary(&group.storage), nvme_summary(&group.storage)]);
    }
    table.format(0)
}

/// Namespaces take precedence over raw modules once they have been created
fn scm_summary(storage: &HostStorage) -> String {
    if !storage.scm_namespaces.is_empty() {
        format!(
            "{} ({})",
            format_bytes(storage.scm_namespace_capacity()),
            pluralize(storage.scm_namespaces.len(), "namespace")
        )
    } else {
        format!("{} ({})", format_ibytes(storage.scm_module_capacity()), pluralize(storage.scm_modules.len(), "module"))
    }
}

fn nvme_summary(storage: &HostStorage) -> String {
    format!("{} ({})", format_bytes(storage.nvme_capacity()), pluralize(storage.nvme_devices.len(), "controller"))
}

/// A titled section per group with every device listed
pub fn format_host_storage_map_verbose(groups: &[HostGroup]) -> String {
    let mut output = String::new();
    for group in groups {
        output.push_str(&format_title_banner(&group.hosts.to_string()));
        let storage = &group.storage;
        if let Some(mem) = &storage.mem_info {
            output.push_str(&format!("HugePage Size: {} KB\n\n", mem.hugepage_size_kb));
        }
        output.push_str(&format_scm_detail(storage));
        output.push('\n');
        output.push_str(&format_nvme_detail(storage));
        output.push('\n');
    }
    output
}

fn format_scm_detail(storage: &HostStorage) -> String {
    if !storage.scm_namespaces.is_empty() {
        let mut table = ReportTable::new(&["SCM Namespace", "Socket", "Capacity"]);
        for ns in &storage.scm_namespaces {
            table.add_row(vec![ns.blockdev.clone(), ns.numa_node.to_string(), format_bytes(ns.size)]);
        }
        return table.format(0);
    }

    if storage.scm_modules.is_empty() {
        return "  No SCM modules found\n".to_string();
    }

    let mut table = ReportTable::new(&[
        "SCM Module",
        "Socket",
        "Memory Ctrlr",
        "Channel",
        "Channel Slot",
        "Capacity",
        "UID",
        "Part Number",
        "Health",
    ]);
    for module in &storage.scm_modules {
        table.add_row(vec![
            module.physical_id.to_string(),
            module.socket_id.to_string(),
            module.controller_id.to_string(),
            module.channel_id.to_string(),
            module.channel_position.to_string(),
            format_ibytes(module.capacity),
            module.uid.clone(),
            module.part_number.clone(),
            module.health_state.clone(),
        ]);
    }
    table.format(0)
}

fn format_nvme_detail(storage: &HostStorage) -> String {
    if storage.nvme_devices.is_empty() {
        return "  No NVMe devices found\n".to_string();
    }

    let mut table = ReportTable::new(&["NVMe PCI", "Model", "FW Revision", "Socket", "Capacity", "Role(s)", "Rank"]);
    for ctrlr in &storage.nvme_devices {
        table.add_row(vec![
            ctrlr.pci_addr.clone(),
            ctrlr.model.clone(),
            ctrlr.fw_rev.clone(),
            ctrlr.socket_id.to_string(),
            format_bytes(ctrlr.capacity()),
            ctrlr.roles().to_string(),
            ctrlr.ranks(),
        ]);
    }
    table.format(0)
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod scan_test;
