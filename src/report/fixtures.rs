//! Shared payloads for report tests.

use crate::aggregate::{Aggregated, HostGroup, aggregate};
use crate::types::*;

pub fn mem_info() -> Option<MemInfo> {
    Some(MemInfo { hugepage_size_kb: 2048 })
}

pub fn scm_module() -> ScmModule {
    ScmModule {
        physical_id: 1,
        socket_id: 1,
        controller_id: 1,
        channel_id: 1,
        channel_position: 1,
        capacity: 1_000_000_000,
        uid: "Device1".to_string(),
        part_number: "PartNumber1".to_string(),
        health_state: "Healthy".to_string(),
    }
}

pub fn nvme_controller() -> NvmeController {
    NvmeController {
        pci_addr: "0000:01:00.0".to_string(),
        model: "model-1".to_string(),
        serial: "serial-1".to_string(),
        fw_rev: "fwRev-1".to_string(),
        socket_id: 1,
        namespaces: vec![NvmeNamespace { id: 1, size: 2_000_000_000_000 }],
        smd_devices: vec![SmdDevice { rank: 0, ..Default::default() }],
        ..Default::default()
    }
}

/// One memory module and one SSD
pub fn standard() -> HostStorage {
    HostStorage {
        mem_info: mem_info(),
        scm_modules: vec![scm_module()],
        nvme_devices: vec![nvme_controller()],
        ..Default::default()
    }
}

/// One SCM namespace on top of the standard module
pub fn pmem_single() -> HostStorage {
    HostStorage {
        scm_namespaces: vec![ScmNamespace {
            uuid: "ns-0".to_string(),
            blockdev: "pmem0".to_string(),
            dev: "namespace0.0".to_string(),
            numa_node: 0,
            size: 1_000_000_000_000,
            mount: None,
        }],
        ..standard()
    }
}

pub fn no_nvme() -> HostStorage {
    HostStorage { nvme_devices: Vec::new(), ..standard() }
}

pub fn no_scm() -> HostStorage {
    HostStorage { scm_modules: Vec::new(), ..standard() }
}

pub fn no_storage() -> HostStorage {
    HostStorage { mem_info: mem_info(), ..Default::default() }
}

pub fn aggregated(records: Vec<HostRecord>) -> Aggregated {
    aggregate(&Batch { responses: records }).unwrap()
}

/// Groups for `(host, payload)` pairs
pub fn groups(records: &[(&str, HostStorage)]) -> Vec<HostGroup> {
    aggregated(records.iter().map(|(host, storage)| HostRecord::with_storage(host, storage.clone())).collect()).groups
}
