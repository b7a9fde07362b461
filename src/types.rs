/// Core data structures for per-host results
///
/// This module defines the storage payload each host reports, the enumerations
/// rendered in device listings, and the input batch consumed by the aggregator.
use std::collections::BTreeMap;
use std::fmt;

/// Everything one host reported about its storage
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostStorage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_info: Option<MemInfo>,
    pub scm_modules: Vec<ScmModule>,
    pub scm_namespaces: Vec<ScmNamespace>,
    pub scm_mount_points: Vec<ScmMountPoint>,
    pub nvme_devices: Vec<NvmeController>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smd_info: Option<SmdInfo>,
    /// When the host collected this result; never part of equivalence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,
}

impl HostStorage {
    /// Raw capacity of all SCM modules (binary units)
    pub fn scm_module_capacity(&self) -> u64 {
        saturating_sum(self.scm_modules.iter().map(|m| m.capacity))
    }

    /// Capacity of all SCM namespaces (decimal units)
    pub fn scm_namespace_capacity(&self) -> u64 {
        saturating_sum(self.scm_namespaces.iter().map(|ns| ns.size))
    }

    /// Capacity of all NVMe controllers (decimal units)
    pub fn nvme_capacity(&self) -> u64 {
        saturating_sum(self.nvme_devices.iter().map(NvmeController::capacity))
    }

    /// Total and available bytes of mounted SCM namespaces
    pub fn scm_usage(&self) -> (u64, u64) {
        self.scm_namespaces.iter().filter_map(|ns| ns.mount.as_ref()).fold((0, 0), |(total, avail), m| {
            (total.saturating_add(m.total_bytes), avail.saturating_add(m.avail_bytes))
        })
    }

    /// Total and available bytes of NVMe devices in use by the engine
    pub fn nvme_usage(&self) -> (u64, u64) {
        self.nvme_devices.iter().flat_map(|c| c.smd_devices.iter()).fold((0, 0), |(total, avail), d| {
            (total.saturating_add(d.total_bytes), avail.saturating_add(d.avail_bytes))
        })
    }

    /// NVMe controllers that took part in a format (nil addresses are skipped entries)
    pub fn formatted_nvme(&self) -> impl Iterator<Item = &NvmeController> {
        self.nvme_devices.iter().filter(|c| !c.is_nil_address())
    }
}

/// Byte totals clamp at `u64::MAX` instead of overflowing
fn saturating_sum(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0, u64::saturating_add)
}

/// Host memory information relevant to storage
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MemInfo {
    pub hugepage_size_kb: u64,
}

/// A persistent memory module
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScmModule {
    pub physical_id: u32,
    pub socket_id: u32,
    pub controller_id: u32,
    pub channel_id: u32,
    pub channel_position: u32,
    pub capacity: u64,
    pub uid: String,
    pub part_number: String,
    pub health_state: String,
}

/// A persistent memory namespace (block device)
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScmNamespace {
    pub uuid: String,
    pub blockdev: String,
    pub dev: String,
    pub numa_node: u32,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount: Option<ScmMountPoint>,
}

/// A mounted SCM filesystem, also used for format results
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScmMountPoint {
    pub path: String,
    /// Format result message
    pub info: String,
    pub total_bytes: u64,
    pub avail_bytes: u64,
}

/// Placeholder address for NVMe entries that were skipped
pub const NIL_BDEV_ADDRESS: &str = "<nil>";

/// An NVMe SSD controller
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NvmeController {
    pub pci_addr: String,
    pub model: String,
    pub serial: String,
    pub fw_rev: String,
    pub socket_id: i32,
    /// Format result message
    pub info: String,
    pub namespaces: Vec<NvmeNamespace>,
    pub smd_devices: Vec<SmdDevice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_stats: Option<HealthStats>,
}

impl NvmeController {
    pub fn capacity(&self) -> u64 {
        saturating_sum(self.namespaces.iter().map(|ns| ns.size))
    }

    pub fn is_nil_address(&self) -> bool {
        self.pci_addr.is_empty() || self.pci_addr == NIL_BDEV_ADDRESS
    }

    /// Union of the role bits of all SMD devices on this controller
    pub fn roles(&self) -> BdevRoles {
        BdevRoles(self.smd_devices.iter().fold(0, |bits, d| bits | d.roles.0))
    }

    /// Comma-separated ranks of the engines using this controller
    pub fn ranks(&self) -> String {
        self.smd_devices.iter().map(|d| d.rank.to_string()).collect::<Vec<_>>().join(",")
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NvmeNamespace {
    pub id: u32,
    pub size: u64,
}

/// Per-server metadata: devices and pools
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmdInfo {
    pub devices: Vec<SmdDevice>,
    /// Pool UUID to the per-rank entries of that pool
    pub pools: BTreeMap<String, Vec<SmdPool>>,
}

/// One rank's view of a pool
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmdPool {
    pub rank: u32,
    pub target_ids: Vec<i32>,
    pub blobs: Vec<u64>,
}

/// A blobstore device as seen by an engine
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmdDevice {
    pub uuid: String,
    pub target_ids: Vec<i32>,
    pub rank: u32,
    pub has_sys_xs: bool,
    pub roles: BdevRoles,
    pub ctrlr_namespace_id: u32,
    pub total_bytes: u64,
    pub avail_bytes: u64,
    pub ctrlr: DeviceCtrlr,
}

/// Controller details attached to an SMD device
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeviceCtrlr {
    pub pci_addr: String,
    pub dev_state: NvmeDevState,
    pub led_state: LedState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_stats: Option<HealthStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<PciLink>,
}

/// PCIe link characteristics; speeds in GT/s
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PciLink {
    pub port: u32,
    pub max_speed: f64,
    pub negotiated_speed: f64,
    pub max_width: u32,
    pub negotiated_width: u32,
}

/// NVMe SMART health log. Durations are in minutes unless named otherwise.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HealthStats {
    /// Kelvin
    pub temperature: u32,
    pub temp_warn_time: u32,
    pub temp_crit_time: u32,
    pub ctrl_busy_time: u64,
    pub power_cycles: u64,
    pub power_on_hours: u64,
    pub unsafe_shutdowns: u64,
    pub media_errors: u64,
    pub err_log_entries: u64,
    pub temp_warn: bool,
    pub avail_spare_warn: bool,
    pub dev_reliability_warn: bool,
    pub read_only_warn: bool,
    pub volatile_mem_warn: bool,
    pub prog_fail_cnt_norm: u8,
    pub prog_fail_cnt_raw: u64,
    pub erase_fail_cnt_norm: u8,
    pub erase_fail_cnt_raw: u64,
    pub wear_leveling_cnt_norm: u8,
    pub wear_leveling_cnt_min: u32,
    pub wear_leveling_cnt_max: u32,
    pub wear_leveling_cnt_avg: u32,
    pub endtoend_err_cnt_raw: u64,
    pub crc_err_cnt_raw: u64,
    pub media_wear_raw: u64,
    pub host_reads_raw: u64,
    pub workload_timer_raw: u64,
    pub thermal_throttle_status: u8,
    pub thermal_throttle_event_cnt: u64,
    pub retry_buffer_overflow_cnt: u64,
    pub pll_lock_loss_cnt: u64,
    pub nand_bytes_written: u64,
    pub host_bytes_written: u64,
}

impl HealthStats {
    pub fn temp_c(&self) -> f64 {
        self.temperature as f64 - 273.15
    }
}

/// Role bitmask of a blobstore device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BdevRoles(pub u32);

impl BdevRoles {
    pub const DATA: u32 = 1 << 0;
    pub const META: u32 = 1 << 1;
    pub const WAL: u32 = 1 << 2;
    pub const ALL: u32 = Self::DATA | Self::META | Self::WAL;

    pub fn is_empty(&self) -> bool {
        self.0 & Self::ALL == 0
    }
}

impl fmt::Display for BdevRoles {
    /// Lowercase role names joined by commas, or `NA` when no role bit is set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NA");
        }
        let names: Vec<&str> = [(Self::DATA, "data"), (Self::META, "meta"), (Self::WAL, "wal")]
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}

/// NVMe device state as tracked by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NvmeDevState {
    #[default]
    Unknown,
    Normal,
    New,
    Evicted,
    Unplugged,
}

impl NvmeDevState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NvmeDevState::Unknown => "UNKNOWN",
            NvmeDevState::Normal => "NORMAL",
            NvmeDevState::New => "NEW",
            NvmeDevState::Evicted => "EVICTED",
            NvmeDevState::Unplugged => "UNPLUGGED",
        }
    }
}

/// Status LED state of a VMD-managed device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedState {
    #[default]
    Unknown,
    /// LED off
    Normal,
    /// Quick blink to locate the device
    Identify,
    /// Solid on
    Faulty,
}

impl LedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedState::Unknown => "NA",
            LedState::Normal => "OFF",
            LedState::Identify => "QUICK_BLINK",
            LedState::Faulty => "ON",
        }
    }
}

/// One host's entry in an input batch.
///
/// A host may carry data and errors at once when only some of its
/// subsystems failed.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostRecord {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<HostStorage>,
    /// Whole-host failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-subsystem failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl HostRecord {
    pub fn with_storage(host: &str, storage: HostStorage) -> Self {
        Self { host: host.to_string(), storage: Some(storage), ..Default::default() }
    }

    pub fn with_error(host: &str, error: &str) -> Self {
        Self { host: host.to_string(), error: Some(error.to_string()), ..Default::default() }
    }

    /// All error messages this host reported
    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.error.iter().chain(self.errors.iter()).map(String::as_str)
    }
}

/// A complete batch of per-host results
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Batch {
    pub responses: Vec<HostRecord>,
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;
