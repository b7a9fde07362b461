//! Device and pool query report.
//!
//! Lists the blobstore devices and pool shards each engine knows about. With
//! `led_only` the device lines carry just the address and LED state.

use super::types::format_duration;
use crate::aggregate::HostGroup;
use crate::config::PrintConfig;
use crate::console_format::format_title_banner;
use crate::types::{HealthStats, PciLink, SmdDevice, SmdInfo};
use std::fmt::{Display, Write};

/// A titled section per group with its pools and devices
pub fn format_smd_info_map(groups: &[HostGroup], config: &PrintConfig) -> String {
    let empty = SmdInfo::default();
    let mut output = String::new();

    for group in groups {
        output.push_str(&format_title_banner(&group.hosts.to_string()));
        let smd = group.storage.smd_info.as_ref().unwrap_or(&empty);
        if config.shows_pools() {
            output.push_str(&format_pools(smd, config.verbose));
        }
        if config.shows_devices() {
            output.push_str(&format_devices(&smd.devices, config.led_only));
        }
    }
    output
}

/// `[0 1 2]`
fn bracketed<T: Display>(items: &[T]) -> String {
    let joined: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", joined.join(" "))
}

fn format_pools(smd: &SmdInfo, verbose: bool) -> String {
    if smd.pools.is_empty() {
        return "  No pools with NVMe found\n".to_string();
    }

    let mut out = String::from("  Pools\n");
    for (uuid, shards) in &smd.pools {
        let _ = writeln!(out, "    UUID:{}", uuid);
        for shard in shards {
            let _ = write!(out, "      Rank:{} Targets:{}", shard.rank, bracketed(&shard.target_ids));
            if verbose {
                let _ = write!(out, " Blobs:{}", bracketed(&shard.blobs));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Device listing shared by the query and LED management reports
fn format_devices(devices: &[SmdDevice], led_only: bool) -> String {
    if devices.is_empty() {
        return "  No devices found\n".to_string();
    }

    let mut out = String::from("  Devices\n");
    for device in devices {
        if led_only {
            out.push_str(&format_device_led(device));
            continue;
        }

        let _ = write!(out, "    UUID:{} [TrAddr:{}", device.uuid, device.ctrlr.pci_addr);
        if device.ctrlr_namespace_id != 0 {
            let _ = write!(out, " NSID:{}", device.ctrlr_namespace_id);
        }
        out.push_str("]\n");

        let _ = write!(out, "      Roles:{}", device.roles);
        if device.has_sys_xs {
            out.push_str(" SysXS");
        }
        let _ = writeln!(
            out,
            " Targets:{} Rank:{} State:{} LED:{}",
            bracketed(&device.target_ids),
            device.rank,
            device.ctrlr.dev_state.as_str(),
            device.ctrlr.led_state.as_str()
        );

        if let Some(health) = &device.ctrlr.health_stats {
            out.push_str(&format_health_stats(health));
            if let Some(link) = &device.ctrlr.link {
                out.push_str(&format_link_info(link));
            }
            out.push('\n');
        }
    }
    out
}

fn format_device_led(device: &SmdDevice) -> String {
    let mut line = format!("    TrAddr:{}", device.ctrlr.pci_addr);
    if !device.uuid.is_empty() {
        let _ = write!(line, " [UUID:{}]", device.uuid);
    } else if device.ctrlr_namespace_id != 0 {
        let _ = write!(line, " NSID:{}", device.ctrlr_namespace_id);
    }
    let _ = writeln!(line, " LED:{}", device.ctrlr.led_state.as_str());
    line
}

fn warning(flag: bool) -> &'static str {
    if flag { "WARNING" } else { "OK" }
}

fn minutes(value: impl Into<u64>) -> String {
    let value: u64 = value.into();
    format_duration(value.saturating_mul(60))
}

fn format_health_stats(h: &HealthStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "      Health Stats:");
    let _ = writeln!(out, "        Temperature:{}K({:.2}C)", h.temperature, h.temp_c());
    let _ = writeln!(out, "        Temperature Warning Duration:{}", minutes(h.temp_warn_time));
    let _ = writeln!(out, "        Temperature Critical Duration:{}", minutes(h.temp_crit_time));
    let _ = writeln!(out, "        Controller Busy Time:{}", minutes(h.ctrl_busy_time));
    let _ = writeln!(out, "        Power Cycles:{}", h.power_cycles);
    let _ = writeln!(out, "        Power On Duration:{}", format_duration(h.power_on_hours.saturating_mul(3600)));
    let _ = writeln!(out, "        Unsafe Shutdowns:{}", h.unsafe_shutdowns);
    let _ = writeln!(out, "        Media Errors:{}", h.media_errors);
    let _ = writeln!(out, "        Error Log Entries:{}", h.err_log_entries);

    let _ = writeln!(out, "      Critical Warnings:");
    let _ = writeln!(out, "        Temperature: {}", warning(h.temp_warn));
    let _ = writeln!(out, "        Available Spare: {}", warning(h.avail_spare_warn));
    let _ = writeln!(out, "        Device Reliability: {}", warning(h.dev_reliability_warn));
    let _ = writeln!(out, "        Read Only: {}", warning(h.read_only_warn));
    let _ = writeln!(out, "        Volatile Memory Backup: {}", warning(h.volatile_mem_warn));

    let _ = writeln!(out, "      Intel Vendor SMART Attributes:");
    let _ = writeln!(out, "        Program Fail Count:");
    let _ = writeln!(out, "           Normalized:{}%", h.prog_fail_cnt_norm);
    let _ = writeln!(out, "           Raw:{}", h.prog_fail_cnt_raw);
    let _ = writeln!(out, "        Erase Fail Count:");
    let _ = writeln!(out, "           Normalized:{}%", h.erase_fail_cnt_norm);
    let _ = writeln!(out, "           Raw:{}", h.erase_fail_cnt_raw);
    let _ = writeln!(out, "        Wear Leveling Count:");
    let _ = writeln!(out, "           Normalized:{}%", h.wear_leveling_cnt_norm);
    let _ = writeln!(out, "           Min:{}", h.wear_leveling_cnt_min);
    let _ = writeln!(out, "           Max:{}", h.wear_leveling_cnt_max);
    let _ = writeln!(out, "           Avg:{}", h.wear_leveling_cnt_avg);
    let _ = writeln!(out, "        End-to-End Error Detection Count:{}", h.endtoend_err_cnt_raw);
    let _ = writeln!(out, "        CRC Error Count:{}", h.crc_err_cnt_raw);
    let _ = writeln!(out, "        Timed Workload, Media Wear:{}", h.media_wear_raw);
    let _ = writeln!(out, "        Timed Workload, Host Read/Write Ratio:{}", h.host_reads_raw);
    let _ = writeln!(out, "        Timed Workload, Timer:{}", h.workload_timer_raw);
    let _ = writeln!(out, "        Thermal Throttle Status:{}%", h.thermal_throttle_status);
    let _ = writeln!(out, "        Thermal Throttle Event Count:{}", h.thermal_throttle_event_cnt);
    let _ = writeln!(out, "        Retry Buffer Overflow Counter:{}", h.retry_buffer_overflow_cnt);
    let _ = writeln!(out, "        PLL Lock Loss Count:{}", h.pll_lock_loss_cnt);
    let _ = writeln!(out, "        NAND Bytes Written:{}", h.nand_bytes_written);
    let _ = writeln!(out, "        Host Bytes Written:{}", h.host_bytes_written);
    out
}

fn format_link_info(link: &PciLink) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "      PCIe Link Info:");
    let _ = writeln!(out, "        Port: #{}", link.port);
    let _ = writeln!(out, "        Max Speed: {} GT/s", link.max_speed);
    let _ = writeln!(out, "        Negotiated Speed: {} GT/s", link.negotiated_speed);
    let _ = writeln!(out, "        Max Width: x{}", link.max_width);
    let _ = writeln!(out, "        Negotiated Width: x{}", link.negotiated_width);
    out
}

#[cfg(test)]
#[path = "smd_test.rs"]
mod smd_test;
