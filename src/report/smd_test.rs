/// Tests for the device and pool query report

#[cfg(test)]
mod tests {
    use crate::config::PrintConfig;
    use crate::report::fixtures::*;
    use crate::report::smd::*;
    use crate::types::*;

    const POOL_UUID: &str = "00000000-0000-0000-0000-000000000000";

    fn mock_uuid(i: u32) -> String {
        format!("{i:08x}-{i:04x}-{i:04x}-{i:04x}-{i:012x}")
    }

    fn ctrlr(pci_addr: &str, dev_state: NvmeDevState, led_state: LedState) -> DeviceCtrlr {
        DeviceCtrlr { pci_addr: pci_addr.to_string(), dev_state, led_state, ..Default::default() }
    }

    fn with_smd(smd: SmdInfo) -> HostStorage {
        HostStorage { smd_info: Some(smd), ..Default::default() }
    }

    fn pools() -> HostStorage {
        let mut smd = SmdInfo::default();
        smd.pools.insert(
            POOL_UUID.to_string(),
            (0..2)
                .map(|rank| SmdPool { rank, target_ids: vec![0, 1, 2, 3], blobs: vec![11, 12, 13, 14] })
                .collect(),
        );
        with_smd(smd)
    }

    fn devices_only() -> PrintConfig {
        PrintConfig { pools_only: false, devices_only: true, ..Default::default() }
    }

    fn pools_only() -> PrintConfig {
        PrintConfig { pools_only: true, ..Default::default() }
    }

    #[test]
    fn test_list_pools() {
        let expected = r#"
-----
host1
-----
  Pools
    UUID:00000000-0000-0000-0000-000000000000
      Rank:0 Targets:[0 1 2 3]
      Rank:1 Targets:[0 1 2 3]

"#;
        let got = format_smd_info_map(&groups(&[("host1", pools())]), &pools_only());
        assert_eq!(got, expected.trim_start_matches('\n'));
    }

    #[test]
    fn test_list_pools_verbose() {
        let expected = r#"
-----
host1
-----
  Pools
    UUID:00000000-0000-0000-0000-000000000000
      Rank:0 Targets:[0 1 2 3] Blobs:[11 12 13 14]
      Rank:1 Targets:[0 1 2 3] Blobs:[11 12 13 14]

"#;
        let config = PrintConfig { verbose: true, ..pools_only() };
        let got = format_smd_info_map(&groups(&[("host1", pools())]), &config);
        assert_eq!(got, expected.trim_start_matches('\n'));
    }

    #[test]
    fn test_list_pools_none_found() {
        let got = format_smd_info_map(&groups(&[("host1", with_smd(SmdInfo::default()))]), &pools_only());
        assert_eq!(got, "-----\nhost1\n-----\n  No pools with NVMe found\n");
    }

    #[test]
    fn test_list_devices() {
        let smd = SmdInfo {
            devices: vec![
                SmdDevice {
                    uuid: mock_uuid(0),
                    target_ids: vec![0, 1, 2],
                    has_sys_xs: true,
                    roles: BdevRoles(BdevRoles::WAL),
                    ctrlr: ctrlr("0000:8a:00.0", NvmeDevState::New, LedState::Normal),
                    ctrlr_namespace_id: 1,
                    ..Default::default()
                },
                SmdDevice {
                    uuid: mock_uuid(1),
                    target_ids: vec![3, 4, 5],
                    roles: BdevRoles(BdevRoles::META | BdevRoles::DATA),
                    ctrlr: ctrlr("0000:8b:00.0", NvmeDevState::Evicted, LedState::Faulty),
                    ctrlr_namespace_id: 1,
                    ..Default::default()
                },
                SmdDevice {
                    uuid: mock_uuid(2),
                    target_ids: vec![0, 1, 2],
                    rank: 1,
                    has_sys_xs: true,
                    roles: BdevRoles(BdevRoles::WAL),
                    ctrlr: ctrlr("0000:da:00.0", NvmeDevState::Unknown, LedState::Unknown),
                    ctrlr_namespace_id: 1,
                    ..Default::default()
                },
                SmdDevice {
                    uuid: mock_uuid(3),
                    target_ids: vec![3, 4, 5],
                    rank: 1,
                    roles: BdevRoles(BdevRoles::META | BdevRoles::DATA),
                    ctrlr: ctrlr("0000:db:00.0", NvmeDevState::Normal, LedState::Identify),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let expected = r#"
-----
host1
-----
  Devices
    UUID:00000000-0000-0000-0000-000000000000 [TrAddr:0000:8a:00.0 NSID:1]
      Roles:wal SysXS Targets:[0 1 2] Rank:0 State:NEW LED:OFF
    UUID:00000001-0001-0001-0001-000000000001 [TrAddr:0000:8b:00.0 NSID:1]
      Roles:data,meta Targets:[3 4 5] Rank:0 State:EVICTED LED:ON
    UUID:00000002-0002-0002-0002-000000000002 [TrAddr:0000:da:00.0 NSID:1]
      Roles:wal SysXS Targets:[0 1 2] Rank:1 State:UNKNOWN LED:NA
    UUID:00000003-0003-0003-0003-000000000003 [TrAddr:0000:db:00.0]
      Roles:data,meta Targets:[3 4 5] Rank:1 State:NORMAL LED:QUICK_BLINK
"#;
        let got = format_smd_info_map(&groups(&[("host1", with_smd(smd))]), &devices_only());
        assert_eq!(got, expected.trim_start_matches('\n'));
    }

    #[test]
    fn test_list_devices_none_found() {
        let got = format_smd_info_map(&groups(&[("host1", HostStorage::default())]), &devices_only());
        assert_eq!(got, "-----\nhost1\n-----\n  No devices found\n");
    }

    #[test]
    fn test_pools_precede_devices() {
        let got = format_smd_info_map(&groups(&[("host1", HostStorage::default())]), &PrintConfig::default());
        assert_eq!(got, "-----\nhost1\n-----\n  No pools with NVMe found\n  No devices found\n");
    }

    #[test]
    fn test_list_devices_with_health() {
        let health = HealthStats {
            temperature: 300,
            temp_warn_time: 5,
            temp_crit_time: 1,
            ctrl_busy_time: 2,
            power_cycles: 10,
            power_on_hours: 3,
            unsafe_shutdowns: 4,
            media_errors: 5,
            err_log_entries: 6,
            temp_warn: true,
            avail_spare_warn: true,
            dev_reliability_warn: true,
            read_only_warn: true,
            volatile_mem_warn: false,
            prog_fail_cnt_norm: 7,
            prog_fail_cnt_raw: 8,
            erase_fail_cnt_norm: 9,
            erase_fail_cnt_raw: 10,
            wear_leveling_cnt_norm: 11,
            wear_leveling_cnt_min: 12,
            wear_leveling_cnt_max: 13,
            wear_leveling_cnt_avg: 14,
            endtoend_err_cnt_raw: 15,
            crc_err_cnt_raw: 16,
            media_wear_raw: 17,
            host_reads_raw: 18,
            workload_timer_raw: 19,
            thermal_throttle_status: 20,
            thermal_throttle_event_cnt: 21,
            retry_buffer_overflow_cnt: 22,
            pll_lock_loss_cnt: 23,
            nand_bytes_written: 24,
            host_bytes_written: 25,
        };
        let mut device_ctrlr = ctrlr("0000:01:00.0", NvmeDevState::Normal, LedState::Normal);
        device_ctrlr.health_stats = Some(health);
        device_ctrlr.link =
            Some(PciLink { port: 1, max_speed: 1.0, negotiated_speed: 1.0, max_width: 4, negotiated_width: 4 });
        let smd = SmdInfo {
            devices: vec![SmdDevice {
                uuid: mock_uuid(0),
                target_ids: vec![0, 1, 2],
                ctrlr: device_ctrlr,
                ctrlr_namespace_id: 1,
                roles: BdevRoles(BdevRoles::ALL),
                ..Default::default()
            }],
            ..Default::default()
        };

        let expected = r#"
-----
host1
-----
  Devices
    UUID:00000000-0000-0000-0000-000000000000 [TrAddr:0000:01:00.0 NSID:1]
      Roles:data,meta,wal Targets:[0 1 2] Rank:0 State:NORMAL LED:OFF
      Health Stats:
        Temperature:300K(26.85C)
        Temperature Warning Duration:5m0s
        Temperature Critical Duration:1m0s
        Controller Busy Time:2m0s
        Power Cycles:10
        Power On Duration:3h0m0s
        Unsafe Shutdowns:4
        Media Errors:5
        Error Log Entries:6
      Critical Warnings:
        Temperature: WARNING
        Available Spare: WARNING
        Device Reliability: WARNING
        Read Only: WARNING
        Volatile Memory Backup: OK
      Intel Vendor SMART Attributes:
        Program Fail Count:
           Normalized:7%
           Raw:8
        Erase Fail Count:
           Normalized:9%
           Raw:10
        Wear Leveling Count:
           Normalized:11%
           Min:12
           Max:13
           Avg:14
        End-to-End Error Detection Count:15
        CRC Error Count:16
        Timed Workload, Media Wear:17
        Timed Workload, Host Read/Write Ratio:18
        Timed Workload, Timer:19
        Thermal Throttle Status:20%
        Thermal Throttle Event Count:21
        Retry Buffer Overflow Counter:22
        PLL Lock Loss Count:23
        NAND Bytes Written:24
        Host Bytes Written:25
      PCIe Link Info:
        Port: #1
        Max Speed: 1 GT/s
        Negotiated Speed: 1 GT/s
        Max Width: x4
        Negotiated Width: x4

"#;
        let got = format_smd_info_map(&groups(&[("host1", with_smd(smd))]), &devices_only());
        assert_eq!(got, expected.trim_start_matches('\n'));
    }

    #[test]
    fn test_led_only() {
        let smd = SmdInfo {
            devices: vec![SmdDevice {
                uuid: "842c739b-86b5-462f-a7ba-b4a91b674f3d".to_string(),
                ctrlr: ctrlr("0000:db:00.0", NvmeDevState::Normal, LedState::Identify),
                ..Default::default()
            }],
            ..Default::default()
        };
        let config = PrintConfig { led_only: true, ..devices_only() };

        let expected = r#"
-----
host1
-----
  Devices
    TrAddr:0000:db:00.0 [UUID:842c739b-86b5-462f-a7ba-b4a91b674f3d] LED:QUICK_BLINK
"#;
        let got = format_smd_info_map(&groups(&[("host1", with_smd(smd))]), &config);
        assert_eq!(got, expected.trim_start_matches('\n'));
    }

    #[test]
    fn test_led_only_without_uuid() {
        let smd = SmdInfo {
            devices: vec![SmdDevice {
                ctrlr: ctrlr("0000:db:00.0", NvmeDevState::Normal, LedState::Identify),
                ctrlr_namespace_id: 1,
                ..Default::default()
            }],
            ..Default::default()
        };
        let config = PrintConfig { led_only: true, ..devices_only() };

        let got = format_smd_info_map(&groups(&[("host1", with_smd(smd))]), &config);
        assert_eq!(got, "-----\nhost1\n-----\n  Devices\n    TrAddr:0000:db:00.0 NSID:1 LED:QUICK_BLINK\n");
    }
}
