//! Value formatting for report cells.
//!
//! Capacities, counts, percentages and durations are rendered the same way in
//! every report, so the cell formatting lives here.

/// Unit family for a capacity cell.
///
/// Memory modules are sized in binary units; namespaces and SSDs in decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// kB, MB, GB ... (powers of 1000)
    Decimal,
    /// KiB, MiB, GiB ... (powers of 1024)
    Binary,
}

impl Units {
    fn base(&self) -> u64 {
        match self {
            Units::Decimal => 1000,
            Units::Binary => 1024,
        }
    }

    fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Units::Decimal => &["B", "kB", "MB", "GB", "TB", "PB", "EB"],
            Units::Binary => &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"],
        }
    }

    /// Human readable size such as `954 MiB` or `2.0 TB`.
    ///
    /// Values below 10 bytes are shown verbatim. Otherwise the largest unit
    /// with a scaled value of at least 1 is chosen and the value is rounded to
    /// one decimal, printed with one decimal below 10 and none above.
    pub fn format(&self, bytes: u64) -> String {
        if bytes < 10 {
            return format!("{} B", bytes);
        }

        let base = self.base();
        let suffixes = self.suffixes();
        let mut exp = 0;
        let mut scaled = bytes;
        while scaled >= base && exp < suffixes.len() - 1 {
            scaled /= base;
            exp += 1;
        }

        let value = ((bytes as f64) / (base as f64).powi(exp as i32) * 10.0 + 0.5).floor() / 10.0;
        if value < 10.0 { format!("{:.1} {}", value, suffixes[exp]) } else { format!("{:.0} {}", value, suffixes[exp]) }
    }
}

/// Decimal capacity (namespaces, SSDs, usage)
pub fn format_bytes(bytes: u64) -> String {
    Units::Decimal.format(bytes)
}

/// Binary capacity (memory modules)
pub fn format_ibytes(bytes: u64) -> String {
    Units::Binary.format(bytes)
}

/// `1 module`, `0 modules`, `3 controllers`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 { format!("{} {}", count, noun) } else { format!("{} {}s", count, noun) }
}

/// Integer share of `total` that is used, or `N/A` when nothing is provisioned
pub fn percent_used(total: u64, avail: u64) -> String {
    if total == 0 {
        return "N/A".to_string();
    }
    let used = total.saturating_sub(avail) as u128;
    format!("{} %", used * 100 / total as u128)
}

/// Duration in the compact `1h2m3s` form used for device health counters
pub fn format_duration(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
