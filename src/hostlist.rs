/// Hostlist compression module
///
/// This module handles:
/// - Parsing host identifiers into prefix, numeric index and suffix
/// - Collapsing host sets into bracketed range notation (`host[1-4,7]`)
/// - Expanding range notation back into host identifiers
use crate::error::{ReportError, ReportResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Characters that carry meaning inside range notation
const RESERVED: &[char] = &['[', ']', ','];

/// Largest number of hosts a single bracketed range may expand to
pub const MAX_RANGE_SPAN: u64 = 1 << 20;

/// A parsed host identifier.
///
/// Ordering compares the prefix first, then the numeric index, so `host2`
/// sorts before `host10`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HostName {
    pub prefix: String,
    /// Last maximal digit run, if the name has one
    pub index: Option<u64>,
    /// Zero-padded width of the index (0 = not padded)
    pub width: usize,
    pub suffix: String,
}

impl HostName {
    /// Parse a host identifier.
    ///
    /// The last maximal run of digits becomes the index. A leading zero marks
    /// the index as padded to the run's length.
    pub fn parse(host: &str) -> ReportResult<Self> {
        if host.is_empty() {
            return Err(ReportError::invalid_host(host, "empty identifier"));
        }
        if host.chars().any(|c| RESERVED.contains(&c) || c.is_whitespace()) {
            return Err(ReportError::invalid_host(host, "contains reserved range characters"));
        }

        let bytes = host.as_bytes();
        let Some(end) = bytes.iter().rposition(|b| b.is_ascii_digit()).map(|i| i + 1) else {
            return Ok(HostName { prefix: host.to_string(), index: None, width: 0, suffix: String::new() });
        };
        let start = bytes[..end].iter().rposition(|b| !b.is_ascii_digit()).map(|i| i + 1).unwrap_or(0);

        let digits = &host[start..end];
        let index: u64 = digits.parse().map_err(|e| ReportError::invalid_host(host, e))?;

        Ok(HostName {
            prefix: host[..start].to_string(),
            index: Some(index),
            width: padded_width(digits),
            suffix: host[end..].to_string(),
        })
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}{:0width$}{}", self.prefix, index, self.suffix, width = self.width),
            None => f.write_str(&self.prefix),
        }
    }
}

/// Width of a zero-padded digit run, or 0 when the run is not padded
fn padded_width(digits: &str) -> usize {
    if digits.len() > 1 && digits.starts_with('0') { digits.len() } else { 0 }
}

/// Number of decimal digits in `value`
fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Strip a trailing `:port` from a host address.
///
/// Only a single colon followed by digits is treated as a port, so bare IPv6
/// literals are left untouched.
pub fn strip_port(addr: &str) -> &str {
    match addr.split_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => addr,
    }
}

/// A set of hosts stored in compressible form.
///
/// Numbered hosts are kept per (prefix, suffix) pattern as (index, width)
/// pairs; hosts without digits are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    numbered: BTreeMap<(String, String), BTreeSet<(u64, usize)>>,
    plain: BTreeSet<String>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from range notation such as `host[1-3],node7`.
    pub fn parse(ranges: &str) -> ReportResult<Self> {
        let mut set = HostSet::new();
        for host in expand(ranges)? {
            set.insert(&host)?;
        }
        Ok(set)
    }

    /// Add a host; returns false if it was already present.
    pub fn insert(&mut self, host: &str) -> ReportResult<bool> {
        let name = HostName::parse(host)?;
        Ok(self.insert_name(name))
    }

    fn insert_name(&mut self, name: HostName) -> bool {
        match name.index {
            Some(index) => {
                self.numbered.entry((name.prefix, name.suffix)).or_default().insert((index, name.width))
            }
            None => self.plain.insert(name.prefix),
        }
    }

    /// Merge every host of `other` into this set.
    pub fn merge(&mut self, other: &HostSet) {
        for ((prefix, suffix), indices) in &other.numbered {
            self.numbered.entry((prefix.clone(), suffix.clone())).or_default().extend(indices.iter().copied());
        }
        self.plain.extend(other.plain.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.numbered.values().map(BTreeSet::len).sum::<usize>() + self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lowest member in [`HostName`] order.
    pub fn first(&self) -> Option<HostName> {
        let numbered = self.numbered.iter().filter_map(|((prefix, suffix), indices)| {
            indices.first().map(|&(index, width)| HostName {
                prefix: prefix.clone(),
                index: Some(index),
                width,
                suffix: suffix.clone(),
            })
        });
        let plain = self.plain.first().map(|p| HostName {
            prefix: p.clone(),
            index: None,
            width: 0,
            suffix: String::new(),
        });
        numbered.chain(plain).min()
    }

    /// All members, expanded, in [`HostName`] order.
    pub fn hosts(&self) -> Vec<String> {
        let mut names: Vec<HostName> = self
            .numbered
            .iter()
            .flat_map(|((prefix, suffix), indices)| {
                indices.iter().map(move |&(index, width)| HostName {
                    prefix: prefix.clone(),
                    index: Some(index),
                    width,
                    suffix: suffix.clone(),
                })
            })
            .chain(self.plain.iter().map(|p| HostName {
                prefix: p.clone(),
                index: None,
                width: 0,
                suffix: String::new(),
            }))
            .collect();
        names.sort();
        names.iter().map(HostName::to_string).collect()
    }

    /// Render each compressible segment, keyed by its first member.
    fn segments(&self) -> Vec<(HostName, String)> {
        let mut segments = Vec::new();

        for ((prefix, suffix), indices) in &self.numbered {
            for (width, values) in width_buckets(indices) {
                let first = HostName { prefix: prefix.clone(), index: Some(values[0]), width, suffix: suffix.clone() };
                segments.push((first, render_segment(prefix, suffix, width, &values)));
            }
        }
        for plain in &self.plain {
            let first = HostName { prefix: plain.clone(), index: None, width: 0, suffix: String::new() };
            segments.push((first, plain.clone()));
        }

        segments.sort();
        segments
    }
}

/// Split the indices of one pattern into buckets that share a padding width.
///
/// An unpadded index whose digit count equals the width of a padded bucket
/// (e.g. `1000` next to `0999`) renders identically under that padding, so it
/// joins the padded bucket instead of starting a new segment.
fn width_buckets(indices: &BTreeSet<(u64, usize)>) -> BTreeMap<usize, Vec<u64>> {
    let padded: BTreeSet<usize> = indices.iter().map(|&(_, w)| w).filter(|&w| w > 0).collect();

    let mut buckets: BTreeMap<usize, Vec<u64>> = BTreeMap::new();
    for &(index, width) in indices {
        let width = if width == 0 && padded.contains(&digit_count(index)) { digit_count(index) } else { width };
        buckets.entry(width).or_default().push(index);
    }
    for values in buckets.values_mut() {
        values.sort_unstable();
        values.dedup();
    }
    buckets
}

/// Render sorted indices as `prefix[a-b,c]suffix`, or `prefixNsuffix` for one member.
fn render_segment(prefix: &str, suffix: &str, width: usize, values: &[u64]) -> String {
    if let [only] = values {
        return format!("{}{:0width$}{}", prefix, only, suffix, width = width);
    }

    let mut runs: Vec<String> = Vec::new();
    let mut start = values[0];
    let mut prev = values[0];
    for &value in &values[1..] {
        if value == prev + 1 {
            prev = value;
            continue;
        }
        runs.push(render_run(start, prev, width));
        start = value;
        prev = value;
    }
    runs.push(render_run(start, prev, width));

    format!("{}[{}]{}", prefix, runs.join(","), suffix)
}

fn render_run(start: u64, end: u64, width: usize) -> String {
    if start == end {
        format!("{:0width$}", start, width = width)
    } else {
        format!("{:0width$}-{:0width$}", start, end, width = width)
    }
}

impl fmt::Display for HostSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.segments().into_iter().map(|(_, s)| s).collect();
        f.write_str(&rendered.join(","))
    }
}

/// Compress host identifiers into range notation.
///
/// Identifiers are grouped per prefix, suffix and padding width; each group
/// becomes one segment and segments are joined with commas.
pub fn compress<I, S>(hosts: I) -> ReportResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = HostSet::new();
    for host in hosts {
        set.insert(host.as_ref())?;
    }
    Ok(set.to_string())
}

/// Expand range notation into the set of host identifiers it denotes.
pub fn expand(ranges: &str) -> ReportResult<BTreeSet<String>> {
    if ranges.trim().is_empty() {
        return Err(ReportError::invalid_range(ranges, "empty range"));
    }

    let mut hosts = BTreeSet::new();
    for segment in split_segments(ranges)? {
        expand_segment(ranges, segment, &mut hosts)?;
    }
    Ok(hosts)
}

/// Split on commas that sit outside brackets.
fn split_segments(ranges: &str) -> ReportResult<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in ranges.char_indices() {
        match c {
            '[' if depth == 0 => depth = 1,
            '[' => return Err(ReportError::invalid_range(ranges, "nested brackets")),
            ']' if depth == 1 => depth = 0,
            ']' => return Err(ReportError::invalid_range(ranges, "unbalanced brackets")),
            ',' if depth == 0 => {
                segments.push(&ranges[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ReportError::invalid_range(ranges, "unbalanced brackets"));
    }
    segments.push(&ranges[start..]);
    Ok(segments)
}

fn expand_segment(ranges: &str, segment: &str, hosts: &mut BTreeSet<String>) -> ReportResult<()> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Err(ReportError::invalid_range(ranges, "empty segment"));
    }

    let Some((prefix, rest)) = segment.split_once('[') else {
        HostName::parse(segment)?;
        hosts.insert(segment.to_string());
        return Ok(());
    };
    let Some((body, suffix)) = rest.split_once(']') else {
        return Err(ReportError::invalid_range(ranges, "unbalanced brackets"));
    };
    if suffix.contains('[') {
        return Err(ReportError::invalid_range(ranges, "more than one bracket group in a segment"));
    }
    if suffix.bytes().any(|b| b.is_ascii_digit()) {
        return Err(ReportError::invalid_range(ranges, "digits after a bracket group"));
    }

    for item in body.split(',') {
        let (low, high) = item.split_once('-').unwrap_or((item, item));
        let width = padded_width(low);
        let start: u64 = low.parse().map_err(|e| ReportError::invalid_range(ranges, e))?;
        let end: u64 = high.parse().map_err(|e| ReportError::invalid_range(ranges, e))?;
        if start > end {
            return Err(ReportError::invalid_range(ranges, format!("reversed range {}", item)));
        }
        if end - start >= MAX_RANGE_SPAN {
            let reason = format!("range {} spans more than {} hosts", item, MAX_RANGE_SPAN);
            return Err(ReportError::invalid_range(ranges, reason));
        }
        for index in start..=end {
            hosts.insert(format!("{}{:0width$}{}", prefix, index, suffix, width = width));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "hostlist_test.rs"]
mod hostlist_test;
