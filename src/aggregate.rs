/// Host result aggregation
///
/// This module handles:
/// - Grouping hosts whose canonical payloads are identical
/// - Grouping host failures by exact error text
/// - Ordering groups deterministically regardless of input order
use crate::canonical::{ResultKey, key_of};
use crate::error::{ReportError, ReportResult};
use crate::hostlist::{HostName, HostSet, strip_port};
use crate::types::{Batch, HostStorage};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Hosts that reported the same error message, keyed by the message
#[derive(Debug, Default, Clone)]
pub struct HostErrorsMap {
    errors: BTreeMap<String, HostSet>,
}

/// One rendered row of the error table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HostErrorRow {
    pub hosts: String,
    pub error: String,
}

impl HostErrorsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `host` reported `error`.
    pub fn add(&mut self, host: &str, error: &str) -> ReportResult<()> {
        let host = strip_port(host);
        self.errors.entry(error.to_string()).or_default().insert(host)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every host that reported at least one error
    pub fn hosts(&self) -> HostSet {
        let mut all = HostSet::new();
        for hosts in self.errors.values() {
            all.merge(hosts);
        }
        all
    }

    /// Rows ordered by compressed host range, then error text
    pub fn rows(&self) -> Vec<HostErrorRow> {
        let mut rows: Vec<HostErrorRow> = self
            .errors
            .iter()
            .map(|(error, hosts)| HostErrorRow { hosts: hosts.to_string(), error: error.clone() })
            .collect();
        rows.sort_by(|a, b| (&a.hosts, &a.error).cmp(&(&b.hosts, &b.error)));
        rows
    }
}

/// Hosts sharing one canonical payload
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HostGroup {
    #[serde(serialize_with = "serialize_host_set")]
    pub hosts: HostSet,
    pub key: ResultKey,
    pub storage: HostStorage,
}

fn serialize_host_set<S: serde::Serializer>(hosts: &HostSet, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(hosts)
}

/// Accumulates payloads into groups keyed by [`ResultKey`]
#[derive(Debug, Default)]
pub struct HostStorageMap {
    groups: Vec<HostGroup>,
    by_key: HashMap<ResultKey, usize>,
    by_host: HashMap<String, ResultKey>,
}

impl HostStorageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one host's payload.
    ///
    /// A host repeating an identical payload is ignored; a host reporting a
    /// different payload than before is an error.
    pub fn add(&mut self, host: &str, storage: HostStorage) -> ReportResult<()> {
        let host = strip_port(host);
        HostName::parse(host)?;
        let (key, canonical) = key_of(storage)?;

        if let Some(previous) = self.by_host.get(host) {
            if *previous != key {
                return Err(ReportError::DuplicateHost(host.to_string()));
            }
            warn!("host {} reported the same result twice", host);
            return Ok(());
        }

        match self.by_key.get(&key) {
            Some(&idx) => {
                let group = &mut self.groups[idx];
                if group.storage != canonical {
                    return Err(ReportError::HashCollision(format!("{} and {}", group.hosts, host)));
                }
                group.hosts.insert(host)?;
                debug!("merged {} into group {}", host, key);
            }
            None => {
                let mut hosts = HostSet::new();
                hosts.insert(host)?;
                debug!("new group {} for {}", key, host);
                self.by_key.insert(key.clone(), self.groups.len());
                self.groups.push(HostGroup { hosts, key: key.clone(), storage: canonical });
            }
        }
        self.by_host.insert(host.to_string(), key);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups ordered by their lowest member host.
    ///
    /// Groups are disjoint, so ties can only occur between empty groups; the
    /// stable sort keeps insertion order for those.
    pub fn finalize(self) -> Vec<HostGroup> {
        let mut groups = self.groups;
        groups.sort_by_cached_key(|g| g.hosts.first());
        groups
    }
}

/// Everything a report needs: grouped errors and ordered data groups
#[derive(Debug, Default)]
pub struct Aggregated {
    pub errors: HostErrorsMap,
    pub groups: Vec<HostGroup>,
}

impl Aggregated {
    /// Number of distinct hosts that reported data or errors
    pub fn host_count(&self) -> usize {
        let mut all = self.errors.hosts();
        for group in &self.groups {
            all.merge(&group.hosts);
        }
        all.len()
    }
}

/// Aggregate a batch of host records.
///
/// Errors and payloads are routed independently, so a host with a partial
/// failure appears in both the error table and a data group.
pub fn aggregate(batch: &Batch) -> ReportResult<Aggregated> {
    let mut errors = HostErrorsMap::new();
    let mut storage = HostStorageMap::new();

    for record in &batch.responses {
        for message in record.error_messages() {
            errors.add(&record.host, message)?;
        }
        if let Some(payload) = &record.storage {
            storage.add(&record.host, payload.clone())?;
        }
    }

    debug!("aggregated {} records into {} groups", batch.responses.len(), storage.len());
    Ok(Aggregated { errors, groups: storage.finalize() })
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod aggregate_test;
