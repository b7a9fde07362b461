/// Result canonicalization
///
/// Two hosts belong to the same group when their payloads are equal once
/// transient fields are cleared and unordered collections are sorted. The
/// canonical form is hashed so grouping never needs a deep comparison except
/// to confirm a key hit.
use crate::error::ReportResult;
use crate::types::{HostStorage, SmdDevice};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identity of a canonical payload (hex SHA-256 of its JSON form)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct ResultKey(String);

impl ResultKey {
    /// Key of a payload that is already canonical
    pub fn of(canonical: &HostStorage) -> ReportResult<Self> {
        let bytes = serde_json::to_vec(canonical)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(ResultKey(format!("{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a payload so equal content has exactly one representation.
///
/// Inner collections are sorted before the collections that contain them, so
/// the serialized tie-breaker of an outer entry is already canonical.
pub fn canonicalize(mut storage: HostStorage) -> ReportResult<HostStorage> {
    storage.collected_at = None;

    sort_canonical(&mut storage.scm_modules, |m| {
        (m.socket_id, m.controller_id, m.channel_id, m.channel_position, m.physical_id)
    })?;
    sort_canonical(&mut storage.scm_namespaces, |ns| (ns.numa_node, ns.blockdev.clone(), ns.uuid.clone()))?;
    sort_canonical(&mut storage.scm_mount_points, |m| m.path.clone())?;

    for ctrlr in &mut storage.nvme_devices {
        sort_canonical(&mut ctrlr.namespaces, |ns| ns.id)?;
        sort_smd_devices(&mut ctrlr.smd_devices)?;
    }
    sort_canonical(&mut storage.nvme_devices, |c| c.pci_addr.clone())?;

    if let Some(smd) = storage.smd_info.as_mut() {
        sort_smd_devices(&mut smd.devices)?;
        for ranks in smd.pools.values_mut() {
            sort_canonical(ranks, |p| p.rank)?;
        }
    }

    Ok(storage)
}

fn sort_smd_devices(devices: &mut Vec<SmdDevice>) -> ReportResult<()> {
    sort_canonical(devices, |d| (d.uuid.clone(), d.ctrlr.pci_addr.clone(), d.ctrlr_namespace_id))
}

/// Sort by a natural key, then by serialized form.
///
/// Entries that share a natural key (skipped `<nil>` controllers, devices
/// without a UUID) still end up in one order regardless of input order.
fn sort_canonical<T, K, F>(items: &mut Vec<T>, key: F) -> ReportResult<()>
where
    T: Serialize,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut keyed = items
        .drain(..)
        .map(|item| -> ReportResult<(K, Vec<u8>, T)> {
            let bytes = serde_json::to_vec(&item)?;
            Ok((key(&item), bytes, item))
        })
        .collect::<ReportResult<Vec<_>>>()?;
    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    items.extend(keyed.into_iter().map(|(_, _, item)| item));
    Ok(())
}

/// Canonicalize a payload and compute its key in one step.
pub fn key_of(storage: HostStorage) -> ReportResult<(ResultKey, HostStorage)> {
    let canonical = canonicalize(storage)?;
    let key = ResultKey::of(&canonical)?;
    Ok((key, canonical))
}
