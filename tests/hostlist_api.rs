/// Tests for the public hostlist API
///
/// Compression and expansion are used directly by scripts that post-process
/// JSON reports, so they are checked here through the library crate.
use fleet_report::hostlist::{HostSet, MAX_RANGE_SPAN, compress, expand};
use std::collections::BTreeSet;

#[test]
fn test_compress_then_expand_restores_hosts() {
    let hosts: Vec<String> = (1..=8).filter(|i| i % 4 != 0).map(|i| format!("node{:02}.ib", i)).collect();

    let compressed = compress(&hosts).unwrap();
    assert_eq!(compressed, "node[01-03,05-07].ib");

    let expected: BTreeSet<String> = hosts.into_iter().collect();
    assert_eq!(expand(&compressed).unwrap(), expected);
}

#[test]
fn test_host_set_from_range_notation() {
    let set = HostSet::parse("rack1-host[1-3],login").unwrap();
    assert_eq!(set.len(), 4);
    assert!(!set.is_empty());
    assert_eq!(set.hosts(), vec!["login", "rack1-host1", "rack1-host2", "rack1-host3"]);
    assert_eq!(set.to_string(), "login,rack1-host[1-3]");
}

#[test]
fn test_expand_rejects_notation_compress_never_produces() {
    assert!(expand("host[1-2]x9").is_err());
    assert!(expand(&format!("host[1-{}]", MAX_RANGE_SPAN + 1)).is_err());
}
