//! JSON export of aggregated results.
//!
//! The document carries the same groups, in the same order, as the text
//! reports so scripts can consume a report without parsing tables.

use crate::aggregate::Aggregated;
use crate::error::ReportResult;

/// Export aggregated results as pretty-printed JSON.
///
/// Shape: `{"errors": [{"hosts", "error"}], "groups": [{"hosts", "key", "storage"}]}`
pub fn export_json_report(aggregated: &Aggregated) -> ReportResult<String> {
    use serde_json::json;

    let report = json!({
        "errors": aggregated.errors.rows(),
        "groups": aggregated.groups,
    });

    let mut output = serde_json::to_string_pretty(&report)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::*;
    use crate::types::*;

    #[test]
    fn test_export_empty() {
        let json: serde_json::Value = serde_json::from_str(&export_json_report(&Aggregated::default()).unwrap()).unwrap();
        assert_eq!(json["errors"].as_array().unwrap().len(), 0);
        assert_eq!(json["groups"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_export_groups_and_errors() {
        let aggregated = aggregated(vec![
            HostRecord::with_storage("host1", standard()),
            HostRecord::with_storage("host2", standard()),
            HostRecord::with_error("host3", "failed"),
        ]);

        let output = export_json_report(&aggregated).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["errors"][0]["hosts"], "host3");
        assert_eq!(json["errors"][0]["error"], "failed");
        assert_eq!(json["groups"][0]["hosts"], "host[1-2]");
        assert_eq!(json["groups"][0]["key"], aggregated.groups[0].key.as_str());
        assert_eq!(json["groups"][0]["storage"]["nvme_devices"][0]["pci_addr"], "0000:01:00.0");
        assert!(output.ends_with("}\n"));
    }
}
