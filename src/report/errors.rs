//! Error table rendering.

use crate::aggregate::HostErrorsMap;
use crate::console_format::ReportTable;

/// Render the `Errors:` block, or nothing when no host failed.
///
/// Rows are grouped by error text with compressed host ranges and the block
/// ends with a blank line separating it from the data that follows.
pub fn format_response_errors(errors: &HostErrorsMap) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut table = ReportTable::new(&["Hosts", "Error"]);
    for row in errors.rows() {
        table.add_row(vec![row.hosts, row.error]);
    }

    format!("Errors:\n{}\n", table.format(2))
}
