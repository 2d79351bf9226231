//! Info command - version and taxonomy overview

use super::super::output::write_output;

use crate::taxonomy::Industry;

/// Run the `info` command.
pub fn cmd_info() -> Result<(), String> {
    let mut out = format!("scorecard {}\n\n", env!("CARGO_PKG_VERSION"));
    out.push_str("Evaluation toolkit for document classification.\n\n");
    out.push_str(&format!(
        "Built-in industries: {} (each with a 12-category roster)\n",
        Industry::ALL.len()
    ));
    for industry in Industry::ALL {
        out.push_str(&format!("  {}\n", industry));
    }
    out.push_str("\nRun `scorecard categories` to see the rosters.\n");
    write_output(&out, None)
}
