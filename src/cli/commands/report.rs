//! Report command - render a previously saved evaluation report

use clap::Parser;

use super::super::output::write_output;
use super::super::parser::OutputFormat;

use crate::eval::EvaluationReport;

/// Render a previously saved evaluation report
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Saved report JSON file
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Run the `report` command.
pub fn cmd_report(args: ReportArgs) -> Result<(), String> {
    let report = EvaluationReport::load(&args.path).map_err(|e| e.to_string())?;
    let rendered = match args.format {
        OutputFormat::Human => report.summary(),
        OutputFormat::Json => {
            let mut json = report.to_json().map_err(|e| e.to_string())?;
            json.push('\n');
            json
        }
    };
    write_output(&rendered, None)
}
