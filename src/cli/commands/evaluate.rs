//! Evaluate command - score predictions against ground truth

use clap::Parser;

use super::super::output::{log_info, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::read_input;

use crate::eval::{EvalOptions, Evaluator, PredictionRecord};
use crate::taxonomy::{Industry, Taxonomy};

/// Score predictions against ground truth and build a report
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// JSONL predictions file (one record per line); stdin when omitted
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Industry roster to score against
    #[arg(short, long, default_value = "general")]
    pub industry: String,

    /// Explicit category roster entry (repeatable, overrides --industry)
    #[arg(short = 'c', long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Route off-roster labels to the Other bucket instead of failing
    #[arg(long)]
    pub fallback_other: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Also save the report as JSON to this path (atomic write)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the `evaluate` command.
pub fn cmd_evaluate(args: EvaluateArgs) -> Result<(), String> {
    let taxonomy = build_taxonomy(&args.industry, &args.categories)?;

    let options = if args.fallback_other {
        EvalOptions::lenient()
    } else {
        EvalOptions::strict()
    };
    let mut evaluator = Evaluator::with_options(taxonomy, options).map_err(|e| e.to_string())?;

    let input = read_input(args.file.as_deref())?;
    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: PredictionRecord = serde_json::from_str(line)
            .map_err(|e| format!("Invalid record on line {}: {}", line_no + 1, e))?;
        evaluator
            .record(&record.predicted, &record.actual, record.latency_seconds)
            .map_err(|e| format!("Invalid record on line {}: {}", line_no + 1, e))?;
    }

    let report = evaluator.report().map_err(|e| e.to_string())?;

    if let Some(path) = &args.output {
        report.save(path).map_err(|e| e.to_string())?;
        log_info(&format!("Report saved to {}", path), args.quiet);
    }

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

fn build_taxonomy(industry: &str, categories: &[String]) -> Result<Taxonomy, String> {
    if categories.is_empty() {
        let industry: Industry = industry.parse().map_err(|e: crate::Error| e.to_string())?;
        Ok(Taxonomy::for_industry(industry))
    } else {
        Taxonomy::custom(categories.iter().cloned()).map_err(|e| e.to_string())
    }
}
