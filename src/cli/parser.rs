//! CLI argument parsing and structure definitions

use clap::{Parser, Subcommand, ValueEnum};

/// Document-classification evaluation CLI
#[derive(Parser)]
#[command(name = "scorecard")]
#[command(
    author,
    version,
    about = "Document-classification evaluation CLI - metrics, error analysis, ground truth",
    long_about = r#"
scorecard - an evaluation toolkit for document classification

CAPABILITIES:
  • Metrics - accuracy, per-class precision/recall/F1, macro/weighted averages
  • Confusion matrix - roster-ordered, rendered or serialized
  • Error analysis - ranked actual→predicted patterns, sample mismatches
  • Latency profiling - mean/median/std/p95/p99/throughput
  • Ground truth - persistent document-id → category store

INPUT FORMAT (evaluate):
  JSONL, one record per line:
    {"predicted": "Finance", "actual": "Finance", "latency_seconds": 2.5}

EXAMPLES:
  scorecard evaluate -f predictions.jsonl
  scorecard evaluate -f predictions.jsonl --industry legal -o report.json
  scorecard report report.json
  scorecard truth add invoice_001.pdf Finance -m type=invoice
  scorecard truth list
  scorecard categories --industry healthcare
  scorecard info
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Score predictions against ground truth and build a report
    #[command(visible_alias = "e")]
    Evaluate(crate::cli::commands::EvaluateArgs),

    /// Render a previously saved evaluation report
    #[command(visible_alias = "r")]
    Report(crate::cli::commands::ReportArgs),

    /// Manage the ground-truth store
    #[command(visible_alias = "t")]
    Truth(crate::cli::commands::TruthArgs),

    /// List industries and their category rosters
    #[command(visible_alias = "c")]
    Categories(crate::cli::commands::CategoriesArgs),

    /// Show version and taxonomy info
    #[command(visible_alias = "i")]
    Info,
}

/// Unified output format selection for all commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}
