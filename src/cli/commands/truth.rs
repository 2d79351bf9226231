//! Truth command - manage the ground-truth store

use clap::{Parser, Subcommand};

use super::super::output::{log_info, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::parse_metadata;

use crate::truth::GroundTruthStore;

/// Manage the ground-truth store
#[derive(Parser, Debug)]
pub struct TruthArgs {
    /// Ground-truth store file
    #[arg(short, long, default_value = "ground_truth.json", value_name = "PATH")]
    pub store: String,

    #[command(subcommand)]
    pub command: TruthCommand,
}

/// Ground-truth store operations.
#[derive(Subcommand, Debug)]
pub enum TruthCommand {
    /// Add or overwrite the label for a document
    Add {
        /// Document identifier
        document_id: String,
        /// Correct category
        category: String,
        /// Metadata entry (repeatable)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,
        /// Minimal output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Look up the label for a document
    Get {
        /// Document identifier
        document_id: String,
    },

    /// List all entries with per-category counts
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Seed the store with a small labeled example set
    Sample {
        /// Minimal output
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Run the `truth` command.
pub fn cmd_truth(args: TruthArgs) -> Result<(), String> {
    let mut store = GroundTruthStore::open(&args.store).map_err(|e| e.to_string())?;

    match args.command {
        TruthCommand::Add {
            document_id,
            category,
            meta,
            quiet,
        } => {
            let metadata = parse_metadata(&meta)?;
            let metadata = if metadata.is_empty() {
                None
            } else {
                Some(metadata)
            };
            store
                .add(&document_id, &category, metadata)
                .map_err(|e| e.to_string())?;
            log_info(
                &format!("Labeled {} as {} ({} entries)", document_id, category, store.len()),
                quiet,
            );
            Ok(())
        }

        TruthCommand::Get { document_id } => match store.get(&document_id) {
            Some(category) => write_output(&format!("{}\n", category), None),
            None => Err(format!("No ground truth recorded for {}", document_id)),
        },

        TruthCommand::List { format } => {
            let dataset = store.materialize();
            let rendered = match format {
                OutputFormat::Human => {
                    if dataset.documents.is_empty() {
                        "Ground-truth store is empty.\n".to_string()
                    } else {
                        let mut out =
                            format!("{} labeled documents:\n\n", dataset.total_documents);
                        for doc in &dataset.documents {
                            out.push_str(&format!(
                                "  {}  ->  {}\n",
                                doc.document_id, doc.true_category
                            ));
                        }
                        out.push_str("\nPer category:\n");
                        for (category, count) in &dataset.categories {
                            out.push_str(&format!("  {:>4}  {}\n", count, category));
                        }
                        out
                    }
                }
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&dataset)
                        .map_err(|e| format!("Failed to serialize dataset: {}", e))?;
                    json.push('\n');
                    json
                }
            };
            write_output(&rendered, None)
        }

        TruthCommand::Sample { quiet } => {
            let written = store.seed_sample().map_err(|e| e.to_string())?;
            log_info(
                &format!("Seeded {} sample entries into {}", written, args.store),
                quiet,
            );
            Ok(())
        }
    }
}
