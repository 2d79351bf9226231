//! Categories command - list industries and their rosters

use clap::Parser;

use super::super::output::write_output;
use super::super::parser::OutputFormat;

use crate::taxonomy::Industry;

/// List industries and their category rosters
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Show a single industry's roster
    #[arg(short, long)]
    pub industry: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Run the `categories` command.
pub fn cmd_categories(args: CategoriesArgs) -> Result<(), String> {
    let industries: Vec<Industry> = match &args.industry {
        Some(name) => vec![name.parse().map_err(|e: crate::Error| e.to_string())?],
        None => Industry::ALL.to_vec(),
    };

    let rendered = match args.format {
        OutputFormat::Human => {
            let mut out = String::new();
            for industry in &industries {
                out.push_str(&format!("{}:\n", industry));
                for label in industry.categories() {
                    match industry.description(label) {
                        Some(description) => {
                            out.push_str(&format!("  {:<28}  {}\n", label, description));
                        }
                        None => out.push_str(&format!("  {}\n", label)),
                    }
                }
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => {
            let listing: Vec<serde_json::Value> = industries
                .iter()
                .map(|industry| {
                    serde_json::json!({
                        "industry": industry.as_str(),
                        "categories": industry.categories(),
                    })
                })
                .collect();
            let mut json = serde_json::to_string_pretty(&listing)
                .map_err(|e| format!("Failed to serialize categories: {}", e))?;
            json.push('\n');
            json
        }
    };
    write_output(&rendered, None)
}
