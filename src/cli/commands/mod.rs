//! Command implementations for the scorecard CLI
//!
//! Each command has its own module/file for better organization.

pub mod categories;
pub mod evaluate;
pub mod info;
pub mod report;
pub mod truth;

// Re-export argument types for parser
pub use categories::{cmd_categories, CategoriesArgs};
pub use evaluate::{cmd_evaluate, EvaluateArgs};
pub use info::cmd_info;
pub use report::{cmd_report, ReportArgs};
pub use truth::{cmd_truth, TruthArgs};
