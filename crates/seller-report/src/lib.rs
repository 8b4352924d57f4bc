//! Output artifacts for seller data.
//!
//! - **Templates**: header-only CSV files users fill in before importing
//! - **Exports**: records written as CSV with formula cells neutralized
//! - **Performance reports**: plain-text PPC summaries

mod common;
mod export;
mod report;
mod template;

pub use common::{dated_file_name, ensure_parent_dir, format_count, format_money};
pub use export::{export_file_name, export_records, neutralize_formula, write_export};
pub use report::{CampaignSummary, PerformanceReport};
pub use template::{template_csv, template_file_name, write_template};
