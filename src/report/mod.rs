//! Dashboard Reports
//!
//! The hand-off point to any presentation layer:
//!
//! - **views**: Sidebar pages bundling aggregates with insights
//! - **format**: Text table, JSON and CSV rendering

pub mod format;
pub mod views;

pub use format::{
    aggregate_to_csv, render_aggregate, render_view, text_table, FormatError, OutputFormat,
};
pub use views::{build_view, View, ViewReport, ViewSection, NO_DATA};
