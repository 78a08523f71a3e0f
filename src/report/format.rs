//! Output formatting
//!
//! Renders aggregate tables and views as aligned text tables, JSON or CSV.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

use crate::analytics::AggregateTable;
use crate::dataset::DatasetSummary;

use super::views::ViewReport;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Invalid format '{}'. Use: table, json, csv", other)),
        }
    }
}

/// Errors raised while rendering output
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output is not valid UTF-8")]
    Utf8,
}

/// Render an aggregate in the requested format
pub fn render_aggregate(table: &AggregateTable, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table)?),
        OutputFormat::Csv => aggregate_to_csv(table),
        OutputFormat::Table => Ok(text_table(table)),
    }
}

/// Render a whole view in the requested format
pub fn render_view(report: &ViewReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => {
            let mut blocks = Vec::new();
            if let Some(overview) = &report.overview {
                blocks.push(format!("# Overview\n{}", overview_csv(overview)?));
            }
            for section in &report.sections {
                blocks.push(format!("# {}\n{}", section.heading, aggregate_to_csv(&section.table)?));
            }
            Ok(blocks.join("\n"))
        }
        OutputFormat::Table => Ok(view_text(report)),
    }
}

/// Serialize the flattened aggregate as CSV with a header row
pub fn aggregate_to_csv(table: &AggregateTable) -> Result<String, FormatError> {
    write_csv(&table.headers(), table.rows())
}

fn overview_csv(overview: &DatasetSummary) -> Result<String, FormatError> {
    let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    write_csv(
        &["metric", "value"],
        vec![
            vec!["daily_records".to_string(), overview.daily_records.to_string()],
            vec!["hourly_records".to_string(), overview.hourly_records.to_string()],
            vec!["first_date".to_string(), date(overview.first_date)],
            vec!["last_date".to_string(), date(overview.last_date)],
        ],
    )
}

fn write_csv(headers: &[&str], rows: Vec<Vec<String>>) -> Result<String, FormatError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Csv(csv::Error::from(e.into_error())))?;
    String::from_utf8(bytes).map_err(|_| FormatError::Utf8)
}

/// Aligned plain-text table
pub fn text_table(table: &AggregateTable) -> String {
    let rows = table.rows();
    if rows.is_empty() {
        return "No data\n".to_string();
    }

    let headers = table.headers();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let line = |cells: Vec<&str>, out: &mut String| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
    };

    line(headers.clone(), &mut out);
    let total_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(total_width));
    for row in &rows {
        line(row.iter().map(String::as_str).collect(), &mut out);
    }

    out
}

fn view_text(report: &ViewReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "{}", "=".repeat(report.title.len()));

    if let Some(overview) = &report.overview {
        out.push('\n');
        let _ = writeln!(out, "Daily records:  {}", overview.daily_records);
        let _ = writeln!(out, "Hourly records: {}", overview.hourly_records);
        if let (Some(first), Some(last)) = (overview.first_date, overview.last_date) {
            let _ = writeln!(out, "Date range:     {} to {}", first, last);
        }
    }

    for section in &report.sections {
        out.push('\n');
        let _ = writeln!(out, "{}", section.heading);
        let _ = writeln!(out, "{}", "-".repeat(section.heading.len()));
        out.push_str(&text_table(&section.table));
        out.push('\n');
        out.push_str("Insight:\n");
        for insight in &section.insights {
            let _ = writeln!(out, "  - {}", insight);
        }
    }

    out
}
