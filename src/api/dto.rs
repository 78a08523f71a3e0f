//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not
//! already plain summary tables.

use serde::{Deserialize, Serialize};

use crate::analytics::AggregateKind;
use crate::report::View;

/// Query parameters for aggregate requests
#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    /// Output format: json or csv
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// Entry of the view listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewInfo {
    pub slug: String,
    pub title: String,
}

impl From<View> for ViewInfo {
    fn from(view: View) -> Self {
        Self {
            slug: view.slug().to_string(),
            title: view.title().to_string(),
        }
    }
}

/// Entry of the aggregate listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AggregateInfo {
    pub name: String,
    pub description: String,
}

impl From<AggregateKind> for AggregateInfo {
    fn from(kind: AggregateKind) -> Self {
        Self {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded"
    pub status: String,
    pub daily_records: usize,
    pub hourly_records: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
