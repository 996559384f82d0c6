//! Machine-readable report written once the batch has finished

use crate::{
    error::Result,
    executor::BatchReport,
    models::FetchResult,
    stats::Summary,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSON document describing one run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub results: &'a [FetchResult],
    pub summary: &'a Summary,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a BatchReport) -> Self {
        Self {
            tool: crate::PKG_NAME,
            version: crate::VERSION,
            generated_at: Utc::now(),
            results: &report.results,
            summary: &report.summary,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
