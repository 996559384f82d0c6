//! Core formatting trait and the plain text implementation

use crate::{
    error::{AppError, Result},
    models::{FetchOutcome, FetchResult},
    stats::Summary,
};
use std::fmt::Write as _;

/// Width of the divider printed above the summary block
pub const DIVIDER_WIDTH: usize = 43;

/// Main trait for output formatting
pub trait OutputFormatter: Send + Sync {
    /// Format the line printed as a request completes
    fn format_result(&self, result: &FetchResult) -> String;

    /// Format the summary block printed after the batch
    fn format_summary(&self, summary: &Summary) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Digits after the decimal point for seconds
    pub precision: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: false,
            precision: 3,
        }
    }
}

/// One labelled line of the summary block
pub(crate) struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

/// The summary block as label/value pairs, shared by every text formatter
pub(crate) fn summary_lines(summary: &Summary, precision: usize) -> Vec<SummaryLine> {
    let secs = |value: f64| format!("{:.*}s", precision, value);

    let mut lines = vec![SummaryLine { label: "Total time", value: secs(summary.total_time) }];

    if let Some(latency) = &summary.latency {
        lines.push(SummaryLine { label: "Average response time", value: secs(latency.average) });
        lines.push(SummaryLine { label: "Median response time", value: secs(latency.median) });
        lines.push(SummaryLine { label: "90th percentile response time", value: secs(latency.p90) });
    }

    lines.push(SummaryLine {
        label: "Processed",
        value: format!("{}/{}", summary.processed, summary.total),
    });
    lines
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new(FormattingOptions::default())
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_result(&self, result: &FetchResult) -> String {
        match &result.outcome {
            FetchOutcome::Success { status, elapsed } => format!(
                "{} {} {:.*}s",
                result.url,
                status,
                self.options.precision,
                elapsed.as_secs_f64()
            ),
            FetchOutcome::Failure { kind } => format!("{} {}", result.url, kind),
        }
    }

    fn format_summary(&self, summary: &Summary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", "=".repeat(DIVIDER_WIDTH))
            .map_err(|e| AppError::internal(format!("Failed to format summary: {}", e)))?;

        for line in summary_lines(summary, self.options.precision) {
            writeln!(output, "{}: {}", line.label, line.value)
                .map_err(|e| AppError::internal(format!("Failed to format summary: {}", e)))?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchErrorKind;
    use crate::stats::LatencyStats;
    use std::time::Duration;

    #[test]
    fn test_result_lines() {
        let formatter = PlainFormatter::default();

        let ok = FetchResult::new("https://a.test/x", FetchOutcome::success(200, Duration::from_millis(123)));
        assert_eq!(formatter.format_result(&ok), "https://a.test/x 200 0.123s");

        let failed = FetchResult::new("https://b.test", FetchOutcome::failure(FetchErrorKind::Connect));
        assert_eq!(formatter.format_result(&failed), "https://b.test ConnectError");
    }

    #[test]
    fn test_summary_block_with_successes() {
        let summary = Summary {
            total_time: 0.3104,
            latency: Some(LatencyStats { average: 0.2, median: 0.2, p90: 0.28 }),
            processed: 3,
            total: 3,
        };

        let text = PlainFormatter::default().format_summary(&summary).unwrap();
        let expected = format!(
            "{}\nTotal time: 0.310s\nAverage response time: 0.200s\nMedian response time: 0.200s\n90th percentile response time: 0.280s\nProcessed: 3/3\n",
            "=".repeat(43)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_summary_block_without_successes() {
        let summary = Summary { total_time: 1.0, latency: None, processed: 0, total: 2 };

        let text = PlainFormatter::default().format_summary(&summary).unwrap();
        assert!(!text.contains("Average"));
        assert!(!text.contains("percentile"));
        assert!(text.ends_with("Total time: 1.000s\nProcessed: 0/2\n"));
    }

    #[test]
    fn test_custom_precision() {
        let formatter = PlainFormatter::new(FormattingOptions { precision: 1, ..FormattingOptions::default() });
        let ok = FetchResult::new("http://a", FetchOutcome::success(204, Duration::from_millis(1260)));
        assert_eq!(formatter.format_result(&ok), "http://a 204 1.3s");
    }
}
