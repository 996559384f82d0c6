//! Output formatting and display system
//!
//! Per-request lines are printed as each fetch completes; the summary block
//! (or the JSON report) follows once the batch is done.

mod colored;
mod formatter;
mod json;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter, DIVIDER_WIDTH};
pub use json::JsonReport;

use crate::{
    error::Result,
    executor::BatchReport,
    models::{Config, FetchResult},
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            ..FormattingOptions::default()
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false)
    }
}

/// Decides what reaches stdout for a run
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    json_output: bool,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self {
            formatter,
            json_output: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            formatter: OutputFormatterFactory::create_formatter(config.enable_color && !config.json_output),
            json_output: config.json_output,
        }
    }

    /// Line for a completed request; `None` in JSON mode
    pub fn display_result(&self, result: &FetchResult) -> Option<String> {
        if self.json_output {
            None
        } else {
            Some(self.formatter.format_result(result))
        }
    }

    /// Summary block, or the complete JSON document in JSON mode
    pub fn display_report(&self, report: &BatchReport) -> Result<String> {
        if self.json_output {
            let mut json = JsonReport::new(report).to_json_pretty()?;
            json.push('\n');
            Ok(json)
        } else {
            self.formatter.format_summary(&report.summary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchOutcome;
    use std::time::Duration;

    fn report() -> BatchReport {
        BatchReport::new(
            vec![FetchResult::new("http://a", FetchOutcome::success(200, Duration::from_millis(100)))],
            Duration::from_millis(120),
        )
    }

    #[test]
    fn test_text_mode() {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::create_plain_formatter());
        let report = report();

        assert_eq!(coordinator.display_result(&report.results[0]).unwrap(), "http://a 200 0.100s");
        let summary = coordinator.display_report(&report).unwrap();
        assert!(summary.starts_with(&"=".repeat(DIVIDER_WIDTH)));
        assert!(summary.contains("Processed: 1/1"));
    }

    #[test]
    fn test_json_mode_suppresses_lines() {
        let config = Config { json_output: true, ..Config::default() };
        let coordinator = OutputCoordinator::from_config(&config);
        let report = report();

        assert!(coordinator.display_result(&report.results[0]).is_none());
        let text = coordinator.display_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["processed"], 1);
    }
}
