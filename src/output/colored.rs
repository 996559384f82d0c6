//! Colored formatter implementation with terminal color support

use super::formatter::{summary_lines, FormattingOptions, OutputFormatter, DIVIDER_WIDTH};
use crate::{
    error::{AppError, Result},
    models::{FetchOutcome, FetchResult},
    stats::Summary,
    types::{LatencyBand, StatusClass},
};
use colored::*;
use std::fmt::Write as _;

impl LatencyBand {
    /// Get color for this latency band
    pub fn color(&self) -> Color {
        match self {
            Self::Fast => Color::Green,
            Self::Moderate => Color::Cyan,
            Self::Slow => Color::Yellow,
            Self::VerySlow => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub success: Color,
    pub redirect: Color,
    pub client_error: Color,
    pub server_error: Color,
    pub failure: Color,
    pub label: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            redirect: Color::Cyan,
            client_error: Color::Yellow,
            server_error: Color::Red,
            failure: Color::Red,
            label: Color::Blue,
            border: Color::BrightBlack,
        }
    }
}

impl ColorScheme {
    fn status_color(&self, status: u16) -> Color {
        match StatusClass::from_code(status) {
            StatusClass::Success => self.success,
            StatusClass::Redirection => self.redirect,
            StatusClass::ClientError => self.client_error,
            StatusClass::ServerError => self.server_error,
            StatusClass::Informational | StatusClass::Unknown => Color::White,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self::with_color_scheme(options, ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        Self { options, color_scheme }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_result(&self, result: &FetchResult) -> String {
        match &result.outcome {
            FetchOutcome::Success { status, elapsed } => {
                let secs = format!("{:.*}s", self.options.precision, elapsed.as_secs_f64());
                let band = LatencyBand::from_duration(*elapsed);
                format!(
                    "{} {} {}",
                    result.url,
                    self.colorize(&status.to_string(), self.color_scheme.status_color(*status)),
                    self.colorize(&secs, band.color())
                )
            }
            FetchOutcome::Failure { kind } => {
                format!("{} {}", result.url, self.colorize(kind.name(), self.color_scheme.failure))
            }
        }
    }

    fn format_summary(&self, summary: &Summary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", self.colorize(&"=".repeat(DIVIDER_WIDTH), self.color_scheme.border))
            .map_err(|e| AppError::internal(format!("Failed to format summary: {}", e)))?;

        for line in summary_lines(summary, self.options.precision) {
            let value = if line.label == "Processed" {
                let color = if summary.all_succeeded() { self.color_scheme.success } else { self.color_scheme.client_error };
                self.colorize(&line.value, color)
            } else {
                self.bold(&line.value)
            };

            writeln!(output, "{}: {}", self.colorize(line.label, self.color_scheme.label), value)
                .map_err(|e| AppError::internal(format!("Failed to format summary: {}", e)))?;
        }

        Ok(output)
    }
}
