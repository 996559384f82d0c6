//! Structured logging for urlstat
//!
//! Leveled log entries with structured fields, rendered as console text,
//! JSON or a compact single line. Everything goes to stderr: stdout is
//! reserved for the report.

use crate::models::{Config, FetchOutcome, FetchResult};
use crate::stats::Summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }

    /// ANSI color code for console output
    fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// One structured log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Component that emitted the entry
    pub logger: String,
    /// Sorted so console output is stable
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// One JSON object per line
    Json,
}

/// Leveled logger writing to stderr
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    session_id: Option<String>,
}

impl Logger {
    /// `--debug` selects debug level and JSON lines, `--verbose` info level;
    /// otherwise only warnings are written.
    pub fn with_config(name: &str, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            session_id: None,
        }
    }

    /// Tag every entry with `session_id`
    pub fn with_session(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder {
            logger: self,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message: message.to_string(),
                logger: self.name.clone(),
                fields: BTreeMap::new(),
            },
        }
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Rendered line, or `None` below the minimum level
    fn render(&self, mut entry: LogEntry) -> Option<String> {
        if !self.would_log(entry.level) {
            return None;
        }

        if let Some(session_id) = &self.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        Some(match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
        })
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");

        let level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), entry.level.as_str(), RESET)
        } else {
            format!("{:>5}", entry.level.as_str())
        };

        let mut output = format!("{} {} [{}] {}", timestamp, level, entry.logger, entry.message);

        if !entry.fields.is_empty() {
            let fields: Vec<String> = entry.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        serde_json::to_string(entry).unwrap_or_else(|_| {
            format!("{{\"error\": \"Failed to serialize log entry\", \"message\": {:?}}}", entry.message)
        })
    }
}

/// Collects structured fields before an entry is written
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl LogEntryBuilder<'_> {
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add the fields describing a fetch outcome
    pub fn outcome(self, outcome: &FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { status, elapsed } => self
                .field("success", true)
                .field("status", status)
                .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0),
            FetchOutcome::Failure { kind } => self
                .field("success", false)
                .field("error_kind", kind.name()),
        }
    }

    pub fn log(self) {
        if let Some(line) = self.logger.render(self.entry) {
            let _ = writeln!(io::stderr(), "{}", line);
        }
    }
}

/// Logs request traffic
pub struct NetworkLogger {
    logger: Logger,
}

impl NetworkLogger {
    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// Successes at debug, failures at info
    pub fn log_fetch(&self, result: &FetchResult) {
        let level = if result.is_success() { LogLevel::Debug } else { LogLevel::Info };

        self.logger.log(level, &format!("GET {}", result))
            .field("url", &result.url)
            .outcome(&result.outcome)
            .log();
    }

    pub fn log_batch(&self, summary: &Summary) {
        let message = format!(
            "Batch finished: {}/{} processed in {:.3}s",
            summary.processed, summary.total, summary.total_time
        );

        let mut builder = self.logger.info(&message)
            .field("processed", summary.processed)
            .field("total", summary.total)
            .field("success_rate", summary.success_rate())
            .field("total_time_seconds", summary.total_time);

        if let Some(latency) = &summary.latency {
            builder = builder
                .field("avg_seconds", latency.average)
                .field("p50_seconds", latency.median)
                .field("p90_seconds", latency.p90);
        }

        builder.log();
    }
}

/// Creates loggers that share one session id per run
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn create_logger(&self, name: &str) -> Logger {
        Logger::with_config(name, &self.config).with_session(&self.session_id)
    }

    pub fn create_network_logger(&self) -> NetworkLogger {
        NetworkLogger::from_logger(self.create_logger("NET"))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
