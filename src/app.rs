//! Main application orchestration and execution

use crate::{
    client::{FetchConfig, HttpFetcher, UrlClient},
    config::{display_config_summary, validate_config, ConfigValidator, ValidationLevel, ValidationWarning},
    error::{AppError, Result},
    executor::{BatchReport, Dispatcher},
    logging::{Logger, LoggerFactory},
    models::Config,
    output::OutputCoordinator,
    source::read_urls,
};
use std::cell::RefCell;
use std::io::Write;
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    fetcher: Arc<dyn HttpFetcher>,
}

impl App {
    /// Create the application with a reqwest client built from `config`
    pub fn new(config: Config) -> Result<Self> {
        let client = UrlClient::new(FetchConfig::from(&config))?;
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    /// Create the application around any fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one batch, writing the report to `out`.
    ///
    /// The URL file is read completely before the first request; a missing
    /// file fails without any network activity.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<BatchReport> {
        let factory = LoggerFactory::new(self.config.clone());
        let logger = factory.create_logger("APP");

        logger.info(&format!("{} v{}", crate::PKG_NAME, crate::VERSION)).log();
        logger.debug(&format!("Configuration:\n{}", display_config_summary(&self.config)))
            .log();

        for warning in validate_config(&self.config)? {
            log_warning(&logger, &warning);
        }

        let urls = read_urls(&self.config.urls_path)?;
        for warning in ConfigValidator::validate_url_entries(&urls) {
            log_warning(&logger, &warning);
        }

        logger.info(&format!("Fetching {} URLs", urls.len()))
            .field("max_connections", self.config.max_connections)
            .field("max_keep_alive", self.config.max_keep_alive)
            .log();

        let dispatcher = Dispatcher::new(self.fetcher.clone(), self.config.max_connections)
            .with_logger(factory.create_network_logger());
        let coordinator = OutputCoordinator::from_config(&self.config);

        let sink = RefCell::new(LineSink { out: &mut *out, error: None });
        let report = dispatcher
            .run(urls, |result| {
                if let Some(line) = coordinator.display_result(result) {
                    sink.borrow_mut().write_line(&line);
                }
            })
            .await;

        let sink = sink.into_inner();
        if let Some(e) = sink.error {
            return Err(AppError::io(format!("Failed to write output: {}", e)));
        }

        let summary = coordinator.display_report(&report)?;
        out.write_all(summary.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| AppError::io(format!("Failed to write output: {}", e)))?;

        Ok(report)
    }
}

/// Writer for per-request lines; keeps the first failure and drops later lines
struct LineSink<'a, W: Write> {
    out: &'a mut W,
    error: Option<std::io::Error>,
}

impl<W: Write> LineSink<'_, W> {
    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            self.error = Some(e);
        }
    }
}

fn log_warning(logger: &Logger, warning: &ValidationWarning) {
    let message = warning.format();
    match warning.level {
        ValidationLevel::Warning => logger.warn(&message).log(),
        ValidationLevel::Info => logger.info(&message).log(),
    }
}
