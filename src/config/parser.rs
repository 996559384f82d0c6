//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
};
use std::io::IsTerminal;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::config)?;

        // Load from environment file if it exists
        EnvManager::load_env_file(self.cli.debug)?;

        self.parse_with(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
    }

    /// Build the configuration from an explicit variable lookup.
    ///
    /// `stdout_is_terminal` decides automatic color when neither `--color`
    /// nor `--no-color` was given.
    pub fn parse_with<F>(&self, lookup: F, stdout_is_terminal: bool) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config, stdout_is_terminal);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config, stdout_is_terminal: bool) {
        config.urls_path = self.cli.urls_path.clone();

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(max_connections) = self.cli.max_connections {
            config.max_connections = max_connections;
        }

        if let Some(max_keep_alive) = self.cli.max_keep_alive {
            config.max_keep_alive = max_keep_alive;
        }

        if let Some(allow_redirects) = self.cli.allow_redirects {
            config.allow_redirects = allow_redirects;
        }

        config.enable_color = match self.cli.color_choice() {
            Some(forced) => forced,
            None => config.enable_color && stdout_is_terminal,
        };

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.json_output = self.cli.json;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("URL file: {}", config.urls_path.display()),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("Max connections: {}", config.max_connections),
        format!("Max keep-alive: {}", config.max_keep_alive),
        format!("Allow redirects: {}", config.allow_redirects),
        format!("Color Output: {}", config.enable_color),
        format!("JSON Output: {}", config.json_output),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
