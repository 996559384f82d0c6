//! Command-line interface

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Fetch every URL in a file concurrently and report response time statistics
#[derive(Parser, Debug, Clone)]
#[command(name = "urlstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "The keep-alive limit may also be given as -ka <N>.")]
pub struct Cli {
    /// File with one URL per line; blank lines are ignored
    #[arg(value_name = "URLS_PATH")]
    pub urls_path: PathBuf,

    /// Request timeout in seconds [default: 30]
    #[arg(short, long, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Maximum number of concurrent connections [default: 300]
    #[arg(short, long, value_name = "N")]
    pub max_connections: Option<usize>,

    /// Maximum number of idle keep-alive connections [default: 30]
    #[arg(short = 'k', long, value_name = "N")]
    pub max_keep_alive: Option<usize>,

    /// Follow HTTP redirects: true/false, yes/no, on/off, 1/0 [default: true]
    #[arg(short = 'r', long, value_name = "BOOL", value_parser = parse_bool)]
    pub allow_redirects: Option<bool>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print a single JSON report instead of text lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse the process arguments, accepting `-ka` for the keep-alive limit
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Fallible variant of [`Cli::parse_args`] over explicit arguments
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.urls_path.as_os_str().is_empty() {
            return Err("URL file path must not be empty".to_string());
        }

        Ok(())
    }

    /// Explicit color choice, if any
    pub fn color_choice(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command line:\n");
        summary.push_str(&format!("  URL file: {}\n", self.urls_path.display()));
        if let Some(timeout) = self.timeout {
            summary.push_str(&format!("  Timeout: {}s\n", timeout));
        }
        if let Some(max_connections) = self.max_connections {
            summary.push_str(&format!("  Max connections: {}\n", max_connections));
        }
        if let Some(max_keep_alive) = self.max_keep_alive {
            summary.push_str(&format!("  Max keep-alive: {}\n", max_keep_alive));
        }
        if let Some(allow_redirects) = self.allow_redirects {
            summary.push_str(&format!("  Allow redirects: {}\n", allow_redirects));
        }

        summary
    }
}

/// Rewrite `-ka` (not expressible as a clap short flag) to `--max-keep-alive`.
///
/// Arguments after a bare `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some("-ka") => OsString::from("--max-keep-alive"),
                Some(s) if s.starts_with("-ka=") => OsString::from(format!("--max-keep-alive={}", &s[4..])),
                _ => arg,
            }
        })
        .collect()
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else {
                Ok(secs)
            }
        })
}

fn parse_bool(s: &str) -> Result<bool, String> {
    crate::models::config::parse_flag(s)
        .ok_or_else(|| format!("Invalid boolean '{}': expected true/false, yes/no, on/off or 1/0", s))
}
