//! Structured logging setup for registrar
//!
//! Logging uses the `tracing` ecosystem and always writes to stderr, so the
//! `list` command's stdout and the generated file are never mixed with log
//! lines.
//!
//! # Example
//!
//! ```no_run
//! use registrar::util::logging::{self, LoggingConfig};
//! use tracing::Level;
//!
//! logging::init_logging(LoggingConfig::with_level(Level::DEBUG));
//!
//! use tracing::{debug, info};
//! info!("Generator started");
//! debug!(input = "comac-boilerplate.c", "Scanning input");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Default level for command-line runs; build logs stay quiet unless asked
pub const DEFAULT_CLI_LEVEL: Level = Level::WARN;

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., registrar::registration) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level name, case-insensitively
///
/// Used as the `--log-level` value parser, so a bad value is a usage error.
///
/// ```
/// use registrar::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Ok(Level::DEBUG));
/// assert_eq!(parse_level("WARN"), Ok(Level::WARN));
/// assert!(parse_level("loud").is_err());
/// ```
pub fn parse_level(level_str: &str) -> Result<Level, String> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(format!(
            "invalid log level '{}' (expected trace, debug, info, warn or error)",
            level_str
        )),
    }
}

/// Level named by `REGISTRAR_LOG_LEVEL`, if set to a valid name
///
/// Invalid values are ignored so nothing is printed ahead of a run's own
/// diagnostic.
fn env_level() -> Option<Level> {
    env::var("REGISTRAR_LOG_LEVEL")
        .ok()
        .and_then(|v| parse_level(&v).ok())
}

/// Picks the level for a command-line run
///
/// Precedence: `--log-level`, then `-v`/`-q`, then `REGISTRAR_LOG_LEVEL`,
/// then [`DEFAULT_CLI_LEVEL`].
pub fn cli_level(log_level: Option<Level>, verbose: bool, quiet: bool) -> Level {
    if let Some(level) = log_level {
        level
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        env_level().unwrap_or(DEFAULT_CLI_LEVEL)
    }
}

/// Initializes the logging system with the provided configuration
///
/// Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env().add_directive(
            format!("registrar={}", config.level)
                .parse()
                .expect("valid directive"),
        );

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes logging for a command-line run
pub fn init_for_cli(log_level: Option<Level>, verbose: bool, quiet: bool) {
    let config = LoggingConfig {
        level: cli_level(log_level, verbose, quiet),
        ..config_from_env()
    };
    init_logging(config);
}

fn config_from_env() -> LoggingConfig {
    let use_json = env::var("REGISTRAR_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        use_json,
        include_location: use_json,
        ..LoggingConfig::with_level(env_level().unwrap_or(Level::INFO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Ok(Level::TRACE));
        assert_eq!(parse_level("debug"), Ok(Level::DEBUG));
        assert_eq!(parse_level("info"), Ok(Level::INFO));
        assert_eq!(parse_level("warn"), Ok(Level::WARN));
        assert_eq!(parse_level("error"), Ok(Level::ERROR));
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Ok(Level::TRACE));
        assert_eq!(parse_level("Debug"), Ok(Level::DEBUG));
    }

    #[test]
    fn test_parse_level_invalid() {
        assert!(parse_level("invalid").unwrap_err().contains("invalid log level 'invalid'"));
        assert!(parse_level("").is_err());
    }

    #[test]
    #[serial]
    fn test_cli_level_precedence() {
        let _guard = EnvGuard::set("REGISTRAR_LOG_LEVEL", "trace");

        assert_eq!(cli_level(Some(Level::ERROR), true, false), Level::ERROR);
        assert_eq!(cli_level(None, true, false), Level::DEBUG);
        assert_eq!(cli_level(None, false, true), Level::ERROR);
        assert_eq!(cli_level(None, false, false), Level::TRACE);
    }

    #[test]
    #[serial]
    fn test_cli_level_default() {
        let _guard = EnvGuard::unset("REGISTRAR_LOG_LEVEL");
        assert_eq!(cli_level(None, false, false), Level::WARN);
    }

    #[test]
    #[serial]
    fn test_invalid_env_level_is_ignored() {
        let _guard = EnvGuard::set("REGISTRAR_LOG_LEVEL", "chatty");
        assert_eq!(cli_level(None, false, false), DEFAULT_CLI_LEVEL);
        assert_eq!(config_from_env().level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        let _guards = vec![
            EnvGuard::set("REGISTRAR_LOG_LEVEL", "debug"),
            EnvGuard::set("REGISTRAR_LOG_JSON", "true"),
        ];

        let config = config_from_env();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.use_json);
        assert!(config.include_location);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }
}
