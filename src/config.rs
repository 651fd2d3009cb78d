//! Configuration management for registrar
//!
//! A generator run is described by a [`GeneratorConfig`]: the [`MarkerProfile`]
//! naming convention plus the [`DuplicatePolicy`]. Profiles come either from the
//! built-in set or from a TOML file.
//!
//! # Built-in profiles
//!
//! - `boilerplate`: `COMAC_BOILERPLATE` markers, `_comac_boilerplate_register_all`
//! - `test`: `COMAC_TEST` markers, `_comac_test_runner_register_tests`
//!
//! # Profile files
//!
//! ```toml
//! duplicates = "reject"
//!
//! [profile]
//! name = "widgets"
//! sentinel = "WIDGET_REGISTER"
//! aggregate_function = "_widgets_register_all"
//! private_header = "widgets-private.h"
//! ```
//!
//! `symbol_prefix` defaults to `_register_` and `tool_name` to `registrar`.
//!
//! Configuration never reads environment variables; the generated output
//! depends only on the profile and the input files.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SYMBOL_PREFIX: &str = "_register_";
const DEFAULT_TOOL_NAME: &str = "registrar";

/// Names of the built-in profiles, in display order
pub const BUILTIN_PROFILES: &[&str] = &["boilerplate", "test"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown profile: {0}. Valid options: {}", BUILTIN_PROFILES.join(", "))]
    UnknownProfile(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Naming convention for one scan/emit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerProfile {
    #[serde(default = "default_profile_name")]
    pub name: String,

    /// Literal prefix that identifies a marker line
    pub sentinel: String,

    /// Prepended to each registration name to form the declared symbol
    #[serde(default = "default_symbol_prefix")]
    pub symbol_prefix: String,

    /// Name of the generated function that calls every registration
    pub aggregate_function: String,

    /// Header included by the generated translation unit
    pub private_header: String,

    /// Named in the provenance comment
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
}

fn default_profile_name() -> String {
    "custom".to_string()
}

fn default_symbol_prefix() -> String {
    DEFAULT_SYMBOL_PREFIX.to_string()
}

fn default_tool_name() -> String {
    DEFAULT_TOOL_NAME.to_string()
}

impl MarkerProfile {
    /// Profile for backend constructors (`COMAC_BOILERPLATE (name, targets)`)
    pub fn boilerplate() -> Self {
        Self {
            name: "boilerplate".to_string(),
            sentinel: "COMAC_BOILERPLATE".to_string(),
            symbol_prefix: default_symbol_prefix(),
            aggregate_function: "_comac_boilerplate_register_all".to_string(),
            private_header: "comac-boilerplate-private.h".to_string(),
            tool_name: default_tool_name(),
        }
    }

    /// Profile for test constructors (`COMAC_TEST (name, description, ...)`)
    pub fn test() -> Self {
        Self {
            name: "test".to_string(),
            sentinel: "COMAC_TEST".to_string(),
            symbol_prefix: default_symbol_prefix(),
            aggregate_function: "_comac_test_runner_register_tests".to_string(),
            private_header: "comac-test-private.h".to_string(),
            tool_name: default_tool_name(),
        }
    }

    /// Looks up a built-in profile by name
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "boilerplate" => Ok(Self::boilerplate()),
            "test" => Ok(Self::test()),
            _ => Err(ConfigError::UnknownProfile(name.to_string())),
        }
    }

    /// Symbol declared and called for a registration name
    pub fn symbol_for(&self, name: &str) -> String {
        format!("{}{}", self.symbol_prefix, name)
    }

    /// Validates that every field can be emitted verbatim
    ///
    /// Sentinel, symbol prefix and aggregate name must look like C
    /// identifiers. The header and tool name must not break out of the
    /// include directive or the provenance comment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ident_re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex");

        for (field, value) in [
            ("sentinel", &self.sentinel),
            ("symbol_prefix", &self.symbol_prefix),
            ("aggregate_function", &self.aggregate_function),
        ] {
            if !ident_re.is_match(value) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be an identifier, got '{}'",
                    field, value
                )));
            }
        }

        if self.private_header.is_empty()
            || self.private_header.contains(['"', '\n', '\r'])
        {
            return Err(ConfigError::ValidationFailed(format!(
                "private_header must be a non-empty file name without quotes or newlines, got '{}'",
                self.private_header
            )));
        }

        if self.tool_name.is_empty()
            || self.tool_name.contains("*/")
            || self.tool_name.contains(['\n', '\r'])
        {
            return Err(ConfigError::ValidationFailed(format!(
                "tool_name must be a non-empty single line without '*/', got '{}'",
                self.tool_name
            )));
        }

        Ok(())
    }
}

impl Default for MarkerProfile {
    fn default() -> Self {
        Self::boilerplate()
    }
}

/// What to do when two markers name the same registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Declare and call the symbol once per marker
    #[default]
    Allow,
    /// Fail the run with a diagnostic naming both markers
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Allow => write!(f, "allow"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Complete configuration for a generator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub profile: MarkerProfile,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl GeneratorConfig {
    pub fn new(profile: MarkerProfile) -> Self {
        Self {
            profile,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Configuration for a built-in profile
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        MarkerProfile::builtin(name).map(Self::new)
    }

    /// Parses and validates a TOML configuration document
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&source, path)
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile.validate()
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registrar Configuration:")?;
        writeln!(f, "  Profile: {}", self.profile.name)?;
        writeln!(f, "  Sentinel: {}", self.profile.sentinel)?;
        writeln!(f, "  Symbol Prefix: {}", self.profile.symbol_prefix)?;
        writeln!(f, "  Aggregate Function: {}", self.profile.aggregate_function)?;
        writeln!(f, "  Private Header: {}", self.profile.private_header)?;
        writeln!(f, "  Duplicates: {}", self.duplicates)?;
        Ok(())
    }
}
