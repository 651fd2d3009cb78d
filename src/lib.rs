//! registrar - build-time generator for boilerplate registration tables
//!
//! Source files announce themselves with marker lines such as
//!
//! ```c
//! COMAC_BOILERPLATE (pdf, targets)
//! ```
//!
//! registrar scans an ordered list of files for those markers and emits one C
//! unit that forward-declares `_register_pdf` (and every other name found) and
//! calls them all, in encounter order, from a single aggregate function.
//!
//! # Example Usage
//!
//! ```no_run
//! use registrar::{GeneratorConfig, Generator};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(GeneratorConfig::builtin("boilerplate")?);
//! let report = generator.generate(
//!     Path::new("comac-boilerplate-constructors.c"),
//!     &["comac-boilerplate.c", "comac-boilerplate-pdf.c"],
//! )?;
//! println!("{} registrations", report.table.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`registration`]: marker grammar, scanner, emitter, generator and registry
//! - [`config`]: marker profiles and duplicate policy
//! - [`fs`]: atomic output replacement
//! - [`cli`]: command-line interface
//! - [`util`]: logging setup

pub mod cli;
pub mod config;
pub mod fs;
pub mod registration;
pub mod util;

pub use config::{ConfigError, DuplicatePolicy, GeneratorConfig, MarkerProfile};
pub use registration::{
    GenerateError, GenerateReport, Generator, Location, Registration, RegistrationTable, Registry,
};
pub use util::{init_for_cli, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_registrar() {
        assert_eq!(NAME, "registrar");
    }
}
