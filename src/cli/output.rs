//! Output formatting for the `list` command
//!
//! Registrations are rendered as JSON, YAML or human-readable text. Every
//! format keeps encounter order.
//!
//! # Example
//!
//! ```
//! use registrar::cli::output::{OutputFormat, OutputFormatter};
//! use registrar::config::MarkerProfile;
//! use registrar::registration::{Location, RegistrationTable};
//!
//! let mut table = RegistrationTable::new();
//! table.push("pdf", Location::new("comac-boilerplate-pdf.c", 296));
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format(&MarkerProfile::boilerplate(), &table).unwrap();
//! assert!(output.contains("_register_pdf"));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::MarkerProfile;
use crate::registration::RegistrationTable;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Serialize)]
struct ListingEntry<'a> {
    name: &'a str,
    symbol: String,
    path: String,
    line: usize,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    profile: &'a str,
    aggregate_function: &'a str,
    registrations: Vec<ListingEntry<'a>>,
}

impl<'a> Listing<'a> {
    fn new(profile: &'a MarkerProfile, table: &'a RegistrationTable) -> Self {
        let registrations = table
            .iter()
            .map(|r| ListingEntry {
                name: &r.name,
                symbol: profile.symbol_for(&r.name),
                path: r.location.path.display().to_string(),
                line: r.location.line,
            })
            .collect();

        Self {
            profile: &profile.name,
            aggregate_function: &profile.aggregate_function,
            registrations,
        }
    }
}

/// Output formatter for scanned registrations
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, profile: &MarkerProfile, table: &RegistrationTable) -> Result<String> {
        let listing = Listing::new(profile, table);
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&listing).context("Failed to serialize to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&listing).context("Failed to serialize to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(&listing)),
        }
    }

    fn format_human(&self, listing: &Listing<'_>) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Profile: {} ({})\n",
            listing.profile, listing.aggregate_function
        ));
        output.push_str(&format!(
            "Registrations: {}\n",
            listing.registrations.len()
        ));

        if listing.registrations.is_empty() {
            return output;
        }

        output.push('\n');
        let width = listing
            .registrations
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0);

        for (i, entry) in listing.registrations.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:<width$}  {}:{}\n",
                i + 1,
                entry.name,
                entry.path,
                entry.line,
                width = width
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::Location;

    fn sample_table() -> RegistrationTable {
        let mut table = RegistrationTable::new();
        table.push("builtin", Location::new("comac-boilerplate.c", 536));
        table.push("pdf", Location::new("comac-boilerplate-pdf.c", 296));
        table
    }

    #[test]
    fn test_format_json() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter
            .format(&MarkerProfile::boilerplate(), &sample_table())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["profile"], "boilerplate");
        assert_eq!(value["aggregate_function"], "_comac_boilerplate_register_all");
        assert_eq!(value["registrations"][0]["name"], "builtin");
        assert_eq!(value["registrations"][1]["symbol"], "_register_pdf");
        assert_eq!(value["registrations"][1]["line"], 296);
    }

    #[test]
    fn test_format_yaml() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter
            .format(&MarkerProfile::test(), &sample_table())
            .unwrap();

        assert!(output.contains("profile: test"));
        let builtin = output.find("name: builtin").unwrap();
        let pdf = output.find("name: pdf").unwrap();
        assert!(builtin < pdf);
    }

    #[test]
    fn test_format_human() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format(&MarkerProfile::boilerplate(), &sample_table())
            .unwrap();

        assert!(output.starts_with("Profile: boilerplate (_comac_boilerplate_register_all)\n"));
        assert!(output.contains("Registrations: 2\n"));
        assert!(output.contains("  1. builtin  comac-boilerplate.c:536\n"));
        assert!(output.contains("  2. pdf      comac-boilerplate-pdf.c:296\n"));
    }

    #[test]
    fn test_format_human_empty() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format(&MarkerProfile::boilerplate(), &RegistrationTable::new())
            .unwrap();

        assert!(output.ends_with("Registrations: 0\n"));
    }
}
