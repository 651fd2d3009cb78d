//! End-to-end generator run: scan, check, render, write

use crate::config::{DuplicatePolicy, GeneratorConfig};
use crate::fs::write_atomic;
use crate::registration::emit::render;
use crate::registration::error::GenerateError;
use crate::registration::scanner::MarkerScanner;
use crate::registration::types::{Location, RegistrationTable};
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub table: RegistrationTable,
    pub bytes_written: usize,
}

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scans `inputs` in order and applies the duplicate policy
    pub fn collect<P: AsRef<Path>>(
        &self,
        inputs: &[P],
    ) -> Result<RegistrationTable, GenerateError> {
        self.config.validate()?;

        let table = MarkerScanner::new(&self.config.profile).scan_files(inputs)?;
        check_duplicates(&table, self.config.duplicates)?;
        Ok(table)
    }

    /// Scans `inputs`, then replaces `output` with the rendered unit
    ///
    /// Nothing is written unless every input scanned cleanly.
    pub fn generate<P: AsRef<Path>>(
        &self,
        output: &Path,
        inputs: &[P],
    ) -> Result<GenerateReport, GenerateError> {
        let table = self.collect(inputs)?;
        let contents = render(&self.config.profile, &table);

        write_atomic(output, contents.as_bytes()).map_err(|e| GenerateError::OutputWrite {
            path: output.to_path_buf(),
            source: e,
        })?;

        info!(
            output = %output.display(),
            registrations = table.len(),
            bytes = contents.len(),
            "Wrote registration unit"
        );

        Ok(GenerateReport {
            output: output.to_path_buf(),
            table,
            bytes_written: contents.len(),
        })
    }
}

/// Applies `policy` to repeated names in `table`
pub fn check_duplicates(
    table: &RegistrationTable,
    policy: DuplicatePolicy,
) -> Result<(), GenerateError> {
    let mut seen: HashMap<&str, &Location> = HashMap::new();

    for registration in table {
        let first = match seen.entry(registration.name.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(&registration.location);
                continue;
            }
            Entry::Occupied(slot) => *slot.get(),
        };

        match policy {
            DuplicatePolicy::Allow => {
                debug!(
                    name = %registration.name,
                    first = %first,
                    second = %registration.location,
                    "Duplicate registration kept"
                );
            }
            DuplicatePolicy::Reject => {
                return Err(GenerateError::DuplicateRegistration {
                    name: registration.name.clone(),
                    first: first.clone(),
                    second: registration.location.clone(),
                });
            }
        }
    }

    Ok(())
}
