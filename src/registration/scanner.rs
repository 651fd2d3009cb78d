//! Line-oriented scanner for registration markers

use crate::config::MarkerProfile;
use crate::registration::error::GenerateError;
use crate::registration::marker::{
    is_marker_line, parse_continued_name, parse_marker_head, MarkerError, MarkerHead,
};
use crate::registration::types::{Location, RegistrationTable};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Scans input files for the markers of one profile
pub struct MarkerScanner<'p> {
    profile: &'p MarkerProfile,
}

impl<'p> MarkerScanner<'p> {
    pub fn new(profile: &'p MarkerProfile) -> Self {
        Self { profile }
    }

    /// Scans every input in the given order
    ///
    /// Stops at the first unreadable input or malformed marker.
    pub fn scan_files<P: AsRef<Path>>(
        &self,
        inputs: &[P],
    ) -> Result<RegistrationTable, GenerateError> {
        info!(
            profile = %self.profile.name,
            sentinel = %self.profile.sentinel,
            inputs = inputs.len(),
            "Starting marker scan"
        );

        let start = std::time::Instant::now();
        let mut table = RegistrationTable::new();

        for input in inputs {
            let found = self.scan_file(input.as_ref())?;
            table.extend(found);
        }

        info!(
            registrations = table.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Marker scan completed"
        );

        Ok(table)
    }

    /// Reads one input as UTF-8 text and scans it
    pub fn scan_file(&self, path: &Path) -> Result<RegistrationTable, GenerateError> {
        let bytes = fs::read(path).map_err(|e| GenerateError::InputUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let text = String::from_utf8(bytes).map_err(|e| GenerateError::InputUnreadable {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        let table = self.scan_str(&text, path)?;
        debug!(
            path = %path.display(),
            registrations = table.len(),
            "Scanned input"
        );
        Ok(table)
    }

    /// Scans text that was read from `path`
    ///
    /// Errors are reported at the marker's own line, also when its name
    /// was expected on a following line.
    pub fn scan_str(&self, text: &str, path: &Path) -> Result<RegistrationTable, GenerateError> {
        let sentinel = self.profile.sentinel.as_str();
        let mut table = RegistrationTable::new();
        let mut lines = text.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            if !is_marker_line(line, sentinel) {
                continue;
            }

            let line_number = index + 1;
            let malformed = |reason| GenerateError::MalformedMarker {
                path: PathBuf::from(path),
                line: line_number,
                reason,
            };

            let name = match parse_marker_head(line, sentinel).map_err(&malformed)? {
                MarkerHead::Named(name) => name,
                MarkerHead::Open { column } => {
                    let next = lines.by_ref().find(|(_, l)| !l.trim().is_empty());
                    let found = match next {
                        Some((_, continued)) => match parse_continued_name(continued) {
                            Ok(name) => Ok(name),
                            Err(_) => Err(format!("'{}'", continued.trim())),
                        },
                        None => Err("end of input".to_string()),
                    };
                    found.map_err(|found| {
                        malformed(MarkerError::MissingContinuation { column, found })
                    })?
                }
            };

            trace!(name, line = line_number, "Found marker");
            table.push(name, Location::new(path, line_number));
        }

        Ok(table)
    }
}
