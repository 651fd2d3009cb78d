//! Types produced by a scan

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a marker line was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Input path as given by the caller
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// A registration name extracted from one marker line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub location: Location,
}

/// Registrations in encounter order
///
/// Input files contribute in the order they were given and lines in file
/// order. Entries are never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationTable {
    registrations: Vec<Registration>,
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, location: Location) {
        self.registrations.push(Registration {
            name: name.into(),
            location,
        });
    }

    /// Appends every entry of `other`, keeping its order
    pub fn extend(&mut self, other: RegistrationTable) {
        self.registrations.extend(other.registrations);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegistrationTable {
    type Item = &'a Registration;
    type IntoIter = std::slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.registrations.iter()
    }
}
