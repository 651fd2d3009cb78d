//! Injectable registration list
//!
//! The generated aggregate function couples consumers to a link-time naming
//! convention. Rust consumers can instead bind a scanned [`RegistrationTable`]
//! to their callbacks once at startup and hand the resulting [`Registry`] to
//! whatever needs it.
//!
//! ```
//! use registrar::registration::{Location, Registry, RegistrationTable};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! static CALLS: AtomicUsize = AtomicUsize::new(0);
//! fn register_pdf() {
//!     CALLS.fetch_add(1, Ordering::SeqCst);
//! }
//!
//! let mut table = RegistrationTable::new();
//! table.push("pdf", Location::new("pdf.c", 296));
//!
//! let registry = Registry::bind(&table, |name| match name {
//!     "pdf" => Some(register_pdf as fn()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! registry.run_all();
//! assert_eq!(CALLS.load(Ordering::SeqCst), 1);
//! ```

use crate::registration::types::{Location, RegistrationTable};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no callback for registration '{name}' (declared at {location})")]
    Unresolved { name: String, location: Location },
}

/// Ordered list of named callbacks
#[derive(Debug, Clone)]
pub struct Registry<F> {
    entries: Vec<(String, F)>,
}

impl<F> Default for Registry<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> Registry<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every registration in `table` through `lookup`, in order
    ///
    /// Duplicate table entries produce duplicate registry entries.
    pub fn bind<L>(table: &RegistrationTable, mut lookup: L) -> Result<Self, RegistryError>
    where
        L: FnMut(&str) -> Option<F>,
    {
        let mut registry = Self::new();
        for registration in table {
            let callback =
                lookup(&registration.name).ok_or_else(|| RegistryError::Unresolved {
                    name: registration.name.clone(),
                    location: registration.location.clone(),
                })?;
            registry.register(registration.name.clone(), callback);
        }
        Ok(registry)
    }

    pub fn register(&mut self, name: impl Into<String>, callback: F) {
        self.entries.push((name.into(), callback));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.entries.iter().map(|(name, callback)| (name.as_str(), callback))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: Fn()> Registry<F> {
    /// Calls every callback once, in registration order
    pub fn run_all(&self) {
        for (_, callback) in &self.entries {
            callback();
        }
    }
}
