//! Registration scanning and emission
//!
//! - [`marker`]: grammar for a single marker line
//! - [`scanner`]: walks input files in order and collects a [`RegistrationTable`]
//! - [`emit`]: renders the generated translation unit
//! - [`generator`]: ties scanning, duplicate checks and the atomic write together
//! - [`registry`]: binds a table to Rust callbacks

pub mod emit;
pub mod error;
pub mod generator;
pub mod marker;
pub mod registry;
pub mod scanner;
pub mod types;

pub use emit::render;
pub use error::GenerateError;
pub use generator::{check_duplicates, GenerateReport, Generator};
pub use marker::{
    is_marker_line, parse_continued_name, parse_marker, parse_marker_head, MarkerError, MarkerHead,
};
pub use registry::{Registry, RegistryError};
pub use scanner::MarkerScanner;
pub use types::{Location, Registration, RegistrationTable};
