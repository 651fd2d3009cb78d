//! Utility modules for registrar

pub mod logging;

pub use logging::{init_for_cli, init_logging, LoggingConfig};
