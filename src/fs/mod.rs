//! File system helpers

pub mod atomic;

pub use atomic::write_atomic;
