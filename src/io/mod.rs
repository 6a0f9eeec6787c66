//! File I/O modules
//!
//! Everything around the analyzer that touches the filesystem:
//! - Data file loading (CSV)
//! - Data and results writing (CSV)
//! - Measurement profiles (JSON)
//! - Output path conventions

pub mod loader;
pub mod paths;
pub mod profile;
pub mod writer;
