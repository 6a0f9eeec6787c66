//! Sweep preprocessing modules
//!
//! Utilities for preparing sweeps for analysis:
//! - Forward/reverse scan sorting
//! - Orientation normalization (ascending voltage)

pub mod orientation;
pub mod sweep;
