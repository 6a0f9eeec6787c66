//! Analysis and result aggregation modules
//!
//! Turns a single voltage sweep into photovoltaic figures of merit:
//! - I-V curve analysis (the core algorithm)
//! - Diagnostics
//! - Result types
//! - Metadata

pub mod diagnostics;
pub mod iv_curve;
pub mod metadata;
pub mod result;
