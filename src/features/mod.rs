//! Curve feature extraction modules
//!
//! Building blocks of the I-V analysis:
//! - Anchor interpolation and nearest-sample lookup
//! - Local slopes and resistances
//! - Maximum power point

pub mod interpolation;
pub mod power;
pub mod slope;
