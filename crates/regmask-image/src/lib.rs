#![deny(missing_docs)]
//! Binary mask image types and morphological erosion

/// binary mask representation for registration masking.
pub mod mask;

/// Error types for the mask module.
pub mod error;

/// morphological erosion of masks.
pub mod morphology;

pub use crate::error::MaskError;
pub use crate::mask::{Mask, MaskGeometry, MaskSize};
