#![deny(missing_docs)]
//! Mask decoding from image files

/// Error types for the io module.
pub mod error;

/// High-level mask read functions.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::read_mask;
