use crate::mask::MaskSize;

/// An error type for mask operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MaskError {
    /// Error when the data length does not match the mask size.
    #[error("Data length ({0}) does not match the mask size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when an operation receives a mask with no voxels.
    #[error("Mask has no voxels")]
    EmptyMask,

    /// Error when the source and destination sizes do not match.
    #[error("Source size ({0}) does not match destination size ({1})")]
    SizeMismatch(MaskSize, MaskSize),
}
