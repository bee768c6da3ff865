/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the mask image.
    #[error("Failed to decode the mask image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to create the mask.
    #[error("Failed to create the mask. {0}")]
    MaskCreationError(#[from] regmask_image::MaskError),
}
