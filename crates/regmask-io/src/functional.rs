use std::path::Path;

use regmask_image::{Mask, MaskGeometry, MaskSize};

use crate::error::IoError;

/// Reads a mask from the given file path.
///
/// The method tries to decode any raster format supported by the image
/// crate and converts the result to an 8-bit single channel mask, where a
/// voxel value of zero is background and anything else is foreground. The
/// decoded mask is planar (depth one) and carries default spatial metadata,
/// since raster files store none.
///
/// # Arguments
///
/// * `file_path` - The path to a valid mask image file.
///
/// # Returns
///
/// A [`Mask`] containing the decoded data.
pub fn read_mask(file_path: impl AsRef<Path>) -> Result<Mask, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let luma = img.into_luma8();
    let size = MaskSize {
        width: luma.width() as usize,
        height: luma.height() as usize,
        depth: 1,
    };

    let mask = Mask::new(size, MaskGeometry::default(), luma.into_raw())?;

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_file() {
        let result = read_mask("/nonexistent/mask.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_png_mask() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mask.png");

        let mut data = vec![0u8; 8 * 4];
        data[2 * 8 + 3] = 255;
        data[2 * 8 + 4] = 255;
        image::GrayImage::from_raw(8, 4, data)
            .unwrap()
            .save(&file_path)?;

        let mask = read_mask(&file_path)?;
        assert_eq!(mask.size().width, 8);
        assert_eq!(mask.size().height, 4);
        assert_eq!(mask.size().depth, 1);
        assert_eq!(mask.foreground_count(), 2);
        assert!(mask.is_foreground(3, 2, 0));
        assert_eq!(mask.geometry(), &MaskGeometry::default());

        Ok(())
    }

    #[test]
    fn read_garbage_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mask.png");
        std::fs::write(&file_path, b"not an image")?;

        let result = read_mask(&file_path);
        assert!(matches!(result, Err(IoError::ImageDecodeError(_))));

        Ok(())
    }
}
