use rayon::prelude::*;

use crate::error::MaskError;
use crate::mask::{Mask, MaskSize};

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Erode `src` into `dst` with an isotropic box structuring element.
///
/// Erosion shrinks the foreground region of the mask. Each voxel is replaced
/// by the minimum value in the `(2 * radius + 1)`-wide box neighborhood,
/// computed as three separable axis passes. Voxels outside the volume do not
/// take part in the minimum, so the foreground only recedes from the
/// foreground/background interface, not from the volume border.
///
/// A radius of zero copies `src` into `dst` unchanged. The source mask is
/// never mutated and the destination geometry is left as-is.
///
/// # Arguments
///
/// * `src` - The source mask.
/// * `dst` - The destination mask (will be overwritten). Must match the
///   source size.
/// * `radius` - The structuring element radius, reused for every axis.
///
/// # Returns
///
/// Ok(()) on success, or [`MaskError`] if the sizes don't match or the mask
/// has no voxels.
pub fn erode(src: &Mask, dst: &mut Mask, radius: usize) -> Result<(), MaskError> {
    if src.size() != dst.size() {
        return Err(MaskError::SizeMismatch(src.size(), dst.size()));
    }
    if src.size().numel() == 0 {
        return Err(MaskError::EmptyMask);
    }
    if radius == 0 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let size = src.size();
    let mut pass_x = vec![0u8; size.numel()];
    erode_axis(src.as_slice(), &mut pass_x, size, radius, Axis::X);
    let mut pass_y = vec![0u8; size.numel()];
    erode_axis(&pass_x, &mut pass_y, size, radius, Axis::Y);
    erode_axis(&pass_y, dst.as_slice_mut(), size, radius, Axis::Z);

    Ok(())
}

/// Erode a mask with an isotropic box structuring element, allocating the
/// result.
///
/// Convenience wrapper around [`erode`] that allocates the destination and
/// carries the source geometry over. See [`erode`] for the semantics.
///
/// # Example
///
/// ```
/// use regmask_image::{morphology, Mask, MaskGeometry, MaskSize};
///
/// let size = MaskSize {
///     width: 5,
///     height: 5,
///     depth: 1,
/// };
/// let mut data = vec![0u8; size.numel()];
/// data[2 * 5 + 2] = 255;
/// let mask = Mask::new(size, MaskGeometry::default(), data).unwrap();
///
/// let eroded = morphology::eroded(&mask, 1).unwrap();
/// assert_eq!(eroded.foreground_count(), 0);
/// ```
pub fn eroded(src: &Mask, radius: usize) -> Result<Mask, MaskError> {
    let mut dst = Mask::from_size_val(src.size(), *src.geometry(), 0);
    erode(src, &mut dst, radius)?;
    Ok(dst)
}

/// One erosion pass: sliding minimum along a single axis, parallel over
/// output rows. Out-of-bounds positions are skipped, the window always
/// contains the center voxel.
fn erode_axis(src: &[u8], dst: &mut [u8], size: MaskSize, radius: usize, axis: Axis) {
    let width = size.width;
    let height = size.height;
    let radius = radius as isize;
    let extent = match axis {
        Axis::X => size.width,
        Axis::Y => size.height,
        Axis::Z => size.depth,
    } as isize;

    dst.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            let z = row / height;
            let y = row % height;
            for (x, out) in out_row.iter_mut().enumerate() {
                let pos = match axis {
                    Axis::X => x,
                    Axis::Y => y,
                    Axis::Z => z,
                } as isize;
                let lo = (pos - radius).max(0) as usize;
                let hi = (pos + radius).min(extent - 1) as usize;

                let mut min_val = u8::MAX;
                for p in lo..=hi {
                    let (nx, ny, nz) = match axis {
                        Axis::X => (p, y, z),
                        Axis::Y => (x, p, z),
                        Axis::Z => (x, y, p),
                    };
                    min_val = min_val.min(src[(nz * height + ny) * width + nx]);
                }
                *out = min_val;
            }
        });
}
