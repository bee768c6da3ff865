use crate::error::MaskError;

/// Mask size in voxels
///
/// A struct to represent the size of a mask volume in voxels. Planar masks
/// use a depth of one.
///
/// # Examples
///
/// ```
/// use regmask_image::MaskSize;
///
/// let mask_size = MaskSize {
///   width: 10,
///   height: 20,
///   depth: 1,
/// };
///
/// assert_eq!(mask_size.width, 10);
/// assert_eq!(mask_size.height, 20);
/// assert_eq!(mask_size.numel(), 200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskSize {
    /// Width of the mask in voxels
    pub width: usize,
    /// Height of the mask in voxels
    pub height: usize,
    /// Depth of the mask in voxels
    pub depth: usize,
}

impl MaskSize {
    /// Total number of voxels in the mask volume.
    pub fn numel(&self) -> usize {
        self.width * self.height * self.depth
    }
}

impl std::fmt::Display for MaskSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "MaskSize {{ width: {}, height: {}, depth: {} }}",
            self.width, self.height, self.depth
        )
    }
}

impl From<[usize; 3]> for MaskSize {
    fn from(size: [usize; 3]) -> Self {
        MaskSize {
            width: size[0],
            height: size[1],
            depth: size[2],
        }
    }
}

/// Spatial metadata of a mask volume.
///
/// Carries the physical placement of the voxel grid: the position of the
/// first voxel, the voxel extent per axis, and the grid orientation. The
/// geometry always matches the image the mask was derived from and is never
/// changed by region operations such as erosion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskGeometry {
    /// Physical position of the first voxel.
    pub origin: [f64; 3],
    /// Physical extent of one voxel per axis.
    pub spacing: [f64; 3],
    /// Row-major direction cosine matrix of the voxel grid.
    pub direction: [[f64; 3]; 3],
}

impl Default for MaskGeometry {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            spacing: [1.0; 3],
            direction: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

/// A binary mask volume with spatial metadata.
///
/// Voxels with value zero are background, non-zero voxels are foreground.
/// The data is stored contiguously in x-fastest order, so the voxel at
/// `(x, y, z)` lives at index `(z * height + y) * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    size: MaskSize,
    geometry: MaskGeometry,
    data: Vec<u8>,
}

impl Mask {
    /// Create a new mask from voxel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the mask in voxels.
    /// * `geometry` - The spatial metadata of the voxel grid.
    /// * `data` - The voxel data of the mask.
    ///
    /// # Errors
    ///
    /// If the length of the voxel data does not match the mask size, an
    /// error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use regmask_image::{Mask, MaskGeometry, MaskSize};
    ///
    /// let mask = Mask::new(
    ///     MaskSize {
    ///         width: 2,
    ///         height: 2,
    ///         depth: 1,
    ///     },
    ///     MaskGeometry::default(),
    ///     vec![0, 255, 255, 0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(mask.foreground_count(), 2);
    /// ```
    pub fn new(size: MaskSize, geometry: MaskGeometry, data: Vec<u8>) -> Result<Self, MaskError> {
        if data.len() != size.numel() {
            return Err(MaskError::InvalidDataLength(data.len(), size.numel()));
        }

        Ok(Self {
            size,
            geometry,
            data,
        })
    }

    /// Create a new mask with the given size filled with a constant value.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the mask in voxels.
    /// * `geometry` - The spatial metadata of the voxel grid.
    /// * `val` - The value assigned to every voxel.
    pub fn from_size_val(size: MaskSize, geometry: MaskGeometry, val: u8) -> Self {
        Self {
            size,
            geometry,
            data: vec![val; size.numel()],
        }
    }

    /// The size of the mask in voxels.
    pub fn size(&self) -> MaskSize {
        self.size
    }

    /// The spatial metadata of the voxel grid.
    pub fn geometry(&self) -> &MaskGeometry {
        &self.geometry
    }

    /// The voxel data as a flat slice in x-fastest order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The voxel data as a mutable flat slice in x-fastest order.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The voxel value at `(x, y, z)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height || z >= self.size.depth {
            return None;
        }
        Some(self.data[(z * self.size.height + y) * self.size.width + x])
    }

    /// Whether the voxel at `(x, y, z)` is inside the bounds and foreground.
    pub fn is_foreground(&self, x: usize, y: usize, z: usize) -> bool {
        self.get(x, y, z).is_some_and(|v| v != 0)
    }

    /// Number of foreground voxels in the mask.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
