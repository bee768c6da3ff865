use crate::role::MaskRole;

/// An error type for the erosion radius schedule.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    /// The queried level is outside the pyramid schedule domain.
    #[error("resolution level {level} is outside the schedule domain ({total_levels} levels)")]
    InvalidLevel {
        /// The queried 0-based resolution level.
        level: usize,
        /// The total number of resolution levels in the run.
        total_levels: usize,
    },

    /// The radius exponent exceeds the machine word.
    #[error("erosion radius overflows with {total_levels} resolution levels")]
    RadiusOverflow {
        /// The total number of resolution levels in the run.
        total_levels: usize,
    },
}

/// Derive the erosion radius for one mask role at one pyramid level.
///
/// Before subsampling, pyramid images are smoothed with a Gaussian of
/// standard deviation `schedule / 2`, where `schedule` is
/// `2^(total_levels - level - 1)`. The support of that kernel is roughly
/// twice the standard deviation, so voxels within `schedule` of the mask
/// boundary pick up out-of-mask intensity and must be discarded:
///
/// * fixed mask: `radius = 2^(total_levels - level - 1) + 1`
/// * moving mask: `radius = 2^(total_levels - level) + 1`
///
/// The moving mask gets one extra doubling because the moving-image gradient
/// used by the metric derivative needs a wider neighborhood than direct
/// intensity sampling. At the finest level the fixed radius bottoms out at 2.
///
/// # Arguments
///
/// * `level` - The 0-based resolution level, increasing with resolution.
/// * `total_levels` - The number of resolution levels in the run, at least 1.
/// * `role` - The mask role the radius is derived for.
///
/// # Returns
///
/// The erosion radius in voxels, always at least 2, or a [`ScheduleError`]
/// when `(level, total_levels)` is outside the valid domain.
///
/// # Examples
///
/// ```
/// use regmask_metric::{erosion_radius, MaskRole};
///
/// assert_eq!(erosion_radius(0, 3, MaskRole::Fixed), Ok(5));
/// assert_eq!(erosion_radius(0, 3, MaskRole::Moving), Ok(9));
/// assert_eq!(erosion_radius(2, 3, MaskRole::Fixed), Ok(2));
/// ```
pub fn erosion_radius(
    level: usize,
    total_levels: usize,
    role: MaskRole,
) -> Result<usize, ScheduleError> {
    if total_levels == 0 || level >= total_levels {
        return Err(ScheduleError::InvalidLevel {
            level,
            total_levels,
        });
    }

    let exponent = match role {
        MaskRole::Fixed => total_levels - level - 1,
        MaskRole::Moving => total_levels - level,
    };

    let support = u32::try_from(exponent)
        .ok()
        .and_then(|exponent| 1usize.checked_shl(exponent))
        .ok_or(ScheduleError::RadiusOverflow { total_levels })?;

    Ok(support + 1)
}
