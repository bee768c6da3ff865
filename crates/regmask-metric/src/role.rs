/// The role a mask plays in a registration run.
///
/// The fixed mask delimits the region of the fixed image sampled by the
/// similarity metric; the moving mask delimits the region of the moving
/// image. The two roles follow different erosion schedules because
/// moving-image gradients need a wider local support than intensities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskRole {
    /// Mask applied to the fixed image.
    Fixed,
    /// Mask applied to the moving image.
    Moving,
}

impl MaskRole {
    /// Both roles, in the order they are processed.
    pub const ALL: [MaskRole; 2] = [MaskRole::Fixed, MaskRole::Moving];

    /// The command-line argument key carrying the mask file path for this
    /// role.
    pub fn argument_key(&self) -> &'static str {
        match self {
            MaskRole::Fixed => "fMask",
            MaskRole::Moving => "mMask",
        }
    }
}

impl std::fmt::Display for MaskRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MaskRole::Fixed => write!(f, "fixed"),
            MaskRole::Moving => write!(f, "moving"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_keys() {
        assert_eq!(MaskRole::Fixed.argument_key(), "fMask");
        assert_eq!(MaskRole::Moving.argument_key(), "mMask");
    }

    #[test]
    fn display() {
        assert_eq!(MaskRole::Fixed.to_string(), "fixed");
        assert_eq!(MaskRole::Moving.to_string(), "moving");
    }
}
