use std::sync::Arc;

use regmask_image::Mask;
use regmask_io::{read_mask, IoError};

use crate::role::MaskRole;

/// Owns the pre-erosion mask of each role for the duration of a run.
///
/// The slots hold the masks as decoded from file. Every resolution level
/// erodes fresh from these sources, never from a previously eroded result,
/// because erosion radii do not compose across levels.
///
/// A load either succeeds atomically or leaves the previous slot content
/// untouched; no partial mask is ever exposed.
#[derive(Debug, Default)]
pub struct MaskResources {
    fixed: Option<Arc<Mask>>,
    moving: Option<Arc<Mask>>,
}

impl MaskResources {
    /// Creates a resource manager with both slots absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and loads the mask for `role` from a file path.
    ///
    /// An absent or empty path means the mask is not configured: the slot
    /// is cleared and no I/O happens. Otherwise the file is decoded and
    /// stored as the role's source mask; on failure the slot keeps its
    /// previous content and the underlying [`IoError`] is returned.
    pub fn try_load(
        &mut self,
        role: MaskRole,
        path: Option<&str>,
    ) -> Result<Option<&Arc<Mask>>, IoError> {
        match path {
            None | Some("") => {
                *self.slot_mut(role) = None;
                Ok(None)
            }
            Some(path) => {
                let mask = read_mask(path)?;
                let slot = self.slot_mut(role);
                *slot = Some(Arc::new(mask));
                Ok(slot.as_ref())
            }
        }
    }

    /// The most recently loaded (pre-erosion) mask for `role`, if present.
    pub fn source(&self, role: MaskRole) -> Option<&Arc<Mask>> {
        match role {
            MaskRole::Fixed => self.fixed.as_ref(),
            MaskRole::Moving => self.moving.as_ref(),
        }
    }

    /// Discards both slots at the end of a run.
    pub fn clear(&mut self) {
        self.fixed = None;
        self.moving = None;
    }

    fn slot_mut(&mut self, role: MaskRole) -> &mut Option<Arc<Mask>> {
        match role {
            MaskRole::Fixed => &mut self.fixed,
            MaskRole::Moving => &mut self.moving,
        }
    }
}
