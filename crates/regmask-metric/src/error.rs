use std::path::PathBuf;

use regmask_image::MaskError;
use regmask_io::IoError;

use crate::config::ConfigError;
use crate::lifecycle::Phase;
use crate::role::MaskRole;
use crate::schedule::ScheduleError;

/// An error type for the metric lifecycle.
///
/// Every variant raised during [`Phase::BeforeRegistration`] or
/// [`Phase::Initialization`] is fatal to the registration run; none of them
/// is retried or suppressed.
#[derive(thiserror::Error, Debug)]
pub enum MetricError {
    /// A configured mask failed to load. Carries the phase, the role and
    /// the path so the operator can fix the file or the configuration.
    #[error("{phase}: failed to load the {role} mask from '{path}'. {source}")]
    MaskLoad {
        /// The lifecycle phase the load was attempted in.
        phase: Phase,
        /// The role of the mask that failed to load.
        role: MaskRole,
        /// The path the mask was read from.
        path: PathBuf,
        /// The underlying decode failure.
        #[source]
        source: IoError,
    },

    /// The erosion schedule was queried outside its domain. This is an
    /// internal contract violation, not a recoverable condition.
    #[error(transparent)]
    InvalidSchedule(#[from] ScheduleError),

    /// Eroding a source mask failed.
    #[error(transparent)]
    Erosion(#[from] MaskError),

    /// The configuration store held an unusable value.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The wrapped metric failed its own initialization; propagated without
    /// added context.
    #[error("{0}")]
    DelegateInitialization(#[source] Box<dyn std::error::Error + Send + Sync>),
}
