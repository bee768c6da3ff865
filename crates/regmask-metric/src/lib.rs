#![deny(missing_docs)]
//! Resolution-adaptive mask lifecycle for registration similarity metrics

/// configuration store for command-line arguments and parameter files.
pub mod config;

/// Error types for the metric lifecycle.
pub mod error;

/// metric lifecycle controller and collaborator traits.
pub mod lifecycle;

/// per-role mask resource slots.
pub mod resources;

/// mask roles in a registration run.
pub mod role;

/// per-level erosion radius schedule.
pub mod schedule;

/// elapsed-time instrumentation.
pub mod stopwatch;

pub use crate::config::Configuration;
pub use crate::error::MetricError;
pub use crate::lifecycle::{
    MaskedMetric, MetricLifecycle, Phase, ResolutionDriver, SimilarityMetric,
};
pub use crate::resources::MaskResources;
pub use crate::role::MaskRole;
pub use crate::schedule::erosion_radius;
pub use crate::stopwatch::Stopwatch;
