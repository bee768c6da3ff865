use std::path::PathBuf;
use std::sync::Arc;

use regmask_image::{morphology, Mask};

use crate::config::Configuration;
use crate::error::MetricError;
use crate::resources::MaskResources;
use crate::role::MaskRole;
use crate::schedule::erosion_radius;
use crate::stopwatch::Stopwatch;

/// Resolution count assumed when the parameter store names none.
const DEFAULT_RESOLUTIONS: usize = 3;

/// The four phases of a registration run, in invocation order.
///
/// The driver calls them strictly in this order, with
/// [`Phase::BeforeEachResolution`] repeated once per pyramid level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// One-time setup before anything else runs.
    BeforeAll,
    /// Per-run initialization of the wrapped metric.
    Initialization,
    /// Mask acquisition before the first resolution level.
    BeforeRegistration,
    /// Per-level mask erosion, once per resolution level.
    BeforeEachResolution,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Phase::BeforeAll => "BeforeAll",
            Phase::Initialization => "Initialization",
            Phase::BeforeRegistration => "BeforeRegistration",
            Phase::BeforeEachResolution => "BeforeEachResolution",
        };
        write!(f, "{name}")
    }
}

/// The similarity metric collaborator the lifecycle decorates.
///
/// The metric must treat a received mask as read-only; the mask stays valid
/// until the next resolution level replaces it.
pub trait SimilarityMetric {
    /// Prepare the metric for a new registration run.
    fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Replace the active mask for `role`.
    fn set_mask(&mut self, role: MaskRole, mask: Arc<Mask>);

    /// The currently active mask for `role`, if any.
    fn mask(&self, role: MaskRole) -> Option<&Mask>;
}

/// The multi-resolution driver collaborator.
pub trait ResolutionDriver {
    /// The 0-based resolution level about to run. Increases monotonically
    /// across the run, finest level last.
    fn current_level(&self) -> usize;
}

/// The phase hooks a registration driver invokes on a metric component.
pub trait MetricLifecycle {
    /// One-time setup. Echoes the resolved configuration to the log and
    /// returns a status code, 0 meaning success. Performs no I/O beyond
    /// configuration reads and never fails the run.
    fn before_all(&mut self) -> i32;

    /// Per-run initialization, delegating to the wrapped metric. Any
    /// delegate failure is propagated unmodified.
    fn initialize(&mut self) -> Result<(), MetricError>;

    /// Loads the configured masks and registers them, unmodified, with the
    /// metric. A load failure aborts the run before any level begins.
    fn before_registration(&mut self) -> Result<(), MetricError>;

    /// Erodes each present source mask for the level reported by the
    /// driver and registers the eroded result, replacing the active mask.
    fn before_each_resolution(
        &mut self,
        driver: &dyn ResolutionDriver,
    ) -> Result<(), MetricError>;
}

/// Decorates a similarity metric with resolution-adaptive masking.
///
/// Images are Gaussian-smoothed before each pyramid subsampling step, so
/// voxels near a mask boundary are contaminated by out-of-mask intensity.
/// This controller loads the configured fixed and moving masks once per run
/// and, before every resolution level, re-erodes them from the original
/// source by the level's radius before handing them to the metric.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use regmask_image::Mask;
/// use regmask_metric::{
///     Configuration, MaskRole, MaskedMetric, MetricLifecycle, SimilarityMetric,
/// };
///
/// #[derive(Default)]
/// struct NullMetric;
///
/// impl SimilarityMetric for NullMetric {
///     fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///         Ok(())
///     }
///     fn set_mask(&mut self, _role: MaskRole, _mask: Arc<Mask>) {}
///     fn mask(&self, _role: MaskRole) -> Option<&Mask> {
///         None
///     }
/// }
///
/// let config = Arc::new(Configuration::new());
/// let mut metric = MaskedMetric::new(NullMetric, config);
/// assert_eq!(metric.before_all(), 0);
/// metric.initialize().unwrap();
/// metric.before_registration().unwrap();
/// ```
pub struct MaskedMetric<M> {
    metric: M,
    config: Arc<Configuration>,
    resources: MaskResources,
}

impl<M: SimilarityMetric> MaskedMetric<M> {
    /// Wraps a similarity metric with the given configuration store.
    pub fn new(metric: M, config: Arc<Configuration>) -> Self {
        Self {
            metric,
            config,
            resources: MaskResources::new(),
        }
    }

    /// The wrapped metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The wrapped metric, mutably.
    pub fn metric_mut(&mut self) -> &mut M {
        &mut self.metric
    }

    /// Consumes the controller and returns the wrapped metric.
    pub fn into_inner(self) -> M {
        self.metric
    }

    /// The pre-erosion mask sources held for the current run.
    pub fn resources(&self) -> &MaskResources {
        &self.resources
    }

    fn mask_path(&self, role: MaskRole) -> Option<String> {
        self.config
            .argument(role.argument_key())
            .map(str::to_owned)
    }
}

/// The configuration echo line for one mask role.
fn mask_echo_line(role: MaskRole, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => {
            format!("-{}\t\t{}", role.argument_key(), path)
        }
        _ => format!(
            "-{}\t\tunspecified, so no {} mask used",
            role.argument_key(),
            role
        ),
    }
}

impl<M: SimilarityMetric> MetricLifecycle for MaskedMetric<M> {
    fn before_all(&mut self) -> i32 {
        for role in MaskRole::ALL {
            let path = self.mask_path(role);
            log::info!("{}", mask_echo_line(role, path.as_deref()));
        }
        0
    }

    fn initialize(&mut self) -> Result<(), MetricError> {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        self.metric
            .initialize()
            .map_err(MetricError::DelegateInitialization)?;
        stopwatch.stop();
        log::info!(
            "initialization of the similarity metric took: {} ms",
            stopwatch.elapsed_millis()
        );
        Ok(())
    }

    fn before_registration(&mut self) -> Result<(), MetricError> {
        for role in MaskRole::ALL {
            let path = self.mask_path(role);
            let loaded = self
                .resources
                .try_load(role, path.as_deref())
                .map_err(|source| MetricError::MaskLoad {
                    phase: Phase::BeforeRegistration,
                    role,
                    path: PathBuf::from(path.clone().unwrap_or_default()),
                    source,
                })?
                .map(Arc::clone);
            if let Some(mask) = loaded {
                self.metric.set_mask(role, mask);
            }
        }
        Ok(())
    }

    fn before_each_resolution(
        &mut self,
        driver: &dyn ResolutionDriver,
    ) -> Result<(), MetricError> {
        let level = driver.current_level();
        let total_levels =
            self.config
                .read_parameter("NumberOfResolutions", 0, DEFAULT_RESOLUTIONS)?;

        for role in MaskRole::ALL {
            // a role without a configured mask is simply skipped
            let Some(source) = self.resources.source(role) else {
                continue;
            };
            let radius = erosion_radius(level, total_levels, role)?;
            let eroded = morphology::eroded(source, radius)?;
            log::debug!("level {level}: {role} mask eroded by radius {radius}");
            self.metric.set_mask(role, Arc::new(eroded));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingMetric {
        initialized: bool,
        fail_initialize: bool,
        fixed: Option<Arc<Mask>>,
        moving: Option<Arc<Mask>>,
    }

    impl SimilarityMetric for RecordingMetric {
        fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            if self.fail_initialize {
                return Err("histogram allocation failed".into());
            }
            self.initialized = true;
            Ok(())
        }

        fn set_mask(&mut self, role: MaskRole, mask: Arc<Mask>) {
            match role {
                MaskRole::Fixed => self.fixed = Some(mask),
                MaskRole::Moving => self.moving = Some(mask),
            }
        }

        fn mask(&self, role: MaskRole) -> Option<&Mask> {
            match role {
                MaskRole::Fixed => self.fixed.as_deref(),
                MaskRole::Moving => self.moving.as_deref(),
            }
        }
    }

    struct FixedLevel(usize);

    impl ResolutionDriver for FixedLevel {
        fn current_level(&self) -> usize {
            self.0
        }
    }

    fn controller(config: Configuration) -> MaskedMetric<RecordingMetric> {
        MaskedMetric::new(RecordingMetric::default(), Arc::new(config))
    }

    #[test]
    fn before_all_never_fails() {
        let mut masked = controller(Configuration::new());
        assert_eq!(masked.before_all(), 0);

        let mut config = Configuration::new();
        config.set_argument("fMask", "fixed.png");
        let mut masked = controller(config);
        assert_eq!(masked.before_all(), 0);
    }

    #[test]
    fn echo_lines_use_two_tabs() {
        assert_eq!(
            mask_echo_line(MaskRole::Fixed, Some("fixed.png")),
            "-fMask\t\tfixed.png"
        );
        assert_eq!(
            mask_echo_line(MaskRole::Fixed, None),
            "-fMask\t\tunspecified, so no fixed mask used"
        );
        assert_eq!(
            mask_echo_line(MaskRole::Moving, Some("")),
            "-mMask\t\tunspecified, so no moving mask used"
        );
    }

    #[test]
    fn initialize_delegates_to_the_metric() {
        let mut masked = controller(Configuration::new());
        masked.initialize().unwrap();
        assert!(masked.metric().initialized);
    }

    #[test]
    fn delegate_failure_is_propagated() {
        let mut masked = controller(Configuration::new());
        masked.metric_mut().fail_initialize = true;
        let result = masked.initialize();
        assert!(matches!(
            result,
            Err(MetricError::DelegateInitialization(_))
        ));
    }

    #[test]
    fn unconfigured_masks_stay_absent() {
        let mut masked = controller(Configuration::new());
        masked.before_registration().unwrap();
        assert!(masked.metric().mask(MaskRole::Fixed).is_none());
        assert!(masked.metric().mask(MaskRole::Moving).is_none());

        // per-level work is a no-op without sources
        masked.before_each_resolution(&FixedLevel(0)).unwrap();
        assert!(masked.metric().mask(MaskRole::Fixed).is_none());
        assert!(masked.metric().mask(MaskRole::Moving).is_none());
    }

    #[test]
    fn missing_mask_file_aborts_the_run() {
        let mut config = Configuration::new();
        config.set_argument("fMask", "/nonexistent/fixed.png");
        let mut masked = controller(config);

        let err = masked.before_registration().unwrap_err();
        match err {
            MetricError::MaskLoad { phase, role, path, .. } => {
                assert_eq!(phase, Phase::BeforeRegistration);
                assert_eq!(role, MaskRole::Fixed);
                assert_eq!(path, PathBuf::from("/nonexistent/fixed.png"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mask_load_error_names_phase_and_role() {
        let mut config = Configuration::new();
        config.set_argument("mMask", "/nonexistent/moving.png");
        let mut masked = controller(config);

        let message = masked.before_registration().unwrap_err().to_string();
        assert!(message.contains("BeforeRegistration"));
        assert!(message.contains("moving"));
        assert!(message.contains("/nonexistent/moving.png"));
    }

    #[test]
    fn bad_resolution_parameter_is_an_error() {
        let mut config = Configuration::new();
        config.set_parameter("NumberOfResolutions", ["many"]);
        let mut masked = controller(config);
        masked.before_registration().unwrap();

        let result = masked.before_each_resolution(&FixedLevel(0));
        assert!(matches!(result, Err(MetricError::Configuration(_))));
    }

    #[test]
    fn level_outside_the_schedule_is_fatal() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("fixed.png");
        image::GrayImage::from_raw(8, 8, vec![255u8; 64])
            .unwrap()
            .save(&path)
            .unwrap();

        let mut config = Configuration::new();
        config.set_argument("fMask", path.to_str().unwrap());
        let mut masked = controller(config);
        masked.before_registration().unwrap();

        // default resolution count is 3, so level 3 is out of domain
        let result = masked.before_each_resolution(&FixedLevel(3));
        assert!(matches!(result, Err(MetricError::InvalidSchedule(_))));
    }
}
