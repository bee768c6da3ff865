use std::time::{Duration, Instant};

/// A restartable stopwatch for phase instrumentation.
///
/// Captures one interval between `start` and `stop` using a monotonic clock.
/// Calling `start` again discards the previous interval.
///
/// # Examples
///
/// ```
/// use regmask_metric::Stopwatch;
///
/// let mut stopwatch = Stopwatch::new();
/// stopwatch.start();
/// stopwatch.stop();
/// let _elapsed = stopwatch.elapsed_millis();
/// ```
pub struct Stopwatch {
    started: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    /// Creates a new `Stopwatch` with no interval recorded.
    pub fn new() -> Self {
        Self {
            started: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Starts a new interval, discarding any previous one.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    /// Ends the current interval. Without a prior `start` this is a no-op.
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    /// The recorded interval in whole milliseconds.
    #[inline]
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_an_interval() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        std::thread::sleep(Duration::from_millis(2));
        stopwatch.stop();
        assert!(stopwatch.elapsed_millis() >= 1);
    }

    #[test]
    fn stop_without_start() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.stop();
        assert_eq!(stopwatch.elapsed_millis(), 0);
    }

    #[test]
    fn restart_discards_previous_interval() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        std::thread::sleep(Duration::from_millis(2));
        stopwatch.stop();
        assert!(stopwatch.elapsed_millis() >= 1);
        stopwatch.start();
        assert_eq!(stopwatch.elapsed_millis(), 0);
    }
}
