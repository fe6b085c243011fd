use std::sync::Mutex;

/// Progress report emitted once per iteration, after the pheromone update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationProgress {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Total iterations in this solve.
    pub total_iterations: usize,
    /// Cheapest fee found so far, `+inf` if nothing has arrived yet.
    pub best_fee: f64,
    /// Ants that reached the destination this iteration.
    pub arrivals: usize,
    /// True when this iteration lowered the best fee.
    pub improved: bool,
}

/// Receives per-iteration progress. Purely informational.
pub trait ProgressObserver: Send + Sync {
    fn on_iteration(&self, progress: &IterationProgress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&IterationProgress) + Send + Sync,
{
    fn on_iteration(&self, progress: &IterationProgress) {
        self(progress)
    }
}

/// Logs progress through `tracing`: improvements at info, the rest at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_iteration(&self, progress: &IterationProgress) {
        if progress.improved {
            tracing::info!(
                iteration = progress.iteration + 1,
                total = progress.total_iterations,
                best_fee = progress.best_fee,
                arrivals = progress.arrivals,
                "best fee improved"
            );
        } else {
            tracing::debug!(
                iteration = progress.iteration + 1,
                total = progress.total_iterations,
                best_fee = progress.best_fee,
                arrivals = progress.arrivals,
                "iteration complete"
            );
        }
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<IterationProgress>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, in order.
    pub fn reports(&self) -> Vec<IterationProgress> {
        self.reports
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_iteration(&self, progress: &IterationProgress) {
        match self.reports.lock() {
            Ok(mut reports) => reports.push(*progress),
            Err(poisoned) => poisoned.into_inner().push(*progress),
        }
    }
}
