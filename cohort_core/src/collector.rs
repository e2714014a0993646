use crate::description::Description;

/// Outcome of running a single unit, as reported to a [`ResultCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Passed,
    Failed(String),
    Skipped,
}

/// Sink for execution outcomes plus a cooperative stop signal.
///
/// A caller supplies one collector for a whole run; every unit reports into
/// it. `should_exit` is polled by composite units between children. It is a
/// plain boolean query, never an interrupt, so a long-running unit finishes
/// before the signal is observed.
pub trait ResultCollector {
    /// Called by a unit immediately before its body runs.
    fn notify_start(&mut self, description: &Description);

    /// Called by a unit once its outcome is known.
    fn notify_end(&mut self, description: &Description, status: UnitStatus);

    /// `true` requests that no further units be started.
    fn should_exit(&self) -> bool;
}

/// A `ResultCollector` that records every notification in order.
///
/// With `stop_on_failure` set, `should_exit` turns true once any unit
/// reports `Failed`, which makes a group stop after the failing child.
#[derive(Debug, Default)]
pub struct RecordingCollector {
    results: Vec<(Description, UnitStatus)>,
    stop_on_failure: bool,
    failure_seen: bool,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_on_failure() -> Self {
        Self {
            stop_on_failure: true,
            ..Self::default()
        }
    }

    /// Recorded `(description, status)` pairs, in notification order.
    pub fn results(&self) -> &[(Description, UnitStatus)] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, status)| *status == UnitStatus::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, status)| matches!(status, UnitStatus::Failed(_)))
            .count()
    }
}

impl ResultCollector for RecordingCollector {
    fn notify_start(&mut self, _description: &Description) {}

    fn notify_end(&mut self, description: &Description, status: UnitStatus) {
        if matches!(status, UnitStatus::Failed(_)) {
            self.failure_seen = true;
        }
        self.results.push((description.clone(), status));
    }

    fn should_exit(&self) -> bool {
        self.stop_on_failure && self.failure_seen
    }
}
