use crate::collector::{ResultCollector, UnitStatus};
use crate::description::Description;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read access to coverage data recorded by an external tracker.
///
/// The execution core never queries coverage itself; listeners produced by a
/// [`ListenerFactory`] may.
pub trait CoverageSource: Send + Sync {
    /// Number of covered code locations recorded for `suite`, if tracked.
    fn covered_locations(&self, suite: &str) -> Option<usize>;
}

/// Resolves a suite identifier to the path of its source file.
pub trait SourceLocator: Send + Sync {
    fn locate(&self, suite: &str) -> Option<PathBuf>;
}

/// Observer of execution and reporting events for a whole run.
pub trait TestListener: Send + Sync {
    fn run_started(&mut self) {}
    fn unit_started(&mut self, description: &Description);
    fn unit_finished(&mut self, description: &Description, status: &UnitStatus);
    fn run_finished(&mut self) {}
}

/// Assembles the listener for a run from the reporting collaborators.
pub trait ListenerFactory {
    fn create_listener(
        &self,
        coverage: &dyn CoverageSource,
        output_dir: &Path,
        start_time: SystemTime,
        locator: &dyn SourceLocator,
    ) -> Box<dyn TestListener>;
}

/// A `CoverageSource` with no data. Stands in when no tracker is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCoverage;

impl CoverageSource for NoCoverage {
    fn covered_locations(&self, _suite: &str) -> Option<usize> {
        None
    }
}

/// A `SourceLocator` that resolves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSources;

impl SourceLocator for NoSources {
    fn locate(&self, _suite: &str) -> Option<PathBuf> {
        None
    }
}

/// Produces a [`LogListener`].
#[derive(Debug, Default)]
pub struct LogListenerFactory;

impl ListenerFactory for LogListenerFactory {
    fn create_listener(
        &self,
        _coverage: &dyn CoverageSource,
        _output_dir: &Path,
        start_time: SystemTime,
        _locator: &dyn SourceLocator,
    ) -> Box<dyn TestListener> {
        Box::new(LogListener { start_time })
    }
}

/// Listener that narrates the run through tracing events.
///
/// Writes no report files; rendering a browsable report belongs to an
/// external collaborator.
pub struct LogListener {
    start_time: SystemTime,
}

impl TestListener for LogListener {
    fn run_started(&mut self) {
        tracing::info!("run started");
    }

    fn unit_started(&mut self, description: &Description) {
        tracing::debug!(unit = %description, "unit started");
    }

    fn unit_finished(&mut self, description: &Description, status: &UnitStatus) {
        match status {
            UnitStatus::Passed => tracing::info!(unit = %description, "passed"),
            UnitStatus::Failed(msg) => {
                tracing::warn!(unit = %description, failure = %msg, "failed")
            }
            UnitStatus::Skipped => tracing::info!(unit = %description, "skipped"),
        }
    }

    fn run_finished(&mut self) {
        let elapsed = self.start_time.elapsed().unwrap_or_default();
        tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "run finished");
    }
}

/// Collector decorator that mirrors notifications to a [`TestListener`].
///
/// Recording and the stop signal stay with the inner collector; the listener
/// only observes. This is the glue between the execution flow and the
/// reporting pipeline.
pub struct ListeningCollector<C> {
    inner: C,
    listener: Box<dyn TestListener>,
}

impl<C: ResultCollector> ListeningCollector<C> {
    pub fn new(inner: C, mut listener: Box<dyn TestListener>) -> Self {
        listener.run_started();
        Self { inner, listener }
    }

    /// Signals the end of the run to the listener and hands back the inner
    /// collector for inspection.
    pub fn finish(mut self) -> C {
        self.listener.run_finished();
        self.inner
    }
}

impl<C: ResultCollector> ResultCollector for ListeningCollector<C> {
    fn notify_start(&mut self, description: &Description) {
        self.listener.unit_started(description);
        self.inner.notify_start(description);
    }

    fn notify_end(&mut self, description: &Description, status: UnitStatus) {
        self.listener.unit_finished(description, &status);
        self.inner.notify_end(description, status);
    }

    fn should_exit(&self) -> bool {
        self.inner.should_exit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::RecordingCollector;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct EventLog {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl TestListener for EventLog {
        fn run_started(&mut self) {
            self.events.lock().unwrap().push("run_started".to_string());
        }

        fn unit_started(&mut self, description: &Description) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {}", description.name()));
        }

        fn unit_finished(&mut self, description: &Description, _status: &UnitStatus) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish {}", description.name()));
        }

        fn run_finished(&mut self) {
            self.events.lock().unwrap().push("run_finished".to_string());
        }
    }

    #[test]
    fn listening_collector_mirrors_events_and_keeps_recording() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let listener = EventLog {
            events: events.clone(),
        };

        let mut collector =
            ListeningCollector::new(RecordingCollector::new(), Box::new(listener));
        let description = Description::new("foo", "suite", None);
        collector.notify_start(&description);
        collector.notify_end(&description, UnitStatus::Passed);
        let inner = collector.finish();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["run_started", "start foo", "finish foo", "run_finished"]
        );
        assert_eq!(inner.passed(), 1);
    }

    #[test]
    fn listening_collector_delegates_the_stop_signal() {
        let mut collector = ListeningCollector::new(
            RecordingCollector::stopping_on_failure(),
            Box::new(EventLog::default()),
        );
        assert!(!collector.should_exit());

        let description = Description::new("foo", "suite", None);
        collector.notify_end(&description, UnitStatus::Failed("boom".to_string()));
        assert!(collector.should_exit());
    }

    #[test]
    fn no_op_collaborators_answer_nothing() {
        assert!(NoCoverage.covered_locations("suite").is_none());
        assert!(NoSources.locate("suite").is_none());
    }

    #[test]
    fn log_listener_factory_produces_a_listener() {
        let factory = LogListenerFactory;
        let mut listener = factory.create_listener(
            &NoCoverage,
            Path::new("./report"),
            SystemTime::now(),
            &NoSources,
        );
        // Smoke: the produced listener accepts the full event sequence.
        listener.run_started();
        let description = Description::new("foo", "suite", None);
        listener.unit_started(&description);
        listener.unit_finished(&description, &UnitStatus::Passed);
        listener.run_finished();
    }
}
