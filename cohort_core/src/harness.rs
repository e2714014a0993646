use crate::collector::{ResultCollector, UnitStatus};
use crate::description::Description;
use crate::filter::TestFilter;
use crate::unit::TestUnit;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// A leaf unit that runs a harness closure in the current process.
///
/// The closure receives the opaque execution context handed to `execute` and
/// signals failure by panicking, which is how `assert!`-style test bodies
/// naturally behave. A panic becomes a `UnitStatus::Failed` on the
/// collector; it is not an `Err` from `execute`.
#[derive(Clone)]
pub struct InProcessUnit {
    description: Description,
    harness: Arc<dyn Fn(&dyn Any) + Send + Sync>,
}

impl InProcessUnit {
    pub fn new(
        description: Description,
        harness: impl Fn(&dyn Any) + Send + Sync + 'static,
    ) -> Self {
        Self {
            description,
            harness: Arc::new(harness),
        }
    }
}

impl TestUnit for InProcessUnit {
    fn description(&self) -> &Description {
        &self.description
    }

    fn execute(
        &self,
        ctx: &dyn Any,
        collector: &mut dyn ResultCollector,
    ) -> Result<(), anyhow::Error> {
        collector.notify_start(&self.description);

        let result = catch_unwind(AssertUnwindSafe(|| {
            (self.harness)(ctx);
        }));

        let status = match result {
            Ok(()) => UnitStatus::Passed,
            Err(panic_payload) => {
                let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic type".to_string()
                };
                UnitStatus::Failed(msg)
            }
        };

        collector.notify_end(&self.description, status);
        Ok(())
    }

    fn filter(&self, filter: &dyn TestFilter) -> Option<Arc<dyn TestUnit>> {
        filter
            .matches(&self.description)
            .then(|| Arc::new(self.clone()) as Arc<dyn TestUnit>)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::RecordingCollector;
    use crate::filter::NameFilter;

    fn unit(name: &str, harness: impl Fn(&dyn Any) + Send + Sync + 'static) -> InProcessUnit {
        InProcessUnit::new(Description::new(name, "harness_suite", None), harness)
    }

    #[test]
    fn a_clean_harness_reports_passed() {
        let testee = unit("clean", |_| {});
        let mut collector = RecordingCollector::new();

        testee.execute(&(), &mut collector).expect("execute succeeds");

        assert_eq!(collector.results().len(), 1);
        assert_eq!(collector.results()[0].1, UnitStatus::Passed);
    }

    #[test]
    fn a_panicking_harness_reports_failed_with_the_panic_message() {
        let testee = unit("explodes", |_| panic!("Boom!"));
        let mut collector = RecordingCollector::new();

        testee.execute(&(), &mut collector).expect("panic is a result, not an error");

        match &collector.results()[0].1 {
            UnitStatus::Failed(msg) => assert!(msg.contains("Boom!")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn the_execution_context_reaches_the_harness_unchanged() {
        let testee = unit("needs_ctx", |ctx| {
            let value = ctx.downcast_ref::<u32>().expect("caller passed a u32");
            assert_eq!(*value, 42);
        });
        let mut collector = RecordingCollector::new();

        testee.execute(&42u32, &mut collector).expect("execute succeeds");
        assert_eq!(collector.results()[0].1, UnitStatus::Passed);
    }

    #[test]
    fn filter_answers_are_based_on_the_description() {
        let testee = unit("parses_header", |_| {});

        assert!(testee.filter(&NameFilter::new("header")).is_some());
        assert!(testee.filter(&NameFilter::new("footer")).is_none());
    }
}
