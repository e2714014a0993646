use crate::collector::ResultCollector;
use crate::description::Description;
use crate::filter::TestFilter;
use std::any::Any;
use std::sync::Arc;

/// A unit of executable work that can report its identity, run itself, and
/// answer a filter.
///
/// Both leaf units and [`TestGroup`](crate::group::TestGroup) implement this
/// trait, so groups nest freely. Implementations hold whatever state they
/// need; the trait mandates none.
pub trait TestUnit: Send + Sync {
    /// The unit's identity. Pure, and stable across calls.
    fn description(&self) -> &Description;

    /// Runs the unit against `ctx`, reporting outcomes to `collector`.
    ///
    /// `ctx` is an opaque execution environment owned by the caller; units
    /// that need it downcast, units that don't ignore it. A unit whose body
    /// fails is expected to report that through the collector. An `Err`
    /// from this method means the unit could not be run at all, and callers
    /// propagate it without recovery.
    fn execute(
        &self,
        ctx: &dyn Any,
        collector: &mut dyn ResultCollector,
    ) -> Result<(), anyhow::Error>;

    /// Applies `filter` to this unit.
    ///
    /// Returns the unit (possibly narrowed) when it survives the filter, or
    /// `None` when it is excluded entirely. Pure: the receiver is never
    /// mutated.
    fn filter(&self, filter: &dyn TestFilter) -> Option<Arc<dyn TestUnit>>;

    /// Downcast support for structural comparison between unit kinds.
    fn as_any(&self) -> &dyn Any;

    /// Structural comparison between units.
    ///
    /// The default compares descriptions, which is the granularity leaf
    /// units are distinguished at. `TestGroup` overrides this to compare
    /// child sequences element-wise.
    fn eq_unit(&self, other: &dyn TestUnit) -> bool {
        self.description() == other.description()
    }
}
