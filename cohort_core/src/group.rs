use crate::collector::ResultCollector;
use crate::description::Description;
use crate::filter::TestFilter;
use crate::unit::TestUnit;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building a [`TestGroup`].
#[derive(Error, Debug)]
pub enum GroupError {
    /// A group must hold at least one unit. Filtering encodes "nothing
    /// survived" as an absent group, so an empty-but-present group would be
    /// ambiguous and is rejected outright.
    #[error("cannot build a test group from an empty unit sequence")]
    NoUnits,
}

/// An ordered group of units exposed to callers as a single [`TestUnit`].
///
/// The child sequence is captured at construction and never mutated; child
/// order is preserved across construction, iteration, filtering, and
/// execution. Groups nest: a child may itself be a `TestGroup`.
///
/// The group's own description is the first child's description, cloned at
/// construction. Callers mostly look *through* a group via `execute`,
/// `filter`, and iteration, so the group does not synthesize an identity of
/// its own.
pub struct TestGroup {
    description: Description,
    children: Vec<Arc<dyn TestUnit>>,
}

impl TestGroup {
    /// Builds a group owning `children`, in the given order.
    ///
    /// Fails with [`GroupError::NoUnits`] when `children` is empty.
    pub fn new(children: Vec<Arc<dyn TestUnit>>) -> Result<Self, GroupError> {
        let first = children.first().ok_or(GroupError::NoUnits)?;
        let description = first.description().clone();
        Ok(Self {
            description,
            children,
        })
    }

    // Internal constructor for the filter path, where non-emptiness has
    // already been established.
    fn from_nonempty(children: Vec<Arc<dyn TestUnit>>) -> Self {
        debug_assert!(!children.is_empty());
        let description = children[0].description().clone();
        Self {
            description,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        // Always false for a constructed group; provided for completeness.
        self.children.is_empty()
    }

    /// Read-only view over the children in construction order.
    ///
    /// Restartable and side-effect free: iterating performs no execution.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn TestUnit>> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a TestGroup {
    type Item = &'a Arc<dyn TestUnit>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn TestUnit>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TestUnit for TestGroup {
    fn description(&self) -> &Description {
        &self.description
    }

    /// Executes every child strictly in construction order.
    ///
    /// The context and collector are forwarded unchanged. After each child
    /// returns, the collector's stop signal is polled; a `true` answer stops
    /// the iteration before the next child. A child `Err` propagates
    /// immediately and aborts the remaining children. The group aggregates
    /// nothing itself; outcomes flow straight into the shared collector.
    fn execute(
        &self,
        ctx: &dyn Any,
        collector: &mut dyn ResultCollector,
    ) -> Result<(), anyhow::Error> {
        for child in &self.children {
            child.execute(ctx, collector)?;
            if collector.should_exit() {
                tracing::debug!(
                    group = %self.description,
                    after = %child.description(),
                    "collector requested exit, stopping group execution"
                );
                break;
            }
        }
        Ok(())
    }

    /// Folds each child's own filtering decision, preserving order.
    ///
    /// The group never interprets the predicate; children that answer
    /// `None` are dropped, and the survivors form a new group. When no
    /// child survives, the whole group is excluded.
    fn filter(&self, filter: &dyn TestFilter) -> Option<Arc<dyn TestUnit>> {
        let kept: Vec<Arc<dyn TestUnit>> = self
            .children
            .iter()
            .filter_map(|child| child.filter(filter))
            .collect();
        if kept.is_empty() {
            tracing::debug!(group = %self.description, "no children survived filter");
            return None;
        }
        Some(Arc::new(TestGroup::from_nonempty(kept)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_unit(&self, other: &dyn TestUnit) -> bool {
        match other.as_any().downcast_ref::<TestGroup>() {
            Some(other) => {
                self.children.len() == other.children.len()
                    && self
                        .children
                        .iter()
                        .zip(&other.children)
                        .all(|(a, b)| a.eq_unit(b.as_ref()))
            }
            None => false,
        }
    }
}

impl PartialEq for TestGroup {
    fn eq(&self, other: &Self) -> bool {
        self.eq_unit(other)
    }
}

impl fmt::Debug for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestGroup")
            .field("description", &self.description)
            .field(
                "children",
                &self
                    .children
                    .iter()
                    .map(|c| c.description().to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
