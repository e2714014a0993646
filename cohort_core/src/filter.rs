use crate::description::Description;

/// Predicate used to select or deselect units.
///
/// Filters are interpreted by leaf units only; a composite passes the filter
/// through to each child unchanged and aggregates the answers. Implementations
/// must not assume anything about group structure.
pub trait TestFilter: Send + Sync {
    fn matches(&self, description: &Description) -> bool;
}

impl<F> TestFilter for F
where
    F: Fn(&Description) -> bool + Send + Sync,
{
    fn matches(&self, description: &Description) -> bool {
        self(description)
    }
}

/// Keeps units whose name or suite contains the given fragment.
#[derive(Debug, Clone)]
pub struct NameFilter {
    fragment: String,
}

impl NameFilter {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl TestFilter for NameFilter {
    fn matches(&self, description: &Description) -> bool {
        description.name().contains(&self.fragment)
            || description.suite().contains(&self.fragment)
    }
}
