use std::fmt;

/// Identity value for an executable unit.
///
/// A description names a unit, the suite (or other category) that owns it,
/// and optionally the method the unit was derived from. Two descriptions are
/// equal iff all three fields are equal; units are recognized as "the same"
/// by description wherever comparison is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description {
    name: String,
    suite: String,
    method: Option<String>,
}

impl Description {
    pub fn new(
        name: impl Into<String>,
        suite: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            suite: suite.into(),
            method,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{}::{} ({})", self.suite, self.name, method),
            None => write!(f, "{}::{}", self.suite, self.name),
        }
    }
}
