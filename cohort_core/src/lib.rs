pub mod collector;
pub mod config;
pub mod description;
pub mod filter;
pub mod group;
pub mod harness;
pub mod report;
pub mod unit;

pub use collector::{RecordingCollector, ResultCollector, UnitStatus};
pub use config::{CohortConfig, ReportSettings, RunSettings};
pub use description::Description;
pub use filter::{NameFilter, TestFilter};
pub use group::{GroupError, TestGroup};
pub use harness::InProcessUnit;
pub use report::{
    CoverageSource, ListenerFactory, ListeningCollector, LogListener, LogListenerFactory,
    NoCoverage, NoSources, SourceLocator, TestListener,
};
pub use unit::TestUnit;
