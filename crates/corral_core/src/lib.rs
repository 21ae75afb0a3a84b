pub mod collector;
pub mod diagnostic;
pub mod discovery;
pub mod filter;
pub mod python;
pub mod runner;
pub mod suite;

pub use collector::{CollectionError, SuiteCollector};
pub use diagnostic::{
    Diagnostic, DiagnosticKind, RunnerResult,
    reporter::{DummyReporter, Reporter, TracingReporter},
};
pub use filter::{FilterError, FilterSet, NameFilter};
pub use runner::Runner;
pub use suite::{SelectionTree, Suite, TestMethodCase};
