use crate::diagnostic::DiagnosticKind;

/// Progress notifications from the collector and the runner.
///
/// Passing a reporter explicitly keeps per-test instrumentation out of
/// process-global state; callers decide where the notifications go.
pub trait Reporter {
    /// Called before the directory walk starts.
    fn discovery_started(&self);

    /// Called once the suite is built, with the number of selected tests.
    fn discovery_completed(&self, count: usize);

    /// Called immediately before a test executes.
    fn test_started(&self, test_id: &str);

    /// Called after a test completes. `outcome` is `None` for a pass.
    fn test_completed(&self, test_id: &str, outcome: Option<DiagnosticKind>);
}

/// A no-op implementation of [`Reporter`].
#[derive(Default)]
pub struct DummyReporter;

impl Reporter for DummyReporter {
    fn discovery_started(&self) {}
    fn discovery_completed(&self, _count: usize) {}
    fn test_started(&self, _test_id: &str) {}
    fn test_completed(&self, _test_id: &str, _outcome: Option<DiagnosticKind>) {}
}

/// Reports through `tracing` events.
#[derive(Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn discovery_started(&self) {
        tracing::debug!("Discovering tests");
    }

    fn discovery_completed(&self, count: usize) {
        tracing::info!("Selected {} tests", count);
    }

    fn test_started(&self, test_id: &str) {
        tracing::info!("Running {}", test_id);
    }

    fn test_completed(&self, test_id: &str, outcome: Option<DiagnosticKind>) {
        match outcome {
            None => tracing::debug!("Passed {}", test_id),
            Some(DiagnosticKind::Fail) => tracing::debug!("Failed {}", test_id),
            Some(DiagnosticKind::Error) => tracing::debug!("Errored {}", test_id),
        }
    }
}
