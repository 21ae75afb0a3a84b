use std::io::Write;

use colored::Colorize;
use pyo3::{exceptions::PyAssertionError, prelude::*};

pub mod reporter;

/// The recorded outcome of one test that did not pass.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    test_id: String,
    kind: DiagnosticKind,
    traceback: String,
}

impl Diagnostic {
    /// Classifies a test exception: an `AssertionError` is a failure, any
    /// other exception is an unexpected error.
    pub fn from_test_failure(py: Python<'_>, error: &PyErr, test_id: &str) -> Self {
        let kind = if error.value(py).is_instance_of::<PyAssertionError>() {
            DiagnosticKind::Fail
        } else {
            DiagnosticKind::Error
        };

        Self {
            test_id: test_id.to_string(),
            kind,
            traceback: render_traceback(py, error),
        }
    }

    /// An exception raised outside the test method itself (`setUp`,
    /// `tearDown`), always recorded as an error.
    pub fn from_py_err(py: Python<'_>, error: &PyErr, test_id: &str) -> Self {
        Self {
            test_id: test_id.to_string(),
            kind: DiagnosticKind::Error,
            traceback: render_traceback(py, error),
        }
    }

    #[must_use]
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[must_use]
    pub fn traceback(&self) -> &str {
        &self.traceback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An assertion-style failure signalled by the test.
    Fail,
    /// Any other unexpected exception.
    Error,
}

/// Renders the Python traceback of `error`, de-indented, with the exception
/// line appended.
fn render_traceback(py: Python<'_>, error: &PyErr) -> String {
    let traceback = error
        .traceback(py)
        .map(|traceback| filter_traceback(&traceback.format().unwrap_or_default()))
        .unwrap_or_default();

    if traceback.is_empty() {
        error.to_string()
    } else {
        format!("{traceback}\n{error}")
    }
}

fn filter_traceback(traceback: &str) -> String {
    let mut filtered = String::new();

    for (i, line) in traceback.lines().enumerate() {
        if i == 0 && line.contains("Traceback (most recent call last):") {
            continue;
        }
        filtered.push_str(line.strip_prefix("  ").unwrap_or(line));
        filtered.push('\n');
    }

    filtered.trim_end().to_string()
}

/// The aggregated outcome of one runner invocation.
#[derive(Debug, Clone, Default)]
pub struct RunnerResult {
    total: usize,
    completed: usize,
    passed: usize,
    diagnostics: Vec<Diagnostic>,
    interrupted: bool,
}

impl RunnerResult {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, diagnostic: Option<Diagnostic>) {
        self.completed += 1;
        match diagnostic {
            None => self.passed += 1,
            Some(diagnostic) => self.diagnostics.push(diagnostic),
        }
    }

    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub const fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind() == DiagnosticKind::Fail)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind() == DiagnosticKind::Error)
    }

    /// True when every executed test passed and the run was not cut short.
    /// An empty suite is a successful run.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty() && !self.interrupted
    }

    pub fn display(&self, writer: &mut dyn Write) {
        let _ = writeln!(writer, "{}", format!("{:=<80}", "Results ").bold());

        let failure_count = self.failures().count();
        let error_count = self.errors().count();

        if failure_count == 0 && error_count == 0 {
            let _ = writeln!(
                writer,
                "{}",
                "STATUS: Success. All unit-tests passed.".green()
            );
        } else {
            let _ = writeln!(
                writer,
                "{}",
                format!(
                    "STATUS: Failed. There were {failure_count} failures and {error_count} \
                     unexpected errors."
                )
                .red()
            );

            for (n, diagnostic) in self.failures().enumerate() {
                let heading = format!("- Failure #{}: {} ", n + 1, diagnostic.test_id());
                let _ = writeln!(writer, "{}", format!("{heading:-<80}").red());
                let _ = writeln!(writer, "{}", diagnostic.traceback());
            }

            for (n, diagnostic) in self.errors().enumerate() {
                let heading = format!("- Error #{}: {} ", n + 1, diagnostic.test_id());
                let _ = writeln!(writer, "{}", format!("{heading:-<80}").red());
                let _ = writeln!(writer, "{}", diagnostic.traceback());
            }
        }

        if self.interrupted {
            let _ = writeln!(
                writer,
                "{}",
                format!(
                    "Interrupted: {} of {} tests were not run.",
                    self.total - self.completed,
                    self.total
                )
                .yellow()
            );
        }
    }
}
