use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use pyo3::prelude::*;

use crate::{
    diagnostic::{RunnerResult, reporter::Reporter},
    suite::Suite,
};

/// Executes a suite sequentially, in suite order.
pub struct Runner<'a> {
    reporter: &'a dyn Reporter,
    interrupted: Arc<AtomicBool>,
}

impl<'a> Runner<'a> {
    #[must_use]
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A flag that stops the run when set. Checked between tests, so the
    /// test in flight finishes and its outcome is kept.
    #[must_use]
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// Runs every test in the suite, collecting per-test outcomes. A raised
    /// interrupt flag ends the run early with the results gathered so far.
    #[must_use]
    pub fn run(&self, suite: &Suite) -> RunnerResult {
        let mut result = RunnerResult::new(suite.len());

        Python::with_gil(|py| {
            for case in suite.cases() {
                if self.interrupted.load(Ordering::SeqCst) {
                    tracing::warn!("Interrupted, stopping after {} tests", result.completed());
                    result.mark_interrupted();
                    break;
                }

                let test_id = case.to_string();
                self.reporter.test_started(&test_id);

                let diagnostic = case.run(py);
                self.reporter
                    .test_completed(&test_id, diagnostic.as_ref().map(|d| d.kind()));
                result.record(diagnostic);
            }
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use corral_project::{project::Project, tests::TestEnv};

    use super::*;
    use crate::{
        collector::SuiteCollector,
        diagnostic::{DiagnosticKind, reporter::DummyReporter},
        filter::FilterSet,
        python,
    };

    fn build_suite(env: &TestEnv, package: &str, content: &str) -> Suite {
        python::init();
        env.create_unittest_file(package, "test_run.py", content);
        let project = Project::new(env.cwd(), env.cwd()).unwrap();
        let filters = FilterSet::default();
        let (suite, _) = SuiteCollector::new(&project, &filters, &DummyReporter)
            .collect()
            .unwrap();
        suite
    }

    #[test]
    fn test_run_passing_suite() {
        let env = TestEnv::new();
        let suite = build_suite(
            &env,
            &env.unique_package(),
            r"
import unittest

class PassTest(unittest.TestCase):
    def test_a(self):
        self.assertEqual(1 + 1, 2)

    def test_b(self):
        pass
",
        );

        let result = Runner::new(&DummyReporter).run(&suite);

        assert!(result.is_success());
        assert_eq!(result.passed(), 2);
        assert_eq!(result.completed(), 2);
    }

    #[test]
    fn test_run_distinguishes_failures_from_errors() {
        let env = TestEnv::new();
        let suite = build_suite(
            &env,
            &env.unique_package(),
            r"
import unittest

class MixedTest(unittest.TestCase):
    def test_errors(self):
        raise ValueError('boom')

    def test_fails(self):
        self.assertTrue(False)

    def test_passes(self):
        pass
",
        );

        let result = Runner::new(&DummyReporter).run(&suite);

        assert!(!result.is_success());
        assert_eq!(result.passed(), 1);
        assert_eq!(result.failures().count(), 1);
        assert_eq!(result.errors().count(), 1);
    }

    #[test]
    fn test_failure_diagnostic_carries_test_id_and_traceback() {
        let env = TestEnv::new();
        let package = env.unique_package();
        let suite = build_suite(
            &env,
            &package,
            r"
import unittest

class FailTest(unittest.TestCase):
    def test_fails(self):
        self.assertEqual(1, 2)
",
        );

        let result = Runner::new(&DummyReporter).run(&suite);
        let diagnostic = result.failures().next().unwrap();

        assert_eq!(
            diagnostic.test_id(),
            format!("{package}._unittests.tests.test_run::FailTest::test_fails")
        );
        assert_eq!(diagnostic.kind(), DiagnosticKind::Fail);
        assert!(diagnostic.traceback().contains("1 != 2"));
    }

    #[test]
    fn test_set_up_exception_is_an_error() {
        let env = TestEnv::new();
        let suite = build_suite(
            &env,
            &env.unique_package(),
            r"
import unittest

class BrokenSetUpTest(unittest.TestCase):
    def setUp(self):
        raise RuntimeError('no fixture')

    def test_never_runs(self):
        pass
",
        );

        let result = Runner::new(&DummyReporter).run(&suite);

        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.failures().count(), 0);
    }

    #[test]
    fn test_set_up_and_tear_down_wrap_each_test() {
        let env = TestEnv::new();
        let suite = build_suite(
            &env,
            &env.unique_package(),
            r"
import unittest

class FixtureTest(unittest.TestCase):
    def setUp(self):
        self.value = 41

    def tearDown(self):
        del self.value

    def test_fixture_is_fresh(self):
        self.assertEqual(self.value + 1, 42)
",
        );

        let result = Runner::new(&DummyReporter).run(&suite);

        assert!(result.is_success());
    }

    #[test]
    fn test_empty_suite_is_success() {
        python::init();
        let result = Runner::new(&DummyReporter).run(&Suite::default());

        assert!(result.is_success());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_interrupt_flag_stops_the_run() {
        let env = TestEnv::new();
        let suite = build_suite(
            &env,
            &env.unique_package(),
            r"
import unittest

class SlowTest(unittest.TestCase):
    def test_a(self):
        pass

    def test_b(self):
        pass
",
        );

        let runner = Runner::new(&DummyReporter);
        runner.interrupt_flag().store(true, Ordering::SeqCst);
        let result = runner.run(&suite);

        assert!(result.interrupted());
        assert!(!result.is_success());
        assert_eq!(result.completed(), 0);
        assert_eq!(result.total(), 2);
    }
}
