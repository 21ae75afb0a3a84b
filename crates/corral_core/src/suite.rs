use std::{
    fmt::{self, Display},
    io::Write,
};

use colored::Colorize;
use pyo3::{prelude::*, types::PyType};

use crate::diagnostic::Diagnostic;

/// One runnable test: a bound instance of a test-case class plus the name of
/// the method it will run.
pub struct TestMethodCase {
    module: String,
    class_name: String,
    method: String,
    instance: Py<PyAny>,
}

impl TestMethodCase {
    /// Instantiates the class for one method, mirroring
    /// `unittest.TestCase(methodName)`.
    pub fn new(
        module: &str,
        class_name: &str,
        class: &Bound<'_, PyType>,
        method: String,
    ) -> PyResult<Self> {
        let instance = class.call1((method.as_str(),))?.unbind();

        Ok(Self {
            module: module.to_string(),
            class_name: class_name.to_string(),
            method,
            instance,
        })
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Runs `setUp`, the test method, and `tearDown`.
    ///
    /// Returns `None` on a pass. The method's own exception is classified
    /// failure-or-error; `setUp` and `tearDown` exceptions are always
    /// errors. `tearDown` still runs when the method raised, but its own
    /// outcome only surfaces when the method passed.
    pub fn run(&self, py: Python<'_>) -> Option<Diagnostic> {
        let test_id = self.to_string();
        let instance = self.instance.bind(py);

        if let Err(error) = instance.call_method0("setUp") {
            return Some(Diagnostic::from_py_err(py, &error, &test_id));
        }

        let outcome = instance.call_method0(self.method.as_str());
        let teardown = instance.call_method0("tearDown");

        match outcome {
            Err(error) => Some(Diagnostic::from_test_failure(py, &error, &test_id)),
            Ok(_) => match teardown {
                Err(error) => Some(Diagnostic::from_py_err(py, &error, &test_id)),
                Ok(_) => None,
            },
        }
    }
}

impl Display for TestMethodCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.module, self.class_name, self.method)
    }
}

impl fmt::Debug for TestMethodCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TestMethodCase({}::{}::{})",
            self.module, self.class_name, self.method
        )
    }
}

/// The ordered collection of runnable tests, in the same relative order as
/// the selection tree's leaves.
#[derive(Debug, Default)]
pub struct Suite {
    cases: Vec<TestMethodCase>,
}

impl Suite {
    pub fn push(&mut self, case: TestMethodCase) {
        self.cases.push(case);
    }

    #[must_use]
    pub fn cases(&self) -> &[TestMethodCase] {
        &self.cases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// What the suite will run, as an ordered module → class → method tree,
/// for reporting before execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTree {
    modules: Vec<ModuleSelection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSelection {
    name: String,
    classes: Vec<ClassSelection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelection {
    name: String,
    methods: Vec<String>,
}

impl ClassSelection {
    #[must_use]
    pub fn new(name: impl Into<String>, methods: Vec<String>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn methods(&self) -> &[String] {
        &self.methods
    }
}

impl ModuleSelection {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn classes(&self) -> &[ClassSelection] {
        &self.classes
    }
}

impl SelectionTree {
    /// Registers a class (with at least one surviving method) under its
    /// module, creating the module entry on first use.
    pub fn add_class(&mut self, module: &str, class: ClassSelection) {
        if let Some(existing) = self.modules.iter_mut().find(|m| m.name == module) {
            existing.classes.push(class);
        } else {
            self.modules.push(ModuleSelection {
                name: module.to_string(),
                classes: vec![class],
            });
        }
    }

    #[must_use]
    pub fn modules(&self) -> &[ModuleSelection] {
        &self.modules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of selected test methods. Equal to the suite's length after
    /// every build.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|module| &module.classes)
            .map(|class| class.methods.len())
            .sum()
    }

    pub fn display(&self, writer: &mut dyn Write) {
        let _ = writeln!(writer, "{}", format!("{:=<80}", "Unit-tests ").bold());

        for module in &self.modules {
            let _ = writeln!(writer, "{}", module.name.underline());
            for class in &module.classes {
                let _ = writeln!(writer, "  {}", class.name);
                for method in &class.methods {
                    let _ = writeln!(writer, "    {method}");
                }
            }
        }
    }
}
