use camino::Utf8Path;
use pyo3::{
    prelude::*,
    types::{PyList, PyType},
};

use crate::discovery::TEST_PREFIX;

/// Initializes the embedded interpreter. Safe to call more than once.
pub fn init() {
    pyo3::prepare_freethreaded_python();
}

/// Inserts `path` at the front of `sys.path` so that discovered modules can
/// be imported by their dotted names. Skipped when already present.
pub fn add_to_sys_path(py: Python<'_>, path: &Utf8Path) -> PyResult<()> {
    let sys_path = py
        .import("sys")?
        .getattr("path")?
        .downcast_into::<PyList>()?;

    if !sys_path.contains(path.as_str())? {
        sys_path.insert(0, path.as_str())?;
    }

    Ok(())
}

/// The `unittest.TestCase` base type, the capability marker for test classes.
pub fn test_case_base(py: Python<'_>) -> PyResult<Bound<'_, PyType>> {
    Ok(py
        .import("unittest")?
        .getattr("TestCase")?
        .downcast_into::<PyType>()?)
}

/// Returns the classes in `module`'s namespace that implement the test-case
/// capability, excluding the base marker type itself.
///
/// Order follows the module namespace (dict insertion order for classes
/// defined in the module). It is an implementation detail of the
/// interpreter, not a semantic guarantee.
pub fn test_case_classes<'py>(
    module: &Bound<'py, PyModule>,
    base: &Bound<'py, PyType>,
) -> PyResult<Vec<(String, Bound<'py, PyType>)>> {
    let mut classes = Vec::new();

    for (name, value) in module.dict().iter() {
        let Ok(name) = name.extract::<String>() else {
            continue;
        };
        let Ok(class) = value.downcast_into::<PyType>() else {
            continue;
        };
        if class.is(base) {
            continue;
        }
        if class.is_subclass(base.as_any())? {
            classes.push((name, class));
        }
    }

    Ok(classes)
}

/// Enumerates the candidate test methods of a class: callable attributes
/// whose name starts with the test prefix, inherited ones included.
///
/// `dir()` sorts names alphabetically, which is what fixes the relative
/// order of methods within one class.
pub fn test_methods(class: &Bound<'_, PyType>) -> PyResult<Vec<String>> {
    let mut methods = Vec::new();

    for name in class.dir()?.iter() {
        let Ok(name) = name.extract::<String>() else {
            continue;
        };
        if !name.starts_with(TEST_PREFIX) {
            continue;
        }
        if class.getattr(name.as_str())?.is_callable() {
            methods.push(name);
        }
    }

    Ok(methods)
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;

    fn module_from_code<'py>(py: Python<'py>, code: &str) -> Bound<'py, PyModule> {
        let code = CString::new(code).unwrap();
        PyModule::from_code(py, &code, c"test.py", c"test").unwrap()
    }

    #[test]
    fn test_test_case_classes_excludes_base_and_non_cases() {
        init();
        Python::with_gil(|py| {
            let module = module_from_code(
                py,
                r"
import unittest

TestCase = unittest.TestCase

class Helper:
    pass

class FooTest(unittest.TestCase):
    def test_a(self): pass

class BarTest(FooTest):
    pass
",
            );

            let base = test_case_base(py).unwrap();
            let classes = test_case_classes(&module, &base).unwrap();
            let names: Vec<&str> = classes.iter().map(|(name, _)| name.as_str()).collect();

            assert_eq!(names, vec!["FooTest", "BarTest"]);
        });
    }

    #[test]
    fn test_test_methods_are_sorted_and_include_inherited() {
        init();
        Python::with_gil(|py| {
            let module = module_from_code(
                py,
                r"
import unittest

class Base(unittest.TestCase):
    def test_inherited(self): pass

class Derived(Base):
    test_value = 42

    def test_b(self): pass
    def test_a(self): pass
    def helper(self): pass
",
            );

            let base = test_case_base(py).unwrap();
            let classes = test_case_classes(&module, &base).unwrap();
            let derived = &classes
                .iter()
                .find(|(name, _)| name == "Derived")
                .unwrap()
                .1;

            assert_eq!(
                test_methods(derived).unwrap(),
                vec!["test_a", "test_b", "test_inherited"]
            );
        });
    }

    #[test]
    fn test_add_to_sys_path_is_idempotent() {
        init();
        Python::with_gil(|py| {
            let path = Utf8Path::new("/corral-sys-path-probe");

            add_to_sys_path(py, path).unwrap();
            add_to_sys_path(py, path).unwrap();

            let sys_path = py
                .import("sys")
                .unwrap()
                .getattr("path")
                .unwrap()
                .downcast_into::<PyList>()
                .unwrap();
            let occurrences = sys_path
                .iter()
                .filter(|entry| {
                    entry
                        .extract::<String>()
                        .is_ok_and(|entry| entry == path.as_str())
                })
                .count();

            assert_eq!(occurrences, 1);
        });
    }
}
