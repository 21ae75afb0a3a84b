use camino::Utf8PathBuf;
use corral_project::{project::Project, utils::module_name};
use pyo3::prelude::*;

use crate::{
    diagnostic::reporter::Reporter,
    discovery::discover_test_files,
    filter::FilterSet,
    python::{add_to_sys_path, test_case_base, test_case_classes, test_methods},
    suite::{ClassSelection, SelectionTree, Suite, TestMethodCase},
};

/// Builds the executable suite and its selection tree from a project.
///
/// Orchestrates scanner → loader → introspector → filter chain. Filtering
/// never mutates the loaded class definitions: a rejected method is only
/// excluded from this build, so collecting again with different filters in
/// the same process yields an independent selection.
pub struct SuiteCollector<'a> {
    project: &'a Project,
    filters: &'a FilterSet,
    reporter: &'a dyn Reporter,
}

impl<'a> SuiteCollector<'a> {
    #[must_use]
    pub const fn new(
        project: &'a Project,
        filters: &'a FilterSet,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            project,
            filters,
            reporter,
        }
    }

    /// Collects the suite. The selection tree's leaves and the suite's
    /// tests are the same set, in the same order.
    pub fn collect(&self) -> Result<(Suite, SelectionTree), CollectionError> {
        self.reporter.discovery_started();

        let files = discover_test_files(self.project.test_path());

        let mut suite = Suite::default();
        let mut selection = SelectionTree::default();

        Python::with_gil(|py| {
            add_to_sys_path(py, self.project.root_path())?;
            let base = test_case_base(py)?;

            for file in &files {
                let Some(module_id) = module_name(self.project.root_path(), file) else {
                    return Err(CollectionError::ModuleResolution {
                        path: file.clone(),
                        root: self.project.root_path().to_path_buf(),
                    });
                };

                tracing::debug!("Loading module {}", module_id);
                let module = PyModule::import(py, module_id.as_str()).map_err(|source| {
                    CollectionError::ModuleImport {
                        module: module_id.clone(),
                        source,
                    }
                })?;

                if !self.filters.modules().matches(&module_id) {
                    tracing::debug!("Skipping module {}", module_id);
                    continue;
                }

                for (class_name, class) in test_case_classes(&module, &base)? {
                    if !self.filters.classes().matches(&class_name) {
                        continue;
                    }

                    let selected: Vec<String> = test_methods(&class)?
                        .into_iter()
                        .filter(|method| self.filters.methods().matches(method))
                        .collect();

                    if selected.is_empty() {
                        continue;
                    }

                    for method in &selected {
                        suite.push(TestMethodCase::new(
                            &module_id,
                            &class_name,
                            &class,
                            method.clone(),
                        )?);
                    }
                    selection.add_class(&module_id, ClassSelection::new(class_name, selected));
                }
            }

            Ok(())
        })?;

        debug_assert_eq!(suite.len(), selection.leaf_count());

        self.reporter.discovery_completed(suite.len());

        Ok((suite, selection))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("`{path}` is not under the root path `{root}`")]
    ModuleResolution { path: Utf8PathBuf, root: Utf8PathBuf },

    #[error("failed to load module `{module}`")]
    ModuleImport {
        module: String,
        #[source]
        source: PyErr,
    },

    #[error(transparent)]
    Python(#[from] PyErr),
}
