use camino::{Utf8Path, Utf8PathBuf};

/// The validated configuration of a single run.
///
/// `root_path` is the directory module names are resolved against (and the
/// directory added to the interpreter's import path), `test_path` is the top
/// of the tree that is searched for unit-test folders. `test_path` is usually
/// somewhere below `root_path`, but that is not required as long as every
/// discovered test file is reachable from `root_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root_path: Utf8PathBuf,
    test_path: Utf8PathBuf,
}

impl Project {
    /// Creates a new project after checking that both paths are existing
    /// directories. No other I/O happens here.
    pub fn new(
        root_path: impl Into<Utf8PathBuf>,
        test_path: impl Into<Utf8PathBuf>,
    ) -> Result<Self, ProjectError> {
        let root_path = root_path.into();
        let test_path = test_path.into();

        if !root_path.is_dir() {
            return Err(ProjectError::NotADirectory(root_path));
        }
        if !test_path.is_dir() {
            return Err(ProjectError::NotADirectory(test_path));
        }

        Ok(Self {
            root_path,
            test_path,
        })
    }

    #[must_use]
    pub fn root_path(&self) -> &Utf8Path {
        &self.root_path
    }

    #[must_use]
    pub fn test_path(&self) -> &Utf8Path {
        &self.test_path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("`{0}` is not a directory")]
    NotADirectory(Utf8PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestEnv;

    #[test]
    fn test_project_with_existing_directories() {
        let env = TestEnv::new();
        let tests_dir = env.create_dir("tests");

        let project = Project::new(env.cwd(), tests_dir.clone()).unwrap();

        assert_eq!(project.root_path(), env.cwd());
        assert_eq!(project.test_path(), tests_dir);
    }

    #[test]
    fn test_project_with_missing_test_path() {
        let env = TestEnv::new();

        let err = Project::new(env.cwd(), env.temp_path("does_not_exist")).unwrap_err();

        assert!(err.to_string().ends_with("is not a directory"));
    }

    #[test]
    fn test_project_with_file_as_root_path() {
        let env = TestEnv::new();
        let file = env.create_file("not_a_dir.py", "");

        assert!(Project::new(file, env.cwd()).is_err());
    }
}
