use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

/// Directory base name that marks a unit-test root.
pub const UNITTEST_DIR_NAME: &str = "_unittests";

/// Sub-folder of a unit-test root that holds the test files.
pub const TEST_FOLDER_NAME: &str = "tests";

/// Prefix of a test file (and of a test method).
pub const TEST_PREFIX: &str = "test";

const PYTHON_EXTENSION: &str = "py";

/// Walks `test_path` recursively and collects every directory whose base
/// name is [`UNITTEST_DIR_NAME`], in walk order.
fn unittest_directories(test_path: &Utf8Path) -> Vec<Utf8PathBuf> {
    let walker = WalkBuilder::new(test_path.as_std_path())
        .standard_filters(false)
        .require_git(false)
        .build();

    let mut directories = Vec::new();
    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|file_type| file_type.is_dir()) {
            continue;
        }
        if entry.file_name().to_str() != Some(UNITTEST_DIR_NAME) {
            continue;
        }
        match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => directories.push(path),
            Err(path) => {
                tracing::warn!("Skipping non-UTF-8 path: {}", path.display());
            }
        }
    }

    directories
}

/// Lists the test files directly inside the `tests` sub-folder of a
/// unit-test root: file names starting with `test` and ending in `.py`.
///
/// The listing is not recursive; a missing sub-folder yields nothing.
fn unittest_files(unittest_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let test_folder = unittest_dir.join(TEST_FOLDER_NAME);
    let Ok(entries) = test_folder.read_dir_utf8() else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|entry| {
            entry.file_type().is_ok_and(|file_type| file_type.is_file())
                && entry.file_name().starts_with(TEST_PREFIX)
                && entry.path().extension() == Some(PYTHON_EXTENSION)
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Discovers all candidate test files under `test_path`.
///
/// The result order follows directory-walk order and then per-folder listing
/// order. Both inherit the filesystem's enumeration order, which is not
/// guaranteed to be alphabetical; consumers must tolerate it, not rely on it.
#[must_use]
pub fn discover_test_files(test_path: &Utf8Path) -> Vec<Utf8PathBuf> {
    let files: Vec<Utf8PathBuf> = unittest_directories(test_path)
        .iter()
        .flat_map(|directory| unittest_files(directory))
        .collect();

    tracing::debug!(
        "Discovered {} test files under {}",
        files.len(),
        test_path
    );

    files
}
