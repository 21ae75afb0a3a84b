use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Gets the dotted module name for a Python file, relative to `root`.
///
/// Returns `None` if the path is not under `root`.
pub fn module_name(root: &Utf8Path, path: &Utf8Path) -> Option<String> {
    let relative_path = path.strip_prefix(root).ok()?;

    let components: Vec<&str> = relative_path
        .components()
        .map(|c| c.as_str())
        .collect();

    Some(components.join(".").trim_end_matches(".py").to_string())
}

/// Resolves `path` against `cwd` without touching the filesystem.
pub fn absolute(path: impl AsRef<Utf8Path>, cwd: impl AsRef<Utf8Path>) -> Utf8PathBuf {
    let path = path.as_ref();
    let cwd = cwd.as_ref();

    let mut components = path.components().peekable();
    let mut ret = if let Some(c @ (Utf8Component::Prefix(..) | Utf8Component::RootDir)) =
        components.peek().copied()
    {
        components.next();
        Utf8PathBuf::from(c.as_str())
    } else {
        cwd.to_path_buf()
    };

    for component in components {
        match component {
            Utf8Component::Prefix(..) => unreachable!(),
            Utf8Component::RootDir => {
                ret.push(component);
            }
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                ret.pop();
            }
            Utf8Component::Normal(c) => {
                ret.push(c);
            }
        }
    }

    ret
}
