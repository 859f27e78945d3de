use std::path::{Component, Path, PathBuf};

/// Anchor `path` at `cwd` and resolve `.` and `..` components lexically.
///
/// Symlinks are not followed. `..` at the root stays at the root.
pub fn lexical_absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = cwd.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Express `path` relative to `base`, purely lexically.
///
/// Relative inputs are anchored at `cwd` first. Returns `.` when both
/// resolve to the same location.
pub fn relative_path(path: &Path, base: &Path, cwd: &Path) -> PathBuf {
    let path = lexical_absolute(path, cwd);
    let base = lexical_absolute(base, cwd);

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part.as_os_str());
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
