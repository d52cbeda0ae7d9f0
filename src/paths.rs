//! Lexical path helpers used to express file locations relative to the
//! generated project.
//!
//! Nothing here touches the filesystem: the output directory usually does not
//! exist yet when paths are resolved, so `canonicalize` is not an option.

use glob::MatchOptions;
use std::path::{Component, Path, PathBuf};

/// Shell-style matching shared by module and descriptor patterns: `*` stays
/// within one directory, dot entries must be named explicitly, case matters.
pub(crate) const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Collapses `.` and `..` components without consulting the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative path leading from directory `from` to directory `to`.
///
/// Walks up from `from` to the deepest common ancestor, then down into `to`.
/// Returns `.` when both are the same directory. Paths on different roots
/// (e.g. two Windows drives) have no relative form, so `to` is returned as is.
pub fn relative_dir(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let anchored = |parts: &[Component]| {
        parts
            .iter()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .count()
    };
    let (from_anchor, to_anchor) = (anchored(&from_parts), anchored(&to_parts));
    if from_parts[..from_anchor] != to_parts[..to_anchor] {
        return to;
    }

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

/// Path of `file` as seen from `base_dir`: the directory part is made relative,
/// then the file name is appended. A file directly inside `base_dir` yields its
/// bare name.
pub fn relative_file(base_dir: &Path, file: &Path) -> String {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let rel = relative_dir(base_dir, dir);
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if rel == Path::new(".") {
        name
    } else {
        format!("{}/{}", to_slash(&rel), name)
    }
}

/// Renders a path with forward slashes, which qmake and rcc accept on every
/// platform.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
