//! Module descriptor discovery.
//!
//! Finds `module.toml` files under the project root, either through the glob
//! patterns listed in `[project].modules` or, when none are given, by walking
//! the whole tree. Each descriptor is parsed independently so one broken file
//! only costs that module.

use crate::config::{self, MODULE_FILE};
use crate::error::GenError;
use crate::module::ModuleDeclaration;
use crate::paths;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into during a full walk.
const SKIPPED_DIRS: &[&str] = &[".git", ".svn", ".hg", "target", "node_modules"];

#[derive(Debug, Default)]
pub struct Discovery {
    pub declarations: Vec<ModuleDeclaration>,
    pub errors: Vec<GenError>,
}

/// Descriptor files in discovery order, plus the entries that could not be
/// read while looking for them.
#[derive(Debug, Default)]
pub struct Located {
    pub files: Vec<PathBuf>,
    pub errors: Vec<GenError>,
}

/// Locates descriptor files in discovery order.
///
/// Pattern matches keep the order of the patterns, then glob order within a
/// pattern; a file matched by several patterns is only listed once. `exclude`
/// (typically the output tree) is pruned from the default walk. Unreadable
/// directories are reported in [`Located::errors`] and the search goes on.
pub fn find_descriptors(
    root: &Path,
    patterns: &[String],
    exclude: Option<&Path>,
) -> Result<Located, GenError> {
    let mut located = Located::default();

    if patterns.is_empty() {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if SKIPPED_DIRS.contains(&name.as_ref()) {
                    return false;
                }
                exclude.is_none_or(|ex| e.path() != ex)
            });
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && entry.file_name() == MODULE_FILE => {
                    located.files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => located.errors.push(GenError::Descriptor {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    message: e.to_string(),
                }),
            }
        }
        return Ok(located);
    }

    for pattern in patterns {
        let full = format!(
            "{}/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            pattern.trim_start_matches('/')
        );
        let entries = glob::glob_with(&full, paths::GLOB_OPTIONS).map_err(|e| GenError::Config {
            path: root.join(config::PROJECT_FILE),
            message: format!("invalid module pattern '{}': {}", pattern, e),
        })?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() && !located.files.contains(&path) => {
                    located.files.push(path);
                }
                Ok(_) => {}
                Err(e) => located.errors.push(GenError::Descriptor {
                    path: e.path().to_path_buf(),
                    message: e.error().to_string(),
                }),
            }
        }
    }
    Ok(located)
}

/// Parses every descriptor in `files`, collecting per-file errors instead of
/// stopping at the first one.
pub fn load_declarations(files: &[PathBuf]) -> Discovery {
    let mut discovery = Discovery::default();
    for file in files {
        let base = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        match config::load_module_descriptor(file) {
            Ok(desc) => discovery
                .declarations
                .push(ModuleDeclaration::from_descriptor(desc, base, file.clone())),
            Err(e) => discovery.errors.push(e),
        }
    }
    discovery
}

pub fn discover(root: &Path, patterns: &[String], exclude: Option<&Path>) -> Result<Discovery, GenError> {
    let located = find_descriptors(root, patterns, exclude)?;
    let mut discovery = load_declarations(&located.files);
    discovery.errors.splice(0..0, located.errors);
    Ok(discovery)
}
