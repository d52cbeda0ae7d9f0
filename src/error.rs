//! Error kinds raised while loading descriptors and generating projects.
//!
//! Module-level errors (`Descriptor`, `Pattern`, `DuplicateModule`) are
//! recoverable: the offending module is skipped and the run continues.
//! Everything else aborts generation.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("invalid module descriptor {}: {message}", path.display())]
    Descriptor { path: PathBuf, message: String },

    #[error("module '{module}' ({}): invalid pattern '{pattern}': {source}", origin.display())]
    Pattern {
        module: String,
        origin: PathBuf,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(
        "duplicate module name '{name}' in {} (already declared by {})",
        duplicate.display(),
        existing.display()
    )]
    DuplicateModule {
        name: String,
        existing: PathBuf,
        duplicate: PathBuf,
    },

    #[error("invalid project descriptor {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "resource alias '{alias}' is used by both {} and {}",
        first.display(),
        second.display()
    )]
    AliasCollision {
        alias: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// True for errors scoped to a single module, which never abort a run.
    pub fn is_module_scoped(&self) -> bool {
        matches!(
            self,
            GenError::Descriptor { .. } | GenError::Pattern { .. } | GenError::DuplicateModule { .. }
        )
    }
}
