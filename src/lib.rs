//! # projgen - qmake project generator
//!
//! projgen scans a source tree for `module.toml` descriptors, collects the
//! sources, headers, assets and forms each module selects, and writes a
//! qmake `.pro` file plus a Qt `.qrc` resource manifest referencing them
//! relative to the output directory.
//!
//! ## Quick Start
//!
//! ```bash
//! # projgen.toml at the repository root, module.toml next to the sources
//! projgen generate            # writes build/<name>/<name>.pro and .qrc
//! projgen generate --in-place # writes <name>.pro and .qrc in the root
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Project and module descriptors (`projgen.toml`, `module.toml`)
//! - [`discover`] - Locating and parsing module descriptors
//! - [`module`] - Resolving selection rules into file lists
//! - [`project`] - The module collection and output-relative paths
//! - [`generate`] - Output layouts and the qmake/qrc emitters
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Descriptor parsing (`projgen.toml`, `module.toml`).
pub mod config;

/// Module descriptor discovery.
pub mod discover;

/// Error kinds.
pub mod error;

/// Project emission: layouts, pipeline and emitters.
pub mod generate;

/// Module aggregation.
pub mod module;

/// Lexical relative-path computation.
pub mod paths;

/// Project assembly.
pub mod project;

/// Terminal UI utilities (tables, diagnostics).
pub mod ui;

pub use config::Platform;
pub use error::GenError;
pub use module::{Category, Module, ModuleDeclaration};
pub use project::{Project, ResolvedProject};
