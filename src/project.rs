//! Project assembly: the module collection, global settings, and the
//! output-relative view handed to emitters.

use crate::config::{Defines, Platform, ProjectConfig};
use crate::error::GenError;
use crate::module::{Category, Module};
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Global settings fixed once the project descriptor is loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSettings {
    pub name: String,
    pub product_name: String,
    pub platform: Platform,
    pub defines: Defines,
}

impl ProjectSettings {
    pub fn from_config(config: &ProjectConfig, platform: Platform) -> Self {
        Self {
            name: config.project.name.clone(),
            product_name: config.project.product_name().to_string(),
            platform,
            defines: config.defines.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub root_dir: PathBuf,
    /// Directory the generated project file lives in.
    pub out_dir: PathBuf,
    pub settings: ProjectSettings,
    header_dirs: Vec<PathBuf>,
    modules: Vec<Module>,
}

impl Project {
    /// Starts an in-place project: `out_dir` equals `root_dir` until an output
    /// layout is applied.
    pub fn new(root_dir: impl Into<PathBuf>, settings: ProjectSettings) -> Self {
        let root_dir = paths::normalize(&root_dir.into());
        Self {
            out_dir: root_dir.clone(),
            root_dir,
            settings,
            header_dirs: Vec::new(),
            modules: Vec::new(),
        }
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn header_dirs(&self) -> &[PathBuf] {
        &self.header_dirs
    }

    /// Appends an include directory unless it is already listed.
    pub fn add_header_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = paths::normalize(&dir.into());
        if !self.header_dirs.contains(&dir) {
            self.header_dirs.push(dir);
        }
    }

    /// Appends `module`, refusing a name that is already taken.
    pub fn add_module(&mut self, module: Module) -> Result<(), GenError> {
        if let Some(existing) = self.find_module_by_name(&module.name) {
            return Err(GenError::DuplicateModule {
                name: module.name.clone(),
                existing: existing.origin.clone(),
                duplicate: module.origin.clone(),
            });
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn find_module_by_name(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.find_module_by_name(name).is_some()
    }

    /// Admits a resolved module into the project.
    ///
    /// Returns `Ok(false)` when the module has no sources, headers or assets
    /// and is dropped. A kept module that contributed headers registers its
    /// base directory as an include directory.
    pub fn finalize_module(&mut self, module: Module) -> Result<bool, GenError> {
        if !module.qualifies() {
            return Ok(false);
        }
        let header_dir = (!module.headers.is_empty()).then(|| module.base_path.clone());
        self.add_module(module)?;
        if let Some(dir) = header_dir {
            self.add_header_dir(dir);
        }
        Ok(true)
    }

    /// Path of `file` relative to the output directory, `/`-separated.
    pub fn path_relative_to_output(&self, file: &Path) -> String {
        paths::relative_file(&self.out_dir, file)
    }

    /// Path of a directory relative to the output directory.
    pub fn dir_relative_to_output(&self, dir: &Path) -> String {
        paths::to_slash(&paths::relative_dir(&self.out_dir, dir))
    }

    /// Produces the emitter-facing view with every path resolved against the
    /// current output directory.
    pub fn resolve(&self) -> ResolvedProject {
        let modules = self
            .modules
            .iter()
            .map(|m| ResolvedModule {
                name: m.name.clone(),
                base_path: m.base_path.clone(),
                sources: self.resolve_files(m, Category::Sources),
                headers: self.resolve_files(m, Category::Headers),
                assets: self.resolve_files(m, Category::Assets),
                forms: self.resolve_files(m, Category::Forms),
                settings: m.settings.clone(),
            })
            .collect();

        ResolvedProject {
            name: self.settings.name.clone(),
            product_name: self.settings.product_name.clone(),
            platform: self.settings.platform,
            defines: self.settings.defines.clone(),
            root_dir: self.root_dir.clone(),
            out_dir: self.out_dir.clone(),
            include_dirs: self
                .header_dirs
                .iter()
                .map(|d| self.dir_relative_to_output(d))
                .collect(),
            modules,
        }
    }

    fn resolve_files(&self, module: &Module, category: Category) -> Vec<ResolvedFile> {
        module
            .files(category)
            .iter()
            .map(|abs| ResolvedFile {
                absolute: abs.clone(),
                relative: self.path_relative_to_output(abs),
            })
            .collect()
    }
}

/// Fully resolved project, stable in order and serializable.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProject {
    pub name: String,
    pub product_name: String,
    pub platform: Platform,
    pub defines: Defines,
    pub root_dir: PathBuf,
    pub out_dir: PathBuf,
    pub include_dirs: Vec<String>,
    pub modules: Vec<ResolvedModule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedModule {
    pub name: String,
    pub base_path: PathBuf,
    pub sources: Vec<ResolvedFile>,
    pub headers: Vec<ResolvedFile>,
    pub assets: Vec<ResolvedFile>,
    pub forms: Vec<ResolvedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<toml::Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub absolute: PathBuf,
    pub relative: String,
}
