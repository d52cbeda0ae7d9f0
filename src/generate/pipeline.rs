use super::Emitter;
use crate::config::{Platform, ProjectConfig};
use crate::discover;
use crate::error::GenError;
use crate::module::resolve_declaration;
use crate::paths;
use crate::project::{Project, ProjectSettings};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// Next to the sources, in the project root.
    InPlace,
    /// In `<parent>/<project name>`.
    Nested { parent: PathBuf },
}

impl OutputLayout {
    pub fn from_config(root: &Path, config: &ProjectConfig) -> Self {
        if config.project.in_place {
            OutputLayout::InPlace
        } else {
            OutputLayout::Nested {
                parent: paths::normalize(&root.join(&config.project.out_dir)),
            }
        }
    }

    pub fn project_dir(&self, root: &Path, name: &str) -> PathBuf {
        match self {
            OutputLayout::InPlace => root.to_path_buf(),
            OutputLayout::Nested { parent } => parent.join(name),
        }
    }

    /// Subtree never scanned for module descriptors.
    fn excluded_dir(&self) -> Option<&Path> {
        match self {
            OutputLayout::InPlace => None,
            OutputLayout::Nested { parent } => Some(parent),
        }
    }
}

/// Outcome of discovery plus aggregation.
#[derive(Debug)]
pub struct Assembly {
    pub project: Project,
    /// Names of modules dropped for having no sources, headers or assets.
    pub dropped: Vec<String>,
    /// Per-module failures; the rest of the project is still usable.
    pub errors: Vec<GenError>,
}

/// Discovers module descriptors under `root` and aggregates them into a
/// project. Module resolution runs in parallel; results are merged in
/// discovery order so the outcome does not depend on scheduling.
pub fn assemble(
    root: &Path,
    config: &ProjectConfig,
    platform: Platform,
    layout: &OutputLayout,
) -> Result<Assembly, GenError> {
    let root = paths::normalize(root);
    let mut project = Project::new(&root, ProjectSettings::from_config(config, platform));
    for dir in &config.project.include_dirs {
        project.add_header_dir(root.join(dir));
    }

    let discovery = discover::discover(&root, &config.project.modules, layout.excluded_dir())?;
    let mut errors = discovery.errors;

    let resolved: Vec<_> = discovery
        .declarations
        .par_iter()
        .map(|decl| resolve_declaration(decl, platform))
        .collect();

    let mut dropped = Vec::new();
    for result in resolved {
        match result {
            Ok(module) => {
                let name = module.name.clone();
                match project.finalize_module(module) {
                    Ok(true) => {}
                    Ok(false) => dropped.push(name),
                    Err(e) => errors.push(e),
                }
            }
            Err(e) => errors.push(e),
        }
    }

    Ok(Assembly {
        project,
        dropped,
        errors,
    })
}

/// A rendered file not yet written to disk.
#[derive(Debug, Clone)]
pub struct Generated {
    pub path: PathBuf,
    pub contents: String,
}

/// Points the project's output directory at where `layout` puts it.
pub fn apply_layout(project: &mut Project, layout: &OutputLayout) {
    project.out_dir = paths::normalize(&layout.project_dir(&project.root_dir, &project.settings.name));
}

/// Fixes the project's output directory for `layout` and renders every
/// emitter against it, in emitter order.
pub fn render_all(
    project: &mut Project,
    layout: &OutputLayout,
    emitters: &[&dyn Emitter],
) -> Result<Vec<Generated>, GenError> {
    apply_layout(project, layout);
    let resolved = project.resolve();

    emitters
        .iter()
        .map(|emitter| {
            Ok(Generated {
                path: project.out_dir.join(emitter.file_name(&resolved)),
                contents: emitter.render(&resolved)?,
            })
        })
        .collect()
}

/// Creates the output directory and writes every emitter's file into it.
///
/// Everything is rendered before anything is written, so a failing emitter
/// (e.g. an alias collision) leaves the output directory untouched.
pub fn build_project(
    project: &mut Project,
    layout: &OutputLayout,
    emitters: &[&dyn Emitter],
) -> Result<Vec<PathBuf>, GenError> {
    let generated = render_all(project, layout, emitters)?;

    fs::create_dir_all(&project.out_dir).map_err(|source| GenError::OutputDirectory {
        path: project.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(generated.len());
    for file in generated {
        fs::write(&file.path, &file.contents).map_err(|source| GenError::Io {
            path: file.path.clone(),
            source,
        })?;
        written.push(file.path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{QmakeEmitter, QrcEmitter};

    #[test]
    fn test_layout_project_dir() {
        let root = Path::new("/proj");
        assert_eq!(OutputLayout::InPlace.project_dir(root, "App"), PathBuf::from("/proj"));
        let nested = OutputLayout::Nested {
            parent: PathBuf::from("/proj/build"),
        };
        assert_eq!(nested.project_dir(root, "App"), PathBuf::from("/proj/build/App"));
    }

    #[test]
    fn test_layout_from_config() {
        let mut config: ProjectConfig = toml::from_str("[project]\nname = \"App\"\n").unwrap();
        assert_eq!(
            OutputLayout::from_config(Path::new("/proj"), &config),
            OutputLayout::Nested {
                parent: PathBuf::from("/proj/build")
            }
        );
        config.project.in_place = true;
        assert_eq!(OutputLayout::from_config(Path::new("/proj"), &config), OutputLayout::InPlace);
    }

    #[test]
    fn test_build_project_writes_qrc_then_pro() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("core")).unwrap();
        fs::write(root.join("core/a.cpp"), "").unwrap();
        fs::write(root.join("core/module.toml"), "sources = [\"*.cpp\"]\n").unwrap();

        let config: ProjectConfig = toml::from_str("[project]\nname = \"App\"\n").unwrap();
        let layout = OutputLayout::from_config(root, &config);
        let mut assembly = assemble(root, &config, Platform::Linux, &layout).unwrap();

        let qrc = QrcEmitter::new(config.resources.clone());
        let pro = QmakeEmitter::new(config.qmake.clone());
        let written = build_project(&mut assembly.project, &layout, &[&qrc, &pro]).unwrap();

        let out_dir = paths::normalize(&root.join("build/App"));
        assert_eq!(written, vec![out_dir.join("App.qrc"), out_dir.join("App.pro")]);
        let pro_text = fs::read_to_string(out_dir.join("App.pro")).unwrap();
        assert!(pro_text.contains("SOURCES += \"../../core/a.cpp\""));
    }

    #[test]
    fn test_alias_collision_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for m in ["a", "b"] {
            fs::create_dir_all(root.join(m)).unwrap();
            fs::write(root.join(m).join("icon.png"), "").unwrap();
            fs::write(root.join(m).join("module.toml"), "assets = [\"*.png\"]\n").unwrap();
        }

        let config: ProjectConfig = toml::from_str("[project]\nname = \"App\"\n").unwrap();
        let layout = OutputLayout::from_config(root, &config);
        let mut assembly = assemble(root, &config, Platform::Linux, &layout).unwrap();

        let qrc = QrcEmitter::new(config.resources.clone());
        let err = build_project(&mut assembly.project, &layout, &[&qrc]).unwrap_err();
        assert!(matches!(err, GenError::AliasCollision { .. }));
        assert!(!root.join("build").exists());
    }

    #[test]
    fn test_shared_asset_through_parent_dir_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("shared/res")).unwrap();
        fs::write(root.join("shared/res/logo.png"), "").unwrap();
        for m in ["a", "b"] {
            fs::create_dir_all(root.join(m)).unwrap();
            fs::write(
                root.join(m).join("module.toml"),
                "assets = [\"../shared/res/*.png\"]\n",
            )
            .unwrap();
        }

        let config: ProjectConfig = toml::from_str("[project]\nname = \"App\"\n").unwrap();
        let layout = OutputLayout::from_config(root, &config);
        let mut assembly = assemble(root, &config, Platform::Linux, &layout).unwrap();
        assert!(assembly.errors.is_empty());
        assert_eq!(
            assembly.project.modules()[0].assets,
            vec![paths::normalize(&root.join("shared/res/logo.png"))]
        );

        let qrc = QrcEmitter::new(config.resources.clone());
        build_project(&mut assembly.project, &layout, &[&qrc]).unwrap();
        let qrc_text = fs::read_to_string(paths::normalize(&root.join("build/App/App.qrc"))).unwrap();
        assert_eq!(qrc_text.matches("<file ").count(), 1);
        assert!(qrc_text.contains("<file alias=\"logo.png\">../../shared/res/logo.png</file>"));
    }
}
