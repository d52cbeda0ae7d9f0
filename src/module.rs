//! Module aggregation.
//!
//! A [`ModuleDeclaration`] is what the descriptor loader hands over: a base
//! directory plus an ordered list of selection rules. [`resolve_declaration`]
//! expands those rules against the filesystem into a [`Module`] holding
//! absolute file paths per category.

use crate::config::{ModuleDescriptor, Platform, PlatformGuard};
use crate::config::MODULE_FILE;
use crate::error::GenError;
use crate::paths;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sources,
    Headers,
    Assets,
    Forms,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sources,
        Category::Headers,
        Category::Assets,
        Category::Forms,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Sources => "sources",
            Category::Headers => "headers",
            Category::Assets => "assets",
            Category::Forms => "forms",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionRule {
    Select { category: Category, pattern: String },
    Guarded {
        guard: PlatformGuard,
        rules: Vec<(Category, String)>,
    },
}

/// Already-parsed module descriptor, anchored at its directory.
#[derive(Debug, Clone)]
pub struct ModuleDeclaration {
    pub name: String,
    pub base_path: PathBuf,
    /// Descriptor file the declaration came from.
    pub origin: PathBuf,
    pub rules: Vec<SelectionRule>,
    pub settings: Option<toml::Table>,
}

impl ModuleDeclaration {
    /// Builds a declaration from a parsed `module.toml` living in `base_path`.
    ///
    /// Top-level category lists come first, then each `[[platform]]` block in
    /// file order.
    pub fn from_descriptor(desc: ModuleDescriptor, base_path: PathBuf, origin: PathBuf) -> Self {
        let name = desc
            .name
            .clone()
            .unwrap_or_else(|| base_path.to_string_lossy().to_string());

        let mut rules = Vec::new();
        for (category, patterns) in [
            (Category::Sources, &desc.sources),
            (Category::Headers, &desc.headers),
            (Category::Assets, &desc.assets),
            (Category::Forms, &desc.forms),
        ] {
            for pattern in patterns {
                rules.push(SelectionRule::Select {
                    category,
                    pattern: pattern.clone(),
                });
            }
        }

        for block in desc.platform_blocks {
            let mut guarded = Vec::new();
            for (category, patterns) in [
                (Category::Sources, block.sources),
                (Category::Headers, block.headers),
                (Category::Assets, block.assets),
                (Category::Forms, block.forms),
            ] {
                guarded.extend(patterns.into_iter().map(|p| (category, p)));
            }
            rules.push(SelectionRule::Guarded {
                guard: block.on,
                rules: guarded,
            });
        }

        Self {
            name,
            base_path,
            origin,
            rules,
            settings: desc.settings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub name: String,
    pub base_path: PathBuf,
    pub sources: Vec<PathBuf>,
    pub headers: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
    pub forms: Vec<PathBuf>,
    pub settings: Option<toml::Table>,
    /// Descriptor file, named in pattern and duplicate-name errors.
    #[serde(skip)]
    pub origin: PathBuf,
}

impl Module {
    pub fn new(name: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            name: name.into(),
            origin: base_path.join(MODULE_FILE),
            base_path,
            sources: Vec::new(),
            headers: Vec::new(),
            assets: Vec::new(),
            forms: Vec::new(),
            settings: None,
        }
    }

    pub fn files(&self, category: Category) -> &[PathBuf] {
        match category {
            Category::Sources => &self.sources,
            Category::Headers => &self.headers,
            Category::Assets => &self.assets,
            Category::Forms => &self.forms,
        }
    }

    fn files_mut(&mut self, category: Category) -> &mut Vec<PathBuf> {
        match category {
            Category::Sources => &mut self.sources,
            Category::Headers => &mut self.headers,
            Category::Assets => &mut self.assets,
            Category::Forms => &mut self.forms,
        }
    }

    /// Expands `pattern` under `base_path` and appends matching files to
    /// `category`, skipping paths the category already holds. Returns how many
    /// paths were added; zero matches is fine. Matches are normalized first, so
    /// `../core/a.cpp` and `a.cpp` from `core` count as the same file.
    pub fn resolve_category(&mut self, category: Category, pattern: &str) -> Result<usize, GenError> {
        let full = format!(
            "{}/{}",
            glob::Pattern::escape(&self.base_path.to_string_lossy()),
            pattern.trim_start_matches('/')
        );
        let entries = glob::glob_with(&full, paths::GLOB_OPTIONS).map_err(|source| GenError::Pattern {
            module: self.name.clone(),
            origin: self.origin.clone(),
            pattern: pattern.to_string(),
            source,
        })?;

        let mut added = 0;
        for entry in entries {
            // Unreadable directories are skipped, like a shell glob would.
            let Ok(path) = entry else { continue };
            if !path.is_file() {
                continue;
            }
            let path = paths::normalize(&path);
            let list = self.files_mut(category);
            if !list.contains(&path) {
                list.push(path);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Runs `block` only when `guard` admits the `active` platform. Returns
    /// whether the block ran.
    pub fn platform_guard<F>(&mut self, guard: &PlatformGuard, active: Platform, block: F) -> Result<bool, GenError>
    where
        F: FnOnce(&mut Module) -> Result<(), GenError>,
    {
        if !guard.admits(active) {
            return Ok(false);
        }
        block(self)?;
        Ok(true)
    }

    /// A module only makes it into the project if it has sources, headers or
    /// assets. Forms alone do not count.
    pub fn qualifies(&self) -> bool {
        !self.sources.is_empty() || !self.headers.is_empty() || !self.assets.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.sources.len() + self.headers.len() + self.assets.len() + self.forms.len()
    }
}

/// Resolves every selection rule of `decl` for the `active` platform.
pub fn resolve_declaration(decl: &ModuleDeclaration, active: Platform) -> Result<Module, GenError> {
    let mut module = Module::new(decl.name.clone(), decl.base_path.clone());
    module.settings = decl.settings.clone();
    module.origin = decl.origin.clone();

    for rule in &decl.rules {
        match rule {
            SelectionRule::Select { category, pattern } => {
                module.resolve_category(*category, pattern)?;
            }
            SelectionRule::Guarded { guard, rules } => {
                module.platform_guard(guard, active, |m| {
                    for (category, pattern) in rules {
                        m.resolve_category(*category, pattern)?;
                    }
                    Ok(())
                })?;
            }
        }
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn declaration(name: &str, base_path: &Path, rules: Vec<SelectionRule>) -> ModuleDeclaration {
        ModuleDeclaration {
            name: name.to_string(),
            base_path: base_path.to_path_buf(),
            origin: base_path.join(MODULE_FILE),
            rules,
            settings: None,
        }
    }

    fn select(category: Category, pattern: &str) -> SelectionRule {
        SelectionRule::Select {
            category,
            pattern: pattern.to_string(),
        }
    }

    #[test]
    fn test_resolve_category_matches_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        touch(&core.join("b.cpp"));
        touch(&core.join("a.cpp"));
        touch(&core.join("a.h"));

        let mut m = Module::new("core", &core);
        let added = m.resolve_category(Category::Sources, "*.cpp").unwrap();
        assert_eq!(added, 2);
        assert_eq!(m.sources, vec![core.join("a.cpp"), core.join("b.cpp")]);
        assert!(m.headers.is_empty());
    }

    #[test]
    fn test_resolve_category_no_match_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = Module::new("empty", dir.path());
        assert_eq!(m.resolve_category(Category::Assets, "*.png").unwrap(), 0);
        assert!(m.assets.is_empty());
    }

    #[test]
    fn test_resolve_category_overlapping_patterns_dedupe() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.cpp"));
        touch(&dir.path().join("b.cpp"));

        let mut m = Module::new("m", dir.path());
        m.resolve_category(Category::Sources, "a.cpp").unwrap();
        m.resolve_category(Category::Sources, "*.cpp").unwrap();
        assert_eq!(m.sources, vec![dir.path().join("a.cpp"), dir.path().join("b.cpp")]);
    }

    #[test]
    fn test_resolve_category_star_does_not_cross_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("top.cpp"));
        touch(&dir.path().join("sub/deep.cpp"));

        let mut shallow = Module::new("m", dir.path());
        shallow.resolve_category(Category::Sources, "*.cpp").unwrap();
        assert_eq!(shallow.sources, vec![dir.path().join("top.cpp")]);

        let mut deep = Module::new("m", dir.path());
        deep.resolve_category(Category::Sources, "**/*.cpp").unwrap();
        assert_eq!(deep.sources.len(), 2);
    }

    #[test]
    fn test_resolve_category_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = Module::new("broken", dir.path());
        let err = m.resolve_category(Category::Sources, "[*.cpp").unwrap_err();
        assert!(matches!(err, GenError::Pattern { .. }));
        assert!(err.to_string().contains("broken"));
        assert!(err.to_string().contains("module.toml"));
    }

    #[test]
    fn test_resolve_category_dedupes_through_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        touch(&core.join("a.cpp"));

        let mut m = Module::new("core", &core);
        assert_eq!(m.resolve_category(Category::Sources, "*.cpp").unwrap(), 1);
        assert_eq!(m.resolve_category(Category::Sources, "./a.cpp").unwrap(), 0);
        assert_eq!(m.resolve_category(Category::Sources, "../core/*.cpp").unwrap(), 0);
        assert_eq!(m.sources, vec![core.join("a.cpp")]);
    }

    #[test]
    fn test_resolve_category_normalizes_parent_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("shared/res/logo.png"));

        let mut m = Module::new("a", dir.path().join("a"));
        m.resolve_category(Category::Assets, "../shared/res/*.png").unwrap();
        assert_eq!(m.assets, vec![dir.path().join("shared/res/logo.png")]);
    }

    #[test]
    fn test_platform_guard_single_and_set() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("mac/a.mm"));
        touch(&dir.path().join("win/a.cpp"));

        let decl = declaration(
            "guarded",
            dir.path(),
            vec![
                SelectionRule::Guarded {
                    guard: PlatformGuard::One(Platform::Macos),
                    rules: vec![(Category::Sources, "mac/*.mm".to_string())],
                },
                SelectionRule::Guarded {
                    guard: PlatformGuard::Any(vec![Platform::Windows, Platform::Linux]),
                    rules: vec![(Category::Sources, "win/*.cpp".to_string())],
                },
            ],
        );

        let m = resolve_declaration(&decl, Platform::Windows).unwrap();
        assert_eq!(m.sources, vec![dir.path().join("win/a.cpp")]);

        let m = resolve_declaration(&decl, Platform::Macos).unwrap();
        assert_eq!(m.sources, vec![dir.path().join("mac/a.mm")]);
    }

    #[test]
    fn test_platform_guard_skips_block() {
        let mut m = Module::new("m", "/nowhere");
        let ran = m
            .platform_guard(&PlatformGuard::One(Platform::Linux), Platform::Windows, |_| {
                panic!("block must not run")
            })
            .unwrap();
        assert!(!ran);
    }

    #[test]
    fn test_forms_only_module_does_not_qualify() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("dialog.ui"));

        let decl = declaration("forms", dir.path(), vec![select(Category::Forms, "*.ui")]);
        let m = resolve_declaration(&decl, Platform::Linux).unwrap();
        assert_eq!(m.forms.len(), 1);
        assert!(!m.qualifies());
    }

    #[test]
    fn test_from_descriptor_defaults_name_to_directory() {
        let desc = ModuleDescriptor {
            sources: vec!["*.cpp".to_string()],
            ..Default::default()
        };
        let decl = ModuleDeclaration::from_descriptor(
            desc,
            PathBuf::from("/proj/core"),
            PathBuf::from("/proj/core/module.toml"),
        );
        assert_eq!(decl.name, PathBuf::from("/proj/core").to_string_lossy());
        assert_eq!(decl.rules, vec![select(Category::Sources, "*.cpp")]);
    }
}
