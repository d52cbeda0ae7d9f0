use crate::error::GenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// File name of the project descriptor looked up at the scan root.
pub const PROJECT_FILE: &str = "projgen.toml";

/// File name of the per-directory module descriptor.
pub const MODULE_FILE: &str = "module.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectConfig {
    pub project: ProjectSection,
    #[serde(default)]
    pub defines: Defines,
    #[serde(default)]
    pub qmake: QmakeConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectSection {
    pub name: String,
    pub product_name: Option<String>,
    pub platform: Option<Platform>,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default)]
    pub in_place: bool,
    /// Glob patterns (relative to the root) locating module descriptors.
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
}

impl ProjectSection {
    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Defines {
    #[serde(default)]
    pub all: Vec<String>,
    #[serde(default)]
    pub debug: Vec<String>,
    #[serde(default)]
    pub release: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QmakeConfig {
    #[serde(default = "default_qt_modules")]
    pub qt: Vec<String>,
    #[serde(default = "default_qmake_config")]
    pub config: Vec<String>,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default, rename = "scope")]
    pub scopes: Vec<QmakeScope>,
}

impl Default for QmakeConfig {
    fn default() -> Self {
        Self {
            qt: default_qt_modules(),
            config: default_qmake_config(),
            template: default_template(),
            scopes: Vec::new(),
        }
    }
}

/// Platform-conditional block in the generated `.pro` (e.g. `win32 { ... }`).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct QmakeScope {
    pub condition: String,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub defines: Vec<String>,
    #[serde(default)]
    pub lib_dirs: Vec<String>,
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default)]
    pub cxxflags: Vec<String>,
    pub rc_file: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResourceConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub alias: AliasStrategy,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            alias: AliasStrategy::default(),
        }
    }
}

/// How a resource entry's alias is derived from the asset path.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AliasStrategy {
    /// The asset's file name. Two assets with the same name collide.
    #[default]
    Basename,
    /// The asset's path relative to the project root.
    Relative,
}

fn default_out_dir() -> String {
    "build".to_string()
}

fn default_qt_modules() -> Vec<String> {
    ["core", "gui", "widgets", "xml"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_qmake_config() -> Vec<String> {
    vec!["c++11".to_string()]
}

fn default_template() -> String {
    "app".to_string()
}

fn default_prefix() -> String {
    "/".to_string()
}

/// Target platform a project is generated for.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else {
            Platform::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" | "win32" | "win64" => Ok(Platform::Windows),
            "macos" | "mac" | "macx" | "osx" | "darwin" => Ok(Platform::Macos),
            "linux" => Ok(Platform::Linux),
            other => Err(format!(
                "unknown platform '{}' (expected windows, macos or linux)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform or a set of platforms a descriptor block is restricted to.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PlatformGuard {
    One(Platform),
    Any(Vec<Platform>),
}

impl PlatformGuard {
    pub fn admits(&self, active: Platform) -> bool {
        match self {
            PlatformGuard::One(p) => *p == active,
            PlatformGuard::Any(set) => set.contains(&active),
        }
    }
}

/// Contents of a `module.toml`.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    pub name: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub forms: Vec<String>,
    pub settings: Option<toml::Table>,
    #[serde(default, rename = "platform")]
    pub platform_blocks: Vec<PlatformBlock>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PlatformBlock {
    pub on: PlatformGuard,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub forms: Vec<String>,
}

pub fn load_project_config(path: &Path) -> Result<ProjectConfig, GenError> {
    if !path.exists() {
        return Err(GenError::Config {
            path: path.to_path_buf(),
            message: format!(
                "file not found. Create a {} at the project root or pass --config",
                PROJECT_FILE
            ),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| GenError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| GenError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_module_descriptor(path: &Path) -> Result<ModuleDescriptor, GenError> {
    let text = fs::read_to_string(path).map_err(|e| GenError::Descriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| GenError::Descriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_aliases() {
        assert_eq!("Windows".parse::<Platform>(), Ok(Platform::Windows));
        assert_eq!("win32".parse::<Platform>(), Ok(Platform::Windows));
        assert_eq!("MACX".parse::<Platform>(), Ok(Platform::Macos));
        assert_eq!("linux".parse::<Platform>(), Ok(Platform::Linux));
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_guard_admits() {
        let one = PlatformGuard::One(Platform::Macos);
        assert!(!one.admits(Platform::Windows));
        assert!(one.admits(Platform::Macos));

        let set = PlatformGuard::Any(vec![Platform::Windows, Platform::Linux]);
        assert!(set.admits(Platform::Windows));
        assert!(!set.admits(Platform::Macos));
    }

    #[test]
    fn test_parse_project_config_defaults() {
        let cfg: ProjectConfig = toml::from_str(
            r#"
[project]
name = "Reflow"
"#,
        )
        .unwrap();
        assert_eq!(cfg.project.out_dir, "build");
        assert_eq!(cfg.project.product_name(), "Reflow");
        assert!(!cfg.project.in_place);
        assert_eq!(cfg.qmake.qt, vec!["core", "gui", "widgets", "xml"]);
        assert_eq!(cfg.qmake.template, "app");
        assert_eq!(cfg.resources.prefix, "/");
        assert_eq!(cfg.resources.alias, AliasStrategy::Basename);
    }

    #[test]
    fn test_parse_project_config_full() {
        let cfg: ProjectConfig = toml::from_str(
            r#"
[project]
name = "Reflow"
product_name = "ReflowApp"
platform = "Win32"
modules = ["sources/**/module.toml"]

[defines]
all = ["REFLOW_QT"]
debug = ["DEBUG"]
release = ["NDEBUG"]

[[qmake.scope]]
condition = "win32"
libs = ["ole32.lib"]
rc_file = "Reflow.rc"

[resources]
alias = "relative"
"#,
        )
        .unwrap();
        assert_eq!(cfg.project.platform, Some(Platform::Windows));
        assert_eq!(cfg.project.product_name(), "ReflowApp");
        assert_eq!(cfg.defines.release, vec!["NDEBUG"]);
        assert_eq!(cfg.qmake.scopes.len(), 1);
        assert_eq!(cfg.qmake.scopes[0].rc_file.as_deref(), Some("Reflow.rc"));
        assert_eq!(cfg.resources.alias, AliasStrategy::Relative);
    }

    #[test]
    fn test_parse_module_descriptor_with_platform_blocks() {
        let desc: ModuleDescriptor = toml::from_str(
            r#"
name = "audio"
sources = ["*.cpp"]
headers = ["*.h"]

[settings]
cflags = "-O2"

[[platform]]
on = "windows"
sources = ["win/*.cpp"]

[[platform]]
on = ["macos", "linux"]
sources = ["unix/*.cpp"]
"#,
        )
        .unwrap();
        assert_eq!(desc.name.as_deref(), Some("audio"));
        assert_eq!(desc.platform_blocks.len(), 2);
        assert_eq!(desc.platform_blocks[0].on, PlatformGuard::One(Platform::Windows));
        assert_eq!(
            desc.platform_blocks[1].on,
            PlatformGuard::Any(vec![Platform::Macos, Platform::Linux])
        );
        assert!(desc.settings.is_some());
    }

    #[test]
    fn test_module_descriptor_rejects_unknown_keys() {
        let res: Result<ModuleDescriptor, _> = toml::from_str("sauces = [\"*.cpp\"]\n");
        assert!(res.is_err());
    }
}
