//! Qt resource manifest (`.qrc`).

use super::Emitter;
use crate::config::{AliasStrategy, ResourceConfig};
use crate::error::GenError;
use crate::paths;
use crate::project::ResolvedProject;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub alias: String,
    /// Path relative to the output directory.
    pub path: String,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceManifest {
    pub prefix: String,
    pub entries: Vec<ResourceEntry>,
}

impl ResourceManifest {
    /// Collects every module asset in project order.
    ///
    /// An asset listed by more than one module appears once. Two different
    /// files mapping to the same alias are an error.
    pub fn collect(project: &ResolvedProject, config: &ResourceConfig) -> Result<Self, GenError> {
        let mut owners: HashMap<String, PathBuf> = HashMap::new();
        let mut entries = Vec::new();

        for module in &project.modules {
            for asset in &module.assets {
                let alias = alias_for(&asset.absolute, &project.root_dir, config.alias);
                match owners.get(&alias) {
                    Some(first) if *first == asset.absolute => continue,
                    Some(first) => {
                        return Err(GenError::AliasCollision {
                            alias,
                            first: first.clone(),
                            second: asset.absolute.clone(),
                        });
                    }
                    None => {}
                }
                owners.insert(alias.clone(), asset.absolute.clone());
                entries.push(ResourceEntry {
                    alias,
                    path: asset.relative.clone(),
                });
            }
        }

        Ok(Self {
            prefix: config.prefix.clone(),
            entries,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<RCC>\n");
        let _ = writeln!(out, "  <qresource prefix=\"{}\">", xml_escape(&self.prefix));
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "    <file alias=\"{}\">{}</file>",
                xml_escape(&entry.alias),
                xml_escape(&entry.path)
            );
        }
        out.push_str("  </qresource>\n");
        out.push_str("</RCC>\n");
        out
    }
}

fn alias_for(asset: &Path, root: &Path, strategy: AliasStrategy) -> String {
    match strategy {
        AliasStrategy::Basename => asset
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        AliasStrategy::Relative => paths::relative_file(root, asset),
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub struct QrcEmitter {
    config: ResourceConfig,
}

impl QrcEmitter {
    pub fn new(config: ResourceConfig) -> Self {
        Self { config }
    }
}

impl Emitter for QrcEmitter {
    fn file_name(&self, project: &ResolvedProject) -> String {
        format!("{}.qrc", project.name)
    }

    fn render(&self, project: &ResolvedProject) -> Result<String, GenError> {
        Ok(ResourceManifest::collect(project, &self.config)?.render())
    }
}
