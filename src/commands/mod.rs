//! CLI command handlers
//!
//! Each subcommand of `projgen` lives in its own module; [`Session`] holds what
//! they all need: the project root, its descriptor, the target platform and
//! the output layout.

pub mod check;
pub mod clean;
pub mod generate;
pub mod list;
pub mod resolve;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, Platform, ProjectConfig};
use crate::generate::OutputLayout;
use crate::paths;

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root to scan [default: current directory]
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Path to the project descriptor [default: <root>/projgen.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Target platform (windows, macos, linux) [default: from projgen.toml, else host]
    #[arg(long)]
    pub platform: Option<Platform>,
}

/// Overrides for where generated files are written.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Generate next to the sources instead of <out-dir>/<name>
    #[arg(long, conflicts_with = "out_dir")]
    pub in_place: bool,
    /// Parent directory of the generated project, relative to the root
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

pub struct Session {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub platform: Platform,
    pub layout: OutputLayout,
}

impl Session {
    pub fn load(args: &ProjectArgs, layout: &LayoutArgs) -> Result<Self> {
        let root = match &args.root {
            Some(r) => r.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        if !root.is_dir() {
            anyhow::bail!("Project root {} is not a directory", root.display());
        }
        let root = paths::normalize(
            &std::path::absolute(&root)
                .with_context(|| format!("Failed to resolve {}", root.display()))?,
        );

        let config_path = args
            .config
            .clone()
            .unwrap_or_else(|| root.join(config::PROJECT_FILE));
        let mut config = config::load_project_config(&config_path)?;

        if layout.in_place {
            config.project.in_place = true;
        }
        if let Some(out) = &layout.out_dir {
            config.project.in_place = false;
            config.project.out_dir = out.to_string_lossy().to_string();
        }

        let platform = args
            .platform
            .or(config.project.platform)
            .unwrap_or_else(Platform::host);
        let layout = OutputLayout::from_config(&root, &config);

        Ok(Self {
            root,
            config,
            platform,
            layout,
        })
    }

    pub fn project_dir(&self) -> PathBuf {
        paths::normalize(&self.layout.project_dir(&self.root, &self.config.project.name))
    }

    /// `path` relative to the root, for display.
    pub fn display_path(&self, path: &Path) -> String {
        paths::to_slash(&paths::relative_dir(&self.root, path))
    }
}
