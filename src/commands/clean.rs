//! `projgen clean`: remove previously generated project files.
//!
//! Only the `.pro`/`.qrc` pair named after the project is removed. A nested
//! output directory is removed as well once it is empty; the root never is.

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::{LayoutArgs, ProjectArgs, Session};
use crate::generate::OutputLayout;

pub fn run(args: &ProjectArgs, layout: &LayoutArgs) -> Result<()> {
    let session = Session::load(args, layout)?;
    let dir = session.project_dir();
    let name = &session.config.project.name;
    let mut cleaned = false;

    for ext in ["qrc", "pro"] {
        let path = dir.join(format!("{}.{}", name, ext));
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            println!("{} Removed {}", "🗑️".red(), session.display_path(&path));
            cleaned = true;
        }
    }

    if matches!(session.layout, OutputLayout::Nested { .. })
        && dir.is_dir()
        && fs::read_dir(&dir)?.next().is_none()
    {
        fs::remove_dir(&dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    }

    if cleaned {
        println!("{} Clean complete.", "✓".green());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
