//! `projgen check`: validate every module descriptor without generating.

use anyhow::{Result, anyhow};
use colored::*;

use super::{LayoutArgs, ProjectArgs, Session};
use crate::generate::{self, ResourceManifest};
use crate::ui;

pub fn run(args: &ProjectArgs) -> Result<()> {
    println!("{} Checking module descriptors...", "🔍".cyan());
    let session = Session::load(args, &LayoutArgs::default())?;
    let mut assembly =
        generate::assemble(&session.root, &session.config, session.platform, &session.layout)?;

    let mut problems = assembly.errors.len();
    for err in &assembly.errors {
        ui::fail(err);
    }

    // Alias collisions only show up once every module is known.
    generate::apply_layout(&mut assembly.project, &session.layout);
    if let Err(e) = ResourceManifest::collect(&assembly.project.resolve(), &session.config.resources) {
        ui::fail(&e);
        problems += 1;
    }

    if problems > 0 {
        return Err(anyhow!("{} problem(s) found", problems));
    }

    println!(
        "{} {} modules OK ({} dropped)",
        "✓".green(),
        assembly.project.modules().len(),
        assembly.dropped.len()
    );
    Ok(())
}
