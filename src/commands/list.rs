//! `projgen list`: show the modules that would make it into the project.

use anyhow::Result;
use colored::*;

use super::{LayoutArgs, ProjectArgs, Session};
use crate::generate;
use crate::ui::{self, ModuleTable};

pub fn run(args: &ProjectArgs) -> Result<()> {
    let session = Session::load(args, &LayoutArgs::default())?;
    let assembly =
        generate::assemble(&session.root, &session.config, session.platform, &session.layout)?;

    for err in &assembly.errors {
        ui::warn(err);
    }

    let table = ModuleTable::new(assembly.project.modules(), &session.root);
    if table.is_empty() {
        println!("{} No modules with sources, headers or assets found.", "!".yellow());
    } else {
        table.print();
    }

    if !assembly.dropped.is_empty() {
        println!(
            "{} Dropped (no sources, headers or assets): {}",
            "-".dimmed(),
            assembly.dropped.join(", ")
        );
    }
    Ok(())
}
