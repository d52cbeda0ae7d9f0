//! `projgen resolve`: print the resolved project as JSON.

use anyhow::{Context, Result};

use super::{LayoutArgs, ProjectArgs, Session};
use crate::generate;
use crate::ui;

pub fn run(args: &ProjectArgs, layout: &LayoutArgs) -> Result<()> {
    let session = Session::load(args, layout)?;
    let mut assembly =
        generate::assemble(&session.root, &session.config, session.platform, &session.layout)?;

    // Diagnostics go to stderr so stdout stays valid JSON.
    for err in &assembly.errors {
        ui::warn(err);
    }

    generate::apply_layout(&mut assembly.project, &session.layout);
    let resolved = assembly.project.resolve();
    let json = serde_json::to_string_pretty(&resolved).context("Failed to serialize project")?;
    println!("{}", json);
    Ok(())
}
