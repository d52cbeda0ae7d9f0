//! `projgen generate`: aggregate modules and write the `.qrc`/`.pro` pair.

use anyhow::{Result, bail};
use colored::*;
use std::time::Instant;

use super::{LayoutArgs, ProjectArgs, Session};
use crate::generate::{self, Emitter, QmakeEmitter, QrcEmitter};
use crate::ui;

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
    /// Fail when any module descriptor is broken
    #[arg(long)]
    pub strict: bool,
    /// Report every kept and dropped module
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let start = Instant::now();
    let session = Session::load(&args.project, &args.layout)?;
    let name = &session.config.project.name;

    println!(
        "{} Generating {} for {}...",
        "⚙️".cyan(),
        name.bold(),
        session.platform.to_string().cyan()
    );

    let mut assembly =
        generate::assemble(&session.root, &session.config, session.platform, &session.layout)?;

    for err in &assembly.errors {
        ui::warn(err);
    }
    if args.verbose {
        for m in assembly.project.modules() {
            println!(
                "   {} {} ({} files)",
                "+".green(),
                m.name,
                m.file_count()
            );
        }
        for dropped in &assembly.dropped {
            println!("   {} {} (no sources, headers or assets)", "-".dimmed(), dropped);
        }
    }

    let qrc = QrcEmitter::new(session.config.resources.clone());
    let pro = QmakeEmitter::new(session.config.qmake.clone());
    let emitters: [&dyn Emitter; 2] = [&qrc, &pro];

    if args.dry_run {
        let rendered = generate::render_all(&mut assembly.project, &session.layout, &emitters)?;
        for file in rendered {
            println!("{} {}", "==>".dimmed(), file.path.display());
            print!("{}", file.contents);
        }
    } else {
        let written = generate::build_project(&mut assembly.project, &session.layout, &emitters)?;
        for path in written {
            println!("   {} Wrote {}", "+".green(), session.display_path(&path));
        }
    }

    println!(
        "{} {} modules kept, {} dropped, {} failed in {:.2?}",
        if assembly.errors.is_empty() {
            "✓".green()
        } else {
            "!".yellow()
        },
        assembly.project.modules().len(),
        assembly.dropped.len(),
        assembly.errors.len(),
        start.elapsed()
    );

    if args.strict && !assembly.errors.is_empty() {
        bail!(
            "{} module descriptor(s) failed (--strict)",
            assembly.errors.len()
        );
    }
    Ok(())
}
