//! # projgen CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the handlers in
//! [`projgen::commands`]. Running `projgen` without a subcommand generates the
//! project with the settings from `projgen.toml`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use projgen::commands::{self, LayoutArgs, ProjectArgs, generate::GenerateArgs};

#[derive(Parser)]
#[command(name = "projgen")]
#[command(about = "Generate qmake projects from module descriptors", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate modules and write the .pro and .qrc files
    Generate(GenerateArgs),
    /// Show the modules that make it into the project
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the resolved project (absolute and output-relative paths) as JSON
    Resolve {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Validate every module descriptor without writing anything
    Check {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Remove the generated .pro and .qrc files
    Clean {
        #[command(flatten)]
        project: ProjectArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => commands::generate::run(&GenerateArgs::default()),
        Some(Commands::Generate(args)) => commands::generate::run(args),
        Some(Commands::List { project }) => commands::list::run(project),
        Some(Commands::Resolve { project, layout }) => commands::resolve::run(project, layout),
        Some(Commands::Check { project }) => commands::check::run(project),
        Some(Commands::Clean { project, layout }) => commands::clean::run(project, layout),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
