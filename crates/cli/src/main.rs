//! Plandoc CLI
//!
//! A thin layer over `plandoc-core` for previewing assembled documents and
//! redlines from the command line.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::{AssembleArgs, DiffArgs, UpgradeArgs};

#[derive(Parser, Debug)]
#[command(name = "plandoc")]
#[command(
    author,
    version,
    about = "Versioned plan documents with word-level redlines",
    long_about = None
)]
struct Cli {
    /// Template library (TOML or JSON); the built-in sample library if omitted
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    /// Assembly configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List template versions in creation order
    Versions,

    /// Assemble a plan into HTML
    Assemble(AssembleArgs),

    /// Word diff two texts
    Diff(DiffArgs),

    /// Review the move from a plan's version to the latest one
    Upgrade(UpgradeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Versions => commands::versions(cli.library.as_deref()),
        Command::Assemble(args) => {
            commands::assemble(cli.library.as_deref(), cli.config.as_deref(), args)
        }
        Command::Diff(args) => commands::diff(cli.config.as_deref(), args),
        Command::Upgrade(args) => {
            commands::upgrade(cli.library.as_deref(), cli.config.as_deref(), args)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
