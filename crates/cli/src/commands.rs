use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use plandoc_core::{
    AssemblyConfig, AssemblyRequest, DiffConfig, DiffEngine, DocumentAssembler, Plan,
    RegionRedliner, RenderMode, TemplateLibrary, UpgradeReviewer, UpgradeStatus,
};
use tracing::info;

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Plan file (TOML)
    plan: PathBuf,

    /// Assemble this version instead of the plan's recorded one
    #[arg(long)]
    target: Option<String>,

    /// Redline against this older version
    #[arg(long)]
    compare_to: Option<String>,

    /// Style for on-screen review instead of print
    #[arg(long)]
    preview: bool,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    old: String,
    new: String,

    /// Treat OLD and NEW as file paths
    #[arg(short, long)]
    files: bool,

    /// Skip semantic cleanup
    #[arg(long)]
    minimal: bool,

    /// Print redline markup instead of the operation list
    #[arg(long)]
    html: bool,
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Plan file (TOML)
    plan: PathBuf,

    /// Write the full redlined document here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_library(path: Option<&Path>) -> Result<Arc<TemplateLibrary>> {
    let library = match path {
        Some(path) => TemplateLibrary::load(path)
            .with_context(|| format!("loading template library {}", path.display()))?,
        None => TemplateLibrary::builtin().context("loading built-in template library")?,
    };
    Ok(Arc::new(library))
}

fn load_config(path: Option<&Path>) -> Result<AssemblyConfig> {
    match path {
        Some(path) => AssemblyConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(AssemblyConfig::default()),
    }
}

/// Load a plan, filling `copyright_year` with the current year if unset.
fn load_plan(path: &Path) -> Result<Plan> {
    let mut plan = Plan::load(path).with_context(|| format!("loading plan {}", path.display()))?;
    plan.tokens
        .entry("copyright_year".to_string())
        .or_insert_with(|| chrono::Local::now().year().to_string());
    Ok(plan)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = content.len(), "document written");
        }
        None => println!("{content}"),
    }
    Ok(())
}

pub fn versions(library: Option<&Path>) -> Result<()> {
    let library = load_library(library)?;
    let default_id = &library.default_version().id;

    for version in library.versions() {
        let mut marks = Vec::new();
        if library.is_latest(&version.id) {
            marks.push("latest");
        }
        if &version.id == default_id {
            marks.push("default");
        }

        let suffix = if marks.is_empty() {
            String::new()
        } else {
            format!(" ({})", marks.join(", "))
        };
        println!(
            "{}\t{}\t{} components{}",
            version.id,
            version.label,
            version.components.len(),
            suffix
        );
    }
    Ok(())
}

pub fn assemble(library: Option<&Path>, config: Option<&Path>, args: AssembleArgs) -> Result<()> {
    let assembler = DocumentAssembler::new(load_library(library)?, load_config(config)?);
    let plan = load_plan(&args.plan)?;

    let mut request = AssemblyRequest::for_plan(&plan).with_mode(if args.preview {
        RenderMode::Preview
    } else {
        RenderMode::Print
    });
    if let Some(version) = args.target {
        request = request.with_version(version);
    }
    if let Some(old) = args.compare_to {
        request = request.compare_to(old);
    }

    let html = assembler.render(&request);
    write_output(args.output.as_deref(), &html)
}

pub fn diff(config: Option<&Path>, args: DiffArgs) -> Result<()> {
    let (old, new) = if args.files {
        (
            std::fs::read_to_string(&args.old).with_context(|| format!("reading {}", args.old))?,
            std::fs::read_to_string(&args.new).with_context(|| format!("reading {}", args.new))?,
        )
    } else {
        (args.old, args.new)
    };

    let config = load_config(config)?;
    let diff_config = if args.minimal {
        DiffConfig::minimal()
    } else {
        config.diff.clone()
    };

    if args.html {
        let redliner = RegionRedliner::new(config.redline, diff_config);
        let ops = redliner.engine().operations(&old, &new);
        println!("{}", redliner.render_operations(&ops));
    } else {
        print!("{}", DiffEngine::new(diff_config).diff(&old, &new));
    }
    Ok(())
}

pub fn upgrade(library: Option<&Path>, config: Option<&Path>, args: UpgradeArgs) -> Result<()> {
    let assembler = DocumentAssembler::new(load_library(library)?, load_config(config)?);
    let plan = load_plan(&args.plan)?;

    let review = match UpgradeReviewer::new(assembler).review(&plan) {
        UpgradeStatus::Current { version } => {
            println!("Plan already uses the latest template version ({version}).");
            return Ok(());
        }
        UpgradeStatus::Available(review) => review,
    };

    println!(
        "Upgrade available: {} ({}) -> {} ({})",
        review.from_label, review.from_version, review.to_label, review.to_version
    );
    for section in &review.sections {
        println!();
        println!("## {}", section.component);
        if section.has_changes() {
            println!("{}", section.markup);
        } else {
            println!("(no changes)");
        }
    }

    match args.output {
        Some(path) => write_output(Some(&path), &review.document),
        None => Ok(()),
    }
}
