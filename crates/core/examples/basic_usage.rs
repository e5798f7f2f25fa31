//! Basic usage of plandoc-core with the built-in template library

use std::sync::Arc;

use plandoc_core::{
    diff_words, AssemblyConfig, DocumentAssembler, Plan, RegionRedliner, TemplateLibrary,
    UpgradeReviewer, UpgradeStatus,
};

const LINE: &str = "----------------------------------------";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Plandoc Examples ===\n");

    example_word_diff();

    let library = Arc::new(TemplateLibrary::builtin()?);
    example_region_redline(&library)?;
    example_upgrade_review(library);

    Ok(())
}

fn example_word_diff() {
    println!("Example 1: Word Diff");
    println!("{}", LINE);

    let original = "Contributions are made on a pre-tax basis. Participation is voluntary.";
    let modified = "Contributions are made on a pre-tax basis.";

    for (i, op) in diff_words(original, modified).iter().enumerate() {
        println!("  {}. {}", i + 1, op.description());
    }
    println!("\n");
}

fn example_region_redline(library: &TemplateLibrary) -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 2: Region Redline");
    println!("{}", LINE);

    let component = "Pre-Tax Premiums";
    let old = library.get_version("v1")?.component(component).unwrap_or("");
    let new = library.get_version("v2")?.component(component).unwrap_or("");

    println!("{}", RegionRedliner::default().redline_fragment(old, new));
    println!("\n");
    Ok(())
}

fn example_upgrade_review(library: Arc<TemplateLibrary>) {
    println!("Example 3: Upgrade Review");
    println!("{}", LINE);

    let plan = Plan::new("Acme Widgets", "January 1, 2026")
        .with_components(["Pre-Tax Premiums", "Health Savings Account (HSA)"])
        .with_version("v1");

    let reviewer = UpgradeReviewer::new(DocumentAssembler::new(library, AssemblyConfig::default()));
    match reviewer.review(&plan) {
        UpgradeStatus::Current { version } => println!("Already on {}", version),
        UpgradeStatus::Available(review) => {
            println!("{} -> {}", review.from_label, review.to_label);
            for section in &review.sections {
                println!("\n[{}] {}", section.component, section.markup);
            }
        }
    }
}
