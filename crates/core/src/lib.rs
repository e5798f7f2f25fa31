//! # Plandoc Core
//!
//! Versioned document assembly with word-level redlines.
//!
//! ## Core Concepts
//!
//! - **TemplateLibrary**: append-only versions mapping component names to HTML fragments
//! - **RegionExtractor**: finds tagged regions (elements with a `data-key` attribute) in a fragment
//! - **DiffEngine**: word diff with whitespace-preserving tokens, Myers and semantic cleanup
//! - **RegionRedliner**: diffs matching regions of two fragments and splices the markup back in
//! - **TokenSubstitutor**: fills `{{placeholder}}`s in the finished document
//! - **DocumentAssembler**: cover, components, footer, then substitution
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use plandoc_core::{AssemblyConfig, DocumentAssembler, TemplateLibrary, TokenMap};
//!
//! let library = Arc::new(TemplateLibrary::builtin().unwrap());
//! let assembler = DocumentAssembler::new(library, AssemblyConfig::default());
//!
//! let tokens = TokenMap::new()
//!     .with("company_name", "Acme Widgets")
//!     .with("effective_date", "January 1, 2026");
//!
//! let redline = assembler.assemble(&["Pre-Tax Premiums"], "v2", Some("v1"), &tokens);
//! assert!(redline.contains("<ins class=\"redline-ins\">"));
//! ```

pub mod algorithm;
pub mod assembler;
pub mod cleanup;
pub mod config;
pub mod cover;
pub mod diff;
pub mod engine;
pub mod error;
pub mod html;
pub mod plan;
pub mod redline;
pub mod region;
pub mod span;
pub mod substitute;
pub mod template;
pub mod tokenizers;
pub mod upgrade;

// Re-export main types
pub use assembler::{AssemblyRequest, DocumentAssembler};
pub use config::{
    AssemblyConfig, CoverConfig, DiffConfig, FooterConfig, MarkupTag, RedlineConfig,
    RegionMarker, RemovedRegionPolicy, RenderMode,
};
pub use diff::{DiffOperation, DiffResult, DiffStatistics, EditType};
pub use engine::DiffEngine;
pub use error::{ConfigError, LibraryError, LibraryResult, RegionError};
pub use plan::Plan;
pub use redline::RegionRedliner;
pub use region::{RegionExtractor, RegionSpan};
pub use substitute::{TokenMap, TokenSubstitutor};
pub use template::{TemplateLibrary, TemplateVersion};
pub use upgrade::{SectionRedline, UpgradeReview, UpgradeReviewer, UpgradeStatus};

/// Word diff of two strings with the default configuration
///
/// # Example
///
/// ```rust
/// use plandoc_core::{diff_words, EditType};
///
/// let ops = diff_words("Hello world.", "Hello brave world.");
/// assert_eq!(ops[1].edit_type, EditType::Insert);
/// assert_eq!(ops[1].text, "brave ");
/// ```
pub fn diff_words(old: &str, new: &str) -> Vec<DiffOperation> {
    DiffEngine::default().operations(old, new)
}
