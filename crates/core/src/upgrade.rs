//! Reviewing a plan's move to the latest template version.
//!
//! The review pairs a quick per-component comparison of plain text with the
//! full region-aware redline of the document. Recording that a plan adopted
//! the new version is left to the host.

use tracing::debug;

use crate::assembler::{AssemblyRequest, DocumentAssembler};
use crate::config::RenderMode;
use crate::diff::DiffStatistics;
use crate::html::strip_tags;
use crate::plan::Plan;
use crate::substitute::TokenSubstitutor;

/// Plain-text redline of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRedline {
    pub component: String,
    pub markup: String,
    pub statistics: DiffStatistics,
}

impl SectionRedline {
    pub fn has_changes(&self) -> bool {
        self.statistics.insertions + self.statistics.deletions > 0
    }
}

/// What changes between a plan's version and the latest one.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeReview {
    pub from_version: String,
    pub from_label: String,
    pub to_version: String,
    pub to_label: String,
    /// One entry per selected component, in selection order
    pub sections: Vec<SectionRedline>,
    /// The whole document at the latest version, redlined, for preview
    pub document: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeStatus {
    /// The plan already uses the latest version
    Current { version: String },
    Available(UpgradeReview),
}

/// Builds upgrade reviews against a library's latest version.
#[derive(Debug, Clone)]
pub struct UpgradeReviewer {
    assembler: DocumentAssembler,
}

impl UpgradeReviewer {
    pub fn new(assembler: DocumentAssembler) -> Self {
        Self { assembler }
    }

    pub fn review(&self, plan: &Plan) -> UpgradeStatus {
        let library = self.assembler.library();
        let current = self.assembler.resolve_version(plan.version.as_deref());
        let latest = library.latest_version();

        if current.id == latest.id {
            return UpgradeStatus::Current {
                version: current.id.clone(),
            };
        }

        let tokens = plan.tokens();
        let substitutor = TokenSubstitutor::new();
        let redliner = self.assembler.redliner();

        let sections = plan
            .components
            .iter()
            .map(|name| {
                let name = name.trim();
                let old = strip_tags(current.component(name).unwrap_or(""));
                let new = strip_tags(latest.component(name).unwrap_or(""));
                let result = redliner.engine().diff(&old, &new);
                let markup = redliner.render_operations(&result.operations);

                SectionRedline {
                    component: name.to_string(),
                    markup: substitutor.substitute(&markup, &tokens),
                    statistics: result.statistics,
                }
            })
            .collect::<Vec<_>>();

        let document = self.assembler.render(
            &AssemblyRequest::new(plan.components.iter().cloned())
                .with_version(latest.id.clone())
                .compare_to(current.id.clone())
                .with_mode(RenderMode::Preview)
                .with_tokens(tokens),
        );

        debug!(
            from = %current.id,
            to = %latest.id,
            changed_sections = sections.iter().filter(|s| s.has_changes()).count(),
            "upgrade review built"
        );

        UpgradeStatus::Available(UpgradeReview {
            from_version: current.id.clone(),
            from_label: current.label.clone(),
            to_version: latest.id.clone(),
            to_label: latest.label.clone(),
            sections,
            document,
        })
    }
}
