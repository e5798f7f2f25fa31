//! Region-aware redlining of a fragment pair.
//!
//! Each region of the new fragment is diffed against the region with the same
//! key in the old fragment and its content is replaced by the rendered diff.
//! The replacement is spliced into the new fragment's text; nothing outside
//! region content is touched.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::{DiffConfig, RedlineConfig, RemovedRegionPolicy};
use crate::diff::{DiffOperation, EditType};
use crate::engine::DiffEngine;
use crate::error::RegionError;
use crate::html::escape_html;
use crate::region::RegionExtractor;

/// Redlines fragments region by region.
#[derive(Debug)]
pub struct RegionRedliner {
    extractor: RegionExtractor,
    engine: DiffEngine,
    config: RedlineConfig,
}

impl RegionRedliner {
    pub fn new(config: RedlineConfig, diff: DiffConfig) -> Self {
        Self {
            extractor: RegionExtractor::new(config.marker.clone()),
            engine: DiffEngine::new(diff),
            config,
        }
    }

    /// Replace the diff engine, e.g. to use another tokenizer
    pub fn with_engine(mut self, engine: DiffEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &RedlineConfig {
        &self.config
    }

    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    /// Redline `new` against `old`.
    ///
    /// Returns `new` unchanged when either fragment's regions cannot be
    /// parsed.
    pub fn redline_fragment(&self, old: &str, new: &str) -> String {
        self.try_redline_fragment(old, new).unwrap_or_else(|error| {
            warn!(%error, "redline skipped, fragment returned unchanged");
            new.to_string()
        })
    }

    /// Redline `new` against `old`, reporting fragments that cannot be parsed.
    pub fn try_redline_fragment(&self, old: &str, new: &str) -> Result<String, RegionError> {
        if old == new {
            return Ok(new.to_string());
        }

        let old_regions = self.extractor.locate_regions(old)?;
        let new_regions = self.extractor.locate_regions(new)?;

        let old_text: HashMap<&str, &str> = old_regions
            .iter()
            .map(|region| (region.key.as_str(), region.text.as_str()))
            .collect();

        let mut output = String::with_capacity(new.len() + new.len() / 4);
        let mut cursor = 0;

        for region in &new_regions {
            output.push_str(&new[cursor..region.inner.start]);

            let previous = old_text.get(region.key.as_str()).copied().unwrap_or("");
            let operations = self.engine.operations(previous, &region.text);

            let content = &new[region.inner.start..region.inner.end];
            if operations.iter().any(DiffOperation::is_change) {
                let count = |kind: EditType| {
                    operations.iter().filter(|op| op.edit_type == kind).count()
                };
                debug!(
                    key = %region.key,
                    insertions = count(EditType::Insert),
                    deletions = count(EditType::Delete),
                    "region redlined"
                );

                // Region text is trimmed; keep the content's own outer whitespace.
                let body = content.trim();
                let leading = content.len() - content.trim_start().len();
                output.push_str(&content[..leading]);
                output.push_str(&self.render_operations(&operations));
                output.push_str(&content[leading + body.len()..]);
            } else {
                output.push_str(content);
            }

            cursor = region.inner.end;
        }
        output.push_str(&new[cursor..]);

        if self.config.removed_regions == RemovedRegionPolicy::AppendDeleted {
            for region in &old_regions {
                if new_regions.iter().any(|kept| kept.key == region.key) {
                    continue;
                }
                debug!(key = %region.key, "region removed");
                output.push_str("<p>");
                output.push_str(&self.config.deleted.wrap(&escape_html(&region.text)));
                output.push_str("</p>");
            }
        }

        Ok(output)
    }

    /// Markup for an operation sequence: Equal text as-is, Insert and Delete
    /// text inside the configured markers. All text is escaped.
    pub fn render_operations(&self, operations: &[DiffOperation]) -> String {
        let mut markup = String::new();

        for op in operations {
            let text = escape_html(&op.text);
            match op.edit_type {
                EditType::Equal => markup.push_str(&text),
                EditType::Insert => markup.push_str(&self.config.inserted.wrap(&text)),
                EditType::Delete => markup.push_str(&self.config.deleted.wrap(&text)),
            }
        }

        markup
    }
}

impl Default for RegionRedliner {
    fn default() -> Self {
        Self::new(RedlineConfig::default(), DiffConfig::default())
    }
}
