//! Locating tagged regions in fragment markup.
//!
//! A region is an element carrying the configured key attribute (and the
//! configured class, when one is set). Tags are matched with a stack the way
//! an HTML tree builder would, so a region's end tag is the one that actually
//! closes it, even with other inline markup inside. Only the outermost region
//! counts when containers nest.

use std::collections::{BTreeMap, BTreeSet};

use regex::{Captures, Regex};
use tracing::warn;

use crate::config::RegionMarker;
use crate::error::RegionError;
use crate::html::strip_tags;
use crate::span::CharSpan;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A region found in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpan {
    pub key: String,
    /// From the start tag through the end tag
    pub outer: CharSpan,
    /// The container's content, excluding its tags
    pub inner: CharSpan,
    /// Content with tags stripped, references decoded and ends trimmed
    pub text: String,
}

#[derive(Debug)]
struct OpenElement {
    name: String,
    region: Option<PendingRegion>,
}

#[derive(Debug)]
struct PendingRegion {
    key: String,
    outer_start: usize,
    inner_start: usize,
}

/// Finds tagged regions and their text.
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    marker: RegionMarker,
    tag_pattern: Regex,
    attribute_pattern: Regex,
}

impl RegionExtractor {
    pub fn new(marker: RegionMarker) -> Self {
        // Comments first so tags inside them are skipped whole. Quoted
        // attribute values may contain '>'.
        let tag_pattern = Regex::new(
            r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#,
        )
        .expect("Invalid tag regex");

        let attribute_pattern = Regex::new(
            r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .expect("Invalid attribute regex");

        Self {
            marker,
            tag_pattern,
            attribute_pattern,
        }
    }

    pub fn marker(&self) -> &RegionMarker {
        &self.marker
    }

    /// Locate every outermost region in document order.
    ///
    /// Fails when a region container is left open, is closed implicitly by an
    /// enclosing end tag, or shares its key with an earlier region. Stray end
    /// tags and unclosed non-region elements are tolerated.
    pub fn locate_regions(&self, fragment: &str) -> Result<Vec<RegionSpan>, RegionError> {
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut regions = Vec::new();
        let mut seen_keys = BTreeSet::new();

        for caps in self.tag_pattern.captures_iter(fragment) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
                // comment
                continue;
            };
            let name = name.as_str().to_ascii_lowercase();
            let attributes = caps.get(3).map_or("", |m| m.as_str());

            if !is_end_tag(&caps) {
                if VOID_ELEMENTS.contains(&name.as_str()) || attributes.trim_end().ends_with('/') {
                    continue;
                }

                let inside_region = stack.iter().any(|open| open.region.is_some());
                let region = match self.region_key(attributes) {
                    Some(key) if !inside_region => {
                        if !seen_keys.insert(key.clone()) {
                            return Err(RegionError::DuplicateKey { key });
                        }
                        Some(PendingRegion {
                            key,
                            outer_start: whole.start(),
                            inner_start: whole.end(),
                        })
                    }
                    _ => None,
                };

                stack.push(OpenElement { name, region });
                continue;
            }

            let Some(position) = stack.iter().rposition(|open| open.name == name) else {
                continue;
            };

            // Anything above the matching element is closed implicitly.
            let mut closed = stack.split_off(position);
            if let Some(implicit) = closed[1..].iter().find_map(|open| open.region.as_ref()) {
                return Err(RegionError::UnclosedRegion {
                    key: implicit.key.clone(),
                });
            }

            if let Some(pending) = closed.swap_remove(0).region {
                let inner = CharSpan::new(pending.inner_start, whole.start());
                let text = inner
                    .slice(fragment)
                    .map(|markup| strip_tags(markup).trim().to_string())
                    .unwrap_or_default();

                regions.push(RegionSpan {
                    key: pending.key,
                    outer: CharSpan::new(pending.outer_start, whole.end()),
                    inner,
                    text,
                });
            }
        }

        if let Some(open) = stack.iter().find_map(|open| open.region.as_ref()) {
            return Err(RegionError::UnclosedRegion {
                key: open.key.clone(),
            });
        }

        Ok(regions)
    }

    /// Region key to text, or the reason the fragment could not be read.
    pub fn try_extract_regions(
        &self,
        fragment: &str,
    ) -> Result<BTreeMap<String, String>, RegionError> {
        Ok(self
            .locate_regions(fragment)?
            .into_iter()
            .map(|region| (region.key, region.text))
            .collect())
    }

    /// Region key to text.
    ///
    /// Malformed fragments yield an empty map: the fragment is then treated
    /// as having no regions rather than failing the caller.
    pub fn extract_regions(&self, fragment: &str) -> BTreeMap<String, String> {
        self.try_extract_regions(fragment).unwrap_or_else(|error| {
            warn!(%error, "fragment regions could not be parsed");
            BTreeMap::new()
        })
    }

    fn region_key(&self, attributes: &str) -> Option<String> {
        let mut key = None;
        let mut has_class = self.marker.class.is_none();

        for caps in self.attribute_pattern.captures_iter(attributes) {
            let Some(name) = caps.get(1) else { continue };
            let value = (2..=4)
                .find_map(|group| caps.get(group))
                .map_or("", |m| m.as_str());

            if name.as_str().eq_ignore_ascii_case(&self.marker.key_attribute) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    key = Some(trimmed.to_string());
                }
            } else if name.as_str().eq_ignore_ascii_case("class") {
                if let Some(required) = &self.marker.class {
                    has_class = value.split_whitespace().any(|class| class == required);
                }
            }
        }

        key.filter(|_| has_class)
    }
}

fn is_end_tag(caps: &Captures<'_>) -> bool {
    caps.get(1).is_some_and(|slash| !slash.as_str().is_empty())
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self::new(RegionMarker::default())
    }
}
