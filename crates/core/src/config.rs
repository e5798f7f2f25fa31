//! Configuration for the diff engine, the redliner and the assembler
//!
//! Every section has a `Default` and deserializes from TOML with missing
//! fields filled from that default, so a config file only needs to name what
//! it changes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for diff computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Fold short equalities between edits into the edits
    pub semantic_cleanup: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            semantic_cleanup: true,
        }
    }

    /// Raw minimal edit script, no cleanup
    pub fn minimal() -> Self {
        Self {
            semantic_cleanup: false,
        }
    }

    /// Enable or disable semantic cleanup
    pub fn with_semantic_cleanup(mut self, enable: bool) -> Self {
        self.semantic_cleanup = enable;
        self
    }
}

/// How tagged regions are recognized in fragment markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionMarker {
    /// Attribute carrying the region key
    pub key_attribute: String,

    /// Class the container must carry, if any
    pub class: Option<String>,
}

impl Default for RegionMarker {
    fn default() -> Self {
        Self {
            key_attribute: "data-key".to_string(),
            class: None,
        }
    }
}

impl RegionMarker {
    pub fn with_key_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.key_attribute = attribute.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Inline element used to mark inserted or deleted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupTag {
    pub tag: String,
    pub class: String,
}

impl MarkupTag {
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
        }
    }

    pub fn inserted() -> Self {
        Self::new("ins", "redline-ins")
    }

    pub fn deleted() -> Self {
        Self::new("del", "redline-del")
    }

    /// Wrap already-escaped markup in this element
    pub fn wrap(&self, inner: &str) -> String {
        format!(
            "<{tag} class=\"{class}\">{inner}</{tag}>",
            tag = self.tag,
            class = self.class,
        )
    }
}

/// What to do with regions that exist in the old fragment only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovedRegionPolicy {
    /// Leave them out of the redline
    #[default]
    Omit,
    /// Append each as a deleted block after the fragment
    AppendDeleted,
}

/// Configuration for region-aware redlining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedlineConfig {
    pub marker: RegionMarker,
    pub inserted: MarkupTag,
    pub deleted: MarkupTag,
    pub removed_regions: RemovedRegionPolicy,
}

impl Default for RedlineConfig {
    fn default() -> Self {
        Self {
            marker: RegionMarker::default(),
            inserted: MarkupTag::inserted(),
            deleted: MarkupTag::deleted(),
            removed_regions: RemovedRegionPolicy::default(),
        }
    }
}

impl RedlineConfig {
    pub fn with_marker(mut self, marker: RegionMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_removed_regions(mut self, policy: RemovedRegionPolicy) -> Self {
        self.removed_regions = policy;
        self
    }
}

/// Target surface for an assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Styling for the PDF renderer
    #[default]
    Print,
    /// Paper-like frame for on-screen review
    Preview,
}

/// Literal lines of the cover page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    pub company_line: String,
    pub heading: String,
    pub connector: String,
    pub trailer: String,
    pub date_line: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            company_line: "{{company_name|upper}}".to_string(),
            heading: "CAFETERIA PLAN WITH".to_string(),
            connector: "AND".to_string(),
            trailer: "COMPONENTS".to_string(),
            date_line: "As Amended and Restated {{effective_date}}".to_string(),
        }
    }
}

/// Closing block of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Print the "Template Version" line
    pub show_version: bool,
    /// Optional notice, may contain placeholders
    pub notice: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            show_version: true,
            notice: None,
        }
    }
}

/// Configuration for document assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Version used when a requested version id is unknown
    pub default_version: Option<String>,

    /// Cover-page title for each component name
    pub titles: BTreeMap<String, String>,

    pub cover: CoverConfig,
    pub footer: FooterConfig,

    /// Emit the `<style>` block ahead of the document
    pub include_stylesheet: bool,

    pub diff: DiffConfig,
    pub redline: RedlineConfig,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            default_version: None,
            titles: default_titles(),
            cover: CoverConfig::default(),
            footer: FooterConfig::default(),
            include_stylesheet: true,
            diff: DiffConfig::default(),
            redline: RedlineConfig::default(),
        }
    }
}

fn default_titles() -> BTreeMap<String, String> {
    [
        ("Pre-Tax Premiums", "PREMIUM PAYMENT ARRANGEMENT"),
        ("Health Savings Account (HSA)", "HEALTH SAVINGS ACCOUNT"),
        (
            "Health Flexible Spending Account (Health FSA)",
            "HEALTH FLEXIBLE SPENDING ARRANGEMENT",
        ),
        ("Dependent Care Account", "DEPENDENT CARE ASSISTANCE PLAN"),
    ]
    .into_iter()
    .map(|(name, title)| (name.to_string(), title.to_string()))
    .collect()
}

impl AssemblyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = Some(version.into());
        self
    }

    pub fn with_title(mut self, component: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(component.into(), title.into());
        self
    }

    pub fn with_cover(mut self, cover: CoverConfig) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_footer(mut self, footer: FooterConfig) -> Self {
        self.footer = footer;
        self
    }

    pub fn with_stylesheet(mut self, include: bool) -> Self {
        self.include_stylesheet = include;
        self
    }

    pub fn with_diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }

    pub fn with_redline(mut self, redline: RedlineConfig) -> Self {
        self.redline = redline;
        self
    }
}
