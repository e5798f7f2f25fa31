//! Document assembly.
//!
//! The assembler composes a document from the selected components of one
//! template version, optionally redlined against an older version:
//!
//! 1. Resolve the target version, falling back to the default version
//! 2. Build the cover block from the selected component titles
//! 3. Append each selected component's fragment, redlined when comparing
//! 4. Append the footer
//! 5. Substitute placeholders once over the whole document
//!
//! Assembly never fails. Unknown versions, missing components and fragments
//! that cannot be redlined all degrade to a best-effort document.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{AssemblyConfig, MarkupTag, RenderMode};
use crate::cover::build_cover;
use crate::html::escape_html;
use crate::plan::Plan;
use crate::redline::RegionRedliner;
use crate::substitute::{TokenMap, TokenSubstitutor};
use crate::template::{TemplateLibrary, TemplateVersion};

/// Everything one assembly call needs besides the library and configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyRequest {
    /// Component names in document order
    pub components: Vec<String>,
    /// Target version id; the default version when `None` or unknown
    pub version: Option<String>,
    /// Older version to redline against
    pub compare_to: Option<String>,
    pub mode: RenderMode,
    pub tokens: TokenMap,
}

impl AssemblyRequest {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Request for a recorded plan at its own version.
    pub fn for_plan(plan: &Plan) -> Self {
        Self {
            components: plan.components.clone(),
            version: plan.version.clone(),
            compare_to: None,
            mode: RenderMode::Print,
            tokens: plan.tokens(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn compare_to(mut self, version: impl Into<String>) -> Self {
        self.compare_to = Some(version.into());
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tokens(mut self, tokens: TokenMap) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Composes documents from a shared template library.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    library: Arc<TemplateLibrary>,
    config: AssemblyConfig,
    redliner: Arc<RegionRedliner>,
}

impl DocumentAssembler {
    pub fn new(library: Arc<TemplateLibrary>, config: AssemblyConfig) -> Self {
        let redliner = RegionRedliner::new(config.redline.clone(), config.diff.clone());
        Self {
            library,
            config,
            redliner: Arc::new(redliner),
        }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn redliner(&self) -> &RegionRedliner {
        &self.redliner
    }

    /// Assemble `components` from `version` for print, redlined against
    /// `compare_to` when given.
    pub fn assemble<S: AsRef<str>>(
        &self,
        components: &[S],
        version: &str,
        compare_to: Option<&str>,
        tokens: &TokenMap,
    ) -> String {
        let request = AssemblyRequest {
            components: components.iter().map(|c| c.as_ref().to_string()).collect(),
            version: Some(version.to_string()),
            compare_to: compare_to.map(str::to_string),
            mode: RenderMode::Print,
            tokens: tokens.clone(),
        };
        self.render(&request)
    }

    /// Assemble a plan at its recorded version.
    pub fn assemble_plan(&self, plan: &Plan, mode: RenderMode) -> String {
        self.render(&AssemblyRequest::for_plan(plan).with_mode(mode))
    }

    pub fn render(&self, request: &AssemblyRequest) -> String {
        let target = self.resolve_version(request.version.as_deref());
        let previous = request
            .compare_to
            .as_deref()
            .and_then(|id| match self.library.get_version(id) {
                Ok(version) => Some(version),
                Err(error) => {
                    warn!(%error, "comparison version unavailable, assembling without redline");
                    None
                }
            });

        let mut html = String::new();
        if self.config.include_stylesheet {
            html.push_str(&self.stylesheet(request.mode));
        }

        html.push_str("<div class=\"plan-document\">");
        html.push_str(&build_cover(
            &self.config.cover,
            &self.config.titles,
            &request.components,
        ));

        for name in &request.components {
            let name = name.trim();
            let Some(fragment) = target.component(name) else {
                debug!(component = name, version = %target.id, "component not in version, skipped");
                continue;
            };

            match previous {
                Some(old) => {
                    let old_fragment = old.component(name).unwrap_or("");
                    html.push_str(&self.redliner.redline_fragment(old_fragment, fragment));
                }
                None => html.push_str(fragment),
            }
        }

        html.push_str(&self.footer(target));
        html.push_str("</div>");

        debug!(
            version = %target.id,
            compare_to = previous.map(|v| v.id.as_str()),
            components = request.components.len(),
            "document assembled"
        );

        TokenSubstitutor::new().substitute(&html, &request.tokens)
    }

    /// The requested version, else the configured default, else the
    /// library's default.
    pub fn resolve_version(&self, requested: Option<&str>) -> &TemplateVersion {
        if let Some(id) = requested {
            match self.library.get_version(id) {
                Ok(version) => return version,
                Err(error) => warn!(%error, "falling back to default template version"),
            }
        }

        self.config
            .default_version
            .as_deref()
            .and_then(|id| self.library.get_version(id).ok())
            .unwrap_or_else(|| self.library.default_version())
    }

    fn footer(&self, version: &TemplateVersion) -> String {
        let footer = &self.config.footer;
        let mut html = String::from("<div class=\"footer-area\">");

        if footer.show_version {
            html.push_str("<p class=\"template-version\"><em>Template Version: ");
            html.push_str(&escape_html(&version.id));
            html.push_str("</em></p>");
        }
        if let Some(notice) = &footer.notice {
            html.push_str("<p>");
            html.push_str(notice);
            html.push_str("</p>");
        }

        html.push_str("</div>");
        html
    }

    fn stylesheet(&self, mode: RenderMode) -> String {
        let frame = match mode {
            RenderMode::Print => PRINT_FRAME,
            RenderMode::Preview => PREVIEW_FRAME,
        };

        let redline = &self.config.redline;
        format!(
            "<style>\n@page {{ margin: 72pt; }}\n{frame}{BASE_STYLE}{inserted} {{ color: #1a7f37; text-decoration: underline; }}\n{deleted} {{ color: #b42318; text-decoration: line-through; }}\n</style>\n",
            inserted = marker_selector(&redline.inserted),
            deleted = marker_selector(&redline.deleted),
        )
    }
}

fn marker_selector(tag: &MarkupTag) -> String {
    format!(".plan-document {}.{}", tag.tag, tag.class)
}

const PRINT_FRAME: &str = ".plan-document { background: none; box-shadow: none; padding: 0; margin: 0; max-width: none; }
";

const PREVIEW_FRAME: &str = ".plan-document { background: #fff; box-shadow: 0 0 12px 2px rgba(0,0,0,0.10); padding: 72pt; margin: 40px auto; max-width: 816px; min-height: 1056px; border-radius: 4px; }
";

const BASE_STYLE: &str = ".plan-document { font-family: \"Times New Roman\", Times, serif; font-size: 12pt; line-height: 1.5; color: #000; }
.plan-document h1, .plan-document h2, .plan-document h3 { font-weight: bold; text-align: center; margin-top: 24pt; margin-bottom: 12pt; }
.plan-document h3 { font-size: 14pt; }
.plan-document p { margin: 0 0 12pt 0; }
.plan-document .intro-page { page-break-after: always; margin-bottom: 120pt; text-align: center; }
.plan-document .intro-page div { margin-top: 12pt; }
.plan-document .cover-company, .plan-document .cover-date { font-weight: bold; }
.plan-document .template-version { text-align: right; font-size: 10pt; }
.plan-document .footer-area { margin-top: 40pt; text-align: center; font-size: 11pt; color: #333; }
";
