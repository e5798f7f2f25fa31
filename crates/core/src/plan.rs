//! The per-call plan selection supplied by the host.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::html::escape_html;
use crate::substitute::TokenMap;

/// A plan as the host records it: demographics, selected components in
/// document order and the template version it was built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub company_name: String,
    pub effective_date: String,

    #[serde(default)]
    pub components: Vec<String>,

    /// Recorded template version, if any
    #[serde(default)]
    pub version: Option<String>,

    /// Additional placeholder values
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl Plan {
    pub fn new(company_name: impl Into<String>, effective_date: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            effective_date: effective_date.into(),
            components: Vec::new(),
            version: None,
            tokens: BTreeMap::new(),
        }
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(name.into(), value.into());
        self
    }

    /// Placeholder values for this plan, HTML-escaped.
    ///
    /// `company_name` and `effective_date` take precedence over entries of
    /// the same name in `tokens`.
    pub fn tokens(&self) -> TokenMap {
        let mut map: TokenMap = self
            .tokens
            .iter()
            .map(|(name, value)| (name.clone(), escape_html(value)))
            .collect();
        map.insert("company_name", escape_html(&self.company_name));
        map.insert("effective_date", escape_html(&self.effective_date));
        map
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a plan from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_escaped() {
        let plan = Plan::new("Kinney Law & Compliance", "January 1, 2026")
            .with_token("plan_year", "2026 <calendar>");

        let tokens = plan.tokens();
        assert_eq!(tokens.get("company_name"), Some("Kinney Law &amp; Compliance"));
        assert_eq!(tokens.get("effective_date"), Some("January 1, 2026"));
        assert_eq!(tokens.get("plan_year"), Some("2026 &lt;calendar&gt;"));
    }

    #[test]
    fn test_demographics_override_extra_tokens() {
        let plan = Plan::new("Acme", "2026-01-01").with_token("company_name", "Other");
        assert_eq!(plan.tokens().get("company_name"), Some("Acme"));
    }

    #[test]
    fn test_plan_from_toml() {
        let plan = Plan::from_toml_str(
            r#"
            company_name = "Acme Widgets"
            effective_date = "January 1, 2026"
            components = ["Pre-Tax Premiums", "Dependent Care Account"]
            version = "v1"

            [tokens]
            copyright_year = "2026"
            "#,
        )
        .unwrap();

        assert_eq!(plan.components.len(), 2);
        assert_eq!(plan.version.as_deref(), Some("v1"));
        assert_eq!(plan.tokens().get("copyright_year"), Some("2026"));
    }

    #[test]
    fn test_plan_requires_demographics() {
        assert!(Plan::from_toml_str("components = []").is_err());
    }

    #[test]
    fn test_load_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, "company_name = \"Acme\"\neffective_date = \"2026\"\n").unwrap();

        let plan = Plan::load(&path).unwrap();
        assert!(plan.components.is_empty());
        assert_eq!(plan.version, None);

        assert!(matches!(
            Plan::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
