//! Versioned template library.
//!
//! A library is an append-only, ordered list of [`TemplateVersion`]s. Each
//! version maps component names to HTML fragments. Versions are never edited
//! once loaded, so assembling against the same version always sees the same
//! fragments.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LibraryError, LibraryResult};

const BUILTIN_LIBRARY: &str = include_str!("../data/library.toml");

/// A named snapshot of every component fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVersion {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

impl TemplateVersion {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.components.insert(name.into(), fragment.into());
        self
    }

    /// Fragment for a component, if this version has it
    pub fn component(&self, name: &str) -> Option<&str> {
        self.components.get(name).map(String::as_str)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}

/// On-disk library layout shared by the TOML and JSON loaders.
#[derive(Debug, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    default_version: Option<String>,
    versions: Vec<TemplateVersion>,
}

/// Ordered, immutable collection of template versions.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    // Never empty.
    versions: Vec<TemplateVersion>,
    index: HashMap<String, usize>,
    default_version: Option<usize>,
}

impl TemplateLibrary {
    /// Build a library from versions in creation order.
    pub fn new(versions: Vec<TemplateVersion>) -> LibraryResult<Self> {
        if versions.is_empty() {
            return Err(LibraryError::Empty);
        }

        let mut index = HashMap::with_capacity(versions.len());
        for (position, version) in versions.iter().enumerate() {
            if index.insert(version.id.clone(), position).is_some() {
                return Err(LibraryError::DuplicateVersion {
                    version: version.id.clone(),
                });
            }
        }

        Ok(Self {
            versions,
            index,
            default_version: None,
        })
    }

    /// Designate the version used when a requested id is unknown.
    pub fn with_default_version(mut self, id: &str) -> LibraryResult<Self> {
        let position = self.position(id)?;
        self.default_version = Some(position);
        Ok(self)
    }

    /// The built-in sample library.
    pub fn builtin() -> LibraryResult<Self> {
        Self::from_toml_str(BUILTIN_LIBRARY)
    }

    pub fn from_toml_str(input: &str) -> LibraryResult<Self> {
        let file: LibraryFile = toml::from_str(input).map_err(|e| LibraryError::Parse {
            format: "TOML",
            message: e.to_string(),
        })?;
        Self::from_file(file)
    }

    pub fn from_json_str(input: &str) -> LibraryResult<Self> {
        let file: LibraryFile = serde_json::from_str(input).map_err(|e| LibraryError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?;
        Self::from_file(file)
    }

    /// Load a library file; `.json` files are read as JSON, anything else as
    /// TOML.
    pub fn load(path: &Path) -> LibraryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let library = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        debug!(path = %path.display(), versions = library.len(), "template library loaded");
        Ok(library)
    }

    fn from_file(file: LibraryFile) -> LibraryResult<Self> {
        let library = Self::new(file.versions)?;
        match file.default_version {
            Some(id) => library.with_default_version(&id),
            None => Ok(library),
        }
    }

    fn position(&self, id: &str) -> LibraryResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LibraryError::NotFound {
                version: id.to_string(),
            })
    }

    pub fn get_version(&self, id: &str) -> LibraryResult<&TemplateVersion> {
        Ok(&self.versions[self.position(id)?])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Versions in creation order
    pub fn versions(&self) -> &[TemplateVersion] {
        &self.versions
    }

    /// The most recently created version
    pub fn latest_version(&self) -> &TemplateVersion {
        &self.versions[self.versions.len() - 1]
    }

    /// The designated default version, or the latest when none is designated
    pub fn default_version(&self) -> &TemplateVersion {
        match self.default_version {
            Some(position) => &self.versions[position],
            None => self.latest_version(),
        }
    }

    pub fn is_latest(&self, id: &str) -> bool {
        self.latest_version().id == id
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TemplateLibrary {
        TemplateLibrary::new(vec![
            TemplateVersion::new("v1", "Version 1").with_component("A", "<p>one</p>"),
            TemplateVersion::new("v2", "Version 2").with_component("A", "<p>two</p>"),
            TemplateVersion::new("v3", "Version 3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_versions_keep_creation_order() {
        let library = sample();
        let ids: Vec<&str> = library.versions().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
        assert_eq!(library.latest_version().id, "v3");
        assert!(library.is_latest("v3"));
    }

    #[test]
    fn test_get_version() {
        let library = sample();
        assert_eq!(library.get_version("v2").unwrap().component("A"), Some("<p>two</p>"));
        assert_eq!(library.get_version("v3").unwrap().component("A"), None);

        match library.get_version("v9") {
            Err(LibraryError::NotFound { version }) => assert_eq!(version, "v9"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_default_version() {
        let library = sample();
        assert_eq!(library.default_version().id, "v3");

        let library = library.with_default_version("v1").unwrap();
        assert_eq!(library.default_version().id, "v1");

        assert!(sample().with_default_version("v7").is_err());
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(matches!(TemplateLibrary::new(vec![]), Err(LibraryError::Empty)));
        assert!(matches!(
            TemplateLibrary::new(vec![
                TemplateVersion::new("v1", "a"),
                TemplateVersion::new("v1", "b"),
            ]),
            Err(LibraryError::DuplicateVersion { .. })
        ));
    }

    #[test]
    fn test_builtin_library() {
        let library = TemplateLibrary::builtin().unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.default_version().id, "v1");
        assert_eq!(library.latest_version().id, "v2");

        for version in library.versions() {
            assert_eq!(
                version.component_names().collect::<Vec<_>>(),
                vec![
                    "Dependent Care Account",
                    "Health Flexible Spending Account (Health FSA)",
                    "Health Savings Account (HSA)",
                    "Pre-Tax Premiums",
                ]
            );
        }
    }

    #[test]
    fn test_json_library() {
        let library = TemplateLibrary::from_json_str(
            r#"{
                "versions": [
                    {"id": "2025", "label": "2025 edition", "components": {"A": "<p>a</p>"}},
                    {"id": "2026", "label": "2026 edition"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(library.latest_version().label, "2026 edition");
        assert!(library.latest_version().components.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TemplateLibrary::from_toml_str("versions = 3"),
            Err(LibraryError::Parse { format: "TOML", .. })
        ));
        assert!(matches!(
            TemplateLibrary::from_json_str("{\"versions\": []}"),
            Err(LibraryError::Empty)
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("library.toml");
        std::fs::write(
            &toml_path,
            "default_version = \"a\"\n\n[[versions]]\nid = \"a\"\nlabel = \"A\"\n\n[[versions]]\nid = \"b\"\nlabel = \"B\"\n",
        )
        .unwrap();
        let library = TemplateLibrary::load(&toml_path).unwrap();
        assert_eq!(library.default_version().id, "a");
        assert_eq!(library.latest_version().id, "b");

        let json_path = dir.path().join("library.JSON");
        std::fs::write(&json_path, r#"{"versions": [{"id": "only", "label": "Only"}]}"#).unwrap();
        assert_eq!(TemplateLibrary::load(&json_path).unwrap().len(), 1);

        assert!(matches!(
            TemplateLibrary::load(&dir.path().join("absent.toml")),
            Err(LibraryError::Io { .. })
        ));
    }
}
