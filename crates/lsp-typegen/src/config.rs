//! Generation settings.
//!
//! Usually loaded from a TOML file:
//! ```toml
//! types = ["Hover", "Range"]
//! include_proposed = false
//! generate_client = false
//! target = "kotlin"
//!
//! [type_overrides]
//! LSPAny = "kotlinx.serialization.json.JsonElement"
//!
//! [options]
//! package = "org.example.lsp"
//! ```

use crate::error::Error;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Type names to generate. Empty means all.
    pub types: Vec<String>,
    /// Extend `types` with everything they reference.
    pub resolve_deps: bool,
    /// Keep definitions, properties and union variants marked proposed.
    pub include_proposed: bool,
    /// Lower methods the client handles.
    pub generate_client: bool,
    /// Lower methods the server handles.
    pub generate_server: bool,
    /// Registered renderer name.
    pub renderer: String,
    /// Target profile name.
    pub target: String,
    /// Output file name, for renderers that write a single file.
    pub output_file: Option<String>,
    /// Schema type name → target spelling.
    pub type_overrides: BTreeMap<String, String>,
    /// Renderer-specific settings.
    pub options: BTreeMap<String, String>,

    /// Where the schema came from.
    pub source: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub commit: Option<String>,
    pub protocol_version: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            resolve_deps: true,
            include_proposed: false,
            generate_client: true,
            generate_server: true,
            renderer: "json".to_string(),
            target: "go".to_string(),
            output_file: None,
            type_overrides: BTreeMap::new(),
            options: BTreeMap::new(),
            source: None,
            git_ref: None,
            commit: None,
            protocol_version: None,
        }
    }
}

impl GenerateConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Renderer option `key`, or `default` when unset.
    pub fn option<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options.get(key).map(String::as_str).unwrap_or(default)
    }

    /// The type filter, or `None` to generate everything.
    pub fn requested_types(&self) -> Option<BTreeSet<String>> {
        if self.types.is_empty() {
            None
        } else {
            Some(self.types.iter().cloned().collect())
        }
    }

    /// Provenance lines for a generated-file banner, without comment markers.
    pub fn header_lines(&self, generator: &str) -> Vec<String> {
        let mut lines = vec![format!("Code generated by {generator}. DO NOT EDIT.")];
        let fields = [
            ("Source", &self.source),
            ("Ref", &self.git_ref),
            ("Commit", &self.commit),
            ("LSP Version", &self.protocol_version),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{label}: {value}"));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GenerateConfig::default();
        assert!(config.resolve_deps);
        assert!(config.generate_client);
        assert!(config.generate_server);
        assert!(!config.include_proposed);
        assert_eq!(config.requested_types(), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GenerateConfig::from_toml_str(
            r#"
types = ["Hover"]
include_proposed = true
"#,
        )
        .unwrap();

        assert!(config.include_proposed);
        assert!(config.resolve_deps);
        assert_eq!(config.target, "go");
        assert_eq!(
            config.requested_types(),
            Some(BTreeSet::from(["Hover".to_string()]))
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lsp-typegen.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
target = "proto"
resolve_deps = false
ref = "release/protocol/3.17.6"

[options]
package = "lsp.v1"

[type_overrides]
LSPAny = "google.protobuf.Any"
"#
        )
        .unwrap();

        let config = GenerateConfig::load(&path).unwrap();
        assert_eq!(config.target, "proto");
        assert!(!config.resolve_deps);
        assert_eq!(config.git_ref.as_deref(), Some("release/protocol/3.17.6"));
        assert_eq!(config.option("package", "lsp"), "lsp.v1");
        assert_eq!(config.option("go_package", "lsp"), "lsp");
        assert_eq!(config.type_overrides["LSPAny"], "google.protobuf.Any");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = GenerateConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "resolve_deps = \"yes\"").unwrap();
        assert!(matches!(GenerateConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_header_lines() {
        let config = GenerateConfig {
            source: Some("https://github.com/microsoft/vscode-languageserver-node".into()),
            commit: Some("3f8e1c2".into()),
            ..GenerateConfig::default()
        };
        insta::assert_snapshot!(config.header_lines("lsp-typegen").join("\n"), @r"
        Code generated by lsp-typegen. DO NOT EDIT.
        Source: https://github.com/microsoft/vscode-languageserver-node
        Commit: 3f8e1c2
        ");
    }
}
