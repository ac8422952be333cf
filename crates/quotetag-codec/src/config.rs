//! Codec configuration.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Handling of dates, timestamps and decimals that appear outside a record.
///
/// Such values are written as plain strings and cannot be told apart from
/// ordinary strings on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BareValuePolicy {
    /// Write them as untagged strings.
    #[default]
    Plain,
    /// Refuse them with `UnsupportedType`.
    Reject,
}

/// Encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Indent output. Default: false.
    #[serde(default)]
    pub pretty: bool,
    /// Bare special-typed values policy. Default: plain.
    #[serde(default)]
    pub bare_values: BareValuePolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            bare_values: BareValuePolicy::default(),
        }
    }
}

impl CodecConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> CodecResult<Self> {
        toml::from_str(content)
            .map_err(|e| CodecError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CodecError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = CodecConfig::from_toml_str("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.bare_values, BareValuePolicy::Plain);
    }

    #[test]
    fn test_parse_toml() {
        let config = CodecConfig::from_toml_str(
            r#"
            pretty = true
            bare_values = "reject"
            "#,
        )
        .unwrap();
        assert!(config.pretty);
        assert_eq!(config.bare_values, BareValuePolicy::Reject);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = CodecConfig::from_toml_str(r#"bare_values = "wrap""#).unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.toml");
        std::fs::write(&path, "pretty = true\n").unwrap();

        let config = CodecConfig::from_file(&path).unwrap();
        assert!(config.pretty);

        let missing = CodecConfig::from_file(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CodecError::Config(_))));
    }
}
