//! YAML configuration file support.
//!
//! One file configures every stage: the canonical comparator, the
//! compliance policy and the default transformation. Every section may be
//! left out and takes its defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "leadership book"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   separate_block_tags: false
//!   strip_line_markers: true
//!   strip_rule_lines: true
//!   divergence_threshold: 100
//!   context_radius: 20
//!   entities:
//!     "&amp;": "&"
//!     "&hellip;": "..."
//!
//! compliance:
//!   min_page_breaks: 5
//!   substantial_word_count: 1000
//!   page_break_marker: "page-break-before"
//!
//! transform:
//!   mode: "restructure"
//!
//! targets:
//!   min_preservation_rate: 95.0
//!   min_compliance_rate: 90.0
//! ```

use std::fs;
use std::path::Path;

use canonical::{CanonicalConfig, Canonicalizer};
use compliance::{CompliancePolicy, FileKind, classify_file_name};
use serde::{Deserialize, Serialize};
use template::TransformMode;
use thiserror::Error;

use crate::batch::BatchTargets;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the toolkit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AcissConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalConfig,

    #[serde(default)]
    pub compliance: CompliancePolicy,

    #[serde(default)]
    pub transform: TransformYamlConfig,

    #[serde(default)]
    pub targets: BatchTargets,
}

impl AcissConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AcissConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))?;
        self.compliance
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("compliance: {err}")))?;
        self.targets.validate()?;
        Ok(())
    }

    /// Compiles the canonical section.
    pub fn canonicalizer(&self) -> Result<Canonicalizer, ConfigLoadError> {
        Canonicalizer::new(self.canonical.clone())
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))
    }
}

impl Default for AcissConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalConfig::default(),
            compliance: CompliancePolicy::default(),
            transform: TransformYamlConfig::default(),
            targets: BatchTargets::default(),
        }
    }
}

/// Transformation defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformYamlConfig {
    /// Mode used when the command line names none.
    #[serde(default)]
    pub mode: TransformMode,

    /// Pick `part-divider` automatically for files named like part dividers.
    #[serde(default = "true_value")]
    pub detect_part_dividers: bool,
}

impl Default for TransformYamlConfig {
    fn default() -> Self {
        Self {
            mode: TransformMode::default(),
            detect_part_dividers: true,
        }
    }
}

impl TransformYamlConfig {
    /// The mode for one file: `requested` when given, otherwise the
    /// configured default, switched to `part-divider` for part files.
    pub fn mode_for(&self, file_name: &str, requested: Option<TransformMode>) -> TransformMode {
        if let Some(mode) = requested {
            return mode;
        }
        if self.detect_part_dividers && classify_file_name(file_name) == FileKind::PartDivider {
            TransformMode::PartDivider
        } else {
            self.mode
        }
    }
}

fn true_value() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
canonical:
  strip_rule_lines: true
  divergence_threshold: 50
transform:
  mode: "rebuild"
"#;

        let config = AcissConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(config.canonical.strip_rule_lines);
        assert_eq!(config.canonical.divergence_threshold, 50);
        assert_eq!(config.canonical.context_radius, 20);
        assert_eq!(config.transform.mode, TransformMode::Rebuild);
        assert!(config.transform.detect_part_dividers);
        assert_eq!(config.compliance, CompliancePolicy::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = "version: \"1\"\ntransform:\n  mode: part-divider\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = AcissConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.transform.mode, TransformMode::PartDivider);
    }

    #[test]
    fn test_default_config() {
        let config = AcissConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert_eq!(config.transform.mode, TransformMode::Restructure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_for_detects_part_dividers() {
        let transform = TransformYamlConfig::default();
        assert_eq!(
            transform.mode_for("8-Part-I.xhtml", None),
            TransformMode::PartDivider
        );
        assert_eq!(
            transform.mode_for("9-chapter-i-roots.xhtml", None),
            TransformMode::Restructure
        );
        assert_eq!(
            transform.mode_for("8-Part-I.xhtml", Some(TransformMode::Rebuild)),
            TransformMode::Rebuild
        );

        let fixed = TransformYamlConfig {
            detect_part_dividers: false,
            ..Default::default()
        };
        assert_eq!(fixed.mode_for("8-Part-I.xhtml", None), TransformMode::Restructure);
    }

    #[test]
    fn test_unsupported_version() {
        let result = AcissConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_canonical_validation() {
        let yaml = r#"
version: "1.0"
canonical:
  entities:
    "amp": "&"
"#;

        let result = AcissConfig::from_yaml(yaml);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("canonical"));
        assert!(message.contains("amp"));
    }

    #[test]
    fn test_compliance_validation() {
        let yaml = "version: \"1.0\"\ncompliance:\n  page_break_marker: \"\"\n";
        let result = AcissConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("page_break_marker"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let yaml = "version: \"1.0\"\ntransform:\n  mode: \"reflow\"\n";
        assert!(matches!(
            AcissConfig::from_yaml(yaml),
            Err(ConfigLoadError::YamlParse(_))
        ));
    }

    #[test]
    fn test_canonicalizer_uses_custom_entities() {
        let yaml = r#"
version: "1.0"
canonical:
  entities:
    "&mdash;": "-"
"#;

        let config = AcissConfig::from_yaml(yaml).unwrap();
        let canonicalizer = config.canonicalizer().unwrap();
        assert_eq!(canonicalizer.canonicalize("a&mdash;b &amp;"), "a-b &amp;");
    }
}
