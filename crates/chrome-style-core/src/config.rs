//! Configuration types for chrome-style.

use crate::namespace::NamespaceMode;
use crate::path::RealPathMode;
use crate::policy::{ClassificationPolicy, PolicyError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for chrome-style.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine options.
    #[serde(default)]
    pub options: Options,

    /// Policy list overrides.
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds the classification policy described by the `[policy]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if any list entry is malformed.
    pub fn build_policy(&self) -> Result<ClassificationPolicy, ConfigError> {
        let mut policy = if self.policy.inherit_defaults {
            ClassificationPolicy::chromium()
        } else {
            ClassificationPolicy::default()
        };
        policy.extend(
            self.policy.banned_directories.iter().cloned(),
            self.policy.ignored_record_names.iter().cloned(),
            self.policy.ignored_base_classes.iter().cloned(),
        )?;
        Ok(policy)
    }
}

/// Engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Skip filesystem path resolution and prepend `/` instead.
    #[serde(default)]
    pub no_realpath: bool,

    /// Report check findings as errors instead of warnings.
    #[serde(default)]
    pub warnings_as_errors: bool,

    /// Namespace label handed to checks.
    #[serde(default)]
    pub namespace_mode: NamespaceMode,
}

impl Options {
    /// Path resolution mode implied by `no_realpath`.
    #[must_use]
    pub fn real_path_mode(&self) -> RealPathMode {
        RealPathMode::from_no_realpath(self.no_realpath)
    }
}

/// The `[policy]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Start from the built-in lists (default: true).
    #[serde(default = "default_true")]
    pub inherit_defaults: bool,

    /// Extra banned directory markers, each bounded by `/`.
    #[serde(default)]
    pub banned_directories: Vec<String>,

    /// Extra ignored simple type names.
    #[serde(default)]
    pub ignored_record_names: Vec<String>,

    /// Extra ignored fully-qualified base-class names.
    #[serde(default)]
    pub ignored_base_classes: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            inherit_defaults: true,
            banned_directories: Vec::new(),
            ignored_record_names: Vec::new(),
            ignored_base_classes: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Malformed policy entry.
    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.options.no_realpath);
        assert_eq!(config.options.namespace_mode, NamespaceMode::Outermost);
        assert!(config.policy.inherit_defaults);
        assert_eq!(
            config.build_policy().unwrap(),
            ClassificationPolicy::chromium()
        );
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[options]
no_realpath = true
warnings_as_errors = true
namespace_mode = "qualified"

[policy]
banned_directories = ["/out/"]
ignored_record_names = ["LegacyPod"]
ignored_base_classes = ["base::NotCopyable"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.options.real_path_mode(), RealPathMode::Skip);
        assert!(config.options.warnings_as_errors);
        assert_eq!(config.options.namespace_mode, NamespaceMode::Qualified);

        let policy = config.build_policy().unwrap();
        assert!(policy.banned_directories().any(|d| d == "/out/"));
        assert!(policy.banned_directories().any(|d| d == "/third_party/"));
        assert!(policy.is_ignored_type("LegacyPod"));
        assert!(policy.is_ignored_type("Header"));
        assert!(policy.is_ignored_base("base::NotCopyable"));
    }

    #[test]
    fn test_replace_defaults() {
        let toml = r#"
[policy]
inherit_defaults = false
banned_directories = ["/vendor/"]
"#;
        let policy = Config::parse(toml).unwrap().build_policy().unwrap();
        assert_eq!(policy.banned_directories().collect::<Vec<_>>(), vec!["/vendor/"]);
        assert!(!policy.is_ignored_type("Header"));
        assert!(!policy.is_ignored_base("IPC::NoParams"));
    }

    #[test]
    fn test_malformed_directory_fails() {
        let toml = r#"
[policy]
banned_directories = ["vendor"]
"#;
        let err = Config::parse(toml).unwrap().build_policy().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Policy(PolicyError::UnboundedDirectory { .. })
        ));
    }

    #[test]
    fn test_unknown_namespace_mode_fails() {
        let err = Config::parse("[options]\nnamespace_mode = \"dotted\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chrome-style.toml");
        std::fs::write(&path, "[options]\nno_realpath = true\n").unwrap();
        assert!(Config::from_file(&path).unwrap().options.no_realpath);

        let err = Config::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
