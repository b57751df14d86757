//! Configuration lookup and loading.
//!
//! The first match wins:
//!
//! 1. `--config <FILE>`
//! 2. `chrome-style.toml`, then `.chrome-style.toml`, in the working directory
//! 3. `config.toml` in the global directory (`$CHROME_STYLE_CONFIG_DIR`, else `~/.chrome-style/`)
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top of whichever configuration was loaded.

use anyhow::{Context, Result};
use chrome_style_core::Config;
use std::path::{Path, PathBuf};

use crate::Overrides;

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// Found in the global directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults.
    Default,
}

impl ConfigSource {
    /// The file backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => write!(f, "built-in defaults"),
        }
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["chrome-style.toml", ".chrome-style.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

const CONFIG_DIR_ENV: &str = "CHROME_STYLE_CONFIG_DIR";

/// Resolves, loads and overrides the configuration for `project_dir`.
///
/// # Errors
///
/// Returns an error if the resolved file cannot be read or parsed.
pub fn load(
    project_dir: &Path,
    explicit: Option<&Path>,
    overrides: Overrides,
) -> Result<(Config, ConfigSource)> {
    load_inner(project_dir, explicit, global_config_dir(), overrides)
}

fn load_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
    overrides: Overrides,
) -> Result<(Config, ConfigSource)> {
    let source = resolve_inner(project_dir, explicit, global_dir);

    let mut config = match source.path() {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    tracing::debug!("Using configuration from {}", source);

    config.options.no_realpath |= overrides.no_realpath;
    config.options.warnings_as_errors |= overrides.warnings_as_errors;

    Ok((config, source))
}

/// Finds the configuration file without reading it.
///
/// Takes `global_dir` as a parameter so tests need not touch the environment.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // Trusted as-is; a missing file surfaces when loading.
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(candidate);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".chrome-style"))
}
