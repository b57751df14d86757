//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# chrome-style configuration

[options]
# Use compiler-reported paths as-is instead of resolving them on disk.
no_realpath = false

# Report check findings as errors.
warnings_as_errors = false

# Namespace handed to checks: "outermost" or "qualified".
namespace_mode = "outermost"

[policy]
# Extend the built-in lists. Set to false to replace them.
inherit_defaults = true

# Directories that are never checked. Each entry must start and end with '/'.
banned_directories = []

# Class and enum names that are never checked.
ignored_record_names = []

# Fully qualified base classes whose subclasses are exempt.
ignored_base_classes = []
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new("chrome-style.toml"), force)?;

    println!("Created chrome-style.toml");
    println!("\nNext steps:");
    println!("  1. Edit chrome-style.toml to extend the policy");
    println!("  2. Run: chrome-style show-policy");

    Ok(())
}

fn write_default(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
