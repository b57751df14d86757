//! Check command implementation.

use anyhow::{bail, Context, Result};
use chrome_style_core::snapshot::{self, TranslationUnit};
use chrome_style_core::{CheckResult, StyleChecker, ZoneReport};
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};
use crate::{OutputFormat, Overrides};

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    config_path: Option<&Path>,
    overrides: Overrides,
) -> Result<()> {
    let (config, source) = config_resolver::load(Path::new("."), config_path, overrides)?;
    if matches!(source, ConfigSource::Global(_)) {
        tracing::info!("Using global config: {}", source);
    }

    let checker: StyleChecker<TranslationUnit> = StyleChecker::builder()
        .config(config)
        .check(ZoneReport::new())
        .build()
        .context("Failed to build checker")?;

    let snapshots = collect_snapshots(path)?;
    if snapshots.is_empty() {
        bail!("No snapshots found under {}", path.display());
    }

    tracing::info!(
        "Checking {} snapshot(s) with {} check(s)",
        snapshots.len(),
        checker.check_count()
    );

    let mut result = CheckResult::new();
    for file in &snapshots {
        let unit = snapshot::load_from_path(file)
            .with_context(|| format!("Failed to load snapshot: {}", file.display()))?;
        result.extend(checker.check_decls(&unit, unit.tag_decls()));
    }

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// A snapshot file as given, or every `*.json` below a directory.
fn collect_snapshots(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("No such file or directory: {}", path.display());
    }

    let root = path.to_str().context("Snapshot path is not valid UTF-8")?;
    let pattern = format!("{}/**/*.json", glob::Pattern::escape(root));

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid snapshot pattern")? {
        let file = entry.context("Failed to read snapshot directory")?;
        if file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn single_file_is_taken_as_is() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("unit.snapshot");
        fs::write(&file, "{}").unwrap();
        assert_eq!(collect_snapshots(&file).unwrap(), vec![file]);
    }

    #[test]
    fn directories_are_searched_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("out/chrome")).unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("out/chrome/a.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = collect_snapshots(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("b.json"),
                tmp.path().join("out/chrome/a.json"),
            ]
        );
    }

    #[test]
    fn missing_path_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(collect_snapshots(&tmp.path().join("absent")).is_err());
    }
}
