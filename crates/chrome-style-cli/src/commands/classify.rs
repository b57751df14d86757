//! Classify command implementation.

use anyhow::{Context, Result};
use chrome_style_core::{LocationClassifier, PathNormalizer};
use std::path::Path;

use crate::config_resolver;
use crate::Overrides;

/// Runs the classify command.
pub fn run(paths: &[String], config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let (config, _) = config_resolver::load(Path::new("."), config_path, overrides)?;
    let policy = config.build_policy().context("Invalid policy")?;

    let normalizer = PathNormalizer::new(config.options.real_path_mode());
    let classifier = LocationClassifier::new(&policy, normalizer);

    let width = paths.iter().map(String::len).max().unwrap_or(0);
    for path in paths {
        println!("{:<width$}  {}", path, classifier.classify_filename(path));
    }

    Ok(())
}
