//! Show-policy command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config_resolver;
use crate::Overrides;

/// Runs the show-policy command.
pub fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let (config, source) = config_resolver::load(Path::new("."), config_path, overrides)?;
    let policy = config.build_policy().context("Invalid policy")?;
    let options = &config.options;

    println!("Configuration: {source}\n");

    println!("Options:");
    println!("  {:<20} {}", "no_realpath", options.no_realpath);
    println!("  {:<20} {}", "warnings_as_errors", options.warnings_as_errors);
    println!("  {:<20} {:?}", "namespace_mode", options.namespace_mode);

    print_list("Banned directories", policy.banned_directories());
    print_list("Ignored record names", policy.ignored_record_names());
    print_list("Ignored base classes", policy.ignored_base_classes());

    Ok(())
}

fn print_list<'a>(title: &str, entries: impl Iterator<Item = &'a str>) {
    println!("\n{title}:");
    let mut empty = true;
    for entry in entries {
        println!("  {entry}");
        empty = false;
    }
    if empty {
        println!("  (none)");
    }
}
