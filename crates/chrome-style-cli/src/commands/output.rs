//! Shared output formatting for check results.

use anyhow::Result;
use chrome_style_core::CheckResult;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &CheckResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &CheckResult) {
    let (errors, warnings, _) = result.count_by_severity();

    for finding in &result.findings {
        println!("{}", finding.format());
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{}{}\x1b[0m", summary_color, result.summary());
}

fn print_json(result: &CheckResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &CheckResult) {
    for finding in &result.findings {
        println!("{finding}");
    }
}
