//! Core types for classification zones, findings and check results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Enforcement zone assigned to a declaration's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    /// First-party code that receives the full set of checks.
    Chrome,
    /// Rendering-engine code that receives a reduced set of checks.
    Blink,
    /// Code that is never checked. Also the fallback for unresolvable origins.
    ThirdParty,
}

impl LocationType {
    /// Returns true for zones whose declarations are forwarded to checks.
    #[must_use]
    pub fn is_checked(self) -> bool {
        self != Self::ThirdParty
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Blink => write!(f, "blink"),
            Self::ThirdParty => write!(f, "third-party"),
        }
    }
}

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Presumed source location of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Presumed file name as reported by the host.
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    pub line: u32,
    /// Column number (1-indexed, 0 when unknown).
    pub column: u32,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location used when the host cannot resolve a position.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("<unknown>", 0, 0)
    }
}

/// A finding reported by a check for a single declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Check code (e.g., "CST001").
    pub code: String,
    /// Check name (e.g., "zone-report").
    pub check: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Zone the declaration was classified into.
    pub zone: LocationType,
    /// Qualified name of the declaration.
    pub declaration: String,
    /// Presumed location of the declaration.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        check: impl Into<String>,
        severity: Severity,
        zone: LocationType,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            check: check.into(),
            severity,
            zone,
            declaration: String::new(),
            location,
            message: message.into(),
        }
    }

    /// Sets the qualified declaration name.
    #[must_use]
    pub fn with_declaration(mut self, declaration: impl Into<String>) -> Self {
        self.declaration = declaration.into();
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.check,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if !self.declaration.is_empty() {
            let _ = writeln!(output, "  = declaration: {} ({})", self.declaration, self.zone);
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Result of running the checker over a set of declarations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckResult {
    /// All findings reported by checks.
    pub findings: Vec<Finding>,
    /// Number of tag declarations handed to the dispatcher.
    pub declarations_seen: usize,
    /// Number of declarations forwarded to checks after filtering.
    pub declarations_checked: usize,
}

impl CheckResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns findings filtered by zone.
    #[must_use]
    pub fn by_zone(&self, zone: LocationType) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.zone == zone).collect()
    }

    /// Counts findings by severity as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        let (errors, warnings, infos) = self.count_by_severity();
        format!(
            "Found {} error(s), {} warning(s), {} info(s) in {} of {} declaration(s)",
            errors, warnings, infos, self.declarations_checked, self.declarations_seen
        )
    }

    /// Adds findings and counters from another result.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.declarations_seen += other.declarations_seen;
        self.declarations_checked += other.declarations_checked;
    }
}
