//! A check that reports what the dispatcher knows about each declaration.

use crate::check::{CheckContext, TagCheck};
use crate::context::AstContext;
use crate::types::{Finding, LocationType, Severity};

/// Emits one finding per forwarded class or enum, describing its zone,
/// namespace and origin file.
///
/// Useful for auditing a policy before real checks are written against it.
/// Findings follow [`CheckContext::diagnostic_level`] unless a severity is
/// set explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneReport {
    severity: Option<Severity>,
}

impl ZoneReport {
    /// Check code.
    pub const CODE: &'static str = "CS001";
    /// Check name.
    pub const NAME: &'static str = "zone-report";

    /// Creates the check at the configured diagnostic level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the check with [`Severity::Info`] findings, which never fail a run.
    #[must_use]
    pub fn info() -> Self {
        Self::new().severity(Severity::Info)
    }

    /// Pins the severity of emitted findings.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    fn severity_in<A: AstContext>(&self, ctx: &CheckContext<'_, A>) -> Severity {
        self.severity.unwrap_or_else(|| ctx.diagnostic_level())
    }

    fn describe<A: AstContext>(
        ctx: &CheckContext<'_, A>,
        kind: &str,
        zone: LocationType,
        position: A::Position,
        decl: A::Decl,
    ) -> String {
        let file_kind = if ctx.in_implementation_file(position) {
            "implementation file"
        } else {
            "header"
        };
        format!(
            "{kind} '{}' in {zone} zone, namespace '{}', declared in {file_kind}",
            ctx.ast.simple_name(decl),
            ctx.namespace_of(decl),
        )
    }
}

impl<A: AstContext> TagCheck<A> for ZoneReport {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn description(&self) -> &'static str {
        "Reports the zone and namespace of every checked class and enum"
    }

    fn check_class(
        &self,
        ctx: &CheckContext<'_, A>,
        zone: LocationType,
        position: A::Position,
        record: A::Decl,
    ) -> Vec<Finding> {
        let mut message = Self::describe(ctx, "class", zone, position, record);
        if ctx.has_ignored_bases(record) {
            message.push_str(", derives from an ignored base");
        }
        vec![ctx.finding(
            Self::CODE,
            Self::NAME,
            self.severity_in(ctx),
            zone,
            position,
            record,
            message,
        )]
    }

    fn check_enum(
        &self,
        ctx: &CheckContext<'_, A>,
        zone: LocationType,
        position: A::Position,
        decl: A::Decl,
    ) -> Vec<Finding> {
        vec![ctx.finding(
            Self::CODE,
            Self::NAME,
            self.severity_in(ctx),
            zone,
            position,
            decl,
            Self::describe(ctx, "enum", zone, position, decl),
        )]
    }
}
