//! The interface between the dispatcher and per-kind policy checks.

use crate::bases::BaseClassInspector;
use crate::config::Options;
use crate::context::AstContext;
use crate::implementation::in_implementation_file;
use crate::namespace::namespace_of;
use crate::policy::ClassificationPolicy;
use crate::types::{Finding, Location, LocationType, Severity};

/// A per-kind policy check for classes and enums.
///
/// The dispatcher only forwards declarations from the Chrome and Blink
/// zones that survived the ignore lists. Checks may apply a reduced rule set
/// to the Blink zone.
///
/// # Example
///
/// ```ignore
/// use chrome_style_core::{AstContext, CheckContext, Finding, LocationType, TagCheck};
///
/// pub struct NoBlinkClasses;
///
/// impl<A: AstContext> TagCheck<A> for NoBlinkClasses {
///     fn name(&self) -> &'static str { "no-blink-classes" }
///     fn code(&self) -> &'static str { "CS100" }
///
///     fn check_class(
///         &self,
///         ctx: &CheckContext<'_, A>,
///         zone: LocationType,
///         position: A::Position,
///         record: A::Decl,
///     ) -> Vec<Finding> {
///         if zone != LocationType::Blink {
///             return vec![];
///         }
///         vec![ctx.finding(self.code(), self.name(), ctx.diagnostic_level(), zone, position, record, "class in blink")]
///     }
/// }
/// ```
pub trait TagCheck<A: AstContext>: Send + Sync {
    /// Returns the kebab-case name of this check (e.g., "zone-report").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "CS001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check does.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a class, struct or union.
    fn check_class(
        &self,
        ctx: &CheckContext<'_, A>,
        zone: LocationType,
        position: A::Position,
        record: A::Decl,
    ) -> Vec<Finding>;

    /// Checks an enumeration. Does nothing by default.
    fn check_enum(
        &self,
        _ctx: &CheckContext<'_, A>,
        _zone: LocationType,
        _position: A::Position,
        _decl: A::Decl,
    ) -> Vec<Finding> {
        Vec::new()
    }
}

/// Type alias for boxed `TagCheck` trait objects.
pub type TagCheckBox<A> = Box<dyn TagCheck<A>>;

/// Everything a check may consult about the declaration it was handed.
pub struct CheckContext<'a, A: AstContext> {
    /// The host tree.
    pub ast: &'a A,
    policy: &'a ClassificationPolicy,
    options: &'a Options,
}

impl<'a, A: AstContext> CheckContext<'a, A> {
    /// Creates a context.
    #[must_use]
    pub fn new(ast: &'a A, policy: &'a ClassificationPolicy, options: &'a Options) -> Self {
        Self {
            ast,
            policy,
            options,
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> &ClassificationPolicy {
        self.policy
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        self.options
    }

    /// Namespace label of `decl` in the configured [`NamespaceMode`](crate::NamespaceMode).
    #[must_use]
    pub fn namespace_of(&self, decl: A::Decl) -> String {
        namespace_of(self.ast, decl, self.options.namespace_mode)
    }

    /// Whether `record` transitively derives from an ignored base class.
    #[must_use]
    pub fn has_ignored_bases(&self, record: A::Decl) -> bool {
        BaseClassInspector::new(self.policy).has_ignored_bases(self.ast, record)
    }

    /// Whether `position` was written in an implementation file.
    #[must_use]
    pub fn in_implementation_file(&self, position: A::Position) -> bool {
        in_implementation_file(self.ast, position)
    }

    /// Severity for style findings: errors when warnings are promoted.
    #[must_use]
    pub fn diagnostic_level(&self) -> Severity {
        if self.options.warnings_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Presumed location of `position`, or [`Location::unknown`].
    #[must_use]
    pub fn location_of(&self, position: A::Position) -> Location {
        self.ast
            .presumed_location(position)
            .map_or_else(Location::unknown, |loc| {
                Location::new(loc.filename, loc.line, loc.column)
            })
    }

    /// Builds a finding about `decl` located at `position`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn finding(
        &self,
        code: &str,
        check: &str,
        severity: Severity,
        zone: LocationType,
        position: A::Position,
        decl: A::Decl,
        message: impl Into<String>,
    ) -> Finding {
        Finding::new(code, check, severity, zone, self.location_of(position), message)
            .with_declaration(self.ast.qualified_name(decl))
    }
}
