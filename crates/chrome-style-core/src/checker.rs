//! The declaration dispatcher.

use crate::check::{CheckContext, TagCheck, TagCheckBox};
use crate::classify::LocationClassifier;
use crate::config::{Config, ConfigError, Options};
use crate::context::{AstContext, TagDecl};
use crate::path::PathNormalizer;
use crate::policy::ClassificationPolicy;
use crate::types::{CheckResult, Finding, LocationType};

use thiserror::Error;
use tracing::{debug, info};

/// Suffix of mock matcher classes, which are never checked.
const MATCHER_SUFFIX: &str = "Matcher";

/// Errors that can occur while building a checker.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Why the dispatcher did not forward a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither a class-like declaration nor an enum.
    NotATag,
    /// Classified as [`LocationType::ThirdParty`].
    ThirdParty,
    /// Simple name is on the ignored-type list.
    IgnoredName,
    /// Class name ends with `Matcher`.
    MatcherSuffix,
}

/// Outcome of triaging one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition<P, D> {
    /// Not handed to any check.
    Skipped(SkipReason),
    /// Handed to every registered check.
    Forward {
        /// Zone of the declaration's origin.
        zone: LocationType,
        /// Position of the declaration.
        position: P,
        /// The declaration.
        tag: TagDecl<D>,
    },
}

/// Builder for configuring a [`StyleChecker`].
pub struct StyleCheckerBuilder<A: AstContext> {
    policy: Option<ClassificationPolicy>,
    options: Options,
    config: Option<Config>,
    checks: Vec<TagCheckBox<A>>,
}

impl<A: AstContext> Default for StyleCheckerBuilder<A> {
    fn default() -> Self {
        Self {
            policy: None,
            options: Options::default(),
            config: None,
            checks: Vec::new(),
        }
    }
}

impl<A: AstContext> StyleCheckerBuilder<A> {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the policy explicitly, overriding any configured `[policy]` table.
    #[must_use]
    pub fn policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the configuration. Its options replace the current ones.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.options = config.options.clone();
        self.config = Some(config);
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Skips filesystem path resolution.
    #[must_use]
    pub fn no_realpath(mut self, no_realpath: bool) -> Self {
        self.options.no_realpath = no_realpath;
        self
    }

    /// Promotes check warnings to errors.
    #[must_use]
    pub fn warnings_as_errors(mut self, warnings_as_errors: bool) -> Self {
        self.options.warnings_as_errors = warnings_as_errors;
        self
    }

    /// Adds a check.
    #[must_use]
    pub fn check<C: TagCheck<A> + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: TagCheckBox<A>) -> Self {
        self.checks.push(check);
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured policy lists are malformed.
    pub fn build(self) -> Result<StyleChecker<A>, CheckerError> {
        let policy = match (self.policy, &self.config) {
            (Some(policy), _) => policy,
            (None, Some(config)) => config.build_policy()?,
            (None, None) => ClassificationPolicy::chromium(),
        };

        Ok(StyleChecker {
            policy,
            options: self.options,
            checks: self.checks,
        })
    }
}

/// Classifies declarations and forwards the checkable ones to checks.
///
/// Use [`StyleChecker::builder()`] to construct an instance.
pub struct StyleChecker<A: AstContext> {
    policy: ClassificationPolicy,
    options: Options,
    checks: Vec<TagCheckBox<A>>,
}

impl<A: AstContext> StyleChecker<A> {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> StyleCheckerBuilder<A> {
        StyleCheckerBuilder::new()
    }

    /// The policy fixed at construction.
    #[must_use]
    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// The options fixed at construction.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// The location classifier for this checker's policy and options.
    #[must_use]
    pub fn classifier(&self) -> LocationClassifier<'_> {
        LocationClassifier::new(
            &self.policy,
            PathNormalizer::new(self.options.real_path_mode()),
        )
    }

    /// Decides whether `decl` is forwarded, without running any check.
    pub fn triage(&self, ast: &A, decl: A::Decl) -> Disposition<A::Position, A::Decl> {
        let Some(tag) = TagDecl::from_decl(ast, decl) else {
            return Disposition::Skipped(SkipReason::NotATag);
        };

        let Some(position) = ast.decl_position(decl) else {
            debug!("Skipping {:?}: no position", decl);
            return Disposition::Skipped(SkipReason::ThirdParty);
        };

        let zone = self.classifier().classify(ast, position);
        if !zone.is_checked() {
            return Disposition::Skipped(SkipReason::ThirdParty);
        }

        let name = ast.simple_name(decl);
        if self.policy.is_ignored_type(name) {
            debug!("Skipping ignored type {}", name);
            return Disposition::Skipped(SkipReason::IgnoredName);
        }

        // Probably gmock artifacts.
        if matches!(tag, TagDecl::ClassLike(_)) && name.ends_with(MATCHER_SUFFIX) {
            debug!("Skipping matcher {}", name);
            return Disposition::Skipped(SkipReason::MatcherSuffix);
        }

        Disposition::Forward {
            zone,
            position,
            tag,
        }
    }

    /// Checks a single declaration and returns the findings of every check.
    pub fn check_tag(&self, ast: &A, decl: A::Decl) -> Vec<Finding> {
        match self.triage(ast, decl) {
            Disposition::Skipped(_) => Vec::new(),
            Disposition::Forward {
                zone,
                position,
                tag,
            } => self.forward(ast, zone, position, tag),
        }
    }

    /// Checks every declaration yielded by `decls`.
    pub fn check_decls<I>(&self, ast: &A, decls: I) -> CheckResult
    where
        I: IntoIterator<Item = A::Decl>,
    {
        let mut result = CheckResult::new();

        for decl in decls {
            result.declarations_seen += 1;
            if let Disposition::Forward {
                zone,
                position,
                tag,
            } = self.triage(ast, decl)
            {
                result.declarations_checked += 1;
                result
                    .findings
                    .extend(self.forward(ast, zone, position, tag));
            }
        }

        result.findings.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Checked {} of {} declarations: {} findings",
            result.declarations_checked,
            result.declarations_seen,
            result.findings.len()
        );

        result
    }

    fn forward(
        &self,
        ast: &A,
        zone: LocationType,
        position: A::Position,
        tag: TagDecl<A::Decl>,
    ) -> Vec<Finding> {
        let ctx = CheckContext::new(ast, &self.policy, &self.options);
        let mut findings = Vec::new();
        for check in &self.checks {
            findings.extend(match tag {
                TagDecl::ClassLike(record) => check.check_class(&ctx, zone, position, record),
                TagDecl::Enum(decl) => check.check_enum(&ctx, zone, position, decl),
            });
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DeclId, PositionId, TranslationUnit, TranslationUnitBuilder};
    use crate::types::Severity;

    /// Emits one finding per forwarded declaration.
    struct Recorder;

    impl TagCheck<TranslationUnit> for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check_class(
            &self,
            ctx: &CheckContext<'_, TranslationUnit>,
            zone: LocationType,
            position: PositionId,
            record: DeclId,
        ) -> Vec<Finding> {
            vec![ctx.finding(self.code(), self.name(), Severity::Info, zone, position, record, "class")]
        }

        fn check_enum(
            &self,
            ctx: &CheckContext<'_, TranslationUnit>,
            zone: LocationType,
            position: PositionId,
            decl: DeclId,
        ) -> Vec<Finding> {
            vec![ctx.finding(self.code(), self.name(), Severity::Info, zone, position, decl, "enum")]
        }
    }

    fn checker() -> StyleChecker<TranslationUnit> {
        StyleChecker::builder()
            .no_realpath(true)
            .check(Recorder)
            .build()
            .expect("Failed to build checker")
    }

    fn unit_with(name: &str, path: &str, enumeration: bool) -> (TranslationUnit, DeclId) {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file(path);
        let pos = b.position(file, 3, 1);
        let decl = if enumeration {
            b.enumeration(b.root(), name, pos)
        } else {
            b.record(b.root(), name, pos)
        };
        (b.build(), decl)
    }

    #[test]
    fn matcher_suffix_is_never_forwarded() {
        let (tu, decl) = unit_with("FooMatcher", "chrome/browser/foo.h", false);
        let checker = checker();
        assert_eq!(
            checker.triage(&tu, decl),
            Disposition::Skipped(SkipReason::MatcherSuffix)
        );
        assert!(checker.check_tag(&tu, decl).is_empty());
    }

    #[test]
    fn ignored_name_is_never_forwarded() {
        let (tu, decl) = unit_with("Header", "chrome/browser/foo.h", false);
        assert_eq!(
            checker().triage(&tu, decl),
            Disposition::Skipped(SkipReason::IgnoredName)
        );

        let (tu, decl) = unit_with("ViewID", "chrome/browser/view_ids.h", true);
        assert_eq!(
            checker().triage(&tu, decl),
            Disposition::Skipped(SkipReason::IgnoredName)
        );
    }

    #[test]
    fn enum_with_matcher_suffix_is_forwarded() {
        let (tu, decl) = unit_with("KeyMatcher", "chrome/browser/keys.h", true);
        let findings = checker().check_tag(&tu, decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "enum");
    }

    #[test]
    fn third_party_is_never_forwarded() {
        let (tu, decl) = unit_with("Widget", "third_party/skia/widget.h", false);
        assert_eq!(
            checker().triage(&tu, decl),
            Disposition::Skipped(SkipReason::ThirdParty)
        );
    }

    #[test]
    fn chrome_and_blink_are_forwarded() {
        let (tu, decl) = unit_with("Widget", "chrome/browser/widget.h", false);
        assert!(matches!(
            checker().triage(&tu, decl),
            Disposition::Forward {
                zone: LocationType::Chrome,
                tag: TagDecl::ClassLike(_),
                ..
            }
        ));

        let (tu, decl) = unit_with("Node", "third_party/WebKit/Source/core/Node.h", false);
        let findings = checker().check_tag(&tu, decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].zone, LocationType::Blink);
    }

    #[test]
    fn non_tags_are_skipped() {
        let mut b = TranslationUnitBuilder::new();
        let ns = b.namespace(b.root(), Some("content"));
        let tu = b.build();
        assert_eq!(
            checker().triage(&tu, ns),
            Disposition::Skipped(SkipReason::NotATag)
        );
    }

    #[test]
    fn check_decls_counts_and_sorts() {
        let mut b = TranslationUnitBuilder::new();
        let a = b.file("chrome/a.h");
        let z = b.file("chrome/z.h");
        let tp = b.file("third_party/x/x.h");
        let pz = b.position(z, 1, 1);
        let pa = b.position(a, 9, 1);
        let ptp = b.position(tp, 1, 1);
        b.record(b.root(), "Zed", pz);
        b.record(b.root(), "Ay", pa);
        b.record(b.root(), "External", ptp);
        b.enumeration(b.root(), "Header", pa);
        let tu = b.build();

        let result = checker().check_decls(&tu, tu.tag_decls());
        assert_eq!(result.declarations_seen, 4);
        assert_eq!(result.declarations_checked, 2);
        let names: Vec<_> = result.findings.iter().map(|f| f.declaration.as_str()).collect();
        assert_eq!(names, vec!["Ay", "Zed"]);
    }

    #[test]
    fn config_supplies_policy_and_options() {
        let config = Config::parse(
            r#"
[options]
no_realpath = true
warnings_as_errors = true

[policy]
ignored_record_names = ["Widget"]
"#,
        )
        .unwrap();
        let checker: StyleChecker<TranslationUnit> =
            StyleChecker::builder().config(config).build().unwrap();
        assert!(checker.options().warnings_as_errors);
        assert!(checker.policy().is_ignored_type("Widget"));
        assert!(checker.policy().is_ignored_type("Header"));
        assert_eq!(checker.check_count(), 0);

        let (tu, decl) = unit_with("Widget", "chrome/browser/widget.h", false);
        assert_eq!(
            checker.triage(&tu, decl),
            Disposition::Skipped(SkipReason::IgnoredName)
        );
    }

    #[test]
    fn explicit_policy_wins_over_config() {
        let config = Config::parse("[policy]\nignored_record_names = [\"Widget\"]\n").unwrap();
        let checker: StyleChecker<TranslationUnit> = StyleChecker::builder()
            .config(config)
            .policy(ClassificationPolicy::default())
            .build()
            .unwrap();
        assert!(!checker.policy().is_ignored_type("Widget"));
    }

    #[test]
    fn malformed_config_fails_to_build() {
        let config = Config::parse("[policy]\nbanned_directories = [\"gen\"]\n").unwrap();
        let result: Result<StyleChecker<TranslationUnit>, _> =
            StyleChecker::builder().config(config).build();
        assert!(matches!(result, Err(CheckerError::Config(_))));
    }
}
