//! Transitive base-class inspection.

use crate::context::{AstContext, DeclKind};
use crate::policy::ClassificationPolicy;

use std::collections::HashSet;

/// Checks a record's transitive bases against the ignored-base list.
#[derive(Debug, Clone, Copy)]
pub struct BaseClassInspector<'p> {
    policy: &'p ClassificationPolicy,
}

impl<'p> BaseClassInspector<'p> {
    /// Creates an inspector over a policy.
    #[must_use]
    pub fn new(policy: &'p ClassificationPolicy) -> Self {
        Self { policy }
    }

    /// Returns true if any base in the transitive closure of `record` is an
    /// ignored base class.
    ///
    /// Unresolved bases and bases that are not records are skipped. Each
    /// record is visited at most once, so cyclic host data terminates.
    pub fn has_ignored_bases<A>(&self, ast: &A, record: A::Decl) -> bool
    where
        A: AstContext + ?Sized,
    {
        let mut visited = HashSet::from([record]);
        let mut worklist = vec![record];

        while let Some(current) = worklist.pop() {
            // Reverse so bases are examined in declaration order.
            for base in ast.direct_bases(current).into_iter().rev().flatten() {
                if ast.decl_kind(base) != DeclKind::Record || !visited.insert(base) {
                    continue;
                }
                let name = ast.qualified_name(base);
                if self.policy.is_ignored_base(&name) {
                    tracing::debug!("{} derives from ignored base {}", ast.qualified_name(record), name);
                    return true;
                }
                worklist.push(base);
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::TranslationUnitBuilder;

    #[test]
    fn grandparent_ignored_base() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("chrome/common/messages.h");
        let pos = b.position(file, 1, 1);
        let ipc = b.namespace(b.root(), Some("IPC"));
        let no_params = b.record(ipc, "NoParams", pos);
        let middle = b.record(b.root(), "Middle", pos);
        let derived = b.record(b.root(), "Derived", pos);
        b.add_base(middle, Some(no_params));
        b.add_base(derived, Some(middle));
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        let inspector = BaseClassInspector::new(&policy);
        assert!(inspector.has_ignored_bases(&tu, derived));
        assert!(inspector.has_ignored_bases(&tu, middle));
        assert!(!inspector.has_ignored_bases(&tu, no_params));
    }

    #[test]
    fn no_bases_is_false() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("a.h");
        let pos = b.position(file, 1, 1);
        let lonely = b.record(b.root(), "Lonely", pos);
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        assert!(!BaseClassInspector::new(&policy).has_ignored_bases(&tu, lonely));
    }

    #[test]
    fn non_matching_closure_is_false() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("a.h");
        let pos = b.position(file, 1, 1);
        let base = b.record(b.root(), "Base", pos);
        let mid = b.record(b.root(), "Mid", pos);
        let leaf = b.record(b.root(), "Leaf", pos);
        b.add_base(mid, Some(base));
        b.add_base(leaf, Some(mid));
        b.add_base(leaf, None);
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        assert!(!BaseClassInspector::new(&policy).has_ignored_bases(&tu, leaf));
    }

    #[test]
    fn unresolved_and_non_record_bases_are_skipped() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("a.h");
        let pos = b.position(file, 1, 1);
        let ipc = b.namespace(b.root(), Some("IPC"));
        // An enum that happens to carry the ignored name is not a class.
        let fake = b.enumeration(ipc, "NoParams", pos);
        let derived = b.record(b.root(), "Derived", pos);
        b.add_base(derived, None);
        b.add_base(derived, Some(fake));
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        assert!(!BaseClassInspector::new(&policy).has_ignored_bases(&tu, derived));
    }

    #[test]
    fn cyclic_bases_terminate() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("a.h");
        let pos = b.position(file, 1, 1);
        let a = b.record(b.root(), "A", pos);
        let c = b.record(b.root(), "C", pos);
        b.add_base(a, Some(c));
        b.add_base(c, Some(a));
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        assert!(!BaseClassInspector::new(&policy).has_ignored_bases(&tu, a));
    }

    #[test]
    fn second_base_branch_matches() {
        let mut b = TranslationUnitBuilder::new();
        let file = b.file("a.h");
        let pos = b.position(file, 1, 1);
        let plain = b.record(b.root(), "Plain", pos);
        let ignored = b.record(b.root(), "Pod", pos);
        let derived = b.record(b.root(), "Derived", pos);
        b.add_base(derived, Some(plain));
        b.add_base(derived, Some(ignored));
        let tu = b.build();

        let policy = ClassificationPolicy::new(Vec::<String>::new(), Vec::<String>::new(), ["Pod"])
            .unwrap();
        assert!(BaseClassInspector::new(&policy).has_ignored_bases(&tu, derived));
    }
}
