//! Host-facing traits: source positions and declaration trees.
//!
//! The engine never owns syntax-tree data. A host (a compiler front end, or
//! the in-memory [`snapshot`](crate::snapshot) model) implements these traits
//! and hands out cheap `Copy` handles.

use std::fmt;
use std::hash::Hash;

/// Best-effort filename, line and column of a position, honoring `#line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresumedLocation<'a> {
    /// Presumed file name.
    pub filename: &'a str,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

/// Access to the host's position table.
pub trait SourceManager {
    /// Opaque position handle.
    type Position: Copy + Eq + Hash + fmt::Debug;

    /// Follows macro substitution to where the text was literally written.
    fn spelling_position(&self, position: Self::Position) -> Self::Position;

    /// Returns true if the position lies in a system or third-party header.
    fn is_in_system_header(&self, position: Self::Position) -> bool;

    /// Resolves the presumed location, or `None` for positions that are not
    /// stated in any source text.
    fn presumed_location(&self, position: Self::Position) -> Option<PresumedLocation<'_>>;

    /// For a macro position, returns the start of the immediately enclosing
    /// expansion. Returns `None` for file positions.
    fn immediate_expansion(&self, position: Self::Position) -> Option<Self::Position>;

    /// Returns true if the position is the result of a macro expansion.
    fn is_macro_position(&self, position: Self::Position) -> bool {
        self.immediate_expansion(position).is_some()
    }
}

/// Declaration kinds the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Root of the context tree.
    TranslationUnit,
    /// Named or anonymous namespace.
    Namespace,
    /// Class, struct or union.
    Record,
    /// Enumeration.
    Enum,
    /// Function or method.
    Function,
    /// Block scope.
    Block,
}

/// Access to the host's declaration tree.
pub trait AstContext: SourceManager {
    /// Opaque declaration handle. Declaration contexts are declarations too.
    type Decl: Copy + Eq + Hash + fmt::Debug;

    /// Kind of the declaration.
    fn decl_kind(&self, decl: Self::Decl) -> DeclKind;

    /// Declared name, `None` for anonymous declarations.
    fn decl_name(&self, decl: Self::Decl) -> Option<&str>;

    /// Immediately enclosing declaration context.
    fn parent_context(&self, decl: Self::Decl) -> Option<Self::Decl>;

    /// Position of the declaration, if it has one.
    fn decl_position(&self, decl: Self::Decl) -> Option<Self::Position>;

    /// Direct bases of a record in declaration order. `None` entries are
    /// base references the host could not resolve (e.g. dependent types).
    fn direct_bases(&self, record: Self::Decl) -> Vec<Option<Self::Decl>>;

    /// Simple name, empty for anonymous declarations.
    fn simple_name(&self, decl: Self::Decl) -> &str {
        self.decl_name(decl).unwrap_or("")
    }

    /// Fully qualified name, e.g. `IPC::NoParams`.
    fn qualified_name(&self, decl: Self::Decl) -> String {
        let mut segments = vec![self.simple_name(decl).to_string()];
        let mut current = self.parent_context(decl);
        while let Some(context) = current {
            let anonymous = match self.decl_kind(context) {
                DeclKind::TranslationUnit => break,
                DeclKind::Block => {
                    current = self.parent_context(context);
                    continue;
                }
                DeclKind::Namespace => "(anonymous namespace)",
                DeclKind::Record => "(anonymous struct)",
                DeclKind::Enum => "(anonymous enum)",
                DeclKind::Function => "",
            };
            let name = self
                .decl_name(context)
                .filter(|name| !name.is_empty())
                .unwrap_or(anonymous);
            segments.push(name.to_string());
            current = self.parent_context(context);
        }
        segments.reverse();
        segments.join("::")
    }
}

/// The declarations the dispatcher classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagDecl<D> {
    /// Class, struct or union.
    ClassLike(D),
    /// Enumeration.
    Enum(D),
}

impl<D: Copy> TagDecl<D> {
    /// Wraps a declaration if it is a record or an enum.
    pub fn from_decl<A>(ast: &A, decl: D) -> Option<Self>
    where
        A: AstContext<Decl = D> + ?Sized,
    {
        match ast.decl_kind(decl) {
            DeclKind::Record => Some(Self::ClassLike(decl)),
            DeclKind::Enum => Some(Self::Enum(decl)),
            _ => None,
        }
    }

    /// The wrapped declaration handle.
    #[must_use]
    pub fn decl(self) -> D {
        match self {
            Self::ClassLike(d) | Self::Enum(d) => d,
        }
    }
}

/// Presumed filename of the spelling position of `position`.
///
/// Returns `None` when the position is not stated in source text.
pub fn filename_of<S>(sm: &S, position: S::Position) -> Option<&str>
where
    S: SourceManager + ?Sized,
{
    sm.presumed_location(sm.spelling_position(position))
        .map(|loc| loc.filename)
}
