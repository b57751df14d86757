//! Namespace resolution over the declaration-context chain.

use crate::context::{AstContext, DeclKind};
use serde::{Deserialize, Serialize};

/// Label reported for anonymous namespaces.
pub const ANONYMOUS_NAMESPACE: &str = "<anonymous namespace>";

/// Which namespace label checks receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceMode {
    /// Outermost enclosing namespace only (`content` for `content::internal::Foo`).
    #[default]
    Outermost,
    /// Every enclosing namespace joined with `::` (`content::internal`).
    Qualified,
}

/// Resolves the namespace label of a declaration according to `mode`.
pub fn namespace_of<A>(ast: &A, decl: A::Decl, mode: NamespaceMode) -> String
where
    A: AstContext + ?Sized,
{
    let Some(context) = ast.parent_context(decl) else {
        return String::new();
    };
    match mode {
        NamespaceMode::Outermost => resolve_namespace(ast, context),
        NamespaceMode::Qualified => qualified_namespace(ast, context),
    }
}

/// Walks from `context` to the root, returning the outermost namespace name.
///
/// Each namespace on the way replaces the candidate found so far; other
/// context kinds are passed through. Returns an empty string when no
/// namespace encloses `context`.
pub fn resolve_namespace<A>(ast: &A, context: A::Decl) -> String
where
    A: AstContext + ?Sized,
{
    let mut candidate = String::new();
    let mut current = Some(context);
    while let Some(ctx) = current {
        match ast.decl_kind(ctx) {
            DeclKind::TranslationUnit => break,
            DeclKind::Namespace => candidate = display_name(ast, ctx).to_string(),
            _ => {}
        }
        current = ast.parent_context(ctx);
    }
    candidate
}

/// Like [`resolve_namespace`], but keeps every enclosing namespace.
pub fn qualified_namespace<A>(ast: &A, context: A::Decl) -> String
where
    A: AstContext + ?Sized,
{
    let mut names = Vec::new();
    let mut current = Some(context);
    while let Some(ctx) = current {
        match ast.decl_kind(ctx) {
            DeclKind::TranslationUnit => break,
            DeclKind::Namespace => names.push(display_name(ast, ctx)),
            _ => {}
        }
        current = ast.parent_context(ctx);
    }
    names.reverse();
    names.join("::")
}

fn display_name<A>(ast: &A, namespace: A::Decl) -> &str
where
    A: AstContext + ?Sized,
{
    ast.decl_name(namespace).unwrap_or(ANONYMOUS_NAMESPACE)
}
