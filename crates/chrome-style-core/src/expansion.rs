//! Walking macro-expansion chains.

use crate::context::SourceManager;

/// One step of an expansion chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionStep<P> {
    /// Position at this level.
    pub position: P,
    /// Whether `position` is itself the result of a macro expansion.
    pub is_macro: bool,
}

/// Iterator from a position outward through each enclosing macro expansion.
///
/// The first step is the starting position. Iteration ends after the first
/// step that is not a macro position.
#[derive(Debug)]
pub struct ExpansionChain<'a, S: SourceManager + ?Sized> {
    sm: &'a S,
    next: Option<S::Position>,
}

impl<'a, S: SourceManager + ?Sized> ExpansionChain<'a, S> {
    /// Starts a chain at `position`.
    pub fn new(sm: &'a S, position: S::Position) -> Self {
        Self {
            sm,
            next: Some(position),
        }
    }
}

impl<S: SourceManager + ?Sized> Iterator for ExpansionChain<'_, S> {
    type Item = ExpansionStep<S::Position>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.next.take()?;
        self.next = self.sm.immediate_expansion(position);
        Some(ExpansionStep {
            position,
            is_macro: self.next.is_some(),
        })
    }
}
