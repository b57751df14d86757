//! Detecting declarations written in implementation files.

use crate::context::{filename_of, SourceManager};
use crate::expansion::ExpansionChain;

/// Suffixes of C++ and Objective-C++ translation units.
pub const IMPLEMENTATION_SUFFIXES: &[&str] = &[".cc", ".cpp", ".mm"];

/// Returns true if `filename` names an implementation file.
#[must_use]
pub fn is_implementation_filename(filename: &str) -> bool {
    IMPLEMENTATION_SUFFIXES
        .iter()
        .any(|suffix| filename.ends_with(suffix))
}

/// Returns true if `position`, or any macro use site enclosing it, was
/// written in an implementation file.
///
/// A declaration spelled inside a header macro still counts as written by
/// the `.cc` file that expanded the macro.
pub fn in_implementation_file<S>(sm: &S, position: S::Position) -> bool
where
    S: SourceManager + ?Sized,
{
    ExpansionChain::new(sm, position).any(|step| {
        filename_of(sm, step.position).is_some_and(is_implementation_filename)
    })
}
