//! DTO → model conversion with validation.

use super::dto::{DeclDto, PositionDto, TranslationUnitDto};
use super::model::{DeclId, PositionId, TranslationUnit, TranslationUnitBuilder};

/// Errors during DTO → model conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A position refers to a file that does not exist.
    #[error("positions[{position}]: unknown file index {file}")]
    UnknownFile {
        /// Index of the offending position.
        position: usize,
        /// The out-of-range file index.
        file: usize,
    },

    /// A reference to a position that does not exist.
    #[error("{context}: unknown position index {index}")]
    UnknownPosition {
        /// Where the reference occurred (e.g., "decls[2].position").
        context: String,
        /// The out-of-range index.
        index: usize,
    },

    /// A reference to a declaration that does not exist.
    #[error("{context}: unknown declaration index {index}")]
    UnknownDecl {
        /// Where the reference occurred (e.g., "decls[2].bases[0]").
        context: String,
        /// The out-of-range index.
        index: usize,
    },

    /// A parent or macro link that does not point to an earlier entry.
    #[error("{context}: index {index} must refer to an earlier entry")]
    ForwardReference {
        /// Where the reference occurred.
        context: String,
        /// The offending index.
        index: usize,
    },
}

/// Converts a `TranslationUnitDto` to a validated `TranslationUnit`.
///
/// # Errors
///
/// Returns the first dangling or forward reference encountered.
pub fn load(dto: &TranslationUnitDto) -> Result<TranslationUnit, LoadError> {
    let mut builder = TranslationUnitBuilder::new();

    let files: Vec<_> = dto
        .files
        .iter()
        .map(|f| {
            let id = if f.system {
                builder.system_file(&f.name)
            } else {
                builder.file(&f.name)
            };
            if let Some(presumed) = &f.presumed_name {
                builder.line_directive(id, presumed);
            }
            id
        })
        .collect();

    let mut positions: Vec<PositionId> = Vec::with_capacity(dto.positions.len());
    for (i, entry) in dto.positions.iter().enumerate() {
        let id = match *entry {
            PositionDto::File { file, line, column } => {
                let file = *files
                    .get(file)
                    .ok_or(LoadError::UnknownFile { position: i, file })?;
                builder.position(file, line, column)
            }
            PositionDto::Macro {
                spelling,
                expansion,
            } => {
                let spelling = earlier(&positions, spelling, dto.positions.len(), || {
                    format!("positions[{i}].spelling")
                })?;
                let expansion = earlier(&positions, expansion, dto.positions.len(), || {
                    format!("positions[{i}].expansion")
                })?;
                builder.macro_position(spelling, expansion)
            }
            PositionDto::Invalid => builder.invalid_position(),
        };
        positions.push(id);
    }

    let position_at = |index: usize, context: String| {
        positions
            .get(index)
            .copied()
            .ok_or(LoadError::UnknownPosition { context, index })
    };

    let mut decls: Vec<DeclId> = Vec::with_capacity(dto.decls.len());
    for (i, entry) in dto.decls.iter().enumerate() {
        let parent = match entry.parent() {
            Some(index) => {
                if index >= dto.decls.len() {
                    return Err(LoadError::UnknownDecl {
                        context: format!("decls[{i}].parent"),
                        index,
                    });
                }
                earlier(&decls, index, dto.decls.len(), || format!("decls[{i}].parent"))?
            }
            None => builder.root(),
        };

        let id = match entry {
            DeclDto::Namespace { name, .. } => builder.namespace(parent, name.as_deref()),
            DeclDto::Record { name, position, .. } => {
                let position = position_at(*position, format!("decls[{i}].position"))?;
                builder.record(parent, name, position)
            }
            DeclDto::Enum { name, position, .. } => {
                let position = position_at(*position, format!("decls[{i}].position"))?;
                builder.enumeration(parent, name, position)
            }
            DeclDto::Function { name, .. } => builder.function(parent, name),
            DeclDto::Block { .. } => builder.block(parent),
        };
        decls.push(id);
    }

    // Bases may point anywhere, so they are wired after every declaration exists.
    for (i, entry) in dto.decls.iter().enumerate() {
        let DeclDto::Record { bases, .. } = entry else {
            continue;
        };
        for (j, base) in bases.iter().enumerate() {
            let resolved = match *base {
                Some(index) => Some(*decls.get(index).ok_or_else(|| LoadError::UnknownDecl {
                    context: format!("decls[{i}].bases[{j}]"),
                    index,
                })?),
                None => None,
            };
            builder.add_base(decls[i], resolved);
        }
    }

    Ok(builder.build())
}

/// Looks up an already-converted entry, distinguishing dangling from forward
/// references.
fn earlier<T: Copy>(
    converted: &[T],
    index: usize,
    total: usize,
    context: impl FnOnce() -> String,
) -> Result<T, LoadError> {
    if let Some(id) = converted.get(index) {
        return Ok(*id);
    }
    let context = context();
    if index < total {
        Err(LoadError::ForwardReference { context, index })
    } else {
        Err(LoadError::UnknownPosition { context, index })
    }
}
