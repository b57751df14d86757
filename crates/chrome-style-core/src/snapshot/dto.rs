//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to a [`TranslationUnit`](super::TranslationUnit) by the loader.
//! All references are indices into the sibling arrays.

use serde::{Deserialize, Serialize};

/// Raw JSON representation of a translation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationUnitDto {
    /// Source files.
    #[serde(default)]
    pub files: Vec<FileDto>,
    /// Source positions.
    #[serde(default)]
    pub positions: Vec<PositionDto>,
    /// Declarations, excluding the implicit translation-unit root.
    #[serde(default)]
    pub decls: Vec<DeclDto>,
}

/// JSON representation of a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDto {
    /// File name as given to the compiler.
    pub name: String,
    /// Whether the file was found through a system include path.
    #[serde(default)]
    pub system: bool,
    /// Name set by a `#line` directive.
    #[serde(default)]
    pub presumed_name: Option<String>,
}

/// JSON representation of a source position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionDto {
    /// A position inside a file.
    File {
        /// Index into `files`.
        file: usize,
        /// 1-indexed line.
        line: u32,
        /// 1-indexed column.
        #[serde(default = "default_column")]
        column: u32,
    },
    /// A position produced by a macro expansion.
    Macro {
        /// Earlier index into `positions` where the text is spelled.
        spelling: usize,
        /// Earlier index into `positions` of the enclosing expansion.
        expansion: usize,
    },
    /// A position not stated in any source text.
    Invalid,
}

/// JSON representation of a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclDto {
    /// A namespace; no name means anonymous.
    Namespace {
        /// Declared name.
        #[serde(default)]
        name: Option<String>,
        /// Earlier index into `decls`; absent for the translation unit.
        #[serde(default)]
        parent: Option<usize>,
    },
    /// A class, struct or union.
    Record {
        /// Declared name; empty for anonymous records.
        #[serde(default)]
        name: String,
        /// Earlier index into `decls`; absent for the translation unit.
        #[serde(default)]
        parent: Option<usize>,
        /// Index into `positions`.
        position: usize,
        /// Indices into `decls`; `null` marks an unresolved base.
        #[serde(default)]
        bases: Vec<Option<usize>>,
    },
    /// An enumeration.
    Enum {
        /// Declared name; empty for anonymous enums.
        #[serde(default)]
        name: String,
        /// Earlier index into `decls`; absent for the translation unit.
        #[serde(default)]
        parent: Option<usize>,
        /// Index into `positions`.
        position: usize,
    },
    /// A function or method.
    Function {
        /// Declared name.
        name: String,
        /// Earlier index into `decls`; absent for the translation unit.
        #[serde(default)]
        parent: Option<usize>,
    },
    /// A block scope.
    Block {
        /// Earlier index into `decls`; absent for the translation unit.
        #[serde(default)]
        parent: Option<usize>,
    },
}

impl DeclDto {
    /// Parent index, if any.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        match self {
            Self::Namespace { parent, .. }
            | Self::Record { parent, .. }
            | Self::Enum { parent, .. }
            | Self::Function { parent, .. }
            | Self::Block { parent } => *parent,
        }
    }
}

fn default_column() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: TranslationUnitDto = serde_json::from_str("{}").unwrap();
        assert!(dto.files.is_empty());
        assert!(dto.positions.is_empty());
        assert!(dto.decls.is_empty());
    }

    #[test]
    fn deserialize_full_unit() {
        let json = r#"{
            "files": [
                {"name": "base/macros.h"},
                {"name": "/usr/include/string", "system": true},
                {"name": "chrome/foo.cc", "presumed_name": "chrome/foo.y"}
            ],
            "positions": [
                {"kind": "file", "file": 2, "line": 10, "column": 3},
                {"kind": "file", "file": 0, "line": 4},
                {"kind": "macro", "spelling": 1, "expansion": 0},
                {"kind": "invalid"}
            ],
            "decls": [
                {"kind": "namespace", "name": "content"},
                {"kind": "namespace", "parent": 0},
                {"kind": "record", "name": "Foo", "parent": 1, "position": 2, "bases": [null, 3]},
                {"kind": "record", "name": "Base", "parent": 0, "position": 0},
                {"kind": "enum", "name": "Color", "parent": 0, "position": 0},
                {"kind": "function", "name": "Run", "parent": 3},
                {"kind": "block", "parent": 5}
            ]
        }"#;
        let dto: TranslationUnitDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.files.len(), 3);
        assert!(dto.files[1].system);
        assert_eq!(dto.files[2].presumed_name.as_deref(), Some("chrome/foo.y"));
        assert!(matches!(dto.positions[1], PositionDto::File { column: 1, .. }));
        assert!(matches!(
            dto.positions[2],
            PositionDto::Macro {
                spelling: 1,
                expansion: 0
            }
        ));
        assert!(matches!(dto.positions[3], PositionDto::Invalid));
        assert_eq!(dto.decls.len(), 7);
        assert_eq!(dto.decls[0].parent(), None);
        assert_eq!(dto.decls[6].parent(), Some(5));
        match &dto.decls[2] {
            DeclDto::Record { bases, .. } => assert_eq!(bases, &vec![None, Some(3)]),
            other => panic!("unexpected decl: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{"decls": [{"kind": "typedef", "name": "T"}]}"#;
        assert!(serde_json::from_str::<TranslationUnitDto>(json).is_err());
    }
}
