//! In-memory translation unit implementing the host traits.
//!
//! Handles are indices into the unit's tables. A handle is only meaningful
//! for the unit (or builder) that created it.

use crate::context::{AstContext, DeclKind, PresumedLocation, SourceManager};

/// Handle to a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

/// Handle to a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionId(u32);

/// Handle to a declaration or declaration context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(u32);

macro_rules! id_index {
    ($($id:ident),*) => {$(
        impl $id {
            fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).unwrap_or(u32::MAX))
            }

            /// Table index of this handle.
            #[must_use]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    )*};
}

id_index!(FileId, PositionId, DeclId);

#[derive(Debug, Clone)]
struct SourceFile {
    name: String,
    presumed_name: Option<String>,
    system: bool,
}

#[derive(Debug, Clone, Copy)]
enum PositionEntry {
    File {
        file: FileId,
        line: u32,
        column: u32,
    },
    Macro {
        spelling: PositionId,
        expansion: PositionId,
    },
    Invalid,
}

#[derive(Debug, Clone)]
struct DeclEntry {
    kind: DeclKind,
    name: Option<String>,
    parent: Option<DeclId>,
    position: Option<PositionId>,
    bases: Vec<Option<DeclId>>,
}

/// A translation unit: files, positions and a declaration tree.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    files: Vec<SourceFile>,
    positions: Vec<PositionEntry>,
    decls: Vec<DeclEntry>,
}

impl TranslationUnit {
    /// The translation-unit root context.
    #[must_use]
    pub fn root(&self) -> DeclId {
        DeclId(0)
    }

    /// Number of declarations, the root included.
    #[must_use]
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Records and enums in declaration order.
    pub fn tag_decls(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.decls
            .iter()
            .enumerate()
            .filter(|(_, d)| matches!(d.kind, DeclKind::Record | DeclKind::Enum))
            .map(|(i, _)| DeclId::from_index(i))
    }

    /// Finds the first declaration with the given qualified name.
    #[must_use]
    pub fn find(&self, qualified_name: &str) -> Option<DeclId> {
        (1..self.decls.len())
            .map(DeclId::from_index)
            .find(|&id| self.qualified_name(id) == qualified_name)
    }

    fn decl(&self, id: DeclId) -> &DeclEntry {
        &self.decls[id.index()]
    }

    fn entry(&self, id: PositionId) -> PositionEntry {
        self.positions[id.index()]
    }

    /// Follows expansion links to the outermost file position.
    fn expansion_root(&self, mut position: PositionId) -> PositionId {
        while let PositionEntry::Macro { expansion, .. } = self.entry(position) {
            position = expansion;
        }
        position
    }
}

impl SourceManager for TranslationUnit {
    type Position = PositionId;

    fn spelling_position(&self, mut position: PositionId) -> PositionId {
        while let PositionEntry::Macro { spelling, .. } = self.entry(position) {
            position = spelling;
        }
        position
    }

    fn is_in_system_header(&self, position: PositionId) -> bool {
        match self.entry(self.expansion_root(position)) {
            PositionEntry::File { file, .. } => self.files[file.index()].system,
            _ => false,
        }
    }

    fn presumed_location(&self, position: PositionId) -> Option<PresumedLocation<'_>> {
        match self.entry(self.expansion_root(position)) {
            PositionEntry::File { file, line, column } => {
                let file = &self.files[file.index()];
                Some(PresumedLocation {
                    filename: file.presumed_name.as_deref().unwrap_or(&file.name),
                    line,
                    column,
                })
            }
            _ => None,
        }
    }

    fn immediate_expansion(&self, position: PositionId) -> Option<PositionId> {
        match self.entry(position) {
            PositionEntry::Macro { expansion, .. } => Some(expansion),
            _ => None,
        }
    }
}

impl AstContext for TranslationUnit {
    type Decl = DeclId;

    fn decl_kind(&self, decl: DeclId) -> DeclKind {
        self.decl(decl).kind
    }

    fn decl_name(&self, decl: DeclId) -> Option<&str> {
        self.decl(decl).name.as_deref()
    }

    fn parent_context(&self, decl: DeclId) -> Option<DeclId> {
        self.decl(decl).parent
    }

    fn decl_position(&self, decl: DeclId) -> Option<PositionId> {
        self.decl(decl).position
    }

    fn direct_bases(&self, record: DeclId) -> Vec<Option<DeclId>> {
        self.decl(record).bases.clone()
    }
}

/// Incrementally builds a [`TranslationUnit`].
///
/// Every handle passed in must have been returned by the same builder.
/// Parents and macro links can only refer to existing entries, so context
/// and expansion chains are acyclic. Base lists are unrestricted.
#[derive(Debug, Clone)]
pub struct TranslationUnitBuilder {
    tu: TranslationUnit,
}

impl Default for TranslationUnitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationUnitBuilder {
    /// Creates a builder holding only the translation-unit root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tu: TranslationUnit {
                files: Vec::new(),
                positions: Vec::new(),
                decls: vec![DeclEntry {
                    kind: DeclKind::TranslationUnit,
                    name: None,
                    parent: None,
                    position: None,
                    bases: Vec::new(),
                }],
            },
        }
    }

    /// The translation-unit root context.
    #[must_use]
    pub fn root(&self) -> DeclId {
        self.tu.root()
    }

    /// Adds a regular source file.
    pub fn file(&mut self, name: impl Into<String>) -> FileId {
        self.push_file(name.into(), false)
    }

    /// Adds a file found through a system include path.
    pub fn system_file(&mut self, name: impl Into<String>) -> FileId {
        self.push_file(name.into(), true)
    }

    /// Overrides the presumed name of `file`, as a `#line` directive does.
    pub fn line_directive(&mut self, file: FileId, presumed_name: impl Into<String>) {
        self.tu.files[file.index()].presumed_name = Some(presumed_name.into());
    }

    /// Adds a position inside a file.
    pub fn position(&mut self, file: FileId, line: u32, column: u32) -> PositionId {
        self.push_position(PositionEntry::File { file, line, column })
    }

    /// Adds a macro position spelled at `spelling`, expanded at `expansion`.
    pub fn macro_position(&mut self, spelling: PositionId, expansion: PositionId) -> PositionId {
        self.push_position(PositionEntry::Macro {
            spelling,
            expansion,
        })
    }

    /// Adds a position not stated in any source text.
    pub fn invalid_position(&mut self) -> PositionId {
        self.push_position(PositionEntry::Invalid)
    }

    /// Adds a namespace; `None` makes it anonymous.
    pub fn namespace(&mut self, parent: DeclId, name: Option<&str>) -> DeclId {
        self.push_decl(DeclKind::Namespace, parent, name, None)
    }

    /// Adds a class, struct or union. An empty name makes it anonymous.
    pub fn record(&mut self, parent: DeclId, name: &str, position: PositionId) -> DeclId {
        self.push_decl(DeclKind::Record, parent, non_empty(name), Some(position))
    }

    /// Adds an enumeration. An empty name makes it anonymous.
    pub fn enumeration(&mut self, parent: DeclId, name: &str, position: PositionId) -> DeclId {
        self.push_decl(DeclKind::Enum, parent, non_empty(name), Some(position))
    }

    /// Adds a function.
    pub fn function(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(DeclKind::Function, parent, non_empty(name), None)
    }

    /// Adds a block scope.
    pub fn block(&mut self, parent: DeclId) -> DeclId {
        self.push_decl(DeclKind::Block, parent, None, None)
    }

    /// Appends a direct base to `record`; `None` is an unresolved base.
    pub fn add_base(&mut self, record: DeclId, base: Option<DeclId>) {
        self.tu.decls[record.index()].bases.push(base);
    }

    /// Finishes the unit.
    #[must_use]
    pub fn build(self) -> TranslationUnit {
        self.tu
    }

    fn push_file(&mut self, name: String, system: bool) -> FileId {
        self.tu.files.push(SourceFile {
            name,
            presumed_name: None,
            system,
        });
        FileId::from_index(self.tu.files.len() - 1)
    }

    fn push_position(&mut self, entry: PositionEntry) -> PositionId {
        self.tu.positions.push(entry);
        PositionId::from_index(self.tu.positions.len() - 1)
    }

    fn push_decl(
        &mut self,
        kind: DeclKind,
        parent: DeclId,
        name: Option<&str>,
        position: Option<PositionId>,
    ) -> DeclId {
        self.tu.decls.push(DeclEntry {
            kind,
            name: name.map(str::to_string),
            parent: Some(parent),
            position,
            bases: Vec::new(),
        });
        DeclId::from_index(self.tu.decls.len() - 1)
    }
}

fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}
