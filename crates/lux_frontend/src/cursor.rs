//! Cursor-side vocabulary: the declaration-shaped half of the adapter
//! surface.

/// Opaque handle into an adapter's internal cursor table. Never constructed
/// outside the owning adapter; callers only ever receive and pass these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorId(pub u32);

impl CursorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Front-end cursor kind, normalized to the kinds the Parser Core's
/// materialization pass switches on. `Unexposed` is the adapter's escape
/// hatch for anything the materializer must turn into
/// `Declaration::Unsupported`-equivalent handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Namespace,
    Record,
    Enum,
    EnumConstant,
    Field,
    Function,
    Method,
    Constructor,
    Destructor,
    ConversionFunction,
    ParmDecl,
    VarDecl,
    /// A `CXXBaseSpecifier`-equivalent child of a `Record` cursor. Its own
    /// `cursor_type` resolves to the base record's type; its
    /// `access_specifier` is the inheritance visibility.
    BaseSpecifier,
    Unexposed,
}

/// Record kind, queried separately from `CursorKind` because a front end
/// generally distinguishes `struct`/`class`/`union` only at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontRecordKind {
    Class,
    Struct,
    Union,
}

/// C++ access specifier in effect for a member declaration or base class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// Flags queried off a `Method`/`Constructor`/`Destructor`/`ConversionFunction`
/// cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodFlags {
    pub is_virtual: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_explicit: bool,
}

/// Controls how far `visit_children` recurses, mirroring libclang's
/// `CXChildVisitResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    /// Continue to the next sibling without descending into this cursor.
    Continue,
    /// Descend into this cursor's children before moving to the next sibling.
    Recurse,
    /// Stop the traversal entirely.
    Break,
}
