//! Type-side vocabulary: the query surface the Parser Core's type interner
//! walks to recursively materialize a type's substructure.

/// Opaque handle into an adapter's internal type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Front-end type kind, normalized to the shapes `lux_meta::TypeKind` can
/// represent. The Parser Core further classifies `Pointer` into the four
/// sub-kinds (`ToObject`/`ToFunction`/`ToDataMember`/`ToMemberFunction`)
/// by consulting `AstAdapter::class_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontTypeKind {
    Builtin,
    Pointer,
    LValueReference,
    RValueReference,
    Array,
    Record,
    Enum,
    ScopedEnum,
    UnscopedEnum,
    Function,
    Unsupported,
}
