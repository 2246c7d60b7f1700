//! `AstAdapter`: the polymorphic facade over a libclang-like front end that
//! the Parser Core walks. A real binding is out of scope (see
//! `InMemoryAdapter`'s module doc); this trait is the seam a
//! `RealFrontEnd` would eventually implement.

use crate::cursor::{Access, CursorId, CursorKind, FrontRecordKind, MethodFlags, VisitResult};
use crate::error::Result;
use crate::types::{FrontTypeKind, TypeId};
use std::path::Path;

/// A successfully opened translation unit. Carries its own diagnostics so
/// the adapter need not keep per-TU state beyond what `AstAdapter` exposes.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub root: CursorId,
    pub diagnostics: Vec<String>,
}

/// A small polymorphic facade over the front-end AST exposing exactly what
/// the Parser Core needs. Every query is pure: it may return
/// an empty/`None` value but must never panic on a valid `CursorId`/`TypeId`
/// produced by the same adapter instance.
pub trait AstAdapter {
    fn open_translation_unit(
        &mut self,
        path: &Path,
        flags: &[String],
        extra_defs: &[String],
    ) -> Result<TranslationUnit>;

    fn visit_children(&self, cursor: CursorId, visitor: &mut dyn FnMut(CursorId) -> VisitResult);

    // --- cursor queries ---
    fn cursor_kind(&self, cursor: CursorId) -> CursorKind;
    fn spelling(&self, cursor: CursorId) -> &str;
    fn display_name(&self, cursor: CursorId) -> &str;
    fn semantic_parent(&self, cursor: CursorId) -> Option<CursorId>;
    fn source_file(&self, cursor: CursorId) -> Option<&str>;
    fn is_from_main_file(&self, cursor: CursorId) -> bool;
    /// Raw `annotate` attribute payloads attached directly to this cursor,
    /// unparsed (the Parser Core is responsible for marker-prefix matching
    /// and `;`-splitting).
    fn annotate_attributes(&self, cursor: CursorId) -> &[String];
    fn is_scoped_enum(&self, cursor: CursorId) -> bool;
    /// `(signed, unsigned)` interpretation of an `EnumConstant` cursor's value.
    fn enum_value(&self, cursor: CursorId) -> Option<(i64, u64)>;
    fn enum_integer_type(&self, cursor: CursorId) -> Option<TypeId>;
    fn cursor_type(&self, cursor: CursorId) -> Option<TypeId>;
    fn field_offset_bits(&self, cursor: CursorId) -> Option<u64>;
    fn method_flags(&self, cursor: CursorId) -> MethodFlags;
    fn parameter_index(&self, cursor: CursorId) -> Option<u32>;
    fn num_arguments(&self, cursor: CursorId) -> Option<u32>;
    fn mangled_name(&self, cursor: CursorId) -> Option<&str>;
    fn access_specifier(&self, cursor: CursorId) -> Access;
    fn record_kind(&self, cursor: CursorId) -> FrontRecordKind;

    // --- type queries ---
    fn type_kind(&self, ty: TypeId) -> FrontTypeKind;
    fn type_spelling(&self, ty: TypeId) -> &str;
    fn canonical_spelling(&self, ty: TypeId) -> &str;
    fn size_of(&self, ty: TypeId) -> Option<u64>;
    fn align_of(&self, ty: TypeId) -> Option<u64>;
    fn pointee(&self, ty: TypeId) -> Option<TypeId>;
    fn element(&self, ty: TypeId) -> Option<TypeId>;
    fn array_extent(&self, ty: TypeId) -> Option<u64>;
    fn return_type(&self, ty: TypeId) -> Option<TypeId>;
    fn argument_types(&self, ty: TypeId) -> &[TypeId];
    /// The owning class of a pointer-to-member type, `None` otherwise.
    fn class_of(&self, ty: TypeId) -> Option<TypeId>;
    fn is_const(&self, ty: TypeId) -> bool;
    fn is_volatile(&self, ty: TypeId) -> bool;
}
