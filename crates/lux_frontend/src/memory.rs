//! `InMemoryAdapter`: a deterministic, hand-buildable translation-unit model.
//!
//! The real front end (a libclang-like parser) is explicitly out of scope.
//! This is the only concrete `AstAdapter` this crate ships —
//! used by `lux_parser`'s test suite, and by any embedder that already has
//! a declaration/type tree from another source (e.g. a build-system plugin
//! that parsed C++ upstream). Production wiring of a real binding would be
//! a `RealFrontEnd` behind a feature flag, not implemented here.

use crate::adapter::{AstAdapter, TranslationUnit};
use crate::cursor::{Access, CursorId, CursorKind, FrontRecordKind, MethodFlags, VisitResult};
use crate::error::Result;
use crate::types::{FrontTypeKind, TypeId};
use std::path::Path;

#[derive(Debug, Clone, Default)]
struct CursorData {
    kind: CursorKind,
    spelling: String,
    display_name: String,
    parent: Option<CursorId>,
    children: Vec<CursorId>,
    source_file: Option<String>,
    from_main_file: bool,
    annotations: Vec<String>,
    is_scoped_enum: bool,
    enum_value: Option<(i64, u64)>,
    enum_integer_type: Option<TypeId>,
    cursor_type: Option<TypeId>,
    field_offset_bits: Option<u64>,
    method_flags: MethodFlags,
    parameter_index: Option<u32>,
    num_arguments: Option<u32>,
    mangled_name: Option<String>,
    access: Access,
    record_kind: FrontRecordKind,
}

impl Default for FrontRecordKind {
    fn default() -> Self {
        FrontRecordKind::Struct
    }
}

impl Default for Access {
    fn default() -> Self {
        Access::Public
    }
}

impl Default for CursorKind {
    fn default() -> Self {
        CursorKind::Unexposed
    }
}

#[derive(Debug, Clone)]
struct TypeData {
    kind: FrontTypeKind,
    spelling: String,
    canonical_spelling: String,
    size: Option<u64>,
    align: Option<u64>,
    pointee: Option<TypeId>,
    element: Option<TypeId>,
    extent: Option<u64>,
    return_type: Option<TypeId>,
    arguments: Vec<TypeId>,
    class_of: Option<TypeId>,
    is_const: bool,
    is_volatile: bool,
}

/// Hand-buildable fixture: an owner builds a tree of cursors/types with
/// `add_*` calls, then hands the resulting `InMemoryAdapter` to `lux_parser`
/// exactly as if a real front end had produced it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapter {
    cursors: Vec<CursorData>,
    types: Vec<TypeData>,
    diagnostics: Vec<String>,
    fail_open: Option<String>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        let mut adapter = Self::default();
        adapter.cursors.push(CursorData {
            kind: CursorKind::Namespace,
            spelling: String::new(),
            display_name: "<translation-unit>".to_string(),
            ..Default::default()
        });
        adapter
    }

    pub fn root(&self) -> CursorId {
        CursorId(0)
    }

    fn push_cursor(&mut self, parent: CursorId, data: CursorData) -> CursorId {
        let id = CursorId(self.cursors.len() as u32);
        self.cursors.push(data);
        self.cursors[parent.index()].children.push(id);
        id
    }

    /// Add a bare declaration cursor (covers `Field`/`ParmDecl`/`VarDecl`/
    /// `EnumConstant`, whose shape is a flat set of scalar attributes).
    #[allow(clippy::too_many_arguments)]
    pub fn add_cursor(
        &mut self,
        parent: CursorId,
        kind: CursorKind,
        name: &str,
        main_file: bool,
        annotations: Vec<String>,
    ) -> CursorId {
        let data = CursorData {
            kind,
            spelling: name.to_string(),
            display_name: name.to_string(),
            parent: Some(parent),
            from_main_file: main_file,
            annotations,
            ..Default::default()
        };
        self.push_cursor(parent, data)
    }

    pub fn set_cursor_type(&mut self, cursor: CursorId, ty: TypeId) {
        self.cursors[cursor.index()].cursor_type = Some(ty);
    }

    pub fn set_field_offset_bits(&mut self, cursor: CursorId, bits: u64) {
        self.cursors[cursor.index()].field_offset_bits = Some(bits);
    }

    pub fn set_parameter_index(&mut self, cursor: CursorId, index: u32) {
        self.cursors[cursor.index()].parameter_index = Some(index);
    }

    pub fn set_method_flags(&mut self, cursor: CursorId, flags: MethodFlags) {
        self.cursors[cursor.index()].method_flags = flags;
    }

    pub fn set_num_arguments(&mut self, cursor: CursorId, n: u32) {
        self.cursors[cursor.index()].num_arguments = Some(n);
    }

    pub fn set_mangled_name(&mut self, cursor: CursorId, mangled: &str) {
        self.cursors[cursor.index()].mangled_name = Some(mangled.to_string());
    }

    pub fn set_access(&mut self, cursor: CursorId, access: Access) {
        self.cursors[cursor.index()].access = access;
    }

    pub fn set_record_kind(&mut self, cursor: CursorId, kind: FrontRecordKind) {
        self.cursors[cursor.index()].record_kind = kind;
    }

    pub fn set_scoped_enum(&mut self, cursor: CursorId, scoped: bool) {
        self.cursors[cursor.index()].is_scoped_enum = scoped;
    }

    pub fn set_enum_value(&mut self, cursor: CursorId, signed: i64, unsigned: u64) {
        self.cursors[cursor.index()].enum_value = Some((signed, unsigned));
    }

    pub fn set_enum_integer_type(&mut self, cursor: CursorId, ty: TypeId) {
        self.cursors[cursor.index()].enum_integer_type = Some(ty);
    }

    pub fn push_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    /// Make the next `open_translation_unit` call fail with `FrontEndError::OpenFailed`.
    pub fn fail_next_open(&mut self, reason: impl Into<String>) {
        self.fail_open = Some(reason.into());
    }

    pub fn add_builtin_type(&mut self, spelling: &str, size: u64, align: u64) -> TypeId {
        self.push_type(TypeData {
            kind: FrontTypeKind::Builtin,
            spelling: spelling.to_string(),
            canonical_spelling: spelling.to_string(),
            size: Some(size),
            align: Some(align),
            pointee: None,
            element: None,
            extent: None,
            return_type: None,
            arguments: Vec::new(),
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_pointer_type(&mut self, pointee: TypeId, class_of: Option<TypeId>) -> TypeId {
        let spelling = format!("{} *", self.types[pointee.index()].spelling);
        self.push_type(TypeData {
            kind: FrontTypeKind::Pointer,
            canonical_spelling: spelling.clone(),
            spelling,
            size: Some(8),
            align: Some(8),
            pointee: Some(pointee),
            element: None,
            extent: None,
            return_type: None,
            arguments: Vec::new(),
            class_of,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_reference_type(&mut self, referred: TypeId, rvalue: bool) -> TypeId {
        let spelling = format!("{}{}", self.types[referred.index()].spelling, if rvalue { " &&" } else { " &" });
        self.push_type(TypeData {
            kind: if rvalue {
                FrontTypeKind::RValueReference
            } else {
                FrontTypeKind::LValueReference
            },
            canonical_spelling: spelling.clone(),
            spelling,
            size: Some(8),
            align: Some(8),
            pointee: Some(referred),
            element: None,
            extent: None,
            return_type: None,
            arguments: Vec::new(),
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_array_type(&mut self, element: TypeId, extent: Option<u64>) -> TypeId {
        let elem_size = self.types[element.index()].size.unwrap_or(0);
        let spelling = match extent {
            Some(n) => format!("{}[{}]", self.types[element.index()].spelling, n),
            None => format!("{}[]", self.types[element.index()].spelling),
        };
        self.push_type(TypeData {
            kind: FrontTypeKind::Array,
            canonical_spelling: spelling.clone(),
            spelling,
            size: extent.map(|n| n * elem_size),
            align: self.types[element.index()].align,
            pointee: None,
            element: Some(element),
            extent,
            return_type: None,
            arguments: Vec::new(),
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_record_type(&mut self, spelling: &str, size: u64, align: u64) -> TypeId {
        self.push_type(TypeData {
            kind: FrontTypeKind::Record,
            spelling: spelling.to_string(),
            canonical_spelling: spelling.to_string(),
            size: Some(size),
            align: Some(align),
            pointee: None,
            element: None,
            extent: None,
            return_type: None,
            arguments: Vec::new(),
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_enum_type(&mut self, spelling: &str, kind: FrontTypeKind, size: u64, align: u64) -> TypeId {
        self.push_type(TypeData {
            kind,
            spelling: spelling.to_string(),
            canonical_spelling: spelling.to_string(),
            size: Some(size),
            align: Some(align),
            pointee: None,
            element: None,
            extent: None,
            return_type: None,
            arguments: Vec::new(),
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    pub fn add_function_type(&mut self, return_type: TypeId, arguments: Vec<TypeId>) -> TypeId {
        let spelling = format!(
            "{}({})",
            self.types[return_type.index()].spelling,
            arguments
                .iter()
                .map(|a| self.types[a.index()].spelling.clone())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.push_type(TypeData {
            kind: FrontTypeKind::Function,
            canonical_spelling: spelling.clone(),
            spelling,
            size: None,
            align: None,
            pointee: None,
            element: None,
            extent: None,
            return_type: Some(return_type),
            arguments,
            class_of: None,
            is_const: false,
            is_volatile: false,
        })
    }

    fn push_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }
}

impl AstAdapter for InMemoryAdapter {
    fn open_translation_unit(
        &mut self,
        path: &Path,
        _flags: &[String],
        _extra_defs: &[String],
    ) -> Result<TranslationUnit> {
        if let Some(reason) = self.fail_open.take() {
            return Err(crate::error::FrontEndError::OpenFailed {
                path: path.display().to_string(),
                reason,
            });
        }
        Ok(TranslationUnit {
            root: self.root(),
            diagnostics: self.diagnostics.clone(),
        })
    }

    fn visit_children(&self, cursor: CursorId, visitor: &mut dyn FnMut(CursorId) -> VisitResult) {
        for &child in &self.cursors[cursor.index()].children {
            match visitor(child) {
                VisitResult::Continue => {}
                VisitResult::Recurse => self.visit_children(child, visitor),
                VisitResult::Break => break,
            }
        }
    }

    fn cursor_kind(&self, cursor: CursorId) -> CursorKind {
        self.cursors[cursor.index()].kind
    }

    fn spelling(&self, cursor: CursorId) -> &str {
        &self.cursors[cursor.index()].spelling
    }

    fn display_name(&self, cursor: CursorId) -> &str {
        &self.cursors[cursor.index()].display_name
    }

    fn semantic_parent(&self, cursor: CursorId) -> Option<CursorId> {
        self.cursors[cursor.index()].parent
    }

    fn source_file(&self, cursor: CursorId) -> Option<&str> {
        self.cursors[cursor.index()].source_file.as_deref()
    }

    fn is_from_main_file(&self, cursor: CursorId) -> bool {
        self.cursors[cursor.index()].from_main_file
    }

    fn annotate_attributes(&self, cursor: CursorId) -> &[String] {
        &self.cursors[cursor.index()].annotations
    }

    fn is_scoped_enum(&self, cursor: CursorId) -> bool {
        self.cursors[cursor.index()].is_scoped_enum
    }

    fn enum_value(&self, cursor: CursorId) -> Option<(i64, u64)> {
        self.cursors[cursor.index()].enum_value
    }

    fn enum_integer_type(&self, cursor: CursorId) -> Option<TypeId> {
        self.cursors[cursor.index()].enum_integer_type
    }

    fn cursor_type(&self, cursor: CursorId) -> Option<TypeId> {
        self.cursors[cursor.index()].cursor_type
    }

    fn field_offset_bits(&self, cursor: CursorId) -> Option<u64> {
        self.cursors[cursor.index()].field_offset_bits
    }

    fn method_flags(&self, cursor: CursorId) -> MethodFlags {
        self.cursors[cursor.index()].method_flags
    }

    fn parameter_index(&self, cursor: CursorId) -> Option<u32> {
        self.cursors[cursor.index()].parameter_index
    }

    fn num_arguments(&self, cursor: CursorId) -> Option<u32> {
        self.cursors[cursor.index()].num_arguments
    }

    fn mangled_name(&self, cursor: CursorId) -> Option<&str> {
        self.cursors[cursor.index()].mangled_name.as_deref()
    }

    fn access_specifier(&self, cursor: CursorId) -> Access {
        self.cursors[cursor.index()].access
    }

    fn record_kind(&self, cursor: CursorId) -> FrontRecordKind {
        self.cursors[cursor.index()].record_kind
    }

    fn type_kind(&self, ty: TypeId) -> FrontTypeKind {
        self.types[ty.index()].kind
    }

    fn type_spelling(&self, ty: TypeId) -> &str {
        &self.types[ty.index()].spelling
    }

    fn canonical_spelling(&self, ty: TypeId) -> &str {
        &self.types[ty.index()].canonical_spelling
    }

    fn size_of(&self, ty: TypeId) -> Option<u64> {
        self.types[ty.index()].size
    }

    fn align_of(&self, ty: TypeId) -> Option<u64> {
        self.types[ty.index()].align
    }

    fn pointee(&self, ty: TypeId) -> Option<TypeId> {
        self.types[ty.index()].pointee
    }

    fn element(&self, ty: TypeId) -> Option<TypeId> {
        self.types[ty.index()].element
    }

    fn array_extent(&self, ty: TypeId) -> Option<u64> {
        self.types[ty.index()].extent
    }

    fn return_type(&self, ty: TypeId) -> Option<TypeId> {
        self.types[ty.index()].return_type
    }

    fn argument_types(&self, ty: TypeId) -> &[TypeId] {
        &self.types[ty.index()].arguments
    }

    fn class_of(&self, ty: TypeId) -> Option<TypeId> {
        self.types[ty.index()].class_of
    }

    fn is_const(&self, ty: TypeId) -> bool {
        self.types[ty.index()].is_const
    }

    fn is_volatile(&self, ty: TypeId) -> bool {
        self.types[ty.index()].is_volatile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_record_with_two_fields() {
        let mut adapter = InMemoryAdapter::new();
        let root = adapter.root();
        let int_ty = adapter.add_builtin_type("int", 4, 4);
        let double_ty = adapter.add_builtin_type("double", 8, 8);

        let record = adapter.add_cursor(root, CursorKind::Record, "S", true, vec!["".to_string()]);
        let a = adapter.add_cursor(record, CursorKind::Field, "a", true, vec![]);
        adapter.set_cursor_type(a, int_ty);
        adapter.set_field_offset_bits(a, 0);
        let b = adapter.add_cursor(record, CursorKind::Field, "b", true, vec![]);
        adapter.set_cursor_type(b, double_ty);
        adapter.set_field_offset_bits(b, 64);

        let mut seen = Vec::new();
        adapter.visit_children(root, &mut |c| {
            seen.push(c);
            VisitResult::Continue
        });
        assert_eq!(seen, vec![record]);

        let mut field_names = Vec::new();
        adapter.visit_children(record, &mut |c| {
            field_names.push(adapter.spelling(c).to_string());
            VisitResult::Continue
        });
        assert_eq!(field_names, vec!["a", "b"]);
    }
}
