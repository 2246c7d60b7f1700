//! The owning container: two monotonically growing arenas (declarations,
//! types) plus the id maps that let `intern_*`/`find_*` work by stable
//! textual identifier.

use crate::decl::{DeclKind, Declaration};
use crate::error::{MetaError, Result};
use crate::ids::fnv1a;
use crate::refs::{DeclRef, TypeRef};
use crate::ty::{Type, TypeKind};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MetaUnit {
    name: String,
    version: String,
    id: u64,

    declarations: Vec<Declaration>,
    types: Vec<Type>,

    decl_by_id: HashMap<String, DeclRef>,
    type_by_id: HashMap<String, TypeRef>,

    /// Declarations that are origin-in-main-file and carry at least one
    /// annotation, in first-registered order.
    marked: Vec<DeclRef>,
}

impl MetaUnit {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        let id = fnv1a(&format!("{name}{version}"));
        Self {
            name,
            version,
            id,
            declarations: Vec::new(),
            types: Vec::new(),
            decl_by_id: HashMap::new(),
            type_by_id: HashMap::new(),
            marked: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Intern a declaration. If a node with the same `common.id` already
    /// exists, the new payload is discarded and the existing reference is
    /// returned (first wins).
    pub fn intern_decl(&mut self, decl: Declaration) -> DeclRef {
        if let Some(existing) = self.decl_by_id.get(&decl.common.id) {
            return *existing;
        }
        let is_marked_origin = decl.common.origin_in_main_file && decl.common.is_marked();
        let kind_label = decl.kind.label();
        let id = decl.common.id.clone();
        let ref_ = DeclRef(self.declarations.len() as u32);
        self.declarations.push(decl);
        self.decl_by_id.insert(id, ref_);
        if is_marked_origin {
            log::debug!("registering marked declaration ({kind_label})");
            self.marked.push(ref_);
        }
        ref_
    }

    /// Intern a type by canonical spelling. First wins, matching
    /// `get_or_create_type`.
    pub fn intern_type(&mut self, ty: Type) -> TypeRef {
        if let Some(existing) = self.type_by_id.get(&ty.common.id) {
            return *existing;
        }
        let id = ty.common.id.clone();
        let ref_ = TypeRef(self.types.len() as u32);
        self.types.push(ty);
        self.type_by_id.insert(id, ref_);
        ref_
    }

    /// Patch an already-interned declaration in place. Exists because
    /// materializing a self-referential record (`struct Node { Node* next; }`)
    /// requires reserving the record's `DeclRef` *before* its field list can
    /// be built — the field's type is a pointer back to the record itself.
    /// Callers reserve a stub (empty fields/bases/etc.), build the
    /// substructure that needs the reservation's `DeclRef`/`TypeRef`, then
    /// patch the reservation with the real payload. Only valid during
    /// construction, before `validate()` is called.
    pub fn patch_decl(&mut self, r: DeclRef, f: impl FnOnce(&mut Declaration)) {
        f(&mut self.declarations[r.index()]);
    }

    pub fn find_decl(&self, id: &str) -> Option<DeclRef> {
        self.decl_by_id.get(id).copied()
    }

    pub fn find_type(&self, id: &str) -> Option<TypeRef> {
        self.type_by_id.get(id).copied()
    }

    pub fn decl(&self, r: DeclRef) -> &Declaration {
        &self.declarations[r.index()]
    }

    pub fn ty(&self, r: TypeRef) -> &Type {
        &self.types[r.index()]
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn marked_records(&self) -> Vec<DeclRef> {
        self.marked_of(|k| matches!(k, DeclKind::RecordDecl(_)))
    }

    pub fn marked_functions(&self) -> Vec<DeclRef> {
        self.marked_of(|k| matches!(k, DeclKind::FunctionDecl(_)))
    }

    pub fn marked_enums(&self) -> Vec<DeclRef> {
        self.marked_of(|k| matches!(k, DeclKind::EnumDecl(_)))
    }

    fn marked_of(&self, pred: impl Fn(&DeclKind) -> bool) -> Vec<DeclRef> {
        self.marked
            .iter()
            .copied()
            .filter(|r| pred(&self.decl(*r).kind))
            .collect()
    }

    /// Validate invariant 2: every `Field.type`/`Parameter.type` and every
    /// `Pointer.pointee` resolves to a real node. Called after a full parse
    /// and after deserializing from JSON.
    pub fn validate(&self) -> Result<()> {
        for ty in &self.types {
            self.check_type_refs(ty)?;
        }
        for decl in &self.declarations {
            self.check_decl_refs(decl)?;
        }
        Ok(())
    }

    fn check_type_ref(&self, r: TypeRef) -> Result<()> {
        if r.index() >= self.types.len() {
            return Err(MetaError::InvariantViolation(format!(
                "dangling TypeRef({})",
                r.0
            )));
        }
        Ok(())
    }

    fn check_decl_ref(&self, r: DeclRef) -> Result<()> {
        if r.index() >= self.declarations.len() {
            return Err(MetaError::InvariantViolation(format!(
                "dangling DeclRef({})",
                r.0
            )));
        }
        Ok(())
    }

    fn check_type_refs(&self, ty: &Type) -> Result<()> {
        use crate::ty::PointerClassification as PC;
        match &ty.kind {
            TypeKind::BuiltinType | TypeKind::UnsupportedType => {}
            TypeKind::PointerType(p) => {
                self.check_type_ref(p.pointee)?;
                if let PC::ToDataMember { owner } | PC::ToMemberFunction { owner } =
                    &p.classification
                {
                    self.check_type_ref(*owner)?;
                }
            }
            TypeKind::LValueReferenceType { referred } | TypeKind::RValueReferenceType { referred } => {
                self.check_type_ref(*referred)?;
            }
            TypeKind::ArrayType(a) => self.check_type_ref(a.element)?,
            TypeKind::RecordType { declaration } => self.check_decl_ref(*declaration)?,
            TypeKind::EnumType(e) | TypeKind::ScopedEnumType(e) | TypeKind::UnscopedEnumType(e) => {
                self.check_decl_ref(e.declaration)?;
                self.check_type_ref(e.underlying)?;
                if !matches!(self.ty(e.underlying).kind, TypeKind::BuiltinType) {
                    return Err(MetaError::InvariantViolation(format!(
                        "enum underlying type {:?} is not Builtin",
                        e.underlying
                    )));
                }
            }
            TypeKind::FunctionType(f) => {
                self.check_type_ref(f.return_type)?;
                for p in &f.parameters {
                    self.check_type_ref(*p)?;
                }
            }
        }
        Ok(())
    }

    fn check_decl_refs(&self, decl: &Declaration) -> Result<()> {
        match &decl.kind {
            DeclKind::EnumDecl(e) => self.check_type_ref(e.underlying_type)?,
            DeclKind::RecordDecl(r) => {
                for base in &r.bases {
                    self.check_decl_ref(base.record)?;
                }
                for f in &r.fields {
                    self.check_decl_ref(*f)?;
                }
                for c in &r.constructors {
                    self.check_decl_ref(*c)?;
                }
                if let Some(d) = r.destructor {
                    self.check_decl_ref(d)?;
                }
                for m in r.methods.iter().chain(r.static_methods.iter()) {
                    self.check_decl_ref(*m)?;
                }
            }
            DeclKind::FieldDecl(f) => self.check_type_ref(f.field_type)?,
            DeclKind::FunctionDecl(c)
            | DeclKind::MethodDecl(c)
            | DeclKind::ConstructorDecl(c)
            | DeclKind::DestructorDecl(c)
            | DeclKind::ConversionDecl(c) => {
                self.check_type_ref(c.return_type)?;
                for p in &c.parameters {
                    self.check_decl_ref(*p)?;
                }
                if matches!(decl.kind, DeclKind::DestructorDecl(_)) && !c.parameters.is_empty() {
                    return Err(MetaError::InvariantViolation(
                        "destructor parameters must be empty".into(),
                    ));
                }
            }
            DeclKind::ParmVarDecl(p) => self.check_type_ref(p.param_type)?,
            DeclKind::VarDecl(v) => self.check_type_ref(v.var_type)?,
        }
        Ok(())
    }

    /// Build a fresh, empty Meta Unit with the same identity but no nodes.
    /// Used by the JSON loader, which re-establishes identity by re-interning.
    pub(crate) fn empty_like(name: &str, version: &str) -> Self {
        Self::new(name.to_string(), version.to_string())
    }
}
