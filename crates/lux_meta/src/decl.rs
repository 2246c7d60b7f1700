//! The declaration graph: one tagged `Declaration` per discovered entity,
//! with a `DeclCommon` header shared by every kind. Modeled as a
//! struct-of-(header, kind-enum) rather than an inheritance hierarchy:
//! every
//! consumer that only needs name/qualified-name/annotations/origin can read
//! `common` without matching on `kind`.

use crate::refs::{DeclRef, TypeRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Class,
    Struct,
    Union,
}

/// Header carried by every declaration, regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclCommon {
    /// USR-like stable textual identifier; unique within a Meta Unit.
    pub id: String,
    pub name: String,
    pub qualified_name: String,
    /// True if this declaration originated in the primary translation unit
    /// rather than one of its includes.
    pub origin_in_main_file: bool,
    pub annotations: Vec<String>,
}

impl DeclCommon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            qualified_name: qualified_name.into(),
            origin_in_main_file: false,
            annotations: Vec::new(),
        }
    }

    /// A declaration is "marked" iff it carries at least one recognized
    /// annotation.
    pub fn is_marked(&self) -> bool {
        !self.annotations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub signed_value: i64,
    pub unsigned_value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub underlying_type: TypeRef,
    pub is_scoped: bool,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub record: DeclRef,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub kind: RecordKind,
    pub size: u64,
    pub align: u64,
    pub bases: Vec<BaseRecord>,
    /// `FieldDecl` references, in declared (source) order.
    pub fields: Vec<DeclRef>,
    /// `ConstructorDecl` references.
    pub constructors: Vec<DeclRef>,
    /// `DestructorDecl` reference, if the record has one.
    pub destructor: Option<DeclRef>,
    /// `MethodDecl` references.
    pub methods: Vec<DeclRef>,
    /// `MethodDecl` references flagged static.
    pub static_methods: Vec<DeclRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub index: u32,
    pub offset_bytes: u64,
    pub field_type: TypeRef,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_const: bool,
}

/// Shared shape for `Function`/`Method`/`Constructor`/`Destructor`/
/// `ConversionOperator`: name, mangled name, qualified name, return type,
/// ordered parameter list, const-qualifier flag, virtual flag, static flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableDecl {
    pub mangled_name: Option<String>,
    pub return_type: TypeRef,
    /// `ParameterDecl` references, in declared order.
    pub parameters: Vec<DeclRef>,
    pub is_const: bool,
    pub is_virtual: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub index: u32,
    pub param_type: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub var_type: TypeRef,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DeclKind {
    EnumDecl(EnumDecl),
    RecordDecl(RecordDecl),
    FieldDecl(FieldDecl),
    FunctionDecl(CallableDecl),
    MethodDecl(CallableDecl),
    ConstructorDecl(CallableDecl),
    DestructorDecl(CallableDecl),
    ConversionDecl(CallableDecl),
    ParmVarDecl(ParameterDecl),
    VarDecl(VariableDecl),
}

impl DeclKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeclKind::EnumDecl(_) => "EnumDecl",
            DeclKind::RecordDecl(_) => "RecordDecl",
            DeclKind::FieldDecl(_) => "FieldDecl",
            DeclKind::FunctionDecl(_) => "FunctionDecl",
            DeclKind::MethodDecl(_) => "MethodDecl",
            DeclKind::ConstructorDecl(_) => "ConstructorDecl",
            DeclKind::DestructorDecl(_) => "DestructorDecl",
            DeclKind::ConversionDecl(_) => "ConversionDecl",
            DeclKind::ParmVarDecl(_) => "ParmVarDecl",
            DeclKind::VarDecl(_) => "VarDecl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub common: DeclCommon,
    pub kind: DeclKind,
}

impl Declaration {
    pub fn new(common: DeclCommon, kind: DeclKind) -> Self {
        Self { common, kind }
    }

    pub fn as_record(&self) -> Option<&RecordDecl> {
        match &self.kind {
            DeclKind::RecordDecl(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match &self.kind {
            DeclKind::EnumDecl(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match &self.kind {
            DeclKind::FieldDecl(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterDecl> {
        match &self.kind {
            DeclKind::ParmVarDecl(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&CallableDecl> {
        match &self.kind {
            DeclKind::FunctionDecl(c)
            | DeclKind::MethodDecl(c)
            | DeclKind::ConstructorDecl(c)
            | DeclKind::DestructorDecl(c)
            | DeclKind::ConversionDecl(c) => Some(c),
            _ => None,
        }
    }
}
