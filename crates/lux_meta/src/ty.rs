//! The type graph: one tagged `Type` per interned canonical spelling, with a
//! `TypeCommon` header shared by every kind.

use crate::refs::{DeclRef, TypeRef};
use serde::{Deserialize, Serialize};

/// How a `Pointer` type is further classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerClassification {
    /// Ordinary object pointer; classification could not be narrowed further.
    Plain,
    ToObject,
    ToFunction,
    ToDataMember { owner: TypeRef },
    ToMemberFunction { owner: TypeRef },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerType {
    pub pointee: TypeRef,
    pub classification: PointerClassification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: TypeRef,
    /// `None` for an incomplete/unbounded array (`T[]`).
    pub extent: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionType {
    pub return_type: TypeRef,
    pub parameters: Vec<TypeRef>,
    pub is_variadic: bool,
    pub is_noexcept: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub declaration: DeclRef,
    pub underlying: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeKind {
    BuiltinType,
    PointerType(PointerType),
    LValueReferenceType { referred: TypeRef },
    RValueReferenceType { referred: TypeRef },
    ArrayType(ArrayType),
    RecordType { declaration: DeclRef },
    EnumType(EnumType),
    ScopedEnumType(EnumType),
    UnscopedEnumType(EnumType),
    FunctionType(FunctionType),
    /// Spelling-only fallback for a construct the materializer cannot
    /// represent.
    UnsupportedType,
}

impl TypeKind {
    /// The JSON `kind` discriminant string, matching §6's schema exactly
    /// (including the pointer sub-classification collapsing to one of four
    /// distinct wire kinds).
    pub fn wire_kind(&self) -> &'static str {
        match self {
            TypeKind::BuiltinType => "BuiltinType",
            TypeKind::PointerType(p) => match p.classification {
                PointerClassification::Plain => "PointerType",
                PointerClassification::ToObject => "ObjectPointerType",
                PointerClassification::ToFunction => "FuncPointerType",
                PointerClassification::ToDataMember { .. } => "MemberDataPointerType",
                PointerClassification::ToMemberFunction { .. } => "MemberFuncPointerType",
            },
            TypeKind::LValueReferenceType { .. } => "LValueReferenceType",
            TypeKind::RValueReferenceType { .. } => "RValueReferenceType",
            TypeKind::ArrayType(_) => "ArrayType",
            TypeKind::RecordType { .. } => "RecordType",
            TypeKind::EnumType(_) => "EnumType",
            TypeKind::ScopedEnumType(_) => "ScopedEnumType",
            TypeKind::UnscopedEnumType(_) => "UnscopedEnumType",
            TypeKind::FunctionType(_) => "FunctionType",
            TypeKind::UnsupportedType => "UnsupportedType",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCommon {
    /// Stable identifier derived from `spelling` (see `ids::fnv1a`).
    pub id: String,
    pub spelling: String,
    pub size: Option<u64>,
    pub align: Option<u64>,
    pub is_const: bool,
    pub is_volatile: bool,
    pub hash: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub common: TypeCommon,
    pub kind: TypeKind,
}

impl Type {
    pub fn new(common: TypeCommon, kind: TypeKind) -> Self {
        Self { common, kind }
    }
}
