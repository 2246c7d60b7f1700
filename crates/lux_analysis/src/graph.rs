//! Direct-dependency edge gathering: for a given type, the set of other
//! types it must be defined after. `Record`/`Enum` types pull their edges
//! from the backing declaration's members, since that's where
//! field/parameter/return types actually live.

use lux_meta::{DeclRef, MetaUnit, PointerClassification, TypeKind, TypeRef};

pub(crate) fn dependency_edges(unit: &MetaUnit, ty: TypeRef) -> Vec<TypeRef> {
    match &unit.ty(ty).kind {
        TypeKind::BuiltinType | TypeKind::UnsupportedType => Vec::new(),
        TypeKind::PointerType(p) => {
            let mut edges = vec![p.pointee];
            if let PointerClassification::ToDataMember { owner }
            | PointerClassification::ToMemberFunction { owner } = &p.classification
            {
                edges.push(*owner);
            }
            edges
        }
        TypeKind::LValueReferenceType { referred } | TypeKind::RValueReferenceType { referred } => {
            vec![*referred]
        }
        TypeKind::ArrayType(a) => vec![a.element],
        TypeKind::RecordType { declaration } => record_dependency_edges(unit, *declaration),
        TypeKind::EnumType(e) | TypeKind::ScopedEnumType(e) | TypeKind::UnscopedEnumType(e) => {
            vec![e.underlying]
        }
        TypeKind::FunctionType(f) => {
            let mut edges = vec![f.return_type];
            edges.extend(f.parameters.iter().copied());
            edges
        }
    }
}

fn record_dependency_edges(unit: &MetaUnit, decl: DeclRef) -> Vec<TypeRef> {
    let record = match unit.decl(decl).as_record() {
        Some(r) => r,
        None => return Vec::new(),
    };
    let mut edges = Vec::new();
    for base in &record.bases {
        if let Some(t) = record_type_of(unit, base.record) {
            edges.push(t);
        }
    }
    for &field in &record.fields {
        if let Some(f) = unit.decl(field).as_field() {
            edges.push(f.field_type);
        }
    }
    for &ctor in &record.constructors {
        edges.extend(callable_edges(unit, ctor));
    }
    if let Some(dtor) = record.destructor {
        edges.extend(callable_edges(unit, dtor));
    }
    for &m in record.methods.iter().chain(record.static_methods.iter()) {
        edges.extend(callable_edges(unit, m));
    }
    edges
}

fn callable_edges(unit: &MetaUnit, decl: DeclRef) -> Vec<TypeRef> {
    let callable = match unit.decl(decl).as_callable() {
        Some(c) => c,
        None => return Vec::new(),
    };
    let mut edges = vec![callable.return_type];
    for &p in &callable.parameters {
        if let Some(param) = unit.decl(p).as_parameter() {
            edges.push(param.param_type);
        }
    }
    edges
}

/// A record/enum declaration's own `Type` node, found by reusing the
/// declaration id as the type's canonical spelling — the convention
/// `lux_parser::materialize` uses when it pre-interns `RecordType`/
/// `EnumType` at declaration time (`intern_record_type`/`intern_enum_type`).
fn record_type_of(unit: &MetaUnit, decl: DeclRef) -> Option<TypeRef> {
    unit.find_type(&unit.decl(decl).common.id)
}
