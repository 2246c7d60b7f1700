//! Type interning: every front-end `TypeId`
//! encountered is turned into a `lux_meta::TypeRef` via `get_or_create_type`,
//! recursively materializing pointee/element/return/arguments first so the
//! resulting graph is fully populated (and may be cyclic, e.g. a record
//! whose field is a pointer back to itself).

use lux_frontend::{AstAdapter, FrontTypeKind, TypeId as FrontTypeId};
use lux_meta::{
    ArrayType, DeclRef, FunctionType, MetaUnit, PointerClassification, PointerType, Type,
    TypeCommon, TypeKind, TypeRef,
};

/// Resolves a front-end type's canonical spelling to the `DeclRef` already
/// reserved for the matching `Record`/`Enum` declaration (reservation
/// happens before field materialization — see `materialize::record`).
/// `get_or_create_type` never creates declarations itself.
pub(crate) type DeclResolver<'a> = dyn Fn(&str) -> Option<DeclRef> + 'a;

pub(crate) fn get_or_create_type(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    ty: FrontTypeId,
    resolve_decl: &DeclResolver,
) -> TypeRef {
    let canonical = adapter.canonical_spelling(ty).to_string();
    if let Some(existing) = unit.find_type(&canonical) {
        return existing;
    }

    let kind = match adapter.type_kind(ty) {
        FrontTypeKind::Builtin => TypeKind::BuiltinType,
        FrontTypeKind::Unsupported => TypeKind::UnsupportedType,
        FrontTypeKind::Pointer => {
            let pointee = required(adapter, unit, adapter.pointee(ty), resolve_decl);
            let pointee_kind = adapter.pointee(ty).map(|p| adapter.type_kind(p));
            let classification = match adapter.class_of(ty) {
                Some(owner_ty) => {
                    let owner = get_or_create_type(adapter, unit, owner_ty, resolve_decl);
                    match pointee_kind {
                        Some(FrontTypeKind::Function) => {
                            PointerClassification::ToMemberFunction { owner }
                        }
                        _ => PointerClassification::ToDataMember { owner },
                    }
                }
                None => match pointee_kind {
                    Some(FrontTypeKind::Function) => PointerClassification::ToFunction,
                    Some(_) => PointerClassification::ToObject,
                    None => PointerClassification::Plain,
                },
            };
            TypeKind::PointerType(PointerType {
                pointee,
                classification,
            })
        }
        FrontTypeKind::LValueReference => TypeKind::LValueReferenceType {
            referred: required(adapter, unit, adapter.pointee(ty), resolve_decl),
        },
        FrontTypeKind::RValueReference => TypeKind::RValueReferenceType {
            referred: required(adapter, unit, adapter.pointee(ty), resolve_decl),
        },
        FrontTypeKind::Array => TypeKind::ArrayType(ArrayType {
            element: required(adapter, unit, adapter.element(ty), resolve_decl),
            extent: adapter.array_extent(ty),
        }),
        FrontTypeKind::Record => TypeKind::RecordType {
            declaration: resolve_or_unsupported_decl(&canonical, resolve_decl),
        },
        FrontTypeKind::Function => {
            let return_type = required(adapter, unit, adapter.return_type(ty), resolve_decl);
            let parameters = adapter
                .argument_types(ty)
                .iter()
                .map(|&p| get_or_create_type(adapter, unit, p, resolve_decl))
                .collect();
            TypeKind::FunctionType(FunctionType {
                return_type,
                parameters,
                is_variadic: false,
                is_noexcept: false,
            })
        }
        // Enum/ScopedEnum/UnscopedEnum types are pre-interned by
        // `materialize::enum_decl` at the point the declaration's
        // `enum_integer_type` cursor query is available; by the time any
        // other site references "enum E" as a type, `find_type` above has
        // already returned. Reaching this arm means the enum was referenced
        // before its declaration was ever discovered.
        FrontTypeKind::Enum | FrontTypeKind::ScopedEnum | FrontTypeKind::UnscopedEnum => {
            log::error!("enum type {canonical} referenced before its declaration was materialized");
            TypeKind::UnsupportedType
        }
    };

    let common = TypeCommon {
        id: canonical.clone(),
        spelling: adapter.type_spelling(ty).to_string(),
        size: adapter.size_of(ty),
        align: adapter.align_of(ty),
        is_const: adapter.is_const(ty),
        is_volatile: adapter.is_volatile(ty),
        hash: lux_meta::fnv1a(&canonical),
    };
    unit.intern_type(Type::new(common, kind))
}

fn resolve_or_unsupported_decl(canonical: &str, resolve_decl: &DeclResolver) -> DeclRef {
    resolve_decl(canonical).unwrap_or_else(|| {
        log::error!("record type {canonical} referenced before its declaration was materialized");
        DeclRef(u32::MAX)
    })
}

fn required(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    ty: Option<FrontTypeId>,
    resolve_decl: &DeclResolver,
) -> TypeRef {
    match ty {
        Some(t) => get_or_create_type(adapter, unit, t, resolve_decl),
        None => unsupported_type(unit, "<missing>"),
    }
}

pub(crate) fn unsupported_type(unit: &mut MetaUnit, spelling: &str) -> TypeRef {
    unit.intern_type(Type::new(
        TypeCommon {
            id: spelling.to_string(),
            spelling: spelling.to_string(),
            size: None,
            align: None,
            is_const: false,
            is_volatile: false,
            hash: lux_meta::fnv1a(spelling),
        },
        TypeKind::UnsupportedType,
    ))
}

/// Pre-intern the `Type` node for a record declaration eagerly, at
/// reservation time rather than lazily on first pointer/field reference —
/// an implicit default constructor's `return_type` (invariant 3) needs it
/// even when the record is never pointed to.
pub(crate) fn intern_record_type(
    unit: &mut MetaUnit,
    canonical: &str,
    spelling: &str,
    declaration: DeclRef,
) -> TypeRef {
    if let Some(existing) = unit.find_type(canonical) {
        return existing;
    }
    let common = TypeCommon {
        id: canonical.to_string(),
        spelling: spelling.to_string(),
        size: None,
        align: None,
        is_const: false,
        is_volatile: false,
        hash: lux_meta::fnv1a(canonical),
    };
    unit.intern_type(Type::new(common, TypeKind::RecordType { declaration }))
}

/// Pre-intern the `Type` node for an enum declaration directly from its
/// cursor-level `underlying` (already resolved by the caller), bypassing
/// `get_or_create_type`'s generic front-end-type walk — the front end has
/// no "underlying type of this enum TypeId" query, only
/// `enum_integer_type(cursor)`.
pub(crate) fn intern_enum_type(
    unit: &mut MetaUnit,
    canonical: &str,
    spelling: &str,
    declaration: DeclRef,
    underlying: TypeRef,
    is_scoped: bool,
) -> TypeRef {
    if let Some(existing) = unit.find_type(canonical) {
        return existing;
    }
    let (size, align) = {
        let underlying_common = &unit.ty(underlying).common;
        (underlying_common.size, underlying_common.align)
    };
    let common = TypeCommon {
        id: canonical.to_string(),
        spelling: spelling.to_string(),
        size,
        align,
        is_const: false,
        is_volatile: false,
        hash: lux_meta::fnv1a(canonical),
    };
    let kind = lux_meta::EnumType {
        declaration,
        underlying,
    };
    let kind = if is_scoped {
        TypeKind::ScopedEnumType(kind)
    } else {
        TypeKind::UnscopedEnumType(kind)
    };
    unit.intern_type(Type::new(common, kind))
}
