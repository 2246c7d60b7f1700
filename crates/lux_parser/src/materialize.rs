//! Materialization pass: kind-specific builders that turn a discovered
//! cursor into a fully populated `Declaration`, recursively materializing
//! whatever type/member substructure it needs.

use std::collections::HashMap;

use lux_frontend::{Access, AstAdapter, CursorId, CursorKind, FrontRecordKind};
use lux_meta::{
    BaseRecord, CallableDecl, DeclCommon, DeclKind, DeclRef, Declaration, EnumDecl, Enumerator,
    FieldDecl, MetaUnit, ParameterDecl, RecordDecl, RecordKind, TypeRef, Visibility,
};

use crate::ids::{qualified_name, synthesize_param_name};
use crate::types::{get_or_create_type, intern_enum_type, DeclResolver};

/// Index from a declaration's qualified name to its reserved `DeclRef`,
/// shared across the whole parse so self- and forward-references resolve.
pub(crate) type DeclIndex = HashMap<String, DeclRef>;

fn resolver(index: &DeclIndex) -> impl Fn(&str) -> Option<DeclRef> + '_ {
    move |id: &str| index.get(id).copied()
}

fn to_visibility(access: Access) -> Visibility {
    match access {
        Access::Public => Visibility::Public,
        Access::Protected => Visibility::Protected,
        Access::Private => Visibility::Private,
    }
}

fn to_record_kind(kind: FrontRecordKind) -> RecordKind {
    match kind {
        FrontRecordKind::Class => RecordKind::Class,
        FrontRecordKind::Struct => RecordKind::Struct,
        FrontRecordKind::Union => RecordKind::Union,
    }
}

/// `struct Node { Node* next; }`-shaped entry point: materialize one
/// top-level marked declaration into the unit, returning its `DeclRef`.
pub(crate) fn materialize_top_level(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    annotations: Vec<String>,
    index: &mut DeclIndex,
    sink: &mut dyn FnMut(&str),
) -> Option<DeclRef> {
    match adapter.cursor_kind(cursor) {
        CursorKind::Record => Some(materialize_record(adapter, unit, cursor, annotations, index, sink)),
        CursorKind::Enum => Some(materialize_enum(adapter, unit, cursor, annotations, index)),
        CursorKind::Function => Some(materialize_callable(
            adapter,
            unit,
            cursor,
            annotations,
            DeclKind::FunctionDecl,
            None,
            index,
        )),
        other => {
            sink(&format!(
                "unsupported marked declaration kind {other:?} ({})",
                adapter.spelling(cursor)
            ));
            None
        }
    }
}

fn materialize_record(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    annotations: Vec<String>,
    index: &mut DeclIndex,
    sink: &mut dyn FnMut(&str),
) -> DeclRef {
    let id = qualified_name(adapter, cursor);
    let kind = to_record_kind(adapter.record_kind(cursor));
    let (size, align) = adapter
        .cursor_type(cursor)
        .map(|t| (adapter.size_of(t).unwrap_or(0), adapter.align_of(t).unwrap_or(1)))
        .unwrap_or((0, 1));

    let mut common = DeclCommon::new(id.clone(), adapter.spelling(cursor), id.clone());
    common.origin_in_main_file = adapter.is_from_main_file(cursor);
    common.annotations = annotations;

    // Reserve the record before walking members: a field whose type is a
    // pointer back to this record needs `record_ref` to exist already.
    let record_ref = unit.intern_decl(Declaration::new(
        common,
        DeclKind::RecordDecl(RecordDecl {
            kind,
            size,
            align,
            bases: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            destructor: None,
            methods: Vec::new(),
            static_methods: Vec::new(),
        }),
    ));
    index.insert(id.clone(), record_ref);

    let record_type = crate::types::intern_record_type(unit, &id, &id, record_ref);

    let mut bases = Vec::new();
    let mut fields = Vec::new();
    let mut constructors = Vec::new();
    let mut destructor = None;
    let mut methods = Vec::new();
    let mut static_methods = Vec::new();
    let mut field_index = 0u32;

    let children = collect_children(adapter, cursor);
    for child in children {
        let resolve = resolver(index);
        match adapter.cursor_kind(child) {
            CursorKind::BaseSpecifier => {
                if let Some(base_ty) = adapter.cursor_type(child) {
                    let base_canonical = adapter.canonical_spelling(base_ty).to_string();
                    match index.get(&base_canonical) {
                        Some(&base_decl) => bases.push(BaseRecord {
                            record: base_decl,
                            visibility: to_visibility(adapter.access_specifier(child)),
                        }),
                        None => sink(&format!("base class {base_canonical} not found (must be reflected before its derived class)")),
                    }
                }
            }
            CursorKind::Field => {
                let field_ref = materialize_field(adapter, unit, child, field_index, false, &resolve);
                field_index += 1;
                fields.push(field_ref);
            }
            CursorKind::VarDecl => {
                let field_ref = materialize_field(adapter, unit, child, field_index, true, &resolve);
                field_index += 1;
                fields.push(field_ref);
            }
            CursorKind::Constructor => {
                constructors.push(materialize_callable(
                    adapter,
                    unit,
                    child,
                    Vec::new(),
                    DeclKind::ConstructorDecl,
                    Some(record_type),
                    index,
                ));
            }
            CursorKind::Destructor => {
                destructor = Some(materialize_callable(
                    adapter,
                    unit,
                    child,
                    Vec::new(),
                    DeclKind::DestructorDecl,
                    None,
                    index,
                ));
            }
            CursorKind::Method | CursorKind::ConversionFunction => {
                let flags = adapter.method_flags(child);
                let ctor: fn(CallableDecl) -> DeclKind = if adapter.cursor_kind(child) == CursorKind::ConversionFunction {
                    DeclKind::ConversionDecl
                } else {
                    DeclKind::MethodDecl
                };
                let m = materialize_callable(adapter, unit, child, Vec::new(), ctor, None, index);
                if flags.is_static {
                    static_methods.push(m);
                } else {
                    methods.push(m);
                }
            }
            CursorKind::Record | CursorKind::Namespace | CursorKind::Enum => {
                // Nested declarations are discovered (and materialized)
                // independently by the top-level discovery/materialize loop.
            }
            other => sink(&format!("unsupported record member kind {other:?}")),
        }
    }

    if constructors.is_empty() {
        constructors.push(synthesize_default_constructor(unit, &id, record_type, record_ref));
    }

    unit.patch_decl(record_ref, |d| {
        if let DeclKind::RecordDecl(r) = &mut d.kind {
            r.bases = bases;
            r.fields = fields;
            r.constructors = constructors;
            r.destructor = destructor;
            r.methods = methods;
            r.static_methods = static_methods;
        }
    });

    record_ref
}

fn synthesize_default_constructor(
    unit: &mut MetaUnit,
    record_id: &str,
    record_type: TypeRef,
    _record_ref: DeclRef,
) -> DeclRef {
    let id = format!("{record_id}::{{implicit-ctor}}");
    let mut common = DeclCommon::new(id, record_id, format!("{record_id}::{record_id}"));
    common.origin_in_main_file = true;
    unit.intern_decl(Declaration::new(
        common,
        DeclKind::ConstructorDecl(CallableDecl {
            mangled_name: None,
            return_type: record_type,
            parameters: Vec::new(),
            is_const: false,
            is_virtual: false,
            is_static: false,
        }),
    ))
}

fn materialize_field(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    index: u32,
    is_static: bool,
    resolve_decl: &DeclResolver,
) -> DeclRef {
    let id = qualified_name(adapter, cursor);
    let field_type = match adapter.cursor_type(cursor) {
        Some(t) => get_or_create_type(adapter, unit, t, resolve_decl),
        None => crate::types::unsupported_type(unit, "<unknown field type>"),
    };
    let is_const = unit.ty(field_type).common.is_const;

    let mut common = DeclCommon::new(id.clone(), adapter.spelling(cursor), id);
    common.origin_in_main_file = adapter.is_from_main_file(cursor);

    unit.intern_decl(Declaration::new(
        common,
        DeclKind::FieldDecl(FieldDecl {
            index,
            offset_bytes: adapter.field_offset_bits(cursor).unwrap_or(0) / 8,
            field_type,
            visibility: to_visibility(adapter.access_specifier(cursor)),
            is_static,
            is_const,
        }),
    ))
}

fn materialize_enum(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    annotations: Vec<String>,
    index: &mut DeclIndex,
) -> DeclRef {
    let id = qualified_name(adapter, cursor);
    let is_scoped = adapter.is_scoped_enum(cursor);
    let resolve = resolver(index);
    let underlying = match adapter.enum_integer_type(cursor) {
        Some(t) => get_or_create_type(adapter, unit, t, &resolve),
        None => crate::types::unsupported_type(unit, "int"),
    };

    let enumerators = collect_children(adapter, cursor)
        .into_iter()
        .filter(|c| adapter.cursor_kind(*c) == CursorKind::EnumConstant)
        .map(|c| {
            let (signed, unsigned) = adapter.enum_value(c).unwrap_or((0, 0));
            Enumerator {
                name: adapter.spelling(c).to_string(),
                signed_value: signed,
                unsigned_value: unsigned,
            }
        })
        .collect();

    let mut common = DeclCommon::new(id.clone(), adapter.spelling(cursor), id.clone());
    common.origin_in_main_file = adapter.is_from_main_file(cursor);
    common.annotations = annotations;

    let decl_ref = unit.intern_decl(Declaration::new(
        common,
        DeclKind::EnumDecl(EnumDecl {
            underlying_type: underlying,
            is_scoped,
            enumerators,
        }),
    ));
    index.insert(id.clone(), decl_ref);
    intern_enum_type(unit, &id, &id, decl_ref, underlying, is_scoped);
    decl_ref
}

fn materialize_callable(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    annotations: Vec<String>,
    ctor: fn(CallableDecl) -> DeclKind,
    forced_return: Option<TypeRef>,
    index: &mut DeclIndex,
) -> DeclRef {
    let id = qualified_name(adapter, cursor);
    let flags = adapter.method_flags(cursor);
    let resolve = resolver(index);

    let func_ty = adapter.cursor_type(cursor);
    let return_type = forced_return.unwrap_or_else(|| match func_ty.and_then(|t| adapter.return_type(t)) {
        Some(t) => get_or_create_type(adapter, unit, t, &resolve),
        None => crate::types::unsupported_type(unit, "void"),
    });

    let parameters = materialize_parameters(adapter, unit, cursor, func_ty, &resolve);

    let mut common = DeclCommon::new(id.clone(), adapter.spelling(cursor), id);
    common.origin_in_main_file = adapter.is_from_main_file(cursor);
    common.annotations = annotations;

    let callable = CallableDecl {
        mangled_name: adapter.mangled_name(cursor).map(str::to_string),
        return_type,
        parameters,
        is_const: flags.is_const,
        is_virtual: flags.is_virtual,
        is_static: flags.is_static,
    };
    let decl_ref = unit.intern_decl(Declaration::new(common, ctor(callable)));
    index.insert(qualified_name(adapter, cursor), decl_ref);
    decl_ref
}

fn materialize_parameters(
    adapter: &dyn AstAdapter,
    unit: &mut MetaUnit,
    cursor: CursorId,
    func_ty: Option<lux_frontend::TypeId>,
    resolve_decl: &DeclResolver,
) -> Vec<DeclRef> {
    let param_cursors: Vec<CursorId> = collect_children(adapter, cursor)
        .into_iter()
        .filter(|c| adapter.cursor_kind(*c) == CursorKind::ParmDecl)
        .collect();
    let arg_types = func_ty.map(|t| adapter.argument_types(t).to_vec()).unwrap_or_default();
    let count = param_cursors.len().max(arg_types.len());
    let fn_qualified = qualified_name(adapter, cursor);

    (0..count)
        .map(|i| {
            let (name, param_type) = match (param_cursors.get(i), arg_types.get(i)) {
                (Some(&pc), _) => {
                    let name = adapter.spelling(pc);
                    let name = if name.is_empty() {
                        synthesize_param_name(i as u32)
                    } else {
                        name.to_string()
                    };
                    let ty = match adapter.cursor_type(pc).or_else(|| arg_types.get(i).copied()) {
                        Some(t) => get_or_create_type(adapter, unit, t, resolve_decl),
                        None => crate::types::unsupported_type(unit, "<unknown parameter type>"),
                    };
                    (name, ty)
                }
                (None, Some(&t)) => (
                    synthesize_param_name(i as u32),
                    get_or_create_type(adapter, unit, t, resolve_decl),
                ),
                (None, None) => (synthesize_param_name(i as u32), crate::types::unsupported_type(unit, "<unknown>")),
            };
            let id = format!("{fn_qualified}({name})");
            let common = DeclCommon::new(id, name, fn_qualified.clone());
            unit.intern_decl(Declaration::new(
                common,
                DeclKind::ParmVarDecl(ParameterDecl {
                    index: i as u32,
                    param_type,
                }),
            ))
        })
        .collect()
}

fn collect_children(adapter: &dyn AstAdapter, cursor: CursorId) -> Vec<CursorId> {
    let mut out = Vec::new();
    adapter.visit_children(cursor, &mut |c| {
        out.push(c);
        lux_frontend::VisitResult::Continue
    });
    out
}
