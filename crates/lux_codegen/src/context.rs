//! Builds the plain tree structures handed to the template engine. No
//! `lux_meta` type ever appears in a template context -- only strings,
//! numbers, and nested structs that derive `Serialize`.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use lux_analysis::Scc;
use lux_meta::{DeclKind, DeclRef, EnumDecl, MetaUnit, RecordDecl, RecordKind, TypeRef, Visibility};

use crate::naming;

#[derive(Debug, Clone, Serialize)]
pub struct FieldCtx {
    pub name: String,
    pub ty: String,
    pub offset: u64,
    pub visibility: &'static str,
    pub index: u32,
    pub is_const: bool,
    pub getter: String,
    pub setter: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodCtx {
    pub name: String,
    pub signature: String,
    pub invoker: String,
    pub is_const: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordCtx {
    pub qualified_name: String,
    pub extended_name: String,
    pub name: String,
    pub meta_kind: &'static str,
    pub hash: u64,
    pub size: u64,
    pub align: u64,
    pub field_types: Vec<String>,
    pub fields: Vec<FieldCtx>,
    pub annotations: Vec<String>,
    pub method_names: Vec<String>,
    pub static_method_names: Vec<String>,
    pub method_types: Vec<String>,
    pub static_method_types: Vec<String>,
    pub methods: Vec<MethodCtx>,
    pub static_methods: Vec<MethodCtx>,
    pub constructor_thunk: Option<String>,
    pub destructor_thunk: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumVariantCtx {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumCtx {
    pub qualified_name: String,
    pub extended_name: String,
    pub name: String,
    pub size: u64,
    pub underlying: String,
    pub is_scoped: bool,
    pub annotations: Vec<String>,
    pub variants: Vec<EnumVariantCtx>,
    pub keys: Vec<String>,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionCtx {
    pub qualified_name: String,
    pub extended_name: String,
    pub name: String,
    pub signature: String,
    pub invoker: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub unit_name: String,
    pub unit_version: String,
    /// Qualified names of records caught in a cyclic SCC, emitted as
    /// `struct Name;` ahead of every definition so a self-referential or
    /// mutually-recursive record compiles.
    pub forward_declarations: Vec<String>,
    pub records: Vec<RecordCtx>,
    pub enums: Vec<EnumCtx>,
    pub functions: Vec<FunctionCtx>,
    pub custom_fields: Value,
}

/// Every reflected record/enum's own `Type` node, so the emission order
/// (a list of `TypeRef` SCCs) can be filtered down to just the nodes this
/// Meta Unit actually marked for reflection.
fn selected_types(unit: &MetaUnit) -> HashMap<TypeRef, DeclRef> {
    let mut map = HashMap::new();
    for decl in unit.marked_records().into_iter().chain(unit.marked_enums()) {
        if let Some(ty) = unit.find_type(&unit.decl(decl).common.id) {
            map.insert(ty, decl);
        }
    }
    map
}

pub fn build_context(unit: &MetaUnit, order: &[Scc], custom_fields: Value) -> RenderContext {
    let selected = selected_types(unit);

    let mut records = Vec::new();
    let mut enums = Vec::new();
    let mut forward_declarations = Vec::new();
    for scc in order {
        for ty in scc.types.iter().copied() {
            let Some(&decl) = selected.get(&ty) else { continue };
            match &unit.decl(decl).kind {
                DeclKind::RecordDecl(r) => {
                    if scc.is_cyclic() {
                        forward_declarations.push(unit.decl(decl).common.qualified_name.clone());
                    }
                    records.push(build_record_ctx(unit, decl, ty, r));
                }
                DeclKind::EnumDecl(e) => enums.push(build_enum_ctx(unit, decl, ty, e)),
                _ => {}
            }
        }
    }

    let mut function_decls = unit.marked_functions();
    function_decls.sort_by_key(|d| d.index());
    let functions = function_decls.into_iter().map(|d| build_function_ctx(unit, d)).collect();

    RenderContext {
        unit_name: unit.name().to_string(),
        unit_version: unit.version().to_string(),
        forward_declarations,
        records,
        enums,
        functions,
        custom_fields,
    }
}

fn record_kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Class => "class",
        RecordKind::Struct => "struct",
        RecordKind::Union => "union",
    }
}

fn visibility_label(v: Visibility) -> &'static str {
    match v {
        Visibility::Public => "public",
        Visibility::Protected => "protected",
        Visibility::Private => "private",
    }
}

fn build_record_ctx(unit: &MetaUnit, decl: DeclRef, ty: TypeRef, r: &RecordDecl) -> RecordCtx {
    let common = &unit.decl(decl).common;
    let qualified_name = common.qualified_name.clone();
    let extended_name = naming::extended_name(&qualified_name);

    let mut field_types = Vec::new();
    let mut fields = Vec::new();
    for &f in &r.fields {
        let fd = unit.decl(f);
        // A field the materializer could not resolve carries
        // `UnsupportedType` rather than aborting the whole record.
        let field = match fd.as_field() {
            Some(field) => field,
            None => continue,
        };
        let ty_spelling = unit.ty(field.field_type).common.spelling.clone();
        field_types.push(ty_spelling.clone());
        fields.push(FieldCtx {
            name: fd.common.name.clone(),
            ty: ty_spelling,
            offset: field.offset_bytes,
            visibility: visibility_label(field.visibility),
            index: field.index,
            is_const: field.is_const,
            getter: naming::field_getter_name(&qualified_name, &fd.common.name),
            setter: (!field.is_const).then(|| naming::field_setter_name(&qualified_name, &fd.common.name)),
        });
    }

    let build_method = |&m: &DeclRef| -> Option<(String, MethodCtx, String)> {
        let d = unit.decl(m);
        let c = d.as_callable()?;
        let param_types: Vec<String> = c
            .parameters
            .iter()
            .filter_map(|&p| unit.decl(p).as_parameter())
            .map(|p| unit.ty(p.param_type).common.spelling.clone())
            .collect();
        let return_type = unit.ty(c.return_type).common.spelling.clone();
        let params_joined = param_types.join(", ");
        let pointer_type = if c.is_static {
            format!("{return_type} (*)({params_joined})")
        } else if c.is_const {
            format!("{return_type} ({qualified_name}::*)({params_joined}) const")
        } else {
            format!("{return_type} ({qualified_name}::*)({params_joined})")
        };
        Some((
            d.common.id.clone(),
            MethodCtx {
                name: d.common.name.clone(),
                signature: format!("{return_type}({params_joined})"),
                invoker: naming::method_invoker_name(&qualified_name, &d.common.name),
                is_const: c.is_const,
                is_static: c.is_static,
            },
            pointer_type,
        ))
    };

    // methods are sorted by their textual identifier, keeping each
    // method's function-pointer type paired with its `MethodCtx` so the
    // two tuples stay in lockstep.
    let mut methods: Vec<(String, MethodCtx, String)> = r.methods.iter().filter_map(build_method).collect();
    methods.sort_by(|a, b| a.0.cmp(&b.0));
    let method_types: Vec<String> = methods.iter().map(|(_, _, t)| t.clone()).collect();
    let methods: Vec<MethodCtx> = methods.into_iter().map(|(_, m, _)| m).collect();

    let mut static_methods: Vec<(String, MethodCtx, String)> = r.static_methods.iter().filter_map(build_method).collect();
    static_methods.sort_by(|a, b| a.0.cmp(&b.0));
    let static_method_types: Vec<String> = static_methods.iter().map(|(_, _, t)| t.clone()).collect();
    let static_methods: Vec<MethodCtx> = static_methods.into_iter().map(|(_, m, _)| m).collect();

    RecordCtx {
        method_names: methods.iter().map(|m| m.name.clone()).collect(),
        static_method_names: static_methods.iter().map(|m| m.name.clone()).collect(),
        hash: unit.ty(ty).common.hash,
        constructor_thunk: r.constructors.first().map(|_| naming::constructor_thunk_name(&qualified_name)),
        destructor_thunk: r.destructor.map(|_| naming::destructor_thunk_name(&qualified_name)),
        name: common.name.clone(),
        meta_kind: record_kind_label(r.kind),
        size: r.size,
        align: r.align,
        field_types,
        fields,
        annotations: common.annotations.clone(),
        method_types,
        static_method_types,
        methods,
        static_methods,
        qualified_name,
        extended_name,
    }
}

fn build_enum_ctx(unit: &MetaUnit, decl: DeclRef, ty: TypeRef, e: &EnumDecl) -> EnumCtx {
    let common = &unit.decl(decl).common;
    let variants: Vec<EnumVariantCtx> = e
        .enumerators
        .iter()
        .map(|en| EnumVariantCtx {
            name: en.name.clone(),
            value: en.signed_value,
        })
        .collect();

    EnumCtx {
        qualified_name: common.qualified_name.clone(),
        extended_name: naming::extended_name(&common.qualified_name),
        name: common.name.clone(),
        size: unit.ty(ty).common.size.unwrap_or(0),
        underlying: unit.ty(e.underlying_type).common.spelling.clone(),
        is_scoped: e.is_scoped,
        annotations: common.annotations.clone(),
        keys: variants.iter().map(|v| v.name.clone()).collect(),
        values: variants.iter().map(|v| v.value).collect(),
        variants,
    }
}

fn build_function_ctx(unit: &MetaUnit, decl: DeclRef) -> FunctionCtx {
    let d = unit.decl(decl);
    let qualified_name = d.common.qualified_name.clone();
    let (signature, invoker) = match d.as_callable() {
        Some(c) => {
            let param_types: Vec<String> = c
                .parameters
                .iter()
                .filter_map(|&p| unit.decl(p).as_parameter())
                .map(|p| unit.ty(p.param_type).common.spelling.clone())
                .collect();
            let return_type = unit.ty(c.return_type).common.spelling.clone();
            (
                format!("{return_type}({})", param_types.join(", ")),
                naming::function_invoker_name(&qualified_name),
            )
        }
        None => (String::new(), naming::function_invoker_name(&qualified_name)),
    };

    FunctionCtx {
        extended_name: naming::extended_name(&qualified_name),
        name: d.common.name.clone(),
        signature,
        invoker,
        qualified_name,
    }
}
