//! `to_json`/`from_json`: the stable wire format of §6's "Meta Unit JSON
//! schema". Cross-references are serialized by the referenced node's own
//! textual id, never by arena index, so the index space is free to differ
//! between two structurally-equal Meta Units.

use crate::decl::{
    BaseRecord, CallableDecl, DeclCommon, DeclKind, Declaration, EnumDecl, FieldDecl,
    ParameterDecl, RecordDecl, RecordKind, VariableDecl, Visibility,
};
use crate::error::{MetaError, Result};
use crate::refs::{DeclRef, TypeRef};
use crate::ty::{ArrayType, EnumType, FunctionType, PointerClassification, PointerType, Type, TypeCommon, TypeKind};
use crate::unit::MetaUnit;
use serde_json::{json, Value};

impl MetaUnit {
    pub fn to_json(&self) -> Value {
        let declarations: Vec<Value> = self
            .declarations()
            .iter()
            .map(|d| self.decl_to_json(d))
            .collect();
        let types: Vec<Value> = self.types().iter().map(|t| self.type_to_json(t)).collect();

        let marked_ids = |f: fn(&MetaUnit) -> Vec<DeclRef>| -> Vec<String> {
            f(self)
                .into_iter()
                .map(|r| self.decl(r).common.id.clone())
                .collect()
        };

        json!({
            "name": self.name(),
            "version": self.version(),
            "id": self.id().to_string(),
            "declarations": declarations,
            "types": types,
            "marked": {
                "records": marked_ids(MetaUnit::marked_records),
                "functions": marked_ids(MetaUnit::marked_functions),
                "enums": marked_ids(MetaUnit::marked_enums),
            }
        })
    }

    pub fn from_json(doc: &Value) -> Result<MetaUnit> {
        let name = field_str(doc, "name")?;
        let version = field_str(doc, "version")?;
        let mut unit = MetaUnit::empty_like(&name, &version);

        // Pass 1: create every type/decl node with placeholder refs so ids
        // resolve regardless of declaration order in the document, then
        // patch cross-references in a second pass using the freshly built
        // id maps.
        let types = doc
            .get("types")
            .and_then(Value::as_array)
            .ok_or_else(|| MetaError::Json(missing("types")))?;
        let declarations = doc
            .get("declarations")
            .and_then(Value::as_array)
            .ok_or_else(|| MetaError::Json(missing("declarations")))?;

        // Types and declarations may reference each other cyclically, so we
        // resolve ids against the *document*, not the partially built arena:
        // look up each referenced node's json payload by id and intern it
        // on demand, memoizing via the unit's own id maps.
        for t in types {
            json_to_type(&mut unit, t, types, declarations)?;
        }
        for d in declarations {
            json_to_decl(&mut unit, d, types, declarations)?;
        }

        unit.validate()?;
        Ok(unit)
    }

    fn decl_to_json(&self, d: &Declaration) -> Value {
        let mut obj = json!({
            "kind": d.kind.label(),
            "id": d.common.id,
            "name": d.common.name,
            "qualified_name": d.common.qualified_name,
            "origin_in_main_file": d.common.origin_in_main_file,
            "annotations": d.common.annotations,
        });
        let map = obj.as_object_mut().unwrap();
        match &d.kind {
            DeclKind::EnumDecl(e) => {
                map.insert("underlying_type".into(), json!(self.ty(e.underlying_type).common.id));
                map.insert("is_scoped".into(), json!(e.is_scoped));
                map.insert(
                    "enumerators".into(),
                    json!(e
                        .enumerators
                        .iter()
                        .map(|en| json!({
                            "name": en.name,
                            "signed_value": en.signed_value,
                            "unsigned_value": en.unsigned_value,
                        }))
                        .collect::<Vec<_>>()),
                );
            }
            DeclKind::RecordDecl(r) => {
                map.insert("record_kind".into(), json!(record_kind_str(r.kind)));
                map.insert("size".into(), json!(r.size));
                map.insert("align".into(), json!(r.align));
                map.insert(
                    "bases".into(),
                    json!(r
                        .bases
                        .iter()
                        .map(|b| json!({
                            "record": self.decl(b.record).common.id,
                            "visibility": visibility_str(b.visibility),
                        }))
                        .collect::<Vec<_>>()),
                );
                map.insert("fields".into(), json!(self.decl_ids(&r.fields)));
                map.insert("constructors".into(), json!(self.decl_ids(&r.constructors)));
                map.insert(
                    "destructor".into(),
                    json!(r.destructor.map(|d| self.decl(d).common.id.clone())),
                );
                map.insert("methods".into(), json!(self.decl_ids(&r.methods)));
                map.insert("static_methods".into(), json!(self.decl_ids(&r.static_methods)));
            }
            DeclKind::FieldDecl(f) => {
                map.insert("index".into(), json!(f.index));
                map.insert("offset_bytes".into(), json!(f.offset_bytes));
                map.insert("field_type".into(), json!(self.ty(f.field_type).common.id));
                map.insert("visibility".into(), json!(visibility_str(f.visibility)));
                map.insert("is_static".into(), json!(f.is_static));
                map.insert("is_const".into(), json!(f.is_const));
            }
            DeclKind::FunctionDecl(c)
            | DeclKind::MethodDecl(c)
            | DeclKind::ConstructorDecl(c)
            | DeclKind::DestructorDecl(c)
            | DeclKind::ConversionDecl(c) => {
                map.insert("mangled_name".into(), json!(c.mangled_name));
                map.insert("return_type".into(), json!(self.ty(c.return_type).common.id));
                map.insert("parameters".into(), json!(self.decl_ids(&c.parameters)));
                map.insert("is_const".into(), json!(c.is_const));
                map.insert("is_virtual".into(), json!(c.is_virtual));
                map.insert("is_static".into(), json!(c.is_static));
            }
            DeclKind::ParmVarDecl(p) => {
                map.insert("index".into(), json!(p.index));
                map.insert("param_type".into(), json!(self.ty(p.param_type).common.id));
            }
            DeclKind::VarDecl(v) => {
                map.insert("var_type".into(), json!(self.ty(v.var_type).common.id));
                map.insert("is_static".into(), json!(v.is_static));
            }
        }
        obj
    }

    fn decl_ids(&self, refs: &[DeclRef]) -> Vec<String> {
        refs.iter().map(|r| self.decl(*r).common.id.clone()).collect()
    }

    fn type_to_json(&self, t: &Type) -> Value {
        let mut obj = json!({
            "kind": t.kind.wire_kind(),
            "id": t.common.id,
            "spelling": t.common.spelling,
            "size": t.common.size,
            "align": t.common.align,
            "is_const": t.common.is_const,
            "is_volatile": t.common.is_volatile,
            "hash": t.common.hash.to_string(),
        });
        let map = obj.as_object_mut().unwrap();
        match &t.kind {
            TypeKind::BuiltinType | TypeKind::UnsupportedType => {}
            TypeKind::PointerType(p) => {
                map.insert("pointee".into(), json!(self.ty(p.pointee).common.id));
                if let PointerClassification::ToDataMember { owner }
                | PointerClassification::ToMemberFunction { owner } = &p.classification
                {
                    map.insert("owner".into(), json!(self.ty(*owner).common.id));
                }
            }
            TypeKind::LValueReferenceType { referred } | TypeKind::RValueReferenceType { referred } => {
                map.insert("referred".into(), json!(self.ty(*referred).common.id));
            }
            TypeKind::ArrayType(a) => {
                map.insert("element".into(), json!(self.ty(a.element).common.id));
                map.insert("extent".into(), json!(a.extent));
            }
            TypeKind::RecordType { declaration } => {
                map.insert("declaration".into(), json!(self.decl(*declaration).common.id));
            }
            TypeKind::EnumType(e) | TypeKind::ScopedEnumType(e) | TypeKind::UnscopedEnumType(e) => {
                map.insert("declaration".into(), json!(self.decl(e.declaration).common.id));
                map.insert("underlying".into(), json!(self.ty(e.underlying).common.id));
            }
            TypeKind::FunctionType(f) => {
                map.insert("return".into(), json!(self.ty(f.return_type).common.id));
                map.insert(
                    "parameters".into(),
                    json!(f.parameters.iter().map(|p| self.ty(*p).common.id.clone()).collect::<Vec<_>>()),
                );
                map.insert("is_variadic".into(), json!(f.is_variadic));
                map.insert("is_noexcept".into(), json!(f.is_noexcept));
            }
        }
        obj
    }
}

fn record_kind_str(k: RecordKind) -> &'static str {
    match k {
        RecordKind::Class => "class",
        RecordKind::Struct => "struct",
        RecordKind::Union => "union",
    }
}

fn record_kind_from_str(s: &str) -> RecordKind {
    match s {
        "class" => RecordKind::Class,
        "union" => RecordKind::Union,
        _ => RecordKind::Struct,
    }
}

fn visibility_str(v: Visibility) -> &'static str {
    match v {
        Visibility::Public => "public",
        Visibility::Protected => "protected",
        Visibility::Private => "private",
    }
}

fn visibility_from_str(s: &str) -> Visibility {
    match s {
        "private" => Visibility::Private,
        "protected" => Visibility::Protected,
        _ => Visibility::Public,
    }
}

fn missing(field: &str) -> serde_json::Error {
    serde::de::Error::custom(format!("missing field `{field}`"))
}

fn field_str(v: &Value, field: &str) -> Result<String> {
    v.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| MetaError::Json(missing(field)))
}

fn find_by_id<'a>(list: &'a [Value], id: &str) -> Option<&'a Value> {
    list.iter().find(|v| v.get("id").and_then(Value::as_str) == Some(id))
}

/// Ensure the type with json-id `id` is interned in `unit`, recursively
/// interning whatever it depends on first. Safe on cycles: the unit's own
/// `type_by_id` map is checked before recursing, so a type that refers back
/// to itself (directly or through a cycle) simply finds itself already
/// present on the way back up.
fn intern_type_by_id(unit: &mut MetaUnit, id: &str, types: &[Value], decls: &[Value]) -> Result<TypeRef> {
    if let Some(r) = unit.find_type(id) {
        return Ok(r);
    }
    let doc = find_by_id(types, id)
        .ok_or_else(|| MetaError::DanglingReference(format!("type id {id}")))?;
    json_to_type(unit, doc, types, decls)
}

fn intern_decl_by_id(unit: &mut MetaUnit, id: &str, types: &[Value], decls: &[Value]) -> Result<DeclRef> {
    if let Some(r) = unit.find_decl(id) {
        return Ok(r);
    }
    let doc = find_by_id(decls, id)
        .ok_or_else(|| MetaError::DanglingReference(format!("decl id {id}")))?;
    json_to_decl(unit, doc, types, decls)
}

fn common_type(v: &Value) -> Result<TypeCommon> {
    Ok(TypeCommon {
        id: field_str(v, "id")?,
        spelling: field_str(v, "spelling")?,
        size: v.get("size").and_then(Value::as_u64),
        align: v.get("align").and_then(Value::as_u64),
        is_const: v.get("is_const").and_then(Value::as_bool).unwrap_or(false),
        is_volatile: v.get("is_volatile").and_then(Value::as_bool).unwrap_or(false),
        hash: v
            .get("hash")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
    })
}

fn json_to_type(unit: &mut MetaUnit, v: &Value, types: &[Value], decls: &[Value]) -> Result<TypeRef> {
    let id = field_str(v, "id")?;
    if let Some(r) = unit.find_type(&id) {
        return Ok(r);
    }
    let common = common_type(v)?;
    let kind_str = field_str(v, "kind")?;
    let ref_str = |field: &str| -> Result<String> { field_str(v, field) };

    let kind = match kind_str.as_str() {
        "BuiltinType" => TypeKind::BuiltinType,
        "UnsupportedType" => TypeKind::UnsupportedType,
        "PointerType" | "ObjectPointerType" | "FuncPointerType" | "MemberDataPointerType" | "MemberFuncPointerType" => {
            let pointee_id = ref_str("pointee")?;
            let pointee = intern_type_by_id(unit, &pointee_id, types, decls)?;
            let classification = match kind_str.as_str() {
                "ObjectPointerType" => PointerClassification::ToObject,
                "FuncPointerType" => PointerClassification::ToFunction,
                "MemberDataPointerType" => {
                    let owner_id = ref_str("owner")?;
                    PointerClassification::ToDataMember { owner: intern_type_by_id(unit, &owner_id, types, decls)? }
                }
                "MemberFuncPointerType" => {
                    let owner_id = ref_str("owner")?;
                    PointerClassification::ToMemberFunction { owner: intern_type_by_id(unit, &owner_id, types, decls)? }
                }
                _ => PointerClassification::Plain,
            };
            TypeKind::PointerType(PointerType { pointee, classification })
        }
        "LValueReferenceType" => {
            let rid = ref_str("referred")?;
            TypeKind::LValueReferenceType { referred: intern_type_by_id(unit, &rid, types, decls)? }
        }
        "RValueReferenceType" => {
            let rid = ref_str("referred")?;
            TypeKind::RValueReferenceType { referred: intern_type_by_id(unit, &rid, types, decls)? }
        }
        "ArrayType" => {
            let eid = ref_str("element")?;
            let element = intern_type_by_id(unit, &eid, types, decls)?;
            let extent = v.get("extent").and_then(Value::as_u64);
            TypeKind::ArrayType(ArrayType { element, extent })
        }
        "RecordType" => {
            let did = ref_str("declaration")?;
            let declaration = intern_decl_by_id(unit, &did, types, decls)?;
            TypeKind::RecordType { declaration }
        }
        "EnumType" | "ScopedEnumType" | "UnscopedEnumType" => {
            let did = ref_str("declaration")?;
            let uid = ref_str("underlying")?;
            let declaration = intern_decl_by_id(unit, &did, types, decls)?;
            let underlying = intern_type_by_id(unit, &uid, types, decls)?;
            let e = EnumType { declaration, underlying };
            match kind_str.as_str() {
                "ScopedEnumType" => TypeKind::ScopedEnumType(e),
                "UnscopedEnumType" => TypeKind::UnscopedEnumType(e),
                _ => TypeKind::EnumType(e),
            }
        }
        "FunctionType" => {
            let rid = ref_str("return")?;
            let return_type = intern_type_by_id(unit, &rid, types, decls)?;
            let mut parameters = Vec::new();
            for p in v.get("parameters").and_then(Value::as_array).into_iter().flatten() {
                let pid = p.as_str().ok_or_else(|| MetaError::Json(missing("parameters[]")))?;
                parameters.push(intern_type_by_id(unit, pid, types, decls)?);
            }
            let is_variadic = v.get("is_variadic").and_then(Value::as_bool).unwrap_or(false);
            let is_noexcept = v.get("is_noexcept").and_then(Value::as_bool).unwrap_or(false);
            TypeKind::FunctionType(FunctionType { return_type, parameters, is_variadic, is_noexcept })
        }
        other => {
            log::warn!("unknown type kind `{other}` in meta unit json, treating as Unsupported");
            TypeKind::UnsupportedType
        }
    };

    Ok(unit.intern_type(Type::new(common, kind)))
}

fn common_decl(v: &Value) -> Result<DeclCommon> {
    let mut annotations = Vec::new();
    for a in v.get("annotations").and_then(Value::as_array).into_iter().flatten() {
        if let Some(s) = a.as_str() {
            annotations.push(s.to_string());
        }
    }
    Ok(DeclCommon {
        id: field_str(v, "id")?,
        name: field_str(v, "name")?,
        qualified_name: field_str(v, "qualified_name")?,
        origin_in_main_file: v.get("origin_in_main_file").and_then(Value::as_bool).unwrap_or(false),
        annotations,
    })
}

fn decl_ids_from(v: &Value, field: &str, unit: &mut MetaUnit, types: &[Value], decls: &[Value]) -> Result<Vec<DeclRef>> {
    let mut out = Vec::new();
    for item in v.get(field).and_then(Value::as_array).into_iter().flatten() {
        let id = item.as_str().ok_or_else(|| MetaError::Json(missing(field)))?;
        out.push(intern_decl_by_id(unit, id, types, decls)?);
    }
    Ok(out)
}

fn json_to_callable(v: &Value, unit: &mut MetaUnit, types: &[Value], decls: &[Value]) -> Result<CallableDecl> {
    let return_id = field_str(v, "return_type")?;
    let return_type = intern_type_by_id(unit, &return_id, types, decls)?;
    let parameters = decl_ids_from(v, "parameters", unit, types, decls)?;
    Ok(CallableDecl {
        mangled_name: v.get("mangled_name").and_then(Value::as_str).map(str::to_string),
        return_type,
        parameters,
        is_const: v.get("is_const").and_then(Value::as_bool).unwrap_or(false),
        is_virtual: v.get("is_virtual").and_then(Value::as_bool).unwrap_or(false),
        is_static: v.get("is_static").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn json_to_decl(unit: &mut MetaUnit, v: &Value, types: &[Value], decls: &[Value]) -> Result<DeclRef> {
    let id = field_str(v, "id")?;
    if let Some(r) = unit.find_decl(&id) {
        return Ok(r);
    }
    let common = common_decl(v)?;
    let kind_str = field_str(v, "kind")?;

    let kind = match kind_str.as_str() {
        "EnumDecl" => {
            let underlying_id = field_str(v, "underlying_type")?;
            let underlying_type = intern_type_by_id(unit, &underlying_id, types, decls)?;
            let is_scoped = v.get("is_scoped").and_then(Value::as_bool).unwrap_or(false);
            let mut enumerators = Vec::new();
            for en in v.get("enumerators").and_then(Value::as_array).into_iter().flatten() {
                enumerators.push(crate::decl::Enumerator {
                    name: field_str(en, "name")?,
                    signed_value: en.get("signed_value").and_then(Value::as_i64).unwrap_or(0),
                    unsigned_value: en.get("unsigned_value").and_then(Value::as_u64).unwrap_or(0),
                });
            }
            DeclKind::EnumDecl(EnumDecl { underlying_type, is_scoped, enumerators })
        }
        "RecordDecl" => {
            let mut bases = Vec::new();
            for b in v.get("bases").and_then(Value::as_array).into_iter().flatten() {
                let rid = field_str(b, "record")?;
                let record = intern_decl_by_id(unit, &rid, types, decls)?;
                let visibility = visibility_from_str(b.get("visibility").and_then(Value::as_str).unwrap_or("public"));
                bases.push(BaseRecord { record, visibility });
            }
            let fields = decl_ids_from(v, "fields", unit, types, decls)?;
            let constructors = decl_ids_from(v, "constructors", unit, types, decls)?;
            let destructor = match v.get("destructor").and_then(Value::as_str) {
                Some(did) => Some(intern_decl_by_id(unit, did, types, decls)?),
                None => None,
            };
            let methods = decl_ids_from(v, "methods", unit, types, decls)?;
            let static_methods = decl_ids_from(v, "static_methods", unit, types, decls)?;
            DeclKind::RecordDecl(RecordDecl {
                kind: record_kind_from_str(v.get("record_kind").and_then(Value::as_str).unwrap_or("struct")),
                size: v.get("size").and_then(Value::as_u64).unwrap_or(0),
                align: v.get("align").and_then(Value::as_u64).unwrap_or(0),
                bases,
                fields,
                constructors,
                destructor,
                methods,
                static_methods,
            })
        }
        "FieldDecl" => {
            let type_id = field_str(v, "field_type")?;
            let field_type = intern_type_by_id(unit, &type_id, types, decls)?;
            DeclKind::FieldDecl(FieldDecl {
                index: v.get("index").and_then(Value::as_u64).unwrap_or(0) as u32,
                offset_bytes: v.get("offset_bytes").and_then(Value::as_u64).unwrap_or(0),
                field_type,
                visibility: visibility_from_str(v.get("visibility").and_then(Value::as_str).unwrap_or("public")),
                is_static: v.get("is_static").and_then(Value::as_bool).unwrap_or(false),
                is_const: v.get("is_const").and_then(Value::as_bool).unwrap_or(false),
            })
        }
        "FunctionDecl" => DeclKind::FunctionDecl(json_to_callable(v, unit, types, decls)?),
        "MethodDecl" => DeclKind::MethodDecl(json_to_callable(v, unit, types, decls)?),
        "ConstructorDecl" => DeclKind::ConstructorDecl(json_to_callable(v, unit, types, decls)?),
        "DestructorDecl" => DeclKind::DestructorDecl(json_to_callable(v, unit, types, decls)?),
        "ConversionDecl" => DeclKind::ConversionDecl(json_to_callable(v, unit, types, decls)?),
        "ParmVarDecl" => {
            let type_id = field_str(v, "param_type")?;
            let param_type = intern_type_by_id(unit, &type_id, types, decls)?;
            DeclKind::ParmVarDecl(ParameterDecl { index: v.get("index").and_then(Value::as_u64).unwrap_or(0) as u32, param_type })
        }
        "VarDecl" => {
            let type_id = field_str(v, "var_type")?;
            let var_type = intern_type_by_id(unit, &type_id, types, decls)?;
            DeclKind::VarDecl(VariableDecl { var_type, is_static: v.get("is_static").and_then(Value::as_bool).unwrap_or(false) })
        }
        other => return Err(MetaError::Json(missing(&format!("unknown decl kind `{other}`")))),
    };

    Ok(unit.intern_decl(Declaration::new(common, kind)))
}
