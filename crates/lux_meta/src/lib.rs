//! `lux_meta` — the owning, serializable model of a reflected translation
//! unit: the declaration graph, the type graph, and the stable identity
//! scheme that links them.

pub mod decl;
pub mod error;
pub mod ids;
pub mod json;
pub mod refs;
pub mod ty;
pub mod unit;

pub use decl::{
    BaseRecord, CallableDecl, DeclCommon, DeclKind, Declaration, EnumDecl, FieldDecl,
    ParameterDecl, RecordDecl, RecordKind, VariableDecl, Visibility, Enumerator,
};
pub use error::{MetaError, Result};
pub use ids::fnv1a;
pub use refs::{DeclRef, TypeRef};
pub use ty::{
    ArrayType, EnumType, FunctionType, PointerClassification, PointerType, Type, TypeCommon,
    TypeKind,
};
pub use unit::MetaUnit;

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(unit: &mut MetaUnit, spelling: &str) -> TypeRef {
        unit.intern_type(Type::new(
            TypeCommon {
                id: spelling.to_string(),
                spelling: spelling.to_string(),
                size: Some(4),
                align: Some(4),
                is_const: false,
                is_volatile: false,
                hash: fnv1a(spelling),
            },
            TypeKind::BuiltinType,
        ))
    }

    fn field(unit: &mut MetaUnit, owner: &str, name: &str, index: u32, offset: u64, ty: TypeRef) -> DeclRef {
        let id = format!("{owner}::{name}");
        unit.intern_decl(Declaration::new(
            DeclCommon::new(id, name, format!("{owner}::{name}")),
            DeclKind::FieldDecl(FieldDecl {
                index,
                offset_bytes: offset,
                field_type: ty,
                visibility: Visibility::Public,
                is_static: false,
                is_const: false,
            }),
        ))
    }

    /// `struct S { int a; double b; }`.
    #[test]
    fn scenario_record_with_two_fields() {
        let mut unit = MetaUnit::new("scenario1", "v1");
        let int_ty = builtin(&mut unit, "int");
        let double_ty = builtin(&mut unit, "double");
        let a = field(&mut unit, "S", "a", 0, 0, int_ty);
        let b = field(&mut unit, "S", "b", 1, 8, double_ty);

        let mut common = DeclCommon::new("S", "S", "S");
        common.origin_in_main_file = true;
        common.annotations = vec!["".to_string()];
        let s = unit.intern_decl(Declaration::new(
            common,
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 16,
                align: 8,
                bases: vec![],
                fields: vec![a, b],
                constructors: vec![],
                destructor: None,
                methods: vec![],
                static_methods: vec![],
            }),
        ));

        assert_eq!(unit.marked_records(), vec![s]);
        let rec = unit.decl(s).as_record().unwrap();
        assert_eq!(rec.fields.len(), 2);
        assert_eq!(unit.decl(rec.fields[0]).common.name, "a");
        assert_eq!(unit.decl(rec.fields[1]).common.name, "b");
        unit.validate().unwrap();
    }

    #[test]
    fn duplicate_id_intern_is_first_wins() {
        let mut unit = MetaUnit::new("dup", "v1");
        let t1 = builtin(&mut unit, "int");
        let t2 = builtin(&mut unit, "int");
        assert_eq!(t1, t2);
        assert_eq!(unit.types().len(), 1);
    }

    #[test]
    fn self_referential_pointer_round_trips() {
        let mut unit = MetaUnit::new("node", "v1");
        let mut common = DeclCommon::new("Node", "Node", "Node");
        common.origin_in_main_file = true;
        common.annotations = vec!["ptr".into()];

        // Reserve the record first with no fields, then intern the pointer
        // type back to it, then patch the record with the cyclic field.
        let node_ref = unit.intern_decl(Declaration::new(
            common,
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 16,
                align: 8,
                bases: vec![],
                fields: vec![],
                constructors: vec![],
                destructor: None,
                methods: vec![],
                static_methods: vec![],
            }),
        ));
        let record_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "Node".into(),
                spelling: "Node".into(),
                size: Some(16),
                align: Some(8),
                is_const: false,
                is_volatile: false,
                hash: fnv1a("Node"),
            },
            TypeKind::RecordType { declaration: node_ref },
        ));
        let ptr_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "Node*".into(),
                spelling: "Node *".into(),
                size: Some(8),
                align: Some(8),
                is_const: false,
                is_volatile: false,
                hash: fnv1a("Node*"),
            },
            TypeKind::PointerType(PointerType {
                pointee: record_ty,
                classification: PointerClassification::ToObject,
            }),
        ));
        let next = field(&mut unit, "Node", "next", 0, 0, ptr_ty);
        unit.patch_decl(node_ref, |d| {
            if let DeclKind::RecordDecl(r) = &mut d.kind {
                r.fields.push(next);
            }
        });
        unit.validate().unwrap();
        assert_eq!(unit.decl(node_ref).as_record().unwrap().fields, vec![next]);

        let json = unit.to_json();
        let reloaded = MetaUnit::from_json(&json).unwrap();

        // `from_json` re-interns on demand, so the reloaded arena can land
        // cross-references at different indices than the original (here,
        // `Node::next` gets pulled in ahead of `Node` because `Node`'s own
        // field list references it first). Comparing the raw `Vec<Declaration>`
        // would spuriously fail on index-shuffled-but-isomorphic arenas, so
        // compare each side's own id-addressed JSON, sorted by id, which
        // captures ids, edges and annotations independent of arena order.
        let mut original_decls = json["declarations"].as_array().unwrap().clone();
        let mut reloaded_decls = reloaded.to_json()["declarations"].as_array().unwrap().clone();
        original_decls.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        reloaded_decls.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        assert_eq!(original_decls, reloaded_decls);

        let mut original_types = json["types"].as_array().unwrap().clone();
        let mut reloaded_types = reloaded.to_json()["types"].as_array().unwrap().clone();
        original_types.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        reloaded_types.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        assert_eq!(original_types, reloaded_types);

        assert_eq!(json["marked"], reloaded.to_json()["marked"]);
        assert_eq!(reloaded.marked_records().len(), 1);

        // Re-serializing the reloaded unit must reproduce the same document
        // once both sides are normalized the same way (a second round trip
        // adds no further drift).
        let rereloaded = MetaUnit::from_json(&reloaded.to_json()).unwrap();
        let mut rereloaded_decls = rereloaded.to_json()["declarations"].as_array().unwrap().clone();
        rereloaded_decls.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        assert_eq!(reloaded_decls, rereloaded_decls);
    }
}
