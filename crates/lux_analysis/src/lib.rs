//! `lux_analysis` — the Type Dependency Analyzer: orders a Meta Unit's
//! types for emission so definitions precede uses wherever possible,
//! collapsing unavoidable cycles into strongly connected components.

mod graph;
mod order;

pub use order::{emission_order, Scc};

#[cfg(test)]
mod tests {
    use super::*;
    use lux_meta::{
        ArrayType, DeclCommon, DeclKind, Declaration, FieldDecl, FunctionType, MetaUnit,
        PointerClassification, PointerType, RecordDecl, RecordKind, Type, TypeCommon, TypeKind,
        TypeRef, Visibility,
    };

    fn builtin(unit: &mut MetaUnit, spelling: &str) -> TypeRef {
        unit.intern_type(Type::new(
            TypeCommon {
                id: spelling.to_string(),
                spelling: spelling.to_string(),
                size: Some(4),
                align: Some(4),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a(spelling),
            },
            TypeKind::BuiltinType,
        ))
    }

    fn field(unit: &mut MetaUnit, owner: &str, name: &str, index: u32, ty: TypeRef) -> lux_meta::DeclRef {
        let id = format!("{owner}::{name}");
        unit.intern_decl(Declaration::new(
            DeclCommon::new(id, name, format!("{owner}::{name}")),
            DeclKind::FieldDecl(FieldDecl {
                index,
                offset_bytes: 0,
                field_type: ty,
                visibility: Visibility::Public,
                is_static: false,
                is_const: false,
            }),
        ))
    }

    /// `struct Leaf { int a; }` followed by `struct Root { Leaf l; }` —
    /// `Leaf` must be emitted before `Root`.
    #[test]
    fn acyclic_record_chain_is_ordered_dependency_first() {
        let mut unit = MetaUnit::new("order1", "v1");
        let int_ty = builtin(&mut unit, "int");

        let a = field(&mut unit, "Leaf", "a", 0, int_ty);
        let leaf_ref = unit.intern_decl(Declaration::new(
            DeclCommon::new("Leaf", "Leaf", "Leaf"),
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 4,
                align: 4,
                bases: vec![],
                fields: vec![a],
                constructors: vec![],
                destructor: None,
                methods: vec![],
                static_methods: vec![],
            }),
        ));
        let leaf_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "Leaf".into(),
                spelling: "Leaf".into(),
                size: Some(4),
                align: Some(4),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("Leaf"),
            },
            TypeKind::RecordType { declaration: leaf_ref },
        ));

        let l = field(&mut unit, "Root", "l", 0, leaf_ty);
        let root_ref = unit.intern_decl(Declaration::new(
            DeclCommon::new("Root", "Root", "Root"),
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 4,
                align: 4,
                bases: vec![],
                fields: vec![l],
                constructors: vec![],
                destructor: None,
                methods: vec![],
                static_methods: vec![],
            }),
        ));
        let root_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "Root".into(),
                spelling: "Root".into(),
                size: Some(4),
                align: Some(4),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("Root"),
            },
            TypeKind::RecordType { declaration: root_ref },
        ));

        let sccs = emission_order(&unit);
        assert!(sccs.iter().all(|scc| !scc.is_cyclic()));
        let position_of = |ty: TypeRef| sccs.iter().position(|scc| scc.types.contains(&ty)).unwrap();
        assert!(position_of(int_ty) < position_of(leaf_ty));
        assert!(position_of(leaf_ty) < position_of(root_ty));
    }

    /// `struct Node { Node* next; }`: `Node` and its pointer type land in
    /// the same SCC.
    #[test]
    fn self_referential_record_forms_one_scc() {
        let mut unit = MetaUnit::new("order2", "v1");
        let node_ref = unit.intern_decl(Declaration::new(
            DeclCommon::new("Node", "Node", "Node"),
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 8,
                align: 8,
                bases: vec![],
                fields: vec![],
                constructors: vec![],
                destructor: None,
                methods: vec![],
                static_methods: vec![],
            }),
        ));
        let node_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "Node".into(),
                spelling: "Node".into(),
                size: Some(8),
                align: Some(8),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("Node"),
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
                hash: lux_meta::fnv1a("Node*"),
            },
            TypeKind::PointerType(PointerType {
                pointee: node_ty,
                classification: PointerClassification::ToObject,
            }),
        ));
        let next = field(&mut unit, "Node", "next", 0, ptr_ty);
        unit.patch_decl(node_ref, |d| {
            if let DeclKind::RecordDecl(r) = &mut d.kind {
                r.fields.push(next);
            }
        });

        let sccs = emission_order(&unit);
        let cyclic: Vec<&Scc> = sccs.iter().filter(|s| s.is_cyclic()).collect();
        assert_eq!(cyclic.len(), 1);
        assert!(cyclic[0].types.contains(&node_ty));
        assert!(cyclic[0].types.contains(&ptr_ty));
    }

    #[test]
    fn function_type_depends_on_return_and_parameters() {
        let mut unit = MetaUnit::new("order3", "v1");
        let int_ty = builtin(&mut unit, "int");
        let double_ty = builtin(&mut unit, "double");
        let fn_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "int(double)".into(),
                spelling: "int(double)".into(),
                size: None,
                align: None,
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("int(double)"),
            },
            TypeKind::FunctionType(FunctionType {
                return_type: int_ty,
                parameters: vec![double_ty],
                is_variadic: false,
                is_noexcept: false,
            }),
        ));

        let sccs = emission_order(&unit);
        let position_of = |ty: TypeRef| sccs.iter().position(|scc| scc.types.contains(&ty)).unwrap();
        assert!(position_of(int_ty) < position_of(fn_ty));
        assert!(position_of(double_ty) < position_of(fn_ty));
    }

    #[test]
    fn array_of_int_depends_on_int() {
        let mut unit = MetaUnit::new("order4", "v1");
        let int_ty = builtin(&mut unit, "int");
        let array_ty = unit.intern_type(Type::new(
            TypeCommon {
                id: "int[4]".into(),
                spelling: "int[4]".into(),
                size: Some(16),
                align: Some(4),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("int[4]"),
            },
            TypeKind::ArrayType(ArrayType {
                element: int_ty,
                extent: Some(4),
            }),
        ));
        let sccs = emission_order(&unit);
        let position_of = |ty: TypeRef| sccs.iter().position(|scc| scc.types.contains(&ty)).unwrap();
        assert!(position_of(int_ty) < position_of(array_ty));
    }
}
