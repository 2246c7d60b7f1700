use lux_analysis::emission_order;
use lux_codegen::{Generator, GeneratorConfig};
use lux_meta::{
    DeclCommon, DeclKind, Declaration, EnumDecl, Enumerator, FieldDecl, MetaUnit, PointerClassification,
    PointerType, RecordDecl, RecordKind, Type, TypeCommon, TypeKind, Visibility,
};

fn builtin(unit: &mut MetaUnit, spelling: &str, size: u64) -> lux_meta::TypeRef {
    unit.intern_type(Type::new(
        TypeCommon {
            id: spelling.to_string(),
            spelling: spelling.to_string(),
            size: Some(size),
            align: Some(size),
            is_const: false,
            is_volatile: false,
            hash: lux_meta::fnv1a(spelling),
        },
        TypeKind::BuiltinType,
    ))
}

/// `enum class E : int { X = 100, Y = 200, Z = 4 }`.
#[test]
fn scoped_enum_artifact_reports_ordered_elements_and_to_string() {
    let mut unit = MetaUnit::new("scenario2", "v1");
    let int_ty = builtin(&mut unit, "int", 4);

    let mut common = DeclCommon::new("E", "E", "E");
    common.origin_in_main_file = true;
    common.annotations = vec!["reflect".into()];
    let e = unit.intern_decl(Declaration::new(
        common,
        DeclKind::EnumDecl(EnumDecl {
            underlying_type: int_ty,
            is_scoped: true,
            enumerators: vec![
                Enumerator { name: "X".into(), signed_value: 100, unsigned_value: 100 },
                Enumerator { name: "Y".into(), signed_value: 200, unsigned_value: 200 },
                Enumerator { name: "Z".into(), signed_value: 4, unsigned_value: 4 },
            ],
        }),
    ));
    unit.intern_type(Type::new(
        TypeCommon {
            id: "E".into(),
            spelling: "E".into(),
            size: Some(4),
            align: Some(4),
            is_const: false,
            is_volatile: false,
            hash: lux_meta::fnv1a("E"),
        },
        TypeKind::ScopedEnumType(lux_meta::EnumType { declaration: e, underlying: int_ty }),
    ));

    let order = emission_order(&unit);
    let generator = Generator::new(&GeneratorConfig::default()).unwrap();
    let artifacts = generator.generate(&unit, &order, &GeneratorConfig::default()).unwrap();

    let x_pos = artifacts.static_artifact.find("\"X\"").unwrap();
    let y_pos = artifacts.static_artifact.find("\"Y\"").unwrap();
    let z_pos = artifacts.static_artifact.find("\"Z\"").unwrap();
    assert!(x_pos < y_pos && y_pos < z_pos, "enumerators stay in declared order");
    assert!(artifacts.static_artifact.contains("is_scoped = true"));
    assert!(artifacts.static_artifact.contains(r#"case static_cast<value_type>(200): return "Y";"#));
}

/// `struct Node { Node* next; }` — the static
/// artifact forward-declares `Node` ahead of its definition.
#[test]
fn self_referential_record_gets_a_forward_declaration() {
    let mut unit = MetaUnit::new("scenario4", "v1");

    let mut common = DeclCommon::new("Node", "Node", "Node");
    common.origin_in_main_file = true;
    common.annotations = vec!["reflect".into()];
    let node_ref = unit.intern_decl(Declaration::new(
        common,
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
        TypeKind::PointerType(PointerType { pointee: node_ty, classification: PointerClassification::ToObject }),
    ));
    let next = unit.intern_decl(Declaration::new(
        DeclCommon::new("Node::next", "next", "Node::next"),
        DeclKind::FieldDecl(FieldDecl {
            index: 0,
            offset_bytes: 0,
            field_type: ptr_ty,
            visibility: Visibility::Public,
            is_static: false,
            is_const: false,
        }),
    ));
    unit.patch_decl(node_ref, |d| {
        if let DeclKind::RecordDecl(r) = &mut d.kind {
            r.fields.push(next);
        }
    });

    let order = emission_order(&unit);
    let generator = Generator::new(&GeneratorConfig::default()).unwrap();
    let artifacts = generator.generate(&unit, &order, &GeneratorConfig::default()).unwrap();

    let forward_pos = artifacts.static_artifact.find("struct Node;").expect("forward declaration present");
    let def_pos = artifacts.static_artifact.find("struct type_meta<Node>").expect("definition present");
    assert!(forward_pos < def_pos, "forward declaration precedes the definition");
}
