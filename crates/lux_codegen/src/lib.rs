//! `lux_codegen` — the Generator Core: renders a static artifact and two
//! dynamic artifacts from a Meta Unit, via a logic-less template engine
//! fed only plain tree structures built from the unit.

mod context;
mod error;
mod generator;
mod naming;
mod paths;

pub use context::{build_context, RenderContext};
pub use error::{RenderError, Result};
pub use generator::{GeneratedArtifacts, Generator, GeneratorConfig};
pub use paths::{artifact_paths, ArtifactPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use lux_analysis::emission_order;
    use lux_meta::{
        CallableDecl, DeclCommon, DeclKind, Declaration, FieldDecl, MetaUnit, ParameterDecl,
        RecordDecl, RecordKind, Type, TypeCommon, TypeKind, Visibility,
    };

    fn builtin(unit: &mut MetaUnit, spelling: &str) -> lux_meta::TypeRef {
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

    /// `struct S { int a; double b; }`.
    fn sample_unit() -> MetaUnit {
        let mut unit = MetaUnit::new("sample", "v1");
        let int_ty = builtin(&mut unit, "int");
        let double_ty = builtin(&mut unit, "double");

        let a = unit.intern_decl(Declaration::new(
            DeclCommon::new("S::a", "a", "S::a"),
            DeclKind::FieldDecl(FieldDecl {
                index: 0,
                offset_bytes: 0,
                field_type: int_ty,
                visibility: Visibility::Public,
                is_static: false,
                is_const: false,
            }),
        ));
        let b = unit.intern_decl(Declaration::new(
            DeclCommon::new("S::b", "b", "S::b"),
            DeclKind::FieldDecl(FieldDecl {
                index: 1,
                offset_bytes: 8,
                field_type: double_ty,
                visibility: Visibility::Public,
                is_static: false,
                is_const: false,
            }),
        ));

        let area_return = builtin(&mut unit, "double");
        let area = unit.intern_decl(Declaration::new(
            DeclCommon::new("S::area", "area", "S::area"),
            DeclKind::MethodDecl(CallableDecl {
                mangled_name: None,
                return_type: area_return,
                parameters: vec![],
                is_const: true,
                is_virtual: false,
                is_static: false,
            }),
        ));

        let ctor_param = unit.intern_decl(Declaration::new(
            DeclCommon::new("S::S(int)::arg<0>", "arg<0>", "S::S(int)::arg<0>"),
            DeclKind::ParmVarDecl(ParameterDecl { index: 0, param_type: int_ty }),
        ));
        let ctor = unit.intern_decl(Declaration::new(
            DeclCommon::new("S::S(int)", "S", "S::S"),
            DeclKind::ConstructorDecl(CallableDecl {
                mangled_name: None,
                return_type: int_ty,
                parameters: vec![ctor_param],
                is_const: false,
                is_virtual: false,
                is_static: false,
            }),
        ));

        let mut common = DeclCommon::new("S", "S", "S");
        common.origin_in_main_file = true;
        common.annotations = vec!["reflect".into()];
        let s = unit.intern_decl(Declaration::new(
            common,
            DeclKind::RecordDecl(RecordDecl {
                kind: RecordKind::Struct,
                size: 16,
                align: 8,
                bases: vec![],
                fields: vec![a, b],
                constructors: vec![ctor],
                destructor: None,
                methods: vec![area],
                static_methods: vec![],
            }),
        ));
        unit.intern_type(Type::new(
            TypeCommon {
                id: "S".into(),
                spelling: "S".into(),
                size: Some(16),
                align: Some(8),
                is_const: false,
                is_volatile: false,
                hash: lux_meta::fnv1a("S"),
            },
            TypeKind::RecordType { declaration: s },
        ));

        unit
    }

    #[test]
    fn static_artifact_exposes_both_fields_in_declared_order() {
        let unit = sample_unit();
        let order = emission_order(&unit);
        let generator = Generator::new(&GeneratorConfig::default()).unwrap();
        let artifacts = generator.generate(&unit, &order, &GeneratorConfig::default()).unwrap();

        assert!(artifacts.static_artifact.contains("type_meta<S>"));
        let a_pos = artifacts.static_artifact.find("\"a\"").unwrap();
        let b_pos = artifacts.static_artifact.find("\"b\"").unwrap();
        assert!(a_pos < b_pos);
        assert!(artifacts.static_artifact.contains("S_S_ctor"));
    }

    #[test]
    fn dynamic_records_artifact_registers_the_constructor_and_field_getters() {
        let unit = sample_unit();
        let order = emission_order(&unit);
        let generator = Generator::new(&GeneratorConfig::default()).unwrap();
        let artifacts = generator.generate(&unit, &order, &GeneratorConfig::default()).unwrap();

        assert!(artifacts.dynamic_records.contains("S_a_get"));
        assert!(artifacts.dynamic_records.contains("S_S_ctor"));
        assert!(artifacts.dynamic_records.contains("register_all_records"));
    }

    /// Rendering the same Meta Unit twice must produce byte-identical
    /// output.
    #[test]
    fn rendering_twice_is_byte_identical() {
        let unit = sample_unit();
        let order = emission_order(&unit);
        let config = GeneratorConfig::default();
        let generator = Generator::new(&config).unwrap();

        let first = generator.generate(&unit, &order, &config).unwrap();
        let second = generator.generate(&unit, &order, &config).unwrap();
        assert_eq!(first.static_artifact, second.static_artifact);
        assert_eq!(first.dynamic_records, second.dynamic_records);
        assert_eq!(first.dynamic_functions, second.dynamic_functions);
    }

    #[test]
    fn missing_include_path_is_reported() {
        use std::path::{Path, PathBuf};
        let err = artifact_paths(
            Path::new("/outside/bar.hpp"),
            &[PathBuf::from("/project/include")],
            Path::new("/out"),
            ".meta.hpp",
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::MissingIncludePath(_)));
    }
}
