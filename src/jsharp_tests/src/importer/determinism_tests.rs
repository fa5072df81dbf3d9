use crate::fixtures::{class, prepare};
use jsharp_model::{
    Attr, Attributes, CompilerOptions, FieldDef, MethodDef, Param, PropertyDef, SymbolStore,
    SymbolStoreBuilder, TypeDef, TypeKind, TypeRef,
};

/// A store with a little of everything, built identically on every call.
fn build_store() -> SymbolStore {
    let mut b = SymbolStoreBuilder::new();
    let asm = b.add_assembly("app", Attributes::default());
    let object = TypeRef::Def(b.core().object);

    let iface = b.add_type(TypeDef {
        kind: TypeKind::Interface,
        ..class(asm, "Lib", "IThing")
    });
    let iface_m = b.add_method(
        iface,
        MethodDef {
            name: "Process".into(),
            ..MethodDef::default()
        },
    );

    let base = b.add_type(class(asm, "Lib", "Base"));
    b.add_method(
        base,
        MethodDef {
            name: "Run".into(),
            is_virtual: true,
            ..MethodDef::default()
        },
    );

    let t = b.add_type(TypeDef {
        base_type: Some(base),
        interfaces: vec![iface],
        ..class(asm, "Lib", "Widget")
    });
    b.add_method(
        t,
        MethodDef {
            name: "Process".into(),
            implemented_interface_methods: vec![iface_m],
            ..MethodDef::default()
        },
    );
    b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            params: vec![Param::new("x", object.clone())],
            ..MethodDef::default()
        },
    );
    b.add_method(
        t,
        MethodDef {
            name: ".ctor".into(),
            is_ctor: true,
            ..MethodDef::default()
        },
    );
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Name".into(),
            ..MethodDef::default()
        },
    );
    b.add_property(
        t,
        PropertyDef {
            name: "Name".into(),
            getter: Some(getter),
            ..PropertyDef::default()
        },
    );
    b.add_field(
        t,
        FieldDef {
            name: "Count".into(),
            ty: object,
            ..FieldDef::default()
        },
    );
    let hidden = b.add_type(TypeDef {
        is_public: false,
        attributes: Attributes::new(vec![Attr::Serializable]),
        ..class(asm, "Lib", "Hidden")
    });
    b.add_method(
        hidden,
        MethodDef {
            name: "Secret".into(),
            ..MethodDef::default()
        },
    );
    b.finish()
}

fn snapshot(c: &jsharp::Compilation) -> String {
    let mut parts = Vec::new();
    for t in &c.store.types {
        parts.push(serde_json::to_string(c.importer.get_type_semantics(t.id)).expect("serialize"));
    }
    for m in &c.store.methods {
        let rendered = if m.is_ctor {
            serde_json::to_string(c.importer.get_constructor_semantics(m.id)).expect("serialize")
        } else {
            serde_json::to_string(c.importer.get_method_semantics(m.id)).expect("serialize")
        };
        parts.push(rendered);
    }
    for p in &c.store.properties {
        parts.push(
            serde_json::to_string(c.importer.get_property_semantics(p.id)).expect("serialize"),
        );
    }
    for f in &c.store.fields {
        parts.push(serde_json::to_string(c.importer.get_field_semantics(f.id)).expect("serialize"));
    }
    parts.join("\n")
}

#[test]
fn importing_the_same_graph_twice_is_bit_identical() {
    let options = CompilerOptions {
        minimize_names: true,
        ..CompilerOptions::default()
    };
    let first = prepare(build_store(), options);
    let second = prepare(build_store(), options);
    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test]
fn importing_without_minification_is_also_deterministic() {
    let first = prepare(build_store(), CompilerOptions::default());
    let second = prepare(build_store(), CompilerOptions::default());
    assert_eq!(snapshot(&first), snapshot(&second));
}
