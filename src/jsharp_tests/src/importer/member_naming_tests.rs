use crate::fixtures::{app_builder, class, prepare};
use jsharp_import::{EventSemantics, FieldSemantics, MethodSemantics, PropertySemantics};
use jsharp_model::{
    Attr, Attributes, CompilerOptions, DiagnosticCode, EventDef, FieldDef, InlineCodePayload,
    MethodDef, Param, PropertyDef, TypeDef, TypeKind, TypeRef,
};

fn method_name(sem: &MethodSemantics) -> &str {
    sem.name().expect("method has a script name")
}

#[test]
fn members_are_camel_cased_by_default() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "DoWork".into(),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(method_name(c.importer.get_method_semantics(m)), "doWork");
}

#[test]
fn overloads_take_unique_derivatives_in_signature_order() {
    let (mut b, asm) = app_builder();
    let int32 = TypeRef::Def(b.core().int32);
    let t = b.add_type(class(asm, "", "Widget"));
    let with_arg = b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            params: vec![Param::new("x", int32)],
            ..MethodDef::default()
        },
    );
    let no_arg = b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(method_name(c.importer.get_method_semantics(no_arg)), "run");
    assert_eq!(
        method_name(c.importer.get_method_semantics(with_arg)),
        "run$1"
    );
}

#[test]
fn explicitly_named_members_go_first_in_their_group() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let plain = b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    let named = b.add_method(
        t,
        MethodDef {
            name: "Perform".into(),
            attributes: Attributes::new(vec![Attr::ScriptName("run".into())]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(method_name(c.importer.get_method_semantics(named)), "run");
    assert_eq!(method_name(c.importer.get_method_semantics(plain)), "run$1");
}

#[test]
fn preserve_case_keeps_the_source_spelling() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "DoIt".into(),
            attributes: Attributes::new(vec![Attr::PreserveCase]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(method_name(c.importer.get_method_semantics(m)), "DoIt");
}

#[test]
fn reserved_identifiers_are_skipped_when_deriving() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Constructor".into(),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        method_name(c.importer.get_method_semantics(m)),
        "constructor$1"
    );
}

#[test]
fn reserved_explicit_name_reports() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    b.add_method(
        t,
        MethodDef {
            name: "Apply".into(),
            is_static: true,
            attributes: Attributes::new(vec![Attr::ScriptName("apply".into())]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7115)
    );
}

#[test]
fn properties_become_accessor_method_pairs() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Name".into(),
            ..MethodDef::default()
        },
    );
    let setter = b.add_detached_method(
        t,
        MethodDef {
            name: "set_Name".into(),
            ..MethodDef::default()
        },
    );
    let p = b.add_property(
        t,
        PropertyDef {
            name: "Name".into(),
            getter: Some(getter),
            setter: Some(setter),
            ..PropertyDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    match c.importer.get_property_semantics(p) {
        PropertySemantics::GetAndSetMethods { get, set } => {
            assert_eq!(method_name(get.as_ref().expect("getter")), "get_name");
            assert_eq!(method_name(set.as_ref().expect("setter")), "set_name");
        }
        other => panic!("expected accessor pair, got {:?}", other),
    }
    assert_eq!(
        method_name(c.importer.get_method_semantics(getter)),
        "get_name"
    );
}

#[test]
fn intrinsic_property_becomes_a_plain_field() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Value".into(),
            ..MethodDef::default()
        },
    );
    let p = b.add_property(
        t,
        PropertyDef {
            name: "Value".into(),
            getter: Some(getter),
            attributes: Attributes::new(vec![Attr::IntrinsicProperty]),
            ..PropertyDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_property_semantics(p),
        &PropertySemantics::Field {
            name: "value".into()
        }
    );
    assert_eq!(
        c.importer.get_method_semantics(getter),
        &MethodSemantics::NotUsable
    );
}

#[test]
fn intrinsic_indexer_with_one_parameter_is_a_native_indexer() {
    let (mut b, asm) = app_builder();
    let int32 = TypeRef::Def(b.core().int32);
    let t = b.add_type(class(asm, "", "Widget"));
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Item".into(),
            params: vec![Param::new("index", int32.clone())],
            ..MethodDef::default()
        },
    );
    let p = b.add_property(
        t,
        PropertyDef {
            name: "Item".into(),
            getter: Some(getter),
            is_indexer: true,
            index_params: vec![Param::new("index", int32)],
            attributes: Attributes::new(vec![Attr::IntrinsicProperty]),
            ..PropertyDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_property_semantics(p),
        &PropertySemantics::GetAndSetMethods {
            get: Some(MethodSemantics::NativeIndexer),
            set: None,
        }
    );
}

#[test]
fn intrinsic_property_on_an_override_reports_and_degrades() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Value".into(),
            ..MethodDef::default()
        },
    );
    let p = b.add_property(
        t,
        PropertyDef {
            name: "Value".into(),
            getter: Some(getter),
            is_virtual: true,
            attributes: Attributes::new(vec![Attr::IntrinsicProperty]),
            ..PropertyDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7109)
    );
    assert!(matches!(
        c.importer.get_property_semantics(p),
        PropertySemantics::GetAndSetMethods { .. }
    ));
}

#[test]
fn script_skip_static_expands_to_its_argument() {
    let (mut b, asm) = app_builder();
    let object = TypeRef::Def(b.core().object);
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Identity".into(),
            is_static: true,
            params: vec![Param::new("value", object)],
            attributes: Attributes::new(vec![Attr::ScriptSkip]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_method_semantics(m),
        &MethodSemantics::inline("{value}")
    );
}

#[test]
fn script_skip_instance_expands_to_the_receiver() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Self".into(),
            attributes: Attributes::new(vec![Attr::ScriptSkip]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_method_semantics(m),
        &MethodSemantics::inline("{this}")
    );
}

#[test]
fn script_skip_with_a_bad_signature_reports_and_degrades() {
    let (mut b, asm) = app_builder();
    let object = TypeRef::Def(b.core().object);
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "TwoArgs".into(),
            is_static: true,
            params: vec![
                Param::new("a", object.clone()),
                Param::new("b", object),
            ],
            attributes: Attributes::new(vec![Attr::ScriptSkip]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7103)
    );
    assert!(matches!(
        c.importer.get_method_semantics(m),
        MethodSemantics::NormalMethod { .. }
    ));
}

#[test]
fn script_alias_expands_to_the_alias_application() {
    let (mut b, asm) = app_builder();
    let object = TypeRef::Def(b.core().object);
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Log".into(),
            is_static: true,
            params: vec![Param::new("msg", object)],
            attributes: Attributes::new(vec![Attr::ScriptAlias("console.log".into())]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_method_semantics(m),
        &MethodSemantics::inline("console.log({msg})")
    );
}

#[test]
fn inline_code_is_validated() {
    let (mut b, asm) = app_builder();
    let object = TypeRef::Def(b.core().object);
    let t = b.add_type(class(asm, "", "Widget"));
    let good = b.add_method(
        t,
        MethodDef {
            name: "Good".into(),
            params: vec![Param::new("x", object.clone())],
            attributes: Attributes::new(vec![Attr::InlineCode(InlineCodePayload {
                code: "{this}.go({x})".into(),
                ..InlineCodePayload::default()
            })]),
            ..MethodDef::default()
        },
    );
    let bad = b.add_method(
        t,
        MethodDef {
            name: "Bad".into(),
            params: vec![Param::new("x", object)],
            attributes: Attributes::new(vec![Attr::InlineCode(InlineCodePayload {
                code: "{unknown}".into(),
                ..InlineCodePayload::default()
            })]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_method_semantics(good),
        &MethodSemantics::inline("{this}.go({x})")
    );
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7101)
    );
    assert!(matches!(
        c.importer.get_method_semantics(bad),
        MethodSemantics::NormalMethod { .. }
    ));
}

#[test]
fn instance_method_on_first_argument_synthesizes_a_template() {
    let (mut b, asm) = app_builder();
    let object = TypeRef::Def(b.core().object);
    let t = b.add_type(class(asm, "", "Extensions"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Format".into(),
            is_static: true,
            params: vec![
                Param::new("s", object.clone()),
                Param::new("x", object),
            ],
            attributes: Attributes::new(vec![Attr::InstanceMethodOnFirstArgument]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_method_semantics(m),
        &MethodSemantics::inline("{s}.format({x})")
    );
}

#[test]
fn enumerate_as_array_is_only_legal_on_get_enumerator() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let good = b.add_method(
        t,
        MethodDef {
            name: "GetEnumerator".into(),
            attributes: Attributes::new(vec![Attr::EnumerateAsArray]),
            ..MethodDef::default()
        },
    );
    let bad = b.add_method(
        t,
        MethodDef {
            name: "Other".into(),
            attributes: Attributes::new(vec![Attr::EnumerateAsArray]),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(matches!(
        c.importer.get_method_semantics(good),
        MethodSemantics::NormalMethod {
            enumerate_as_array: true,
            ..
        }
    ));
    assert!(matches!(
        c.importer.get_method_semantics(bad),
        MethodSemantics::NormalMethod {
            enumerate_as_array: false,
            ..
        }
    ));
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7105)
    );
}

#[test]
fn overrides_inherit_the_base_semantics() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    let base_m = b.add_method(
        base,
        MethodDef {
            name: "Original".into(),
            is_virtual: true,
            attributes: Attributes::new(vec![Attr::ScriptName("customName".into())]),
            ..MethodDef::default()
        },
    );
    let derived = b.add_type(TypeDef {
        base_type: Some(base),
        ..class(asm, "", "Derived")
    });
    let derived_m = b.add_method(
        derived,
        MethodDef {
            name: "Original".into(),
            is_override: true,
            overridden: Some(base_m),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        method_name(c.importer.get_method_semantics(derived_m)),
        "customName"
    );
}

#[test]
fn enumerate_as_array_propagates_to_overrides() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    let base_m = b.add_method(
        base,
        MethodDef {
            name: "GetEnumerator".into(),
            is_virtual: true,
            attributes: Attributes::new(vec![Attr::EnumerateAsArray]),
            ..MethodDef::default()
        },
    );
    let derived = b.add_type(TypeDef {
        base_type: Some(base),
        ..class(asm, "", "Derived")
    });
    let derived_m = b.add_method(
        derived,
        MethodDef {
            name: "GetEnumerator".into(),
            is_override: true,
            overridden: Some(base_m),
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(matches!(
        c.importer.get_method_semantics(derived_m),
        MethodSemantics::NormalMethod {
            enumerate_as_array: true,
            ..
        }
    ));
}

#[test]
fn interface_implementations_inherit_the_interface_name() {
    let (mut b, asm) = app_builder();
    let iface = b.add_type(TypeDef {
        kind: TypeKind::Interface,
        ..class(asm, "", "IRunner")
    });
    let iface_m = b.add_method(
        iface,
        MethodDef {
            name: "Do".into(),
            attributes: Attributes::new(vec![Attr::ScriptName("go".into())]),
            ..MethodDef::default()
        },
    );
    let t = b.add_type(TypeDef {
        interfaces: vec![iface],
        ..class(asm, "", "Runner")
    });
    let m = b.add_method(
        t,
        MethodDef {
            name: "Do".into(),
            implemented_interface_methods: vec![iface_m],
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(method_name(c.importer.get_method_semantics(m)), "go");
}

#[test]
fn disagreeing_interface_implementations_report() {
    let (mut b, asm) = app_builder();
    let first = b.add_type(TypeDef {
        kind: TypeKind::Interface,
        ..class(asm, "", "IFirst")
    });
    let first_m = b.add_method(
        first,
        MethodDef {
            name: "Do".into(),
            attributes: Attributes::new(vec![Attr::ScriptName("go".into())]),
            ..MethodDef::default()
        },
    );
    let second = b.add_type(TypeDef {
        kind: TypeKind::Interface,
        ..class(asm, "", "ISecond")
    });
    let second_m = b.add_method(
        second,
        MethodDef {
            name: "Do".into(),
            attributes: Attributes::new(vec![Attr::ScriptName("move".into())]),
            ..MethodDef::default()
        },
    );
    let t = b.add_type(TypeDef {
        interfaces: vec![first, second],
        ..class(asm, "", "Runner")
    });
    b.add_method(
        t,
        MethodDef {
            name: "Do".into(),
            implemented_interface_methods: vec![first_m, second_m],
            ..MethodDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7107)
    );
}

#[test]
fn unrelated_bases_contributing_the_same_name_are_ambiguous() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    b.add_method(
        base,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    let iface = b.add_type(TypeDef {
        kind: TypeKind::Interface,
        ..class(asm, "", "IRunner")
    });
    b.add_method(
        iface,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    b.add_type(TypeDef {
        base_type: Some(base),
        interfaces: vec![iface],
        ..class(asm, "", "Both")
    });
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7016)
    );
}

#[test]
fn named_values_enum_fields_become_string_constants() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(TypeDef {
        kind: TypeKind::Enum,
        attributes: Attributes::new(vec![Attr::NamedValues]),
        ..class(asm, "", "Color")
    });
    let f = b.add_field(
        t,
        FieldDef {
            name: "DarkRed".into(),
            is_static: true,
            is_const: true,
            ..FieldDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_field_semantics(f),
        &FieldSemantics::StringConstant {
            name: Some("darkRed".into()),
            value: "darkRed".into(),
        }
    );
}

#[test]
fn numeric_enum_fields_become_numeric_constants() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(TypeDef {
        kind: TypeKind::Enum,
        ..class(asm, "", "Color")
    });
    let f = b.add_field(
        t,
        FieldDef {
            name: "Red".into(),
            is_static: true,
            is_const: true,
            const_value: Some(jsharp_model::ConstValue::Num(2.0)),
            ..FieldDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_field_semantics(f),
        &FieldSemantics::NumericConstant {
            name: Some("red".into()),
            value: 2.0,
        }
    );
}

#[test]
fn inline_constants_lose_their_name() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let f = b.add_field(
        t,
        FieldDef {
            name: "Max".into(),
            is_static: true,
            is_const: true,
            const_value: Some(jsharp_model::ConstValue::Num(64.0)),
            attributes: Attributes::new(vec![Attr::InlineConstant]),
            ..FieldDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert_eq!(
        c.importer.get_field_semantics(f),
        &FieldSemantics::NumericConstant {
            name: None,
            value: 64.0,
        }
    );
}

#[test]
fn inline_constant_on_a_non_const_field_reports() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let f = b.add_field(
        t,
        FieldDef {
            name: "Max".into(),
            attributes: Attributes::new(vec![Attr::InlineConstant]),
            ..FieldDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    assert!(
        c.importer
            .diagnostics
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::JSE7114)
    );
    assert_eq!(
        c.importer.get_field_semantics(f),
        &FieldSemantics::Field { name: "max".into() }
    );
}

#[test]
fn events_become_add_and_remove_pairs() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let adder = b.add_detached_method(
        t,
        MethodDef {
            name: "add_Changed".into(),
            ..MethodDef::default()
        },
    );
    let remover = b.add_detached_method(
        t,
        MethodDef {
            name: "remove_Changed".into(),
            ..MethodDef::default()
        },
    );
    let e = b.add_event(
        t,
        EventDef {
            name: "Changed".into(),
            adder: Some(adder),
            remover: Some(remover),
            ..EventDef::default()
        },
    );
    let c = prepare(b.finish(), CompilerOptions::default());
    match c.importer.get_event_semantics(e) {
        EventSemantics::AddAndRemoveMethods { add, remove } => {
            assert_eq!(method_name(add.as_ref().expect("adder")), "add_changed");
            assert_eq!(
                method_name(remove.as_ref().expect("remover")),
                "remove_changed"
            );
        }
        other => panic!("expected add/remove pair, got {:?}", other),
    }
}

#[test]
fn backing_field_names_are_memoized_and_sequential() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let getter = b.add_detached_method(
        t,
        MethodDef {
            name: "get_Name".into(),
            ..MethodDef::default()
        },
    );
    let p = b.add_property(
        t,
        PropertyDef {
            name: "Name".into(),
            getter: Some(getter),
            is_auto: true,
            ..PropertyDef::default()
        },
    );
    let adder = b.add_detached_method(
        t,
        MethodDef {
            name: "add_Changed".into(),
            ..MethodDef::default()
        },
    );
    let e = b.add_event(
        t,
        EventDef {
            name: "Changed".into(),
            adder: Some(adder),
            is_auto: true,
            ..EventDef::default()
        },
    );
    let mut c = prepare(b.finish(), CompilerOptions::default());
    let store = c.store.clone();
    let first = c.importer.get_auto_property_backing_field_name(&store, p);
    let again = c.importer.get_auto_property_backing_field_name(&store, p);
    let second = c.importer.get_auto_event_backing_field_name(&store, e);
    assert_eq!(first, "$1");
    assert_eq!(again, "$1");
    assert_eq!(second, "$2");
}

#[test]
fn minimized_members_take_short_generated_names() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(TypeDef {
        is_public: false,
        ..class(asm, "", "Hidden")
    });
    let first = b.add_method(
        t,
        MethodDef {
            name: "Alpha".into(),
            ..MethodDef::default()
        },
    );
    let second = b.add_method(
        t,
        MethodDef {
            name: "Beta".into(),
            ..MethodDef::default()
        },
    );
    let options = CompilerOptions {
        minimize_names: true,
        ..CompilerOptions::default()
    };
    let c = prepare(b.finish(), options);
    assert_eq!(method_name(c.importer.get_method_semantics(first)), "$a");
    assert_eq!(method_name(c.importer.get_method_semantics(second)), "$b");
}
