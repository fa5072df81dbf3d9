use crate::fixtures::{app_builder, class, prepare};
use jsharp_import::{MetadataImporter, MethodSemantics};
use jsharp_model::{CompilerOptions, MethodDef, TypeDef};

#[test]
fn reserved_names_are_unavailable_in_the_type_and_its_derivatives() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    let derived = b.add_type(TypeDef {
        base_type: Some(base),
        ..class(asm, "", "Derived")
    });
    let grandchild = b.add_type(TypeDef {
        base_type: Some(derived),
        ..class(asm, "", "Grandchild")
    });
    let store = b.finish();

    let mut importer = MetadataImporter::new(CompilerOptions::default());
    importer.reserve_member_name(base, "taken", false);
    assert!(!importer.is_member_name_available(&store, base, "taken", false));
    assert!(!importer.is_member_name_available(&store, derived, "taken", false));
    assert!(!importer.is_member_name_available(&store, grandchild, "taken", false));
    assert!(importer.is_member_name_available(&store, base, "free", false));

    // Static reservations do not flow down the hierarchy.
    importer.reserve_member_name(base, "fixed", true);
    assert!(!importer.is_member_name_available(&store, base, "fixed", true));
    assert!(importer.is_member_name_available(&store, derived, "fixed", true));
}

#[test]
fn plugin_reservations_divert_derived_names() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    let store = b.finish();

    let mut compilation = jsharp::Compilation::new(store, CompilerOptions::default());
    compilation.importer.reserve_member_name(t, "run", false);
    compilation.prepare_all().expect("acyclic");
    assert_eq!(
        compilation.importer.get_method_semantics(m).name(),
        Some("run$1")
    );
}

#[test]
fn semantic_overrides_survive_member_processing() {
    let (mut b, asm) = app_builder();
    let t = b.add_type(class(asm, "", "Widget"));
    let m = b.add_method(
        t,
        MethodDef {
            name: "Run".into(),
            ..MethodDef::default()
        },
    );
    let store = b.finish();

    let mut compilation = jsharp::Compilation::new(store, CompilerOptions::default());
    compilation
        .importer
        .set_method_semantics(m, MethodSemantics::inline("pluginProvided({this})"));
    compilation.prepare_all().expect("acyclic");
    assert_eq!(
        compilation.importer.get_method_semantics(m),
        &MethodSemantics::inline("pluginProvided({this})")
    );
}
