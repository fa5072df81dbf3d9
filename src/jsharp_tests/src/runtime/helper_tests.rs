use super::core_compilation;
use crate::fixtures::{app_builder, class, prepare};
use jsharp_model::{CompilerOptions, TypeDef, TypeKind, TypeRef};
use jsharp_script::Expr;

fn script_call(c: &jsharp::Compilation, name: &str, args: Vec<Expr>) -> Expr {
    Expr::invoke(
        Expr::member(Expr::type_ref(c.store.core.script), name),
        args,
    )
}

#[test]
fn delegate_binding_helpers() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.bind(Expr::This, Expr::ident("f")),
        script_call(&c, "mkdel", vec![Expr::This, Expr::ident("f")])
    );
    assert_eq!(
        emitter.bind_first_parameter_to_this(Expr::ident("d")),
        script_call(&c, "thisFix", vec![Expr::ident("d")])
    );
}

#[test]
fn same_type_delegate_clones_elide() {
    let (mut b, asm) = app_builder();
    let d1 = b.add_type(TypeDef {
        kind: TypeKind::Delegate,
        ..class(asm, "", "Callback")
    });
    let d2 = b.add_type(TypeDef {
        kind: TypeKind::Delegate,
        ..class(asm, "", "OtherCallback")
    });
    let c = prepare(b.finish(), CompilerOptions::default());
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.clone_delegate(Expr::ident("d"), &TypeRef::Def(d1), &TypeRef::Def(d1)),
        Expr::ident("d")
    );
    assert_eq!(
        emitter.clone_delegate(Expr::ident("d"), &TypeRef::Def(d1), &TypeRef::Def(d2)),
        script_call(&c, "delegateClone", vec![Expr::ident("d")])
    );
}

#[test]
fn single_dimensional_arrays_use_the_native_constructor() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.create_array(Expr::Number(8.0)),
        Expr::new_object(Expr::type_ref(c.store.core.array), vec![Expr::Number(8.0)])
    );
}

#[test]
fn multidimensional_arrays_go_through_the_runtime() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.create_multidim_array(
            Expr::Number(0.0),
            vec![Expr::Number(2.0), Expr::Number(3.0)]
        ),
        script_call(
            &c,
            "multidimArray",
            vec![Expr::Number(0.0), Expr::Number(2.0), Expr::Number(3.0)]
        )
    );
    assert_eq!(
        emitter.multidim_array_get(Expr::ident("arr"), vec![Expr::ident("i"), Expr::ident("j")]),
        script_call(
            &c,
            "arrayGet",
            vec![Expr::ident("arr"), Expr::ident("i"), Expr::ident("j")]
        )
    );
    assert_eq!(
        emitter.multidim_array_set(
            Expr::ident("arr"),
            vec![Expr::ident("i")],
            Expr::ident("v")
        ),
        script_call(
            &c,
            "arraySet",
            vec![Expr::ident("arr"), Expr::ident("i"), Expr::ident("v")]
        )
    );
}

#[test]
fn iterator_block_constructors() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    let enumerator = emitter.make_enumerator(
        Expr::ident("moveNext"),
        Expr::ident("getCurrent"),
        None,
        Some(Expr::This),
    );
    assert_eq!(
        enumerator,
        Expr::new_object(
            Expr::type_ref(c.store.core.iterator_enumerator),
            vec![
                Expr::ident("moveNext"),
                Expr::ident("getCurrent"),
                Expr::Null,
                Expr::This,
            ]
        )
    );
    let enumerable = emitter.make_enumerable(Expr::ident("getEnumerator"));
    assert_eq!(
        enumerable,
        Expr::new_object(
            Expr::type_ref(c.store.core.iterator_enumerable),
            vec![Expr::ident("getEnumerator")]
        )
    );
}

#[test]
fn task_completion_primitives() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.create_task_completion_source(),
        Expr::new_object(Expr::type_ref(c.store.core.task_completion_source), vec![])
    );
    assert_eq!(
        emitter.set_async_result(Expr::ident("tcs"), None),
        Expr::invoke(
            Expr::member(Expr::ident("tcs"), "setResult"),
            vec![Expr::Null]
        )
    );
    let failed = emitter.set_async_exception(Expr::ident("tcs"), Expr::ident("err"));
    assert_eq!(
        failed,
        Expr::invoke(
            Expr::member(Expr::ident("tcs"), "setException"),
            vec![Expr::invoke(
                Expr::member(Expr::type_ref(c.store.core.exception), "wrap"),
                vec![Expr::ident("err")]
            )]
        )
    );
    assert_eq!(
        emitter.get_task_from_completion_source(Expr::ident("tcs")),
        Expr::member(Expr::ident("tcs"), "task")
    );
}

#[test]
fn base_calls_go_through_the_prototype() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    let c = prepare(b.finish(), CompilerOptions::default());
    let emitter = c.runtime_emitter();

    let method = Expr::member(
        Expr::member(Expr::type_ref(base), "prototype"),
        "run",
    );
    let plain = emitter.bind_base_call(
        &TypeRef::Def(base),
        "run",
        Expr::This,
        vec![Expr::ident("a")],
        false,
    );
    assert_eq!(
        plain,
        Expr::invoke(
            Expr::member(method.clone(), "call"),
            vec![Expr::This, Expr::ident("a")]
        )
    );
}

#[test]
fn expanded_base_calls_splice_literal_arrays_and_apply_otherwise() {
    let (mut b, asm) = app_builder();
    let base = b.add_type(class(asm, "", "Base"));
    let c = prepare(b.finish(), CompilerOptions::default());
    let emitter = c.runtime_emitter();
    let method = Expr::member(
        Expr::member(Expr::type_ref(base), "prototype"),
        "run",
    );

    let spliced = emitter.bind_base_call(
        &TypeRef::Def(base),
        "run",
        Expr::This,
        vec![
            Expr::ident("a"),
            Expr::ArrayLiteral(vec![Expr::ident("x"), Expr::ident("y")]),
        ],
        true,
    );
    assert_eq!(
        spliced,
        Expr::invoke(
            Expr::member(method.clone(), "call"),
            vec![
                Expr::This,
                Expr::ident("a"),
                Expr::ident("x"),
                Expr::ident("y")
            ]
        )
    );

    let applied = emitter.bind_base_call(
        &TypeRef::Def(base),
        "run",
        Expr::This,
        vec![Expr::ident("a"), Expr::ident("rest")],
        true,
    );
    assert_eq!(
        applied,
        Expr::invoke(
            Expr::member(method, "apply"),
            vec![
                Expr::This,
                Expr::invoke(
                    Expr::member(Expr::ArrayLiteral(vec![Expr::ident("a")]), "concat"),
                    vec![Expr::ident("rest")]
                )
            ]
        )
    );
}

#[test]
fn reflection_style_invocations() {
    let c = core_compilation();
    let emitter = c.runtime_emitter();
    assert_eq!(
        emitter.apply_constructor(Expr::ident("ctor"), Expr::ident("args")),
        script_call(
            &c,
            "applyConstructor",
            vec![Expr::ident("ctor"), Expr::ident("args")]
        )
    );
    assert_eq!(
        emitter.shallow_copy(Expr::ident("src"), Expr::ident("dst")),
        script_call(&c, "shallowCopy", vec![Expr::ident("src"), Expr::ident("dst")])
    );
}
