use super::{assign_state, case, cont, estmt, machine};
use jsharp_rewriter::rewrite_body;
use jsharp_script::{Expr, ForInit, Stmt, VarDeclarator};

#[test]
fn declarations_hoist_to_one_statement_before_the_loop() {
    let body = Stmt::Block(vec![
        Stmt::VarDecl(vec![
            VarDeclarator::new("a", Some(Expr::num(0.0))),
            VarDeclarator::new("b", Some(Expr::num(0.0))),
            VarDeclarator::new("c", None),
        ]),
        Stmt::VarDecl(vec![
            VarDeclarator::new("d", None),
            VarDeclarator::new("e", None),
        ]),
        Stmt::For {
            init: Some(ForInit::Decl(vec![
                VarDeclarator::new("f", Some(Expr::num(0.0))),
                VarDeclarator::new("g", Some(Expr::num(1.0))),
                VarDeclarator::new("h", None),
            ])),
            test: None,
            update: None,
            body: Box::new(Stmt::Block(vec![])),
        },
        Stmt::labeled("lbl", Stmt::goto("lbl")),
    ]);

    let expected = Stmt::Block(vec![
        Stmt::VarDecl(vec![
            VarDeclarator::new("$state1", Some(Expr::num(0.0))),
            VarDeclarator::new("a", None),
            VarDeclarator::new("b", None),
            VarDeclarator::new("c", None),
            VarDeclarator::new("d", None),
            VarDeclarator::new("e", None),
            VarDeclarator::new("f", None),
            VarDeclarator::new("g", None),
            VarDeclarator::new("h", None),
        ]),
        machine(
            "$loop1",
            "$state1",
            vec![
                case(
                    0.0,
                    vec![
                        Stmt::expr(Expr::assign(Expr::ident("a"), Expr::num(0.0))),
                        Stmt::expr(Expr::assign(Expr::ident("b"), Expr::num(0.0))),
                        Stmt::For {
                            init: Some(ForInit::Expr(Expr::Comma(vec![
                                Expr::assign(Expr::ident("f"), Expr::num(0.0)),
                                Expr::assign(Expr::ident("g"), Expr::num(1.0)),
                            ]))),
                            test: None,
                            update: None,
                            body: Box::new(Stmt::Block(vec![])),
                        },
                        assign_state("$state1", 1.0),
                        cont("$loop1"),
                    ],
                ),
                case(1.0, vec![assign_state("$state1", 1.0), cont("$loop1")]),
            ],
        ),
    ]);

    assert_eq!(rewrite_body(&body), expected);
}

#[test]
fn for_in_declarations_hoist_too() {
    let body = Stmt::Block(vec![
        Stmt::ForIn {
            is_decl: true,
            name: "key".into(),
            object: Expr::ident("table"),
            body: Box::new(Stmt::Block(vec![])),
        },
        Stmt::labeled("lbl", Stmt::goto("lbl")),
    ]);

    let out = rewrite_body(&body);
    match &out {
        Stmt::Block(stmts) => match &stmts[0] {
            Stmt::VarDecl(decls) => {
                let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
                assert_eq!(names, vec!["$state1", "key"]);
            }
            other => panic!("expected the hoisting declaration, got {:?}", other),
        },
        other => panic!("expected a block, got {:?}", other),
    }
    let rendered = format!("{:?}", out);
    assert!(
        rendered.contains("is_decl: false"),
        "the loop no longer declares: {rendered}"
    );
}

#[test]
fn declarations_inside_nested_statements_hoist() {
    let body = Stmt::Block(vec![
        Stmt::if_then(
            Expr::ident("c"),
            Stmt::Block(vec![Stmt::var("inner", Some(Expr::num(7.0)))]),
        ),
        Stmt::labeled("lbl", Stmt::goto("lbl")),
    ]);

    let expected = Stmt::Block(vec![
        Stmt::VarDecl(vec![
            VarDeclarator::new("$state1", Some(Expr::num(0.0))),
            VarDeclarator::new("inner", None),
        ]),
        machine(
            "$loop1",
            "$state1",
            vec![
                case(
                    0.0,
                    vec![
                        Stmt::if_then(
                            Expr::ident("c"),
                            Stmt::Block(vec![Stmt::expr(Expr::assign(
                                Expr::ident("inner"),
                                Expr::num(7.0),
                            ))]),
                        ),
                        assign_state("$state1", 1.0),
                        cont("$loop1"),
                    ],
                ),
                case(1.0, vec![assign_state("$state1", 1.0), cont("$loop1")]),
            ],
        ),
    ]);

    assert_eq!(rewrite_body(&body), expected);
}

#[test]
fn initializer_less_declarations_emit_no_assignment() {
    let body = Stmt::Block(vec![
        Stmt::VarDecl(vec![VarDeclarator::new("x", None)]),
        estmt("a"),
        Stmt::labeled("lbl", Stmt::goto("lbl")),
    ]);

    let expected = Stmt::Block(vec![
        Stmt::VarDecl(vec![
            VarDeclarator::new("$state1", Some(Expr::num(0.0))),
            VarDeclarator::new("x", None),
        ]),
        machine(
            "$loop1",
            "$state1",
            vec![
                case(
                    0.0,
                    vec![estmt("a"), assign_state("$state1", 1.0), cont("$loop1")],
                ),
                case(1.0, vec![assign_state("$state1", 1.0), cont("$loop1")]),
            ],
        ),
    ]);

    assert_eq!(rewrite_body(&body), expected);
}
