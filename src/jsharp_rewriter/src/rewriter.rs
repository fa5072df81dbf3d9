use crate::analysis::{self, NameAllocator};
use indexmap::{IndexMap, IndexSet};
use jsharp_script::{CatchClause, Expr, ForInit, Stmt, SwitchSection, VarDeclarator};
use std::collections::VecDeque;

/// Finished-state sentinel; dispatch loops break when they see it.
const FINISHED: i32 = -1;

/// Lowers a structured body containing gotos into an equivalent block whose
/// control flow is a dispatching loop per unbreakable region. Bodies with no
/// goto are returned unchanged, which also makes the rewrite idempotent: the
/// loop-and-switch form contains no goto.
pub fn rewrite_body(body: &Stmt) -> Stmt {
    if !analysis::contains_goto(body) {
        return body.clone();
    }
    let mut used = IndexSet::new();
    analysis::collect_used_names(body, &mut used);

    let mut rw = Rewriter {
        alloc: NameAllocator::new(used),
        hoisted: IndexSet::new(),
        spaces: Vec::new(),
        frames: Vec::new(),
    };
    let space = rw.new_space();
    let root_var = rw.spaces[space].var.clone();
    let entry = rw.fresh_state(space);
    let stmts = match body {
        Stmt::Block(v) => v.clone(),
        other => vec![other.clone()],
    };
    let machine = rw.build_machine(stmts, space, entry, FallOff::Sentinel);

    let mut decls = vec![VarDeclarator::new(root_var, Some(Expr::num(0.0)))];
    for name in rw.hoisted {
        decls.push(VarDeclarator::new(name, None));
    }
    Stmt::Block(vec![Stmt::VarDecl(decls), machine])
}

#[derive(Copy, Clone)]
enum FallOff {
    /// Assign the sentinel and break; used by outermost machines.
    Sentinel,
    /// Assign the given state and break; used by machines nested in a try.
    State(i32),
}

/// One state-variable universe. The outer machine and the machines of its
/// try regions share a space; catch and finally handlers get their own.
struct StateSpace {
    var: String,
    next_state: i32,
    labels: IndexMap<String, i32>,
}

/// One active dispatch loop during building, innermost last.
struct Frame {
    space: usize,
    loop_label: String,
    own_labels: IndexSet<String>,
}

struct Rewriter {
    alloc: NameAllocator,
    hoisted: IndexSet<String>,
    spaces: Vec<StateSpace>,
    frames: Vec<Frame>,
}

impl Rewriter {
    fn new_space(&mut self) -> usize {
        let var = self.alloc.state_var();
        self.spaces.push(StateSpace {
            var,
            next_state: 0,
            labels: IndexMap::new(),
        });
        self.spaces.len() - 1
    }

    fn fresh_state(&mut self, space: usize) -> i32 {
        let s = self.spaces[space].next_state;
        self.spaces[space].next_state += 1;
        s
    }

    fn label_state(&mut self, space: usize, label: &str) -> i32 {
        if let Some(&s) = self.spaces[space].labels.get(label) {
            return s;
        }
        let s = self.fresh_state(space);
        self.spaces[space].labels.insert(label.to_string(), s);
        s
    }

    /// The state already allocated to some label directly stacked on `stmt`.
    fn chain_allocated_state(&self, space: usize, stmt: &Stmt) -> Option<i32> {
        let mut cur = stmt;
        while let Stmt::Labeled { label, stmt } = cur {
            if let Some(&s) = self.spaces[space].labels.get(label) {
                return Some(s);
            }
            cur = stmt;
        }
        None
    }

    fn set_state(&self, space: usize, state: i32) -> Stmt {
        Stmt::expr(Expr::assign(
            Expr::ident(self.spaces[space].var.clone()),
            Expr::num(state as f64),
        ))
    }

    /// State assignment plus `continue` of the given dispatch loop.
    fn transition(&self, space: usize, loop_label: &str, state: i32) -> Vec<Stmt> {
        vec![
            self.set_state(space, state),
            Stmt::Continue(Some(loop_label.to_string())),
        ]
    }

    /// A goto rewritten in place: the innermost machine owning the label
    /// receives the new state, and its loop is continued. For a label
    /// outside the current try region this continues an outer loop, which
    /// runs any intervening finally blocks on the way out.
    fn make_jump(&mut self, label: &str) -> Vec<Stmt> {
        let idx = self
            .frames
            .iter()
            .rposition(|f| f.own_labels.contains(label))
            .unwrap_or_else(|| panic!("internal error: goto to undefined label '{}'", label));
        let space = self.frames[idx].space;
        let loop_label = self.frames[idx].loop_label.clone();
        let state = self.label_state(space, label);
        self.transition(space, &loop_label, state)
    }

    /// Labels at the splice level of a statement list: directly in the list,
    /// inside nested plain blocks, or stacked on another label. Labels inside
    /// loops, branches and functions are not section boundaries.
    fn section_labels(&self, stmts: &[Stmt]) -> IndexSet<String> {
        fn walk(stmts: &[Stmt], out: &mut IndexSet<String>) {
            for s in stmts {
                match s {
                    Stmt::Block(inner) => walk(inner, out),
                    Stmt::Labeled { label, stmt } => {
                        out.insert(label.clone());
                        walk(std::slice::from_ref(stmt), out);
                    }
                    _ => {}
                }
            }
        }
        let mut out = IndexSet::new();
        walk(stmts, &mut out);
        out
    }

    fn build_machine(
        &mut self,
        stmts: Vec<Stmt>,
        space: usize,
        entry: i32,
        fall_off: FallOff,
    ) -> Stmt {
        let loop_label = self.alloc.loop_label();
        let own_labels = self.section_labels(&stmts);
        self.frames.push(Frame {
            space,
            loop_label: loop_label.clone(),
            own_labels,
        });

        let mut queue: VecDeque<Stmt> = stmts.into();
        let mut sections: Vec<(i32, Vec<Stmt>)> = Vec::new();
        let mut state = entry;
        let mut body: Vec<Stmt> = Vec::new();
        // No statement has entered the current section yet; a label arriving
        // now can share its state instead of opening a new one.
        let mut virgin = true;
        let mut ended = false;

        while let Some(s) = queue.pop_front() {
            match s {
                Stmt::Block(inner) => {
                    for st in inner.into_iter().rev() {
                        queue.push_front(st);
                    }
                }
                Stmt::Empty => {}
                Stmt::Labeled { label, stmt }
                    if self
                        .frames
                        .last()
                        .map(|f| f.own_labels.contains(&label))
                        .unwrap_or(false) =>
                {
                    // Stacked labels collapse onto one state, so look through
                    // the chain for a state some goto already allocated.
                    let existing = self.spaces[space]
                        .labels
                        .get(&label)
                        .copied()
                        .or_else(|| self.chain_allocated_state(space, &stmt));
                    match existing {
                        Some(target) if target == state && virgin => {
                            self.spaces[space]
                                .labels
                                .entry(label)
                                .or_insert(target);
                            queue.push_front(*stmt);
                        }
                        Some(target) => {
                            self.spaces[space]
                                .labels
                                .entry(label)
                                .or_insert(target);
                            if !ended {
                                body.extend(self.transition(space, &loop_label, target));
                            }
                            sections.push((state, std::mem::take(&mut body)));
                            state = target;
                            virgin = true;
                            ended = false;
                            queue.push_front(*stmt);
                        }
                        None if virgin && !ended => {
                            self.spaces[space].labels.insert(label, state);
                            queue.push_front(*stmt);
                        }
                        None => {
                            let target = self.label_state(space, &label);
                            if !ended {
                                body.extend(self.transition(space, &loop_label, target));
                            }
                            sections.push((state, std::mem::take(&mut body)));
                            state = target;
                            virgin = true;
                            ended = false;
                            queue.push_front(*stmt);
                        }
                    }
                }
                Stmt::Goto(label) => {
                    body.extend(self.make_jump(&label));
                    virgin = false;
                    ended = true;
                }
                Stmt::VarDecl(decls) => {
                    for assign in self.lower_decl_exprs(&decls) {
                        body.push(Stmt::expr(assign));
                        virgin = false;
                        ended = false;
                    }
                }
                Stmt::Try {
                    body: try_body,
                    catch,
                    finally,
                } => {
                    // The try region occupies a section of its own.
                    if !(virgin && !ended) {
                        let s = self.fresh_state(space);
                        if !ended {
                            body.extend(self.transition(space, &loop_label, s));
                        }
                        sections.push((state, std::mem::take(&mut body)));
                        state = s;
                    }
                    let inner_stmts = match *try_body {
                        Stmt::Block(v) => v,
                        other => vec![other],
                    };
                    let (machine, after) = if inner_stmts.is_empty() {
                        // An empty try still gets the framing machine, with
                        // a default arm only.
                        let after = self.fresh_state(space);
                        body.push(self.set_state(space, after));
                        let inner_loop = self.alloc.loop_label();
                        let switch = Stmt::Switch {
                            discriminant: Expr::ident(self.spaces[space].var.clone()),
                            sections: vec![SwitchSection {
                                values: vec![None],
                                body: vec![Stmt::Break(Some(inner_loop.clone()))],
                            }],
                        };
                        let machine =
                            Stmt::labeled(inner_loop, Stmt::loop_forever(Stmt::Block(vec![switch])));
                        (machine, after)
                    } else {
                        let inner_entry = self.fresh_state(space);
                        let after = self.fresh_state(space);
                        body.push(self.set_state(space, inner_entry));
                        let machine =
                            self.build_machine(inner_stmts, space, inner_entry, FallOff::State(after));
                        (machine, after)
                    };
                    let catch_rw = catch.map(|c| CatchClause {
                        param: c.param,
                        body: Box::new(self.rewrite_handler(*c.body)),
                    });
                    let finally_rw = finally.map(|f| Box::new(self.rewrite_handler(*f)));
                    body.push(Stmt::Try {
                        body: Box::new(Stmt::Block(vec![machine])),
                        catch: catch_rw,
                        finally: finally_rw,
                    });
                    body.push(Stmt::Continue(Some(loop_label.clone())));
                    sections.push((state, std::mem::take(&mut body)));
                    state = after;
                    virgin = true;
                    ended = false;
                }
                Stmt::Return(_) | Stmt::Throw(_) => {
                    let lowered = self.rewrite_nested(&s);
                    body.push(lowered);
                    virgin = false;
                    ended = true;
                }
                other => {
                    let lowered = self.rewrite_nested(&other);
                    if !matches!(lowered, Stmt::Empty) {
                        body.push(lowered);
                        virgin = false;
                        ended = false;
                    }
                }
            }
        }

        if !ended {
            let final_state = match fall_off {
                FallOff::Sentinel => FINISHED,
                FallOff::State(n) => n,
            };
            body.push(self.set_state(space, final_state));
            body.push(Stmt::Break(Some(loop_label.clone())));
        }
        sections.push((state, body));
        self.frames.pop();

        let mut switch_sections: Vec<SwitchSection> = sections
            .into_iter()
            .map(|(s, body)| SwitchSection {
                values: vec![Some(Expr::num(s as f64))],
                body,
            })
            .collect();
        // Machines inside a try exit through their default arm when the
        // state belongs to an enclosing machine.
        if matches!(fall_off, FallOff::State(_)) {
            switch_sections.push(SwitchSection {
                values: vec![None],
                body: vec![Stmt::Break(Some(loop_label.clone()))],
            });
        }
        let switch = Stmt::Switch {
            discriminant: Expr::ident(self.spaces[space].var.clone()),
            sections: switch_sections,
        };
        Stmt::labeled(loop_label, Stmt::loop_forever(Stmt::Block(vec![switch])))
    }

    /// Catch and finally bodies: plain ones are lowered in place (their
    /// gotos may continue an outer loop), ones with internal labels become
    /// independent machines with a fresh state variable.
    fn rewrite_handler(&mut self, body: Stmt) -> Stmt {
        let stmts = match body {
            Stmt::Block(v) => v,
            other => vec![other],
        };
        if self.section_labels(&stmts).is_empty() {
            let rewritten: Vec<Stmt> = stmts
                .iter()
                .map(|s| self.rewrite_nested(s))
                .filter(|s| !matches!(s, Stmt::Empty))
                .collect();
            return Stmt::Block(rewritten);
        }
        let space = self.new_space();
        let var = self.spaces[space].var.clone();
        self.hoisted.insert(var.clone());
        let entry = self.fresh_state(space);
        let machine = self.build_machine(stmts, space, entry, FallOff::Sentinel);
        Stmt::Block(vec![
            Stmt::expr(Expr::assign(Expr::ident(var), Expr::num(entry as f64))),
            machine,
        ])
    }

    /// Statement rewriting inside a section: declarations hoist, gotos jump,
    /// everything else is rebuilt around its children. Function interiors
    /// belong to other closures and stay verbatim.
    fn rewrite_nested(&mut self, s: &Stmt) -> Stmt {
        match s {
            Stmt::VarDecl(decls) => {
                let assigns = self.lower_decl_exprs(decls);
                match assigns.len() {
                    0 => Stmt::Empty,
                    1 => Stmt::expr(assigns.into_iter().next().expect("length checked")),
                    _ => Stmt::Block(assigns.into_iter().map(Stmt::expr).collect()),
                }
            }
            Stmt::Goto(label) => Stmt::Block(self.make_jump(label)),
            Stmt::Block(stmts) => Stmt::Block(
                stmts
                    .iter()
                    .map(|s| self.rewrite_nested(s))
                    .filter(|s| !matches!(s, Stmt::Empty))
                    .collect(),
            ),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => Stmt::If {
                test: test.clone(),
                consequent: Box::new(self.rewrite_nested(consequent)),
                alternate: alternate
                    .as_ref()
                    .map(|a| Box::new(self.rewrite_nested(a))),
            },
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                let init = match init {
                    Some(ForInit::Decl(decls)) => {
                        let assigns = self.lower_decl_exprs(decls);
                        match assigns.len() {
                            0 => None,
                            1 => Some(ForInit::Expr(
                                assigns.into_iter().next().expect("length checked"),
                            )),
                            _ => Some(ForInit::Expr(Expr::Comma(assigns))),
                        }
                    }
                    other => other.clone(),
                };
                Stmt::For {
                    init,
                    test: test.clone(),
                    update: update.clone(),
                    body: Box::new(self.rewrite_nested(body)),
                }
            }
            Stmt::ForIn {
                is_decl,
                name,
                object,
                body,
            } => {
                if *is_decl {
                    self.hoisted.insert(name.clone());
                }
                Stmt::ForIn {
                    is_decl: false,
                    name: name.clone(),
                    object: object.clone(),
                    body: Box::new(self.rewrite_nested(body)),
                }
            }
            Stmt::While { test, body } => Stmt::While {
                test: test.clone(),
                body: Box::new(self.rewrite_nested(body)),
            },
            Stmt::DoWhile { body, test } => Stmt::DoWhile {
                body: Box::new(self.rewrite_nested(body)),
                test: test.clone(),
            },
            Stmt::Switch {
                discriminant,
                sections,
            } => Stmt::Switch {
                discriminant: discriminant.clone(),
                sections: sections
                    .iter()
                    .map(|sec| SwitchSection {
                        values: sec.values.clone(),
                        body: sec
                            .body
                            .iter()
                            .map(|s| self.rewrite_nested(s))
                            .filter(|s| !matches!(s, Stmt::Empty))
                            .collect(),
                    })
                    .collect(),
            },
            Stmt::Try {
                body,
                catch,
                finally,
            } => Stmt::Try {
                body: Box::new(self.rewrite_nested(body)),
                catch: catch.as_ref().map(|c| CatchClause {
                    param: c.param.clone(),
                    body: Box::new(self.rewrite_nested(&c.body)),
                }),
                finally: finally.as_ref().map(|f| Box::new(self.rewrite_nested(f))),
            },
            Stmt::Labeled { label, stmt } => Stmt::Labeled {
                label: label.clone(),
                stmt: Box::new(self.rewrite_nested(stmt)),
            },
            Stmt::FunctionDecl { .. } => s.clone(),
            other => other.clone(),
        }
    }

    /// Hoists the declared names and returns the surviving initializers as
    /// assignment expressions, in declaration order.
    fn lower_decl_exprs(&mut self, decls: &[VarDeclarator]) -> Vec<Expr> {
        let mut assigns = Vec::new();
        for d in decls {
            self.hoisted.insert(d.name.clone());
            if let Some(init) = &d.init {
                assigns.push(Expr::assign(Expr::ident(d.name.clone()), init.clone()));
            }
        }
        assigns
    }
}
