//! Fix-up suites: blockaddress constants and use-list orders.

use ingot::ast::{
    BlockAst, ConstAst, TermAst, TopLevelEntity, TypeAst, TypedConstAst, UseListOrderAst,
    UseListOrderBbAst,
};
use ingot::ir::ConstKind;
use ingot::{translate, ErrorKind, IdentKind};

use crate::helpers::*;

fn block_address(func: &str, block: &str) -> ConstAst {
    ConstAst::BlockAddress {
        func: g(func),
        block: l(block),
    }
}

#[test]
fn blockaddress_resolves_after_the_function_body_is_built() {
    // @g precedes @f in the source; the target block only exists once
    // @f's body is translated.
    let m = module(vec![
        global_def("g", ptr(i(8)), block_address("f", "target")),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![
                BlockAst::named("entry", vec![], TermAst::Br { target: l("target") }),
                BlockAst::named("target", vec![], ret_void()),
            ],
        ),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let init = out.globals[0].init.expect("@g should have an initializer");
    let ConstKind::BlockAddress { func, block } = &out.consts.get(init).kind else {
        panic!("expected blockaddress initializer");
    };
    assert_eq!(func.index(), 0);
    let block = block.expect("blockaddress should be resolved after fix-up");
    assert_eq!(block.index(), 1);
    assert_eq!(out.funcs[0].blocks[block.index()].name, Some(l("target")));
}

#[test]
fn blockaddress_to_numbered_block_resolves_after_assignment() {
    // The target block is unnamed; the reference uses the numeric name the
    // local-ID assigner gives it.
    let m = module(vec![
        global_def("g", ptr(i(8)), block_address("f", "1")),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![
                BlockAst::new(
                    vec![],
                    TermAst::Br {
                        target: ingot::ident::LocalIdent::Num(1),
                    },
                ),
                BlockAst::new(vec![], ret_void()),
            ],
        ),
    ]);
    // "1" is a named label here, which does not exist; use the numeric form.
    let err = translate(&m).expect_err("label \"1\" is not the numeric %1");
    assert!(matches!(err.kind, ErrorKind::UndefinedIdent { .. }));

    let m = module(vec![
        global_def(
            "g",
            ptr(i(8)),
            ConstAst::BlockAddress {
                func: g("f"),
                block: ingot::ident::LocalIdent::Num(1),
            },
        ),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![
                BlockAst::new(
                    vec![],
                    TermAst::Br {
                        target: ingot::ident::LocalIdent::Num(1),
                    },
                ),
                BlockAst::new(vec![], ret_void()),
            ],
        ),
    ]);
    let out = translate(&m).expect("translation should succeed");
    let init = out.globals[0].init.unwrap();
    let ConstKind::BlockAddress { block, .. } = &out.consts.get(init).kind else {
        panic!("expected blockaddress initializer");
    };
    assert_eq!(block.unwrap().index(), 1);
}

#[test]
fn blockaddress_to_missing_block_is_undefined() {
    let m = module(vec![
        global_def("g", ptr(i(8)), block_address("f", "nowhere")),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![BlockAst::named("entry", vec![], ret_void())],
        ),
    ]);
    let err = translate(&m).expect_err("missing target block should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedIdent { kind: IdentKind::Block, .. }
    ));
}

#[test]
fn blockaddress_of_a_non_function_is_malformed() {
    let m = module(vec![
        global_def("x", i(32), ConstAst::Int(0)),
        global_def("g", ptr(i(8)), block_address("x", "b")),
    ]);
    let err = translate(&m).expect_err("blockaddress of a global should fail");
    assert!(matches!(err.kind, ErrorKind::MalformedConstant(_)));
}

#[test]
fn module_use_list_orders_attach_to_resolved_constants() {
    let m = module(vec![
        global_def("x", i(32), ConstAst::Int(0)),
        TopLevelEntity::UseListOrder(UseListOrderAst {
            value: TypedConstAst::new(ptr(i(32)), ConstAst::Global(g("x"))),
            indexes: vec![1, 0],
            span: None,
        }),
    ]);
    let out = translate(&m).expect("translation should succeed");

    assert_eq!(out.use_list_orders.len(), 1);
    assert_eq!(out.use_list_orders[0].indexes, vec![1, 0]);
    assert!(matches!(
        out.consts.get(out.use_list_orders[0].value).kind,
        ConstKind::Global(_)
    ));
}

#[test]
fn block_scoped_use_list_orders_resolve_function_and_block() {
    let m = module(vec![
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![
                BlockAst::named("entry", vec![], TermAst::Br { target: l("next") }),
                BlockAst::named("next", vec![], ret_void()),
            ],
        ),
        TopLevelEntity::UseListOrderBb(UseListOrderBbAst {
            func: g("f"),
            block: l("next"),
            indexes: vec![0],
            span: None,
        }),
    ]);
    let out = translate(&m).expect("translation should succeed");

    assert_eq!(out.use_list_order_bbs.len(), 1);
    assert_eq!(out.use_list_order_bbs[0].func.index(), 0);
    assert_eq!(out.use_list_order_bbs[0].block.index(), 1);
}

#[test]
fn non_permutation_indexes_are_inconsistent_syntax() {
    let m = module(vec![
        global_def("x", i(32), ConstAst::Int(0)),
        TopLevelEntity::UseListOrder(UseListOrderAst {
            value: TypedConstAst::new(ptr(i(32)), ConstAst::Global(g("x"))),
            indexes: vec![0, 2],
            span: None,
        }),
    ]);
    let err = translate(&m).expect_err("non-permutation should fail");
    assert!(matches!(err.kind, ErrorKind::SyntaxInconsistency(_)));
}

#[test]
fn use_list_order_for_an_unknown_function_is_undefined() {
    let m = module(vec![TopLevelEntity::UseListOrderBb(UseListOrderBbAst {
        func: g("ghost"),
        block: l("b"),
        indexes: vec![0],
        span: None,
    })]);
    let err = translate(&m).expect_err("unknown function should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedIdent { kind: IdentKind::Global, .. }
    ));
}
