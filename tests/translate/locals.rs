//! Local-ID assignment suites.

use ingot::ast::{BlockAst, ConstAst, ParamAst, TypeAst, TypedValueAst, ValueAst};
use ingot::ident::LocalIdent;
use ingot::ir::Function;
use ingot::{translate, ErrorKind, IdentKind};

use crate::helpers::*;

fn local_names(f: &Function) -> Vec<Option<LocalIdent>> {
    let mut names: Vec<Option<LocalIdent>> = f
        .params
        .iter()
        .map(|p| f.value_name(p.value).cloned())
        .collect();
    for block in &f.blocks {
        names.push(block.name.clone());
        for inst in &block.insts {
            if let Some(slot) = inst.result() {
                names.push(f.value_name(slot).cloned());
            }
        }
        if let Some(slot) = block.term.result() {
            names.push(f.value_name(slot).cloned());
        }
    }
    names
}

#[test]
fn unnamed_entities_are_numbered_params_then_blocks_then_results() {
    // (i32, i32 %x, i32): unnamed params first, then the entry block, then
    // the two unnamed instruction results.
    let insts = vec![
        add(
            TypedValueAst::new(i(32), ValueAst::num(0)),
            ValueAst::local("x"),
        ),
        sub(
            TypedValueAst::new(i(32), ValueAst::num(3)),
            ValueAst::num(1),
        ),
    ];
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![
            ParamAst::new(i(32)),
            ParamAst::named(i(32), "x"),
            ParamAst::new(i(32)),
        ],
        vec![BlockAst::new(insts, ret_void())],
    )]);
    let out = translate(&m).expect("translation should succeed");

    assert_eq!(
        local_names(&out.funcs[0]),
        vec![
            Some(LocalIdent::Num(0)),
            Some(LocalIdent::name("x")),
            Some(LocalIdent::Num(1)),
            Some(LocalIdent::Num(2)),
            Some(LocalIdent::Num(3)),
            Some(LocalIdent::Num(4)),
        ]
    );
}

#[test]
fn assignment_is_idempotent() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![ParamAst::new(i(32))],
        vec![BlockAst::new(
            vec![add(
                TypedValueAst::new(i(32), ValueAst::num(0)),
                ValueAst::Const(ConstAst::Int(1)),
            )],
            ret_void(),
        )],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let mut f = out.funcs[0].clone();
    let before = local_names(&f);
    f.assign_local_ids().expect("re-running assignment is a no-op");
    assert_eq!(local_names(&f), before);
}

#[test]
fn declarations_are_a_no_op() {
    let m = module(vec![func_decl(
        "f",
        TypeAst::Void,
        vec![ParamAst::new(i(32)), ParamAst::new(i(32))],
    )]);
    let out = translate(&m).expect("translation should succeed");

    // Zero blocks: parameters keep their unnamed state.
    let f = &out.funcs[0];
    assert!(f.blocks.is_empty());
    assert_eq!(f.value_name(f.params[0].value), None);
    assert_eq!(f.value_name(f.params[1].value), None);
}

#[test]
fn unnamed_entry_block_and_first_instruction_pack_from_zero() {
    let m = module(vec![func_def(
        "f",
        i(32),
        vec![],
        vec![BlockAst::new(
            vec![add(TypedValueAst::int(32, 1), ValueAst::Const(ConstAst::Int(2)))],
            ret(i(32), ValueAst::num(1)),
        )],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    assert_eq!(f.blocks[0].name, Some(LocalIdent::Num(0)));
    let slot = f.blocks[0].insts[0].result().unwrap();
    assert_eq!(f.value_name(slot), Some(&LocalIdent::Num(1)));
}

#[test]
fn out_of_sequence_numeric_name_is_a_bad_local_id() {
    // The single unnamed parameter is %0; naming the first instruction %5
    // breaks the gap-free sequence.
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![ParamAst::new(i(32))],
        vec![BlockAst::named(
            "entry",
            vec![with_result(
                add(TypedValueAst::new(i(32), ValueAst::num(0)), ValueAst::Const(ConstAst::Int(1))),
                LocalIdent::Num(5),
            )],
            ret_void(),
        )],
    )]);
    let err = translate(&m).expect_err("out-of-sequence numeric name should fail");
    assert_eq!(
        err.kind,
        ErrorKind::BadLocalId {
            func: "@f".to_string(),
            expected: 1,
            got: 5,
        }
    );
}

#[test]
fn duplicate_local_names_are_rejected() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![ParamAst::named(i(32), "x"), ParamAst::named(i(32), "x")],
        vec![BlockAst::named("entry", vec![], ret_void())],
    )]);
    let err = translate(&m).expect_err("duplicate parameter names should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateIdent { kind: IdentKind::Local, .. }
    ));
}

#[test]
fn block_label_colliding_with_a_value_name_is_rejected() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![ParamAst::named(i(32), "entry")],
        vec![BlockAst::named("entry", vec![], ret_void())],
    )]);
    let err = translate(&m).expect_err("label reusing a value name should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateIdent { kind: IdentKind::Block, .. }
    ));
}
