//! Function body suites: blocks, operands, calls, and forward references.

use ingot::ast::{
    ArgAst, BlockAst, CallBodyAst, ConstAst, InstAst, ParamAst, TermAst, TypeAst, TypedValueAst,
    ValueAst,
};
use ingot::attrs::{Attribute, ICmpPred};
use ingot::ir::{ConstKind, GlobalRef, Inst, Term, TypeKind, Value};
use ingot::{translate, ErrorKind, IdentKind};

use crate::helpers::*;

#[test]
fn declaration_keeps_parameter_names_and_attributes() {
    let mut param = ParamAst::named(ptr(i(8)), "buf");
    param.attrs = vec![Attribute::NoAlias, Attribute::Align(8)];
    let m = module(vec![func_decl("f", TypeAst::Void, vec![param])]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    assert!(f.blocks.is_empty());
    assert_eq!(f.params.len(), 1);
    assert_eq!(
        f.params[0].attrs,
        vec![Attribute::NoAlias, Attribute::Align(8)]
    );
    assert_eq!(f.value_name(f.params[0].value), Some(&l("buf")));
}

#[test]
fn forward_jump_resolves_against_indexed_labels() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![
            BlockAst::named("entry", vec![], TermAst::Br { target: l("exit") }),
            BlockAst::named("exit", vec![], ret_void()),
        ],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    assert_eq!(f.blocks.len(), 2);
    let Term::Br { target } = &f.blocks[0].term else {
        panic!("expected an unconditional branch");
    };
    assert_eq!(target.index(), 1);
}

#[test]
fn operand_uses_of_later_results_carry_the_right_type() {
    // %a = add i32 %b, 1, where %b is defined by a later instruction.
    let insts = vec![
        with_result(
            add(TypedValueAst::new(i(32), ValueAst::local("b")), ValueAst::Const(ConstAst::Int(1))),
            l("a"),
        ),
        with_result(
            add(TypedValueAst::int(32, 2), ValueAst::Const(ConstAst::Int(3))),
            l("b"),
        ),
    ];
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![BlockAst::named("entry", insts, ret_void())],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    let Inst::Add(first) = &f.blocks[0].insts[0] else {
        panic!("expected add");
    };
    let Value::Local(b_slot) = first.lhs.value else {
        panic!("expected a local operand");
    };
    assert_eq!(f.value_name(b_slot), Some(&l("b")));
    assert!(matches!(out.types.kind(first.lhs.ty), TypeKind::Int { bits: 32 }));
}

#[test]
fn call_to_a_later_function_resolves_through_the_scaffold() {
    let call = InstAst::Call {
        result: Some(l("r")),
        tail: None,
        fmf: Default::default(),
        body: CallBodyAst::new(
            i(32),
            ValueAst::Const(ConstAst::Global(g("callee"))),
            vec![ArgAst::new(i(32), ValueAst::Const(ConstAst::Int(1)))],
        ),
    };
    let m = module(vec![
        func_def(
            "caller",
            TypeAst::Void,
            vec![],
            vec![BlockAst::named("entry", vec![call], ret_void())],
        ),
        func_decl("callee", i(32), vec![ParamAst::new(i(32))]),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let Inst::Call(call) = &out.funcs[0].blocks[0].insts[0] else {
        panic!("expected call");
    };
    let Value::Const(callee) = call.body.callee else {
        panic!("expected constant callee");
    };
    let ConstKind::Global(GlobalRef::Func(f)) = &out.consts.get(callee).kind else {
        panic!("expected function reference callee");
    };
    assert_eq!(f.index(), 1);
    assert!(call.result.is_some());
}

#[test]
fn void_call_produces_no_result_slot() {
    let call = InstAst::Call {
        result: None,
        tail: None,
        fmf: Default::default(),
        body: CallBodyAst::new(
            TypeAst::Void,
            ValueAst::Const(ConstAst::Global(g("sink"))),
            vec![],
        ),
    };
    let m = module(vec![
        func_decl("sink", TypeAst::Void, vec![]),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![BlockAst::named("entry", vec![call], ret_void())],
        ),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let Inst::Call(call) = &out.funcs[1].blocks[0].insts[0] else {
        panic!("expected call");
    };
    assert!(call.result.is_none());
}

#[test]
fn naming_a_void_call_result_is_inconsistent_syntax() {
    let call = InstAst::Call {
        result: Some(l("r")),
        tail: None,
        fmf: Default::default(),
        body: CallBodyAst::new(
            TypeAst::Void,
            ValueAst::Const(ConstAst::Global(g("sink"))),
            vec![],
        ),
    };
    let m = module(vec![
        func_decl("sink", TypeAst::Void, vec![]),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![BlockAst::named("entry", vec![call], ret_void())],
        ),
    ]);
    let err = translate(&m).expect_err("named void result should fail");
    assert!(matches!(err.kind, ErrorKind::SyntaxInconsistency(_)));
}

#[test]
fn call_arity_mismatch_is_rejected() {
    let call = InstAst::Call {
        result: None,
        tail: None,
        fmf: Default::default(),
        body: CallBodyAst::new(
            TypeAst::Void,
            ValueAst::Const(ConstAst::Global(g("sink"))),
            vec![ArgAst::new(i(32), ValueAst::Const(ConstAst::Int(1)))],
        ),
    };
    let m = module(vec![
        func_decl("sink", TypeAst::Void, vec![]),
        func_def(
            "f",
            TypeAst::Void,
            vec![],
            vec![BlockAst::named("entry", vec![call], ret_void())],
        ),
    ]);
    // The call derives a zero-argument signature from `void` and the empty
    // parameter list it was written with, so the callee reference mismatches.
    let err = translate(&m).expect_err("arity mismatch should fail");
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn phi_incoming_values_resolve_against_blocks_and_locals() {
    let phi = InstAst::Phi {
        result: Some(l("merge")),
        fmf: Default::default(),
        ty: i(32),
        incoming: vec![
            (ValueAst::Const(ConstAst::Int(1)), l("a")),
            (ValueAst::Const(ConstAst::Int(2)), l("b")),
        ],
    };
    let cond = TypedValueAst::new(i(1), ValueAst::Const(ConstAst::Int(1)));
    let m = module(vec![func_def(
        "f",
        i(32),
        vec![],
        vec![
            BlockAst::named(
                "start",
                vec![],
                TermAst::CondBr {
                    cond,
                    then_target: l("a"),
                    else_target: l("b"),
                },
            ),
            BlockAst::named("a", vec![], TermAst::Br { target: l("m") }),
            BlockAst::named("b", vec![], TermAst::Br { target: l("m") }),
            BlockAst::named("m", vec![phi], ret(i(32), ValueAst::local("merge"))),
        ],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let Inst::Phi(phi) = &out.funcs[0].blocks[3].insts[0] else {
        panic!("expected phi");
    };
    assert_eq!(phi.incoming.len(), 2);
    assert_eq!(phi.incoming[0].1.index(), 1);
    assert_eq!(phi.incoming[1].1.index(), 2);
}

#[test]
fn ret_type_must_match_the_signature() {
    let m = module(vec![func_def(
        "f",
        i(32),
        vec![],
        vec![BlockAst::named("entry", vec![], ret_void())],
    )]);
    let err = translate(&m).expect_err("ret void from i32 function should fail");
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn branch_to_undefined_label_is_rejected() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![BlockAst::named("entry", vec![], TermAst::Br { target: l("nowhere") })],
    )]);
    let err = translate(&m).expect_err("undefined label should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedIdent { kind: IdentKind::Block, .. }
    ));
}

#[test]
fn undefined_local_operand_is_rejected() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![BlockAst::named(
            "entry",
            vec![add(
                TypedValueAst::new(i(32), ValueAst::local("ghost")),
                ValueAst::Const(ConstAst::Int(1)),
            )],
            ret_void(),
        )],
    )]);
    let err = translate(&m).expect_err("undefined local should fail");
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedIdent { kind: IdentKind::Local, .. }
    ));
}

#[test]
fn store_and_load_validate_the_pointee() {
    let alloca = InstAst::Alloca {
        result: Some(l("slot")),
        inalloca: false,
        swifterror: false,
        elem_ty: i(32),
        num_elems: None,
        align: Some(4),
        addr_space: None,
    };
    let store = InstAst::Store {
        atomic: false,
        volatile: false,
        value: TypedValueAst::int(32, 5),
        ptr: TypedValueAst::new(ptr(i(32)), ValueAst::local("slot")),
        ordering: None,
        scope: None,
        align: None,
    };
    let load = InstAst::Load {
        result: Some(l("v")),
        atomic: false,
        volatile: false,
        ty: i(32),
        ptr: TypedValueAst::new(ptr(i(32)), ValueAst::local("slot")),
        ordering: None,
        scope: None,
        align: None,
    };
    let m = module(vec![func_def(
        "f",
        i(32),
        vec![],
        vec![BlockAst::named(
            "entry",
            vec![alloca, store, load],
            ret(i(32), ValueAst::local("v")),
        )],
    )]);
    let out = translate(&m).expect("translation should succeed");
    assert_eq!(out.funcs[0].blocks[0].insts.len(), 3);
}

#[test]
fn icmp_derives_a_boolean_result() {
    let icmp = InstAst::ICmp {
        result: Some(l("cmp")),
        pred: ICmpPred::Slt,
        lhs: TypedValueAst::int(32, 1),
        rhs: ValueAst::Const(ConstAst::Int(2)),
    };
    let m = module(vec![func_def(
        "f",
        i(1),
        vec![],
        vec![BlockAst::named("entry", vec![icmp], ret(i(1), ValueAst::local("cmp")))],
    )]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    let slot = f.blocks[0].insts[0].result().expect("icmp produces a value");
    assert!(matches!(out.types.kind(f.value_ty(slot)), TypeKind::Int { bits: 1 }));
}

#[test]
fn gep_walks_struct_members() {
    let gep = InstAst::Gep {
        result: Some(l("p")),
        inbounds: true,
        elem_ty: named("pair"),
        base: TypedValueAst::new(ptr(named("pair")), ValueAst::local("base")),
        indices: vec![
            TypedValueAst::int(32, 0),
            TypedValueAst::int(32, 1),
        ],
    };
    let m = module(vec![
        typedef(
            "pair",
            TypeAst::Struct {
                packed: false,
                fields: vec![i(8), i(64)],
            },
        ),
        func_def(
            "f",
            TypeAst::Void,
            vec![ParamAst::named(ptr(named("pair")), "base")],
            vec![BlockAst::named("entry", vec![gep], ret_void())],
        ),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let f = &out.funcs[0];
    let slot = f.blocks[0].insts[0].result().expect("gep produces a value");
    let result_ty = f.value_ty(slot);
    assert!(matches!(
        out.types.kind(out.types.pointee(result_ty).unwrap()),
        TypeKind::Int { bits: 64 }
    ));
}
