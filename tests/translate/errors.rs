//! Error taxonomy suites: kinds, components, and rendering.

use ingot::ast::{
    BlockAst, ConstAst, MetadataDefAst, ParamAst, TopLevelEntity, TypeAst, TypedValueAst, ValueAst,
};
use ingot::attrs::BinOp;
use ingot::{
    translate, translate_with_options, Component, ErrorKind, TranslateOptions,
};

use crate::helpers::*;

#[test]
fn first_error_aborts_and_discards_partial_output() {
    // The duplicate appears after a perfectly good global; the call still
    // fails as a whole.
    let m = module(vec![
        global_def("ok", i(32), ConstAst::Int(1)),
        global_def("dup", i(32), ConstAst::Int(2)),
        global_def("dup", i(32), ConstAst::Int(3)),
    ]);
    assert!(translate(&m).is_err());
}

#[test]
fn errors_carry_the_component_name() {
    let m = module(vec![
        global_def("dup", i(32), ConstAst::Int(1)),
        global_def("dup", i(32), ConstAst::Int(2)),
    ]);
    let err = translate(&m).expect_err("duplicate should fail");
    assert_eq!(err.component, Component::Index);
    assert_eq!(err.to_string(), "indexer: duplicate global identifier @dup");

    let m = module(vec![global_decl("x", named("ghost"))]);
    let err = translate(&m).expect_err("undefined type should fail");
    assert_eq!(err.component, Component::Types);

    let m = module(vec![global_def("x", i(32), ConstAst::Float(0.5))]);
    let err = translate(&m).expect_err("mismatched initializer should fail");
    assert_eq!(err.component, Component::Bodies);
}

#[test]
fn bad_local_ids_come_from_the_assigner() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![ParamAst::new(i(32))],
        vec![BlockAst::named(
            "entry",
            vec![with_result(
                add(
                    TypedValueAst::new(i(32), ValueAst::num(0)),
                    ValueAst::Const(ConstAst::Int(1)),
                ),
                ingot::ident::LocalIdent::Num(9),
            )],
            ret_void(),
        )],
    )]);
    let err = translate(&m).expect_err("bad numeric name should fail");
    assert_eq!(err.component, Component::LocalIds);
    assert_eq!(
        err.to_string(),
        "local-ID assigner: invalid local ID in function @f: expected %1, got %9"
    );
}

#[test]
fn mixed_operand_categories_are_type_mismatches() {
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![BlockAst::named(
            "entry",
            vec![binary(
                BinOp::FAdd,
                TypedValueAst::int(32, 1),
                ValueAst::Const(ConstAst::Int(2)),
            )],
            ret_void(),
        )],
    )]);
    let err = translate(&m).expect_err("fadd over integers should fail");
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn malformed_constants_name_the_shape_problem() {
    let m = module(vec![global_def(
        "x",
        TypeAst::Array {
            len: 3,
            elem: Box::new(i(8)),
        },
        ConstAst::Array {
            elems: vec![
                ingot::ast::TypedConstAst::int(8, 0),
                ingot::ast::TypedConstAst::int(8, 1),
            ],
        },
    )]);
    let err = translate(&m).expect_err("short array constant should fail");
    assert!(matches!(err.kind, ErrorKind::MalformedConstant(_)));
}

#[test]
fn instruction_ceiling_trips_limit_exceeded() {
    let insts = vec![
        add(TypedValueAst::int(32, 1), ValueAst::Const(ConstAst::Int(2))),
        add(TypedValueAst::int(32, 3), ValueAst::Const(ConstAst::Int(4))),
    ];
    let m = module(vec![func_def(
        "f",
        TypeAst::Void,
        vec![],
        vec![BlockAst::named("entry", insts, ret_void())],
    )]);
    let options = TranslateOptions {
        max_total_insts: 1,
        ..TranslateOptions::default()
    };
    let err = translate_with_options(&m, options).expect_err("ceiling should trip");
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

#[test]
fn metadata_ceiling_trips_limit_exceeded() {
    let m = module(vec![
        TopLevelEntity::MetadataDef(MetadataDefAst {
            id: 0,
            distinct: false,
            operands: vec![],
            span: None,
        }),
        TopLevelEntity::MetadataDef(MetadataDefAst {
            id: 1,
            distinct: false,
            operands: vec![],
            span: None,
        }),
    ]);
    let options = TranslateOptions {
        max_metadata_nodes: 1,
        ..TranslateOptions::default()
    };
    let err = translate_with_options(&m, options).expect_err("ceiling should trip");
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}

#[test]
fn type_ceiling_trips_limit_exceeded() {
    let m = module(vec![
        global_def("a", i(8), ConstAst::Int(0)),
        global_def("b", i(16), ConstAst::Int(0)),
        global_def("c", i(32), ConstAst::Int(0)),
    ]);
    let options = TranslateOptions {
        max_types: 2,
        ..TranslateOptions::default()
    };
    let err = translate_with_options(&m, options).expect_err("ceiling should trip");
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}
