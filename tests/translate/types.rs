//! Type resolution suites: recursion, identity, aliases, and errors.

use ingot::ast::{ConstAst, TypeAst};
use ingot::ir::TypeKind;
use ingot::{translate, ErrorKind, IdentKind};

use crate::helpers::*;

#[test]
fn recursive_struct_resolves_through_its_own_identity() {
    let m = module(vec![typedef(
        "node",
        TypeAst::Struct {
            packed: false,
            fields: vec![i(32), ptr(named("node"))],
        },
    )]);
    let out = translate(&m).expect("translation should succeed");

    let node = out.types.named("node").expect("named type should exist");
    let TypeKind::Struct { packed, fields } = out.types.kind(node) else {
        panic!("expected struct body, got {:?}", out.types.kind(node));
    };
    assert!(!packed);
    assert_eq!(fields.len(), 2);
    assert!(matches!(out.types.kind(fields[0]), TypeKind::Int { bits: 32 }));
    // The second field is a pointer whose pointee is the struct itself.
    assert_eq!(out.types.pointee(fields[1]), Some(node));
}

#[test]
fn mutually_recursive_structs_resolve() {
    let m = module(vec![
        typedef(
            "a",
            TypeAst::Struct {
                packed: false,
                fields: vec![ptr(named("b"))],
            },
        ),
        typedef(
            "b",
            TypeAst::Struct {
                packed: false,
                fields: vec![ptr(named("a"))],
            },
        ),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let a = out.types.named("a").unwrap();
    let b = out.types.named("b").unwrap();
    let TypeKind::Struct { fields: a_fields, .. } = out.types.kind(a) else {
        panic!("expected struct body");
    };
    let TypeKind::Struct { fields: b_fields, .. } = out.types.kind(b) else {
        panic!("expected struct body");
    };
    assert_eq!(out.types.pointee(a_fields[0]), Some(b));
    assert_eq!(out.types.pointee(b_fields[0]), Some(a));
}

#[test]
fn every_reference_to_a_named_struct_is_the_same_object() {
    let m = module(vec![
        typedef(
            "t",
            TypeAst::Struct {
                packed: false,
                fields: vec![i(8)],
            },
        ),
        global_decl("x", named("t")),
        global_decl("y", named("t")),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let t = out.types.named("t").unwrap();
    assert_eq!(out.globals[0].content_ty, t);
    assert_eq!(out.globals[1].content_ty, t);
}

#[test]
fn opaque_definition_stays_opaque() {
    let m = module(vec![
        typedef("handle", TypeAst::Opaque),
        global_decl("h", ptr(named("handle"))),
    ]);
    let out = translate(&m).expect("opaque types are legal behind pointers");

    let handle = out.types.named("handle").unwrap();
    assert!(matches!(out.types.kind(handle), TypeKind::Opaque));
    assert_eq!(out.types.pointee(out.globals[0].content_ty), Some(handle));
}

#[test]
fn non_struct_definition_acts_as_transparent_alias() {
    let m = module(vec![
        typedef("word", i(64)),
        global_def("w", named("word"), ConstAst::Int(7)),
    ]);
    let out = translate(&m).expect("translation should succeed");

    assert!(matches!(
        out.types.kind(out.globals[0].content_ty),
        TypeKind::Int { bits: 64 }
    ));
}

#[test]
fn alias_definition_cycle_is_malformed() {
    let m = module(vec![
        typedef("a", named("b")),
        typedef("b", named("a")),
    ]);
    let err = translate(&m).expect_err("alias cycles cannot resolve");
    assert!(matches!(err.kind, ErrorKind::MalformedType(_)));
}

#[test]
fn undefined_type_is_reported_on_use() {
    let m = module(vec![global_decl("x", named("missing"))]);
    let err = translate(&m).expect_err("undefined type should fail");
    assert_eq!(
        err.kind,
        ErrorKind::UndefinedIdent {
            kind: IdentKind::Type,
            name: "%missing".to_string(),
        }
    );
}

#[test]
fn unused_undefined_type_is_not_an_error() {
    // No form mentions %missing; nothing should fail.
    let m = module(vec![global_decl("x", i(32))]);
    translate(&m).expect("translation should succeed");
}

#[test]
fn zero_width_integers_and_zero_length_vectors_are_malformed() {
    let err = translate(&module(vec![global_decl("x", i(0))]))
        .expect_err("i0 is malformed");
    assert!(matches!(err.kind, ErrorKind::MalformedType(_)));

    let err = translate(&module(vec![global_decl(
        "v",
        TypeAst::Vector {
            scalable: false,
            len: 0,
            elem: Box::new(i(8)),
        },
    )]))
    .expect_err("zero-length vectors are malformed");
    assert!(matches!(err.kind, ErrorKind::MalformedType(_)));
}

#[test]
fn duplicate_type_definition_is_rejected() {
    let m = module(vec![typedef("t", i(8)), typedef("t", i(16))]);
    let err = translate(&m).expect_err("duplicate type names should fail");
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateIdent {
            kind: IdentKind::Type,
            name: "%t".to_string(),
        }
    );
}

#[test]
fn structurally_identical_unnamed_types_are_interned() {
    let m = module(vec![
        global_decl("x", ptr(i(32))),
        global_decl("y", ptr(i(32))),
    ]);
    let out = translate(&m).expect("translation should succeed");
    assert_eq!(out.globals[0].content_ty, out.globals[1].content_ty);
    assert_eq!(out.globals[0].ty, out.globals[1].ty);
}
