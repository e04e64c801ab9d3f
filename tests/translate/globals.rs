//! Global, alias, and ifunc body suites.

use ingot::ast::{
    AliasAst, ComdatDefAst, ComdatRefAst, ConstAst, GlobalAst, IFuncAst, TopLevelEntity,
    TypedConstAst,
};
use ingot::attrs::{Linkage, SelectionKind, UnnamedAddr};
use ingot::ir::{ConstKind, GlobalRef};
use ingot::{translate, ErrorKind, IdentKind};

use crate::helpers::*;

#[test]
fn forward_global_reference_resolves_to_the_scaffolded_entity() {
    // @a's initializer references @b, which is defined later.
    let m = module(vec![
        global_def("a", ptr(i(32)), ConstAst::Global(g("b"))),
        global_def("b", i(32), ConstAst::Int(7)),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let init = out.globals[0].init.expect("@a should have an initializer");
    let ConstKind::Global(target) = &out.consts.get(init).kind else {
        panic!("expected a global reference initializer");
    };
    assert!(matches!(target, GlobalRef::Global(id) if id.index() == 1));
    // The reference carries @b's pointer type.
    assert_eq!(out.consts.ty(init), out.globals[1].ty);
}

#[test]
fn duplicate_global_identifier_is_rejected() {
    let m = module(vec![
        global_def("foo", i(32), ConstAst::Int(1)),
        global_def("foo", i(32), ConstAst::Int(2)),
    ]);
    let err = translate(&m).expect_err("duplicate globals should fail");
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateIdent {
            kind: IdentKind::Global,
            name: "@foo".to_string(),
        }
    );
}

#[test]
fn globals_aliases_and_functions_share_one_namespace() {
    let alias = AliasAst {
        name: g("foo"),
        decorations: Default::default(),
        content_ty: i(32),
        aliasee: TypedConstAst::new(ptr(i(32)), ConstAst::Global(g("foo"))),
        span: None,
    };
    let m = module(vec![
        global_def("foo", i(32), ConstAst::Int(1)),
        TopLevelEntity::Alias(alias),
    ]);
    let err = translate(&m).expect_err("alias reusing a global name should fail");
    assert!(matches!(err.kind, ErrorKind::DuplicateIdent { kind: IdentKind::Global, .. }));
}

#[test]
fn alias_takes_the_aliasee_pointer_type() {
    let m = module(vec![
        global_def("target", i(32), ConstAst::Int(9)),
        TopLevelEntity::Alias(AliasAst {
            name: g("al"),
            decorations: Default::default(),
            content_ty: i(32),
            aliasee: TypedConstAst::new(ptr(i(32)), ConstAst::Global(g("target"))),
            span: None,
        }),
    ]);
    let out = translate(&m).expect("translation should succeed");

    assert_eq!(out.aliases.len(), 1);
    assert_eq!(out.aliases[0].ty, out.globals[0].ty);
    let ConstKind::Global(GlobalRef::Global(target)) =
        &out.consts.get(out.aliases[0].aliasee).kind
    else {
        panic!("expected aliasee to reference @target");
    };
    assert_eq!(target.index(), 0);
}

#[test]
fn ifunc_resolver_resolves_through_the_scaffold() {
    let resolver_ty = ptr(ingot::ast::TypeAst::Func {
        ret: Box::new(ptr(i(8))),
        params: vec![],
        variadic: false,
    });
    let m = module(vec![
        TopLevelEntity::IFunc(IFuncAst {
            name: g("dispatch"),
            decorations: Default::default(),
            content_ty: i(8),
            resolver: TypedConstAst::new(resolver_ty.clone(), ConstAst::Global(g("pick"))),
            span: None,
        }),
        func_decl("pick", ptr(i(8)), vec![]),
    ]);
    let out = translate(&m).expect("translation should succeed");

    assert_eq!(out.ifuncs.len(), 1);
    let ConstKind::Global(GlobalRef::Func(f)) = &out.consts.get(out.ifuncs[0].resolver).kind
    else {
        panic!("expected resolver to reference @pick");
    };
    assert_eq!(f.index(), 0);
}

#[test]
fn initializer_type_mismatch_is_rejected() {
    let m = module(vec![global_def("x", i(32), ConstAst::Float(1.0))]);
    let err = translate(&m).expect_err("float initializer for i32 should fail");
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn undefined_global_reference_is_rejected() {
    let m = module(vec![global_def("a", ptr(i(32)), ConstAst::Global(g("nowhere")))]);
    let err = translate(&m).expect_err("undefined global should fail");
    assert_eq!(
        err.kind,
        ErrorKind::UndefinedIdent {
            kind: IdentKind::Global,
            name: "@nowhere".to_string(),
        }
    );
}

#[test]
fn comdat_references_resolve_by_name_or_own_symbol_name() {
    let mut by_name = GlobalAst::new(g("x"), i(32));
    by_name.init = Some(ConstAst::Int(0));
    by_name.comdat = Some(ComdatRefAst {
        name: Some("group".to_string()),
    });
    let mut by_self = GlobalAst::new(g("y"), i(32));
    by_self.init = Some(ConstAst::Int(0));
    by_self.comdat = Some(ComdatRefAst { name: None });

    let m = module(vec![
        TopLevelEntity::ComdatDef(ComdatDefAst {
            name: "group".to_string(),
            kind: SelectionKind::Any,
            span: None,
        }),
        TopLevelEntity::ComdatDef(ComdatDefAst {
            name: "y".to_string(),
            kind: SelectionKind::Largest,
            span: None,
        }),
        TopLevelEntity::Global(by_name),
        TopLevelEntity::Global(by_self),
    ]);
    let out = translate(&m).expect("translation should succeed");

    let x_comdat = out.globals[0].comdat.expect("@x should have a comdat");
    let y_comdat = out.globals[1].comdat.expect("@y should have a comdat");
    assert_eq!(out.comdats[x_comdat.index()].name, "group");
    assert_eq!(out.comdats[x_comdat.index()].kind, SelectionKind::Any);
    assert_eq!(out.comdats[y_comdat.index()].name, "y");
}

#[test]
fn undefined_comdat_is_rejected() {
    let mut def = GlobalAst::new(g("x"), i(32));
    def.init = Some(ConstAst::Int(0));
    def.comdat = Some(ComdatRefAst {
        name: Some("missing".to_string()),
    });
    let err = translate(&module(vec![TopLevelEntity::Global(def)]))
        .expect_err("undefined comdat should fail");
    assert_eq!(
        err.kind,
        ErrorKind::UndefinedIdent {
            kind: IdentKind::Comdat,
            name: "$missing".to_string(),
        }
    );
}

#[test]
fn symbol_decorations_survive_translation() {
    let mut def = GlobalAst::new(g("x"), i(32));
    def.init = Some(ConstAst::Int(0));
    def.decorations.linkage = Some(Linkage::Internal);
    def.decorations.unnamed_addr = Some(UnnamedAddr::Local);
    def.immutable = true;
    def.align = Some(16);
    def.section = Some(".rodata".to_string());

    let out = translate(&module(vec![TopLevelEntity::Global(def)]))
        .expect("translation should succeed");
    let x = &out.globals[0];
    assert_eq!(x.info.linkage, Linkage::Internal);
    assert_eq!(x.info.unnamed_addr, Some(UnnamedAddr::Local));
    assert!(x.immutable);
    assert_eq!(x.align, Some(16));
    assert_eq!(x.section.as_deref(), Some(".rodata"));
}
