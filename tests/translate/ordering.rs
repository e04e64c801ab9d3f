//! Deterministic module assembly suites.

use ingot::ast::{
    AttrGroupDefAst, ComdatDefAst, ConstAst, MetadataDefAst, NamedMetadataDefAst, TopLevelEntity,
    TypeAst,
};
use ingot::attrs::{Attribute, SelectionKind};
use ingot::translate;

use crate::helpers::*;

fn scrambled_module() -> ingot::ast::Module {
    module(vec![
        TopLevelEntity::MetadataDef(MetadataDefAst {
            id: 9,
            distinct: false,
            operands: vec![],
            span: None,
        }),
        typedef(
            "zeta",
            TypeAst::Struct {
                packed: false,
                fields: vec![i(8)],
            },
        ),
        TopLevelEntity::AttrGroupDef(AttrGroupDefAst {
            id: 4,
            attrs: vec![Attribute::NoUnwind],
            span: None,
        }),
        global_def("second", i(32), ConstAst::Int(2)),
        TopLevelEntity::ComdatDef(ComdatDefAst {
            name: "late".to_string(),
            kind: SelectionKind::Any,
            span: None,
        }),
        TopLevelEntity::NamedMetadataDef(NamedMetadataDefAst {
            name: "llvm.ident".to_string(),
            nodes: vec![9],
            span: None,
        }),
        func_decl("tail_fn", TypeAst::Void, vec![]),
        TopLevelEntity::MetadataDef(MetadataDefAst {
            id: 2,
            distinct: false,
            operands: vec![],
            span: None,
        }),
        typedef(
            "alpha",
            TypeAst::Struct {
                packed: false,
                fields: vec![i(16)],
            },
        ),
        TopLevelEntity::AttrGroupDef(AttrGroupDefAst {
            id: 0,
            attrs: vec![Attribute::ReadOnly],
            span: None,
        }),
        global_def("first", i(32), ConstAst::Int(1)),
        TopLevelEntity::ComdatDef(ComdatDefAst {
            name: "early".to_string(),
            kind: SelectionKind::Largest,
            span: None,
        }),
        TopLevelEntity::NamedMetadataDef(NamedMetadataDefAst {
            name: "deps".to_string(),
            nodes: vec![2],
            span: None,
        }),
        func_decl("head_fn", TypeAst::Void, vec![]),
    ])
}

#[test]
fn type_definitions_are_listed_alphabetically() {
    let out = translate(&scrambled_module()).expect("translation should succeed");
    let names: Vec<_> = out
        .type_defs
        .iter()
        .map(|&id| out.types.name(id).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn comdat_definitions_are_listed_alphabetically() {
    let out = translate(&scrambled_module()).expect("translation should succeed");
    let names: Vec<_> = out
        .comdat_defs
        .iter()
        .map(|&id| out.comdats[id.index()].name.clone())
        .collect();
    assert_eq!(names, vec!["early", "late"]);
}

#[test]
fn globals_and_functions_keep_source_order() {
    let out = translate(&scrambled_module()).expect("translation should succeed");
    let globals: Vec<_> = out.globals.iter().map(|g| g.name.to_string()).collect();
    assert_eq!(globals, vec!["@second", "@first"]);
    let funcs: Vec<_> = out.funcs.iter().map(|f| f.name.to_string()).collect();
    assert_eq!(funcs, vec!["@tail_fn", "@head_fn"]);
}

#[test]
fn attribute_groups_are_listed_in_ascending_numeric_order() {
    let out = translate(&scrambled_module()).expect("translation should succeed");
    let ids: Vec<_> = out
        .attr_group_defs
        .iter()
        .map(|&id| out.attr_groups[id.index()].id)
        .collect();
    assert_eq!(ids, vec![0, 4]);
}

#[test]
fn named_metadata_keeps_source_order_and_nodes_sort_by_id() {
    let out = translate(&scrambled_module()).expect("translation should succeed");
    let names: Vec<_> = out
        .named_metadata
        .iter()
        .map(|n| n.name.clone())
        .collect();
    assert_eq!(names, vec!["llvm.ident", "deps"]);

    let ids: Vec<_> = out
        .metadata_defs
        .iter()
        .map(|&id| out.metadata_nodes[id.index()].id)
        .collect();
    assert_eq!(ids, vec![2, 9]);
}

#[test]
fn translation_is_deterministic() {
    let m = scrambled_module();
    let first = translate(&m).expect("translation should succeed");
    let second = translate(&m).expect("translation should succeed");
    assert_eq!(first, second);
}

#[test]
fn module_level_fields_are_carried_over() {
    let m = module(vec![
        TopLevelEntity::SourceFilename("input.ll".to_string()),
        TopLevelEntity::TargetTriple("x86_64-unknown-linux-gnu".to_string()),
        TopLevelEntity::TargetDataLayout("e-m:e-i64:64".to_string()),
        TopLevelEntity::ModuleAsm(".globl marker".to_string()),
    ]);
    let out = translate(&m).expect("translation should succeed");
    assert_eq!(out.source_filename.as_deref(), Some("input.ll"));
    assert_eq!(out.target_triple.as_deref(), Some("x86_64-unknown-linux-gnu"));
    assert_eq!(out.data_layout.as_deref(), Some("e-m:e-i64:64"));
    assert_eq!(out.module_asm, vec![".globl marker".to_string()]);
}
