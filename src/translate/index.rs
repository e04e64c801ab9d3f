//! Top-level entity indexing.
//!
//! One pass over the AST populates, per identifier kind, a map from
//! identifier to defining node plus a first-occurrence order list. All
//! later phases look identifiers up here; redefinitions within one kind
//! fail immediately.

use std::collections::HashMap;

use crate::ast;
use crate::error::{Component, IdentKind, Result, TranslateError};
use crate::ident;
use crate::ident::GlobalIdent;

/// Top-level node sharing the global identifier namespace.
#[derive(Debug, Clone, Copy)]
pub(crate) enum GlobalItem<'a> {
    /// Global variable.
    Global(&'a ast::GlobalAst),
    /// Alias.
    Alias(&'a ast::AliasAst),
    /// IFunc.
    IFunc(&'a ast::IFuncAst),
    /// Function.
    Func(&'a ast::FuncAst),
}

/// AST-side name tables with first-occurrence order lists.
#[derive(Debug, Default)]
pub(crate) struct AstIndex<'a> {
    pub source_filename: Option<&'a str>,
    pub target_triple: Option<&'a str>,
    pub data_layout: Option<&'a str>,
    pub module_asm: Vec<&'a str>,
    pub type_defs: HashMap<&'a str, &'a ast::TypeDefAst>,
    pub type_def_order: Vec<&'a str>,
    pub comdat_defs: HashMap<&'a str, &'a ast::ComdatDefAst>,
    pub comdat_order: Vec<&'a str>,
    pub globals: HashMap<GlobalIdent, GlobalItem<'a>>,
    pub global_order: Vec<GlobalIdent>,
    pub indirect_order: Vec<GlobalIdent>,
    pub func_order: Vec<GlobalIdent>,
    pub attr_group_defs: HashMap<u64, &'a ast::AttrGroupDefAst>,
    pub named_md_defs: HashMap<&'a str, &'a ast::NamedMetadataDefAst>,
    pub named_md_order: Vec<&'a str>,
    pub metadata_defs: HashMap<u64, &'a ast::MetadataDefAst>,
    pub use_list_orders: Vec<&'a ast::UseListOrderAst>,
    pub use_list_order_bbs: Vec<&'a ast::UseListOrderBbAst>,
}

/// Indexes every top-level entity of `module`.
pub(crate) fn index_module(module: &ast::Module) -> Result<AstIndex<'_>> {
    let mut index = AstIndex::default();
    for entity in &module.entities {
        match entity {
            ast::TopLevelEntity::SourceFilename(name) => {
                index.source_filename = Some(name);
            }
            ast::TopLevelEntity::TargetTriple(triple) => {
                index.target_triple = Some(triple);
            }
            ast::TopLevelEntity::TargetDataLayout(layout) => {
                index.data_layout = Some(layout);
            }
            ast::TopLevelEntity::ModuleAsm(asm) => {
                index.module_asm.push(asm);
            }
            ast::TopLevelEntity::TypeDef(def) => {
                if index.type_defs.insert(&def.name, def).is_some() {
                    return Err(TranslateError::duplicate_ident(
                        Component::Index,
                        IdentKind::Type,
                        ident::type_name(&def.name),
                        def.span,
                    ));
                }
                index.type_def_order.push(&def.name);
            }
            ast::TopLevelEntity::ComdatDef(def) => {
                if index.comdat_defs.insert(&def.name, def).is_some() {
                    return Err(TranslateError::duplicate_ident(
                        Component::Index,
                        IdentKind::Comdat,
                        ident::comdat(&def.name),
                        def.span,
                    ));
                }
                index.comdat_order.push(&def.name);
            }
            ast::TopLevelEntity::Global(def) => {
                insert_global(&mut index, def.name.clone(), GlobalItem::Global(def), def.span)?;
                index.global_order.push(def.name.clone());
            }
            ast::TopLevelEntity::Alias(def) => {
                insert_global(&mut index, def.name.clone(), GlobalItem::Alias(def), def.span)?;
                index.indirect_order.push(def.name.clone());
            }
            ast::TopLevelEntity::IFunc(def) => {
                insert_global(&mut index, def.name.clone(), GlobalItem::IFunc(def), def.span)?;
                index.indirect_order.push(def.name.clone());
            }
            ast::TopLevelEntity::Func(def) => {
                insert_global(&mut index, def.name.clone(), GlobalItem::Func(def), def.span)?;
                index.func_order.push(def.name.clone());
            }
            ast::TopLevelEntity::AttrGroupDef(def) => {
                if index.attr_group_defs.insert(def.id, def).is_some() {
                    return Err(TranslateError::duplicate_ident(
                        Component::Index,
                        IdentKind::AttrGroup,
                        ident::attr_group_id(def.id),
                        def.span,
                    ));
                }
            }
            ast::TopLevelEntity::NamedMetadataDef(def) => {
                if index.named_md_defs.insert(&def.name, def).is_some() {
                    return Err(TranslateError::duplicate_ident(
                        Component::Index,
                        IdentKind::MetadataName,
                        ident::metadata_name(&def.name),
                        def.span,
                    ));
                }
                index.named_md_order.push(&def.name);
            }
            ast::TopLevelEntity::MetadataDef(def) => {
                if index.metadata_defs.insert(def.id, def).is_some() {
                    return Err(TranslateError::duplicate_ident(
                        Component::Index,
                        IdentKind::MetadataId,
                        ident::metadata_id(def.id),
                        def.span,
                    ));
                }
            }
            ast::TopLevelEntity::UseListOrder(def) => {
                index.use_list_orders.push(def);
            }
            ast::TopLevelEntity::UseListOrderBb(def) => {
                index.use_list_order_bbs.push(def);
            }
        }
    }
    Ok(index)
}

fn insert_global<'a>(
    index: &mut AstIndex<'a>,
    name: GlobalIdent,
    item: GlobalItem<'a>,
    span: Option<crate::source::Span>,
) -> Result<()> {
    if index.globals.insert(name.clone(), item).is_some() {
        return Err(TranslateError::duplicate_ident(
            Component::Index,
            IdentKind::Global,
            name.to_string(),
            span,
        ));
    }
    Ok(())
}
