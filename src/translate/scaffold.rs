//! Scaffolding: empty IR entities with final identity and type.
//!
//! After this phase the scaffold tables are frozen; body translation
//! resolves every forward reference by looking the target entity up here.

use crate::error::{Component, Result, TranslateError};
use crate::ir;
use crate::ir::{
    AddrSpace, AttrGroupId, ComdatId, FuncId, GlobalRef, MdNodeId, TypeKind,
};
use crate::translate::index::GlobalItem;
use crate::translate::Generator;

impl<'a> Generator<'a> {
    /// Translates comdat definitions (phase 3).
    pub(crate) fn translate_comdat_defs(&mut self) -> Result<()> {
        for i in 0..self.old.comdat_order.len() {
            let name = self.old.comdat_order[i];
            let def = self.old.comdat_defs[name];
            let id = ComdatId::from_index(self.module.comdats.len());
            self.module.comdats.push(ir::ComdatDef {
                name: name.to_string(),
                kind: def.kind,
            });
            self.comdat_ids.insert(name.to_string(), id);
        }
        Ok(())
    }

    /// Creates scaffolding for every top-level entity (phase 4a).
    pub(crate) fn create_top_level_entities(&mut self) -> Result<()> {
        // 4a.1 Globals, aliases, ifuncs, and functions, each pooled in
        // source order within its kind.
        for i in 0..self.old.global_order.len() {
            let ident = self.old.global_order[i].clone();
            let GlobalItem::Global(def) = self.old.globals[&ident] else {
                unreachable!("global order entry is not a global");
            };
            let content_ty = self.translate_type(&def.content_ty)?;
            let ty = self.module.types.intern(TypeKind::Pointer {
                pointee: content_ty,
                addr_space: def.addr_space,
            });
            let id = ir::GlobalId::from_index(self.module.globals.len());
            self.module.globals.push(ir::Global {
                name: ident.clone(),
                info: ir::SymbolInfo::default(),
                addr_space: def.addr_space,
                externally_initialized: false,
                immutable: false,
                content_ty,
                ty,
                init: None,
                section: None,
                comdat: None,
                align: None,
                metadata: Vec::new(),
            });
            self.global_refs.insert(ident, GlobalRef::Global(id));
        }
        for i in 0..self.old.indirect_order.len() {
            let ident = self.old.indirect_order[i].clone();
            match self.old.globals[&ident] {
                GlobalItem::Alias(def) => {
                    let content_ty = self.translate_type(&def.content_ty)?;
                    let ty = self.module.types.intern(TypeKind::Pointer {
                        pointee: content_ty,
                        addr_space: AddrSpace::DEFAULT,
                    });
                    let id = ir::AliasId::from_index(self.module.aliases.len());
                    self.module.aliases.push(ir::Alias {
                        name: ident.clone(),
                        info: ir::SymbolInfo::default(),
                        content_ty,
                        ty,
                        aliasee: ir::ConstId::default(),
                    });
                    self.global_refs.insert(ident, GlobalRef::Alias(id));
                }
                GlobalItem::IFunc(def) => {
                    let content_ty = self.translate_type(&def.content_ty)?;
                    let ty = self.module.types.intern(TypeKind::Pointer {
                        pointee: content_ty,
                        addr_space: AddrSpace::DEFAULT,
                    });
                    let id = ir::IFuncId::from_index(self.module.ifuncs.len());
                    self.module.ifuncs.push(ir::IFunc {
                        name: ident.clone(),
                        info: ir::SymbolInfo::default(),
                        content_ty,
                        ty,
                        resolver: ir::ConstId::default(),
                    });
                    self.global_refs.insert(ident, GlobalRef::IFunc(id));
                }
                _ => unreachable!("indirect symbol order entry is not an alias or ifunc"),
            }
        }
        for i in 0..self.old.func_order.len() {
            let ident = self.old.func_order[i].clone();
            let GlobalItem::Func(def) = self.old.globals[&ident] else {
                unreachable!("function order entry is not a function");
            };
            let ret = self.translate_type(&def.ret_ty)?;
            let mut params = Vec::with_capacity(def.params.len());
            for param in &def.params {
                let ty = self.translate_type(&param.ty)?;
                if self.module.types.is_void(ty) {
                    return Err(TranslateError::malformed_type(format!(
                        "void parameter in function {ident}"
                    ))
                    .with_span(def.span));
                }
                params.push(ty);
            }
            let sig = self.module.types.intern(TypeKind::Func {
                ret,
                params,
                variadic: def.variadic,
            });
            let ty = self.module.types.intern(TypeKind::Pointer {
                pointee: sig,
                addr_space: def.addr_space,
            });
            let id = FuncId::from_index(self.module.funcs.len());
            self.module.funcs.push(ir::Function {
                name: ident.clone(),
                sig,
                ty,
                linkage: Default::default(),
                preemption: Default::default(),
                visibility: Default::default(),
                dll_storage: None,
                calling_conv: Default::default(),
                ret_attrs: Vec::new(),
                unnamed_addr: None,
                addr_space: def.addr_space,
                func_attrs: Vec::new(),
                section: None,
                comdat: None,
                gc: None,
                prefix: None,
                prologue: None,
                personality: None,
                values: Vec::new(),
                params: Vec::new(),
                blocks: Vec::new(),
                metadata: Vec::new(),
            });
            self.global_refs.insert(ident, GlobalRef::Func(id));
        }

        // 4a.2 Attribute group containers in ascending numeric ID order.
        let mut group_ids: Vec<u64> = self.old.attr_group_defs.keys().copied().collect();
        group_ids.sort_unstable();
        for group in group_ids {
            let id = AttrGroupId::from_index(self.module.attr_groups.len());
            self.module.attr_groups.push(ir::AttrGroupDef {
                id: group,
                attrs: Vec::new(),
            });
            self.attr_group_ids.insert(group, id);
        }

        // 4a.3 Named metadata containers in source order.
        for i in 0..self.old.named_md_order.len() {
            let name = self.old.named_md_order[i];
            let index = self.module.named_metadata.len();
            self.module.named_metadata.push(ir::NamedMetadata {
                name: name.to_string(),
                nodes: Vec::new(),
            });
            self.named_md_ids.insert(name.to_string(), index);
        }

        // 4a.4 Metadata node containers in ascending numeric ID order; the
        // allocated identifiers are what cyclic metadata resolves through.
        let mut md_ids: Vec<u64> = self.old.metadata_defs.keys().copied().collect();
        md_ids.sort_unstable();
        if md_ids.len() > self.opts.max_metadata_nodes {
            return Err(TranslateError::limit_exceeded(
                Component::Scaffold,
                format!(
                    "module exceeds {} metadata nodes",
                    self.opts.max_metadata_nodes
                ),
            ));
        }
        for md in md_ids {
            let id = MdNodeId::from_index(self.module.metadata_nodes.len());
            self.module.metadata_nodes.push(ir::MetadataNode {
                id: md,
                distinct: false,
                operands: Vec::new(),
            });
            self.metadata_ids.insert(md, id);
        }
        Ok(())
    }
}
