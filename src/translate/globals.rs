//! Bodies of globals, aliases, and ifuncs, plus shared symbol decoration
//! translation (phase 4b.1, non-function half).

use log::trace;

use crate::ast;
use crate::error::{IdentKind, Result, TranslateError};
use crate::ident;
use crate::ident::GlobalIdent;
use crate::ir::{ComdatId, GlobalRef, SymbolInfo};
use crate::translate::index::GlobalItem;
use crate::translate::Generator;

impl<'a> Generator<'a> {
    /// Translates globals, aliases, ifuncs, and functions (phase 4b.1).
    pub(crate) fn translate_global_defs(&mut self) -> Result<()> {
        for i in 0..self.old.global_order.len() {
            let ident = self.old.global_order[i].clone();
            let GlobalItem::Global(def) = self.old.globals[&ident] else {
                unreachable!("global order entry is not a global");
            };
            trace!("translating global {ident}");
            self.translate_global(&ident, def)?;
        }
        for i in 0..self.old.indirect_order.len() {
            let ident = self.old.indirect_order[i].clone();
            match self.old.globals[&ident] {
                GlobalItem::Alias(def) => self.translate_alias(&ident, def)?,
                GlobalItem::IFunc(def) => self.translate_ifunc(&ident, def)?,
                _ => unreachable!("indirect symbol order entry is not an alias or ifunc"),
            }
        }
        for i in 0..self.old.func_order.len() {
            let ident = self.old.func_order[i].clone();
            let GlobalItem::Func(def) = self.old.globals[&ident] else {
                unreachable!("function order entry is not a function");
            };
            trace!("translating body of function {ident}");
            self.translate_func(&ident, def)?;
        }
        Ok(())
    }

    fn translate_global(&mut self, ident: &GlobalIdent, def: &'a ast::GlobalAst) -> Result<()> {
        let GlobalRef::Global(id) = self.global_refs[ident] else {
            unreachable!("scaffold for {ident} is not a global");
        };
        let info = symbol_info(&def.decorations);
        let content_ty = self.module.globals[id.index()].content_ty;
        let init = match &def.init {
            Some(init) => Some(self.translate_const(content_ty, init).map_err(|e| e.with_span(def.span))?),
            None => None,
        };
        let comdat = match &def.comdat {
            Some(r) => Some(self.resolve_comdat(ident, r)?),
            None => None,
        };
        let metadata = self.translate_metadata_attachments(&def.metadata)?;
        let global = &mut self.module.globals[id.index()];
        global.info = info;
        global.externally_initialized = def.externally_initialized;
        global.immutable = def.immutable;
        global.init = init;
        global.section = def.section.clone();
        global.comdat = comdat;
        global.align = def.align;
        global.metadata = metadata;
        Ok(())
    }

    fn translate_alias(&mut self, ident: &GlobalIdent, def: &'a ast::AliasAst) -> Result<()> {
        let GlobalRef::Alias(id) = self.global_refs[ident] else {
            unreachable!("scaffold for {ident} is not an alias");
        };
        let aliasee = self
            .translate_typed_const(&def.aliasee)
            .map_err(|e| e.with_span(def.span))?;
        let aliasee_ty = self.module.consts.ty(aliasee);
        if !self.module.types.is_pointer(aliasee_ty) {
            return Err(self
                .const_type_mismatch(&format!("aliasee of {ident}"), "pointer type", aliasee_ty)
                .with_span(def.span));
        }
        let alias = &mut self.module.aliases[id.index()];
        alias.info = symbol_info(&def.decorations);
        alias.ty = aliasee_ty;
        alias.aliasee = aliasee;
        Ok(())
    }

    fn translate_ifunc(&mut self, ident: &GlobalIdent, def: &'a ast::IFuncAst) -> Result<()> {
        let GlobalRef::IFunc(id) = self.global_refs[ident] else {
            unreachable!("scaffold for {ident} is not an ifunc");
        };
        let resolver = self
            .translate_typed_const(&def.resolver)
            .map_err(|e| e.with_span(def.span))?;
        let resolver_ty = self.module.consts.ty(resolver);
        if !self.module.types.is_pointer(resolver_ty) {
            return Err(self
                .const_type_mismatch(&format!("resolver of {ident}"), "pointer type", resolver_ty)
                .with_span(def.span));
        }
        let ifunc = &mut self.module.ifuncs[id.index()];
        ifunc.info = symbol_info(&def.decorations);
        ifunc.resolver = resolver;
        Ok(())
    }

    /// Resolves a comdat reference; a bare `comdat` uses the symbol's own
    /// name.
    pub(crate) fn resolve_comdat(
        &mut self,
        ident: &GlobalIdent,
        r: &ast::ComdatRefAst,
    ) -> Result<ComdatId> {
        let name = match &r.name {
            Some(name) => name.clone(),
            None => match ident {
                GlobalIdent::Name(name) => name.clone(),
                GlobalIdent::Id(id) => id.to_string(),
            },
        };
        self.comdat_ids.get(&name).copied().ok_or_else(|| {
            TranslateError::undefined_ident(self.comp, IdentKind::Comdat, ident::comdat(&name))
        })
    }
}

/// Resolves optional symbol decorations into their defaults.
pub(crate) fn symbol_info(decorations: &ast::SymbolDecorations) -> SymbolInfo {
    SymbolInfo {
        linkage: decorations.linkage.unwrap_or_default(),
        preemption: decorations.preemption.unwrap_or_default(),
        visibility: decorations.visibility.unwrap_or_default(),
        dll_storage: decorations.dll_storage,
        thread_local: decorations.thread_local,
        unnamed_addr: decorations.unnamed_addr,
    }
}
