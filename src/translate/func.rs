//! Function body translation.
//!
//! Each body runs through the two-pass protocol: pass A indexes every
//! local identifier (parameter names, block labels, instruction results)
//! and precomputes result types, so pass B can resolve intra-function
//! forward references (jumps to later blocks, uses of later results)
//! against a complete local table. Unnamed entities are indexed under the
//! numeric name the local-ID assigner will later give them.

use std::collections::HashMap;

use crate::ast;
use crate::error::{Component, IdentKind, Result, TranslateError};
use crate::ident::{GlobalIdent, LocalIdent};
use crate::ir::{Block, BlockId, GlobalRef, LocalId, Param, TypeId, TypeKind, ValueDef};
use crate::translate::Generator;

/// Per-function translation tables.
pub(crate) struct FuncCx {
    pub func_ident: GlobalIdent,
    /// Function return type.
    pub ret_ty: TypeId,
    /// Local value slots under construction.
    pub values: Vec<ValueDef>,
    /// Local identifier to value slot.
    pub value_ids: HashMap<LocalIdent, LocalId>,
    /// Block label to block index.
    pub block_ids: HashMap<LocalIdent, BlockId>,
    /// Precomputed result slot per (block, instruction) position.
    pub inst_slots: Vec<Vec<Option<LocalId>>>,
    /// Precomputed result slot per block terminator.
    pub term_slots: Vec<Option<LocalId>>,
}

impl FuncCx {
    /// Returns the type of one local value slot.
    pub fn value_ty(&self, id: LocalId) -> TypeId {
        self.values[id.index()].ty
    }
}

impl<'a> Generator<'a> {
    /// Translates one function definition or declaration (phase 4b.1).
    pub(crate) fn translate_func(
        &mut self,
        ident: &GlobalIdent,
        def: &'a ast::FuncAst,
    ) -> Result<()> {
        let GlobalRef::Func(fid) = self.global_refs[ident] else {
            unreachable!("scaffold for {ident} is not a function");
        };
        let sig = self.module.funcs[fid.index()].sig;
        let TypeKind::Func { ret, params, .. } = self.module.types.kind(sig).clone() else {
            unreachable!("function scaffold {ident} has a non-function signature");
        };

        let mut fcx = FuncCx {
            func_ident: ident.clone(),
            ret_ty: ret,
            values: Vec::new(),
            value_ids: HashMap::new(),
            block_ids: HashMap::new(),
            inst_slots: Vec::new(),
            term_slots: Vec::new(),
        };

        // Parameters: value slots exist for declarations too, so parameter
        // attributes and names survive without a body.
        let mut ir_params = Vec::with_capacity(def.params.len());
        let mut next_num: u64 = 0;
        for (i, param) in def.params.iter().enumerate() {
            let slot = LocalId::from_index(fcx.values.len());
            fcx.values.push(ValueDef {
                name: param.name.clone(),
                ty: params[i],
            });
            self.index_local(&mut fcx, &param.name, slot, &mut next_num, def.span)?;
            let attrs = self.translate_attrs(&param.attrs)?;
            ir_params.push(Param { value: slot, attrs });
        }

        if !def.blocks.is_empty() {
            // Pass A: index block labels and instruction results.
            self.index_func_body(&mut fcx, def, &mut next_num)?;
            // Pass B: fill each block with typed instructions.
            let mut blocks = Vec::with_capacity(def.blocks.len());
            for (b, block) in def.blocks.iter().enumerate() {
                let mut insts = Vec::with_capacity(block.insts.len());
                for (i, inst) in block.insts.iter().enumerate() {
                    let slot = fcx.inst_slots[b][i];
                    insts.push(self.translate_inst(&fcx, inst, slot).map_err(|e| e.with_span(block.span))?);
                }
                let term = self
                    .translate_term(&fcx, &block.term, fcx.term_slots[b])
                    .map_err(|e| e.with_span(block.span))?;
                blocks.push(Block {
                    name: block.name.clone(),
                    insts,
                    term,
                });
            }
            let func = &mut self.module.funcs[fid.index()];
            func.blocks = blocks;
        }

        // Decorations, attributes, and attached constants.
        let info = crate::translate::globals::symbol_info(&def.decorations);
        let ret_attrs = self.translate_attrs(&def.ret_attrs)?;
        let func_attrs = self.translate_func_attrs(&def.func_attrs)?;
        let comdat = match &def.comdat {
            Some(r) => Some(self.resolve_comdat(ident, r)?),
            None => None,
        };
        let prefix = match &def.prefix {
            Some(tc) => Some(self.translate_typed_const(tc)?),
            None => None,
        };
        let prologue = match &def.prologue {
            Some(tc) => Some(self.translate_typed_const(tc)?),
            None => None,
        };
        let personality = match &def.personality {
            Some(tc) => Some(self.translate_typed_const(tc)?),
            None => None,
        };
        let metadata = self.translate_metadata_attachments(&def.metadata)?;

        let func = &mut self.module.funcs[fid.index()];
        func.linkage = def.decorations.linkage.unwrap_or_default();
        func.preemption = info.preemption;
        func.visibility = info.visibility;
        func.dll_storage = info.dll_storage;
        func.unnamed_addr = info.unnamed_addr;
        func.calling_conv = def.calling_conv.unwrap_or_default();
        func.ret_attrs = ret_attrs;
        func.func_attrs = func_attrs;
        func.section = def.section.clone();
        func.comdat = comdat;
        func.gc = def.gc.clone();
        func.prefix = prefix;
        func.prologue = prologue;
        func.personality = personality;
        func.values = fcx.values;
        func.params = ir_params;
        func.metadata = metadata;

        // Local-ID assignment runs once the body is complete.
        func.assign_local_ids()
    }

    /// Pass A: indexes block labels and instruction result slots.
    fn index_func_body(
        &mut self,
        fcx: &mut FuncCx,
        def: &'a ast::FuncAst,
        next_num: &mut u64,
    ) -> Result<()> {
        // Block labels first, so every branch target resolves regardless
        // of position; label numbering interleaves with instruction
        // numbering, so both are walked in one pass below.
        for (b, block) in def.blocks.iter().enumerate() {
            let bid = BlockId::from_index(b);
            let key = match &block.name {
                Some(name) => name.clone(),
                None => LocalIdent::Num(*next_num),
            };
            match &block.name {
                None | Some(LocalIdent::Num(_)) => *next_num += 1,
                Some(LocalIdent::Name(_)) => {}
            }
            if fcx.value_ids.contains_key(&key) || fcx.block_ids.insert(key.clone(), bid).is_some()
            {
                return Err(TranslateError::duplicate_ident(
                    Component::Bodies,
                    IdentKind::Block,
                    key.to_string(),
                    block.span,
                ));
            }

            let mut slots = Vec::with_capacity(block.insts.len());
            for inst in &block.insts {
                self.bump_inst_count(def.span)?;
                let result_ty = self.ast_inst_result_ty(inst)?;
                let slot = self.index_result_slot(
                    fcx,
                    inst_result_name(inst),
                    result_ty,
                    next_num,
                    block.span,
                )?;
                slots.push(slot);
            }
            fcx.inst_slots.push(slots);

            self.bump_inst_count(def.span)?;
            let term_ty = self.ast_term_result_ty(&block.term)?;
            let term_slot = self.index_result_slot(
                fcx,
                term_result_name(&block.term),
                term_ty,
                next_num,
                block.span,
            )?;
            fcx.term_slots.push(term_slot);
        }
        Ok(())
    }

    /// Allocates and indexes a result slot when the operation produces a
    /// value.
    fn index_result_slot(
        &mut self,
        fcx: &mut FuncCx,
        name: Option<&LocalIdent>,
        result_ty: Option<TypeId>,
        next_num: &mut u64,
        span: Option<crate::source::Span>,
    ) -> Result<Option<LocalId>> {
        let Some(ty) = result_ty else {
            if name.is_some() {
                return Err(TranslateError::syntax(
                    Component::Bodies,
                    format!(
                        "result name {} on a void operation in function {}",
                        name.unwrap(),
                        fcx.func_ident
                    ),
                )
                .with_span(span));
            }
            return Ok(None);
        };
        let slot = LocalId::from_index(fcx.values.len());
        fcx.values.push(ValueDef {
            name: name.cloned(),
            ty,
        });
        self.index_local(fcx, &name.cloned(), slot, next_num, span)?;
        Ok(Some(slot))
    }

    /// Inserts one value slot into the local table, assigning the pending
    /// numeric name to unnamed entities.
    fn index_local(
        &self,
        fcx: &mut FuncCx,
        name: &Option<LocalIdent>,
        slot: LocalId,
        next_num: &mut u64,
        span: Option<crate::source::Span>,
    ) -> Result<()> {
        let key = match name {
            Some(name) => name.clone(),
            None => LocalIdent::Num(*next_num),
        };
        match name {
            None | Some(LocalIdent::Num(_)) => *next_num += 1,
            Some(LocalIdent::Name(_)) => {}
        }
        if fcx.block_ids.contains_key(&key) || fcx.value_ids.insert(key.clone(), slot).is_some() {
            return Err(TranslateError::duplicate_ident(
                Component::Bodies,
                IdentKind::Local,
                key.to_string(),
                span,
            ));
        }
        Ok(())
    }

    fn bump_inst_count(&mut self, span: Option<crate::source::Span>) -> Result<()> {
        self.inst_count += 1;
        if self.inst_count > self.opts.max_total_insts {
            return Err(TranslateError::limit_exceeded(
                Component::Bodies,
                format!("module exceeds {} instructions", self.opts.max_total_insts),
            )
            .with_span(span));
        }
        Ok(())
    }
}

/// Returns the written result name of an instruction, if any.
fn inst_result_name(inst: &ast::InstAst) -> Option<&LocalIdent> {
    use ast::InstAst::*;
    match inst {
        FNeg { result, .. }
        | Binary { result, .. }
        | ExtractElement { result, .. }
        | InsertElement { result, .. }
        | ShuffleVector { result, .. }
        | ExtractValue { result, .. }
        | InsertValue { result, .. }
        | Alloca { result, .. }
        | Load { result, .. }
        | CmpXchg { result, .. }
        | AtomicRmw { result, .. }
        | Gep { result, .. }
        | Cast { result, .. }
        | ICmp { result, .. }
        | FCmp { result, .. }
        | Phi { result, .. }
        | Select { result, .. }
        | Freeze { result, .. }
        | Call { result, .. }
        | VaArg { result, .. }
        | LandingPad { result, .. }
        | CatchPad { result, .. }
        | CleanupPad { result, .. } => result.as_ref(),
        Store { .. } | Fence { .. } => None,
    }
}

/// Returns the written result name of a terminator, if any.
fn term_result_name(term: &ast::TermAst) -> Option<&LocalIdent> {
    use ast::TermAst::*;
    match term {
        Invoke { result, .. } | CallBr { result, .. } | CatchSwitch { result, .. } => {
            result.as_ref()
        }
        _ => None,
    }
}
