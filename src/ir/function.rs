//! IR functions, basic blocks, and local-ID assignment.

use crate::attrs::{CallingConv, DllStorage, Linkage, Preemption, UnnamedAddr, Visibility};
use crate::error::{Result, TranslateError};
use crate::ident::{GlobalIdent, LocalIdent};
use crate::ir::ids::{ComdatId, ConstId, LocalId, TypeId};
use crate::ir::inst::{Attr, FuncAttr, Inst, Term};
use crate::ir::metadata::MetadataAttachment;
use crate::ir::types::AddrSpace;

/// One function-local value slot: a parameter or an instruction result.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDef {
    /// Local name; absent until local-ID assignment names the slot.
    pub name: Option<LocalIdent>,
    /// Resolved value type.
    pub ty: TypeId,
}

/// Function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Backing value slot.
    pub value: LocalId,
    /// Parameter attributes.
    pub attrs: Vec<Attr>,
}

/// Basic block with resolved body.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block label; absent until local-ID assignment names the block.
    pub name: Option<LocalIdent>,
    /// Non-terminator instructions in source order.
    pub insts: Vec<Inst>,
    /// Block terminator.
    pub term: Term,
}

/// IR function declaration or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function identifier.
    pub name: GlobalIdent,
    /// Function signature type.
    pub sig: TypeId,
    /// Pointer type to the function.
    pub ty: TypeId,
    /// Symbol linkage.
    pub linkage: Linkage,
    /// Runtime preemption.
    pub preemption: Preemption,
    /// Symbol visibility.
    pub visibility: Visibility,
    /// DLL storage class, when present.
    pub dll_storage: Option<DllStorage>,
    /// Calling convention.
    pub calling_conv: CallingConv,
    /// Return attributes.
    pub ret_attrs: Vec<Attr>,
    /// Unnamed-address specifier, when present.
    pub unnamed_addr: Option<UnnamedAddr>,
    /// Function address space.
    pub addr_space: AddrSpace,
    /// Function attributes.
    pub func_attrs: Vec<FuncAttr>,
    /// Section name, when present.
    pub section: Option<String>,
    /// Comdat reference, when present.
    pub comdat: Option<ComdatId>,
    /// Garbage collector name, when present.
    pub gc: Option<String>,
    /// Prefix constant, when present.
    pub prefix: Option<ConstId>,
    /// Prologue constant, when present.
    pub prologue: Option<ConstId>,
    /// Personality constant, when present.
    pub personality: Option<ConstId>,
    /// Local value slots: parameters first, then instruction results in
    /// source order.
    pub values: Vec<ValueDef>,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Basic blocks; empty for declarations.
    pub blocks: Vec<Block>,
    /// Metadata attachments.
    pub metadata: Vec<MetadataAttachment>,
}

impl Function {
    /// Returns the type of one local value slot.
    pub fn value_ty(&self, id: LocalId) -> TypeId {
        self.values[id.index()].ty
    }

    /// Returns the name of one local value slot.
    pub fn value_name(&self, id: LocalId) -> Option<&LocalIdent> {
        self.values[id.index()].name.as_ref()
    }

    /// Assigns numeric names to unnamed parameters, basic blocks, and
    /// value-producing instructions.
    ///
    /// The counter walks parameters, then each block's label followed by
    /// its value-producing instructions and terminator, in source order.
    /// Unnamed entities receive the counter as their numeric name; entities
    /// already carrying a numeric name must equal the counter; explicitly
    /// named entities neither receive nor advance the counter. Running the
    /// assignment again on an already-assigned function is a no-op.
    pub fn assign_local_ids(&mut self) -> Result<()> {
        if self.blocks.is_empty() {
            return Ok(());
        }
        let func = self.name.to_string();
        let mut next: u64 = 0;
        for i in 0..self.params.len() {
            let slot = self.params[i].value;
            bump(&mut self.values[slot.index()].name, &mut next, &func)?;
        }
        for b in 0..self.blocks.len() {
            bump(&mut self.blocks[b].name, &mut next, &func)?;
            let mut results: Vec<LocalId> =
                self.blocks[b].insts.iter().filter_map(Inst::result).collect();
            results.extend(self.blocks[b].term.result());
            for slot in results {
                bump(&mut self.values[slot.index()].name, &mut next, &func)?;
            }
        }
        Ok(())
    }
}

fn bump(name: &mut Option<LocalIdent>, next: &mut u64, func: &str) -> Result<()> {
    match name {
        None => {
            *name = Some(LocalIdent::Num(*next));
            *next += 1;
        }
        Some(LocalIdent::Num(got)) => {
            if *got != *next {
                return Err(TranslateError::bad_local_id(func, *next, *got));
            }
            *next += 1;
        }
        Some(LocalIdent::Name(_)) => {}
    }
    Ok(())
}
