//! Fix-up passes: use-list orders and pending `blockaddress` constants.
//!
//! These run after every function body exists, so (function, block label)
//! pairs recorded earlier can finally be resolved to block identifiers.

use crate::error::{Component, IdentKind, Result, TranslateError};
use crate::ident::LocalIdent;
use crate::ir::{BlockId, FuncId, GlobalRef, UseListOrder, UseListOrderBb};
use crate::translate::Generator;

impl<'a> Generator<'a> {
    /// Translates module-scope use-list order directives (phase 5).
    pub(crate) fn translate_use_list_orders(&mut self) -> Result<()> {
        for i in 0..self.old.use_list_orders.len() {
            let def = self.old.use_list_orders[i];
            check_permutation(&def.indexes)?;
            let value = self
                .translate_typed_const(&def.value)
                .map_err(|e| e.with_span(def.span))?;
            self.module.use_list_orders.push(UseListOrder {
                value,
                indexes: def.indexes.clone(),
            });
        }
        Ok(())
    }

    /// Translates basic-block-scope use-list order directives (phase 6).
    pub(crate) fn translate_use_list_order_bbs(&mut self) -> Result<()> {
        for i in 0..self.old.use_list_order_bbs.len() {
            let def = self.old.use_list_order_bbs[i];
            check_permutation(&def.indexes)?;
            let Some(&target) = self.global_refs.get(&def.func) else {
                return Err(TranslateError::undefined_ident(
                    Component::Fixup,
                    IdentKind::Global,
                    def.func.to_string(),
                )
                .with_span(def.span));
            };
            let GlobalRef::Func(func) = target else {
                return Err(TranslateError::syntax(
                    Component::Fixup,
                    format!("use-list order names non-function {}", def.func),
                )
                .with_span(def.span));
            };
            let block = self.lookup_block(func, &def.block)?;
            self.module.use_list_order_bbs.push(UseListOrderBb {
                func,
                block,
                indexes: def.indexes.clone(),
            });
        }
        Ok(())
    }

    /// Rewrites pending `blockaddress` constants now that the referenced
    /// function bodies exist (phase 7).
    pub(crate) fn fix_block_address_consts(&mut self) -> Result<()> {
        for i in 0..self.pending_block_addrs.len() {
            let pending = self.pending_block_addrs[i].clone();
            let block = self.lookup_block(pending.func, &pending.block)?;
            self.module.consts.resolve_block_address(pending.const_id, block);
        }
        Ok(())
    }

    /// Finds a block by its (possibly assigned) local name inside a
    /// translated function.
    fn lookup_block(&self, func: FuncId, label: &LocalIdent) -> Result<BlockId> {
        let f = &self.module.funcs[func.index()];
        for (b, block) in f.blocks.iter().enumerate() {
            if block.name.as_ref() == Some(label) {
                return Ok(BlockId::from_index(b));
            }
        }
        Err(TranslateError::undefined_ident(
            Component::Fixup,
            IdentKind::Block,
            format!("{label} in function {}", f.name),
        ))
    }
}

/// Checks that a use-list order is a permutation of `0..n`.
fn check_permutation(indexes: &[u64]) -> Result<()> {
    let mut seen = vec![false; indexes.len()];
    for &index in indexes {
        let valid = usize::try_from(index)
            .ok()
            .and_then(|i| seen.get(i).copied())
            == Some(false);
        if !valid {
            return Err(TranslateError::syntax(
                Component::Fixup,
                format!("use-list order indexes are not a permutation of 0..{}", indexes.len()),
            ));
        }
        seen[index as usize] = true;
    }
    Ok(())
}
