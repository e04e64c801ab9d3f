//! The translator core: an eight-phase pipeline over one generator state.
//!
//! Phase order follows the forward-reference structure of the input:
//! indexing, type resolution, comdats, scaffolding, body translation,
//! use-list orders, blockaddress fix-ups, and deterministic module
//! assembly. Scaffolding is what lets every later phase resolve forward
//! references: the entity already exists with its final identity and type
//! before any body mentions it.

pub(crate) mod attrs;
pub(crate) mod constant;
pub(crate) mod fixup;
pub(crate) mod func;
pub(crate) mod globals;
pub(crate) mod index;
pub(crate) mod inst;
pub(crate) mod metadata;
pub(crate) mod scaffold;
pub(crate) mod types;

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::debug;

use crate::ast;
use crate::error::{Component, Result};
use crate::ident::{GlobalIdent, LocalIdent};
use crate::ir;
use crate::ir::{AttrGroupId, ComdatId, ConstId, FuncId, GlobalRef, MdNodeId, TypeId};

use index::AstIndex;

/// Resource guardrails for translation of untrusted inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranslateOptions {
    /// Maximum number of distinct types in one module.
    pub max_types: usize,
    /// Maximum number of numbered metadata nodes in one module.
    pub max_metadata_nodes: usize,
    /// Maximum number of instructions across all function bodies.
    pub max_total_insts: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            max_types: 1_000_000,
            max_metadata_nodes: 1_000_000,
            max_total_insts: 10_000_000,
        }
    }
}

/// Translates an AST module into an equivalent linked IR module.
pub fn translate(module: &ast::Module) -> Result<ir::Module> {
    translate_with_options(module, TranslateOptions::default())
}

/// Translates an AST module with explicit resource guardrails.
pub fn translate_with_options(
    module: &ast::Module,
    options: TranslateOptions,
) -> Result<ir::Module> {
    // 1. Index AST top-level entities.
    let start = Instant::now();
    let old = index::index_module(module)?;
    debug!("indexing AST top-level entities took {:?}", start.elapsed());

    let mut gen = Generator::new(old, options);

    // 2. Resolve IR type definitions.
    let start = Instant::now();
    gen.comp = Component::Types;
    gen.resolve_type_defs()?;
    debug!("type resolution took {:?}", start.elapsed());

    // 3. Translate AST comdat definitions.
    gen.comp = Component::Scaffold;
    gen.translate_comdat_defs()?;

    // 4a. Create scaffolding IR top-level entities (no bodies, final types).
    let start = Instant::now();
    gen.comp = Component::Scaffold;
    gen.create_top_level_entities()?;
    debug!("creating IR top-level entities took {:?}", start.elapsed());

    // 4b. Translate AST top-level bodies. The four substeps only read the
    // frozen scaffold tables and write disjoint entities, so they could run
    // concurrently; sequential execution gives identical output.
    let start = Instant::now();
    gen.comp = Component::Bodies;
    gen.translate_global_defs()?;
    gen.translate_attr_group_defs()?;
    gen.translate_named_metadata_defs()?;
    gen.translate_metadata_defs()?;
    debug!("translating AST to IR took {:?}", start.elapsed());

    // 5-7. Use-list orders, block-scoped use-list orders, blockaddress
    // fix-ups. Mutually independent, same as 4b.
    let start = Instant::now();
    gen.comp = Component::Fixup;
    gen.translate_use_list_orders()?;
    gen.translate_use_list_order_bbs()?;
    gen.fix_block_address_consts()?;
    debug!("fix-up passes took {:?}", start.elapsed());

    // 8. Assemble the module in the mandated per-kind order.
    gen.add_defs_to_module();
    Ok(gen.finish())
}

/// Pending `blockaddress` fix-up: the constant slot to rewrite plus the
/// (function, block label) pair it names.
#[derive(Debug, Clone)]
pub(crate) struct PendingBlockAddr {
    pub const_id: ConstId,
    pub func: FuncId,
    pub block: LocalIdent,
}

/// Shared mutable workspace threaded through all phases.
///
/// The AST-side tables are frozen after indexing; the IR-side scaffold
/// tables are frozen once phase 4a completes. Body translation only
/// appends to pools and fills entities it owns.
pub(crate) struct Generator<'a> {
    pub opts: TranslateOptions,
    pub old: AstIndex<'a>,
    pub module: ir::Module,
    /// Named type defs resolved so far (placeholders included).
    pub type_ids: HashMap<String, TypeId>,
    /// Non-struct type defs currently being resolved (cycle detection).
    pub resolving: HashSet<String>,
    /// Scaffolded top-level entities by identifier.
    pub global_refs: HashMap<GlobalIdent, GlobalRef>,
    pub comdat_ids: HashMap<String, ComdatId>,
    pub attr_group_ids: HashMap<u64, AttrGroupId>,
    /// Named metadata scaffold: name to pool index.
    pub named_md_ids: HashMap<String, usize>,
    pub metadata_ids: HashMap<u64, MdNodeId>,
    pub pending_block_addrs: Vec<PendingBlockAddr>,
    /// Running instruction count across all bodies (guardrail).
    pub inst_count: usize,
    /// Component errors raised by shared helpers are attributed to.
    pub comp: Component,
}

impl<'a> Generator<'a> {
    fn new(old: AstIndex<'a>, opts: TranslateOptions) -> Self {
        let mut module = ir::Module::new();
        module.source_filename = old.source_filename.map(str::to_string);
        module.target_triple = old.target_triple.map(str::to_string);
        module.data_layout = old.data_layout.map(str::to_string);
        module.module_asm = old.module_asm.iter().map(|s| s.to_string()).collect();
        Self {
            opts,
            old,
            module,
            type_ids: HashMap::new(),
            resolving: HashSet::new(),
            global_refs: HashMap::new(),
            comdat_ids: HashMap::new(),
            attr_group_ids: HashMap::new(),
            named_md_ids: HashMap::new(),
            metadata_ids: HashMap::new(),
            pending_block_addrs: Vec::new(),
            inst_count: 0,
            comp: Component::Index,
        }
    }

    /// Appends the ordered definition listings to the module.
    ///
    /// Entity pools were populated in source order per kind during
    /// scaffolding; this step emits the per-kind listing order the module
    /// guarantees: type and comdat definitions alphabetically, attribute
    /// group and metadata definitions in ascending numeric ID. Missing
    /// scaffold entries at this point are translator bugs.
    fn add_defs_to_module(&mut self) {
        // Type definitions in alphabetical order.
        let mut type_names: Vec<&str> = self.old.type_defs.keys().copied().collect();
        type_names.sort_unstable();
        for name in type_names {
            let Some(&id) = self.type_ids.get(name) else {
                panic!("unable to locate type identifier {}", crate::ident::type_name(name));
            };
            self.module.type_defs.push(id);
        }

        // Comdat definitions in alphabetical order.
        let mut comdat_names: Vec<&str> = self.old.comdat_defs.keys().copied().collect();
        comdat_names.sort_unstable();
        for name in comdat_names {
            let Some(&id) = self.comdat_ids.get(name) else {
                panic!("unable to locate comdat name {}", crate::ident::comdat(name));
            };
            self.module.comdat_defs.push(id);
        }

        // Globals, indirect symbols, and functions are already pooled in
        // source order; verify every indexed identifier reached its pool.
        for ident in &self.old.global_order {
            match self.global_refs.get(ident) {
                Some(GlobalRef::Global(_)) => {}
                other => panic!("invalid global scaffold for {ident}: {other:?}"),
            }
        }
        for ident in &self.old.indirect_order {
            match self.global_refs.get(ident) {
                Some(GlobalRef::Alias(_) | GlobalRef::IFunc(_)) => {}
                other => panic!("invalid indirect symbol scaffold for {ident}: {other:?}"),
            }
        }
        for ident in &self.old.func_order {
            match self.global_refs.get(ident) {
                Some(GlobalRef::Func(_)) => {}
                other => panic!("invalid function scaffold for {ident}: {other:?}"),
            }
        }

        // Attribute group definitions in ascending numeric ID order.
        let mut attr_group_ids: Vec<u64> = self.old.attr_group_defs.keys().copied().collect();
        attr_group_ids.sort_unstable();
        for id in attr_group_ids {
            let Some(&group) = self.attr_group_ids.get(&id) else {
                panic!(
                    "unable to locate attribute group ID {}",
                    crate::ident::attr_group_id(id)
                );
            };
            self.module.attr_group_defs.push(group);
        }

        // Named metadata definitions are pooled in source order; verify.
        for name in &self.old.named_md_order {
            if !self.named_md_ids.contains_key(*name) {
                panic!(
                    "unable to locate metadata name {}",
                    crate::ident::metadata_name(name)
                );
            }
        }

        // Metadata definitions in ascending numeric ID order.
        let mut metadata_ids: Vec<u64> = self.old.metadata_defs.keys().copied().collect();
        metadata_ids.sort_unstable();
        for id in metadata_ids {
            let Some(&node) = self.metadata_ids.get(&id) else {
                panic!("unable to locate metadata ID {}", crate::ident::metadata_id(id));
            };
            self.module.metadata_defs.push(node);
        }
    }

    fn finish(self) -> ir::Module {
        self.module
    }
}
