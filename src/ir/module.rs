//! IR module containers: entity pools plus ordered listing vectors.

use crate::attrs::{
    DllStorage, Linkage, Preemption, SelectionKind, TlsModel, UnnamedAddr, Visibility,
};
use crate::ident::GlobalIdent;
use crate::ir::constant::ConstPool;
use crate::ir::function::Function;
use crate::ir::ids::{
    AttrGroupId, BlockId, ComdatId, ConstId, FuncId, MdNodeId, TypeId,
};
use crate::ir::inst::Attr;
use crate::ir::metadata::{MetadataAttachment, MetadataNode, NamedMetadata};
use crate::ir::types::{AddrSpace, TypePool};

/// Shared decoration set of globals, aliases, and ifuncs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolInfo {
    /// Symbol linkage.
    pub linkage: Linkage,
    /// Runtime preemption.
    pub preemption: Preemption,
    /// Symbol visibility.
    pub visibility: Visibility,
    /// DLL storage class, when present.
    pub dll_storage: Option<DllStorage>,
    /// Thread-local model, when present.
    pub thread_local: Option<TlsModel>,
    /// Unnamed-address specifier, when present.
    pub unnamed_addr: Option<UnnamedAddr>,
}

/// Global variable declaration or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    /// Global identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub info: SymbolInfo,
    /// Address space of the global's address.
    pub addr_space: AddrSpace,
    /// `externally_initialized` flag.
    pub externally_initialized: bool,
    /// `constant` (immutable) rather than `global`.
    pub immutable: bool,
    /// Content type.
    pub content_ty: TypeId,
    /// Pointer type of the global's address.
    pub ty: TypeId,
    /// Initializer; absent for declarations.
    pub init: Option<ConstId>,
    /// Section name, when present.
    pub section: Option<String>,
    /// Comdat reference, when present.
    pub comdat: Option<ComdatId>,
    /// Explicit alignment, when present.
    pub align: Option<u64>,
    /// Metadata attachments.
    pub metadata: Vec<MetadataAttachment>,
}

/// Alias definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    /// Alias identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub info: SymbolInfo,
    /// Aliased content type.
    pub content_ty: TypeId,
    /// Pointer type of the aliasee.
    pub ty: TypeId,
    /// Aliasee constant.
    pub aliasee: ConstId,
}

/// IFunc definition.
#[derive(Debug, Clone, PartialEq)]
pub struct IFunc {
    /// IFunc identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub info: SymbolInfo,
    /// Resolved content type.
    pub content_ty: TypeId,
    /// Pointer type of the ifunc.
    pub ty: TypeId,
    /// Resolver function constant.
    pub resolver: ConstId,
}

/// Comdat definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ComdatDef {
    /// Comdat name (without `$` prefix).
    pub name: String,
    /// Selection kind.
    pub kind: SelectionKind,
}

/// Attribute group definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrGroupDef {
    /// Numeric group ID as written in the input.
    pub id: u64,
    /// Attributes in the group.
    pub attrs: Vec<Attr>,
}

/// Module-scope use-list order directive.
#[derive(Debug, Clone, PartialEq)]
pub struct UseListOrder {
    /// Ordered constant value.
    pub value: ConstId,
    /// Permutation of use indices.
    pub indexes: Vec<u64>,
}

/// Basic-block-scope use-list order directive.
#[derive(Debug, Clone, PartialEq)]
pub struct UseListOrderBb {
    /// Enclosing function.
    pub func: FuncId,
    /// Ordered basic block.
    pub block: BlockId,
    /// Permutation of use indices.
    pub indexes: Vec<u64>,
}

/// Fully linked IR module.
///
/// Entity pools are populated in source order per kind during scaffolding;
/// the `*_defs` listing vectors are produced by module assembly and give
/// the mandated output order (type and comdat definitions alphabetical,
/// attribute group and metadata definitions in ascending numeric ID).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Source filename, when present.
    pub source_filename: Option<String>,
    /// Target triple, when present.
    pub target_triple: Option<String>,
    /// Target data layout, when present.
    pub data_layout: Option<String>,
    /// Module-level inline assembly lines in source order.
    pub module_asm: Vec<String>,
    /// Type pool.
    pub types: TypePool,
    /// Constant pool.
    pub consts: ConstPool,
    /// Named type definitions in alphabetical order.
    pub type_defs: Vec<TypeId>,
    /// Comdat pool in source order.
    pub comdats: Vec<ComdatDef>,
    /// Comdat definitions in alphabetical order.
    pub comdat_defs: Vec<ComdatId>,
    /// Global variables in source order.
    pub globals: Vec<Global>,
    /// Aliases in source order.
    pub aliases: Vec<Alias>,
    /// IFuncs in source order.
    pub ifuncs: Vec<IFunc>,
    /// Functions in source order.
    pub funcs: Vec<Function>,
    /// Attribute group pool in source order.
    pub attr_groups: Vec<AttrGroupDef>,
    /// Attribute group definitions in ascending numeric ID order.
    pub attr_group_defs: Vec<AttrGroupId>,
    /// Named metadata definitions in source order.
    pub named_metadata: Vec<NamedMetadata>,
    /// Metadata node pool in source order.
    pub metadata_nodes: Vec<MetadataNode>,
    /// Metadata definitions in ascending numeric ID order.
    pub metadata_defs: Vec<MdNodeId>,
    /// Module-scope use-list orders in source order.
    pub use_list_orders: Vec<UseListOrder>,
    /// Basic-block-scope use-list orders in source order.
    pub use_list_order_bbs: Vec<UseListOrderBb>,
}

impl Module {
    /// Creates an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one function.
    pub fn func(&self, id: FuncId) -> &Function {
        &self.funcs[id.index()]
    }

    /// Returns one metadata node.
    pub fn metadata_node(&self, id: MdNodeId) -> &MetadataNode {
        &self.metadata_nodes[id.index()]
    }
}
