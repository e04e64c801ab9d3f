//! Semantically linked in-memory IR.
//!
//! Entities live in append-only pools and reference each other through
//! typed identifiers, so cyclic type and metadata graphs need no interior
//! mutability: identity is allocated first, contents are filled later.

pub mod constant;
pub mod function;
pub mod ids;
pub mod inst;
pub mod metadata;
pub mod module;
pub mod types;

pub use constant::{ConstData, ConstExpr, ConstKind, ConstPool, GlobalRef};
pub use function::{Block, Function, Param, ValueDef};
pub use ids::{
    AliasId, AttrGroupId, BlockId, ComdatId, ConstId, FuncId, GlobalId, IFuncId, LocalId,
    MdNodeId, TypeId,
};
pub use inst::{
    Arg, Attr, Bundle, CallBody, CallInst, Clause, FuncAttr, Inst, Term, TypedValue,
    UnwindTarget, Value,
};
pub use metadata::{MdOperand, MetadataAttachment, MetadataNode, NamedMetadata};
pub use module::{
    Alias, AttrGroupDef, ComdatDef, Global, IFunc, Module, SymbolInfo, UseListOrder,
    UseListOrderBb,
};
pub use types::{AddrSpace, DisplayType, FloatKind, TypeKind, TypePool};
