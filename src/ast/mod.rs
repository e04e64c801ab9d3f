//! Input trees mirroring the textual assembly grammar.
//!
//! These nodes are the contract with the external parser: the translator
//! consumes them and never mutates them.

pub mod constant;
pub mod inst;
pub mod metadata;
pub mod module;
pub mod types;

pub use constant::{ConstAst, ConstExprAst, TypedConstAst};
pub use inst::{
    ArgAst, AttributeAst, BundleAst, CallBodyAst, ClauseAst, FuncAttrAst, InstAst, SwitchCaseAst,
    TermAst, TypedValueAst, UnwindTargetAst, ValueAst,
};
pub use metadata::{MdOperandAst, MetadataAttachmentAst, MetadataDefAst, NamedMetadataDefAst};
pub use module::{
    AliasAst, AttrGroupDefAst, BlockAst, ComdatDefAst, ComdatRefAst, FuncAst, GlobalAst, IFuncAst,
    Module, ParamAst, SymbolDecorations, TopLevelEntity, TypeDefAst, UseListOrderAst,
    UseListOrderBbAst,
};
pub use types::TypeAst;
