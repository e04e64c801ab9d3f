//! Top-level module syntax nodes.

use crate::ast::constant::{ConstAst, TypedConstAst};
use crate::ast::inst::{AttributeAst, FuncAttrAst, InstAst, TermAst};
use crate::ast::metadata::{MetadataAttachmentAst, MetadataDefAst, NamedMetadataDefAst};
use crate::ast::types::TypeAst;
use crate::attrs::{
    CallingConv, DllStorage, Linkage, Preemption, SelectionKind, TlsModel, UnnamedAddr, Visibility,
};
use crate::ident::{GlobalIdent, LocalIdent};
use crate::ir::AddrSpace;
use crate::source::Span;

/// Root parser output for one translation unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Top-level entities in source order.
    pub entities: Vec<TopLevelEntity>,
    /// Span covering the full parsed module, when available.
    pub span: Option<Span>,
}

impl Module {
    /// Creates a module from top-level entities.
    pub fn new(entities: Vec<TopLevelEntity>) -> Self {
        Self {
            entities,
            span: None,
        }
    }
}

/// One top-level form.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelEntity {
    /// `source_filename = "..."`.
    SourceFilename(String),
    /// `target triple = "..."`.
    TargetTriple(String),
    /// `target datalayout = "..."`.
    TargetDataLayout(String),
    /// `module asm "..."`.
    ModuleAsm(String),
    /// Named type definition.
    TypeDef(TypeDefAst),
    /// Comdat definition.
    ComdatDef(ComdatDefAst),
    /// Global variable declaration or definition.
    Global(GlobalAst),
    /// Alias definition.
    Alias(AliasAst),
    /// IFunc definition.
    IFunc(IFuncAst),
    /// Function declaration or definition.
    Func(FuncAst),
    /// Attribute group definition.
    AttrGroupDef(AttrGroupDefAst),
    /// Named metadata definition.
    NamedMetadataDef(NamedMetadataDefAst),
    /// Numbered metadata definition.
    MetadataDef(MetadataDefAst),
    /// Module-scope use-list order directive.
    UseListOrder(UseListOrderAst),
    /// Basic-block-scope use-list order directive.
    UseListOrderBb(UseListOrderBbAst),
}

/// Named type definition (`%name = type <ty>`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefAst {
    /// Type name (without `%` prefix).
    pub name: String,
    /// Defined body; [`TypeAst::Opaque`] for opaque declarations.
    pub ty: TypeAst,
    /// Source span for this definition.
    pub span: Option<Span>,
}

/// Comdat definition (`$name = comdat <kind>`).
#[derive(Debug, Clone, PartialEq)]
pub struct ComdatDefAst {
    /// Comdat name (without `$` prefix).
    pub name: String,
    /// Selection kind.
    pub kind: SelectionKind,
    /// Source span for this definition.
    pub span: Option<Span>,
}

/// Comdat reference on a global or function (`comdat` or `comdat($name)`).
#[derive(Debug, Clone, PartialEq)]
pub struct ComdatRefAst {
    /// Referenced comdat name; absent means the symbol's own name.
    pub name: Option<String>,
}

/// Shared symbol decoration set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolDecorations {
    /// Linkage, when written.
    pub linkage: Option<Linkage>,
    /// Runtime preemption, when written.
    pub preemption: Option<Preemption>,
    /// Visibility, when written.
    pub visibility: Option<Visibility>,
    /// DLL storage class, when written.
    pub dll_storage: Option<DllStorage>,
    /// Thread-local model, when written.
    pub thread_local: Option<TlsModel>,
    /// Unnamed-address specifier, when written.
    pub unnamed_addr: Option<UnnamedAddr>,
}

/// Global variable declaration or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAst {
    /// Global identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub decorations: SymbolDecorations,
    /// Address space of the global's address.
    pub addr_space: AddrSpace,
    /// `externally_initialized` flag.
    pub externally_initialized: bool,
    /// `constant` (immutable) rather than `global`.
    pub immutable: bool,
    /// Content type.
    pub content_ty: TypeAst,
    /// Initializer; absent for declarations.
    pub init: Option<ConstAst>,
    /// Section name, when written.
    pub section: Option<String>,
    /// Comdat reference, when written.
    pub comdat: Option<ComdatRefAst>,
    /// Explicit alignment, when written.
    pub align: Option<u64>,
    /// Metadata attachments.
    pub metadata: Vec<MetadataAttachmentAst>,
    /// Source span for this form.
    pub span: Option<Span>,
}

impl GlobalAst {
    /// Creates a minimal global with the given name and content type.
    pub fn new(name: GlobalIdent, content_ty: TypeAst) -> Self {
        Self {
            name,
            decorations: SymbolDecorations::default(),
            addr_space: AddrSpace::DEFAULT,
            externally_initialized: false,
            immutable: false,
            content_ty,
            init: None,
            section: None,
            comdat: None,
            align: None,
            metadata: Vec::new(),
            span: None,
        }
    }
}

/// Alias definition (`@name = ... alias <ty>, <aliasee>`).
#[derive(Debug, Clone, PartialEq)]
pub struct AliasAst {
    /// Alias identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub decorations: SymbolDecorations,
    /// Aliased content type.
    pub content_ty: TypeAst,
    /// Aliasee constant.
    pub aliasee: TypedConstAst,
    /// Source span for this form.
    pub span: Option<Span>,
}

/// IFunc definition (`@name = ... ifunc <ty>, <resolver>`).
#[derive(Debug, Clone, PartialEq)]
pub struct IFuncAst {
    /// IFunc identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub decorations: SymbolDecorations,
    /// Resolved content type.
    pub content_ty: TypeAst,
    /// Resolver function constant.
    pub resolver: TypedConstAst,
    /// Source span for this form.
    pub span: Option<Span>,
}

/// Function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamAst {
    /// Parameter type.
    pub ty: TypeAst,
    /// Parameter attributes.
    pub attrs: Vec<AttributeAst>,
    /// Parameter name, when written.
    pub name: Option<LocalIdent>,
}

impl ParamAst {
    /// Creates an unnamed parameter without attributes.
    pub fn new(ty: TypeAst) -> Self {
        Self {
            ty,
            attrs: Vec::new(),
            name: None,
        }
    }

    /// Creates a named parameter without attributes.
    pub fn named(ty: TypeAst, name: impl Into<String>) -> Self {
        Self {
            ty,
            attrs: Vec::new(),
            name: Some(LocalIdent::Name(name.into())),
        }
    }
}

/// Basic block with label, body, and terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockAst {
    /// Block label, when written.
    pub name: Option<LocalIdent>,
    /// Non-terminator instructions in source order.
    pub insts: Vec<InstAst>,
    /// Block terminator.
    pub term: TermAst,
    /// Source span for this block.
    pub span: Option<Span>,
}

impl BlockAst {
    /// Creates an unnamed block.
    pub fn new(insts: Vec<InstAst>, term: TermAst) -> Self {
        Self {
            name: None,
            insts,
            term,
            span: None,
        }
    }

    /// Creates a labelled block.
    pub fn named(name: impl Into<String>, insts: Vec<InstAst>, term: TermAst) -> Self {
        Self {
            name: Some(LocalIdent::Name(name.into())),
            insts,
            term,
            span: None,
        }
    }
}

/// Function declaration or definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncAst {
    /// Function identifier.
    pub name: GlobalIdent,
    /// Symbol decorations.
    pub decorations: SymbolDecorations,
    /// Calling convention, when written.
    pub calling_conv: Option<CallingConv>,
    /// Return attributes.
    pub ret_attrs: Vec<AttributeAst>,
    /// Return type.
    pub ret_ty: TypeAst,
    /// Parameters in declaration order.
    pub params: Vec<ParamAst>,
    /// Variadic signature flag.
    pub variadic: bool,
    /// Function address space.
    pub addr_space: AddrSpace,
    /// Function attributes.
    pub func_attrs: Vec<FuncAttrAst>,
    /// Section name, when written.
    pub section: Option<String>,
    /// Comdat reference, when written.
    pub comdat: Option<ComdatRefAst>,
    /// Garbage collector name, when written.
    pub gc: Option<String>,
    /// Prefix constant, when written.
    pub prefix: Option<TypedConstAst>,
    /// Prologue constant, when written.
    pub prologue: Option<TypedConstAst>,
    /// Personality constant, when written.
    pub personality: Option<TypedConstAst>,
    /// Basic blocks; empty for declarations.
    pub blocks: Vec<BlockAst>,
    /// Metadata attachments.
    pub metadata: Vec<MetadataAttachmentAst>,
    /// Source span for this form.
    pub span: Option<Span>,
}

impl FuncAst {
    /// Creates a minimal function with the given name and signature.
    pub fn new(name: GlobalIdent, ret_ty: TypeAst, params: Vec<ParamAst>) -> Self {
        Self {
            name,
            decorations: SymbolDecorations::default(),
            calling_conv: None,
            ret_attrs: Vec::new(),
            ret_ty,
            params,
            variadic: false,
            addr_space: AddrSpace::DEFAULT,
            func_attrs: Vec::new(),
            section: None,
            comdat: None,
            gc: None,
            prefix: None,
            prologue: None,
            personality: None,
            blocks: Vec::new(),
            metadata: Vec::new(),
            span: None,
        }
    }
}

/// Attribute group definition (`attributes #N = { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct AttrGroupDefAst {
    /// Numeric group ID.
    pub id: u64,
    /// Attributes in the group.
    pub attrs: Vec<AttributeAst>,
    /// Source span for this definition.
    pub span: Option<Span>,
}

/// Module-scope use-list order directive.
#[derive(Debug, Clone, PartialEq)]
pub struct UseListOrderAst {
    /// Ordered constant value.
    pub value: TypedConstAst,
    /// Permutation of use indices.
    pub indexes: Vec<u64>,
    /// Source span for this directive.
    pub span: Option<Span>,
}

/// Basic-block-scope use-list order directive.
#[derive(Debug, Clone, PartialEq)]
pub struct UseListOrderBbAst {
    /// Enclosing function.
    pub func: GlobalIdent,
    /// Ordered basic block.
    pub block: LocalIdent,
    /// Permutation of use indices.
    pub indexes: Vec<u64>,
    /// Source span for this directive.
    pub span: Option<Span>,
}
