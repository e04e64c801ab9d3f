//! Metadata syntax nodes.

use crate::ast::constant::TypedConstAst;
use crate::source::Span;

/// Numbered metadata definition (`!N = [distinct] !{ ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDefAst {
    /// Numeric metadata ID.
    pub id: u64,
    /// `distinct` flag.
    pub distinct: bool,
    /// Tuple operands.
    pub operands: Vec<MdOperandAst>,
    /// Source span for this definition.
    pub span: Option<Span>,
}

/// One metadata tuple operand.
#[derive(Debug, Clone, PartialEq)]
pub enum MdOperandAst {
    /// `null` operand.
    Null,
    /// Reference to a numbered metadata node (`!N`).
    Ref(u64),
    /// Metadata string (`!"..."`).
    String(String),
    /// Constant value operand.
    Value(TypedConstAst),
}

/// Named metadata definition (`!name = !{!0, !1}`).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMetadataDefAst {
    /// Metadata name (without `!` prefix).
    pub name: String,
    /// Referenced numbered nodes in declaration order.
    pub nodes: Vec<u64>,
    /// Source span for this definition.
    pub span: Option<Span>,
}

/// Metadata attachment on a global or function (`!kind !N`).
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataAttachmentAst {
    /// Attachment kind (e.g. `dbg`).
    pub kind: String,
    /// Referenced numbered node.
    pub node: u64,
}
