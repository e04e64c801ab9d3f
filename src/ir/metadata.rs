//! IR metadata nodes and attachments.

use crate::ir::ids::{ConstId, MdNodeId};

/// Numbered metadata tuple node.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataNode {
    /// Numeric ID as written in the input.
    pub id: u64,
    /// `distinct` flag.
    pub distinct: bool,
    /// Tuple operands.
    pub operands: Vec<MdOperand>,
}

/// One metadata tuple operand.
#[derive(Debug, Clone, PartialEq)]
pub enum MdOperand {
    /// `null` operand.
    Null,
    /// Reference to another node; cycles resolve through the scaffolded
    /// node identifiers.
    Node(MdNodeId),
    /// Metadata string.
    String(String),
    /// Constant value operand.
    Value(ConstId),
}

/// Named metadata definition.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMetadata {
    /// Metadata name (without `!` prefix).
    pub name: String,
    /// Referenced nodes in declaration order.
    pub nodes: Vec<MdNodeId>,
}

/// Metadata attachment on a global or function.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataAttachment {
    /// Attachment kind (e.g. `dbg`).
    pub kind: String,
    /// Attached node.
    pub node: MdNodeId,
}
