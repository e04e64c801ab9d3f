//! Named metadata and metadata node bodies.
//!
//! Cyclic node graphs need no ordering care: every node identifier was
//! allocated during scaffolding, so operand references resolve through the
//! scaffold table regardless of definition order.

use crate::ast;
use crate::error::{IdentKind, Result, TranslateError};
use crate::ident;
use crate::ir::{MdNodeId, MdOperand, MetadataAttachment};
use crate::translate::Generator;

impl<'a> Generator<'a> {
    /// Translates every named metadata body (phase 4b.3).
    pub(crate) fn translate_named_metadata_defs(&mut self) -> Result<()> {
        for index in 0..self.module.named_metadata.len() {
            let name = self.old.named_md_order[index];
            let def = self.old.named_md_defs[name];
            let nodes = def
                .nodes
                .iter()
                .map(|&id| self.lookup_metadata_node(id))
                .collect::<Result<Vec<_>>>()?;
            self.module.named_metadata[index].nodes = nodes;
        }
        Ok(())
    }

    /// Translates every numbered metadata node body (phase 4b.4).
    pub(crate) fn translate_metadata_defs(&mut self) -> Result<()> {
        for index in 0..self.module.metadata_nodes.len() {
            let id = self.module.metadata_nodes[index].id;
            let def = self.old.metadata_defs[&id];
            let mut operands = Vec::with_capacity(def.operands.len());
            for operand in &def.operands {
                operands.push(match operand {
                    ast::MdOperandAst::Null => MdOperand::Null,
                    ast::MdOperandAst::Ref(node) => MdOperand::Node(self.lookup_metadata_node(*node)?),
                    ast::MdOperandAst::String(s) => MdOperand::String(s.clone()),
                    ast::MdOperandAst::Value(tc) => MdOperand::Value(self.translate_typed_const(tc)?),
                });
            }
            let node = &mut self.module.metadata_nodes[index];
            node.distinct = def.distinct;
            node.operands = operands;
        }
        Ok(())
    }

    /// Translates metadata attachments on a global or function.
    pub(crate) fn translate_metadata_attachments(
        &mut self,
        attachments: &[ast::MetadataAttachmentAst],
    ) -> Result<Vec<MetadataAttachment>> {
        attachments
            .iter()
            .map(|attachment| {
                if attachment.kind.is_empty() {
                    return Err(TranslateError::malformed_metadata(
                        "empty metadata attachment kind",
                    ));
                }
                Ok(MetadataAttachment {
                    kind: attachment.kind.clone(),
                    node: self.lookup_metadata_node(attachment.node)?,
                })
            })
            .collect()
    }

    /// Resolves a numbered metadata reference through the scaffold.
    pub(crate) fn lookup_metadata_node(&self, id: u64) -> Result<MdNodeId> {
        self.metadata_ids.get(&id).copied().ok_or_else(|| {
            TranslateError::undefined_ident(
                self.comp,
                IdentKind::MetadataId,
                ident::metadata_id(id),
            )
        })
    }
}
