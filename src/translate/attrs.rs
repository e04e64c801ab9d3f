//! Attribute translation and attribute group bodies.

use crate::ast;
use crate::error::{IdentKind, Result, TranslateError};
use crate::ident;
use crate::ir::{Attr, FuncAttr};
use crate::translate::Generator;

impl<'a> Generator<'a> {
    /// Translates a parameter or return attribute list.
    pub(crate) fn translate_attrs(&mut self, attrs: &[ast::AttributeAst]) -> Result<Vec<Attr>> {
        attrs
            .iter()
            .map(|attr| attr.clone().map_type(&mut |ty| self.translate_type(&ty)))
            .collect()
    }

    /// Translates a function attribute position list, resolving attribute
    /// group references through the scaffold.
    pub(crate) fn translate_func_attrs(
        &mut self,
        attrs: &[ast::FuncAttrAst],
    ) -> Result<Vec<FuncAttr>> {
        attrs
            .iter()
            .map(|attr| match attr {
                ast::FuncAttrAst::Group(id) => {
                    let Some(&group) = self.attr_group_ids.get(id) else {
                        return Err(TranslateError::undefined_ident(
                            self.comp,
                            IdentKind::AttrGroup,
                            ident::attr_group_id(*id),
                        ));
                    };
                    Ok(FuncAttr::Group(group))
                }
                ast::FuncAttrAst::Attr(attr) => Ok(FuncAttr::Attr(
                    attr.clone().map_type(&mut |ty| self.translate_type(&ty))?,
                )),
            })
            .collect()
    }

    /// Translates every attribute group body (phase 4b.2).
    pub(crate) fn translate_attr_group_defs(&mut self) -> Result<()> {
        for index in 0..self.module.attr_groups.len() {
            let id = self.module.attr_groups[index].id;
            let def = self.old.attr_group_defs[&id];
            let attrs = self.translate_attrs(&def.attrs)?;
            self.module.attr_groups[index].attrs = attrs;
        }
        Ok(())
    }
}
