//! Type resolution: named definitions first, inline syntax on demand.
//!
//! Struct-bodied and opaque definitions get a placeholder allocated up
//! front so recursive references resolve through a stable identifier;
//! their bodies are filled afterwards. Definitions whose body is not a
//! struct act as transparent aliases and resolve recursively.

use crate::ast::TypeAst;
use crate::error::{Component, IdentKind, Result, TranslateError};
use crate::ident;
use crate::ir::{TypeId, TypeKind};
use crate::translate::Generator;

/// Widest supported integer type, matching the assembly grammar bound.
const MAX_INT_BITS: u32 = (1 << 23) - 1;

impl<'a> Generator<'a> {
    /// Resolves every named type definition (phase 2).
    pub(crate) fn resolve_type_defs(&mut self) -> Result<()> {
        // 2a. Placeholders for struct-bodied and opaque definitions. The
        // placeholder identifier is the fixed point recursion resolves to.
        for i in 0..self.old.type_def_order.len() {
            let name = self.old.type_def_order[i];
            let def = self.old.type_defs[name];
            if matches!(def.ty, TypeAst::Struct { .. } | TypeAst::Opaque) {
                let id = self.module.types.declare_named(name);
                self.type_ids.insert(name.to_string(), id);
            }
        }

        // 2b. Resolve alias (non-struct) definitions, then fill struct
        // bodies. Alias bodies may reference struct placeholders and other
        // aliases; struct bodies may reference anything resolved here.
        for i in 0..self.old.type_def_order.len() {
            let name = self.old.type_def_order[i];
            if !self.type_ids.contains_key(name) {
                self.resolve_type_alias(name)?;
            }
        }
        for i in 0..self.old.type_def_order.len() {
            let name = self.old.type_def_order[i];
            let def = self.old.type_defs[name];
            if let TypeAst::Struct { packed, fields } = &def.ty {
                let packed = *packed;
                let fields = fields
                    .iter()
                    .map(|field| self.translate_type(field))
                    .collect::<Result<Vec<_>>>()?;
                let id = self.type_ids[name];
                self.module.types.set_named_body(id, TypeKind::Struct { packed, fields });
            }
        }
        Ok(())
    }

    /// Resolves one non-struct type definition, recursing through alias
    /// chains and failing on alias cycles.
    fn resolve_type_alias(&mut self, name: &str) -> Result<TypeId> {
        if let Some(&id) = self.type_ids.get(name) {
            return Ok(id);
        }
        if !self.resolving.insert(name.to_string()) {
            return Err(TranslateError::malformed_type(format!(
                "type alias {} is part of a definition cycle",
                ident::type_name(name)
            )));
        }
        let def = self.old.type_defs[name];
        let id = self.translate_type(&def.ty);
        self.resolving.remove(name);
        let id = id?;
        self.type_ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Translates one inline type form into a pooled IR type.
    pub(crate) fn translate_type(&mut self, ast: &TypeAst) -> Result<TypeId> {
        let id = match ast {
            TypeAst::Named(name) => {
                if let Some(&id) = self.type_ids.get(name.as_str()) {
                    id
                } else if self.old.type_defs.contains_key(name.as_str()) {
                    self.resolve_type_alias(name)?
                } else {
                    return Err(TranslateError::undefined_ident(
                        Component::Types,
                        IdentKind::Type,
                        ident::type_name(name),
                    ));
                }
            }
            TypeAst::Void => self.module.types.intern(TypeKind::Void),
            TypeAst::Label => self.module.types.intern(TypeKind::Label),
            TypeAst::Token => self.module.types.intern(TypeKind::Token),
            TypeAst::Metadata => self.module.types.intern(TypeKind::Metadata),
            TypeAst::Opaque => {
                return Err(TranslateError::malformed_type(
                    "opaque is only valid as the body of a named type definition",
                ));
            }
            TypeAst::Int { bits } => {
                if *bits == 0 || *bits > MAX_INT_BITS {
                    return Err(TranslateError::malformed_type(format!(
                        "invalid integer width i{bits}"
                    )));
                }
                self.module.types.intern(TypeKind::Int { bits: *bits })
            }
            TypeAst::Float(kind) => self.module.types.intern(TypeKind::Float(*kind)),
            TypeAst::Pointer { pointee, addr_space } => {
                let pointee_id = self.translate_type(pointee)?;
                if self.module.types.is_void(pointee_id) {
                    return Err(TranslateError::malformed_type("pointer to void"));
                }
                self.module.types.intern(TypeKind::Pointer {
                    pointee: pointee_id,
                    addr_space: *addr_space,
                })
            }
            TypeAst::Vector {
                scalable,
                len,
                elem,
            } => {
                if *len == 0 {
                    return Err(TranslateError::malformed_type("zero-length vector"));
                }
                let elem_id = self.translate_type(elem)?;
                if !(self.module.types.is_int(elem_id)
                    || self.module.types.is_float(elem_id)
                    || self.module.types.is_pointer(elem_id))
                {
                    return Err(TranslateError::malformed_type(format!(
                        "invalid vector element type {}",
                        self.module.types.display(elem_id)
                    )));
                }
                self.module.types.intern(TypeKind::Vector {
                    scalable: *scalable,
                    len: *len,
                    elem: elem_id,
                })
            }
            TypeAst::Array { len, elem } => {
                let elem_id = self.translate_type(elem)?;
                if self.module.types.is_void(elem_id) {
                    return Err(TranslateError::malformed_type("array of void"));
                }
                self.module.types.intern(TypeKind::Array {
                    len: *len,
                    elem: elem_id,
                })
            }
            TypeAst::Struct { packed, fields } => {
                let fields = fields
                    .iter()
                    .map(|field| self.translate_type(field))
                    .collect::<Result<Vec<_>>>()?;
                self.module.types.intern(TypeKind::Struct {
                    packed: *packed,
                    fields,
                })
            }
            TypeAst::Func {
                ret,
                params,
                variadic,
            } => {
                let ret_id = self.translate_type(ret)?;
                let params = params
                    .iter()
                    .map(|param| {
                        let id = self.translate_type(param)?;
                        if self.module.types.is_void(id) {
                            return Err(TranslateError::malformed_type("void parameter type"));
                        }
                        Ok(id)
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.module.types.intern(TypeKind::Func {
                    ret: ret_id,
                    params,
                    variadic: *variadic,
                })
            }
        };
        if self.module.types.len() > self.opts.max_types {
            return Err(TranslateError::limit_exceeded(
                Component::Types,
                format!("module exceeds {} types", self.opts.max_types),
            ));
        }
        Ok(id)
    }
}
