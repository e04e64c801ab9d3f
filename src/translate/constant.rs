//! Constant translation.
//!
//! Constants are translated against an expected type resolved from the
//! enclosing syntax; structural mismatches between the expected type and
//! the literal shape are typing errors. References to top-level entities
//! resolve through the scaffold, so forward references need no special
//! handling. `blockaddress` constants are always recorded as pending and
//! resolved by the fix-up pass once every function body exists.

use crate::ast::{ConstAst, ConstExprAst, TypedConstAst};
use crate::attrs::CastOp;
use crate::error::{IdentKind, Result, TranslateError};
use crate::ir::{ConstExpr, ConstId, ConstKind, GlobalRef, TypeId, TypeKind};
use crate::translate::{Generator, PendingBlockAddr};

/// One `getelementptr` index with its type and, when the index is a
/// constant integer, its value (required for struct member selection).
pub(crate) struct GepIndex {
    pub ty: TypeId,
    pub value: Option<i128>,
}

impl<'a> Generator<'a> {
    /// Translates a type-value constant pair.
    pub(crate) fn translate_typed_const(&mut self, tc: &TypedConstAst) -> Result<ConstId> {
        let ty = self.translate_type(&tc.ty)?;
        self.translate_const(ty, &tc.value)
    }

    /// Translates one constant against its expected type.
    pub(crate) fn translate_const(&mut self, ty: TypeId, ast: &ConstAst) -> Result<ConstId> {
        let kind = match ast {
            ConstAst::Int(value) => {
                if !self.module.types.is_int(ty) {
                    return Err(self.const_type_mismatch("integer constant", "iN", ty));
                }
                ConstKind::Int(*value)
            }
            ConstAst::Float(value) => {
                if !self.module.types.is_float(ty) {
                    return Err(self.const_type_mismatch(
                        "floating-point constant",
                        "floating-point type",
                        ty,
                    ));
                }
                ConstKind::Float(*value)
            }
            ConstAst::Null => {
                if !self.module.types.is_pointer(ty) {
                    return Err(self.const_type_mismatch("null constant", "pointer type", ty));
                }
                ConstKind::Null
            }
            ConstAst::NoneToken => {
                if !matches!(self.module.types.kind(ty), TypeKind::Token) {
                    return Err(self.const_type_mismatch("none constant", "token", ty));
                }
                ConstKind::NoneToken
            }
            ConstAst::Struct { packed, fields } => {
                let TypeKind::Struct {
                    packed: ty_packed,
                    fields: field_tys,
                } = self.module.types.kind(ty).clone()
                else {
                    if matches!(self.module.types.kind(ty), TypeKind::Opaque) {
                        return Err(TranslateError::malformed_constant(
                            self.comp,
                            "initializer for opaque struct type",
                        ));
                    }
                    return Err(self.const_type_mismatch("struct constant", "struct type", ty));
                };
                if *packed != ty_packed || fields.len() != field_tys.len() {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!(
                            "struct constant shape does not match {}",
                            self.module.types.display(ty)
                        ),
                    ));
                }
                let mut ids = Vec::with_capacity(fields.len());
                for (field, &field_ty) in fields.iter().zip(&field_tys) {
                    let id = self.translate_typed_const(field)?;
                    let got = self.module.consts.ty(id);
                    if got != field_ty {
                        return Err(self.type_pair_mismatch("struct field", field_ty, got));
                    }
                    ids.push(id);
                }
                ConstKind::Struct(ids)
            }
            ConstAst::Array { elems } => {
                let TypeKind::Array { len, elem } = *self.module.types.kind(ty) else {
                    return Err(self.const_type_mismatch("array constant", "array type", ty));
                };
                if elems.len() as u64 != len {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!("array constant has {} elements, type wants {len}", elems.len()),
                    ));
                }
                let mut ids = Vec::with_capacity(elems.len());
                for e in elems {
                    let id = self.translate_typed_const(e)?;
                    let got = self.module.consts.ty(id);
                    if got != elem {
                        return Err(self.type_pair_mismatch("array element", elem, got));
                    }
                    ids.push(id);
                }
                ConstKind::Array(ids)
            }
            ConstAst::CharArray(bytes) => {
                let TypeKind::Array { len, elem } = *self.module.types.kind(ty) else {
                    return Err(self.const_type_mismatch("character array", "array type", ty));
                };
                if !matches!(self.module.types.kind(elem), TypeKind::Int { bits: 8 }) {
                    return Err(self.const_type_mismatch("character array", "[N x i8]", ty));
                }
                if bytes.len() as u64 != len {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!("character array has {} bytes, type wants {len}", bytes.len()),
                    ));
                }
                ConstKind::CharArray(bytes.clone())
            }
            ConstAst::Vector { elems } => {
                let TypeKind::Vector { len, elem, .. } = *self.module.types.kind(ty) else {
                    return Err(self.const_type_mismatch("vector constant", "vector type", ty));
                };
                if elems.len() as u64 != len {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!("vector constant has {} elements, type wants {len}", elems.len()),
                    ));
                }
                let mut ids = Vec::with_capacity(elems.len());
                for e in elems {
                    let id = self.translate_typed_const(e)?;
                    let got = self.module.consts.ty(id);
                    if got != elem {
                        return Err(self.type_pair_mismatch("vector element", elem, got));
                    }
                    ids.push(id);
                }
                ConstKind::Vector(ids)
            }
            ConstAst::ZeroInitializer => ConstKind::ZeroInitializer,
            ConstAst::Undef => ConstKind::Undef,
            ConstAst::Poison => ConstKind::Poison,
            ConstAst::BlockAddress { func, block } => {
                if !self.module.types.is_pointer(ty) {
                    return Err(self.const_type_mismatch("blockaddress", "pointer type", ty));
                }
                let Some(&target) = self.global_refs.get(func) else {
                    return Err(TranslateError::undefined_ident(
                        self.comp,
                        IdentKind::Global,
                        func.to_string(),
                    ));
                };
                let GlobalRef::Func(fid) = target else {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!("blockaddress of non-function {func}"),
                    ));
                };
                let id = self.module.consts.alloc(
                    ty,
                    ConstKind::BlockAddress {
                        func: fid,
                        block: None,
                    },
                );
                self.pending_block_addrs.push(PendingBlockAddr {
                    const_id: id,
                    func: fid,
                    block: block.clone(),
                });
                return Ok(id);
            }
            ConstAst::Global(ident) => {
                let Some(&target) = self.global_refs.get(ident) else {
                    return Err(TranslateError::undefined_ident(
                        self.comp,
                        IdentKind::Global,
                        ident.to_string(),
                    ));
                };
                let entity_ty = self.global_ref_ty(target);
                if entity_ty != ty {
                    return Err(self.type_pair_mismatch(
                        &format!("reference to {ident}"),
                        ty,
                        entity_ty,
                    ));
                }
                ConstKind::Global(target)
            }
            ConstAst::Expr(expr) => {
                let (id, got) = self.translate_const_expr(expr)?;
                if got != ty {
                    return Err(self.type_pair_mismatch("constant expression", ty, got));
                }
                return Ok(id);
            }
        };
        Ok(self.module.consts.alloc(ty, kind))
    }

    /// Translates one constant expression, returning its identifier and
    /// computed result type.
    fn translate_const_expr(&mut self, expr: &ConstExprAst) -> Result<(ConstId, TypeId)> {
        match expr {
            ConstExprAst::Binary { op, lhs, rhs } => {
                let lhs_id = self.translate_typed_const(lhs)?;
                let rhs_id = self.translate_typed_const(rhs)?;
                let lhs_ty = self.module.consts.ty(lhs_id);
                let rhs_ty = self.module.consts.ty(rhs_id);
                if lhs_ty != rhs_ty {
                    return Err(self.type_pair_mismatch("binary expression operands", lhs_ty, rhs_ty));
                }
                let float = self.module.types.is_float_or_float_vector(lhs_ty);
                if op.is_float() != float {
                    return Err(self.const_type_mismatch(
                        "binary expression",
                        if op.is_float() {
                            "floating-point operands"
                        } else {
                            "integer operands"
                        },
                        lhs_ty,
                    ));
                }
                let id = self.module.consts.alloc(
                    lhs_ty,
                    ConstKind::Expr(ConstExpr::Binary {
                        op: *op,
                        lhs: lhs_id,
                        rhs: rhs_id,
                    }),
                );
                Ok((id, lhs_ty))
            }
            ConstExprAst::ICmp { pred, lhs, rhs } => {
                let lhs_id = self.translate_typed_const(lhs)?;
                let rhs_id = self.translate_typed_const(rhs)?;
                let lhs_ty = self.module.consts.ty(lhs_id);
                let rhs_ty = self.module.consts.ty(rhs_id);
                if lhs_ty != rhs_ty {
                    return Err(self.type_pair_mismatch("icmp expression operands", lhs_ty, rhs_ty));
                }
                if !(self.module.types.is_int_or_int_vector(lhs_ty)
                    || self.module.types.is_pointer_or_pointer_vector(lhs_ty))
                {
                    return Err(self.const_type_mismatch(
                        "icmp expression",
                        "integer or pointer operands",
                        lhs_ty,
                    ));
                }
                let result = self.cmp_result_ty(lhs_ty);
                let id = self.module.consts.alloc(
                    result,
                    ConstKind::Expr(ConstExpr::ICmp {
                        pred: *pred,
                        lhs: lhs_id,
                        rhs: rhs_id,
                    }),
                );
                Ok((id, result))
            }
            ConstExprAst::FCmp { pred, lhs, rhs } => {
                let lhs_id = self.translate_typed_const(lhs)?;
                let rhs_id = self.translate_typed_const(rhs)?;
                let lhs_ty = self.module.consts.ty(lhs_id);
                let rhs_ty = self.module.consts.ty(rhs_id);
                if lhs_ty != rhs_ty {
                    return Err(self.type_pair_mismatch("fcmp expression operands", lhs_ty, rhs_ty));
                }
                if !self.module.types.is_float_or_float_vector(lhs_ty) {
                    return Err(self.const_type_mismatch(
                        "fcmp expression",
                        "floating-point operands",
                        lhs_ty,
                    ));
                }
                let result = self.cmp_result_ty(lhs_ty);
                let id = self.module.consts.alloc(
                    result,
                    ConstKind::Expr(ConstExpr::FCmp {
                        pred: *pred,
                        lhs: lhs_id,
                        rhs: rhs_id,
                    }),
                );
                Ok((id, result))
            }
            ConstExprAst::GetElementPtr {
                inbounds,
                elem_ty,
                base,
                indices,
            } => {
                let elem = self.translate_type(elem_ty)?;
                let base_id = self.translate_typed_const(base)?;
                let base_ty = self.module.consts.ty(base_id);
                let mut index_ids = Vec::with_capacity(indices.len());
                let mut gep_indices = Vec::with_capacity(indices.len());
                for index in indices {
                    let id = self.translate_typed_const(index)?;
                    let value = match &self.module.consts.get(id).kind {
                        ConstKind::Int(v) => Some(*v),
                        _ => None,
                    };
                    gep_indices.push(GepIndex {
                        ty: self.module.consts.ty(id),
                        value,
                    });
                    index_ids.push(id);
                }
                let result = self.gep_result_ty(base_ty, elem, &gep_indices)?;
                let id = self.module.consts.alloc(
                    result,
                    ConstKind::Expr(ConstExpr::GetElementPtr {
                        inbounds: *inbounds,
                        elem_ty: elem,
                        base: base_id,
                        indices: index_ids,
                    }),
                );
                Ok((id, result))
            }
            ConstExprAst::Cast { op, value, to } => {
                let value_id = self.translate_typed_const(value)?;
                let from_ty = self.module.consts.ty(value_id);
                let to_ty = self.translate_type(to)?;
                self.check_cast(*op, from_ty, to_ty)?;
                let id = self.module.consts.alloc(
                    to_ty,
                    ConstKind::Expr(ConstExpr::Cast {
                        op: *op,
                        value: value_id,
                        to: to_ty,
                    }),
                );
                Ok((id, to_ty))
            }
            ConstExprAst::Select {
                cond,
                then_value,
                else_value,
            } => {
                let cond_id = self.translate_typed_const(cond)?;
                let cond_ty = self.module.consts.ty(cond_id);
                if !self.is_bool_or_bool_vector(cond_ty) {
                    return Err(self.const_type_mismatch("select condition", "i1", cond_ty));
                }
                let then_id = self.translate_typed_const(then_value)?;
                let else_id = self.translate_typed_const(else_value)?;
                let then_ty = self.module.consts.ty(then_id);
                let else_ty = self.module.consts.ty(else_id);
                if then_ty != else_ty {
                    return Err(self.type_pair_mismatch("select expression arms", then_ty, else_ty));
                }
                let id = self.module.consts.alloc(
                    then_ty,
                    ConstKind::Expr(ConstExpr::Select {
                        cond: cond_id,
                        then_value: then_id,
                        else_value: else_id,
                    }),
                );
                Ok((id, then_ty))
            }
            ConstExprAst::ExtractElement { vector, index } => {
                let vector_id = self.translate_typed_const(vector)?;
                let vector_ty = self.module.consts.ty(vector_id);
                let TypeKind::Vector { elem, .. } = *self.module.types.kind(vector_ty) else {
                    return Err(self.const_type_mismatch(
                        "extractelement expression",
                        "vector type",
                        vector_ty,
                    ));
                };
                let index_id = self.translate_typed_const(index)?;
                let index_ty = self.module.consts.ty(index_id);
                if !self.module.types.is_int(index_ty) {
                    return Err(self.const_type_mismatch("extractelement index", "iN", index_ty));
                }
                let id = self.module.consts.alloc(
                    elem,
                    ConstKind::Expr(ConstExpr::ExtractElement {
                        vector: vector_id,
                        index: index_id,
                    }),
                );
                Ok((id, elem))
            }
            ConstExprAst::InsertElement {
                vector,
                elem,
                index,
            } => {
                let vector_id = self.translate_typed_const(vector)?;
                let vector_ty = self.module.consts.ty(vector_id);
                let TypeKind::Vector { elem: elem_ty, .. } = *self.module.types.kind(vector_ty)
                else {
                    return Err(self.const_type_mismatch(
                        "insertelement expression",
                        "vector type",
                        vector_ty,
                    ));
                };
                let elem_id = self.translate_typed_const(elem)?;
                let got = self.module.consts.ty(elem_id);
                if got != elem_ty {
                    return Err(self.type_pair_mismatch("insertelement element", elem_ty, got));
                }
                let index_id = self.translate_typed_const(index)?;
                let index_ty = self.module.consts.ty(index_id);
                if !self.module.types.is_int(index_ty) {
                    return Err(self.const_type_mismatch("insertelement index", "iN", index_ty));
                }
                let id = self.module.consts.alloc(
                    vector_ty,
                    ConstKind::Expr(ConstExpr::InsertElement {
                        vector: vector_id,
                        elem: elem_id,
                        index: index_id,
                    }),
                );
                Ok((id, vector_ty))
            }
            ConstExprAst::ShuffleVector { a, b, mask } => {
                let a_id = self.translate_typed_const(a)?;
                let b_id = self.translate_typed_const(b)?;
                let a_ty = self.module.consts.ty(a_id);
                let b_ty = self.module.consts.ty(b_id);
                if a_ty != b_ty {
                    return Err(self.type_pair_mismatch("shufflevector operands", a_ty, b_ty));
                }
                let TypeKind::Vector {
                    scalable, elem, ..
                } = *self.module.types.kind(a_ty)
                else {
                    return Err(self.const_type_mismatch(
                        "shufflevector expression",
                        "vector operands",
                        a_ty,
                    ));
                };
                let mask_id = self.translate_typed_const(mask)?;
                let mask_ty = self.module.consts.ty(mask_id);
                let TypeKind::Vector { len: mask_len, .. } = *self.module.types.kind(mask_ty)
                else {
                    return Err(self.const_type_mismatch(
                        "shufflevector mask",
                        "vector of i32",
                        mask_ty,
                    ));
                };
                let result = self.module.types.intern(TypeKind::Vector {
                    scalable,
                    len: mask_len,
                    elem,
                });
                let id = self.module.consts.alloc(
                    result,
                    ConstKind::Expr(ConstExpr::ShuffleVector {
                        a: a_id,
                        b: b_id,
                        mask: mask_id,
                    }),
                );
                Ok((id, result))
            }
        }
    }

    /// Returns the pointer type of a scaffolded top-level entity.
    pub(crate) fn global_ref_ty(&self, target: GlobalRef) -> TypeId {
        match target {
            GlobalRef::Global(id) => self.module.globals[id.index()].ty,
            GlobalRef::Alias(id) => self.module.aliases[id.index()].ty,
            GlobalRef::IFunc(id) => self.module.ifuncs[id.index()].ty,
            GlobalRef::Func(id) => self.module.funcs[id.index()].ty,
        }
    }

    /// Result type of a comparison: `i1`, or a matching vector of `i1`.
    pub(crate) fn cmp_result_ty(&mut self, operand_ty: TypeId) -> TypeId {
        let i1 = self.module.types.intern(TypeKind::Int { bits: 1 });
        match *self.module.types.kind(operand_ty) {
            TypeKind::Vector { scalable, len, .. } => self.module.types.intern(TypeKind::Vector {
                scalable,
                len,
                elem: i1,
            }),
            _ => i1,
        }
    }

    /// Returns `true` for `i1` and vectors of `i1`.
    pub(crate) fn is_bool_or_bool_vector(&self, ty: TypeId) -> bool {
        match *self.module.types.kind(ty) {
            TypeKind::Int { bits } => bits == 1,
            TypeKind::Vector { elem, .. } => {
                matches!(*self.module.types.kind(elem), TypeKind::Int { bits: 1 })
            }
            _ => false,
        }
    }

    /// Computes the result type of a `getelementptr` over `elem_ty` from a
    /// base pointer (or vector of pointers) and the given indices.
    pub(crate) fn gep_result_ty(
        &mut self,
        base_ty: TypeId,
        elem_ty: TypeId,
        indices: &[GepIndex],
    ) -> Result<TypeId> {
        let mut vector_shape: Option<(bool, u64)> = None;
        let (pointee, addr_space) = match *self.module.types.kind(base_ty) {
            TypeKind::Pointer {
                pointee,
                addr_space,
            } => (pointee, addr_space),
            TypeKind::Vector {
                scalable,
                len,
                elem,
            } => {
                let TypeKind::Pointer {
                    pointee,
                    addr_space,
                } = *self.module.types.kind(elem)
                else {
                    return Err(self.const_type_mismatch(
                        "getelementptr base",
                        "pointer or vector of pointers",
                        base_ty,
                    ));
                };
                vector_shape = Some((scalable, len));
                (pointee, addr_space)
            }
            _ => {
                return Err(self.const_type_mismatch(
                    "getelementptr base",
                    "pointer or vector of pointers",
                    base_ty,
                ));
            }
        };
        if pointee != elem_ty {
            return Err(self.type_pair_mismatch("getelementptr source element", pointee, elem_ty));
        }

        let mut cur = elem_ty;
        for (position, index) in indices.iter().enumerate() {
            match *self.module.types.kind(index.ty) {
                TypeKind::Int { .. } => {}
                TypeKind::Vector {
                    scalable,
                    len,
                    elem,
                } if self.module.types.is_int(elem) => match vector_shape {
                    None => vector_shape = Some((scalable, len)),
                    Some(shape) if shape == (scalable, len) => {}
                    Some(_) => {
                        return Err(TranslateError::malformed_constant(
                            self.comp,
                            "getelementptr vector indices disagree on length",
                        ));
                    }
                },
                _ => {
                    return Err(self.const_type_mismatch(
                        "getelementptr index",
                        "integer or vector of integers",
                        index.ty,
                    ));
                }
            }
            if position == 0 {
                // The first index steps over the base pointer itself.
                continue;
            }
            cur = match *self.module.types.kind(cur) {
                TypeKind::Array { elem, .. } | TypeKind::Vector { elem, .. } => elem,
                TypeKind::Struct { ref fields, .. } => {
                    let Some(value) = index.value else {
                        return Err(TranslateError::malformed_constant(
                            self.comp,
                            "getelementptr struct index is not a constant integer",
                        ));
                    };
                    let Ok(member) = usize::try_from(value) else {
                        return Err(TranslateError::malformed_constant(
                            self.comp,
                            format!("getelementptr struct index {value} is negative"),
                        ));
                    };
                    if member >= fields.len() {
                        return Err(TranslateError::malformed_constant(
                            self.comp,
                            format!(
                                "getelementptr struct index {member} out of range for {}",
                                self.module.types.display(cur)
                            ),
                        ));
                    }
                    fields[member]
                }
                TypeKind::Opaque => {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!(
                            "getelementptr into opaque struct {}",
                            self.module.types.display(cur)
                        ),
                    ));
                }
                _ => {
                    return Err(TranslateError::malformed_constant(
                        self.comp,
                        format!(
                            "getelementptr index into non-aggregate {}",
                            self.module.types.display(cur)
                        ),
                    ));
                }
            };
        }

        let ptr = self.module.types.intern(TypeKind::Pointer {
            pointee: cur,
            addr_space,
        });
        Ok(match vector_shape {
            Some((scalable, len)) => self.module.types.intern(TypeKind::Vector {
                scalable,
                len,
                elem: ptr,
            }),
            None => ptr,
        })
    }

    /// Validates the operand/result categories of a conversion.
    pub(crate) fn check_cast(&self, op: CastOp, from: TypeId, to: TypeId) -> Result<()> {
        use CastOp::*;
        let types = &self.module.types;
        let ok = match op {
            Trunc | ZExt | SExt => {
                types.is_int_or_int_vector(from) && types.is_int_or_int_vector(to)
            }
            FpTrunc | FpExt => {
                types.is_float_or_float_vector(from) && types.is_float_or_float_vector(to)
            }
            FpToUi | FpToSi => {
                types.is_float_or_float_vector(from) && types.is_int_or_int_vector(to)
            }
            UiToFp | SiToFp => {
                types.is_int_or_int_vector(from) && types.is_float_or_float_vector(to)
            }
            PtrToInt => {
                types.is_pointer_or_pointer_vector(from) && types.is_int_or_int_vector(to)
            }
            IntToPtr => {
                types.is_int_or_int_vector(from) && types.is_pointer_or_pointer_vector(to)
            }
            BitCast => true,
            AddrSpaceCast => {
                types.is_pointer_or_pointer_vector(from) && types.is_pointer_or_pointer_vector(to)
            }
        };
        if !ok {
            let got = format!(
                "{} to {}",
                self.module.types.display(from),
                self.module.types.display(to)
            );
            return Err(TranslateError::type_mismatch(
                self.comp,
                format!("{op:?} conversion"),
                "compatible operand categories",
                got,
            ));
        }
        Ok(())
    }

    pub(crate) fn const_type_mismatch(
        &self,
        context: &str,
        expected: &str,
        got: TypeId,
    ) -> TranslateError {
        TranslateError::type_mismatch(
            self.comp,
            context,
            expected,
            self.module.types.display(got).to_string(),
        )
    }

    pub(crate) fn type_pair_mismatch(
        &self,
        context: &str,
        expected: TypeId,
        got: TypeId,
    ) -> TranslateError {
        TranslateError::type_mismatch(
            self.comp,
            context,
            self.module.types.display(expected).to_string(),
            self.module.types.display(got).to_string(),
        )
    }
}
