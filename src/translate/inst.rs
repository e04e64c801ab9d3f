//! Instruction and terminator translation.
//!
//! Every opcode has a fixed operand shape, a typing rule deriving the
//! result type from the written operand types, and optional flag bags.
//! Result types are computed twice: once during local indexing (so that
//! forward references to later results carry the right type) and again
//! here, structurally identical by construction.

use crate::ast;
use crate::attrs::BinOp;
use crate::error::{Component, IdentKind, Result, TranslateError};
use crate::ident::LocalIdent;
use crate::ir::inst as ir_inst;
use crate::ir::{
    AddrSpace, ConstKind, Inst, LocalId, Term, TypeId, TypeKind, TypedValue, UnwindTarget, Value,
};
use crate::translate::constant::GepIndex;
use crate::translate::func::FuncCx;
use crate::translate::Generator;

impl<'a> Generator<'a> {
    // -----------------------------------------------------------------
    // Result typing (pass A)
    // -----------------------------------------------------------------

    /// Computes the result type of one instruction from its written
    /// operand types; `None` for void operations.
    pub(crate) fn ast_inst_result_ty(&mut self, inst: &ast::InstAst) -> Result<Option<TypeId>> {
        use ast::InstAst::*;
        let ty = match inst {
            FNeg { operand, .. } => self.translate_type(&operand.ty)?,
            Binary { lhs, .. } => self.translate_type(&lhs.ty)?,
            ExtractElement { vector, .. } => {
                let vector_ty = self.translate_type(&vector.ty)?;
                self.vector_elem_ty(vector_ty, "extractelement vector operand")?
            }
            InsertElement { vector, .. } => self.translate_type(&vector.ty)?,
            ShuffleVector { a, mask, .. } => {
                let a_ty = self.translate_type(&a.ty)?;
                let mask_ty = self.translate_type(&mask.ty)?;
                let TypeKind::Vector { scalable, elem, .. } = *self.module.types.kind(a_ty) else {
                    return Err(self.const_type_mismatch(
                        "shufflevector operand",
                        "vector type",
                        a_ty,
                    ));
                };
                let TypeKind::Vector { len, .. } = *self.module.types.kind(mask_ty) else {
                    return Err(self.const_type_mismatch(
                        "shufflevector mask",
                        "vector of i32",
                        mask_ty,
                    ));
                };
                self.module.types.intern(TypeKind::Vector {
                    scalable,
                    len,
                    elem,
                })
            }
            ExtractValue { agg, indices, .. } => {
                let agg_ty = self.translate_type(&agg.ty)?;
                self.aggregate_member_ty(agg_ty, indices)?
            }
            InsertValue { agg, .. } => self.translate_type(&agg.ty)?,
            Alloca {
                elem_ty,
                addr_space,
                ..
            } => {
                let elem = self.translate_type(elem_ty)?;
                self.module.types.intern(TypeKind::Pointer {
                    pointee: elem,
                    addr_space: addr_space.unwrap_or_default(),
                })
            }
            Load { ty, .. } => self.translate_type(ty)?,
            Store { .. } | Fence { .. } => return Ok(None),
            CmpXchg { cmp, .. } => {
                let cmp_ty = self.translate_type(&cmp.ty)?;
                let i1 = self.module.types.intern(TypeKind::Int { bits: 1 });
                self.module.types.intern(TypeKind::Struct {
                    packed: false,
                    fields: vec![cmp_ty, i1],
                })
            }
            AtomicRmw { value, .. } => self.translate_type(&value.ty)?,
            Gep {
                elem_ty,
                base,
                indices,
                ..
            } => {
                let elem = self.translate_type(elem_ty)?;
                let base_ty = self.translate_type(&base.ty)?;
                let gep_indices = self.ast_gep_indices(indices)?;
                self.gep_result_ty(base_ty, elem, &gep_indices)?
            }
            Cast { to, .. } => self.translate_type(to)?,
            ICmp { lhs, .. } | FCmp { lhs, .. } => {
                let lhs_ty = self.translate_type(&lhs.ty)?;
                self.cmp_result_ty(lhs_ty)
            }
            Phi { ty, .. } => self.translate_type(ty)?,
            Select { then_value, .. } => self.translate_type(&then_value.ty)?,
            Freeze { value, .. } => self.translate_type(&value.ty)?,
            Call { body, .. } => {
                let (_, ret) = self.callee_sig(body)?;
                if self.module.types.is_void(ret) {
                    return Ok(None);
                }
                ret
            }
            VaArg { ty, .. } => self.translate_type(ty)?,
            LandingPad { ty, .. } => self.translate_type(ty)?,
            CatchPad { .. } | CleanupPad { .. } => self.module.types.intern(TypeKind::Token),
        };
        Ok(Some(ty))
    }

    /// Computes the result type of one terminator; `None` for the
    /// non-value-producing ones and for void invokes.
    pub(crate) fn ast_term_result_ty(&mut self, term: &ast::TermAst) -> Result<Option<TypeId>> {
        match term {
            ast::TermAst::Invoke { body, .. } | ast::TermAst::CallBr { body, .. } => {
                let (_, ret) = self.callee_sig(body)?;
                if self.module.types.is_void(ret) {
                    Ok(None)
                } else {
                    Ok(Some(ret))
                }
            }
            ast::TermAst::CatchSwitch { .. } => {
                Ok(Some(self.module.types.intern(TypeKind::Token)))
            }
            _ => Ok(None),
        }
    }

    // -----------------------------------------------------------------
    // Operand resolution (pass B)
    // -----------------------------------------------------------------

    /// Resolves a value against the local table first, then the constant
    /// and scaffold tables, checking it carries the expected type.
    pub(crate) fn resolve_value(
        &mut self,
        fcx: &FuncCx,
        expected: TypeId,
        value: &ast::ValueAst,
        context: &str,
    ) -> Result<Value> {
        match value {
            ast::ValueAst::Local(ident) => {
                let Some(&slot) = fcx.value_ids.get(ident) else {
                    return Err(TranslateError::undefined_ident(
                        Component::Bodies,
                        IdentKind::Local,
                        ident.to_string(),
                    ));
                };
                let got = fcx.value_ty(slot);
                if got != expected {
                    return Err(self.type_pair_mismatch(context, expected, got));
                }
                Ok(Value::Local(slot))
            }
            ast::ValueAst::Const(c) => Ok(Value::Const(self.translate_const(expected, c)?)),
        }
    }

    /// Resolves a type-value operand pair.
    pub(crate) fn resolve_typed_value(
        &mut self,
        fcx: &FuncCx,
        tv: &ast::TypedValueAst,
        context: &str,
    ) -> Result<TypedValue> {
        let ty = self.translate_type(&tv.ty)?;
        let value = self.resolve_value(fcx, ty, &tv.value, context)?;
        Ok(TypedValue::new(ty, value))
    }

    /// Resolves a block label.
    pub(crate) fn resolve_block(
        &self,
        fcx: &FuncCx,
        ident: &LocalIdent,
    ) -> Result<crate::ir::BlockId> {
        fcx.block_ids.get(ident).copied().ok_or_else(|| {
            TranslateError::undefined_ident(Component::Bodies, IdentKind::Block, ident.to_string())
        })
    }

    fn ast_gep_indices(&mut self, indices: &[ast::TypedValueAst]) -> Result<Vec<GepIndex>> {
        indices
            .iter()
            .map(|index| {
                let ty = self.translate_type(&index.ty)?;
                let value = match &index.value {
                    ast::ValueAst::Const(ast::ConstAst::Int(v)) => Some(*v),
                    _ => None,
                };
                Ok(GepIndex { ty, value })
            })
            .collect()
    }

    /// Resolves the callee function type and return type of a call-like
    /// payload: the written type is either the full function type or just
    /// the return type, in which case the signature is derived from the
    /// argument list.
    pub(crate) fn callee_sig(&mut self, body: &ast::CallBodyAst) -> Result<(TypeId, TypeId)> {
        let ty = self.translate_type(&body.ty)?;
        if let TypeKind::Func { ret, .. } = *self.module.types.kind(ty) {
            return Ok((ty, ret));
        }
        let params = body
            .args
            .iter()
            .map(|arg| self.translate_type(&arg.ty))
            .collect::<Result<Vec<_>>>()?;
        let sig = self.module.types.intern(TypeKind::Func {
            ret: ty,
            params,
            variadic: false,
        });
        Ok((sig, ty))
    }

    /// Translates the shared payload of `call`, `invoke`, and `callbr`.
    fn translate_call_body(
        &mut self,
        fcx: &FuncCx,
        body: &ast::CallBodyAst,
    ) -> Result<ir_inst::CallBody> {
        let (sig, _) = self.callee_sig(body)?;
        let addr_space = body.addr_space.unwrap_or(AddrSpace::DEFAULT);
        let callee_ty = self.module.types.intern(TypeKind::Pointer {
            pointee: sig,
            addr_space,
        });
        let callee = self.resolve_value(fcx, callee_ty, &body.callee, "callee")?;

        let TypeKind::Func {
            params, variadic, ..
        } = self.module.types.kind(sig).clone()
        else {
            unreachable!("callee signature is not a function type");
        };
        if body.args.len() < params.len() || (!variadic && body.args.len() != params.len()) {
            return Err(TranslateError::syntax(
                Component::Bodies,
                format!(
                    "call arity mismatch: signature wants {} arguments, got {}",
                    params.len(),
                    body.args.len()
                ),
            ));
        }
        let mut args = Vec::with_capacity(body.args.len());
        for (i, arg) in body.args.iter().enumerate() {
            let value = self.resolve_typed_value(fcx, &ast::TypedValueAst::new(arg.ty.clone(), arg.value.clone()), "call argument")?;
            if let Some(&param_ty) = params.get(i) {
                if value.ty != param_ty {
                    return Err(self.type_pair_mismatch("call argument", param_ty, value.ty));
                }
            }
            let attrs = self.translate_attrs(&arg.attrs)?;
            args.push(ir_inst::Arg { value, attrs });
        }
        let ret_attrs = self.translate_attrs(&body.ret_attrs)?;
        let func_attrs = self.translate_func_attrs(&body.func_attrs)?;
        let mut bundles = Vec::with_capacity(body.bundles.len());
        for bundle in &body.bundles {
            let mut bundle_args = Vec::with_capacity(bundle.args.len());
            for arg in &bundle.args {
                bundle_args.push(self.resolve_typed_value(fcx, arg, "operand bundle argument")?);
            }
            bundles.push(ir_inst::Bundle {
                tag: bundle.tag.clone(),
                args: bundle_args,
            });
        }
        Ok(ir_inst::CallBody {
            calling_conv: body.calling_conv.unwrap_or_default(),
            ret_attrs,
            addr_space,
            callee_ty: sig,
            callee,
            args,
            func_attrs,
            bundles,
        })
    }

    // -----------------------------------------------------------------
    // Instruction translation (pass B)
    // -----------------------------------------------------------------

    /// Translates one instruction; `slot` is the result slot allocated
    /// during local indexing.
    pub(crate) fn translate_inst(
        &mut self,
        fcx: &FuncCx,
        inst: &ast::InstAst,
        slot: Option<LocalId>,
    ) -> Result<Inst> {
        use ast::InstAst as A;
        match inst {
            A::FNeg { fmf, operand, .. } => {
                let operand = self.resolve_typed_value(fcx, operand, "fneg operand")?;
                if !self.module.types.is_float_or_float_vector(operand.ty) {
                    return Err(self.const_type_mismatch(
                        "fneg operand",
                        "floating-point type",
                        operand.ty,
                    ));
                }
                Ok(Inst::FNeg(ir_inst::UnaryInst {
                    result: expect_slot(slot),
                    fmf: *fmf,
                    operand,
                }))
            }
            A::Binary {
                op,
                overflow,
                exact,
                fmf,
                lhs,
                rhs,
                ..
            } => self.translate_binary(fcx, *op, *overflow, *exact, *fmf, lhs, rhs, slot),
            A::ExtractElement { vector, index, .. } => {
                let vector = self.resolve_typed_value(fcx, vector, "extractelement vector")?;
                self.vector_elem_ty(vector.ty, "extractelement vector operand")?;
                let index = self.resolve_typed_value(fcx, index, "extractelement index")?;
                if !self.module.types.is_int(index.ty) {
                    return Err(self.const_type_mismatch("extractelement index", "iN", index.ty));
                }
                Ok(Inst::ExtractElement {
                    result: expect_slot(slot),
                    vector,
                    index,
                })
            }
            A::InsertElement {
                vector,
                elem,
                index,
                ..
            } => {
                let vector = self.resolve_typed_value(fcx, vector, "insertelement vector")?;
                let elem_ty = self.vector_elem_ty(vector.ty, "insertelement vector operand")?;
                let elem = self.resolve_typed_value(fcx, elem, "insertelement element")?;
                if elem.ty != elem_ty {
                    return Err(self.type_pair_mismatch("insertelement element", elem_ty, elem.ty));
                }
                let index = self.resolve_typed_value(fcx, index, "insertelement index")?;
                if !self.module.types.is_int(index.ty) {
                    return Err(self.const_type_mismatch("insertelement index", "iN", index.ty));
                }
                Ok(Inst::InsertElement {
                    result: expect_slot(slot),
                    vector,
                    elem,
                    index,
                })
            }
            A::ShuffleVector { a, b, mask, .. } => {
                let a = self.resolve_typed_value(fcx, a, "shufflevector operand")?;
                let b = self.resolve_typed_value(fcx, b, "shufflevector operand")?;
                if a.ty != b.ty {
                    return Err(self.type_pair_mismatch("shufflevector operands", a.ty, b.ty));
                }
                let mask = self.resolve_typed_value(fcx, mask, "shufflevector mask")?;
                self.vector_elem_ty(mask.ty, "shufflevector mask")?;
                Ok(Inst::ShuffleVector {
                    result: expect_slot(slot),
                    a,
                    b,
                    mask,
                })
            }
            A::ExtractValue { agg, indices, .. } => {
                let agg = self.resolve_typed_value(fcx, agg, "extractvalue aggregate")?;
                self.aggregate_member_ty(agg.ty, indices)?;
                Ok(Inst::ExtractValue {
                    result: expect_slot(slot),
                    agg,
                    indices: indices.clone(),
                })
            }
            A::InsertValue {
                agg,
                elem,
                indices,
                ..
            } => {
                let agg = self.resolve_typed_value(fcx, agg, "insertvalue aggregate")?;
                let member_ty = self.aggregate_member_ty(agg.ty, indices)?;
                let elem = self.resolve_typed_value(fcx, elem, "insertvalue element")?;
                if elem.ty != member_ty {
                    return Err(self.type_pair_mismatch("insertvalue element", member_ty, elem.ty));
                }
                Ok(Inst::InsertValue {
                    result: expect_slot(slot),
                    agg,
                    elem,
                    indices: indices.clone(),
                })
            }
            A::Alloca {
                inalloca,
                swifterror,
                elem_ty,
                num_elems,
                align,
                addr_space,
                ..
            } => {
                let elem = self.translate_type(elem_ty)?;
                let num_elems = match num_elems {
                    Some(tv) => {
                        let tv = self.resolve_typed_value(fcx, tv, "alloca element count")?;
                        if !self.module.types.is_int(tv.ty) {
                            return Err(self.const_type_mismatch(
                                "alloca element count",
                                "iN",
                                tv.ty,
                            ));
                        }
                        Some(tv)
                    }
                    None => None,
                };
                Ok(Inst::Alloca {
                    result: expect_slot(slot),
                    inalloca: *inalloca,
                    swifterror: *swifterror,
                    elem_ty: elem,
                    num_elems,
                    align: *align,
                    addr_space: addr_space.unwrap_or_default(),
                })
            }
            A::Load {
                atomic,
                volatile,
                ty,
                ptr,
                ordering,
                scope,
                align,
                ..
            } => {
                let loaded = self.translate_type(ty)?;
                let ptr = self.resolve_typed_value(fcx, ptr, "load source")?;
                let Some(pointee) = self.module.types.pointee(ptr.ty) else {
                    return Err(self.const_type_mismatch("load source", "pointer type", ptr.ty));
                };
                if pointee != loaded {
                    return Err(self.type_pair_mismatch("load source", loaded, pointee));
                }
                self.check_atomic_flags(*atomic, ordering)?;
                Ok(Inst::Load {
                    result: expect_slot(slot),
                    volatile: *volatile,
                    ptr,
                    ordering: *ordering,
                    scope: scope.clone(),
                    align: *align,
                })
            }
            A::Store {
                atomic,
                volatile,
                value,
                ptr,
                ordering,
                scope,
                align,
            } => {
                let value = self.resolve_typed_value(fcx, value, "store value")?;
                let ptr = self.resolve_typed_value(fcx, ptr, "store destination")?;
                let Some(pointee) = self.module.types.pointee(ptr.ty) else {
                    return Err(self.const_type_mismatch(
                        "store destination",
                        "pointer type",
                        ptr.ty,
                    ));
                };
                if pointee != value.ty {
                    return Err(self.type_pair_mismatch("store destination", value.ty, pointee));
                }
                self.check_atomic_flags(*atomic, ordering)?;
                Ok(Inst::Store {
                    volatile: *volatile,
                    value,
                    ptr,
                    ordering: *ordering,
                    scope: scope.clone(),
                    align: *align,
                })
            }
            A::Fence { ordering, scope } => Ok(Inst::Fence {
                ordering: *ordering,
                scope: scope.clone(),
            }),
            A::CmpXchg {
                weak,
                volatile,
                ptr,
                cmp,
                new,
                success_ordering,
                failure_ordering,
                scope,
                ..
            } => {
                let ptr = self.resolve_typed_value(fcx, ptr, "cmpxchg pointer")?;
                let Some(pointee) = self.module.types.pointee(ptr.ty) else {
                    return Err(self.const_type_mismatch("cmpxchg pointer", "pointer type", ptr.ty));
                };
                let cmp = self.resolve_typed_value(fcx, cmp, "cmpxchg comparison")?;
                let new = self.resolve_typed_value(fcx, new, "cmpxchg replacement")?;
                if cmp.ty != pointee {
                    return Err(self.type_pair_mismatch("cmpxchg comparison", pointee, cmp.ty));
                }
                if new.ty != pointee {
                    return Err(self.type_pair_mismatch("cmpxchg replacement", pointee, new.ty));
                }
                Ok(Inst::CmpXchg {
                    result: expect_slot(slot),
                    weak: *weak,
                    volatile: *volatile,
                    ptr,
                    cmp,
                    new,
                    success_ordering: *success_ordering,
                    failure_ordering: *failure_ordering,
                    scope: scope.clone(),
                })
            }
            A::AtomicRmw {
                volatile,
                op,
                ptr,
                value,
                ordering,
                scope,
                ..
            } => {
                let ptr = self.resolve_typed_value(fcx, ptr, "atomicrmw pointer")?;
                let Some(pointee) = self.module.types.pointee(ptr.ty) else {
                    return Err(self.const_type_mismatch(
                        "atomicrmw pointer",
                        "pointer type",
                        ptr.ty,
                    ));
                };
                let value = self.resolve_typed_value(fcx, value, "atomicrmw operand")?;
                if value.ty != pointee {
                    return Err(self.type_pair_mismatch("atomicrmw operand", pointee, value.ty));
                }
                Ok(Inst::AtomicRmw {
                    result: expect_slot(slot),
                    volatile: *volatile,
                    op: *op,
                    ptr,
                    value,
                    ordering: *ordering,
                    scope: scope.clone(),
                })
            }
            A::Gep {
                inbounds,
                elem_ty,
                base,
                indices,
                ..
            } => {
                let elem = self.translate_type(elem_ty)?;
                let base = self.resolve_typed_value(fcx, base, "getelementptr base")?;
                let mut resolved = Vec::with_capacity(indices.len());
                for index in indices {
                    resolved.push(self.resolve_typed_value(fcx, index, "getelementptr index")?);
                }
                Ok(Inst::GetElementPtr(ir_inst::GepInst {
                    result: expect_slot(slot),
                    inbounds: *inbounds,
                    elem_ty: elem,
                    base,
                    indices: resolved,
                }))
            }
            A::Cast { op, value, to, .. } => {
                let value = self.resolve_typed_value(fcx, value, "conversion operand")?;
                let to = self.translate_type(to)?;
                self.check_cast(*op, value.ty, to)?;
                let cast = ir_inst::CastInst {
                    result: expect_slot(slot),
                    value,
                    to,
                };
                use crate::attrs::CastOp::*;
                Ok(match op {
                    Trunc => Inst::Trunc(cast),
                    ZExt => Inst::ZExt(cast),
                    SExt => Inst::SExt(cast),
                    FpTrunc => Inst::FpTrunc(cast),
                    FpExt => Inst::FpExt(cast),
                    FpToUi => Inst::FpToUi(cast),
                    FpToSi => Inst::FpToSi(cast),
                    UiToFp => Inst::UiToFp(cast),
                    SiToFp => Inst::SiToFp(cast),
                    PtrToInt => Inst::PtrToInt(cast),
                    IntToPtr => Inst::IntToPtr(cast),
                    BitCast => Inst::BitCast(cast),
                    AddrSpaceCast => Inst::AddrSpaceCast(cast),
                })
            }
            A::ICmp { pred, lhs, rhs, .. } => {
                let lhs = self.resolve_typed_value(fcx, lhs, "icmp operand")?;
                if !(self.module.types.is_int_or_int_vector(lhs.ty)
                    || self.module.types.is_pointer_or_pointer_vector(lhs.ty))
                {
                    return Err(self.const_type_mismatch(
                        "icmp operand",
                        "integer or pointer type",
                        lhs.ty,
                    ));
                }
                let rhs_value = self.resolve_value(fcx, lhs.ty, rhs, "icmp operand")?;
                Ok(Inst::ICmp {
                    result: expect_slot(slot),
                    pred: *pred,
                    lhs,
                    rhs: TypedValue::new(lhs.ty, rhs_value),
                })
            }
            A::FCmp {
                fmf,
                pred,
                lhs,
                rhs,
                ..
            } => {
                let lhs = self.resolve_typed_value(fcx, lhs, "fcmp operand")?;
                if !self.module.types.is_float_or_float_vector(lhs.ty) {
                    return Err(self.const_type_mismatch(
                        "fcmp operand",
                        "floating-point type",
                        lhs.ty,
                    ));
                }
                let rhs_value = self.resolve_value(fcx, lhs.ty, rhs, "fcmp operand")?;
                Ok(Inst::FCmp {
                    result: expect_slot(slot),
                    fmf: *fmf,
                    pred: *pred,
                    lhs,
                    rhs: TypedValue::new(lhs.ty, rhs_value),
                })
            }
            A::Phi {
                fmf, ty, incoming, ..
            } => {
                if incoming.is_empty() {
                    return Err(TranslateError::syntax(
                        Component::Bodies,
                        "phi with no incoming values",
                    ));
                }
                let ty = self.translate_type(ty)?;
                let mut resolved = Vec::with_capacity(incoming.len());
                for (value, pred) in incoming {
                    let value = self.resolve_value(fcx, ty, value, "phi incoming value")?;
                    let block = self.resolve_block(fcx, pred)?;
                    resolved.push((value, block));
                }
                Ok(Inst::Phi(ir_inst::PhiInst {
                    result: expect_slot(slot),
                    fmf: *fmf,
                    ty,
                    incoming: resolved,
                }))
            }
            A::Select {
                fmf,
                cond,
                then_value,
                else_value,
                ..
            } => {
                let cond = self.resolve_typed_value(fcx, cond, "select condition")?;
                if !self.is_bool_or_bool_vector(cond.ty) {
                    return Err(self.const_type_mismatch("select condition", "i1", cond.ty));
                }
                let then_value = self.resolve_typed_value(fcx, then_value, "select arm")?;
                let else_value = self.resolve_typed_value(fcx, else_value, "select arm")?;
                if then_value.ty != else_value.ty {
                    return Err(self.type_pair_mismatch("select arms", then_value.ty, else_value.ty));
                }
                Ok(Inst::Select {
                    result: expect_slot(slot),
                    fmf: *fmf,
                    cond,
                    then_value,
                    else_value,
                })
            }
            A::Freeze { value, .. } => {
                let value = self.resolve_typed_value(fcx, value, "freeze operand")?;
                Ok(Inst::Freeze {
                    result: expect_slot(slot),
                    value,
                })
            }
            A::Call {
                tail, fmf, body, ..
            } => {
                let call_body = self.translate_call_body(fcx, body)?;
                Ok(Inst::Call(ir_inst::CallInst {
                    result: slot,
                    tail: *tail,
                    fmf: *fmf,
                    body: call_body,
                }))
            }
            A::VaArg { list, ty, .. } => {
                let list = self.resolve_typed_value(fcx, list, "va_arg list")?;
                if !self.module.types.is_pointer(list.ty) {
                    return Err(self.const_type_mismatch("va_arg list", "pointer type", list.ty));
                }
                let ty = self.translate_type(ty)?;
                Ok(Inst::VaArg {
                    result: expect_slot(slot),
                    list,
                    ty,
                })
            }
            A::LandingPad {
                ty,
                cleanup,
                clauses,
                ..
            } => {
                let ty = self.translate_type(ty)?;
                let mut resolved = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    resolved.push(match clause {
                        ast::ClauseAst::Catch(tc) => {
                            ir_inst::Clause::Catch(self.translate_typed_const(tc)?)
                        }
                        ast::ClauseAst::Filter(tc) => {
                            ir_inst::Clause::Filter(self.translate_typed_const(tc)?)
                        }
                    });
                }
                if !*cleanup && resolved.is_empty() {
                    return Err(TranslateError::syntax(
                        Component::Bodies,
                        "landingpad needs a cleanup flag or at least one clause",
                    ));
                }
                Ok(Inst::LandingPad(ir_inst::LandingPadInst {
                    result: expect_slot(slot),
                    ty,
                    cleanup: *cleanup,
                    clauses: resolved,
                }))
            }
            A::CatchPad { within, args, .. } => {
                let token = self.module.types.intern(TypeKind::Token);
                let within =
                    self.resolve_value(fcx, token, &ast::ValueAst::Local(within.clone()), "catchpad parent")?;
                let mut resolved = Vec::with_capacity(args.len());
                for arg in args {
                    resolved.push(self.resolve_typed_value(fcx, arg, "catchpad argument")?);
                }
                Ok(Inst::CatchPad {
                    result: expect_slot(slot),
                    within,
                    args: resolved,
                })
            }
            A::CleanupPad { within, args, .. } => {
                let within = self.resolve_pad_parent(fcx, within)?;
                let mut resolved = Vec::with_capacity(args.len());
                for arg in args {
                    resolved.push(self.resolve_typed_value(fcx, arg, "cleanuppad argument")?);
                }
                Ok(Inst::CleanupPad {
                    result: expect_slot(slot),
                    within,
                    args: resolved,
                })
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn translate_binary(
        &mut self,
        fcx: &FuncCx,
        op: BinOp,
        overflow: crate::attrs::OverflowFlags,
        exact: bool,
        fmf: crate::attrs::FastMathFlags,
        lhs: &ast::TypedValueAst,
        rhs: &ast::ValueAst,
        slot: Option<LocalId>,
    ) -> Result<Inst> {
        let lhs = self.resolve_typed_value(fcx, lhs, "binary operand")?;
        let float = self.module.types.is_float_or_float_vector(lhs.ty);
        if op.is_float() != float {
            return Err(self.const_type_mismatch(
                "binary operand",
                if op.is_float() {
                    "floating-point type"
                } else {
                    "integer type"
                },
                lhs.ty,
            ));
        }
        if !float && !self.module.types.is_int_or_int_vector(lhs.ty) {
            return Err(self.const_type_mismatch("binary operand", "integer type", lhs.ty));
        }
        let rhs_value = self.resolve_value(fcx, lhs.ty, rhs, "binary operand")?;
        let rhs = TypedValue::new(lhs.ty, rhs_value);
        let result = expect_slot(slot);

        let wants_overflow = matches!(op, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Shl);
        if (overflow.nuw || overflow.nsw) && !wants_overflow {
            return Err(TranslateError::syntax(
                Component::Bodies,
                format!("nuw/nsw flags are not valid on {op:?}"),
            ));
        }
        let wants_exact = matches!(op, BinOp::UDiv | BinOp::SDiv | BinOp::LShr | BinOp::AShr);
        if exact && !wants_exact {
            return Err(TranslateError::syntax(
                Component::Bodies,
                format!("exact flag is not valid on {op:?}"),
            ));
        }
        if !fmf.is_empty() && !op.is_float() {
            return Err(TranslateError::syntax(
                Component::Bodies,
                format!("fast-math flags are not valid on {op:?}"),
            ));
        }

        let arith = |result, lhs, rhs| ir_inst::ArithInst {
            result,
            overflow,
            lhs,
            rhs,
        };
        let exact_inst = |result, lhs, rhs| ir_inst::ExactInst {
            result,
            exact,
            lhs,
            rhs,
        };
        let plain = |result, lhs, rhs| ir_inst::BinInst { result, lhs, rhs };
        let float_inst = |result, lhs, rhs| ir_inst::FloatInst {
            result,
            fmf,
            lhs,
            rhs,
        };
        Ok(match op {
            BinOp::Add => Inst::Add(arith(result, lhs, rhs)),
            BinOp::Sub => Inst::Sub(arith(result, lhs, rhs)),
            BinOp::Mul => Inst::Mul(arith(result, lhs, rhs)),
            BinOp::Shl => Inst::Shl(arith(result, lhs, rhs)),
            BinOp::UDiv => Inst::UDiv(exact_inst(result, lhs, rhs)),
            BinOp::SDiv => Inst::SDiv(exact_inst(result, lhs, rhs)),
            BinOp::LShr => Inst::LShr(exact_inst(result, lhs, rhs)),
            BinOp::AShr => Inst::AShr(exact_inst(result, lhs, rhs)),
            BinOp::URem => Inst::URem(plain(result, lhs, rhs)),
            BinOp::SRem => Inst::SRem(plain(result, lhs, rhs)),
            BinOp::And => Inst::And(plain(result, lhs, rhs)),
            BinOp::Or => Inst::Or(plain(result, lhs, rhs)),
            BinOp::Xor => Inst::Xor(plain(result, lhs, rhs)),
            BinOp::FAdd => Inst::FAdd(float_inst(result, lhs, rhs)),
            BinOp::FSub => Inst::FSub(float_inst(result, lhs, rhs)),
            BinOp::FMul => Inst::FMul(float_inst(result, lhs, rhs)),
            BinOp::FDiv => Inst::FDiv(float_inst(result, lhs, rhs)),
            BinOp::FRem => Inst::FRem(float_inst(result, lhs, rhs)),
        })
    }

    // -----------------------------------------------------------------
    // Terminator translation (pass B)
    // -----------------------------------------------------------------

    /// Translates one terminator; `slot` is the result slot allocated
    /// during local indexing.
    pub(crate) fn translate_term(
        &mut self,
        fcx: &FuncCx,
        term: &ast::TermAst,
        slot: Option<LocalId>,
    ) -> Result<Term> {
        use ast::TermAst as A;
        match term {
            A::Ret { value } => {
                let ret_ty = fcx.ret_ty;
                match value {
                    None => {
                        if !self.module.types.is_void(ret_ty) {
                            return Err(self.const_type_mismatch("ret", "void", ret_ty));
                        }
                        Ok(Term::Ret { value: None })
                    }
                    Some(tv) => {
                        let value = self.resolve_typed_value(fcx, tv, "ret value")?;
                        if value.ty != ret_ty {
                            return Err(self.type_pair_mismatch("ret value", ret_ty, value.ty));
                        }
                        Ok(Term::Ret { value: Some(value) })
                    }
                }
            }
            A::Br { target } => Ok(Term::Br {
                target: self.resolve_block(fcx, target)?,
            }),
            A::CondBr {
                cond,
                then_target,
                else_target,
            } => {
                let cond = self.resolve_typed_value(fcx, cond, "br condition")?;
                if !matches!(*self.module.types.kind(cond.ty), TypeKind::Int { bits: 1 }) {
                    return Err(self.const_type_mismatch("br condition", "i1", cond.ty));
                }
                Ok(Term::CondBr {
                    cond,
                    then_target: self.resolve_block(fcx, then_target)?,
                    else_target: self.resolve_block(fcx, else_target)?,
                })
            }
            A::Switch {
                value,
                default,
                cases,
            } => {
                let value = self.resolve_typed_value(fcx, value, "switch value")?;
                if !self.module.types.is_int(value.ty) {
                    return Err(self.const_type_mismatch("switch value", "iN", value.ty));
                }
                let default = self.resolve_block(fcx, default)?;
                let mut resolved = Vec::with_capacity(cases.len());
                for case in cases {
                    let case_const = self.translate_typed_const(&case.value)?;
                    let got = self.module.consts.ty(case_const);
                    if got != value.ty {
                        return Err(self.type_pair_mismatch("switch case", value.ty, got));
                    }
                    let target = self.resolve_block(fcx, &case.target)?;
                    resolved.push((case_const, target));
                }
                Ok(Term::Switch {
                    value,
                    default,
                    cases: resolved,
                })
            }
            A::IndirectBr { addr, targets } => {
                let addr = self.resolve_typed_value(fcx, addr, "indirectbr address")?;
                if !self.module.types.is_pointer(addr.ty) {
                    return Err(self.const_type_mismatch(
                        "indirectbr address",
                        "pointer type",
                        addr.ty,
                    ));
                }
                let targets = targets
                    .iter()
                    .map(|target| self.resolve_block(fcx, target))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Term::IndirectBr { addr, targets })
            }
            A::Invoke {
                body,
                normal,
                unwind,
                ..
            } => {
                let call_body = self.translate_call_body(fcx, body)?;
                Ok(Term::Invoke {
                    result: slot,
                    body: call_body,
                    normal: self.resolve_block(fcx, normal)?,
                    unwind: self.resolve_block(fcx, unwind)?,
                })
            }
            A::CallBr {
                body,
                fallthrough,
                indirect,
                ..
            } => {
                let call_body = self.translate_call_body(fcx, body)?;
                let indirect = indirect
                    .iter()
                    .map(|target| self.resolve_block(fcx, target))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Term::CallBr {
                    result: slot,
                    body: call_body,
                    fallthrough: self.resolve_block(fcx, fallthrough)?,
                    indirect,
                })
            }
            A::Resume { value } => Ok(Term::Resume {
                value: self.resolve_typed_value(fcx, value, "resume operand")?,
            }),
            A::CatchSwitch {
                within,
                handlers,
                unwind,
                ..
            } => {
                let within = self.resolve_pad_parent(fcx, within)?;
                if handlers.is_empty() {
                    return Err(TranslateError::syntax(
                        Component::Bodies,
                        "catchswitch with no handlers",
                    ));
                }
                let handlers = handlers
                    .iter()
                    .map(|handler| self.resolve_block(fcx, handler))
                    .collect::<Result<Vec<_>>>()?;
                let unwind = self.resolve_unwind_target(fcx, unwind)?;
                Ok(Term::CatchSwitch {
                    result: expect_slot(slot),
                    within,
                    handlers,
                    unwind,
                })
            }
            A::CatchRet { from, to } => {
                let token = self.module.types.intern(TypeKind::Token);
                let from = self.resolve_value(fcx, token, from, "catchret token")?;
                Ok(Term::CatchRet {
                    from,
                    to: self.resolve_block(fcx, to)?,
                })
            }
            A::CleanupRet { from, unwind } => {
                let token = self.module.types.intern(TypeKind::Token);
                let from = self.resolve_value(fcx, token, from, "cleanupret token")?;
                let unwind = self.resolve_unwind_target(fcx, unwind)?;
                Ok(Term::CleanupRet { from, unwind })
            }
            A::Unreachable => Ok(Term::Unreachable),
        }
    }

    /// Resolves an optional parent pad token; `none` becomes a token
    /// constant.
    fn resolve_pad_parent(&mut self, fcx: &FuncCx, within: &Option<LocalIdent>) -> Result<Value> {
        let token = self.module.types.intern(TypeKind::Token);
        match within {
            Some(ident) => {
                self.resolve_value(fcx, token, &ast::ValueAst::Local(ident.clone()), "pad parent")
            }
            None => Ok(Value::Const(
                self.module.consts.alloc(token, ConstKind::NoneToken),
            )),
        }
    }

    fn resolve_unwind_target(
        &self,
        fcx: &FuncCx,
        target: &ast::UnwindTargetAst,
    ) -> Result<UnwindTarget> {
        match target {
            ast::UnwindTargetAst::Caller => Ok(UnwindTarget::Caller),
            ast::UnwindTargetAst::Label(label) => {
                Ok(UnwindTarget::Block(self.resolve_block(fcx, label)?))
            }
        }
    }

    fn check_atomic_flags(
        &self,
        atomic: bool,
        ordering: &Option<crate::attrs::AtomicOrdering>,
    ) -> Result<()> {
        if atomic && ordering.is_none() {
            return Err(TranslateError::syntax(
                Component::Bodies,
                "atomic access without an ordering",
            ));
        }
        if !atomic && ordering.is_some() {
            return Err(TranslateError::syntax(
                Component::Bodies,
                "ordering on a non-atomic access",
            ));
        }
        Ok(())
    }

    /// Returns the element type of a vector, or a typing error.
    pub(crate) fn vector_elem_ty(&self, ty: TypeId, context: &str) -> Result<TypeId> {
        match *self.module.types.kind(ty) {
            TypeKind::Vector { elem, .. } => Ok(elem),
            _ => Err(self.const_type_mismatch(context, "vector type", ty)),
        }
    }

    /// Walks an aggregate type by constant member indices.
    pub(crate) fn aggregate_member_ty(&self, agg: TypeId, indices: &[u32]) -> Result<TypeId> {
        if indices.is_empty() {
            return Err(TranslateError::syntax(
                Component::Bodies,
                "aggregate operation with no indices",
            ));
        }
        let mut cur = agg;
        for &index in indices {
            cur = match self.module.types.kind(cur) {
                TypeKind::Array { elem, len } => {
                    if u64::from(index) >= *len {
                        return Err(TranslateError::syntax(
                            Component::Bodies,
                            format!("aggregate index {index} out of range"),
                        ));
                    }
                    *elem
                }
                TypeKind::Struct { fields, .. } => {
                    let Some(&field) = fields.get(index as usize) else {
                        return Err(TranslateError::syntax(
                            Component::Bodies,
                            format!("aggregate index {index} out of range"),
                        ));
                    };
                    field
                }
                _ => {
                    return Err(self.const_type_mismatch(
                        "aggregate operation",
                        "array or struct type",
                        cur,
                    ));
                }
            };
        }
        Ok(cur)
    }
}

/// Unwraps a result slot that local indexing must have allocated.
fn expect_slot(slot: Option<LocalId>) -> LocalId {
    slot.unwrap_or_else(|| panic!("missing result slot for value-producing operation"))
}
