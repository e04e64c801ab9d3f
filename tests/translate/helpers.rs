//! Shared AST fixture builders for the translator suites.

use ingot::ast::{
    BlockAst, ConstAst, FuncAst, GlobalAst, InstAst, Module, ParamAst, TermAst, TopLevelEntity,
    TypeAst, TypeDefAst, TypedValueAst, ValueAst,
};
use ingot::attrs::{FastMathFlags, OverflowFlags};
use ingot::ident::{GlobalIdent, LocalIdent};

/// Builds a module from top-level entities.
pub fn module(entities: Vec<TopLevelEntity>) -> Module {
    Module::new(entities)
}

/// Global identifier shorthand.
pub fn g(name: &str) -> GlobalIdent {
    GlobalIdent::name(name)
}

/// Named local identifier shorthand.
pub fn l(name: &str) -> LocalIdent {
    LocalIdent::name(name)
}

/// Integer type shorthand.
pub fn i(bits: u32) -> TypeAst {
    TypeAst::int(bits)
}

/// Pointer type shorthand.
pub fn ptr(pointee: TypeAst) -> TypeAst {
    TypeAst::ptr(pointee)
}

/// Named type reference shorthand.
pub fn named(name: &str) -> TypeAst {
    TypeAst::Named(name.to_string())
}

/// Named type definition entity.
pub fn typedef(name: &str, ty: TypeAst) -> TopLevelEntity {
    TopLevelEntity::TypeDef(TypeDefAst {
        name: name.to_string(),
        ty,
        span: None,
    })
}

/// Global definition with an initializer.
pub fn global_def(name: &str, content_ty: TypeAst, init: ConstAst) -> TopLevelEntity {
    let mut def = GlobalAst::new(g(name), content_ty);
    def.init = Some(init);
    TopLevelEntity::Global(def)
}

/// Global declaration without an initializer.
pub fn global_decl(name: &str, content_ty: TypeAst) -> TopLevelEntity {
    TopLevelEntity::Global(GlobalAst::new(g(name), content_ty))
}

/// Function definition entity.
pub fn func_def(
    name: &str,
    ret_ty: TypeAst,
    params: Vec<ParamAst>,
    blocks: Vec<BlockAst>,
) -> TopLevelEntity {
    let mut def = FuncAst::new(g(name), ret_ty, params);
    def.blocks = blocks;
    TopLevelEntity::Func(def)
}

/// Function declaration entity.
pub fn func_decl(name: &str, ret_ty: TypeAst, params: Vec<ParamAst>) -> TopLevelEntity {
    TopLevelEntity::Func(FuncAst::new(g(name), ret_ty, params))
}

/// `ret void` terminator.
pub fn ret_void() -> TermAst {
    TermAst::Ret { value: None }
}

/// `ret <ty> <value>` terminator.
pub fn ret(ty: TypeAst, value: ValueAst) -> TermAst {
    TermAst::Ret {
        value: Some(TypedValueAst::new(ty, value)),
    }
}

/// Unnamed `add` without wrap flags.
pub fn add(lhs: TypedValueAst, rhs: ValueAst) -> InstAst {
    binary(ingot::attrs::BinOp::Add, lhs, rhs)
}

/// Unnamed `sub` without wrap flags.
pub fn sub(lhs: TypedValueAst, rhs: ValueAst) -> InstAst {
    binary(ingot::attrs::BinOp::Sub, lhs, rhs)
}

/// Unnamed flag-free binary instruction.
pub fn binary(op: ingot::attrs::BinOp, lhs: TypedValueAst, rhs: ValueAst) -> InstAst {
    InstAst::Binary {
        result: None,
        op,
        overflow: OverflowFlags::default(),
        exact: false,
        fmf: FastMathFlags::default(),
        lhs,
        rhs,
    }
}

/// Names the result of an instruction.
pub fn with_result(mut inst: InstAst, name: LocalIdent) -> InstAst {
    match &mut inst {
        InstAst::Binary { result, .. }
        | InstAst::FNeg { result, .. }
        | InstAst::Load { result, .. }
        | InstAst::Gep { result, .. }
        | InstAst::Cast { result, .. }
        | InstAst::ICmp { result, .. }
        | InstAst::Phi { result, .. }
        | InstAst::Select { result, .. }
        | InstAst::Call { result, .. }
        | InstAst::Alloca { result, .. } => *result = Some(name),
        other => panic!("with_result does not support {other:?}"),
    }
    inst
}
