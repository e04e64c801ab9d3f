//! IR constants: an append-only pool forming the shared value DAG.

use crate::attrs::{BinOp, CastOp, FCmpPred, ICmpPred};
use crate::ir::ids::{AliasId, BlockId, ConstId, FuncId, GlobalId, IFuncId, TypeId};

/// Reference to a top-level addressable entity.
///
/// Globals, aliases, ifuncs, and functions share one namespace; a reference
/// carries which pool the entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalRef {
    /// Global variable.
    Global(GlobalId),
    /// Alias.
    Alias(AliasId),
    /// IFunc.
    IFunc(IFuncId),
    /// Function.
    Func(FuncId),
}

/// One constant with its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstData {
    /// Resolved constant type.
    pub ty: TypeId,
    /// Constant payload.
    pub kind: ConstKind,
}

/// Constant payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstKind {
    /// Integer constant.
    Int(i128),
    /// Floating-point constant.
    Float(f64),
    /// `null` pointer constant.
    Null,
    /// `none` token constant.
    NoneToken,
    /// Struct constant.
    Struct(Vec<ConstId>),
    /// Array constant.
    Array(Vec<ConstId>),
    /// Character array constant.
    CharArray(Vec<u8>),
    /// Vector constant.
    Vector(Vec<ConstId>),
    /// `zeroinitializer` constant.
    ZeroInitializer,
    /// `undef` constant.
    Undef,
    /// `poison` constant.
    Poison,
    /// `blockaddress` constant.
    ///
    /// The target block is absent while the constant is pending; the
    /// fix-up pass fills it once the enclosing function body exists.
    BlockAddress {
        /// Enclosing function.
        func: FuncId,
        /// Target basic block, once resolved.
        block: Option<BlockId>,
    },
    /// Reference to a top-level entity.
    Global(GlobalRef),
    /// Constant expression.
    Expr(ConstExpr),
}

/// Constant expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    /// Binary or bitwise operation.
    Binary {
        /// Operation code.
        op: BinOp,
        /// Left operand.
        lhs: ConstId,
        /// Right operand.
        rhs: ConstId,
    },
    /// Integer comparison.
    ICmp {
        /// Comparison predicate.
        pred: ICmpPred,
        /// Left operand.
        lhs: ConstId,
        /// Right operand.
        rhs: ConstId,
    },
    /// Floating-point comparison.
    FCmp {
        /// Comparison predicate.
        pred: FCmpPred,
        /// Left operand.
        lhs: ConstId,
        /// Right operand.
        rhs: ConstId,
    },
    /// `getelementptr` expression.
    GetElementPtr {
        /// In-bounds flag.
        inbounds: bool,
        /// Source element type.
        elem_ty: TypeId,
        /// Base pointer constant.
        base: ConstId,
        /// Index constants.
        indices: Vec<ConstId>,
    },
    /// Conversion expression.
    Cast {
        /// Conversion code.
        op: CastOp,
        /// Source constant.
        value: ConstId,
        /// Destination type.
        to: TypeId,
    },
    /// `select` expression.
    Select {
        /// Condition constant.
        cond: ConstId,
        /// Value when the condition holds.
        then_value: ConstId,
        /// Value when the condition does not hold.
        else_value: ConstId,
    },
    /// `extractelement` expression.
    ExtractElement {
        /// Vector constant.
        vector: ConstId,
        /// Element index constant.
        index: ConstId,
    },
    /// `insertelement` expression.
    InsertElement {
        /// Vector constant.
        vector: ConstId,
        /// Replacement element constant.
        elem: ConstId,
        /// Element index constant.
        index: ConstId,
    },
    /// `shufflevector` expression.
    ShuffleVector {
        /// First vector operand.
        a: ConstId,
        /// Second vector operand.
        b: ConstId,
        /// Shuffle mask constant.
        mask: ConstId,
    },
}

/// Owning pool for all constants of one module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstPool {
    entries: Vec<ConstData>,
}

impl ConstPool {
    /// Creates an empty constant pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of constants in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the pool holds no constants.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a constant and returns its identifier.
    pub fn alloc(&mut self, ty: TypeId, kind: ConstKind) -> ConstId {
        let id = ConstId::from_index(self.entries.len());
        self.entries.push(ConstData { ty, kind });
        id
    }

    /// Returns one constant.
    pub fn get(&self, id: ConstId) -> &ConstData {
        &self.entries[id.index()]
    }

    /// Returns the resolved type of one constant.
    pub fn ty(&self, id: ConstId) -> TypeId {
        self.entries[id.index()].ty
    }

    /// Fills the target block of a pending `blockaddress` constant.
    ///
    /// Panics when the constant is not a `blockaddress`; the fix-up pass
    /// only records identifiers it allocated itself, so a mismatch is a
    /// translator bug.
    pub fn resolve_block_address(&mut self, id: ConstId, target: BlockId) {
        match &mut self.entries[id.index()].kind {
            ConstKind::BlockAddress { block, .. } => *block = Some(target),
            other => panic!("constant {id:?} is not a blockaddress: {other:?}"),
        }
    }
}
