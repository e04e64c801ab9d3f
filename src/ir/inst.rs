//! IR instructions and terminators, one variant per opcode.

use crate::attrs::{
    AtomicOrdering, Attribute, CallingConv, FCmpPred, FastMathFlags, ICmpPred, OverflowFlags,
    RmwOp, TailKind,
};
use crate::ir::ids::{BlockId, ConstId, LocalId, TypeId};
use crate::ir::types::AddrSpace;

/// Resolved attribute with type identifiers.
pub type Attr = Attribute<TypeId>;

/// Resolved function attribute position entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FuncAttr {
    /// Reference to an attribute group.
    Group(crate::ir::ids::AttrGroupId),
    /// Inline attribute.
    Attr(Attr),
}

/// Resolved value operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Reference to a local value of the enclosing function.
    Local(LocalId),
    /// Reference to a constant (globals included).
    Const(ConstId),
}

/// Type-value operand pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypedValue {
    /// Resolved operand type.
    pub ty: TypeId,
    /// Operand value.
    pub value: Value,
}

impl TypedValue {
    /// Creates a typed value operand.
    pub const fn new(ty: TypeId, value: Value) -> Self {
        Self { ty, value }
    }
}

/// Payload of the unary floating-point operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryInst {
    /// Result value slot.
    pub result: LocalId,
    /// Fast-math flags.
    pub fmf: FastMathFlags,
    /// Operand.
    pub operand: TypedValue,
}

/// Payload of integer operations carrying `nuw`/`nsw`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithInst {
    /// Result value slot.
    pub result: LocalId,
    /// Overflow flags.
    pub overflow: OverflowFlags,
    /// Left operand.
    pub lhs: TypedValue,
    /// Right operand.
    pub rhs: TypedValue,
}

/// Payload of integer operations carrying `exact`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactInst {
    /// Result value slot.
    pub result: LocalId,
    /// Exact flag.
    pub exact: bool,
    /// Left operand.
    pub lhs: TypedValue,
    /// Right operand.
    pub rhs: TypedValue,
}

/// Payload of flag-free binary operations.
#[derive(Debug, Clone, PartialEq)]
pub struct BinInst {
    /// Result value slot.
    pub result: LocalId,
    /// Left operand.
    pub lhs: TypedValue,
    /// Right operand.
    pub rhs: TypedValue,
}

/// Payload of floating-point binary operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatInst {
    /// Result value slot.
    pub result: LocalId,
    /// Fast-math flags.
    pub fmf: FastMathFlags,
    /// Left operand.
    pub lhs: TypedValue,
    /// Right operand.
    pub rhs: TypedValue,
}

/// Payload of conversion operations.
#[derive(Debug, Clone, PartialEq)]
pub struct CastInst {
    /// Result value slot.
    pub result: LocalId,
    /// Source operand.
    pub value: TypedValue,
    /// Destination type.
    pub to: TypeId,
}

/// Payload of `getelementptr`.
#[derive(Debug, Clone, PartialEq)]
pub struct GepInst {
    /// Result value slot.
    pub result: LocalId,
    /// In-bounds flag.
    pub inbounds: bool,
    /// Source element type.
    pub elem_ty: TypeId,
    /// Base pointer operand.
    pub base: TypedValue,
    /// Index operands.
    pub indices: Vec<TypedValue>,
}

/// Call argument with resolved parameter attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// Argument operand.
    pub value: TypedValue,
    /// Parameter attributes on this argument.
    pub attrs: Vec<Attr>,
}

/// Resolved operand bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    /// Bundle tag.
    pub tag: String,
    /// Bundle arguments.
    pub args: Vec<TypedValue>,
}

/// Shared payload of `call`, `invoke`, and `callbr`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallBody {
    /// Calling convention.
    pub calling_conv: CallingConv,
    /// Return attributes.
    pub ret_attrs: Vec<Attr>,
    /// Callee address space.
    pub addr_space: AddrSpace,
    /// Resolved callee function type.
    pub callee_ty: TypeId,
    /// Callee operand.
    pub callee: Value,
    /// Arguments in call order.
    pub args: Vec<Arg>,
    /// Function attributes.
    pub func_attrs: Vec<FuncAttr>,
    /// Operand bundles.
    pub bundles: Vec<Bundle>,
}

/// Payload of `call`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallInst {
    /// Result value slot; absent for void calls.
    pub result: Option<LocalId>,
    /// Tail-call marker.
    pub tail: Option<TailKind>,
    /// Fast-math flags.
    pub fmf: FastMathFlags,
    /// Shared call payload.
    pub body: CallBody,
}

/// Payload of `phi`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhiInst {
    /// Result value slot.
    pub result: LocalId,
    /// Fast-math flags.
    pub fmf: FastMathFlags,
    /// Incoming value type.
    pub ty: TypeId,
    /// Incoming (value, predecessor) pairs.
    pub incoming: Vec<(Value, BlockId)>,
}

/// `landingpad` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `catch` clause.
    Catch(ConstId),
    /// `filter` clause.
    Filter(ConstId),
}

/// Payload of `landingpad`.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingPadInst {
    /// Result value slot.
    pub result: LocalId,
    /// Result type.
    pub ty: TypeId,
    /// `cleanup` flag.
    pub cleanup: bool,
    /// Catch and filter clauses.
    pub clauses: Vec<Clause>,
}

/// One non-terminator instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// `fneg`.
    FNeg(UnaryInst),
    /// `add`.
    Add(ArithInst),
    /// `sub`.
    Sub(ArithInst),
    /// `mul`.
    Mul(ArithInst),
    /// `shl`.
    Shl(ArithInst),
    /// `udiv`.
    UDiv(ExactInst),
    /// `sdiv`.
    SDiv(ExactInst),
    /// `lshr`.
    LShr(ExactInst),
    /// `ashr`.
    AShr(ExactInst),
    /// `urem`.
    URem(BinInst),
    /// `srem`.
    SRem(BinInst),
    /// `and`.
    And(BinInst),
    /// `or`.
    Or(BinInst),
    /// `xor`.
    Xor(BinInst),
    /// `fadd`.
    FAdd(FloatInst),
    /// `fsub`.
    FSub(FloatInst),
    /// `fmul`.
    FMul(FloatInst),
    /// `fdiv`.
    FDiv(FloatInst),
    /// `frem`.
    FRem(FloatInst),
    /// `extractelement`.
    ExtractElement {
        /// Result value slot.
        result: LocalId,
        /// Vector operand.
        vector: TypedValue,
        /// Element index operand.
        index: TypedValue,
    },
    /// `insertelement`.
    InsertElement {
        /// Result value slot.
        result: LocalId,
        /// Vector operand.
        vector: TypedValue,
        /// Replacement element operand.
        elem: TypedValue,
        /// Element index operand.
        index: TypedValue,
    },
    /// `shufflevector`.
    ShuffleVector {
        /// Result value slot.
        result: LocalId,
        /// First vector operand.
        a: TypedValue,
        /// Second vector operand.
        b: TypedValue,
        /// Shuffle mask operand.
        mask: TypedValue,
    },
    /// `extractvalue`.
    ExtractValue {
        /// Result value slot.
        result: LocalId,
        /// Aggregate operand.
        agg: TypedValue,
        /// Constant member indices.
        indices: Vec<u32>,
    },
    /// `insertvalue`.
    InsertValue {
        /// Result value slot.
        result: LocalId,
        /// Aggregate operand.
        agg: TypedValue,
        /// Replacement member operand.
        elem: TypedValue,
        /// Constant member indices.
        indices: Vec<u32>,
    },
    /// `alloca`.
    Alloca {
        /// Result value slot.
        result: LocalId,
        /// `inalloca` flag.
        inalloca: bool,
        /// `swifterror` flag.
        swifterror: bool,
        /// Allocated element type.
        elem_ty: TypeId,
        /// Element count operand.
        num_elems: Option<TypedValue>,
        /// Explicit alignment.
        align: Option<u64>,
        /// Allocation address space.
        addr_space: AddrSpace,
    },
    /// `load`.
    Load {
        /// Result value slot.
        result: LocalId,
        /// `volatile` flag.
        volatile: bool,
        /// Source pointer operand.
        ptr: TypedValue,
        /// Atomic ordering, when atomic.
        ordering: Option<AtomicOrdering>,
        /// Synchronization scope, when written.
        scope: Option<String>,
        /// Explicit alignment.
        align: Option<u64>,
    },
    /// `store`.
    Store {
        /// `volatile` flag.
        volatile: bool,
        /// Stored operand.
        value: TypedValue,
        /// Destination pointer operand.
        ptr: TypedValue,
        /// Atomic ordering, when atomic.
        ordering: Option<AtomicOrdering>,
        /// Synchronization scope, when written.
        scope: Option<String>,
        /// Explicit alignment.
        align: Option<u64>,
    },
    /// `fence`.
    Fence {
        /// Atomic ordering.
        ordering: AtomicOrdering,
        /// Synchronization scope, when written.
        scope: Option<String>,
    },
    /// `cmpxchg`.
    CmpXchg {
        /// Result value slot (a `{ty, i1}` pair).
        result: LocalId,
        /// `weak` flag.
        weak: bool,
        /// `volatile` flag.
        volatile: bool,
        /// Pointer operand.
        ptr: TypedValue,
        /// Comparison operand.
        cmp: TypedValue,
        /// Replacement operand.
        new: TypedValue,
        /// Ordering on success.
        success_ordering: AtomicOrdering,
        /// Ordering on failure.
        failure_ordering: AtomicOrdering,
        /// Synchronization scope, when written.
        scope: Option<String>,
    },
    /// `atomicrmw`.
    AtomicRmw {
        /// Result value slot.
        result: LocalId,
        /// `volatile` flag.
        volatile: bool,
        /// Read-modify-write operation.
        op: RmwOp,
        /// Pointer operand.
        ptr: TypedValue,
        /// Operand value.
        value: TypedValue,
        /// Atomic ordering.
        ordering: AtomicOrdering,
        /// Synchronization scope, when written.
        scope: Option<String>,
    },
    /// `getelementptr`.
    GetElementPtr(GepInst),
    /// `trunc`.
    Trunc(CastInst),
    /// `zext`.
    ZExt(CastInst),
    /// `sext`.
    SExt(CastInst),
    /// `fptrunc`.
    FpTrunc(CastInst),
    /// `fpext`.
    FpExt(CastInst),
    /// `fptoui`.
    FpToUi(CastInst),
    /// `fptosi`.
    FpToSi(CastInst),
    /// `uitofp`.
    UiToFp(CastInst),
    /// `sitofp`.
    SiToFp(CastInst),
    /// `ptrtoint`.
    PtrToInt(CastInst),
    /// `inttoptr`.
    IntToPtr(CastInst),
    /// `bitcast`.
    BitCast(CastInst),
    /// `addrspacecast`.
    AddrSpaceCast(CastInst),
    /// `icmp`.
    ICmp {
        /// Result value slot.
        result: LocalId,
        /// Comparison predicate.
        pred: ICmpPred,
        /// Left operand.
        lhs: TypedValue,
        /// Right operand.
        rhs: TypedValue,
    },
    /// `fcmp`.
    FCmp {
        /// Result value slot.
        result: LocalId,
        /// Fast-math flags.
        fmf: FastMathFlags,
        /// Comparison predicate.
        pred: FCmpPred,
        /// Left operand.
        lhs: TypedValue,
        /// Right operand.
        rhs: TypedValue,
    },
    /// `phi`.
    Phi(PhiInst),
    /// `select`.
    Select {
        /// Result value slot.
        result: LocalId,
        /// Fast-math flags.
        fmf: FastMathFlags,
        /// Condition operand.
        cond: TypedValue,
        /// Value when the condition holds.
        then_value: TypedValue,
        /// Value when the condition does not hold.
        else_value: TypedValue,
    },
    /// `freeze`.
    Freeze {
        /// Result value slot.
        result: LocalId,
        /// Operand.
        value: TypedValue,
    },
    /// `call`.
    Call(CallInst),
    /// `va_arg`.
    VaArg {
        /// Result value slot.
        result: LocalId,
        /// Argument list operand.
        list: TypedValue,
        /// Fetched argument type.
        ty: TypeId,
    },
    /// `landingpad`.
    LandingPad(LandingPadInst),
    /// `catchpad`.
    CatchPad {
        /// Result value slot (token).
        result: LocalId,
        /// Enclosing `catchswitch` token.
        within: Value,
        /// Pad arguments.
        args: Vec<TypedValue>,
    },
    /// `cleanuppad`.
    CleanupPad {
        /// Result value slot (token).
        result: LocalId,
        /// Parent pad token, or `none`.
        within: Value,
        /// Pad arguments.
        args: Vec<TypedValue>,
    },
}

impl Inst {
    /// Returns the result value slot for value-producing instructions.
    pub fn result(&self) -> Option<LocalId> {
        use Inst::*;
        match self {
            FNeg(i) => Some(i.result),
            Add(i) | Sub(i) | Mul(i) | Shl(i) => Some(i.result),
            UDiv(i) | SDiv(i) | LShr(i) | AShr(i) => Some(i.result),
            URem(i) | SRem(i) | And(i) | Or(i) | Xor(i) => Some(i.result),
            FAdd(i) | FSub(i) | FMul(i) | FDiv(i) | FRem(i) => Some(i.result),
            ExtractElement { result, .. }
            | InsertElement { result, .. }
            | ShuffleVector { result, .. }
            | ExtractValue { result, .. }
            | InsertValue { result, .. }
            | Alloca { result, .. }
            | Load { result, .. }
            | CmpXchg { result, .. }
            | AtomicRmw { result, .. }
            | ICmp { result, .. }
            | FCmp { result, .. }
            | Select { result, .. }
            | Freeze { result, .. }
            | VaArg { result, .. }
            | CatchPad { result, .. }
            | CleanupPad { result, .. } => Some(*result),
            GetElementPtr(i) => Some(i.result),
            Trunc(i) | ZExt(i) | SExt(i) | FpTrunc(i) | FpExt(i) | FpToUi(i) | FpToSi(i)
            | UiToFp(i) | SiToFp(i) | PtrToInt(i) | IntToPtr(i) | BitCast(i)
            | AddrSpaceCast(i) => Some(i.result),
            Phi(i) => Some(i.result),
            LandingPad(i) => Some(i.result),
            Call(i) => i.result,
            Store { .. } | Fence { .. } => None,
        }
    }
}

/// Unwind destination of an exception-handling terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnwindTarget {
    /// Unwind to the caller.
    Caller,
    /// Unwind to a basic block.
    Block(BlockId),
}

/// One terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// `ret`.
    Ret {
        /// Returned operand; absent for `ret void`.
        value: Option<TypedValue>,
    },
    /// Unconditional `br`.
    Br {
        /// Destination block.
        target: BlockId,
    },
    /// Conditional `br`.
    CondBr {
        /// Branch condition operand.
        cond: TypedValue,
        /// Destination when the condition holds.
        then_target: BlockId,
        /// Destination when the condition does not hold.
        else_target: BlockId,
    },
    /// `switch`.
    Switch {
        /// Scrutinee operand.
        value: TypedValue,
        /// Default destination.
        default: BlockId,
        /// Case arms as (constant, destination) pairs.
        cases: Vec<(ConstId, BlockId)>,
    },
    /// `indirectbr`.
    IndirectBr {
        /// Target address operand.
        addr: TypedValue,
        /// Possible destinations.
        targets: Vec<BlockId>,
    },
    /// `invoke`.
    Invoke {
        /// Result value slot; absent for void invokes.
        result: Option<LocalId>,
        /// Shared call payload.
        body: CallBody,
        /// Normal continuation block.
        normal: BlockId,
        /// Unwind destination block.
        unwind: BlockId,
    },
    /// `callbr`.
    CallBr {
        /// Result value slot; absent for void calls.
        result: Option<LocalId>,
        /// Shared call payload.
        body: CallBody,
        /// Fallthrough destination block.
        fallthrough: BlockId,
        /// Indirect destination blocks.
        indirect: Vec<BlockId>,
    },
    /// `resume`.
    Resume {
        /// Resumed exception operand.
        value: TypedValue,
    },
    /// `catchswitch`.
    CatchSwitch {
        /// Result value slot (token).
        result: LocalId,
        /// Parent pad token, or `none`.
        within: Value,
        /// Handler blocks.
        handlers: Vec<BlockId>,
        /// Unwind destination.
        unwind: UnwindTarget,
    },
    /// `catchret`.
    CatchRet {
        /// Source `catchpad` token.
        from: Value,
        /// Continuation block.
        to: BlockId,
    },
    /// `cleanupret`.
    CleanupRet {
        /// Source `cleanuppad` token.
        from: Value,
        /// Unwind destination.
        unwind: UnwindTarget,
    },
    /// `unreachable`.
    Unreachable,
}

impl Term {
    /// Returns the result value slot for value-producing terminators.
    pub fn result(&self) -> Option<LocalId> {
        match self {
            Self::Invoke { result, .. } | Self::CallBr { result, .. } => *result,
            Self::CatchSwitch { result, .. } => Some(*result),
            _ => None,
        }
    }
}
