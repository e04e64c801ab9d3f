//! Instruction and terminator syntax nodes.

use crate::ast::constant::{ConstAst, TypedConstAst};
use crate::ast::types::TypeAst;
use crate::attrs::{
    AtomicOrdering, Attribute, BinOp, CallingConv, CastOp, FCmpPred, FastMathFlags, ICmpPred,
    OverflowFlags, RmwOp, TailKind,
};
use crate::ident::LocalIdent;
use crate::ir::AddrSpace;

/// Attribute with inline type payloads.
pub type AttributeAst = Attribute<TypeAst>;

/// Function attribute position entry: either an attribute group reference
/// (`#N`) or an inline attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FuncAttrAst {
    /// Reference to an attribute group by numeric ID.
    Group(u64),
    /// Inline attribute.
    Attr(AttributeAst),
}

/// Value operand: a local reference or an inline constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueAst {
    /// Reference to a local value.
    Local(LocalIdent),
    /// Inline constant.
    Const(ConstAst),
}

impl ValueAst {
    /// Shorthand for a named local reference.
    pub fn local(name: impl Into<String>) -> Self {
        Self::Local(LocalIdent::Name(name.into()))
    }

    /// Shorthand for a numbered local reference.
    pub const fn num(id: u64) -> Self {
        Self::Local(LocalIdent::Num(id))
    }
}

/// Type-value operand pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValueAst {
    /// Declared operand type.
    pub ty: TypeAst,
    /// Operand value.
    pub value: ValueAst,
}

impl TypedValueAst {
    /// Creates a typed value operand.
    pub fn new(ty: TypeAst, value: ValueAst) -> Self {
        Self { ty, value }
    }

    /// Shorthand for an integer constant operand.
    pub fn int(bits: u32, value: i128) -> Self {
        Self::new(TypeAst::int(bits), ValueAst::Const(ConstAst::Int(value)))
    }
}

/// Call argument with optional parameter attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgAst {
    /// Declared argument type.
    pub ty: TypeAst,
    /// Parameter attributes on this argument.
    pub attrs: Vec<AttributeAst>,
    /// Argument value.
    pub value: ValueAst,
}

impl ArgAst {
    /// Creates an argument without attributes.
    pub fn new(ty: TypeAst, value: ValueAst) -> Self {
        Self {
            ty,
            attrs: Vec::new(),
            value,
        }
    }
}

/// Operand bundle on a call-like operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleAst {
    /// Bundle tag.
    pub tag: String,
    /// Bundle arguments.
    pub args: Vec<TypedValueAst>,
}

/// Shared payload of `call`, `invoke`, and `callbr`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallBodyAst {
    /// Calling convention, when written.
    pub calling_conv: Option<CallingConv>,
    /// Return attributes.
    pub ret_attrs: Vec<AttributeAst>,
    /// Callee address space, when written.
    pub addr_space: Option<AddrSpace>,
    /// Return type, or the full callee function type.
    pub ty: TypeAst,
    /// Callee value.
    pub callee: ValueAst,
    /// Arguments in call order.
    pub args: Vec<ArgAst>,
    /// Function attributes.
    pub func_attrs: Vec<FuncAttrAst>,
    /// Operand bundles.
    pub bundles: Vec<BundleAst>,
}

impl CallBodyAst {
    /// Creates a call body with no decorations.
    pub fn new(ty: TypeAst, callee: ValueAst, args: Vec<ArgAst>) -> Self {
        Self {
            calling_conv: None,
            ret_attrs: Vec::new(),
            addr_space: None,
            ty,
            callee,
            args,
            func_attrs: Vec::new(),
            bundles: Vec::new(),
        }
    }
}

/// `landingpad` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseAst {
    /// `catch` clause.
    Catch(TypedConstAst),
    /// `filter` clause.
    Filter(TypedConstAst),
}

/// Unwind destination of an exception-handling terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum UnwindTargetAst {
    /// Unwind to the caller (`unwind to caller`).
    Caller,
    /// Unwind to a basic block.
    Label(LocalIdent),
}

/// `switch` case arm.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCaseAst {
    /// Case constant.
    pub value: TypedConstAst,
    /// Destination block label.
    pub target: LocalIdent,
}

/// One non-terminator instruction as written in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum InstAst {
    /// Floating-point negation.
    FNeg {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Fast-math flags.
        fmf: FastMathFlags,
        /// Operand.
        operand: TypedValueAst,
    },
    /// Integer, floating-point, or bitwise binary operation.
    Binary {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Operation code.
        op: BinOp,
        /// `nuw`/`nsw` flags (add/sub/mul/shl only).
        overflow: OverflowFlags,
        /// `exact` flag (udiv/sdiv/lshr/ashr only).
        exact: bool,
        /// Fast-math flags (floating-point operations only).
        fmf: FastMathFlags,
        /// Left operand, carrying the shared operand type.
        lhs: TypedValueAst,
        /// Right operand.
        rhs: ValueAst,
    },
    /// `extractelement`.
    ExtractElement {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Vector operand.
        vector: TypedValueAst,
        /// Element index operand.
        index: TypedValueAst,
    },
    /// `insertelement`.
    InsertElement {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Vector operand.
        vector: TypedValueAst,
        /// Replacement element operand.
        elem: TypedValueAst,
        /// Element index operand.
        index: TypedValueAst,
    },
    /// `shufflevector`.
    ShuffleVector {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// First vector operand.
        a: TypedValueAst,
        /// Second vector operand.
        b: TypedValueAst,
        /// Shuffle mask operand.
        mask: TypedValueAst,
    },
    /// `extractvalue`.
    ExtractValue {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Aggregate operand.
        agg: TypedValueAst,
        /// Constant member indices.
        indices: Vec<u32>,
    },
    /// `insertvalue`.
    InsertValue {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Aggregate operand.
        agg: TypedValueAst,
        /// Replacement member operand.
        elem: TypedValueAst,
        /// Constant member indices.
        indices: Vec<u32>,
    },
    /// `alloca`.
    Alloca {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// `inalloca` flag.
        inalloca: bool,
        /// `swifterror` flag.
        swifterror: bool,
        /// Allocated element type.
        elem_ty: TypeAst,
        /// Element count operand, when written.
        num_elems: Option<TypedValueAst>,
        /// Explicit alignment.
        align: Option<u64>,
        /// Explicit allocation address space.
        addr_space: Option<AddrSpace>,
    },
    /// `load`.
    Load {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Atomic access flag.
        atomic: bool,
        /// `volatile` flag.
        volatile: bool,
        /// Loaded value type.
        ty: TypeAst,
        /// Source pointer operand.
        ptr: TypedValueAst,
        /// Atomic ordering, when atomic.
        ordering: Option<AtomicOrdering>,
        /// Synchronization scope, when written.
        scope: Option<String>,
        /// Explicit alignment.
        align: Option<u64>,
    },
    /// `store`.
    Store {
        /// Atomic access flag.
        atomic: bool,
        /// `volatile` flag.
        volatile: bool,
        /// Stored value operand.
        value: TypedValueAst,
        /// Destination pointer operand.
        ptr: TypedValueAst,
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
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// `weak` flag.
        weak: bool,
        /// `volatile` flag.
        volatile: bool,
        /// Pointer operand.
        ptr: TypedValueAst,
        /// Comparison operand.
        cmp: TypedValueAst,
        /// Replacement operand.
        new: TypedValueAst,
        /// Ordering on success.
        success_ordering: AtomicOrdering,
        /// Ordering on failure.
        failure_ordering: AtomicOrdering,
        /// Synchronization scope, when written.
        scope: Option<String>,
    },
    /// `atomicrmw`.
    AtomicRmw {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// `volatile` flag.
        volatile: bool,
        /// Read-modify-write operation.
        op: RmwOp,
        /// Pointer operand.
        ptr: TypedValueAst,
        /// Operand value.
        value: TypedValueAst,
        /// Atomic ordering.
        ordering: AtomicOrdering,
        /// Synchronization scope, when written.
        scope: Option<String>,
    },
    /// `getelementptr`.
    Gep {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// In-bounds flag.
        inbounds: bool,
        /// Source element type.
        elem_ty: TypeAst,
        /// Base pointer operand.
        base: TypedValueAst,
        /// Index operands.
        indices: Vec<TypedValueAst>,
    },
    /// Conversion operation.
    Cast {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Conversion code.
        op: CastOp,
        /// Source operand.
        value: TypedValueAst,
        /// Destination type.
        to: TypeAst,
    },
    /// `icmp`.
    ICmp {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Comparison predicate.
        pred: ICmpPred,
        /// Left operand, carrying the shared operand type.
        lhs: TypedValueAst,
        /// Right operand.
        rhs: ValueAst,
    },
    /// `fcmp`.
    FCmp {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Fast-math flags.
        fmf: FastMathFlags,
        /// Comparison predicate.
        pred: FCmpPred,
        /// Left operand, carrying the shared operand type.
        lhs: TypedValueAst,
        /// Right operand.
        rhs: ValueAst,
    },
    /// `phi`.
    Phi {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Fast-math flags (floating-point phis only).
        fmf: FastMathFlags,
        /// Incoming value type.
        ty: TypeAst,
        /// Incoming (value, predecessor label) pairs.
        incoming: Vec<(ValueAst, LocalIdent)>,
    },
    /// `select`.
    Select {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Fast-math flags (floating-point selects only).
        fmf: FastMathFlags,
        /// Condition operand.
        cond: TypedValueAst,
        /// Value when the condition holds.
        then_value: TypedValueAst,
        /// Value when the condition does not hold.
        else_value: TypedValueAst,
    },
    /// `freeze`.
    Freeze {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Operand.
        value: TypedValueAst,
    },
    /// `call`.
    Call {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Tail-call marker, when written.
        tail: Option<TailKind>,
        /// Fast-math flags.
        fmf: FastMathFlags,
        /// Shared call payload.
        body: CallBodyAst,
    },
    /// `va_arg`.
    VaArg {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Argument list operand.
        list: TypedValueAst,
        /// Fetched argument type.
        ty: TypeAst,
    },
    /// `landingpad`.
    LandingPad {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Result type.
        ty: TypeAst,
        /// `cleanup` flag.
        cleanup: bool,
        /// Catch and filter clauses.
        clauses: Vec<ClauseAst>,
    },
    /// `catchpad`.
    CatchPad {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Enclosing `catchswitch` token.
        within: LocalIdent,
        /// Pad arguments.
        args: Vec<TypedValueAst>,
    },
    /// `cleanuppad`.
    CleanupPad {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Parent pad token, or `none`.
        within: Option<LocalIdent>,
        /// Pad arguments.
        args: Vec<TypedValueAst>,
    },
}

/// One terminator as written in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum TermAst {
    /// `ret`.
    Ret {
        /// Returned operand; absent for `ret void`.
        value: Option<TypedValueAst>,
    },
    /// Unconditional `br`.
    Br {
        /// Destination block label.
        target: LocalIdent,
    },
    /// Conditional `br`.
    CondBr {
        /// Branch condition operand.
        cond: TypedValueAst,
        /// Destination when the condition holds.
        then_target: LocalIdent,
        /// Destination when the condition does not hold.
        else_target: LocalIdent,
    },
    /// `switch`.
    Switch {
        /// Scrutinee operand.
        value: TypedValueAst,
        /// Default destination label.
        default: LocalIdent,
        /// Case arms.
        cases: Vec<SwitchCaseAst>,
    },
    /// `indirectbr`.
    IndirectBr {
        /// Target address operand.
        addr: TypedValueAst,
        /// Possible destination labels.
        targets: Vec<LocalIdent>,
    },
    /// `invoke`.
    Invoke {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Shared call payload.
        body: CallBodyAst,
        /// Normal continuation label.
        normal: LocalIdent,
        /// Unwind destination label.
        unwind: LocalIdent,
    },
    /// `callbr`.
    CallBr {
        /// Result name, when written.
        result: Option<LocalIdent>,
        /// Shared call payload.
        body: CallBodyAst,
        /// Fallthrough destination label.
        fallthrough: LocalIdent,
        /// Indirect destination labels.
        indirect: Vec<LocalIdent>,
    },
    /// `resume`.
    Resume {
        /// Resumed exception operand.
        value: TypedValueAst,
    },
    /// `catchswitch`.
    CatchSwitch {
        /// Result token name, when written.
        result: Option<LocalIdent>,
        /// Parent pad token, or `none`.
        within: Option<LocalIdent>,
        /// Handler block labels.
        handlers: Vec<LocalIdent>,
        /// Unwind destination.
        unwind: UnwindTargetAst,
    },
    /// `catchret`.
    CatchRet {
        /// Source `catchpad` token.
        from: ValueAst,
        /// Continuation label.
        to: LocalIdent,
    },
    /// `cleanupret`.
    CleanupRet {
        /// Source `cleanuppad` token.
        from: ValueAst,
        /// Unwind destination.
        unwind: UnwindTargetAst,
    },
    /// `unreachable`.
    Unreachable,
}
