//! Decoration enumerations and attribute sets shared by the AST and IR
//! layers.
//!
//! [`Attribute`] is generic over its type-reference representation: the AST
//! instantiates it with inline type syntax, the IR with resolved type
//! identifiers.

/// Symbol linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Linkage {
    /// Externally visible definition.
    #[default]
    External,
    /// Appending linkage (arrays of global scope only).
    Appending,
    /// Available-externally definition.
    AvailableExternally,
    /// Common linkage.
    Common,
    /// External weak reference.
    ExternWeak,
    /// Internal (local symbol table) linkage.
    Internal,
    /// Keep-one link-once linkage.
    LinkOnce,
    /// ODR-merged link-once linkage.
    LinkOnceOdr,
    /// Private (no symbol table) linkage.
    Private,
    /// Weak linkage.
    Weak,
    /// ODR-merged weak linkage.
    WeakOdr,
}

/// Runtime preemption specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preemption {
    /// Symbol may be replaced at runtime.
    #[default]
    DsoPreemptable,
    /// Symbol resolves within the linkage unit.
    DsoLocal,
}

/// Symbol visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Default visibility.
    #[default]
    Default,
    /// Hidden visibility.
    Hidden,
    /// Protected visibility.
    Protected,
}

/// DLL storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DllStorage {
    /// Imported from a DLL.
    Import,
    /// Exported to a DLL.
    Export,
}

/// Thread-local storage model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TlsModel {
    /// General-dynamic model (bare `thread_local`).
    #[default]
    GeneralDynamic,
    /// Local-dynamic model.
    LocalDynamic,
    /// Initial-exec model.
    InitialExec,
    /// Local-exec model.
    LocalExec,
}

/// Unnamed-address specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnnamedAddr {
    /// Address is not significant (`unnamed_addr`).
    Global,
    /// Address is not significant within the module (`local_unnamed_addr`).
    Local,
}

/// Calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallingConv {
    /// C calling convention.
    #[default]
    C,
    /// Fast calling convention.
    Fast,
    /// Cold calling convention.
    Cold,
    /// GHC calling convention.
    Ghc,
    /// HiPE calling convention.
    HiPe,
    /// WebKit JavaScript calling convention.
    WebKitJs,
    /// Dynamic register allocation convention.
    AnyReg,
    /// Preserve-most registers convention.
    PreserveMost,
    /// Preserve-all registers convention.
    PreserveAll,
    /// Swift calling convention.
    Swift,
    /// C++ fast thread-local static initialization convention.
    CxxFastTls,
    /// Guaranteed tail-call convention.
    Tail,
    /// x86 stdcall convention.
    X86StdCall,
    /// x86 fastcall convention.
    X86FastCall,
    /// x86 thiscall convention.
    X86ThisCall,
    /// x86 vectorcall convention.
    X86VectorCall,
    /// ARM APCS convention.
    ArmApcs,
    /// ARM AAPCS convention.
    ArmAapcs,
    /// ARM AAPCS-VFP convention.
    ArmAapcsVfp,
    /// Windows x64 convention.
    Win64,
    /// AMD GPU kernel convention.
    AmdGpuKernel,
    /// Explicit numbered convention (`cc <n>`).
    Numbered(u32),
}

/// Comdat selection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// The linker may choose any COMDAT.
    Any,
    /// Chosen COMDAT must match exactly.
    ExactMatch,
    /// The largest COMDAT is chosen.
    Largest,
    /// No deduplication is performed.
    NoDuplicates,
    /// Chosen COMDAT must have the same size.
    SameSize,
}

/// Integer comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ICmpPred {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Unsigned greater than.
    Ugt,
    /// Unsigned greater than or equal.
    Uge,
    /// Unsigned less than.
    Ult,
    /// Unsigned less than or equal.
    Ule,
    /// Signed greater than.
    Sgt,
    /// Signed greater than or equal.
    Sge,
    /// Signed less than.
    Slt,
    /// Signed less than or equal.
    Sle,
}

/// Floating-point comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FCmpPred {
    /// Always false.
    False,
    /// Ordered and equal.
    Oeq,
    /// Ordered and greater than.
    Ogt,
    /// Ordered and greater than or equal.
    Oge,
    /// Ordered and less than.
    Olt,
    /// Ordered and less than or equal.
    Ole,
    /// Ordered and not equal.
    One,
    /// Ordered (no NaN operands).
    Ord,
    /// Unordered or equal.
    Ueq,
    /// Unordered or greater than.
    Ugt,
    /// Unordered or greater than or equal.
    Uge,
    /// Unordered or less than.
    Ult,
    /// Unordered or less than or equal.
    Ule,
    /// Unordered or not equal.
    Une,
    /// Unordered (either operand NaN).
    Uno,
    /// Always true.
    True,
}

/// Atomic memory ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicOrdering {
    /// Unordered atomic access.
    Unordered,
    /// Monotonic ordering.
    Monotonic,
    /// Acquire ordering.
    Acquire,
    /// Release ordering.
    Release,
    /// Acquire-release ordering.
    AcqRel,
    /// Sequentially consistent ordering.
    SeqCst,
}

/// Atomic read-modify-write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RmwOp {
    /// Exchange.
    Xchg,
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Bitwise and.
    And,
    /// Bitwise nand.
    Nand,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
    /// Signed maximum.
    Max,
    /// Signed minimum.
    Min,
    /// Unsigned maximum.
    UMax,
    /// Unsigned minimum.
    UMin,
    /// Floating-point addition.
    FAdd,
    /// Floating-point subtraction.
    FSub,
}

/// Tail-call marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TailKind {
    /// `tail` marker.
    Tail,
    /// `musttail` marker.
    MustTail,
    /// `notail` marker.
    NoTail,
}

/// Binary operation codes for constant expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Integer addition.
    Add,
    /// Floating-point addition.
    FAdd,
    /// Integer subtraction.
    Sub,
    /// Floating-point subtraction.
    FSub,
    /// Integer multiplication.
    Mul,
    /// Floating-point multiplication.
    FMul,
    /// Unsigned division.
    UDiv,
    /// Signed division.
    SDiv,
    /// Floating-point division.
    FDiv,
    /// Unsigned remainder.
    URem,
    /// Signed remainder.
    SRem,
    /// Floating-point remainder.
    FRem,
    /// Left shift.
    Shl,
    /// Logical right shift.
    LShr,
    /// Arithmetic right shift.
    AShr,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
}

impl BinOp {
    /// Returns `true` for the floating-point operations.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::FAdd | Self::FSub | Self::FMul | Self::FDiv | Self::FRem)
    }
}

/// Conversion operation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastOp {
    /// Integer truncation.
    Trunc,
    /// Zero extension.
    ZExt,
    /// Sign extension.
    SExt,
    /// Floating-point truncation.
    FpTrunc,
    /// Floating-point extension.
    FpExt,
    /// Float to unsigned integer.
    FpToUi,
    /// Float to signed integer.
    FpToSi,
    /// Unsigned integer to float.
    UiToFp,
    /// Signed integer to float.
    SiToFp,
    /// Pointer to integer.
    PtrToInt,
    /// Integer to pointer.
    IntToPtr,
    /// Bit reinterpretation.
    BitCast,
    /// Address-space cast.
    AddrSpaceCast,
}

/// Fast-math flag bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FastMathFlags {
    /// Allow reassociation.
    pub reassoc: bool,
    /// No NaN operands or results.
    pub nnan: bool,
    /// No infinity operands or results.
    pub ninf: bool,
    /// No signed zeros.
    pub nsz: bool,
    /// Allow reciprocal approximation.
    pub arcp: bool,
    /// Allow floating-point contraction.
    pub contract: bool,
    /// Allow approximate functions.
    pub afn: bool,
}

impl FastMathFlags {
    /// All flags set (`fast`).
    pub const FAST: Self = Self {
        reassoc: true,
        nnan: true,
        ninf: true,
        nsz: true,
        arcp: true,
        contract: true,
        afn: true,
    };

    /// Returns `true` when no flag is set.
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

/// Integer overflow flag bag (`nuw`/`nsw`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OverflowFlags {
    /// No unsigned wrap.
    pub nuw: bool,
    /// No signed wrap.
    pub nsw: bool,
}

/// Parameter, return, and function attribute, generic over the type
/// reference representation `Ty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute<Ty> {
    /// `alwaysinline`.
    AlwaysInline,
    /// `argmemonly`.
    ArgMemOnly,
    /// `builtin`.
    Builtin,
    /// `cold`.
    Cold,
    /// `convergent`.
    Convergent,
    /// `hot`.
    Hot,
    /// `immarg`.
    ImmArg,
    /// `inaccessiblememonly`.
    InaccessibleMemOnly,
    /// `inaccessiblemem_or_argmemonly`.
    InaccessibleMemOrArgMemOnly,
    /// `inlinehint`.
    InlineHint,
    /// `inreg`.
    InReg,
    /// `jumptable`.
    JumpTable,
    /// `minsize`.
    MinSize,
    /// `mustprogress`.
    MustProgress,
    /// `naked`.
    Naked,
    /// `nest`.
    Nest,
    /// `noalias`.
    NoAlias,
    /// `nobuiltin`.
    NoBuiltin,
    /// `nocapture`.
    NoCapture,
    /// `noduplicate`.
    NoDuplicate,
    /// `nofree`.
    NoFree,
    /// `noimplicitfloat`.
    NoImplicitFloat,
    /// `noinline`.
    NoInline,
    /// `nomerge`.
    NoMerge,
    /// `nonlazybind`.
    NonLazyBind,
    /// `nonnull`.
    NonNull,
    /// `norecurse`.
    NoRecurse,
    /// `noredzone`.
    NoRedZone,
    /// `noreturn`.
    NoReturn,
    /// `nosync`.
    NoSync,
    /// `noundef`.
    NoUndef,
    /// `nounwind`.
    NoUnwind,
    /// `optnone`.
    OptNone,
    /// `optsize`.
    OptSize,
    /// `readnone`.
    ReadNone,
    /// `readonly`.
    ReadOnly,
    /// `returned`.
    Returned,
    /// `returns_twice`.
    ReturnsTwice,
    /// `safestack`.
    SafeStack,
    /// `sanitize_address`.
    SanitizeAddress,
    /// `sanitize_memory`.
    SanitizeMemory,
    /// `sanitize_thread`.
    SanitizeThread,
    /// `signext`.
    SignExt,
    /// `speculatable`.
    Speculatable,
    /// `ssp`.
    StackProtect,
    /// `sspreq`.
    StackProtectReq,
    /// `sspstrong`.
    StackProtectStrong,
    /// `strictfp`.
    StrictFp,
    /// `swifterror`.
    SwiftError,
    /// `swiftself`.
    SwiftSelf,
    /// `uwtable`.
    UwTable,
    /// `willreturn`.
    WillReturn,
    /// `writeonly`.
    WriteOnly,
    /// `zeroext`.
    ZeroExt,
    /// `align <n>`.
    Align(u64),
    /// `alignstack(<n>)`.
    AlignStack(u64),
    /// `allocsize(<n>[, <m>])`.
    AllocSize {
        /// Argument index holding the element size.
        elem_size_arg: u32,
        /// Optional argument index holding the element count.
        num_elems_arg: Option<u32>,
    },
    /// `dereferenceable(<n>)`.
    Dereferenceable(u64),
    /// `dereferenceable_or_null(<n>)`.
    DereferenceableOrNull(u64),
    /// `byref(<ty>)`.
    ByRef(Ty),
    /// `byval(<ty>)`.
    ByVal(Ty),
    /// `elementtype(<ty>)`.
    ElementType(Ty),
    /// `inalloca(<ty>)`.
    InAlloca(Ty),
    /// `preallocated(<ty>)`.
    Preallocated(Ty),
    /// `sret(<ty>)`.
    SRet(Ty),
    /// String attribute (`"key"` or `"key"="value"`).
    String {
        /// Attribute key.
        key: String,
        /// Optional attribute value.
        value: Option<String>,
    },
}

impl<Ty> Attribute<Ty> {
    /// Maps the type payloads of this attribute through `f`, preserving
    /// every other field.
    pub fn map_type<U, E>(
        self,
        f: &mut impl FnMut(Ty) -> Result<U, E>,
    ) -> Result<Attribute<U>, E> {
        use Attribute::*;
        Ok(match self {
            ByRef(ty) => ByRef(f(ty)?),
            ByVal(ty) => ByVal(f(ty)?),
            ElementType(ty) => ElementType(f(ty)?),
            InAlloca(ty) => InAlloca(f(ty)?),
            Preallocated(ty) => Preallocated(f(ty)?),
            SRet(ty) => SRet(f(ty)?),
            AlwaysInline => AlwaysInline,
            ArgMemOnly => ArgMemOnly,
            Builtin => Builtin,
            Cold => Cold,
            Convergent => Convergent,
            Hot => Hot,
            ImmArg => ImmArg,
            InaccessibleMemOnly => InaccessibleMemOnly,
            InaccessibleMemOrArgMemOnly => InaccessibleMemOrArgMemOnly,
            InlineHint => InlineHint,
            InReg => InReg,
            JumpTable => JumpTable,
            MinSize => MinSize,
            MustProgress => MustProgress,
            Naked => Naked,
            Nest => Nest,
            NoAlias => NoAlias,
            NoBuiltin => NoBuiltin,
            NoCapture => NoCapture,
            NoDuplicate => NoDuplicate,
            NoFree => NoFree,
            NoImplicitFloat => NoImplicitFloat,
            NoInline => NoInline,
            NoMerge => NoMerge,
            NonLazyBind => NonLazyBind,
            NonNull => NonNull,
            NoRecurse => NoRecurse,
            NoRedZone => NoRedZone,
            NoReturn => NoReturn,
            NoSync => NoSync,
            NoUndef => NoUndef,
            NoUnwind => NoUnwind,
            OptNone => OptNone,
            OptSize => OptSize,
            ReadNone => ReadNone,
            ReadOnly => ReadOnly,
            Returned => Returned,
            ReturnsTwice => ReturnsTwice,
            SafeStack => SafeStack,
            SanitizeAddress => SanitizeAddress,
            SanitizeMemory => SanitizeMemory,
            SanitizeThread => SanitizeThread,
            SignExt => SignExt,
            Speculatable => Speculatable,
            StackProtect => StackProtect,
            StackProtectReq => StackProtectReq,
            StackProtectStrong => StackProtectStrong,
            StrictFp => StrictFp,
            SwiftError => SwiftError,
            SwiftSelf => SwiftSelf,
            UwTable => UwTable,
            WillReturn => WillReturn,
            WriteOnly => WriteOnly,
            ZeroExt => ZeroExt,
            Align(n) => Align(n),
            AlignStack(n) => AlignStack(n),
            AllocSize {
                elem_size_arg,
                num_elems_arg,
            } => AllocSize {
                elem_size_arg,
                num_elems_arg,
            },
            Dereferenceable(n) => Dereferenceable(n),
            DereferenceableOrNull(n) => DereferenceableOrNull(n),
            String { key, value } => String { key, value },
        })
    }
}
