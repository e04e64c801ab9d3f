//! Inline type syntax nodes.

use crate::ir::{AddrSpace, FloatKind};

/// One type as written in the input, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeAst {
    /// Reference to a named type (`%name`).
    Named(String),
    /// The `void` type.
    Void,
    /// The `label` type.
    Label,
    /// The `token` type.
    Token,
    /// The `metadata` type.
    Metadata,
    /// An opaque struct body (`opaque`).
    Opaque,
    /// Integer type (`iN`).
    Int {
        /// Bit width as written.
        bits: u32,
    },
    /// Floating-point type.
    Float(FloatKind),
    /// Pointer type (`<ty>*`, `<ty> addrspace(N)*`).
    Pointer {
        /// Pointee type.
        pointee: Box<TypeAst>,
        /// Pointer address space.
        addr_space: AddrSpace,
    },
    /// Vector type (`<N x ty>`, `<vscale x N x ty>`).
    Vector {
        /// Scalable vector flag.
        scalable: bool,
        /// Element count as written.
        len: u64,
        /// Element type.
        elem: Box<TypeAst>,
    },
    /// Array type (`[N x ty]`).
    Array {
        /// Element count as written.
        len: u64,
        /// Element type.
        elem: Box<TypeAst>,
    },
    /// Literal struct type (`{ ... }`, `<{ ... }>`).
    Struct {
        /// Packed layout flag.
        packed: bool,
        /// Field types in declaration order.
        fields: Vec<TypeAst>,
    },
    /// Function type (`<ret> (<params>)`).
    Func {
        /// Return type.
        ret: Box<TypeAst>,
        /// Parameter types in declaration order.
        params: Vec<TypeAst>,
        /// Variadic signature flag.
        variadic: bool,
    },
}

impl TypeAst {
    /// Shorthand for an integer type.
    pub const fn int(bits: u32) -> Self {
        Self::Int { bits }
    }

    /// Shorthand for a pointer type in the default address space.
    pub fn ptr(pointee: TypeAst) -> Self {
        Self::Pointer {
            pointee: Box::new(pointee),
            addr_space: AddrSpace::DEFAULT,
        }
    }
}
