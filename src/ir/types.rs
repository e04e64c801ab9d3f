//! IR type graph with structural interning and named-struct identity.
//!
//! Unnamed types are interned structurally, so structural equality between
//! unnamed types is `TypeId` equality. Named structs are allocated exactly
//! once per name; the allocated entry is the identity that recursive
//! references resolve through, and its body is filled in place when the
//! defining form is translated.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::ir::ids::TypeId;

/// Address space of a pointer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AddrSpace(pub u32);

impl AddrSpace {
    /// The default address space.
    pub const DEFAULT: Self = Self(0);

    /// Returns `true` for the default address space.
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// Floating-point type family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    /// 16-bit IEEE half.
    Half,
    /// 16-bit brain float.
    BFloat,
    /// 32-bit IEEE single.
    Float,
    /// 64-bit IEEE double.
    Double,
    /// 128-bit IEEE quad.
    Fp128,
    /// 80-bit x87 extended precision.
    X86Fp80,
    /// 128-bit PowerPC double-double.
    PpcFp128,
}

impl fmt::Display for FloatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Half => "half",
            Self::BFloat => "bfloat",
            Self::Float => "float",
            Self::Double => "double",
            Self::Fp128 => "fp128",
            Self::X86Fp80 => "x86_fp80",
            Self::PpcFp128 => "ppc_fp128",
        };
        f.write_str(name)
    }
}

/// Structural payload of one IR type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// The void type.
    Void,
    /// Basic block label type.
    Label,
    /// Exception-handling token type.
    Token,
    /// Metadata type.
    Metadata,
    /// Arbitrary-width integer type.
    Int {
        /// Bit width.
        bits: u32,
    },
    /// Floating-point type.
    Float(FloatKind),
    /// Typed pointer.
    Pointer {
        /// Pointee type.
        pointee: TypeId,
        /// Pointer address space.
        addr_space: AddrSpace,
    },
    /// Fixed or scalable vector.
    Vector {
        /// Scalable (`vscale`) vector flag.
        scalable: bool,
        /// Element count (minimum count when scalable).
        len: u64,
        /// Element type.
        elem: TypeId,
    },
    /// Array type.
    Array {
        /// Element count.
        len: u64,
        /// Element type.
        elem: TypeId,
    },
    /// Struct body (literal, or the filled body of a named struct).
    Struct {
        /// Packed layout flag.
        packed: bool,
        /// Field types in declaration order.
        fields: Vec<TypeId>,
    },
    /// Opaque struct body.
    Opaque,
    /// Function signature.
    Func {
        /// Return type.
        ret: TypeId,
        /// Parameter types in declaration order.
        params: Vec<TypeId>,
        /// Variadic signature flag.
        variadic: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct TypeEntry {
    kind: TypeKind,
    name: Option<String>,
}

/// Owning pool for all types of one module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypePool {
    entries: Vec<TypeEntry>,
    interned: HashMap<TypeKind, TypeId>,
    named: BTreeMap<String, TypeId>,
}

impl TypePool {
    /// Creates an empty type pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of types in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the pool holds no types.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interns an unnamed type, returning the canonical identifier for its
    /// structure.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = TypeId::from_index(self.entries.len());
        self.entries.push(TypeEntry {
            kind: kind.clone(),
            name: None,
        });
        self.interned.insert(kind, id);
        id
    }

    /// Returns the identifier for the named struct `name`, allocating an
    /// opaque placeholder on first use.
    ///
    /// The returned identifier is stable: every call with the same name
    /// yields the same identifier, which is what makes recursive and
    /// mutually recursive definitions resolve.
    pub fn declare_named(&mut self, name: &str) -> TypeId {
        if let Some(&id) = self.named.get(name) {
            return id;
        }
        let id = TypeId::from_index(self.entries.len());
        self.entries.push(TypeEntry {
            kind: TypeKind::Opaque,
            name: Some(name.to_string()),
        });
        self.named.insert(name.to_string(), id);
        id
    }

    /// Looks up a named struct without allocating.
    pub fn named(&self, name: &str) -> Option<TypeId> {
        self.named.get(name).copied()
    }

    /// Iterates named types in alphabetical order.
    pub fn named_iter(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.named.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Fills the body of a named struct placeholder in place.
    ///
    /// Re-entry with an identical body is a no-op, so recursion through the
    /// placeholder cannot corrupt an already-set definition.
    pub fn set_named_body(&mut self, id: TypeId, kind: TypeKind) {
        let entry = &mut self.entries[id.index()];
        debug_assert!(entry.name.is_some(), "body set on unnamed type");
        if entry.kind == kind {
            return;
        }
        entry.kind = kind;
    }

    /// Returns the structural payload of a type.
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.entries[id.index()].kind
    }

    /// Returns the name of a named struct, if any.
    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.entries[id.index()].name.as_deref()
    }

    /// Returns `true` when the type is `void`.
    pub fn is_void(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Void)
    }

    /// Returns `true` for integer types.
    pub fn is_int(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Int { .. })
    }

    /// Returns `true` for floating-point types.
    pub fn is_float(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Float(_))
    }

    /// Returns `true` for pointer types.
    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Pointer { .. })
    }

    /// Returns `true` for function types.
    pub fn is_func(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Func { .. })
    }

    /// Returns `true` for integer types and vectors of integers.
    pub fn is_int_or_int_vector(&self, id: TypeId) -> bool {
        match self.kind(id) {
            TypeKind::Int { .. } => true,
            TypeKind::Vector { elem, .. } => self.is_int(*elem),
            _ => false,
        }
    }

    /// Returns `true` for float types and vectors of floats.
    pub fn is_float_or_float_vector(&self, id: TypeId) -> bool {
        match self.kind(id) {
            TypeKind::Float(_) => true,
            TypeKind::Vector { elem, .. } => self.is_float(*elem),
            _ => false,
        }
    }

    /// Returns `true` for pointer types and vectors of pointers.
    pub fn is_pointer_or_pointer_vector(&self, id: TypeId) -> bool {
        match self.kind(id) {
            TypeKind::Pointer { .. } => true,
            TypeKind::Vector { elem, .. } => self.is_pointer(*elem),
            _ => false,
        }
    }

    /// Returns the pointee of a pointer type.
    pub fn pointee(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Pointer { pointee, .. } => Some(*pointee),
            _ => None,
        }
    }

    /// Returns the element type of a vector or array type.
    pub fn elem(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Vector { elem, .. } | TypeKind::Array { elem, .. } => Some(*elem),
            _ => None,
        }
    }

    /// Renders a type in its textual assembly form.
    pub fn display(&self, id: TypeId) -> DisplayType<'_> {
        DisplayType { pool: self, id }
    }
}

/// Borrowed display adapter for one type.
///
/// Named structs always render as `%name`, which both matches the assembly
/// syntax for references and keeps rendering of recursive types finite.
pub struct DisplayType<'a> {
    pool: &'a TypePool,
    id: TypeId,
}

impl fmt::Display for DisplayType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(f, self.pool, self.id)
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, pool: &TypePool, id: TypeId) -> fmt::Result {
    if let Some(name) = pool.name(id) {
        return f.write_str(&crate::ident::type_name(name));
    }
    match pool.kind(id) {
        TypeKind::Void => f.write_str("void"),
        TypeKind::Label => f.write_str("label"),
        TypeKind::Token => f.write_str("token"),
        TypeKind::Metadata => f.write_str("metadata"),
        TypeKind::Int { bits } => write!(f, "i{bits}"),
        TypeKind::Float(kind) => write!(f, "{kind}"),
        TypeKind::Pointer { pointee, addr_space } => {
            write_type(f, pool, *pointee)?;
            if !addr_space.is_default() {
                write!(f, " addrspace({})", addr_space.0)?;
            }
            f.write_str("*")
        }
        TypeKind::Vector {
            scalable,
            len,
            elem,
        } => {
            if *scalable {
                write!(f, "<vscale x {len} x ")?;
            } else {
                write!(f, "<{len} x ")?;
            }
            write_type(f, pool, *elem)?;
            f.write_str(">")
        }
        TypeKind::Array { len, elem } => {
            write!(f, "[{len} x ")?;
            write_type(f, pool, *elem)?;
            f.write_str("]")
        }
        TypeKind::Struct { packed, fields } => {
            if *packed {
                f.write_str("<{ ")?;
            } else {
                f.write_str("{ ")?;
            }
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_type(f, pool, *field)?;
            }
            if *packed {
                f.write_str(" }>")
            } else {
                f.write_str(" }")
            }
        }
        TypeKind::Opaque => f.write_str("opaque"),
        TypeKind::Func {
            ret,
            params,
            variadic,
        } => {
            write_type(f, pool, *ret)?;
            f.write_str(" (")?;
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_type(f, pool, *param)?;
            }
            if *variadic {
                if !params.is_empty() {
                    f.write_str(", ")?;
                }
                f.write_str("...")?;
            }
            f.write_str(")")
        }
    }
}
