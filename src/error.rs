//! Translation error contracts.
//!
//! Every user-facing failure carries the pipeline component it was raised
//! in, a categorized kind, and an optional source span propagated from the
//! AST. Internal scaffold-invariant breakage is a translator bug and
//! panics instead of returning a value of this type.

use thiserror::Error;

use crate::source::Span;

/// Result alias for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Pipeline component an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Top-level entity indexing.
    Index,
    /// Type resolution.
    Types,
    /// Scaffolding of empty top-level entities.
    Scaffold,
    /// Body translation.
    Bodies,
    /// Use-list order and blockaddress fix-ups.
    Fixup,
    /// Module assembly.
    Assemble,
    /// Local-ID assignment.
    LocalIds,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Index => "indexer",
            Self::Types => "type resolver",
            Self::Scaffold => "scaffolder",
            Self::Bodies => "body translator",
            Self::Fixup => "fix-up pass",
            Self::Assemble => "assembler",
            Self::LocalIds => "local-ID assigner",
        };
        f.write_str(name)
    }
}

/// Identifier namespace named by duplicate/undefined errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentKind {
    /// Named type.
    Type,
    /// Comdat name.
    Comdat,
    /// Global, alias, ifunc, or function identifier.
    Global,
    /// Function-local value.
    Local,
    /// Basic block label.
    Block,
    /// Attribute group ID.
    AttrGroup,
    /// Named metadata name.
    MetadataName,
    /// Numbered metadata node.
    MetadataId,
}

impl std::fmt::Display for IdentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Type => "type",
            Self::Comdat => "comdat",
            Self::Global => "global",
            Self::Local => "local",
            Self::Block => "basic block",
            Self::AttrGroup => "attribute group",
            Self::MetadataName => "metadata name",
            Self::MetadataId => "metadata ID",
        };
        f.write_str(name)
    }
}

/// Stable translation error categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// AST shape the parser accepts but translation cannot interpret.
    #[error("inconsistent AST shape: {0}")]
    SyntaxInconsistency(String),
    /// Redefinition of an identifier within one namespace.
    #[error("duplicate {kind} identifier {name}")]
    DuplicateIdent {
        /// Identifier namespace.
        kind: IdentKind,
        /// Identifier in textual assembly form.
        name: String,
    },
    /// Reference to an identifier with no definition.
    #[error("undefined {kind} identifier {name}")]
    UndefinedIdent {
        /// Identifier namespace.
        kind: IdentKind,
        /// Identifier in textual assembly form.
        name: String,
    },
    /// Operand typing violation.
    #[error("type mismatch in {context}: expected {expected}, got {got}")]
    TypeMismatch {
        /// Operation or position being typed.
        context: String,
        /// Expected type in textual assembly form.
        expected: String,
        /// Actual type in textual assembly form.
        got: String,
    },
    /// Numeric local name out of sequence.
    #[error("invalid local ID in function {func}: expected %{expected}, got %{got}")]
    BadLocalId {
        /// Enclosing function in textual assembly form.
        func: String,
        /// Expected numeric ID.
        expected: u64,
        /// Numeric ID found.
        got: u64,
    },
    /// Structurally invalid constant.
    #[error("malformed constant: {0}")]
    MalformedConstant(String),
    /// Structurally invalid type.
    #[error("malformed type: {0}")]
    MalformedType(String),
    /// Structurally invalid metadata.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),
    /// A configured resource ceiling was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Translation error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component}: {kind}")]
pub struct TranslateError {
    /// Component the error originates from.
    pub component: Component,
    /// Error category and payload.
    pub kind: ErrorKind,
    /// Optional source span near the failure.
    pub span: Option<Span>,
}

impl TranslateError {
    /// Creates a translation error.
    pub fn new(component: Component, kind: ErrorKind, span: Option<Span>) -> Self {
        Self {
            component,
            kind,
            span,
        }
    }

    /// Creates a `SyntaxInconsistency` error.
    pub fn syntax(component: Component, message: impl Into<String>) -> Self {
        Self::new(component, ErrorKind::SyntaxInconsistency(message.into()), None)
    }

    /// Creates a `DuplicateIdent` error.
    pub fn duplicate_ident(
        component: Component,
        kind: IdentKind,
        name: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(
            component,
            ErrorKind::DuplicateIdent {
                kind,
                name: name.into(),
            },
            span,
        )
    }

    /// Creates an `UndefinedIdent` error.
    pub fn undefined_ident(
        component: Component,
        kind: IdentKind,
        name: impl Into<String>,
    ) -> Self {
        Self::new(
            component,
            ErrorKind::UndefinedIdent {
                kind,
                name: name.into(),
            },
            None,
        )
    }

    /// Creates a `TypeMismatch` error.
    pub fn type_mismatch(
        component: Component,
        context: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::new(
            component,
            ErrorKind::TypeMismatch {
                context: context.into(),
                expected: expected.into(),
                got: got.into(),
            },
            None,
        )
    }

    /// Creates a `BadLocalId` error.
    pub fn bad_local_id(func: impl Into<String>, expected: u64, got: u64) -> Self {
        Self::new(
            Component::LocalIds,
            ErrorKind::BadLocalId {
                func: func.into(),
                expected,
                got,
            },
            None,
        )
    }

    /// Creates a `MalformedConstant` error.
    pub fn malformed_constant(component: Component, message: impl Into<String>) -> Self {
        Self::new(component, ErrorKind::MalformedConstant(message.into()), None)
    }

    /// Creates a `MalformedType` error.
    pub fn malformed_type(message: impl Into<String>) -> Self {
        Self::new(Component::Types, ErrorKind::MalformedType(message.into()), None)
    }

    /// Creates a `MalformedMetadata` error.
    pub fn malformed_metadata(message: impl Into<String>) -> Self {
        Self::new(
            Component::Bodies,
            ErrorKind::MalformedMetadata(message.into()),
            None,
        )
    }

    /// Creates a `LimitExceeded` error.
    pub fn limit_exceeded(component: Component, message: impl Into<String>) -> Self {
        Self::new(component, ErrorKind::LimitExceeded(message.into()), None)
    }

    /// Attaches a source span when one is not already present.
    pub fn with_span(mut self, span: Option<Span>) -> Self {
        if self.span.is_none() {
            self.span = span;
        }
        self
    }
}
