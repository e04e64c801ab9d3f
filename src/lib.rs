//! Library entrypoint for `ingot`.
//!
//! `ingot` turns parsed LLVM-style assembly trees into fully linked
//! in-memory IR modules: identifiers are resolved across types, globals,
//! locals, attribute groups, metadata, and comdats, forward references are
//! anchored through scaffolded entities, and the resulting module carries
//! a deterministic per-kind entity order.

pub mod ast;
pub mod attrs;
pub mod error;
pub mod ident;
pub mod ir;
pub mod source;
pub mod translate;

pub use error::{Component, ErrorKind, IdentKind, Result, TranslateError};
pub use translate::{translate, translate_with_options, TranslateOptions};
