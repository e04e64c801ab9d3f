//! Identifier value types shared by the AST and IR layers.
//!
//! Diagnostics render identifiers in their textual assembly form (`@g`,
//! `%l`, `$c`, `!m`, `#7`), quoting names that fall outside the bare
//! identifier character set.

use std::fmt;

/// Global identifier (`@name` or `@42`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlobalIdent {
    /// Named global identifier.
    Name(String),
    /// Unnamed global identifier with an explicit numeric ID.
    Id(u64),
}

impl GlobalIdent {
    /// Creates a named global identifier.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for GlobalIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "@{}", quote(name)),
            Self::Id(id) => write!(f, "@{id}"),
        }
    }
}

/// Local identifier (`%name` or `%42`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalIdent {
    /// Named local identifier.
    Name(String),
    /// Unnamed local identifier with an explicit numeric ID.
    Num(u64),
}

impl LocalIdent {
    /// Creates a named local identifier.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl fmt::Display for LocalIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "%{}", quote(name)),
            Self::Num(id) => write!(f, "%{id}"),
        }
    }
}

/// Renders a comdat name in assembly form (`$name`).
pub fn comdat(name: &str) -> String {
    format!("${}", quote(name))
}

/// Renders a metadata name in assembly form (`!name`).
pub fn metadata_name(name: &str) -> String {
    format!("!{}", quote(name))
}

/// Renders a metadata ID in assembly form (`!42`).
pub fn metadata_id(id: u64) -> String {
    format!("!{id}")
}

/// Renders an attribute group ID in assembly form (`#42`).
pub fn attr_group_id(id: u64) -> String {
    format!("#{id}")
}

/// Renders a named type in assembly form (`%name`).
pub fn type_name(name: &str) -> String {
    format!("%{}", quote(name))
}

/// Quotes a name unless it is a bare identifier.
///
/// Bare identifiers match `[a-zA-Z$._][a-zA-Z$._0-9]*`; anything else is
/// wrapped in double quotes with `\xx` hex escapes for quotes, backslashes,
/// and non-printable bytes.
fn quote(name: &str) -> String {
    if is_bare_ident(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for byte in name.bytes() {
        match byte {
            b'"' | b'\\' => out.push_str(&format!("\\{byte:02X}")),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:02X}")),
        }
    }
    out.push('"');
    out
}

fn is_bare_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || matches!(first, '$' | '.' | '_')) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '$' | '.' | '_'))
}
