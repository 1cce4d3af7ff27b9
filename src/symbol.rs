//! Generated symbols: the (identifier, type, value, documentation) tuples
//! handed to an emitter.

use std::fmt;

/// Primitive representation behind a declared value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    /// A single-character code (mode letters, prefix characters).
    Char,
    /// An integer code (numeric replies).
    Int,
}

/// Static declaration of a value type a schema exports, e.g. `ChanMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: &'static str,
    pub repr: Repr,
    /// Key in the definition file's `format` block that describes this type.
    pub format_field: &'static str,
}

/// A declared value type together with its resolved documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolType {
    pub name: &'static str,
    pub repr: Repr,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    Char(char),
    Int(i64),
}

impl Literal {
    pub fn repr(&self) -> Repr {
        match self {
            Literal::Char(_) => Repr::Char,
            Literal::Int(_) => Repr::Int,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Char(c) => write!(f, "{c:?}"),
            Literal::Int(n) => write!(f, "{n}"),
        }
    }
}

/// One generated constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub ident: String,
    /// Name of the [`SymbolType`] this constant is declared as.
    pub ty: &'static str,
    pub value: Literal,
    /// Multi-line documentation, lines separated by `\n`.
    pub doc: String,
}

impl Symbol {
    pub fn new(ident: impl Into<String>, ty: &'static str, value: Literal, doc: impl Into<String>) -> Self {
        Symbol { ident: ident.into(), ty, value, doc: doc.into() }
    }
}

/// Accumulates documentation lines for a [`Symbol`].
#[derive(Debug, Default)]
pub struct DocBuilder {
    lines: Vec<String>,
}

impl DocBuilder {
    pub fn new(headline: impl Into<String>) -> Self {
        DocBuilder { lines: vec![headline.into()] }
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append `line` only when `cond` holds.
    pub fn line_if(self, cond: bool, line: impl FnOnce() -> String) -> Self {
        if cond { self.line(line()) } else { self }
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}
