//! Schema registry and per-kind processing.
//!
//! Each definition file has a *kind* (`chanmodes`, `numerics`, ...). The
//! registry maps a kind name to a [`SchemaDef`]: the value types the kind
//! exports plus a processing routine. Every routine is a single stateless pass:
//!
//! ```text
//! records ── validate ── sort ── disambiguate ── build symbols ──┐
//!            (required    (resolve.rs)  (normalize.rs)            │
//!             fields)                                             v
//!                                         SchemaDef::process: dedup + checks
//!                                                                 │
//!                                                                 v
//!                                                            KindOutput
//! ```
//!
//! Routines only see their own records and never log; anything worth telling
//! the user is returned as a [`Diagnostic`] and the driver decides what to do
//! with it.
//!
//! ## Adding a kind
//!
//! - Add `schema/<kind>.rs` with a `SCHEMA` constant built by `schema!`.
//! - Register it in [`SchemaRegistry::builtin`].
//! - Scenario tests go in `schema/tests.rs`.

#[path = "schema/chanmembers.rs"]
mod chanmembers;
#[path = "schema/chanmodes.rs"]
mod chanmodes;
#[path = "schema/chantypes.rs"]
mod chantypes;
#[path = "schema/numerics.rs"]
mod numerics;
#[cfg(test)]
#[path = "schema/tests.rs"]
mod tests;

use crate::document::Document;
use crate::errors::SchemaError;
use crate::normalize::is_emittable;
use crate::record::Record;
use crate::resolve::dedup_symbols;
use crate::symbol::{Literal, Symbol, SymbolType, TypeDecl};
use std::collections::BTreeMap;
use std::fmt;

/// Processing routine for one kind.
pub type ProcessFn = fn(&mut Pass<'_>, &[Record]) -> Result<(), SchemaError>;

/// Registry entry for one kind.
#[derive(Clone, Copy)]
pub struct SchemaDef {
    pub kind: &'static str,
    pub types: &'static [TypeDecl],
    pub process: ProcessFn,
}

impl fmt::Debug for SchemaDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDef")
            .field("kind", &self.kind)
            .field("types", &self.types)
            .field("process", &"<function>")
            .finish()
    }
}

/// Something a pass noticed that does not invalidate the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A later symbol reused an identifier and was dropped.
    DuplicateIdentifier { ident: String, value: Literal },
    /// A record produced no identifier and was dropped.
    EmptyIdentifier { value: Literal },
    /// The identifier cannot be written as a Rust item name; the symbol was dropped.
    InvalidIdentifier { ident: String, value: Literal },
    /// The literal field was absent or unusable; the fallback value was emitted.
    FallbackValue { ident: String },
}

impl Diagnostic {
    /// Whether the diagnostic cost a symbol.
    pub fn drops_symbol(&self) -> bool {
        !matches!(self, Diagnostic::FallbackValue { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateIdentifier { ident, value } => {
                write!(f, "dropped duplicate identifier `{ident}` (value {value})")
            }
            Diagnostic::EmptyIdentifier { value } => write!(f, "dropped record with empty name (value {value})"),
            Diagnostic::InvalidIdentifier { ident, value } => {
                write!(f, "dropped `{ident}`: not a valid Rust identifier (value {value})")
            }
            Diagnostic::FallbackValue { ident } => write!(f, "`{ident}` has no usable value; emitted fallback"),
        }
    }
}

/// Mutable state of one running pass. Routines push symbols in output order.
#[derive(Debug)]
pub struct Pass<'a> {
    kind: &'a str,
    symbols: Vec<Symbol>,
    disambiguated: usize,
}

impl<'a> Pass<'a> {
    fn new(kind: &'a str) -> Self {
        Pass { kind, symbols: Vec::new(), disambiguated: 0 }
    }

    pub fn kind(&self) -> &str {
        self.kind
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Push a symbol whose identifier was suffixed to resolve a collision.
    pub fn push_disambiguated(&mut self, symbol: Symbol) {
        self.disambiguated += 1;
        self.symbols.push(symbol);
    }

    /// Fail the pass unless every record carries `field`.
    pub fn require(&self, records: &[Record], field: &'static str) -> Result<(), SchemaError> {
        match records.iter().position(|r| !r.contains(field)) {
            Some(index) => Err(SchemaError::MissingRequiredField { kind: self.kind.to_string(), field, index }),
            None => Ok(()),
        }
    }
}

/// Result of a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindOutput {
    pub types: Vec<SymbolType>,
    /// Symbols in emission order; identifiers are unique.
    pub symbols: Vec<Symbol>,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of input records.
    pub records: usize,
    /// Number of symbols that received an origin suffix.
    pub disambiguated: usize,
}

impl KindOutput {
    /// A recognized kind with nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SchemaDef {
    /// Run this kind's pass over `doc`.
    pub fn process(&self, doc: &Document) -> Result<KindOutput, SchemaError> {
        let types = self.types.iter().map(|decl| resolve_type(decl, &doc.format)).collect();

        if doc.values.is_empty() {
            return Ok(KindOutput { types, ..KindOutput::default() });
        }

        let mut pass = Pass::new(self.kind);
        (self.process)(&mut pass, &doc.values)?;

        debug_assert!(
            pass.symbols.iter().all(|s| self.types.iter().any(|t| t.name == s.ty && t.repr == s.value.repr())),
            "{}: symbol declared with an unknown type",
            self.kind
        );

        let mut diagnostics = Vec::new();
        let (named, unnamed): (Vec<Symbol>, Vec<Symbol>) = pass.symbols.into_iter().partition(|s| !s.ident.is_empty());
        diagnostics.extend(unnamed.into_iter().map(|s| Diagnostic::EmptyIdentifier { value: s.value }));

        let (named, invalid): (Vec<Symbol>, Vec<Symbol>) = named.into_iter().partition(|s| is_emittable(&s.ident));
        diagnostics
            .extend(invalid.into_iter().map(|s| Diagnostic::InvalidIdentifier { ident: s.ident, value: s.value }));

        let (symbols, dropped) = dedup_symbols(named);
        diagnostics
            .extend(dropped.into_iter().map(|s| Diagnostic::DuplicateIdentifier { ident: s.ident, value: s.value }));

        diagnostics.extend(
            symbols
                .iter()
                .filter(|s| matches!(s.value, Literal::Char('\0') | Literal::Int(-1)))
                .map(|s| Diagnostic::FallbackValue { ident: s.ident.clone() }),
        );

        Ok(KindOutput { types, symbols, diagnostics, records: doc.values.len(), disambiguated: pass.disambiguated })
    }
}

fn resolve_type(decl: &TypeDecl, format: &Record) -> SymbolType {
    let doc = match format.get_str(decl.format_field) {
        "" => None,
        desc => Some(format!("{} is the {desc}.", decl.name)),
    };
    SymbolType { name: decl.name, repr: decl.repr, doc }
}

/// Kind name → [`SchemaDef`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    defs: BTreeMap<&'static str, SchemaDef>,
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every kind this crate knows how to process.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for def in [chanmembers::SCHEMA, chanmodes::SCHEMA, chantypes::SCHEMA, numerics::SCHEMA] {
            registry.register(def);
        }
        registry
    }

    /// Add `def`, returning the definition it replaced, if any.
    pub fn register(&mut self, def: SchemaDef) -> Option<SchemaDef> {
        self.defs.insert(def.kind, def)
    }

    pub fn get(&self, kind: &str) -> Option<&SchemaDef> {
        self.defs.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.keys().copied()
    }

    /// Dispatch `doc` to the routine registered for `kind`.
    pub fn process(&self, kind: &str, doc: &Document) -> Result<KindOutput, SchemaError> {
        self.get(kind).ok_or_else(|| SchemaError::UnrecognizedKind(kind.to_string()))?.process(doc)
    }
}
