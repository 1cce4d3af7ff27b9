//! Turn IRC protocol definition records into deterministic generated constants.
//!
//! The upstream definitions (channel modes, channel types, membership
//! prefixes, numeric replies) are hand-maintained YAML. Names collide across
//! server implementations, fields go missing, and types drift. This crate
//! normalizes all of that into a stable list of symbols per kind:
//!
//! ```text
//! DataDir::load ─> BTreeMap<kind, DataNode>
//!                        │
//!                        v
//!                 Generator::generate ── SchemaRegistry ── schema/<kind>.rs
//!                        │                                 (sort, disambiguate,
//!                        v                                  build symbols)
//!                   Generation ─> Emitter / ReportRenderer
//! ```
//!
//! Output order depends only on the input records, never on hash order or
//! timing, so regenerating from unchanged data yields byte-identical files.
//!
//! # Example
//! ```
//! use ircdefs::{DataNode, Document, Generator, Record};
//! use std::collections::BTreeMap;
//!
//! let values = vec![Record::new().with("name", "Secret").with("prefixchar", '@')];
//! let input = BTreeMap::from([(
//!     "chantypes".to_string(),
//!     DataNode { document: Document::new(values), ..DataNode::default() },
//! )]);
//!
//! let generation = Generator::default().generate(&input).unwrap();
//! let symbol = &generation.kinds["chantypes"].symbols[0];
//! assert_eq!(symbol.ident, "Secret");
//! ```

#[macro_use]
mod macros;

pub mod decode;
pub mod document;
pub mod driver;
pub mod emit;
pub mod errors;
pub mod metrics;
pub mod normalize;
pub mod record;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod symbol;

pub use document::{DataNode, Document, Provenance};
pub use driver::{GeneratedKind, Generation, Generator, Options};
pub use errors::{DecodeError, GenerateError, SchemaError, SourceError};
pub use record::{Record, Value};
pub use schema::{Diagnostic, KindOutput, SchemaDef, SchemaRegistry};
pub use symbol::{Literal, Repr, Symbol, SymbolType};
