//! Generation driver.
//!
//! The driver is the only part of the crate that deals with collaborators:
//! it takes decoded [`DataNode`]s, runs every kind through the
//! [`SchemaRegistry`], and hands the results to an [`Emitter`] and a
//! [`ReportRenderer`].
//!
//! ```text
//! BTreeMap<kind, DataNode>
//!     │  for each kind (name order)
//!     v
//! SchemaRegistry::process ──┬─ Err           -> log, drop kind
//!                           ├─ Ok(empty)     -> skip silently
//!                           └─ Ok(symbols)   -> GeneratedKind
//!     │
//!     v
//! no GeneratedKind at all?  -> GenerateError::EmptyResultSet
//!     │
//!     v
//! Emitter::emit (per kind) -> ReportRenderer::render (provenance map)
//! ```
//!
//! A failing kind never takes the run down with it; only an empty result set
//! or a collaborator I/O error does.

use crate::document::{DataNode, Provenance};
use crate::emit::{Emitter, ReportRenderer};
use crate::errors::{GenerateError, SchemaError};
use crate::metrics::{KindMetrics, Outcome, RunMetrics};
use crate::schema::{Diagnostic, SchemaRegistry};
use crate::symbol::{Symbol, SymbolType};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

pub const DEFAULT_REPO: &str = "https://github.com/ircdocs/irc-defs.git";
pub const DEFAULT_BRANCH: &str = "gh-pages";

/// Run-wide settings. Only used to fill in [`Provenance`].
#[derive(Debug, Clone)]
pub struct Options {
    /// URL of the definitions repository.
    pub repo: String,
    /// Branch the definitions were taken from.
    pub branch: String,
}

impl Default for Options {
    fn default() -> Self {
        Options { repo: DEFAULT_REPO.to_string(), branch: DEFAULT_BRANCH.to_string() }
    }
}

/// Everything an emitter needs for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedKind {
    pub kind: String,
    pub provenance: Provenance,
    pub types: Vec<SymbolType>,
    /// In emission order, identifiers unique.
    pub symbols: Vec<Symbol>,
}

/// Outcome of [`Generator::generate`].
#[derive(Debug)]
pub struct Generation {
    /// The result set: kinds that produced symbols.
    pub kinds: BTreeMap<String, GeneratedKind>,
    /// Recognized kinds with nothing to emit.
    pub skipped: Vec<String>,
    /// Kinds dropped because their pass failed.
    pub failed: Vec<(String, SchemaError)>,
    /// Non-fatal findings, tagged with their kind.
    pub diagnostics: Vec<(String, Diagnostic)>,
    pub metrics: RunMetrics,
}

impl Generation {
    /// Kind name → provenance for every kind in the result set.
    pub fn provenance(&self) -> BTreeMap<String, Provenance> {
        self.kinds.iter().map(|(name, kind)| (name.clone(), kind.provenance.clone())).collect()
    }
}

/// Runs schema passes over a set of decoded definition files.
#[derive(Debug, Clone)]
pub struct Generator {
    registry: SchemaRegistry,
    options: Options,
    dispatch: Option<tracing::Dispatch>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(SchemaRegistry::builtin(), Options::default())
    }
}

impl Generator {
    pub fn new(registry: SchemaRegistry, options: Options) -> Self {
        Generator { registry, options, dispatch: None }
    }

    /// Send this generator's diagnostics to `dispatch` instead of the
    /// ambient default subscriber. Scoped to calls on this generator.
    pub fn with_dispatch(mut self, dispatch: tracing::Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Process every kind in `input`.
    pub fn generate(&self, input: &BTreeMap<String, DataNode>) -> Result<Generation, GenerateError> {
        self.scoped(|| self.generate_inner(input))
    }

    /// [`generate`](Self::generate), then emit each kind and render the report.
    pub fn run(
        &self,
        input: &BTreeMap<String, DataNode>,
        emitter: &mut dyn Emitter,
        renderer: Option<&mut dyn ReportRenderer>,
    ) -> Result<Generation, GenerateError> {
        let generation = self.generate(input)?;

        self.scoped(|| -> Result<(), GenerateError> {
            for (name, kind) in &generation.kinds {
                emitter.emit(kind).map_err(|source| GenerateError::Emit { kind: name.clone(), source })?;
                debug!(kind = %name, symbols = kind.symbols.len(), "emitted");
            }

            if let Some(renderer) = renderer {
                renderer.render(&generation.provenance()).map_err(GenerateError::Render)?;
                info!("rendered report");
            }

            Ok(())
        })?;

        Ok(generation)
    }

    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn generate_inner(&self, input: &BTreeMap<String, DataNode>) -> Result<Generation, GenerateError> {
        let started = Instant::now();
        info!(kinds = input.len(), "beginning generation");

        let mut generation = Generation {
            kinds: BTreeMap::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            diagnostics: Vec::new(),
            metrics: RunMetrics::default(),
        };

        for (name, node) in input {
            let span = info_span!("kind", kind = %name);
            let _enter = span.enter();

            let pass_started = Instant::now();
            let records = node.document.values.len();
            debug!(records, path = %node.path, "processing");

            let output = match self.registry.process(name, &node.document) {
                Ok(output) => output,
                Err(err) => {
                    warn!(error = %err, "dropping kind");
                    generation.metrics.kinds.insert(name.clone(), KindMetrics::failed(pass_started.elapsed(), records));
                    generation.failed.push((name.clone(), err));
                    continue;
                }
            };

            for diagnostic in &output.diagnostics {
                warn!("{diagnostic}");
            }

            let dropped = output.diagnostics.iter().filter(|d| d.drops_symbol()).count();
            let outcome = if output.is_empty() { Outcome::Skipped } else { Outcome::Generated };
            generation.metrics.kinds.insert(
                name.clone(),
                KindMetrics {
                    outcome,
                    duration: pass_started.elapsed(),
                    records: output.records,
                    symbols: output.symbols.len(),
                    disambiguated: output.disambiguated,
                    dropped,
                },
            );
            generation.diagnostics.extend(output.diagnostics.into_iter().map(|d| (name.clone(), d)));

            if outcome == Outcome::Skipped {
                debug!("nothing to emit");
                generation.skipped.push(name.clone());
                continue;
            }

            let provenance = Provenance {
                path: node.path.clone(),
                hash: node.hash.clone(),
                page_name: node.document.page_name.clone(),
                revision: node.document.revision.clone(),
                repo: self.options.repo.clone(),
                branch: self.options.branch.clone(),
            };

            generation.kinds.insert(
                name.clone(),
                GeneratedKind { kind: name.clone(), provenance, types: output.types, symbols: output.symbols },
            );
        }

        generation.metrics.total = started.elapsed();
        info!(generated = generation.kinds.len(), failed = generation.failed.len(), "generation finished");

        if generation.kinds.is_empty() {
            return Err(GenerateError::EmptyResultSet);
        }

        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::record::Record;
    use crate::symbol::Literal;
    use pretty_assertions::assert_eq;
    use std::io;

    fn node(kind: &str, values: Vec<Record>) -> DataNode {
        DataNode {
            path: format!("_data/{kind}.yaml"),
            hash: "abc123".to_string(),
            document: Document {
                kind: kind.to_string(),
                revision: "1.0.0".to_string(),
                page_name: format!("{kind} page"),
                format: Record::new(),
                values,
            },
        }
    }

    fn input(nodes: Vec<DataNode>) -> BTreeMap<String, DataNode> {
        nodes.into_iter().map(|n| (n.document.kind.clone(), n)).collect()
    }

    #[derive(Default)]
    struct Recorder {
        emitted: Vec<String>,
        rendered: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl Emitter for Recorder {
        fn emit(&mut self, kind: &GeneratedKind) -> io::Result<()> {
            if self.fail_on == Some(kind.kind.as_str()) {
                return Err(io::Error::other("disk full"));
            }
            self.emitted.push(kind.kind.clone());
            Ok(())
        }
    }

    impl ReportRenderer for Recorder {
        fn render(&mut self, provenance: &BTreeMap<String, Provenance>) -> io::Result<()> {
            self.rendered = provenance.keys().cloned().collect();
            Ok(())
        }
    }

    #[test]
    fn failing_kind_is_excluded_and_others_succeed() {
        let input = input(vec![
            node("chanmembers", vec![Record::new().with("prefixchar", "@")]),
            node("chantypes", vec![Record::new().with("name", "standard").with("prefixchar", "#")]),
            node("isupport", vec![Record::new().with("name", "NETWORK")]),
        ]);

        let generation = Generator::default().generate(&input).unwrap();

        assert_eq!(generation.kinds.keys().collect::<Vec<_>>(), vec!["chantypes"]);
        let failed: Vec<_> = generation.failed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(failed, vec!["chanmembers", "isupport"]);
        assert!(matches!(generation.failed[0].1, SchemaError::MissingRequiredField { .. }));
        assert!(matches!(generation.failed[1].1, SchemaError::UnrecognizedKind(_)));
        assert_eq!(generation.metrics.count(Outcome::Failed), 2);
        assert_eq!(generation.metrics.count(Outcome::Generated), 1);
    }

    #[test]
    fn empty_input_is_fatal() {
        let err = Generator::default().generate(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResultSet));
    }

    #[test]
    fn only_failures_is_fatal() {
        let input = input(vec![node("chantypes", vec![Record::new()])]);
        assert!(matches!(Generator::default().generate(&input), Err(GenerateError::EmptyResultSet)));
    }

    #[test]
    fn empty_kind_is_skipped_silently() {
        let input = input(vec![
            node("chanmodes", Vec::new()),
            node("numerics", vec![Record::new().with("name", "RPL_WELCOME").with("numeric", "001")]),
        ]);

        let generation = Generator::default().generate(&input).unwrap();
        assert_eq!(generation.skipped, vec!["chanmodes".to_string()]);
        assert!(generation.failed.is_empty());
        assert_eq!(generation.kinds["numerics"].symbols[0].value, Literal::Int(1));
    }

    #[test]
    fn provenance_carries_options() {
        let input = input(vec![node("chantypes", vec![Record::new().with("name", "local").with("prefixchar", "&")])]);
        let options = Options { repo: "https://example.org/defs.git".into(), branch: "main".into() };

        let generation = Generator::new(SchemaRegistry::builtin(), options).generate(&input).unwrap();
        let provenance = &generation.provenance()["chantypes"];

        assert_eq!(provenance.path, "_data/chantypes.yaml");
        assert_eq!(provenance.hash, "abc123");
        assert_eq!(provenance.page_name, "chantypes page");
        assert_eq!(provenance.revision, "1.0.0");
        assert_eq!(provenance.blob_url(), "https://example.org/defs/blob/main/_data/chantypes.yaml");
    }

    #[test]
    fn run_emits_in_kind_order_then_renders() {
        let input = input(vec![
            node("numerics", vec![Record::new().with("name", "RPL_WELCOME").with("numeric", "001")]),
            node("chantypes", vec![Record::new().with("name", "standard").with("prefixchar", "#")]),
        ]);

        let mut emitter = Recorder::default();
        let mut renderer = Recorder::default();
        Generator::default().run(&input, &mut emitter, Some(&mut renderer)).unwrap();

        assert_eq!(emitter.emitted, vec!["chantypes", "numerics"]);
        assert_eq!(renderer.rendered, vec!["chantypes", "numerics"]);
    }

    #[test]
    fn emitter_failure_is_fatal() {
        let input = input(vec![node("chantypes", vec![Record::new().with("name", "standard").with("prefixchar", "#")])]);

        let mut emitter = Recorder { fail_on: Some("chantypes"), ..Recorder::default() };
        let err = Generator::default().run(&input, &mut emitter, None).unwrap_err();
        assert!(matches!(err, GenerateError::Emit { ref kind, .. } if kind == "chantypes"));
    }

    #[test]
    fn generation_is_deterministic() {
        let records = vec![
            Record::new().with("name", "b").with("char", "b").with("origin", "ircv3").with("conflict", true),
            Record::new().with("name", "b").with("char", "b").with("origin", "RFC 1459"),
            Record::new().with("name", "a").with("char", "a"),
        ];
        let input = input(vec![node("chanmodes", records)]);
        let generator = Generator::default();

        let first = generator.generate(&input).unwrap();
        let second = generator.generate(&input).unwrap();
        assert_eq!(first.kinds, second.kinds);
    }
}
