//! Output collaborators: turning generated kinds into files.
//!
//! The driver only knows the two traits. The crate ships one implementation
//! of each: [`RustEmitter`] writes one Rust module per kind and
//! [`MarkdownReport`] writes a summary `README.md` next to them.

use crate::document::Provenance;
use crate::driver::GeneratedKind;
use crate::normalize::escape_keyword;
use crate::symbol::{Repr, SymbolType};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives each generated kind, in kind-name order.
pub trait Emitter {
    fn emit(&mut self, kind: &GeneratedKind) -> io::Result<()>;
}

/// Receives the provenance of every generated kind once emission is done.
pub trait ReportRenderer {
    fn render(&mut self, provenance: &BTreeMap<String, Provenance>) -> io::Result<()>;
}

/// Writes `<out_dir>/<kind>.rs` for every kind.
#[derive(Debug, Clone)]
pub struct RustEmitter {
    out_dir: PathBuf,
}

impl RustEmitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        RustEmitter { out_dir: out_dir.into() }
    }

    pub fn path_for(&self, kind: &str) -> PathBuf {
        self.out_dir.join(format!("{kind}.rs"))
    }
}

impl Emitter for RustEmitter {
    fn emit(&mut self, kind: &GeneratedKind) -> io::Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.path_for(&kind.kind);
        fs::write(&path, render_module(kind))?;
        info!(path = %path.display(), symbols = kind.symbols.len(), "wrote module");
        Ok(())
    }
}

fn rust_type(repr: Repr) -> &'static str {
    match repr {
        Repr::Char => "char",
        Repr::Int => "i64",
    }
}

fn push_doc(out: &mut String, doc: &str) {
    for line in doc.lines() {
        if line.is_empty() {
            out.push_str("///\n");
        } else {
            let _ = writeln!(out, "/// {line}");
        }
    }
}

fn push_type(out: &mut String, ty: &SymbolType) {
    if let Some(doc) = &ty.doc {
        push_doc(out, doc);
    }
    let _ = writeln!(out, "pub type {} = {};", ty.name, rust_type(ty.repr));
}

/// Render the full source of one generated module.
pub fn render_module(kind: &GeneratedKind) -> String {
    let p = &kind.provenance;
    let mut out = String::new();

    let _ = writeln!(out, "//! Constants and types based on IRC definitions located here:");
    let _ = writeln!(out, "//!   [{}]", p.page_name);
    let _ = writeln!(out, "//!   - https://defs.ircdocs.horse/defs/{}.html", kind.kind);
    let _ = writeln!(out, "//!   - {}", p.blob_url());
    out.push_str("//!\n");
    let _ = writeln!(out, "//!   Data revision: v{}", p.revision);
    out.push_str("//!\n//! Generated file, do not edit.\n\n");
    out.push_str("#![allow(non_upper_case_globals)]\n");

    for ty in &kind.types {
        out.push('\n');
        push_type(&mut out, ty);
    }

    out.push('\n');
    for symbol in &kind.symbols {
        push_doc(&mut out, &symbol.doc);
        let _ = writeln!(out, "pub const {}: {} = {};", escape_keyword(&symbol.ident), symbol.ty, symbol.value);
    }

    out
}

/// Writes a Markdown summary of every generated kind.
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MarkdownReport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportRenderer for MarkdownReport {
    fn render(&mut self, provenance: &BTreeMap<String, Provenance>) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render_report(provenance))?;
        info!(path = %self.path.display(), kinds = provenance.len(), "wrote report");
        Ok(())
    }
}

/// Render the summary document.
pub fn render_report(provenance: &BTreeMap<String, Provenance>) -> String {
    let mut out = String::from("# IRC definitions\n\n");

    if let Some(first) = provenance.values().next() {
        let repo = first.repo.trim_end_matches(".git");
        let _ = writeln!(out, "Generated from [{repo}]({repo}) (branch `{}`).\n", first.branch);
    }

    out.push_str("| Kind | Page | Revision | Source |\n");
    out.push_str("|------|------|----------|--------|\n");
    for (kind, p) in provenance {
        let _ = writeln!(
            out,
            "| [`{kind}`]({kind}.rs) | {} | v{} | [`{}`]({}) |",
            p.page_name,
            p.revision,
            p.path,
            p.blob_url()
        );
    }

    out
}
