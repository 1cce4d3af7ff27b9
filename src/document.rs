//! Decoded definition files and their provenance.

use crate::record::Record;

/// One decoded definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `file_info.type`.
    pub kind: String,
    /// `file_info.revision`.
    pub revision: String,
    /// `page.name`: the human title of the definitions page.
    pub page_name: String,
    /// Display metadata (`format` block). Only used to document declared types.
    pub format: Record,
    pub values: Vec<Record>,
}

impl Document {
    pub fn new(values: Vec<Record>) -> Self {
        Document { values, ..Document::default() }
    }
}

/// A decoded file plus where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataNode {
    /// Path of the blob inside the definitions repository, e.g. `_data/chanmodes.yaml`.
    pub path: String,
    /// Hex content hash of the blob.
    pub hash: String,
    pub document: Document,
}

/// Where a generated kind came from, passed through to emitters and reports
/// without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub path: String,
    pub hash: String,
    pub page_name: String,
    pub revision: String,
    pub repo: String,
    pub branch: String,
}

impl Provenance {
    /// Browsable link to the source blob (`<repo>/blob/<branch>/<path>`).
    pub fn blob_url(&self) -> String {
        format!("{}/blob/{}/{}", self.repo.trim_end_matches(".git"), self.branch, self.path)
    }
}
