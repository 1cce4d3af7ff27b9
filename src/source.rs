//! Reading definition blobs from a local checkout.
//!
//! The definitions live under `_data/` in the upstream repository, one YAML
//! file per kind. Everything under `_data/validation` is schema tooling, not
//! data, and is ignored. The kind name is the file stem, so
//! `_data/chanmodes.yaml` feeds the `chanmodes` pass.

use crate::decode::decode_document;
use crate::document::DataNode;
use crate::errors::SourceError;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const DATA_PREFIX: &str = "_data/";
const VALIDATION_PREFIX: &str = "_data/validation";

/// A raw file from the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// `/`-separated path relative to the checkout root.
    pub path: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Kind name derived from the file stem.
    pub fn kind(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        file.strip_suffix(".yaml").unwrap_or(file)
    }
}

/// Hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Whether a checkout-relative path is a definition file.
pub fn is_definition_path(path: &str) -> bool {
    path.starts_with(DATA_PREFIX) && !path.starts_with(VALIDATION_PREFIX) && path.ends_with(".yaml")
}

/// A local checkout of the definitions repository.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    /// Every definition blob, in path order. Symlinks are not followed.
    pub fn blobs(&self) -> Result<Vec<Blob>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::MissingRoot(self.root.display().to_string()));
        }

        let data = self.root.join("_data");
        if !data.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&data).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(rel) = relative_path(&self.root, entry.path()) {
                paths.push((rel, entry.into_path()));
            }
        }
        paths.sort();

        let mut blobs = Vec::new();
        for (rel, abs) in paths {
            if !is_definition_path(&rel) {
                continue;
            }
            let bytes = fs::read(&abs)?;
            debug!(path = %rel, kb = bytes.len() / 1024, "read blob");
            blobs.push(Blob { path: rel, bytes });
        }

        Ok(blobs)
    }

    /// Read and decode every definition blob, keyed by kind.
    ///
    /// A blob that fails to decode is logged and left out; it must not cost
    /// the other kinds their output.
    pub fn load(&self) -> Result<BTreeMap<String, DataNode>, SourceError> {
        info!(root = %self.root.display(), "loading definitions");

        let mut data = BTreeMap::new();
        for blob in self.blobs()? {
            let document = match decode_document(&blob.bytes) {
                Ok(document) => document,
                Err(err) => {
                    warn!(path = %blob.path, error = %err, "skipping undecodable blob");
                    continue;
                }
            };

            let kind = blob.kind().to_string();
            let hash = content_hash(&blob.bytes);
            let path = blob.path.clone();
            if let Some(replaced) = data.insert(kind.clone(), DataNode { path: blob.path, hash, document }) {
                warn!(%kind, replaced = %replaced.path, %path, "kind defined twice; keeping the later file");
            }
        }

        info!(kinds = data.len(), "loaded definitions");
        Ok(data)
    }
}

/// `/`-separated form of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/"))
}
