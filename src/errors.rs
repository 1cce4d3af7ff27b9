use std::io;

use thiserror::Error;

/// Failure of a single schema pass. Never fatal to a run: the driver drops
/// the kind and carries on with the rest.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{kind}: record #{index} is missing required field `{field}`")]
    MissingRequiredField { kind: String, field: &'static str, index: usize },
    #[error("unrecognized schema kind '{0}'")]
    UnrecognizedKind(String),
}

/// Errors that abort a whole generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no schema kind produced any output")]
    EmptyResultSet,
    #[error("failed to emit '{kind}': {source}")]
    Emit {
        kind: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to render report: {0}")]
    Render(#[source] io::Error),
}

/// Errors from decoding a definition blob.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors from reading the definitions checkout.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("data directory '{0}' does not exist")]
    MissingRoot(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
