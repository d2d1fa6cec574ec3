use std::path::PathBuf;
use ndarray_npy::{ReadNpyError, WriteNpyError};
use thiserror::Error;

/// Errors raised while training or querying a latent semantic model.
#[derive(Error, Debug)]
pub enum LsaError {
    #[error("no keyword occurs in at least 2 documents, vocabulary is empty")]
    EmptyVocabulary,

    #[error("requested dimension {requested} is outside of [1, {max}]")]
    Dimension { requested: usize, max: usize },

    #[error("model artifact {0} is missing")]
    MissingArtifact(PathBuf),

    #[error("shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// `line` is the 0 based index of the first keyword that is not greater than the one before it.
    #[error("keyword file is not strictly sorted at line {line}")]
    KeywordOrder { line: usize },

    #[error("document has no token from the model vocabulary")]
    EmptyDocument,

    /// `index` is `None` for the query coordinate, `Some(d)` for trained document d.
    #[error("zero norm embedding vector for {}", vector_name(.index))]
    DegenerateVector { index: Option<usize> },

    #[error("singular value decomposition failed: {0}")]
    Decomposition(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not draw visualization: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ReadNpy(#[from] ReadNpyError),

    #[error(transparent)]
    WriteNpy(#[from] WriteNpyError),
}

fn vector_name(index: &Option<usize>) -> String {
    match index {
        Some(d) => format!("doc{}", d),
        None => "query document".to_string(),
    }
}
