
mod config;
mod decompose;
mod error;
mod inference;
mod matrix;
mod model;
mod pipeline;
mod plot;
mod report;
mod vocab;

pub use config::{files_handling, Cli, Config, Mode, Params};
pub use decompose::{Decomposition, Truncated};
pub use error::LsaError;
pub use inference::{angular_distance, Inference};
pub use matrix::TermDocumentMatrix;
pub use model::Model;
pub use pipeline::Pipeline;
pub use plot::draw_2d;
pub use report::{document_coordinates, infer_line, keyword_coordinates};
pub use vocab::{is_candidate, normalize, Tokenizer, Vocabulary, WhitespaceTokenizer};
