
// imports
use crate::config::{files_handling, Mode, Params};
use crate::decompose::Decomposition;
use crate::error::LsaError;
use crate::inference::Inference;
use crate::matrix::TermDocumentMatrix;
use crate::model::Model;
use crate::plot;
use crate::report;
use crate::vocab::{Tokenizer, Vocabulary, WhitespaceTokenizer};

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

pub struct Pipeline {}

impl Pipeline {

    // train: documents -> vocabulary -> term-document matrix -> truncated svd -> saved model
    // infer: saved model -> embedded documents -> ranked trained documents

    fn read_documents<T: Tokenizer>(file_path: &Path, tokenizer: &T) -> Result<Vec<Vec<String>>, LsaError> {

        // every line is a document, blank lines included
        let lines: Vec<String> = files_handling::read_input(file_path)?;
        Ok(lines.iter().map(|line| tokenizer.tokenize(line)).collect())
    }

    fn read_stopwords(stopwords: Option<&Path>) -> Result<HashSet<String>, LsaError> {
        match stopwords {
            Some(path) => files_handling::read_input(path),
            None => Ok(HashSet::new())
        }
    }

    /// Runs the stage selected by `params.mode`.
    pub fn run(params: &Params) -> Result<(), LsaError> {

        match params.mode {
            Mode::Train => {
                Pipeline::train(params)?;
                info!("train complete and model is saved");
            },
            Mode::Infer => {
                Pipeline::infer(params)?;
                info!("infer complete");
            }
        }
        Ok(())
    }

    pub fn train(params: &Params) -> Result<Model, LsaError> {
        Pipeline::train_with(params, &WhitespaceTokenizer)
    }

    /// Trains on `params.documents` and writes the model plus coordinate files.
    pub fn train_with<T: Tokenizer>(params: &Params, tokenizer: &T) -> Result<Model, LsaError> {

        let timer = Instant::now();
        let stopwords = Pipeline::read_stopwords(params.stopwords.as_deref())?;
        let documents = Pipeline::read_documents(&params.documents, tokenizer)?;
        info!(documents = documents.len(), stopwords = stopwords.len(), "loaded corpus");

        let vocab = Vocabulary::build(&documents, &stopwords);
        info!(keywords = vocab.len(), "built vocabulary");

        let x_mat = TermDocumentMatrix::build(&vocab, &documents)?;
        let truncated = Decomposition::run(&x_mat, params.dimension)?;
        let reconstruction_error = truncated.reconstruction_error(&x_mat)?;
        info!(
            singular_values = ?truncated.sigma_k.to_vec(),
            reconstruction_error,
            "decomposed {} x {} matrix to dimension {}", x_mat.nrows(), x_mat.ncols(), params.dimension
        );

        let model = Model::from_truncated(truncated, vocab)?;
        model.save(&params.model_dir)?;

        let output_dir = &params.output_dir;
        files_handling::save_output(output_dir, report::DOCUMENT_COORDINATES_FILE, &report::document_coordinates(&model))?;
        files_handling::save_output(output_dir, report::KEYWORD_COORDINATES_FILE, &report::keyword_coordinates(&model))?;
        if model.dimension() == 2 {
            plot::draw_2d(&model, &output_dir.join(plot::VISUALIZATION_FILE))
            .map_err(|e| LsaError::Plot(e.to_string()))?;
        } else {
            warn!(dimension = model.dimension(), "visualization is only drawn for dimension 2");
        }

        info!("finished training, took {} seconds ...", timer.elapsed().as_secs());
        Ok(model)
    }

    pub fn infer(params: &Params) -> Result<Vec<Vec<(usize, f64)>>, LsaError> {
        Pipeline::infer_with(params, &WhitespaceTokenizer)
    }

    /// Ranks every document of `params.documents` against the saved model and writes `infer.txt`.
    pub fn infer_with<T: Tokenizer>(params: &Params, tokenizer: &T) -> Result<Vec<Vec<(usize, f64)>>, LsaError> {

        let timer = Instant::now();
        let model = Model::load(&params.model_dir)?;
        let documents = Pipeline::read_documents(&params.documents, tokenizer)?;
        info!(documents = documents.len(), "loaded documents to infer");

        let ranked = Inference::new(&model).run_batch(&documents, params.top)?;

        let lines: Vec<String> = ranked.iter().map(|r| report::infer_line(r)).collect();
        files_handling::save_output(&params.output_dir, report::INFER_FILE, &lines)?;

        info!("finished inference, took {} seconds ...", timer.elapsed().as_secs());
        Ok(ranked)
    }

}
