
// imports
use crate::config::files_handling::{read_input, save_output};
use crate::decompose::Truncated;
use crate::error::LsaError;
use crate::vocab::Vocabulary;

use ndarray::{Array2, ArrayView1, Axis};
use std::path::Path;
use tracing::info;

pub const TERMS_FILE: &str = "_U.npy";
pub const DOCUMENTS_FILE: &str = "_V.npy";
pub const KEYWORDS_FILE: &str = "keywords.txt";


/// The persisted unit of a training run: keyword and document embeddings plus the
/// vocabulary they are indexed by. Read only once built or loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    u_k: Array2<f64>, // (M, k)
    v_k: Array2<f64>, // (k, N)
    vocab: Vocabulary,
}

impl Model {

    /// Validates that the factors and the vocabulary agree on M and k.
    pub fn new(u_k: Array2<f64>, v_k: Array2<f64>, vocab: Vocabulary) -> Result<Model, LsaError> {

        if vocab.len() != u_k.nrows() {
            return Err(LsaError::ShapeMismatch { what: "keyword count vs rows of U", expected: u_k.nrows(), found: vocab.len() });
        }
        if u_k.ncols() != v_k.nrows() {
            return Err(LsaError::ShapeMismatch { what: "columns of U vs rows of V", expected: u_k.ncols(), found: v_k.nrows() });
        }

        Ok(Self {
            u_k,
            v_k,
            vocab
        })
    }

    pub fn from_truncated(truncated: Truncated, vocab: Vocabulary) -> Result<Model, LsaError> {
        Model::new(truncated.u_k, truncated.v_k, vocab)
    }

    /// Latent dimension k.
    pub fn dimension(&self) -> usize {
        self.v_k.nrows()
    }

    /// Number of trained documents N.
    pub fn n_documents(&self) -> usize {
        self.v_k.ncols()
    }

    /// Vocabulary size M.
    pub fn n_keywords(&self) -> usize {
        self.u_k.nrows()
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn term_embeddings(&self) -> &Array2<f64> {
        &self.u_k
    }

    pub fn document_embeddings(&self) -> &Array2<f64> {
        &self.v_k
    }

    pub fn term_embedding(&self, id: usize) -> ArrayView1<f64> {
        self.u_k.index_axis(Axis(0), id)
    }

    pub fn document_embedding(&self, d: usize) -> ArrayView1<f64> {
        self.v_k.index_axis(Axis(1), d)
    }

    /// Writes `_U.npy`, `_V.npy` and `keywords.txt` into `model_dir`, replacing older files.
    pub fn save(&self, model_dir: &Path) -> Result<(), LsaError> {

        save_output(model_dir, TERMS_FILE, &self.u_k)?;
        save_output(model_dir, DOCUMENTS_FILE, &self.v_k)?;
        save_output(model_dir, KEYWORDS_FILE, &self.vocab.keywords().to_vec())?;

        info!(dir = %model_dir.display(), m = self.n_keywords(), n = self.n_documents(), k = self.dimension(), "saved model");
        Ok(())
    }

    /// Reads a model back from `model_dir`.
    ///
    /// k, N and M are taken from the array shapes and cross checked against the keyword
    /// file; the id of a keyword is its line index.
    pub fn load(model_dir: &Path) -> Result<Model, LsaError> {

        let paths = [TERMS_FILE, DOCUMENTS_FILE, KEYWORDS_FILE].map(|name| model_dir.join(name));
        if let Some(missing) = paths.iter().find(|path| !path.is_file()) {
            return Err(LsaError::MissingArtifact(missing.to_owned()));
        }
        let [terms_path, documents_path, keywords_path] = paths;

        let u_k: Array2<f64> = read_input(&terms_path)?;
        let v_k: Array2<f64> = read_input(&documents_path)?;
        let lines: Vec<String> = read_input(&keywords_path)?;
        let keywords: Vec<String> = lines.iter().map(|line| line.trim().to_string()).collect();

        // line order is the id order, a file that is not strictly sorted is corrupt
        if let Some(line) = keywords.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(LsaError::KeywordOrder { line: line + 1 });
        }
        let vocab = Vocabulary::from_keywords(keywords);

        let model = Model::new(u_k, v_k, vocab)?;
        info!(dir = %model_dir.display(), m = model.n_keywords(), n = model.n_documents(), k = model.dimension(), "loaded model");
        Ok(model)
    }

}


#[cfg(test)]
mod tests {

    use std::fs;
    use ndarray::{array, Array2};
    use super::{Model, KEYWORDS_FILE, TERMS_FILE, DOCUMENTS_FILE};
    use crate::error::LsaError;
    use crate::vocab::Vocabulary;

    fn toy_model() -> Model {
        let vocab = Vocabulary::from_keywords(vec!["bird".to_string(), "cat".to_string(), "dog".to_string()]);
        let u_k = array![[0.1, -0.2], [0.7, 0.3], [-0.5, 0.25]];
        let v_k = array![[0.3, 0.6, 0.9, 0.1], [-0.4, 0.2, 0.0, 1.5]];
        Model::new(u_k, v_k, vocab).unwrap()
    }

    #[test]
    fn round_trip_test() {

        let dir = tempfile::tempdir().unwrap();
        let model = toy_model();
        model.save(dir.path()).unwrap();

        let loaded = Model::load(dir.path()).unwrap();
        assert_eq!(loaded.dimension(), 2);
        assert_eq!(loaded.n_documents(), 4);
        assert_eq!(loaded.n_keywords(), 3);
        assert_eq!(loaded.vocab().keywords(), model.vocab().keywords());
        assert_eq!(loaded.vocab().id("dog"), Some(2));
        for (a, b) in loaded.term_embeddings().iter().zip(model.term_embeddings().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in loaded.document_embeddings().iter().zip(model.document_embeddings().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn save_overwrites_previous_model() {

        let dir = tempfile::tempdir().unwrap();
        toy_model().save(dir.path()).unwrap();

        let vocab = Vocabulary::from_keywords(vec!["ant".to_string()]);
        let other = Model::new(array![[1.0]], array![[2.0, 3.0]], vocab).unwrap();
        other.save(dir.path()).unwrap();

        assert_eq!(Model::load(dir.path()).unwrap(), other);
    }

    #[test]
    fn missing_artifact_test() {

        for name in [TERMS_FILE, DOCUMENTS_FILE, KEYWORDS_FILE] {
            let dir = tempfile::tempdir().unwrap();
            toy_model().save(dir.path()).unwrap();
            fs::remove_file(dir.path().join(name)).unwrap();

            match Model::load(dir.path()) {
                Err(LsaError::MissingArtifact(path)) => assert!(path.ends_with(name)),
                other => panic!("expected missing artifact, got {:?}", other),
            }
        }
    }

    #[test]
    fn keyword_count_mismatch_test() {

        let dir = tempfile::tempdir().unwrap();
        toy_model().save(dir.path()).unwrap();
        fs::write(dir.path().join(KEYWORDS_FILE), "bird\ncat\n").unwrap();

        assert!(matches!(Model::load(dir.path()), Err(LsaError::ShapeMismatch { expected: 3, found: 2, .. })));
    }

    #[test]
    fn unsorted_keywords_are_rejected() {

        let dir = tempfile::tempdir().unwrap();
        toy_model().save(dir.path()).unwrap();

        // right line count, wrong order
        fs::write(dir.path().join(KEYWORDS_FILE), "bird\ndog\ncat\n").unwrap();
        assert!(matches!(Model::load(dir.path()), Err(LsaError::KeywordOrder { line: 2 })));

        // duplicates are out of order as well
        fs::write(dir.path().join(KEYWORDS_FILE), "bird\nbird\ndog\n").unwrap();
        assert!(matches!(Model::load(dir.path()), Err(LsaError::KeywordOrder { line: 1 })));
    }

    #[test]
    fn inconsistent_factors_are_rejected() {

        let vocab = Vocabulary::from_keywords(vec!["bird".to_string(), "cat".to_string()]);
        let u_k: Array2<f64> = Array2::zeros((2, 2));
        let v_k: Array2<f64> = Array2::zeros((3, 5));
        assert!(matches!(Model::new(u_k, v_k, vocab), Err(LsaError::ShapeMismatch { expected: 2, found: 3, .. })));
    }

}
