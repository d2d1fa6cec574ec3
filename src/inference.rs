
// imports
use crate::error::LsaError;
use crate::model::Model;

use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;
use tracing::{debug, error};


fn l2_norm(vec: &ArrayView1<f64>) -> f64 {
    vec.dot(vec).sqrt()
}

// singular vectors have unit norm, so a column of V_k or a mean of rows of U_k is at most 1
// long; an all zero count column comes back from the svd with a norm around 1e-16
const DEGENERATE_NORM: f64 = 1e-10;

fn is_degenerate(norm: f64) -> bool {
    !norm.is_finite() || norm <= DEGENERATE_NORM
}

/// Angle in radians between two vectors, in [0, pi].
///
/// Returns `None` when either vector has (numerically) zero norm and the angle is undefined.
pub fn angular_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> Option<f64> {
    let (norm_a, norm_b) = (l2_norm(a), l2_norm(b));
    if is_degenerate(norm_a) || is_degenerate(norm_b) {
        return None;
    }
    // rounding can push the cosine slightly out of [-1, 1]
    let cos = (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0);
    Some(cos.acos())
}


/// Projects new documents into the latent space of a trained model and ranks the
/// trained documents by angular distance.
pub struct Inference<'a> {
    model: &'a Model,
}

impl<'a> Inference<'a> {

    pub fn new(model: &'a Model) -> Inference<'a> {
        Self {
            model
        }
    }

    /// Mean of the keyword embeddings of every known token, duplicates included.
    ///
    /// Tokens are looked up as given; normalization belongs to the tokenizer.
    pub fn embed(&self, tokens: &[String]) -> Result<Array1<f64>, LsaError> {

        let vocab = self.model.vocab();
        let ids: Vec<usize> = tokens.iter().filter_map(|tok| vocab.id(tok)).collect();
        if ids.is_empty() {
            return Err(LsaError::EmptyDocument);
        }

        let mut coordinate: Array1<f64> = Array1::zeros(self.model.dimension());
        for id in &ids {
            coordinate += &self.model.term_embedding(*id);
        }
        coordinate /= ids.len() as f64;

        debug!(known_tokens = ids.len(), total_tokens = tokens.len(), "embedded document");
        Ok(coordinate)
    }

    /// Angle between `coordinate` and every trained document, indexed by document.
    pub fn angles(&self, coordinate: &Array1<f64>) -> Result<Vec<f64>, LsaError> {

        if coordinate.len() != self.model.dimension() {
            return Err(LsaError::ShapeMismatch { what: "query coordinate", expected: self.model.dimension(), found: coordinate.len() });
        }
        if is_degenerate(l2_norm(&coordinate.view())) {
            return Err(LsaError::DegenerateVector { index: None });
        }

        (0..self.model.n_documents())
        .map(|d| {
            angular_distance(&coordinate.view(), &self.model.document_embedding(d))
            .ok_or(LsaError::DegenerateVector { index: Some(d) })
        })
        .collect()
    }

    /// The `top` trained documents closest to `coordinate`, by ascending angle.
    /// Equal angles keep the lower document index first.
    pub fn rank(&self, coordinate: &Array1<f64>, top: usize) -> Result<Vec<(usize, f64)>, LsaError> {

        let mut indexed_angles: Vec<(usize, f64)> = self.angles(coordinate)?.into_iter().enumerate().collect();

        // sort_by is stable
        indexed_angles.sort_by(|(_i, a), (_j, b)| a.total_cmp(b));
        indexed_angles.truncate(top);
        Ok(indexed_angles)
    }

    /// Embeds one tokenized document and ranks it.
    pub fn run(&self, tokens: &[String], top: usize) -> Result<Vec<(usize, f64)>, LsaError> {
        let coordinate = self.embed(tokens)?;
        self.rank(&coordinate, top)
    }

    /// Runs every document independently, results are in input order.
    /// When documents fail, the error of the lowest failing index is returned.
    pub fn run_batch(&self, documents: &[Vec<String>], top: usize) -> Result<Vec<Vec<(usize, f64)>>, LsaError> {

        let results: Vec<Result<Vec<(usize, f64)>, LsaError>> = documents
        .par_iter()
        .enumerate()
        .map(|(i, tokens)| {
            self.run(tokens, top).map_err(|e| {
                error!(doc = i, error = %e, "cannot rank document");
                e
            })
        })
        .collect();

        // sequential so the reported failure does not depend on thread timing
        results.into_iter().collect()
    }

}
