
// imports
use crate::error::LsaError;
use crate::vocab::{normalize, Vocabulary};

use ndarray::Array2;


/// Dense term-document counts, rows are keyword ids and columns are documents.
pub struct TermDocumentMatrix {}

impl TermDocumentMatrix {

    /// Counts every occurrence of every keyword in every document.
    ///
    /// Tokens outside of the vocabulary are ignored. An empty vocabulary is a terminal
    /// condition for training and is reported as [`LsaError::EmptyVocabulary`].
    pub fn build(vocab: &Vocabulary, documents: &[Vec<String>]) -> Result<Array2<f64>, LsaError> {

        if vocab.is_empty() {
            return Err(LsaError::EmptyVocabulary);
        }

        let mut x_mat: Array2<f64> = Array2::zeros((vocab.len(), documents.len()));
        for (d, tokens) in documents.iter().enumerate() {
            for tok in tokens {
                if let Some(i) = vocab.id(&normalize(tok)) {
                    x_mat[[i, d]] += 1.0;
                }
            }
        }

        Ok(x_mat)
    }

}


#[cfg(test)]
mod tests {

    use std::collections::HashSet;
    use ndarray::array;
    use super::TermDocumentMatrix;
    use crate::error::LsaError;
    use crate::vocab::{Tokenizer, Vocabulary, WhitespaceTokenizer};

    #[test]
    fn golden_matrix_test() {

        let documents: Vec<Vec<String>> = ["cat dog cat", "dog bird", "cat bird fish"]
        .iter()
        .map(|doc| WhitespaceTokenizer.tokenize(doc))
        .collect();

        let vocab = Vocabulary::build(&documents, &HashSet::new());
        let x_mat = TermDocumentMatrix::build(&vocab, &documents).unwrap();

        // rows are bird, cat, dog; columns are the three documents
        let golden = array![
            [0.0, 1.0, 1.0],
            [2.0, 0.0, 1.0],
            [1.0, 1.0, 0.0]
        ];
        assert_eq!(x_mat, golden);
    }

    #[test]
    fn unknown_tokens_are_ignored() {

        let vocab = Vocabulary::from_keywords(vec!["cat".to_string()]);
        let documents = vec![
            vec!["cat".to_string(), "zebra".to_string(), "CAT".to_string()],
            vec!["zebra".to_string()],
        ];
        let x_mat = TermDocumentMatrix::build(&vocab, &documents).unwrap();
        assert_eq!(x_mat, array![[2.0, 0.0]]);
    }

    #[test]
    fn empty_vocab_fails() {

        let documents = vec![vec!["cat".to_string()]];
        let result = TermDocumentMatrix::build(&Vocabulary::default(), &documents);
        assert!(matches!(result, Err(LsaError::EmptyVocabulary)));
    }

}
