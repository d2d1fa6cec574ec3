
// imports
use std::collections::{HashMap, HashSet};

// a keyword has to be seen in at least this many distinct documents
const MIN_DOCUMENT_FREQUENCY: usize = 2;


// defines the behavior needed for tokenizing a document
pub trait Tokenizer {
    fn tokenize(&self, document: &str) -> Vec<String>;
}

/// Splits on whitespace and ascii punctuation, every piece is normalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, document: &str) -> Vec<String> {
        document
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .map(normalize)
        .filter(|tok| !tok.is_empty())
        .collect()
    }
}

/// Lower cases and trims a token.
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// A normalized token may become a keyword only if it is longer than one character,
/// contains no digit anywhere and is not a stopword.
pub fn is_candidate(token: &str, stopwords: &HashSet<String>) -> bool {
    token.chars().count() > 1
        && !token.chars().any(|c| c.is_ascii_digit())
        && !stopwords.contains(token)
}


/// Sorted keyword list, the id of a keyword is its position in the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
    keywords: Vec<String>,
    word2id: HashMap<String, usize>,
}

impl Vocabulary {

    fn accumulate(doc_id: usize, tokens: &[String], stopwords: &HashSet<String>, token2docs: &mut HashMap<String, Vec<usize>>) {

        // every occurrence is recorded, the same document can show up several times for a token
        for tok in tokens {
            let tok = normalize(tok);
            if is_candidate(&tok, stopwords) {
                token2docs.entry(tok).or_insert_with(Vec::new).push(doc_id);
            }
        }
    }

    fn document_frequency(doc_ids: &[usize]) -> usize {
        // doc ids are pushed in increasing order, so duplicates are adjacent
        let mut distinct = doc_ids.to_vec();
        distinct.dedup();
        distinct.len()
    }

    /// Builds the vocabulary out of per document token lists.
    ///
    /// A token is kept when it passes [`is_candidate`] and occurs in at least two
    /// distinct documents. Keywords are sorted and ids follow the sort order.
    pub fn build(documents: &[Vec<String>], stopwords: &HashSet<String>) -> Vocabulary {

        let mut token2docs: HashMap<String, Vec<usize>> = HashMap::new();
        for (doc_id, tokens) in documents.iter().enumerate() {
            Vocabulary::accumulate(doc_id, tokens, stopwords, &mut token2docs);
        }

        let keywords: Vec<String> = token2docs
        .iter()
        .filter(|(_, doc_ids)| Vocabulary::document_frequency(doc_ids) >= MIN_DOCUMENT_FREQUENCY)
        .map(|(tok, _)| tok.to_owned())
        .collect();

        Vocabulary::from_keywords(keywords)
    }

    /// Sorts and dedups the given keywords and assigns ids in that order.
    pub fn from_keywords(mut keywords: Vec<String>) -> Vocabulary {

        keywords.sort();
        keywords.dedup();

        let word2id = keywords
        .iter()
        .enumerate()
        .map(|(i, word)| (word.to_owned(), i))
        .collect::<HashMap<String, usize>>();

        Self {
            keywords,
            word2id
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn id(&self, word: &str) -> Option<usize> {
        self.word2id.get(word).copied()
    }

    pub fn keyword(&self, id: usize) -> Option<&str> {
        self.keywords.get(id).map(|word| word.as_str())
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

}


#[cfg(test)]
mod tests {

    use std::collections::HashSet;
    use super::{Vocabulary, Tokenizer, WhitespaceTokenizer, is_candidate};

    fn tokenize_all(documents: &[&str]) -> Vec<Vec<String>> {
        documents.iter().map(|doc| WhitespaceTokenizer.tokenize(doc)).collect()
    }

    #[test]
    fn golden_vocab_test() {

        // fish only appears in the last document, so it is dropped
        let documents = tokenize_all(&["cat dog cat", "dog bird", "cat bird fish"]);
        let vocab = Vocabulary::build(&documents, &HashSet::new());

        assert_eq!(vocab.keywords(), &["bird", "cat", "dog"]);
        assert_eq!(vocab.id("bird"), Some(0));
        assert_eq!(vocab.id("cat"), Some(1));
        assert_eq!(vocab.id("dog"), Some(2));
        assert_eq!(vocab.id("fish"), None);
        assert_eq!(vocab.keyword(2), Some("dog"));
    }

    #[test]
    fn repeated_token_in_one_document_is_not_enough() {

        let documents = tokenize_all(&["apple apple apple", "pear", "pear plum"]);
        let vocab = Vocabulary::build(&documents, &HashSet::new());
        assert_eq!(vocab.keywords(), &["pear"]);
    }

    #[test]
    fn filter_rules_test() {

        let stopwords: HashSet<String> = ["the".to_string()].into_iter().collect();

        // single characters, digits anywhere and stopwords are all rejected
        let documents = tokenize_all(&[
            "a the x1 r2d2 1999 word",
            "a the x1 r2d2 1999 word",
        ]);
        let vocab = Vocabulary::build(&documents, &stopwords);
        assert_eq!(vocab.keywords(), &["word"]);

        assert!(is_candidate("hello", &stopwords));
        assert!(is_candidate("日本", &stopwords));
        assert!(!is_candidate("日", &stopwords));
        assert!(!is_candidate("abc9", &stopwords));
        assert!(!is_candidate("the", &stopwords));
    }

    #[test]
    fn tokens_are_normalized_before_admission() {

        let documents = vec![
            vec!["  Cat ".to_string(), "DOG".to_string()],
            vec!["cat".to_string(), "dog".to_string()],
        ];
        let vocab = Vocabulary::build(&documents, &HashSet::new());
        assert_eq!(vocab.keywords(), &["cat", "dog"]);
    }

    #[test]
    fn too_few_documents_give_empty_vocab() {

        let documents = tokenize_all(&["cat cat dog dog"]);
        let vocab = Vocabulary::build(&documents, &HashSet::new());
        assert!(vocab.is_empty());

        let vocab = Vocabulary::build(&[], &HashSet::new());
        assert_eq!(vocab.len(), 0);
    }

    #[test]
    fn tokenizer_test() {

        let tokens = WhitespaceTokenizer.tokenize("Hello, World!  it's\tfine.\n");
        assert_eq!(tokens, vec!["hello", "world", "it", "s", "fine"]);
    }

}
