use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::EngineError;

/// Standard English stop-word list
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    // Two or more word characters
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").unwrap())
}

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.binary_search(&term).is_ok()
}

/// Splits text into lowercase terms, dropping stop words
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !is_stop_word(term))
        .map(str::to_string)
        .collect()
}

/// Fixed term → column mapping, columns assigned in lexicographic term order
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_terms(mut terms: Vec<String>) -> Self {
        terms.sort();
        let columns = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();
        Self { terms, columns }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Term counts per movie, stored sparsely as `(column, count)` pairs sorted
/// by column
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<(usize, u32)>>,
    cols: usize,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Non-zero cells of row `i`
    pub fn row(&self, i: usize) -> &[(usize, u32)] {
        &self.rows[i]
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.rows[i]
            .binary_search_by_key(&j, |&(col, _)| col)
            .map(|pos| self.rows[i][pos].1)
            .unwrap_or(0)
    }

    /// Row `i` expanded to the full vocabulary width
    pub fn dense_row(&self, i: usize) -> Vec<u32> {
        let mut dense = vec![0; self.cols];
        for &(col, count) in &self.rows[i] {
            dense[col] = count;
        }
        dense
    }
}

/// Bag-of-words count vectorizer with a bounded vocabulary
#[derive(Debug, Clone)]
pub struct Vectorizer {
    max_features: usize,
}

impl Vectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Builds the vocabulary from `tags` and counts every tag against it.
    ///
    /// The vocabulary keeps the `max_features` terms with the highest total
    /// count across the corpus, ties broken by term.
    pub fn fit<S: AsRef<str>>(&self, tags: &[S]) -> Result<(Vocabulary, FeatureMatrix), EngineError> {
        if tags.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = tags.iter().map(|t| tokenize(t.as_ref())).collect();

        let mut totals: HashMap<&str, u64> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *totals.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let vocabulary =
            Vocabulary::from_terms(ranked.into_iter().map(|(t, _)| t.to_string()).collect());

        if vocabulary.is_empty() {
            return Err(EngineError::EmptyVocabulary);
        }

        let rows = tokenized
            .iter()
            .map(|tokens| count_row(&vocabulary, tokens))
            .collect();

        let matrix = FeatureMatrix {
            rows,
            cols: vocabulary.len(),
        };

        Ok((vocabulary, matrix))
    }
}

fn count_row(vocabulary: &Vocabulary, tokens: &[String]) -> Vec<(usize, u32)> {
    let mut counts: HashMap<usize, u32> = HashMap::new();
    for token in tokens {
        if let Some(col) = vocabulary.column(token) {
            *counts.entry(col).or_insert(0) += 1;
        }
    }

    let mut row: Vec<(usize, u32)> = counts.into_iter().collect();
    row.sort_unstable_by_key(|&(col, _)| col);
    row
}
