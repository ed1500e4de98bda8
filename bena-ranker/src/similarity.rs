//! Term-weighted tag vectors and the all-pairs similarity matrix.
//!
//! Each place's tag text becomes a TF-IDF vector: lowercase tokens of at
//! least two word characters, English stop words removed, raw counts scaled
//! by the smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1`,
//! then L2-normalised. Cosine similarity is therefore a dot product.
//!
//! A place whose tags yield no tokens has a zero vector. Its similarity to
//! every place, itself included, is `0.0`.

use std::collections::{BTreeMap, HashMap, HashSet};

use bena_core::{Place, PlaceId};

use crate::SimilarityError;

/// Words dropped before weighting, following the common English list used by
/// text vectorisers.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "bottom", "but", "by", "can", "cannot", "could", "do", "done", "down",
    "due", "during", "each", "eg", "either", "else", "elsewhere", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
    "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
    "herself", "him", "himself", "his", "how", "however", "ie", "if", "in", "indeed", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "made",
    "many", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "namely", "neither", "never", "nevertheless",
    "next", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "take", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Tokenisation options for [`TextSimilarityIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TfIdfOptions {
    /// Tokens removed before weighting. Compared after lowercasing.
    pub stop_words: Vec<String>,
}

impl Default for TfIdfOptions {
    fn default() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS
                .iter()
                .map(|&word| word.to_owned())
                .collect(),
        }
    }
}

/// Builds [`SimilarityMatrix`] values from place tags.
///
/// # Examples
/// ```
/// use bena_core::test_support::sample_places;
/// use bena_ranker::TextSimilarityIndex;
///
/// let matrix = TextSimilarityIndex::default()
///     .build(&sample_places())
///     .expect("unique ids");
/// let beach = matrix.similarity(&"P1".into(), &"P2".into()).expect("both indexed");
/// let desert = matrix.similarity(&"P1".into(), &"P3".into()).expect("both indexed");
/// assert!(beach > desert);
/// ```
#[derive(Debug, Clone)]
pub struct TextSimilarityIndex {
    stop_words: HashSet<String>,
}

impl Default for TextSimilarityIndex {
    fn default() -> Self {
        Self::new(&TfIdfOptions::default())
    }
}

impl TextSimilarityIndex {
    /// Create an index with the given tokenisation options.
    #[must_use]
    pub fn new(options: &TfIdfOptions) -> Self {
        Self {
            stop_words: options
                .stop_words
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
        }
    }

    /// Split text into lowercase tokens of two or more word characters,
    /// skipping stop words.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().nth(1).is_some())
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_owned)
            .collect()
    }

    /// Build the similarity matrix for `places`, in their given order.
    ///
    /// The result is deterministic for identical input order and text.
    ///
    /// # Errors
    /// Returns [`SimilarityError::DuplicatePlaceId`] when two places share an
    /// identifier.
    pub fn build(&self, places: &[Place]) -> Result<SimilarityMatrix, SimilarityError> {
        let positions = index_positions(places)?;
        let counts: Vec<BTreeMap<String, usize>> = places
            .iter()
            .map(|place| term_counts(self.tokenize(&place.tags)))
            .collect();
        let vectors = weigh(&counts);
        let values = pairwise_cosine(&vectors);
        log::debug!("built {n}x{n} similarity matrix", n = places.len());
        Ok(SimilarityMatrix {
            ids: places.iter().map(|place| place.id.clone()).collect(),
            positions,
            values,
        })
    }
}

fn index_positions(places: &[Place]) -> Result<HashMap<PlaceId, usize>, SimilarityError> {
    let mut positions = HashMap::with_capacity(places.len());
    for (position, place) in places.iter().enumerate() {
        if positions.insert(place.id.clone(), position).is_some() {
            return Err(SimilarityError::DuplicatePlaceId {
                place_id: place.id.clone(),
            });
        }
    }
    Ok(positions)
}

fn term_counts(tokens: Vec<String>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Sparse, L2-normalised rows of `(term column, weight)` sorted by column.
type SparseRow = Vec<(usize, f64)>;

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "TF-IDF weighting is floating-point arithmetic over term counts"
)]
fn weigh(counts: &[BTreeMap<String, usize>]) -> Vec<SparseRow> {
    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in counts {
        for term in doc.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    let documents = counts.len() as f64;
    let columns: HashMap<&str, (usize, f64)> = document_frequency
        .iter()
        .enumerate()
        .map(|(column, (&term, &df))| {
            let idf = ((1.0 + documents) / (1.0 + df as f64)).ln() + 1.0;
            (term, (column, idf))
        })
        .collect();

    counts
        .iter()
        .map(|doc| {
            let mut row: SparseRow = doc
                .iter()
                .filter_map(|(term, &count)| {
                    columns
                        .get(term.as_str())
                        .map(|&(column, idf)| (column, count as f64 * idf))
                })
                .collect();
            row.sort_unstable_by_key(|&(column, _)| column);
            let norm = row.iter().map(|&(_, weight)| weight * weight).sum::<f64>().sqrt();
            if norm > 0.0 {
                for entry in &mut row {
                    entry.1 /= norm;
                }
                row
            } else {
                Vec::new()
            }
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity accumulates products of weights"
)]
fn dot(left: &[(usize, f64)], right: &[(usize, f64)]) -> f64 {
    let mut total = 0.0;
    let mut lhs = left.iter().peekable();
    let mut rhs = right.iter().peekable();
    while let (Some(&&(lc, lw)), Some(&&(rc, rw))) = (lhs.peek(), rhs.peek()) {
        match lc.cmp(&rc) {
            std::cmp::Ordering::Less => {
                lhs.next();
            }
            std::cmp::Ordering::Greater => {
                rhs.next();
            }
            std::cmp::Ordering::Equal => {
                total += lw * rw;
                lhs.next();
                rhs.next();
            }
        }
    }
    total
}

fn pairwise_cosine(vectors: &[SparseRow]) -> Vec<f64> {
    let n = vectors.len();
    let mut values = vec![0.0; n * n];
    for (i, row_i) in vectors.iter().enumerate() {
        for (j, row_j) in vectors.iter().enumerate().skip(i) {
            let value = dot(row_i, row_j).clamp(0.0, 1.0);
            for cell in [i * n + j, j * n + i] {
                if let Some(slot) = values.get_mut(cell) {
                    *slot = value;
                }
            }
        }
    }
    values
}

/// Square, symmetric, non-negative tag similarity matrix for one snapshot.
///
/// Rows and columns are addressed through an explicit identifier map built
/// alongside the matrix, never by assuming the position of a place in some
/// other collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    ids: Vec<PlaceId>,
    positions: HashMap<PlaceId, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of indexed places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Report whether the matrix indexes no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in matrix order.
    #[must_use]
    pub fn ids(&self) -> &[PlaceId] {
        &self.ids
    }

    /// Matrix position of a place.
    #[must_use]
    pub fn position(&self, place_id: &PlaceId) -> Option<usize> {
        self.positions.get(place_id).copied()
    }

    /// Similarity between the places at two positions.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        let n = self.len();
        if row >= n || column >= n {
            return None;
        }
        self.values.get(row * n + column).copied()
    }

    /// Similarities of the place at `row` to every place, in matrix order.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let n = self.len();
        if row >= n {
            return None;
        }
        self.values.get(row * n..(row + 1) * n)
    }

    /// Similarity between two places by identifier.
    #[must_use]
    pub fn similarity(&self, left: &PlaceId, right: &PlaceId) -> Option<f64> {
        self.get(self.position(left)?, self.position(right)?)
    }
}
