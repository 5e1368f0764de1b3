use crate::index::{DocumentTermMatrix, SparseVector, TermId, Vocabulary};
use crate::tokenizer::analyze;
use std::collections::{BTreeSet, HashMap};

/// Weighting knobs. The defaults are sublinear tf, smoothed idf, and
/// 1- and 2-grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub max_ngram: usize,
    /// `1 + ln(count)` instead of the raw count.
    pub sublinear_tf: bool,
    /// `ln((1 + N) / (1 + df)) + 1` instead of `ln(N / df) + 1`.
    pub smooth_idf: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { max_ngram: 2, sublinear_tf: true, smooth_idf: true }
    }
}

/// An encoder that has not seen a corpus yet.
#[derive(Debug, Clone, Default)]
pub struct TfidfEncoder {
    config: EncoderConfig,
}

/// Vocabulary and idf statistics learned from a corpus. Read-only: encoding
/// a query never changes them.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedEncoder {
    config: EncoderConfig,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    num_docs: usize,
}

impl TfidfEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn fit<S: AsRef<str>>(&self, texts: &[S]) -> FittedEncoder {
        self.fit_transform(texts).0
    }

    /// Learn the vocabulary and idf from `texts` and encode each of them.
    pub fn fit_transform<S: AsRef<str>>(&self, texts: &[S]) -> (FittedEncoder, DocumentTermMatrix) {
        let max_ngram = self.config.max_ngram.max(1);
        let counts: Vec<HashMap<String, u32>> = texts
            .iter()
            .map(|t| {
                let mut tf: HashMap<String, u32> = HashMap::new();
                for term in analyze(t.as_ref(), max_ngram) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let terms: BTreeSet<&str> = counts.iter().flat_map(|c| c.keys().map(String::as_str)).collect();
        let vocabulary = Vocabulary::from_sorted(terms.into_iter().map(str::to_string).collect());

        let mut df = vec![0u32; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                if let Some(tid) = vocabulary.get(term) {
                    df[tid as usize] += 1;
                }
            }
        }

        let num_docs = texts.len();
        let idf = df.iter().map(|&d| idf(num_docs, d, self.config.smooth_idf)).collect();
        let fitted = FittedEncoder { config: self.config, vocabulary, idf, num_docs };

        let rows = counts.iter().map(|tf| fitted.weigh(tf)).collect();
        let matrix = DocumentTermMatrix::from_rows(rows);
        tracing::info!(num_docs, num_terms = fitted.vocabulary.len(), "fitted tf-idf encoder");
        (fitted, matrix)
    }
}

impl FittedEncoder {
    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn config(&self) -> &EncoderConfig { &self.config }

    pub fn num_docs(&self) -> usize { self.num_docs }

    pub fn idf(&self, term: TermId) -> Option<f64> { self.idf.get(term as usize).copied() }

    /// Encode arbitrary text into the fitted space. Unknown terms are dropped.
    pub fn encode(&self, text: &str) -> SparseVector {
        let mut tf: HashMap<String, u32> = HashMap::new();
        for term in analyze(text, self.config.max_ngram.max(1)) {
            *tf.entry(term).or_insert(0) += 1;
        }
        self.weigh(&tf)
    }

    fn weigh(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let mut entries: Vec<(TermId, f64)> = counts
            .iter()
            .filter_map(|(term, &raw)| {
                let tid = self.vocabulary.get(term)?;
                let tf = if !self.config.sublinear_tf {
                    raw as f64
                } else if raw > 0 {
                    1.0 + (raw as f64).ln()
                } else {
                    0.0
                };
                Some((tid, tf * self.idf[tid as usize]))
            })
            .collect();
        entries.sort_by_key(|(tid, _)| *tid);
        let mut v = SparseVector::from_sorted(entries);
        v.l2_normalize();
        v
    }
}

fn idf(num_docs: usize, df: u32, smooth: bool) -> f64 {
    let (n, df) = (num_docs as f64, df as f64);
    if smooth {
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    } else {
        (n / df.max(1.0)).ln() + 1.0
    }
}
