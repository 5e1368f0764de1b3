use crate::corpus::{Corpus, Document};
use crate::encoder::{EncoderConfig, FittedEncoder, TfidfEncoder};
use crate::index::{DocId, DocumentTermMatrix};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Share of the score distribution that falls below the relevance cutoff.
pub const THRESHOLD_PERCENTILE: f64 = 80.0;

/// Shown to users when a query clears no document.
pub const NO_MATCH_MESSAGE: &str = "No strong recommendations found. Try a different description.";

pub const DEFAULT_TOP_N: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    pub doc_id: DocId,
    pub document: &'a Document,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation<'a> {
    Matches { threshold: f64, hits: Vec<Hit<'a>> },
    /// Nothing cleared the threshold.
    NoMatch,
}

impl<'a> Recommendation<'a> {
    pub fn hits(&self) -> &[Hit<'a>] {
        match self {
            Recommendation::Matches { hits, .. } => hits,
            Recommendation::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool { matches!(self, Recommendation::Matches { .. }) }
}

/// Percentile `p` (0..=100) with linear interpolation between the closest
/// ranks. `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() { return None; }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    let (lo, hi) = (sorted[lower], sorted[upper]);
    Some(lo + (hi - lo) * frac)
}

/// Rank documents by their precomputed similarity `scores` (one per document,
/// in corpus order), keep those at or above the query's 80th percentile,
/// and return the first `top_n` distinct titles.
pub fn rank<'a>(scores: &[f64], corpus: &'a Corpus, top_n: NonZeroUsize) -> Recommendation<'a> {
    let Some(threshold) = percentile(scores, THRESHOLD_PERCENTILE) else {
        return Recommendation::NoMatch;
    };

    // Zero similarity means no shared terms at all, which never counts as a match.
    let mut candidates: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, s)| s > 0.0 && s >= threshold)
        .collect();
    // Stable: equal scores keep corpus order.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    tracing::debug!(threshold, candidates = candidates.len(), "scored query");

    if candidates.is_empty() {
        return Recommendation::NoMatch;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut hits = Vec::with_capacity(top_n.get().min(candidates.len()));
    for (idx, score) in candidates {
        let Some(document) = corpus.get(idx as DocId) else { continue };
        if !seen.insert(document.title.as_str()) { continue; }
        hits.push(Hit { doc_id: idx as DocId, document, score });
        if hits.len() >= top_n.get() { break; }
    }
    Recommendation::Matches { threshold, hits }
}

/// A corpus fitted once and queried many times.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    encoder: FittedEncoder,
    matrix: DocumentTermMatrix,
}

impl Recommender {
    pub fn new(corpus: Corpus, config: EncoderConfig) -> Self {
        let (encoder, matrix) = TfidfEncoder::new(config).fit_transform(&corpus.texts());
        Self { corpus, encoder, matrix }
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn encoder(&self) -> &FittedEncoder { &self.encoder }

    pub fn matrix(&self) -> &DocumentTermMatrix { &self.matrix }

    /// Cosine similarity of `query` against every document, in corpus order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let q = self.encoder.encode(query);
        self.matrix.cosine_scores(&q)
    }

    pub fn recommend(&self, query: &str, top_n: NonZeroUsize) -> Recommendation<'_> {
        let scores = self.scores(query);
        rank(&scores, &self.corpus, top_n)
    }
}
