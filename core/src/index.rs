use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

/// Term to index mapping, frozen once fitted. Indices follow the sorted
/// order of the terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// `terms` must already be sorted and distinct.
    pub(crate) fn from_sorted(terms: Vec<String>) -> Self {
        let dictionary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as TermId))
            .collect();
        Self { dictionary, terms }
    }

    pub fn get(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn terms(&self) -> &[String] { &self.terms }
}

/// Sparse weight vector; entries sorted by term id, zeros never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    pub(crate) fn from_sorted(entries: Vec<(TermId, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries: entries.into_iter().filter(|(_, w)| *w != 0.0).collect() }
    }

    pub fn entries(&self) -> &[(TermId, f64)] { &self.entries }

    pub fn get(&self, term: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn nnz(&self) -> usize { self.entries.len() }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm; the zero vector is left as is.
    pub(crate) fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 { return; }
        for (_, w) in self.entries.iter_mut() {
            *w /= norm;
        }
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta < tb {
                i += 1;
            } else if tb < ta {
                j += 1;
            } else {
                acc += wa * wb;
                i += 1;
                j += 1;
            }
        }
        acc
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f64, // normalized tf-idf weight
}

/// One normalized vector per document, plus the per-term postings used to
/// score a query against every document in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTermMatrix {
    rows: Vec<SparseVector>,
    postings: HashMap<TermId, Vec<Posting>>, // postings sorted by doc_id
}

impl DocumentTermMatrix {
    pub(crate) fn from_rows(rows: Vec<SparseVector>) -> Self {
        let mut postings: HashMap<TermId, Vec<Posting>> = HashMap::new();
        for (doc_id, row) in rows.iter().enumerate() {
            for &(tid, weight) in row.entries() {
                postings.entry(tid).or_default().push(Posting { doc_id: doc_id as DocId, weight });
            }
        }
        Self { rows, postings }
    }

    pub fn num_docs(&self) -> usize { self.rows.len() }

    pub fn row(&self, doc_id: DocId) -> Option<&SparseVector> { self.rows.get(doc_id as usize) }

    pub fn rows(&self) -> &[SparseVector] { &self.rows }

    pub fn postings(&self, term: TermId) -> &[Posting] {
        self.postings.get(&term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cosine similarity of `query` against every document, in document
    /// order. Both sides are unit (or zero) vectors, so this is a dot product.
    pub fn cosine_scores(&self, query: &SparseVector) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.rows.len()];
        for &(tid, q_w) in query.entries() {
            for p in self.postings(tid) {
                scores[p.doc_id as usize] += p.weight * q_w;
            }
        }
        for s in scores.iter_mut() {
            *s = s.clamp(0.0, 1.0);
        }
        scores
    }
}
