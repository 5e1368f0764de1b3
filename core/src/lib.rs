//! Content-based movie recommendation: TF-IDF encoding of a catalog and
//! cosine-similarity ranking of free-text queries against it.

pub mod corpus;
pub mod encoder;
pub mod index;
pub mod normalize;
pub mod rank;
pub mod tokenizer;

pub use corpus::{load_csv, Corpus, Document, RawRecord};
pub use encoder::{EncoderConfig, FittedEncoder, TfidfEncoder};
pub use index::{DocId, DocumentTermMatrix, Posting, SparseVector, TermId, Vocabulary};
pub use rank::{percentile, rank, Hit, Recommendation, Recommender, DEFAULT_TOP_N, NO_MATCH_MESSAGE};
