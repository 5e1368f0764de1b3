use crate::index::DocId;
use crate::normalize::clean_text;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the catalog as it appears in the source file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub genres: String,
    pub keywords: String,
    pub overview: String,
    /// genres, keywords and overview joined by single spaces; the text the
    /// encoder sees.
    pub combined_text: String,
}

impl Document {
    pub fn from_record(record: RawRecord) -> Self {
        let genres = clean_text(record.genres.as_deref());
        let keywords = clean_text(record.keywords.as_deref());
        let overview = record.overview.unwrap_or_default();
        let combined_text = format!("{genres} {keywords} {overview}");
        Self { title: record.title.unwrap_or_default(), genres, keywords, overview, combined_text }
    }
}

/// Documents in source order. A document's position is its `DocId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn from_records<I: IntoIterator<Item = RawRecord>>(records: I) -> Self {
        Self { docs: records.into_iter().map(Document::from_record).collect() }
    }

    /// Read a headered CSV stream. Rows that cannot be decoded are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        rdr.headers().context("reading csv header")?;
        let mut records = Vec::new();
        for (row, result) in rdr.deserialize::<RawRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(row = row + 1, %err, "skipping malformed record"),
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn get(&self, doc_id: DocId) -> Option<&Document> { self.docs.get(doc_id as usize) }

    pub fn documents(&self) -> &[Document] { &self.docs }

    pub fn texts(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.combined_text.as_str()).collect()
    }
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let corpus = Corpus::from_reader(file).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(path = %path.display(), num_docs = corpus.len(), "loaded catalog");
    Ok(corpus)
}
