use anyhow::Result;
use cinematch_core::{load_csv, EncoderConfig, Recommendation, Recommender, DEFAULT_TOP_N, NO_MATCH_MESSAGE};
use clap::Parser;
use serde::Serialize;
use std::num::NonZeroUsize;

#[derive(Parser, Debug)]
#[command(name = "recommend")]
#[command(about = "Content-based movie recommendations from a free-text description", long_about = None)]
pub struct Cli {
    /// Description of the movie you feel like watching
    pub query: String,
    /// Catalog CSV with title, genres, keywords and overview columns
    #[arg(long, default_value = "movies_sample.csv")]
    pub data: String,
    /// Number of recommendations to return
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: NonZeroUsize,
    /// Print JSON instead of formatted text
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Longest word n-gram in the vocabulary
    #[arg(long, default_value_t = 2)]
    pub max_ngram: usize,
    /// Weigh terms by raw count instead of 1 + ln(count)
    #[arg(long, default_value_t = false)]
    pub raw_tf: bool,
    /// Use ln(N/df) + 1 instead of the smoothed idf
    #[arg(long, default_value_t = false)]
    pub no_smooth_idf: bool,
}

impl Cli {
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            max_ngram: self.max_ngram.max(1),
            sublinear_tf: !self.raw_tf,
            smooth_idf: !self.no_smooth_idf,
        }
    }
}

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub query: &'a str,
    pub matched: bool,
    pub threshold: Option<f64>,
    pub message: Option<&'static str>,
    pub results: Vec<JsonHit<'a>>,
}

#[derive(Serialize)]
pub struct JsonHit<'a> {
    pub title: &'a str,
    pub score: f64,
    pub genres: &'a str,
    pub overview: &'a str,
}

pub fn run(cli: &Cli) -> Result<String> {
    let corpus = load_csv(&cli.data)?;
    let recommender = Recommender::new(corpus, cli.encoder_config());
    let rec = recommender.recommend(&cli.query, cli.top_n);
    tracing::info!(query = %cli.query, matched = rec.is_match(), hits = rec.hits().len(), "ranked catalog");
    if cli.json {
        render_json(&cli.query, &rec)
    } else {
        Ok(render_text(&rec))
    }
}

pub fn render_text(rec: &Recommendation<'_>) -> String {
    let Recommendation::Matches { hits, .. } = rec else {
        return NO_MATCH_MESSAGE.to_string();
    };
    let mut output = String::from("\nTop Movie Recommendations:\n");
    for hit in hits {
        let doc = hit.document;
        output.push_str(&format!(
            "\nTitle: {}\nSimilarity Score: {:.2}\nGenres: {}\nDescription: {}\n{}\n",
            doc.title,
            hit.score,
            doc.genres,
            doc.overview,
            "-".repeat(80)
        ));
    }
    output
}

pub fn render_json(query: &str, rec: &Recommendation<'_>) -> Result<String> {
    let out = match rec {
        Recommendation::Matches { threshold, hits } => JsonOutput {
            query,
            matched: true,
            threshold: Some(*threshold),
            message: None,
            results: hits
                .iter()
                .map(|h| JsonHit {
                    title: &h.document.title,
                    score: h.score,
                    genres: &h.document.genres,
                    overview: &h.document.overview,
                })
                .collect(),
        },
        Recommendation::NoMatch => JsonOutput {
            query,
            matched: false,
            threshold: None,
            message: Some(NO_MATCH_MESSAGE),
            results: vec![],
        },
    };
    Ok(serde_json::to_string_pretty(&out)?)
}
