use cinematch_core::{Corpus, EncoderConfig, RawRecord, Recommendation, Recommender, TfidfEncoder};
use std::num::NonZeroUsize;

fn record(title: &str, genres: &str, keywords: &str, overview: &str) -> RawRecord {
    RawRecord {
        title: Some(title.into()),
        genres: Some(genres.into()),
        keywords: Some(keywords.into()),
        overview: Some(overview.into()),
    }
}

fn n(v: usize) -> NonZeroUsize { NonZeroUsize::new(v).unwrap() }

fn catalog() -> Corpus {
    Corpus::from_records(vec![
        record("Skyfall", "['Action', 'Thriller']", "['spy', 'mi6']", "A spy hunts a cyber terrorist across London."),
        record("Heat", "['Crime', 'Drama']", "['heist', 'robbery']", "A detective chases a crew of professional thieves."),
        record("Up", "['Animation', 'Family']", "['balloon', 'adventure']", "An old man ties balloons to his house."),
        record("Alien", "['Horror', 'Science Fiction']", "['space', 'monster']", "A crew in deep space meets a deadly monster."),
        record("The Italian Job", "['Action', 'Crime']", "['heist', 'gold']", "Thieves plan a gold heist in Venice."),
        record("Heat", "['Crime']", "['remake']", "A heist remake with the same title."),
        record("Moon", "['Science Fiction', 'Drama']", "['space', 'clone']", "A lonely astronaut on the moon."),
        record("Paddington", "['Family', 'Comedy']", "['bear', 'london']", "A bear from Peru arrives in London."),
        record("Gravity", "['Science Fiction', 'Thriller']", "['space', 'survival']", "Astronauts survive debris in space."),
        record("Ratatouille", "['Animation', 'Comedy']", "['cooking', 'rat']", "A rat dreams of cooking in Paris."),
    ])
}

#[test]
fn hero_query_prefers_matching_document() {
    let corpus = Corpus::from_records(vec![
        record("A", "action", "", "a hero saves the city"),
        record("B", "drama", "", "a family drama"),
    ]);
    let rec = Recommender::new(corpus, EncoderConfig::default());
    let scores = rec.scores("hero city action");
    assert!(scores[0] > scores[1]);

    match rec.recommend("hero city action", n(1)) {
        Recommendation::Matches { hits, .. } => {
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].document.title, "A");
        }
        Recommendation::NoMatch => panic!("expected a match"),
    }
}

#[test]
fn stopword_query_is_no_match() {
    let rec = Recommender::new(catalog(), EncoderConfig::default());
    assert_eq!(rec.recommend("the a of", n(5)), Recommendation::NoMatch);
}

#[test]
fn out_of_vocabulary_query_is_no_match() {
    let rec = Recommender::new(catalog(), EncoderConfig::default());
    assert_eq!(rec.recommend("zeppelin quokka", n(5)), Recommendation::NoMatch);
}

#[test]
fn empty_corpus_is_no_match() {
    let rec = Recommender::new(Corpus::default(), EncoderConfig::default());
    assert_eq!(rec.recommend("space monster", n(5)), Recommendation::NoMatch);
}

#[test]
fn identical_text_with_distinct_titles_both_returned() {
    let corpus = Corpus::from_records(vec![
        record("Twin One", "mystery", "island", "castaways find a hidden bunker"),
        record("Twin Two", "mystery", "island", "castaways find a hidden bunker"),
    ]);
    let rec = Recommender::new(corpus, EncoderConfig::default());
    let titles: Vec<String> = rec
        .recommend("hidden bunker island", n(2))
        .hits()
        .iter()
        .map(|h| h.document.title.clone())
        .collect();
    assert_eq!(titles, vec!["Twin One", "Twin Two"]);
}

#[test]
fn document_norms_are_zero_or_one() {
    let mut corpus_records = vec![record("Empty", "", "", "")];
    corpus_records.extend(catalog().documents().iter().map(|d| record(&d.title, &d.genres, &d.keywords, &d.overview)));
    let corpus = Corpus::from_records(corpus_records);
    let (_, matrix) = TfidfEncoder::default().fit_transform(&corpus.texts());
    for (i, row) in matrix.rows().iter().enumerate() {
        let norm = row.norm();
        if i == 0 {
            assert_eq!(norm, 0.0);
        } else {
            assert!((norm - 1.0).abs() < 1e-9, "row {i} has norm {norm}");
        }
    }
}

#[test]
fn scores_lie_in_unit_interval() {
    let rec = Recommender::new(catalog(), EncoderConfig::default());
    for query in ["space monster", "heist crew thieves", "london bear", "cooking rat paris"] {
        for s in rec.scores(query) {
            assert!((0.0..=1.0).contains(&s), "{query}: {s}");
        }
    }
}

#[test]
fn results_are_deduplicated_and_above_threshold() {
    let rec = Recommender::new(catalog(), EncoderConfig::default());
    let query = "heist crew of thieves";
    let scores = rec.scores(query);
    let cutoff = cinematch_core::percentile(&scores, 80.0).unwrap();
    match rec.recommend(query, n(10)) {
        Recommendation::Matches { threshold, hits } => {
            assert_eq!(threshold, cutoff);
            let mut titles: Vec<&str> = hits.iter().map(|h| h.document.title.as_str()).collect();
            assert!(hits.iter().all(|h| h.score >= threshold));
            assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
            let before = titles.len();
            titles.sort();
            titles.dedup();
            assert_eq!(titles.len(), before);
            assert!(titles.contains(&"Heat"));
        }
        Recommendation::NoMatch => panic!("expected a match"),
    }
}

#[test]
fn refitting_is_deterministic() {
    let corpus = catalog();
    let (enc_a, m_a) = TfidfEncoder::default().fit_transform(&corpus.texts());
    let (enc_b, m_b) = TfidfEncoder::default().fit_transform(&corpus.texts());
    assert_eq!(enc_a, enc_b);
    assert_eq!(m_a, m_b);

    let a = Recommender::new(catalog(), EncoderConfig::default());
    let b = Recommender::new(catalog(), EncoderConfig::default());
    assert_eq!(a.scores("space survival").iter().map(|s| s.to_bits()).collect::<Vec<_>>(),
               b.scores("space survival").iter().map(|s| s.to_bits()).collect::<Vec<_>>());
    assert_eq!(a.recommend("space survival", n(3)), b.recommend("space survival", n(3)));
}

#[test]
fn top_n_limits_result_length() {
    let rec = Recommender::new(catalog(), EncoderConfig::default());
    let hits = rec.recommend("space", n(1));
    assert_eq!(hits.hits().len(), 1);
}
