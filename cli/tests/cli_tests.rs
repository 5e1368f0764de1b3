use cinematch::{run, Cli};
use cinematch_core::NO_MATCH_MESSAGE;
use clap::Parser;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const CATALOG: &str = "title,genres,keywords,overview\n\
A,\"['Action']\",\"['superhero']\",a hero saves the city\n\
B,\"['Drama']\",\"['family']\",a family drama\n\
C,\"['Comedy']\",\"['wedding']\",\n";

fn cli_for(dir: &std::path::Path, args: &[&str]) -> Cli {
    let data = dir.join("movies.csv");
    fs::write(&data, CATALOG).unwrap();
    let data = data.to_string_lossy().to_string();
    let mut argv = vec!["recommend", "--data", data.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn text_output_lists_best_match() {
    let dir = tempdir().unwrap();
    let cli = cli_for(dir.path(), &["hero city action", "--top-n", "1"]);
    let out = run(&cli).unwrap();
    assert!(out.contains("Title: A"));
    assert!(out.contains("Genres: Action"));
    assert!(out.contains("Description: a hero saves the city"));
    assert!(!out.contains("Title: B"));
}

#[test]
fn json_output_reports_no_match() {
    let dir = tempdir().unwrap();
    let cli = cli_for(dir.path(), &["the a of", "--json"]);
    let json: Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
    assert_eq!(json["matched"], Value::Bool(false));
    assert_eq!(json["message"], NO_MATCH_MESSAGE);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[test]
fn json_output_carries_raw_scores() {
    let dir = tempdir().unwrap();
    let cli = cli_for(dir.path(), &["family drama", "--json"]);
    let json: Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["title"], "B");
    let score = results[0]["score"].as_f64().unwrap();
    assert!(score > 0.0 && score <= 1.0);
}

#[test]
fn zero_top_n_is_rejected() {
    assert!(Cli::try_parse_from(["recommend", "space", "--top-n", "0"]).is_err());
}

#[test]
fn missing_catalog_is_an_error() {
    let cli = Cli::try_parse_from(["recommend", "space", "--data", "/nonexistent/movies.csv"]).unwrap();
    assert!(run(&cli).is_err());
}

#[test]
fn very_large_top_n_lists_available_matches() {
    let dir = tempdir().unwrap();
    let cli = cli_for(dir.path(), &["hero city action", "--top-n", "1000000000000", "--json"]);
    let json: Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "A");
}
