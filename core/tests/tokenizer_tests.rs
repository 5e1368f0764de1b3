use cinematch_core::tokenizer::{analyze, tokenize};

#[test]
fn it_lowercases_and_splits_on_word_boundaries() {
    let words = tokenize("Sci-Fi ADVENTURE, deep-space!");
    assert_eq!(words, vec!["sci", "fi", "adventure", "deep", "space"]);
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn stopword_only_text_has_no_terms() {
    assert!(analyze("the a of", 2).is_empty());
    assert!(analyze("", 2).is_empty());
}

#[test]
fn bigrams_follow_unigrams() {
    let terms = analyze("haunted house horror", 2);
    assert_eq!(
        terms,
        vec!["haunted", "house", "horror", "haunted house", "house horror"]
    );
}
