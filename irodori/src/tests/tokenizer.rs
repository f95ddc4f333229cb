use crate::model::Model;
use crate::tokenizer::Tokenizer;

fn build_tokenizer(lexicon_csv: &str) -> Tokenizer {
    let model = Model::from_readers(lexicon_csv.as_bytes(), None::<&[u8]>).unwrap();
    Tokenizer::new(model)
}

fn texts(tokenizer: &Tokenizer, sentence: &str) -> Vec<String> {
    let mut worker = tokenizer.new_worker();
    worker.reset_sentence(sentence);
    worker.tokenize();
    worker.term_iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn test_tokenize_longest_match() {
    let tokenizer = build_tokenizer("big,0,1\nbig oh,1,4\n");
    let mut worker = tokenizer.new_worker();
    worker.reset_sentence("Big Oh!");
    worker.tokenize();

    assert_eq!(worker.num_terms(), 1);
    let t0 = worker.term(0);
    assert_eq!(t0.surface(), "Big Oh");
    assert_eq!(t0.text(), "big oh");
    assert_eq!(t0.range_byte(), 0..6);
    assert_eq!(t0.lexicon_id(), Some(1));
}

#[test]
fn test_tokenize_word_boundary() {
    let tokenizer = build_tokenizer("cat,0,1\n");
    let mut worker = tokenizer.new_worker();
    worker.reset_sentence("category");
    worker.tokenize();

    assert_eq!(worker.num_terms(), 1);
    assert!(!worker.term(0).is_known());
    assert_eq!(worker.term(0).surface(), "category");
}

#[test]
fn test_tokenize_deterministic() {
    let tokenizer = build_tokenizer("tree,0,5\nbig oh,1,4\nbig,2,1\n");
    let sentence = "The big tree said: Big oh, big TREES!\n\tTree.";
    let expected = texts(&tokenizer, sentence);
    assert_eq!(
        expected,
        vec!["The", "big", "tree", "said:", "big oh", "big", "TREES!", "tree"]
    );

    for _ in 0..3 {
        assert_eq!(texts(&tokenizer, sentence), expected);
    }
    let cloned = tokenizer.clone();
    assert_eq!(texts(&cloned, sentence), expected);
}

#[test]
fn test_worker_reuse() {
    let tokenizer = build_tokenizer("tree,0,5\n");
    let mut worker = tokenizer.new_worker();

    worker.reset_sentence("one tree two trees three");
    worker.tokenize();
    assert_eq!(worker.num_terms(), 5);

    worker.reset_sentence("tree");
    assert_eq!(worker.num_terms(), 0);
    worker.tokenize();
    assert_eq!(worker.num_terms(), 1);
    assert_eq!(worker.term(0).text(), "tree");

    worker.reset_sentence("");
    worker.tokenize();
    assert_eq!(worker.num_terms(), 0);
}

#[test]
fn test_tokenize_with_stored_model() {
    let model = Model::from_readers(
        "tree,0,5\nbig oh,1,4\n".as_bytes(),
        Some("0,1,2\n".as_bytes()),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.irodori");
    model.write(std::fs::File::create(&path).unwrap()).unwrap();

    let tokenizer = Tokenizer::new(Model::from_path(&path).unwrap());
    assert_eq!(
        texts(&tokenizer, "Big oh, a tree."),
        vec!["big oh", "a", "tree"]
    );
}
