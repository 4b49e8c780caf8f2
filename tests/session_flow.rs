mod common;

use std::fs;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use hifzdr::corpus::{Corpus, CorpusError};
use hifzdr::engine::Mode;
use hifzdr::engine::filter::{self, FilterError, RangeSelector, SavedRange};
use hifzdr::engine::groups;
use hifzdr::generator::ruku::{Edge, next_ruku_question};
use hifzdr::generator::sampling::next_ruku_count;
use hifzdr::generator::skip::{max_count, skip_question};
use hifzdr::generator::{DrillKind, GenerateError};
use hifzdr::session::SessionContext;
use hifzdr::store::json_store::JsonStore;

fn write_corpus(dir: &TempDir, surahs: u32) -> std::path::PathBuf {
    let path = dir.path().join("master_quran.json");
    let json = serde_json::to_string(&common::synthetic_ayahs(surahs)).unwrap();
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn corpus_loads_from_disk_in_canonical_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shuffled.json");
    let mut ayahs = common::synthetic_ayahs(12);
    ayahs.reverse();
    fs::write(&path, serde_json::to_string(&ayahs).unwrap()).unwrap();

    let corpus = Corpus::load(&path).unwrap();
    assert_eq!(corpus.len(), ayahs.len());
    assert_eq!(corpus.ayahs()[0].key, "1:1");
    for pair in corpus.ayahs().windows(2) {
        assert!(pair[0].order_key() < pair[1].order_key());
    }
    assert_eq!(corpus.position("1:1"), Some(0));
    assert_eq!(corpus.surah_name(2), Some("Surah 2"));
}

#[test]
fn corpus_file_uses_on_disk_field_names() {
    let json = r#"[
        {"ayah_key": "1:2", "surah": 1, "ayah": 2, "juzz": 1, "quarter": 1, "ruku": 1,
         "text": "b", "surah_name": "Al-Fatihah"},
        {"ayah_key": "1:1", "surah": 1, "ayah": 1, "juzz": 1, "quarter": 1, "ruku": 1,
         "text": "a", "surah_name": "Al-Fatihah"}
    ]"#;
    let corpus = Corpus::from_json(json).unwrap();
    assert_eq!(corpus.ayahs()[0].text, "a");
    assert_eq!(corpus.ayahs()[1].number, 2);
}

#[test]
fn missing_corpus_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Corpus::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
}

#[test]
fn session_persists_ranges_and_regenerates() {
    let dir = TempDir::new().unwrap();
    let corpus = Arc::new(Corpus::load(&write_corpus(&dir, 30)).unwrap());
    let store = JsonStore::with_base_dir(dir.path().join("data")).unwrap();

    let mut session = SessionContext::new(corpus.clone(), store.load_ranges(), Mode::Study);
    assert_eq!(session.generate(1).unwrap_err(), GenerateError::EmptySelection);

    session.add_range("surah:3".parse().unwrap()).unwrap();
    session.add_range("ruku:1:1-2".parse().unwrap()).unwrap();
    store.save_ranges(session.ranges()).unwrap();

    let reopened = SessionContext::new(corpus, store.load_ranges(), Mode::Test);
    assert_eq!(reopened.ranges(), session.ranges());
    assert_eq!(reopened.subset().len(), session.subset().len());

    let first = session.generate(5).unwrap().questions.clone();
    assert!(!first.is_empty());
    let count = first[0].answers.len();
    assert_eq!(session.advance(0), Some(1));
    assert_eq!(session.reveal_all(0), Some(count));
    assert_eq!(session.reveal_all(0), Some(count));
    assert_eq!(session.advance(0), Some(count));

    // A new batch starts with everything hidden again.
    session.generate(6).unwrap();
    assert_eq!(session.reveal().revealed(0), 0);
}

#[test]
fn failed_generation_keeps_the_previous_batch() {
    let corpus = Arc::new(common::synthetic_corpus(20));
    let mut session = SessionContext::new(
        corpus,
        vec![SavedRange::new(RangeSelector::Juz(vec![1]))],
        Mode::Study,
    );
    let seed = session.generate(11).unwrap().seed;
    session.toggle_range(0);
    assert!(session.subset().is_empty());
    assert_eq!(session.generate(12).unwrap_err(), GenerateError::EmptySelection);
    assert_eq!(session.batch().map(|b| b.seed), Some(seed));
}

#[test]
fn invalid_ranges_are_rejected_before_saving() {
    let corpus = Arc::new(common::synthetic_corpus(20));
    let mut session = SessionContext::new(corpus.clone(), Vec::new(), Mode::Study);
    let max = corpus.max_ruku(2).unwrap();

    let err = session
        .add_range(RangeSelector::Ruku { juz: 2, start: 1, end: max + 1 })
        .unwrap_err();
    assert_eq!(err, FilterError::RukuOutOfRange { juz: 2, max });
    assert_eq!(
        "ayah:3:9-2".parse::<RangeSelector>().unwrap_err(),
        FilterError::StartAfterEnd { start: 9, end: 2 }
    );
    assert!(session.ranges().is_empty());
}

#[test]
fn next_ruku_over_three_rukus_returns_the_other_two() {
    let corpus = common::full_corpus();
    // Three rukus of surah 2 (sizes 10, 10, 10 in the synthetic corpus).
    let subset = filter::apply(
        &corpus,
        &[SavedRange::new("ayah:2:1-30".parse().unwrap())],
    );
    let groups = groups::partition(&subset);
    assert_eq!(groups.len(), 3);

    let mut rng = SmallRng::seed_from_u64(0);
    for mode in [Mode::Study, Mode::Test] {
        let count = next_ruku_count(&mut rng, groups.len() - 1, mode);
        assert_eq!(count, 2);
        let q = next_ruku_question(&subset, &groups, 0, count, Edge::First).unwrap();
        assert_eq!(q.kind, DrillKind::NextRukuFirst);
        let keys: Vec<&str> = q.answers.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["2:11", "2:21"]);
    }
}

#[test]
fn skip_drill_stops_at_the_end_of_the_selection() {
    let corpus = common::full_corpus();
    let subset = filter::apply(
        &corpus,
        &[SavedRange::new("ayah:4:1-10".parse().unwrap())],
    );
    let q = skip_question(&subset, 0, 3, max_count(Mode::Study)).unwrap();
    let numbers: Vec<u32> = q.answers.iter().map(|a| a.number).collect();
    assert_eq!(numbers, vec![1, 4, 7, 10]);
    assert!(q.prompt.ends_with("until the end of the selected range"));
    assert!(!q.prompt.contains("for 5 ayahs"));
}
