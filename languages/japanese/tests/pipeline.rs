use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use sieve_config::LinkScheme;
use sieve_core::dictionary::{Definition, LookupError, LookupSource};
use sieve_core::language::Tokenizer;
use sieve_core::omission::OmitSet;
use sieve_core::report::{ReportOptions, SectionKind};
use sieve_core::resolver::{Layer, MatchKey};
use sieve_core::substitution::SubstitutionMap;
use sieve_core::{InputError, SieveError};
use sieve_dictionary::MemorySource;
use sieve_lang_japanese::{KanjiSieve, ScriptRunTokenizer, glossary};

/// Splits on whitespace so each test controls its tokens exactly
struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

struct OfflineSource;

impl LookupSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn lookup_by_key(&self, _term: &str) -> Result<Option<Definition>, LookupError> {
        Err(LookupError::Unavailable("database is locked".into()))
    }
}

fn sieve() -> KanjiSieve {
    KanjiSieve::new(Box::new(WhitespaceTokenizer))
}

fn core() -> MemorySource {
    MemorySource::from_entries(
        "core",
        [
            Definition::new("猫", "ねこ", "noun", "cat"),
            Definition::new("本", "ほん", "noun", "book"),
        ],
    )
}

fn jmdict() -> MemorySource {
    MemorySource::from_entries(
        "jmdict",
        [
            Definition::new("犬", "いぬ", "n", "dog"),
            Definition::new("矢張り", "やはり", "adv", "as expected"),
            // reading that collides with a kanji-bearing candidate
            Definition::new("ほんや", "本屋", "n", "bookshop"),
        ],
    )
    .with_reading_lookup(true)
}

fn two_layers<'a>(core: &'a MemorySource, jmdict: &'a MemorySource) -> [Layer<'a>; 2] {
    [
        Layer::enabled("core", "Core 6k list", core),
        Layer::enabled("jmdict", "jmdict list", jmdict),
    ]
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const TEXT: &str = "猫 と 犬 と 本 と 本屋 。 やはり ちょっと";

#[test]
fn text_without_kanji_is_rejected() {
    let err = sieve().run("ひらがな だけ です", &[]).unwrap_err();
    assert!(matches!(err, SieveError::Input(InputError::NoKanji)));

    let err = sieve().run("", &[]).unwrap_err();
    assert!(matches!(err, SieveError::Input(InputError::Empty)));
}

#[test]
fn every_searched_term_ends_in_exactly_one_place() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let outcome = sieve().run(TEXT, &chain).unwrap();

    assert_eq!(
        outcome.searched.iter().cloned().collect::<BTreeSet<_>>(),
        set(&["猫", "犬", "本", "本屋", "やはり", "ちょっと"])
    );
    assert_eq!(
        outcome.resolution.matched_count() + outcome.resolution.orphans.len(),
        outcome.searched.len()
    );

    let matched: BTreeSet<String> = outcome.resolution.matches().map(|m| m.term.clone()).collect();
    let orphans: BTreeSet<String> = outcome.resolution.orphans.iter().cloned().collect();
    assert!(matched.is_disjoint(&orphans));
}

#[test]
fn reading_fallback_only_for_kana_terms() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let outcome = sieve().run(TEXT, &chain).unwrap();

    let yahari = outcome
        .resolution
        .matches()
        .find(|m| m.term == "やはり")
        .unwrap();
    assert_eq!(yahari.via, MatchKey::Reading);
    assert_eq!(yahari.definition.headword, "矢張り");

    // 本屋 is kanji-bearing, so its collision with a reading is never tried
    assert_eq!(outcome.resolution.orphans, vec!["ちょっと", "本屋"]);
}

#[test]
fn earlier_layers_shadow_later_ones() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let outcome = sieve().run(TEXT, &chain).unwrap();

    let core_terms: Vec<&str> = outcome.resolution.layers[0]
        .matched
        .iter()
        .map(|m| m.term.as_str())
        .collect();
    assert_eq!(core_terms, vec!["本", "猫"]);
    assert_eq!(outcome.resolution.layers[1].matched.len(), 2);
}

#[test]
fn substitution_then_omission() {
    let outcome = sieve()
        .with_substitutions(SubstitutionMap::from_pairs([("本", "x")]))
        .with_omissions(["犬"].into_iter().collect::<OmitSet>())
        .run("猫 犬 本", &[])
        .unwrap();

    assert_eq!(outcome.searched, vec!["猫"]);
    assert_eq!(outcome.omitted, vec!["犬"]);
    assert_eq!(outcome.suppressed, set(&["本"]));
    assert_eq!(outcome.resolution.orphans, vec!["猫"]);
}

#[test]
fn suppressed_terms_reach_no_layer() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let outcome = sieve()
        .with_substitutions(SubstitutionMap::from_pairs([("猫", "x"), ("ちょっと", "x")]))
        .run(TEXT, &chain)
        .unwrap();

    for layer in &outcome.resolution.layers {
        assert!(layer.matched.iter().all(|m| m.term != "猫"));
        assert!(!layer.remaining.iter().any(|t| t == "猫" || t == "ちょっと"));
    }
    assert!(!outcome.resolution.orphans.iter().any(|t| t == "ちょっと"));
    assert!(outcome.omitted.is_empty());
}

#[test]
fn unrelated_substitutions_change_nothing() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);

    let plain = sieve().run(TEXT, &chain).unwrap();
    let mapped = sieve()
        .with_substitutions(SubstitutionMap::from_pairs([("言っ", "言う"), ("鳥", "x")]))
        .run(TEXT, &chain)
        .unwrap();

    assert_eq!(plain.searched, mapped.searched);
    assert_eq!(plain.resolution, mapped.resolution);
}

#[test]
fn replacement_is_searched_instead() {
    let core = core();
    let chain = [Layer::enabled("core", "Core 6k list", &core)];
    let outcome = sieve()
        .with_substitutions(SubstitutionMap::from_pairs([("猫たち", "猫")]))
        .run("猫たち が いる", &chain)
        .unwrap();

    assert_eq!(outcome.searched, vec!["猫"]);
    assert_eq!(outcome.resolution.matched_count(), 1);
}

#[test]
fn all_sources_disabled_leaves_only_orphans() {
    let chain = [
        Layer::disabled("core", "Core 6k list"),
        Layer::disabled("user", "user list"),
        Layer::disabled("jmdict", "jmdict list"),
    ];
    let outcome = sieve().run(TEXT, &chain).unwrap();

    assert_eq!(outcome.resolution.orphans, outcome.searched);
    assert_eq!(outcome.resolution.matched_count(), 0);
    assert_eq!(outcome.flashcards(), "");

    let report = outcome.report(ReportOptions {
        link: LinkScheme::Jisho,
        show_orphans: true,
    });
    assert!(report.section(&SectionKind::Layer("core".into())).is_none());
    assert!(report.section(&SectionKind::Orphans).is_some());
}

#[test]
fn unavailable_source_aborts_the_run() {
    let core = core();
    let chain = [
        Layer::enabled("core", "Core 6k list", &core),
        Layer::enabled("user", "user list", &OfflineSource),
    ];
    let err = sieve().run(TEXT, &chain).unwrap_err();

    match err {
        SieveError::SourceUnavailable { name, .. } => assert_eq!(name, "user"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn grades_cover_every_discrete_kanji() {
    let outcome = sieve().run(TEXT, &[]).unwrap();
    let grades = outcome.grades.as_ref().unwrap();
    assert_eq!(grades.total(), outcome.stats.discrete());

    let without = sieve().with_grades(false).run(TEXT, &[]).unwrap();
    assert!(without.grades.is_none());
}

#[test]
fn flashcards_follow_match_order() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let outcome = sieve().run(TEXT, &chain).unwrap();

    assert_eq!(
        outcome.flashcards(),
        "本\tほん\tbook\n猫\tねこ\tcat\n犬\tいぬ\tdog\n矢張り\tやはり\tas expected\n"
    );
}

#[test]
fn script_run_tokenizer_drives_the_pipeline() {
    let core = core();
    let chain = [Layer::enabled("core", "Core 6k list", &core)];
    let outcome = KanjiSieve::new(Box::new(ScriptRunTokenizer::new()))
        .run("猫と本を読む。", &chain)
        .unwrap();

    assert_eq!(outcome.searched, vec!["本", "猫", "読む"]);
    assert_eq!(outcome.resolution.orphans, vec!["読む"]);
}

#[test]
fn script_runs_do_not_turn_clauses_into_candidates() {
    let outcome = KanjiSieve::new(Box::new(ScriptRunTokenizer::new()))
        .run("これはとてもいいです。猫がいる。", &[])
        .unwrap();

    assert_eq!(outcome.searched, vec!["とても", "猫"]);
}

#[test]
fn glossary_resolves_word_lists() {
    let (core, jmdict) = (core(), jmdict());
    let chain = two_layers(&core, &jmdict);
    let words = vec!["猫".to_string(), "やはり".to_string(), "鳥".to_string()];

    let resolution = glossary(&words, &chain).unwrap();
    assert_eq!(resolution.matched_count(), 2);
    assert_eq!(resolution.orphans, vec!["鳥"]);
}
