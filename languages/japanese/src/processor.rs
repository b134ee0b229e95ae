use std::collections::BTreeSet;

use sieve_core::language::Tokenizer;
use sieve_core::omission::OmitSet;
use sieve_core::preprocess::{Preprocessor, preprocessor};
use sieve_core::report::{self, Report, ReportInput, ReportOptions};
use sieve_core::resolver::{self, CandidateSet, Layer, Resolution};
use sieve_core::substitution::SubstitutionMap;
use sieve_types::{GradeBreakdown, KanjiStats};

use crate::extractor::{count_kanji, extract};
use crate::grade::classify;
use crate::script::contains_kanji;

/// The whole sieve: count, classify, tokenize, extract, rewrite, omit, resolve
pub struct KanjiSieve {
    tokenizer: Box<dyn Tokenizer>,
    preprocessor: Box<dyn Preprocessor>,
    substitutions: SubstitutionMap,
    omissions: OmitSet,
    classify_by_grade: bool,
}

/// Everything one run produced, ready for reporting
#[derive(Debug, Clone)]
pub struct SieveOutcome {
    /// Text as analysed, after preprocessing
    pub text: String,
    pub stats: KanjiStats,
    pub grades: Option<GradeBreakdown>,
    /// Terms dropped by a suppress entry
    pub suppressed: BTreeSet<String>,
    /// Terms handed to the resolver
    pub searched: Vec<String>,
    pub omitted: Vec<String>,
    pub resolution: Resolution,
}

impl SieveOutcome {
    pub fn report(&self, options: ReportOptions) -> Report {
        report::assemble(
            &ReportInput {
                text: &self.text,
                stats: &self.stats,
                grades: self.grades.as_ref(),
                searched: &self.searched,
                omitted: &self.omitted,
                resolution: &self.resolution,
            },
            options,
        )
    }

    pub fn flashcards(&self) -> String {
        self.resolution.flashcards()
    }

    pub fn orphan_list(&self) -> String {
        self.resolution.orphan_list()
    }
}

impl KanjiSieve {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            preprocessor: preprocessor(false),
            substitutions: SubstitutionMap::new(),
            omissions: OmitSet::new(),
            classify_by_grade: true,
        }
    }

    pub fn with_substitutions(mut self, substitutions: SubstitutionMap) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn with_omissions(mut self, omissions: OmitSet) -> Self {
        self.omissions = omissions;
        self
    }

    pub fn with_grades(mut self, enabled: bool) -> Self {
        self.classify_by_grade = enabled;
        self
    }

    /// NFKC fold the input before analysis
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.preprocessor = preprocessor(enabled);
        self
    }

    pub fn run(&self, text: &str, chain: &[Layer<'_>]) -> sieve_core::Result<SieveOutcome> {
        let text = self.preprocessor.process(text);
        let stats = count_kanji(&text)?;
        tracing::info!(
            characters = stats.characters,
            kanji = stats.kanji_total,
            discrete = stats.discrete(),
            "counted kanji"
        );

        let grades = self.classify_by_grade.then(|| classify(&stats.counts));

        let tokens = self.tokenizer.tokenize(&text);
        tracing::debug!(tokenizer = self.tokenizer.name(), tokens = tokens.len(), "tokenized");
        let candidates = extract(&stats.kanji_set(), &tokens);

        let kanji = self.substitutions.apply(candidates.kanji);
        let kana = self.substitutions.apply(candidates.kana);

        // a term produced by both sides counts as kanji-bearing
        let kana_only: BTreeSet<String> = kana
            .terms
            .iter()
            .filter(|term| !kanji.terms.contains(*term) && !contains_kanji(term))
            .cloned()
            .collect();

        let suppressed: BTreeSet<String> =
            kanji.suppressed.union(&kana.suppressed).cloned().collect();
        let merged: BTreeSet<String> = kanji.terms.into_iter().chain(kana.terms).collect();
        let omitted = self.omissions.partition(merged);
        tracing::info!(
            searched = omitted.remaining.len(),
            omitted = omitted.omitted.len(),
            suppressed = suppressed.len(),
            "candidates ready"
        );

        let searched: Vec<String> = omitted.remaining.iter().cloned().collect();
        let kana_only: Vec<String> = kana_only
            .into_iter()
            .filter(|term| omitted.remaining.contains(term))
            .collect();
        let resolution = resolver::resolve(CandidateSet::new(omitted.remaining, kana_only), chain)?;
        tracing::info!(
            matched = resolution.matched_count(),
            orphans = resolution.orphans.len(),
            "resolution finished"
        );

        Ok(SieveOutcome {
            text,
            stats,
            grades,
            suppressed,
            searched,
            omitted: omitted.omitted.into_iter().collect(),
            resolution,
        })
    }
}

/// Resolve a plain word list. Words without an ideograph may match by reading.
pub fn glossary(words: &[String], chain: &[Layer<'_>]) -> sieve_core::Result<Resolution> {
    let kana_only: Vec<String> = words
        .iter()
        .filter(|word| !contains_kanji(word))
        .cloned()
        .collect();
    let resolution = resolver::resolve(CandidateSet::new(words.iter().cloned(), kana_only), chain)?;
    tracing::info!(
        words = words.len(),
        matched = resolution.matched_count(),
        orphans = resolution.orphans.len(),
        "glossary resolved"
    );
    Ok(resolution)
}
