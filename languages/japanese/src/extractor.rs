use std::collections::{BTreeSet, HashMap, HashSet};

use sieve_core::InputError;
use sieve_types::{CharacterCount, KanjiStats};

use crate::script::{contains_ascii, contains_kanji, is_kanji};

/// Minimum length of a kana-only candidate, in characters
pub const MIN_KANA_LEN: usize = 3;

/// Count every ideograph in `text`.
///
/// Counts are ordered by descending frequency, ties by code point.
pub fn count_kanji(text: &str) -> Result<KanjiStats, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let mut tally: HashMap<char, usize> = HashMap::new();
    let mut characters = 0;
    for c in text.chars() {
        characters += 1;
        if is_kanji(c) {
            *tally.entry(c).or_default() += 1;
        }
    }
    if tally.is_empty() {
        return Err(InputError::NoKanji);
    }

    let mut counts: Vec<CharacterCount> = tally
        .into_iter()
        .map(|(c, n)| CharacterCount::new(c, n))
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.character.cmp(&b.character)));

    Ok(KanjiStats {
        characters,
        kanji_total: counts.iter().map(|c| c.count).sum(),
        counts,
    })
}

/// The two candidate sets, disjoint by construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub kanji: BTreeSet<String>,
    pub kana: BTreeSet<String>,
}

/// `っ`/`ッ` at either end of a multi-character token marks a cut through a word
fn is_geminate_fragment(token: &str) -> bool {
    let mut chars = token.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    matches!(first, 'っ' | 'ッ') || matches!(last, 'っ' | 'ッ')
}

fn is_kana_candidate(token: &str) -> bool {
    token.chars().count() >= MIN_KANA_LEN
        // a token spanning a space, U+3000 included, is never one word
        && !token.chars().any(char::is_whitespace)
        && !contains_kanji(token)
        && !contains_ascii(token)
        && !is_geminate_fragment(token)
}

/// Split tokens into kanji-bearing and kana-only candidates.
///
/// A token is kanji-bearing when it holds any character of `kanji`, the
/// document's own ideograph set.
pub fn extract<I, S>(kanji: &HashSet<char>, tokens: I) -> Candidates
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = Candidates::default();
    for token in tokens {
        let token = token.as_ref();
        if token.chars().any(|c| kanji.contains(&c)) {
            candidates.kanji.insert(token.to_string());
        } else if is_kana_candidate(token) {
            candidates.kana.insert(token.to_string());
        }
    }
    tracing::debug!(
        kanji = candidates.kanji.len(),
        kana = candidates.kana.len(),
        "extracted candidates"
    );
    candidates
}
