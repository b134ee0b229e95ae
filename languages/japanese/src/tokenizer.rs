//! Tokenizer backends for Japanese text.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use sieve_core::language::Tokenizer;

use crate::script::ScriptClass;

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("Failed to open tokenizer dictionary {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid tokenizer dictionary {path}: {reason}")]
    Dictionary { path: String, reason: String },
}

/// MeCab style segmentation backed by a compiled vibrato system dictionary
pub struct VibratoTokenizer {
    tokenizer: vibrato::Tokenizer,
}

impl VibratoTokenizer {
    /// Read an uncompressed system dictionary (`system.dic`)
    pub fn from_path(path: &Path) -> Result<Self, TokenizerError> {
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|source| TokenizerError::Open {
            path: shown.clone(),
            source,
        })?;
        let dictionary = vibrato::Dictionary::read(BufReader::new(file)).map_err(|e| {
            TokenizerError::Dictionary {
                path: shown.clone(),
                reason: e.to_string(),
            }
        })?;
        tracing::info!(path = %shown, "loaded vibrato dictionary");
        Ok(Self {
            tokenizer: vibrato::Tokenizer::new(dictionary),
        })
    }
}

impl Tokenizer for VibratoTokenizer {
    fn name(&self) -> &str {
        "vibrato"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut worker = self.tokenizer.new_worker();
        let mut tokens = Vec::new();
        // one sentence per line keeps the lattice small
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            worker.reset_sentence(line);
            worker.tokenize();
            tokens.extend(
                worker
                    .token_iter()
                    .map(|token| token.surface().to_string())
                    .filter(|surface| !surface.trim().is_empty()),
            );
        }
        tokens
    }
}

/// Function words cut out of hiragana runs; the longest match wins
const FUNCTION_WORDS: [&str; 23] = [
    "ましょう", "でした", "ました", "ません", "ながら", "けれど", "から", "まで", "より",
    "だけ", "ので", "のに", "です", "ます", "を", "は", "が", "に", "で", "と", "の", "へ", "も",
];

/// Hiragana words kept whole when a run starts with them
const KANA_WORDS: [&str; 22] = [
    "ちょっと", "やっぱり", "やはり", "ところ", "とても", "これ", "それ", "あれ", "どれ",
    "ここ", "そこ", "どこ", "もの", "こと", "もう", "まだ", "いい", "いる", "ある", "ない",
    "する", "なる",
];

/// Dictionary free fallback that cuts at script boundaries.
///
/// An ideograph run keeps the hiragana that follows it up to the first
/// function word, so `食べる` stays whole while `本を` and `見ているから`
/// split. The rest of a hiragana run is cut at function words and at the
/// common words of `KANA_WORDS`. A one character particle only cuts when
/// the word before it is empty or at least two characters long, which keeps
/// `やはり` whole. Punctuation becomes single tokens and whitespace is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRunTokenizer;

impl ScriptRunTokenizer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Kanji,
    Hiragana,
    Katakana,
    Ascii,
    Punctuation,
    Other,
    Break,
}

impl RunKind {
    fn of(c: char) -> Self {
        match ScriptClass::of(c) {
            ScriptClass::Kanji => RunKind::Kanji,
            ScriptClass::Hiragana => RunKind::Hiragana,
            ScriptClass::Katakana => RunKind::Katakana,
            ScriptClass::Ascii => RunKind::Ascii,
            ScriptClass::Punctuation => RunKind::Punctuation,
            ScriptClass::Other => RunKind::Other,
            ScriptClass::Whitespace => RunKind::Break,
        }
    }
}

fn script_runs(text: &str) -> Vec<(RunKind, Vec<char>)> {
    let mut runs: Vec<(RunKind, Vec<char>)> = Vec::new();
    for c in text.chars() {
        let kind = RunKind::of(c);
        match runs.last_mut() {
            Some((last, chars)) if *last == kind && kind != RunKind::Punctuation => chars.push(c),
            _ => runs.push((kind, vec![c])),
        }
    }
    runs
}

/// Length of the longest of `words` that `rest` starts with
fn longest_match(rest: &[char], words: &[&str]) -> Option<usize> {
    words
        .iter()
        .map(|word| word.chars().collect::<Vec<_>>())
        .filter(|word| rest.starts_with(word))
        .map(|word| word.len())
        .max()
}

/// Okurigana taken by the preceding ideograph run
fn okurigana_len(run: &[char]) -> usize {
    (0..run.len())
        .find(|&i| longest_match(&run[i..], &FUNCTION_WORDS).is_some())
        .unwrap_or(run.len())
}

fn split_kana(run: &[char], tokens: &mut Vec<String>) {
    let mut pending = String::new();
    let mut pending_len = 0usize;
    let mut i = 0;

    while i < run.len() {
        let rest = &run[i..];
        let word = longest_match(rest, &KANA_WORDS).filter(|_| pending_len == 0);
        let function = longest_match(rest, &FUNCTION_WORDS)
            .filter(|&n| n > 1 || pending_len == 0 || pending_len >= 2);

        match word.max(function) {
            Some(n) => {
                if !pending.is_empty() {
                    tokens.push(std::mem::take(&mut pending));
                }
                pending_len = 0;
                tokens.push(rest[..n].iter().collect());
                i += n;
            }
            None => {
                pending.push(run[i]);
                pending_len += 1;
                i += 1;
            }
        }
    }
    if !pending.is_empty() {
        tokens.push(pending);
    }
}

impl Tokenizer for ScriptRunTokenizer {
    fn name(&self) -> &str {
        "script-run"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut previous: Option<RunKind> = None;

        for (kind, chars) in script_runs(text) {
            match kind {
                RunKind::Break => {}
                RunKind::Hiragana if previous == Some(RunKind::Kanji) => {
                    let stem = okurigana_len(&chars);
                    if let Some(last) = tokens.last_mut() {
                        last.extend(&chars[..stem]);
                    }
                    split_kana(&chars[stem..], &mut tokens);
                }
                RunKind::Hiragana => split_kana(&chars, &mut tokens),
                _ => tokens.push(chars.iter().collect()),
            }
            previous = Some(kind);
        }
        tokens
    }
}
