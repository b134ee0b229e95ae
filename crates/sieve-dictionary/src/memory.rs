use std::collections::HashMap;

use serde::Deserialize;
use sieve_core::dictionary::{Definition, LookupError, LookupSource};

/// Dictionary held entirely in memory, indexed by written form and reading
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    entries: Vec<Definition>,
    key_index: HashMap<String, usize>,
    reading_index: HashMap<String, usize>,
    reading_lookup: bool,
}

// jmdict-simplified layout
#[derive(Debug, Deserialize)]
struct JmdictJson {
    words: Vec<JmdictWord>,
}

#[derive(Debug, Deserialize)]
struct JmdictWord {
    #[serde(default)]
    kanji: Vec<JmdictText>,
    #[serde(default)]
    kana: Vec<JmdictText>,
    #[serde(default)]
    sense: Vec<JmdictSense>,
}

#[derive(Debug, Deserialize)]
struct JmdictText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct JmdictSense {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Vec<String>,
    #[serde(default)]
    gloss: Vec<JmdictGloss>,
}

#[derive(Debug, Deserialize)]
struct JmdictGloss {
    #[serde(default = "default_lang")]
    lang: String,
    text: String,
}

fn default_lang() -> String {
    "eng".to_string()
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Index `definitions` by headword and reading. The first entry for a key wins.
    pub fn from_entries(name: impl Into<String>, definitions: impl IntoIterator<Item = Definition>) -> Self {
        let mut source = Self::new(name);
        for definition in definitions {
            let keys = vec![definition.headword.clone()];
            source.push(definition, keys);
        }
        source
    }

    /// Parse a jmdict-simplified JSON export. Words without an English gloss are skipped.
    pub fn from_jmdict_json(name: impl Into<String>, json: &str) -> Result<Self, LookupError> {
        let data: JmdictJson =
            serde_json::from_str(json).map_err(|e| LookupError::InvalidFormat(e.to_string()))?;

        let mut source = Self::new(name);
        for word in data.words {
            let mut meanings = Vec::new();
            let mut pos: Vec<String> = Vec::new();
            for sense in &word.sense {
                meanings.extend(
                    sense
                        .gloss
                        .iter()
                        .filter(|gloss| gloss.lang == "eng")
                        .map(|gloss| gloss.text.clone()),
                );
                for tag in &sense.part_of_speech {
                    if !pos.contains(tag) {
                        pos.push(tag.clone());
                    }
                }
            }
            if meanings.is_empty() {
                continue;
            }

            let reading = word.kana.first().map(|k| k.text.clone()).unwrap_or_default();
            let headword = word
                .kanji
                .first()
                .map(|k| k.text.clone())
                .unwrap_or_else(|| reading.clone());

            // Kana-only words are keyed by their kana, like the written column of the db export
            let keys: Vec<String> = if word.kanji.is_empty() {
                word.kana.iter().map(|k| k.text.clone()).collect()
            } else {
                word.kanji.iter().map(|k| k.text.clone()).collect()
            };
            let readings: Vec<String> = word.kana.iter().map(|k| k.text.clone()).collect();

            let index = source.push(
                Definition::new(headword, reading, pos.join(", "), meanings.join("; ")),
                keys,
            );
            for reading in readings {
                source.reading_index.entry(reading).or_insert(index);
            }
        }

        tracing::info!(source = %source.name, entries = source.len(), "loaded jmdict json");
        Ok(source.with_reading_lookup(true))
    }

    /// Parse `headword<TAB>reading<TAB>tags<TAB>gloss[<TAB>extra]` lines.
    ///
    /// Blank lines and lines starting with `#` are ignored; short lines are
    /// skipped with a warning.
    pub fn from_tsv(name: impl Into<String>, text: &str) -> Self {
        let mut source = Self::new(name);
        for (number, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() < 4 || fields[0].is_empty() {
                tracing::warn!(source = %source.name, line = number + 1, "skipping malformed row");
                continue;
            }
            let mut definition = Definition::new(fields[0], fields[1], fields[2], fields[3]);
            if let Some(extra) = fields.get(4) {
                definition = definition.with_extra(*extra);
            }
            source.push(definition, vec![fields[0].to_string()]);
        }
        tracing::info!(source = %source.name, entries = source.len(), "loaded tsv list");
        source
    }

    /// Whether reading lookups are answered from the reading index
    pub fn with_reading_lookup(mut self, enabled: bool) -> Self {
        self.reading_lookup = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, definition: Definition, keys: Vec<String>) -> usize {
        let index = self.entries.len();
        if !definition.reading.is_empty() {
            self.reading_index
                .entry(definition.reading.clone())
                .or_insert(index);
        }
        self.entries.push(definition);
        for key in keys {
            self.key_index.entry(key).or_insert(index);
        }
        index
    }

    fn get(&self, index: Option<&usize>) -> Option<Definition> {
        index.and_then(|&i| self.entries.get(i)).cloned()
    }
}

impl LookupSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_by_key(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        Ok(self.get(self.key_index.get(term)))
    }

    fn supports_reading(&self) -> bool {
        self.reading_lookup
    }

    fn lookup_by_reading(&self, term: &str) -> Result<Option<Definition>, LookupError> {
        if !self.reading_lookup {
            return Ok(None);
        }
        Ok(self.get(self.reading_index.get(term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JMDICT: &str = r#"{
        "words": [
            {
                "id": "1",
                "kanji": [{"text": "猫"}],
                "kana": [{"text": "ねこ"}],
                "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "cat"}]}]
            },
            {
                "id": "2",
                "kanji": [],
                "kana": [{"text": "やはり"}, {"text": "やっぱり"}],
                "sense": [
                    {"partOfSpeech": ["adv"], "gloss": [{"lang": "eng", "text": "as expected"}]},
                    {"partOfSpeech": ["adv"], "gloss": [{"lang": "eng", "text": "also"}]}
                ]
            },
            {
                "id": "3",
                "kanji": [{"text": "犬"}],
                "kana": [{"text": "いぬ"}],
                "sense": [{"gloss": [{"lang": "ger", "text": "Hund"}]}]
            }
        ]
    }"#;

    #[test]
    fn jmdict_json_indexes_kanji_and_kana() {
        let source = MemorySource::from_jmdict_json("jmdict", JMDICT).unwrap();
        assert_eq!(source.len(), 2);
        assert!(source.supports_reading());

        let cat = source.lookup_by_key("猫").unwrap().unwrap();
        assert_eq!(cat, Definition::new("猫", "ねこ", "n", "cat"));

        let yahari = source.lookup_by_key("やはり").unwrap().unwrap();
        assert_eq!(yahari.tags, "adv");
        assert_eq!(yahari.gloss, "as expected; also");

        let by_reading = source.lookup_by_reading("ねこ").unwrap().unwrap();
        assert_eq!(by_reading.headword, "猫");
        assert!(source.lookup_by_reading("やっぱり").unwrap().is_some());
    }

    #[test]
    fn words_without_english_are_skipped() {
        let source = MemorySource::from_jmdict_json("jmdict", JMDICT).unwrap();
        assert_eq!(source.lookup_by_key("犬").unwrap(), None);
    }

    #[test]
    fn bad_json_is_invalid_format() {
        let err = MemorySource::from_jmdict_json("jmdict", "{").unwrap_err();
        assert!(matches!(err, LookupError::InvalidFormat(_)));
    }

    #[test]
    fn tsv_rows_skip_comments_and_short_lines() {
        let text = "# headword\treading\ttags\tgloss\n\n猫\tねこ\tnoun\tcat\t猫のこと\n犬\tいぬ\n本\tほん\tnoun\tbook\n";
        let source = MemorySource::from_tsv("user", text);

        assert_eq!(source.len(), 2);
        let cat = source.lookup_by_key("猫").unwrap().unwrap();
        assert_eq!(cat.extra.as_deref(), Some("猫のこと"));
        assert_eq!(source.lookup_by_key("犬").unwrap(), None);
    }

    #[test]
    fn reading_lookup_is_off_unless_enabled() {
        let source = MemorySource::from_tsv("user", "本\tほん\tnoun\tbook\n");
        assert!(!source.supports_reading());
        assert_eq!(source.lookup_by_reading("ほん").unwrap(), None);

        let source = source.with_reading_lookup(true);
        assert_eq!(source.lookup_by_reading("ほん").unwrap().unwrap().headword, "本");
    }

    #[test]
    fn first_entry_for_a_key_wins() {
        let source = MemorySource::from_entries(
            "core",
            [
                Definition::new("本", "ほん", "noun", "book"),
                Definition::new("本", "もと", "noun", "origin"),
            ],
        );
        assert_eq!(source.lookup_by_key("本").unwrap().unwrap().gloss, "book");
    }
}
