use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// External dictionary that report entries link to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkScheme {
    #[serde(rename = "reikoku")]
    Reikoku,
    #[serde(rename = "weblio")]
    Weblio,
    #[serde(rename = "jisho")]
    Jisho,
    #[serde(rename = "eijiro")]
    Eijiro,
    #[serde(rename = "wik-eng")]
    WiktionaryEnglish,
    #[serde(rename = "wik-jpn")]
    WiktionaryJapanese,
}

impl LinkScheme {
    pub const ALL: [LinkScheme; 6] = [
        LinkScheme::Reikoku,
        LinkScheme::Weblio,
        LinkScheme::Jisho,
        LinkScheme::Eijiro,
        LinkScheme::WiktionaryEnglish,
        LinkScheme::WiktionaryJapanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkScheme::Reikoku => "reikoku",
            LinkScheme::Weblio => "weblio",
            LinkScheme::Jisho => "jisho",
            LinkScheme::Eijiro => "eijiro",
            LinkScheme::WiktionaryEnglish => "wik-eng",
            LinkScheme::WiktionaryJapanese => "wik-jpn",
        }
    }

    /// Prefix the term is appended to
    pub fn base(&self) -> &'static str {
        match self {
            LinkScheme::Reikoku => "mkreikoku:///search?text=",
            LinkScheme::Weblio => "https://ejje.weblio.jp/content/",
            LinkScheme::Jisho => "https://jisho.org/search/",
            LinkScheme::Eijiro => "https://eow.alc.co.jp/search?q=",
            LinkScheme::WiktionaryEnglish => "https://en.m.wiktionary.org/wiki/",
            LinkScheme::WiktionaryJapanese => "https://ja.m.wiktionary.org/wiki/",
        }
    }

    /// Fragment appended after the term, empty for most schemes
    pub fn postfix(&self) -> &'static str {
        match self {
            LinkScheme::WiktionaryEnglish => "#Japanese",
            LinkScheme::WiktionaryJapanese => "#日本語",
            _ => "",
        }
    }

    /// Plain concatenation, the term is not percent-encoded
    pub fn url_for(&self, term: &str) -> String {
        format!("{}{}{}", self.base(), term, self.postfix())
    }
}

impl fmt::Display for LinkScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        // "wiktionary" was the only wiktionary choice before the language split
        if wanted == "wiktionary" {
            return Ok(LinkScheme::WiktionaryEnglish);
        }
        LinkScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownLinkScheme(s.to_string()))
    }
}
