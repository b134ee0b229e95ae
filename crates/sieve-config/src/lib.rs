use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use self::error::ConfigError;
pub use self::link::LinkScheme;
pub use self::output::OutputConfig;
pub use self::sources::{SourceConfig, SourceKind, SourcesConfig};
pub use self::tokenizer::TokenizerConfig;

pub mod error;
pub mod link;
pub mod output;
pub mod sources;
pub mod tokenizer;

fn default_link() -> LinkScheme {
    LinkScheme::Weblio
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_substitutions() -> String {
    "sub.csv".to_string()
}

fn default_omissions() -> String {
    "omit.csv".to_string()
}

/// Session preferences.
///
/// A value is never mutated while a run uses it: every toggle goes through
/// [`Preferences::with_setting`] or one of the `with_*` builders and yields a
/// new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(default = "default_link")]
    pub link: LinkScheme,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub tokenizer: TokenizerConfig,

    /// Directory holding dictionaries and the user lists
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// `term,replacement` list, relative to `data_dir`
    #[serde(default = "default_substitutions")]
    pub substitutions: String,
    /// Terms never searched, relative to `data_dir`
    #[serde(default = "default_omissions")]
    pub omissions: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            link: default_link(),
            sources: SourcesConfig::default(),
            output: OutputConfig::default(),
            tokenizer: TokenizerConfig::default(),
            data_dir: default_data_dir(),
            substitutions: default_substitutions(),
            omissions: default_omissions(),
        }
    }
}

impl Preferences {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `SIEVE_DATA_DIR`, `SIEVE_OUTPUT_DIR` and `SIEVE_LINK` when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = env::var("SIEVE_DATA_DIR") {
            self.data_dir = dir;
        }
        if let Ok(dir) = env::var("SIEVE_OUTPUT_DIR") {
            self.output.output_dir = dir;
        }
        if let Some(link) = env::var("SIEVE_LINK").ok().and_then(|v| v.parse().ok()) {
            self.link = link;
        }
        self
    }

    pub fn with_link(mut self, link: LinkScheme) -> Self {
        self.link = link;
        self
    }

    pub fn with_source(mut self, kind: SourceKind, enabled: bool) -> Self {
        self.sources = self.sources.with_enabled(kind, enabled);
        self
    }

    pub fn with_grades(mut self, enabled: bool) -> Self {
        self.output.classify_by_grade = enabled;
        self
    }

    /// Apply one flat `key = value` toggle, the way the preference form edits them
    pub fn with_setting(self, key: &str, value: &str) -> Result<Self, ConfigError> {
        let flag = || parse_flag(key, value);
        let mut next = self;
        match key {
            "link" | "dict" => next.link = value.parse()?,
            "grades" => next.output.classify_by_grade = flag()?,
            "flashcards" => next.output.emit_flashcards = flag()?,
            "orphans_file" => next.output.emit_orphans_file = flag()?,
            "orphans" => next.output.show_orphans = flag()?,
            "normalize" => next.tokenizer.normalize = flag()?,
            "data_dir" => next.data_dir = value.to_string(),
            "output_dir" => next.output.output_dir = value.to_string(),
            "tokenizer_dictionary" => {
                next.tokenizer.dictionary = (!value.is_empty()).then(|| value.to_string())
            }
            other => match other.parse::<SourceKind>() {
                Ok(kind) => next = next.with_source(kind, flag()?),
                Err(_) => return Err(ConfigError::UnknownKey(key.to_string())),
            },
        }
        Ok(next)
    }

    /// Flat view of the toggles, in the same keys `with_setting` accepts
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let mut settings = vec![("link", self.link.to_string())];
        for kind in SourceKind::ALL {
            settings.push((kind.as_str(), flag_str(self.sources.is_enabled(kind))));
        }
        settings.extend([
            ("grades", flag_str(self.output.classify_by_grade)),
            ("flashcards", flag_str(self.output.emit_flashcards)),
            ("orphans_file", flag_str(self.output.emit_orphans_file)),
            ("orphans", flag_str(self.output.show_orphans)),
            ("normalize", flag_str(self.tokenizer.normalize)),
            ("data_dir", self.data_dir.clone()),
            ("output_dir", self.output.output_dir.clone()),
            (
                "tokenizer_dictionary",
                self.tokenizer.dictionary.clone().unwrap_or_default(),
            ),
        ]);
        settings
    }

    /// Resolve a data file name against `data_dir` unless it is absolute
    pub fn data_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.data_dir).join(path)
        }
    }

    pub fn source_path(&self, kind: SourceKind) -> PathBuf {
        self.data_path(&self.sources.get(kind).path)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn flag_str(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_source_and_output() {
        let prefs = Preferences::default();
        assert_eq!(prefs.link, LinkScheme::Weblio);
        assert!(SourceKind::ALL.iter().all(|k| prefs.sources.is_enabled(*k)));
        assert!(prefs.output.classify_by_grade);
        assert!(prefs.output.emit_flashcards);
        assert!(prefs.output.emit_orphans_file);
        assert!(prefs.output.show_orphans);
    }

    #[test]
    fn with_setting_returns_new_value() {
        let prefs = Preferences::default();
        let toggled = prefs.clone().with_setting("core", "0").unwrap();

        assert!(prefs.sources.is_enabled(SourceKind::Core));
        assert!(!toggled.sources.is_enabled(SourceKind::Core));

        let relinked = toggled.with_setting("dict", "jisho").unwrap();
        assert_eq!(relinked.link, LinkScheme::Jisho);
    }

    #[test]
    fn with_setting_rejects_unknown_keys_and_values() {
        let prefs = Preferences::default();
        assert!(matches!(
            prefs.clone().with_setting("colour", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            prefs.clone().with_setting("grades", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            prefs.with_setting("link", "goo"),
            Err(ConfigError::UnknownLinkScheme(_))
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "link": "wik-eng", "sources": { "user": { "enabled": false, "path": "mine.db" } } }"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();

        assert_eq!(prefs.link, LinkScheme::WiktionaryEnglish);
        assert!(!prefs.sources.user.enabled);
        assert_eq!(prefs.sources.user.path, "mine.db");
        assert_eq!(prefs.sources.core.path, "core.db");
        assert_eq!(prefs.sources.order, SourceKind::ALL.to_vec());
        assert_eq!(prefs.substitutions, "sub.csv");
    }

    #[test]
    fn chain_follows_configured_order_once() {
        let mut sources = SourcesConfig::default();
        sources.order = vec![SourceKind::Jmdict, SourceKind::Core, SourceKind::Jmdict];
        let kinds: Vec<_> = sources.chain().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![SourceKind::Jmdict, SourceKind::Core]);
    }

    #[test]
    fn link_urls_are_plain_concatenation() {
        assert_eq!(
            LinkScheme::Jisho.url_for("猫"),
            "https://jisho.org/search/猫"
        );
        assert_eq!(
            LinkScheme::WiktionaryEnglish.url_for("猫"),
            "https://en.m.wiktionary.org/wiki/猫#Japanese"
        );
        assert_eq!("wiktionary".parse::<LinkScheme>().unwrap(), LinkScheme::WiktionaryEnglish);
    }

    #[test]
    fn data_path_keeps_absolute_paths() {
        let prefs = Preferences::default();
        assert_eq!(prefs.data_path("sub.csv"), Path::new("data").join("sub.csv"));
        let absolute = if cfg!(windows) { r"C:\dicts\core.db" } else { "/dicts/core.db" };
        assert_eq!(prefs.data_path(absolute), PathBuf::from(absolute));
    }
}
