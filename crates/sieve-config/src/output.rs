use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    "kanji sieve output".to_string()
}

fn default_flashcard_dir() -> String {
    "flashcards output".to_string()
}

fn default_glossary_dir() -> String {
    "glossary output".to_string()
}

fn default_furigana_dir() -> String {
    "removefurigana output".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the per-grade kanji breakdown in the report
    #[serde(default = "default_true")]
    pub classify_by_grade: bool,
    /// Write the tab-separated flashcard file
    #[serde(default = "default_true")]
    pub emit_flashcards: bool,
    /// Append to orphans.md and write the reusable orphan list
    #[serde(default = "default_true")]
    pub emit_orphans_file: bool,
    /// Include the orphan links section in the report
    #[serde(default = "default_true")]
    pub show_orphans: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_flashcard_dir")]
    pub flashcard_dir: String,
    #[serde(default = "default_glossary_dir")]
    pub glossary_dir: String,
    #[serde(default = "default_furigana_dir")]
    pub furigana_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            classify_by_grade: default_true(),
            emit_flashcards: default_true(),
            emit_orphans_file: default_true(),
            show_orphans: default_true(),
            output_dir: default_output_dir(),
            flashcard_dir: default_flashcard_dir(),
            glossary_dir: default_glossary_dir(),
            furigana_dir: default_furigana_dir(),
        }
    }
}
