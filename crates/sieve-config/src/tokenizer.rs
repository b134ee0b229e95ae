use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Compiled vibrato system dictionary; the script-run segmenter is used when unset
    pub dictionary: Option<String>,
    /// Apply NFKC to the input before analysis
    pub normalize: bool,
}
