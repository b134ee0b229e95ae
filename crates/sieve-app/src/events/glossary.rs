use std::path::{Path, PathBuf};

use anyhow::Context;
use sieve_core::report;

use super::{document, stem_of, timestamp};
use crate::controller::SieveController;

/// Resolve a word list (an earlier run's orphan list, say) into a glossary file
pub fn handle_glossary(wordlist: &Path, controller: &SieveController<'_>) -> anyhow::Result<PathBuf> {
    let words = sieve_io::load_word_list(wordlist)
        .with_context(|| format!("Failed to read {}", wordlist.display()))?;
    if words.is_empty() {
        anyhow::bail!("No words in {}", wordlist.display());
    }
    tracing::info!(words = words.len(), "word list loaded");

    let sources = controller.open_sources()?;
    let resolution = sieve_lang_japanese::glossary(&words, &sources.layers())?;
    let markdown = report::assemble_glossary(&resolution, controller.report_options()).to_markdown();

    let prefs = controller.prefs();
    let stem = stem_of(wordlist);
    let path = sieve_io::write_new(
        Path::new(&prefs.output.glossary_dir),
        &format!("{stem}_{}_s.md", prefs.link),
        &document(&stem, &timestamp(), Some("Glossary"), &markdown),
    )?;
    Ok(path)
}
