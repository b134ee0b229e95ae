use std::path::Path;

use anyhow::Context;

pub mod glossary;
pub mod prefs;
pub mod sieve_file;
pub mod strip_furigana;

pub use glossary::handle_glossary;
pub use prefs::{handle_prefs_set, handle_prefs_show};
pub use sieve_file::{SieveArtifacts, handle_sieve_file};
pub use strip_furigana::handle_strip_furigana;

/// File stem every artifact of a run is named after
pub(crate) fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

pub(crate) fn read_input(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Local time in `ctime` layout
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

pub(crate) fn document(stem: &str, stamp: &str, heading: Option<&str>, body: &str) -> String {
    let mut doc = format!("### {stem}  \n_{stamp}_  \n\n");
    if let Some(heading) = heading {
        doc.push_str(&format!("__{heading}:__  \n\n"));
    }
    doc.push_str(body);
    doc.push_str(&format!(
        "\n_generated with kanji-sieve {}_\n",
        env!("CARGO_PKG_VERSION")
    ));
    doc
}
