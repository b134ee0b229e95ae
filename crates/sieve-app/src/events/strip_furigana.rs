use std::path::{Path, PathBuf};

use sieve_config::Preferences;

use super::{read_input, stem_of};

/// Drop furigana lines from OCR output; writes next to `output` or into the furigana dir
pub fn handle_strip_furigana(
    file: &Path,
    output: Option<&Path>,
    prefs: &Preferences,
) -> anyhow::Result<PathBuf> {
    let text = read_input(file)?;
    let stripped = sieve_lang_japanese::strip_furigana(&text)?;

    let path = match output {
        Some(output) => {
            let dir = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow::anyhow!("Invalid output path {}", output.display()))?;
            sieve_io::write_new(dir, &name, &stripped)?
        }
        None => sieve_io::write_new(
            Path::new(&prefs.output.furigana_dir),
            &format!("{}_noruby.txt", stem_of(file)),
            &stripped,
        )?,
    };
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const OCR: &str = "にほんご\n日本語の文章を読むのは楽しいです\n終わり。\n";

    #[test]
    fn default_destination_is_furigana_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.txt");
        fs::write(&input, OCR).unwrap();
        let mut prefs = Preferences::default();
        prefs.output.furigana_dir = dir.path().join("noruby").display().to_string();

        let path = handle_strip_furigana(&input, None, &prefs).unwrap();
        assert!(path.ends_with("scan_noruby.txt"));
        assert!(!fs::read_to_string(path).unwrap().contains("にほんご"));
    }

    #[test]
    fn explicit_output_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.txt");
        fs::write(&input, OCR).unwrap();
        let output = dir.path().join("clean.txt");
        fs::write(&output, "keep me").unwrap();

        let path = handle_strip_furigana(&input, Some(&output), &Preferences::default()).unwrap();
        assert_eq!(path, dir.path().join("clean_2.txt"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn empty_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blank.txt");
        fs::write(&input, "\n\n").unwrap();

        assert!(handle_strip_furigana(&input, None, &Preferences::default()).is_err());
    }
}
